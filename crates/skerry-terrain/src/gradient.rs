//! Seeded 2D gradient noise and squared-octave fractal composition.
//!
//! The permutation table is derived from the seed by a fixed swap rule rather
//! than a uniform shuffle, so every table (and therefore every height field)
//! is reproducible from the seed alone.

use noise::NoiseFn;

/// Added weight on every squared octave sample.
pub const HEIGHT_BIAS: f64 = 0.1;

/// Frequency multiplier between octaves.
pub const LACUNARITY: f64 = 2.1;

const TABLE_SIZE: usize = 256;

/// Classic 2D gradient noise over a seed-derived permutation table.
#[derive(Clone, Debug)]
pub struct GradientNoise {
    seed: u64,
    table: [u8; TABLE_SIZE * 2],
}

impl GradientNoise {
    /// Build the permutation table for `seed`.
    ///
    /// Starting from the identity, for `i` in `255..=1` entry `i` is swapped
    /// with entry `(seed * i) mod 256`. The table is then doubled to 512
    /// entries so corner lookups never need to wrap.
    pub fn new(seed: u64) -> Self {
        let mut permutation = [0u8; TABLE_SIZE];
        for (i, slot) in permutation.iter_mut().enumerate() {
            *slot = i as u8;
        }

        // (seed * i) mod 256 == ((seed mod 256) * i) mod 256, and this form cannot overflow.
        let seed_mod = seed % TABLE_SIZE as u64;
        for i in (1..TABLE_SIZE).rev() {
            let j = (seed_mod * i as u64 % TABLE_SIZE as u64) as usize;
            permutation.swap(i, j);
        }

        let mut table = [0u8; TABLE_SIZE * 2];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = permutation[i & (TABLE_SIZE - 1)];
        }

        Self { seed, table }
    }

    /// The seed this generator was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The doubled 512-entry permutation table.
    pub fn permutation(&self) -> &[u8; TABLE_SIZE * 2] {
        &self.table
    }

    /// Sample gradient noise at `(x, z)`.
    ///
    /// Zero at every integer lattice point.
    pub fn noise2d(&self, x: f64, z: f64) -> f64 {
        let x_floor = libm::floor(x);
        let z_floor = libm::floor(z);
        let xi = (x_floor as i64 & 255) as usize;
        let zi = (z_floor as i64 & 255) as usize;

        let x = x - x_floor;
        let z = z - z_floor;
        let u = fade(x);
        let v = fade(z);

        let p = &self.table;
        let a = p[xi] as usize + zi;
        let b = p[xi + 1] as usize + zi;

        lerp(
            v,
            lerp(u, grad(p[a], x, z), grad(p[b], x - 1.0, z)),
            lerp(u, grad(p[a + 1], x, z - 1.0), grad(p[b + 1], x - 1.0, z - 1.0)),
        )
    }

    /// Multi-octave composition of squared noise samples.
    ///
    /// Each octave adds `amplitude * noise² * (1 + HEIGHT_BIAS)` while the
    /// normalizer accumulates the raw amplitudes, so the result is not bounded
    /// to `[-1, 1]`. Height calibration downstream depends on this exact
    /// distribution. Returns `0.0` for zero octaves.
    pub fn fractal_noise(&self, x: f64, z: f64, octaves: u32, persistence: f64) -> f64 {
        if octaves == 0 {
            return 0.0;
        }

        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves {
            let sample = self.noise2d(x * frequency, z * frequency);
            value += amplitude * (sample * sample) * (1.0 + HEIGHT_BIAS);
            max_value += amplitude;

            amplitude *= persistence;
            frequency *= LACUNARITY;
        }

        value / max_value
    }
}

impl NoiseFn<f64, 2> for GradientNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.noise2d(point[0], point[1])
    }
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Select and sign the gradient components from the low 4 bits of `hash`.
#[inline]
fn grad(hash: u8, x: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { z };
    let v = if h < 4 {
        z
    } else if h == 12 || h == 14 {
        x
    } else {
        0.0
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutation_is_a_permutation() {
        for seed in [0, 1, 42, 255, 9_999] {
            let noise = GradientNoise::new(seed);
            let mut first_half: Vec<u8> = noise.permutation()[..256].to_vec();
            first_half.sort_unstable();
            let identity: Vec<u8> = (0..=255).collect();
            assert_eq!(first_half, identity, "seed {seed} table is not a permutation");
        }
    }

    #[test]
    fn test_permutation_is_doubled() {
        let noise = GradientNoise::new(1234);
        let table = noise.permutation();
        for i in 0..256 {
            assert_eq!(table[i], table[i + 256], "mismatch at {i}");
        }
    }

    #[test]
    fn test_seed_zero_swap_rule_rotates_table() {
        // With seed 0 every swap partner is index 0, which rotates the identity left by one.
        let noise = GradientNoise::new(0);
        let table = noise.permutation();
        for k in 0..255 {
            assert_eq!(table[k] as usize, k + 1);
        }
        assert_eq!(table[255], 0);
    }

    #[test]
    fn test_swap_rule_depends_on_seed_mod_256() {
        let a = GradientNoise::new(3);
        let b = GradientNoise::new(3 + 256);
        let c = GradientNoise::new(4);
        assert_eq!(a.permutation(), b.permutation());
        assert_ne!(a.permutation(), c.permutation());
    }

    #[test]
    fn test_noise_deterministic() {
        let a = GradientNoise::new(42);
        let b = GradientNoise::new(42);
        for i in 0..200 {
            let x = i as f64 * 0.173 - 7.0;
            let z = i as f64 * 0.311 + 2.5;
            assert_eq!(a.noise2d(x, z).to_bits(), b.noise2d(x, z).to_bits());
            assert_eq!(
                a.fractal_noise(x, z, 6, 0.5).to_bits(),
                b.fractal_noise(x, z, 6, 0.5).to_bits()
            );
        }
    }

    #[test]
    fn test_noise_zero_on_lattice() {
        let noise = GradientNoise::new(77);
        for x in -3..3 {
            for z in -3..3 {
                assert_eq!(noise.noise2d(x as f64, z as f64), 0.0);
            }
        }
    }

    #[test]
    fn test_noise_bounded_and_varies() {
        let noise = GradientNoise::new(5);
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for i in 0..100 {
            for j in 0..100 {
                let n = noise.noise2d(i as f64 * 0.137, j as f64 * 0.093);
                assert!(n.abs() <= 2.0, "sample {n} out of bounds");
                min = min.min(n);
                max = max.max(n);
            }
        }
        assert!(max - min > 0.5, "noise is nearly flat: [{min}, {max}]");
    }

    #[test]
    fn test_noise_handles_negative_coordinates() {
        let noise = GradientNoise::new(8);
        let n = noise.noise2d(-0.5, -10.25);
        assert!(n.is_finite());
    }

    #[test]
    fn test_single_octave_is_biased_square() {
        let noise = GradientNoise::new(42);
        for persistence in [0.1, 0.5, 0.9, 3.0] {
            for &(x, z) in &[(0.3, 0.7), (-1.2, 4.4), (12.5, -0.25)] {
                let n = noise.noise2d(x, z);
                assert_eq!(
                    noise.fractal_noise(x, z, 1, persistence),
                    n * n * (1.0 + HEIGHT_BIAS)
                );
            }
        }
    }

    #[test]
    fn test_fractal_is_non_negative() {
        let noise = GradientNoise::new(11);
        for i in 0..500 {
            let x = i as f64 * 0.05;
            assert!(noise.fractal_noise(x, -x, 6, 0.5) >= 0.0);
        }
    }

    #[test]
    fn test_zero_octaves_returns_zero() {
        let noise = GradientNoise::new(1);
        assert_eq!(noise.fractal_noise(0.4, 0.6, 0, 0.5), 0.0);
    }

    #[test]
    fn test_noise_fn_matches_noise2d() {
        let noise = GradientNoise::new(19);
        assert_eq!(noise.get([0.25, 0.75]), noise.noise2d(0.25, 0.75));
    }
}
