//! Height-band biome classification over an ordered table.
//!
//! Ranges are inclusive on both ends and adjacent entries share their
//! boundary values, so table order decides ties: the earlier entry wins.

use hashbrown::HashMap;

/// Reference height for triangle-level lookups (e.g. ground queries).
///
/// Independent of the configurable `base_world_height` used while the
/// terrain mesh is assembled; the two are kept separate on purpose and give
/// different answers once `base_world_height` is changed from 400.
pub const TRIANGLE_REFERENCE_HEIGHT: f64 = 400.0;

/// Named height band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Biome {
    OceanDeep,
    Ocean,
    Beach,
    Dunes,
    Lowland,
    Highland,
    Treeline,
    Mountain,
    Snow,
}

impl Biome {
    /// Every biome in table order.
    pub const ALL: [Biome; 9] = [
        Biome::OceanDeep,
        Biome::Ocean,
        Biome::Beach,
        Biome::Dunes,
        Biome::Lowland,
        Biome::Highland,
        Biome::Treeline,
        Biome::Mountain,
        Biome::Snow,
    ];

    /// Upper-snake-case display name, e.g. `"OCEAN_DEEP"`.
    pub fn name(self) -> &'static str {
        match self {
            Biome::OceanDeep => "OCEAN_DEEP",
            Biome::Ocean => "OCEAN",
            Biome::Beach => "BEACH",
            Biome::Dunes => "DUNES",
            Biome::Lowland => "LOWLAND",
            Biome::Highland => "HIGHLAND",
            Biome::Treeline => "TREELINE",
            Biome::Mountain => "MOUNTAIN",
            Biome::Snow => "SNOW",
        }
    }
}

/// sRGB color used for procedural texturing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BiomeColor(pub [u8; 3]);

impl BiomeColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Channels scaled to `[0.0, 1.0]`, as vertex color attributes expect.
    pub fn to_f32(self) -> [f32; 3] {
        let [r, g, b] = self.0;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }
}

/// One row of the classification table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeType {
    pub biome: Biome,
    /// Inclusive `[lo, hi]` range of height percent.
    pub height_range_percent: (f64, f64),
    pub color: BiomeColor,
}

impl BiomeType {
    /// Returns `true` if `percent` lies within the inclusive range.
    pub fn contains(&self, percent: f64) -> bool {
        let (lo, hi) = self.height_range_percent;
        percent >= lo && percent <= hi
    }
}

/// Maps heights to biomes by first match over an ordered table.
#[derive(Clone, Debug)]
pub struct BiomeClassifier {
    table: Vec<BiomeType>,
    fallback: BiomeType,
    name_to_index: HashMap<&'static str, usize>,
}

impl BiomeClassifier {
    /// Build a classifier from an ordered table and the entry returned when nothing matches.
    ///
    /// If a biome appears more than once, name lookup resolves to its first row.
    pub fn new(table: Vec<BiomeType>, fallback: BiomeType) -> Self {
        let mut name_to_index = HashMap::with_capacity(table.len());
        for (i, entry) in table.iter().enumerate() {
            name_to_index.entry(entry.biome.name()).or_insert(i);
        }
        Self {
            table,
            fallback,
            name_to_index,
        }
    }

    /// The standard nine-band table, ocean floor to snow caps.
    pub fn standard() -> Self {
        let ocean = BiomeType {
            biome: Biome::Ocean,
            height_range_percent: (0.0, 0.0),
            color: BiomeColor::rgb(32, 96, 176),
        };
        let table = vec![
            BiomeType {
                biome: Biome::OceanDeep,
                height_range_percent: (0.0, 0.0),
                color: BiomeColor::rgb(16, 48, 112),
            },
            ocean,
            BiomeType {
                biome: Biome::Beach,
                height_range_percent: (0.0, 0.1),
                color: BiomeColor::rgb(238, 214, 175),
            },
            BiomeType {
                biome: Biome::Dunes,
                height_range_percent: (0.1, 2.0),
                color: BiomeColor::rgb(214, 190, 130),
            },
            BiomeType {
                biome: Biome::Lowland,
                height_range_percent: (2.0, 15.0),
                color: BiomeColor::rgb(96, 160, 64),
            },
            BiomeType {
                biome: Biome::Highland,
                height_range_percent: (15.0, 40.0),
                color: BiomeColor::rgb(70, 120, 50),
            },
            BiomeType {
                biome: Biome::Treeline,
                height_range_percent: (40.0, 50.0),
                color: BiomeColor::rgb(90, 100, 70),
            },
            BiomeType {
                biome: Biome::Mountain,
                height_range_percent: (50.0, 90.0),
                color: BiomeColor::rgb(128, 120, 112),
            },
            BiomeType {
                biome: Biome::Snow,
                height_range_percent: (90.0, 100.0),
                color: BiomeColor::rgb(245, 245, 250),
            },
        ];
        Self::new(table, ocean)
    }

    /// First table entry whose range contains `percent`, or the fallback.
    pub fn lookup_percent(&self, percent: f64) -> &BiomeType {
        self.table
            .iter()
            .find(|entry| entry.contains(percent))
            .unwrap_or(&self.fallback)
    }

    /// Classify an average height against `reference_height`.
    ///
    /// Non-positive heights are deep ocean and heights at or above the
    /// reference are snow; everything between is looked up as a percentage.
    pub fn classify_height(&self, avg_height: f64, reference_height: f64) -> &BiomeType {
        if avg_height <= 0.0 {
            return self.entry_or_fallback(Biome::OceanDeep);
        }
        if avg_height >= reference_height {
            return self.entry_or_fallback(Biome::Snow);
        }
        self.lookup_percent(avg_height / reference_height * 100.0)
    }

    /// Classify a triangle's average height against [`TRIANGLE_REFERENCE_HEIGHT`].
    pub fn classify_triangle_height(&self, avg_height: f64) -> &BiomeType {
        self.classify_height(avg_height, TRIANGLE_REFERENCE_HEIGHT)
    }

    /// The first row for `biome`, if the table has one.
    pub fn get(&self, biome: Biome) -> Option<&BiomeType> {
        self.lookup_by_name(biome.name())
    }

    /// Looks up a row by its display name.
    pub fn lookup_by_name(&self, name: &str) -> Option<&BiomeType> {
        self.name_to_index.get(name).map(|&i| &self.table[i])
    }

    /// Rows in declaration order.
    pub fn entries(&self) -> &[BiomeType] {
        &self.table
    }

    pub fn fallback(&self) -> &BiomeType {
        &self.fallback
    }

    fn entry_or_fallback(&self, biome: Biome) -> &BiomeType {
        self.get(biome).unwrap_or(&self.fallback)
    }
}

impl Default for BiomeClassifier {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_biome_order() {
        let classifier = BiomeClassifier::standard();
        let order: Vec<Biome> = classifier.entries().iter().map(|e| e.biome).collect();
        assert_eq!(order, Biome::ALL.to_vec());
    }

    #[test]
    fn test_shared_boundary_prefers_earlier_entry() {
        let classifier = BiomeClassifier::standard();
        assert_eq!(classifier.lookup_percent(0.1).biome, Biome::Beach);
        assert_eq!(classifier.lookup_percent(2.0).biome, Biome::Dunes);
        assert_eq!(classifier.lookup_percent(15.0).biome, Biome::Lowland);
        assert_eq!(classifier.lookup_percent(50.0).biome, Biome::Treeline);
        assert_eq!(classifier.lookup_percent(90.0).biome, Biome::Mountain);
    }

    #[test]
    fn test_zero_percent_is_deep_ocean() {
        let classifier = BiomeClassifier::standard();
        assert_eq!(classifier.lookup_percent(0.0).biome, Biome::OceanDeep);
    }

    #[test]
    fn test_interior_values() {
        let classifier = BiomeClassifier::standard();
        assert_eq!(classifier.lookup_percent(0.05).biome, Biome::Beach);
        assert_eq!(classifier.lookup_percent(1.0).biome, Biome::Dunes);
        assert_eq!(classifier.lookup_percent(10.0).biome, Biome::Lowland);
        assert_eq!(classifier.lookup_percent(30.0).biome, Biome::Highland);
        assert_eq!(classifier.lookup_percent(45.0).biome, Biome::Treeline);
        assert_eq!(classifier.lookup_percent(70.0).biome, Biome::Mountain);
        assert_eq!(classifier.lookup_percent(95.0).biome, Biome::Snow);
    }

    #[test]
    fn test_unmatched_percent_falls_back_to_ocean() {
        let classifier = BiomeClassifier::standard();
        assert_eq!(classifier.lookup_percent(150.0).biome, Biome::Ocean);
        assert_eq!(classifier.lookup_percent(-5.0).biome, Biome::Ocean);
        assert_eq!(classifier.lookup_percent(f64::NAN).biome, Biome::Ocean);
    }

    #[test]
    fn test_triangle_height_shortcuts() {
        let classifier = BiomeClassifier::standard();
        assert_eq!(classifier.classify_triangle_height(0.0).biome, Biome::OceanDeep);
        assert_eq!(classifier.classify_triangle_height(-3.0).biome, Biome::OceanDeep);
        assert_eq!(classifier.classify_triangle_height(400.0).biome, Biome::Snow);
        assert_eq!(classifier.classify_triangle_height(5_000.0).biome, Biome::Snow);
        assert_eq!(classifier.classify_triangle_height(0.2).biome, Biome::Beach);
        assert_eq!(classifier.classify_triangle_height(4.0).biome, Biome::Dunes);
        assert_eq!(classifier.classify_triangle_height(100.0).biome, Biome::Highland);
    }

    #[test]
    fn test_reference_heights_diverge() {
        let classifier = BiomeClassifier::standard();
        // 100 units is HIGHLAND against 400 but MOUNTAIN against a 150-unit world.
        assert_eq!(classifier.classify_height(100.0, 150.0).biome, Biome::Mountain);
        assert_eq!(classifier.classify_triangle_height(100.0).biome, Biome::Highland);
    }

    #[test]
    fn test_lookup_by_name() {
        let classifier = BiomeClassifier::standard();
        assert_eq!(
            classifier.lookup_by_name("TREELINE").map(|e| e.biome),
            Some(Biome::Treeline)
        );
        assert!(classifier.lookup_by_name("JUNGLE").is_none());
    }

    #[test]
    fn test_custom_table_first_match_wins() {
        let wide = BiomeType {
            biome: Biome::Lowland,
            height_range_percent: (0.0, 100.0),
            color: BiomeColor::rgb(0, 255, 0),
        };
        let narrow = BiomeType {
            biome: Biome::Mountain,
            height_range_percent: (40.0, 60.0),
            color: BiomeColor::rgb(100, 100, 100),
        };
        let classifier = BiomeClassifier::new(vec![wide, narrow], wide);
        assert_eq!(classifier.lookup_percent(50.0).biome, Biome::Lowland);
    }

    #[test]
    fn test_color_to_f32() {
        let color = BiomeColor::rgb(255, 0, 51);
        assert_eq!(color.to_f32(), [1.0, 0.0, 0.2]);
    }
}
