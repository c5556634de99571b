//! Grid terrain mesh: vertex/face arena plus materialized triangles.
//!
//! Vertices are laid out row-major with `(resolution + 1)²` entries and each
//! grid cell contributes two faces, so a mesh always has `2 * resolution²`
//! triangles. Triangles are derived once at build time and handed out by
//! shared reference only.

use glam::{DVec2, DVec3};
use skerry_config::WorldConfig;
use tracing::debug;

use crate::biome::{Biome, BiomeClassifier, BiomeColor};
use crate::shaper::{HeightShaper, Shaper};

/// Three indices into [`Terrain::vertices`], in winding order.
pub type Face = [u32; 3];

/// A materialized mesh triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [DVec3; 3],
    /// Unit normal from the vertex winding; points up (+y) on flat ground.
    pub normal: DVec3,
    pub biome: Biome,
    pub color: BiomeColor,
}

impl Triangle {
    pub fn avg_height(&self) -> f64 {
        (self.vertices[0].y + self.vertices[1].y + self.vertices[2].y) / 3.0
    }

    pub fn min_height(&self) -> f64 {
        self.vertices[0].y.min(self.vertices[1].y).min(self.vertices[2].y)
    }

    pub fn max_height(&self) -> f64 {
        self.vertices[0].y.max(self.vertices[1].y).max(self.vertices[2].y)
    }

    /// Mean of the vertices' `(x, z)`.
    pub fn planar_center(&self) -> DVec2 {
        let [a, b, c] = self.vertices;
        DVec2::new((a.x + b.x + c.x) / 3.0, (a.z + b.z + c.z) / 3.0)
    }
}

/// A generated height-field mesh.
#[derive(Clone, Debug)]
pub struct Terrain {
    resolution: u32,
    scale: f64,
    vertices: Vec<DVec3>,
    faces: Vec<Face>,
    normals: Vec<DVec3>,
    triangles: Vec<Triangle>,
}

impl Terrain {
    /// Build the terrain described by `config`.
    ///
    /// Triangle biomes are classified against `config.base_world_height`.
    pub fn generate(config: &WorldConfig, classifier: &BiomeClassifier) -> Self {
        let shaper = Shaper::from_config(config);
        debug!(
            seed = config.seed,
            variant = ?shaper.variant(),
            resolution = config.grid_resolution,
            "Generating terrain"
        );
        Self::from_height_fn(
            config.grid_resolution,
            config.base_world_scale,
            config.base_world_height,
            classifier,
            |u, v| shaper.height_at(u, v),
        )
    }

    /// Build a terrain from any height function of grid-normalized `(u, v)`.
    ///
    /// Vertex `(i, j)` sits at world `((i - res/2) * scale, h, (j - res/2) * scale)`
    /// with `h = height(i / res, j / res)`.
    ///
    /// # Panics
    ///
    /// Panics if `(resolution + 1)^2` vertices cannot be indexed by `u32`.
    /// Validated configs stay far below that.
    pub fn from_height_fn(
        resolution: u32,
        scale: f64,
        biome_reference_height: f64,
        classifier: &BiomeClassifier,
        height: impl Fn(f64, f64) -> f64,
    ) -> Self {
        let res = resolution as usize;
        let half = resolution as f64 / 2.0;
        let row = res + 1;
        let vertex_count = row.checked_mul(row).and_then(|n| u32::try_from(n).ok());
        assert!(
            vertex_count.is_some(),
            "resolution {resolution} exceeds u32 vertex indices"
        );

        let mut vertices = Vec::with_capacity(row * row);
        for j in 0..=res {
            for i in 0..=res {
                let u = i as f64 / resolution as f64;
                let v = j as f64 / resolution as f64;
                vertices.push(DVec3::new(
                    (i as f64 - half) * scale,
                    height(u, v),
                    (j as f64 - half) * scale,
                ));
            }
        }

        let mut faces = Vec::with_capacity(res * res * 2);
        for j in 0..res {
            for i in 0..res {
                let a = (j * row + i) as u32;
                let b = a + 1;
                let c = a + row as u32;
                let d = c + 1;
                // Wound so the normal points +y.
                faces.push([a, c, b]);
                faces.push([b, c, d]);
            }
        }

        let mut normals = Vec::with_capacity(faces.len());
        let mut triangles = Vec::with_capacity(faces.len());
        for face in &faces {
            let corners = face.map(|index| vertices[index as usize]);
            let normal = face_normal(corners);
            let avg = (corners[0].y + corners[1].y + corners[2].y) / 3.0;
            let biome = classifier.classify_height(avg, biome_reference_height);

            normals.push(normal);
            triangles.push(Triangle {
                vertices: corners,
                normal,
                biome: biome.biome,
                color: biome.color,
            });
        }

        debug!(
            vertices = vertices.len(),
            triangles = triangles.len(),
            "Terrain mesh assembled"
        );

        Self {
            resolution,
            scale,
            vertices,
            faces,
            normals,
            triangles,
        }
    }

    /// Grid cells per side.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// World units per grid cell.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Per-face unit normals, parallel to [`Terrain::faces`].
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    /// Materialized triangles, parallel to [`Terrain::faces`].
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangle(&self, index: usize) -> Option<&Triangle> {
        self.triangles.get(index)
    }

    /// Height of the grid vertex at `(i, j)`, if inside the grid.
    pub fn vertex_height(&self, i: u32, j: u32) -> Option<f64> {
        if i > self.resolution || j > self.resolution {
            return None;
        }
        let index = j as usize * (self.resolution as usize + 1) + i as usize;
        self.vertices.get(index).map(|v| v.y)
    }

    /// Half the world extent along each axis.
    pub fn half_extent(&self) -> f64 {
        self.resolution as f64 / 2.0 * self.scale
    }
}

fn face_normal([a, b, c]: [DVec3; 3]) -> DVec3 {
    (b - a).cross(c - a).normalize_or_zero()
}
