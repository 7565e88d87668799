//! Imported mesh geometry
//!
//! `MeshSource` is the product of the (out-of-scope) import pipeline:
//! flat vertex/index buffers plus submesh ranges, a node hierarchy and
//! bounding boxes. It is also the unit the `.emsh` binary container
//! persists.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Interleaved vertex layout used by all Ember geometry
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
pub struct Vertex {
    /// Object-space position
    pub position: [f32; 3],
    /// Object-space normal (normalized)
    pub normal: [f32; 3],
    /// Texture coordinates
    pub uv: [f32; 2],
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    /// An inverted box that grows from the first point added
    pub fn empty() -> Self {
        Self {
            min: [f32::MAX; 3],
            max: [f32::MIN; 3],
        }
    }

    /// Grow to include a point
    pub fn grow(&mut self, p: [f32; 3]) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    /// Bounding box of a vertex slice
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let mut aabb = Self::empty();
        for v in vertices {
            aabb.grow(v.position);
        }
        aabb
    }
}

/// A contiguous index range drawn with one material
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Submesh {
    /// Offset added to each index
    pub base_vertex: u32,
    /// First index in the shared index buffer
    pub base_index: u32,
    /// Number of indices (multiple of 3)
    pub index_count: u32,
    /// Material slot this submesh binds
    pub material_index: u32,
    /// Object-space bounds of this range
    pub bounds: Aabb,
}

/// A node in the imported hierarchy
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshNode {
    /// Node name from the source file
    pub name: String,
    /// Parent node index, -1 for roots
    pub parent: i32,
    /// Local transform, column-major 4x4
    pub transform: [[f32; 4]; 4],
    /// Submesh indices attached to this node
    pub submeshes: Vec<u32>,
}

impl MeshNode {
    /// Root node with identity transform
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: -1,
            transform: IDENTITY,
            submeshes: Vec::new(),
        }
    }
}

const IDENTITY: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Imported mesh geometry with submesh and node tables
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshSource {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub submeshes: Vec<Submesh>,
    pub nodes: Vec<MeshNode>,
    pub bounds: Aabb,
}

impl MeshSource {
    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Triangle count across all submeshes
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Recompute `bounds` and per-submesh bounds from the vertex data
    pub fn recompute_bounds(&mut self) {
        self.bounds = Aabb::from_vertices(&self.vertices);
        for sm in &mut self.submeshes {
            let mut aabb = Aabb::empty();
            let start = sm.base_index as usize;
            let end = (sm.base_index + sm.index_count) as usize;
            for &idx in &self.indices[start..end.min(self.indices.len())] {
                let vi = (idx + sm.base_vertex) as usize;
                if let Some(v) = self.vertices.get(vi) {
                    aabb.grow(v.position);
                }
            }
            sm.bounds = aabb;
        }
    }

    /// Generate a UV sphere with the given tessellation
    ///
    /// Used by the material preview scene; normals point outward, UVs
    /// wrap equirectangular.
    pub fn uv_sphere(radius: f32, sectors: u32, stacks: u32) -> Self {
        let sectors = sectors.max(3);
        let stacks = stacks.max(2);

        let mut vertices = Vec::with_capacity(((stacks + 1) * (sectors + 1)) as usize);
        for stack in 0..=stacks {
            let phi = std::f32::consts::PI * stack as f32 / stacks as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for sector in 0..=sectors {
                let theta = 2.0 * std::f32::consts::PI * sector as f32 / sectors as f32;
                let (sin_theta, cos_theta) = theta.sin_cos();

                let n = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
                vertices.push(Vertex {
                    position: [n[0] * radius, n[1] * radius, n[2] * radius],
                    normal: n,
                    uv: [
                        sector as f32 / sectors as f32,
                        stack as f32 / stacks as f32,
                    ],
                });
            }
        }

        let mut indices = Vec::with_capacity((stacks * sectors * 6) as usize);
        for stack in 0..stacks {
            for sector in 0..sectors {
                let a = stack * (sectors + 1) + sector;
                let b = a + sectors + 1;
                if stack != 0 {
                    indices.extend_from_slice(&[a, b, a + 1]);
                }
                if stack != stacks - 1 {
                    indices.extend_from_slice(&[a + 1, b, b + 1]);
                }
            }
        }

        let mut mesh = Self {
            submeshes: vec![Submesh {
                base_vertex: 0,
                base_index: 0,
                index_count: indices.len() as u32,
                material_index: 0,
                bounds: Aabb::empty(),
            }],
            nodes: vec![{
                let mut node = MeshNode::root("sphere");
                node.submeshes.push(0);
                node
            }],
            vertices,
            indices,
            bounds: Aabb::empty(),
        };
        mesh.recompute_bounds();
        mesh
    }
}
