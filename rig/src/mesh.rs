use std::mem;

use common::prelude::Vertex;
use glam::{Mat4, Vec3, Vec4};

use crate::document::{LoadError, RigDocument};

/// Bone influence slots per vertex. Fixed by the export format.
pub const BONE_SLOTS: usize = 4;

/// What the vertex buffer holds for one vertex: a rest position plus its
/// bone influences. Laid out to match [`SkinnedVertex::desc`] exactly.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkinnedVertex {
    pub position: Vec3,
    pub bone_ids: [i32; BONE_SLOTS],
    pub weights: [f32; BONE_SLOTS],
}

impl SkinnedVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Sint32x4, 2 => Float32x4];
}

impl Vertex for SkinnedVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<SkinnedVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// The renderable part of a rig document: interleaved vertices plus the
/// triangle index list, ready to upload.
#[derive(Debug)]
pub struct RigMesh {
    pub vertices: Vec<SkinnedVertex>,
    pub indices: Vec<u32>,
}

impl RigMesh {
    /// Interleave the document's flat attribute arrays. This is where the
    /// arrays' shapes are checked against each other: every vertex needs 3
    /// position floats and [`BONE_SLOTS`] ids and weights, and the triangle
    /// list must be whole triangles.
    pub fn from_document(doc: &RigDocument) -> Result<Self, LoadError> {
        if doc.pos.len() % 3 != 0 {
            return Err(LoadError::MalformedDocument(format!(
                "pos holds {} floats, not a whole number of vertices",
                doc.pos.len()
            )));
        }
        let vertex_count = doc.pos.len() / 3;
        if doc.indices.len() != vertex_count * BONE_SLOTS {
            return Err(LoadError::MalformedDocument(format!(
                "indices holds {} bone ids for {} vertices, expected {}",
                doc.indices.len(),
                vertex_count,
                vertex_count * BONE_SLOTS
            )));
        }
        if doc.weight.len() != vertex_count * BONE_SLOTS {
            return Err(LoadError::MalformedDocument(format!(
                "weight holds {} weights for {} vertices, expected {}",
                doc.weight.len(),
                vertex_count,
                vertex_count * BONE_SLOTS
            )));
        }
        if doc.f.len() % 3 != 0 {
            return Err(LoadError::MalformedDocument(format!(
                "f holds {} indices, not a whole number of triangles",
                doc.f.len()
            )));
        }
        if let Some(&bad) = doc.f.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(LoadError::MalformedDocument(format!(
                "triangle index {bad} is out of range for {vertex_count} vertices"
            )));
        }

        let mut vertices = Vec::with_capacity(vertex_count);
        for v in 0..vertex_count {
            vertices.push(SkinnedVertex {
                position: Vec3::new(doc.pos[3 * v], doc.pos[3 * v + 1], doc.pos[3 * v + 2]),
                bone_ids: std::array::from_fn(|slot| doc.indices[BONE_SLOTS * v + slot]),
                weights: std::array::from_fn(|slot| doc.weight[BONE_SLOTS * v + slot]),
            });
        }

        Ok(Self {
            vertices,
            indices: doc.f.clone(),
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// CPU twin of the vertex shader's blend loop, for tests and tooling.
///
/// Slot rules, in scan order: an id of -1 skips the slot; an id at or past
/// the end of `bones` makes the whole vertex rigid (the rest position wins
/// and the remaining slots are never read); anything else accumulates
/// `weight * (bone * rest)`. Weights are used as stored, with no
/// normalization pass.
pub fn skin_vertex(vertex: &SkinnedVertex, bones: &[Mat4]) -> Vec3 {
    let rest = vertex.position.extend(1.0);
    let mut blended = Vec4::ZERO;
    for slot in 0..BONE_SLOTS {
        let id = vertex.bone_ids[slot];
        if id == -1 {
            continue;
        }
        if id as usize >= bones.len() {
            blended = rest;
            break;
        }
        blended += vertex.weights[slot] * (bones[id as usize] * rest);
    }
    blended.truncate()
}
