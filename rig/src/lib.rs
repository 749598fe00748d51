pub mod anim;
pub mod document;
pub mod mesh;
pub mod prelude;

use anim::{AnimationClip, PlaybackCursor};
use document::{LoadError, RigDocument};
use mesh::RigMesh;

/// Bones per frame in the stock export.
pub const DEFAULT_BONE_COUNT: usize = 51;
/// Playback step in the stock export, 25 frames per second.
pub const DEFAULT_FRAME_STEP_MS: f64 = 40.0;

/// The knobs a rig file does not carry itself.
#[derive(Debug, Clone, Copy)]
pub struct RigConfig {
    pub bone_count: usize,
    pub frame_step_ms: f64,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            bone_count: DEFAULT_BONE_COUNT,
            frame_step_ms: DEFAULT_FRAME_STEP_MS,
        }
    }
}

/// A loaded, playable rig: the mesh, the expanded clip and the cursor that
/// walks it.
#[derive(Debug)]
pub struct RigAnimator {
    pub mesh: RigMesh,
    pub clip: AnimationClip,
    pub cursor: PlaybackCursor,
}

impl RigAnimator {
    pub fn load(doc: &RigDocument, config: &RigConfig) -> Result<Self, LoadError> {
        let mesh = RigMesh::from_document(doc)?;
        let clip = AnimationClip::from_records(&doc.deformation, config.bone_count)?;
        log::debug!(
            "rig: {} vertices, {} triangles, {} bones over {} frames",
            mesh.vertex_count(),
            mesh.triangle_count(),
            clip.bone_count(),
            clip.frame_count()
        );

        let cursor = PlaybackCursor::new(clip.frame_count(), config.frame_step_ms);
        Ok(Self { mesh, clip, cursor })
    }

    /// Poll the playback clock. Returns true when the visible frame changed.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        self.cursor.advance(now_ms)
    }

    /// The bone palette for the frame the cursor is currently on.
    pub fn current_bone_matrices(&self) -> &[glam::Mat4] {
        self.clip.frame_matrices(self.cursor.frame())
    }
}
