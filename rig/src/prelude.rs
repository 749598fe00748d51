pub use crate::anim::{AnimationClip, DeformationRecord, PlaybackCursor};
pub use crate::document::{LoadError, RigDocument};
pub use crate::mesh::{skin_vertex, RigMesh, SkinnedVertex, BONE_SLOTS};
pub use crate::{RigAnimator, RigConfig, DEFAULT_BONE_COUNT, DEFAULT_FRAME_STEP_MS};
