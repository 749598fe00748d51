use bevy_ecs::system::{Commands, Resource};
use common::{vbuffer::VBuffer, vinstance::StateInstance};
use glam::Mat4;

/// The GPU copy of one frame's bone palette, shared by every skinned mesh.
#[derive(Resource)]
pub struct BoneBuffer {
    pub buffer: VBuffer,
}

/// Create the bone palette buffer for use in all skinned shaders. Its size is
/// fixed by the first palette; playback rewrites the contents in place.
pub fn insert_bone_buffer(commands: &mut Commands, bones: &[Mat4], instance: &StateInstance) {
    let buffer = VBuffer::new_storage(
        &instance.device,
        &instance.bones_bind_group_layout,
        bones,
        "Bone Palette",
    );

    commands.insert_resource(BoneBuffer { buffer });
}
