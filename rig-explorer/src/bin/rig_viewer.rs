use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use bevy_ecs::system::{Commands, NonSend, SystemState};
use clap::Parser;

use common::vshader::VShader;
use rig::prelude::*;
use rig_explorer::{
    loader::insert_bone_buffer,
    playback::Playback,
    v::{vmesh::VMesh, vrenderer::VRenderer},
    vinit, vrun,
};

/// Plays a skinned rig export in a window.
#[derive(Parser)]
struct Args {
    /// Rig file to play.
    path: PathBuf,

    /// Bones per frame in the deformation stream.
    #[arg(long, default_value_t = DEFAULT_BONE_COUNT)]
    bones: usize,

    /// Milliseconds between frame steps.
    #[arg(long, default_value_t = DEFAULT_FRAME_STEP_MS)]
    frame_ms: f64,
}

pub fn main() -> anyhow::Result<()> {
    println!("Starting...");

    let args = Args::parse();

    let (mut state, event_loop) = pollster::block_on(vinit())?;

    let doc = RigDocument::open(&args.path)
        .with_context(|| format!("loading rig {}", args.path.display()))?;
    let config = RigConfig {
        bone_count: args.bones,
        frame_step_ms: args.frame_ms,
    };
    let animator = RigAnimator::load(&doc, &config)?;

    // Construct a `SystemState` struct, passing in a tuple of `SystemParam`
    // as if you were writing an ordinary system.
    let mut system_state: SystemState<(Commands, NonSend<VRenderer>)> =
        SystemState::new(state.world_mut());

    {
        // Use system_state.get_mut(&mut world) and unpack your system
        // parameters into variables!
        let (mut commands, renderer) = system_state.get_mut(state.world_mut());

        let shader = Arc::new(VShader::new_skinned::<SkinnedVertex>(&renderer.instance()));
        let mesh = VMesh::new(
            renderer.device(),
            &animator.mesh.vertices,
            &animator.mesh.indices,
            shader,
        );
        commands.spawn(mesh);

        // Create the bone palette buffer for use in all skinned shaders
        insert_bone_buffer(
            &mut commands,
            animator.current_bone_matrices(),
            &renderer.instance,
        );
    }

    system_state.apply(state.world_mut());

    state.world_mut().insert_resource(Playback::new(animator));

    vrun(state, event_loop)?;
    Ok(())
}
