pub mod loader;
pub mod playback;
pub mod state;
pub mod v;

use bevy_ecs::world::World;
use state::StateApp;

use v::vrenderer::VRenderer;
use winit::{
    dpi::LogicalSize,
    error::EventLoopError,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

pub async fn vinit() -> anyhow::Result<(StateApp, EventLoop<()>)> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("rig explorer")
        .with_inner_size(LogicalSize::new(800, 600))
        .build(&event_loop)?;

    Ok((vinit_state(window).await?, event_loop))
}

pub async fn vinit_state(window: winit::window::Window) -> anyhow::Result<StateApp> {
    let world = World::default();

    let renderer = VRenderer::new(window).await?;

    Ok(StateApp::new(world, renderer))
}

pub fn vrun(mut state: StateApp, event_loop: EventLoop<()>) -> Result<(), EventLoopError> {
    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == state.renderer().window().id() => match event {
                WindowEvent::CloseRequested
                | WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            state: ElementState::Pressed,
                            physical_key: PhysicalKey::Code(KeyCode::Escape),
                            ..
                        },
                    ..
                } => elwt.exit(),
                WindowEvent::Resized(physical_size) => {
                    state.resize(*physical_size);
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    // winit follows this with a Resized event carrying the
                    // new physical size, so there is nothing to do here.
                }
                WindowEvent::RedrawRequested => {
                    match state.render() {
                        Ok(_) => {}
                        // Reconfigure the surface if lost
                        Err(wgpu::SurfaceError::Lost) => {
                            let size = state.size();
                            state.resize(size);
                        }
                        // The system is out of memory, we should probably quit
                        Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                        // All other errors (Outdated, Timeout) should be resolved by the next frame
                        Err(e) => log::warn!("dropped a frame: {:?}", e),
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // RedrawRequested will only trigger once, unless we manually
                // request it.
                state.renderer().window().request_redraw();
            }
            _ => {}
        };
    })
}
