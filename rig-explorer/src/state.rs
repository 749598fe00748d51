use bevy_ecs::prelude::*;
use winit::dpi::PhysicalSize;

use crate::playback::advance_playback;
use crate::v::vrenderer::{draw_skinned, VRenderer};

/// A surface acquire that failed inside the draw system. Left in the world
/// for the event loop to collect after the schedule runs.
#[derive(Resource)]
pub struct SurfaceFailure(pub wgpu::SurfaceError);

pub struct StateApp {
    world: World,
    schedule: Schedule,
}

impl StateApp {
    pub fn new(mut world: World, renderer: VRenderer) -> Self {
        world.insert_non_send_resource(renderer);

        let mut schedule = Schedule::default();

        // The cursor must land on this frame's pose before the draw reads it.
        schedule.add_systems((advance_playback, draw_skinned).chain());

        Self { world, schedule }
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
    pub fn renderer(&self) -> &VRenderer {
        self.world.get_non_send_resource().unwrap()
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            let mut renderer = self.world.get_non_send_resource_mut::<VRenderer>().unwrap();

            renderer.size = new_size;
            renderer.config.width = new_size.width;
            renderer.config.height = new_size.height;
            renderer
                .surface()
                .configure(renderer.device(), renderer.config());
        }
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.renderer().size
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.schedule.run(&mut self.world);

        // Draw systems cannot return errors, so failures come back through
        // the world instead.
        match self.world.remove_resource::<SurfaceFailure>() {
            Some(SurfaceFailure(e)) => Err(e),
            None => Ok(()),
        }
    }
}
