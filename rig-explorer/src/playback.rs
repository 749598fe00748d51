use std::time::Instant;

use bevy_ecs::system::{ResMut, Resource};
use rig::prelude::RigAnimator;

/// The animation being played and the clock it is played against.
#[derive(Resource)]
pub struct Playback {
    pub animator: RigAnimator,
    started: Instant,
}

impl Playback {
    pub fn new(animator: RigAnimator) -> Self {
        Self {
            animator,
            started: Instant::now(),
        }
    }

    /// Milliseconds since playback was created. The cursor only ever looks
    /// at differences, so the origin does not matter.
    pub fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }
}

/// Polls the playback clock once per schedule run, before anything draws.
pub fn advance_playback(playback_opt: Option<ResMut<Playback>>) {
    if let Some(mut playback) = playback_opt {
        let now_ms = playback.now_ms();
        playback.animator.advance(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::{schedule::Schedule, world::World};
    use rig::prelude::{RigConfig, RigDocument};

    const ONE_BONE_RIG: &str = r#"{
        "pos": [0.0, 0.0, 0.0],
        "indices": [0, -1, -1, -1],
        "weight": [1.0, 0.0, 0.0, 0.0],
        "f": [0, 0, 0],
        "deformation": [
            [1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
            [1, 0, 0, 0, 1, 0, 0, 0, 1, 1, 0, 0]
        ]
    }"#;

    fn one_bone_playback() -> Playback {
        let doc = RigDocument::from_json(ONE_BONE_RIG).unwrap();
        let config = RigConfig {
            bone_count: 1,
            frame_step_ms: 40.0,
        };
        Playback::new(RigAnimator::load(&doc, &config).unwrap())
    }

    #[test]
    fn clock_never_runs_backwards() {
        let playback = one_bone_playback();
        let first = playback.now_ms();
        let second = playback.now_ms();
        assert!(first >= 0.0);
        assert!(second >= first);
    }

    #[test]
    fn system_tolerates_a_world_with_no_playback() {
        let mut world = World::default();
        let mut schedule = Schedule::default();
        schedule.add_systems(advance_playback);
        schedule.run(&mut world);
    }

    #[test]
    fn first_schedule_run_arms_without_stepping() {
        let mut world = World::default();
        world.insert_resource(one_bone_playback());

        let mut schedule = Schedule::default();
        schedule.add_systems(advance_playback);
        schedule.run(&mut world);

        let playback = world.resource::<Playback>();
        assert_eq!(playback.animator.cursor.frame(), 0);
    }
}
