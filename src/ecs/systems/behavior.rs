use glam::IVec2;

use crate::ecs::components::{Behavior, FlipBook, Geometry, PetState, Position};
use crate::ecs::systems::Effect;
use crate::pet::{Cue, Direction, Pose, CAPTURE_RADIUS};

/// Per-tick input to the behavior state machine.
#[derive(Debug, Clone, Copy)]
pub struct Stimulus {
    /// Left button went down since the previous tick.
    pub clicked: bool,
    /// Pixels per tick along each moving axis.
    pub speed: i32,
}

/// Run the behavior state machine for every pet.
pub fn update(world: &mut hecs::World, stimulus: Stimulus, effects: &mut Vec<Effect>) {
    for (_, (pos, geometry, behavior, flip)) in world
        .query_mut::<(&mut Position, &Geometry, &mut Behavior, &mut FlipBook)>()
    {
        step(behavior, flip, pos, geometry, stimulus, effects);
    }
}

/// One transition: idle while the cursor is close (or the pet is pinned),
/// otherwise walk toward it.
pub fn step(
    behavior: &mut Behavior,
    flip: &mut FlipBook,
    pos: &mut Position,
    geometry: &Geometry,
    stimulus: Stimulus,
    effects: &mut Vec<Effect>,
) {
    if geometry.distance < CAPTURE_RADIUS || behavior.pinned {
        stay_idle(behavior, flip);
        if stimulus.clicked {
            behavior.pinned = !behavior.pinned;
            log::debug!("pinned = {}", behavior.pinned);
        }
        return;
    }

    if let PetState::Asleep { phase } = behavior.state {
        log::debug!("woken up at phase {phase}");
        effects.push(Effect::PlayCue(Cue::Awake));
    }

    let step = catch_cursor(behavior, flip, geometry.bearing);
    pos.0 = pos.0.saturating_add(step.saturating_mul(IVec2::splat(stimulus.speed)));
}

/// Pick the idle pose for the current phase, entering idle if needed.
fn stay_idle(behavior: &mut Behavior, flip: &mut FlipBook) {
    if let PetState::Moving { .. } = behavior.state {
        log::debug!("caught the cursor");
        behavior.state = PetState::Idle { phase: 1 };
    }

    behavior.pose = match behavior.state.phase() {
        1..=3 => Pose::Awake,
        4..=6 => Pose::Scratch,
        7..=9 => Pose::Wash,
        10..=12 => {
            flip.widen_thresholds();
            Pose::Yawn
        }
        _ => Pose::Sleep,
    };
}

/// Head toward the cursor. Returns the unit step for this tick.
fn catch_cursor(behavior: &mut Behavior, flip: &mut FlipBook, bearing: f64) -> IVec2 {
    flip.reset_thresholds();

    let heading = Direction::from_bearing(bearing);
    behavior.state = PetState::Moving { heading };

    if let Some(facing) = Direction::facing_from_bearing(bearing) {
        behavior.pose = Pose::Facing(facing);
    }

    heading.step()
}
