pub mod animation;
pub mod behavior;
pub mod geometry;
pub mod movement;

use glam::IVec2;

use crate::pet::{Cue, SpriteKey};
use behavior::Stimulus;

/// Side effect requested by a tick, applied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Place the window's top-left corner here (screen pixels).
    MoveWindow(IVec2),
    /// Start a sound cue, cutting off whatever is playing.
    PlayCue(Cue),
    /// Clear the window and draw this sprite.
    Redraw(SpriteKey),
}

/// Host-supplied state for one tick.
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Global cursor position, screen pixels.
    pub cursor: IVec2,
    /// Left button pressed since the previous tick.
    pub clicked: bool,
    /// Monitor size, screen pixels.
    pub monitor: IVec2,
}

/// Run all systems for one fixed tick. Effects are appended to `effects`,
/// which the caller owns and clears.
pub fn tick(
    world: &mut hecs::World,
    input: &TickInput,
    speed: i32,
    scale: f32,
    effects: &mut Vec<Effect>,
) {
    // 1. Flip-book counter
    animation::advance(world);

    // 2. Cursor geometry
    geometry::update(world, input.cursor, scale);

    // 3. Behavior state machine (idle / chase)
    let stimulus = Stimulus {
        clicked: input.clicked,
        speed,
    };
    behavior::update(world, stimulus, effects);

    // 4. Sprite resolution, rollover, redraw suppression
    animation::update(world, effects);

    // 5. Screen bounds + window placement
    movement::confine(world, input.monitor, effects);
}
