use glam::IVec2;

use crate::ecs::components::Position;
use crate::ecs::systems::Effect;

/// Keep the pet on the monitor and tell the host where the window goes.
/// Bounds are inclusive: `[0, monitor.x] x [0, monitor.y]`.
pub fn confine(world: &mut hecs::World, monitor: IVec2, effects: &mut Vec<Effect>) {
    for (_, pos) in world.query_mut::<&mut Position>() {
        // Stops the pet sticking past an edge or drifting onto another monitor.
        pos.0 = pos.0.clamp(IVec2::ZERO, monitor.max(IVec2::ZERO));
        effects.push(Effect::MoveWindow(pos.0));
    }
}
