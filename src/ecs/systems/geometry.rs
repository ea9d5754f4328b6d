use std::f64::consts::PI;

use glam::IVec2;

use crate::ecs::components::{Geometry, Position};
use crate::pet::SPRITE_SIZE;

/// Locate the cursor relative to the sprite center.
///
/// `cursor` and `window` are screen pixels; the offset is converted to logical
/// sprite pixels by dividing by the display `scale`.
pub fn resolve(cursor: IVec2, window: IVec2, scale: f32) -> Geometry {
    let local = ((cursor - window).as_vec2() / scale).floor().as_ivec2();
    let offset = local.saturating_sub(IVec2::splat(SPRITE_SIZE / 2));

    // Manhattan on purpose: cheap and good enough for a 32px target.
    let distance = offset.x.saturating_abs().saturating_add(offset.y.saturating_abs());

    let r = (offset.y as f64).atan2(offset.x as f64);
    let mut bearing = r / PI * 180.0;
    if r <= 0.0 {
        bearing += 360.0;
    }

    Geometry {
        offset,
        distance,
        bearing,
    }
}

/// Recompute cursor geometry for every pet.
pub fn update(world: &mut hecs::World, cursor: IVec2, scale: f32) {
    for (_, (pos, geometry)) in world.query_mut::<(&Position, &mut Geometry)>() {
        *geometry = resolve(cursor, pos.0, scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: IVec2 = IVec2::new(100, 200);

    fn at_offset(dx: i32, dy: i32) -> Geometry {
        resolve(ORIGIN + IVec2::new(16 + dx, 16 + dy), ORIGIN, 1.0)
    }

    #[test]
    fn cursor_on_center_is_distance_zero() {
        let g = at_offset(0, 0);
        assert_eq!(g.offset, IVec2::ZERO);
        assert_eq!(g.distance, 0);
    }

    #[test]
    fn distance_is_manhattan() {
        assert_eq!(at_offset(3, -4).distance, 7);
        assert_eq!(at_offset(-10, -10).distance, 20);
    }

    #[test]
    fn bearing_follows_screen_axes() {
        assert_eq!(at_offset(50, 0).bearing, 360.0);
        assert!((at_offset(0, 50).bearing - 90.0).abs() < 1e-9);
        assert!((at_offset(-50, 0).bearing - 180.0).abs() < 1e-9);
        assert!((at_offset(0, -50).bearing - 270.0).abs() < 1e-9);
        assert!((at_offset(50, 50).bearing - 45.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_range() {
        for dx in -40..=40 {
            for dy in -40..=40 {
                let b = at_offset(dx, dy).bearing;
                assert!(b > 0.0 && b <= 360.0, "({dx}, {dy}) -> {b}");
            }
        }
    }

    #[test]
    fn far_cursor_at_tiny_scale_saturates() {
        let g = resolve(IVec2::new(i32::MAX, i32::MIN), IVec2::ZERO, 1e-7);
        assert_eq!(g.distance, i32::MAX);
        assert!(g.bearing > 0.0 && g.bearing <= 360.0);
    }

    #[test]
    fn scale_maps_screen_to_logical_pixels() {
        // 2x window: sprite center sits 32 screen pixels from the corner.
        let g = resolve(ORIGIN + IVec2::new(32, 32), ORIGIN, 2.0);
        assert_eq!(g.offset, IVec2::ZERO);
        let g = resolve(ORIGIN + IVec2::new(132, 32), ORIGIN, 2.0);
        assert_eq!(g.offset, IVec2::new(50, 0));
    }
}
