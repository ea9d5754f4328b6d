use glam::{DVec2, IVec2};

/// Screen cursor rebuilt from winit events.
///
/// Absolute positions only arrive while the cursor is over the window.
/// Outside it, raw mouse motion keeps the estimate moving, and the next
/// absolute report snaps it back.
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorTracker {
    pos: DVec2,
    bounds: DVec2,
}

impl CursorTracker {
    pub fn new(start: IVec2, screen: IVec2) -> Self {
        let mut tracker = Self {
            pos: DVec2::ZERO,
            bounds: screen.max(IVec2::ZERO).as_dvec2(),
        };
        tracker.moved_to(start);
        tracker
    }

    /// Absolute position from a `CursorMoved` event.
    pub fn moved_to(&mut self, pos: IVec2) {
        self.pos = pos.as_dvec2().clamp(DVec2::ZERO, self.bounds);
    }

    /// Relative motion from a `DeviceEvent::MouseMotion`.
    pub fn moved_by(&mut self, delta: (f64, f64)) {
        let delta = DVec2::from(delta);
        if !delta.is_finite() {
            return;
        }
        self.pos = (self.pos + delta).clamp(DVec2::ZERO, self.bounds);
    }

    pub fn position(&self) -> IVec2 {
        self.pos.floor().as_ivec2()
    }
}
