use glam::IVec2;

/// One of the eight compass headings the pet can walk along.
/// Screen coordinates: +y points down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Self::Up,
        Self::UpRight,
        Self::Right,
        Self::DownRight,
        Self::Down,
        Self::DownLeft,
        Self::Left,
        Self::UpLeft,
    ];

    /// Asset base name for this heading.
    pub fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::UpRight => "upright",
            Self::Right => "right",
            Self::DownRight => "downright",
            Self::Down => "down",
            Self::DownLeft => "downleft",
            Self::Left => "left",
            Self::UpLeft => "upleft",
        }
    }

    /// Unit step on each axis (diagonals move one pixel on both).
    pub fn step(self) -> IVec2 {
        match self {
            Self::Up => IVec2::new(0, -1),
            Self::UpRight => IVec2::new(1, -1),
            Self::Right => IVec2::new(1, 0),
            Self::DownRight => IVec2::new(1, 1),
            Self::Down => IVec2::new(0, 1),
            Self::DownLeft => IVec2::new(-1, 1),
            Self::Left => IVec2::new(-1, 0),
            Self::UpLeft => IVec2::new(-1, -1),
        }
    }

    /// Movement sector for a bearing in degrees. 45° sectors, upper bound
    /// inclusive; `Right` wraps across 0°/360°. Total over all inputs.
    pub fn from_bearing(a: f64) -> Self {
        match a {
            a if a <= 292.5 && a > 247.5 => Self::Up,
            a if a <= 337.5 && a > 292.5 => Self::UpRight,
            a if a <= 22.5 || a > 337.5 => Self::Right,
            a if a <= 67.5 => Self::DownRight,
            a if a <= 112.5 => Self::Down,
            a if a <= 157.5 => Self::DownLeft,
            a if a <= 202.5 => Self::Left,
            _ => Self::UpLeft,
        }
    }

    /// Facing sector used for the sprite. Same split as [`from_bearing`] but
    /// with whole-degree bounds and strict comparisons on both sides, so the
    /// facing can disagree with the movement sector within half a degree of a
    /// boundary, and an exact boundary (22°, 67°, ...) picks nothing. Callers
    /// keep the previous pose on `None`.
    ///
    /// [`from_bearing`]: Direction::from_bearing
    pub fn facing_from_bearing(a: f64) -> Option<Self> {
        let dir = match a {
            a if a < 292.0 && a > 247.0 => Self::Up,
            a if a < 337.0 && a > 292.0 => Self::UpRight,
            a if a < 22.0 || a > 337.0 => Self::Right,
            a if a < 67.0 && a > 22.0 => Self::DownRight,
            a if a < 112.0 && a > 67.0 => Self::Down,
            a if a < 157.0 && a > 112.0 => Self::DownLeft,
            a if a < 202.0 && a > 157.0 => Self::Left,
            a if a < 247.0 && a > 202.0 => Self::UpLeft,
            _ => return None,
        };
        Some(dir)
    }
}
