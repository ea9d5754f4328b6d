use glam::IVec2;

use crate::pet::{Cue, Direction, Pose, SpriteKey};

/// Idle phase at which the pet starts yawning.
pub const YAWN_PHASE: u32 = 10;
/// Idle phase at which the pet falls asleep.
pub const SLEEP_PHASE: u32 = 13;

/// Default flip-book thresholds (ticks).
pub const FRAME_MIN: u32 = 8;
pub const FRAME_MAX: u32 = 16;
/// Slower flip-book used while yawning and asleep.
pub const DROWSY_FRAME_MIN: u32 = 32;
pub const DROWSY_FRAME_MAX: u32 = 64;

/// Window top-left in screen pixels.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub IVec2);

/// Cursor relative to the sprite center, recomputed every tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Geometry {
    /// Cursor minus sprite center, logical pixels.
    pub offset: IVec2,
    /// Manhattan length of `offset`.
    pub distance: i32,
    /// Degrees in (0, 360]; due right is 360, straight down is 90.
    pub bearing: f64,
}

/// Behavior state machine.
///
/// Phase numbering: 0 while chasing the cursor, 1..=12 while idling,
/// 13 and up once asleep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PetState {
    Moving { heading: Direction },
    Idle { phase: u32 },
    Asleep { phase: u32 },
}

impl PetState {
    pub fn phase(self) -> u32 {
        match self {
            PetState::Moving { .. } => 0,
            PetState::Idle { phase } | PetState::Asleep { phase } => phase,
        }
    }

    fn from_idle_phase(phase: u32) -> Self {
        if phase >= SLEEP_PHASE {
            PetState::Asleep { phase }
        } else {
            PetState::Idle { phase }
        }
    }

    /// Advance one idle phase (flip-book rollover). No-op while moving.
    /// Returns the cue that belongs to the phase just entered, if any.
    pub fn advance(&mut self) -> Option<Cue> {
        if let PetState::Moving { .. } = self {
            return None;
        }
        let phase = self.phase() + 1;
        *self = Self::from_idle_phase(phase);
        match phase {
            YAWN_PHASE => Some(Cue::Drowsy),
            SLEEP_PHASE => Some(Cue::Sleep),
            _ => None,
        }
    }
}

/// Behavior state plus what it currently shows.
#[derive(Debug, Clone, Copy)]
pub struct Behavior {
    pub state: PetState,
    pub pose: Pose,
    /// User asked the pet to stay put (toggled by clicking it).
    pub pinned: bool,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            state: PetState::Moving { heading: Direction::Down },
            pose: Pose::Awake,
            pinned: false,
        }
    }
}

/// Two-frame flip-book counter.
#[derive(Debug, Clone, Copy)]
pub struct FlipBook {
    pub counter: u32,
    /// Counter below this shows frame 1, otherwise frame 2.
    pub min: u32,
    /// Counter above this rolls over to 0.
    pub max: u32,
}

impl FlipBook {
    pub fn reset_thresholds(&mut self) {
        self.min = FRAME_MIN;
        self.max = FRAME_MAX;
    }

    pub fn widen_thresholds(&mut self) {
        self.min = DROWSY_FRAME_MIN;
        self.max = DROWSY_FRAME_MAX;
    }
}

impl Default for FlipBook {
    fn default() -> Self {
        Self {
            counter: 0,
            min: FRAME_MIN,
            max: FRAME_MAX,
        }
    }
}

/// Last sprite actually drawn, for redraw suppression.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpriteCache {
    pub last: Option<SpriteKey>,
}
