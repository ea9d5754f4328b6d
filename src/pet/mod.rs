pub mod direction;

use std::fmt;

use glam::IVec2;

use crate::ecs::components::*;
pub use direction::Direction;

/// Sprite edge length in logical pixels (sprites are square).
pub const SPRITE_SIZE: i32 = 32;
/// Manhattan distance below which the cursor has "caught" the pet.
pub const CAPTURE_RADIUS: i32 = SPRITE_SIZE;

/// What the pet is showing. Drives which asset gets drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    Awake,
    Scratch,
    Wash,
    Yawn,
    Sleep,
    Facing(Direction),
}

impl Pose {
    pub fn name(self) -> &'static str {
        match self {
            Pose::Awake => "awake",
            Pose::Scratch => "scratch",
            Pose::Wash => "wash",
            Pose::Yawn => "yawn",
            Pose::Sleep => "sleep",
            Pose::Facing(dir) => dir.name(),
        }
    }

    /// `awake` is the only pose drawn from a single image.
    pub fn is_single_frame(self) -> bool {
        self == Pose::Awake
    }

    /// Every pose the behavior system can produce.
    pub fn all() -> impl Iterator<Item = Pose> {
        [Pose::Awake, Pose::Scratch, Pose::Wash, Pose::Yawn, Pose::Sleep]
            .into_iter()
            .chain(Direction::ALL.into_iter().map(Pose::Facing))
    }
}

/// Which half of the flip-book is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    Single,
    First,
    Second,
}

/// Fully resolved asset key, e.g. `awake`, `wash1`, `upleft2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteKey {
    pub pose: Pose,
    pub frame: Frame,
}

impl fmt::Display for SpriteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.frame {
            Frame::Single => "",
            Frame::First => "1",
            Frame::Second => "2",
        };
        write!(f, "{}{}", self.pose.name(), suffix)
    }
}

/// All sprite keys that can ever be requested for drawing.
pub fn required_sprite_keys() -> impl Iterator<Item = SpriteKey> {
    Pose::all().flat_map(|pose| {
        let frames: &'static [Frame] = if pose.is_single_frame() {
            &[Frame::Single]
        } else {
            &[Frame::First, Frame::Second]
        };
        frames.iter().map(move |&frame| SpriteKey { pose, frame })
    })
}

/// Sound cues fired on behavior transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Idle phase reached the yawn band.
    Drowsy,
    /// Idle phase reached sleep.
    Sleep,
    /// Cursor left a sleeping pet.
    Awake,
}

impl Cue {
    pub const ALL: [Cue; 3] = [Cue::Drowsy, Cue::Sleep, Cue::Awake];

    /// Base file name of the bundled sound.
    pub fn asset_name(self) -> &'static str {
        match self {
            Cue::Drowsy => "idle3",
            Cue::Sleep => "sleep",
            Cue::Awake => "awake",
        }
    }
}

/// Spawn the pet at `pos` (window top-left, screen pixels).
pub fn spawn_pet(world: &mut hecs::World, pos: IVec2) -> hecs::Entity {
    world.spawn((
        Position(pos),
        Geometry::default(),
        Behavior::default(),
        FlipBook::default(),
        SpriteCache::default(),
    ))
}
