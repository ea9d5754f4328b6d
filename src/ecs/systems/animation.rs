use crate::ecs::components::{Behavior, FlipBook, SpriteCache};
use crate::ecs::systems::Effect;
use crate::pet::{Frame, Pose, SpriteKey};

/// Tick the flip-book counter. Runs first every tick.
pub fn advance(world: &mut hecs::World) {
    for (_, flip) in world.query_mut::<&mut FlipBook>() {
        flip.counter += 1;
    }
}

/// Resolve the sprite, handle rollover, and request a redraw on change.
pub fn update(world: &mut hecs::World, effects: &mut Vec<Effect>) {
    for (_, (behavior, flip, cache)) in
        world.query_mut::<(&mut Behavior, &mut FlipBook, &mut SpriteCache)>()
    {
        drive(behavior, flip, cache, effects);
    }
}

/// Pick which half of the flip-book to show.
pub fn resolve(pose: Pose, flip: &FlipBook) -> SpriteKey {
    let frame = if pose.is_single_frame() {
        Frame::Single
    } else if flip.counter < flip.min {
        Frame::First
    } else {
        Frame::Second
    };
    SpriteKey { pose, frame }
}

/// Animation step for one pet.
///
/// The key is resolved before the rollover check, so the tick that rolls
/// over still shows frame 2. Idle phases only advance on rollover, which is
/// also the only place the drowsy and sleep cues can fire.
pub fn drive(
    behavior: &mut Behavior,
    flip: &mut FlipBook,
    cache: &mut SpriteCache,
    effects: &mut Vec<Effect>,
) {
    let key = resolve(behavior.pose, flip);

    if flip.counter > flip.max {
        flip.counter = 0;
        if let Some(cue) = behavior.state.advance() {
            log::debug!("phase {} -> {:?}", behavior.state.phase(), cue);
            effects.push(Effect::PlayCue(cue));
        }
    }

    if cache.last == Some(key) {
        return;
    }
    cache.last = Some(key);
    effects.push(Effect::Redraw(key));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::PetState;
    use crate::pet::{Cue, Direction};

    #[test]
    fn awake_is_single_frame() {
        for counter in 0..40 {
            let flip = FlipBook { counter, ..FlipBook::default() };
            assert_eq!(resolve(Pose::Awake, &flip).frame, Frame::Single);
        }
    }

    #[test]
    fn frame_parity_follows_thresholds() {
        for counter in 0..=16 {
            let flip = FlipBook { counter, ..FlipBook::default() };
            let key = resolve(Pose::Wash, &flip);
            let expected = if counter < 8 { "wash1" } else { "wash2" };
            assert_eq!(key.to_string(), expected, "counter {counter}");
        }
        let drowsy = FlipBook { counter: 31, min: 32, max: 64 };
        assert_eq!(resolve(Pose::Yawn, &drowsy).to_string(), "yawn1");
    }

    #[test]
    fn every_resolved_key_is_a_required_sprite() {
        let required: Vec<SpriteKey> = crate::pet::required_sprite_keys().collect();
        for (min, max) in [(8, 16), (32, 64)] {
            for counter in 0..=max {
                let flip = FlipBook { counter, min, max };
                for pose in Pose::all() {
                    let key = resolve(pose, &flip);
                    assert!(required.contains(&key), "{key} at counter {counter}");
                }
            }
        }
    }

    #[test]
    fn counter_resets_strictly_after_max() {
        let mut b = Behavior::default();
        let mut f = FlipBook { counter: 16, ..FlipBook::default() };
        let mut c = SpriteCache::default();
        let mut effects = Vec::new();
        drive(&mut b, &mut f, &mut c, &mut effects);
        assert_eq!(f.counter, 16);

        f.counter = 17;
        drive(&mut b, &mut f, &mut c, &mut effects);
        assert_eq!(f.counter, 0);
    }

    #[test]
    fn rollover_advances_idle_phase_only() {
        let mut c = SpriteCache::default();
        let mut effects = Vec::new();

        let mut idle = Behavior { state: PetState::Idle { phase: 2 }, ..Behavior::default() };
        let mut f = FlipBook { counter: 17, ..FlipBook::default() };
        drive(&mut idle, &mut f, &mut c, &mut effects);
        assert_eq!(idle.state.phase(), 3);

        let mut moving = Behavior {
            state: PetState::Moving { heading: Direction::Up },
            pose: Pose::Facing(Direction::Up),
            pinned: false,
        };
        let mut f = FlipBook { counter: 17, ..FlipBook::default() };
        drive(&mut moving, &mut f, &mut c, &mut effects);
        assert_eq!(moving.state.phase(), 0);
        assert_eq!(f.counter, 0);
    }

    #[test]
    fn rollover_into_yawn_fires_drowsy() {
        let mut b = Behavior { state: PetState::Idle { phase: 9 }, pose: Pose::Wash, pinned: false };
        let mut f = FlipBook { counter: 17, ..FlipBook::default() };
        let mut c = SpriteCache::default();
        let mut effects = Vec::new();
        drive(&mut b, &mut f, &mut c, &mut effects);
        assert_eq!(effects[0], Effect::PlayCue(Cue::Drowsy));
        assert_eq!(b.state, PetState::Idle { phase: 10 });
    }

    #[test]
    fn unchanged_key_is_not_redrawn() {
        let mut b = Behavior { state: PetState::Idle { phase: 1 }, ..Behavior::default() };
        let mut f = FlipBook::default();
        let mut c = SpriteCache::default();
        let mut effects = Vec::new();

        f.counter = 1;
        drive(&mut b, &mut f, &mut c, &mut effects);
        f.counter = 2;
        drive(&mut b, &mut f, &mut c, &mut effects);

        let redraws: Vec<_> = effects
            .iter()
            .filter(|e| matches!(e, Effect::Redraw(_)))
            .collect();
        assert_eq!(redraws.len(), 1);
        assert_eq!(c.last.map(|k| k.to_string()), Some("awake".to_string()));
    }

    #[test]
    fn frame_flip_triggers_redraw() {
        let mut b = Behavior { state: PetState::Idle { phase: 4 }, pose: Pose::Scratch, pinned: false };
        let mut f = FlipBook::default();
        let mut c = SpriteCache::default();
        let mut effects = Vec::new();
        for counter in [6, 7, 8, 9] {
            f.counter = counter;
            drive(&mut b, &mut f, &mut c, &mut effects);
        }
        let drawn: Vec<String> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::Redraw(k) => Some(k.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(drawn, vec!["scratch1", "scratch2"]);
    }
}
