/// Latches left-button presses between ticks.
///
/// Window events can arrive at any time; the simulation only looks at the
/// button once per tick, so a press is held until the next tick takes it.
pub struct ClickState {
    left_was_down: bool,
    left_clicked: bool,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            left_was_down: false,
            left_clicked: false,
        }
    }

    /// Feed a raw left-button state change.
    pub fn update(&mut self, left_down: bool) {
        // Edge-detect left click (press, not hold)
        if left_down && !self.left_was_down {
            self.left_clicked = true;
        }
        self.left_was_down = left_down;
    }

    /// True once per press. Call once per tick.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.left_clicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_seen_once() {
        let mut click = ClickState::new();
        click.update(true);
        assert!(click.take());
        assert!(!click.take());
    }

    #[test]
    fn holding_does_not_repeat() {
        let mut click = ClickState::new();
        click.update(true);
        click.take();
        click.update(true);
        assert!(!click.take());
        click.update(false);
        click.update(true);
        assert!(click.take());
    }

    #[test]
    fn press_and_release_between_ticks_still_counts() {
        let mut click = ClickState::new();
        click.update(true);
        click.update(false);
        assert!(click.take());
    }
}
