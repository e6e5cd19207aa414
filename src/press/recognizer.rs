use crate::shared::GestureState;

/// A semantic press edge, emitted at most once per contact in each direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Press {
    Begin,
    End,
}

/// Collapses a noisy gesture-state stream into one `Begin` and one `End` per
/// contact. Anything that is not `Began` or `Active` is terminal, so a
/// cancelled or failed gesture still closes the press.
#[derive(Clone, Debug)]
pub struct PressRecognizer {
    pressed: bool,
    origin: Option<(u16, u16)>,
    max_dist: f32,
}

impl PressRecognizer {
    pub fn new(max_dist: f32) -> Self {
        Self {
            pressed: false,
            origin: None,
            max_dist,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn feed(&mut self, state: GestureState) -> Option<Press> {
        match state {
            GestureState::Began => {
                if self.pressed {
                    return None;
                }
                self.pressed = true;
                Some(Press::Begin)
            }
            GestureState::Active => None,
            GestureState::Cancelled | GestureState::Ended | GestureState::Failed => {
                self.origin = None;
                if !self.pressed {
                    return None;
                }
                self.pressed = false;
                Some(Press::End)
            }
        }
    }

    // where the pointer first came down, used to judge later travel
    pub fn anchor(&mut self, x: u16, y: u16) {
        self.origin = Some((x, y));
    }

    /// Classify pointer travel since `anchor`: inside the radius the contact is
    /// still held, past it the long press fails to be recognized.
    pub fn motion(&self, x: u16, y: u16) -> GestureState {
        let Some((ox, oy)) = self.origin else {
            return GestureState::Active;
        };
        // terminal cells are about twice as tall as they are wide
        let dx = (x as f32 - ox as f32) * 0.5;
        let dy = y as f32 - oy as f32;
        if (dx * dx + dy * dy).sqrt() > self.max_dist {
            GestureState::Failed
        } else {
            GestureState::Active
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_began_then_ended_emits_one_of_each() {
        let mut r = PressRecognizer::new(100.0);
        assert_eq!(r.feed(GestureState::Began), Some(Press::Begin));
        assert!(r.is_pressed());
        assert_eq!(r.feed(GestureState::Ended), Some(Press::End));
        assert!(!r.is_pressed());
    }

    #[test]
    fn test_double_began_is_debounced() {
        let mut r = PressRecognizer::new(100.0);
        assert_eq!(r.feed(GestureState::Began), Some(Press::Begin));
        assert_eq!(r.feed(GestureState::Began), None);
        assert_eq!(r.feed(GestureState::Ended), Some(Press::End));
        assert_eq!(r.feed(GestureState::Ended), None);
    }

    #[test]
    fn test_active_never_emits() {
        let mut r = PressRecognizer::new(100.0);
        assert_eq!(r.feed(GestureState::Active), None);
        r.feed(GestureState::Began);
        for _ in 0..10 {
            assert_eq!(r.feed(GestureState::Active), None);
        }
        assert!(r.is_pressed());
    }

    #[test]
    fn test_cancel_and_fail_close_the_press() {
        for terminal in [GestureState::Cancelled, GestureState::Failed] {
            let mut r = PressRecognizer::new(100.0);
            r.feed(GestureState::Began);
            assert_eq!(r.feed(terminal), Some(Press::End));
            assert_eq!(r.feed(GestureState::Ended), None);
        }
    }

    #[test]
    fn test_end_without_begin_is_silent() {
        let mut r = PressRecognizer::new(100.0);
        assert_eq!(r.feed(GestureState::Ended), None);
        assert_eq!(r.feed(GestureState::Cancelled), None);
    }

    #[test]
    fn test_begins_match_ends_over_noisy_stream() {
        use GestureState::*;
        let stream = [
            Began, Active, Began, Active, Ended, Ended, Failed, Began, Cancelled, Active, Began,
            Began, Failed,
        ];
        let mut r = PressRecognizer::new(100.0);
        let mut begins = 0;
        let mut ends = 0;
        for state in stream {
            match r.feed(state) {
                Some(Press::Begin) => {
                    assert_eq!(begins, ends);
                    begins += 1;
                }
                Some(Press::End) => {
                    ends += 1;
                    assert_eq!(begins, ends);
                }
                None => {}
            }
        }
        assert_eq!(begins, 3);
        assert_eq!(ends, 3);
    }

    #[test]
    fn test_motion_tolerates_small_drift() {
        let mut r = PressRecognizer::new(3.0);
        r.anchor(10, 10);
        assert_eq!(r.motion(14, 11), GestureState::Active);
        assert_eq!(r.motion(10, 14), GestureState::Failed);
        assert_eq!(r.motion(30, 10), GestureState::Failed);
    }

    #[test]
    fn test_motion_without_anchor_stays_active() {
        let r = PressRecognizer::new(0.0);
        assert_eq!(r.motion(100, 100), GestureState::Active);
    }
}
