use crate::model::Lesson;

/// Countdown length armed by the player when playback ends.
pub const DEFAULT_COUNTDOWN_SECONDS: u8 = 5;

/// Auto-advance countdown, modeled as an explicit state machine so it can be
/// unit-tested without any host timer facility.
///
/// The host environment drives `tick` once per second while a countdown is
/// active. There is at most one active countdown per instance: arming while
/// active first discards the previous countdown, so a stale target can never
/// fire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AutoAdvance {
    state: State,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum State {
    #[default]
    Idle,
    CountingDown {
        seconds_remaining: u8,
        target: Lesson,
    },
}

/// Result of advancing the countdown by one second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No countdown is active.
    Inactive,
    /// Still counting; `seconds_remaining` seconds left.
    Ticking { seconds_remaining: u8 },
    /// The countdown elapsed. Emitted exactly once per armed countdown; the
    /// machine is Idle afterwards.
    Elapsed(Lesson),
}

impl AutoAdvance {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a countdown toward the given lesson, replacing any active one.
    ///
    /// Arming with zero seconds elapses on the next tick.
    pub fn arm(&mut self, target: Lesson, seconds: u8) {
        self.state = State::CountingDown {
            seconds_remaining: seconds,
            target,
        };
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> TickOutcome {
        match std::mem::take(&mut self.state) {
            State::Idle => TickOutcome::Inactive,
            State::CountingDown {
                seconds_remaining,
                target,
            } => {
                let seconds_remaining = seconds_remaining.saturating_sub(1);
                if seconds_remaining == 0 {
                    // State stays Idle; the target is handed to the caller.
                    TickOutcome::Elapsed(target)
                } else {
                    self.state = State::CountingDown {
                        seconds_remaining,
                        target,
                    };
                    TickOutcome::Ticking { seconds_remaining }
                }
            }
        }
    }

    /// Discard any active countdown without advancing. Returns true if a
    /// countdown was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = State::Idle;
        was_active
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, State::CountingDown { .. })
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> Option<u8> {
        match &self.state {
            State::Idle => None,
            State::CountingDown {
                seconds_remaining, ..
            } => Some(*seconds_remaining),
        }
    }

    #[must_use]
    pub fn target(&self) -> Option<&Lesson> {
        match &self.state {
            State::Idle => None,
            State::CountingDown { target, .. } => Some(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, LessonDraft, LessonId, Role};
    use crate::time::fixed_now;

    fn build_lesson(id: u64) -> Lesson {
        LessonDraft {
            title: format!("Lesson {id}"),
            category: Category::new("writing-basics").unwrap(),
            duration_minutes: 15,
            required_role: Role::Free,
            media_reference: format!("vid-{id}"),
        }
        .validate(fixed_now())
        .unwrap()
        .assign_id(LessonId::new(id))
    }

    #[test]
    fn idle_machine_ticks_inactively() {
        let mut countdown = AutoAdvance::new();
        assert_eq!(countdown.tick(), TickOutcome::Inactive);
        assert!(!countdown.is_active());
    }

    #[test]
    fn five_ticks_elapse_exactly_once() {
        let mut countdown = AutoAdvance::new();
        countdown.arm(build_lesson(12), DEFAULT_COUNTDOWN_SECONDS);

        for expected in (1..DEFAULT_COUNTDOWN_SECONDS).rev() {
            assert_eq!(
                countdown.tick(),
                TickOutcome::Ticking {
                    seconds_remaining: expected
                }
            );
        }

        assert_eq!(countdown.tick(), TickOutcome::Elapsed(build_lesson(12)));
        assert!(!countdown.is_active());
        assert_eq!(countdown.tick(), TickOutcome::Inactive);
    }

    #[test]
    fn cancel_prevents_elapse() {
        let mut countdown = AutoAdvance::new();
        countdown.arm(build_lesson(12), 5);
        assert!(countdown.cancel());

        for _ in 0..10 {
            assert_eq!(countdown.tick(), TickOutcome::Inactive);
        }
    }

    #[test]
    fn cancel_without_active_countdown_reports_false() {
        let mut countdown = AutoAdvance::new();
        assert!(!countdown.cancel());
    }

    #[test]
    fn rearming_replaces_the_previous_countdown() {
        let mut countdown = AutoAdvance::new();
        countdown.arm(build_lesson(12), 2);
        countdown.arm(build_lesson(13), 5);

        assert_eq!(countdown.seconds_remaining(), Some(5));
        assert_eq!(countdown.target().unwrap().id(), LessonId::new(13));

        // Only the second target ever fires, and only once.
        let mut elapsed = Vec::new();
        for _ in 0..10 {
            if let TickOutcome::Elapsed(lesson) = countdown.tick() {
                elapsed.push(lesson.id());
            }
        }
        assert_eq!(elapsed, vec![LessonId::new(13)]);
    }

    #[test]
    fn zero_second_arm_elapses_on_next_tick() {
        let mut countdown = AutoAdvance::new();
        countdown.arm(build_lesson(12), 0);
        assert_eq!(countdown.tick(), TickOutcome::Elapsed(build_lesson(12)));
    }
}
