// SPDX-License-Identifier: MPL-2.0
//! Inactivity state machine.
//!
//! Two states: `Active`, holding a single pending deadline, and the terminal
//! `Expired`. Interactions push the deadline back; hiding the page expires
//! the session at once; showing it again restarts the deadline.
//!
//! The machine is clock-agnostic: every transition takes `now`, so a driver
//! can feed it real or mocked time.

use std::time::{Duration, Instant};

/// User interactions that count as activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    PointerMove,
    PointerDown,
    KeyDown,
    TouchStart,
    Scroll,
}

impl InteractionKind {
    /// The full interaction set observed by the guard.
    pub const ALL: [InteractionKind; 5] = [
        InteractionKind::PointerMove,
        InteractionKind::PointerDown,
        InteractionKind::KeyDown,
        InteractionKind::TouchStart,
        InteractionKind::Scroll,
    ];
}

/// Page visibility as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Current guard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Session alive; expires at `deadline` absent interaction.
    Active { deadline: Instant },
    /// Session expired. Terminal.
    Expired,
}

impl GuardState {
    #[must_use]
    pub fn is_expired(self) -> bool {
        matches!(self, Self::Expired)
    }
}

/// Outcome of feeding an input to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed.
    Unchanged,
    /// The deadline moved.
    Reset,
    /// The session just expired. Reported exactly once.
    Expired,
}

/// Inactivity timer with last-interaction tracking.
#[derive(Debug, Clone)]
pub struct InactivityTimer {
    timeout: Duration,
    state: GuardState,
    last_interaction: Instant,
}

impl InactivityTimer {
    /// Starts in `Active` with a deadline of `now + timeout`.
    #[must_use]
    pub fn start(timeout: Duration, now: Instant) -> Self {
        Self {
            timeout,
            state: GuardState::Active {
                deadline: now + timeout,
            },
            last_interaction: now,
        }
    }

    #[must_use]
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Pending deadline, `None` once expired.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            GuardState::Active { deadline } => Some(deadline),
            GuardState::Expired => None,
        }
    }

    /// Timestamp of the last interaction (or of the start).
    #[must_use]
    pub fn last_interaction(&self) -> Instant {
        self.last_interaction
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.state.is_expired()
    }

    /// Records an interaction. Ignored after expiry.
    pub fn record_interaction(&mut self, now: Instant) -> Transition {
        // An interaction arriving after the deadline has passed does not revive it.
        if self.poll(now) == Transition::Expired {
            return Transition::Expired;
        }
        match self.state {
            GuardState::Active { .. } => {
                self.last_interaction = now;
                self.state = GuardState::Active {
                    deadline: now + self.timeout,
                };
                Transition::Reset
            }
            GuardState::Expired => Transition::Unchanged,
        }
    }

    /// Applies a visibility change.
    ///
    /// `Hidden` expires immediately. `Visible` restarts the deadline.
    pub fn visibility_changed(&mut self, visibility: Visibility, now: Instant) -> Transition {
        if self.state.is_expired() {
            return Transition::Unchanged;
        }
        match visibility {
            Visibility::Hidden => {
                self.state = GuardState::Expired;
                Transition::Expired
            }
            Visibility::Visible => {
                if self.poll(now) == Transition::Expired {
                    return Transition::Expired;
                }
                self.state = GuardState::Active {
                    deadline: now + self.timeout,
                };
                Transition::Reset
            }
        }
    }

    /// Checks the deadline against `now`.
    pub fn poll(&mut self, now: Instant) -> Transition {
        match self.state {
            GuardState::Active { deadline } if now >= deadline => {
                self.state = GuardState::Expired;
                Transition::Expired
            }
            _ => Transition::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Duration = Duration::from_secs(10);

    #[test]
    fn starts_active_with_deadline() {
        let now = Instant::now();
        let timer = InactivityTimer::start(T, now);
        assert_eq!(timer.deadline(), Some(now + T));
        assert!(!timer.is_expired());
    }

    #[test]
    fn expires_at_deadline_without_interaction() {
        let start = Instant::now();
        let mut timer = InactivityTimer::start(T, start);
        assert_eq!(timer.poll(start + Duration::from_secs(9)), Transition::Unchanged);
        assert_eq!(timer.poll(start + T), Transition::Expired);
        assert!(timer.is_expired());
    }

    #[test]
    fn interaction_moves_deadline() {
        let start = Instant::now();
        let mut timer = InactivityTimer::start(T, start);
        let touched = start + Duration::from_secs(4);

        assert_eq!(timer.record_interaction(touched), Transition::Reset);
        assert_eq!(timer.poll(start + T), Transition::Unchanged);
        assert_eq!(timer.last_interaction(), touched);
        assert_eq!(timer.poll(touched + T), Transition::Expired);
    }

    #[test]
    fn hidden_page_expires_immediately() {
        let start = Instant::now();
        let mut timer = InactivityTimer::start(T, start);
        assert_eq!(
            timer.visibility_changed(Visibility::Hidden, start + Duration::from_millis(5)),
            Transition::Expired
        );
        assert_eq!(timer.state(), GuardState::Expired);
    }

    #[test]
    fn visible_page_restarts_deadline() {
        let start = Instant::now();
        let mut timer = InactivityTimer::start(T, start);
        let shown = start + Duration::from_secs(7);
        assert_eq!(
            timer.visibility_changed(Visibility::Visible, shown),
            Transition::Reset
        );
        assert_eq!(timer.deadline(), Some(shown + T));
    }

    #[test]
    fn expiry_is_reported_once() {
        let start = Instant::now();
        let mut timer = InactivityTimer::start(T, start);
        assert_eq!(timer.poll(start + T), Transition::Expired);
        assert_eq!(timer.poll(start + T * 2), Transition::Unchanged);
        assert_eq!(
            timer.visibility_changed(Visibility::Hidden, start + T * 2),
            Transition::Unchanged
        );
    }

    #[test]
    fn interactions_after_expiry_are_ignored() {
        let start = Instant::now();
        let mut timer = InactivityTimer::start(T, start);
        timer.visibility_changed(Visibility::Hidden, start);
        assert_eq!(
            timer.record_interaction(start + Duration::from_secs(1)),
            Transition::Unchanged
        );
        assert!(timer.deadline().is_none());
    }

    #[test]
    fn late_interaction_does_not_revive_session() {
        let start = Instant::now();
        let mut timer = InactivityTimer::start(T, start);
        assert_eq!(
            timer.record_interaction(start + Duration::from_secs(11)),
            Transition::Expired
        );
        assert!(timer.is_expired());
    }

    #[test]
    fn interaction_set_is_complete() {
        assert_eq!(InteractionKind::ALL.len(), 5);
        assert!(InteractionKind::ALL.contains(&InteractionKind::Scroll));
    }
}
