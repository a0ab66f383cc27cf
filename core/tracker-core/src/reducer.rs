//! Folds canonical signal events into condition flags and derives the
//! composite activity label.
//!
//! ```text
//! !SolutionOpen → no_solution
//! !HasFocus     → no_focus
//! Debugging     → debugging
//! Building      → building
//! Testing       → testing
//! otherwise     → coding
//! ```
//!
//! Screensaver, lock, suspend and lid conditions are tracked and queryable
//! but the default order never routes to an away label.

use timetrack_protocol::{ActivityLabel, Condition, SignalEvent};

/// Current value of every condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conditions {
    pub has_focus: bool,
    pub solution_open: bool,
    pub building: bool,
    pub testing: bool,
    pub debugging: bool,
    pub screen_saver_active: bool,
    pub session_locked: bool,
    pub system_suspended: bool,
    pub lid_closed: bool,
}

impl Default for Conditions {
    /// Focus held, nothing loaded, nothing running.
    fn default() -> Self {
        Self {
            has_focus: true,
            solution_open: false,
            building: false,
            testing: false,
            debugging: false,
            screen_saver_active: false,
            session_locked: false,
            system_suspended: false,
            lid_closed: false,
        }
    }
}

impl Conditions {
    pub fn get(&self, condition: Condition) -> bool {
        match condition {
            Condition::HasFocus => self.has_focus,
            Condition::SolutionOpen => self.solution_open,
            Condition::Building => self.building,
            Condition::Testing => self.testing,
            Condition::Debugging => self.debugging,
            Condition::ScreenSaverActive => self.screen_saver_active,
            Condition::SessionLocked => self.session_locked,
            Condition::SystemSuspended => self.system_suspended,
            Condition::LidClosed => self.lid_closed,
        }
    }

    /// Returns true when the stored value changed.
    pub fn set(&mut self, condition: Condition, value: bool) -> bool {
        let slot = match condition {
            Condition::HasFocus => &mut self.has_focus,
            Condition::SolutionOpen => &mut self.solution_open,
            Condition::Building => &mut self.building,
            Condition::Testing => &mut self.testing,
            Condition::Debugging => &mut self.debugging,
            Condition::ScreenSaverActive => &mut self.screen_saver_active,
            Condition::SessionLocked => &mut self.session_locked,
            Condition::SystemSuspended => &mut self.system_suspended,
            Condition::LidClosed => &mut self.lid_closed,
        };
        let changed = *slot != value;
        *slot = value;
        changed
    }

    /// Conditions after applying `events` in order on top of the defaults.
    pub fn observed(events: &[SignalEvent]) -> Self {
        let mut conditions = Self::default();
        for event in events {
            let (condition, value) = event.target();
            conditions.set(condition, value);
        }
        conditions
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecedenceRule {
    pub condition: Condition,
    pub when: bool,
    pub label: ActivityLabel,
}

impl PrecedenceRule {
    pub const fn new(condition: Condition, when: bool, label: ActivityLabel) -> Self {
        Self {
            condition,
            when,
            label,
        }
    }
}

/// Ordered rules, first match wins. Fixed for the lifetime of an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Precedence {
    rules: Vec<PrecedenceRule>,
    fallback: ActivityLabel,
}

const DEFAULT_RULES: [PrecedenceRule; 5] = [
    PrecedenceRule::new(Condition::SolutionOpen, false, ActivityLabel::NoSolution),
    PrecedenceRule::new(Condition::HasFocus, false, ActivityLabel::NoFocus),
    PrecedenceRule::new(Condition::Debugging, true, ActivityLabel::Debugging),
    PrecedenceRule::new(Condition::Building, true, ActivityLabel::Building),
    PrecedenceRule::new(Condition::Testing, true, ActivityLabel::Testing),
];

impl Default for Precedence {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec(), ActivityLabel::Coding)
    }
}

impl Precedence {
    pub fn new(rules: Vec<PrecedenceRule>, fallback: ActivityLabel) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[PrecedenceRule] {
        &self.rules
    }

    pub fn fallback(&self) -> ActivityLabel {
        self.fallback
    }

    pub fn resolve(&self, conditions: &Conditions) -> ActivityLabel {
        self.rules
            .iter()
            .find(|rule| conditions.get(rule.condition) == rule.when)
            .map(|rule| rule.label)
            .unwrap_or(self.fallback)
    }
}

#[derive(Debug, Clone)]
pub struct SignalReducer {
    conditions: Conditions,
    precedence: Precedence,
    current: ActivityLabel,
}

impl SignalReducer {
    pub fn new(conditions: Conditions) -> Self {
        Self::with_precedence(conditions, Precedence::default())
    }

    pub fn with_precedence(conditions: Conditions, precedence: Precedence) -> Self {
        let current = precedence.resolve(&conditions);
        Self {
            conditions,
            precedence,
            current,
        }
    }

    /// Applies one event. Returns the new label only when it differs from
    /// the previous one.
    pub fn apply(&mut self, event: SignalEvent) -> Option<ActivityLabel> {
        let (condition, value) = event.target();
        let flipped = self.conditions.set(condition, value);
        let next = self.precedence.resolve(&self.conditions);

        if next == self.current {
            tracing::debug!(
                event = %event,
                condition = %condition,
                flipped,
                label = %self.current,
                "Signal applied without label change"
            );
            return None;
        }

        self.current = next;
        Some(next)
    }

    pub fn query(&self, condition: Condition) -> bool {
        self.conditions.get(condition)
    }

    pub fn current(&self) -> ActivityLabel {
        self.current
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    pub fn precedence(&self) -> &Precedence {
        &self.precedence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn working() -> SignalReducer {
        SignalReducer::new(Conditions::observed(&[SignalEvent::SolutionOpened]))
    }

    #[test]
    fn defaults_start_without_solution() {
        let reducer = SignalReducer::new(Conditions::default());
        assert_eq!(reducer.current(), ActivityLabel::NoSolution);
        assert!(reducer.query(Condition::HasFocus));
    }

    #[test]
    fn open_solution_with_focus_is_coding() {
        assert_eq!(working().current(), ActivityLabel::Coding);
    }

    #[test]
    fn debugging_beats_building() {
        let mut reducer = working();
        assert_eq!(
            reducer.apply(SignalEvent::BuildStarted),
            Some(ActivityLabel::Building)
        );
        assert_eq!(
            reducer.apply(SignalEvent::DebugStarted),
            Some(ActivityLabel::Debugging)
        );
        assert_eq!(reducer.current(), ActivityLabel::Debugging);
    }

    #[test]
    fn building_beats_testing() {
        let mut reducer = working();
        reducer.apply(SignalEvent::TestStarted);
        assert_eq!(reducer.current(), ActivityLabel::Testing);
        reducer.apply(SignalEvent::BuildStarted);
        assert_eq!(reducer.current(), ActivityLabel::Building);
        reducer.apply(SignalEvent::BuildFinished);
        assert_eq!(reducer.current(), ActivityLabel::Testing);
    }

    #[test]
    fn focus_loss_overrides_activity() {
        let mut reducer = working();
        reducer.apply(SignalEvent::BuildStarted);
        reducer.apply(SignalEvent::DebugStarted);
        reducer.apply(SignalEvent::TestStarted);
        assert_eq!(
            reducer.apply(SignalEvent::FocusLost),
            Some(ActivityLabel::NoFocus)
        );
        assert_eq!(
            reducer.apply(SignalEvent::FocusGained),
            Some(ActivityLabel::Debugging)
        );
    }

    #[test]
    fn closed_solution_wins_over_lost_focus() {
        let mut reducer = working();
        reducer.apply(SignalEvent::FocusLost);
        assert_eq!(
            reducer.apply(SignalEvent::SolutionClosed),
            Some(ActivityLabel::NoSolution)
        );
    }

    #[test]
    fn repeated_event_reports_no_change() {
        let mut reducer = working();
        assert!(reducer.apply(SignalEvent::BuildStarted).is_some());
        assert!(reducer.apply(SignalEvent::BuildStarted).is_none());
        assert!(reducer.query(Condition::Building));
    }

    #[test]
    fn masked_flag_change_is_silent() {
        let mut reducer = working();
        reducer.apply(SignalEvent::DebugStarted);
        assert!(reducer.apply(SignalEvent::TestStarted).is_none());
        assert!(reducer.apply(SignalEvent::TestFinished).is_none());
        assert_eq!(reducer.current(), ActivityLabel::Debugging);
    }

    #[test]
    fn away_signals_only_touch_conditions() {
        let mut reducer = working();
        for event in [
            SignalEvent::ScreenSaverStarted,
            SignalEvent::SessionLocked,
            SignalEvent::SystemSuspended,
            SignalEvent::LidClosed,
        ] {
            assert!(reducer.apply(event).is_none());
        }
        assert!(reducer.query(Condition::ScreenSaverActive));
        assert!(reducer.query(Condition::SessionLocked));
        assert!(reducer.query(Condition::SystemSuspended));
        assert!(reducer.query(Condition::LidClosed));
        assert_eq!(reducer.current(), ActivityLabel::Coding);
    }

    #[test]
    fn custom_precedence_can_route_away_labels() {
        let mut rules = vec![PrecedenceRule::new(
            Condition::SessionLocked,
            true,
            ActivityLabel::SessionLocked,
        )];
        rules.extend_from_slice(Precedence::default().rules());
        let precedence = Precedence::new(rules, ActivityLabel::Coding);

        let mut reducer = SignalReducer::with_precedence(
            Conditions::observed(&[SignalEvent::SolutionOpened]),
            precedence,
        );
        assert_eq!(reducer.precedence().rules().len(), 6);
        assert_eq!(reducer.precedence().fallback(), ActivityLabel::Coding);
        assert_eq!(
            reducer.apply(SignalEvent::SessionLocked),
            Some(ActivityLabel::SessionLocked)
        );
    }

    #[test]
    fn observed_applies_events_in_order() {
        let conditions = Conditions::observed(&[
            SignalEvent::FocusLost,
            SignalEvent::SolutionOpened,
            SignalEvent::FocusGained,
        ]);
        assert!(conditions.has_focus);
        assert!(conditions.solution_open);
    }

    #[test]
    fn set_reports_flips() {
        let mut conditions = Conditions::default();
        assert!(!conditions.set(Condition::HasFocus, true));
        assert!(conditions.set(Condition::HasFocus, false));
        assert!(!conditions.get(Condition::HasFocus));
    }
}
