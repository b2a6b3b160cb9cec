//! Scan cycle state machine.
//!
//! Tracks which phase of a scan cycle the scanner is in and rejects any
//! transition that the cycle does not allow.
//!
//! # States
//!
//! - `Idle`: Recovering after a failed cycle
//! - `Detecting`: Polling the reader for a tag
//! - `Authenticating`: Sending the derived password to the tag
//! - `Reading`: Reading the identification payload
//! - `Classifying`: Deciding vehicle/character and extracting the id
//! - `Reporting`: Looking the id up and emitting the result
//! - `CoolDown`: Letting a processed or debounced tag settle
//!
//! # Valid Transitions
//!
//! - Idle → Detecting → Authenticating → Reading → Classifying → Reporting → CoolDown → Detecting
//! - Detecting → CoolDown (debounced: same tag still on the pad)
//! - Detecting / Authenticating / Reading / Classifying → Idle (failure)
//!
//! A poll that finds no tag leaves the machine in `Detecting` without
//! recording a transition.
//!
//! # Examples
//!
//! ```
//! use toypad_scanner::{ScanState, StateMachine};
//!
//! let mut machine = StateMachine::new();
//! assert_eq!(machine.current_state(), ScanState::Idle);
//!
//! machine.transition_to(ScanState::Detecting).unwrap();
//! assert!(machine.transition_to(ScanState::Reporting).is_err());
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use toypad_core::{Error, Result};
use tracing::trace;

/// Maximum number of state transitions to keep in history.
///
/// A successful cycle records six transitions, so 100 entries cover the
/// last sixteen or so tags.
const MAX_HISTORY_SIZE: usize = 100;

/// Phases of a scan cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanState {
    Idle,
    Detecting,
    Authenticating,
    Reading,
    Classifying,
    Reporting,
    CoolDown,
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            ScanState::Idle => "Idle",
            ScanState::Detecting => "Detecting",
            ScanState::Authenticating => "Authenticating",
            ScanState::Reading => "Reading",
            ScanState::Classifying => "Classifying",
            ScanState::Reporting => "Reporting",
            ScanState::CoolDown => "CoolDown",
        };
        write!(f, "{}", state_str)
    }
}

impl ScanState {
    /// Check if transition to target state is valid from this state.
    ///
    /// # Examples
    ///
    /// ```
    /// use toypad_scanner::ScanState;
    ///
    /// assert!(ScanState::Detecting.can_transition_to(&ScanState::Authenticating));
    /// assert!(ScanState::Reading.can_transition_to(&ScanState::Idle));
    /// assert!(!ScanState::Reporting.can_transition_to(&ScanState::Idle));
    /// ```
    pub fn can_transition_to(&self, target: &ScanState) -> bool {
        matches!(
            (self, target),
            // Start of a poll
            (ScanState::Idle | ScanState::CoolDown, ScanState::Detecting)
            // From Detecting
            | (ScanState::Detecting, ScanState::Authenticating | ScanState::CoolDown | ScanState::Idle)
            // From Authenticating
            | (ScanState::Authenticating, ScanState::Reading | ScanState::Idle)
            // From Reading
            | (ScanState::Reading, ScanState::Classifying | ScanState::Idle)
            // From Classifying
            | (ScanState::Classifying, ScanState::Reporting | ScanState::Idle)
            // From Reporting
            | (ScanState::Reporting, ScanState::CoolDown)
        )
    }
}

/// A single recorded state transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state transitioned from.
    pub from: ScanState,

    /// The state transitioned to.
    pub to: ScanState,

    /// When the transition occurred.
    ///
    /// Not serialized; set to the time of deserialization.
    #[serde(skip, default = "Instant::now")]
    pub timestamp: Instant,
}

impl StateTransition {
    pub fn new(from: ScanState, to: ScanState) -> Self {
        Self {
            from,
            to,
            timestamp: Instant::now(),
        }
    }
}

/// State machine for the scan cycle.
///
/// Owned by a single scanner; not shared between tasks.
#[derive(Debug)]
pub struct StateMachine {
    current_state: ScanState,
    history: VecDeque<StateTransition>,
}

impl StateMachine {
    /// Create a new state machine in the Idle state.
    pub fn new() -> Self {
        Self {
            current_state: ScanState::Idle,
            history: VecDeque::with_capacity(MAX_HISTORY_SIZE),
        }
    }

    pub fn current_state(&self) -> ScanState {
        self.current_state
    }

    /// Recent transitions, oldest first.
    pub fn history(&self) -> &VecDeque<StateTransition> {
        &self.history
    }

    /// Get the last N state transitions.
    pub fn last_transitions(&self, count: usize) -> Vec<StateTransition> {
        self.history
            .iter()
            .rev()
            .take(count)
            .rev()
            .cloned()
            .collect()
    }

    /// Transition to a new state, validating the transition.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStateTransition` if the cycle does not allow
    /// moving from the current state to `new_state`.
    pub fn transition_to(&mut self, new_state: ScanState) -> Result<StateTransition> {
        if !self.current_state.can_transition_to(&new_state) {
            return Err(Error::InvalidStateTransition {
                from: self.current_state.to_string(),
                to: new_state.to_string(),
            });
        }

        let transition = StateTransition::new(self.current_state, new_state);
        trace!(from = %transition.from, to = %transition.to, "scan state");

        self.current_state = new_state;
        if self.history.len() == MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
        self.history.push_back(transition.clone());

        Ok(transition)
    }

    /// Move to `state` unless the machine is already there.
    ///
    /// # Errors
    ///
    /// Same as [`transition_to`](Self::transition_to).
    pub fn enter(&mut self, state: ScanState) -> Result<()> {
        if self.current_state != state {
            self.transition_to(state)?;
        }
        Ok(())
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn run_through(machine: &mut StateMachine, states: &[ScanState]) {
        for state in states {
            machine.transition_to(*state).unwrap();
        }
    }

    #[test]
    fn test_new_machine_starts_idle() {
        let machine = StateMachine::new();
        assert_eq!(machine.current_state(), ScanState::Idle);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn test_full_successful_cycle() {
        let mut machine = StateMachine::new();
        run_through(
            &mut machine,
            &[
                ScanState::Detecting,
                ScanState::Authenticating,
                ScanState::Reading,
                ScanState::Classifying,
                ScanState::Reporting,
                ScanState::CoolDown,
                ScanState::Detecting,
            ],
        );
        assert_eq!(machine.current_state(), ScanState::Detecting);
        assert_eq!(machine.history().len(), 7);
    }

    #[rstest]
    #[case(ScanState::Authenticating)]
    #[case(ScanState::Reading)]
    #[case(ScanState::Classifying)]
    fn test_failure_returns_to_idle(#[case] failing: ScanState) {
        let mut machine = StateMachine::new();
        let path = [
            ScanState::Detecting,
            ScanState::Authenticating,
            ScanState::Reading,
            ScanState::Classifying,
        ];
        let upto = path.iter().position(|s| *s == failing).unwrap();
        run_through(&mut machine, &path[..=upto]);

        machine.transition_to(ScanState::Idle).unwrap();
        assert_eq!(machine.current_state(), ScanState::Idle);
    }

    #[test]
    fn test_debounce_path() {
        let mut machine = StateMachine::new();
        run_through(&mut machine, &[ScanState::Detecting, ScanState::CoolDown]);
        assert_eq!(machine.current_state(), ScanState::CoolDown);
    }

    #[rstest]
    #[case(ScanState::Idle, ScanState::Reading)]
    #[case(ScanState::Detecting, ScanState::Reporting)]
    #[case(ScanState::Authenticating, ScanState::Classifying)]
    #[case(ScanState::Reporting, ScanState::Idle)]
    #[case(ScanState::CoolDown, ScanState::Authenticating)]
    fn test_invalid_transitions(#[case] from: ScanState, #[case] to: ScanState) {
        assert!(!from.can_transition_to(&to));
    }

    #[test]
    fn test_invalid_transition_error() {
        let mut machine = StateMachine::new();
        let err = machine.transition_to(ScanState::Reporting).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid state transition from Idle to Reporting"
        );
        assert_eq!(machine.current_state(), ScanState::Idle);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn test_enter_same_state_records_nothing() {
        let mut machine = StateMachine::new();
        machine.enter(ScanState::Detecting).unwrap();
        machine.enter(ScanState::Detecting).unwrap();
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut machine = StateMachine::new();
        for _ in 0..MAX_HISTORY_SIZE {
            run_through(&mut machine, &[ScanState::Detecting, ScanState::Idle]);
        }
        assert_eq!(machine.history().len(), MAX_HISTORY_SIZE);

        let last = machine.last_transitions(2);
        assert_eq!(last[0].to, ScanState::Detecting);
        assert_eq!(last[1].to, ScanState::Idle);
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_string(&ScanState::CoolDown).unwrap();
        assert_eq!(json, "\"cool_down\"");
    }
}
