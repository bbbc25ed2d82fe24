//! Application lifecycle state machine.
//!
//! The shell moves through these states exactly once per run:
//!
//! ```text
//! Uninitialized ──► ResolvingPath ──► Loading ──► Ready
//!                         │  │            │
//!                         │  └──► Ready   └──► Failed
//!                         └──► Failed
//! ```
//!
//! - `ResolvingPath → Ready`: no settings path was supplied.
//! - `ResolvingPath → Failed`: the supplied path was rejected before loading.
//! - `Loading → Ready`: the settings loaded, or a recoverable load failure was
//!   absorbed.
//! - `Loading → Failed`: the load failed fatally.
//!
//! `Ready` is the only state from which the main window may be presented.
//! `Ready` and `Failed` are terminal.

use thiserror::Error;

/// Startup phase of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    ResolvingPath,
    Loading,
    Ready,
    Failed,
}

/// Errors raised by invalid state machine use.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("illegal lifecycle transition: {from:?} -> {to:?}")]
    IllegalTransition {
        from: LifecycleState,
        to: LifecycleState,
    },
}

impl LifecycleState {
    /// Returns `true` if moving from `self` to `next` is allowed.
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::*;
        matches!(
            (self, next),
            (Uninitialized, ResolvingPath)
                | (ResolvingPath, Loading)
                | (ResolvingPath, Ready)
                | (ResolvingPath, Failed)
                | (Loading, Ready)
                | (Loading, Failed)
        )
    }

    /// Returns the next state, or an error if the transition is not allowed.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::IllegalTransition`] for any edge not shown in
    /// the module diagram.
    pub fn transition(self, next: LifecycleState) -> Result<LifecycleState, LifecycleError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(LifecycleError::IllegalTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Only a `Ready` shell may show its main window.
    pub fn can_present(self) -> bool {
        self == LifecycleState::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LifecycleState::*;

    const ALL: [LifecycleState; 5] = [Uninitialized, ResolvingPath, Loading, Ready, Failed];

    #[test]
    fn test_default_state_is_uninitialized() {
        assert_eq!(LifecycleState::default(), Uninitialized);
    }

    #[test]
    fn test_successful_load_path_is_allowed() {
        // Arrange / Act
        let state = Uninitialized
            .transition(ResolvingPath)
            .and_then(|s| s.transition(Loading))
            .and_then(|s| s.transition(Ready));

        // Assert
        assert_eq!(state, Ok(Ready));
    }

    #[test]
    fn test_no_path_skips_loading() {
        let state = Uninitialized
            .transition(ResolvingPath)
            .and_then(|s| s.transition(Ready));

        assert_eq!(state, Ok(Ready));
    }

    #[test]
    fn test_failure_is_reachable_from_resolving_and_loading() {
        assert!(ResolvingPath.can_transition_to(Failed));
        assert!(Loading.can_transition_to(Failed));
    }

    #[test]
    fn test_skipping_path_resolution_is_rejected() {
        let err = Uninitialized.transition(Loading).unwrap_err();

        assert_eq!(
            err,
            LifecycleError::IllegalTransition {
                from: Uninitialized,
                to: Loading
            }
        );
    }

    #[test]
    fn test_terminal_states_have_no_outgoing_transitions() {
        for from in [Ready, Failed] {
            for to in ALL {
                assert!(
                    !from.can_transition_to(to),
                    "{from:?} -> {to:?} must be rejected"
                );
            }
        }
    }

    #[test]
    fn test_only_ready_can_present() {
        let presentable: Vec<LifecycleState> =
            ALL.into_iter().filter(|s| s.can_present()).collect();

        assert_eq!(presentable, vec![Ready]);
    }
}
