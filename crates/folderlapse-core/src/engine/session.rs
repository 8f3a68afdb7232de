use super::error::EngineError;
use tracing::trace;

/// Exit status reported for a failed session.
pub const FAILURE_STATUS: i32 = 1;

/// Where a launch session currently stands.
///
/// ```text
/// Start -> FolderPicked -> Resolved -> Invoked -> Completed(code)
///   \          \              \           \
///    Cancelled  Failed         Failed      Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Start,
    FolderPicked,
    Cancelled,
    Resolved,
    Invoked,
    Completed(i32),
    Failed,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Cancelled | SessionState::Completed(_) | SessionState::Failed
        )
    }

    /// Process exit status for terminal states.
    pub fn exit_status(self) -> Option<i32> {
        match self {
            SessionState::Cancelled => Some(0),
            SessionState::Completed(code) => Some(code),
            SessionState::Failed => Some(FAILURE_STATUS),
            _ => None,
        }
    }

    fn allows(self, next: SessionState) -> bool {
        use SessionState::*;
        match (self, next) {
            (Start, FolderPicked | Cancelled) => true,
            (FolderPicked, Resolved) => true,
            (Resolved, Invoked) => true,
            (Invoked, Completed(_)) => true,
            (current, Failed) => !current.is_terminal(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    history: Vec<SessionState>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Start,
            history: vec![SessionState::Start],
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Every state the session has passed through, oldest first.
    pub fn history(&self) -> &[SessionState] {
        &self.history
    }

    pub fn advance(&mut self, next: SessionState) -> Result<(), EngineError> {
        if !self.state.allows(next) {
            return Err(EngineError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        trace!("Session transition {:?} -> {:?}", self.state, next);
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    /// Moves a live session to `Failed`. Terminal sessions are left alone.
    pub fn fail(&mut self) {
        if !self.state.is_terminal() {
            self.state = SessionState::Failed;
            self.history.push(SessionState::Failed);
        }
    }
}
