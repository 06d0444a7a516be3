/// Observable state of the login form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginState {
    pub is_loading: bool,
    pub error: Option<String>,
    pub success: bool,
}

/// Coarse view of `LoginState` for rendering decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginPhase {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl LoginState {
    /// State at the start of every submission.
    pub fn pending() -> Self {
        Self { is_loading: true, error: None, success: false }
    }

    pub fn phase(&self) -> LoginPhase {
        if self.is_loading {
            LoginPhase::Pending
        } else if self.success {
            LoginPhase::Succeeded
        } else if self.error.is_some() {
            LoginPhase::Failed
        } else {
            LoginPhase::Idle
        }
    }

    pub(crate) fn succeed(&mut self) {
        self.success = true;
        self.error = None;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.success = false;
        self.error = Some(message);
    }
}
