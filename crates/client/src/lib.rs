//! Client-side login state container.
//!
//! `LoginHook` submits credentials to the login endpoint and publishes a
//! `LoginState` that presentation code renders (spinner, error banner,
//! redirect on success).

pub mod hook;
pub mod state;

pub use hook::{HookError, LoginHook};
pub use state::{LoginPhase, LoginState};
