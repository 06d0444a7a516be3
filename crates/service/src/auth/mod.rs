//! Auth module: domain types, provider abstraction, and the login service.
//!
//! The provider is the only component that performs I/O; everything else is
//! validation and error translation.

pub mod domain;
pub mod errors;
pub mod provider;
pub mod service;
pub mod supabase;

pub use errors::{AuthError, Rejection, ValidationError};
pub use provider::{AuthProvider, ProviderError, SignInData};
pub use service::AuthService;
pub use supabase::SupabaseAuthClient;
