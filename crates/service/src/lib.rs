//! Service layer for the login flow.
//! - Validates submitted credentials before anything leaves the process.
//! - Talks to the identity provider through the `AuthProvider` abstraction.
//! - Turns provider rejections into user-facing messages in one place.

pub mod auth;
