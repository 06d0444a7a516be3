use thiserror::Error;

/// Input problems detected before the provider is contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("email and password are required")]
    MissingCredentials,
    #[error("invalid email format")]
    InvalidEmailFormat,
}

/// Why the provider refused the sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("email not confirmed")]
    EmailNotConfirmed,
    #[error("rate limited")]
    RateLimited,
    #[error("{0}")]
    Other(String),
}

impl Rejection {
    /// Classify a provider error message by its wording (case-sensitive
    /// substring match). Unknown wording falls through to `Other`.
    pub fn from_provider_message(message: &str) -> Self {
        if message.contains("Invalid login credentials") {
            Rejection::InvalidCredentials
        } else if message.contains("Email not confirmed") {
            Rejection::EmailNotConfirmed
        } else if message.contains("Too many requests") {
            Rejection::RateLimited
        } else {
            Rejection::Other(message.to_string())
        }
    }
}

/// Business errors for the login workflow
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("sign-in rejected: {0}")]
    Rejected(Rejection),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("malformed request: {0}")]
    Malformed(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(ValidationError::MissingCredentials) => 1001,
            AuthError::Validation(ValidationError::InvalidEmailFormat) => 1002,
            AuthError::Rejected(Rejection::InvalidCredentials) => 1101,
            AuthError::Rejected(Rejection::EmailNotConfirmed) => 1102,
            AuthError::Rejected(Rejection::RateLimited) => 1103,
            AuthError::Rejected(Rejection::Other(_)) => 1104,
            AuthError::Provider(_) => 1200,
            AuthError::Malformed(_) => 1201,
        }
    }

    /// Message shown to the person logging in.
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::Validation(ValidationError::MissingCredentials) => "Email and password are required",
            AuthError::Validation(ValidationError::InvalidEmailFormat) => "Invalid email format",
            AuthError::Rejected(Rejection::InvalidCredentials) => "Wrong email or password",
            AuthError::Rejected(Rejection::EmailNotConfirmed) => {
                "Email not confirmed. Please check your inbox to confirm your email"
            }
            AuthError::Rejected(Rejection::RateLimited) => "Too many login attempts. Please try again later",
            AuthError::Rejected(Rejection::Other(_)) => "Login failed",
            AuthError::Provider(_) | AuthError::Malformed(_) => "Server error",
        }
    }

    /// True for failures the caller did not cause.
    pub fn is_internal(&self) -> bool {
        matches!(self, AuthError::Provider(_) | AuthError::Malformed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_provider_messages_are_classified() {
        assert_eq!(Rejection::from_provider_message("Invalid login credentials"), Rejection::InvalidCredentials);
        assert_eq!(Rejection::from_provider_message("Email not confirmed"), Rejection::EmailNotConfirmed);
        assert_eq!(
            Rejection::from_provider_message("Too many requests, slow down"),
            Rejection::RateLimited
        );
    }

    #[test]
    fn substrings_match_inside_longer_messages() {
        assert_eq!(
            Rejection::from_provider_message("AuthApiError: Invalid login credentials (400)"),
            Rejection::InvalidCredentials
        );
    }

    #[test]
    fn unknown_wording_falls_through() {
        let r = Rejection::from_provider_message("invalid login credentials");
        assert_eq!(r, Rejection::Other("invalid login credentials".into()));
        assert_eq!(AuthError::Rejected(r).message(), "Login failed");
    }

    #[test]
    fn messages_per_variant() {
        assert_eq!(
            AuthError::Rejected(Rejection::InvalidCredentials).message(),
            "Wrong email or password"
        );
        assert_eq!(AuthError::Provider("timeout".into()).message(), "Server error");
        assert_eq!(AuthError::from(ValidationError::InvalidEmailFormat).message(), "Invalid email format");
    }

    #[test]
    fn codes_are_distinct() {
        let errors = [
            AuthError::Validation(ValidationError::MissingCredentials),
            AuthError::Validation(ValidationError::InvalidEmailFormat),
            AuthError::Rejected(Rejection::InvalidCredentials),
            AuthError::Rejected(Rejection::EmailNotConfirmed),
            AuthError::Rejected(Rejection::RateLimited),
            AuthError::Rejected(Rejection::Other(String::new())),
            AuthError::Provider(String::new()),
            AuthError::Malformed(String::new()),
        ];
        let mut codes: Vec<u16> = errors.iter().map(AuthError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn internal_flag() {
        assert!(AuthError::Malformed("eof".into()).is_internal());
        assert!(!AuthError::Rejected(Rejection::RateLimited).is_internal());
    }
}
