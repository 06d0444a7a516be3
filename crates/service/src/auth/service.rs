use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, LoginInput};
use super::errors::{AuthError, Rejection};
use super::provider::{AuthProvider, ProviderError};

/// Login business service independent of web framework
pub struct AuthService<P: AuthProvider + ?Sized> {
    provider: Arc<P>,
}

impl<P: AuthProvider + ?Sized> AuthService<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Validate the input and sign in through the provider.
    ///
    /// Validation failures return before the provider is called.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, domain::LoginInput, provider::mock::MockAuthProvider};
    /// use std::sync::Arc;
    /// let provider = Arc::new(MockAuthProvider::new().with_user("u@e.com", "Passw0rd"));
    /// let svc = AuthService::new(provider.clone());
    /// let session = tokio_test::block_on(svc.login(LoginInput::new("u@e.com", "Passw0rd"))).unwrap();
    /// assert_eq!(session.user["email"], "u@e.com");
    /// let err = tokio_test::block_on(svc.login(LoginInput::new("u@e.com", "wrong"))).unwrap_err();
    /// assert_eq!(err.message(), "Wrong email or password");
    /// ```
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let credentials = input.validate()?;
        debug!("credentials validated, calling provider");

        match self.provider.sign_in_with_password(&credentials).await {
            Ok(data) => {
                info!("login_succeeded");
                Ok(AuthSession { user: data.user, session: data.session })
            }
            Err(ProviderError::Api { status, message }) => {
                warn!(status, provider_message = %message, "provider rejected sign-in");
                Err(AuthError::Rejected(Rejection::from_provider_message(&message)))
            }
            Err(e) => Err(AuthError::Provider(e.to_string())),
        }
    }
}
