//! Types and helpers shared by the server, the service layer and the login client.

pub mod types;
pub mod utils;

pub use types::{AuthResponse, Health, LoginCredentials};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn failure_response_omits_payloads() {
        let resp = AuthResponse::failure("Login failed");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "message": "Login failed"}));
    }

    #[test]
    fn success_response_keeps_payloads_verbatim() {
        let user = serde_json::json!({"id": "u-1", "app_metadata": {"provider": "email"}});
        let session = serde_json::json!({"access_token": "t", "expires_in": 3600});
        let resp = AuthResponse::success("Login succeeded", user.clone(), session.clone());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["user"], user);
        assert_eq!(json["session"], session);
        assert_eq!(json["success"], true);
    }

    #[test]
    fn response_without_payloads_deserializes() {
        let resp: AuthResponse =
            serde_json::from_str(r#"{"success":false,"message":"Wrong email or password"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.user.is_none());
        assert!(resp.session.is_none());
    }
}
