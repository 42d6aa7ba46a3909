//! Authentication session facade
//!
//! Sequences the API client and the key-value store to implement the
//! register / login / verify / guest / logout flows and the session
//! flags the UI reads. Each network flow comes in two forms: a `try_*`
//! variant reporting a typed [`AuthError`], and a boolean variant
//! that logs the failure and returns `false`, so callers only ever
//! see a success flag.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::types::{
    ApiErrorBody, AuthError, LoginRequest, LoginResponse, RegisterRequest, RegisteredUser,
    VerifyRequest,
};
use crate::api::ApiClient;
use crate::store::{KeyValueStore, StoreError};

const REGISTER_ROUTE: &str = "/auth/register";
const LOGIN_ROUTE: &str = "/auth/login";
const VERIFY_ROUTE: &str = "/auth/verify";

/// Session token storage key
const TOKEN_KEY: &str = "token";
/// Guest-session flag key
const GUEST_KEY: &str = "guest";
/// Onboarding pending flag key
const NEEDS_ONBOARDING_KEY: &str = "NEEDS_ONBOARDING";
/// Email awaiting code verification
const VERIFICATION_EMAIL_KEY: &str = "VERIFICATION_EMAIL";
/// Debug side flag written by guest login on request
const NOT_REALLY_KEY: &str = "notreally";

/// Sentinel written for presence-only flags. Readers check presence
/// and ignore the stored value.
const FLAG_SENTINEL: &str = "true";

/// Client-side authentication session.
///
/// Owns nothing beyond its collaborators: the API client it was built
/// with and a shared key-value store. No ordering is guaranteed across
/// concurrently invoked operations; last write wins per key.
pub struct AuthSession {
    api: ApiClient,
    store: Arc<dyn KeyValueStore>,
}

impl AuthSession {
    /// Create a session facade over the given API client and store.
    pub fn new(api: ApiClient, store: Arc<dyn KeyValueStore>) -> Self {
        Self { api, store }
    }

    /// Register a new account.
    ///
    /// Any failure (transport, HTTP status, decode, storage) collapses
    /// to `false`; detail goes to the debug log only.
    pub async fn register(&self, request: &RegisterRequest) -> bool {
        match self.try_register(request).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Registration failed: {}", e);
                false
            }
        }
    }

    /// Register a new account, reporting the failure kind.
    ///
    /// On success the returned email is always stored as the pending
    /// verification email, and the onboarding flag is set when the
    /// account's settings object is empty.
    pub async fn try_register(&self, request: &RegisterRequest) -> Result<(), AuthError> {
        info!("Registering account: {}", request.email);

        let response = self.api.post(REGISTER_ROUTE, request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Status(status.as_u16()));
        }

        let user: RegisteredUser = response
            .json()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))?;
        debug!("Registered user: {}", user.email);

        self.set_verification_email(&user.email)?;
        // An empty settings object means the account still needs onboarding.
        if user.settings.is_empty() {
            self.set_needs_onboarding()?;
        }

        Ok(())
    }

    /// Log in with email and password. Boolean surface of [`Self::try_login`].
    pub async fn login(&self, request: &LoginRequest) -> bool {
        match self.try_login(request).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Login failed: {}", e);
                false
            }
        }
    }

    /// Log in, reporting the failure kind.
    ///
    /// On success the session token is persisted; the verification
    /// email is stored only for unverified users, and the onboarding
    /// flag is set when the settings object is empty.
    pub async fn try_login(&self, request: &LoginRequest) -> Result<(), AuthError> {
        info!("Logging in: {}", request.email);

        let response = self.api.post(LOGIN_ROUTE, request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Status(status.as_u16()));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))?;
        debug!(
            "Login user: {} (verified: {})",
            body.user.email, body.user.verified
        );

        self.persist_token(&body.token)?;
        if !body.user.verified {
            self.set_verification_email(&body.user.email)?;
        }
        if body.user.settings.is_empty() {
            self.set_needs_onboarding()?;
        }

        Ok(())
    }

    /// Submit the emailed verification code. Boolean surface of
    /// [`Self::try_verify`]. A wrong code leaves the pending email in place.
    pub async fn verify(&self, code: &str) -> bool {
        match self.try_verify(code).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Verification failed: {}", e);
                false
            }
        }
    }

    /// Submit the emailed verification code, reporting the failure kind.
    pub async fn try_verify(&self, code: &str) -> Result<(), AuthError> {
        let email = self.store.get(VERIFICATION_EMAIL_KEY)?;
        let request = VerifyRequest {
            email,
            code: code.to_string(),
        };

        let response = self.api.post(VERIFY_ROUTE, &request).await?;
        let status = response.status();
        if status.is_success() {
            // Success responses carry no body.
            self.clear_verification_email()?;
            return Ok(());
        }

        // Best-effort decode of the error body, logged only.
        match response.json::<ApiErrorBody>().await {
            Ok(body) => debug!("Verification error body: {:?}", body),
            Err(e) => debug!("Verification error body not decodable: {}", e),
        }

        Err(AuthError::Status(status.as_u16()))
    }

    /// Start a guest session.
    ///
    /// Always reports success; store failures are logged and never
    /// surfaced. When `debug_marker` is set an extra `notreally` key is
    /// written alongside the guest flag.
    pub fn login_as_guest(&self, debug_marker: bool) -> bool {
        if debug_marker {
            if let Err(e) = self.store.save(NOT_REALLY_KEY, FLAG_SENTINEL) {
                warn!("Failed to save debug marker: {}", e);
            }
        }
        if let Err(e) = self.store.save(GUEST_KEY, FLAG_SENTINEL) {
            warn!("Failed to save guest flag: {}", e);
        }
        info!("Guest session started");
        true
    }

    /// End the current session.
    ///
    /// Removes the guest flag, session token, onboarding flag, and
    /// pending verification email, in that order, unconditionally. A
    /// failed removal is logged and does not abort the rest.
    pub fn logout(&self) {
        for key in [
            GUEST_KEY,
            TOKEN_KEY,
            NEEDS_ONBOARDING_KEY,
            VERIFICATION_EMAIL_KEY,
        ] {
            if let Err(e) = self.store.remove(key) {
                warn!("Failed to remove {:?} on logout: {}", key, e);
            }
        }
        info!("Session cleared");
    }

    /// Current session token, if any.
    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    /// Whether a guest session is active.
    pub fn is_guest(&self) -> bool {
        self.read(GUEST_KEY).is_some()
    }

    /// Whether onboarding is complete.
    ///
    /// True iff the onboarding flag is absent; never-set and
    /// explicitly-cleared are the same state, and the stored value is
    /// never inspected.
    pub fn is_onboarded(&self) -> bool {
        self.read(NEEDS_ONBOARDING_KEY).is_none()
    }

    /// Email currently awaiting code verification, if any.
    pub fn verification_email(&self) -> Option<String> {
        self.read(VERIFICATION_EMAIL_KEY)
    }

    /// Mark onboarding as pending.
    pub fn set_needs_onboarding(&self) -> Result<(), StoreError> {
        self.store.save(NEEDS_ONBOARDING_KEY, FLAG_SENTINEL)
    }

    /// Mark onboarding as complete.
    pub fn clear_onboarding_flag(&self) -> Result<(), StoreError> {
        self.store.remove(NEEDS_ONBOARDING_KEY)
    }

    /// Store the email awaiting verification.
    pub fn set_verification_email(&self, email: &str) -> Result<(), StoreError> {
        self.store.save(VERIFICATION_EMAIL_KEY, email)
    }

    /// Drop the pending verification email.
    pub fn clear_verification_email(&self) -> Result<(), StoreError> {
        self.store.remove(VERIFICATION_EMAIL_KEY)
    }

    fn persist_token(&self, token: &str) -> Result<(), StoreError> {
        debug!("Persisting session token ({} bytes)", token.len());
        self.store.save(TOKEN_KEY, token)
    }

    /// Read accessor; store errors are logged and collapse to absent.
    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Store read failed for {:?}: {}", key, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::AuthConfig;

    fn session() -> (AuthSession, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let api = ApiClient::new(&AuthConfig::default()).unwrap();
        (AuthSession::new(api, store.clone()), store)
    }

    #[test]
    fn test_onboarding_tracks_flag_presence() {
        let (session, _store) = session();
        assert!(session.is_onboarded());

        session.set_needs_onboarding().unwrap();
        assert!(!session.is_onboarded());

        session.clear_onboarding_flag().unwrap();
        assert!(session.is_onboarded());
    }

    #[test]
    fn test_onboarding_ignores_stored_value() {
        let (session, store) = session();
        store.save(NEEDS_ONBOARDING_KEY, "anything at all").unwrap();
        assert!(!session.is_onboarded());
    }

    #[test]
    fn test_guest_login_sets_flag_only() {
        let (session, store) = session();
        assert!(session.login_as_guest(false));
        assert!(session.is_guest());
        assert!(store.get(NOT_REALLY_KEY).unwrap().is_none());
    }

    #[test]
    fn test_guest_login_with_debug_marker() {
        let (session, store) = session();
        assert!(session.login_as_guest(true));
        assert!(session.is_guest());
        assert_eq!(store.get(NOT_REALLY_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_logout_clears_all_session_keys() {
        let (session, store) = session();
        store.save(TOKEN_KEY, "tok").unwrap();
        session.login_as_guest(false);
        session.set_needs_onboarding().unwrap();
        session.set_verification_email("a@example.com").unwrap();

        session.logout();

        assert!(session.token().is_none());
        assert!(!session.is_guest());
        assert!(session.is_onboarded());
        assert!(session.verification_email().is_none());
    }

    #[test]
    fn test_verification_email_roundtrip() {
        let (session, _store) = session();
        assert!(session.verification_email().is_none());

        session.set_verification_email("a@example.com").unwrap();
        assert_eq!(
            session.verification_email().as_deref(),
            Some("a@example.com")
        );

        session.clear_verification_email().unwrap();
        assert!(session.verification_email().is_none());
    }
}
