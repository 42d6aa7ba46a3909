//! Authentication session facade
//!
//! Provides:
//! - Registration, login, and email code verification against the API
//! - Guest sessions and logout
//! - Persisted session flags (token, guest, onboarding, pending
//!   verification email)

mod session;
mod types;

pub use session::AuthSession;
pub use types::*;
