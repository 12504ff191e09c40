//! Demo sign-in. One hard-coded account; a successful login writes the session
//! into local storage, nothing else is checked anywhere.

use std::sync::OnceLock;

use regex_lite::Regex;
use tracing::{info, warn};

use crate::database::db::LocalStorage;
use crate::database::models::User;
use crate::error::{FieldErrors, Result};
use crate::latency::{Latency, LOGIN_DELAY};
use crate::router;

pub const DEMO_EMAIL: &str = "next@financialstoryteller.com";
pub const DEMO_PASSWORD: &str = "NextStoryTeller2025!";

pub const DEMO_NAME: &str = "Sarah Johnson";
pub const DEMO_JOIN_DATE: &str = "2024-01-15";

pub const MIN_PASSWORD_LEN: usize = 6;

pub const FORGOT_PASSWORD_HINT: &str =
    "Password reset functionality would be implemented here. For demo, use: NextStoryTeller2025!";

pub fn invalid_credentials_message() -> String {
    format!("Invalid credentials. Use {DEMO_EMAIL} / {DEMO_PASSWORD}")
}

fn loose_email() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl LoginForm {
    pub fn validate(&self) -> std::result::Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.email.is_empty() {
            errors.insert("email", "Email address is required");
        } else if !loose_email().is_match(&self.email) {
            errors.insert("email", "Please enter a valid email address");
        }
        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert("password", "Password must be at least 6 characters");
        }
        errors.into_result()
    }

    fn matches_demo_account(&self) -> bool {
        self.email == DEMO_EMAIL && self.password == DEMO_PASSWORD
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Field validation failed; nothing was awaited.
    Invalid(FieldErrors),
    /// Well-formed but wrong credentials. Carries the general message.
    Rejected(String),
    Authenticated(User),
}

/// Validates, waits out the simulated round trip, then checks the demo
/// account. On success the session is written to `storage`.
pub async fn login(storage: &LocalStorage, latency: &Latency, form: &LoginForm) -> Result<LoginOutcome> {
    if let Err(errors) = form.validate() {
        return Ok(LoginOutcome::Invalid(errors));
    }

    latency.simulate(LOGIN_DELAY).await;

    if !form.matches_demo_account() {
        warn!(email = %form.email, "login rejected");
        return Ok(LoginOutcome::Rejected(invalid_credentials_message()));
    }

    let user = User {
        name: DEMO_NAME.into(),
        email: form.email.clone(),
        join_date: Some(DEMO_JOIN_DATE.into()),
    };
    storage.store_session(&user).await?;
    info!(email = %user.email, "login succeeded");
    Ok(LoginOutcome::Authenticated(user))
}

/// Where the login page should send the user on mount, if anywhere.
pub async fn redirect_on_mount(storage: &LocalStorage) -> Result<Option<&'static str>> {
    Ok(storage.is_authenticated().await?.then_some(router::DASHBOARD))
}

/// Forgets the in-memory user and returns the route to show next. Local
/// storage is left untouched, so the next login page mount still redirects.
pub fn logout(user: &mut Option<User>) -> &'static str {
    if let Some(u) = user.take() {
        info!(email = %u.email, "logged out");
    }
    router::LOGIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::db::storage::{IS_AUTHENTICATED_KEY, USER_KEY};
    use pretty_assertions::assert_eq;

    fn form(email: &str, password: &str) -> LoginForm {
        LoginForm { email: email.into(), password: password.into(), remember_me: false }
    }

    #[test]
    fn validation_messages() {
        let err = form("", "").validate().unwrap_err();
        assert_eq!(err.get("email"), Some("Email address is required"));
        assert_eq!(err.get("password"), Some("Password is required"));

        let err = form("not-an-email", "12345").validate().unwrap_err();
        assert_eq!(err.get("email"), Some("Please enter a valid email address"));
        assert_eq!(err.get("password"), Some("Password must be at least 6 characters"));

        assert!(form("a@b.c", "123456").validate().is_ok());
    }

    #[tokio::test]
    async fn demo_credentials_write_the_session() {
        let storage = LocalStorage::in_memory().await.unwrap();
        let outcome = login(&storage, &Latency::none(), &form(DEMO_EMAIL, DEMO_PASSWORD)).await.unwrap();

        let LoginOutcome::Authenticated(user) = outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(user.name, "Sarah Johnson");
        assert_eq!(storage.get_item(IS_AUTHENTICATED_KEY).await.unwrap().as_deref(), Some("true"));
        let raw = storage.get_item(USER_KEY).await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Sarah Johnson",
                "email": "next@financialstoryteller.com",
                "joinDate": "2024-01-15"
            })
        );
        assert_eq!(redirect_on_mount(&storage).await.unwrap(), Some("/dashboard"));
    }

    #[tokio::test]
    async fn wrong_password_leaves_flag_unset() {
        let storage = LocalStorage::in_memory().await.unwrap();
        let outcome = login(&storage, &Latency::none(), &form(DEMO_EMAIL, "WrongPass1!")).await.unwrap();
        assert_eq!(
            outcome,
            LoginOutcome::Rejected(
                "Invalid credentials. Use next@financialstoryteller.com / NextStoryTeller2025!".into()
            )
        );
        assert_eq!(storage.get_item(IS_AUTHENTICATED_KEY).await.unwrap(), None);
        assert_eq!(redirect_on_mount(&storage).await.unwrap(), None);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_credential_check() {
        let storage = LocalStorage::in_memory().await.unwrap();
        let outcome = login(&storage, &Latency::none(), &form(DEMO_EMAIL, "short")).await.unwrap();
        assert!(matches!(outcome, LoginOutcome::Invalid(_)));
    }

    #[test]
    fn logout_only_drops_memory() {
        let mut user = Some(User { name: "A B".into(), email: "a@b.c".into(), join_date: None });
        assert_eq!(logout(&mut user), "/login");
        assert_eq!(user, None);
    }
}
