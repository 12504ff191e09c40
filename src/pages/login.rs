use tracing::error;

use crate::auth::{self, LoginForm, LoginOutcome, FORGOT_PASSWORD_HINT};
use crate::database::db::LocalStorage;
use crate::error::{FieldErrors, Result};
use crate::latency::Latency;

pub const CONNECTION_ERROR: &str = "Connection error. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct LoginPage {
    pub form: LoginForm,
    pub errors: FieldErrors,
    pub general_error: Option<String>,
    pub notice: Option<String>,
    pub is_loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

impl LoginPage {
    pub fn mount() -> Self {
        Self::default()
    }

    /// Already signed in? Then the page should be skipped.
    pub async fn on_mount(&self, storage: &LocalStorage) -> Result<Option<&'static str>> {
        auth::redirect_on_mount(storage).await
    }

    pub fn set_field(&mut self, field: LoginField, value: String) {
        let key = match field {
            LoginField::Email => {
                self.form.email = value;
                "email"
            }
            LoginField::Password => {
                self.form.password = value;
                "password"
            }
        };
        self.errors.clear(key);
    }

    pub fn toggle_remember_me(&mut self) {
        self.form.remember_me = !self.form.remember_me;
    }

    pub fn forgot_password(&mut self) {
        self.notice = Some(FORGOT_PASSWORD_HINT.to_string());
    }

    /// Returns the route to go to on success.
    pub async fn submit(&mut self, storage: &LocalStorage, latency: &Latency) -> Option<&'static str> {
        if !self.begin_submit() {
            return None;
        }
        self.complete_submit(storage, latency).await
    }

    /// Marks the page as signing in. `false` while a sign-in is already running.
    pub fn begin_submit(&mut self) -> bool {
        if self.is_loading {
            return false;
        }
        self.general_error = None;
        self.is_loading = true;
        true
    }

    /// Runs the sign-in started by `begin_submit`.
    pub async fn complete_submit(&mut self, storage: &LocalStorage, latency: &Latency) -> Option<&'static str> {
        let outcome = auth::login(storage, latency, &self.form).await;
        self.is_loading = false;

        match outcome {
            Ok(LoginOutcome::Invalid(errors)) => {
                self.errors = errors;
                None
            }
            Ok(LoginOutcome::Rejected(message)) => {
                self.errors = FieldErrors::new();
                self.general_error = Some(message);
                None
            }
            Ok(LoginOutcome::Authenticated(_)) => Some(crate::router::DASHBOARD),
            Err(e) => {
                error!(error = %e, "login failed");
                self.general_error = Some(CONNECTION_ERROR.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{DEMO_EMAIL, DEMO_PASSWORD};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn typing_clears_the_field_error() {
        let storage = LocalStorage::in_memory().await.unwrap();
        let mut page = LoginPage::mount();
        assert_eq!(page.submit(&storage, &Latency::none()).await, None);
        assert_eq!(page.errors.get("email"), Some("Email address is required"));

        page.set_field(LoginField::Email, "x".into());
        assert_eq!(page.errors.get("email"), None);
        assert_eq!(page.errors.get("password"), Some("Password is required"));
    }

    #[tokio::test]
    async fn successful_login_routes_to_dashboard_and_next_mount_redirects() {
        let storage = LocalStorage::in_memory().await.unwrap();
        let mut page = LoginPage::mount();
        assert_eq!(page.on_mount(&storage).await.unwrap(), None);

        page.set_field(LoginField::Email, DEMO_EMAIL.into());
        page.set_field(LoginField::Password, DEMO_PASSWORD.into());
        assert_eq!(page.submit(&storage, &Latency::none()).await, Some("/dashboard"));
        assert!(!page.is_loading);

        let again = LoginPage::mount();
        assert_eq!(again.on_mount(&storage).await.unwrap(), Some("/dashboard"));
    }

    #[tokio::test]
    async fn second_begin_is_refused_while_signing_in() {
        let storage = LocalStorage::in_memory().await.unwrap();
        let mut page = LoginPage::mount();
        page.set_field(LoginField::Email, DEMO_EMAIL.into());
        page.set_field(LoginField::Password, DEMO_PASSWORD.into());
        assert!(page.begin_submit());
        assert!(page.is_loading);
        assert!(!page.begin_submit());
        assert_eq!(page.submit(&storage, &Latency::none()).await, None);

        assert_eq!(page.complete_submit(&storage, &Latency::none()).await, Some("/dashboard"));
        assert!(!page.is_loading);
    }

    #[tokio::test]
    async fn rejected_login_shows_general_error() {
        let storage = LocalStorage::in_memory().await.unwrap();
        let mut page = LoginPage::mount();
        page.set_field(LoginField::Email, "someone@else.com".into());
        page.set_field(LoginField::Password, "secret123".into());
        assert_eq!(page.submit(&storage, &Latency::none()).await, None);
        assert!(page.general_error.as_deref().unwrap().starts_with("Invalid credentials."));
    }
}
