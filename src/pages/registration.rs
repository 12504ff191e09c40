//! Account creation form. Submission is simulated; no account is stored.

use std::sync::OnceLock;

use regex_lite::Regex;
use tracing::info;

use crate::error::FieldErrors;
use crate::latency::{Latency, REGISTRATION_DELAY};
use crate::router;

const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Minimum strength score accepted on submit.
pub const MIN_STRENGTH: usize = 3;

fn strict_email() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: usize,
    /// Requirements not yet met, in display order.
    pub feedback: Vec<&'static str>,
}

impl PasswordStrength {
    pub fn evaluate(password: &str) -> Self {
        let checks = [
            (password.chars().count() >= 8, "At least 8 characters"),
            (password.chars().any(|c| c.is_ascii_uppercase()), "One uppercase letter"),
            (password.chars().any(|c| c.is_ascii_lowercase()), "One lowercase letter"),
            (password.chars().any(|c| c.is_ascii_digit()), "One number"),
            (password.chars().any(|c| SPECIAL_CHARS.contains(c)), "One special character"),
        ];
        Self {
            score: checks.iter().filter(|(ok, _)| *ok).count(),
            feedback: checks.iter().filter(|(ok, _)| !ok).map(|(_, msg)| *msg).collect(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self.score {
            0 | 1 => "Weak",
            2 => "Fair",
            3 => "Good",
            _ => "Strong",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_to_terms: bool,
    pub agree_to_privacy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    FullName,
    Email,
    Password,
    ConfirmPassword,
}

impl RegistrationField {
    fn key(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationPage {
    pub form: RegistrationForm,
    pub errors: FieldErrors,
    pub strength: PasswordStrength,
    pub is_loading: bool,
}

impl RegistrationPage {
    pub fn mount() -> Self {
        Self::default()
    }

    /// Live edit. Re-scores the password and re-checks the confirmation as
    /// the user types.
    pub fn set_field(&mut self, field: RegistrationField, value: String) {
        self.errors.clear(field.key());
        match field {
            RegistrationField::FullName => self.form.full_name = value,
            RegistrationField::Email => self.form.email = value,
            RegistrationField::Password => {
                self.strength = PasswordStrength::evaluate(&value);
                self.form.password = value;
            }
            RegistrationField::ConfirmPassword => self.form.confirm_password = value,
        }

        let confirm_touched = field == RegistrationField::ConfirmPassword
            || (field == RegistrationField::Password && !self.form.confirm_password.is_empty());
        if confirm_touched {
            if !self.form.confirm_password.is_empty() && self.form.password != self.form.confirm_password {
                self.errors.insert("confirmPassword", "Passwords do not match");
            } else {
                self.errors.clear("confirmPassword");
            }
        }
    }

    pub fn toggle_terms(&mut self) {
        self.form.agree_to_terms = !self.form.agree_to_terms;
        self.errors.clear("agreeToTerms");
    }

    pub fn toggle_privacy(&mut self) {
        self.form.agree_to_privacy = !self.form.agree_to_privacy;
        self.errors.clear("agreeToPrivacy");
    }

    pub fn validate(&self) -> FieldErrors {
        let f = &self.form;
        let mut errors = FieldErrors::new();

        let name = f.full_name.trim();
        if name.is_empty() {
            errors.insert("fullName", "Full name is required");
        } else if name.chars().count() < 2 {
            errors.insert("fullName", "Full name must be at least 2 characters");
        }

        if f.email.is_empty() {
            errors.insert("email", "Email address is required");
        } else if !strict_email().is_match(&f.email) {
            errors.insert("email", "Please enter a valid email address");
        }

        if f.password.is_empty() {
            errors.insert("password", "Password is required");
        } else if self.strength.score < MIN_STRENGTH {
            errors.insert("password", "Password is too weak. Please follow the requirements below.");
        }

        if f.confirm_password.is_empty() {
            errors.insert("confirmPassword", "Please confirm your password");
        } else if f.password != f.confirm_password {
            errors.insert("confirmPassword", "Passwords do not match");
        }

        if !f.agree_to_terms {
            errors.insert("agreeToTerms", "You must agree to the Terms of Service");
        }
        if !f.agree_to_privacy {
            errors.insert("agreeToPrivacy", "You must agree to the Privacy Policy");
        }
        errors
    }

    /// Returns the route to go to once the simulated sign-up completes.
    pub async fn submit(&mut self, latency: &Latency) -> Option<&'static str> {
        if !self.begin_submit() {
            return None;
        }
        self.complete_submit(latency).await
    }

    /// Validates and marks the page as creating the account. `false` when the
    /// form has errors or a sign-up is already running.
    pub fn begin_submit(&mut self) -> bool {
        if self.is_loading {
            return false;
        }
        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors;
            return false;
        }
        self.is_loading = true;
        true
    }

    pub async fn complete_submit(&mut self, latency: &Latency) -> Option<&'static str> {
        latency.simulate(REGISTRATION_DELAY).await;
        self.is_loading = false;

        info!(full_name = %self.form.full_name, email = %self.form.email, "registration successful");
        Some(router::DASHBOARD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strength_scores_each_check() {
        let s = PasswordStrength::evaluate("abc");
        assert_eq!(s.score, 1);
        assert_eq!(
            s.feedback,
            vec!["At least 8 characters", "One uppercase letter", "One number", "One special character"]
        );
        assert_eq!(s.label(), "Weak");

        let s = PasswordStrength::evaluate("Abcdefgh");
        assert_eq!(s.score, 3);
        assert_eq!(s.label(), "Good");

        let s = PasswordStrength::evaluate("NextStoryTeller2025!");
        assert_eq!(s.score, 5);
        assert!(s.feedback.is_empty());
        assert_eq!(s.label(), "Strong");
    }

    #[test]
    fn live_confirm_mismatch() {
        let mut page = RegistrationPage::mount();
        page.set_field(RegistrationField::Password, "Secret12!".into());
        page.set_field(RegistrationField::ConfirmPassword, "Secret1".into());
        assert_eq!(page.errors.get("confirmPassword"), Some("Passwords do not match"));

        page.set_field(RegistrationField::ConfirmPassword, "Secret12!".into());
        assert_eq!(page.errors.get("confirmPassword"), None);

        page.set_field(RegistrationField::Password, "Secret12?".into());
        assert_eq!(page.errors.get("confirmPassword"), Some("Passwords do not match"));
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = RegistrationPage::mount().validate();
        let keys: Vec<_> = errors.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["agreeToPrivacy", "agreeToTerms", "confirmPassword", "email", "fullName", "password"]
        );
    }

    #[test]
    fn weak_password_and_short_name() {
        let mut page = RegistrationPage::mount();
        page.set_field(RegistrationField::FullName, " A ".into());
        page.set_field(RegistrationField::Email, "a b@c.d".into());
        page.set_field(RegistrationField::Password, "abcdefgh".into());
        let errors = page.validate();
        assert_eq!(errors.get("fullName"), Some("Full name must be at least 2 characters"));
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert_eq!(
            errors.get("password"),
            Some("Password is too weak. Please follow the requirements below.")
        );
    }

    #[tokio::test]
    async fn valid_submission_routes_to_dashboard() {
        let mut page = RegistrationPage::mount();
        page.set_field(RegistrationField::FullName, "Sarah Johnson".into());
        page.set_field(RegistrationField::Email, "sarah@example.com".into());
        page.set_field(RegistrationField::Password, "Abcdefg1".into());
        page.set_field(RegistrationField::ConfirmPassword, "Abcdefg1".into());
        page.toggle_terms();
        page.toggle_privacy();
        assert_eq!(page.submit(&Latency::none()).await, Some("/dashboard"));
        assert!(!page.is_loading);
    }

    #[test]
    fn invalid_form_never_starts_loading() {
        let mut page = RegistrationPage::mount();
        assert!(!page.begin_submit());
        assert!(!page.is_loading);
        assert_eq!(page.errors.get("fullName"), Some("Full name is required"));
    }
}
