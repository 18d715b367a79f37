//! Identity adjunct for the mock backend.
//!
//! # Responsibility
//! - Keep the current user's profile under the `user` key.
//! - Check sign-up/sign-in input shape; no real authentication happens here.
//!
//! # Invariants
//! - Passwords are checked for presence and never persisted.
//! - Emails are trimmed and lowercased before storage or comparison.

use crate::model::user::{Credentials, RegisterRequest, UserProfile};
use crate::model::validation::ValidationError;
use crate::model::required_text;
use crate::repo::RepoResult;
use crate::store::{StoreAdapter, USER_KEY};
use chrono::{DateTime, Utc};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub struct AuthService<'a> {
    store: &'a mut StoreAdapter,
    now: DateTime<Utc>,
}

impl<'a> AuthService<'a> {
    pub fn new(store: &'a mut StoreAdapter, now: DateTime<Utc>) -> Self {
        Self { store, now }
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        stored_user(&*self.store)
    }

    /// Creates a fresh profile and makes it the current user.
    pub fn register(&mut self, request: RegisterRequest) -> RepoResult<UserProfile> {
        let name = required_text(&request.name, "name")?;
        let email = normalize_email(&request.email)?;
        required_text(&request.password, "password")?;

        let profile = UserProfile {
            id: Uuid::new_v4(),
            name,
            email,
            created_at: self.now,
        };
        self.store.save(USER_KEY, &profile);
        info!("event=auth_register module=auth status=ok");
        Ok(profile)
    }

    /// Signs in, reusing the stored profile when the email matches.
    pub fn login(&mut self, credentials: Credentials) -> RepoResult<UserProfile> {
        let email = normalize_email(&credentials.email)?;
        required_text(&credentials.password, "password")?;

        if let Some(existing) = self
            .current_user()
            .filter(|profile| profile.email == email)
        {
            info!("event=auth_login module=auth status=ok profile=existing");
            return Ok(existing);
        }

        let name = email
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string();
        let profile = UserProfile {
            id: Uuid::new_v4(),
            name,
            email,
            created_at: self.now,
        };
        self.store.save(USER_KEY, &profile);
        info!("event=auth_login module=auth status=ok profile=new");
        Ok(profile)
    }

    pub fn logout(&mut self) {
        self.store.remove(USER_KEY);
        info!("event=auth_logout module=auth status=ok");
    }
}

fn normalize_email(value: &str) -> Result<String, ValidationError> {
    let email = required_text(value, "email")?.to_lowercase();
    if !EMAIL_RE.is_match(&email) {
        return Err(ValidationError::InvalidEmail(email));
    }
    Ok(email)
}

/// Profile saved by the last register or login, if any.
pub(crate) fn stored_user(store: &StoreAdapter) -> Option<UserProfile> {
    store.load_present(USER_KEY)
}

#[cfg(test)]
mod tests {
    use super::normalize_email;
    use crate::model::validation::ValidationError;

    #[test]
    fn normalize_email_lowercases_and_validates() {
        assert_eq!(
            normalize_email("  Ada@Example.COM ").unwrap(),
            "ada@example.com"
        );
        assert!(matches!(
            normalize_email("not-an-email"),
            Err(ValidationError::InvalidEmail(_))
        ));
        assert_eq!(
            normalize_email(" "),
            Err(ValidationError::MissingField("email"))
        );
    }
}
