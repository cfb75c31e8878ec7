use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::error::DomainError;

const MAX_NAME_CHARS: usize = 150;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = normalize_username(&self.username)?;
        let email = normalize_email(&self.email)?;
        let password_len = self.password.chars().count();
        if !(8..=128).contains(&password_len) {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 8..128 chars",
            });
        }
        Ok(Self {
            username,
            email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let username = self.username.trim();
        if username.is_empty() || username.len() > 64 {
            return Err(DomainError::Validation {
                field: "username",
                message: "must be 1..64 chars",
            });
        }

        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            username: username.to_string(),
            password: self.password,
        })
    }
}

/// Profile fields a user may change about themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdateProfileRequest {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
}

impl UpdateProfileRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            username: normalize_username(&self.username)?,
            email: normalize_email(&self.email)?,
            first_name: normalize_person_name("first_name", &self.first_name)?,
            last_name: normalize_person_name("last_name", &self.last_name)?,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(
        id: i64,
        username: impl Into<String>,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let username = normalize_username(&username.into())?;
        let email = normalize_email(&email.into())?;

        Ok(Self {
            id,
            username,
            email,
            first_name: String::new(),
            last_name: String::new(),
            created_at,
        })
    }

    pub(crate) fn with_names(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        self.first_name = normalize_person_name("first_name", &first_name.into())?;
        self.last_name = normalize_person_name("last_name", &last_name.into())?;
        Ok(self)
    }
}

fn normalize_username(username: &str) -> Result<String, DomainError> {
    let username = username.trim();
    if username.len() < 3 || username.len() > 64 {
        return Err(DomainError::Validation {
            field: "username",
            message: "must be 3..64 chars",
        });
    }
    if username.contains('/') || username.chars().any(char::is_whitespace) {
        return Err(DomainError::Validation {
            field: "username",
            message: "must not contain whitespace or '/'",
        });
    }
    Ok(username.to_string())
}

fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::Validation {
            field: "email",
            message: "must be a valid email",
        });
    }
    Ok(email)
}

fn normalize_person_name(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.chars().count() > MAX_NAME_CHARS {
        return Err(DomainError::Validation {
            field,
            message: "must be at most 150 chars",
        });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::{
        RegisterRequest, UpdateProfileRequest, User, normalize_email, normalize_username,
    };
    use crate::domain::error::DomainError;
    use chrono::Utc;

    #[test]
    fn user_new_rejects_non_positive_id() {
        let result = User::new(0, "valid_user", "test@example.com", Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        let value = normalize_email("  TeSt@Example.COM ").expect("must be valid");
        assert_eq!(value, "test@example.com");
    }

    #[test]
    fn username_rules_are_applied() {
        assert!(normalize_username("ab").is_err());
        assert!(normalize_username("with space").is_err());
        assert!(normalize_username("a/b/c").is_err());
        assert!(normalize_username("valid_user").is_ok());
    }

    #[test]
    fn register_password_length_is_checked() {
        let short = RegisterRequest {
            username: "valid_user".to_string(),
            email: "test@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(short.validate().is_err());

        let ok = RegisterRequest {
            username: "valid_user".to_string(),
            email: "test@example.com".to_string(),
            password: "very-secure-password".to_string(),
        };
        let validated = ok.validate().expect("must be valid");
        assert_eq!(validated.username, "valid_user");
        assert_eq!(validated.email, "test@example.com");
    }

    #[test]
    fn update_profile_request_normalizes_names() {
        let req = UpdateProfileRequest {
            username: " reader ".to_string(),
            email: "Reader@Example.com".to_string(),
            first_name: "  Ada ".to_string(),
            last_name: "".to_string(),
        };

        let validated = req.validate().expect("must be valid");
        assert_eq!(validated.username, "reader");
        assert_eq!(validated.email, "reader@example.com");
        assert_eq!(validated.first_name, "Ada");
        assert_eq!(validated.last_name, "");
    }

    #[test]
    fn update_profile_request_rejects_long_last_name() {
        let req = UpdateProfileRequest {
            username: "reader".to_string(),
            email: "reader@example.com".to_string(),
            first_name: "Ada".to_string(),
            last_name: "x".repeat(151),
        };

        match req.validate() {
            Err(DomainError::Validation { field, .. }) => assert_eq!(field, "last_name"),
            other => panic!("expected last_name validation error, got {other:?}"),
        }
    }
}
