use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{UserError, UserResult};

/// Roles a user may hold. Stored and rendered upper-case.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
    Manager,
}

impl Role {
    /// The closed set of allowed roles, in display order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::User, Role::Manager];

    /// Message reported when a role is blank or outside [`Role::ALL`].
    pub fn allowed_message() -> String {
        let names: Vec<String> = Self::ALL.iter().map(|r| r.to_string()).collect();
        format!("Role must be one of: {{{}}}", names.join(", "))
    }
}

/// Stored user. Never mutated in place: updates swap the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Directory-assigned identifier, never reused
    #[schema(example = 1)]
    pub id: i64,
    /// Display name, trimmed
    #[schema(example = "Lenon")]
    pub name: String,
    /// Email, trimmed; unique ignoring case
    #[schema(example = "lenon@example.com")]
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn new(id: i64, input: NewUser) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            role: input.role,
        }
    }
}

/// Unvalidated create/update payload. Every field may be absent or null.
///
/// Only structural bounds are checked here, on the trimmed value; business rules
/// run in [`UserDirectory`](crate::service::UserDirectory).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    #[serde(default)]
    #[validate(custom(function = "name_length"))]
    #[schema(example = "  Lenon  ")]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "email_length"))]
    #[schema(example = "lenon@example.com")]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "role_length"))]
    #[schema(example = "admin")]
    pub role: Option<String>,
}

impl UserRequest {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            role: Some(role.into()),
        }
    }
}

const MAX_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 255;
const MAX_ROLE_LEN: usize = 32;

fn trimmed_max(value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().chars().count() > max {
        let mut err = ValidationError::new("length")
            .with_message(format!("must be at most {max} characters").into());
        err.add_param("max".into(), &max);
        return Err(err);
    }
    Ok(())
}

fn name_length(value: &str) -> Result<(), ValidationError> {
    trimmed_max(value, MAX_NAME_LEN)
}

fn email_length(value: &str) -> Result<(), ValidationError> {
    trimmed_max(value, MAX_EMAIL_LEN)
}

fn role_length(value: &str) -> Result<(), ValidationError> {
    trimmed_max(value, MAX_ROLE_LEN)
}

/// Request fields after trimming and case normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedUser {
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Validated user fields, ready to be stored under an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Trims name and email, trims and upper-cases role. Missing fields become empty.
pub fn sanitize(request: &UserRequest) -> SanitizedUser {
    let trimmed = |field: &Option<String>| field.as_deref().unwrap_or_default().trim().to_string();

    SanitizedUser {
        name: trimmed(&request.name),
        email: trimmed(&request.email),
        role: trimmed(&request.role).to_uppercase(),
    }
}

/// Applies business rules in order name, email, role; the first failure wins.
pub fn validate(input: SanitizedUser) -> UserResult<NewUser> {
    if input.name.is_empty() {
        return Err(UserError::InvalidInput("Name cannot be blank".to_string()));
    }

    if input.email.is_empty() || !input.email.contains('@') {
        return Err(UserError::InvalidInput("Invalid email".to_string()));
    }

    let role = input
        .role
        .parse::<Role>()
        .map_err(|_| UserError::InvalidInput(Role::allowed_message()))?;

    Ok(NewUser {
        name: input.name,
        email: input.email,
        role,
    })
}
