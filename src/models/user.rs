//! User model and authentication claims

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::patch::{EntityKind, FieldDescriptor, FieldType, FieldValue, PatchError, Patchable};

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 30;

/// User account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Login name, fixed once the account exists
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Plain text on the way in, argon2 hash once stored
    #[serde(skip_serializing)]
    #[validate(length(min = 8, max = 30, message = "Password must be between 8 and 30 characters"))]
    pub password: String,
    /// Set by the server when the account is created
    #[serde(default)]
    pub creation_date: Option<NaiveDate>,
    #[serde(default = "super::default_active")]
    pub active: bool,
}

impl Patchable for User {
    const KIND: EntityKind = EntityKind::User;

    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::identity("id"),
        FieldDescriptor::attribute("name", FieldType::Text),
        FieldDescriptor::system("username", FieldType::Text),
        FieldDescriptor::attribute("email", FieldType::Text),
        FieldDescriptor::attribute("password", FieldType::Text),
        FieldDescriptor::system("creationDate", FieldType::Date).nullable(),
        FieldDescriptor::attribute("active", FieldType::Boolean),
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => self.id.into(),
            "name" => self.name.clone().into(),
            "username" => self.username.clone().into(),
            "email" => self.email.clone().into(),
            "password" => self.password.clone().into(),
            "creationDate" => self.creation_date.into(),
            "active" => self.active.into(),
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), PatchError> {
        match name {
            "id" => self.id = value.into_long(name)?,
            "name" => self.name = value.into_text(name)?,
            "username" => self.username = value.into_text(name)?,
            "email" => self.email = value.into_text(name)?,
            "password" => self.password = value.into_text(name)?,
            "creationDate" => self.creation_date = value.into_optional_date(name)?,
            "active" => self.active = value.into_boolean(name)?,
            _ => return Err(PatchError::mismatch(name)),
        }
        Ok(())
    }
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i64,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}
