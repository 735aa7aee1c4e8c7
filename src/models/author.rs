//! Author model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::patch::{EntityKind, FieldDescriptor, FieldType, FieldValue, PatchError, Patchable};

/// Author record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub id: i64,
    #[validate(length(min = 1, message = "Author name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Author surname is required"))]
    pub surname: String,
    pub birthdate: NaiveDate,
    #[serde(default = "super::default_active")]
    pub active: bool,
    #[validate(length(min = 1, message = "Nationality is required"))]
    pub nationality: String,
}

impl Patchable for Author {
    const KIND: EntityKind = EntityKind::Author;

    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::identity("id"),
        FieldDescriptor::attribute("name", FieldType::Text),
        FieldDescriptor::attribute("surname", FieldType::Text),
        FieldDescriptor::attribute("birthdate", FieldType::Date),
        FieldDescriptor::attribute("active", FieldType::Boolean),
        FieldDescriptor::attribute("nationality", FieldType::Text),
        FieldDescriptor::collection("books", EntityKind::Book),
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => self.id.into(),
            "name" => self.name.clone().into(),
            "surname" => self.surname.clone().into(),
            "birthdate" => self.birthdate.into(),
            "active" => self.active.into(),
            "nationality" => self.nationality.clone().into(),
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), PatchError> {
        match name {
            "id" => self.id = value.into_long(name)?,
            "name" => self.name = value.into_text(name)?,
            "surname" => self.surname = value.into_text(name)?,
            "birthdate" => self.birthdate = value.into_date(name)?,
            "active" => self.active = value.into_boolean(name)?,
            "nationality" => self.nationality = value.into_text(name)?,
            _ => return Err(PatchError::mismatch(name)),
        }
        Ok(())
    }
}
