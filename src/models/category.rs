//! Book category model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::patch::{EntityKind, FieldDescriptor, FieldType, FieldValue, PatchError, Patchable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookCategory {
    #[serde(default)]
    pub id: i64,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: String,
    #[serde(default = "super::default_active")]
    pub active: bool,
    pub created_date: NaiveDate,
    pub number_books: i32,
}

impl Patchable for BookCategory {
    const KIND: EntityKind = EntityKind::BookCategory;

    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::identity("id"),
        FieldDescriptor::attribute("name", FieldType::Text),
        FieldDescriptor::attribute("description", FieldType::Text),
        FieldDescriptor::attribute("active", FieldType::Boolean),
        FieldDescriptor::attribute("createdDate", FieldType::Date),
        FieldDescriptor::attribute("numberBooks", FieldType::Integer),
        FieldDescriptor::collection("books", EntityKind::Book),
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => self.id.into(),
            "name" => self.name.clone().into(),
            "description" => self.description.clone().into(),
            "active" => self.active.into(),
            "createdDate" => self.created_date.into(),
            "numberBooks" => self.number_books.into(),
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), PatchError> {
        match name {
            "id" => self.id = value.into_long(name)?,
            "name" => self.name = value.into_text(name)?,
            "description" => self.description = value.into_text(name)?,
            "active" => self.active = value.into_boolean(name)?,
            "createdDate" => self.created_date = value.into_date(name)?,
            "numberBooks" => self.number_books = value.into_integer(name)?,
            _ => return Err(PatchError::mismatch(name)),
        }
        Ok(())
    }
}
