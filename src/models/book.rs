//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::patch::{EntityKind, FieldDescriptor, FieldType, FieldValue, PatchError, Patchable};

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Assigned by the server, ignored on create and update
    #[serde(default)]
    pub id: i64,
    #[validate(length(min = 1, message = "Book title is required"))]
    pub title: String,
    pub genre: Option<String>,
    #[validate(range(min = 1, message = "A book has at least one page"))]
    pub pages: i32,
    #[validate(range(exclusive_min = 0.0, message = "Price must be positive"))]
    pub price: f64,
    pub available: bool,
    /// Category reference, updatable through this key only
    pub category_id: Option<i64>,
    /// Author reference, updatable through this key only
    pub author_id: Option<i64>,
}

impl Patchable for Book {
    const KIND: EntityKind = EntityKind::Book;

    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::identity("id"),
        FieldDescriptor::attribute("title", FieldType::Text),
        FieldDescriptor::attribute("genre", FieldType::Text).nullable(),
        FieldDescriptor::attribute("pages", FieldType::Integer),
        FieldDescriptor::attribute("price", FieldType::Real),
        FieldDescriptor::attribute("available", FieldType::Boolean),
        FieldDescriptor::relation_key("categoryId", EntityKind::BookCategory).nullable(),
        FieldDescriptor::relation_key("authorId", EntityKind::Author).nullable(),
        FieldDescriptor::relation_object("category", EntityKind::BookCategory),
        FieldDescriptor::relation_object("author", EntityKind::Author),
        FieldDescriptor::collection("loans", EntityKind::Loan),
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => self.id.into(),
            "title" => self.title.clone().into(),
            "genre" => self.genre.clone().into(),
            "pages" => self.pages.into(),
            "price" => self.price.into(),
            "available" => self.available.into(),
            "categoryId" => FieldValue::reference(self.category_id),
            "authorId" => FieldValue::reference(self.author_id),
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), PatchError> {
        match name {
            "id" => self.id = value.into_long(name)?,
            "title" => self.title = value.into_text(name)?,
            "genre" => self.genre = value.into_optional_text(name)?,
            "pages" => self.pages = value.into_integer(name)?,
            "price" => self.price = value.into_real(name)?,
            "available" => self.available = value.into_boolean(name)?,
            "categoryId" => self.category_id = value.into_optional_reference(name)?,
            "authorId" => self.author_id = value.into_optional_reference(name)?,
            _ => return Err(PatchError::mismatch(name)),
        }
        Ok(())
    }
}
