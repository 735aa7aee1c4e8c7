//! Loan model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::patch::{EntityKind, FieldDescriptor, FieldType, FieldValue, PatchError, Patchable};

/// Loan record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(default)]
    pub id: i64,
    #[validate(length(min = 1, message = "Loan name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub loan_date: NaiveDate,
    pub quantity: i32,
    /// Borrowed book; reassigned through this key only
    pub book_id: i64,
}

impl Patchable for Loan {
    const KIND: EntityKind = EntityKind::Loan;

    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::identity("id"),
        FieldDescriptor::attribute("name", FieldType::Text),
        FieldDescriptor::attribute("customerName", FieldType::Text),
        FieldDescriptor::attribute("email", FieldType::Text).nullable(),
        FieldDescriptor::attribute("loanDate", FieldType::Date),
        FieldDescriptor::attribute("quantity", FieldType::Integer),
        FieldDescriptor::relation_key("bookId", EntityKind::Book),
        FieldDescriptor::relation_object("book", EntityKind::Book),
    ];

    fn id(&self) -> i64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let value = match name {
            "id" => self.id.into(),
            "name" => self.name.clone().into(),
            "customerName" => self.customer_name.clone().into(),
            "email" => self.email.clone().into(),
            "loanDate" => self.loan_date.into(),
            "quantity" => self.quantity.into(),
            "bookId" => FieldValue::Reference(self.book_id),
            _ => return None,
        };
        Some(value)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), PatchError> {
        match name {
            "id" => self.id = value.into_long(name)?,
            "name" => self.name = value.into_text(name)?,
            "customerName" => self.customer_name = value.into_text(name)?,
            "email" => self.email = value.into_optional_text(name)?,
            "loanDate" => self.loan_date = value.into_date(name)?,
            "quantity" => self.quantity = value.into_integer(name)?,
            "bookId" => self.book_id = value.into_reference(name)?,
            _ => return Err(PatchError::mismatch(name)),
        }
        Ok(())
    }
}
