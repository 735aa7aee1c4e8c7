//! Static field registry shared by the PATCH and PUT paths

use chrono::NaiveDate;

use super::{PatchError, Patchable};
use crate::models::{Author, Book, BookCategory, Loan, User};

/// The five record kinds managed by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Book,
    Author,
    BookCategory,
    Loan,
    User,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Book => "Book",
            EntityKind::Author => "Author",
            EntityKind::BookCategory => "Book category",
            EntityKind::Loan => "Loan",
            EntityKind::User => "User",
        }
    }

    /// Every field declared by this kind, including identity and relations
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        match self {
            EntityKind::Book => Book::FIELDS,
            EntityKind::Author => Author::FIELDS,
            EntityKind::BookCategory => BookCategory::FIELDS,
            EntityKind::Loan => Loan::FIELDS,
            EntityKind::User => User::FIELDS,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Semantic type of a field, independent of its Rust representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    LongInteger,
    Real,
    Boolean,
    Date,
    /// Reference to another record kind
    Relation(EntityKind),
}

/// What a field is for, which decides how updates treat it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// Primary key, never writable
    Identity,
    /// Plain value owned by the client
    Attribute,
    /// Value owned by the server (creation dates, login names)
    System,
    /// Dedicated id key through which a relation is reassigned (`bookId`)
    RelationKey,
    /// The nested related object itself (`book`)
    RelationObject,
    /// Reverse one-to-many side of a relation (`loans`)
    ReverseCollection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Wire name, as it appears in request and response bodies
    pub name: &'static str,
    pub field_type: FieldType,
    pub role: FieldRole,
    pub mutable: bool,
    pub nullable: bool,
}

impl FieldDescriptor {
    const fn new(name: &'static str, field_type: FieldType, role: FieldRole, mutable: bool) -> Self {
        Self {
            name,
            field_type,
            role,
            mutable,
            nullable: false,
        }
    }

    pub const fn identity(name: &'static str) -> Self {
        Self::new(name, FieldType::LongInteger, FieldRole::Identity, false)
    }

    pub const fn attribute(name: &'static str, field_type: FieldType) -> Self {
        Self::new(name, field_type, FieldRole::Attribute, true)
    }

    pub const fn system(name: &'static str, field_type: FieldType) -> Self {
        Self::new(name, field_type, FieldRole::System, false)
    }

    pub const fn relation_key(name: &'static str, target: EntityKind) -> Self {
        Self::new(name, FieldType::Relation(target), FieldRole::RelationKey, true)
    }

    pub const fn relation_object(name: &'static str, target: EntityKind) -> Self {
        Self::new(name, FieldType::Relation(target), FieldRole::RelationObject, false)
    }

    pub const fn collection(name: &'static str, target: EntityKind) -> Self {
        Self::new(name, FieldType::Relation(target), FieldRole::ReverseCollection, false)
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn is_relation(&self) -> bool {
        matches!(self.field_type, FieldType::Relation(_))
    }
}

/// Look up a field of the given kind by its wire name
pub fn describe(kind: EntityKind, name: &str) -> Option<&'static FieldDescriptor> {
    kind.fields().iter().find(|field| field.name == name)
}

/// A coerced, strongly typed field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i32),
    LongInteger(i64),
    Real(f64),
    Boolean(bool),
    Date(NaiveDate),
    /// Id of a related record, already resolved
    Reference(i64),
}

impl FieldValue {
    pub fn reference(id: Option<i64>) -> Self {
        id.map(FieldValue::Reference).unwrap_or(FieldValue::Null)
    }

    pub fn into_text(self, field: &str) -> Result<String, PatchError> {
        match self {
            FieldValue::Text(value) => Ok(value),
            _ => Err(PatchError::mismatch(field)),
        }
    }

    pub fn into_optional_text(self, field: &str) -> Result<Option<String>, PatchError> {
        match self {
            FieldValue::Null => Ok(None),
            other => other.into_text(field).map(Some),
        }
    }

    pub fn into_integer(self, field: &str) -> Result<i32, PatchError> {
        match self {
            FieldValue::Integer(value) => Ok(value),
            _ => Err(PatchError::mismatch(field)),
        }
    }

    pub fn into_long(self, field: &str) -> Result<i64, PatchError> {
        match self {
            FieldValue::LongInteger(value) => Ok(value),
            _ => Err(PatchError::mismatch(field)),
        }
    }

    pub fn into_real(self, field: &str) -> Result<f64, PatchError> {
        match self {
            FieldValue::Real(value) => Ok(value),
            _ => Err(PatchError::mismatch(field)),
        }
    }

    pub fn into_boolean(self, field: &str) -> Result<bool, PatchError> {
        match self {
            FieldValue::Boolean(value) => Ok(value),
            _ => Err(PatchError::mismatch(field)),
        }
    }

    pub fn into_date(self, field: &str) -> Result<NaiveDate, PatchError> {
        match self {
            FieldValue::Date(value) => Ok(value),
            _ => Err(PatchError::mismatch(field)),
        }
    }

    pub fn into_optional_date(self, field: &str) -> Result<Option<NaiveDate>, PatchError> {
        match self {
            FieldValue::Null => Ok(None),
            other => other.into_date(field).map(Some),
        }
    }

    pub fn into_reference(self, field: &str) -> Result<i64, PatchError> {
        match self {
            FieldValue::Reference(id) => Ok(id),
            _ => Err(PatchError::mismatch(field)),
        }
    }

    pub fn into_optional_reference(self, field: &str) -> Result<Option<i64>, PatchError> {
        match self {
            FieldValue::Null => Ok(None),
            other => other.into_reference(field).map(Some),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::LongInteger(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Real(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}
