//! User management service

use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;

use super::{auth::hash_password, records::RecordService};
use crate::{
    error::{AppError, AppResult},
    models::{
        user::{PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH},
        User,
    },
    patch::{PatchError, UpdateRequest},
    repository::UserAccounts,
};

/// User records with password hashing applied on every write
#[derive(Clone)]
pub struct UsersService {
    records: RecordService<User>,
    accounts: Arc<dyn UserAccounts>,
}

impl UsersService {
    pub fn new(records: RecordService<User>, accounts: Arc<dyn UserAccounts>) -> Self {
        Self { records, accounts }
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.records.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<User> {
        self.records.get_by_id(id).await
    }

    /// Register a new account
    pub async fn create(&self, mut user: User) -> AppResult<User> {
        if self.accounts.find_by_username(&user.username).await?.is_some() {
            return Err(AppError::BadRequest("Username already exists".to_string()));
        }

        user.password = hash_password(&user.password)?;
        user.creation_date = Some(Utc::now().date_naive());
        self.records.create(user).await
    }

    pub async fn replace(&self, id: i64, mut replacement: User) -> AppResult<User> {
        replacement.password = hash_password(&replacement.password)?;
        self.records.replace(id, &replacement).await
    }

    /// Partial update of an existing user; a `password` must be text of
    /// allowed length and is hashed before the update is resolved
    pub async fn patch(&self, id: i64, mut request: UpdateRequest) -> AppResult<User> {
        self.records.ensure_exists(id).await?;

        match request.get_mut("password") {
            Some(Value::String(plain))
                if (PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&plain.chars().count()) =>
            {
                *plain = hash_password(plain)?;
            }
            // never echo the submitted password
            Some(_) => return Err(PatchError::invalid("password", &Value::String("********".into())).into()),
            None => {}
        }
        self.records.patch(id, &request).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.records.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{repository::memory::MemoryStores, services::auth::verify_password};
    use serde_json::json;

    fn new_user() -> User {
        User {
            id: 0,
            name: "Alice".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "plain-password".to_string(),
            creation_date: None,
            active: true,
        }
    }

    fn service(stores: &MemoryStores) -> UsersService {
        UsersService::new(
            RecordService::new(stores.users.clone(), Arc::new(stores.clone())),
            stores.users.clone(),
        )
    }

    #[tokio::test]
    async fn test_create_hashes_and_stamps() {
        let stores = MemoryStores::default();
        let users = service(&stores);

        let created = users.create(new_user()).await.unwrap();
        assert_eq!(created.creation_date, Some(Utc::now().date_naive()));
        assert!(verify_password(&created.password, "plain-password").unwrap());

        let err = users.create(new_user()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_patch_password() {
        let stores = MemoryStores::default();
        let users = service(&stores);
        let created = users.create(new_user()).await.unwrap();

        let request: UpdateRequest = serde_json::from_value(json!({"password": "another-one"})).unwrap();
        let patched = users.patch(created.id, request).await.unwrap();
        assert!(verify_password(&patched.password, "another-one").unwrap());

        let request: UpdateRequest = serde_json::from_value(json!({"password": "short"})).unwrap();
        let err = users.patch(created.id, request).await.unwrap_err();
        assert!(matches!(err, AppError::Patch(PatchError::InvalidFieldValue { .. })));

        for masked in [json!(1234567890), json!(null), json!(["a-long-password"])] {
            let request: UpdateRequest = serde_json::from_value(json!({"password": masked})).unwrap();
            let err = users.patch(created.id, request).await.unwrap_err();
            match err {
                AppError::Patch(PatchError::InvalidFieldValue { field, value }) => {
                    assert_eq!(field, "password");
                    assert_eq!(value, json!("********"));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(stores.users.get(created.id).unwrap().password, patched.password);
    }

    #[tokio::test]
    async fn test_patch_missing_user_is_not_found() {
        let stores = MemoryStores::default();
        let users = service(&stores);

        for body in [json!({"password": "short"}), json!({"password": "long-enough-pass"}), json!({"password": 1})] {
            let request: UpdateRequest = serde_json::from_value(body).unwrap();
            let err = users.patch(999, request).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)), "{err:?}");
        }
    }
}
