//! Business logic services

pub mod auth;
pub mod records;
pub mod users;

use std::sync::Arc;

use crate::{
    config::AuthConfig,
    models::{Author, Book, BookCategory, Loan, User},
    patch::RelationLookup,
    repository::{EntityStore, Repository, UserAccounts},
};

use records::RecordService;

/// Store handles the services are built on
pub struct Stores {
    pub books: Arc<dyn EntityStore<Book>>,
    pub authors: Arc<dyn EntityStore<Author>>,
    pub categories: Arc<dyn EntityStore<BookCategory>>,
    pub loans: Arc<dyn EntityStore<Loan>>,
    pub users: Arc<dyn EntityStore<User>>,
    pub accounts: Arc<dyn UserAccounts>,
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub books: RecordService<Book>,
    pub authors: RecordService<Author>,
    pub categories: RecordService<BookCategory>,
    pub loans: RecordService<Loan>,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services on top of the database repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        let stores = Stores {
            books: Arc::new(repository.books.clone()),
            authors: Arc::new(repository.authors.clone()),
            categories: Arc::new(repository.categories.clone()),
            loans: Arc::new(repository.loans.clone()),
            users: Arc::new(repository.users.clone()),
            accounts: Arc::new(repository.users.clone()),
        };
        Self::with_stores(stores, Arc::new(repository), auth_config)
    }

    pub fn with_stores(stores: Stores, relations: Arc<dyn RelationLookup>, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(stores.accounts.clone(), auth_config),
            books: RecordService::new(stores.books, relations.clone()),
            authors: RecordService::new(stores.authors, relations.clone()),
            categories: RecordService::new(stores.categories, relations.clone()),
            loans: RecordService::new(stores.loans, relations.clone()),
            users: users::UsersService::new(RecordService::new(stores.users, relations), stores.accounts),
        }
    }
}
