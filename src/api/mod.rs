//! API handlers for the library REST endpoints

pub mod auth;
pub mod authors;
pub mod books;
pub mod categories;
pub mod health;
pub mod loans;
pub mod openapi;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::UserClaims, AppState};

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/health", get(health::health_check))
        .route("/auth/login", post(auth::login))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::replace_book)
                .patch(books::patch_book)
                .delete(books::delete_book),
        )
        // Authors
        .route("/authors", get(authors::list_authors).post(authors::create_author))
        .route(
            "/authors/:id",
            get(authors::get_author)
                .put(authors::replace_author)
                .patch(authors::patch_author)
                .delete(authors::delete_author),
        )
        // Categories
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/:id",
            get(categories::get_category)
                .put(categories::replace_category)
                .patch(categories::patch_category)
                .delete(categories::delete_category),
        )
        // Loans
        .route("/loans", get(loans::list_loans).post(loans::create_loan))
        .route(
            "/loans/:id",
            get(loans::get_loan)
                .put(loans::replace_loan)
                .patch(loans::patch_loan)
                .delete(loans::delete_loan),
        )
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::replace_user)
                .patch(users::patch_user)
                .delete(users::delete_user),
        )
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    };
    use chrono::{NaiveDate, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config::AppConfig,
        error::ErrorCode,
        models::{Book, Loan},
        repository::memory::{MemoryStore, MemoryStores},
        services::{Services, Stores},
    };

    struct TestApp {
        router: Router,
        stores: MemoryStores,
        token: String,
    }

    impl TestApp {
        fn new(stores: MemoryStores) -> Self {
            let config = AppConfig::default();
            let services = Services::with_stores(
                Stores {
                    books: stores.books.clone(),
                    authors: stores.authors.clone(),
                    categories: stores.categories.clone(),
                    loans: stores.loans.clone(),
                    users: stores.users.clone(),
                    accounts: stores.users.clone(),
                },
                Arc::new(stores.clone()),
                config.auth.clone(),
            );

            let now = Utc::now().timestamp();
            let token = UserClaims {
                sub: "librarian".to_string(),
                user_id: 1,
                exp: now + 3600,
                iat: now,
            }
            .create_token(&config.auth.jwt_secret)
            .unwrap();

            let state = AppState {
                config: Arc::new(config),
                services: Arc::new(services),
            };

            Self {
                router: create_router(state),
                stores,
                token,
            }
        }

        async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let token = self.token.clone();
            self.send_as(method, uri, body, Some(&token)).await
        }

        async fn send_as(
            &self,
            method: Method,
            uri: &str,
            body: Option<Value>,
            token: Option<&str>,
        ) -> (StatusCode, Value) {
            let mut request = Request::builder()
                .method(method)
                .uri(uri)
                .header(CONTENT_TYPE, "application/json");
            if let Some(token) = token {
                request = request.header(AUTHORIZATION, format!("Bearer {}", token));
            }
            let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);

            let response = self
                .router
                .clone()
                .oneshot(request.body(body).unwrap())
                .await
                .unwrap();

            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, json)
        }
    }

    fn dune() -> Book {
        Book {
            id: 1,
            title: "Dune".to_string(),
            genre: None,
            pages: 600,
            price: 29.9,
            available: true,
            category_id: None,
            author_id: None,
        }
    }

    fn loan() -> Loan {
        Loan {
            id: 1,
            name: "Prestamo X".to_string(),
            customer_name: "Alice".to_string(),
            email: None,
            loan_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            quantity: 2,
            book_id: 1,
        }
    }

    fn library() -> TestApp {
        TestApp::new(MemoryStores {
            books: Arc::new(MemoryStore::with_rows(vec![dune()])),
            loans: Arc::new(MemoryStore::with_rows(vec![loan()])),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = library();
        let (status, body) = app.send_as(Method::GET, "/api/v1/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_records_require_token() {
        let app = library();
        let (status, body) = app
            .send_as(Method::PATCH, "/api/v1/books/1", Some(json!({"price": 1})), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], ErrorCode::NotAuthorized as u32);

        let (status, _) = app
            .send_as(Method::GET, "/api/v1/books", None, Some("not-a-token"))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(app.stores.books.get(1), Some(dune()));
    }

    #[tokio::test]
    async fn test_patch_price_from_text() {
        let app = library();
        let (status, body) = app
            .send(Method::PATCH, "/api/v1/books/1", Some(json!({"price": "25.0"})))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["price"], 25.0);
        assert_eq!(body["title"], "Dune");
        assert_eq!(body["pages"], 600);
        assert_eq!(app.stores.books.get(1), Some(Book { price: 25.0, ..dune() }));
    }

    #[tokio::test]
    async fn test_patch_unknown_field_is_noop() {
        let app = library();
        let (status, body) = app
            .send(Method::PATCH, "/api/v1/books/1", Some(json!({"notAField": 123})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
        assert_eq!(app.stores.books.get(1), Some(dune()));
    }

    #[tokio::test]
    async fn test_patch_invalid_date() {
        let app = library();
        let (status, body) = app
            .send(Method::PATCH, "/api/v1/loans/1", Some(json!({"loanDate": "2024-13-40"})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], ErrorCode::BadValue as u32);
        assert_eq!(app.stores.loans.get(1), Some(loan()));
    }

    #[tokio::test]
    async fn test_patch_boolean_spellings() {
        let app = library();
        let (status, _) = app
            .send(Method::PATCH, "/api/v1/books/1", Some(json!({"available": "FALSE"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!app.stores.books.get(1).unwrap().available);

        for rejected in ["yes", "1"] {
            let (status, _) = app
                .send(Method::PATCH, "/api/v1/books/1", Some(json!({"available": rejected})))
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_patch_relation_errors() {
        let app = library();

        let (status, body) = app
            .send(Method::PATCH, "/api/v1/loans/1", Some(json!({"bookId": 42})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], ErrorCode::NoSuchRelatedEntity as u32);

        let (status, body) = app
            .send(Method::PATCH, "/api/v1/loans/1", Some(json!({"book": {"id": 1}})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], ErrorCode::UnsupportedRelation as u32);

        assert_eq!(app.stores.loans.get(1), Some(loan()));
    }

    #[tokio::test]
    async fn test_patch_missing_record() {
        let app = library();
        let (status, body) = app
            .send(Method::PATCH, "/api/v1/books/77", Some(json!({"title": "x"})))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Book not found with id: 77");
    }

    #[tokio::test]
    async fn test_put_keeps_identity() {
        let app = library();
        let replacement = json!({
            "id": 99,
            "name": "Nuevo",
            "customerName": "Bob",
            "email": "bob@example.com",
            "loanDate": "2025-02-02",
            "quantity": 4,
            "bookId": 1
        });
        let (status, body) = app.send(Method::PUT, "/api/v1/loans/1", Some(replacement)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 1);
        assert_eq!(body["customerName"], "Bob");
        assert!(app.stores.loans.get(99).is_none());
    }

    #[tokio::test]
    async fn test_create_validates_and_deletes() {
        let app = library();

        let (status, _) = app
            .send(
                Method::POST,
                "/api/v1/books",
                Some(json!({"title": "Empty", "pages": 0, "price": 10.0, "available": true})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/books",
                Some(json!({"title": "Foundation", "pages": 255, "price": 12.5, "available": true})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_i64().unwrap();

        let (status, _) = app.send(Method::DELETE, &format!("/api/v1/books/{}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = app.send(Method::DELETE, &format!("/api/v1/books/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let app = library();
        let (status, body) = app
            .send_as(
                Method::POST,
                "/api/v1/users",
                Some(json!({
                    "name": "Alice",
                    "username": "alice",
                    "email": "alice@example.com",
                    "password": "correct horse"
                })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.get("password").is_none());
        assert!(body["creationDate"].is_string());

        let (status, body) = app
            .send_as(
                Method::POST,
                "/api/v1/auth/login",
                Some(json!({"username": "alice", "password": "correct horse"})),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tokenType"], "Bearer");

        let token = body["token"].as_str().unwrap();
        let (status, body) = app
            .send_as(Method::GET, "/api/v1/users", None, Some(token))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }
}
