//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, books, categories, health, loans, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library API",
        version = "0.3.0",
        description = "Library records REST API with typed partial updates",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        health::health_check,
        auth::login,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::replace_book,
        books::patch_book,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::replace_author,
        authors::patch_author,
        authors::delete_author,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::replace_category,
        categories::patch_category,
        categories::delete_category,
        // Loans
        loans::list_loans,
        loans::get_loan,
        loans::create_loan,
        loans::replace_loan,
        loans::patch_loan,
        loans::delete_loan,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::replace_user,
        users::patch_user,
        users::delete_user,
    ),
    components(
        schemas(
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::Book,
            crate::models::Author,
            crate::models::BookCategory,
            crate::models::Loan,
            crate::models::User,
            crate::patch::UpdateRequest,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "books", description = "Book records"),
        (name = "authors", description = "Author records"),
        (name = "categories", description = "Book categories"),
        (name = "loans", description = "Loan records"),
        (name = "users", description = "User management")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_patch_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/books/{id}", "/authors/{id}", "/categories/{id}", "/loans/{id}", "/users/{id}"] {
            let item = doc.paths.paths.get(path).unwrap_or_else(|| panic!("{} missing", path));
            assert!(item.operations.contains_key(&utoipa::openapi::PathItemType::Patch));
        }
        assert!(doc
            .components
            .unwrap()
            .security_schemes
            .contains_key("bearer_auth"));
    }
}
