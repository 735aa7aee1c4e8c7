//! Data models for the library records

pub mod author;
pub mod book;
pub mod category;
pub mod loan;
pub mod user;

// Re-export commonly used types
pub use author::Author;
pub use book::Book;
pub use category::BookCategory;
pub use loan::Loan;
pub use user::{User, UserClaims};

fn default_active() -> bool {
    true
}
