//! Contact inbox: public form submissions and their read state.

pub mod models;
pub mod repository;

pub use models::{ContactMessage, ContactSubmission, MessageListFilter, MessageSource};
pub use repository::ContactRepository;
