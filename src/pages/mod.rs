//! Static page content: singleton records and their public views.

pub mod models;
pub mod repository;
pub mod views;

pub use models::{
    AboutPage, ContactPage, ContentPage, HomePage, PageKind, PageRecord, PrivacyPolicy,
    SellPage, ServicePage,
};
pub use repository::PageRepository;
