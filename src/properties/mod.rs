//! Property catalog: listings, gallery images, catalog queries and
//! presentation formatting.

pub mod format;
pub mod models;
pub mod query;
pub mod repository;
pub mod seed;

pub use format::{format_detail, format_listing, PresentationDetail, PresentationListing};
pub use models::{NewProperty, NewPropertyImage, Property, PropertyImage, PropertyType};
pub use query::{PageLinks, PropertyQuery, SortOrder};
pub use repository::PropertyRepository;
