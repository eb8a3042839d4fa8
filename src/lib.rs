//! Gardablick: content and property listings backend for a real-estate
//! agency website.
//!
//! Serves editable page content, a filterable property catalog and a
//! contact inbox, all localized in Italian, English and German.

pub mod api;
pub mod config;
pub mod contacts;
pub mod db;
pub mod error;
pub mod i18n;
pub mod media;
pub mod pages;
pub mod properties;
pub mod security;
