//! Presentation formatting for the public catalog.
//!
//! Numbers leave the API as display strings: prices with `.` thousands
//! separators and a trailing `€`, areas with a trailing `m²`. Whole values
//! print without decimals.

use crate::i18n::Language;
use crate::media::MediaUrls;
use crate::properties::models::{Property, PropertyImage};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// Integer part of `price` with `.` thousands separators, e.g. `3.150.000€`.
pub fn format_price(price: &Decimal) -> String {
    let whole = price.trunc();
    let digits = whole.abs().normalize().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if whole.is_sign_negative() && !whole.is_zero() { "-" } else { "" };
    format!("{}{}€", sign, grouped)
}

/// Whole numbers without decimals, anything else as its shortest decimal form.
fn plain_number(value: &Decimal) -> String {
    if value.fract().is_zero() {
        value.trunc().normalize().to_string()
    } else {
        value.normalize().to_string()
    }
}

/// `55` -> `55m²`, `55.5` -> `55.5m²`.
pub fn format_area(area: &Decimal) -> String {
    format!("{}m²", plain_number(area))
}

/// Monthly condominium fees, e.g. `80€`. No thousands grouping.
pub fn format_fees(fees: &Decimal) -> String {
    format!("{}€", plain_number(fees))
}

/// Card shown in the catalog grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationListing {
    pub id: i64,
    pub image: Option<String>,
    pub title: String,
    pub price: String,
    pub location: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub area: String,
    pub bedrooms: i64,
    pub bathrooms: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Full detail page payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationDetail {
    pub id: i64,
    pub title: String,
    pub location: String,
    pub price: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub area: String,
    pub commercial_area: Option<String>,
    pub net_area: Option<String>,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub total_rooms: Option<i64>,
    pub energy_class: String,
    pub condominium_fees: Option<String>,
    pub description: String,
    pub composition: Vec<String>,
    pub composition_note: String,
    pub location_note: String,
    pub main_image: Option<String>,
    pub gallery_images: Vec<String>,
    pub map_location: Option<MapLocation>,
}

pub fn format_listing(property: &Property, lang: Language, media: &MediaUrls) -> PresentationListing {
    PresentationListing {
        id: property.id,
        image: media.path(&property.main_image),
        title: property.title.resolve(lang),
        price: format_price(&property.price),
        location: property.location.clone(),
        reference: property.reference.clone(),
        area: format_area(&property.area),
        bedrooms: property.bedrooms,
        bathrooms: property.bathrooms,
    }
}

/// `gallery` must already be in display order.
pub fn format_detail(
    property: &Property,
    gallery: &[PropertyImage],
    lang: Language,
    media: &MediaUrls,
) -> PresentationDetail {
    let map_location = match (property.latitude, property.longitude) {
        (Some(lat), Some(lng)) => lat
            .to_f64()
            .zip(lng.to_f64())
            .map(|(lat, lng)| MapLocation { lat, lng }),
        _ => None,
    };

    PresentationDetail {
        id: property.id,
        title: property.title.resolve(lang),
        location: property.location.clone(),
        price: format_price(&property.price),
        reference: property.reference.clone(),
        area: format_area(&property.area),
        commercial_area: property.commercial_area.as_ref().map(format_area),
        net_area: property.net_area.as_ref().map(format_area),
        bedrooms: property.bedrooms,
        bathrooms: property.bathrooms,
        total_rooms: property.total_rooms,
        energy_class: property.energy_class.clone(),
        condominium_fees: property.condominium_fees.as_ref().map(format_fees),
        description: property.description.resolve(lang),
        composition: property.composition.resolve(lang),
        composition_note: property.composition_note.resolve(lang),
        location_note: property.location_note.resolve(lang),
        main_image: media.path(&property.main_image),
        gallery_images: gallery
            .iter()
            .filter_map(|image| media.path(&image.image))
            .collect(),
        map_location,
    }
}
