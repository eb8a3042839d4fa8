use crate::error::AppError;
use crate::i18n::{LocalizedList, LocalizedText};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use std::borrow::Cow;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Kinds of property the agency lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Appartamento,
    Attico,
    Garage,
    CasaSingola,
    Rustico,
    Terreno,
    Villa,
    VillaBifamiliare,
    VillaSchiera,
}

impl PropertyType {
    pub const ALL: [PropertyType; 9] = [
        PropertyType::Appartamento,
        PropertyType::Attico,
        PropertyType::Garage,
        PropertyType::CasaSingola,
        PropertyType::Rustico,
        PropertyType::Terreno,
        PropertyType::Villa,
        PropertyType::VillaBifamiliare,
        PropertyType::VillaSchiera,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            PropertyType::Appartamento => "appartamento",
            PropertyType::Attico => "attico",
            PropertyType::Garage => "garage",
            PropertyType::CasaSingola => "casa-singola",
            PropertyType::Rustico => "rustico",
            PropertyType::Terreno => "terreno",
            PropertyType::Villa => "villa",
            PropertyType::VillaBifamiliare => "villa-bifamiliare",
            PropertyType::VillaSchiera => "villa-schiera",
        }
    }

    pub fn from_code(code: &str) -> Option<PropertyType> {
        PropertyType::ALL.into_iter().find(|t| t.code() == code)
    }

    /// English label.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Appartamento => "Apartment",
            PropertyType::Attico => "Penthouse",
            PropertyType::Garage => "Garage",
            PropertyType::CasaSingola => "Detached house",
            PropertyType::Rustico => "Farmhouse",
            PropertyType::Terreno => "Building land",
            PropertyType::Villa => "Villa",
            PropertyType::VillaBifamiliare => "Semi-detached villa",
            PropertyType::VillaSchiera => "Terraced villa",
        }
    }
}

/// A listing as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub id: i64,
    #[serde(rename = "ref")]
    pub reference: String,
    pub location: String,
    pub price: Decimal,
    pub area: Decimal,
    pub commercial_area: Option<Decimal>,
    pub net_area: Option<Decimal>,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub total_rooms: Option<i64>,
    pub property_type: Option<PropertyType>,
    pub energy_class: String,
    pub condominium_fees: Option<Decimal>,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub composition: LocalizedList,
    pub composition_note: LocalizedText,
    pub location_note: LocalizedText,
    /// Path relative to the media root
    pub main_image: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Gallery image. Displayed by ascending `order`, ties by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PropertyImage {
    pub id: i64,
    pub property_id: i64,
    pub image: String,
    pub order: i64,
}

/// Raw `properties` row. Decimals are stored as canonical decimal text.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct PropertyRow {
    pub id: i64,
    #[sqlx(rename = "ref")]
    pub reference: String,
    pub location: String,
    pub price: String,
    pub area: String,
    pub commercial_area: Option<String>,
    pub net_area: Option<String>,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub total_rooms: Option<i64>,
    pub property_type: Option<String>,
    pub energy_class: String,
    pub condominium_fees: Option<String>,
    pub title: Json<LocalizedText>,
    pub description: Json<LocalizedText>,
    pub composition: Json<LocalizedList>,
    pub composition_note: Json<LocalizedText>,
    pub location_note: Json<LocalizedText>,
    pub main_image: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn parse_decimal(column: &str, raw: &str) -> Result<Decimal, AppError> {
    Decimal::from_str(raw)
        .map_err(|e| AppError::Corrupt(format!("properties.{} = '{}': {}", column, raw, e)))
}

fn parse_optional(column: &str, raw: Option<&str>) -> Result<Option<Decimal>, AppError> {
    raw.map(|raw| parse_decimal(column, raw)).transpose()
}

impl TryFrom<PropertyRow> for Property {
    type Error = AppError;

    fn try_from(row: PropertyRow) -> Result<Self, Self::Error> {
        let property_type = match row.property_type.as_deref() {
            None | Some("") => None,
            Some(code) => Some(PropertyType::from_code(code).ok_or_else(|| {
                AppError::Corrupt(format!("properties.property_type = '{}'", code))
            })?),
        };

        Ok(Property {
            id: row.id,
            reference: row.reference,
            location: row.location,
            price: parse_decimal("price", &row.price)?,
            area: parse_decimal("area", &row.area)?,
            commercial_area: parse_optional("commercial_area", row.commercial_area.as_deref())?,
            net_area: parse_optional("net_area", row.net_area.as_deref())?,
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            total_rooms: row.total_rooms,
            property_type,
            energy_class: row.energy_class,
            condominium_fees: parse_optional("condominium_fees", row.condominium_fees.as_deref())?,
            title: row.title.0,
            description: row.description.0,
            composition: row.composition.0,
            composition_note: row.composition_note.0,
            location_note: row.location_note.0,
            main_image: row.main_image,
            latitude: parse_optional("latitude", row.latitude.as_deref())?,
            longitude: parse_optional("longitude", row.longitude.as_deref())?,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn default_true() -> bool {
    true
}

fn message(code: &'static str, text: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(text))
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(message("non_negative", "Must not be negative."));
    }
    Ok(())
}

fn has_italian_title(title: &LocalizedText) -> Result<(), ValidationError> {
    if title.it.trim().is_empty() {
        return Err(message("required", "An Italian title is required."));
    }
    Ok(())
}

fn coordinates_in_range(input: &NewProperty) -> Result<(), ValidationError> {
    let in_range = |value: Option<Decimal>, limit: i64| {
        value.map_or(true, |v| v.abs() <= Decimal::from(limit))
    };

    if !in_range(input.latitude, 90) || !in_range(input.longitude, 180) {
        return Err(message("coordinates", "Coordinates are out of range."));
    }
    Ok(())
}

/// Input for creating or replacing a listing.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "coordinates_in_range"))]
pub struct NewProperty {
    #[serde(rename = "ref")]
    #[validate(length(min = 1, max = 50, message = "Reference must be 1 to 50 characters."))]
    pub reference: String,

    #[validate(length(min = 1, max = 200, message = "Location must be 1 to 200 characters."))]
    pub location: String,

    #[validate(custom(function = "non_negative"))]
    pub price: Decimal,

    #[validate(custom(function = "non_negative"))]
    pub area: Decimal,

    #[serde(default)]
    pub commercial_area: Option<Decimal>,

    #[serde(default)]
    pub net_area: Option<Decimal>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Must not be negative."))]
    pub bedrooms: i64,

    #[serde(default)]
    #[validate(range(min = 0, message = "Must not be negative."))]
    pub bathrooms: i64,

    #[serde(default)]
    pub total_rooms: Option<i64>,

    #[serde(default)]
    pub property_type: Option<PropertyType>,

    #[serde(default)]
    #[validate(length(max = 10, message = "Energy class must be at most 10 characters."))]
    pub energy_class: String,

    #[serde(default)]
    pub condominium_fees: Option<Decimal>,

    #[validate(custom(function = "has_italian_title"))]
    pub title: LocalizedText,

    #[serde(default)]
    pub description: LocalizedText,

    #[serde(default)]
    pub composition: LocalizedList,

    #[serde(default)]
    pub composition_note: LocalizedText,

    #[serde(default)]
    pub location_note: LocalizedText,

    #[validate(length(min = 1, message = "A main image is required."))]
    pub main_image: String,

    #[serde(default)]
    pub latitude: Option<Decimal>,

    #[serde(default)]
    pub longitude: Option<Decimal>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Input for adding a gallery image.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPropertyImage {
    #[validate(length(min = 1, message = "An image path is required."))]
    pub image: String,

    #[serde(default)]
    pub order: i64,
}
