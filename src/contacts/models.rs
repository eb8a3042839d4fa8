use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Which public form a message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum MessageSource {
    /// Contact page
    #[default]
    Contact,
    /// Property detail page
    Property,
    /// Sell ("vendi") page
    Vendi,
}

/// A stored inquiry.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub privacy_accepted: bool,
    pub updates_accepted: bool,
    pub source: MessageSource,
    pub property_ref: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("This field is required.")));
    }
    Ok(())
}

fn must_accept_privacy(accepted: &bool) -> Result<(), ValidationError> {
    if !accepted {
        return Err(ValidationError::new("privacy")
            .with_message(Cow::Borrowed("The privacy policy must be accepted.")));
    }
    Ok(())
}

/// Body of a public contact form submission.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactSubmission {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    pub first_name: String,

    #[serde(default)]
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    pub last_name: String,

    #[serde(default)]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 30, message = "Ensure this field has no more than 30 characters."))]
    pub phone: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub message: String,

    #[serde(default)]
    #[validate(custom(function = "must_accept_privacy"))]
    pub privacy_accepted: bool,

    #[serde(default)]
    pub updates_accepted: bool,

    #[serde(default)]
    pub source: MessageSource,

    #[serde(default)]
    #[validate(length(max = 50, message = "Ensure this field has no more than 50 characters."))]
    pub property_ref: String,
}

/// Admin inbox filters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MessageListFilter {
    pub is_read: Option<bool>,
    pub source: Option<MessageSource>,
}
