//! Singleton content records for the site's static pages.
//!
//! Every page kind has exactly one record. Its content is a fixed set of
//! named fields: localized texts, plus plain strings for image paths, names,
//! phone numbers and links.

use crate::i18n::{FieldValue, Language, LocalizedText, Resolved};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The page kinds that have a content record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    Home,
    Sell,
    Services,
    About,
    Contact,
    PrivacyPolicy,
}

impl PageKind {
    pub const ALL: [PageKind; 6] = [
        PageKind::Home,
        PageKind::Sell,
        PageKind::Services,
        PageKind::About,
        PageKind::Contact,
        PageKind::PrivacyPolicy,
    ];

    /// Stable identifier used as the record key and in URLs.
    pub fn slug(&self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::Sell => "sell",
            PageKind::Services => "services",
            PageKind::About => "about",
            PageKind::Contact => "contact",
            PageKind::PrivacyPolicy => "privacy-policy",
        }
    }

    pub fn from_slug(slug: &str) -> Option<PageKind> {
        PageKind::ALL.into_iter().find(|kind| kind.slug() == slug)
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Content of one page kind.
pub trait ContentPage:
    Serialize + DeserializeOwned + Default + Clone + Send + Sync + Unpin + 'static
{
    const KIND: PageKind;

    /// Look up a field by name.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// A stored singleton record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRecord<P> {
    pub kind: PageKind,
    pub content: P,
    pub updated_at: DateTime<Utc>,
}

impl<P: ContentPage> PageRecord<P> {
    /// Display value of a named field in `lang`, with Italian fallback.
    /// Unknown field names resolve to empty text.
    pub fn display(&self, field: &str, lang: Language) -> Resolved {
        self.content
            .field(field)
            .map(|value| value.resolve(lang))
            .unwrap_or_else(|| Resolved::Text(String::new()))
    }

    /// Shorthand for text fields.
    pub fn text(&self, field: &str, lang: Language) -> String {
        self.display(field, lang).into_text()
    }
}

macro_rules! content_page {
    (@default) => { String::new() };
    (@default $value:expr) => { String::from($value) };

    (
        $(#[$meta:meta])*
        pub struct $name:ident: $kind:path {
            text { $($text:ident),* $(,)? }
            plain { $($plain:ident $(= $default:expr)?),* $(,)? }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $name {
            $(pub $text: LocalizedText,)*
            $(pub $plain: String,)*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($text: LocalizedText::default(),)*
                    $($plain: content_page!(@default $($default)?),)*
                }
            }
        }

        impl ContentPage for $name {
            const KIND: PageKind = $kind;

            fn field(&self, name: &str) -> Option<FieldValue<'_>> {
                match name {
                    $(stringify!($text) => Some(FieldValue::Text(&self.$text)),)*
                    $(stringify!($plain) => Some(FieldValue::Plain(&self.$plain)),)*
                    _ => None,
                }
            }
        }
    };
}

content_page! {
    /// Home page: about and services teasers plus five service icons.
    pub struct HomePage: PageKind::Home {
        text {
            about_subtitle, about_heading, about_paragraph1, about_paragraph2,
            services_subtitle, services_heading, services_paragraph1, services_paragraph2,
            service_icon_1_title, service_icon_2_title, service_icon_3_title,
            service_icon_4_title, service_icon_5_title,
        }
        plain {
            about_image, services_image,
            service_icon_1_image, service_icon_2_image, service_icon_3_image,
            service_icon_4_image, service_icon_5_image,
        }
    }
}

content_page! {
    /// Sell ("Vendi") page: intro section and five services.
    pub struct SellPage: PageKind::Sell {
        text {
            intro_subtitle, intro_heading, intro_description,
            service_1_title, service_1_description,
            service_2_title, service_2_description,
            service_3_title, service_3_description,
            service_4_title, service_4_description,
            service_5_title, service_5_description,
        }
        plain {
            intro_image,
            service_1_icon, service_2_icon, service_3_icon, service_4_icon, service_5_icon,
        }
    }
}

content_page! {
    /// Services page: five services, each with an icon and an image.
    pub struct ServicePage: PageKind::Services {
        text {
            service_1_title, service_1_description,
            service_2_title, service_2_description,
            service_3_title, service_3_description,
            service_4_title, service_4_description,
            service_5_title, service_5_description,
        }
        plain {
            service_1_icon, service_1_image,
            service_2_icon, service_2_image,
            service_3_icon, service_3_image,
            service_4_icon, service_4_image,
            service_5_icon, service_5_image,
        }
    }
}

content_page! {
    /// About page: agency section and two team members.
    pub struct AboutPage: PageKind::About {
        text {
            agency_subtitle, agency_heading, agency_paragraph1, agency_paragraph2,
            team_member_1_title, team_member_2_title,
        }
        plain {
            agency_image,
            team_member_1_name, team_member_1_image,
            team_member_2_name, team_member_2_image,
        }
    }
}

content_page! {
    /// Contact page, also rendered in the site footer.
    pub struct ContactPage: PageKind::Contact {
        text { description }
        plain {
            company_name = "GARDABLICK",
            address_building, address_street, address_city,
            phone_1, phone_2, email, whatsapp_number,
            map_embed_url,
            social_whatsapp, social_instagram, social_facebook, social_linkedin,
        }
    }
}

content_page! {
    /// Privacy and cookie policy.
    pub struct PrivacyPolicy: PageKind::PrivacyPolicy {
        text {
            privacy_title, data_controller, legal_basis, data_purposes,
            data_sharing, data_storage, retention_period, user_rights,
            cookie_title, cookie_types, consent_requirements, cookies_listed,
        }
        plain {}
    }
}
