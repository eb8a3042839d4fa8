//! Locale-resolved page payloads for the public API.
//!
//! Each view nests the flat record fields into the sections the frontend
//! renders. Text fields are resolved with Italian fallback; image fields
//! become URLs, or `""` when no image is set.

use crate::i18n::{split_lines, Language};
use crate::media::MediaUrls;
use crate::pages::models::{
    AboutPage, ContactPage, ContentPage, HomePage, PageRecord, PrivacyPolicy, SellPage,
    ServicePage,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Resolves fields of one record for one request.
struct Resolver<'a, P> {
    record: &'a PageRecord<P>,
    lang: Language,
    media: &'a MediaUrls,
}

impl<'a, P: ContentPage> Resolver<'a, P> {
    fn text(&self, field: &str) -> String {
        self.record.text(field, self.lang)
    }

    fn image(&self, field: &str) -> String {
        self.media.page_image(&self.record.text(field, self.lang))
    }
}

#[derive(Debug, Serialize)]
pub struct TextSection {
    pub subtitle: String,
    pub heading: String,
    pub paragraph1: String,
    pub paragraph2: String,
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct ServiceIcon {
    pub title: String,
    pub icon: String,
}

#[derive(Debug, Serialize)]
pub struct HomePageView {
    pub about_section: TextSection,
    pub services_section: TextSection,
    pub service_icons: Vec<ServiceIcon>,
    pub updated_at: DateTime<Utc>,
}

impl HomePageView {
    pub fn build(record: &PageRecord<HomePage>, lang: Language, media: &MediaUrls) -> Self {
        let r = Resolver { record, lang, media };

        let section = |prefix: &str| TextSection {
            subtitle: r.text(&format!("{prefix}_subtitle")),
            heading: r.text(&format!("{prefix}_heading")),
            paragraph1: r.text(&format!("{prefix}_paragraph1")),
            paragraph2: r.text(&format!("{prefix}_paragraph2")),
            image: r.image(&format!("{prefix}_image")),
        };

        Self {
            about_section: section("about"),
            services_section: section("services"),
            service_icons: (1..=5)
                .map(|n| ServiceIcon {
                    title: r.text(&format!("service_icon_{n}_title")),
                    icon: r.image(&format!("service_icon_{n}_image")),
                })
                .collect(),
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IntroSection {
    pub subtitle: String,
    pub heading: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct SellService {
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Serialize)]
pub struct SellPageView {
    pub intro_section: IntroSection,
    pub services: Vec<SellService>,
    pub updated_at: DateTime<Utc>,
}

impl SellPageView {
    pub fn build(record: &PageRecord<SellPage>, lang: Language, media: &MediaUrls) -> Self {
        let r = Resolver { record, lang, media };

        Self {
            intro_section: IntroSection {
                subtitle: r.text("intro_subtitle"),
                heading: r.text("intro_heading"),
                description: r.text("intro_description"),
                image: r.image("intro_image"),
            },
            services: (1..=5)
                .map(|n| SellService {
                    title: r.text(&format!("service_{n}_title")),
                    description: r.text(&format!("service_{n}_description")),
                    icon: r.image(&format!("service_{n}_icon")),
                })
                .collect(),
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceEntry {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct ServicePageView {
    pub services: Vec<ServiceEntry>,
    pub updated_at: DateTime<Utc>,
}

impl ServicePageView {
    pub fn build(record: &PageRecord<ServicePage>, lang: Language, media: &MediaUrls) -> Self {
        let r = Resolver { record, lang, media };

        Self {
            services: (1..=5)
                .map(|n| ServiceEntry {
                    title: r.text(&format!("service_{n}_title")),
                    description: r.text(&format!("service_{n}_description")),
                    icon: r.image(&format!("service_{n}_icon")),
                    image: r.image(&format!("service_{n}_image")),
                })
                .collect(),
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TeamMember {
    pub name: String,
    pub title: String,
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct AboutPageView {
    pub agency_section: TextSection,
    pub team_members: Vec<TeamMember>,
    pub updated_at: DateTime<Utc>,
}

impl AboutPageView {
    pub fn build(record: &PageRecord<AboutPage>, lang: Language, media: &MediaUrls) -> Self {
        let r = Resolver { record, lang, media };

        Self {
            agency_section: TextSection {
                subtitle: r.text("agency_subtitle"),
                heading: r.text("agency_heading"),
                paragraph1: r.text("agency_paragraph1"),
                paragraph2: r.text("agency_paragraph2"),
                image: r.image("agency_image"),
            },
            team_members: (1..=2)
                .map(|n| TeamMember {
                    name: r.text(&format!("team_member_{n}_name")),
                    title: r.text(&format!("team_member_{n}_title")),
                    image: r.image(&format!("team_member_{n}_image")),
                })
                .collect(),
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Address {
    pub building: String,
    pub street: String,
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct ContactDetails {
    pub phone_1: String,
    pub phone_2: String,
    pub email: String,
    pub whatsapp_number: String,
}

#[derive(Debug, Serialize)]
pub struct SocialLinks {
    pub whatsapp: String,
    pub instagram: String,
    pub facebook: String,
    pub linkedin: String,
}

#[derive(Debug, Serialize)]
pub struct ContactPageView {
    pub company_name: String,
    pub description: String,
    pub address: Address,
    pub contact: ContactDetails,
    pub map_embed_url: String,
    pub social_links: SocialLinks,
    pub updated_at: DateTime<Utc>,
}

impl ContactPageView {
    pub fn build(record: &PageRecord<ContactPage>, lang: Language) -> Self {
        let page = &record.content;

        Self {
            company_name: page.company_name.clone(),
            description: page.description.resolve(lang),
            address: Address {
                building: page.address_building.clone(),
                street: page.address_street.clone(),
                city: page.address_city.clone(),
            },
            contact: ContactDetails {
                phone_1: page.phone_1.clone(),
                phone_2: page.phone_2.clone(),
                email: page.email.clone(),
                whatsapp_number: page.whatsapp_number.clone(),
            },
            map_embed_url: page.map_embed_url.clone(),
            social_links: SocialLinks {
                whatsapp: page.social_whatsapp.clone(),
                instagram: page.social_instagram.clone(),
                facebook: page.social_facebook.clone(),
                linkedin: page.social_linkedin.clone(),
            },
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PrivacyPolicyView {
    pub privacy_title: String,
    pub data_controller: String,
    pub legal_basis: String,
    pub data_purposes: String,
    pub data_sharing: String,
    pub data_storage: String,
    pub retention_period: String,
    pub user_rights: String,
    pub cookie_title: String,
    pub cookie_types: String,
    pub consent_requirements: String,
    pub cookies_listed: String,
    /// `data_purposes` one entry per line
    pub data_purposes_list: Vec<String>,
    /// `cookie_types` one entry per line
    pub cookie_types_list: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl PrivacyPolicyView {
    pub fn build(record: &PageRecord<PrivacyPolicy>, lang: Language) -> Self {
        let page = &record.content;
        let data_purposes = page.data_purposes.resolve(lang);
        let cookie_types = page.cookie_types.resolve(lang);

        Self {
            privacy_title: page.privacy_title.resolve(lang),
            data_controller: page.data_controller.resolve(lang),
            legal_basis: page.legal_basis.resolve(lang),
            data_purposes_list: split_lines(&data_purposes),
            data_purposes,
            data_sharing: page.data_sharing.resolve(lang),
            data_storage: page.data_storage.resolve(lang),
            retention_period: page.retention_period.resolve(lang),
            user_rights: page.user_rights.resolve(lang),
            cookie_title: page.cookie_title.resolve(lang),
            cookie_types_list: split_lines(&cookie_types),
            cookie_types,
            consent_requirements: page.consent_requirements.resolve(lang),
            cookies_listed: page.cookies_listed.resolve(lang),
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LocalizedText;
    use crate::pages::models::PageKind;

    fn record<P: ContentPage>(content: P) -> PageRecord<P> {
        PageRecord {
            kind: P::KIND,
            content,
            updated_at: Utc::now(),
        }
    }

    fn text(it: &str, en: &str, de: &str) -> LocalizedText {
        LocalizedText::new(it.to_string(), en.to_string(), de.to_string())
    }

    // ==================== Home Tests ====================

    #[test]
    fn test_home_view_nests_sections() {
        let mut page = HomePage::default();
        page.about_heading = text("Chi siamo", "About us", "");
        page.about_image = "pages/home/about.jpg".to_string();
        page.service_icon_3_title = text("Valutazioni", "Valuations", "Bewertungen");

        let view = HomePageView::build(&record(page), Language::ENGLISH, &MediaUrls::default());

        assert_eq!(view.about_section.heading, "About us");
        assert_eq!(view.about_section.image, "/media/pages/home/about.jpg");
        assert_eq!(view.services_section.image, "");
        assert_eq!(view.service_icons.len(), 5);
        assert_eq!(view.service_icons[2].title, "Valuations");
        assert_eq!(view.service_icons[0].icon, "");
    }

    #[test]
    fn test_home_view_json_shape() {
        let view = HomePageView::build(
            &record(HomePage::default()),
            Language::ITALIAN,
            &MediaUrls::default(),
        );
        let json = serde_json::to_value(&view).unwrap();

        for key in ["about_section", "services_section", "service_icons", "updated_at"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["about_section"]["paragraph2"], "");
    }

    // ==================== Sell / Services Tests ====================

    #[test]
    fn test_sell_view_services_in_order() {
        let mut page = SellPage::default();
        page.intro_heading = text("Vendi casa", "", "");
        page.service_1_title = text("Stima", "Appraisal", "");
        page.service_5_icon = "pages/sell/icons/five.svg".to_string();

        let view = SellPageView::build(&record(page), Language::GERMAN, &MediaUrls::default());

        assert_eq!(view.intro_section.heading, "Vendi casa");
        assert_eq!(view.services[0].title, "Stima");
        assert_eq!(view.services[4].icon, "/media/pages/sell/icons/five.svg");
    }

    #[test]
    fn test_services_view_has_icon_and_image() {
        let mut page = ServicePage::default();
        page.service_2_image = "pages/services/two.jpg".to_string();

        let media = MediaUrls::new("/media/", Some("https://gardablick.example"));
        let view = ServicePageView::build(&record(page), Language::ITALIAN, &media);

        assert_eq!(view.services.len(), 5);
        assert_eq!(
            view.services[1].image,
            "https://gardablick.example/media/pages/services/two.jpg"
        );
        assert_eq!(view.services[1].icon, "");
    }

    // ==================== About Tests ====================

    #[test]
    fn test_about_view_team_members() {
        let mut page = AboutPage::default();
        page.team_member_2_name = "Laura Verdi".to_string();
        page.team_member_2_title = text("Consulente", "Consultant", "Beraterin");

        let view = AboutPageView::build(&record(page), Language::GERMAN, &MediaUrls::default());

        assert_eq!(view.team_members.len(), 2);
        assert_eq!(view.team_members[1].name, "Laura Verdi");
        assert_eq!(view.team_members[1].title, "Beraterin");
    }

    // ==================== Contact Tests ====================

    #[test]
    fn test_contact_view_groups_plain_fields() {
        let mut page = ContactPage::default();
        page.description = text("Agenzia sul Garda", "Agency on Lake Garda", "");
        page.address_city = "25087 - Salò (BS)".to_string();
        page.social_instagram = "https://instagram.com/gardablick".to_string();

        let view = ContactPageView::build(&record(page), Language::ENGLISH);

        assert_eq!(view.company_name, "GARDABLICK");
        assert_eq!(view.description, "Agency on Lake Garda");
        assert_eq!(view.address.city, "25087 - Salò (BS)");
        assert_eq!(view.social_links.instagram, "https://instagram.com/gardablick");
    }

    // ==================== Privacy Tests ====================

    #[test]
    fn test_privacy_view_splits_lists() {
        let mut page = PrivacyPolicy::default();
        page.data_purposes = text("Contatto\n\n  Newsletter  \n", "", "");
        page.cookie_types = text("", "Technical\nAnalytics", "");

        let view = PrivacyPolicyView::build(&record(page), Language::ENGLISH);

        assert_eq!(view.data_purposes, "Contatto\n\n  Newsletter  \n");
        assert_eq!(view.data_purposes_list, vec!["Contatto", "Newsletter"]);
        assert_eq!(view.cookie_types_list, vec!["Technical", "Analytics"]);
    }

    #[test]
    fn test_privacy_view_empty_record() {
        let view = PrivacyPolicyView::build(&record(PrivacyPolicy::default()), Language::GERMAN);
        assert_eq!(view.privacy_title, "");
        assert!(view.cookie_types_list.is_empty());
        assert_eq!(PrivacyPolicy::KIND, PageKind::PrivacyPolicy);
    }
}
