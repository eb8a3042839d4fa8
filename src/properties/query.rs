//! Catalog query parameters: filters, sort order and pagination.
//!
//! Parsing is lenient. Blank or malformed values are dropped and an
//! unrecognized sort falls back to newest first, so a hand-edited URL never
//! turns into an error page.

use crate::properties::models::PropertyType;
use rust_decimal::Decimal;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: u32 = 9;
pub const MAX_PAGE_SIZE: u32 = 50;

/// Constraint on `property_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    Any,
    Is(PropertyType),
    /// A value outside the known set: matches nothing
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    /// Case-insensitive substring of `location`
    pub location: Option<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub property_type: TypeFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    MostRecent,
    PriceAsc,
    PriceDesc,
    AreaAsc,
    AreaDesc,
}

impl SortOrder {
    pub fn from_param(value: &str) -> SortOrder {
        match value {
            "price_asc" => SortOrder::PriceAsc,
            "price_desc" => SortOrder::PriceDesc,
            "area_asc" => SortOrder::AreaAsc,
            "area_desc" => SortOrder::AreaDesc,
            _ => SortOrder::MostRecent,
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::MostRecent => "most_recent",
            SortOrder::PriceAsc => "price_asc",
            SortOrder::PriceDesc => "price_desc",
            SortOrder::AreaAsc => "area_asc",
            SortOrder::AreaDesc => "area_desc",
        }
    }

    /// SQL `ORDER BY` body. Equal keys fall back to newest first, then id.
    pub fn order_by(&self) -> &'static str {
        match self {
            SortOrder::MostRecent => "created_at DESC, id DESC",
            SortOrder::PriceAsc => "CAST(price AS REAL) ASC, created_at DESC, id DESC",
            SortOrder::PriceDesc => "CAST(price AS REAL) DESC, created_at DESC, id DESC",
            SortOrder::AreaAsc => "CAST(area AS REAL) ASC, created_at DESC, id DESC",
            SortOrder::AreaDesc => "CAST(area AS REAL) DESC, created_at DESC, id DESC",
        }
    }
}

/// 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Page numbers below 1 become 1; sizes are capped at [`MAX_PAGE_SIZE`].
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size.min(MAX_PAGE_SIZE)
            },
        }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }

    /// Number of pages for `total` rows; an empty result still has one page.
    pub fn page_count(&self, total: i64) -> u32 {
        let size = i64::from(self.page_size);
        let pages = (total.max(0) + size - 1) / size;
        u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
    }
}

/// A parsed catalog request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyQuery {
    pub filter: PropertyFilter,
    pub sort: SortOrder,
    pub page: PageRequest,
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

impl PropertyQuery {
    /// Parse decoded query-string pairs. Later duplicates win.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut query = PropertyQuery::default();
        let mut page = 1;
        let mut page_size = DEFAULT_PAGE_SIZE;

        for (key, value) in pairs {
            match key.as_str() {
                "location" => query.filter.location = non_blank(value).map(str::to_string),
                "price_min" => {
                    query.filter.price_min = non_blank(value).and_then(|v| Decimal::from_str(v).ok())
                }
                "price_max" => {
                    query.filter.price_max = non_blank(value).and_then(|v| Decimal::from_str(v).ok())
                }
                "property_type" => {
                    query.filter.property_type = match non_blank(value) {
                        None => TypeFilter::Any,
                        Some(code) => PropertyType::from_code(code)
                            .map(TypeFilter::Is)
                            .unwrap_or(TypeFilter::Unknown),
                    }
                }
                "sort" => query.sort = SortOrder::from_param(value.trim()),
                "page" => page = value.trim().parse().unwrap_or(1),
                "page_size" => page_size = value.trim().parse().unwrap_or(DEFAULT_PAGE_SIZE),
                _ => {}
            }
        }

        query.page = PageRequest::new(page, page_size);
        query
    }
}

/// Builds `next` / `previous` URLs for a result page.
///
/// Links repeat the incoming parameters (including `lang`) and only swap
/// the page number, so clients can follow them blindly.
#[derive(Debug, Clone)]
pub struct PageLinks<'a> {
    pub path: &'a str,
    pub base_url: Option<&'a str>,
    pub pairs: &'a [(String, String)],
}

impl PageLinks<'_> {
    pub fn next(&self, page: PageRequest, total: i64) -> Option<String> {
        (page.page < page.page_count(total)).then(|| self.link(Some(page.page + 1)))
    }

    pub fn previous(&self, page: PageRequest) -> Option<String> {
        match page.page {
            0 | 1 => None,
            2 => Some(self.link(None)),
            n => Some(self.link(Some(n - 1))),
        }
    }

    fn link(&self, page: Option<u32>) -> String {
        let mut pairs: Vec<(&str, String)> = self
            .pairs
            .iter()
            .filter(|(key, _)| key != "page")
            .map(|(key, value)| (key.as_str(), value.clone()))
            .collect();
        if let Some(page) = page {
            pairs.push(("page", page.to_string()));
        }

        let query = serde_urlencoded::to_string(&pairs).unwrap_or_default();
        let base = self.base_url.map(|b| b.trim_end_matches('/')).unwrap_or("");

        if query.is_empty() {
            format!("{}{}", base, self.path)
        } else {
            format!("{}{}?{}", base, self.path, query)
        }
    }
}
