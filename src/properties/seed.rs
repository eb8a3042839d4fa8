use crate::error::Result;
use crate::properties::models::{NewProperty, NewPropertyImage};
use crate::properties::repository::PropertyRepository;
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

const SEED_DATA: &str = include_str!("../../data/seed_properties.json");

#[derive(Deserialize)]
struct SeedData {
    properties: Vec<NewProperty>,
    /// Gallery for the first listing, in display order
    gallery: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The catalog already had listings; nothing was written
    Skipped { existing: i64 },
    Seeded { properties: usize, images: usize },
}

/// Load the bundled sample listings into an empty catalog.
///
/// All listings go in one transaction, so a failed run leaves the catalog
/// empty and the next run retries from scratch.
pub async fn seed_properties(repo: &PropertyRepository) -> Result<SeedOutcome> {
    let existing = repo.count().await?;
    if existing > 0 {
        warn!(
            "Catalog already holds {} properties, skipping seed",
            existing
        );
        return Ok(SeedOutcome::Skipped { existing });
    }

    let data: SeedData = serde_json::from_str(SEED_DATA)?;
    for input in &data.properties {
        input.validate()?;
    }

    let gallery: Vec<NewPropertyImage> = data
        .gallery
        .iter()
        .enumerate()
        .map(|(order, image)| NewPropertyImage {
            image: image.clone(),
            order: order as i64,
        })
        .collect();
    let images = gallery.len();

    // The first listing carries the gallery
    let mut listings: Vec<_> = data
        .properties
        .into_iter()
        .map(|input| (input, Vec::new()))
        .collect();
    if let Some((_, first_gallery)) = listings.first_mut() {
        *first_gallery = gallery;
    }

    let created = repo.create_batch(&listings).await?;
    for property in &created {
        info!("Seeded {} ({})", property.reference, property.location);
    }

    info!(
        "Seeded {} properties and {} gallery images",
        created.len(),
        images
    );

    Ok(SeedOutcome::Seeded {
        properties: created.len(),
        images,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::i18n::Language;
    use crate::properties::query::PropertyQuery;
    use rust_decimal::Decimal;

    async fn setup() -> PropertyRepository {
        let db = Database::in_memory().await.unwrap();
        PropertyRepository::new(&db)
    }

    #[test]
    fn test_bundled_data_is_valid() {
        let data: SeedData = serde_json::from_str(SEED_DATA).unwrap();

        assert_eq!(data.properties.len(), 9);
        assert_eq!(data.gallery.len(), 4);
        for input in &data.properties {
            assert!(input.validate().is_ok(), "{} is invalid", input.reference);
        }
    }

    #[tokio::test]
    async fn test_seed_empty_catalog() {
        let repo = setup().await;

        let outcome = seed_properties(&repo).await.unwrap();
        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                properties: 9,
                images: 4
            }
        );

        let (items, total) = repo.list_active(&PropertyQuery::default()).await.unwrap();
        assert_eq!(total, 9);
        assert_eq!(items.len(), 9);

        let villa = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .find(|p| p.reference == "RF: 00152")
            .unwrap();
        assert_eq!(villa.price, Decimal::from(3_150_000));
        assert!(!villa.composition.resolve(Language::ITALIAN).is_empty());

        let gallery = repo.images_for(villa.id).await.unwrap();
        let orders: Vec<_> = gallery.iter().map(|i| i.order).collect();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn test_seed_skips_non_empty_catalog() {
        let repo = setup().await;
        seed_properties(&repo).await.unwrap();

        let outcome = seed_properties(&repo).await.unwrap();
        assert_eq!(outcome, SeedOutcome::Skipped { existing: 9 });
        assert_eq!(repo.count().await.unwrap(), 9);
    }
}
