use crate::db::Database;
use crate::error::{AppError, Result};
use crate::properties::models::{NewProperty, NewPropertyImage, Property, PropertyImage, PropertyRow};
use crate::properties::query::{PropertyFilter, PropertyQuery, TypeFilter};
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info};

/// Storage for listings and their gallery images.
#[derive(Clone, Debug)]
pub struct PropertyRepository {
    pool: SqlitePool,
}

fn decimal_text(value: &Decimal) -> String {
    value.normalize().to_string()
}

fn optional_text(value: &Option<Decimal>) -> Option<String> {
    value.as_ref().map(decimal_text)
}

/// Search key for the location filter. SQLite `LOWER` only folds ASCII, so
/// both sides are folded here.
fn fold_location(location: &str) -> String {
    location.trim().to_lowercase()
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Property {} not found", id))
}

/// Map a `ref` uniqueness violation to a conflict, everything else stays a
/// database error.
fn map_write_error(e: sqlx::Error, reference: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict(
            format!("A property with reference '{}' already exists", reference),
        ),
        _ => AppError::Database(e),
    }
}

/// Append the public-listing predicate to `builder`, which must already end
/// in a `WHERE` clause start.
fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, filter: &PropertyFilter) {
    builder.push("is_active = 1");

    if let Some(location) = &filter.location {
        builder
            .push(" AND instr(location_folded, ")
            .push_bind(fold_location(location))
            .push(") > 0");
    }

    if let Some(min) = filter.price_min.as_ref().and_then(ToPrimitive::to_f64) {
        builder.push(" AND CAST(price AS REAL) >= ").push_bind(min);
    }

    if let Some(max) = filter.price_max.as_ref().and_then(ToPrimitive::to_f64) {
        builder.push(" AND CAST(price AS REAL) <= ").push_bind(max);
    }

    match filter.property_type {
        TypeFilter::Any => {}
        TypeFilter::Is(kind) => {
            builder.push(" AND property_type = ").push_bind(kind.code());
        }
        TypeFilter::Unknown => {
            builder.push(" AND 0");
        }
    }
}

async fn insert_property(conn: &mut SqliteConnection, input: &NewProperty) -> Result<Property> {
    let now = Utc::now();

    let row: PropertyRow = sqlx::query_as(
        r#"
        INSERT INTO properties (
            ref, location, location_folded, price, area, commercial_area, net_area,
            bedrooms, bathrooms, total_rooms, property_type, energy_class,
            condominium_fees, title, description, composition,
            composition_note, location_note, main_image, latitude, longitude,
            is_active, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&input.reference)
    .bind(&input.location)
    .bind(fold_location(&input.location))
    .bind(decimal_text(&input.price))
    .bind(decimal_text(&input.area))
    .bind(optional_text(&input.commercial_area))
    .bind(optional_text(&input.net_area))
    .bind(input.bedrooms)
    .bind(input.bathrooms)
    .bind(input.total_rooms)
    .bind(input.property_type.map(|t| t.code()))
    .bind(&input.energy_class)
    .bind(optional_text(&input.condominium_fees))
    .bind(Json(&input.title))
    .bind(Json(&input.description))
    .bind(Json(&input.composition))
    .bind(Json(&input.composition_note))
    .bind(Json(&input.location_note))
    .bind(&input.main_image)
    .bind(optional_text(&input.latitude))
    .bind(optional_text(&input.longitude))
    .bind(input.is_active)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| map_write_error(e, &input.reference))?;

    row.try_into()
}

async fn insert_image(
    conn: &mut SqliteConnection,
    property_id: i64,
    input: &NewPropertyImage,
) -> Result<PropertyImage> {
    let image = sqlx::query_as(
        r#"INSERT INTO property_images (property_id, image, "order") VALUES (?, ?, ?)
           RETURNING id, property_id, image, "order""#,
    )
    .bind(property_id)
    .bind(&input.image)
    .bind(input.order)
    .fetch_one(&mut *conn)
    .await?;

    Ok(image)
}

impl PropertyRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// One page of active listings plus the total across all pages.
    pub async fn list_active(&self, query: &PropertyQuery) -> Result<(Vec<Property>, i64)> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM properties WHERE ");
        push_filters(&mut count, &query.filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Sqlite>::new("SELECT * FROM properties WHERE ");
        push_filters(&mut select, &query.filter);
        select
            .push(" ORDER BY ")
            .push(query.sort.order_by())
            .push(" LIMIT ")
            .push_bind(query.page.limit())
            .push(" OFFSET ")
            .push_bind(query.page.offset());

        let rows: Vec<PropertyRow> = select.build_query_as().fetch_all(&self.pool).await?;
        let items = rows
            .into_iter()
            .map(Property::try_from)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Listed {} of {} active properties (page {})",
            items.len(),
            total,
            query.page.page
        );

        Ok((items, total))
    }

    /// Fetch an active listing; inactive ones are reported as missing.
    pub async fn get_active(&self, id: i64) -> Result<Property> {
        let row: Option<PropertyRow> =
            sqlx::query_as("SELECT * FROM properties WHERE id = ? AND is_active = 1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.ok_or_else(|| not_found(id))?.try_into()
    }

    pub async fn get(&self, id: i64) -> Result<Property> {
        let row: Option<PropertyRow> = sqlx::query_as("SELECT * FROM properties WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or_else(|| not_found(id))?.try_into()
    }

    /// Every listing, active or not, newest first.
    pub async fn list_all(&self) -> Result<Vec<Property>> {
        let rows: Vec<PropertyRow> =
            sqlx::query_as("SELECT * FROM properties ORDER BY created_at DESC, id DESC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Property::try_from).collect()
    }

    pub async fn count(&self) -> Result<i64> {
        let total = sqlx::query_scalar("SELECT COUNT(*) FROM properties")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn create(&self, input: &NewProperty) -> Result<Property> {
        let mut conn = self.pool.acquire().await?;
        let property = insert_property(&mut conn, input).await?;

        info!("Created property {} ({})", property.id, property.reference);
        Ok(property)
    }

    /// Insert several listings with their galleries in one transaction.
    ///
    /// Either every listing is stored or none is.
    pub async fn create_batch(
        &self,
        listings: &[(NewProperty, Vec<NewPropertyImage>)],
    ) -> Result<Vec<Property>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(listings.len());

        for (input, gallery) in listings {
            let property = insert_property(&mut tx, input).await?;
            for image in gallery {
                insert_image(&mut tx, property.id, image).await?;
            }
            created.push(property);
        }

        tx.commit().await?;

        info!("Created {} properties in one batch", created.len());
        Ok(created)
    }

    /// Replace every editable field of an existing listing.
    pub async fn update(&self, id: i64, input: &NewProperty) -> Result<Property> {
        let row: Option<PropertyRow> = sqlx::query_as(
            r#"
            UPDATE properties SET
                ref = ?, location = ?, location_folded = ?, price = ?, area = ?,
                commercial_area = ?, net_area = ?, bedrooms = ?, bathrooms = ?,
                total_rooms = ?,
                property_type = ?, energy_class = ?, condominium_fees = ?,
                title = ?, description = ?, composition = ?, composition_note = ?,
                location_note = ?, main_image = ?, latitude = ?, longitude = ?,
                is_active = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&input.reference)
        .bind(&input.location)
        .bind(fold_location(&input.location))
        .bind(decimal_text(&input.price))
        .bind(decimal_text(&input.area))
        .bind(optional_text(&input.commercial_area))
        .bind(optional_text(&input.net_area))
        .bind(input.bedrooms)
        .bind(input.bathrooms)
        .bind(input.total_rooms)
        .bind(input.property_type.map(|t| t.code()))
        .bind(&input.energy_class)
        .bind(optional_text(&input.condominium_fees))
        .bind(Json(&input.title))
        .bind(Json(&input.description))
        .bind(Json(&input.composition))
        .bind(Json(&input.composition_note))
        .bind(Json(&input.location_note))
        .bind(&input.main_image)
        .bind(optional_text(&input.latitude))
        .bind(optional_text(&input.longitude))
        .bind(input.is_active)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &input.reference))?;

        let property: Property = row.ok_or_else(|| not_found(id))?.try_into()?;
        debug!("Updated property {}", id);
        Ok(property)
    }

    pub async fn set_active(&self, id: i64, is_active: bool) -> Result<Property> {
        let row: Option<PropertyRow> = sqlx::query_as(
            "UPDATE properties SET is_active = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(is_active)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let property: Property = row.ok_or_else(|| not_found(id))?.try_into()?;
        info!("Property {} is_active = {}", id, is_active);
        Ok(property)
    }

    /// Delete a listing; its gallery goes with it.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        info!("Deleted property {}", id);
        Ok(())
    }

    /// Gallery images in display order.
    pub async fn images_for(&self, property_id: i64) -> Result<Vec<PropertyImage>> {
        let images = sqlx::query_as(
            r#"SELECT id, property_id, image, "order" FROM property_images
               WHERE property_id = ? ORDER BY "order" ASC, id ASC"#,
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    pub async fn add_image(&self, property_id: i64, input: &NewPropertyImage) -> Result<PropertyImage> {
        // Surface a 404 rather than a foreign key failure
        self.get(property_id).await?;

        let mut conn = self.pool.acquire().await?;
        let image = insert_image(&mut conn, property_id, input).await?;

        debug!("Added gallery image {} to property {}", image.id, property_id);
        Ok(image)
    }

    pub async fn delete_image(&self, property_id: i64, image_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM property_images WHERE id = ? AND property_id = ?")
            .bind(image_id)
            .bind(property_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Image {} not found on property {}",
                image_id, property_id
            )));
        }
        Ok(())
    }
}
