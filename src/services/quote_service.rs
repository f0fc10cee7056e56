//! Business logic for quote records.

use sea_orm::*;
use uuid::Uuid;

use crate::models::quote::{self, Entity as QuoteEntity};
use crate::models::{Quote, QuotePatch, QuoteStatus};
use crate::pricing::{calc_total, PricingConfig};
use crate::services::{settings_service, ServiceError};

/// List all quotes, newest-created first.
pub async fn list_quotes(db: &DatabaseConnection) -> Result<Vec<Quote>, ServiceError> {
    let models = QuoteEntity::find()
        .order_by_desc(quote::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(models.into_iter().map(Quote::from).collect())
}

pub async fn get_quote(db: &DatabaseConnection, id: &str) -> Result<Quote, ServiceError> {
    let model = QuoteEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;
    Ok(Quote::from(model))
}

/// Insert a full quote payload. The id is client-generated; a missing id or
/// created-at stamp is filled in server-side.
pub async fn create_quote(db: &DatabaseConnection, mut dto: Quote) -> Result<Quote, ServiceError> {
    if dto.id.is_empty() {
        dto.id = Uuid::new_v4().to_string();
    }
    if dto.created_at.is_empty() {
        dto.created_at = chrono::Utc::now().to_rfc3339();
    }

    let model = quote::ActiveModel {
        id: Set(dto.id.clone()),
        client_name: Set(dto.client_name.clone()),
        project_name: Set(dto.project_name.clone()),
        pages: Set(dto.pages),
        include_design: Set(dto.include_design),
        include_dev: Set(dto.include_dev),
        include_copy: Set(dto.include_copy),
        is_landing_page: Set(dto.is_landing_page),
        add_blog: Set(dto.add_blog),
        add_shop: Set(dto.add_shop),
        custom_post_types: Set(dto.custom_post_types_json()),
        plugins: Set(dto.plugins_json()),
        include_pm: Set(dto.include_pm),
        include_contingency: Set(dto.include_contingency),
        discount_type: Set(dto.discount_type.as_str().to_owned()),
        discount_value: Set(dto.discount_value),
        total: Set(dto.total),
        status: Set(dto.status.as_str().to_owned()),
        notes: Set(dto.notes.clone()),
        created_at: Set(dto.created_at.clone()),
    };

    let saved = model.insert(db).await?;
    Ok(Quote::from(saved))
}

/// Partial update with coalesce-unless-provided semantics. The id and the
/// creation timestamp are immutable.
pub async fn update_quote(
    db: &DatabaseConnection,
    id: &str,
    patch: QuotePatch,
) -> Result<Quote, ServiceError> {
    let existing = QuoteEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let mut dto = Quote::from(existing.clone());
    patch.apply(&mut dto);

    let mut active: quote::ActiveModel = existing.into();
    active.client_name = Set(dto.client_name.clone());
    active.project_name = Set(dto.project_name.clone());
    active.pages = Set(dto.pages);
    active.include_design = Set(dto.include_design);
    active.include_dev = Set(dto.include_dev);
    active.include_copy = Set(dto.include_copy);
    active.is_landing_page = Set(dto.is_landing_page);
    active.add_blog = Set(dto.add_blog);
    active.add_shop = Set(dto.add_shop);
    active.custom_post_types = Set(dto.custom_post_types_json());
    active.plugins = Set(dto.plugins_json());
    active.include_pm = Set(dto.include_pm);
    active.include_contingency = Set(dto.include_contingency);
    active.discount_type = Set(dto.discount_type.as_str().to_owned());
    active.discount_value = Set(dto.discount_value);
    active.total = Set(dto.total);
    active.status = Set(dto.status.as_str().to_owned());
    active.notes = Set(dto.notes.clone());

    let updated = active.update(db).await?;
    Ok(Quote::from(updated))
}

pub async fn delete_quote(db: &DatabaseConnection, id: &str) -> Result<(), ServiceError> {
    let res = QuoteEntity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::NotFound);
    }
    Ok(())
}

/// Aggregates for the CRM dashboard. Totals are recomputed with the pricing
/// engine against the settings currently in effect, not the cached column.
#[derive(Debug, Clone, serde::Serialize)]
pub struct QuoteStats {
    pub total_quotes: i64,
    pub total_quoted: i64,
    pub accepted_quotes: i64,
    pub accepted_total: i64,
}

pub async fn quote_stats(db: &DatabaseConnection) -> Result<QuoteStats, ServiceError> {
    let settings = settings_service::get_settings(db).await?;
    let cfg = PricingConfig::resolve(&settings);

    let quotes = list_quotes(db).await?;

    let mut stats = QuoteStats {
        total_quotes: quotes.len() as i64,
        total_quoted: 0,
        accepted_quotes: 0,
        accepted_total: 0,
    };
    for quote in &quotes {
        let total = calc_total(quote, &cfg);
        stats.total_quoted += total;
        if quote.status == QuoteStatus::Accepted {
            stats.accepted_quotes += 1;
            stats.accepted_total += total;
        }
    }

    Ok(stats)
}
