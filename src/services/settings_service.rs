//! Business logic for the singleton settings record (row id = 1).

use sea_orm::*;

use crate::models::settings::{self, Entity as SettingsEntity};
use crate::models::{Settings, SettingsPatch};
use crate::services::ServiceError;

/// Fetch the singleton. Falls back to the built-in defaults when the row is
/// missing (fresh database before the seed migration ran).
pub async fn get_settings(db: &DatabaseConnection) -> Result<Settings, ServiceError> {
    let model = SettingsEntity::find_by_id(1).one(db).await?;
    Ok(model.map(Settings::from).unwrap_or_default())
}

/// Partial update: only provided fields overwrite stored values.
pub async fn update_settings(
    db: &DatabaseConnection,
    patch: SettingsPatch,
) -> Result<Settings, ServiceError> {
    let now = chrono::Utc::now().to_rfc3339();
    let existing = SettingsEntity::find_by_id(1).one(db).await?;

    match existing {
        Some(model) => {
            let mut dto = Settings::from(model.clone());
            patch.apply(&mut dto);

            let mut active: settings::ActiveModel = model.into();
            active.rate = Set(dto.rate);
            active.min_project = Set(dto.min_project);
            active.landing_page_price = Set(dto.landing_page_price);
            active.show_internal_costs = Set(dto.show_internal_costs);
            active.theme = Set(dto.theme.clone());
            active.updated_at = Set(now);

            let updated = active.update(db).await?;
            Ok(Settings::from(updated))
        }
        None => {
            let mut dto = Settings::default();
            patch.apply(&mut dto);

            let active = settings::ActiveModel {
                id: Set(1),
                rate: Set(dto.rate),
                min_project: Set(dto.min_project),
                landing_page_price: Set(dto.landing_page_price),
                show_internal_costs: Set(dto.show_internal_costs),
                theme: Set(dto.theme.clone()),
                created_at: Set(now.clone()),
                updated_at: Set(now),
            };
            let inserted = active.insert(db).await?;
            Ok(Settings::from(inserted))
        }
    }
}

/// Wholesale replace used by the migration endpoint: zeroed or missing rate
/// fields take the defaults rather than clobbering the row with zeros.
pub async fn restore_settings(
    db: &DatabaseConnection,
    imported: Settings,
) -> Result<Settings, ServiceError> {
    let defaults = Settings::default();
    let patch = SettingsPatch {
        rate: Some(if imported.rate > 0 { imported.rate } else { defaults.rate }),
        min_project: Some(if imported.min_project > 0 {
            imported.min_project
        } else {
            defaults.min_project
        }),
        landing_page_price: Some(if imported.landing_page_price > 0 {
            imported.landing_page_price
        } else {
            defaults.landing_page_price
        }),
        show_internal_costs: Some(imported.show_internal_costs),
        theme: if imported.theme.is_empty() { None } else { Some(imported.theme) },
    };
    update_settings(db, patch).await
}
