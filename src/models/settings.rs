use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub rate: i64,
    pub min_project: i64,
    pub landing_page_price: i64,
    pub show_internal_costs: bool,
    pub theme: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// The singleton pricing configuration (row id = 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub rate: i64,
    #[serde(default)]
    pub min_project: i64,
    #[serde(default)]
    pub landing_page_price: i64,
    #[serde(default)]
    pub show_internal_costs: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "dark".to_string()
}

pub const DEFAULT_RATE: i64 = 175;
pub const DEFAULT_MIN_PROJECT: i64 = 1750;
pub const DEFAULT_LANDING_PAGE_PRICE: i64 = 700;

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rate: DEFAULT_RATE,
            min_project: DEFAULT_MIN_PROJECT,
            landing_page_price: DEFAULT_LANDING_PAGE_PRICE,
            show_internal_costs: false,
            theme: default_theme(),
        }
    }
}

/// Partial update payload for the settings endpoint: a missing field keeps
/// its stored value (server-side coalesce).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_project: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_page_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_internal_costs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl SettingsPatch {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(v) = self.rate {
            settings.rate = v;
        }
        if let Some(v) = self.min_project {
            settings.min_project = v;
        }
        if let Some(v) = self.landing_page_price {
            settings.landing_page_price = v;
        }
        if let Some(v) = self.show_internal_costs {
            settings.show_internal_costs = v;
        }
        if let Some(v) = &self.theme {
            settings.theme = v.clone();
        }
    }
}

impl From<Model> for Settings {
    fn from(m: Model) -> Self {
        Settings {
            rate: m.rate,
            min_project: m.min_project,
            landing_page_price: m.landing_page_price,
            show_internal_costs: m.show_internal_costs,
            theme: m.theme,
        }
    }
}
