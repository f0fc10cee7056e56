use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quotes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub client_name: String,
    pub project_name: String,
    pub pages: i64,
    pub include_design: bool,
    pub include_dev: bool,
    pub include_copy: bool,
    pub is_landing_page: bool,
    pub add_blog: bool,
    pub add_shop: bool,
    pub custom_post_types: String, // JSON array
    pub plugins: String,           // JSON array
    pub include_pm: bool,
    pub include_contingency: bool,
    pub discount_type: String,
    pub discount_value: f64,
    pub total: i64,
    pub status: String,
    pub notes: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Sales pipeline state. Transitions are unrestricted: any state can move to
/// any other by explicit user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuoteStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Declined,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "Draft",
            QuoteStatus::Sent => "Sent",
            QuoteStatus::Accepted => "Accepted",
            QuoteStatus::Declined => "Declined",
        }
    }

    /// Unknown values fall back to Draft rather than erroring.
    pub fn parse(s: &str) -> Self {
        match s {
            "Sent" => QuoteStatus::Sent,
            "Accepted" => QuoteStatus::Accepted,
            "Declined" => QuoteStatus::Declined,
            _ => QuoteStatus::Draft,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[default]
    Percent,
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percent => "percent",
            DiscountType::Fixed => "fixed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "fixed" => DiscountType::Fixed,
            _ => DiscountType::Percent,
        }
    }
}

/// Billing cadence of a plugin / third-party service line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    #[default]
    OneTime,
    Monthly,
    Annual,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomPostType {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Plugin {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cost: i64,
    #[serde(default)]
    pub frequency: Frequency,
}

/// Wire/domain shape of a quote. Absent fields deserialize to zero/false/empty
/// so half-filled payloads stay accepted instead of being rejected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub pages: i64,
    #[serde(default)]
    pub include_design: bool,
    #[serde(default)]
    pub include_dev: bool,
    #[serde(default)]
    pub include_copy: bool,
    #[serde(default)]
    pub is_landing_page: bool,
    #[serde(default)]
    pub add_blog: bool,
    #[serde(default)]
    pub add_shop: bool,
    #[serde(default)]
    pub custom_post_types: Vec<CustomPostType>,
    #[serde(default)]
    pub plugins: Vec<Plugin>,
    #[serde(default)]
    pub include_pm: bool,
    #[serde(default)]
    pub include_contingency: bool,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub discount_value: f64,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub status: QuoteStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_at: String,
}

/// Partial update payload. Both the HTTP endpoint and the sync store use the
/// same coalesce-unless-provided contract: a missing field keeps its prior
/// value. `id` and `created_at` are never patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_design: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_dev: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_copy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_landing_page: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_blog: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_shop: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_post_types: Option<Vec<CustomPostType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<Plugin>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_pm: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_contingency: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<QuoteStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl QuotePatch {
    pub fn apply(&self, quote: &mut Quote) {
        if let Some(v) = &self.client_name {
            quote.client_name = v.clone();
        }
        if let Some(v) = &self.project_name {
            quote.project_name = v.clone();
        }
        if let Some(v) = self.pages {
            quote.pages = v;
        }
        if let Some(v) = self.include_design {
            quote.include_design = v;
        }
        if let Some(v) = self.include_dev {
            quote.include_dev = v;
        }
        if let Some(v) = self.include_copy {
            quote.include_copy = v;
        }
        if let Some(v) = self.is_landing_page {
            quote.is_landing_page = v;
        }
        if let Some(v) = self.add_blog {
            quote.add_blog = v;
        }
        if let Some(v) = self.add_shop {
            quote.add_shop = v;
        }
        if let Some(v) = &self.custom_post_types {
            quote.custom_post_types = v.clone();
        }
        if let Some(v) = &self.plugins {
            quote.plugins = v.clone();
        }
        if let Some(v) = self.include_pm {
            quote.include_pm = v;
        }
        if let Some(v) = self.include_contingency {
            quote.include_contingency = v;
        }
        if let Some(v) = self.discount_type {
            quote.discount_type = v;
        }
        if let Some(v) = self.discount_value {
            quote.discount_value = v;
        }
        if let Some(v) = self.total {
            quote.total = v;
        }
        if let Some(v) = self.status {
            quote.status = v;
        }
        if let Some(v) = &self.notes {
            quote.notes = v.clone();
        }
    }

    /// Re-save from the calculator: overwrites every pricing field while the
    /// absent ones (`status`, `notes`) keep their stored values.
    pub fn from_pricing_fields(quote: &Quote) -> Self {
        QuotePatch {
            client_name: Some(quote.client_name.clone()),
            project_name: Some(quote.project_name.clone()),
            pages: Some(quote.pages),
            include_design: Some(quote.include_design),
            include_dev: Some(quote.include_dev),
            include_copy: Some(quote.include_copy),
            is_landing_page: Some(quote.is_landing_page),
            add_blog: Some(quote.add_blog),
            add_shop: Some(quote.add_shop),
            custom_post_types: Some(quote.custom_post_types.clone()),
            plugins: Some(quote.plugins.clone()),
            include_pm: Some(quote.include_pm),
            include_contingency: Some(quote.include_contingency),
            discount_type: Some(quote.discount_type),
            discount_value: Some(quote.discount_value),
            total: Some(quote.total),
            status: None,
            notes: None,
        }
    }
}

impl From<Model> for Quote {
    fn from(m: Model) -> Self {
        Quote {
            id: m.id,
            client_name: m.client_name,
            project_name: m.project_name,
            pages: m.pages,
            include_design: m.include_design,
            include_dev: m.include_dev,
            include_copy: m.include_copy,
            is_landing_page: m.is_landing_page,
            add_blog: m.add_blog,
            add_shop: m.add_shop,
            custom_post_types: serde_json::from_str(&m.custom_post_types).unwrap_or_default(),
            plugins: serde_json::from_str(&m.plugins).unwrap_or_default(),
            include_pm: m.include_pm,
            include_contingency: m.include_contingency,
            discount_type: DiscountType::parse(&m.discount_type),
            discount_value: m.discount_value,
            total: m.total,
            status: QuoteStatus::parse(&m.status),
            notes: m.notes,
            created_at: m.created_at,
        }
    }
}

impl Quote {
    pub fn custom_post_types_json(&self) -> String {
        serde_json::to_string(&self.custom_post_types).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn plugins_json(&self) -> String {
        serde_json::to_string(&self.plugins).unwrap_or_else(|_| "[]".to_string())
    }
}
