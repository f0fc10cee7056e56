//! Pure pricing computations. Everything here is a total function of
//! (quote, config): no I/O, no state, no error path — absent or nonsensical
//! numeric inputs are coerced rather than rejected.

use crate::models::settings::{
    DEFAULT_LANDING_PAGE_PRICE, DEFAULT_MIN_PROJECT, DEFAULT_RATE,
};
use crate::models::{DiscountType, Frequency, Quote, Settings};
use serde::{Deserialize, Serialize};

/// Flat rate for blog, shop and each custom post type (index + archive pair).
pub const ADDON_PRICE: i64 = 700;

/// PM and contingency are each 20% of the subtotal.
pub const OVERHEAD_SHARE: f64 = 0.2;

/// Resolved pricing configuration. Fallbacks are applied once here, at the
/// boundary; a zero or missing value means "use the default" (matching how
/// the settings form treats cleared fields).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub rate: i64,
    pub min_project: i64,
    pub landing_page_price: i64,
    pub show_internal_costs: bool,
}

impl PricingConfig {
    pub fn resolve(settings: &Settings) -> Self {
        PricingConfig {
            rate: or_default(settings.rate, DEFAULT_RATE),
            min_project: or_default(settings.min_project, DEFAULT_MIN_PROJECT),
            landing_page_price: or_default(
                settings.landing_page_price,
                DEFAULT_LANDING_PAGE_PRICE,
            ),
            show_internal_costs: settings.show_internal_costs,
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig::resolve(&Settings::default())
    }
}

fn or_default(value: i64, default: i64) -> i64 {
    if value > 0 { value } else { default }
}

/// Half-up rounding to the nearest whole currency unit. PM, contingency and
/// the percent discount are each rounded independently, so their sum can
/// drift by a unit against rounding the combined amount — client-visible
/// output depends on that exact behavior.
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Every intermediate of the price calculation, so the summary view, the
/// clipboard text and the print document all render from one computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub service_count: i64,
    pub page_total: i64,
    pub blog_cost: i64,
    pub shop_cost: i64,
    pub cpt_cost: i64,
    pub plugin_cost: i64,
    pub subtotal: i64,
    pub pm_cost: i64,
    pub contingency_cost: i64,
    pub pre_discount_total: i64,
    pub discount_amount: i64,
    pub raw_total: i64,
    pub total: i64,
    /// True when the minimum-project floor lifted the raw total.
    pub below_minimum: bool,
    pub has_services: bool,
}

pub fn breakdown(quote: &Quote, cfg: &PricingConfig) -> PriceBreakdown {
    let service_count = [quote.include_design, quote.include_dev, quote.include_copy]
        .iter()
        .filter(|&&s| s)
        .count() as i64;

    let pages = quote.pages.max(0);
    let page_total = if quote.is_landing_page {
        cfg.landing_page_price
    } else {
        pages * service_count * cfg.rate
    };

    let blog_cost = if quote.add_blog { ADDON_PRICE } else { 0 };
    let shop_cost = if quote.add_shop { ADDON_PRICE } else { 0 };
    let cpt_cost = quote.custom_post_types.len() as i64 * ADDON_PRICE;
    // Recurring plugin costs go into the one-off total at face value, not
    // amortized. Client-facing quote text repeats this, so it must match.
    let plugin_cost: i64 = quote.plugins.iter().map(|p| p.cost.max(0)).sum();

    let subtotal = page_total + blog_cost + shop_cost + cpt_cost + plugin_cost;

    let pm_cost = if quote.include_pm {
        round_half_up(subtotal as f64 * OVERHEAD_SHARE)
    } else {
        0
    };
    let contingency_cost = if quote.include_contingency {
        round_half_up(subtotal as f64 * OVERHEAD_SHARE)
    } else {
        0
    };

    let pre_discount_total = subtotal + pm_cost + contingency_cost;

    let discount_amount = if quote.discount_value > 0.0 {
        match quote.discount_type {
            DiscountType::Percent => {
                let pct = quote.discount_value.clamp(0.0, 100.0);
                round_half_up(pre_discount_total as f64 * (pct / 100.0))
            }
            // A fixed discount never pushes the total negative.
            DiscountType::Fixed => {
                round_half_up(quote.discount_value.min(pre_discount_total as f64))
            }
        }
    } else {
        0
    };

    let raw_total = pre_discount_total - discount_amount;
    let has_services = quote.is_landing_page || service_count > 0;

    // Landing pages are exempt from the project minimum; so is an empty
    // configuration with no services selected (the zero-total path).
    let total = if quote.is_landing_page {
        raw_total
    } else if has_services {
        raw_total.max(cfg.min_project)
    } else {
        raw_total.max(0)
    };

    let below_minimum = !quote.is_landing_page && has_services && raw_total < cfg.min_project;

    PriceBreakdown {
        service_count,
        page_total,
        blog_cost,
        shop_cost,
        cpt_cost,
        plugin_cost,
        subtotal,
        pm_cost,
        contingency_cost,
        pre_discount_total,
        discount_amount,
        raw_total,
        total,
        below_minimum,
        has_services,
    }
}

pub fn calc_total(quote: &Quote, cfg: &PricingConfig) -> i64 {
    breakdown(quote, cfg).total
}

/// Ongoing plugin costs, partitioned by billing cadence. One-time entries
/// are excluded; no rounding is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecurringCosts {
    pub monthly: i64,
    pub annual: i64,
}

pub fn calc_recurring(quote: &Quote) -> RecurringCosts {
    let mut costs = RecurringCosts::default();
    for plugin in &quote.plugins {
        match plugin.frequency {
            Frequency::Monthly => costs.monthly += plugin.cost.max(0),
            Frequency::Annual => costs.annual += plugin.cost.max(0),
            Frequency::OneTime => {}
        }
    }
    costs
}

/// The per-page rate shown to the client. When internal costs are hidden the
/// rate is inflated to fold PM/contingency in, so displayed line items still
/// sum to the pre-floor total (modulo a few units of rounding drift). This is
/// presentation only — it never changes `calc_total`.
pub fn display_rate(quote: &Quote, cfg: &PricingConfig) -> i64 {
    if cfg.show_internal_costs {
        return cfg.rate;
    }
    let pm_multiplier = if quote.include_pm { 1.0 + OVERHEAD_SHARE } else { 1.0 };
    let contingency_multiplier = if quote.include_contingency {
        1.0 + OVERHEAD_SHARE
    } else {
        1.0
    };
    round_half_up(cfg.rate as f64 * pm_multiplier * contingency_multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Plugin;

    fn base_quote() -> Quote {
        Quote {
            pages: 5,
            include_design: true,
            include_dev: true,
            include_pm: true,
            include_contingency: true,
            ..Default::default()
        }
    }

    fn default_cfg() -> PricingConfig {
        PricingConfig::default()
    }

    #[test]
    fn standard_five_page_project() {
        let quote = base_quote();
        let b = breakdown(&quote, &default_cfg());

        assert_eq!(b.service_count, 2);
        assert_eq!(b.page_total, 1750); // 5 pages x 2 services x 175
        assert_eq!(b.subtotal, 1750);
        assert_eq!(b.pm_cost, 350);
        assert_eq!(b.contingency_cost, 350);
        assert_eq!(b.pre_discount_total, 2450);
        assert_eq!(b.total, 2450);
        assert!(!b.below_minimum);
    }

    #[test]
    fn landing_page_skips_the_floor() {
        let quote = Quote {
            is_landing_page: true,
            ..base_quote()
        };
        let b = breakdown(&quote, &default_cfg());

        assert_eq!(b.page_total, 700);
        assert_eq!(b.pm_cost, 140);
        assert_eq!(b.contingency_cost, 140);
        assert_eq!(b.total, 980); // below min_project, floor not applied
    }

    #[test]
    fn floor_lifts_small_projects() {
        let quote = Quote {
            pages: 1,
            include_design: true,
            ..Default::default()
        };
        let b = breakdown(&quote, &default_cfg());

        assert_eq!(b.raw_total, 175);
        assert_eq!(b.total, 1750);
        assert!(b.below_minimum);
    }

    #[test]
    fn no_services_means_no_floor() {
        let quote = Quote {
            pages: 5,
            ..Default::default()
        };
        let b = breakdown(&quote, &default_cfg());

        assert!(!b.has_services);
        assert_eq!(b.total, 0);
    }

    #[test]
    fn full_percent_discount_zeroes_the_raw_total() {
        let quote = Quote {
            discount_type: DiscountType::Percent,
            discount_value: 100.0,
            ..base_quote()
        };
        let b = breakdown(&quote, &default_cfg());

        assert_eq!(b.discount_amount, b.pre_discount_total);
        assert_eq!(b.raw_total, 0);
        // Still floored: services are selected and it is not a landing page.
        assert_eq!(b.total, 1750);
    }

    #[test]
    fn fixed_discount_is_capped_at_the_pre_discount_total() {
        let quote = Quote {
            discount_type: DiscountType::Fixed,
            discount_value: 99999.0,
            ..base_quote()
        };
        let b = breakdown(&quote, &default_cfg());

        assert_eq!(b.discount_amount, b.pre_discount_total);
        assert_eq!(b.raw_total, 0);
    }

    #[test]
    fn plugin_costs_count_once_regardless_of_frequency() {
        let quote = Quote {
            plugins: vec![
                Plugin {
                    cost: 100,
                    frequency: Frequency::Monthly,
                    ..Default::default()
                },
                Plugin {
                    cost: 50,
                    frequency: Frequency::OneTime,
                    ..Default::default()
                },
            ],
            ..base_quote()
        };
        let b = breakdown(&quote, &default_cfg());
        assert_eq!(b.plugin_cost, 150);

        let recurring = calc_recurring(&quote);
        assert_eq!(recurring.monthly, 100);
        assert_eq!(recurring.annual, 0);
    }

    #[test]
    fn overheads_round_independently() {
        // Odd subtotal: 5 pages x 1 service x 175 + 2 plugins of 3 = 881.
        // 20% of 881 = 176.2, rounded half-up per component.
        let quote = Quote {
            pages: 5,
            include_design: true,
            include_pm: true,
            include_contingency: true,
            plugins: vec![
                Plugin {
                    cost: 3,
                    ..Default::default()
                },
                Plugin {
                    cost: 3,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let b = breakdown(&quote, &default_cfg());
        assert_eq!(b.subtotal, 881);
        assert_eq!(b.pm_cost, 176);
        assert_eq!(b.contingency_cost, 176);
    }

    #[test]
    fn calc_total_is_deterministic() {
        let quote = Quote {
            discount_type: DiscountType::Percent,
            discount_value: 12.5,
            ..base_quote()
        };
        let cfg = default_cfg();
        assert_eq!(calc_total(&quote, &cfg), calc_total(&quote, &cfg));
    }

    #[test]
    fn zeroed_settings_fall_back_to_defaults() {
        let settings = Settings {
            rate: 0,
            min_project: 0,
            landing_page_price: 0,
            show_internal_costs: false,
            theme: String::new(),
        };
        let cfg = PricingConfig::resolve(&settings);
        assert_eq!(cfg.rate, 175);
        assert_eq!(cfg.min_project, 1750);
        assert_eq!(cfg.landing_page_price, 700);
    }

    #[test]
    fn display_rate_folds_hidden_overheads_in() {
        let quote = base_quote();
        let mut cfg = default_cfg();

        cfg.show_internal_costs = true;
        assert_eq!(display_rate(&quote, &cfg), 175);

        cfg.show_internal_costs = false;
        // 175 x 1.2 x 1.2 = 252
        assert_eq!(display_rate(&quote, &cfg), 252);

        let without_overheads = Quote {
            include_pm: false,
            include_contingency: false,
            ..base_quote()
        };
        assert_eq!(display_rate(&without_overheads, &cfg), 175);
    }
}
