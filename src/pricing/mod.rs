//! The pricing engine and its client-facing renderings.

pub mod document;
pub mod engine;

pub use document::{format_gbp, print_document, quote_rows, quote_text, Row};
pub use engine::{
    breakdown, calc_recurring, calc_total, display_rate, PriceBreakdown, PricingConfig,
    RecurringCosts,
};
