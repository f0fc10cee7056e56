pub mod quote;
pub mod settings;

pub use quote::{CustomPostType, DiscountType, Frequency, Plugin, Quote, QuotePatch, QuoteStatus};
pub use settings::{Settings, SettingsPatch};
