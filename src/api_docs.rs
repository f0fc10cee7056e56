use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::quotes::list_quotes,
        api::quotes::create_quote,
        api::quotes::update_quote,
        api::quotes::delete_quote,
        api::settings::get_settings,
        api::settings::update_settings,
        api::migrate::migrate,
        api::stats::get_stats,
        api::export::export_data,
    ),
    tags(
        (name = "pricing-studio", description = "Pricing Studio API")
    )
)]
pub struct ApiDoc;
