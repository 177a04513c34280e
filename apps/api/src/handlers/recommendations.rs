use crate::{
    error::ApiError,
    models::{RecommendationRequest, RecommendationResponse},
    services::RecommendationService,
};
use actix_web::{
    web::{self, Json},
    HttpResponse,
};
use tracing::error;

pub fn recommendations_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/recommendations").route(web::post().to(get_recommendations)));
}

/// Body extractor settings so malformed payloads get the JSON error envelope
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::InvalidInput(format!("Invalid request body: {}", err)).into()
    })
}

/// Recommend books for a free-text description of the reader's preferences.
///
/// Responds with `{ "recommendations": [...] }`, each entry carrying the
/// model's title, author and reason plus `coverUrl`, `purchaseUrl` and
/// `previewUrl`. Blank preferences are a 400; any pipeline failure is a 500.
pub async fn get_recommendations(
    request: Json<RecommendationRequest>,
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse, ApiError> {
    let preferences = request
        .preferences
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            ApiError::InvalidInput("Please provide your reading preferences".to_string())
        })?;

    let recommendations = recommendation_service
        .recommend(preferences)
        .await
        .inspect_err(|e| error!("Error generating recommendations: {}", e))?;

    Ok(HttpResponse::Ok().json(RecommendationResponse { recommendations }))
}
