use actix_web::{web, Scope};

use crate::handlers::{health_check, json_config, recommendations_config};

/// Configure all routes for the API
pub fn api_routes() -> Scope {
    web::scope("/api")
        .app_data(json_config())
        .service(health_check)
        .configure(recommendations_config)
}
