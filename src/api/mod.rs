mod handlers;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::Database;
use crate::error::Error;

pub fn create_router(db: Database) -> Router {
    Router::new()
        // Scientists
        .route("/scientists", get(handlers::list_scientists))
        .route("/scientists", post(handlers::create_scientist))
        .route("/scientists/{id}", get(handlers::get_scientist))
        .route("/scientists/{id}", patch(handlers::update_scientist))
        .route("/scientists/{id}", delete(handlers::delete_scientist))
        // Planets
        .route("/planets", get(handlers::list_planets))
        .route("/planets/{id}", get(handlers::get_planet))
        // Missions
        .route("/missions", post(handlers::create_mission))
        // Health
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}

/// Request-body extractor that reports malformed or incomplete JSON as a
/// 400 validation error instead of axum's default 422.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(Error::Validation(rejection.body_text())),
        }
    }
}
