use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::api::ApiJson;
use crate::db::Database;
use crate::error::Error;
use crate::models::*;

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Scientists
// ============================================================

pub async fn list_scientists(
    State(db): State<Database>,
) -> Result<Json<Vec<ScientistSummary>>, Error> {
    let scientists = db.list_scientists()?;
    Ok(Json(scientists.into_iter().map(Into::into).collect()))
}

pub async fn create_scientist(
    State(db): State<Database>,
    ApiJson(input): ApiJson<CreateScientistInput>,
) -> Result<(StatusCode, Json<ScientistSummary>), Error> {
    let scientist = db.create_scientist(input)?;
    Ok((StatusCode::CREATED, Json(scientist.into())))
}

pub async fn get_scientist(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<ScientistWithPlanets>, Error> {
    db.get_scientist_with_planets(id)?
        .map(Json)
        .ok_or(Error::NotFound("Scientist not found"))
}

pub async fn update_scientist(
    State(db): State<Database>,
    Path(id): Path<i64>,
    ApiJson(input): ApiJson<UpdateScientistInput>,
) -> Result<(StatusCode, Json<ScientistSummary>), Error> {
    db.update_scientist(id, input)?
        .map(|s| (StatusCode::ACCEPTED, Json(s.into())))
        .ok_or(Error::NotFound("Scientist not found"))
}

pub async fn delete_scientist(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<serde_json::Value>), Error> {
    if db.delete_scientist(id)? {
        Ok((
            StatusCode::ACCEPTED,
            Json(serde_json::json!({ "message": "Scientist was deleted" })),
        ))
    } else {
        Err(Error::NotFound("Scientist not found"))
    }
}

// ============================================================
// Planets
// ============================================================

pub async fn list_planets(State(db): State<Database>) -> Result<Json<Vec<PlanetSummary>>, Error> {
    let planets = db.list_planets()?;
    Ok(Json(planets.into_iter().map(Into::into).collect()))
}

pub async fn get_planet(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Json<PlanetWithScientists>, Error> {
    db.get_planet_with_scientists(id)?
        .map(Json)
        .ok_or(Error::NotFound("Planet not found"))
}

// ============================================================
// Missions
// ============================================================

/// A successful mission creation echoes the destination planet's serialized
/// form, not the mission itself.
pub async fn create_mission(
    State(db): State<Database>,
    ApiJson(input): ApiJson<CreateMissionInput>,
) -> Result<(StatusCode, Json<PlanetSummary>), Error> {
    let (_mission, planet) = db.create_mission(input)?;
    Ok((StatusCode::CREATED, Json(planet.into())))
}
