use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scientist::ScientistSummary;

/// A destination planet.
///
/// Planets are reference data: seeded once, never created or mutated
/// through the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub id: i64,
    pub name: Option<String>,
    pub distance_from_earth: Option<String>,
    pub nearest_star: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The serialized form used in list responses and as the body of a
/// successful mission creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetSummary {
    pub id: i64,
    pub name: Option<String>,
    pub distance_from_earth: Option<String>,
    pub nearest_star: Option<String>,
    pub image: Option<String>,
}

impl From<Planet> for PlanetSummary {
    fn from(p: Planet) -> Self {
        Self {
            id: p.id,
            name: p.name,
            distance_from_earth: p.distance_from_earth,
            nearest_star: p.nearest_star,
            image: p.image,
        }
    }
}

/// Input for seeding a planet. There is no create endpoint for planets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlanetInput {
    pub name: Option<String>,
    pub distance_from_earth: Option<String>,
    pub nearest_star: Option<String>,
    pub image: Option<String>,
}

/// A planet with the scientists whose missions target it, used for detail
/// responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetWithScientists {
    #[serde(flatten)]
    pub planet: PlanetSummary,
    pub scientists: Vec<ScientistSummary>,
}
