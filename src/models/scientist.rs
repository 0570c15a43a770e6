use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::planet::PlanetSummary;

/// A scientist who undertakes missions to planets.
///
/// Names are unique across the registry. Timestamps are managed by the
/// store and never appear in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scientist {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The serialized form used in list and create responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScientistSummary {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
    pub avatar: Option<String>,
}

impl From<Scientist> for ScientistSummary {
    fn from(s: Scientist) -> Self {
        Self {
            id: s.id,
            name: s.name,
            field_of_study: s.field_of_study,
            avatar: s.avatar,
        }
    }
}

/// A scientist with the planets their missions visit, used for detail
/// responses. The list holds one entry per mission, so a planet visited
/// twice appears twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScientistWithPlanets {
    #[serde(flatten)]
    pub scientist: ScientistSummary,
    pub planets: Vec<PlanetSummary>,
}

/// Input for creating a new scientist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScientistInput {
    pub name: String,
    pub field_of_study: String,
    pub avatar: Option<String>,
}

/// Input for updating an existing scientist. All fields are optional for
/// partial updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateScientistInput {
    pub name: Option<String>,
    pub field_of_study: Option<String>,
    pub avatar: Option<String>,
}
