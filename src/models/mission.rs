use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A mission pairing one scientist with one destination planet.
///
/// Missions are the join entity behind the derived planet and scientist
/// lists. Deleting a scientist deletes their missions; the planets those
/// missions pointed at are untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new mission. Both referenced rows must exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMissionInput {
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
}
