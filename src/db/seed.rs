//! Sample data for a fresh install.

use crate::db::Database;
use crate::error::Result;
use crate::models::{CreateMissionInput, CreatePlanetInput, CreateScientistInput};

/// Populate an empty database with a handful of planets, scientists, and
/// missions. Planets have no create endpoint, so this is the only ingestion
/// path for them. Does nothing if planets already exist.
pub fn run(db: &Database) -> Result<()> {
    if !db.list_planets()?.is_empty() {
        tracing::info!("Database already seeded, skipping");
        return Ok(());
    }

    let planets = [
        ("Mars", "225 million km", "Sun"),
        ("Europa", "628 million km", "Sun"),
        ("Proxima Centauri b", "4.2 light years", "Proxima Centauri"),
        ("Kepler-452b", "1,800 light years", "Kepler-452"),
    ];

    let mut planet_ids = Vec::new();
    for (name, distance, star) in planets {
        let planet = db.create_planet(CreatePlanetInput {
            name: Some(name.to_string()),
            distance_from_earth: Some(distance.to_string()),
            nearest_star: Some(star.to_string()),
            image: None,
        })?;
        planet_ids.push(planet.id);
    }

    let scientists = [
        ("Mae Jemison", "Astrobiology"),
        ("Carl Sagan", "Planetary Science"),
        ("Vera Rubin", "Galactic Dynamics"),
    ];

    let mut scientist_ids = Vec::new();
    for (name, field) in scientists {
        let scientist = db.create_scientist(CreateScientistInput {
            name: name.to_string(),
            field_of_study: field.to_string(),
            avatar: None,
        })?;
        scientist_ids.push(scientist.id);
    }

    let missions = [
        ("Mars Survey", scientist_ids[0], planet_ids[0]),
        ("Europa Ice Core", scientist_ids[0], planet_ids[1]),
        ("Proxima Flyby", scientist_ids[1], planet_ids[2]),
        ("Kepler Transit Study", scientist_ids[2], planet_ids[3]),
    ];

    for (name, scientist_id, planet_id) in missions {
        db.create_mission(CreateMissionInput {
            name: name.to_string(),
            scientist_id,
            planet_id,
        })?;
    }

    tracing::info!(
        "Seeded {} planets, {} scientists, {} missions",
        planet_ids.len(),
        scientist_ids.len(),
        missions.len()
    );

    Ok(())
}
