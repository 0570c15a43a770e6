mod schema;
pub mod seed;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use chrono::Utc;
use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::models::*;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent).context("Failed to create data directory")?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "mission-log")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("mission_log.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        Ok(schema::run_migrations(&conn)?)
    }

    // ============================================================
    // Scientist operations
    // ============================================================

    pub fn list_scientists(&self) -> Result<Vec<Scientist>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, name, field_of_study, avatar, created_at, updated_at
             FROM scientists ORDER BY id",
        )?;

        let scientists = stmt
            .query_map([], |row| {
                Ok(Scientist {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    field_of_study: row.get(2)?,
                    avatar: row.get(3)?,
                    created_at: parse_datetime(row.get::<_, String>(4)?),
                    updated_at: parse_datetime(row.get::<_, String>(5)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(scientists)
    }

    pub fn get_scientist(&self, id: i64) -> Result<Option<Scientist>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, name, field_of_study, avatar, created_at, updated_at
             FROM scientists WHERE id = ?",
        )?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Scientist {
                id: row.get(0)?,
                name: row.get(1)?,
                field_of_study: row.get(2)?,
                avatar: row.get(3)?,
                created_at: parse_datetime(row.get::<_, String>(4)?),
                updated_at: parse_datetime(row.get::<_, String>(5)?),
            }))
        } else {
            Ok(None)
        }
    }

    pub fn get_scientist_with_planets(&self, id: i64) -> Result<Option<ScientistWithPlanets>> {
        let scientist = match self.get_scientist(id)? {
            Some(s) => s,
            None => return Ok(None),
        };

        let planets = self.planets_for_scientist(id)?;

        Ok(Some(ScientistWithPlanets {
            scientist: scientist.into(),
            planets: planets.into_iter().map(Into::into).collect(),
        }))
    }

    pub fn create_scientist(&self, input: CreateScientistInput) -> Result<Scientist> {
        if input.name.is_empty() {
            return Err(Error::Validation("scientist must have a name".into()));
        }
        if input.field_of_study.is_empty() {
            return Err(Error::Validation(
                "scientist must have a field of study".into(),
            ));
        }

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();

        conn.execute(
            "INSERT INTO scientists (name, field_of_study, avatar, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                &input.name,
                &input.field_of_study,
                &input.avatar,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )
        .map_err(|e| unique_violation(e, "a scientist with that name already exists"))?;

        Ok(Scientist {
            id: conn.last_insert_rowid(),
            name: input.name,
            field_of_study: input.field_of_study,
            avatar: input.avatar,
            created_at: now,
            updated_at: now,
        })
    }

    /// Partial update. Supplied fields overwrite the stored row; absent
    /// fields keep their current value.
    pub fn update_scientist(
        &self,
        id: i64,
        input: UpdateScientistInput,
    ) -> Result<Option<Scientist>> {
        let Some(existing) = self.get_scientist(id)? else {
            return Ok(None);
        };

        if matches!(&input.name, Some(name) if name.is_empty()) {
            return Err(Error::Validation("scientist must have a name".into()));
        }
        if matches!(&input.field_of_study, Some(field) if field.is_empty()) {
            return Err(Error::Validation(
                "scientist must have a field of study".into(),
            ));
        }

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        let name = input.name.unwrap_or(existing.name);
        let field_of_study = input.field_of_study.unwrap_or(existing.field_of_study);
        let avatar = input.avatar.or(existing.avatar);

        conn.execute(
            "UPDATE scientists SET name = ?, field_of_study = ?, avatar = ?, updated_at = ? WHERE id = ?",
            (&name, &field_of_study, &avatar, now.to_rfc3339(), id),
        )
        .map_err(|e| unique_violation(e, "a scientist with that name already exists"))?;

        Ok(Some(Scientist {
            id,
            name,
            field_of_study,
            avatar,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    /// Delete a scientist and all their missions in one transaction.
    /// Planets referenced by those missions are untouched.
    pub fn delete_scientist(&self, id: i64) -> Result<bool> {
        let mut conn = self.conn.lock().expect("database lock poisoned");
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM missions WHERE scientist_id = ?", [id])?;
        let rows = tx.execute("DELETE FROM scientists WHERE id = ?", [id])?;
        tx.commit()?;
        Ok(rows > 0)
    }

    // ============================================================
    // Planet operations
    // ============================================================

    pub fn list_planets(&self) -> Result<Vec<Planet>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, name, distance_from_earth, nearest_star, image, created_at, updated_at
             FROM planets ORDER BY id",
        )?;

        let planets = stmt
            .query_map([], |row| {
                Ok(Planet {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    distance_from_earth: row.get(2)?,
                    nearest_star: row.get(3)?,
                    image: row.get(4)?,
                    created_at: parse_datetime(row.get::<_, String>(5)?),
                    updated_at: parse_datetime(row.get::<_, String>(6)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(planets)
    }

    pub fn get_planet(&self, id: i64) -> Result<Option<Planet>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, name, distance_from_earth, nearest_star, image, created_at, updated_at
             FROM planets WHERE id = ?",
        )?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Planet {
                id: row.get(0)?,
                name: row.get(1)?,
                distance_from_earth: row.get(2)?,
                nearest_star: row.get(3)?,
                image: row.get(4)?,
                created_at: parse_datetime(row.get::<_, String>(5)?),
                updated_at: parse_datetime(row.get::<_, String>(6)?),
            }))
        } else {
            Ok(None)
        }
    }

    pub fn get_planet_with_scientists(&self, id: i64) -> Result<Option<PlanetWithScientists>> {
        let planet = match self.get_planet(id)? {
            Some(p) => p,
            None => return Ok(None),
        };

        let scientists = self.scientists_for_planet(id)?;

        Ok(Some(PlanetWithScientists {
            planet: planet.into(),
            scientists: scientists.into_iter().map(Into::into).collect(),
        }))
    }

    /// Planets are reference data with no create endpoint; this exists for
    /// seeding and tests.
    pub fn create_planet(&self, input: CreatePlanetInput) -> Result<Planet> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();

        conn.execute(
            "INSERT INTO planets (name, distance_from_earth, nearest_star, image, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                &input.name,
                &input.distance_from_earth,
                &input.nearest_star,
                &input.image,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(Planet {
            id: conn.last_insert_rowid(),
            name: input.name,
            distance_from_earth: input.distance_from_earth,
            nearest_star: input.nearest_star,
            image: input.image,
            created_at: now,
            updated_at: now,
        })
    }

    // ============================================================
    // Mission operations
    // ============================================================

    /// Create a mission after checking both referenced rows exist.
    ///
    /// Returns the mission together with its destination planet, which the
    /// create endpoint echoes back.
    pub fn create_mission(&self, input: CreateMissionInput) -> Result<(Mission, Planet)> {
        if input.name.is_empty() {
            return Err(Error::Validation("mission must have a name".into()));
        }

        self.get_scientist(input.scientist_id)?
            .ok_or_else(|| Error::Validation("that scientist does not exist".into()))?;
        let planet = self
            .get_planet(input.planet_id)?
            .ok_or_else(|| Error::Validation("that planet does not exist".into()))?;

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();

        conn.execute(
            "INSERT INTO missions (name, scientist_id, planet_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                &input.name,
                input.scientist_id,
                input.planet_id,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        let mission = Mission {
            id: conn.last_insert_rowid(),
            name: input.name,
            scientist_id: input.scientist_id,
            planet_id: input.planet_id,
            created_at: now,
            updated_at: now,
        };

        Ok((mission, planet))
    }

    pub fn get_missions_by_scientist(&self, scientist_id: i64) -> Result<Vec<Mission>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, name, scientist_id, planet_id, created_at, updated_at
             FROM missions WHERE scientist_id = ? ORDER BY id",
        )?;

        let missions = stmt
            .query_map([scientist_id], |row| {
                Ok(Mission {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    scientist_id: row.get(2)?,
                    planet_id: row.get(3)?,
                    created_at: parse_datetime(row.get::<_, String>(4)?),
                    updated_at: parse_datetime(row.get::<_, String>(5)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(missions)
    }

    // ============================================================
    // Derived joins
    // ============================================================

    /// Planets reached through a scientist's missions, one row per mission.
    /// A planet visited twice appears twice.
    pub fn planets_for_scientist(&self, scientist_id: i64) -> Result<Vec<Planet>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT p.id, p.name, p.distance_from_earth, p.nearest_star, p.image, p.created_at, p.updated_at
             FROM planets p
             JOIN missions m ON m.planet_id = p.id
             WHERE m.scientist_id = ? ORDER BY m.id",
        )?;

        let planets = stmt
            .query_map([scientist_id], |row| {
                Ok(Planet {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    distance_from_earth: row.get(2)?,
                    nearest_star: row.get(3)?,
                    image: row.get(4)?,
                    created_at: parse_datetime(row.get::<_, String>(5)?),
                    updated_at: parse_datetime(row.get::<_, String>(6)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(planets)
    }

    /// Scientists whose missions target a planet, one row per mission.
    pub fn scientists_for_planet(&self, planet_id: i64) -> Result<Vec<Scientist>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT s.id, s.name, s.field_of_study, s.avatar, s.created_at, s.updated_at
             FROM scientists s
             JOIN missions m ON m.scientist_id = s.id
             WHERE m.planet_id = ? ORDER BY m.id",
        )?;

        let scientists = stmt
            .query_map([planet_id], |row| {
                Ok(Scientist {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    field_of_study: row.get(2)?,
                    avatar: row.get(3)?,
                    created_at: parse_datetime(row.get::<_, String>(4)?),
                    updated_at: parse_datetime(row.get::<_, String>(5)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(scientists)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn unique_violation(err: rusqlite::Error, message: &str) -> Error {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::Conflict(message.to_string())
        }
        _ => Error::Db(err),
    }
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
