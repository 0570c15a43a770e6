use axum::http::StatusCode;
use axum_test::TestServer;
use mission_log::api::create_router;
use mission_log::db::Database;
use mission_log::models::*;
use serde_json::{json, Value};

fn setup() -> (TestServer, Database) {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let server = TestServer::new(create_router(db.clone())).expect("Failed to create test server");
    (server, db)
}

async fn create_test_scientist(server: &TestServer, name: &str) -> ScientistSummary {
    server
        .post("/scientists")
        .json(&CreateScientistInput {
            name: name.to_string(),
            field_of_study: "Astrobiology".to_string(),
            avatar: None,
        })
        .await
        .json::<ScientistSummary>()
}

// Planets have no create endpoint, so tests seed them through the database.
fn create_test_planet(db: &Database, name: &str) -> Planet {
    db.create_planet(CreatePlanetInput {
        name: Some(name.to_string()),
        distance_from_earth: Some("225 million km".to_string()),
        nearest_star: Some("Sun".to_string()),
        image: None,
    })
    .expect("Failed to create planet")
}

mod scientists_collection {
    use super::*;

    #[tokio::test]
    async fn returns_empty_list_when_no_scientists_exist() {
        let (server, _db) = setup();

        let response = server.get("/scientists").await;

        response.assert_status_ok();
        let scientists: Vec<ScientistSummary> = response.json();
        assert!(scientists.is_empty());
    }

    #[tokio::test]
    async fn serializes_scientists_without_timestamps_or_missions() {
        let (server, _db) = setup();
        create_test_scientist(&server, "Mae Jemison").await;

        let response = server.get("/scientists").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let scientist = &body.as_array().unwrap()[0];
        assert_eq!(scientist["name"], "Mae Jemison");
        let keys = scientist.as_object().unwrap();
        assert!(!keys.contains_key("created_at"));
        assert!(!keys.contains_key("updated_at"));
        assert!(!keys.contains_key("missions"));
    }

    #[tokio::test]
    async fn creates_a_scientist_with_valid_fields() {
        let (server, _db) = setup();

        let response = server
            .post("/scientists")
            .json(&CreateScientistInput {
                name: "Mae Jemison".to_string(),
                field_of_study: "Astrobiology".to_string(),
                avatar: Some("https://example.com/mae.png".to_string()),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let created: ScientistSummary = response.json();
        assert!(created.id > 0);
        assert_eq!(created.name, "Mae Jemison");

        // The record is retrievable under its new id
        let response = server.get(&format!("/scientists/{}", created.id)).await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn rejects_a_duplicate_name() {
        let (server, _db) = setup();
        create_test_scientist(&server, "Mae Jemison").await;

        let response = server
            .post("/scientists")
            .json(&CreateScientistInput {
                name: "Mae Jemison".to_string(),
                field_of_study: "Geology".to_string(),
                avatar: None,
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn rejects_a_missing_required_field() {
        let (server, _db) = setup();

        let response = server
            .post("/scientists")
            .json(&json!({ "name": "Solo" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_an_empty_name() {
        let (server, _db) = setup();

        let response = server
            .post("/scientists")
            .json(&CreateScientistInput {
                name: String::new(),
                field_of_study: "Astrobiology".to_string(),
                avatar: None,
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

mod scientist_item {
    use super::*;

    #[tokio::test]
    async fn returns_404_for_an_unknown_id() {
        let (server, _db) = setup();

        let response = server.get("/scientists/999").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "Scientist not found");
    }

    #[tokio::test]
    async fn includes_planets_reached_through_missions() {
        let (server, db) = setup();
        let scientist = create_test_scientist(&server, "Mae Jemison").await;
        let mars = create_test_planet(&db, "Mars");
        let europa = create_test_planet(&db, "Europa");

        for planet_id in [mars.id, europa.id] {
            server
                .post("/missions")
                .json(&CreateMissionInput {
                    name: "Survey".to_string(),
                    scientist_id: scientist.id,
                    planet_id,
                })
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server.get(&format!("/scientists/{}", scientist.id)).await;

        response.assert_status_ok();
        let detail: ScientistWithPlanets = response.json();
        assert_eq!(detail.scientist.name, "Mae Jemison");
        assert_eq!(detail.planets.len(), 2);
        assert_eq!(detail.planets[0].name.as_deref(), Some("Mars"));
        assert_eq!(detail.planets[1].name.as_deref(), Some("Europa"));
    }

    #[tokio::test]
    async fn patch_updates_only_the_supplied_fields() {
        let (server, _db) = setup();
        let scientist = create_test_scientist(&server, "Mae Jemison").await;

        let response = server
            .patch(&format!("/scientists/{}", scientist.id))
            .json(&json!({ "field_of_study": "Geology" }))
            .await;

        response.assert_status(StatusCode::ACCEPTED);
        let updated: ScientistSummary = response.json();
        assert_eq!(updated.name, "Mae Jemison");
        assert_eq!(updated.field_of_study, "Geology");

        let detail: ScientistWithPlanets = server
            .get(&format!("/scientists/{}", scientist.id))
            .await
            .json();
        assert_eq!(detail.scientist.name, "Mae Jemison");
        assert_eq!(detail.scientist.field_of_study, "Geology");
    }

    #[tokio::test]
    async fn patch_returns_404_for_an_unknown_id() {
        let (server, _db) = setup();

        let response = server
            .patch("/scientists/999")
            .json(&json!({ "name": "Nobody" }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn patch_rejects_an_empty_name() {
        let (server, _db) = setup();
        let scientist = create_test_scientist(&server, "Mae Jemison").await;

        let response = server
            .patch(&format!("/scientists/{}", scientist.id))
            .json(&json!({ "name": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_cascades_to_missions_but_leaves_planets() {
        let (server, db) = setup();
        let scientist = create_test_scientist(&server, "Mae Jemison").await;
        let mars = create_test_planet(&db, "Mars");

        server
            .post("/missions")
            .json(&CreateMissionInput {
                name: "Mars Survey".to_string(),
                scientist_id: scientist.id,
                planet_id: mars.id,
            })
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.delete(&format!("/scientists/{}", scientist.id)).await;

        response.assert_status(StatusCode::ACCEPTED);
        let body: Value = response.json();
        assert_eq!(body["message"], "Scientist was deleted");

        // Missions are gone, the planet survives
        let missions = db
            .get_missions_by_scientist(scientist.id)
            .expect("Query failed");
        assert!(missions.is_empty());

        let planets: Vec<PlanetSummary> = server.get("/planets").await.json();
        assert_eq!(planets.len(), 1);
    }

    #[tokio::test]
    async fn delete_returns_404_the_second_time() {
        let (server, _db) = setup();
        let scientist = create_test_scientist(&server, "Mae Jemison").await;

        let path = format!("/scientists/{}", scientist.id);
        server.delete(&path).await.assert_status(StatusCode::ACCEPTED);
        server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
    }
}

mod planets_collection {
    use super::*;

    #[tokio::test]
    async fn serializes_planets_without_timestamps_or_missions() {
        let (server, db) = setup();
        create_test_planet(&db, "Mars");

        let response = server.get("/planets").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let planet = &body.as_array().unwrap()[0];
        assert_eq!(planet["name"], "Mars");
        let keys = planet.as_object().unwrap();
        assert!(!keys.contains_key("created_at"));
        assert!(!keys.contains_key("updated_at"));
        assert!(!keys.contains_key("missions"));
    }

    #[tokio::test]
    async fn returns_404_for_an_unknown_planet() {
        let (server, _db) = setup();

        let response = server.get("/planets/999").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn includes_scientists_with_missions_to_the_planet() {
        let (server, db) = setup();
        let mars = create_test_planet(&db, "Mars");
        let scientist = create_test_scientist(&server, "Mae Jemison").await;

        server
            .post("/missions")
            .json(&CreateMissionInput {
                name: "Mars Survey".to_string(),
                scientist_id: scientist.id,
                planet_id: mars.id,
            })
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.get(&format!("/planets/{}", mars.id)).await;

        response.assert_status_ok();
        let detail: PlanetWithScientists = response.json();
        assert_eq!(detail.scientists.len(), 1);
        assert_eq!(detail.scientists[0].name, "Mae Jemison");
    }
}

mod mission_creation {
    use super::*;

    #[tokio::test]
    async fn returns_the_destination_planet() {
        let (server, db) = setup();
        let scientist = create_test_scientist(&server, "Mae Jemison").await;
        create_test_planet(&db, "Europa");
        let mars = create_test_planet(&db, "Mars");

        let response = server
            .post("/missions")
            .json(&CreateMissionInput {
                name: "Mars Survey".to_string(),
                scientist_id: scientist.id,
                planet_id: mars.id,
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let planet: PlanetSummary = response.json();
        assert_eq!(planet.id, mars.id);
        assert_eq!(planet.name.as_deref(), Some("Mars"));
    }

    #[tokio::test]
    async fn rejects_a_nonexistent_planet() {
        let (server, _db) = setup();
        let scientist = create_test_scientist(&server, "Mae Jemison").await;

        let response = server
            .post("/missions")
            .json(&CreateMissionInput {
                name: "Nowhere Survey".to_string(),
                scientist_id: scientist.id,
                planet_id: 999,
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "that planet does not exist");
    }

    #[tokio::test]
    async fn rejects_a_nonexistent_scientist() {
        let (server, db) = setup();
        let mars = create_test_planet(&db, "Mars");

        let response = server
            .post("/missions")
            .json(&CreateMissionInput {
                name: "Ghost Survey".to_string(),
                scientist_id: 999,
                planet_id: mars.id,
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "that scientist does not exist");
    }

    #[tokio::test]
    async fn rejects_a_missing_name() {
        let (server, db) = setup();
        let scientist = create_test_scientist(&server, "Mae Jemison").await;
        let mars = create_test_planet(&db, "Mars");

        let response = server
            .post("/missions")
            .json(&json!({ "scientist_id": scientist.id, "planet_id": mars.id }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let (server, _db) = setup();

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
    }
}
