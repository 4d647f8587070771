//! Repository integration tests over the on-disk document store.

// Integration tests use unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::unwrap_used, clippy::expect_used)]

use chessmaker::models::{Entity, EntityId, Fields, Gender, Player, Tournament};
use chessmaker::storage::{DocumentStore, JsonFileStore, Repository};
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn fields(value: Value) -> Fields {
    value.as_object().cloned().unwrap()
}

fn player_fields(firstname: &str, lastname: &str, rank: u32) -> Fields {
    fields(json!({
        "firstname": firstname,
        "lastname": lastname,
        "rank": rank,
        "birthdate": "1990-11-30",
        "sexe": "Male",
    }))
}

fn open_store(path: &Path) -> Arc<dyn DocumentStore> {
    Arc::new(JsonFileStore::open(path).unwrap())
}

#[test]
fn test_unsaved_create_reallocates_first_id() {
    let dir = TempDir::new().unwrap();
    let mut players = Repository::<Player>::open(open_store(&dir.path().join("db.json"))).unwrap();

    let first = players.create(player_fields("A", "B", 10), false).unwrap();
    assert_eq!(first.id, EntityId::new(1));

    let second = players.create(player_fields("C", "D", 20), true).unwrap();
    assert_eq!(second.id, EntityId::new(1));
    assert_eq!(second.firstname, "C");

    assert_eq!(players.next_id().unwrap(), EntityId::new(2));
    assert_eq!(players.all().len(), 1);
}

#[test]
fn test_saved_entities_rehydrate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");

    let saved = {
        let mut players = Repository::<Player>::open(open_store(&path)).unwrap();
        players.create(player_fields("Magnus", "Carlsen", 1), true).unwrap();
        players.create(player_fields("Hou", "Yifan", 3), true).unwrap();
        players.create(player_fields("Unsaved", "Player", 9), false).unwrap();
        players.search(|p| p.id.get() < 3, Entity::id)
    };

    let players = Repository::<Player>::open(open_store(&path)).unwrap();
    assert_eq!(players.len(), 2);
    for player in &saved {
        assert_eq!(players.search_by_id(player.id).unwrap(), player);
    }
    assert_eq!(
        players.search_by_id(EntityId::new(1)).unwrap().birthdate,
        NaiveDate::from_ymd_opt(1990, 11, 30).unwrap()
    );
}

#[test]
fn test_serialize_round_trip() {
    let player = Player {
        id: EntityId::new(4),
        firstname: "Judit".to_string(),
        lastname: "Polgar".to_string(),
        rank: 8,
        birthdate: NaiveDate::from_ymd_opt(1976, 7, 23).unwrap(),
        sexe: Gender::Female,
    };
    assert_eq!(Player::from_fields(player.to_fields().unwrap()).unwrap(), player);
}

#[test]
fn test_tables_share_one_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    let store = open_store(&path);

    let mut players = Repository::<Player>::open(Arc::clone(&store)).unwrap();
    let mut tournaments = Repository::<Tournament>::open(store).unwrap();
    players.create(player_fields("Magnus", "Carlsen", 1), true).unwrap();
    tournaments
        .create(
            fields(json!({
                "name": "Open",
                "location": "Oslo",
                "tournament_type": "Blitz",
                "number_of_players": 0,
                "number_of_rounds": 0,
            })),
            true,
        )
        .unwrap();

    let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["players"]["1"]["lastname"], json!("Carlsen"));
    assert_eq!(raw["tournaments"]["1"]["location"], json!("Oslo"));
    assert_eq!(raw["tournaments"]["1"]["end_date"], Value::Null);
}

#[test]
fn test_upsert_replaces_whole_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    let store = open_store(&path);
    let mut stale = player_fields("Garry", "Kasparov", 1);
    stale.insert("id".to_string(), json!(1));
    stale.insert("club".to_string(), json!("Baku"));
    store
        .upsert("players", EntityId::new(1), Value::Object(stale))
        .unwrap();

    let mut players = Repository::<Player>::open(open_store(&path)).unwrap();
    let mut fields = players.search_by_id(EntityId::new(1)).unwrap().to_fields().unwrap();
    fields.insert("rank".to_string(), json!(2));
    players.create(fields, true).unwrap();

    let reopened = JsonFileStore::open(&path).unwrap();
    let document = reopened.get("players", EntityId::new(1)).unwrap().unwrap();
    assert!(document.get("club").is_none());
    assert_eq!(document["rank"], json!(2));
    assert_eq!(reopened.count("players").unwrap(), 1);
}

#[test]
fn test_ids_follow_numeric_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    let mut players = Repository::<Player>::open(open_store(&path)).unwrap();
    for n in 0..11 {
        players
            .create(player_fields("P", &format!("N{n}"), n), true)
            .unwrap();
    }

    let players = Repository::<Player>::open(open_store(&path)).unwrap();
    assert_eq!(players.next_id().unwrap(), EntityId::new(12));
    let ids: Vec<u64> = players.all().iter().map(|p| p.id.get()).collect();
    assert_eq!(ids, (1..=11).collect::<Vec<_>>());
}

#[test]
fn test_failed_save_does_not_consume_id() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    let mut players = Repository::<Player>::open(open_store(&path)).unwrap();
    players.create(player_fields("Magnus", "Carlsen", 1), true).unwrap();

    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    assert!(players.create(player_fields("Hou", "Yifan", 3), true).is_err());
    assert_eq!(players.next_id().unwrap(), EntityId::new(2));
}
