//! Scripted operator sessions through the whole route table.

// Integration tests use unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::unwrap_used, clippy::expect_used)]

use chessmaker::cli::{self, AppContext, HOME};
use chessmaker::models::{EntityId, Gender, Player, Tournament};
use chessmaker::storage::{DocumentStore, JsonFileStore, MemoryStore, Repository};
use chessmaker::ui::ScriptedConsole;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn run(store: Arc<dyn DocumentStore>, inputs: &[&str]) -> AppContext<ScriptedConsole> {
    let console = ScriptedConsole::new(inputs.iter().copied());
    let mut ctx = AppContext::open(store, console).unwrap().with_clock(fixed_now);
    cli::routes().navigate(&mut ctx, HOME).unwrap();
    ctx
}

fn file_store(path: &Path) -> Arc<dyn DocumentStore> {
    Arc::new(JsonFileStore::open(path).unwrap())
}

const ADD_PLAYERS: &[&str] = &[
    "1", // Gérer les joueurs
    "3", "Judit", "Polgar", "8", "1976", "7", "23", "2",
    "3", "Hou", "Yifan", "3", "1994", "2", "27", "2",
    "3", "Magnus", "Carlsen", "1", "1990", "11", "30", "1",
    "3", "Garry", "Kasparov", "2", "1963", "4", "13", "1",
    "5", // Retour
];

#[test]
fn test_full_tournament_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");

    let mut inputs = ADD_PLAYERS.to_vec();
    inputs.extend([
        "2", // Gérer les tournois
        // Create: Rapid, 4 players, 2 rounds, each pick is the first left.
        "2", "Open", "Paris", "3", "4", "2", "1", "1", "1", "1",
        // Round 1: Polgar beats Yifan, Carlsen and Kasparov draw.
        "3", "1", "1", "3",
        // Round 2: Yifan beats Polgar, Carlsen beats Kasparov, then close.
        "3", "1", "2", "1", "2024", "5", "3",
        // Nothing pending any more.
        "1", "",
        // Report.
        "4", "1", "",
        "5", "3",
    ]);

    let ctx = run(file_store(&path), &inputs);
    assert_eq!(ctx.console.remaining(), 0);

    let transcript = ctx.console.transcript();
    assert!(transcript.contains("RAPPORT DU TOURNOI"));
    assert!(transcript.contains("Liste des joueurs du tournoi: Judit Polgar | Hou Yifan | Magnus Carlsen | Garry Kasparov"));
    assert!(transcript.contains("\t1. Magnus Carlsen : 1.5"));
    assert!(transcript.contains("\t4. Garry Kasparov : 0.5"));

    // Everything was written back to the file.
    let store = file_store(&path);
    let players = Repository::<Player>::open(Arc::clone(&store)).unwrap();
    let tournaments = Repository::<Tournament>::open(store).unwrap();
    assert_eq!(players.len(), 4);
    assert_eq!(players.search_by_id(EntityId::new(3)).unwrap().sexe, Gender::Male);

    let tournament = tournaments.search_by_id(EntityId::new(1)).unwrap();
    assert_eq!(tournament.end_date, NaiveDate::from_ymd_opt(2024, 5, 3));
    assert_eq!(tournament.players.len(), 4);
    assert!(tournament.rounds.iter().all(|round| round.end_date == Some(fixed_now())));
    let round_2 = &tournament.rounds[1];
    assert_eq!(round_2.name, "Round2");
    assert_eq!(round_2.matchs[0].score_1, 0.0);
    assert_eq!(round_2.matchs[0].score_2, 1.0);
    assert_eq!(tournament.rounds[0].matchs[1].score_1, 0.5);
}

#[test]
fn test_players_listed_by_name_and_rank() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let mut inputs = ADD_PLAYERS.to_vec();
    inputs.extend(["1", "1", "", "2", "", "5", "3"]);

    let ctx = run(store, &inputs);
    let transcript = ctx.console.transcript();

    let by_name = transcript.find("JOUEURS PAR NOM").unwrap();
    let by_rank = transcript.find("JOUEURS PAR CLASSEMENT").unwrap();
    let names = &transcript[by_name..by_rank];
    let carlsen = names.find("Magnus Carlsen").unwrap();
    assert!(carlsen < names.find("Garry Kasparov").unwrap());
    assert!(names.find("Garry Kasparov").unwrap() < names.find("Judit Polgar").unwrap());
    assert!(names.find("Judit Polgar").unwrap() < names.find("Hou Yifan").unwrap());

    let ranks = &transcript[by_rank..];
    assert!(ranks.find("(rank 1)").unwrap() < ranks.find("(rank 2)").unwrap());
    assert!(ranks.find("(rank 3)").unwrap() < ranks.find("(rank 8)").unwrap());
}

#[test]
fn test_update_rank_replaces_saved_player() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    let mut inputs = ADD_PLAYERS.to_vec();
    inputs.extend(["1", "4", "1", "x", "5", "5", "3"]);

    let ctx = run(file_store(&path), &inputs);
    assert_eq!(ctx.players.search_by_id(EntityId::new(1)).unwrap().rank, 5);

    let store = JsonFileStore::open(&path).unwrap();
    assert_eq!(store.count("players").unwrap(), 4);
    let document = store.get("players", EntityId::new(1)).unwrap().unwrap();
    assert_eq!(document["rank"], serde_json::json!(5));
    assert_eq!(document["firstname"], serde_json::json!("Judit"));
}

#[test]
fn test_negative_rank_is_asked_again() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let inputs = [
        "1", "3", "Judit", "Polgar", "-1", "8", "1976", "7", "23", "2", "5", "3",
    ];

    let ctx = run(store, &inputs);
    let transcript = ctx.console.transcript();
    assert!(!transcript.contains("ERREUR"));
    assert_eq!(ctx.console.prompt_count("Valeur spécifiée incorrecte"), 1);
    assert_eq!(ctx.players.search_by_id(EntityId::new(1)).unwrap().rank, 8);
    assert_eq!(ctx.console.remaining(), 0);
}

#[test]
fn test_failed_handler_returns_home() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    // No player registered, so the tournament form cannot pick 2 of them.
    let inputs = ["2", "2", "Open", "Paris", "1", "2", "1", "", "3"];

    let ctx = run(store, &inputs);
    assert!(ctx.console.transcript().contains("ERREUR"));
    assert!(ctx.tournaments.is_empty());
    assert_eq!(ctx.console.remaining(), 0);
}

#[test]
fn test_empty_lists_show_notices() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let inputs = ["1", "4", "", "5", "2", "3", "", "4", "", "5", "3"];

    let ctx = run(store, &inputs);
    let transcript = ctx.console.transcript();
    assert!(transcript.contains("Aucun joueur enregistré"));
    assert!(transcript.contains("Aucun tournoi en cours"));
    assert!(transcript.contains("Aucun tournoi enregistré"));
    assert_eq!(ctx.console.remaining(), 0);
}

#[test]
fn test_input_end_stops_session() {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let ctx = run(store, &["1", "3", "Judit"]);
    assert!(ctx.players.is_empty());
}
