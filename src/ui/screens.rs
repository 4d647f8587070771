//! Concrete menus, forms and reports of the application.

use super::{Field, Form, FormData, Menu, View};
use crate::models::{
    DRAW, EntityId, Gender, LOSS, Player, Round, Tournament, TournamentType, WIN,
};
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::fmt;

/// Values that fit the `u32` entity fields (rank, player and round counts).
const U32_RANGE: std::ops::RangeInclusive<i64> = 0..=4_294_967_295;

/// Years a date field accepts.
const YEAR_RANGE: std::ops::RangeInclusive<i64> = 1..=9999;

/// Main menu, returning a route.
#[must_use]
pub fn main_menu() -> Menu<String> {
    route_menu(
        "ChessMaker",
        &[
            ("Gérer les joueurs", "/players"),
            ("Gérer les tournois", "/tournaments"),
            ("Quitter", "/quit"),
        ],
    )
}

/// Player management menu, returning a route.
#[must_use]
pub fn players_menu() -> Menu<String> {
    route_menu(
        "Gestion des joueurs",
        &[
            ("Lister les joueurs par nom", "/players/list/by-name"),
            ("Lister les joueurs par classement", "/players/list/by-rank"),
            ("Déclarer un joueur", "/player/add"),
            ("Mettre à jour le classement d'un joueur", "/players/update-rank"),
            ("Retour", "/"),
        ],
    )
}

/// Tournament management menu, returning a route.
#[must_use]
pub fn tournaments_menu() -> Menu<String> {
    route_menu(
        "Gestion des tournois",
        &[
            ("Liste des tournois en cours", "/tournaments/list/current"),
            ("Créer un nouveau tournoi", "/tournament/add"),
            ("Reprendre un tournoi", "/tournaments/list/pending"),
            ("Rapport des tournois", "/tournaments/reports"),
            ("Retour", "/"),
        ],
    )
}

fn route_menu(title: &str, routes: &[(&str, &str)]) -> Menu<String> {
    Menu::new(
        title,
        routes
            .iter()
            .map(|(label, route)| ((*label).to_string(), (*route).to_string()))
            .collect(),
    )
}

/// Untitled sub-menu listing enum variants by name.
///
/// The value of each choice is the variant's stored form.
#[must_use]
pub fn enum_menu<E: fmt::Display>(variants: &[E]) -> Menu<Value> {
    Menu::new(
        "",
        variants
            .iter()
            .map(|variant| (variant.to_string(), Value::from(variant.to_string())))
            .collect(),
    )
}

/// New player form. Produces the fields of a [`Player`] without id.
#[must_use]
pub fn player_form() -> Form {
    Form::new(
        "Nouveau Joueur",
        vec![
            Field::text("firstname", "le prénom du joueur"),
            Field::text("lastname", "le nom de famille du joueur"),
            Field::bounded("rank", "le rang du joueur", U32_RANGE),
            Field::bounded("birthdate_year", "l'année de naissance du joueur", YEAR_RANGE),
            Field::bounded("birthdate_month", "le mois de naissance du joueur", 1..=12),
            Field::bounded("birthdate_day", "le jour de naissance du joueur", 1..=31),
            Field::choice("sexe", enum_menu(Gender::all())),
        ],
    )
    .with_post_process(|_, mut data| {
        let birthdate = assemble_date(&data, "birthdate")?;
        data.insert("birthdate".to_string(), Value::from(birthdate.to_string()));
        Ok(data)
    })
}

/// New tournament form.
///
/// After the typed fields, the operator picks `number_of_players` players
/// one at a time from `roster`, each pick offering only players not picked
/// yet. `number_of_rounds` rounds are then laid out, the first one begun at
/// `now`.
#[must_use]
pub fn tournament_form(roster: Vec<Player>, now: NaiveDateTime) -> Form {
    Form::new(
        "Formulaire du tournoi",
        vec![
            Field::text("name", "le nom du tournoi"),
            Field::text("location", "le lieu du tournoi"),
            Field::choice("tournament_type", enum_menu(TournamentType::all())),
            Field::bounded("number_of_players", "le nombre de joueurs", U32_RANGE),
            Field::bounded("number_of_rounds", "le nombre de rounds", U32_RANGE),
        ],
    )
    .with_post_process(move |console, mut data| {
        let number_of_players = take_count(&data, "number_of_players")?;
        let number_of_rounds = take_count(&data, "number_of_rounds")?;

        if number_of_players > roster.len() {
            return Err(Error::InvalidInput(format!(
                "{number_of_players} players requested, {} registered",
                roster.len()
            )));
        }

        let mut available = roster.clone();
        let mut picked = Vec::with_capacity(number_of_players);
        for _ in 0..number_of_players {
            let id = pick_player(&available).display(console)?;
            available.retain(|player| player.id != id);
            picked.push(Value::from(id));
        }

        let rounds = (1..=number_of_rounds)
            .map(|n| {
                let round = Round::new(format!("Round{n}"), (n == 1).then_some(now));
                serde_json::to_value(round).map_err(|e| Error::InvalidInput(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        data.insert("players".to_string(), Value::from(picked));
        data.insert("rounds".to_string(), Value::from(rounds));
        data.insert("begin_date".to_string(), datetime_value(now)?);
        Ok(data)
    })
}

/// Rank update form.
#[must_use]
pub fn rank_form() -> Form {
    Form::new(
        "Saisir la nouvelle donnée",
        vec![Field::bounded("rank", "le nouveau classement", U32_RANGE)],
    )
}

/// Tournament closing form, producing `end_date`.
#[must_use]
pub fn closing_form() -> Form {
    Form::new(
        "Clôture du tournoi",
        vec![
            Field::bounded("end_date_year", "l'année de fin du tournoi", YEAR_RANGE),
            Field::bounded("end_date_month", "le mois de fin du tournoi", 1..=12),
            Field::bounded("end_date_day", "le jour de fin du tournoi", 1..=31),
        ],
    )
    .with_post_process(|_, mut data| {
        let end_date = assemble_date(&data, "end_date")?;
        data.insert("end_date".to_string(), Value::from(end_date.to_string()));
        Ok(data)
    })
}

/// Player picker, returning the player id.
#[must_use]
pub fn pick_player(players: &[Player]) -> Menu<EntityId> {
    Menu::new(
        "Choisissez un joueur",
        players
            .iter()
            .map(|player| (player.to_string(), player.id))
            .collect(),
    )
}

/// Tournament picker, returning the tournament id.
#[must_use]
pub fn pick_tournament(title: &str, tournaments: &[Tournament]) -> Menu<EntityId> {
    Menu::new(
        title,
        tournaments
            .iter()
            .map(|tournament| (tournament.name.clone(), tournament.id))
            .collect(),
    )
}

/// Match result picker, returning the first player's score.
#[must_use]
pub fn pick_winner(player_1: &Player, player_2: &Player) -> Menu<f64> {
    Menu::new(
        "Choix du gagnant",
        vec![
            (format!("{} a gagné", player_1.full_name()), WIN),
            (format!("{} a gagné", player_2.full_name()), LOSS),
            ("égalité".to_string(), DRAW),
        ],
    )
}

/// Blocking list of items, one per line.
#[must_use]
pub fn list_view<T: fmt::Display>(title: &str, items: &[T]) -> View {
    let content = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    View::new(title, content).blocking()
}

/// Blocking one-line notice.
#[must_use]
pub fn notice(title: &str, message: &str) -> View {
    View::new(title, message).blocking()
}

/// Blocking tournament report.
///
/// `names` resolves a player id to the name shown in the roster and the
/// standings.
pub fn tournament_report<F>(tournament: &Tournament, names: F) -> Result<View>
where
    F: Fn(EntityId) -> Result<String>,
{
    let roster = tournament
        .players
        .iter()
        .map(|&id| names(id))
        .collect::<Result<Vec<_>>>()?;

    let mut report = format!("Nom du tournoi : {}\n", tournament.name);
    report.push_str(&format!("Liste des joueurs du tournoi: {}\n", roster.join(" | ")));

    for round in &tournament.rounds {
        report.push_str(&round.name);
        report.push('\n');
        for game in &round.matchs {
            report.push_str(&format!("\t{game}\n"));
        }
    }

    report.push_str("Classement\n");
    for (position, (id, score)) in tournament.scores().into_iter().enumerate() {
        report.push_str(&format!("\t{}. {} : {score}\n", position + 1, names(id)?));
    }

    Ok(View::new("Rapport du tournoi", report).blocking())
}

/// Builds a date from `<prefix>_year`, `<prefix>_month` and `<prefix>_day`.
fn assemble_date(data: &FormData, prefix: &str) -> Result<NaiveDate> {
    let year = take_int(data, &format!("{prefix}_year"))?;
    let month = take_int(data, &format!("{prefix}_month"))?;
    let day = take_int(data, &format!("{prefix}_day"))?;

    let date = match (i32::try_from(year), u32::try_from(month), u32::try_from(day)) {
        (Ok(y), Ok(m), Ok(d)) => NaiveDate::from_ymd_opt(y, m, d),
        _ => None,
    };
    date.ok_or_else(|| Error::InvalidInput(format!("{year}-{month}-{day} is not a valid date")))
}

fn take_int(data: &FormData, key: &str) -> Result<i64> {
    data.get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| Error::InvalidInput(format!("missing integer field '{key}'")))
}

fn take_count(data: &FormData, key: &str) -> Result<usize> {
    let value = take_int(data, key)?;
    usize::try_from(value).map_err(|_| Error::InvalidInput(format!("{key} must not be negative")))
}

fn datetime_value(at: NaiveDateTime) -> Result<Value> {
    serde_json::to_value(at).map_err(|e| Error::InvalidInput(e.to_string()))
}
