//! Tournament handlers.

use super::{AppContext, Navigation, TOURNAMENTS};
use crate::models::{Entity, Player, Tournament};
use crate::ui::{Console, screens};
use crate::{Error, Result};
use chrono::NaiveDate;

/// `/tournament/add`: creates a tournament and saves it.
pub fn add_tournament<C: Console>(ctx: &mut AppContext<C>) -> Result<Navigation> {
    let roster = ctx.players.search(|_| true, Entity::id);
    let data = screens::tournament_form(roster, ctx.now()).display(&mut ctx.console)?;
    let tournament = ctx.tournaments.create(data, true)?;
    tracing::info!(
        id = %tournament.id,
        name = %tournament.name,
        players = tournament.players.len(),
        "Created tournament"
    );
    Ok(Navigation::to(TOURNAMENTS))
}

/// `/tournaments/list/current`: tournaments without an end date.
pub fn list_current<C: Console>(ctx: &mut AppContext<C>) -> Result<Navigation> {
    let pending = ctx.tournaments.search(Tournament::is_pending, Entity::id);
    screens::list_view("Tournois en cours", &pending).display(&mut ctx.console)?;
    Ok(Navigation::to(TOURNAMENTS))
}

/// `/tournaments/list/pending`: plays the next round of a pending
/// tournament, then closes it once no round is left.
///
/// The tournament is saved after the round and again after closing.
pub fn resume_pending<C: Console>(ctx: &mut AppContext<C>) -> Result<Navigation> {
    let pending = ctx.tournaments.search(Tournament::is_pending, Entity::id);
    if pending.is_empty() {
        screens::notice("Reprise du tournoi", "Aucun tournoi en cours").display(&mut ctx.console)?;
        return Ok(Navigation::to(TOURNAMENTS));
    }

    let id = screens::pick_tournament("Reprise du tournoi", &pending).display(&mut ctx.console)?;
    let mut tournament = ctx.tournaments.search_by_id(id)?.clone();

    if play_round(ctx, &mut tournament)? {
        save(ctx, &tournament)?;
    }

    if tournament.current_round_index().is_none() {
        let data = screens::closing_form().display(&mut ctx.console)?;
        let end_date = data
            .get("end_date")
            .cloned()
            .ok_or_else(|| Error::InvalidInput("missing end date".to_string()))?;
        let end_date: NaiveDate =
            serde_json::from_value(end_date).map_err(|e| Error::InvalidInput(e.to_string()))?;
        tournament.end_date = Some(end_date);
        save(ctx, &tournament)?;
        tracing::info!(id = %tournament.id, %end_date, "Closed tournament");
    }

    Ok(Navigation::to(TOURNAMENTS))
}

/// `/tournaments/reports`: report of any tournament.
pub fn report<C: Console>(ctx: &mut AppContext<C>) -> Result<Navigation> {
    let tournaments = ctx.tournaments.search(|_| true, Entity::id);
    if tournaments.is_empty() {
        screens::notice("Rapport du tournoi", "Aucun tournoi enregistré")
            .display(&mut ctx.console)?;
        return Ok(Navigation::to(TOURNAMENTS));
    }

    let id = screens::pick_tournament("Rapport des tournois", &tournaments)
        .display(&mut ctx.console)?;
    let tournament = ctx.tournaments.search_by_id(id)?;
    let players = &ctx.players;
    let view = screens::tournament_report(tournament, |player| {
        players.search_by_id(player).map(Player::full_name)
    })?;
    view.display(&mut ctx.console)?;
    Ok(Navigation::to(TOURNAMENTS))
}

/// Plays the current round: pairs it if needed, asks every result, then
/// moves on to the next round.
///
/// Returns `false` if there was no round left to play.
fn play_round<C: Console>(ctx: &mut AppContext<C>, tournament: &mut Tournament) -> Result<bool> {
    if !tournament.open_current_round(ctx.now()) {
        return Ok(false);
    }

    if let Some(round) = tournament.current_round_mut() {
        tracing::debug!(round = %round.name, matches = round.matchs.len(), "Playing round");
        for game in &mut round.matchs {
            let player_1 = ctx.players.search_by_id(game.player_1)?;
            let player_2 = ctx.players.search_by_id(game.player_2)?;
            let score = screens::pick_winner(player_1, player_2).display(&mut ctx.console)?;
            game.record(score);
        }
    }

    tournament.advance(ctx.now());
    Ok(true)
}

fn save<C: Console>(ctx: &mut AppContext<C>, tournament: &Tournament) -> Result<()> {
    ctx.tournaments.create(tournament.to_fields()?, true)?;
    Ok(())
}
