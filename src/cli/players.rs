//! Player handlers.

use super::{AppContext, Navigation, PLAYERS};
use crate::Result;
use crate::models::Entity;
use crate::ui::{Console, screens};

/// `/player/add`: registers a player and saves it.
pub fn add_player<C: Console>(ctx: &mut AppContext<C>) -> Result<Navigation> {
    let data = screens::player_form().display(&mut ctx.console)?;
    let player = ctx.players.create(data, true)?;
    tracing::info!(id = %player.id, name = %player.full_name(), "Registered player");
    Ok(Navigation::to(PLAYERS))
}

/// `/players/list/by-name`: roster sorted by last then first name.
pub fn list_by_name<C: Console>(ctx: &mut AppContext<C>) -> Result<Navigation> {
    let players = ctx.players.search(
        |_| true,
        |p| (p.lastname.to_lowercase(), p.firstname.to_lowercase()),
    );
    screens::list_view("Joueurs par nom", &players).display(&mut ctx.console)?;
    Ok(Navigation::to(PLAYERS))
}

/// `/players/list/by-rank`: roster sorted by rank.
pub fn list_by_rank<C: Console>(ctx: &mut AppContext<C>) -> Result<Navigation> {
    let players = ctx.players.search(|_| true, |p| (p.rank, p.id));
    screens::list_view("Joueurs par classement", &players).display(&mut ctx.console)?;
    Ok(Navigation::to(PLAYERS))
}

/// `/players/update-rank`: picks a player and saves a new rank.
///
/// The player is rebuilt under its own id and re-saved, which replaces the
/// stored document.
pub fn update_rank<C: Console>(ctx: &mut AppContext<C>) -> Result<Navigation> {
    let players = ctx.players.search(|_| true, Entity::id);
    if players.is_empty() {
        screens::notice("Classement", "Aucun joueur enregistré").display(&mut ctx.console)?;
        return Ok(Navigation::to(PLAYERS));
    }

    let id = screens::pick_player(&players).display(&mut ctx.console)?;
    let data = screens::rank_form().display(&mut ctx.console)?;

    let mut fields = ctx.players.search_by_id(id)?.to_fields()?;
    if let Some(rank) = data.get("rank") {
        fields.insert("rank".to_string(), rank.clone());
    }
    let player = ctx.players.create(fields, true)?;
    tracing::info!(id = %player.id, rank = player.rank, "Updated player rank");
    Ok(Navigation::to(PLAYERS))
}
