//! Interactive application shell.
//!
//! A [`Router`] maps URL-like paths to handlers. Each handler drives one
//! screen through the [`AppContext`] and returns where to go next.
//!
//! # Routes
//!
//! | Route | Handler |
//! |-------|---------|
//! | `/` | main menu |
//! | `/players` | player management menu |
//! | `/player/add` | register a player |
//! | `/players/list/by-name` | players sorted by name |
//! | `/players/list/by-rank` | players sorted by rank |
//! | `/players/update-rank` | change a player's rank |
//! | `/tournaments` | tournament management menu |
//! | `/tournament/add` | create a tournament |
//! | `/tournaments/list/current` | pending tournaments |
//! | `/tournaments/list/pending` | resume a pending tournament |
//! | `/tournaments/reports` | tournament report |
//! | `/quit` | leave |

mod context;
mod menus;
mod players;
mod router;
mod tournaments;

pub use context::AppContext;
pub use router::{Handler, Navigation, Router};

use crate::ui::Console;

/// Main menu route.
pub const HOME: &str = "/";
/// Player menu route.
pub const PLAYERS: &str = "/players";
/// Tournament menu route.
pub const TOURNAMENTS: &str = "/tournaments";
/// Exit route.
pub const QUIT: &str = "/quit";

/// Builds the application route table.
#[must_use]
pub fn routes<C: Console>() -> Router<C> {
    let mut router = Router::new();
    router
        .add_path(HOME, menus::main_menu)
        .add_path(QUIT, menus::quit)
        .add_path(PLAYERS, menus::players_menu)
        .add_path("/player/add", players::add_player)
        .add_path("/players/list/by-name", players::list_by_name)
        .add_path("/players/list/by-rank", players::list_by_rank)
        .add_path("/players/update-rank", players::update_rank)
        .add_path(TOURNAMENTS, menus::tournaments_menu)
        .add_path("/tournament/add", tournaments::add_tournament)
        .add_path("/tournaments/list/current", tournaments::list_current)
        .add_path("/tournaments/list/pending", tournaments::resume_pending)
        .add_path("/tournaments/reports", tournaments::report);
    router
}
