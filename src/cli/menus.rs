//! Navigation menus.

use super::{AppContext, Navigation};
use crate::Result;
use crate::ui::{Console, screens};

/// `/`: main menu.
pub fn main_menu<C: Console>(ctx: &mut AppContext<C>) -> Result<Navigation> {
    let route = screens::main_menu().display(&mut ctx.console)?;
    Ok(Navigation::To(route))
}

/// `/players`: player management menu.
pub fn players_menu<C: Console>(ctx: &mut AppContext<C>) -> Result<Navigation> {
    let route = screens::players_menu().display(&mut ctx.console)?;
    Ok(Navigation::To(route))
}

/// `/tournaments`: tournament management menu.
pub fn tournaments_menu<C: Console>(ctx: &mut AppContext<C>) -> Result<Navigation> {
    let route = screens::tournaments_menu().display(&mut ctx.console)?;
    Ok(Navigation::To(route))
}

/// `/quit`.
#[allow(clippy::unnecessary_wraps)]
pub fn quit<C: Console>(_ctx: &mut AppContext<C>) -> Result<Navigation> {
    Ok(Navigation::Quit)
}
