use crate::{prelude::*, sessions::SharedSession};

use axum::response::Redirect;
use nanoid::nanoid;
use tower_sessions::Session;

const SID_KEY: &str = "sid";

/// The player's id, minting one into the cookie session on first contact.
pub fn session_id(session: &Session) -> Result<String> {
    if let Some(sid) = session.get::<String>(SID_KEY)? {
        return Ok(sid);
    }

    let sid = nanoid!();
    session.insert(SID_KEY, sid.clone())?;

    return Ok(sid);
}

pub fn find_game(state: &AppState, session: &Session) -> Result<Option<(String, SharedSession)>> {
    let Some(sid) = session.get::<String>(SID_KEY)? else {
        return Ok(None);
    };

    return Ok(state.games.find(&sid).map(|game| (sid, game)));
}

pub fn redirect(state: &AppState, route: &str) -> Redirect {
    return Redirect::to(&state.cfg.path(route));
}
