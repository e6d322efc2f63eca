mod game;
mod utils;


use crate::prelude::*;

use axum::{http::StatusCode, routing::get, Router};

/// Routes of the game itself, relative to the configured alias.
pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    let router = game::add_routes(router);

    return router.route("/health", get(|| async { StatusCode::NO_CONTENT }));
}
