use super::utils;

use crate::{
    models::{Guess, GuessResult},
    prelude::*,
    random::{MAX_NUMBER, MIN_NUMBER},
};

use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tower_sessions::Session;

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    return router
        .route("/", get(index))
        .route("/play", post(play))
        .route("/game", get(game))
        .route("/game/guess", post(guess))
        .route("/welldone", get(welldone))
        .route("/welldone/again", post(play_again))
        .route("/leave", post(leave));
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    base: String,
    error: Option<&'static str>,
}

async fn index(session: Session, State(state): State<AppState>) -> Result<Response> {
    if utils::find_game(&state, &session)?.is_some() {
        return Ok(utils::redirect(&state, "/game").into_response());
    }

    return Ok(IndexTemplate {
        base: state.cfg.base().to_string(),
        error: None,
    }
    .into_response());
}

#[derive(Debug, Deserialize)]
struct PlayForm {
    name: String,
}

async fn play(
    session: Session,
    State(state): State<AppState>,
    Form(body): Form<PlayForm>,
) -> Result<Response> {
    let name = body.name.trim();

    if name.is_empty() {
        return Ok(IndexTemplate {
            base: state.cfg.base().to_string(),
            error: Some("Please tell me your name."),
        }
        .into_response());
    }

    let sid = utils::session_id(&session)?;
    let game = state.games.open(&sid, name);
    game.lock().await.start_game()?;

    return Ok(utils::redirect(&state, "/game").into_response());
}

#[derive(Template)]
#[template(path = "game.html")]
struct GameTemplate {
    base: String,
    name: String,
    hint: Option<&'static str>,
    last_guess: Option<i32>,
    guess_count: u32,
    min: i32,
    max: i32,
}

async fn game(session: Session, State(state): State<AppState>) -> Result<Response> {
    let Some((_, game)) = utils::find_game(&state, &session)? else {
        return Ok(utils::redirect(&state, "/").into_response());
    };
    let mut game = game.lock().await;

    if game.is_solved() {
        return Ok(utils::redirect(&state, "/welldone").into_response());
    }

    if !game.game_in_progress() {
        game.start_game()?;
    }

    return Ok(GameTemplate {
        base: state.cfg.base().to_string(),
        name: game.player_name().to_string(),
        hint: game.hint().message(),
        last_guess: match game.last_guess() {
            Some(Guess::Number(n)) => Some(n),
            _ => None,
        },
        guess_count: game.guess_count(),
        min: MIN_NUMBER,
        max: MAX_NUMBER,
    }
    .into_response());
}

#[derive(Debug, Deserialize)]
struct GuessForm {
    #[serde(default)]
    guess: String,
}

async fn guess(
    session: Session,
    State(state): State<AppState>,
    Form(body): Form<GuessForm>,
) -> Result<Response> {
    let Some((sid, game)) = utils::find_game(&state, &session)? else {
        return Ok(utils::redirect(&state, "/").into_response());
    };
    let mut game = game.lock().await;

    // Stale form: the round is over or was never started.
    if game.is_solved() || !game.game_in_progress() {
        return Ok(utils::redirect(&state, "/game").into_response());
    }

    let outcome = game.submit_guess(&body.guess)?;
    tracing::debug!(sid = %sid, ?outcome, guess_count = game.guess_count(), "guess submitted");

    if outcome == GuessResult::Correct {
        tracing::info!(sid = %sid, guess_count = game.guess_count(), "number guessed");
        return Ok(utils::redirect(&state, "/welldone").into_response());
    }

    return Ok(utils::redirect(&state, "/game").into_response());
}

#[derive(Template)]
#[template(path = "welldone.html")]
struct WelldoneTemplate {
    base: String,
    guess_count: u32,
}

async fn welldone(session: Session, State(state): State<AppState>) -> Result<Response> {
    let Some((_, game)) = utils::find_game(&state, &session)? else {
        return Ok(utils::redirect(&state, "/").into_response());
    };
    let game = game.lock().await;

    if !game.is_solved() {
        return Ok(utils::redirect(&state, "/game").into_response());
    }

    return Ok(WelldoneTemplate {
        base: state.cfg.base().to_string(),
        guess_count: game.guess_count(),
    }
    .into_response());
}

async fn play_again(session: Session, State(state): State<AppState>) -> Result<Response> {
    let Some((_, game)) = utils::find_game(&state, &session)? else {
        return Ok(utils::redirect(&state, "/").into_response());
    };

    game.lock().await.start_game()?;

    return Ok(utils::redirect(&state, "/game").into_response());
}

async fn leave(session: Session, State(state): State<AppState>) -> Result<Response> {
    if let Some((sid, _)) = utils::find_game(&state, &session)? {
        state.games.evict(&sid);
    }

    return Ok(utils::redirect(&state, "/").into_response());
}
