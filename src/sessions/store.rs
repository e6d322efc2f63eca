use crate::prelude::*;

use tower_sessions::MokaStore;

/// Cookie sessions only carry the player's `sid`, game state lives in
/// [`super::GameStore`].
pub fn build(cfg: &Config) -> MokaStore {
    return MokaStore::new(Some(cfg.session_capacity));
}
