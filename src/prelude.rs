pub use crate::{config::Config, AppState, Result};
