mod games;
pub mod store;

pub use games::{GameStore, SharedSession};
