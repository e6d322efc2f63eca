mod guess_session;
pub use guess_session::*;
