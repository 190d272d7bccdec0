mod model;
pub mod preview;
mod search;
mod store;

pub use model::*;
pub use search::{filter, matches_title};
pub use store::{NoteStore, Saved};
