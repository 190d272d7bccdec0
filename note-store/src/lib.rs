pub mod clock;
pub mod config;
pub mod db;
pub mod errors;
pub mod list;
pub mod logging;
pub mod notes;
pub mod session;

pub use config::config;
pub use errors::{Error, Result};
pub use list::NoteList;
pub use notes::{filter, Note, NoteId, NoteStore, Saved};
pub use session::{NoteSession, SessionState, StoreOpening};
