mod model;
mod parse;
mod store;

pub use model::NoteSet;
pub use store::FileNoteStore;
