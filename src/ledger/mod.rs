pub mod book;
pub mod category;
pub mod entry;

pub use book::Book;
pub use category::{is_known, DEFAULT_CATEGORIES};
pub use entry::{Entry, EntryDraft, EntryKind};
