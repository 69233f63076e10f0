//! Domain types for the note collection.

pub mod note;

pub use note::{NewNote, Note, NotePatch};
