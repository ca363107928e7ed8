//! Menu templates and their composition into resolved grids

pub mod template;
pub mod insert;
pub mod compose;
pub mod screen;

pub use template::{Align, ArtSlot, InsertOption, Menu, PartialSlot, SlotRect};
pub use insert::{apply_insert, apply_inserts, fit_field, resolve_method_chain};
pub use compose::{align_in_slot, ArtRef, Composer, MAX_PARTIAL_DEPTH};
pub use screen::{Screen, ScreenRequest};
