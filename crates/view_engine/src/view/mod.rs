//! Grid model: code point decoding, rectangular views and the string
//! variables templates are filled from.

pub mod utf8;
pub mod grid;
pub mod value_map;
pub mod message_log;

pub use grid::{Line, View, BLANK};
pub use value_map::ValueMap;
pub use message_log::MessageLog;
