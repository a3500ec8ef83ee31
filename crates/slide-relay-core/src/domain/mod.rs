//! Domain entities for the slide relay.
//!
//! Pure data with no I/O: the fixed command vocabulary and what each command
//! does.

pub mod command_table;

pub use command_table::{CommandEntry, CommandTable};
