//! Small parsing helpers shared across modules.

pub mod code_list;
pub mod date;
