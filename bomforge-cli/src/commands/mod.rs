//! Command handlers -- one module per subcommand

pub mod diff;
pub mod generate;
pub mod merge;
pub mod sign;
pub mod validate;
pub mod verify;
