//! Operations module
//!
//! Coordinates target dispatch, argument expansion, and command execution

pub mod commands;
pub mod dispatch;
pub mod expand;
pub mod to_command_line;

pub use commands::*;
pub use dispatch::*;
pub use expand::*;
pub use to_command_line::*;
