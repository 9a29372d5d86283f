//! Command-line interface for the `cmpbench` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings and the shared `DISPLAY_LEVEL` atomic with its macros. |
//! | [`args`]      | clap definitions of the flags and the hidden `window-bench` subcommand. |

pub mod args;
pub mod constants;
