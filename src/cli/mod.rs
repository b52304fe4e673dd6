//! CLI module for the `appstate` demo binary.
//!
//! This module provides:
//! - Argument parsing
//! - Version display
//! - The interactive demo session driven by stdin lines
//!
//! # Usage
//!
//! ```ignore
//! use appstate::cli::{parse_args, CliCommand};
//!
//! let args = parse_args(std::env::args())?;
//! match args.command {
//!     CliCommand::Version => println!("{}", appstate::cli::version_string()),
//!     CliCommand::Run => { /* start the session */ }
//!     _ => {}
//! }
//! ```

pub mod args;
pub mod demo;
pub mod version;

pub use args::{parse_args, CliArgs, CliCommand, USAGE};
pub use demo::{error_line, DemoSession, Flow};
pub use version::{version_string, VERSION};
