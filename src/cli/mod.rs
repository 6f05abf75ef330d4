//! Command Line Interface (CLI) layer for PALSARCOG.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for tile conversion and collection
//! generation. It wires user-provided options to the underlying library
//! functionality exposed via `palsarcog::api`.
//!
//! If you are embedding PALSARCOG into another application, prefer using
//! the high-level `palsarcog::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
