//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project setup | `init`, `init --seed` |
//! | List | Restaurant management | `add`, `edit`, `remove`, `list` |
//! | Filter | Category filters | `filter show`, `filter toggle takeout`, `pool` |
//! | Decide | Random pick | `roll`, `tui` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! dinner --verbose roll
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod restaurant;
mod filter_cmd;
mod roll_cmd;
mod tui;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
