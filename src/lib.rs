//! Build Summary Library
//!
//! Loads a build configuration (a list of `general` and `machine` records)
//! and renders the plain-text summary printed by the `build-summary` binary.

pub mod cli;
pub mod config_file;
pub mod error;
pub mod report;
pub mod types;
pub mod yaml11;

// Re-export main types for convenience
pub use config_file::{
    Document, GeneralConfig, MachineConfig, default_config_path, extract_general,
    extract_machines, load_config,
};
pub use error::{ReportError, Result};
pub use report::{render, render_to_string};
pub use types::{FieldValue, RecordKind, VmMod};
