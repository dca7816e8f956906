//! CLI library for testing purposes

pub mod config;
pub mod layers;
pub mod load;
pub mod validation;

pub use config::CliConfig;
pub use layers::{LayersCommandOptions, render_groups, run_layers_command};
pub use load::{LoadCommandOptions, ResolvedLoad, resolve, run_load_command};
