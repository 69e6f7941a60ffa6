pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::adapters::nominatim::NominatimGeocoder;
pub use crate::core::{engine::MapEngine, pipeline::MapPipeline, render::MapStyle};
pub use crate::domain::model::{
    Coordinate, LocationRecord, Resolution, ResolvedMarker, RunSummary, SkipReason, Viewport,
};
pub use crate::utils::error::{MapError, Result};
