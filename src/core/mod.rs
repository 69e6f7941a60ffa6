pub mod engine;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod resolver;
pub mod viewport;

pub use crate::domain::model::{LocationRecord, MapPlan, Resolution};
pub use crate::domain::ports::{ConfigProvider, Geocoder, Pipeline, Storage};
pub use crate::utils::error::Result;
