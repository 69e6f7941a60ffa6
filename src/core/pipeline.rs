use crate::core::parser::{decode_input, parse_records};
use crate::core::render::{render_map, MapStyle};
use crate::core::report::render_report;
use crate::core::resolver::resolve_record;
use crate::core::viewport::calculate_viewport;
use crate::domain::model::{Coordinate, LocationRecord, MapOutput, MapPlan, Resolution, ResolvedMarker};
use crate::domain::ports::{ConfigProvider, Geocoder, Pipeline, Storage};
use crate::utils::error::Result;
use std::path::Path;

pub struct MapPipeline<S: Storage, C: ConfigProvider, G: Geocoder> {
    storage: S,
    config: C,
    geocoder: G,
    style: MapStyle,
}

impl<S: Storage, C: ConfigProvider, G: Geocoder> MapPipeline<S, C, G> {
    pub fn new(storage: S, config: C, geocoder: G) -> Self {
        Self {
            storage,
            config,
            geocoder,
            style: MapStyle::default(),
        }
    }

    pub fn with_style(mut self, style: MapStyle) -> Self {
        self.style = style;
        self
    }

    fn output_location(&self, file: &str) -> String {
        Path::new(self.config.output_path())
            .join(file)
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, G: Geocoder> Pipeline for MapPipeline<S, C, G> {
    async fn extract(&self) -> Result<Vec<LocationRecord>> {
        tracing::debug!("Reading locations from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;
        let content = decode_input(data)?;

        let records = parse_records(&content);
        tracing::debug!("Parsed {} location records", records.len());

        Ok(records)
    }

    async fn transform(&self, records: Vec<LocationRecord>) -> Result<MapPlan> {
        let mut resolutions = Vec::with_capacity(records.len());

        // 逐筆查詢，不並行
        for record in records {
            resolutions.push(resolve_record(&self.geocoder, record).await);
        }

        let coordinates: Vec<Coordinate> = resolutions
            .iter()
            .filter_map(Resolution::marker)
            .map(|marker| marker.coordinate)
            .collect();
        let viewport = calculate_viewport(&coordinates);

        tracing::debug!(
            "Viewport center ({:.5}, {:.5}), zoom {}",
            viewport.center.latitude,
            viewport.center.longitude,
            viewport.zoom
        );

        Ok(MapPlan {
            resolutions,
            viewport,
        })
    }

    async fn load(&self, plan: MapPlan) -> Result<MapOutput> {
        let report_path = match self.config.report_file() {
            Some(report_file) => {
                let report = render_report(&plan.resolutions)?;
                tracing::debug!("Writing resolution report ({} bytes)", report.len());
                let location = self.output_location(report_file);
                self.storage.write_file(&location, &report).await?;
                Some(location)
            }
            None => None,
        };

        let markers: Vec<ResolvedMarker> = plan
            .resolutions
            .into_iter()
            .filter_map(|resolution| match resolution {
                Resolution::Resolved(marker) => Some(marker),
                Resolution::Skipped { .. } => None,
            })
            .collect();

        let html = render_map(&markers, &plan.viewport, &self.style)?;

        let map_path = self.output_location(self.config.output_file());
        tracing::debug!("Writing map with {} markers ({} bytes)", markers.len(), html.len());
        self.storage.write_file(&map_path, html.as_bytes()).await?;

        Ok(MapOutput {
            map_path,
            report_path,
        })
    }
}
