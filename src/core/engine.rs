use crate::domain::model::RunSummary;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct MapEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> MapEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("🗺️ Starting map generation");
        self.monitor.log_stats("Start");

        // Extract
        let records = self.pipeline.extract().await?;
        let total = records.len();
        tracing::info!("📄 Read {} location records", total);
        self.monitor.log_stats("Extract");

        // Transform
        let plan = self.pipeline.transform(records).await?;
        let resolved = plan.resolved_count();
        let skipped = plan.skipped_count();
        tracing::info!("📍 Resolved {} of {} locations ({} skipped)", resolved, total, skipped);
        self.monitor.log_stats("Geocode");

        // Load
        let output = self.pipeline.load(plan).await?;
        tracing::info!("💾 Map saved to: {}", output.map_path);
        if let Some(report_path) = &output.report_path {
            tracing::info!("📋 Resolution report saved to: {}", report_path);
        }
        self.monitor.log_stats("Render");
        self.monitor.log_final_stats();

        Ok(RunSummary {
            output_path: output.map_path,
            total,
            resolved,
            skipped,
            report_path: output.report_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        Coordinate, LocationRecord, MapOutput, MapPlan, Resolution, ResolvedMarker, SkipReason, Viewport,
    };
    use crate::utils::error::MapError;
    use async_trait::async_trait;

    struct FixedPipeline {
        fail_load: bool,
    }

    #[async_trait]
    impl Pipeline for FixedPipeline {
        async fn extract(&self) -> Result<Vec<LocationRecord>> {
            Ok(vec![LocationRecord::new("Paris", ""), LocationRecord::new("Atlantis", "")])
        }

        async fn transform(&self, mut records: Vec<LocationRecord>) -> Result<MapPlan> {
            let atlantis = records.pop().unwrap();
            let paris = records.pop().unwrap();
            Ok(MapPlan {
                resolutions: vec![
                    Resolution::Resolved(ResolvedMarker::new(paris, Coordinate::new(48.85, 2.35))),
                    Resolution::Skipped {
                        record: atlantis,
                        reason: SkipReason::NoMatch,
                    },
                ],
                viewport: Viewport {
                    center: Coordinate::new(48.85, 2.35),
                    zoom: 10,
                },
            })
        }

        async fn load(&self, _plan: MapPlan) -> Result<MapOutput> {
            if self.fail_load {
                return Err(MapError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only directory",
                )));
            }
            Ok(MapOutput {
                map_path: "./locations_map.html".to_string(),
                report_path: None,
            })
        }
    }

    #[tokio::test]
    async fn test_run_summarises_resolution() {
        let engine = MapEngine::new(FixedPipeline { fail_load: false });
        let summary = engine.run().await.unwrap();

        assert_eq!(
            summary,
            RunSummary {
                output_path: "./locations_map.html".to_string(),
                total: 2,
                resolved: 1,
                skipped: 1,
                report_path: None,
            }
        );
    }

    #[tokio::test]
    async fn test_run_propagates_write_failure() {
        let engine = MapEngine::new(FixedPipeline { fail_load: true });
        let err = engine.run().await.unwrap_err();
        assert!(matches!(err, MapError::IoError(_)));
    }
}
