use crate::domain::model::{Coordinate, LocationRecord, MapOutput, MapPlan};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> &str;
    fn report_file(&self) -> Option<&str>;
    fn geocoder_endpoint(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn timeout(&self) -> Duration;
}

/// 地名轉座標的外部查詢
///
/// `Ok(None)` means the service answered but found nothing. A timeout is
/// reported as `MapError::LookupTimeout`.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, name: &str) -> Result<Option<Coordinate>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<LocationRecord>>;
    async fn transform(&self, records: Vec<LocationRecord>) -> Result<MapPlan>;
    async fn load(&self, plan: MapPlan) -> Result<MapOutput>;
}
