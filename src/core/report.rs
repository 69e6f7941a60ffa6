use crate::domain::model::Resolution;
use crate::utils::error::{MapError, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    name: &'a str,
    description: &'a str,
    status: &'static str,
    reason: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl<'a> From<&'a Resolution> for ReportRow<'a> {
    fn from(resolution: &'a Resolution) -> Self {
        match resolution {
            Resolution::Resolved(marker) => ReportRow {
                name: &marker.name,
                description: &marker.description,
                status: "resolved",
                reason: String::new(),
                latitude: Some(marker.coordinate.latitude),
                longitude: Some(marker.coordinate.longitude),
            },
            Resolution::Skipped { record, reason } => ReportRow {
                name: &record.name,
                description: &record.description,
                status: "skipped",
                reason: reason.to_string(),
                latitude: None,
                longitude: None,
            },
        }
    }
}

/// 每筆輸入記錄一列，依輸入順序輸出 CSV
pub fn render_report(resolutions: &[Resolution]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for resolution in resolutions {
        writer.serialize(ReportRow::from(resolution))?;
    }

    writer.into_inner().map_err(|e| MapError::IoError(e.into_error()))
}
