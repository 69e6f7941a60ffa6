use serde::{Deserialize, Serialize};
use std::fmt;

/// 輸入檔中的一行：地名加上可選的說明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub name: String,
    pub description: String,
}

impl LocationRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite and within ±90 latitude, ±180 longitude.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMarker {
    pub coordinate: Coordinate,
    pub name: String,
    pub description: String,
}

impl ResolvedMarker {
    pub fn new(record: LocationRecord, coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            name: record.name,
            description: record.description,
        }
    }

    /// Click popup text: the description, or the name when there is none.
    pub fn popup_text(&self) -> &str {
        if self.description.is_empty() {
            &self.name
        } else {
            &self.description
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    EmptyName,
    NoMatch,
    TimedOut,
    LookupFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyName => write!(f, "empty name"),
            SkipReason::NoMatch => write!(f, "no match"),
            SkipReason::TimedOut => write!(f, "timed out"),
            SkipReason::LookupFailed(message) => write!(f, "lookup failed: {}", message),
        }
    }
}

/// Outcome of resolving one input record.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(ResolvedMarker),
    Skipped {
        record: LocationRecord,
        reason: SkipReason,
    },
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn marker(&self) -> Option<&ResolvedMarker> {
        match self {
            Resolution::Resolved(marker) => Some(marker),
            Resolution::Skipped { .. } => None,
        }
    }
}

/// transform 階段的結果，保留輸入順序
#[derive(Debug, Clone)]
pub struct MapPlan {
    pub resolutions: Vec<Resolution>,
    pub viewport: Viewport,
}

impl MapPlan {
    pub fn markers(&self) -> Vec<&ResolvedMarker> {
        self.resolutions.iter().filter_map(Resolution::marker).collect()
    }

    pub fn resolved_count(&self) -> usize {
        self.resolutions.iter().filter(|r| r.is_resolved()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.resolutions.len() - self.resolved_count()
    }
}

/// Paths written by the load phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapOutput {
    pub map_path: String,
    pub report_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: String,
    pub total: usize,
    pub resolved: usize,
    pub skipped: usize,
    pub report_path: Option<String>,
}
