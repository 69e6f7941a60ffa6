use crate::domain::model::{Coordinate, LocationRecord, Resolution, ResolvedMarker, SkipReason};
use crate::domain::ports::Geocoder;
use crate::utils::error::MapError;

/// Looks a name up once; any failure is reported as `None`.
pub async fn resolve_coordinates<G: Geocoder + ?Sized>(geocoder: &G, name: &str) -> Option<Coordinate> {
    if name.trim().is_empty() {
        return None;
    }

    geocoder.geocode(name).await.ok().flatten()
}

/// 解析單筆記錄並保留跳過原因
pub async fn resolve_record<G: Geocoder + ?Sized>(geocoder: &G, record: LocationRecord) -> Resolution {
    if record.name.trim().is_empty() {
        tracing::debug!("Skipping record with empty name");
        return Resolution::Skipped {
            record,
            reason: SkipReason::EmptyName,
        };
    }

    match geocoder.geocode(&record.name).await {
        Ok(Some(coordinate)) => {
            tracing::debug!(
                "📍 {} -> ({:.5}, {:.5})",
                record.name,
                coordinate.latitude,
                coordinate.longitude
            );
            Resolution::Resolved(ResolvedMarker::new(record, coordinate))
        }
        Ok(None) => {
            tracing::warn!("⚠️ No match for '{}', skipping", record.name);
            Resolution::Skipped {
                record,
                reason: SkipReason::NoMatch,
            }
        }
        Err(MapError::LookupTimeout { .. }) => {
            tracing::warn!("⏱️ Lookup for '{}' timed out, skipping", record.name);
            Resolution::Skipped {
                record,
                reason: SkipReason::TimedOut,
            }
        }
        Err(e) => {
            tracing::warn!("⚠️ Lookup for '{}' failed, skipping: {}", record.name, e);
            Resolution::Skipped {
                record,
                reason: SkipReason::LookupFailed(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubGeocoder {
        calls: AtomicUsize,
    }

    impl StubGeocoder {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn geocode(&self, name: &str) -> Result<Option<Coordinate>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match name {
                "Paris" => Ok(Some(Coordinate::new(48.8566, 2.3522))),
                "Slowville" => Err(MapError::LookupTimeout {
                    name: name.to_string(),
                }),
                "Broken" => Err(MapError::GeocoderStatus {
                    name: name.to_string(),
                    status: 503,
                }),
                _ => Ok(None),
            }
        }
    }

    #[tokio::test]
    async fn test_resolve_coordinates_collapses_failures() {
        let geocoder = StubGeocoder::new();
        assert_eq!(
            resolve_coordinates(&geocoder, "Paris").await,
            Some(Coordinate::new(48.8566, 2.3522))
        );
        assert_eq!(resolve_coordinates(&geocoder, "Atlantis").await, None);
        assert_eq!(resolve_coordinates(&geocoder, "Slowville").await, None);
        assert_eq!(resolve_coordinates(&geocoder, "Broken").await, None);
    }

    #[tokio::test]
    async fn test_resolve_record_keeps_description() {
        let geocoder = StubGeocoder::new();
        let resolution = resolve_record(&geocoder, LocationRecord::new("Paris", "lights")).await;

        let marker = resolution.marker().expect("Paris should resolve");
        assert_eq!(marker.name, "Paris");
        assert_eq!(marker.description, "lights");
    }

    #[tokio::test]
    async fn test_resolve_record_skip_reasons() {
        let geocoder = StubGeocoder::new();

        let cases = [
            ("Atlantis", SkipReason::NoMatch),
            ("Slowville", SkipReason::TimedOut),
        ];
        for (name, expected) in cases {
            match resolve_record(&geocoder, LocationRecord::new(name, "")).await {
                Resolution::Skipped { reason, .. } => assert_eq!(reason, expected),
                other => panic!("expected skip for {}, got {:?}", name, other),
            }
        }

        match resolve_record(&geocoder, LocationRecord::new("Broken", "")).await {
            Resolution::Skipped {
                reason: SkipReason::LookupFailed(message),
                ..
            } => assert!(message.contains("503")),
            other => panic!("expected lookup failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_name_is_not_looked_up() {
        let geocoder = StubGeocoder::new();
        let resolution = resolve_record(&geocoder, LocationRecord::new("", "")).await;

        assert_eq!(
            resolution,
            Resolution::Skipped {
                record: LocationRecord::new("", ""),
                reason: SkipReason::EmptyName,
            }
        );
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_repeated_names_query_again() {
        let geocoder = StubGeocoder::new();
        resolve_record(&geocoder, LocationRecord::new("Paris", "")).await;
        resolve_record(&geocoder, LocationRecord::new("Paris", "")).await;
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 2);
    }
}
