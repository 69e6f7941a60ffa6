use crate::domain::model::Coordinate;
use crate::domain::ports::Geocoder;
use crate::utils::error::{MapError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = concat!("place-map/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// Nominatim 以字串回傳座標，其他相容服務可能回傳數字
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Degrees {
    Text(String),
    Number(f64),
}

impl Degrees {
    fn value(&self) -> Option<f64> {
        match self {
            Degrees::Text(text) => text.trim().parse().ok(),
            Degrees::Number(number) => Some(*number),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: Degrees,
    lon: Degrees,
    #[serde(default)]
    display_name: Option<String>,
}

/// Geocoder backed by a Nominatim-compatible `/search` endpoint.
pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
}

impl NominatimGeocoder {
    pub fn new(endpoint: impl Into<String>, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

}

fn classify(name: &str, error: reqwest::Error) -> MapError {
    if error.is_timeout() {
        MapError::LookupTimeout {
            name: name.to_string(),
        }
    } else {
        MapError::ApiError(error)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, name: &str) -> Result<Option<Coordinate>> {
        tracing::debug!("Geocoding '{}' via {}", name, self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", name), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| classify(name, e))?;

        let status = response.status();
        tracing::debug!("Geocoder response status: {}", status);

        if !status.is_success() {
            return Err(MapError::GeocoderStatus {
                name: name.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| classify(name, e))?;
        let places: Vec<Place> = serde_json::from_str(&body)?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        match (place.lat.value(), place.lon.value()) {
            (Some(latitude), Some(longitude)) => {
                let coordinate = Coordinate::new(latitude, longitude);
                if !coordinate.is_valid() {
                    return Err(MapError::Geocoder {
                        message: format!("coordinates out of range for '{}': ({}, {})", name, latitude, longitude),
                    });
                }
                if let Some(display_name) = &place.display_name {
                    tracing::debug!("'{}' matched '{}'", name, display_name);
                }
                Ok(Some(coordinate))
            }
            _ => Err(MapError::Geocoder {
                message: format!("unparsable coordinates for '{}'", name),
            }),
        }
    }
}
