// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Elevation lookup against a Google-style elevation REST API.

use geosym_core::LatLng;
use geosym_processing::{ElevationService, Error, Result};
use reqwest::Url;
use serde::Deserialize;

/// HTTP client for `GET {url}?locations=lat,lng|lat,lng&key=...`.
pub struct HttpElevationService {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ElevationResponse {
    status: String,
    #[serde(default)]
    results: Vec<ElevationResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ElevationResult {
    elevation: f64,
}

/// `lat,lng` pairs joined by `|`
fn encode_locations(points: &[LatLng]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.lat, p.lng))
        .collect::<Vec<_>>()
        .join("|")
}

impl HttpElevationService {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            http: reqwest::Client::new(),
        }
    }

    fn request_url(&self, points: &[LatLng]) -> Result<Url> {
        let mut params = vec![("locations", encode_locations(points))];
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }
        Url::parse_with_params(&self.base_url, &params)
            .map_err(|e| Error::Elevation(format!("Invalid elevation API URL: {e}")))
    }
}

impl ElevationService for HttpElevationService {
    async fn elevations(&self, points: &[LatLng]) -> Result<Vec<f64>> {
        let url = self.request_url(points)?;

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Elevation(format!("Elevation request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(Error::Elevation(format!(
                "Elevation request failed with status {}",
                resp.status()
            )));
        }

        let body: ElevationResponse = resp
            .json()
            .await
            .map_err(|e| Error::Elevation(format!("Elevation response parse failed: {e}")))?;

        if body.status != "OK" {
            return Err(Error::Elevation(match body.error_message {
                Some(message) => format!("{}: {}", body.status, message),
                None => body.status,
            }));
        }

        tracing::debug!(points = points.len(), "Elevation lookup complete");
        Ok(body.results.into_iter().map(|r| r.elevation).collect())
    }
}
