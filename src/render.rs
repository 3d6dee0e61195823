//! Static map rendering through the Mapbox Static Images API.
//!
//! Each reading becomes a coloured pin on a fixed view of central Seoul.
//! Two presets exist: a dark navigation style with large red pins for the
//! most crowded places, and an outdoors style with cyan pins for the
//! quietest ones.

use log::{debug, info};
use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::CrowdReading;

/// `lng,lat,zoom` of the map viewport (Seoul city hall).
const SEOUL_VIEWPORT: &str = "126.978,37.566,10.7";
const IMAGE_SIZE: &str = "800x800";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Visual preset for a rendered map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapStyle {
    /// Mapbox style id, `owner/style`
    pub style_id: &'static str,
    /// Pin colour as a hex string without `#`
    pub color: &'static str,
    /// Mapbox marker name (`pin-s`, `pin-m`, `pin-l`)
    pub marker: &'static str,
}

impl MapStyle {
    /// Night navigation style with large red pins.
    pub const HOT: MapStyle = MapStyle {
        style_id: "mapbox/navigation-night-v1",
        color: "ff4444",
        marker: "pin-l",
    };

    /// Outdoors style with medium cyan pins.
    pub const CHILL: MapStyle = MapStyle {
        style_id: "mapbox/outdoors-v12",
        color: "00dbff",
        marker: "pin-m",
    };

    /// Preset for the most crowded (`true`) or least crowded (`false`) map.
    pub fn for_heat(is_hot: bool) -> Self {
        if is_hot {
            Self::HOT
        } else {
            Self::CHILL
        }
    }

    /// Marker overlay for one reading: `marker+color(lng,lat)`.
    pub fn marker_for(&self, reading: &CrowdReading) -> String {
        format!(
            "{}+{}({},{})",
            self.marker, self.color, reading.point.longitude, reading.point.latitude
        )
    }
}

/// Build the static image URL for `readings` drawn in `style`.
pub fn static_map_url(base_url: &str, access_token: &str, style: MapStyle, readings: &[CrowdReading]) -> String {
    let markers: Vec<String> = readings.iter().map(|r| style.marker_for(r)).collect();
    format!(
        "{}/styles/v1/{}/static/{}/{}/{}?access_token={}",
        base_url,
        style.style_id,
        markers.join(","),
        SEOUL_VIEWPORT,
        IMAGE_SIZE,
        access_token
    )
}

/// Downloads rendered maps and writes them to disk.
pub struct MapRenderer {
    client: Client,
    base_url: String,
    access_token: String,
}

impl MapRenderer {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: config.map_base_url.clone(),
            access_token: config.map_api_key.clone(),
        })
    }

    /// Render `readings` and write the image to `path`.
    ///
    /// An empty slice is a no-op: nothing is requested and no file is written.
    /// Any status other than 200 is reported as [`Error::MapStatus`] and
    /// leaves `path` untouched.
    pub async fn render(&self, readings: &[CrowdReading], path: &Path, is_hot: bool) -> Result<()> {
        if readings.is_empty() {
            debug!("[MapRenderer] No readings for {}, skipping", path.display());
            return Ok(());
        }

        let style = MapStyle::for_heat(is_hot);
        let url = static_map_url(&self.base_url, &self.access_token, style, readings);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::MapStatus(status));
        }

        let bytes = response.bytes().await?;
        tokio::fs::write(path, &bytes)
            .await
            .map_err(|e| Error::io(path, e))?;

        info!(
            "[MapRenderer] Wrote {} ({} pins, {:.1}KB, style {})",
            path.display(),
            readings.len(),
            bytes.len() as f64 / 1024.0,
            style.style_id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CongestionLevel, GpsPoint};

    fn reading(name: &str, lat: f64, lng: f64) -> CrowdReading {
        CrowdReading::new(name, GpsPoint::new(lat, lng), CongestionLevel::Busy)
    }

    #[test]
    fn test_style_presets() {
        assert_eq!(MapStyle::for_heat(true), MapStyle::HOT);
        assert_eq!(MapStyle::for_heat(false), MapStyle::CHILL);
        assert_eq!(MapStyle::HOT.marker, "pin-l");
        assert_eq!(MapStyle::CHILL.color, "00dbff");
    }

    #[test]
    fn test_marker_is_lng_then_lat() {
        let r = reading("서울역", 37.5547, 126.9707);
        assert_eq!(MapStyle::HOT.marker_for(&r), "pin-l+ff4444(126.9707,37.5547)");
    }

    #[test]
    fn test_static_map_url() {
        let readings = vec![reading("a", 37.5, 127.0), reading("b", 37.6, 126.9)];
        let url = static_map_url("https://api.mapbox.com", "tok", MapStyle::CHILL, &readings);
        assert_eq!(
            url,
            "https://api.mapbox.com/styles/v1/mapbox/outdoors-v12/static/\
             pin-m+00dbff(127,37.5),pin-m+00dbff(126.9,37.6)/126.978,37.566,10.7/800x800?access_token=tok"
        );
    }

    #[tokio::test]
    async fn test_render_empty_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        // Unroutable base URL: an actual request would fail the test
        let config = Config::new("k", "m").with_base_urls("http://127.0.0.1:9", "http://127.0.0.1:9");
        let renderer = MapRenderer::new(&config).unwrap();

        renderer.render(&[], &path, true).await.unwrap();
        assert!(!path.exists());
    }
}
