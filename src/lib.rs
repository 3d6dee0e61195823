//! # Seoul Crowd Map
//!
//! Live congestion snapshot of Seoul's busiest areas, rendered as two maps.
//!
//! This library provides:
//! - Concurrent congestion fetching from the Seoul open data citydata API
//! - Ranking of areas by congestion score
//! - Static map rendering of the most and least crowded areas
//! - A last-update stamp for the status file
//!
//! ## Quick Start
//!
//! ```rust
//! use seoul_crowd_map::{CongestionLevel, CrowdReading, GpsPoint, rank_by_congestion, select_extremes};
//!
//! let mut readings = vec![
//!     CrowdReading::new("서울숲공원", GpsPoint::new(37.5444, 127.0374), CongestionLevel::Relaxed),
//!     CrowdReading::new("강남역", GpsPoint::new(37.4979, 127.0276), CongestionLevel::Busy),
//! ];
//!
//! rank_by_congestion(&mut readings);
//! let extremes = select_extremes(&readings, 1);
//! assert_eq!(extremes.most_crowded[0].name, "강남역");
//! assert_eq!(extremes.least_crowded[0].name, "서울숲공원");
//! ```

pub mod citydata;
pub mod config;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod places;
pub mod render;
pub mod stamp;

pub use config::Config;
pub use error::{Error, Result};
pub use http::{gather_bounded, CongestionFetcher, MAX_CONCURRENCY};
pub use pipeline::{run, run_from_env, OutputPaths};
pub use places::PLACES;
pub use render::{MapRenderer, MapStyle};
pub use stamp::stamp_status_file;

/// Number of places drawn on each map.
pub const TOP_N: usize = 10;

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude and longitude.
///
/// # Example
/// ```
/// use seoul_crowd_map::GpsPoint;
/// let point = GpsPoint::new(37.5665, 126.9780); // Seoul city hall
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPoint {
    /// Create a new GPS point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Crowding label reported by the citydata API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CongestionLevel {
    /// `여유`
    Relaxed,
    /// `보통`
    Normal,
    /// `약간 붐빔`
    SlightlyBusy,
    /// `붐빔`
    Busy,
    /// Any other label, including an empty one
    Unknown,
}

impl CongestionLevel {
    /// Map an API label to a level. Matching is exact after trimming.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "붐빔" => Self::Busy,
            "약간 붐빔" => Self::SlightlyBusy,
            "보통" => Self::Normal,
            "여유" => Self::Relaxed,
            _ => Self::Unknown,
        }
    }

    /// Ordinal congestion score: 4 (busy) down to 1 (relaxed), 0 if unknown.
    pub fn score(self) -> u8 {
        match self {
            Self::Busy => 4,
            Self::SlightlyBusy => 3,
            Self::Normal => 2,
            Self::Relaxed => 1,
            Self::Unknown => 0,
        }
    }

    /// The API label for this level.
    pub fn label(self) -> &'static str {
        match self {
            Self::Busy => "붐빔",
            Self::SlightlyBusy => "약간 붐빔",
            Self::Normal => "보통",
            Self::Relaxed => "여유",
            Self::Unknown => "unknown",
        }
    }
}

/// Congestion reading for one place.
#[derive(Debug, Clone, PartialEq)]
pub struct CrowdReading {
    /// Official area name, as requested
    pub name: String,
    /// Area centre reported by the API
    pub point: GpsPoint,
    /// Crowding level
    pub level: CongestionLevel,
}

impl CrowdReading {
    pub fn new(name: &str, point: GpsPoint, level: CongestionLevel) -> Self {
        Self {
            name: name.to_string(),
            point,
            level,
        }
    }

    /// Congestion score of this reading.
    pub fn score(&self) -> u8 {
        self.level.score()
    }
}

/// Most and least crowded slices of a ranked list.
#[derive(Debug, Clone, Copy)]
pub struct Extremes<'a> {
    pub most_crowded: &'a [CrowdReading],
    pub least_crowded: &'a [CrowdReading],
}

// ============================================================================
// Ranking
// ============================================================================

/// Sort readings by congestion score, most crowded first.
///
/// The sort is stable, but readings arrive in completion order, so the
/// relative order of equal scores is arbitrary.
pub fn rank_by_congestion(readings: &mut [CrowdReading]) {
    readings.sort_by(|a, b| b.score().cmp(&a.score()));
}

/// First `n` and last `n` entries of a ranked list.
///
/// With fewer than `2 * n` readings the two slices overlap; with fewer than
/// `n` both are the whole list.
pub fn select_extremes(ranked: &[CrowdReading], n: usize) -> Extremes<'_> {
    let head = n.min(ranked.len());
    let tail = ranked.len().saturating_sub(n);
    Extremes {
        most_crowded: &ranked[..head],
        least_crowded: &ranked[tail..],
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn readings_with_scores(scores: &[CongestionLevel]) -> Vec<CrowdReading> {
        scores
            .iter()
            .enumerate()
            .map(|(i, level)| {
                CrowdReading::new(
                    &format!("place-{}", i),
                    GpsPoint::new(37.5 + i as f64 * 0.001, 127.0),
                    *level,
                )
            })
            .collect()
    }

    fn cycle_levels(count: usize) -> Vec<CongestionLevel> {
        let levels = [
            CongestionLevel::Relaxed,
            CongestionLevel::Busy,
            CongestionLevel::Unknown,
            CongestionLevel::Normal,
            CongestionLevel::SlightlyBusy,
        ];
        (0..count).map(|i| levels[i % levels.len()]).collect()
    }

    #[test]
    fn test_gps_point_validation() {
        assert!(GpsPoint::new(37.5665, 126.978).is_valid());
        assert!(!GpsPoint::new(91.0, 0.0).is_valid());
        assert!(!GpsPoint::new(0.0, 181.0).is_valid());
        assert!(!GpsPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_congestion_scores() {
        assert_eq!(CongestionLevel::from_label("붐빔").score(), 4);
        assert_eq!(CongestionLevel::from_label("약간 붐빔").score(), 3);
        assert_eq!(CongestionLevel::from_label("보통").score(), 2);
        assert_eq!(CongestionLevel::from_label("여유").score(), 1);
        assert_eq!(CongestionLevel::from_label("").score(), 0);
        assert_eq!(CongestionLevel::from_label("매우 붐빔").score(), 0);
    }

    #[test]
    fn test_label_round_trips_known_levels() {
        for level in [
            CongestionLevel::Busy,
            CongestionLevel::SlightlyBusy,
            CongestionLevel::Normal,
            CongestionLevel::Relaxed,
        ] {
            assert_eq!(CongestionLevel::from_label(level.label()), level);
        }
    }

    #[test]
    fn test_rank_orders_by_score_descending() {
        let mut readings = readings_with_scores(&cycle_levels(12));
        rank_by_congestion(&mut readings);

        let scores: Vec<u8> = readings.iter().map(|r| r.score()).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]), "not descending: {:?}", scores);
        assert_eq!(scores.first(), Some(&4));
        assert_eq!(scores.last(), Some(&0));
    }

    #[test]
    fn test_extremes_disjoint_for_twenty_or_more() {
        for count in [20, 21, 63] {
            let mut readings = readings_with_scores(&cycle_levels(count));
            rank_by_congestion(&mut readings);
            let extremes = select_extremes(&readings, TOP_N);

            assert_eq!(extremes.most_crowded.len(), TOP_N);
            assert_eq!(extremes.least_crowded.len(), TOP_N);
            for hot in extremes.most_crowded {
                assert!(
                    extremes.least_crowded.iter().all(|c| c.name != hot.name),
                    "{} appears on both maps with {} readings",
                    hot.name,
                    count
                );
            }
        }
    }

    #[test]
    fn test_extremes_overlap_below_twenty() {
        let mut readings = readings_with_scores(&cycle_levels(15));
        rank_by_congestion(&mut readings);
        let extremes = select_extremes(&readings, TOP_N);

        assert_eq!(extremes.most_crowded.len(), TOP_N);
        assert_eq!(extremes.least_crowded.len(), TOP_N);
        let shared = extremes
            .most_crowded
            .iter()
            .filter(|h| extremes.least_crowded.iter().any(|c| c.name == h.name))
            .count();
        assert_eq!(shared, 5);
    }

    #[test]
    fn test_extremes_fewer_than_n() {
        let readings = readings_with_scores(&cycle_levels(3));
        let extremes = select_extremes(&readings, TOP_N);
        assert_eq!(extremes.most_crowded.len(), 3);
        assert_eq!(extremes.least_crowded.len(), 3);

        let empty = select_extremes(&[], TOP_N);
        assert!(empty.most_crowded.is_empty());
        assert!(empty.least_crowded.is_empty());
    }
}
