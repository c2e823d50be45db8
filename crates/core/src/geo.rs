//! Observer and ISS coordinates (degrees, WGS84 latitude/longitude).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Half-width of the proximity window, in degrees, on each axis.
pub const PROXIMITY_WINDOW_DEG: f64 = 5.0;

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = 180.0;

/// The fixed observer location a tracking session watches over.
///
/// Immutable for the lifetime of a session. Constructing one does not
/// enforce the usual coordinate ranges because the operator prompt accepts
/// whatever is typed; call [`TargetLocation::validate`] to check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl TargetLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that latitude is within ±90° and longitude within ±180°.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_axis("latitude", self.latitude, MAX_LATITUDE)?;
        check_axis("longitude", self.longitude, MAX_LONGITUDE)
    }

    /// True iff both axes of `position` differ from this location by
    /// strictly less than `window_deg`.
    ///
    /// Longitude is compared as a plain difference with no wrap at the
    /// antimeridian.
    pub fn is_within(&self, position: &IssPosition, window_deg: f64) -> bool {
        (position.latitude - self.latitude).abs() < window_deg
            && (position.longitude - self.longitude).abs() < window_deg
    }

    /// [`is_within`](Self::is_within) using [`PROXIMITY_WINDOW_DEG`].
    pub fn is_overhead(&self, position: &IssPosition) -> bool {
        self.is_within(position, PROXIMITY_WINDOW_DEG)
    }
}

fn check_axis(axis: &'static str, value: f64, max: f64) -> Result<(), CoreError> {
    if value.is_finite() && (-max..=max).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidCoordinate {
            axis,
            value,
            min: -max,
            max,
        })
    }
}

/// A single reading of the ISS ground position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IssPosition {
    pub latitude: f64,
    pub longitude: f64,
    /// Server-side time of the reading, when the API reports one.
    pub reported_at: Option<DateTime<Utc>>,
}

impl IssPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            reported_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const TARGET: TargetLocation = TargetLocation {
        latitude: 40.0,
        longitude: -75.0,
    };

    #[test]
    fn iss_inside_window_is_overhead() {
        assert!(TARGET.is_overhead(&IssPosition::new(42.0, -74.0)));
    }

    #[test]
    fn latitude_delta_of_ten_is_not_overhead() {
        assert!(!TARGET.is_overhead(&IssPosition::new(50.0, -75.0)));
    }

    #[test]
    fn window_edge_is_exclusive() {
        assert!(!TARGET.is_overhead(&IssPosition::new(45.0, -75.0)));
        assert!(!TARGET.is_overhead(&IssPosition::new(35.0, -75.0)));
        assert!(!TARGET.is_overhead(&IssPosition::new(40.0, -70.0)));
        assert!(!TARGET.is_overhead(&IssPosition::new(40.0, -80.0)));
    }

    #[test]
    fn just_inside_edge_is_overhead() {
        assert!(TARGET.is_overhead(&IssPosition::new(44.999, -79.999)));
    }

    #[test]
    fn both_axes_must_be_inside() {
        // Latitude matches exactly, longitude far away.
        assert!(!TARGET.is_overhead(&IssPosition::new(40.0, 10.0)));
        // Longitude matches exactly, latitude far away.
        assert!(!TARGET.is_overhead(&IssPosition::new(-40.0, -75.0)));
    }

    #[test]
    fn sweep_matches_strict_inequality_on_both_axes() {
        let steps: Vec<f64> = (-24..=24).map(|i| f64::from(i) * 0.5).collect();
        for &dlat in &steps {
            for &dlon in &steps {
                let pos = IssPosition::new(TARGET.latitude + dlat, TARGET.longitude + dlon);
                let expected = dlat.abs() < 5.0 && dlon.abs() < 5.0;
                assert_eq!(
                    TARGET.is_overhead(&pos),
                    expected,
                    "dlat={dlat} dlon={dlon}"
                );
            }
        }
    }

    #[test]
    fn no_antimeridian_wrap() {
        let target = TargetLocation::new(0.0, 179.0);
        assert!(!target.is_overhead(&IssPosition::new(0.0, -179.0)));
    }

    #[test]
    fn custom_window() {
        assert!(TARGET.is_within(&IssPosition::new(48.0, -75.0), 10.0));
        assert!(!TARGET.is_within(&IssPosition::new(42.0, -74.0), 1.0));
    }

    #[test]
    fn validate_accepts_in_range() {
        assert!(TARGET.validate().is_ok());
        assert!(TargetLocation::new(-90.0, 180.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let err = TargetLocation::new(123.0, 123.0).validate().unwrap_err();
        assert_matches!(
            err,
            CoreError::InvalidCoordinate {
                axis: "latitude",
                ..
            }
        );

        let err = TargetLocation::new(10.0, 200.0).validate().unwrap_err();
        assert_matches!(
            err,
            CoreError::InvalidCoordinate {
                axis: "longitude",
                ..
            }
        );

        assert!(TargetLocation::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn position_serializes_missing_timestamp_as_null() {
        let json = serde_json::to_value(IssPosition::new(42.5, -74.25)).unwrap();
        assert_eq!(json["latitude"], 42.5);
        assert_eq!(json["longitude"], -74.25);
        assert!(json["reported_at"].is_null());
    }

    #[test]
    fn invalid_coordinate_display() {
        let err = TargetLocation::new(123.0, 0.0).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid coordinate: latitude = 123 (expected -90..=90)"
        );
    }
}
