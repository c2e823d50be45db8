//! Day/night determination from the sun's altitude.

use chrono::{DateTime, Utc};

use iss_core::TargetLocation;

/// Decides whether it is night at a location for a given instant.
pub trait SolarCalculator: Send + Sync {
    fn is_night(&self, target: &TargetLocation, at: DateTime<Utc>) -> bool;
}

/// [`SolarCalculator`] backed by the `sun` crate's position algorithm.
///
/// Night means the sun's centre is below the geometric horizon (altitude
/// under 0°). Atmospheric refraction is not applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunCalculator;

impl SunCalculator {
    /// Sun altitude above the horizon in degrees.
    pub fn altitude_deg(target: &TargetLocation, at: DateTime<Utc>) -> f64 {
        let pos = sun::pos(at.timestamp_millis(), target.latitude, target.longitude);
        pos.altitude.to_degrees()
    }
}

impl SolarCalculator for SunCalculator {
    fn is_night(&self, target: &TargetLocation, at: DateTime<Utc>) -> bool {
        Self::altitude_deg(target, at) < 0.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn equator_noon_is_day() {
        let target = TargetLocation::new(0.0, 0.0);
        let at = utc(2024, 3, 20, 12);
        assert!(SunCalculator::altitude_deg(&target, at) > 80.0);
        assert!(!SunCalculator.is_night(&target, at));
    }

    #[test]
    fn equator_midnight_is_night() {
        let target = TargetLocation::new(0.0, 0.0);
        let at = utc(2024, 3, 20, 0);
        assert!(SunCalculator::altitude_deg(&target, at) < -80.0);
        assert!(SunCalculator.is_night(&target, at));
    }

    #[test]
    fn longitude_shifts_local_night() {
        // 12:00 UTC is around local midnight on the antimeridian.
        let target = TargetLocation::new(0.0, 180.0);
        assert!(SunCalculator.is_night(&target, utc(2024, 3, 20, 12)));
    }

    #[test]
    fn arctic_midsummer_midnight_is_still_day() {
        let target = TargetLocation::new(80.0, 0.0);
        assert!(!SunCalculator.is_night(&target, utc(2024, 6, 21, 0)));
    }

    #[test]
    fn antarctic_midwinter_noon_is_night() {
        let target = TargetLocation::new(-80.0, 0.0);
        assert!(SunCalculator.is_night(&target, utc(2024, 6, 21, 12)));
    }
}
