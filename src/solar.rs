//! Daylight window of a site, on top of the [`sunrise`] crate.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

/// Solar altitude of the sunrise: refraction plus the solar disc radius.
const HORIZON_ALTITUDE: f64 = -0.833;

const EARTH_OBLIQUITY: f64 = 23.44;

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Daylight {
    Window { sunrise: DateTime<Utc>, sunset: DateTime<Utc> },

    /// The sun does not set.
    PolarDay,

    /// The sun does not rise.
    PolarNight,
}

impl Daylight {
    #[must_use]
    pub fn contains<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        match self {
            Self::Window { sunrise, sunset } => {
                let instant = instant.with_timezone(&Utc);
                *sunrise <= instant && instant <= *sunset
            }
            Self::PolarDay => true,
            Self::PolarNight => false,
        }
    }
}

/// Daylight on the date at the location, longitude is positive to the east.
pub fn daylight(date: NaiveDate, latitude: f64, longitude: f64) -> Daylight {
    let cos_hour_angle = cos_sunrise_hour_angle(date, latitude);
    if cos_hour_angle < -1.0 {
        return Daylight::PolarDay;
    }
    if cos_hour_angle > 1.0 {
        return Daylight::PolarNight;
    }
    let (sunrise, sunset) =
        sunrise::sunrise_sunset(latitude, longitude, date.year(), date.month(), date.day());
    match (DateTime::from_timestamp(sunrise, 0), DateTime::from_timestamp(sunset, 0)) {
        (Some(sunrise), Some(sunset)) => Daylight::Window { sunrise, sunset },

        // Timestamps out of the representable range, only for absurd dates.
        _ => Daylight::PolarNight,
    }
}

/// Cosine of the sunrise hour angle, outside of `[-1, 1]` the sun never crosses the horizon.
fn cos_sunrise_hour_angle(date: NaiveDate, latitude: f64) -> f64 {
    let declination = (-EARTH_OBLIQUITY.to_radians().sin()
        * (360.0 / 365.24 * (f64::from(date.ordinal()) + 10.0)).to_radians().cos())
    .asin();
    let latitude = latitude.to_radians();
    (HORIZON_ALTITUDE.to_radians().sin() - latitude.sin() * declination.sin())
        / (latitude.cos() * declination.cos())
}
