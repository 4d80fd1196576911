use chrono::{DateTime, Local};
use clap::Parser;

use crate::solar::daylight;

/// Site coordinates, collection is limited to daylight when both are set.
#[derive(Parser)]
pub struct LocationArgs {
    /// Degrees, positive to the north.
    #[clap(long, env = "LATITUDE", allow_hyphen_values = true, requires = "longitude")]
    latitude: Option<f64>,

    /// Degrees, positive to the east.
    #[clap(long, env = "LONGITUDE", allow_hyphen_values = true, requires = "latitude")]
    longitude: Option<f64>,
}

impl LocationArgs {
    #[must_use]
    pub fn is_daylight(&self, now: &DateTime<Local>) -> bool {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => {
                daylight(now.date_naive(), latitude, longitude).contains(now)
            }
            _ => true,
        }
    }
}
