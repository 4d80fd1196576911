use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::{
    api::fronius::models::CumulationData,
    core::snapshot::CumulativeEnergy,
    quantity::energy::KilowattHours,
};

/// Cumulative production of the inverter, along with its status.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct DailyStatistics {
    pub production: CumulativeEnergy,
    pub status_code: i64,
    pub error_code: i64,
}

impl From<&CumulationData> for DailyStatistics {
    fn from(data: &CumulationData) -> Self {
        Self {
            production: CumulativeEnergy::from(data),
            status_code: data.device_status.status_code,
            error_code: data.device_status.error_code,
        }
    }
}

impl Display for DailyStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Daily Production: {}", KilowattHours::from(self.production.daily))?;
        writeln!(f, "Yearly Production: {}", KilowattHours::from(self.production.yearly))?;
        write!(f, "Total Production: {}", KilowattHours::from(self.production.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::energy::WattHours;

    #[test]
    fn test_display() {
        let statistics = DailyStatistics {
            production: CumulativeEnergy {
                daily: WattHours(12_340.0),
                yearly: WattHours(2_500_000.0),
                total: WattHours(3.0),
            },
            status_code: 7,
            error_code: 0,
        };
        assert_eq!(
            statistics.to_string(),
            "Daily Production: 12.34 kWh\nYearly Production: 2500.00 kWh\nTotal Production: 0.00 kWh",
        );
    }
}
