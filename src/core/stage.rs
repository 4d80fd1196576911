use derive_more::Display;

use crate::api::fronius::FetchError;

/// Step of a collection cycle, in call order.
#[derive(Copy, Clone, Debug, Display, Eq, Hash, PartialEq)]
pub enum Stage {
    #[display("API version check")]
    ApiVersion,

    #[display("power flow")]
    PowerFlow,

    #[display("smart meter")]
    SmartMeter,

    #[display("cumulative inverter statistics")]
    CumulativeStatistics,

    #[display("inverter info")]
    InverterInfo,

    #[display("common inverter data")]
    CommonData,

    #[display("archive data")]
    Archive,
}

impl Stage {
    pub const ALL: [Self; 7] = [
        Self::ApiVersion,
        Self::PowerFlow,
        Self::SmartMeter,
        Self::CumulativeStatistics,
        Self::InverterInfo,
        Self::CommonData,
        Self::Archive,
    ];

    /// Optional stages only degrade the snapshot on failure, others abort the cycle.
    #[must_use]
    pub const fn is_optional(self) -> bool {
        matches!(self, Self::SmartMeter)
    }
}

/// Result of a stage, tagged with what the cycle should do next.
#[must_use]
#[derive(Debug)]
pub enum Outcome {
    Completed,

    /// Failed, but the cycle goes on.
    Degraded(FetchError),

    /// Failed, and the cycle ends here.
    Aborted(FetchError),
}

impl Outcome {
    pub fn new(stage: Stage, result: Result<(), FetchError>) -> Self {
        match result {
            Ok(()) => Self::Completed,
            Err(error) if stage.is_optional() => Self::Degraded(error),
            Err(error) => Self::Aborted(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error() -> FetchError {
        FetchError::DeviceStatus { code: 1, reason: "TestReason".to_owned() }
    }

    #[test]
    fn test_only_smart_meter_is_optional() {
        let optional: Vec<_> = Stage::ALL.into_iter().filter(|stage| stage.is_optional()).collect();
        assert_eq!(optional, [Stage::SmartMeter]);
    }

    #[test]
    fn test_outcome() {
        assert!(matches!(Outcome::new(Stage::PowerFlow, Ok(())), Outcome::Completed));
        assert!(matches!(Outcome::new(Stage::SmartMeter, Err(status_error())), Outcome::Degraded(_)));
        assert!(matches!(Outcome::new(Stage::Archive, Err(status_error())), Outcome::Aborted(_)));
    }
}
