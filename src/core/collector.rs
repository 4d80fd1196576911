use bon::bon;
use chrono::{DateTime, Local, TimeDelta};
use thiserror::Error;

use crate::{
    api::fronius::{Api, Fetch, FetchError, HttpTransport},
    core::{
        snapshot::{AcSide, CumulativeEnergy, DerivedMeterFlow, PvString, SiteFlow, TelemetrySnapshot},
        stage::{Outcome, Stage},
        statistics::DailyStatistics,
    },
    prelude::*,
    quantity::{
        Celsius,
        electric::{Amperes, Volts},
        power::Watts,
    },
};

/// The only Solar API version the collector understands.
pub const SUPPORTED_API_VERSION: &str = "1";

/// A mandatory stage failed, the cycle has been aborted.
#[derive(Debug, Error)]
#[error("{stage} failed: {cause}")]
pub struct CollectError {
    pub stage: Stage,
    pub cause: FetchError,
    partial: Box<TelemetrySnapshot>,
}

impl CollectError {
    fn new(stage: Stage, cause: FetchError, partial: TelemetrySnapshot) -> Self {
        Self { stage, cause, partial: Box::new(partial) }
    }

    /// Snapshot as collected up to the failed stage.
    pub fn partial(&self) -> &TelemetrySnapshot {
        &self.partial
    }
}

/// Runs the collection cycles against a single inverter.
pub struct Collector<F> {
    api: Api<F>,
    device_id: String,
    archive_lookback: TimeDelta,
}

impl Collector<HttpTransport> {
    pub fn connect(host: &str, port: u16, device_id: impl Into<String>) -> Self {
        Self::builder().transport(HttpTransport::new(host, port)).device_id(device_id).build()
    }
}

#[bon]
impl<F: Fetch> Collector<F> {
    #[builder]
    pub fn new(
        transport: F,
        #[builder(into)] device_id: String,
        #[builder(default = TimeDelta::seconds(400))] archive_lookback: TimeDelta,
    ) -> Self {
        Self { api: Api::new(transport), device_id, archive_lookback }
    }

    pub fn collect(&self) -> Result<TelemetrySnapshot, CollectError> {
        self.collect_at(Local::now())
    }

    /// Run one full cycle, `now` is the collection timestamp and the end of the archive window.
    #[instrument(skip_all, fields(device_id = %self.device_id))]
    pub fn collect_at(&self, now: DateTime<Local>) -> Result<TelemetrySnapshot, CollectError> {
        let mut snapshot = TelemetrySnapshot::new(now);
        for stage in Stage::ALL {
            match Outcome::new(stage, self.run(stage, now, &mut snapshot)) {
                Outcome::Completed => {
                    debug!(%stage, "completed");
                }
                Outcome::Degraded(error) => {
                    warn!(%stage, "skipped: {error}");
                }
                Outcome::Aborted(error) => {
                    return Err(CollectError::new(stage, error, snapshot));
                }
            }
        }
        info!(
            grid = %snapshot.site.grid,
            load = %snapshot.site.load,
            pv = %snapshot.dc.power,
            "collected"
        );
        Ok(snapshot)
    }

    /// Check the API version and fetch the inverter's cumulative production only.
    #[instrument(skip_all, fields(device_id = %self.device_id))]
    pub fn daily_statistics(&self) -> Result<DailyStatistics, FetchError> {
        ensure_supported(&self.api.get_api_version()?.version.to_string())?;
        Ok(DailyStatistics::from(&self.api.get_cumulation_data(&self.device_id)?))
    }

    /// Each stage writes into the snapshot only after its response has been fully decoded.
    fn run(
        &self,
        stage: Stage,
        now: DateTime<Local>,
        snapshot: &mut TelemetrySnapshot,
    ) -> Result<(), FetchError> {
        match stage {
            Stage::ApiVersion => self.check_api_version(snapshot),
            Stage::PowerFlow => self.read_power_flow(snapshot),
            Stage::SmartMeter => {
                snapshot.smart_meter = self.api.get_meter_channels()?.into();
                Ok(())
            }
            Stage::CumulativeStatistics => self.read_cumulation_data(snapshot),
            Stage::InverterInfo => {
                let info = self.api.get_inverter_info()?;
                snapshot.device.nameplate_power =
                    info.get(&self.device_id).map_or(Watts::ZERO, |entry| entry.pv_power);
                Ok(())
            }
            Stage::CommonData => {
                let data = self.api.get_common_data(&self.device_id)?;
                snapshot.ac = AcSide::from(&data);
                snapshot.dc = snapshot
                    .dc
                    .with_totals(Volts(data.dc_voltage.value), Amperes(data.dc_current.value));
                Ok(())
            }
            Stage::Archive => self.read_archive(now, snapshot),
        }
    }

    fn check_api_version(&self, snapshot: &mut TelemetrySnapshot) -> Result<(), FetchError> {
        let response = self.api.get_api_version()?;
        snapshot.device.api_version = response.version.to_string();
        snapshot.device.compatibility_range = response.compatibility_range;
        ensure_supported(&snapshot.device.api_version)
    }

    fn read_power_flow(&self, snapshot: &mut TelemetrySnapshot) -> Result<(), FetchError> {
        let site = self.api.get_power_flow()?.site;
        snapshot.site_production = CumulativeEnergy::from(&site);
        snapshot.meter_flow = DerivedMeterFlow::new(site.grid, site.load);
        snapshot.site = SiteFlow::from(site);
        Ok(())
    }

    fn read_cumulation_data(&self, snapshot: &mut TelemetrySnapshot) -> Result<(), FetchError> {
        let data = self.api.get_cumulation_data(&self.device_id)?;
        snapshot.inverter_production = CumulativeEnergy::from(&data);
        snapshot.calendar.production = snapshot.inverter_production.daily;
        snapshot.health.status_code = data.device_status.status_code;
        snapshot.health.error_code = data.device_status.error_code;
        Ok(())
    }

    fn read_archive(
        &self,
        now: DateTime<Local>,
        snapshot: &mut TelemetrySnapshot,
    ) -> Result<(), FetchError> {
        let mut archive = self.api.get_archive(&(now - self.archive_lookback), &now)?;
        let source = archive.remove(&format!("inverter/{}", self.device_id)).unwrap_or_default();
        snapshot.dc.string_1 = PvString {
            voltage: Volts(source.latest("Voltage_DC_String_1")),
            current: Amperes(source.latest("Current_DC_String_1")),
        };
        snapshot.dc.string_2 = PvString {
            voltage: Volts(source.latest("Voltage_DC_String_2")),
            current: Amperes(source.latest("Current_DC_String_2")),
        };
        snapshot.health.temperature = Celsius(source.latest("Temperature_Powerstage"));
        Ok(())
    }
}

fn ensure_supported(version: &str) -> Result<(), FetchError> {
    if version == SUPPORTED_API_VERSION {
        Ok(())
    } else {
        Err(FetchError::VersionMismatch {
            reported: version.to_owned(),
            expected: SUPPORTED_API_VERSION,
        })
    }
}
