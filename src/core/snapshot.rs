use chrono::{DateTime, Datelike, Local, NaiveDate, Weekday};
use serde::Serialize;

use crate::{
    api::fronius::models::{CommonData, CumulationData, MeterChannel, MeterChannels, Site},
    quantity::{
        Celsius,
        Percent,
        electric::{Amperes, Hertz, Volts},
        energy::WattHours,
        power::{VoltAmperes, VoltAmperesReactive, Watts},
    },
};

pub const PRODUCT_NAME: &str = "Fronius Symo Series";

/// Unified record of one collection cycle.
///
/// Sections whose stage did not complete stay zero-valued.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    pub device: DeviceInfo,
    pub ac: AcSide,
    pub dc: DcSide,

    /// Production of the whole site, from the power flow.
    pub site_production: CumulativeEnergy,

    /// Production of the polled inverter alone.
    pub inverter_production: CumulativeEnergy,

    pub site: SiteFlow,
    pub meter_flow: DerivedMeterFlow,
    pub smart_meter: SmartMeter,
    pub health: DeviceHealth,
    pub calendar: CalendarStatistics,
}

impl TelemetrySnapshot {
    pub fn new(collected_at: DateTime<Local>) -> Self {
        Self {
            device: DeviceInfo::new(collected_at),
            ac: AcSide::default(),
            dc: DcSide::default(),
            site_production: CumulativeEnergy::default(),
            inverter_production: CumulativeEnergy::default(),
            site: SiteFlow::default(),
            meter_flow: DerivedMeterFlow::default(),
            smart_meter: SmartMeter::default(),
            health: DeviceHealth::default(),
            calendar: CalendarStatistics::new(&collected_at),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeviceInfo {
    /// Solar API version as reported by the device.
    pub api_version: String,

    pub compatibility_range: String,
    pub product: String,
    pub collected_at: DateTime<Local>,

    /// Nameplate PV power of the inverter.
    pub nameplate_power: Watts,
}

impl DeviceInfo {
    fn new(collected_at: DateTime<Local>) -> Self {
        Self {
            api_version: String::new(),
            compatibility_range: String::new(),
            product: PRODUCT_NAME.to_owned(),
            collected_at,
            nameplate_power: Watts::ZERO,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct AcSide {
    pub voltage: Volts,
    pub current: Amperes,
    pub frequency: Hertz,
    pub power: Watts,
}

impl From<&CommonData> for AcSide {
    fn from(data: &CommonData) -> Self {
        Self {
            voltage: Volts(data.ac_voltage.value),
            current: Amperes(data.ac_current.value),
            frequency: Hertz(data.ac_frequency.value),
            power: Watts(data.ac_power.value),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct DcSide {
    pub voltage: Volts,
    pub current: Amperes,

    /// Always `voltage × current`, the device's own figure is not used.
    pub power: Watts,

    pub string_1: PvString,

    /// Only wired on multi-string installations.
    pub string_2: PvString,
}

impl DcSide {
    /// Take the totals from the common data, keeping the string readings.
    pub fn with_totals(self, voltage: Volts, current: Amperes) -> Self {
        Self { voltage, current, power: voltage * current, ..self }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct PvString {
    pub voltage: Volts,
    pub current: Amperes,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct CumulativeEnergy {
    pub daily: WattHours,
    pub yearly: WattHours,
    pub total: WattHours,
}

impl From<&Site> for CumulativeEnergy {
    fn from(site: &Site) -> Self {
        Self { daily: site.day_energy, yearly: site.year_energy, total: site.total_energy }
    }
}

impl From<&CumulationData> for CumulativeEnergy {
    fn from(data: &CumulationData) -> Self {
        Self {
            daily: WattHours(data.day_energy.value),
            yearly: WattHours(data.year_energy.value),
            total: WattHours(data.total_energy.value),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SiteFlow {
    /// Negative when exporting, positive when importing.
    pub grid: Watts,

    pub load: Watts,
    pub battery: Watts,
    pub pv: Watts,
    pub autonomy: Percent,
    pub self_consumption: Percent,
    pub meter_location: String,
    pub mode: String,
}

impl From<Site> for SiteFlow {
    fn from(site: Site) -> Self {
        Self {
            grid: site.grid,
            load: site.load,
            battery: site.battery,
            pv: site.pv,
            autonomy: site.autonomy,
            self_consumption: site.self_consumption,
            meter_location: site.meter_location,
            mode: site.mode,
        }
    }
}

/// Non-negative split of the signed grid power.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct DerivedMeterFlow {
    /// Pushed to the grid.
    pub feed: Watts,

    /// Drawn from the grid.
    pub purchased: Watts,

    /// Consumed locally.
    pub used: Watts,
}

impl DerivedMeterFlow {
    pub fn new(grid: Watts, load: Watts) -> Self {
        if grid < Watts::ZERO {
            Self { feed: grid.abs(), purchased: Watts::ZERO, used: load.abs() }
        } else {
            Self { feed: Watts::ZERO, purchased: grid, used: load.abs() }
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct SmartMeter {
    pub real_power: Watts,
    pub reactive_power: VoltAmperesReactive,
    pub apparent_power: VoltAmperes,
    pub energy_produced: WattHours,
    pub energy_consumed: WattHours,
}

impl From<MeterChannel> for SmartMeter {
    fn from(channel: MeterChannel) -> Self {
        Self {
            real_power: channel.real_power,
            reactive_power: channel.reactive_power,
            apparent_power: channel.apparent_power,
            energy_produced: channel.energy_produced,
            energy_consumed: channel.energy_consumed,
        }
    }
}

impl From<MeterChannels> for SmartMeter {
    /// The meter is wired to either channel: zero real power on channel 0 means it is on channel 1.
    fn from(channels: MeterChannels) -> Self {
        if channels.zero.real_power == Watts::ZERO {
            channels.one.into()
        } else {
            channels.zero.into()
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct DeviceHealth {
    pub status_code: i64,
    pub error_code: i64,

    /// Powerstage temperature.
    pub temperature: Celsius,
}

/// Calendar position of the collection, for grouping the daily production.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CalendarStatistics {
    pub date: NaiveDate,
    pub iso_week: u32,
    pub month: u32,
    pub weekday: Weekday,

    /// Today's production of the inverter.
    pub production: WattHours,
}

impl CalendarStatistics {
    fn new(collected_at: &DateTime<Local>) -> Self {
        Self {
            date: collected_at.date_naive(),
            iso_week: collected_at.iso_week().week(),
            month: collected_at.month(),
            weekday: collected_at.weekday(),
            production: WattHours::ZERO,
        }
    }
}
