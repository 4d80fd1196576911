//! Per-endpoint `Body.Data` shapes.
//!
//! Every field falls back to zero or empty when it is missing or `null`, nested objects included.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::{Display, Formatter},
};

use serde::Deserialize;
use serde_with::{DefaultOnNull, DisplayFromStr, serde_as};

use crate::quantity::{
    Percent,
    energy::WattHours,
    power::{VoltAmperes, VoltAmperesReactive, Watts},
};

/// `GetAPIVersion.cgi`.
#[derive(Deserialize)]
pub struct ApiVersion {
    #[serde(rename = "APIVersion")]
    pub version: VersionTag,

    #[serde(rename = "CompatibilityRange", default)]
    pub compatibility_range: String,
}

/// The version is documented as a number, but gets compared as a string.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum VersionTag {
    Number(u64),
    Text(String),
}

impl Display for VersionTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// `GetPowerFlowRealtimeData.fcgi`.
#[serde_as]
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct PowerFlow {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Site")]
    pub site: Site,
}

#[serde_as]
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct Site {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "E_Day")]
    pub day_energy: WattHours,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "E_Year")]
    pub year_energy: WattHours,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "E_Total")]
    pub total_energy: WattHours,

    /// `load`, `grid`, or `unknown`.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Meter_Location")]
    pub meter_location: String,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Mode")]
    pub mode: String,

    /// Negative when exporting to the grid.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "P_Grid")]
    pub grid: Watts,

    /// Negative when consuming.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "P_Load")]
    pub load: Watts,

    /// Negative when charging.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "P_Akku")]
    pub battery: Watts,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "P_PV")]
    pub pv: Watts,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "rel_Autonomy")]
    pub autonomy: Percent,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "rel_SelfConsumption")]
    pub self_consumption: Percent,
}

/// `GetMeterRealtimeData.cgi?Scope=System`.
#[serde_as]
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct MeterChannels {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "0")]
    pub zero: MeterChannel,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "1")]
    pub one: MeterChannel,
}

#[serde_as]
#[derive(Copy, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MeterChannel {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "PowerReal_P_Sum")]
    pub real_power: Watts,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "PowerReactive_Q_Sum")]
    pub reactive_power: VoltAmperesReactive,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "PowerApparent_S_Sum")]
    pub apparent_power: VoltAmperes,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "EnergyReal_WAC_Sum_Produced")]
    pub energy_produced: WattHours,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "EnergyReal_WAC_Sum_Consumed")]
    pub energy_consumed: WattHours,
}

/// `{"Value": …, "Unit": …}` wrapper of the inverter realtime collections.
#[serde_as]
#[derive(Copy, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Measured {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Value")]
    pub value: f64,
}

/// `GetInverterRealtimeData.cgi?Scope=Device&DataCollection=CumulationInverterData`.
#[serde_as]
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct CumulationData {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "DAY_ENERGY")]
    pub day_energy: Measured,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "YEAR_ENERGY")]
    pub year_energy: Measured,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "TOTAL_ENERGY")]
    pub total_energy: Measured,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "DeviceStatus")]
    pub device_status: DeviceStatus,
}

#[serde_as]
#[derive(Copy, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeviceStatus {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "StatusCode")]
    pub status_code: i64,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "ErrorCode")]
    pub error_code: i64,
}

/// `GetInverterRealtimeData.cgi?Scope=Device&DataCollection=CommonInverterData`.
#[serde_as]
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct CommonData {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "PAC")]
    pub ac_power: Measured,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "IAC")]
    pub ac_current: Measured,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "UAC")]
    pub ac_voltage: Measured,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "FAC")]
    pub ac_frequency: Measured,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "IDC")]
    pub dc_current: Measured,

    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "UDC")]
    pub dc_voltage: Measured,
}

/// `GetInverterInfo.cgi`, keyed by the device ID.
pub type InverterInfo = HashMap<String, InverterEntry>;

#[serde_as]
#[derive(Copy, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InverterEntry {
    /// Nameplate PV power.
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "PVPower")]
    pub pv_power: Watts,
}

/// `GetArchiveData.cgi`, keyed by the source like `inverter/1`.
pub type ArchiveData = HashMap<String, ArchiveSource>;

#[serde_as]
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ArchiveSource {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(rename = "Data")]
    pub channels: HashMap<String, ArchiveChannel>,
}

impl ArchiveSource {
    /// Most recent sample of the channel, zero when the channel is absent or empty.
    #[must_use]
    pub fn latest(&self, channel: &str) -> f64 {
        self.channels
            .get(channel)
            .and_then(|channel| channel.values.last_key_value())
            .map_or(0.0, |(_, value)| *value)
    }
}

#[serde_as]
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct ArchiveChannel {
    /// Samples keyed by the offset in seconds since the window start.
    #[serde_as(as = "DefaultOnNull<BTreeMap<DisplayFromStr, DefaultOnNull>>")]
    #[serde(rename = "Values")]
    pub values: BTreeMap<u64, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_number_ok() -> serde_json::Result<()> {
        // language=json
        let body = r#"{"APIVersion":1,"BaseURL":"/solar_api/v1/","CompatibilityRange":"1.8-1"}"#;
        let version = serde_json::from_str::<ApiVersion>(body)?;
        assert_eq!(version.version.to_string(), "1");
        assert_eq!(version.compatibility_range, "1.8-1");
        Ok(())
    }

    #[test]
    fn test_api_version_text_ok() -> serde_json::Result<()> {
        let version = serde_json::from_str::<ApiVersion>(r#"{"APIVersion":"1"}"#)?;
        assert_eq!(version.version.to_string(), "1");
        assert_eq!(version.compatibility_range, "");
        Ok(())
    }

    #[test]
    fn test_power_flow_nulls_ok() -> serde_json::Result<()> {
        // language=json
        let body = r#"{
            "Site": {
                "E_Day": 10,
                "E_Year": null,
                "Meter_Location": "grid",
                "Mode": "produce-only",
                "P_Akku": null,
                "P_Grid": -20.5,
                "P_Load": null,
                "P_PV": 16,
                "rel_Autonomy": null,
                "rel_SelfConsumption": null
            }
        }"#;
        let site = serde_json::from_str::<PowerFlow>(body)?.site;
        assert_eq!(site.day_energy, WattHours(10.0));
        assert_eq!(site.year_energy, WattHours::ZERO);
        assert_eq!(site.total_energy, WattHours::ZERO);
        assert_eq!(site.grid, Watts(-20.5));
        assert_eq!(site.battery, Watts::ZERO);
        assert_eq!(site.load, Watts::ZERO);
        assert_eq!(site.mode, "produce-only");
        Ok(())
    }

    #[test]
    fn test_meter_single_channel_ok() -> serde_json::Result<()> {
        // language=json
        let body = r#"{"1":{"PowerReal_P_Sum":6,"PowerReactive_Q_Sum":7,"PowerApparent_S_Sum":8,"EnergyReal_WAC_Sum_Produced":9,"EnergyReal_WAC_Sum_Consumed":10}}"#;
        let channels = serde_json::from_str::<MeterChannels>(body)?;
        assert_eq!(channels.zero.real_power, Watts::ZERO);
        assert_eq!(channels.one.real_power, Watts(6.0));
        assert_eq!(channels.one.energy_consumed, WattHours(10.0));
        Ok(())
    }

    #[test]
    fn test_cumulation_data_ok() -> serde_json::Result<()> {
        // language=json
        let body = r#"{"DeviceStatus":{"StatusCode":7,"ErrorCode":102},"DAY_ENERGY":{"Unit":"Wh","Value":1},"YEAR_ENERGY":{"Unit":"Wh","Value":2},"TOTAL_ENERGY":{"Unit":"Wh","Value":null}}"#;
        let data = serde_json::from_str::<CumulationData>(body)?;
        assert_eq!(data.day_energy.value, 1.0);
        assert_eq!(data.year_energy.value, 2.0);
        assert_eq!(data.total_energy.value, 0.0);
        assert_eq!(data.device_status.status_code, 7);
        assert_eq!(data.device_status.error_code, 102);
        Ok(())
    }

    #[test]
    fn test_archive_latest_sample() -> serde_json::Result<()> {
        // language=json
        let body = r#"{
            "inverter/1": {
                "Data": {
                    "Voltage_DC_String_1": {"Unit": "V", "Values": {"0": 298, "300": 301.5}},
                    "Temperature_Powerstage": {"Unit": "°C", "Values": {}}
                }
            }
        }"#;
        let data = serde_json::from_str::<ArchiveData>(body)?;
        let source = &data["inverter/1"];
        assert_eq!(source.latest("Voltage_DC_String_1"), 301.5);
        assert_eq!(source.latest("Temperature_Powerstage"), 0.0);
        assert_eq!(source.latest("Current_DC_String_2"), 0.0);
        Ok(())
    }

    #[test]
    fn test_common_data_null_wrapper_ok() -> serde_json::Result<()> {
        let data = serde_json::from_str::<CommonData>(r#"{"UDC":null,"IDC":{"Value":1}}"#)?;
        assert_eq!(data.dc_voltage.value, 0.0);
        assert_eq!(data.dc_current.value, 1.0);
        Ok(())
    }

    #[test]
    fn test_cumulation_data_null_wrappers_ok() -> serde_json::Result<()> {
        // language=json
        let body = r#"{"DeviceStatus":null,"DAY_ENERGY":null,"YEAR_ENERGY":{"Value":2},"TOTAL_ENERGY":null}"#;
        let data = serde_json::from_str::<CumulationData>(body)?;
        assert_eq!(data.day_energy.value, 0.0);
        assert_eq!(data.year_energy.value, 2.0);
        assert_eq!(data.device_status.status_code, 0);
        Ok(())
    }

    #[test]
    fn test_meter_null_channel_ok() -> serde_json::Result<()> {
        let channels =
            serde_json::from_str::<MeterChannels>(r#"{"0":null,"1":{"PowerReal_P_Sum":6}}"#)?;
        assert_eq!(channels.zero.real_power, Watts::ZERO);
        assert_eq!(channels.one.real_power, Watts(6.0));
        Ok(())
    }

    #[test]
    fn test_power_flow_null_site_ok() -> serde_json::Result<()> {
        let site = serde_json::from_str::<PowerFlow>(r#"{"Site":null}"#)?.site;
        assert_eq!(site.grid, Watts::ZERO);
        assert_eq!(site.mode, "");
        Ok(())
    }

    #[test]
    fn test_archive_null_channels_ok() -> serde_json::Result<()> {
        // language=json
        let body = r#"{
            "inverter/1": {"Data": null},
            "inverter/2": {"Data": {"Voltage_DC_String_1": {"Values": null}}}
        }"#;
        let data = serde_json::from_str::<ArchiveData>(body)?;
        assert_eq!(data["inverter/1"].latest("Voltage_DC_String_1"), 0.0);
        assert_eq!(data["inverter/2"].latest("Voltage_DC_String_1"), 0.0);
        Ok(())
    }
}
