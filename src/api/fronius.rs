//! [Fronius Solar API v1](https://www.fronius.com/en/solar-energy/installers-partners/technical-data/all-products/system-monitoring/open-interfaces/fronius-solar-api-json-) client.

mod error;
pub mod models;
mod request;
mod response;
mod transport;

use chrono::{DateTime, Local, SecondsFormat};
use serde::de::DeserializeOwned;

pub use self::{
    error::FetchError,
    request::Request,
    transport::{Fetch, HttpTransport},
};
use self::{
    models::{
        ApiVersion,
        ArchiveData,
        CommonData,
        CumulationData,
        InverterInfo,
        MeterChannels,
        PowerFlow,
    },
    response::Response,
};
use crate::prelude::*;

/// Archive channels requested for the string readings and the powerstage temperature.
pub const ARCHIVE_CHANNELS: [&str; 5] = [
    "Voltage_DC_String_1",
    "Voltage_DC_String_2",
    "Current_DC_String_1",
    "Current_DC_String_2",
    "Temperature_Powerstage",
];

/// Typed Solar API calls over a raw [`Fetch`] transport.
pub struct Api<F> {
    transport: F,
}

impl<F: Fetch> Api<F> {
    pub const fn new(transport: F) -> Self {
        Self { transport }
    }

    #[instrument(skip_all)]
    pub fn get_api_version(&self) -> Result<ApiVersion, FetchError> {
        let body = self.transport.fetch(&Request::new("GetAPIVersion.cgi"))?;
        serde_json::from_str(&body).map_err(FetchError::Decode)
    }

    #[instrument(skip_all)]
    pub fn get_power_flow(&self) -> Result<PowerFlow, FetchError> {
        self.get(&Request::new("GetPowerFlowRealtimeData.fcgi"))
    }

    #[instrument(skip_all)]
    pub fn get_meter_channels(&self) -> Result<MeterChannels, FetchError> {
        self.get(&Request::new("GetMeterRealtimeData.cgi").param("Scope", "System"))
    }

    #[instrument(skip_all, fields(device_id = device_id))]
    pub fn get_cumulation_data(&self, device_id: &str) -> Result<CumulationData, FetchError> {
        self.get(&Self::device_request(device_id, "CumulationInverterData"))
    }

    #[instrument(skip_all)]
    pub fn get_inverter_info(&self) -> Result<InverterInfo, FetchError> {
        self.get(&Request::new("GetInverterInfo.cgi"))
    }

    #[instrument(skip_all, fields(device_id = device_id))]
    pub fn get_common_data(&self, device_id: &str) -> Result<CommonData, FetchError> {
        self.get(&Self::device_request(device_id, "CommonInverterData"))
    }

    #[instrument(skip_all, fields(start = %start, end = %end))]
    pub fn get_archive(
        &self,
        start: &DateTime<Local>,
        end: &DateTime<Local>,
    ) -> Result<ArchiveData, FetchError> {
        let request = ARCHIVE_CHANNELS.into_iter().fold(
            Request::new("GetArchiveData.cgi")
                .param("Scope", "System")
                .param("StartDate", start.to_rfc3339_opts(SecondsFormat::Secs, false))
                .param("EndDate", end.to_rfc3339_opts(SecondsFormat::Secs, false)),
            |request, channel| request.param("Channel", channel),
        );
        self.get(&request)
    }

    fn device_request(device_id: &str, data_collection: &'static str) -> Request {
        Request::new("GetInverterRealtimeData.cgi")
            .param("Scope", "Device")
            .param("DeviceID", device_id)
            .param("DataCollection", data_collection)
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(request = %request))]
    fn get<D>(&self, request: &Request) -> Result<D, FetchError>
    where
        D: DeserializeOwned + Default,
    {
        let body = self.transport.fetch(request)?;
        let response: Response<D> = serde_json::from_str(&body).map_err(FetchError::Decode)?;
        response.into()
    }
}
