use clap::Parser;

use crate::{api::fronius::HttpTransport, core::collector::Collector};

#[derive(Parser)]
pub struct InverterArgs {
    /// Host name or IP address of the inverter's data manager.
    #[clap(long, env = "INVERTER_HOST")]
    host: String,

    #[clap(long, env = "INVERTER_PORT", default_value = "80")]
    port: u16,

    /// Device ID of the inverter behind the data manager.
    #[clap(long = "device-id", env = "INVERTER_DEVICE_ID", default_value = "1")]
    device_id: String,
}

impl InverterArgs {
    pub fn connect(&self) -> Collector<HttpTransport> {
        Collector::connect(&self.host, self.port, &self.device_id)
    }
}
