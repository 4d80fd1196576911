use clap::Parser;

use crate::{cli::inverter::InverterArgs, prelude::*};

#[derive(Parser)]
pub struct StatisticsArgs {
    #[clap(flatten)]
    inverter: InverterArgs,

    /// Print the statistics as JSON.
    #[clap(long)]
    json: bool,
}

impl StatisticsArgs {
    pub fn run(self) -> Result {
        let statistics = self.inverter.connect().daily_statistics()?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&statistics)?);
        } else {
            println!("{statistics}");
        }
        Ok(())
    }
}
