use std::path::PathBuf;

use clap::Parser;

use crate::{
    cli::{heartbeat::HeartbeatArgs, inverter::InverterArgs},
    prelude::*,
    store::{JsonLinesStore, Store},
    tables::build_snapshot_table,
};

#[derive(Parser)]
pub struct CollectArgs {
    #[clap(flatten)]
    inverter: InverterArgs,

    /// Print the snapshot as JSON instead of a table.
    #[clap(long)]
    json: bool,

    /// Also append the snapshot to this JSON lines file.
    #[clap(long = "output", env = "OUTPUT_PATH")]
    output_path: Option<PathBuf>,

    #[clap(flatten)]
    heartbeat: HeartbeatArgs,
}

impl CollectArgs {
    pub fn run(self) -> Result {
        let snapshot = match self.inverter.connect().collect() {
            Ok(snapshot) => snapshot,
            Err(error) => {
                debug!(partial = ?error.partial(), "collected so far");
                return Err(error.into());
            }
        };
        if self.json {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        } else {
            println!("{}", build_snapshot_table(&snapshot));
        }
        if let Some(path) = &self.output_path {
            JsonLinesStore::open(path)?.store(&snapshot)?;
        }
        self.heartbeat.send();
        Ok(())
    }
}
