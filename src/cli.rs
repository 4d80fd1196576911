mod collect;
mod heartbeat;
mod inverter;
mod location;
mod statistics;
mod watch;

use clap::{Parser, Subcommand};

use crate::cli::{collect::CollectArgs, statistics::StatisticsArgs, watch::WatchArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a single collection cycle and print the snapshot.
    #[clap(name = "collect")]
    Collect(Box<CollectArgs>),

    /// Keep collecting on a fixed period.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),

    /// Print the cumulative production of the inverter.
    #[clap(name = "statistics")]
    Statistics(Box<StatisticsArgs>),
}

impl Command {
    pub fn run(self) -> crate::prelude::Result {
        match self {
            Self::Collect(args) => args.run(),
            Self::Watch(args) => args.run(),
            Self::Statistics(args) => args.run(),
        }
    }
}
