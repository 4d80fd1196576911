use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
};

use crate::{core::snapshot::TelemetrySnapshot, prelude::*};

/// Destination of the collected snapshots.
pub trait Store {
    fn store(&mut self, snapshot: &TelemetrySnapshot) -> Result;
}

/// Appends one JSON document per snapshot, one per line.
pub struct JsonLinesStore<W> {
    writer: W,
}

impl JsonLinesStore<BufWriter<File>> {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open `{}`", path.display()))?;
        info!("opened");
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W> JsonLinesStore<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Store for JsonLinesStore<W> {
    fn store(&mut self, snapshot: &TelemetrySnapshot) -> Result {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;
    use crate::quantity::power::Watts;

    #[test]
    fn test_json_lines() -> Result {
        let collected_at = Local.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        let mut snapshot = TelemetrySnapshot::new(collected_at);
        snapshot.dc.power = Watts(10920.0);

        let mut store = JsonLinesStore::new(Vec::new());
        store.store(&snapshot)?;
        store.store(&TelemetrySnapshot::new(collected_at))?;

        let output = String::from_utf8(store.into_inner())?;
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0])?;
        assert_eq!(first["dc"]["power"], 10920.0);
        assert_eq!(first["device"]["product"], "Fronius Symo Series");
        Ok(())
    }
}
