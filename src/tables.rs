use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{core::snapshot::TelemetrySnapshot, quantity::power::Watts};

pub fn build_snapshot_table(snapshot: &TelemetrySnapshot) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Section", "Reading", "Value"]);

    let grid_color = if snapshot.site.grid < Watts::ZERO { Color::Green } else { Color::Red };
    let rows = [
        ("Device", "Product", snapshot.device.product.clone(), None),
        ("", "API version", snapshot.device.api_version.clone(), None),
        ("", "Nameplate power", snapshot.device.nameplate_power.to_string(), None),
        ("", "Collected at", snapshot.device.collected_at.format("%F %T").to_string(), None),
        ("AC", "Voltage", snapshot.ac.voltage.to_string(), None),
        ("", "Current", snapshot.ac.current.to_string(), None),
        ("", "Frequency", snapshot.ac.frequency.to_string(), None),
        ("", "Power", snapshot.ac.power.to_string(), None),
        ("PV", "Voltage", snapshot.dc.voltage.to_string(), None),
        ("", "Current", snapshot.dc.current.to_string(), None),
        ("", "Power", snapshot.dc.power.to_string(), Some(Color::Green)),
        ("", "String 1", format!("{} {}", snapshot.dc.string_1.voltage, snapshot.dc.string_1.current), None),
        ("", "String 2", format!("{} {}", snapshot.dc.string_2.voltage, snapshot.dc.string_2.current), None),
        ("Site", "Grid", snapshot.site.grid.to_string(), Some(grid_color)),
        ("", "Load", snapshot.site.load.to_string(), None),
        ("", "Battery", snapshot.site.battery.to_string(), None),
        ("", "Autonomy", snapshot.site.autonomy.to_string(), None),
        ("", "Self-consumption", snapshot.site.self_consumption.to_string(), None),
        ("", "Produced today", snapshot.site_production.daily.to_string(), None),
        ("Meter", "Feed", snapshot.meter_flow.feed.to_string(), None),
        ("", "Purchased", snapshot.meter_flow.purchased.to_string(), None),
        ("", "Used", snapshot.meter_flow.used.to_string(), None),
        ("", "Real power", snapshot.smart_meter.real_power.to_string(), None),
        ("", "Apparent power", snapshot.smart_meter.apparent_power.to_string(), None),
        ("Inverter", "Produced today", snapshot.inverter_production.daily.to_string(), None),
        ("", "Produced in total", snapshot.inverter_production.total.to_string(), None),
        ("", "Status", format!("{} / {}", snapshot.health.status_code, snapshot.health.error_code), None),
        ("", "Temperature", snapshot.health.temperature.to_string(), None),
    ];
    for (section, reading, value, color) in rows {
        table.add_row(vec![
            Cell::new(section).add_attribute(Attribute::Bold),
            Cell::new(reading).add_attribute(Attribute::Dim),
            Cell::new(value).set_alignment(CellAlignment::Right).fg(color.unwrap_or(Color::Reset)),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use super::*;
    use crate::quantity::electric::{Amperes, Volts};

    #[test]
    fn test_snapshot_table() {
        let mut snapshot = TelemetrySnapshot::new(Local::now());
        snapshot.dc = snapshot.dc.with_totals(Volts(105.0), Amperes(104.0));
        let table = build_snapshot_table(&snapshot).to_string();
        assert!(table.contains("10920 W"), "{table}");
        assert!(table.contains("Fronius Symo Series"), "{table}");
    }
}
