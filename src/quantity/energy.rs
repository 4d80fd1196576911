quantity!(WattHours, suffix: "Wh", precision: 0);
quantity!(KilowattHours, suffix: "kWh", precision: 2);

impl From<WattHours> for KilowattHours {
    fn from(watt_hours: WattHours) -> Self {
        Self(watt_hours.0 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_watt_hours_into_kilowatt_hours() {
        for (watt_hours, kilowatt_hours) in [
            (1000.0, 1.0),
            (1500.0, 1.5),
            (1234.56, 1.234_56),
            (1_000_000.0, 1000.0),
            (0.0, 0.0),
            (1.0, 0.001),
            (-1000.0, -1.0),
        ] {
            assert_abs_diff_eq!(
                KilowattHours::from(WattHours(watt_hours)).0,
                kilowatt_hours,
                epsilon = 0.001,
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(KilowattHours(1.5).to_string(), "1.50 kWh");
        assert_eq!(WattHours(3.0).to_string(), "3 Wh");
    }
}
