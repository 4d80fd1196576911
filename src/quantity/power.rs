quantity!(Watts, suffix: "W", precision: 0);

quantity!(
    /// Apparent power.
    VoltAmperes,
    suffix: "VA",
    precision: 0
);

quantity!(
    /// Reactive («blind») power.
    VoltAmperesReactive,
    suffix: "var",
    precision: 0
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abs() {
        assert_eq!(Watts(-20.0).abs(), Watts(20.0));
        assert_eq!(Watts(13.0).abs(), Watts(13.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Watts(1234.4).to_string(), "1234 W");
        assert_eq!(VoltAmperesReactive(-7.0).to_string(), "-7 var");
    }

    #[test]
    fn test_zero() {
        assert_eq!(VoltAmperes::ZERO, VoltAmperes::default());
        assert_eq!(VoltAmperesReactive::ZERO.abs(), VoltAmperesReactive(0.0));
    }

    #[test]
    fn test_sum() {
        let total: Watts = [Watts(1.0), Watts(2.5), Watts(-0.5)].into_iter().sum();
        assert_eq!(total, Watts(3.0));
    }
}
