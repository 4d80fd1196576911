use std::ops::Mul;

use crate::quantity::power::Watts;

quantity!(Volts, suffix: "V", precision: 1);
quantity!(Amperes, suffix: "A", precision: 2);
quantity!(Hertz, suffix: "Hz", precision: 2);

impl Mul<Amperes> for Volts {
    type Output = Watts;

    fn mul(self, current: Amperes) -> Self::Output {
        Watts(self.0 * current.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power() {
        assert_eq!(Volts(105.0) * Amperes(104.0), Watts(10920.0));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("230.5".parse::<Volts>().ok(), Some(Volts(230.5)));
    }
}
