#[macro_use]
mod macros;

pub mod electric;
pub mod energy;
pub mod power;

quantity!(Celsius, suffix: "°C", precision: 1);
quantity!(Percent, suffix: "%", precision: 1);
