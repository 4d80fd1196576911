pub mod fronius;
