//! Machine entities.

pub mod machine;

pub use machine::{Availability, FuelKind, LiftKind, Machine, MachineCategory};
