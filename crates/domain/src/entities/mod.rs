//! Entities - domain objects with identity

mod bus_stop;

pub use bus_stop::BusStop;
