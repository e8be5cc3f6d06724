//! Domain layer for Busline
//!
//! Contains the core types of the bus-ETA pipeline: coordinates, route
//! identifiers, bus stops, estimates, and the bounded SMS reply. This layer
//! has no I/O and no async; everything here is created, consumed, and
//! discarded within a single request.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
