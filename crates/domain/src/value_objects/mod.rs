//! Value Objects - Immutable, identity-less domain primitives

mod coordinate;
mod estimates;
mod reply_message;
mod route_id;

pub use coordinate::Coordinate;
pub use estimates::{BusEtaEstimate, WalkEstimate};
pub use reply_message::ReplyMessage;
pub use route_id::RouteId;
