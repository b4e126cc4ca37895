pub mod driver;
pub mod location;

pub use driver::{DriverSnapshot, UserRole};
pub use location::{Coordinate, NamedDestination, TimestampedCoordinate};
