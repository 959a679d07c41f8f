pub mod celestial_body;
pub mod ephemeris;

pub use celestial_body::CelestialBody;
pub use ephemeris::{get_position, EphemerisType};
