// Earth
pub const MU_EARTH: f64 = 3.986004415e14; // Earth's gravitational parameter (m³/s²)
pub const R_EARTH: f64 = 6.378137e6; // Equatorial radius of Earth (m)
pub const EARTH_ANGULAR_VELOCITY: f64 = 7.292115146706979e-5; // Earth's rotation rate (rad/s)
pub const WGS84_A: f64 = 6378137.0; // Semi-major axis [m]
pub const WGS84_F: f64 = 1.0 / 298.257223563; // Flattening

// Sun
pub const R_SUN: f64 = 6.955e8; // Radius of the Sun (m)
pub const AU: f64 = 1.495978707e11; // Astronomical unit (m)
pub const SOLAR_PRESSURE_1AU: f64 = 4.56e-6; // Solar radiation pressure at 1 AU (N/m²)

// Time
pub const JD_J2000: f64 = 2451545.0; // Julian date of the J2000 epoch
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;
pub const SECONDS_PER_DAY: f64 = 86400.0;

// Math
pub const PI: f64 = std::f64::consts::PI;
