pub mod coordinate_transformation;
pub mod eop_errors;
mod eop_manager;
pub mod eop_table;

pub use coordinate_transformation::{gcrs_to_itrs, itrs_to_geodetic, Geodetic};
pub use eop_errors::EOPErrors;
pub use eop_table::{EOPData, EopTable};
