pub mod spacecraft;
pub mod state;

pub use spacecraft::SpacecraftProperties;
pub use state::{Parameters, State};
