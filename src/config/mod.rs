pub mod force_models;
pub mod spacecraft;

pub use force_models::{DragConfig, ForceModelConfig, SrpConfig, ThirdBodyConfig};
pub use spacecraft::{SimpleSat, SpacecraftConfig};
