pub mod atmosphere;
mod cannonball;
pub mod drag;
pub mod dynamics;
pub mod energy;
pub mod gravity;
pub mod orbital;
pub mod relativity;
pub mod shadow;
pub mod srp;
pub mod third_body;

pub use atmosphere::{AtmosphereType, DensityProvider};
pub use drag::{drag_accel, CannonballFixedDrag, DragAstroModel, SatelliteDragModel};
pub use dynamics::{total_acceleration, AccelerationModel, CentralBodyDynamics, EquationsOfMotion};
pub use relativity::relativity_accel;
pub use shadow::{shadow_model, ShadowModel};
pub use srp::{srp_accel, CannonballFixedSRP, SatelliteSrpModel, SolarEnvironment, SrpAstroModel, SrpType};
pub use third_body::{third_body_accel, ThirdBodyModel};
