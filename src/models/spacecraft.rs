/// Physical properties of a spherical ("cannonball") spacecraft.
pub trait SpacecraftProperties {
    fn mass(&self) -> f64;
    fn radius(&self) -> f64;
    fn drag_coefficient(&self) -> f64;
    fn reflectivity_coefficient(&self) -> f64;
}
