use super::spacecraft::SpacecraftConfig;
use crate::bodies::{CelestialBody, EphemerisType};
use crate::coordinates::EopTable;
use crate::errors::ForceModelError;
use crate::physics::atmosphere::AtmosphereType;
use crate::physics::drag::{CannonballFixedDrag, DragAstroModel, SatelliteDragModel};
use crate::physics::dynamics::AccelerationModel;
use crate::physics::shadow::ShadowModel;
use crate::physics::srp::{CannonballFixedSRP, SatelliteSrpModel, SrpAstroModel, SrpType};
use crate::physics::third_body::ThirdBodyModel;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::sync::Arc;

/// Perturbations to enable on top of central-body gravity.
///
/// Model selectors are plain strings so configuration files stay readable; they are
/// resolved through `FromStr` when the models are built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceModelConfig {
    pub spacecraft: SpacecraftConfig,
    pub drag: Option<DragConfig>,
    pub srp: Option<SrpConfig>,
    pub third_bodies: Vec<ThirdBodyConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    #[serde(default = "default_atmosphere")]
    pub atmosphere: String,
    /// Overrides the coefficient derived from the spacecraft [m²/kg].
    #[serde(default)]
    pub ballistic_coeff: Option<f64>,
    /// Read the coefficient from the simulation parameters instead.
    #[serde(default)]
    pub from_state: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SrpConfig {
    #[serde(default = "default_srp_type")]
    pub srp_type: String,
    #[serde(default = "default_shadow_model")]
    pub shadow_model: String,
    #[serde(default)]
    pub reflectivity_ballistic_coeff: Option<f64>,
    #[serde(default)]
    pub from_state: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThirdBodyConfig {
    pub body: String,
    #[serde(default = "default_ephemeris")]
    pub ephemeris: String,
}

fn default_atmosphere() -> String {
    AtmosphereType::ExpAtmo.to_string()
}

fn default_srp_type() -> String {
    SrpType::Cannonball.to_string()
}

fn default_shadow_model() -> String {
    ShadowModel::Conical.to_string()
}

fn default_ephemeris() -> String {
    EphemerisType::Vallado.to_string()
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            atmosphere: default_atmosphere(),
            ballistic_coeff: None,
            from_state: false,
        }
    }
}

impl Default for SrpConfig {
    fn default() -> Self {
        Self {
            srp_type: default_srp_type(),
            shadow_model: default_shadow_model(),
            reflectivity_ballistic_coeff: None,
            from_state: false,
        }
    }
}

impl ThirdBodyConfig {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            ephemeris: default_ephemeris(),
        }
    }
}

impl DragConfig {
    pub fn satellite_model(&self, spacecraft: &SpacecraftConfig) -> Result<SatelliteDragModel, ForceModelError> {
        if self.from_state {
            return Ok(SatelliteDragModel::State);
        }
        let model = match self.ballistic_coeff {
            Some(bc) => CannonballFixedDrag::from_ballistic_coeff(bc)?,
            None => CannonballFixedDrag::from_spacecraft(spacecraft)?,
        };
        Ok(model.into())
    }
}

impl SrpConfig {
    pub fn satellite_model(&self, spacecraft: &SpacecraftConfig) -> Result<SatelliteSrpModel, ForceModelError> {
        if self.from_state {
            return Ok(SatelliteSrpModel::State);
        }
        let model = match self.reflectivity_ballistic_coeff {
            Some(rc) => CannonballFixedSRP::from_reflectivity_ballistic_coeff(rc)?,
            None => CannonballFixedSRP::from_spacecraft(spacecraft)?,
        };
        Ok(model.into())
    }
}

impl ForceModelConfig {
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, ForceModelError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ForceModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Drag, SRP and the Sun and Moon with their default settings.
    pub fn full(spacecraft: SpacecraftConfig) -> Self {
        Self {
            spacecraft,
            drag: Some(DragConfig::default()),
            srp: Some(SrpConfig::default()),
            third_bodies: vec![ThirdBodyConfig::new("Sun"), ThirdBodyConfig::new("Moon")],
        }
    }

    /// Resolves every selector and builds the enabled models.
    ///
    /// `eop` is only needed by drag, which converts positions to the Earth-fixed frame.
    pub fn build(&self, eop: Arc<EopTable>) -> Result<Vec<Box<dyn AccelerationModel>>, ForceModelError> {
        self.spacecraft.validate()?;
        let mut models: Vec<Box<dyn AccelerationModel>> = Vec::new();

        if let Some(drag) = &self.drag {
            let atmosphere: AtmosphereType = drag.atmosphere.parse()?;
            log::info!("Drag enabled with {} atmosphere", atmosphere);
            models.push(Box::new(DragAstroModel::new(
                drag.satellite_model(&self.spacecraft)?,
                atmosphere,
                eop,
            )));
        }

        if let Some(srp) = &self.srp {
            let srp_type: SrpType = srp.srp_type.parse()?;
            let shadow: ShadowModel = srp.shadow_model.parse()?;
            log::info!("SRP enabled: {} with {} shadow", srp_type, shadow);
            models.push(Box::new(
                SrpAstroModel::new(srp.satellite_model(&self.spacecraft)?, ThirdBodyModel::sun())
                    .with_srp_type(srp_type)
                    .with_shadow_model(shadow),
            ));
        }

        for third_body in &self.third_bodies {
            let body = CelestialBody::from_name(&third_body.body)?;
            let ephem_type: EphemerisType = third_body.ephemeris.parse()?;
            log::info!("Third body enabled: {} ({})", body.name, ephem_type);
            models.push(Box::new(ThirdBodyModel::new(body, ephem_type)));
        }

        Ok(models)
    }
}
