use astroforce::config::{ForceModelConfig, SimpleSat, SpacecraftConfig};
use astroforce::constants::*;
use astroforce::coordinates::{gcrs_to_itrs, itrs_to_geodetic, EOPData, EopTable};
use astroforce::integrators::RK4;
use astroforce::models::Parameters;
use astroforce::physics::drag::CannonballFixedDrag;
use astroforce::physics::dynamics::CentralBodyDynamics;
use astroforce::physics::energy::specific_energy;
use astroforce::physics::orbital::KeplerianElements;
use astroforce::physics::srp::CannonballFixedSRP;
use csv::Writer;
use hifitime::{Duration, Epoch};
use nalgebra as na;
use std::error::Error;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional JSON force model configuration as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading force model configuration from {}", path);
            ForceModelConfig::from_json_reader(File::open(&path)?)?
        }
        None => ForceModelConfig::full(SpacecraftConfig::default()),
    };

    let start_time = Epoch::from_gregorian_utc(2024, 3, 15, 0, 0, 0, 0);

    let eop_table = EopTable::load_default().unwrap_or_else(|e| {
        log::warn!("Falling back to constant EOP values: {}", e);
        Arc::new(EopTable::constant(EOPData {
            x_pole: 0.161556, // arcsec
            y_pole: 0.247219,
            ut1_utc: -0.0890529, // s
            lod: 0.0017,
            ddpsi: -0.052,
            ddeps: -0.003,
        }))
    });

    let perigee_alt = 300_000.0; // meters
    let apogee_alt = 450_000.0; // meters
    let ra = WGS84_A + apogee_alt;
    let rp = WGS84_A + perigee_alt;

    let elements = KeplerianElements::from_vector(&na::Vector6::new(
        (ra + rp) / 2.0,       // semi-major axis
        (ra - rp) / (ra + rp), // eccentricity
        51.6_f64.to_radians(), // inclination (ISS-like)
        PI * 0.7,              // RAAN
        0.0,                   // argument of periapsis
        0.0,                   // true anomaly (starting at perigee)
    ));
    let initial_state = elements.to_state(MU_EARTH);
    let orbital_period = elements.period(MU_EARTH);

    // State-based coefficient models read these slots
    let params = Parameters::new(start_time)
        .with_ballistic_coeff(CannonballFixedDrag::from_spacecraft(&config.spacecraft)?.ballistic_coeff())
        .with_reflectivity_ballistic_coeff(
            CannonballFixedSRP::from_spacecraft(&config.spacecraft)?.reflectivity_ballistic_coeff(),
        );

    let dynamics = config
        .build(Arc::clone(&eop_table))?
        .into_iter()
        .fold(CentralBodyDynamics::new(MU_EARTH, params), |dynamics, model| dynamics.with(model));
    let model_names: Vec<&'static str> = dynamics.perturbations().iter().map(|m| m.name()).collect();
    let integrator = RK4::new(dynamics);

    let dt = 10.0; // seconds
    let simulation_time = 2.0 * orbital_period;
    let steps = (simulation_time / dt) as usize;
    log::info!(
        "Propagating {:.0} s ({} steps) with {} perturbations for a {} kg spacecraft (reference: {} kg)",
        simulation_time,
        steps,
        model_names.len(),
        config.spacecraft.mass,
        SimpleSat::MASS
    );

    let output_dir = Path::new("output");
    fs::create_dir_all(output_dir)?;
    let file = File::create(output_dir.join("perturbations.csv"))?;
    let mut writer = Writer::from_writer(file);

    let mut header = vec![
        "UTC Time".to_string(),
        "Time (s)".to_string(),
        "Altitude (km)".to_string(),
        "Latitude (deg)".to_string(),
        "Longitude (deg)".to_string(),
        "Specific Energy Change (J/kg)".to_string(),
    ];
    for name in &model_names {
        for axis in ["X", "Y", "Z"] {
            header.push(format!("{} {} (m/s^2)", name, axis));
        }
    }
    writer.write_record(&header)?;

    let mut state = initial_state;
    let initial_energy = specific_energy(&state, MU_EARTH);

    for i in 0..=steps {
        let current_time = i as f64 * dt;

        // Sample every minute
        if i % 6 == 0 {
            let current_epoch = start_time + Duration::from_seconds(current_time);
            let eop = eop_table.interpolate(current_epoch)?;
            let geodetic = itrs_to_geodetic(&gcrs_to_itrs(&state.position, &current_epoch, &eop));

            let mut record = vec![
                current_epoch.to_string(),
                current_time.to_string(),
                (geodetic.altitude / 1000.0).to_string(),
                geodetic.latitude.to_degrees().to_string(),
                geodetic.longitude.to_degrees().to_string(),
                (specific_energy(&state, MU_EARTH) - initial_energy).to_string(),
            ];
            for (_, accel) in integrator.equations().acceleration_breakdown(&state, current_time)? {
                record.extend(accel.iter().map(|a| a.to_string()));
            }
            writer.write_record(&record)?;

            if geodetic.altitude < 100_000.0 {
                log::warn!("Spacecraft re-entered at t = {} s", current_time);
                break;
            }
        }

        state = integrator.integrate(&state, current_time, dt)?;
    }

    writer.flush()?;
    log::info!(
        "Specific energy change after {:.0} s: {:.3} J/kg",
        simulation_time,
        specific_energy(&state, MU_EARTH) - initial_energy
    );
    println!("Perturbation data has been written to output/perturbations.csv");

    Ok(())
}
