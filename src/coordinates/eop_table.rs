use super::eop_errors::EOPErrors;
use super::eop_manager::EOPManager;
use hifitime::Epoch;
use lazy_static::lazy_static;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::sync::{Arc, Mutex};

lazy_static! {
    static ref EOP_MANAGER: Mutex<EOPManager> = Mutex::new(EOPManager::new());
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EOPData {
    pub x_pole: f64,  // Polar motion x (arcsec)
    pub y_pole: f64,  // Polar motion y (arcsec)
    pub ut1_utc: f64, // UT1-UTC difference (seconds)
    pub lod: f64,     // Length of day offset (seconds)
    pub ddpsi: f64,   // Nutation correction to longitude (arcsec)
    pub ddeps: f64,   // Nutation correction to obliquity (arcsec)
}

impl EOPData {
    /// Linear interpolation between two records, `fraction` in [0, 1].
    pub fn interpolate(eop1: &EOPData, eop2: &EOPData, fraction: f64) -> EOPData {
        let lerp = |a: f64, b: f64| a + (b - a) * fraction;
        EOPData {
            x_pole: lerp(eop1.x_pole, eop2.x_pole),
            y_pole: lerp(eop1.y_pole, eop2.y_pole),
            ut1_utc: lerp(eop1.ut1_utc, eop2.ut1_utc),
            lod: lerp(eop1.lod, eop2.lod),
            ddpsi: lerp(eop1.ddpsi, eop2.ddpsi),
            ddeps: lerp(eop1.ddeps, eop2.ddeps),
        }
    }
}

/// One row of the CelesTrak `EOP-All.csv` file. Columns not listed here are ignored.
#[derive(Debug, Deserialize)]
struct CelestrakRecord {
    #[serde(rename = "MJD")]
    mjd: f64,
    #[serde(rename = "X")]
    x: f64,
    #[serde(rename = "Y")]
    y: f64,
    #[serde(rename = "UT1-UTC")]
    ut1_utc: f64,
    #[serde(rename = "LOD")]
    lod: f64,
    #[serde(rename = "DPSI")]
    dpsi: f64,
    #[serde(rename = "DEPS")]
    deps: f64,
}

/// Read-only table of Earth orientation parameters keyed by unix time.
///
/// Tables are immutable once built and are meant to be shared between force models
/// behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct EopTable {
    records: BTreeMap<i64, EOPData>, // Unix timestamp -> EOPData
}

impl EopTable {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (Epoch, EOPData)>,
    {
        Self {
            records: records
                .into_iter()
                .map(|(epoch, eop)| (epoch.to_unix_seconds() as i64, eop))
                .collect(),
        }
    }

    /// A table holding a single record, returned for every epoch.
    pub fn constant(eop: EOPData) -> Self {
        let mut records = BTreeMap::new();
        records.insert(0, eop);
        Self { records }
    }

    /// Parses CelesTrak formatted CSV data.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, EOPErrors> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = BTreeMap::new();
        for result in rdr.deserialize::<CelestrakRecord>() {
            let row = result?;
            let timestamp = Epoch::from_mjd_utc(row.mjd).to_unix_seconds() as i64;
            records.insert(
                timestamp,
                EOPData {
                    x_pole: row.x,
                    y_pole: row.y,
                    ut1_utc: row.ut1_utc,
                    lod: row.lod,
                    ddpsi: row.dpsi,
                    ddeps: row.deps,
                },
            );
        }

        if records.is_empty() {
            return Err(EOPErrors::MissingEOPData);
        }

        log::debug!("Parsed {} EOP records", records.len());
        Ok(Self { records })
    }

    /// Loads the table from the user cache, downloading it from CelesTrak when the cache is
    /// missing or stale. The table is shared process-wide.
    pub fn load_default() -> Result<Arc<EopTable>, EOPErrors> {
        let mut manager = EOP_MANAGER.lock().unwrap_or_else(|e| e.into_inner());
        manager.table()
    }

    /// Forces a fresh download of the process-wide table.
    pub fn refresh_default() -> Result<Arc<EopTable>, EOPErrors> {
        let mut manager = EOP_MANAGER.lock().unwrap_or_else(|e| e.into_inner());
        manager.refresh_data()?;
        manager.table()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Interpolates EOP data for a given epoch. Epochs outside the table get the nearest record.
    pub fn interpolate(&self, epoch: Epoch) -> Result<EOPData, EOPErrors> {
        let target = epoch.to_unix_seconds();
        let key = target.floor() as i64;

        let before = self.records.range(..=key).next_back();
        let after = self.records.range(key..).next();

        match (before, after) {
            (Some((&t1, eop1)), Some((&t2, eop2))) => {
                if t1 == t2 {
                    return Ok(*eop1);
                }
                let fraction = (target - t1 as f64) / (t2 - t1) as f64;
                Ok(EOPData::interpolate(eop1, eop2, fraction))
            }
            (Some((_, eop)), None) | (None, Some((_, eop))) => {
                if self.records.len() > 1 {
                    log::debug!("Epoch {} outside EOP table, using nearest record", epoch);
                }
                Ok(*eop)
            }
            (None, None) => Err(EOPErrors::MissingEOPData),
        }
    }
}
