use super::eop_errors::EOPErrors;
use super::eop_table::EopTable;
use chrono::{DateTime, Duration, Utc};
use reqwest;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

const CACHE_DURATION_HOURS: i64 = 24;
const RETRY_BACKOFF_MINUTES: i64 = 15;
const CACHE_FILE: &str = "eop_cache.csv";
const CELESTRAK_URL: &str = "https://celestrak.org/SpaceData/EOP-All.csv";

/// Owns the on-disk EOP cache and hands out parsed tables.
pub(super) struct EOPManager {
    cache_path: PathBuf,
    last_update: Option<DateTime<Utc>>,
    /// No download is attempted before this time after a failed refresh.
    retry_after: Option<DateTime<Utc>>,
    table: Option<Arc<EopTable>>,
}

impl EOPManager {
    /// Creates a new EOPManager. Does not load data as it may fail.
    pub fn new() -> Self {
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("astroforce");
        if let Err(e) = fs::create_dir_all(&cache_dir) {
            log::warn!("Could not create EOP cache directory {:?}: {}", cache_dir, e);
        }
        Self::with_cache_path(cache_dir.join(CACHE_FILE))
    }

    pub(super) fn with_cache_path(cache_path: PathBuf) -> Self {
        Self {
            cache_path,
            last_update: None,
            retry_after: None,
            table: None,
        }
    }

    /// Returns the current table, loading the cache or downloading as needed.
    pub fn table(&mut self) -> Result<Arc<EopTable>, EOPErrors> {
        if self.table.is_none() {
            if let Err(e) = self.load_cached_file() {
                log::warn!("Failed to load cached EOP data: {}", e);
            }
        }
        self.update_cache_if_needed()?;
        self.table.clone().ok_or(EOPErrors::MissingEOPData)
    }

    /// Allows users to refresh the EOP data manually at runtime.
    pub fn refresh_data(&mut self) -> Result<(), EOPErrors> {
        log::info!("Refreshing EOP data from {}", CELESTRAK_URL);
        let bytes = download_eop_data()?;
        self.store(&bytes)?;
        log::info!("EOP data refreshed successfully");
        Ok(())
    }

    /// Parses `bytes` and, only if they hold a usable table, replaces the cache file with them.
    ///
    /// The file is written next to the cache and renamed over it so readers never see a
    /// partial download.
    fn store(&mut self, bytes: &[u8]) -> Result<(), EOPErrors> {
        let table = EopTable::from_csv_reader(bytes)?;
        let tmp_path = self.cache_path.with_extension("csv.tmp");
        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, &self.cache_path)?;

        log::debug!("Stored {} EOP records in {:?}", table.len(), self.cache_path);
        self.table = Some(Arc::new(table));
        self.last_update = Some(Utc::now());
        self.retry_after = None;
        Ok(())
    }

    /// Loads an existing cache file, taking its modification time as the update time.
    fn load_cached_file(&mut self) -> Result<(), EOPErrors> {
        let modified = fs::metadata(&self.cache_path)?.modified()?;
        self.parse_cache_file()?;
        self.last_update = Some(DateTime::<Utc>::from(modified));
        Ok(())
    }

    fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        if self.retry_after.is_some_and(|retry_after| now < retry_after) {
            return false;
        }
        match self.last_update {
            None => true,
            Some(last_update) => now - last_update > Duration::hours(CACHE_DURATION_HOURS),
        }
    }

    fn update_cache_if_needed(&mut self) -> Result<(), EOPErrors> {
        let now = Utc::now();
        if !self.needs_refresh(now) {
            return Ok(());
        }

        if let Err(e) = self.refresh_data() {
            self.retry_after = Some(now + Duration::minutes(RETRY_BACKOFF_MINUTES));
            // A stale table is still usable.
            if self.table.is_some() {
                log::warn!("Using stale EOP cache, refresh failed: {}", e);
            } else {
                return Err(e);
            }
        }
        Ok(())
    }

    fn parse_cache_file(&mut self) -> Result<(), EOPErrors> {
        let file = fs::File::open(&self.cache_path)?;
        self.table = Some(Arc::new(EopTable::from_csv_reader(file)?));
        Ok(())
    }
}

fn download_eop_data() -> Result<Vec<u8>, EOPErrors> {
    let client = reqwest::blocking::Client::new();
    let response = client.get(CELESTRAK_URL).send()?;
    let status = response.status();

    if status == reqwest::StatusCode::FORBIDDEN {
        return Err(EOPErrors::HttpForbidden);
    }

    let response = response.error_for_status()?;
    let bytes = response.bytes()?;
    log::debug!("Downloaded {} bytes of EOP data", bytes.len());
    Ok(bytes.to_vec())
}
