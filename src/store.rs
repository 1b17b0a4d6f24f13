//! SQLite persistence for well records
//!
//! One table keyed by API number; upserts are INSERT OR REPLACE so
//! re-scraping an identifier is idempotent. The connection sits behind a
//! mutex so scrape workers and the read API can share one store.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, Row};
use thiserror::Error;
use tracing::{debug, info};

use crate::types::WellRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported export format '{0}' (expected 'csv' or 'json')")]
    UnsupportedFormat(String),
    #[error("connection lock poisoned")]
    Lock,
}

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS api_well_data (
        api TEXT PRIMARY KEY,
        operator TEXT,
        status TEXT,
        well_type TEXT,
        work_type TEXT,
        directional_status TEXT,
        multi_lateral TEXT,
        mineral_owner TEXT,
        surface_owner TEXT,
        surface_location TEXT,
        gl_elevation REAL,
        kb_elevation REAL,
        df_elevation REAL,
        single_multiple_completion TEXT,
        potash_waiver TEXT,
        spud_date TEXT,
        last_inspection TEXT,
        tvd REAL,
        latitude REAL,
        longitude REAL,
        crs TEXT
    )";

const UPSERT: &str = "
    INSERT OR REPLACE INTO api_well_data (
        api, operator, status, well_type, work_type, directional_status,
        multi_lateral, mineral_owner, surface_owner, surface_location,
        gl_elevation, kb_elevation, df_elevation, single_multiple_completion,
        potash_waiver, spud_date, last_inspection, tvd, latitude, longitude, crs
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
              ?15, ?16, ?17, ?18, ?19, ?20, ?21)";

const SELECT_ALL: &str = "SELECT * FROM api_well_data ORDER BY api";

/// Well record storage backed by SQLite.
pub struct WellStore {
    conn: Mutex<Connection>,
}

impl WellStore {
    /// Open (or create) the database at `path` and ensure the table
    /// exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(CREATE_TABLE, [])?;
        debug!("ensured table api_well_data");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Lock)
    }

    /// Insert or replace one record, keyed by its API number.
    pub fn upsert(&self, record: &WellRecord) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            UPSERT,
            params![
                record.api,
                record.operator,
                record.status,
                record.well_type,
                record.work_type,
                record.directional_status,
                record.multi_lateral,
                record.mineral_owner,
                record.surface_owner,
                record.surface_location,
                record.gl_elevation,
                record.kb_elevation,
                record.df_elevation,
                record.single_multiple_completion,
                record.potash_waiver,
                record.spud_date,
                record.last_inspection,
                record.tvd,
                record.latitude,
                record.longitude,
                record.crs,
            ],
        )?;
        debug!(api = %record.api, "upserted record");
        Ok(())
    }

    /// Point lookup by API number.
    pub fn get(&self, api: &str) -> Result<Option<WellRecord>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT * FROM api_well_data WHERE api = ?1")?;
        let mut rows = stmt.query_map(params![api], record_from_row)?;
        match rows.next() {
            Some(record) => Ok(Some(record?)),
            None => Ok(None),
        }
    }

    /// All stored records, ordered by API number.
    pub fn all(&self) -> Result<Vec<WellRecord>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(SELECT_ALL)?;
        let rows = stmt.query_map([], record_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<u64, StoreError> {
        let conn = self.conn()?;
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM api_well_data", [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }

    /// `(api, latitude, longitude)` triples for the polygon query.
    pub fn coordinates(&self) -> Result<Vec<(String, Option<f64>, Option<f64>)>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT api, latitude, longitude FROM api_well_data")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Dump every record to `path` as CSV or JSON, returning the row
    /// count. Unsupported formats are an invalid-argument error.
    pub fn export(&self, path: impl AsRef<Path>, format: &str) -> Result<usize, StoreError> {
        let path = path.as_ref();
        let records = self.all()?;

        match format.to_ascii_lowercase().as_str() {
            "csv" => {
                let mut writer = csv::Writer::from_path(path)?;
                for record in &records {
                    writer.serialize(record)?;
                }
                writer.flush()?;
            }
            "json" => {
                let json = serde_json::to_string_pretty(&records)?;
                let mut file = File::create(path)?;
                file.write_all(json.as_bytes())?;
            }
            other => return Err(StoreError::UnsupportedFormat(other.to_string())),
        }

        info!(rows = records.len(), format, "exported {}", path.display());
        Ok(records.len())
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<WellRecord> {
    Ok(WellRecord {
        api: row.get("api")?,
        operator: row.get("operator")?,
        status: row.get("status")?,
        well_type: row.get("well_type")?,
        work_type: row.get("work_type")?,
        directional_status: row.get("directional_status")?,
        multi_lateral: row.get("multi_lateral")?,
        mineral_owner: row.get("mineral_owner")?,
        surface_owner: row.get("surface_owner")?,
        surface_location: row.get("surface_location")?,
        gl_elevation: row.get("gl_elevation")?,
        kb_elevation: row.get("kb_elevation")?,
        df_elevation: row.get("df_elevation")?,
        single_multiple_completion: row.get("single_multiple_completion")?,
        potash_waiver: row.get("potash_waiver")?,
        spud_date: row.get("spud_date")?,
        last_inspection: row.get("last_inspection")?,
        tvd: row.get("tvd")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
        crs: row.get("crs")?,
    })
}
