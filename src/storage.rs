//! SQLite persistence for observations.
//!
//! The store is opened once by the entry point and owned by the pipeline for
//! the rest of the run; the connection closes when it is dropped.

use crate::error::{BuoyError, Result};
use crate::models::Observation;
use rusqlite::{Connection, params};
use std::path::Path;
use tracing::{debug, info};

const SCHEMA: &str = include_str!("../sql/schema.sql");

/// Anything that can persist one observation per run
pub trait ObservationStore {
    /// Insert the observation, returning its row id
    fn save(&mut self, observation: &Observation) -> Result<i64>;
}

/// SQLite-backed observation store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and check the connection
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                BuoyError::connection(format!("could not create {}", parent.display()), e)
            })?;
        }

        let conn = Connection::open(path)
            .map_err(|e| BuoyError::connection(format!("opening {}", path.display()), e))?;
        let store = Self::initialize(conn)?;
        info!("Connected to database {}", path.display());
        Ok(store)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| BuoyError::connection("opening in-memory database", e))?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self> {
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(|e| BuoyError::connection("ping failed", e))?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| BuoyError::connection("creating schema", e))?;
        Ok(Self { conn })
    }

    /// Number of stored observations
    pub fn count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM observations", [], |row| row.get(0))?)
    }

    /// Borrow the underlying connection for ad-hoc queries
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl ObservationStore for SqliteStore {
    fn save(&mut self, observation: &Observation) -> Result<i64> {
        // Wind and air temperature columns exist in the schema but are never populated
        self.conn.execute(
            "INSERT INTO observations (observationtime, significantwaveheight, \
             dominantwaveperiod, averageperiod, meanwavedirection, watertemperature) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                observation.timestamp.to_rfc3339(),
                observation.significant_wave_height_ft,
                observation.dominant_wave_period_s,
                observation.average_period_s,
                observation.mean_wave_direction.as_str(),
                observation.water_temperature_f,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Saved observation as row {}", id);
        Ok(id)
    }
}
