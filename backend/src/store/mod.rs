//! In-memory entity store
//!
//! One [`Collection`] per entity kind plus the read-only weather feed. The
//! store is built once per process (or per test) and shared behind an `Arc`.

mod collection;
mod latency;
mod weather;

pub use collection::Collection;
pub use latency::Latency;
pub use weather::WeatherFeed;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use shared::{Crop, Expense, Farm, Record, RecordId, Task, WeatherReport};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} not found")]
    NotFound { kind: &'static str, id: RecordId },

    #[error("No {kind} id left to assign")]
    IdsExhausted { kind: &'static str },

    #[error("No weather data loaded")]
    NoWeatherData,

    #[error("Failed to read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse seed file {path}: {source}")]
    SeedParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn not_found<T: Record>(id: RecordId) -> Self {
        StoreError::NotFound { kind: T::KIND, id }
    }
}

/// Initial contents for a store
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub farms: Vec<Farm>,
    pub crops: Vec<Crop>,
    pub tasks: Vec<Task>,
    pub expenses: Vec<Expense>,
    pub weather: Option<WeatherReport>,
}

impl Seed {
    /// Read `farms.json`, `crops.json`, `tasks.json`, `expenses.json` and
    /// `weather.json` from `dir`. A missing file leaves that part empty; a file
    /// that exists but does not parse is an error.
    pub async fn from_dir(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        Ok(Self {
            farms: read_json(dir, "farms.json").await?.unwrap_or_default(),
            crops: read_json(dir, "crops.json").await?.unwrap_or_default(),
            tasks: read_json(dir, "tasks.json").await?.unwrap_or_default(),
            expenses: read_json(dir, "expenses.json").await?.unwrap_or_default(),
            weather: read_json(dir, "weather.json").await?,
        })
    }
}

async fn read_json<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Option<T>, StoreError> {
    let path = dir.join(name);
    let raw = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "seed file missing, starting empty");
            return Ok(None);
        }
        Err(source) => return Err(StoreError::SeedRead { path, source }),
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::SeedParse { path, source })
}

pub struct Store {
    pub farms: Collection<Farm>,
    pub crops: Collection<Crop>,
    pub tasks: Collection<Task>,
    pub expenses: Collection<Expense>,
    pub weather: WeatherFeed,
}

impl Store {
    pub fn new(seed: Seed, latency: Latency) -> Self {
        Self {
            farms: Collection::new(seed.farms, latency),
            crops: Collection::new(seed.crops, latency),
            tasks: Collection::new(seed.tasks, latency),
            expenses: Collection::new(seed.expenses, latency),
            weather: WeatherFeed::new(seed.weather, latency),
        }
    }

    pub fn empty(latency: Latency) -> Self {
        Self::new(Seed::default(), latency)
    }

    pub async fn seed_from_dir(dir: impl AsRef<Path>, latency: Latency) -> Result<Self, StoreError> {
        let seed = Seed::from_dir(dir).await?;
        tracing::info!(
            farms = seed.farms.len(),
            crops = seed.crops.len(),
            tasks = seed.tasks.len(),
            expenses = seed.expenses.len(),
            weather = seed.weather.is_some(),
            "seed data loaded"
        );
        Ok(Self::new(seed, latency))
    }
}
