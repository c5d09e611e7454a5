//! HTTP handlers for the Farmkeep API

mod crop;
mod dashboard;
mod expense;
mod farm;
mod health;
mod task;
mod weather;

pub use crop::*;
pub use dashboard::*;
pub use expense::*;
pub use farm::*;
pub use health::*;
pub use task::*;
pub use weather::*;

use std::str::FromStr;

use serde::Deserialize;
use shared::UnknownSelector;

use crate::error::AppResult;

/// `?filter=...&sort=...` on list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub filter: Option<String>,
    pub sort: Option<String>,
}

impl ListQuery {
    /// Parse both selectors, falling back to each one's default when absent
    /// or empty. An unknown key is a bad request, never a silent "show
    /// everything".
    pub fn selectors<F, S>(&self) -> AppResult<(F, S)>
    where
        F: FromStr<Err = UnknownSelector> + Default,
        S: FromStr<Err = UnknownSelector> + Default,
    {
        Ok((selector(self.filter.as_deref())?, selector(self.sort.as_deref())?))
    }
}

fn selector<T>(key: Option<&str>) -> AppResult<T>
where
    T: FromStr<Err = UnknownSelector> + Default,
{
    match key {
        None | Some("") => Ok(T::default()),
        Some(key) => Ok(key.parse()?),
    }
}
