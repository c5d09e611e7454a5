//! Domain models for the Farmkeep record keeper

mod crop;
mod expense;
mod farm;
mod task;
mod weather;

pub use crop::*;
pub use expense::*;
pub use farm::*;
pub use task::*;
pub use weather::*;
