pub mod catalog;
pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod io;
pub mod mutator;
pub mod store;
pub mod updater;

pub use error::{Result, UniverseError};
