#![allow(clippy::multiple_crate_versions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod models;

pub use error::{DataManagerError, Result};
