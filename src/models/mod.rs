pub mod download;
pub mod existing;
pub mod manager;
pub mod manifest;
pub mod registry;

pub use download::{HttpFetcher, ModelFetcher};
pub use existing::ExistingEntries;
pub use manager::{DownloadRequest, ModelManager, Outcome, RunReport};
pub use manifest::{DataManagerOutput, DataTableEntry};
pub use registry::ModelInfo;
