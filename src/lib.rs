pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::cli::LocalExportSink;
pub use crate::config::toml_config::TomlConfig;
pub use crate::config::CliConfig;
pub use crate::core::engine::{DirectoryEngine, MemoryUrlBar, FETCH_ERROR_MESSAGE};
pub use crate::core::source::HttpDoctorSource;
pub use crate::domain::model::{
    ConsultationMode, Directory, DirectoryState, Doctor, FilterState, SortKey,
};
pub use crate::utils::error::{DirectoryError, Result};
