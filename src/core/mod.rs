pub mod adapter;
pub mod engine;
pub mod export;
pub mod filter;
pub mod query;
pub mod source;
pub mod suggest;

pub use crate::domain::model::{
    ConsultationMode, Directory, DirectoryState, Doctor, FilterState, SortKey,
};
pub use crate::domain::ports::{ConfigProvider, DoctorSource, ExportSink, UrlSync};
pub use crate::utils::error::Result;
