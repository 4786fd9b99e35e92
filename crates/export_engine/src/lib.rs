//! Export engine: network workflows, timers and file saving for the controller's effects.
mod client;
mod engine;
mod save;
mod types;

pub use client::{build_endpoint_url, ClientSettings, ExportService, ReqwestExportService};
pub use engine::{EngineHandle, EngineSettings};
pub use save::{ensure_output_dir, AtomicFileWriter, DirectoryFileSaver, FileSaver, PersistError};
pub use types::{EngineError, EngineEvent, Endpoint, FailureKind, FetchError};
