mod builder;
mod runtime;
mod shutdown;
mod startup;
mod types;
mod viewer;


pub use builder::ThermalViewerBuilder;
pub use types::{ExitReason, RunSummary};
pub use viewer::ThermalViewer;
