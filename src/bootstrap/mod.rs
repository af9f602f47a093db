pub mod config;
pub mod run;
pub mod runtime;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_paths, ResolvedPaths};
pub use run::{run_app, run_command};
pub use runtime::{AppRuntime, UseCases};
pub use wiring::{wire_dependencies, AppDeps, WiringError};
