//! Services around the panels: the settings store, the registration
//! service and process-level logging setup.

#[cfg(feature = "runtime")]
pub mod log_dirs;
pub mod registry;
pub mod store;
#[cfg(feature = "runtime")]
pub mod tracing_setup;
