mod config;
pub mod logging;

pub use config::{
    DEFAULT_EXECUTABLES, DEFAULT_PROBE_TIMEOUT, EXECUTABLE_ENV, PROBE_TIMEOUT_ENV, PROGRAM_NAME,
    candidate_executables, probe_timeout,
};

pub use logging::init;
