use std::ffi::OsString;
use std::sync::OnceLock;
use std::time::Duration;

use log::{debug, info};
use x7z_runtime::{DEFAULT_PROBE_TIMEOUT, candidate_executables, probe_timeout};

use crate::error::{Error, Result};
use crate::executor::Executor;

/// Decides whether a candidate executable is usable.
pub trait Probe {
    fn is_available(&self, executor: &Executor, timeout: Duration) -> bool;
}

/// Runs the candidate with no arguments and expects exit code 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessProbe;

impl Probe for ProcessProbe {
    fn is_available(&self, executor: &Executor, timeout: Duration) -> bool {
        executor.is_available(timeout)
    }
}

/// Picks the first working 7-Zip front-end and remembers it.
///
/// Only a successful pick is remembered: after a failed `resolve` the next
/// call probes again.
pub struct Resolver<P = ProcessProbe> {
    candidates: Vec<Executor>,
    timeout: Duration,
    probe: P,
    resolved: OnceLock<Executor>,
}

impl Resolver<ProcessProbe> {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            candidates: candidates.into_iter().map(Executor::new).collect(),
            timeout: DEFAULT_PROBE_TIMEOUT,
            probe: ProcessProbe,
            resolved: OnceLock::new(),
        }
    }

    /// Candidates and timeout from the runtime configuration.
    pub fn from_env() -> Self {
        Self::new(candidate_executables()).with_timeout(probe_timeout())
    }
}

impl<P: Probe> Resolver<P> {
    pub fn with_probe<Q: Probe>(self, probe: Q) -> Resolver<Q> {
        Resolver {
            candidates: self.candidates,
            timeout: self.timeout,
            probe,
            resolved: self.resolved,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn candidates(&self) -> &[Executor] {
        &self.candidates
    }

    /// The cached pick, without probing.
    pub fn resolved(&self) -> Option<&Executor> {
        self.resolved.get()
    }

    pub fn resolve(&self) -> Result<&Executor> {
        if let Some(executor) = self.resolved.get() {
            return Ok(executor);
        }

        let found = self.probe_candidates()?;
        info!("using 7-zip executable {}", found.program().to_string_lossy());

        // A concurrent resolve may have stored its pick first; keep that one.
        Ok(self.resolved.get_or_init(|| found))
    }

    fn probe_candidates(&self) -> Result<Executor> {
        for candidate in &self.candidates {
            if self.probe.is_available(candidate, self.timeout) {
                return Ok(candidate.clone());
            }
            debug!(
                "7-zip candidate {} unavailable",
                candidate.program().to_string_lossy()
            );
        }

        let tried = self
            .candidates
            .iter()
            .map(|c| c.program().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(", ");

        Err(Error::ExecutableUnavailable(format!(
            "Cannot find working 7-zip command (tried: {tried}). \
             Please install 7-zip and setup the PATH properly."
        )))
    }
}

/// Process-wide resolver built from the environment on first use.
pub fn default_resolver() -> &'static Resolver {
    static RESOLVER: OnceLock<Resolver> = OnceLock::new();
    RESOLVER.get_or_init(Resolver::from_env)
}

/// Shortcut for `default_resolver().resolve()`.
pub fn get_executor() -> Result<&'static Executor> {
    default_resolver().resolve()
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
