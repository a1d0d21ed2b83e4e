use std::time::Duration;

pub const PROGRAM_NAME: &str = "x7z";
pub const PROGRAM_LOG_LEVEL: &str = "X7Z_LOG_LEVEL";

/// Explicit executable (bare name or full path) tried before the built-in candidates.
pub const EXECUTABLE_ENV: &str = "X7Z_EXECUTABLE";

/// Probe timeout override, in milliseconds.
pub const PROBE_TIMEOUT_ENV: &str = "X7Z_PROBE_TIMEOUT_MS";

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// 7-Zip front-ends in order of preference: full, standalone, reduced.
///
/// `Command` appends `.exe` on Windows, so the bare names cover both platforms.
pub const DEFAULT_EXECUTABLES: &[&str] = &["7z", "7za", "7zr"];

/// Candidate executables to probe, the environment override first.
pub fn candidate_executables() -> Vec<String> {
    let mut candidates = Vec::with_capacity(DEFAULT_EXECUTABLES.len() + 1);

    if let Ok(exe) = std::env::var(EXECUTABLE_ENV) {
        let exe = exe.trim();
        if !exe.is_empty() {
            candidates.push(exe.to_owned());
        }
    }

    for name in DEFAULT_EXECUTABLES {
        if !candidates.iter().any(|c| c == name) {
            candidates.push((*name).to_owned());
        }
    }

    candidates
}

/// How long a candidate gets to answer the probe before it is considered missing.
pub fn probe_timeout() -> Duration {
    std::env::var(PROBE_TIMEOUT_ENV)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_PROBE_TIMEOUT)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
