use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::time::Duration;

use log::debug;

use crate::entry::EntryRecord;
use crate::error::Result;
use crate::listing::parse_listing;
use crate::runner;

/// Options for one `x` invocation.
#[derive(Debug, Default, Clone)]
pub struct ExtractOptions<'a> {
    /// Target directory; 7-Zip extracts into the working directory without it
    pub output_dir: Option<&'a Path>,
    /// Members to extract; empty means all
    pub members: Vec<&'a str>,
    pub password: Option<&'a str>,
}

/// One 7-Zip front-end (`7z`, `7za`, `7zr`, or an explicit path).
///
/// All variants share the same command line, only the program differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executor {
    program: OsString,
}

impl Executor {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Run the bare program and report whether it exits 0 within `timeout`.
    pub fn is_available(&self, timeout: Duration) -> bool {
        let name = self.program.to_string_lossy();
        match runner::run_with_timeout(&[self.program.clone()], timeout) {
            Ok(status) if status.success() => true,
            Ok(status) => {
                debug!("probe {name}: {status}");
                false
            }
            Err(e) => {
                debug!("probe {name}: {e}");
                false
            }
        }
    }

    /// `<exe> l -slt -sccUTF-8 -p<password> <archive>`
    pub fn list_command(&self, archive: &Path, password: Option<&str>) -> Vec<OsString> {
        vec![
            self.program.clone(),
            "l".into(),
            "-slt".into(),
            "-sccUTF-8".into(),
            password_switch(password),
            archive.into(),
        ]
    }

    /// `<exe> x -sccUTF-8 <archive> [-o<dir>] -p<password> [member ...] -y`
    pub fn extract_command(&self, archive: &Path, options: &ExtractOptions<'_>) -> Vec<OsString> {
        let mut cmd = vec![
            self.program.clone(),
            "x".into(),
            "-sccUTF-8".into(),
            archive.into(),
        ];

        if let Some(dir) = options.output_dir {
            let mut switch = OsString::from("-o");
            switch.push(dir);
            cmd.push(switch);
        }

        cmd.push(password_switch(options.password));
        cmd.extend(options.members.iter().map(OsString::from));
        cmd.push("-y".into());
        cmd
    }

    pub fn list(&self, archive: &Path, password: Option<&str>) -> Result<Vec<EntryRecord>> {
        parse_listing(runner::execute(&self.list_command(archive, password))?)
    }

    pub fn extract(&self, archive: &Path, options: &ExtractOptions<'_>) -> Result<()> {
        runner::drain(&self.extract_command(archive, options))
    }
}

// 7-Zip prompts for a password when the switch is missing; an empty `-p`
// makes it fail instead.
fn password_switch(password: Option<&str>) -> OsString {
    format!("-p{}", password.unwrap_or_default()).into()
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
