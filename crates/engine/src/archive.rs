use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use hashbrown::HashMap;
use log::debug;

use crate::entry::{EntryRecord, MemberName};
use crate::error::{Error, Result};
use crate::executor::{ExtractOptions, Executor};
use crate::resolver::{Probe, Resolver, default_resolver};

/// How an archive is opened. Only [`Mode::Read`] is supported; the others
/// exist so callers get a clear error instead of a silent read-only handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Read,
    Write,
    Append,
    Exclusive,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Read => "r",
            Mode::Write => "w",
            Mode::Append => "a",
            Mode::Exclusive => "x",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "r" => Ok(Mode::Read),
            "w" => Ok(Mode::Write),
            "a" => Ok(Mode::Append),
            "x" => Ok(Mode::Exclusive),
            other => Err(Error::UnsupportedMode(other.to_owned())),
        }
    }
}

/// Builder for [`Archive`].
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    mode: Mode,
    password: Option<String>,
    charset: Option<String>,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Password for listing, and the default for extraction.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Name encoding hint. Stored only: listings are always requested as UTF-8.
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Open with the process-wide default resolver.
    pub fn open(self, path: impl AsRef<Path>) -> Result<Archive> {
        self.open_with(path, default_resolver())
    }

    pub fn open_with<P: Probe>(
        self,
        path: impl AsRef<Path>,
        resolver: &Resolver<P>,
    ) -> Result<Archive> {
        if self.mode != Mode::Read {
            return Err(Error::UnsupportedMode(self.mode.to_string()));
        }

        let executor = resolver.resolve()?.clone();
        Archive::load(path.as_ref().to_path_buf(), self, executor)
    }
}

/// A 7-Zip readable archive with its member table loaded.
///
/// The table is read once when the archive is opened and never refreshed;
/// extraction runs 7-Zip again against the same path.
#[derive(Debug)]
pub struct Archive {
    path: PathBuf,
    password: Option<String>,
    charset: Option<String>,
    executor: Executor,
    entries: Vec<EntryRecord>,
    by_name: HashMap<String, usize>,
}

impl Archive {
    /// Open `path` for reading, without a password.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        OpenOptions::new().open(path)
    }

    fn load(path: PathBuf, options: OpenOptions, executor: Executor) -> Result<Self> {
        let entries = executor.list(&path, options.password.as_deref())?;

        let mut by_name = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            by_name.insert(entry.filename.clone(), i);
        }

        debug!("opened {} with {} entries", path.display(), entries.len());

        Ok(Self {
            path,
            password: options.password,
            charset: options.charset,
            executor,
            entries,
            by_name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All members in listing order.
    pub fn infolist(&self) -> &[EntryRecord] {
        &self.entries
    }

    pub fn namelist(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.filename.as_str()).collect()
    }

    pub fn getinfo(&self, name: &str) -> Result<&EntryRecord> {
        self.by_name
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| Error::NoEntry(name.to_owned()))
    }

    /// Extract one member, overwriting existing files.
    ///
    /// A missing or empty `password` falls back to the one the archive was
    /// opened with.
    pub fn extract<M>(&self, member: &M, path: Option<&Path>, password: Option<&str>) -> Result<()>
    where
        M: MemberName + ?Sized,
    {
        self.run_extract(path, vec![member.member_name()], password)
    }

    /// Extract `members`, or everything when `members` is empty.
    pub fn extract_all<M>(
        &self,
        path: Option<&Path>,
        members: &[M],
        password: Option<&str>,
    ) -> Result<()>
    where
        M: MemberName,
    {
        let members = members.iter().map(MemberName::member_name).collect();
        self.run_extract(path, members, password)
    }

    fn run_extract(
        &self,
        path: Option<&Path>,
        members: Vec<&str>,
        password: Option<&str>,
    ) -> Result<()> {
        let options = ExtractOptions {
            output_dir: path,
            members,
            password: password
                .filter(|p| !p.is_empty())
                .or(self.password.as_deref()),
        };

        debug!(
            "extracting {} member(s) of {}",
            if options.members.is_empty() {
                "all".to_owned()
            } else {
                options.members.len().to_string()
            },
            self.path.display()
        );

        self.executor.extract(&self.path, &options)
    }
}

impl<'a> IntoIterator for &'a Archive {
    type Item = &'a EntryRecord;
    type IntoIter = std::slice::Iter<'a, EntryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
