use std::fmt;

use serde::Serialize;

/// Modification time as printed by 7-Zip, field by field.
///
/// Kept as reported: the tool does not say which time zone it used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Timestamp {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl Timestamp {
    pub fn as_tuple(&self) -> (u32, u32, u32, u32, u32, u32) {
        (
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
    }
}

impl From<(u32, u32, u32, u32, u32, u32)> for Timestamp {
    fn from((year, month, day, hour, minute, second): (u32, u32, u32, u32, u32, u32)) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// One member of an archive, as reported by `7z l -slt`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryRecord {
    /// Path inside the archive, `/`-separated
    pub filename: String,
    /// Uncompressed size
    pub file_size: Option<u64>,
    /// Compressed size; missing for members of a solid block except the first
    pub compress_size: Option<u64>,
    pub date_time: Option<Timestamp>,
    /// Raw attribute string, either DOS style (`D`, `A`, `RA`) or
    /// DOS prefix plus unix mode (`A_ -rw-r--r--`)
    pub mode: Option<String>,
    pub crc: Option<u32>,
    /// `+` when encrypted, `-` otherwise
    pub encrypted: Option<String>,
    /// Compression method, e.g. `LZMA2:24`, `Deflate`
    pub compress_type: Option<String>,
    /// Index of the solid block holding this member
    pub block: Option<u64>,
}

impl EntryRecord {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    pub fn is_dir(&self) -> bool {
        self.mode.as_deref().is_some_and(|m| m.starts_with('D'))
    }

    pub fn is_file(&self) -> bool {
        self.mode.as_deref().is_some_and(|m| m.starts_with('A'))
    }

    pub fn is_readonly(&self) -> bool {
        self.mode.as_deref().is_some_and(|m| m.contains('R'))
    }

    /// Unix symlink, visible only in the mode part of the attribute string.
    pub fn is_symlink(&self) -> bool {
        self.mode.as_deref().is_some_and(|m| m.contains(" l"))
    }

    pub fn needs_password(&self) -> bool {
        self.encrypted.as_deref() == Some("+")
    }
}

/// Anything that names an archive member.
pub trait MemberName {
    fn member_name(&self) -> &str;
}

impl MemberName for str {
    fn member_name(&self) -> &str {
        self
    }
}

impl MemberName for String {
    fn member_name(&self) -> &str {
        self
    }
}

impl MemberName for EntryRecord {
    fn member_name(&self) -> &str {
        &self.filename
    }
}

impl<T: MemberName + ?Sized> MemberName for &T {
    fn member_name(&self) -> &str {
        (**self).member_name()
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
