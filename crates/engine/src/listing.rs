//! Parser for the technical listing printed by `7z l -slt`.
//!
//! The output is a sequence of blocks, each opened by a `Path = ...` line and
//! followed by `Label = value` lines. The first block describes the archive
//! itself and is skipped; every later block is one member.

use std::mem;

use crate::entry::{EntryRecord, Timestamp};
use crate::error::{Error, Result};

const PATH_LABEL: &str = "Path = ";

/// A value that does not fit its field.
struct Invalid;

type FieldResult<T> = std::result::Result<T, Invalid>;

type Setter = fn(&mut EntryRecord, &str) -> FieldResult<()>;

/// Member fields, matched by line prefix in this order.
const FIELDS: &[(&str, Setter)] = &[
    ("Size = ", set_size),
    ("Packed Size = ", set_packed_size),
    ("Modified = ", set_modified),
    ("Attributes = ", set_attributes),
    ("CRC = ", set_crc),
    ("Encrypted = ", set_encrypted),
    ("Method = ", set_method),
    ("Block = ", set_block),
];

enum State {
    /// Banner lines before the first `Path =`.
    Preamble,
    /// Inside the archive-level block.
    Summary,
    Entry(EntryRecord),
}

/// Incremental listing parser, fed one line at a time.
pub struct ListingParser {
    state: State,
    entries: Vec<EntryRecord>,
}

impl Default for ListingParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingParser {
    pub fn new() -> Self {
        Self {
            state: State::Preamble,
            entries: Vec::new(),
        }
    }

    pub fn feed(&mut self, line: &str) -> Result<()> {
        if let Some(path) = line.strip_prefix(PATH_LABEL) {
            self.state = match mem::replace(&mut self.state, State::Preamble) {
                State::Preamble => State::Summary,
                State::Summary => State::Entry(EntryRecord::new(path)),
                State::Entry(done) => {
                    self.entries.push(done);
                    State::Entry(EntryRecord::new(path))
                }
            };
            return Ok(());
        }

        // Archive-level fields (Type, Physical Size, ...) are not ours.
        let State::Entry(entry) = &mut self.state else {
            return Ok(());
        };

        for (label, set) in FIELDS {
            if let Some(value) = line.strip_prefix(label) {
                return set(entry, value).map_err(|Invalid| Error::ParseError {
                    line: line.to_owned(),
                });
            }
        }

        Ok(())
    }

    /// Close the open block and return the members in listing order.
    pub fn finish(mut self) -> Vec<EntryRecord> {
        if let State::Entry(last) = self.state {
            self.entries.push(last);
        }
        self.entries
    }
}

/// Parse a whole listing. Errors from the line source are passed through.
pub fn parse_listing<I, S>(lines: I) -> Result<Vec<EntryRecord>>
where
    I: IntoIterator<Item = Result<S>>,
    S: AsRef<str>,
{
    let mut parser = ListingParser::new();
    for line in lines {
        parser.feed(line?.as_ref())?;
    }
    Ok(parser.finish())
}

fn optional<T>(value: &str, parse: impl FnOnce(&str) -> Option<T>) -> FieldResult<Option<T>> {
    if value.is_empty() {
        Ok(None)
    } else {
        parse(value).map(Some).ok_or(Invalid)
    }
}

fn set_size(entry: &mut EntryRecord, value: &str) -> FieldResult<()> {
    entry.file_size = optional(value, |v| v.parse().ok())?;
    Ok(())
}

fn set_packed_size(entry: &mut EntryRecord, value: &str) -> FieldResult<()> {
    entry.compress_size = optional(value, |v| v.parse().ok())?;
    Ok(())
}

fn set_modified(entry: &mut EntryRecord, value: &str) -> FieldResult<()> {
    entry.date_time = optional(value, parse_timestamp)?;
    Ok(())
}

fn set_attributes(entry: &mut EntryRecord, value: &str) -> FieldResult<()> {
    entry.mode = Some(value.to_owned());
    Ok(())
}

fn set_crc(entry: &mut EntryRecord, value: &str) -> FieldResult<()> {
    entry.crc = optional(value, |v| u32::from_str_radix(v, 16).ok())?;
    Ok(())
}

fn set_encrypted(entry: &mut EntryRecord, value: &str) -> FieldResult<()> {
    entry.encrypted = Some(value.to_owned());
    Ok(())
}

fn set_method(entry: &mut EntryRecord, value: &str) -> FieldResult<()> {
    entry.compress_type = optional(value, |v| Some(v.to_owned()))?;
    Ok(())
}

fn set_block(entry: &mut EntryRecord, value: &str) -> FieldResult<()> {
    entry.block = optional(value, |v| v.parse().ok())?;
    Ok(())
}

/// `YYYY-MM-DD hh:mm:ss`, optionally followed by `.fraction` which is dropped.
fn parse_timestamp(value: &str) -> Option<Timestamp> {
    let whole = match value.split_once('.') {
        Some((whole, frac)) if !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()) => {
            whole
        }
        _ => value,
    };

    let parts = whole
        .split([' ', '-', ':'])
        .map(|p| p.parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;

    let [year, month, day, hour, minute, second] = parts[..] else {
        return None;
    };

    Some(Timestamp {
        year,
        month,
        day,
        hour,
        minute,
        second,
    })
}

#[cfg(test)]
#[path = "listing_tests.rs"]
mod tests;
