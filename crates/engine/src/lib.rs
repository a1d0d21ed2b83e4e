mod archive;
mod entry;
mod error;
mod executor;
mod exit;
mod listing;
mod resolver;
pub mod runner;

#[cfg(test)]
mod test_support;

pub use archive::{Archive, Mode, OpenOptions};
pub use entry::{EntryRecord, MemberName, Timestamp};
pub use error::{Error, Result};
pub use executor::{Executor, ExtractOptions};
pub use exit::*;
pub use listing::{ListingParser, parse_listing};
pub use resolver::{ProcessProbe, Probe, Resolver, default_resolver, get_executor};
