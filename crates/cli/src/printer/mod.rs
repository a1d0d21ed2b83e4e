use std::io::{self, Write};

use x7z_engine::EntryRecord;

const HEADER: &str = "   Date      Time    Attr         Size   Compressed  Name";
const RULE: &str = "------------------- ----- ------------ ------------  ------------------------";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Column table in the style of `7z l`.
    #[default]
    Human,
    /// NDJSON (newline-delimited JSON) for machine consumption.
    Json,
}

/// Static context about a listing run.
#[derive(Debug)]
pub struct ListContext<'a> {
    /// Archive path as given on the command line
    pub archive: &'a str,
}

/// Running sums over the printed rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub files: usize,
    pub folders: usize,
    pub size: u64,
    pub compressed: u64,
}

impl Totals {
    pub fn add(&mut self, entry: &EntryRecord) {
        if entry.is_dir() {
            self.folders += 1;
        }
        if entry.is_file() {
            self.files += 1;
        }
        self.size += entry.file_size.unwrap_or(0);
        self.compressed += entry.compress_size.unwrap_or(0);
    }
}

/// Trait for printing archive listings.
///
/// Implementations receive the entries in listing order and keep their own
/// totals for the footer.
pub trait EntryPrinter {
    fn begin(&mut self, ctx: &ListContext) -> io::Result<()>;

    fn print_row(&mut self, entry: &EntryRecord, ctx: &ListContext) -> io::Result<()>;

    fn finish(&mut self, ctx: &ListContext) -> io::Result<()>;
}

/// `D`, `R` and `A` flags in a five-column field, dots elsewhere.
pub fn attribute_flags(entry: &EntryRecord) -> String {
    let mut flags = ['.'; 5];
    if entry.is_dir() {
        flags[0] = 'D';
    }
    if entry.is_readonly() {
        flags[1] = 'R';
    }
    if entry.is_file() {
        flags[4] = 'A';
    }
    flags.iter().collect()
}

fn optional_size(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub struct HumanPrinter<W: Write> {
    out: W,
    totals: Totals,
}

impl<W: Write> HumanPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            totals: Totals::default(),
        }
    }

    pub fn stdout() -> HumanPrinter<io::Stdout> {
        HumanPrinter::new(io::stdout())
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }
}

impl<W: Write> EntryPrinter for HumanPrinter<W> {
    fn begin(&mut self, _ctx: &ListContext) -> io::Result<()> {
        writeln!(self.out, "{HEADER}")?;
        writeln!(self.out, "{RULE}")
    }

    fn print_row(&mut self, entry: &EntryRecord, _ctx: &ListContext) -> io::Result<()> {
        self.totals.add(entry);

        let date_time = entry
            .date_time
            .map(|t| t.to_string())
            .unwrap_or_default();

        writeln!(
            self.out,
            "{:<19} {} {:>12} {:>12}  {}",
            date_time,
            attribute_flags(entry),
            optional_size(entry.file_size),
            optional_size(entry.compress_size),
            entry.filename,
        )
    }

    fn finish(&mut self, _ctx: &ListContext) -> io::Result<()> {
        let t = self.totals;
        writeln!(self.out, "{RULE}")?;
        write!(
            self.out,
            "{:<19} {:<5} {:>12} {:>12}  {} files",
            "", "", t.size, t.compressed, t.files
        )?;
        if t.folders > 0 {
            write!(self.out, ", {} folders", t.folders)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

pub struct JsonPrinter<W: Write> {
    out: W,
    totals: Totals,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            totals: Totals::default(),
        }
    }

    pub fn stdout() -> JsonPrinter<io::Stdout> {
        JsonPrinter::new(io::stdout())
    }
}

impl<W: Write> EntryPrinter for JsonPrinter<W> {
    fn begin(&mut self, _ctx: &ListContext) -> io::Result<()> {
        Ok(())
    }

    fn print_row(&mut self, entry: &EntryRecord, ctx: &ListContext) -> io::Result<()> {
        self.totals.add(entry);

        let obj = serde_json::json!({
            "type": "entry",
            "archive": ctx.archive,
            "entry": entry,
        });
        writeln!(self.out, "{}", obj)
    }

    fn finish(&mut self, ctx: &ListContext) -> io::Result<()> {
        let t = self.totals;
        let obj = serde_json::json!({
            "type": "summary",
            "archive": ctx.archive,
            "files": t.files,
            "folders": t.folders,
            "size": t.size,
            "compressed": t.compressed,
        });
        writeln!(self.out, "{}", obj)?;
        self.out.flush()
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
