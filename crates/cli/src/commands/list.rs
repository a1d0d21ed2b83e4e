use std::io::Stdout;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use hashbrown::HashSet;
use x7z_engine::{Archive, OpenOptions};

use crate::commands::CommandResult;
use crate::printer::{EntryPrinter, HumanPrinter, JsonPrinter, ListContext, OutputFormat};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Archive to list
    pub archive: PathBuf,

    /// Only list these members
    pub names: Vec<String>,

    /// Archive password
    #[arg(long, short = 'p')]
    pub password: Option<String>,

    /// Output entries as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    fn make_printer(&self) -> Box<dyn EntryPrinter> {
        let format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };

        match format {
            OutputFormat::Human => Box::new(HumanPrinter::<Stdout>::stdout()),
            OutputFormat::Json => Box::new(JsonPrinter::<Stdout>::stdout()),
        }
    }
}

pub fn run(args: ListArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ListArgs) -> CommandResult<ExitCode> {
    let mut options = OpenOptions::new();
    if let Some(password) = &args.password {
        options = options.password(password.as_str());
    }

    let archive = options.open(&args.archive)?;
    let mut printer = args.make_printer();
    print_listing(&archive, &args.names, printer.as_mut())?;

    Ok(ExitCode::SUCCESS)
}

/// Print every member, or only those named in `names` when it is non-empty.
fn print_listing(
    archive: &Archive,
    names: &[String],
    printer: &mut dyn EntryPrinter,
) -> CommandResult<()> {
    let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
    let archive_name = archive.path().display().to_string();
    let ctx = ListContext {
        archive: &archive_name,
    };

    printer.begin(&ctx).context("writing listing")?;
    for entry in archive
        .infolist()
        .iter()
        .filter(|e| wanted.is_empty() || wanted.contains(e.filename.as_str()))
    {
        printer
            .print_row(entry, &ctx)
            .context("writing listing")?;
    }
    printer.finish(&ctx).context("writing listing")?;

    Ok(())
}
