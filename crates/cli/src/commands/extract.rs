use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use x7z_engine::OpenOptions;

use crate::commands::CommandResult;

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Archive to extract from
    pub archive: PathBuf,

    /// Members to extract; all when omitted
    pub names: Vec<String>,

    /// Output directory
    #[arg(long = "output-directory", short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Archive password
    #[arg(long, short = 'p')]
    pub password: Option<String>,
}

pub fn run(args: ExtractArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: ExtractArgs) -> CommandResult<ExitCode> {
    let mut options = OpenOptions::new();
    if let Some(password) = &args.password {
        options = options.password(password.as_str());
    }

    let archive = options.open(&args.archive)?;
    archive.extract_all(args.output_dir.as_deref(), args.names.as_slice(), None)?;

    Ok(ExitCode::SUCCESS)
}
