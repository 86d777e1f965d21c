use std::{fs::File, path::PathBuf, process::ExitCode};

use clap::Parser;
use once_cell::sync::Lazy;
use uprops_base::EnumFromNameT;
use uprops_compiler::{settings::Settings, writer::RustSourceSink, Compiler, Result};
use uprops_logging::{log_error, log_info, set_logger, LogCategory, LogLevel, Logger};

pub const LOG_CAT : LogCategory = LogCategory::new("Main");

static LOGGER : Lazy<Logger> = Lazy::new(Logger::new);

/// Compile the Unicode Character Database into rust lookup tables
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// UCD XML snapshot, e.g. `ucd.all.flat.xml`
    ucd_xml    : PathBuf,
    /// Directory containing `PropertyAliases.txt`, `PropertyValueAliases.txt` and `CaseFolding.txt`
    ucd_dir    : PathBuf,
    /// Directory the generated files are written to
    #[arg(short, long, default_value = "generated")]
    out_dir    : PathBuf,
    /// Settings file, the defaults are used when none is given
    #[arg(short, long)]
    config     : Option<PathBuf>,
    /// Log level, overrides the level in the settings
    #[arg(short, long, value_parser = parse_log_level)]
    log_level  : Option<LogLevel>,
    /// Also write the log to this file
    #[arg(long)]
    log_file   : Option<PathBuf>,
}

fn parse_log_level(name: &str) -> core::result::Result<LogLevel, String> {
    LogLevel::parse(name).ok_or_else(|| format!("unknown log level '{name}'"))
}

fn main() -> ExitCode {
    let args = Args::parse();
    set_logger(&LOGGER);

    if let Some(path) = &args.log_file {
        match File::create(path) {
            Ok(file) => {
                LOGGER.add_writer(Box::new(file));
            },
            Err(err) => log_error!(LOG_CAT, main, "Failed to create log file '{}': {err}", path.display()),
        }
    }

    let res = run(&args);
    let code = match &res {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log_error!(LOG_CAT, main, "{err}");
            ExitCode::FAILURE
        },
    };
    LOGGER.flush();
    code
}

fn run(args: &Args) -> Result<()> {
    let settings = match &args.config {
        Some(path) => Settings::load_file(path)?,
        None => Settings::default(),
    };
    LOGGER.set_max_level(args.log_level.unwrap_or(settings.log_level));

    log_info!(LOG_CAT, "Compiling '{}' with the tables in '{}'", args.ucd_xml.display(), args.ucd_dir.display());
    let compiler = Compiler::open(settings, &args.ucd_xml, &args.ucd_dir)?;
    compiler.run(&mut RustSourceSink::new(&args.out_dir))
}
