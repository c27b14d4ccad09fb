//! Logging setup. The terminal belongs to the UI, so log records go to a file.

use std::{
    fs::{self, File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Local;
use color_eyre::eyre::{Result, WrapErr};
use env_logger::{Builder, Env, Target, WriteStyle};

/// Environment variable holding the log filter, e.g. `debug` or `starfall_field=trace`.
pub const LOG_ENV: &str = "STARFALL_LOG";

const DEFAULT_FILTER: &str = "info";
const LOG_FILE: &str = "starfall.log";

fn open_log(dir: &Path) -> Result<(File, PathBuf)> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("failed to create log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    Ok((file, path))
}

/// Logger writing timestamped plain lines to `file`, filtered by `env`.
fn builder(env: Env<'_>, file: File) -> Builder {
    let mut builder = Builder::from_env(env);
    builder
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        });
    builder
}

/// Install the file logger in `dir`. Returns the log file path.
pub fn init(dir: &Path) -> Result<PathBuf> {
    let (file, path) = open_log(dir)?;
    builder(Env::new().filter_or(LOG_ENV, DEFAULT_FILTER), file)
        .try_init()
        .wrap_err("failed to install logger")?;
    Ok(path)
}
