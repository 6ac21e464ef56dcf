//! Output files: count tables, the stats report and the most common reads.
//!
//! Every tabular output starts with the same provenance header:
//!
//! ```text
//! ##Command: <command line>
//! ##Version: <version>
//! #COL1	COL2	...
//! ```

pub mod formats;

pub use formats::fasta::write_most_common;
pub use formats::lib_counts::LibCountsWriter;
pub use formats::query_counts::write_query_counts;
pub use formats::stats::write_stats;

use crate::error::QuestResult;
use niffler::compression::{Format, Level};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const GZIP_SUFFIX: &str = ".gz";

/// Provenance carried into every output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    pub version: String,
    pub command: String,
}

impl AppInfo {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: command.into(),
        }
    }

    /// Rebuild the invoking command line from the process arguments
    pub fn from_env() -> Self {
        let mut args = std::env::args();
        let program = args
            .next()
            .map(|arg| {
                Path::new(&arg)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or(arg)
            })
            .unwrap_or_default();

        let command = std::iter::once(program)
            .chain(args)
            .collect::<Vec<_>>()
            .join(" ");
        Self::new(command)
    }
}

/// `<prefix><suffix>`, plus `.gz` when compressing
pub fn output_path(prefix: &Path, suffix: &str, compress: bool) -> PathBuf {
    let mut name = prefix.as_os_str().to_os_string();
    name.push(suffix);
    if compress {
        name.push(GZIP_SUFFIX);
    }
    PathBuf::from(name)
}

/// Create an output file, gzip-compressed when `compress` is set
pub fn open_output(path: &Path, compress: bool) -> QuestResult<Box<dyn Write>> {
    let file = BufWriter::new(File::create(path)?);
    if compress {
        Ok(niffler::get_writer(Box::new(file), Format::Gzip, Level::Six)?)
    } else {
        Ok(Box::new(file))
    }
}

pub fn write_header<W: Write>(
    writer: &mut W,
    app_info: &AppInfo,
    columns: &[&str],
) -> QuestResult<()> {
    writeln!(writer, "##Command: {}", app_info.command)?;
    writeln!(writer, "##Version: {}", app_info.version)?;
    writeln!(writer, "#{}", columns.join("\t"))?;
    Ok(())
}
