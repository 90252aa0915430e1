/*!
 * Plain-text report writer for ctxdump
 */

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::config::Config;
use crate::error::{CtxError, Result};

/// Heading that opens the report
pub const STRUCTURE_HEADING: &str = "## Project Structure\n\n";

/// Assembles the report and writes it to the output file
pub struct ContextWriter {
    /// Writer configuration
    config: Config,
}

impl ContextWriter {
    /// Create a new report writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Full report text: heading, root name, tree, then the content section
    pub fn assemble(&self, tree: &str, contents: &str) -> String {
        let root_name = self.config.root_name();
        let mut report = String::with_capacity(
            STRUCTURE_HEADING.len() + root_name.len() + tree.len() + contents.len() + 3,
        );
        report.push_str(STRUCTURE_HEADING);
        report.push_str(&root_name);
        report.push_str("/\n");
        report.push_str(tree);
        report.push('\n');
        report.push_str(contents);
        report
    }

    /// Write the report, returning the number of bytes written
    pub fn write(&self, tree: &str, contents: &str) -> Result<u64> {
        let report = self.assemble(tree, contents);
        let path = self.config.output_path();
        write_report(&path, &report).map_err(|source| CtxError::Output {
            path: path.clone(),
            source,
        })?;

        debug!("Wrote {} bytes to {}", report.len(), path.display());
        Ok(report.len() as u64)
    }
}

fn write_report(path: &Path, report: &str) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(report.as_bytes())?;
    writer.flush()
}
