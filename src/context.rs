/*!
 * End-to-end generation of the prompt context file
 */

use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use log::info;

use crate::config::Config;
use crate::error::Result;
use crate::render::ContentRenderer;
use crate::report::ScanReport;
use crate::rules::IgnoreRules;
use crate::tree::TreeBuilder;
use crate::utils::to_posix;
use crate::writer::ContextWriter;

/// Load the rules, walk the root, render contents and write the report.
///
/// Only a failure to read an existing rules file or to write the output
/// aborts; everything else is rendered inline.
pub fn generate(config: &Config, progress: Arc<ProgressBar>) -> Result<ScanReport> {
    let start_time = Instant::now();

    // The tool's own files never show up in the report.
    let rules = IgnoreRules::load(&config.target_dir, &config.ignore_file)?
        .reserve(to_posix(&config.ignore_file))
        .reserve(to_posix(&config.output_file));

    let scan = TreeBuilder::new(&config.target_dir, &rules).scan();
    info!(
        "Walked {} directories, {} files kept, {} entries ignored",
        scan.statistics.dirs_visited, scan.statistics.files_listed, scan.statistics.entries_ignored
    );

    progress.set_length(scan.files.len() as u64);
    let contents = ContentRenderer::new(progress).render(&scan.files);

    let writer = ContextWriter::new(config.clone());
    let output_bytes = writer.write(&scan.tree, &contents.text)?;

    Ok(ScanReport {
        output_file: config.output_file.display().to_string(),
        duration: start_time.elapsed(),
        output_bytes,
        tree: scan.statistics,
        contents: contents.statistics,
    })
}
