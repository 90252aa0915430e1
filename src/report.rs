/*!
 * Reporting functionality for ctxdump
 *
 * Prints the confirmation line and a summary table of the run using the
 * tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::render::RenderStatistics;
use crate::tree::TreeStatistics;
use crate::utils::format_file_size;

/// Statistics for one run
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Output file name, as shown to the user
    pub output_file: String,
    /// Time taken to walk, render and write
    pub duration: Duration,
    /// Bytes written to the output file
    pub output_bytes: u64,
    /// Counters from the directory walk
    pub tree: TreeStatistics,
    /// Counters from content rendering
    pub contents: RenderStatistics,
}

impl ScanReport {
    /// Rough LLM token estimate, four characters per token
    pub fn estimated_tokens(&self) -> usize {
        self.contents.total_chars / 4
    }
}

/// Report generator for run results
pub struct Reporter;

impl Reporter {
    /// Create a new reporter
    pub fn new() -> Self {
        Self
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Confirmation line naming the output file
    pub fn success_message(&self, report: &ScanReport) -> String {
        format!("Success! Project context written to {}", report.output_file)
    }

    /// Generate the full report string
    pub fn generate_report(&self, report: &ScanReport) -> String {
        format!(
            "{}\n\n{}",
            self.success_message(report),
            self.create_summary_table(report)
        )
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) {
        println!("{}", self.generate_report(report));
    }

    // Create a summary table using the tabled crate
    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let unreadable = report.tree.dirs_inaccessible + report.contents.unreadable_files;
        let rows = vec![
            SummaryRow {
                key: "Output File",
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "Files Written",
                value: self.format_number(report.tree.files_listed),
            },
            SummaryRow {
                key: "Directories",
                value: self.format_number(report.tree.dirs_visited),
            },
            SummaryRow {
                key: "Ignored Entries",
                value: self.format_number(report.tree.entries_ignored),
            },
            SummaryRow {
                key: "Binary Skipped",
                value: self.format_number(report.contents.binary_files),
            },
            SummaryRow {
                key: "Unreadable",
                value: self.format_number(unreadable),
            },
            SummaryRow {
                key: "Total Lines",
                value: self.format_number(report.contents.total_lines),
            },
            SummaryRow {
                key: "Output Size",
                value: format_file_size(report.output_bytes),
            },
            SummaryRow {
                key: "LLM Tokens",
                value: format!(
                    "{} tokens (estimated)",
                    self.format_number(report.estimated_tokens())
                ),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}
