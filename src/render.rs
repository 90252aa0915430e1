/*!
 * Rendering of file contents in tree order
 */

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use log::warn;

use crate::types::{ContentBlock, ContentBody, FileRef};

/// Number of leading bytes inspected for NUL when detecting binary files
pub const BINARY_SNIFF_LEN: u64 = 1024;

/// Body written for files detected as binary
pub const BINARY_PLACEHOLDER: &str = "[Skipped binary file]";

/// Body written for files that could not be read
pub const READ_ERROR_PLACEHOLDER: &str = "[Error: Could not open file to read.]";

/// Heading that opens the content section
pub const CONTENTS_HEADING: &str = "\n---\n## File Contents\n";

/// Counters collected while rendering
#[derive(Debug, Clone, Default)]
pub struct RenderStatistics {
    /// Files whose text was included
    pub text_files: usize,
    /// Files replaced by the binary placeholder
    pub binary_files: usize,
    /// Files replaced by the read-error placeholder
    pub unreadable_files: usize,
    /// Lines of included text
    pub total_lines: usize,
    /// Characters of included text
    pub total_chars: usize,
}

/// Rendered content section
#[derive(Debug, Clone)]
pub struct RenderedContents {
    pub text: String,
    pub statistics: RenderStatistics,
}

/// Turns the file read list into the content section of the report
pub struct ContentRenderer {
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl ContentRenderer {
    pub fn new(progress: Arc<ProgressBar>) -> Self {
        Self { progress }
    }

    /// Render every file in `files`, in order, under the contents heading
    pub fn render(&self, files: &[FileRef]) -> RenderedContents {
        let mut text = String::from(CONTENTS_HEADING);
        let mut statistics = RenderStatistics::default();

        for file in files {
            self.progress.set_message(file.rel_path.clone());
            let block = self.read_block(file);

            match &block.body {
                ContentBody::Text(content) => {
                    statistics.text_files += 1;
                    statistics.total_lines += content.lines().count();
                    statistics.total_chars += content.chars().count();
                }
                ContentBody::Binary => statistics.binary_files += 1,
                ContentBody::ReadError => statistics.unreadable_files += 1,
            }

            push_block(&mut text, &block);
            self.progress.inc(1);
        }

        RenderedContents { text, statistics }
    }

    /// Read one file into a content block. Never fails: problems become
    /// placeholder bodies.
    pub fn read_block(&self, file: &FileRef) -> ContentBlock {
        let body = if is_binary(&file.path) {
            ContentBody::Binary
        } else {
            match read_text(&file.path) {
                Ok(content) => ContentBody::Text(content),
                Err(e) => {
                    warn!("Could not read {}: {}", file.path.display(), e);
                    ContentBody::ReadError
                }
            }
        };

        ContentBlock {
            header: file.rel_path.clone(),
            body,
        }
    }
}

/// Append the textual form of `block` to `out`
fn push_block(out: &mut String, block: &ContentBlock) {
    out.push_str("\n### File: ");
    out.push_str(&block.header);
    out.push_str("\n---\n");
    match &block.body {
        ContentBody::Text(content) => out.push_str(content),
        ContentBody::Binary => out.push_str(BINARY_PLACEHOLDER),
        ContentBody::ReadError => out.push_str(READ_ERROR_PLACEHOLDER),
    }
    out.push('\n');
}

/// Whether the leading bytes of the file contain a NUL.
///
/// A file that cannot be opened is reported as not binary; the full read
/// that follows turns it into the error placeholder.
pub fn is_binary(path: &Path) -> bool {
    let mut sample = Vec::with_capacity(BINARY_SNIFF_LEN as usize);
    let read = File::open(path).and_then(|f| f.take(BINARY_SNIFF_LEN).read_to_end(&mut sample));
    match read {
        Ok(_) => sample.contains(&0),
        Err(_) => false,
    }
}

/// Read a whole file as text, dropping invalid UTF-8 and normalizing line endings
pub fn read_text(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(normalize_newlines(&decode_ignoring_invalid(&bytes)))
}

/// Decode UTF-8, skipping byte sequences that are not valid
fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Convert `\r\n` and lone `\r` to `\n`
fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
