/*!
 * Directory walking and ASCII tree rendering
 */

use std::path::Path;

use log::{debug, warn};
use walkdir::WalkDir;

use crate::rules::IgnoreRules;
use crate::types::{Branch, DirEntry, EntryKind, FileReadList, FileRef, TreeLine};
use crate::utils::to_posix;

/// Line emitted in place of a directory's children when it cannot be listed
const ACCESS_ERROR: &str = "[ERROR: Cannot access]";

/// Counters collected during a walk
#[derive(Debug, Clone, Default)]
pub struct TreeStatistics {
    /// Directories listed successfully, root included
    pub dirs_visited: usize,
    /// Directories that could not be listed
    pub dirs_inaccessible: usize,
    /// Entries dropped by the ignore rules
    pub entries_ignored: usize,
    /// Files added to the read list
    pub files_listed: usize,
}

/// Result of walking the scan root
#[derive(Debug, Clone)]
pub struct ScanOutput {
    /// Rendered tree, one newline-terminated line per visible entry
    pub tree: String,
    /// Files in tree order
    pub files: FileReadList,
    pub statistics: TreeStatistics,
}

/// Recursive walker producing the tree text and the file read list
pub struct TreeBuilder<'a> {
    root: &'a Path,
    rules: &'a IgnoreRules,
    statistics: TreeStatistics,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(root: &'a Path, rules: &'a IgnoreRules) -> Self {
        Self {
            root,
            rules,
            statistics: TreeStatistics::default(),
        }
    }

    /// Walk the whole root
    pub fn scan(mut self) -> ScanOutput {
        let root = self.root;
        let mut files = FileReadList::new();
        let tree = self.build(root, &mut files, "");
        ScanOutput {
            tree,
            files,
            statistics: self.statistics,
        }
    }

    /// Render the children of `dir` below `prefix`, appending files to `out`
    /// in the order their lines are emitted.
    pub fn build(&mut self, dir: &Path, out: &mut FileReadList, prefix: &str) -> String {
        let entries = match self.list_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot access directory {}: {}", dir.display(), e);
                self.statistics.dirs_inaccessible += 1;
                return format!("{}{}{}\n", prefix, Branch::Last.glyph(), ACCESS_ERROR);
            }
        };
        self.statistics.dirs_visited += 1;

        // Filter before deciding which entry is last, so ignored trailing
        // siblings cannot leave a kept entry with the wrong glyph.
        let total = entries.len();
        let visible: Vec<DirEntry> = entries
            .into_iter()
            .filter(|e| !self.rules.is_ignored(&e.rel_path, &e.name))
            .collect();
        self.statistics.entries_ignored += total - visible.len();

        let mut output = String::new();
        let count = visible.len();
        for (i, entry) in visible.into_iter().enumerate() {
            let branch = Branch::for_position(i + 1 == count);
            let line = TreeLine {
                prefix,
                branch,
                name: &entry.name,
                is_dir: entry.is_dir(),
            };
            output.push_str(&line.to_string());
            output.push('\n');

            match entry.kind {
                EntryKind::Directory => {
                    debug!("Descending into {}", entry.rel_path);
                    let child_prefix = format!("{}{}", prefix, branch.child_indent());
                    output.push_str(&self.build(&entry.path, out, &child_prefix));
                }
                EntryKind::File => {
                    self.statistics.files_listed += 1;
                    out.push(FileRef {
                        path: entry.path,
                        rel_path: entry.rel_path,
                    });
                }
            }
        }

        output
    }

    /// Direct children of `dir`, sorted case-insensitively by name
    fn list_dir(&self, dir: &Path) -> walkdir::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            let rel = entry.path().strip_prefix(self.root).unwrap_or(entry.path());
            // `Path::is_dir` follows symlinks, so linked directories are walked too.
            let kind = if entry.path().is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };

            entries.push(DirEntry {
                name,
                kind,
                rel_path: to_posix(rel),
                path: entry.into_path(),
            });
        }

        entries.sort_by_cached_key(|e| (e.name.to_lowercase(), e.name.clone()));
        Ok(entries)
    }
}
