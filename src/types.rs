/*!
 * Core types and data structures for ctxdump
 */

use std::fmt;
use std::path::PathBuf;

/// Kind of a filesystem entry as far as the tree is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory, descended into
    Directory,
    /// Anything else; listed and read
    File,
}

/// A filesystem object discovered while listing a directory
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// Bare entry name
    pub name: String,
    /// Directory or file
    pub kind: EntryKind,
    /// Absolute path on disk
    pub path: PathBuf,
    /// Posix-style path relative to the scan root
    pub rel_path: String,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Branch glyph drawn in front of an entry name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Entry has visible siblings after it
    Middle,
    /// Final visible entry of its directory
    Last,
}

impl Branch {
    pub fn for_position(is_last: bool) -> Self {
        if is_last {
            Self::Last
        } else {
            Self::Middle
        }
    }

    /// Glyph for the entry's own line
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Middle => "|-- ",
            Self::Last => "\\-- ",
        }
    }

    /// Indentation contributed to the entry's descendants
    pub fn child_indent(self) -> &'static str {
        match self {
            Self::Middle => "|   ",
            Self::Last => "    ",
        }
    }
}

/// One rendered line of the ASCII tree
#[derive(Debug, Clone)]
pub struct TreeLine<'a> {
    pub prefix: &'a str,
    pub branch: Branch,
    pub name: &'a str,
    pub is_dir: bool,
}

impl fmt::Display for TreeLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, self.branch.glyph(), self.name)?;
        if self.is_dir {
            f.write_str("/")?;
        }
        Ok(())
    }
}

/// A file scheduled for the content section, in traversal order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Posix-style path relative to the scan root, used as the block header
    pub rel_path: String,
}

/// Ordered files produced by the tree walk and consumed by the renderer
pub type FileReadList = Vec<FileRef>;

/// Body of one content block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBody {
    /// Decoded text of the file
    Text(String),
    /// NUL byte found in the leading sample
    Binary,
    /// File could not be read
    ReadError,
}

/// One per-file section of the content output
#[derive(Debug, Clone)]
pub struct ContentBlock {
    /// Header path, relative to the scan root
    pub header: String,
    pub body: ContentBody,
}
