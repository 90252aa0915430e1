/*!
 * Configuration handling for ctxdump
 */

use std::env;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::ensure;
use crate::error::{CtxError, Result};

/// Name of the report written into the target directory
pub const OUTPUT_FILE_NAME: &str = "prompt_context.txt";

/// Name of the ignore-rules file looked up in the target directory
pub const IGNORE_FILE_NAME: &str = ".ctxignore";

/// Command-line arguments for ctxdump
///
/// The tool takes no options: it always runs against the current working
/// directory and writes a fixed output file. The parser still provides
/// `--help` and `--version`.
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "ctxdump",
    version = env!("CARGO_PKG_VERSION"),
    about = "Flatten the current directory into a single plain-text prompt context",
    long_about = "Writes the directory structure and the text of every file under the current directory into prompt_context.txt. Entries matching patterns in .ctxignore are left out."
)]
pub struct Args {}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to process; every relative path is computed against it
    pub target_dir: PathBuf,

    /// Output file name, relative to the target directory
    pub output_file: PathBuf,

    /// Ignore-rules file name, relative to the target directory
    pub ignore_file: PathBuf,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(_args: Args) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            CtxError::Config(format!("cannot resolve current directory: {}", e))
        })?;
        Ok(Self::for_dir(cwd))
    }

    /// Configuration rooted at an arbitrary directory, with the fixed file names
    pub fn for_dir(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            output_file: PathBuf::from(OUTPUT_FILE_NAME),
            ignore_file: PathBuf::from(IGNORE_FILE_NAME),
        }
    }

    /// Absolute location of the output file
    pub fn output_path(&self) -> PathBuf {
        self.target_dir.join(&self.output_file)
    }

    /// Absolute location of the ignore-rules file
    pub fn ignore_path(&self) -> PathBuf {
        self.target_dir.join(&self.ignore_file)
    }

    /// Display name of the root, printed above the tree
    pub fn root_name(&self) -> String {
        root_name(&self.target_dir)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.target_dir.exists() {
            return Err(CtxError::PathNotFound(
                self.target_dir.display().to_string(),
            ));
        }
        ensure!(
            self.target_dir.is_dir(),
            Config,
            "target is not a directory: {}",
            self.target_dir.display()
        );
        Ok(())
    }
}

/// Last component of `path`, or the whole path when it has none (e.g. `/`)
pub fn root_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fixed_file_names() {
        let config = Config::for_dir("/work/project");
        assert_eq!(
            config.output_path(),
            PathBuf::from("/work/project/prompt_context.txt")
        );
        assert_eq!(config.ignore_path(), PathBuf::from("/work/project/.ctxignore"));
        assert_eq!(config.root_name(), "project");
    }

    #[test]
    fn test_root_name_of_filesystem_root() {
        assert_eq!(root_name(Path::new("/")), "/");
    }

    #[test]
    fn test_validate() {
        let temp_dir = tempdir().unwrap();
        assert!(Config::for_dir(temp_dir.path()).validate().is_ok());

        let missing = Config::for_dir(temp_dir.path().join("missing"));
        assert!(matches!(missing.validate(), Err(CtxError::PathNotFound(_))));

        let file = temp_dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(matches!(
            Config::for_dir(&file).validate(),
            Err(CtxError::Config(_))
        ));
    }

    #[test]
    fn test_args_accept_no_options() {
        assert!(Args::try_parse_from(["ctxdump"]).is_ok());
        assert!(Args::try_parse_from(["ctxdump", "--output", "x"]).is_err());
    }
}
