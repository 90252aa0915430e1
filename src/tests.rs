/*!
 * End-to-end tests for ctxdump
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use tempfile::tempdir;

use crate::config::Config;
use crate::context::generate;
use crate::render::ContentRenderer;
use crate::rules::IgnoreRules;
use crate::tree::TreeBuilder;

// Helper function to create a test directory structure
fn setup_test_directory() -> io::Result<tempfile::TempDir> {
    let temp_dir = tempdir()?;

    fs::create_dir(temp_dir.path().join("dir1"))?;
    fs::create_dir(temp_dir.path().join("Dir2"))?;
    fs::create_dir(temp_dir.path().join("dir1").join("subdir"))?;

    let mut file1 = File::create(temp_dir.path().join("file1.txt"))?;
    writeln!(file1, "This is a text file with content")?;

    let mut file2 = File::create(temp_dir.path().join("dir1").join("file2.txt"))?;
    writeln!(file2, "This is another text file\nwith multiple lines")?;

    let mut file3 = File::create(
        temp_dir
            .path()
            .join("dir1")
            .join("subdir")
            .join("file3.txt"),
    )?;
    writeln!(file3, "Nested file content")?;

    let mut log_file = File::create(temp_dir.path().join("Dir2").join("debug.log"))?;
    writeln!(log_file, "log line")?;

    // Create a binary file with a text extension
    let mut bin_file = File::create(temp_dir.path().join("binary.txt"))?;
    bin_file.write_all(&[0u8, 1u8, 2u8, 3u8])?;

    Ok(temp_dir)
}

fn run(root: &Path) -> io::Result<String> {
    let config = Config::for_dir(root);
    generate(&config, Arc::new(ProgressBar::hidden()))?;
    fs::read_to_string(config.output_path())
}

/// File paths in the order they appear as tree leaves, rebuilt from the
/// indentation of the rendered tree.
fn tree_files(tree: &str) -> Vec<String> {
    let mut stack: Vec<String> = Vec::new();
    let mut files = Vec::new();
    for line in tree.lines() {
        let glyph_at = line.find("|-- ").into_iter().chain(line.find("\\-- ")).min();
        let Some(pos) = glyph_at else { continue };
        let depth = pos / 4;
        let name = &line[pos + 4..];
        stack.truncate(depth);
        match name.strip_suffix('/') {
            Some(dir) => stack.push(dir.to_string()),
            None => {
                let mut parts = stack.clone();
                parts.push(name.to_string());
                files.push(parts.join("/"));
            }
        }
    }
    files
}

fn content_headers(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|l| l.strip_prefix("### File: "))
        .map(str::to_string)
        .collect()
}

fn tree_section(output: &str) -> &str {
    let start = output.find('\n').unwrap() + 2;
    let start = start + output[start..].find('\n').unwrap() + 1;
    let end = output.find("\n---\n## File Contents\n").unwrap();
    &output[start..end]
}

#[test]
fn test_basic_scan() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let output = run(temp_dir.path())?;
    let root_name = temp_dir.path().file_name().unwrap().to_string_lossy();

    let expected_tree = format!(
        "## Project Structure\n\n{}/\n\
         |-- binary.txt\n\
         |-- dir1/\n\
         |   |-- file2.txt\n\
         |   \\-- subdir/\n\
         |       \\-- file3.txt\n\
         |-- Dir2/\n\
         |   \\-- debug.log\n\
         \\-- file1.txt\n\n",
        root_name
    );
    assert!(output.starts_with(&expected_tree), "unexpected output:\n{}", output);

    assert!(output.contains(
        "\n### File: dir1/file2.txt\n---\nThis is another text file\nwith multiple lines\n\n"
    ));
    assert!(output.contains("\n### File: binary.txt\n---\n[Skipped binary file]\n"));

    Ok(())
}

#[test]
fn test_tree_and_contents_agree() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    fs::write(temp_dir.path().join(".ctxignore"), "*.log\n/dir1/subdir\n")?;

    let output = run(temp_dir.path())?;
    let tree_leaves = tree_files(tree_section(&output));
    let headers = content_headers(&output);

    assert_eq!(tree_leaves, headers);
    assert_eq!(headers, vec!["binary.txt", "dir1/file2.txt", "file1.txt"]);

    Ok(())
}

#[test]
fn test_file_list_matches_tree_order() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let rules = IgnoreRules::default();

    let scan = TreeBuilder::new(temp_dir.path(), &rules).scan();
    let leaves = tree_files(&scan.tree);
    let listed: Vec<_> = scan.files.iter().map(|f| f.rel_path.clone()).collect();
    assert_eq!(leaves, listed);

    let rendered = ContentRenderer::new(Arc::new(ProgressBar::hidden())).render(&scan.files);
    assert_eq!(content_headers(&rendered.text), listed);

    Ok(())
}

#[test]
fn test_ignored_directory_removes_subtree() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    fs::write(temp_dir.path().join(".ctxignore"), "dir1/\n")?;

    let output = run(temp_dir.path())?;
    assert!(!output.contains("dir1"));
    assert!(!output.contains("subdir"));
    assert!(!output.contains("file2.txt"));
    assert!(!output.contains("file3.txt"));
    assert!(!output.contains("Nested file content"));
    assert!(output.contains("### File: file1.txt"));

    Ok(())
}

#[test]
fn test_rooted_and_name_patterns() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("build"))?;
    fs::create_dir_all(root.join("src/build"))?;
    fs::create_dir_all(root.join("deep/dir"))?;
    fs::write(root.join("build/out.o"), "x")?;
    fs::write(root.join("src/build/gen.rs"), "gen")?;
    fs::write(root.join("a.log"), "a")?;
    fs::write(root.join("deep/dir/b.log"), "b")?;
    fs::write(root.join(".ctxignore"), "/build\n*.log\n")?;

    let output = run(root)?;
    assert_eq!(
        content_headers(&output),
        vec!["src/build/gen.rs"]
    );
    assert!(output.contains("|-- deep/\n|   \\-- dir/\n\\-- src/\n"));

    Ok(())
}

#[test]
fn test_empty_root() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let output = run(temp_dir.path())?;
    let root_name = temp_dir.path().file_name().unwrap().to_string_lossy();

    assert_eq!(
        output,
        format!(
            "## Project Structure\n\n{}/\n\n\n---\n## File Contents\n",
            root_name
        )
    );

    Ok(())
}

#[test]
fn test_ignore_file_example() -> io::Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("a.txt"), "hi")?;
    fs::write(temp_dir.path().join("b.txt"), "bye")?;
    fs::write(temp_dir.path().join(".ctxignore"), "b.txt\n")?;

    let output = run(temp_dir.path())?;
    let root_name = temp_dir.path().file_name().unwrap().to_string_lossy();

    assert_eq!(
        output,
        format!(
            "## Project Structure\n\n{}/\n\\-- a.txt\n\n\
             \n---\n## File Contents\n\
             \n### File: a.txt\n---\nhi\n",
            root_name
        )
    );

    Ok(())
}

#[test]
fn test_binary_detection_ignores_extension() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let mut data = b"looks like text".to_vec();
    data.push(0);
    data.extend_from_slice(b"more text");
    fs::write(temp_dir.path().join("notes.md"), &data)?;

    let output = run(temp_dir.path())?;
    assert!(output.contains("### File: notes.md\n---\n[Skipped binary file]\n"));
    assert!(!output.contains("looks like text"));

    Ok(())
}

#[test]
fn test_second_run_does_not_embed_previous_output() -> io::Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("a.txt"), "hi")?;

    let first = run(temp_dir.path())?;
    let second = run(temp_dir.path())?;
    assert_eq!(first, second);
    assert!(!second.contains("prompt_context.txt"));

    Ok(())
}

#[test]
fn test_nested_tool_file_names_are_kept() -> io::Result<()> {
    let temp_dir = tempdir()?;
    fs::create_dir(temp_dir.path().join("sub"))?;
    fs::write(temp_dir.path().join("sub/.ctxignore"), "nothing")?;

    let output = run(temp_dir.path())?;
    assert_eq!(content_headers(&output), vec!["sub/.ctxignore"]);

    Ok(())
}

#[test]
fn test_invalid_utf8_is_tolerated() -> io::Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("latin1.txt"), b"caf\xe9 ok\r\n")?;

    let output = run(temp_dir.path())?;
    assert!(output.contains("### File: latin1.txt\n---\ncaf ok\n\n"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_entries_degrade_inline() -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    fs::create_dir(root.join("locked"))?;
    fs::write(root.join("locked/secret.txt"), "secret")?;
    fs::write(root.join("private.txt"), "private")?;
    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o000))?;
    fs::set_permissions(root.join("private.txt"), fs::Permissions::from_mode(0o000))?;

    // Permission bits are not enforced for root; nothing to observe then.
    let enforced = fs::read_dir(root.join("locked")).is_err();
    let output = run(root);

    fs::set_permissions(root.join("locked"), fs::Permissions::from_mode(0o755))?;
    fs::set_permissions(root.join("private.txt"), fs::Permissions::from_mode(0o644))?;

    let output = output?;
    if enforced {
        assert!(output.contains("|-- locked/\n|   \\-- [ERROR: Cannot access]\n\\-- private.txt\n"));
        assert!(output.contains(
            "### File: private.txt\n---\n[Error: Could not open file to read.]\n"
        ));
        assert!(!output.contains("secret"));
    }

    Ok(())
}
