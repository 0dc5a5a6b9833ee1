use std::fs;
use std::io::{self, Write};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

pub const MAX_FILES_PER_DIR: usize = 5;
const INDENT: &str = "    ";

/// Writes a depth-first tree of `start` to `out`, listing at most
/// [`MAX_FILES_PER_DIR`] files per directory in filesystem order.
///
/// Unreadable directories are logged and skipped. A start path that is not a
/// directory produces only the header. Only write errors on `out` are returned.
pub fn report<W: Write>(start: &Path, out: &mut W) -> io::Result<()> {
    if !start.exists() {
        tracing::warn!("⚠️ Path does not exist: {}", start.display());
        return Ok(());
    }

    writeln!(out, "\nStructure of: {}", start.display())?;
    if !start.is_dir() {
        return Ok(());
    }

    // 同一目錄內檔案排在子目錄之前（穩定排序，保留檔案系統順序）
    let walker = WalkDir::new(start)
        .follow_links(false)
        .sort_by(|a, b| a.file_type().is_dir().cmp(&b.file_type().is_dir()));

    let mut listing = DirListing::default();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("⚠️ Skipping unreadable path: {}", e);
                continue;
            }
        };

        if entry.file_type().is_dir() {
            listing.finish(out)?;
            writeln!(out, "{}{}/", INDENT.repeat(entry.depth()), dir_name(&entry, start))?;
            listing = DirListing::at_depth(entry.depth() + 1);
        } else if is_dir_symlink(&entry) {
            // 指向目錄的連結不算檔案，也不展開
            continue;
        } else {
            listing.push(out, &entry.file_name().to_string_lossy())?;
        }
    }
    listing.finish(out)
}

/// [`report`] to stdout.
pub fn print_tree(start: &Path) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    report(start, &mut handle)
}

/// Files of the directory printed last; entries arrive right after it.
#[derive(Default)]
struct DirListing {
    depth: usize,
    shown: usize,
    hidden: usize,
}

impl DirListing {
    fn at_depth(depth: usize) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    fn push<W: Write>(&mut self, out: &mut W, name: &str) -> io::Result<()> {
        if self.shown < MAX_FILES_PER_DIR {
            self.shown += 1;
            writeln!(out, "{}{}", INDENT.repeat(self.depth), name)
        } else {
            self.hidden += 1;
            Ok(())
        }
    }

    fn finish<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.hidden > 0 {
            writeln!(
                out,
                "{}... ({} more files)",
                INDENT.repeat(self.depth),
                self.hidden
            )?;
            self.hidden = 0;
        }
        Ok(())
    }
}

fn dir_name(entry: &DirEntry, start: &Path) -> String {
    if entry.depth() == 0 {
        return start
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| start.display().to_string());
    }
    entry.file_name().to_string_lossy().into_owned()
}

fn is_dir_symlink(entry: &DirEntry) -> bool {
    entry.path_is_symlink()
        && fs::metadata(entry.path())
            .map(|m| m.is_dir())
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::logger::capture_logs;
    use tempfile::TempDir;

    fn render(path: &Path) -> String {
        let mut buf = Vec::new();
        report(path, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_report_limits_files_per_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("sample_data");
        fs::create_dir_all(root.join("subdir1")).unwrap();
        for i in 0..7 {
            fs::write(root.join(format!("file{}.txt", i)), format!("content {}", i)).unwrap();
        }

        let output = render(&root);

        let listed = output
            .lines()
            .filter(|l| l.starts_with("    file") && l.ends_with(".txt"))
            .count();
        assert_eq!(listed, 5);
        assert!(output.contains("    ... (2 more files)"));
        assert!(output.contains("sample_data/"));
        assert!(output.contains("    subdir1/"));
    }

    #[test]
    fn test_report_files_listed_before_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        fs::create_dir_all(root.join("inner")).unwrap();
        fs::write(root.join("top.txt"), "x").unwrap();
        fs::write(root.join("inner/leaf.txt"), "y").unwrap();

        let output = render(&root);

        let top = output.find("    top.txt").unwrap();
        let inner = output.find("    inner/").unwrap();
        assert!(top < inner);
        assert!(output.contains("    inner/\n        leaf.txt\n"));
    }

    #[test]
    fn test_report_nested_indentation() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("a/b/deep.txt"), "x").unwrap();

        let output = render(&root);

        assert!(output.contains("\n    a/\n"));
        assert!(output.contains("\n        b/\n"));
        assert!(output.contains("\n            deep.txt\n"));
    }

    #[test]
    fn test_report_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("empty");
        fs::create_dir(&root).unwrap();

        let output = render(&root);

        assert!(output.contains("Structure of:"));
        assert!(output.contains("empty/"));
        assert!(!output.contains("more files"));
    }

    #[test]
    fn test_report_file_path_prints_header_only() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("single.txt");
        fs::write(&file, "x").unwrap();

        let output = render(&file);

        assert_eq!(output, format!("\nStructure of: {}\n", file.display()));
    }

    #[test]
    fn test_report_missing_path_warns_and_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut output = String::new();

        let logs = capture_logs(|| output = render(&temp_dir.path().join("missing")));

        assert!(output.is_empty());
        assert!(logs.contains("Path does not exist"));
    }

    #[cfg(unix)]
    #[test]
    fn test_report_continues_past_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        let locked = root.join("a_locked");
        fs::create_dir_all(&locked).unwrap();
        fs::create_dir_all(root.join("z_open")).unwrap();
        fs::write(root.join("z_open/visible.txt"), "x").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let mut buf = Vec::new();
        let result = report(&root, &mut buf);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(result.is_ok());
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("    z_open/\n        visible.txt\n"));
    }

    #[cfg(unix)]
    #[test]
    fn test_report_skips_symlinked_directories() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("inside.txt"), "x").unwrap();
        let root = temp_dir.path().join("root");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("real.txt"), "y").unwrap();
        std::os::unix::fs::symlink(&target, root.join("linked")).unwrap();

        let output = render(&root);

        assert!(output.contains("    real.txt"));
        assert!(!output.contains("linked"));
        assert!(!output.contains("inside.txt"));
    }
}
