//! Output writing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Output file for `entry`: `<output_dir>/<entry stem>.css`.
pub fn output_path(output_dir: &Path, entry: &Path) -> PathBuf {
    let stem = entry
        .file_stem()
        .map_or_else(|| "style".into(), |s| s.to_string_lossy());
    output_dir.join(format!("{stem}.css"))
}

/// Write compiled CSS, creating the destination directory when missing.
pub fn write_css(output_dir: &Path, entry: &Path, css: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_path(output_dir, entry);
    fs::write(&path, css)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_uses_entry_stem() {
        assert_eq!(
            output_path(Path::new("/site/css"), Path::new("/site/scss/style.scss")),
            PathBuf::from("/site/css/style.css")
        );
        assert_eq!(
            output_path(Path::new("out"), Path::new("theme.dark.scss")),
            PathBuf::from("out/theme.dark.css")
        );
    }

    #[test]
    fn test_write_creates_directory() {
        let temp = TempDir::new().unwrap();
        let output_dir = temp.path().join("public/css");

        let path = write_css(&output_dir, Path::new("style.scss"), ".a{}").unwrap();
        assert_eq!(path, output_dir.join("style.css"));
        assert_eq!(fs::read_to_string(path).unwrap(), ".a{}");
    }

    #[test]
    fn test_write_overwrites_previous_output() {
        let temp = TempDir::new().unwrap();
        write_css(temp.path(), Path::new("style.scss"), ".old{}").unwrap();
        let path = write_css(temp.path(), Path::new("style.scss"), ".new{}").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), ".new{}");
    }

    #[test]
    fn test_write_into_file_fails() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("css");
        fs::write(&blocker, "not a dir").unwrap();
        assert!(write_css(&blocker, Path::new("style.scss"), ".a{}").is_err());
    }
}
