use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;

/// The file named by `path`, or `None` when input comes from stdin (`None` or `-`).
fn file_path(path: Option<&PathBuf>) -> Option<&Path> {
    path.map(PathBuf::as_path).filter(|p| *p != Path::new("-"))
}

/// Open `path` for reading; `None` or `-` is stdin.
pub fn open(path: Option<&PathBuf>) -> anyhow::Result<Box<dyn Read>> {
    match file_path(path) {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Read all of `path` as UTF-8 text; `None` or `-` is stdin.
pub fn read_text(path: Option<&PathBuf>) -> anyhow::Result<String> {
    let mut bytes = Vec::new();
    open(path)?
        .read_to_end(&mut bytes)
        .context("failed to read input")?;
    String::from_utf8(bytes).context("input is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_means_stdin() {
        assert_eq!(file_path(None), None);
        assert_eq!(file_path(Some(&PathBuf::from("-"))), None);
        assert_eq!(
            file_path(Some(&PathBuf::from("a.txt"))),
            Some(Path::new("a.txt"))
        );
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = read_text(Some(&PathBuf::from("/nonexistent/eolfmt-input"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/eolfmt-input"));
    }
}
