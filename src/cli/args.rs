use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::{ImportError, Result};
use crate::models::Delimiter;

pub const USAGE: &str = "\
Usage: debt-import -input \"filename.csv\"
OR
Usage: debt-import -input \"filename.txt\"";

#[derive(Parser, Debug)]
#[command(name = "debt-import", about = "Validate a debtor file and write cleaned, rejected and report outputs.")]
pub struct Cli {
    /// Path to a comma-separated .csv or pipe-separated .txt file
    #[arg(long = "input", value_name = "PATH")]
    pub input: String,
}

/// Rewrite the single-dash `-input` flag (any case) into clap's `--input` form.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some(s) if s.eq_ignore_ascii_case("-input") || s.eq_ignore_ascii_case("--input") => {
                OsString::from("--input")
            }
            _ => arg,
        })
        .collect()
}

/// Check the input path exists and resolve the delimiter from its extension.
pub fn resolve_input(input: &str) -> Result<(PathBuf, Delimiter)> {
    let path = PathBuf::from(input);
    if !path.is_file() {
        return Err(ImportError::FileNotFound(path));
    }
    let ext = extension_of(&path);
    let delimiter =
        Delimiter::from_extension(&ext).ok_or_else(|| ImportError::UnsupportedExtension(ext))?;
    Ok((path, delimiter))
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().trim()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_single_dash_input_any_case() {
        for flag in ["-input", "-INPUT", "-Input", "--input"] {
            let cli = Cli::try_parse_from(normalize_args(os(&["debt-import", flag, "debts.csv"])))
                .unwrap();
            assert_eq!(cli.input, "debts.csv");
        }
    }

    #[test]
    fn test_missing_or_unknown_flags_fail() {
        assert!(Cli::try_parse_from(normalize_args(os(&["debt-import"]))).is_err());
        assert!(Cli::try_parse_from(normalize_args(os(&["debt-import", "-file", "x.csv"]))).is_err());
        assert!(Cli::try_parse_from(normalize_args(os(&["debt-import", "x.csv"]))).is_err());
        assert!(Cli::try_parse_from(normalize_args(os(&["debt-import", "-v", "-input", "x.csv"])))
            .is_err());
    }

    #[test]
    fn test_resolve_input_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("debts.CSV");
        let txt = dir.path().join("debts.txt");
        std::fs::write(&csv, "h\n").unwrap();
        std::fs::write(&txt, "h\n").unwrap();
        assert_eq!(resolve_input(csv.to_str().unwrap()).unwrap().1, Delimiter::Comma);
        assert_eq!(resolve_input(txt.to_str().unwrap()).unwrap().1, Delimiter::Pipe);
    }

    #[test]
    fn test_resolve_input_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        assert!(matches!(
            resolve_input(missing.to_str().unwrap()),
            Err(ImportError::FileNotFound(_))
        ));

        let xlsx = dir.path().join("debts.xlsx");
        std::fs::write(&xlsx, "h\n").unwrap();
        match resolve_input(xlsx.to_str().unwrap()) {
            Err(ImportError::UnsupportedExtension(ext)) => assert_eq!(ext, ".xlsx"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
