use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::DataSeries;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a data file could not be turned into a [`DataSeries`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// `line` is 1-based, as an editor would show it.
    #[error("line {line}: {reason}")]
    Parse { line: u64, reason: String },
}

pub type ParseResult<T> = Result<T, LoadError>;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a two-column, tab-separated data file.
///
/// Every non-blank line must hold exactly two numeric fields:
///
/// ```text
/// 4000.0	0.12
/// 3998.0	0.14
/// ```
///
/// The whole file is parsed before anything is returned, so a single bad
/// line fails the load and the caller keeps whatever it had before.
pub fn load_series(path: &Path) -> ParseResult<DataSeries> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let series = parse_series(&bytes)?;
    log::debug!("parsed {} samples from {}", series.len(), path.display());
    Ok(series)
}

/// Parse already-read file contents. See [`load_series`] for the format.
///
/// Bytes that are not valid UTF-8 are a [`LoadError::Parse`] on the line
/// that holds them.
pub fn parse_series(data: impl AsRef<[u8]>) -> ParseResult<DataSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(data.as_ref());

    let mut x = Vec::new();
    let mut y = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| LoadError::Parse {
            line: e.position().map_or(0, |p| p.line()),
            reason: e.to_string(),
        })?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != 2 {
            return Err(LoadError::Parse {
                line,
                reason: format!(
                    "expected 2 tab-separated fields, found {}",
                    record.len()
                ),
            });
        }

        x.push(parse_field(&record[0], line, "x")?);
        y.push(parse_field(&record[1], line, "y")?);
    }

    // Both vectors grow in lockstep above.
    DataSeries::new(x, y).map_err(|e| LoadError::Parse {
        line: 0,
        reason: e.to_string(),
    })
}

fn parse_field(tok: &str, line: u64, col: &str) -> ParseResult<f64> {
    tok.parse::<f64>().map_err(|_| LoadError::Parse {
        line,
        reason: format!("{col} value '{tok}' is not a number"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_lines() {
        let series = parse_series("0.0\t1.0\n1.0\t5.0\n2.0\t1.0\n").unwrap();
        assert_eq!(series.x(), &[0.0, 1.0, 2.0]);
        assert_eq!(series.y(), &[1.0, 5.0, 1.0]);
    }

    #[test]
    fn test_parse_tolerates_crlf_and_padding() {
        let series = parse_series(" 1.5\t-2e3 \r\n2.5\t4\r\n").unwrap();
        assert_eq!(series.x(), &[1.5, 2.5]);
        assert_eq!(series.y(), &[-2000.0, 4.0]);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let series = parse_series("0\t1\n\n1\t2\n\n").unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_parse_empty_input() {
        let series = parse_series("").unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_parse_reports_bad_number_line() {
        let err = parse_series("0\t1\n1\tabc\n2\t3\n").unwrap_err();
        match err {
            LoadError::Parse { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("abc"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_reports_wrong_field_count() {
        let err = parse_series("0\t1\n1\t2\t3\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }));

        let err = parse_series("0 1\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_parse_reports_invalid_utf8_line() {
        let err = parse_series(b"0\t1\n1\t\xff\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn test_load_invalid_utf8_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"0\t1\n1\t\xfe2\n").unwrap();
        let err = load_series(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_series(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("here.txt"));
    }
}
