//! Auxiliary per-frame sample series.
//!
//! Each additional field on a video names a series file holding one sample
//! per frame: a trajectory point, a set of points, or a scalar chart value.
//! Samples are opaque to the server — they are parsed into `serde_json`
//! values, sliced into windows, and handed back to the client untouched.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::window::{self, FrameWindow};

/// Error type for series file loading.
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    #[error("series file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported series file format '{extension}' for {path}; expected .json or .csv")]
    UnsupportedFormat { path: String, extension: String },

    #[error("failed to parse series file {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An ordered, 0-indexed sequence of per-frame samples for one named series.
///
/// Read-only once loaded; windows borrow from it, so it is shared behind
/// `Arc` by the caching layer.
#[derive(Debug, Clone)]
pub struct SampleSeries {
    /// Series name, matching the video's additional-field name.
    pub name: String,
    /// One sample per frame.
    pub samples: Vec<Value>,
}

/// A contiguous slice of a series around a center frame.
#[derive(Debug, Serialize)]
pub struct SeriesWindow<'a> {
    /// First frame index covered (inclusive).
    pub start: usize,
    /// Last frame index covered (inclusive).
    pub end: usize,
    /// The samples for `start..=end`.
    pub samples: &'a [Value],
}

impl SampleSeries {
    /// Number of frames the series covers.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Slice the clamped window of `half_width` samples on either side of
    /// `center`. Fails with [`CoreError::FrameOutOfRange`] when the center
    /// is not addressable.
    pub fn window(&self, center: i64, half_width: u32) -> Result<SeriesWindow<'_>, CoreError> {
        let FrameWindow { start, end } = window::clamp(self.samples.len(), center, half_width)?;
        Ok(SeriesWindow {
            start,
            end,
            samples: &self.samples[start..=end],
        })
    }
}

/// Load a series from a file, dispatching on the file extension.
///
/// - `.json`: the file must hold a top-level JSON array, one element per
///   frame. Elements may be any JSON value (numbers, point pairs, nested
///   arrays of points).
/// - `.csv`: one line per frame. A single column parses as one number; a
///   multi-column line parses as an array of numbers. Blank trailing lines
///   are ignored.
pub async fn load_series(name: &str, path: &Path) -> Result<SampleSeries, SeriesError> {
    if !path.exists() {
        return Err(SeriesError::FileNotFound(
            path.to_string_lossy().to_string(),
        ));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let text = tokio::fs::read_to_string(path).await?;
    let samples = match extension.as_str() {
        "json" => parse_json_samples(path, &text)?,
        "csv" => parse_csv_samples(path, &text)?,
        _ => {
            return Err(SeriesError::UnsupportedFormat {
                path: path.to_string_lossy().to_string(),
                extension,
            })
        }
    };

    Ok(SampleSeries {
        name: name.to_string(),
        samples,
    })
}

fn parse_json_samples(path: &Path, text: &str) -> Result<Vec<Value>, SeriesError> {
    let value: Value = serde_json::from_str(text).map_err(|e| SeriesError::ParseError {
        path: path.to_string_lossy().to_string(),
        message: e.to_string(),
    })?;
    match value {
        Value::Array(samples) => Ok(samples),
        other => Err(SeriesError::ParseError {
            path: path.to_string_lossy().to_string(),
            message: format!("expected a top-level array, got {other}"),
        }),
    }
}

fn parse_csv_samples(path: &Path, text: &str) -> Result<Vec<Value>, SeriesError> {
    let mut samples = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut numbers = Vec::new();
        for cell in line.split(',') {
            let number: f64 = cell.trim().parse().map_err(|_| SeriesError::ParseError {
                path: path.to_string_lossy().to_string(),
                message: format!("line {}: '{cell}' is not a number", line_no + 1),
            })?;
            numbers.push(json_number(number, path, line_no)?);
        }
        samples.push(if numbers.len() == 1 {
            numbers.remove(0)
        } else {
            Value::Array(numbers)
        });
    }
    Ok(samples)
}

fn json_number(number: f64, path: &Path, line_no: usize) -> Result<Value, SeriesError> {
    serde_json::Number::from_f64(number)
        .map(Value::Number)
        .ok_or_else(|| SeriesError::ParseError {
            path: path.to_string_lossy().to_string(),
            message: format!("line {}: non-finite number", line_no + 1),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use std::io::Write;

    fn series_of(len: usize) -> SampleSeries {
        SampleSeries {
            name: "chart1".to_string(),
            samples: (0..len as i64).map(|i| json!(i)).collect(),
        }
    }

    fn temp_file(name: &str, contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    // -- windowing ---------------------------------------------------------

    #[test]
    fn window_slices_inclusive_range() {
        let series = series_of(110);
        let w = series.window(100, 20).unwrap();
        assert_eq!(w.start, 80);
        assert_eq!(w.end, 109);
        assert_eq!(w.samples.len(), 30);
        assert_eq!(w.samples[0], json!(80));
        assert_eq!(w.samples[29], json!(109));
    }

    #[test]
    fn window_center_out_of_range() {
        let series = series_of(9);
        assert_matches!(series.window(9, 2), Err(CoreError::FrameOutOfRange { .. }));

        let w = series.window(1, 20).unwrap();
        assert_eq!((w.start, w.end), (0, 8));
        assert_eq!(w.samples.len(), 9);
    }

    #[test]
    fn empty_series_rejects_every_center() {
        let series = series_of(0);
        assert!(series.is_empty());
        assert_matches!(series.window(0, 0), Err(CoreError::FrameOutOfRange { .. }));
    }

    // -- JSON loading ------------------------------------------------------

    #[tokio::test]
    async fn json_array_loads() {
        let (_dir, path) = temp_file(
            "trail.json",
            r#"[[0,0],[10,10],[20,20],[30,30]]"#,
        );
        let series = load_series("canvas1", &path).await.unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(series.samples[2], json!([20, 20]));
    }

    #[tokio::test]
    async fn json_non_array_rejected() {
        let (_dir, path) = temp_file("bad.json", r#"{"frames": []}"#);
        let err = load_series("canvas1", &path).await.unwrap_err();
        assert_matches!(err, SeriesError::ParseError { .. });
    }

    // -- CSV loading -------------------------------------------------------

    #[tokio::test]
    async fn csv_single_column_loads_scalars() {
        let (_dir, path) = temp_file("chart.csv", "71\n56\n-24\n56\n");
        let series = load_series("chart1", &path).await.unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(series.samples[2], json!(-24.0));
    }

    #[tokio::test]
    async fn csv_multi_column_loads_arrays() {
        let (_dir, path) = temp_file("trail.csv", "0,0\n10,10\n20,20\n");
        let series = load_series("canvas1", &path).await.unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.samples[1], json!([10.0, 10.0]));
    }

    #[tokio::test]
    async fn csv_non_numeric_rejected() {
        let (_dir, path) = temp_file("bad.csv", "1\ntwo\n3\n");
        let err = load_series("chart1", &path).await.unwrap_err();
        assert_matches!(err, SeriesError::ParseError { .. });
    }

    // -- dispatch ----------------------------------------------------------

    #[tokio::test]
    async fn unknown_extension_rejected() {
        let (_dir, path) = temp_file("data.parquet", "");
        let err = load_series("chart1", &path).await.unwrap_err();
        assert_matches!(err, SeriesError::UnsupportedFormat { .. });
    }

    #[tokio::test]
    async fn missing_file_reported() {
        let path = std::path::Path::new("/nonexistent/chart.csv");
        let err = load_series("chart1", path).await.unwrap_err();
        assert_matches!(err, SeriesError::FileNotFound(_));
    }
}
