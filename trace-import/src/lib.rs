#![warn(clippy::all, rust_2018_idioms)]

//! Ingestion of session-trace files.
//!
//! A trace file is delimited tabular text: ten rows of metadata noise,
//! then a header row, then data rows. The name of the trailing column
//! decides how the file is turned into plottable series (see
//! [`ImportSchema`]). The crate is GUI-free; colors are plain RGB
//! triples that the frontend maps onto its own color type.

mod schema;
mod table;

pub use schema::ImportSchema;
pub use table::Table;

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Number of metadata rows preceding the header row.
pub const METADATA_ROWS: usize = 10;

/// Columns every trace file must carry, whatever its schema.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Date", "Time", ELAPSED_TIME_COLUMN];

/// The column RGB series are plotted against.
pub const ELAPSED_TIME_COLUMN: &str = "Elapsed Time (secs)";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("unable to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("malformed value in data row {0}")]
    MalformedValue(usize),
    #[error("unrecognized value column '{0}'")]
    UnsupportedSchema(String),
}

/// An RGB color, 8 bit per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 160, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
}

/// One named sequence of (x, y) samples with a render color.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: Rgb,
    pub points: Vec<[f64; 2]>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlotKind {
    Lines,
    Bars,
}

/// What an import hands to the plot: series, how to draw them, and the
/// axis labels the schema suggests. `categories` holds the x tick
/// labels of a bar chart (empty for line plots, where x positions are
/// real values).
#[derive(Clone, Debug, PartialEq)]
pub struct PlottableData {
    pub kind: PlotKind,
    pub series: Vec<Series>,
    pub categories: Vec<String>,
    pub x_label: String,
    pub y_label: String,
}

/// Import a trace file and extract plottable series according to the
/// schema selected by its trailing column.
pub fn import(path: &Path) -> Result<PlottableData, ImportError> {
    log::debug!("importing trace file {:?}", path);
    let table = Table::from_path(path)?;

    for required in REQUIRED_COLUMNS {
        if table.column_index(required).is_none() {
            return Err(ImportError::MissingColumn(required.to_string()));
        }
    }

    let value_column = table
        .header
        .last()
        .expect("table header is never empty after parsing");
    let schema = ImportSchema::detect(value_column)
        .ok_or_else(|| ImportError::UnsupportedSchema(value_column.clone()))?;
    log::debug!("detected schema {:?} for column '{}'", schema, value_column);

    schema.extract(&table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn trace_file(header: &str, rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("unable to create temp file");
        for i in 0..METADATA_ROWS {
            writeln!(file, "# metadata line {i}").unwrap();
        }
        writeln!(file, "{header}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    #[test]
    fn test_missing_file_reports_not_found() {
        init();
        let err = import(Path::new("/no/such/trace.csv")).unwrap_err();
        assert!(matches!(err, ImportError::NotFound(_)));
    }

    #[test]
    fn test_missing_required_column() {
        init();
        let file = trace_file("Date,Time,Results Text", &["01/02/2026,12:00:00,foo"]);
        let err = import(file.path()).unwrap_err();
        match err {
            ImportError::MissingColumn(name) => assert_eq!(name, ELAPSED_TIME_COLUMN),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_value_column_is_an_error() {
        init();
        let file = trace_file(
            "Date,Time,Elapsed Time (secs),Mystery Readings",
            &["01/02/2026,12:00:00,1,42"],
        );
        let err = import(file.path()).unwrap_err();
        match err {
            ImportError::UnsupportedSchema(name) => assert_eq!(name, "Mystery Readings"),
            other => panic!("expected UnsupportedSchema, got {other:?}"),
        }
    }

    #[test]
    fn test_text_frequency_drops_singletons() {
        init();
        let file = trace_file(
            "Date,Time,Elapsed Time (secs),Results Text",
            &[
                "01/02/2026,12:00:00,1,a",
                "01/02/2026,12:00:01,2,a",
                "01/02/2026,12:00:02,3,b",
            ],
        );
        let data = import(file.path()).expect("import failed");
        assert_eq!(data.kind, PlotKind::Bars);
        assert_eq!(data.categories, vec!["a".to_string()]);
        assert_eq!(data.series.len(), 1);
        assert_eq!(data.series[0].points, vec![[0.0, 2.0]]);
        assert_eq!(data.y_label, "Text Frequency");
    }

    #[test]
    fn test_text_frequency_orders_by_descending_count() {
        init();
        let file = trace_file(
            "Date,Time,Elapsed Time (secs),Results Text",
            &[
                "01/02/2026,12:00:00,1,rare",
                "01/02/2026,12:00:01,2,rare",
                "01/02/2026,12:00:02,3,common",
                "01/02/2026,12:00:03,4,common",
                "01/02/2026,12:00:04,5,common",
            ],
        );
        let data = import(file.path()).expect("import failed");
        assert_eq!(
            data.categories,
            vec!["common".to_string(), "rare".to_string()]
        );
        assert_eq!(data.series[0].points, vec![[0.0, 3.0], [1.0, 2.0]]);
    }

    #[test]
    fn test_rgb_triple_yields_three_series() {
        init();
        let file = trace_file(
            "Date,Time,Elapsed Time (secs),test-AverageRGB",
            &["01/02/2026,12:00:00,5,\"10,20,30\""],
        );
        let data = import(file.path()).expect("import failed");
        assert_eq!(data.kind, PlotKind::Lines);
        assert_eq!(data.series.len(), 3);
        assert_eq!(data.series[0].name, "Red");
        assert_eq!(data.series[0].points, vec![[5.0, 10.0]]);
        assert_eq!(data.series[1].name, "Green");
        assert_eq!(data.series[1].points, vec![[5.0, 20.0]]);
        assert_eq!(data.series[2].name, "Blue");
        assert_eq!(data.series[2].points, vec![[5.0, 30.0]]);
        assert_eq!(data.x_label, ELAPSED_TIME_COLUMN);
    }

    #[test]
    fn test_alert_rgb_column_is_recognized() {
        init();
        let file = trace_file(
            "Date;Time;Elapsed Time (secs);colour change alert-AverageRGB",
            &["01/02/2026;12:00:00;1;100,150,200"],
        );
        let data = import(file.path()).expect("import failed");
        assert_eq!(data.series.len(), 3);
        assert_eq!(data.series[2].points, vec![[1.0, 200.0]]);
    }

    #[test]
    fn test_malformed_triple_reports_row_index() {
        init();
        let file = trace_file(
            "Date,Time,Elapsed Time (secs),test-AverageRGB",
            &[
                "01/02/2026,12:00:00,1,\"10,20,30\"",
                "01/02/2026,12:00:01,2,\"10,20\"",
            ],
        );
        let err = import(file.path()).unwrap_err();
        match err {
            ImportError::MalformedValue(row) => assert_eq!(row, 1),
            other => panic!("expected MalformedValue, got {other:?}"),
        }
    }

    #[test]
    fn test_non_integer_component_is_malformed() {
        init();
        let file = trace_file(
            "Date,Time,Elapsed Time (secs),test-AverageRGB",
            &["01/02/2026,12:00:00,1,\"10,twenty,30\""],
        );
        let err = import(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::MalformedValue(0)));
    }
}
