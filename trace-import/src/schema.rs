use crate::{
    ImportError, PlotKind, PlottableData, Rgb, Series, Table, ELAPSED_TIME_COLUMN,
};

pub const RESULTS_TEXT_COLUMN: &str = "Results Text";
pub const AVERAGE_RGB_COLUMN: &str = "test-AverageRGB";
pub const ALERT_AVERAGE_RGB_COLUMN: &str = "colour change alert-AverageRGB";

// Default bar color, matching the renderer the trace tool originally
// fed its charts into.
const BAR_COLOR: Rgb = Rgb(31, 119, 180);

/// The recognized trace layouts, keyed by the literal name of the
/// trailing value column. An unrecognized name is an
/// [`ImportError::UnsupportedSchema`], never a silently empty plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportSchema {
    /// `"Results Text"`: frequency count of distinct text values,
    /// rendered as a bar chart. Values occurring exactly once are
    /// dropped.
    TextFrequency,
    /// `"test-AverageRGB"`: an "R,G,B" triple per row, split into
    /// three series against elapsed time.
    AverageRgb,
    /// `"colour change alert-AverageRGB"`: same triple layout under a
    /// different column name.
    AlertAverageRgb,
}

impl ImportSchema {
    pub fn detect(value_column: &str) -> Option<Self> {
        match value_column {
            RESULTS_TEXT_COLUMN => Some(Self::TextFrequency),
            AVERAGE_RGB_COLUMN => Some(Self::AverageRgb),
            ALERT_AVERAGE_RGB_COLUMN => Some(Self::AlertAverageRgb),
            _ => None,
        }
    }

    /// The column this schema extracts its values from.
    pub fn source_column(&self) -> &'static str {
        match self {
            Self::TextFrequency => RESULTS_TEXT_COLUMN,
            Self::AverageRgb => AVERAGE_RGB_COLUMN,
            Self::AlertAverageRgb => ALERT_AVERAGE_RGB_COLUMN,
        }
    }

    pub fn extract(&self, table: &Table) -> Result<PlottableData, ImportError> {
        match self {
            Self::TextFrequency => text_frequency(table),
            Self::AverageRgb | Self::AlertAverageRgb => rgb_series(table, self.source_column()),
        }
    }
}

fn require_column(table: &Table, name: &str) -> Result<usize, ImportError> {
    table
        .column_index(name)
        .ok_or_else(|| ImportError::MissingColumn(name.to_string()))
}

/// Count how often each distinct text value occurs and keep the values
/// occurring more than once, ordered by descending count (ties keep
/// first-appearance order).
fn text_frequency(table: &Table) -> Result<PlottableData, ImportError> {
    let value_col = require_column(table, RESULTS_TEXT_COLUMN)?;

    let mut counts: Vec<(String, usize)> = Vec::new();
    for (row_idx, _) in table.rows.iter().enumerate() {
        let Some(value) = table.cell(row_idx, value_col) else {
            return Err(ImportError::MalformedValue(row_idx));
        };
        match counts.iter_mut().find(|(text, _)| text == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }

    counts.retain(|(_, count)| *count > 1);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    log::debug!("text frequency kept {} distinct values", counts.len());

    let (categories, points) = counts
        .into_iter()
        .enumerate()
        .map(|(i, (text, count))| (text, [i as f64, count as f64]))
        .unzip();

    Ok(PlottableData {
        kind: PlotKind::Bars,
        series: vec![Series {
            name: "Frequency".to_string(),
            color: BAR_COLOR,
            points,
        }],
        categories,
        x_label: String::new(),
        y_label: "Text Frequency".to_string(),
    })
}

/// Split each "R,G,B" triple into three series plotted against the
/// elapsed-time column, each in its literal color.
fn rgb_series(table: &Table, value_column: &str) -> Result<PlottableData, ImportError> {
    let elapsed_col = require_column(table, ELAPSED_TIME_COLUMN)?;
    let value_col = require_column(table, value_column)?;

    let num_rows = table.rows.len();
    let mut red = Vec::with_capacity(num_rows);
    let mut green = Vec::with_capacity(num_rows);
    let mut blue = Vec::with_capacity(num_rows);

    for row_idx in 0..num_rows {
        let elapsed: f64 = table
            .cell(row_idx, elapsed_col)
            .and_then(|cell| cell.parse().ok())
            .ok_or(ImportError::MalformedValue(row_idx))?;

        let Some(triple) = table.cell(row_idx, value_col) else {
            return Err(ImportError::MalformedValue(row_idx));
        };
        let components: Vec<i64> = triple
            .split(',')
            .map(|component| component.trim().parse())
            .collect::<Result<_, _>>()
            .map_err(|_| ImportError::MalformedValue(row_idx))?;
        let [r, g, b] = components[..] else {
            return Err(ImportError::MalformedValue(row_idx));
        };

        red.push([elapsed, r as f64]);
        green.push([elapsed, g as f64]);
        blue.push([elapsed, b as f64]);
    }

    let series = [
        ("Red", Rgb::RED, red),
        ("Green", Rgb::GREEN, green),
        ("Blue", Rgb::BLUE, blue),
    ]
    .into_iter()
    .map(|(name, color, points)| Series {
        name: name.to_string(),
        color,
        points,
    })
    .collect();

    Ok(PlottableData {
        kind: PlotKind::Lines,
        series,
        categories: Vec::new(),
        x_label: ELAPSED_TIME_COLUMN.to_string(),
        y_label: "RGB values".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_known_columns() {
        assert_eq!(
            ImportSchema::detect("Results Text"),
            Some(ImportSchema::TextFrequency)
        );
        assert_eq!(
            ImportSchema::detect("test-AverageRGB"),
            Some(ImportSchema::AverageRgb)
        );
        assert_eq!(
            ImportSchema::detect("colour change alert-AverageRGB"),
            Some(ImportSchema::AlertAverageRgb)
        );
        assert_eq!(ImportSchema::detect("Average RGB"), None);
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let table = Table::from_raw(
            "Date,Time,Elapsed Time (secs),Results Text\n1,2,3,a\n1,2\n",
            0,
        )
        .unwrap();
        let err = text_frequency(&table).unwrap_err();
        assert!(matches!(err, ImportError::MalformedValue(1)));
    }

    #[test]
    fn test_unparsable_elapsed_time_is_malformed() {
        let table = Table::from_raw(
            "Date,Time,Elapsed Time (secs),test-AverageRGB\n1,2,soon,\"1,2,3\"\n",
            0,
        )
        .unwrap();
        let err = rgb_series(&table, AVERAGE_RGB_COLUMN).unwrap_err();
        assert!(matches!(err, ImportError::MalformedValue(0)));
    }
}
