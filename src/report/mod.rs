//! report — structured fit report.
//!
//! Purpose
//! -------
//! Assemble a renderer-agnostic report document from headings, tables and
//! plot data, and serialize it to JSON. Models build their report through
//! the fluent builders (`head`, `vtable`, `htable`, `image`); consumers
//! render the JSON however they like.
//!
//! Key behaviors
//! -------------
//! - [`ReportItem::VTable`]: column header plus rows (one record per row).
//! - [`ReportItem::HTable`]: row header plus labeled rows (one quantity per
//!   row, one column per mode).
//! - [`ReportItem::Image`]: plot data keyed by an artifact name such as
//!   `"structure.pdb.pp_igmm"`.
//!
//! Conventions
//! -----------
//! - Cells are `serde_json::Value`, so numbers stay numbers in the output.
//! - Serialized items carry a `"type"` tag (`head`, `v_table`, `h_table`,
//!   `image`).
//! - Non-finite floats are written as `null` by `serde_json`.
use crate::{diagnostics::plots::PlotData, mixture::errors::MixtureResult};
use serde::Serialize;
use serde_json::Value;
use std::{fs, path::Path};

/// One element of a report, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportItem {
    Head { text: String },
    VTable { header: Vec<String>, rows: Vec<Vec<Value>> },
    HTable { header: Vec<String>, rows: Vec<(String, Vec<Value>)> },
    Image { key: String, title: String, plot: PlotData },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub title: String,
    pub items: Vec<ReportItem>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Report { title: title.into(), items: Vec::new() }
    }

    pub fn head(mut self, text: impl Into<String>) -> Self {
        self.items.push(ReportItem::Head { text: text.into() });
        self
    }

    pub fn vtable(mut self, header: &[&str], rows: Vec<Vec<Value>>) -> Self {
        let header = header.iter().map(|h| h.to_string()).collect();
        self.items.push(ReportItem::VTable { header, rows });
        self
    }

    pub fn htable(mut self, header: Vec<String>, rows: Vec<(String, Vec<Value>)>) -> Self {
        self.items.push(ReportItem::HTable { header, rows });
        self
    }

    pub fn image(mut self, key: impl Into<String>, plot: PlotData) -> Self {
        let title = plot.title.clone();
        self.items.push(ReportItem::Image { key: key.into(), title, plot });
        self
    }

    /// Keys of all image artifacts, in order.
    pub fn image_keys(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                ReportItem::Image { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Pretty-printed JSON document.
    ///
    /// Errors
    /// ------
    /// - `MixtureError::Serialization` if encoding fails.
    pub fn to_json(&self) -> MixtureResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write [`Report::to_json`] to `path`.
    ///
    /// Errors
    /// ------
    /// - `MixtureError::Serialization` or `MixtureError::Io`.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> MixtureResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::plots::{Series, SeriesKind};
    use serde_json::json;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Builder ordering and image keys.
    // - JSON layout (item tags, numeric cells).
    // - Writing the document to disk.
    // -------------------------------------------------------------------------

    fn plot() -> PlotData {
        PlotData {
            title: "P-P Plot: 1abc.pdb".to_string(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            series: vec![Series {
                label: "y = x".to_string(),
                kind: SeriesKind::Line,
                x: vec![0.0, 1.0],
                y: vec![0.0, 1.0],
            }],
        }
    }

    fn sample() -> Report {
        Report::new("Inverse Gamma Mixture")
            .head("Input")
            .vtable(&["Parameter", "Value", "Default"], vec![vec![
                json!("Number of modes"),
                json!(2),
                json!(1),
            ]])
            .htable(vec!["Parameter".to_string(), "Mode 1".to_string()], vec![(
                "alpha".to_string(),
                vec![json!(3.5)],
            )])
            .image("1abc.pdb.pp_igmm", plot())
    }

    #[test]
    fn builders_keep_insertion_order() {
        let report = sample();

        assert_eq!(report.items.len(), 4);
        assert!(matches!(report.items[0], ReportItem::Head { .. }));
        assert_eq!(report.image_keys(), vec!["1abc.pdb.pp_igmm"]);
    }

    #[test]
    // Purpose
    // -------
    // Items are tagged and numeric cells stay numeric in the JSON output.
    fn json_is_tagged_and_numeric() {
        let value: Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();

        assert_eq!(value["title"], "Inverse Gamma Mixture");
        assert_eq!(value["items"][1]["type"], "v_table");
        assert_eq!(value["items"][1]["rows"][0][1], 2);
        assert_eq!(value["items"][2]["rows"][0][0], "alpha");
        assert_eq!(value["items"][3]["title"], "P-P Plot: 1abc.pdb");
        assert_eq!(value["items"][3]["plot"]["series"][0]["kind"], "line");
    }

    #[test]
    fn write_json_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        sample().write_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"1abc.pdb.pp_igmm\""));
    }
}
