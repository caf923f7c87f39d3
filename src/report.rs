//! Result aggregation and export.
//!
//! Collects the records of one run into the two views downstream tooling
//! consumes — everything, and broken-only — and serializes them as flat
//! CSV tables or JSONL. The aggregator does no filtering beyond
//! partitioning on the `is_broken` flag the engine already computed.

use std::io::{self, Write};

use crate::check::UrlCheckRecord;

/// Header for the full results table.
const RESULTS_HEADER: &str =
    "url,status,reason,method,final_url,elapsed_ms,attempts,is_broken,suggested_alternative";

/// Header for the broken-only table.
const BROKEN_HEADER: &str = "url,status,reason,final_url,suggested_alternative,elapsed_ms,attempts";

/// The collected outcome of one audit run.
#[derive(Debug, Default)]
pub struct AuditReport {
    records: Vec<UrlCheckRecord>,
}

impl AuditReport {
    /// Wraps a run's records. Record order is whatever the engine
    /// produced; the report does not reorder.
    #[must_use]
    pub fn new(records: Vec<UrlCheckRecord>) -> Self {
        Self { records }
    }

    /// All records.
    #[must_use]
    pub fn records(&self) -> &[UrlCheckRecord] {
        &self.records
    }

    /// The broken-only subset, in record order.
    #[must_use]
    pub fn broken(&self) -> Vec<&UrlCheckRecord> {
        self.records.iter().filter(|r| r.is_broken).collect()
    }

    /// Number of broken records.
    #[must_use]
    pub fn broken_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_broken).count()
    }

    /// Writes the full results table as CSV.
    ///
    /// # Errors
    ///
    /// Returns any underlying I/O error.
    pub fn write_csv<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{RESULTS_HEADER}")?;
        for record in &self.records {
            let row = [
                csv_field(&record.url),
                record.status.map(|s| s.to_string()).unwrap_or_default(),
                csv_field(&record.reason),
                record.method.as_str().to_string(),
                csv_field(&record.final_url),
                record.elapsed_ms.to_string(),
                record.attempts.to_string(),
                record.is_broken.to_string(),
                csv_field(record.suggested_alternative.as_deref().unwrap_or_default()),
            ];
            writeln!(writer, "{}", row.join(","))?;
        }
        Ok(())
    }

    /// Writes the broken-only table as CSV.
    ///
    /// # Errors
    ///
    /// Returns any underlying I/O error.
    pub fn write_broken_csv<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{BROKEN_HEADER}")?;
        for record in self.broken() {
            let row = [
                csv_field(&record.url),
                record.status.map(|s| s.to_string()).unwrap_or_default(),
                csv_field(&record.reason),
                csv_field(&record.final_url),
                csv_field(record.suggested_alternative.as_deref().unwrap_or_default()),
                record.elapsed_ms.to_string(),
                record.attempts.to_string(),
            ];
            writeln!(writer, "{}", row.join(","))?;
        }
        Ok(())
    }

    /// Writes every record as one JSON object per line.
    ///
    /// # Errors
    ///
    /// Returns serialization and I/O errors.
    pub fn write_jsonl<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for record in &self.records {
            let line = serde_json::to_string(record)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }
}

/// Quotes a CSV cell when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::check::ProbeMethod;

    fn record(url: &str, status: Option<u16>, broken: bool) -> UrlCheckRecord {
        UrlCheckRecord {
            url: url.to_string(),
            status,
            reason: status.map_or_else(|| "timeout".to_string(), |_| "OK".to_string()),
            method: ProbeMethod::Head,
            final_url: url.to_string(),
            elapsed_ms: 10,
            attempts: 1,
            is_broken: broken,
            suggested_alternative: None,
        }
    }

    #[test]
    fn test_broken_view_partitions_on_flag() {
        let report = AuditReport::new(vec![
            record("https://ok.example/", Some(200), false),
            record("https://gone.example/", Some(404), true),
            record("https://dead.example/", None, true),
        ]);
        assert_eq!(report.records().len(), 3);
        assert_eq!(report.broken_count(), 2);
        let broken: Vec<_> = report.broken().iter().map(|r| r.url.as_str()).collect();
        assert_eq!(broken, vec!["https://gone.example/", "https://dead.example/"]);
    }

    #[test]
    fn test_csv_header_and_rows() {
        let report = AuditReport::new(vec![record("https://ok.example/", Some(200), false)]);
        let mut out = Vec::new();
        report.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), RESULTS_HEADER);
        assert_eq!(
            lines.next().unwrap(),
            "https://ok.example/,200,OK,HEAD,https://ok.example/,10,1,false,"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_absent_status_renders_empty_cell() {
        let report = AuditReport::new(vec![record("https://dead.example/", None, true)]);
        let mut out = Vec::new();
        report.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().nth(1).unwrap().contains(",,timeout,"));
    }

    #[test]
    fn test_csv_quotes_fields_with_delimiters() {
        let mut rec = record("https://ok.example/", Some(200), false);
        rec.reason = "Moved, Permanently".to_string();
        let report = AuditReport::new(vec![rec]);
        let mut out = Vec::new();
        report.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"Moved, Permanently\""));
    }

    #[test]
    fn test_csv_escapes_embedded_quotes() {
        assert_eq!(csv_field(r#"say "hi""#), r#""say ""hi""""#);
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn test_broken_csv_column_order() {
        let mut rec = record("https://gone.example/a", Some(404), true);
        rec.reason = "Not Found".to_string();
        rec.suggested_alternative = Some("https://gone.example/".to_string());
        let report = AuditReport::new(vec![
            record("https://ok.example/", Some(200), false),
            rec,
        ]);
        let mut out = Vec::new();
        report.write_broken_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), BROKEN_HEADER);
        assert_eq!(
            lines.next().unwrap(),
            "https://gone.example/a,404,Not Found,https://gone.example/a,https://gone.example/,10,1"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_jsonl_one_object_per_record() {
        let report = AuditReport::new(vec![
            record("https://ok.example/", Some(200), false),
            record("https://dead.example/", None, true),
        ]);
        let mut out = Vec::new();
        report.write_jsonl(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["url"], "https://ok.example/");
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert!(second["status"].is_null());
    }

    #[test]
    fn test_empty_report_writes_header_only() {
        let report = AuditReport::default();
        let mut out = Vec::new();
        report.write_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{RESULTS_HEADER}\n"));
    }
}
