//! Sheet-backed ledger abstraction.

use std::collections::{BTreeMap, HashSet};

use crate::error::LedgerError;
use crate::layout::{Row, RowStyle};

/// Destination for synced rows.
///
/// Implemented by [`MemoryLedger`] for dry runs and tests; the hosted
/// spreadsheet script applies the same rules on its side.
pub trait Ledger {
    /// Appends a rendered batch below the sheet's current content, leaving one
    /// blank row when the sheet already has rows. A header is part of every
    /// batch, so earlier weeks keep their own header above them.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Sheet`] if the sheet rejects the rows.
    fn append_batch(&mut self, sheet: &str, rows: Vec<Row>) -> Result<(), LedgerError>;

    /// Appends one row, writing `header` first only when the sheet is empty.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Sheet`] if the sheet rejects the row.
    fn append_row(&mut self, sheet: &str, header: Row, row: Row) -> Result<(), LedgerError>;
}

/// In-process ledger keyed by sheet name.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    sheets: BTreeMap<String, Vec<Row>>,
    failing: HashSet<String>,
}

impl MemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later write to `sheet` fail.
    #[must_use]
    pub fn failing_on(mut self, sheet: &str) -> Self {
        self.failing.insert(sheet.to_owned());
        self
    }

    /// Rows of `sheet`, empty if it was never written.
    #[must_use]
    pub fn sheet(&self, sheet: &str) -> &[Row] {
        self.sheets.get(sheet).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    /// Plain-text dump of every sheet, one tab-separated line per row.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, rows) in &self.sheets {
            out.push_str("== ");
            out.push_str(name);
            out.push_str(" ==\n");
            for row in rows {
                let marker = match row.style {
                    RowStyle::Header => "H ",
                    RowStyle::Total => "T ",
                    RowStyle::Data | RowStyle::Spacer => "  ",
                };
                let line: Vec<String> = row.cells.iter().map(ToString::to_string).collect();
                out.push_str(marker);
                out.push_str(&line.join("\t"));
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }

    fn check(&self, sheet: &str) -> Result<(), LedgerError> {
        if self.failing.contains(sheet) {
            return Err(LedgerError::Sheet {
                sheet: sheet.to_owned(),
                reason: "sheet is read-only".to_owned(),
            });
        }
        Ok(())
    }
}

impl Ledger for MemoryLedger {
    fn append_batch(&mut self, sheet: &str, rows: Vec<Row>) -> Result<(), LedgerError> {
        self.check(sheet)?;
        let target = self.sheets.entry(sheet.to_owned()).or_default();
        if !target.is_empty() {
            target.push(Row::spacer());
        }
        target.extend(rows);
        Ok(())
    }

    fn append_row(&mut self, sheet: &str, header: Row, row: Row) -> Result<(), LedgerError> {
        self.check(sheet)?;
        let target = self.sheets.entry(sheet.to_owned()).or_default();
        if target.is_empty() {
            target.push(header);
        }
        target.push(row);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Cell;

    fn rows(n: i64) -> Vec<Row> {
        vec![Row::header(&["A"]), Row::data(vec![Cell::Number(n)])]
    }

    #[test]
    fn second_batch_is_separated_by_a_blank_row() {
        let mut ledger = MemoryLedger::new();
        ledger.append_batch("Instagram", rows(1)).unwrap();
        ledger.append_batch("Instagram", rows(2)).unwrap();
        let sheet = ledger.sheet("Instagram");
        assert_eq!(sheet.len(), 5);
        assert_eq!(sheet[2].style, RowStyle::Spacer);
        assert_eq!(sheet[3].style, RowStyle::Header);
    }

    #[test]
    fn header_written_once_for_appended_rows() {
        let mut ledger = MemoryLedger::new();
        let header = Row::header(&["Week"]);
        ledger
            .append_row("Overall Analysis", header.clone(), Row::data(vec![Cell::Number(1)]))
            .unwrap();
        ledger
            .append_row("Overall Analysis", header, Row::data(vec![Cell::Number(2)]))
            .unwrap();
        let sheet = ledger.sheet("Overall Analysis");
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.iter().filter(|r| r.style == RowStyle::Header).count(), 1);
    }

    #[test]
    fn failing_sheet_rejects_writes() {
        let mut ledger = MemoryLedger::new().failing_on("Facebook");
        let err = ledger.append_batch("Facebook", rows(1)).unwrap_err();
        assert!(matches!(err, LedgerError::Sheet { ref sheet, .. } if sheet == "Facebook"));
        assert!(ledger.sheet("Facebook").is_empty());
        ledger.append_batch("Instagram", rows(1)).unwrap();
    }

    #[test]
    fn render_marks_headers_and_totals() {
        let mut ledger = MemoryLedger::new();
        ledger.append_batch("Instagram", rows(7)).unwrap();
        let text = ledger.render();
        assert!(text.starts_with("== Instagram ==\nH A\n  7\n"));
    }
}
