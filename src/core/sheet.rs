//! Header-addressed access to a spreadsheet value range.
//!
//! The first row of the range is the header. Columns are looked up by their exact header text,
//! so reordering the sheet columns does not break parsing. Data rows may be shorter than the
//! header: the API drops trailing empty cells.

/// Header row of a value range.
#[derive(Copy, Clone)]
pub struct Header<'a>(&'a [String]);

impl Header<'_> {
    #[must_use]
    pub fn column(self, name: &str) -> Column {
        Column(self.0.iter().position(|cell| cell == name))
    }
}

/// Resolved column index, [`None`] if the header is missing.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Column(Option<usize>);

impl Column {
    #[must_use]
    pub fn cell(self, row: &[String]) -> Option<&str> {
        row.get(self.0?).map(String::as_str)
    }

    /// Owned cell value.
    #[must_use]
    pub fn value(self, row: &[String]) -> Option<String> {
        self.cell(row).map(ToOwned::to_owned)
    }
}

/// Record which can be built from a data row.
pub trait FromRow: Sized {
    /// Column indices resolved once per sheet.
    type Columns;

    fn resolve(header: Header<'_>) -> Self::Columns;

    fn from_row(columns: &Self::Columns, row: &[String]) -> Self;
}

/// Parse all data rows, keeping their order.
///
/// Every data row produces exactly one record, and a range without data rows produces none.
pub fn parse_rows<T: FromRow>(values: &[Vec<String>]) -> Vec<T> {
    let Some((header, rows)) = values.split_first() else {
        return Vec::new();
    };
    let columns = T::resolve(Header(header));
    rows.iter().map(|row| T::from_row(&columns, row)).collect()
}
