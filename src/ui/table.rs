//! Table rendering for listings.

use console::measure_text_width;

/// A simple box-drawn table.
///
/// # Example
///
/// ```
/// use deployrc::ui::Table;
///
/// let mut table = Table::new(["Profile", "Chain"]);
/// table.add_row(["goerli", "5"]);
///
/// let rendered = table.render();
/// assert!(rendered.contains("│ goerli  │ 5     │"));
/// ```
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let column_widths = headers.iter().map(|h| measure_text_width(h)).collect();

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
        }
    }

    /// Add a row. Cells beyond the header count are dropped.
    pub fn add_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row
            .into_iter()
            .map(Into::into)
            .take(self.headers.len())
            .collect();

        for (width, cell) in self.column_widths.iter_mut().zip(&row) {
            *width = (*width).max(measure_text_width(cell));
        }

        self.rows.push(row);
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a string.
    pub fn render(&self) -> String {
        let mut lines = vec![
            self.render_border('┌', '┬', '┐'),
            self.render_row(&self.headers),
            self.render_border('├', '┼', '┤'),
        ];
        lines.extend(self.rows.iter().map(|row| self.render_row(row)));
        lines.push(self.render_border('└', '┴', '┘'));
        lines.join("\n")
    }

    fn render_border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self
            .column_widths
            .iter()
            .map(|width| "─".repeat(width + 2))
            .collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    }

    fn render_row(&self, row: &[String]) -> String {
        let mut s = String::from("│");

        for (i, width) in self.column_widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let padding = width - measure_text_width(cell);
            s.push_str(&format!(" {}{} │", cell, " ".repeat(padding)));
        }

        s
    }
}
