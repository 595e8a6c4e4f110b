//! Table rendering for installation listings.

use console::measure_text_width;

/// A box-drawn table.
///
/// Column widths are measured on display width, so styled cells (the
/// active marker) line up with plain ones.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: &[&str]) -> Self {
        let headers: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let column_widths = headers.iter().map(|h| measure_text_width(h)).collect();

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
        }
    }

    /// Add a row. Cells past the header count are dropped.
    pub fn add_row(&mut self, row: Vec<String>) {
        for (width, cell) in self.column_widths.iter_mut().zip(&row) {
            *width = (*width).max(measure_text_width(cell));
        }
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
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

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_table_renders_headers() {
        let table = Table::new(&["Version", "Path"]);
        assert!(table.is_empty());
        let output = table.render();
        assert!(output.contains("Version"));
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn rows_widen_columns() {
        let mut table = Table::new(&["", "Version", "Path"]);
        table.add_row(row(&["*", "17.0.2", "/usr/lib/jvm/java-17-openjdk"]));
        table.add_row(row(&[" ", "11.0.15", "/opt/jdk-11"]));

        assert_eq!(table.row_count(), 2);
        let output = table.render();
        let widths: Vec<usize> = output.lines().map(measure_text_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
        assert!(output.contains("/usr/lib/jvm/java-17-openjdk"));
    }

    #[test]
    fn styled_cells_align_with_plain_ones() {
        let mut table = Table::new(&["A"]);
        table.add_row(vec![console::style("x").green().force_styling(true).to_string()]);
        table.add_row(row(&["y"]));

        let output = table.render();
        let widths: Vec<usize> = output.lines().map(measure_text_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn missing_cells_render_blank() {
        let mut table = Table::new(&["A", "B", "C"]);
        table.add_row(row(&["only"]));
        assert!(table.render().contains("only"));
    }
}
