//! Fixed-width table rendering for CLI listings.

pub struct Column {
    header: String,
    width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        let rule: Vec<String> = self.columns.iter().map(|c| "-".repeat(c.width)).collect();

        let mut out = String::new();
        out.push_str(&self.format_row(&headers));
        out.push_str(&self.format_row(&rule));
        for row in &self.rows {
            out.push_str(&self.format_row(row));
        }
        out
    }

    /// One padded line. Missing cells render empty, trailing padding is
    /// trimmed.
    fn format_row(&self, cells: &[String]) -> String {
        let mut line = String::new();
        for (i, col) in self.columns.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            line.push_str(&format!("{:<width$} ", cell, width = col.width));
        }
        format!("{}\n", line.trim_end())
    }
}
