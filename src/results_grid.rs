/// Results Grid Module
///
/// Renders query results as a plain-text table: padded columns joined with
/// " | ", a dashed rule under the header, one line per row.
use crate::core::db::QueryResult;

/// A renderable table of query results.
#[derive(Debug, Clone)]
pub struct ResultsGrid {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl ResultsGrid {
    /// Builds a grid from a query result, computing column widths.
    pub fn from_result(result: &QueryResult) -> Self {
        let mut widths: Vec<usize> = result.columns.iter().map(|h| h.len()).collect();
        for row in &result.rows {
            for (idx, value) in row.iter().enumerate() {
                if idx < widths.len() && value.len() > widths[idx] {
                    widths[idx] = value.len();
                }
            }
        }
        ResultsGrid {
            headers: result.columns.clone(),
            rows: result.rows.clone(),
            widths,
        }
    }

    /// Renders the grid. Returns an empty string for a result with no
    /// columns.
    pub fn render(&self) -> String {
        if self.headers.is_empty() {
            return String::new();
        }

        let mut output = String::new();
        output.push_str(&self.render_line(&self.headers));
        output.push('\n');

        let rule: Vec<String> = self.widths.iter().map(|w| "-".repeat(*w)).collect();
        output.push_str(&rule.join("-+-"));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_line(row));
            output.push('\n');
        }
        output
    }

    fn render_line(&self, values: &[String]) -> String {
        let padded: Vec<String> = values
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                let width = self.widths.get(idx).copied().unwrap_or(value.len());
                format!("{:<width$}", value, width = width)
            })
            .collect();
        padded.join(" | ").trim_end().to_string()
    }
}
