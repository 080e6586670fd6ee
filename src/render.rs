//! Plain-text rendering of query results.
//!
//! Renders results as bordered tables, or one field per line in expanded
//! mode, followed by a row count.

use crate::db::QueryResult;

/// Width the field names are right-aligned to in expanded mode.
const EXPANDED_NAME_WIDTH: usize = 20;

/// Text printed for a result with no columns or no rows.
pub const EMPTY_SET: &str = "Empty set";

/// Renders a result as a table or in expanded form.
pub struct ResultTable<'a> {
    result: &'a QueryResult,
}

impl<'a> ResultTable<'a> {
    /// Creates a renderer for `result`.
    pub fn new(result: &'a QueryResult) -> Self {
        Self { result }
    }

    /// Renders the result, ending with a newline.
    pub fn render(&self, expanded: bool) -> String {
        if self.result.columns.is_empty() || self.result.rows.is_empty() {
            return format!("{EMPTY_SET}\n");
        }

        let mut out = if expanded {
            self.render_expanded()
        } else {
            self.render_table()
        };

        out.push_str(&format!("{} row(s) in set\n", self.result.rows.len()));
        if let Some(warning) = self.result.truncation_warning() {
            out.push_str(&warning);
            out.push('\n');
        }
        out
    }

    /// Computes the display width of each column.
    fn calculate_column_widths(&self, cells: &[Vec<String>]) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .result
            .columns
            .iter()
            .map(|col| display_width(&col.name))
            .collect();

        for row in cells {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(display_width(cell));
                }
            }
        }

        widths
    }

    fn cells(&self) -> Vec<Vec<String>> {
        self.result
            .rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_display_string()).collect())
            .collect()
    }

    fn render_table(&self) -> String {
        let cells = self.cells();
        let widths = self.calculate_column_widths(&cells);
        let border = render_border(&widths);

        let mut out = String::new();
        out.push_str(&border);

        let header: Vec<String> = self.result.columns.iter().map(|c| c.name.clone()).collect();
        out.push_str(&render_row(&header, &widths));
        out.push_str(&border);

        for row in &cells {
            out.push_str(&render_row(row, &widths));
        }
        out.push_str(&border);
        out
    }

    fn render_expanded(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.result.rows.iter().enumerate() {
            out.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));
            for (column, value) in self.result.columns.iter().zip(row) {
                out.push_str(&format!(
                    "{:>width$}: {}\n",
                    column.name,
                    value,
                    width = EXPANDED_NAME_WIDTH
                ));
            }
        }
        out
    }
}

/// Width of the widest line of `s`, in characters.
fn display_width(s: &str) -> usize {
    s.lines().map(|line| line.chars().count()).max().unwrap_or(0)
}

fn render_border(widths: &[usize]) -> String {
    let mut border = String::from("+");
    for width in widths {
        border.push_str(&"-".repeat(width + 2));
        border.push('+');
    }
    border.push('\n');
    border
}

/// Renders one logical row; cells containing newlines span several lines.
fn render_row(cells: &[String], widths: &[usize]) -> String {
    let split: Vec<Vec<&str>> = cells
        .iter()
        .map(|cell| {
            let lines: Vec<&str> = cell.lines().collect();
            if lines.is_empty() {
                vec![""]
            } else {
                lines
            }
        })
        .collect();
    let height = split.iter().map(Vec::len).max().unwrap_or(1);

    let mut out = String::new();
    for line in 0..height {
        out.push('|');
        for (i, width) in widths.iter().enumerate() {
            let text = split
                .get(i)
                .and_then(|lines| lines.get(line))
                .copied()
                .unwrap_or("");
            let pad = width - text.chars().count();
            out.push(' ');
            out.push_str(text);
            out.push_str(&" ".repeat(pad));
            out.push_str(" |");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ColumnInfo, Value};
    use pretty_assertions::assert_eq;

    fn sample_result() -> QueryResult {
        QueryResult::with_data(
            vec![ColumnInfo::new("id", "int4"), ColumnInfo::new("name", "text")],
            vec![
                vec![Value::Int(1), Value::String("Alice".to_string())],
                vec![Value::Int(2), Value::Null],
            ],
        )
    }

    #[test]
    fn test_render_table() {
        let rendered = ResultTable::new(&sample_result()).render(false);
        assert_eq!(
            rendered,
            "+----+-------+\n\
             | id | name  |\n\
             +----+-------+\n\
             | 1  | Alice |\n\
             | 2  | NULL  |\n\
             +----+-------+\n\
             2 row(s) in set\n"
        );
    }

    #[test]
    fn test_render_expanded() {
        let rendered = ResultTable::new(&sample_result()).render(true);
        assert_eq!(
            rendered,
            "*************************** 1. row ***************************\n\
             \x20                 id: 1\n\
             \x20               name: Alice\n\
             *************************** 2. row ***************************\n\
             \x20                 id: 2\n\
             \x20               name: NULL\n\
             2 row(s) in set\n"
        );
    }

    #[test]
    fn test_empty_result() {
        assert_eq!(ResultTable::new(&QueryResult::new()).render(false), "Empty set\n");

        let no_rows = QueryResult::with_data(vec![ColumnInfo::new("id", "int4")], vec![]);
        assert_eq!(ResultTable::new(&no_rows).render(true), "Empty set\n");
    }

    #[test]
    fn test_multiline_cell() {
        let result = QueryResult::with_data(
            vec![ColumnInfo::new("Create Table", "text")],
            vec![vec![Value::from("CREATE TABLE t (\n  id INTEGER\n);")]],
        );
        let rendered = ResultTable::new(&result).render(false);
        assert_eq!(
            rendered,
            "+------------------+\n\
             | Create Table     |\n\
             +------------------+\n\
             | CREATE TABLE t ( |\n\
             |   id INTEGER     |\n\
             | );               |\n\
             +------------------+\n\
             1 row(s) in set\n"
        );
    }

    #[test]
    fn test_truncation_warning_is_appended() {
        let mut result = sample_result();
        result.was_truncated = true;
        result.total_rows = Some(5000);
        let rendered = ResultTable::new(&result).render(false);
        assert!(rendered.ends_with("Result truncated: showing 2 of 5000 rows\n"));
    }
}
