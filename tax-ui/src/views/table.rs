/// Column-aligned plain-text table. The first column is left-aligned, the
/// rest right-aligned.
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(
        &mut self,
        cells: I,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let columns = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);

        let mut widths = vec![0; columns];
        for row in std::iter::once(&self.headers).chain(&self.rows) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        if !self.headers.is_empty() {
            out.push_str(&format_row(&self.headers, &widths));
            let rule_width = widths.iter().sum::<usize>() + 2 * columns.saturating_sub(1);
            out.push_str(&"-".repeat(rule_width));
            out.push('\n');
        }
        for row in &self.rows {
            out.push_str(&format_row(row, &widths));
        }
        out
    }
}

fn format_row(
    cells: &[String],
    widths: &[usize],
) -> String {
    let line = widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            if i == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_aligns_columns() {
        let mut table = TextTable::new(["Item", "Amount"]);
        table.push_row(["Tax", "2,500.02"]);
        table.push_row(["Net salary", "1,46,500.02"]);

        assert_eq!(
            table.render(),
            "Item             Amount\n\
             -----------------------\n\
             Tax            2,500.02\n\
             Net salary  1,46,500.02\n"
        );
    }

    #[test]
    fn test_no_headers() {
        let mut table = TextTable::new(Vec::<String>::new());
        table.push_row(["a", "1"]);
        table.push_row(["bbb", "22"]);

        assert_eq!(table.render(), "a     1\nbbb  22\n");
    }

    #[test]
    fn test_short_rows_padded() {
        let mut table = TextTable::new(["A", "B"]);
        table.push_row(["x"]);

        assert_eq!(table.render(), "A  B\n----\nx\n");
    }
}
