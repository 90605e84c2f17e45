//! Bordered tables with per-column width, alignment and formatting.

use std::fmt;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::warn;

use super::format::MISSING;
use super::text::{fit, Align, Overflow};
use super::theme::{Intent, Theme};
use crate::data::Row;

/// Shown in place of a cell whose formatter failed.
pub const ERROR_MARKER: &str = "#ERR";

/// Turns a raw cell value (and its row, for derived fields) into display text.
pub type Formatter = Arc<dyn Fn(&Value, &Row, &Theme) -> Result<String> + Send + Sync>;

/// One table column.
#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub label: String,
    pub width: usize,
    pub align: Align,
    formatter: Formatter,
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("width", &self.width)
            .field("align", &self.align)
            .finish_non_exhaustive()
    }
}

impl Column {
    /// Left-aligned column using [`default_format`]. Width is at least 1.
    pub fn new(key: impl Into<String>, label: impl Into<String>, width: usize) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            width: width.max(1),
            align: Align::Left,
            formatter: Arc::new(default_format),
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn right(self) -> Self {
        self.align(Align::Right)
    }

    pub fn format<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&Value, &Row, &Theme) -> Result<String> + Send + Sync + 'static,
    {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Parse `key:width[:left|right][:Label]`.
    ///
    /// The label defaults to the key.
    pub fn parse(def: &str) -> Result<Self> {
        let mut parts = def.split(':');
        let key = parts.next().filter(|k| !k.is_empty());
        let Some(key) = key else {
            bail!("column needs a key: {def:?}");
        };
        let width: usize = parts
            .next()
            .with_context(|| format!("column needs a width: {def:?}"))?
            .parse()
            .with_context(|| format!("invalid column width: {def:?}"))?;
        if width == 0 {
            bail!("column width must be positive: {def:?}");
        }

        let mut column = Column::new(key, key, width);
        let mut rest: Vec<&str> = parts.collect();
        match rest.first().copied() {
            Some("right") => {
                column.align = Align::Right;
                rest.remove(0);
            }
            Some("left") => {
                rest.remove(0);
            }
            _ => {}
        }
        if !rest.is_empty() {
            column.label = rest.join(":");
        }
        Ok(column)
    }

    fn cell(&self, row: &Row, theme: &Theme) -> String {
        match (self.formatter)(row.get(&self.key), row, theme) {
            Ok(text) => text,
            Err(e) => {
                warn!(column = %self.key, error = %e, "cell formatter failed");
                theme.paint(Intent::Warning, ERROR_MARKER)
            }
        }
    }
}

/// Formatter used when a column does not set one.
///
/// Strings are shown as-is, `null` as a muted dash, anything else through
/// its JSON form.
pub fn default_format(value: &Value, _row: &Row, theme: &Theme) -> Result<String> {
    Ok(match value {
        Value::Null => theme.paint(Intent::Muted, MISSING),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Column layout plus overflow policy.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    overflow: Overflow,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            overflow: Overflow::default(),
        }
    }

    pub fn overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Render `rows.len() + 4` lines: top border, header, divider, rows, bottom border.
    pub fn render_lines(&self, rows: &[Row], theme: &Theme) -> Vec<String> {
        let mut lines = Vec::with_capacity(rows.len() + 4);
        lines.push(self.border(('┌', '┬', '┐'), theme));

        let header: Vec<String> = self
            .columns
            .iter()
            .map(|c| theme.paint(Intent::Header, &c.label))
            .collect();
        lines.push(self.line(&header, theme));
        lines.push(self.border(('├', '┼', '┤'), theme));

        for row in rows {
            let cells: Vec<String> = self.columns.iter().map(|c| c.cell(row, theme)).collect();
            lines.push(self.line(&cells, theme));
        }

        lines.push(self.border(('└', '┴', '┘'), theme));
        lines
    }

    pub fn render(&self, rows: &[Row], theme: &Theme) -> String {
        self.render_lines(rows, theme).join("\n")
    }

    fn border(&self, (left, mid, right): (char, char, char), theme: &Theme) -> String {
        let segments: Vec<String> = self.columns.iter().map(|c| "─".repeat(c.width + 2)).collect();
        theme.paint(Intent::Rule, format!("{left}{}{right}", segments.join(&mid.to_string())))
    }

    fn line(&self, cells: &[String], theme: &Theme) -> String {
        let bar = theme.paint(Intent::Rule, '│');
        let mut out = bar.clone();
        for (column, cell) in self.columns.iter().zip(cells) {
            out.push(' ');
            out.push_str(&fit(cell, column.width, column.align, self.overflow));
            out.push(' ');
            out.push_str(&bar);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::format::fmt_price;
    use crate::ui::text::{strip_ansi, visible_width};

    fn coins() -> Vec<Row> {
        vec![
            Row::new().with("symbol", "BTC").with("price", 50_000.0),
            Row::new().with("symbol", "ETH").with("price", 3_000.0),
            Row::new().with("symbol", "DOGE").with("price", 0.1),
        ]
    }

    fn coin_table() -> Table {
        Table::new(vec![
            Column::new("symbol", "Symbol", 10),
            Column::new("price", "Price", 12)
                .right()
                .format(|v, _, theme| Ok(fmt_price(v.as_f64(), theme))),
        ])
    }

    #[test]
    fn test_rows_plus_four_lines() {
        let table = Table::new(vec![Column::new("a", "A", 3)]);
        assert_eq!(table.render_lines(&[], &Theme::plain()).len(), 4);
        assert_eq!(table.render_lines(&vec![Row::new(); 5], &Theme::plain()).len(), 9);
    }

    #[test]
    fn test_three_coin_table() {
        for theme in [Theme::plain(), Theme::dark()] {
            let lines = coin_table().render_lines(&coins(), &theme);
            assert_eq!(lines.len(), 7);

            let width = visible_width(&lines[0]);
            assert_eq!(width, 1 + (10 + 2) + 1 + (12 + 2) + 1);
            for line in &lines {
                assert_eq!(visible_width(line), width, "{:?}", strip_ansi(line));
            }
        }

        let lines = coin_table().render_lines(&coins(), &Theme::plain());
        assert_eq!(lines[0], "┌────────────┬──────────────┐");
        assert_eq!(lines[1], "│ Symbol     │        Price │");
        assert_eq!(lines[2], "├────────────┼──────────────┤");
        assert_eq!(lines[3], "│ BTC        │   $50,000.00 │");
        assert_eq!(lines[5], "│ DOGE       │    $0.100000 │");
        assert_eq!(lines[6], "└────────────┴──────────────┘");
    }

    #[test]
    fn test_formatter_error_marks_only_that_cell() {
        let table = Table::new(vec![
            Column::new("symbol", "Symbol", 6),
            Column::new("price", "Price", 6).format(|v, _, _| match v.as_f64() {
                Some(p) => Ok(format!("{p:.0}")),
                None => bail!("not a number"),
            }),
        ]);
        let rows = vec![
            Row::new().with("symbol", "BTC").with("price", 5.0),
            Row::new().with("symbol", "BAD").with("price", "oops"),
        ];
        let lines = table.render_lines(&rows, &Theme::plain());
        assert_eq!(lines[3], "│ BTC    │ 5      │");
        assert_eq!(lines[4], "│ BAD    │ #ERR   │");
    }

    #[test]
    fn test_missing_value_is_muted_dash() {
        let table = Table::new(vec![Column::new("mcap", "Cap", 4)]);
        let lines = table.render_lines(&[Row::new()], &Theme::plain());
        assert_eq!(lines[3], "│ —    │");
    }

    #[test]
    fn test_spill_and_clip() {
        let rows = vec![Row::new().with("name", "Bitcoin Cash")];
        let spill = Table::new(vec![Column::new("name", "Name", 4)]);
        assert_eq!(spill.render_lines(&rows, &Theme::plain())[3], "│ Bitcoin Cash │");

        let clip = spill.clone().overflow(Overflow::Clip);
        assert_eq!(clip.render_lines(&rows, &Theme::plain())[3], "│ Bitc │");
    }

    #[test]
    fn test_cell_with_stray_escape_renders() {
        let rows = vec![Row::new().with("name", "\x1b€uro")];
        let table = Table::new(vec![Column::new("name", "Name", 6)]);
        let lines = table.render_lines(&rows, &Theme::plain());
        assert_eq!(strip_ansi(&lines[3]), "│ €uro   │");
        assert_eq!(visible_width(&lines[3]), visible_width(&lines[0]));
    }

    #[test]
    fn test_parse_column_definition() {
        let c = Column::parse("price:12:right:Price (USD)").unwrap();
        assert_eq!(c.key, "price");
        assert_eq!(c.width, 12);
        assert_eq!(c.align, Align::Right);
        assert_eq!(c.label, "Price (USD)");

        let c = Column::parse("symbol:8").unwrap();
        assert_eq!((c.label.as_str(), c.align), ("symbol", Align::Left));

        let c = Column::parse("time:8:HH:MM").unwrap();
        assert_eq!(c.label, "HH:MM");

        assert!(Column::parse("price").is_err());
        assert!(Column::parse("price:0").is_err());
        assert!(Column::parse(":4").is_err());
    }
}
