//! Table output for per-source results using comfy-table.

use std::env;

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};

use crate::domain::models::{AggregatedContext, SourceBody};
use crate::infrastructure::http::shorten;

/// Widest detail cell before the text is cut.
const MAX_DETAIL_CHARS: usize = 60;

/// Table formatter for CLI output
pub struct TableFormatter {
    use_colors: bool,
}

impl TableFormatter {
    /// Create a formatter, coloring output when the terminal supports it
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
        }
    }

    /// Create a formatter with explicit color choice
    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// One row per source: label, status and the first line of detail.
    pub fn format_sources(&self, context: &AggregatedContext) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Source").add_attribute(Attribute::Bold),
                Cell::new("Status").add_attribute(Attribute::Bold),
                Cell::new("Detail").add_attribute(Attribute::Bold),
            ]);

        for section in context.sections() {
            let status = match section.body.error_kind() {
                Some(kind) => format!("{} ({kind})", section.body.status()),
                None => section.body.status().to_string(),
            };
            let status_cell = if self.use_colors {
                Cell::new(status).fg(status_color(&section.body))
            } else {
                Cell::new(status)
            };
            let rendered = section.render();
            let first_line = rendered.lines().next().unwrap_or_default();

            table.add_row(vec![
                Cell::new(section.label),
                status_cell,
                Cell::new(shorten(first_line, MAX_DETAIL_CHARS)),
            ]);
        }

        table.to_string()
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

const fn status_color(body: &SourceBody) -> Color {
    match body {
        SourceBody::Data(_) => Color::Green,
        SourceBody::NotFound(_) => Color::Yellow,
        SourceBody::Failed(_) => Color::Red,
    }
}

fn supports_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}
