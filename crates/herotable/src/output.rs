//! Rendering the current page: a text table or structured data.
//!
//! Text mode lays the rendered cells out in padded columns under a bold
//! header, followed by a "Showing a-b of n" line and the page buttons.
//! JSON and YAML emit the full records of the page along with the counts.
//! CSV emits the rendered cells with the column titles as headers.

use clap::ValueEnum;
use console::Style;
use herotable_seeker::{PageControls, PageSize, Record, Schema, Session, SortSpec, ViewResult};
use serde::Serialize;
use thiserror::Error;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::DEFAULT_MAX_CELL_WIDTH;

const COLUMN_GAP: &str = "  ";

/// Output format for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Padded text table
    #[default]
    Text,
    /// Page as pretty-printed JSON
    Json,
    /// Page as YAML
    Yaml,
    /// Rendered cells as CSV
    Csv,
}

impl OutputMode {
    /// Returns true for the machine-readable formats.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml | OutputMode::Csv)
    }
}

/// Errors that can occur while rendering output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(String),
}

/// Text table settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStyle {
    pub max_cell_width: usize,
    /// Emit ANSI styling for the header.
    pub color: bool,
}

impl Default for TableStyle {
    fn default() -> Self {
        TableStyle {
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
            color: false,
        }
    }
}

/// Structured form of the current page.
#[derive(Debug, Serialize)]
pub struct TableReport<'a> {
    pub search: &'a str,
    pub sort: &'a SortSpec,
    pub page_size: PageSize,
    #[serde(flatten)]
    pub view: ViewResult<'a, Record>,
}

/// Renders the session's current page in `mode`.
pub fn render_session(
    session: &Session,
    mode: OutputMode,
    style: &TableStyle,
) -> Result<String, OutputError> {
    let view = session.view();
    let size = session.page_state().size();
    match mode {
        OutputMode::Text => Ok(render_table(
            session.schema(),
            &view,
            size,
            session.controls(),
            style,
        )),
        OutputMode::Csv => render_csv(session.schema(), &view),
        OutputMode::Json | OutputMode::Yaml => {
            let report = TableReport {
                search: session.search_term(),
                sort: session.sort(),
                page_size: size,
                view,
            };
            serialize_report(&report, mode)
        }
    }
}

fn serialize_report(report: &TableReport<'_>, mode: OutputMode) -> Result<String, OutputError> {
    let mut text = match mode {
        OutputMode::Yaml => serde_yaml::to_string(report)?,
        _ => serde_json::to_string_pretty(report)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

// ============================================================================
// Text table
// ============================================================================

/// Lays out one page as a text table.
pub fn render_table(
    schema: &Schema,
    view: &ViewResult<'_, Record>,
    size: PageSize,
    controls: Option<PageControls>,
    style: &TableStyle,
) -> String {
    let titles: Vec<String> = schema
        .titles()
        .into_iter()
        .map(|t| truncate_to_width(t, style.max_cell_width))
        .collect();
    let rows: Vec<Vec<String>> = view
        .records
        .iter()
        .map(|record| {
            schema
                .render_row(*record)
                .iter()
                .map(|cell| truncate_to_width(cell, style.max_cell_width))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = titles.iter().map(|t| t.width()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let header_style = Style::new().bold().force_styling(style.color);
    let mut out = String::new();
    out.push_str(&header_style.apply_to(layout_line(&titles, &widths)).to_string());
    out.push('\n');
    for row in &rows {
        out.push_str(&layout_line(row, &widths));
        out.push('\n');
    }
    out.push_str(&footer(view, size));
    out.push('\n');
    if let Some(controls) = controls.filter(|c| c.page_count > 1) {
        out.push_str(&pager_line(&controls));
        out.push('\n');
    }
    out
}

fn layout_line(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_to_width(cell, *width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end().to_string()
}

/// "Showing a-b of n", or a note when nothing is visible.
pub fn footer(view: &ViewResult<'_, Record>, size: PageSize) -> String {
    if view.total_count == 0 {
        return "No matching records".to_string();
    }
    if view.is_empty() {
        return format!("Showing 0 of {}", view.total_count);
    }
    let offset = match size {
        PageSize::Limit(n) => (view.page - 1) * n.get(),
        PageSize::All => 0,
    };
    format!(
        "Showing {}-{} of {}",
        offset + 1,
        offset + view.len(),
        view.total_count
    )
}

/// Page buttons, e.g. `‹ 1 2 [3] 4 5 ›`.
pub fn pager_line(controls: &PageControls) -> String {
    let mut parts = Vec::new();
    if controls.has_prev {
        parts.push("‹".to_string());
    }
    for page in controls.pages() {
        if page == controls.current {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if controls.has_next {
        parts.push("›".to_string());
    }
    parts.join(" ")
}

/// Truncates to `max_width` display columns, ending in `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    // Reserve 1 column for the ellipsis
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

// ============================================================================
// CSV
// ============================================================================

/// Writes the page's rendered cells as CSV under the column titles.
pub fn render_csv(schema: &Schema, view: &ViewResult<'_, Record>) -> Result<String, OutputError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(schema.titles())
        .map_err(|e| OutputError::Csv(e.to_string()))?;
    for record in &view.records {
        wtr.write_record(schema.render_row(*record))
            .map_err(|e| OutputError::Csv(e.to_string()))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| OutputError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| OutputError::Csv(e.to_string()))
}
