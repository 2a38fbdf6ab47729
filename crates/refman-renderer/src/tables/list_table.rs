//! List table container directive.

use std::fmt::Write;
use std::mem;

use crate::directive::{ContainerDirective, DirectiveArgs, DirectiveContext, DirectiveOutput};
use crate::html::escape_html;
use crate::renderer::MarkdownRenderer;

/// Presentation options for a list table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Accessibility summary, emitted as the `summary` attribute.
    pub summary: Option<String>,
    /// Number of leading rows rendered inside `<thead>`.
    pub header_rows: usize,
    /// Relative column widths, normalized to percentages.
    pub widths: Vec<usize>,
    /// CSS classes for the `<table>` element.
    pub classes: Vec<String>,
    /// Caption text from the directive content.
    pub title: String,
}

impl TableOptions {
    /// Read the known options from directive arguments. Keys this
    /// table does not understand stay on `args` untouched.
    #[must_use]
    pub fn from_args(args: &DirectiveArgs) -> Self {
        let mut classes = args.classes.clone();
        if let Some(extra) = args.get("class") {
            classes.extend(extra.split_whitespace().map(str::to_owned));
        }
        Self {
            summary: args.get("summary").map(str::to_owned),
            header_rows: args.get_usize("header-rows").unwrap_or(0),
            widths: args.get_usize_list("widths").unwrap_or_default(),
            classes,
            title: args.content.clone(),
        }
    }
}

/// Renders `* -` row syntax captured from the directive body as an
/// HTML table.
///
/// ```text
/// :::list-table{header-rows="1" widths="1 3"}
/// * - Name
///   - Meaning
/// * - handle
///   - the connection handle
/// :::
/// ```
///
/// Cell text is markdown and is rendered per cell. Rows collected
/// before [`end`](ContainerDirective::end) accumulate, so feeding rows
/// from more than one invocation merges them into one table.
pub struct ListTableDirective {
    options: TableOptions,
    rows: Vec<Vec<String>>,
    warnings: Vec<String>,
}

impl ListTableDirective {
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: TableOptions::default(),
            rows: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn push_cell(&mut self, text: &str) {
        if let Some(row) = self.rows.last_mut() {
            row.push(text.trim().to_owned());
        }
    }
}

impl Default for ListTableDirective {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerDirective for ListTableDirective {
    fn name(&self) -> &str {
        "list-table"
    }

    fn start(&mut self, args: DirectiveArgs, _ctx: &DirectiveContext) -> DirectiveOutput {
        // Rows are deliberately not cleared here. They are drained by
        // end(), and content captured before a second start() stays.
        self.options = TableOptions::from_args(&args);
        DirectiveOutput::html(String::new())
    }

    fn captures_body(&self) -> bool {
        true
    }

    fn capture(&mut self, line: &str, line_num: usize) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }
        if let Some(rest) = trimmed.strip_prefix('*') {
            let rest = rest.trim_start();
            self.rows.push(Vec::new());
            if let Some(cell) = rest.strip_prefix('-') {
                self.push_cell(cell);
            } else if !rest.is_empty() {
                self.warnings
                    .push(format!("line {line_num}: expected - after * in table row"));
            }
        } else if let Some(cell) = trimmed.strip_prefix('-') {
            if self.rows.is_empty() {
                self.warnings
                    .push(format!("line {line_num}: table cell before any row marker"));
            } else {
                self.push_cell(cell);
            }
        } else {
            match self.rows.last_mut().and_then(|row| row.last_mut()) {
                Some(cell) => {
                    cell.push('\n');
                    cell.push_str(trimmed);
                }
                None => self
                    .warnings
                    .push(format!("line {line_num}: table content outside any cell")),
            }
        }
    }

    fn end(&mut self, _line_num: usize) -> Option<String> {
        let rows = mem::take(&mut self.rows);
        let options = mem::take(&mut self.options);
        Some(render_table(&options, &rows, &mut self.warnings))
    }

    fn take_warnings(&mut self) -> Vec<String> {
        mem::take(&mut self.warnings)
    }
}

fn render_table(options: &TableOptions, rows: &[Vec<String>], warnings: &mut Vec<String>) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    for (index, row) in rows.iter().enumerate() {
        if row.len() != columns {
            warnings.push(format!(
                "table row {} has {} cells, expected {columns}",
                index + 1,
                row.len()
            ));
        }
    }
    let mut widths: &[usize] = &options.widths;
    if !widths.is_empty() && widths.len() != columns {
        warnings.push(format!(
            "table widths {:?} do not match {columns} columns",
            options.widths
        ));
        widths = &[];
    }

    let mut html = String::with_capacity(256);
    html.push_str("<table");
    if !options.classes.is_empty() {
        let _ = write!(html, " class=\"{}\"", escape_html(&options.classes.join(" ")));
    }
    if let Some(summary) = &options.summary {
        let _ = write!(html, " summary=\"{}\"", escape_html(summary));
    }
    html.push('>');
    if !options.title.is_empty() {
        let _ = write!(html, "<caption>{}</caption>", escape_html(&options.title));
    }
    // Widths are relative, 10/5/35 becomes 20%/10%/70%.
    let total: usize = widths.iter().sum();
    if total > 0 {
        html.push_str("<colgroup>");
        for width in widths {
            let _ = write!(html, "<col style=\"width: {}%\">", width * 100 / total);
        }
        html.push_str("</colgroup>");
    }
    let header_rows = options.header_rows.min(rows.len());
    if header_rows > 0 {
        html.push_str("<thead>");
        for row in &rows[..header_rows] {
            render_row(&mut html, row, "th");
        }
        html.push_str("</thead>");
    }
    html.push_str("<tbody>");
    for row in &rows[header_rows..] {
        render_row(&mut html, row, "td");
    }
    html.push_str("</tbody></table>");
    html
}

fn render_row(html: &mut String, cells: &[String], tag: &str) {
    html.push_str("<tr>");
    for cell in cells {
        let _ = write!(html, "<{tag}>{}</{tag}>", render_cell(cell));
    }
    html.push_str("</tr>");
}

/// Render cell text as markdown. A lone paragraph is unwrapped so
/// plain cells do not carry `<p>` tags.
fn render_cell(text: &str) -> String {
    let mut renderer = MarkdownRenderer::new();
    let html = renderer.render(text).html;
    let trimmed = html.trim();
    if let Some(inner) = trimmed
        .strip_prefix("<p>")
        .and_then(|rest| rest.strip_suffix("</p>"))
    {
        if !inner.contains("<p>") {
            return inner.to_owned();
        }
    }
    trimmed.to_owned()
}
