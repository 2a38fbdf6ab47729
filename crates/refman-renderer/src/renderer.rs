//! Markdown to HTML rendering.

use std::fmt::Write;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::directive::DirectiveProcessor;
use crate::html::{self, AdmonitionKind, escape_html, resolve_href};
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState, TocEntry};

/// Everything produced by rendering one page.
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// Rendered body HTML.
    pub html: String,
    /// Text of the first level one heading, when title extraction is
    /// enabled.
    pub title: Option<String>,
    /// Outline of level two and three headings.
    pub toc: Vec<TocEntry>,
    /// Warnings from directive processing.
    pub warnings: Vec<String>,
}

/// Streaming markdown renderer.
///
/// Directives are expanded over the raw source first, then the result
/// is parsed as markdown and rendered event by event. Headings get
/// slug anchors and feed the page outline, relative `.md` links are
/// rewritten to point at generated pages, and GFM alert blockquotes
/// render as admonition blocks.
///
/// # Example
///
/// ```
/// use refman_renderer::MarkdownRenderer;
///
/// let mut renderer = MarkdownRenderer::new();
/// let result = renderer.render("## Usage\n\nCall `connect()` first.");
/// assert!(result.html.contains("<h2 id=\"usage\">Usage</h2>"));
/// ```
pub struct MarkdownRenderer {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    /// Open blockquotes, admonition kind or `None` for a plain quote.
    admonitions: Vec<Option<AdmonitionKind>>,
    gfm: bool,
    smart_punctuation: bool,
    directives: Option<DirectiveProcessor>,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::new(),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::default(),
            admonitions: Vec::new(),
            gfm: true,
            smart_punctuation: false,
            directives: None,
        }
    }

    /// Toggle the GFM extensions (tables, strikethrough, task lists,
    /// alerts). Enabled by default.
    #[must_use]
    pub fn with_gfm(mut self, gfm: bool) -> Self {
        self.gfm = gfm;
        self
    }

    /// Toggle typographic quote and dash replacement. Disabled by
    /// default.
    #[must_use]
    pub fn with_smart_punctuation(mut self, smart_punctuation: bool) -> Self {
        self.smart_punctuation = smart_punctuation;
        self
    }

    /// Record the first level one heading as the page title.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.heading.set_extract_title();
        self
    }

    /// Expand directives through `processor` before parsing.
    #[must_use]
    pub fn with_directives(mut self, processor: DirectiveProcessor) -> Self {
        self.directives = Some(processor);
        self
    }

    /// Parser options for the configured extensions.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.gfm {
            options |= Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM;
        }
        if self.smart_punctuation {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }
        options
    }

    /// Render one document.
    pub fn render(&mut self, markdown: &str) -> RenderResult {
        let (source, warnings) = match self.directives.as_mut() {
            Some(processor) => {
                let processed = processor.process(markdown);
                let warnings = processor.warnings().to_vec();
                (processed, warnings)
            }
            None => (markdown.to_owned(), Vec::new()),
        };

        let options = self.parser_options();
        for event in Parser::new_ext(&source, options) {
            self.handle_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            title: self.heading.take_title(),
            toc: self.heading.take_toc(),
            warnings,
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => {
                if self.code.is_active() {
                    self.code.push_str(&text);
                } else if self.image.is_active() {
                    self.image.push_str(&text);
                } else if self.heading.is_active() {
                    self.heading.push_text(&text);
                    self.heading.push_html(&escape_html(&text));
                } else {
                    self.output.push_str(&escape_html(&text));
                }
            }
            Event::Code(code) => {
                let rendered = format!("<code>{}</code>", escape_html(&code));
                if self.heading.is_active() {
                    self.heading.push_text(&code);
                    self.heading.push_html(&rendered);
                } else {
                    self.output.push_str(&rendered);
                }
            }
            Event::Html(raw) | Event::InlineHtml(raw) => self.output.push_str(&raw),
            Event::SoftBreak => {
                if self.code.is_active() {
                    self.code.push_newline();
                } else {
                    self.push_inline("\n");
                }
            }
            Event::HardBreak => self.push_inline("<br>"),
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => {
                self.output.push_str(if checked {
                    "<input type=\"checkbox\" checked disabled> "
                } else {
                    "<input type=\"checkbox\" disabled> "
                });
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => {
                if !self.code.is_active() {
                    self.output.push_str("<p>");
                }
            }
            Tag::Heading { level, .. } => {
                self.heading.start(heading_level_to_num(level));
            }
            Tag::BlockQuote(kind) => match kind {
                Some(kind) => {
                    let kind = AdmonitionKind::from(kind);
                    self.admonitions.push(Some(kind));
                    html::admonition_start(kind, &mut self.output);
                }
                None => {
                    self.admonitions.push(None);
                    self.output.push_str("<blockquote>");
                }
            },
            Tag::CodeBlock(kind) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().map(str::to_owned)
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code.start(language);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => {
                    let _ = write!(self.output, "<ol start=\"{n}\">");
                }
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                let style = self.table.alignment_style();
                let _ = write!(self.output, "<{tag}{style}>");
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Link { dest_url, .. } => {
                let href = resolve_href(&dest_url);
                let anchor = format!("<a href=\"{}\">", escape_html(&href));
                self.push_inline(&anchor);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image.start(dest_url.to_string(), title.to_string());
            }
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::FootnoteDefinition(_)
            | Tag::HtmlBlock
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if !self.code.is_active() {
                    self.output.push_str("</p>");
                }
            }
            TagEnd::Heading(_) => {
                let (level, id, inner) = self.heading.finish();
                let inner = inner.trim();
                let _ = write!(self.output, "<h{level} id=\"{id}\">{inner}</h{level}>");
            }
            TagEnd::BlockQuote(_) => match self.admonitions.pop() {
                Some(Some(_)) => html::admonition_end(&mut self.output),
                _ => self.output.push_str("</blockquote>"),
            },
            TagEnd::CodeBlock => {
                let (language, content) = self.code.end();
                html::code_block(language.as_deref(), &content, &mut self.output);
            }
            TagEnd::List(ordered) => {
                self.output.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.table.end_head();
                self.output.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                let _ = write!(self.output, "</{tag}>");
                self.table.next_column();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                let (src, title, alt) = self.image.end();
                html::image(&src, &alt, &title, &mut self.output);
            }
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::FootnoteDefinition
            | TagEnd::HtmlBlock
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition => {}
        }
    }

    /// Emit inline HTML into the heading buffer when a heading is
    /// open, otherwise into the output.
    fn push_inline(&mut self, fragment: &str) {
        if self.heading.is_active() {
            self.heading.push_html(fragment);
        } else {
            self.output.push_str(fragment);
        }
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
