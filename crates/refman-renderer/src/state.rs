//! Rendering state accumulators.

use std::collections::HashMap;

use pulldown_cmark::Alignment;

/// A table of contents entry collected while rendering headings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level, 2 or 3.
    pub level: u8,
    /// Plain text of the heading.
    pub title: String,
    /// Anchor id on the rendered heading.
    pub id: String,
}

/// Build an anchor id from heading text.
pub(crate) fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "section".to_owned()
    } else {
        slug
    }
}

/// Tracks the heading currently being rendered and accumulates the
/// document outline.
#[derive(Default)]
pub(crate) struct HeadingState {
    active: bool,
    level: u8,
    text: String,
    html: String,
    extract_title: bool,
    title: Option<String>,
    toc: Vec<TocEntry>,
    used_ids: HashMap<String, usize>,
}

impl HeadingState {
    pub(crate) fn set_extract_title(&mut self) {
        self.extract_title = true;
    }

    pub(crate) fn start(&mut self, level: u8) {
        self.active = true;
        self.level = level;
        self.text.clear();
        self.html.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    /// Close the heading. Returns its level, unique anchor id, and
    /// inner HTML, and records title and outline entries.
    pub(crate) fn finish(&mut self) -> (u8, String, String) {
        self.active = false;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);
        let title = text.trim().to_owned();
        let id = self.unique_id(&slugify(&title));
        if self.level == 1 {
            if self.extract_title && self.title.is_none() {
                self.title = Some(title);
            }
        } else if (2..=3).contains(&self.level) {
            self.toc.push(TocEntry {
                level: self.level,
                title,
                id: id.clone(),
            });
        }
        (self.level, id, html)
    }

    fn unique_id(&mut self, slug: &str) -> String {
        let count = self.used_ids.entry(slug.to_owned()).or_insert(0);
        let id = if *count == 0 {
            slug.to_owned()
        } else {
            format!("{slug}-{count}")
        };
        *count += 1;
        id
    }

    pub(crate) fn take_title(&mut self) -> Option<String> {
        self.title.take()
    }

    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }
}

#[derive(Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    language: Option<String>,
    content: String,
}

impl CodeBlockState {
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.content.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.content.push_str(text);
    }

    pub(crate) fn push_newline(&mut self) {
        self.content.push('\n');
    }

    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.content))
    }
}

#[derive(Default)]
pub(crate) struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    column: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.column = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.column = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    pub(crate) fn start_row(&mut self) {
        self.column = 0;
    }

    pub(crate) fn next_column(&mut self) {
        self.column += 1;
    }

    /// Inline style for the current column's alignment.
    pub(crate) fn alignment_style(&self) -> &'static str {
        match self.alignments.get(self.column) {
            Some(Alignment::Left) => " style=\"text-align: left\"",
            Some(Alignment::Center) => " style=\"text-align: center\"",
            Some(Alignment::Right) => " style=\"text-align: right\"",
            _ => "",
        }
    }
}

#[derive(Default)]
pub(crate) struct ImageState {
    active: bool,
    src: String,
    title: String,
    alt: String,
}

impl ImageState {
    pub(crate) fn start(&mut self, src: String, title: String) {
        self.active = true;
        self.src = src;
        self.title = title;
        self.alt.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt.push_str(text);
    }

    pub(crate) fn end(&mut self) -> (String, String, String) {
        self.active = false;
        (
            std::mem::take(&mut self.src),
            std::mem::take(&mut self.title),
            std::mem::take(&mut self.alt),
        )
    }
}
