//! General index and search index generation.

use std::fmt::Write;

use refman_renderer::{TocEntry, escape_html};
use serde::Serialize;

use crate::page::RenderedPage;

/// One entry in the general index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Display text, a page title or heading.
    pub title: String,
    /// Link target relative to the output root.
    pub href: String,
}

/// Search index serialized to `searchindex.json`.
#[derive(Debug, Serialize)]
pub struct SearchIndex<'a> {
    pub pages: Vec<SearchDocument<'a>>,
}

/// One searchable page in [`SearchIndex`].
#[derive(Debug, Serialize)]
pub struct SearchDocument<'a> {
    pub href: &'a str,
    pub title: &'a str,
    pub text: String,
    /// Section headings, so results can link straight to an anchor.
    pub sections: &'a [TocEntry],
}

/// Collect general index entries from rendered pages.
///
/// Page titles link to the page itself, H2/H3 headings to their anchor.
/// Entries are sorted case-insensitively by title.
pub fn collect_entries(pages: &[RenderedPage]) -> Vec<IndexEntry> {
    let mut entries = Vec::new();
    for page in pages {
        entries.push(IndexEntry {
            title: page.title.clone(),
            href: page.href.clone(),
        });
        for heading in &page.toc {
            entries.push(IndexEntry {
                title: heading.title.clone(),
                href: format!("{}#{}", page.href, heading.id),
            });
        }
    }
    entries.sort_by(|a, b| {
        let by_title = a.title.to_lowercase().cmp(&b.title.to_lowercase());
        by_title.then_with(|| a.href.cmp(&b.href))
    });
    entries
}

/// Render the general index body, grouped by leading letter.
pub fn render_genindex(entries: &[IndexEntry]) -> String {
    let mut html = String::with_capacity(256 + entries.len() * 64);
    html.push_str("<h1>Index</h1>\n");

    let mut current_group: Option<char> = None;
    for entry in entries {
        let group = group_letter(&entry.title);
        if current_group != Some(group) {
            if current_group.is_some() {
                html.push_str("</ul>\n");
            }
            let _ = writeln!(html, "<h2>{group}</h2>\n<ul class=\"genindex\">");
            current_group = Some(group);
        }
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            escape_html(&entry.href),
            escape_html(&entry.title),
        );
    }
    if current_group.is_some() {
        html.push_str("</ul>\n");
    }
    html
}

/// Build the search index over rendered pages.
pub fn search_index(pages: &[RenderedPage]) -> SearchIndex<'_> {
    SearchIndex {
        pages: pages
            .iter()
            .map(|page| SearchDocument {
                href: &page.href,
                title: &page.title,
                text: strip_tags(&page.html),
                sections: &page.toc,
            })
            .collect(),
    }
}

fn group_letter(title: &str) -> char {
    title
        .chars()
        .find(|c| c.is_ascii_alphanumeric())
        .map_or('#', |c| c.to_ascii_uppercase())
}

/// Drop tags and collapse whitespace so the search corpus stays small.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut pending_space = false;
    for ch in html.chars() {
        if in_tag {
            if ch == '>' {
                in_tag = false;
                pending_space = true;
            }
            continue;
        }
        match ch {
            '<' => in_tag = true,
            c if c.is_whitespace() => pending_space = true,
            c => {
                if pending_space && !text.is_empty() {
                    text.push(' ');
                }
                pending_space = false;
                text.push(c);
            }
        }
    }
    text
}
