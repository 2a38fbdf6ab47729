//! HTML page shell for the static site.

use std::fmt::Write;

use refman_renderer::{TocEntry, escape_html};

/// Stylesheet written to `_static/styles.css` when the configured theme
/// has no override file.
pub(crate) const DEFAULT_STYLESHEET: &str = "\
:root {
  --text: #1f2933;
  --muted: #616e7c;
  --border: #d5dbe1;
  --accent: #1f6feb;
  --surface: #f6f8fa;
}
* { box-sizing: border-box; }
body {
  margin: 0;
  color: var(--text);
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  line-height: 1.6;
}
.site-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0.75rem 1.5rem;
  border-bottom: 1px solid var(--border);
}
.site-header .brand {
  color: var(--text);
  font-weight: 600;
  text-decoration: none;
}
.site-header .release { color: var(--muted); font-weight: 400; }
.site-header nav { display: flex; align-items: center; gap: 1rem; }
.site-header nav a { color: var(--accent); text-decoration: none; }
.search input {
  padding: 0.3rem 0.6rem;
  border: 1px solid var(--border);
  border-radius: 4px;
}
.page {
  display: flex;
  max-width: 72rem;
  margin: 0 auto;
  padding: 1.5rem;
  gap: 2rem;
}
main { flex: 1; min-width: 0; }
article.document h1 { margin-top: 0; }
article.document a { color: var(--accent); }
aside.toc {
  width: 14rem;
  flex-shrink: 0;
  font-size: 0.875rem;
}
aside.toc h3 {
  margin: 0 0 0.5rem;
  font-size: 0.75rem;
  text-transform: uppercase;
  color: var(--muted);
}
aside.toc ul { list-style: none; margin: 0; padding: 0; }
aside.toc li { margin: 0.25rem 0; }
aside.toc li.toc-sub { margin-left: 0.75rem; }
aside.toc a { color: var(--muted); text-decoration: none; }
aside.toc a:hover { color: var(--text); }
pre {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: 4px;
  padding: 0.75rem 1rem;
  overflow-x: auto;
}
code { font-family: 'SFMono-Regular', Consolas, Menlo, monospace; font-size: 0.9em; }
blockquote {
  margin: 1rem 0;
  padding: 0 1rem;
  color: var(--muted);
  border-left: 4px solid var(--border);
}
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.4rem 0.75rem; text-align: left; }
thead th { background: var(--surface); }
table.wy-table-responsive { display: block; overflow-x: auto; }
.admonition {
  margin: 1rem 0;
  padding: 0.75rem 1rem;
  border-left: 4px solid var(--accent);
  background: var(--surface);
  border-radius: 0 4px 4px 0;
}
.admonition-title { margin: 0 0 0.25rem; font-weight: 600; }
.admonition.warning, .admonition.caution { border-left-color: #d4a72c; }
.admonition.important { border-left-color: #8250df; }
.admonition.tip { border-left-color: #1a7f37; }
footer {
  max-width: 72rem;
  margin: 0 auto;
  padding: 1rem 1.5rem;
  color: var(--muted);
  font-size: 0.875rem;
  border-top: 1px solid var(--border);
}
ul.genindex { list-style: none; padding: 0; column-width: 16rem; }
";

/// Client-side driver for the search page. Reads `q` from the query
/// string and filters `searchindex.json`.
const SEARCH_SCRIPT: &str = r"(function () {
  var params = new URLSearchParams(window.location.search);
  var query = (params.get('q') || '').trim().toLowerCase();
  var results = document.getElementById('search-results');
  if (!query) { return; }
  fetch('searchindex.json')
    .then(function (resp) { return resp.json(); })
    .then(function (index) {
      var hits = [];
      index.pages.forEach(function (page) {
        if (page.title.toLowerCase().indexOf(query) !== -1 ||
            page.text.toLowerCase().indexOf(query) !== -1) {
          hits.push({ href: page.href, label: page.title });
        }
        page.sections.forEach(function (section) {
          if (section.title.toLowerCase().indexOf(query) !== -1) {
            hits.push({
              href: page.href + '#' + section.id,
              label: page.title + ': ' + section.title
            });
          }
        });
      });
      if (hits.length === 0) {
        results.innerHTML = '<li>No results.</li>';
        return;
      }
      hits.forEach(function (hit) {
        var item = document.createElement('li');
        var link = document.createElement('a');
        link.href = hit.href;
        link.textContent = hit.label;
        item.appendChild(link);
        results.appendChild(item);
      });
    });
}());
";

/// Data needed to wrap rendered body HTML into a complete page.
pub struct PageContext<'a> {
    /// Site title for the browser tab, shown after the page title.
    pub site_title: &'a str,
    /// Title of this page.
    pub page_title: &'a str,
    /// Rendered body HTML.
    pub body: &'a str,
    /// Table of contents entries for the sidebar.
    pub toc: &'a [TocEntry],
    /// Prefix reaching the output root from this page (empty or `../` runs).
    pub root: &'a str,
    /// Project name shown in the header.
    pub project: &'a str,
    /// Release string shown next to the project name.
    pub release: &'a str,
    /// Footer line, empty to omit the footer.
    pub copyright: &'a str,
    /// Favicon file name under `_static/`, if any.
    pub favicon: Option<&'a str>,
    /// Script sources, either URLs or file names under `_static/`.
    pub scripts: &'a [String],
    /// Whether to render the header search form.
    pub search: bool,
    /// Whether to link the general index in the header.
    pub use_index: bool,
}

/// Compute the path prefix that reaches the output root from `href`.
pub(crate) fn root_prefix(href: &str) -> String {
    "../".repeat(href.matches('/').count())
}

/// Render a complete HTML page around the body.
pub fn render_page_shell(ctx: &PageContext<'_>) -> String {
    let mut html = String::with_capacity(8192 + ctx.body.len());

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(
        html,
        "<title>{} - {}</title>",
        escape_html(ctx.page_title),
        escape_html(ctx.site_title),
    );
    let _ = writeln!(
        html,
        "<link rel=\"stylesheet\" href=\"{}_static/styles.css\">",
        ctx.root
    );
    if let Some(favicon) = ctx.favicon {
        let _ = writeln!(
            html,
            "<link rel=\"icon\" href=\"{}_static/{}\">",
            ctx.root,
            escape_html(favicon)
        );
    }
    for script in ctx.scripts {
        let _ = writeln!(
            html,
            "<script defer src=\"{}\"></script>",
            script_src(ctx.root, script)
        );
    }
    html.push_str("</head>\n<body>\n");

    render_header(&mut html, ctx);

    html.push_str("<div class=\"page\">\n");
    html.push_str("<main>\n<article class=\"document\">\n");
    html.push_str(ctx.body);
    if !ctx.body.ends_with('\n') {
        html.push('\n');
    }
    html.push_str("</article>\n</main>\n");
    render_toc(&mut html, ctx.toc);
    html.push_str("</div>\n");

    if !ctx.copyright.is_empty() {
        let _ = writeln!(html, "<footer><p>{}</p></footer>", escape_html(ctx.copyright));
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Body for the search page, wrapped by [`render_page_shell`] like any
/// other page.
pub(crate) fn search_page_body() -> String {
    let mut html = String::with_capacity(SEARCH_SCRIPT.len() + 256);
    html.push_str("<h1>Search</h1>\n");
    html.push_str("<noscript><p>Search requires JavaScript.</p></noscript>\n");
    html.push_str("<ul id=\"search-results\"></ul>\n");
    html.push_str("<script>\n");
    html.push_str(SEARCH_SCRIPT);
    html.push_str("</script>\n");
    html
}

fn render_header(html: &mut String, ctx: &PageContext<'_>) {
    html.push_str("<header class=\"site-header\">\n");
    let _ = write!(
        html,
        "<a class=\"brand\" href=\"{}index.html\">{}",
        ctx.root,
        escape_html(ctx.project)
    );
    if !ctx.release.is_empty() {
        let _ = write!(
            html,
            " <span class=\"release\">{}</span>",
            escape_html(ctx.release)
        );
    }
    html.push_str("</a>\n<nav>\n");
    if ctx.use_index {
        let _ = writeln!(html, "<a href=\"{}genindex.html\">Index</a>", ctx.root);
    }
    if ctx.search {
        let _ = writeln!(
            html,
            "<form class=\"search\" action=\"{}search.html\" method=\"get\">\n\
             <input type=\"search\" name=\"q\" placeholder=\"Search docs\" \
             aria-label=\"Search docs\">\n</form>",
            ctx.root
        );
    }
    html.push_str("</nav>\n</header>\n");
}

fn render_toc(html: &mut String, toc: &[TocEntry]) {
    if toc.is_empty() {
        return;
    }
    html.push_str("<aside class=\"toc\">\n<h3>On this page</h3>\n<ul>\n");
    for entry in toc {
        let class = if entry.level >= 3 {
            " class=\"toc-sub\""
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<li{}><a href=\"#{}\">{}</a></li>",
            class,
            escape_html(&entry.id),
            escape_html(&entry.title),
        );
    }
    html.push_str("</ul>\n</aside>\n");
}

fn script_src(root: &str, script: &str) -> String {
    if script.starts_with("http://") || script.starts_with("https://") || script.starts_with("//") {
        escape_html(script)
    } else {
        format!("{root}_static/{}", escape_html(script))
    }
}
