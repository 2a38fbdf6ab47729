//! Parameters table directive.

use crate::directive::{ContainerDirective, DirectiveArgs, DirectiveContext, DirectiveOutput};

use super::list_table::ListTableDirective;

/// Summary attribute pinned onto every parameters table.
const SUMMARY: &str = "The first column displays the name of the parameter. The second column \
    displays the parameter's mode. The third column displays the description of the parameter.";

/// Heading row prepended before the author's rows, in list table row
/// syntax.
const HEADINGS: [&str; 3] = ["* - Parameter", "  - Mode", "  - Description"];

const HEADER_ROWS: &str = "1";
const WIDTHS: &str = "10 5 35";
const TABLE_CLASS: &str = "wy-table-responsive";

/// Three column parameter table used by function reference pages.
///
/// Wraps [`ListTableDirective`] and pins its presentation: the summary
/// text, a single header row, the 10/5/35 width split, and the
/// responsive table class are always applied, replacing whatever the
/// author wrote for those options. The Parameter/Mode/Description
/// heading row is prepended ahead of the author's rows, which are kept
/// in source order. Options the list table does not define pass
/// through untouched.
///
/// Registered under the name `parameters-table`:
///
/// ```text
/// :::parameters-table
/// * - handle
///   - in
///   - the connection handle
/// :::
/// ```
pub struct ParametersTableDirective {
    inner: ListTableDirective,
}

impl ParametersTableDirective {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: ListTableDirective::new(),
        }
    }

    /// Overwrite the presentation options, discarding author values
    /// for them.
    fn force_options(args: &mut DirectiveArgs) {
        args.attrs.insert("summary".to_owned(), SUMMARY.to_owned());
        args.attrs
            .insert("header-rows".to_owned(), HEADER_ROWS.to_owned());
        args.attrs.insert("widths".to_owned(), WIDTHS.to_owned());
        args.attrs.remove("class");
        args.classes = vec![TABLE_CLASS.to_owned()];
    }
}

impl Default for ParametersTableDirective {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerDirective for ParametersTableDirective {
    fn name(&self) -> &str {
        "parameters-table"
    }

    fn start(&mut self, mut args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput {
        Self::force_options(&mut args);
        let output = self.inner.start(args, ctx);
        for line in HEADINGS {
            self.inner.capture(line, ctx.line);
        }
        output
    }

    fn captures_body(&self) -> bool {
        true
    }

    fn capture(&mut self, line: &str, line_num: usize) {
        self.inner.capture(line, line_num);
    }

    fn end(&mut self, line_num: usize) -> Option<String> {
        self.inner.end(line_num)
    }

    fn take_warnings(&mut self) -> Vec<String> {
        self.inner.take_warnings()
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::directive::DirectiveProcessor;

    fn process(source: &str) -> (String, Vec<String>) {
        let mut processor =
            DirectiveProcessor::new().with_container(ParametersTableDirective::new());
        let html = processor.process(source);
        let warnings = processor.warnings().to_vec();
        (html, warnings)
    }

    fn read_nothing(_: &Path) -> io::Result<String> {
        Ok(String::new())
    }

    fn test_ctx<'a>(read_file: &'a dyn Fn(&Path) -> io::Result<String>) -> DirectiveContext<'a> {
        DirectiveContext {
            source_path: None,
            base_dir: Path::new("."),
            line: 1,
            read_file,
        }
    }

    #[test]
    fn renders_fixed_presentation_and_headings() {
        let (html, warnings) = process(
            ":::parameters-table\n\
             * - x\n\
             \x20 - in\n\
             \x20 - the x parameter\n\
             :::",
        );
        assert_eq!(
            html,
            "\n<table class=\"wy-table-responsive\" summary=\"The first column displays the \
             name of the parameter. The second column displays the parameter&#39;s mode. The \
             third column displays the description of the parameter.\">\
             <colgroup><col style=\"width: 20%\"><col style=\"width: 10%\">\
             <col style=\"width: 70%\"></colgroup>\
             <thead><tr><th>Parameter</th><th>Mode</th><th>Description</th></tr></thead>\
             <tbody><tr><td>x</td><td>in</td><td>the x parameter</td></tr></tbody></table>\n"
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn author_presentation_options_are_discarded() {
        let (html, _) = process(
            ":::parameters-table{.custom summary=\"mine\" header-rows=\"3\" widths=\"1 1 1\" \
             class=\"extra\"}\n\
             * - a\n  - in\n  - first\n\
             * - b\n  - out\n  - second\n\
             :::",
        );
        assert!(html.contains("class=\"wy-table-responsive\""));
        assert!(!html.contains("custom"));
        assert!(!html.contains("extra"));
        assert!(html.contains("summary=\"The first column"));
        assert!(html.contains("<col style=\"width: 20%\">"));
        // One forced header row, both author rows in the body.
        assert!(html.contains("<tbody><tr><td>a</td>"));
        assert!(html.contains("<td>second</td>"));
    }

    #[test]
    fn author_rows_keep_source_order() {
        let (html, _) = process(
            ":::parameters-table\n\
             * - first\n  - in\n  - one\n\
             * - second\n  - out\n  - two\n\
             :::",
        );
        let heading = html.find("<th>Parameter</th>").unwrap();
        let first = html.find("<td>first</td>").unwrap();
        let second = html.find("<td>second</td>").unwrap();
        assert!(heading < first);
        assert!(first < second);
    }

    #[test]
    fn empty_body_renders_header_only_table() {
        let (html, warnings) = process(":::parameters-table\n:::");
        assert!(html.contains(
            "<thead><tr><th>Parameter</th><th>Mode</th><th>Description</th></tr></thead>\
             <tbody></tbody>"
        ));
        assert!(warnings.is_empty());
    }

    #[test]
    fn unknown_options_pass_through_untouched() {
        let mut args = DirectiveArgs::parse("", "align=\"left\" summary=\"mine\" class=\"x\"");
        ParametersTableDirective::force_options(&mut args);
        assert_eq!(args.get("align"), Some("left"));
        assert_eq!(args.get("summary"), Some(SUMMARY));
        assert_eq!(args.get("header-rows"), Some("1"));
        assert_eq!(args.get("widths"), Some("10 5 35"));
        assert_eq!(args.get("class"), None);
        assert_eq!(args.classes, vec![TABLE_CLASS]);
    }

    #[test]
    fn starting_twice_prepends_headings_twice() {
        let read = read_nothing;
        let ctx = test_ctx(&read);
        let mut directive = ParametersTableDirective::new();
        let _ = directive.start(DirectiveArgs::default(), &ctx);
        let _ = directive.start(DirectiveArgs::default(), &ctx);
        let html = directive.end(1).unwrap();
        assert!(html.contains("<th>Parameter</th>"));
        assert!(html.contains("<td>Parameter</td>"));
    }

    #[test]
    fn cell_markdown_is_rendered() {
        let (html, _) = process(
            ":::parameters-table\n\
             * - `conn`\n  - in\n  - an **open** connection\n\
             :::",
        );
        assert!(html.contains("<td><code>conn</code></td>"));
        assert!(html.contains("<td>an <strong>open</strong> connection</td>"));
    }
}
