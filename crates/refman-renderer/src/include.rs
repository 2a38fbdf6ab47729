//! Source inclusion.

use crate::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput, LeafDirective};

/// Splices another markdown file into the page: `::include[path.md]`.
///
/// The path resolves relative to the including page and may not escape
/// the source tree. Included content is processed again, so directives
/// inside it work, including further includes up to the processor's
/// expansion depth limit. Failures leave the directive in place and
/// record a warning instead of aborting the page.
#[derive(Default)]
pub struct IncludeDirective {
    warnings: Vec<String>,
}

impl IncludeDirective {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeafDirective for IncludeDirective {
    fn name(&self) -> &str {
        "include"
    }

    fn process(&mut self, args: DirectiveArgs, ctx: &DirectiveContext) -> DirectiveOutput {
        let target = args.content.trim();
        if target.is_empty() {
            self.warnings
                .push(format!("line {}: include without a path", ctx.line));
            return DirectiveOutput::Skip;
        }
        let path = match ctx.resolve_path_safe(target) {
            Ok(path) => path,
            Err(err) => {
                self.warnings
                    .push(format!("line {}: cannot include {target}: {err}", ctx.line));
                return DirectiveOutput::Skip;
            }
        };
        match ctx.read(&path) {
            Ok(content) => DirectiveOutput::markdown(content),
            Err(err) => {
                self.warnings
                    .push(format!("line {}: cannot include {target}: {err}", ctx.line));
                DirectiveOutput::Skip
            }
        }
    }

    fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::directive::{DirectiveProcessor, DirectiveProcessorConfig};

    fn processor_for(base_dir: &Path) -> DirectiveProcessor {
        let config = DirectiveProcessorConfig::new().with_base_dir(base_dir);
        DirectiveProcessor::with_config(config).with_leaf(IncludeDirective::new())
    }

    #[test]
    fn includes_file_content() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("frag.md"), "shared text").unwrap();

        let mut processor = processor_for(dir.path());
        assert_eq!(processor.process("::include[frag.md]"), "shared text\n");
        assert!(processor.warnings().is_empty());
    }

    #[test]
    fn nested_includes_expand() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("outer.md"), "before\n::include[inner.md]").unwrap();
        fs::write(dir.path().join("inner.md"), "innermost").unwrap();

        let mut processor = processor_for(dir.path());
        let output = processor.process("::include[outer.md]");
        assert_eq!(output, "before\ninnermost\n");
    }

    #[test]
    fn missing_file_warns_and_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let mut processor = processor_for(dir.path());
        assert_eq!(processor.process("::include[nope.md]"), "::include[nope.md]\n");
        assert_eq!(processor.warnings().len(), 1);
        assert!(processor.warnings()[0].contains("cannot include nope.md"));
    }

    #[test]
    fn paths_outside_the_source_tree_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir(&docs).unwrap();
        fs::write(dir.path().join("secret.md"), "private").unwrap();

        let mut processor = processor_for(&docs);
        let output = processor.process("::include[../secret.md]");
        assert_eq!(output, "::include[../secret.md]\n");
        assert!(!output.contains("private"));
        assert_eq!(processor.warnings().len(), 1);
    }

    #[test]
    fn include_cycles_hit_the_depth_limit() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("loop.md"), "::include[loop.md]").unwrap();

        let mut processor = processor_for(dir.path());
        let output = processor.process("::include[loop.md]");
        assert!(output.contains("::include[loop.md]"));
        assert!(
            processor
                .warnings()
                .iter()
                .any(|w| w.contains("maximum directive expansion depth"))
        );
    }

    #[test]
    fn empty_path_warns() {
        let dir = tempfile::tempdir().unwrap();
        let mut processor = processor_for(dir.path());
        let _ = processor.process("::include");
        assert_eq!(processor.warnings(), ["line 1: include without a path"]);
    }
}
