//! Single-pass directive processing.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use super::args::DirectiveArgs;
use super::container::ContainerDirective;
use super::context::DirectiveContext;
use super::fence::FenceTracker;
use super::inline::InlineDirective;
use super::leaf::LeafDirective;
use super::output::DirectiveOutput;
use super::parser::{self, ParsedBlock, ParsedSpan};

/// File reader used when directives pull in other sources.
pub type ReadFileFn = dyn Fn(&Path) -> io::Result<String> + Send;

fn read_file_default(path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
}

/// Settings shared by all handlers of one processor.
pub struct DirectiveProcessorConfig {
    base_dir: PathBuf,
    source_path: Option<PathBuf>,
    read_file: Option<Box<ReadFileFn>>,
    max_expand_depth: usize,
}

impl Default for DirectiveProcessorConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            source_path: None,
            read_file: None,
            max_expand_depth: 10,
        }
    }
}

impl DirectiveProcessorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory that relative paths resolve against.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Path of the page being processed, used for diagnostics and for
    /// resolving paths relative to the page.
    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    /// Replace the file reader. Defaults to reading from disk.
    #[must_use]
    pub fn with_read_file(mut self, read_file: Box<ReadFileFn>) -> Self {
        self.read_file = Some(read_file);
        self
    }

    /// Limit on nested markdown expansion, guarding against include
    /// cycles.
    #[must_use]
    pub fn with_max_expand_depth(mut self, depth: usize) -> Self {
        self.max_expand_depth = depth;
        self
    }

    fn context(&self, line: usize) -> DirectiveContext<'_> {
        let read_file: &dyn Fn(&Path) -> io::Result<String> = match &self.read_file {
            Some(read_file) => read_file.as_ref(),
            None => &read_file_default,
        };
        DirectiveContext {
            source_path: self.source_path.as_deref(),
            base_dir: &self.base_dir,
            line,
            read_file,
        }
    }
}

/// Expands directives in markdown source.
///
/// Handlers are registered once, before processing, under the name
/// they answer to. Registering a name twice replaces the earlier
/// handler. Occurrences of unregistered names pass through unchanged.
pub struct DirectiveProcessor {
    inline: HashMap<String, Box<dyn InlineDirective>>,
    leaf: HashMap<String, Box<dyn LeafDirective>>,
    containers: HashMap<String, Box<dyn ContainerDirective>>,
    /// Names of currently open containers, innermost last.
    open: Vec<String>,
    fence: FenceTracker,
    warnings: Vec<String>,
    config: DirectiveProcessorConfig,
}

impl Default for DirectiveProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveProcessor {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DirectiveProcessorConfig::default())
    }

    #[must_use]
    pub fn with_config(config: DirectiveProcessorConfig) -> Self {
        Self {
            inline: HashMap::new(),
            leaf: HashMap::new(),
            containers: HashMap::new(),
            open: Vec::new(),
            fence: FenceTracker::new(),
            warnings: Vec::new(),
            config,
        }
    }

    /// Register an inline directive handler.
    #[must_use]
    pub fn with_inline(mut self, directive: impl InlineDirective + 'static) -> Self {
        self.inline
            .insert(directive.name().to_owned(), Box::new(directive));
        self
    }

    /// Register a leaf directive handler.
    #[must_use]
    pub fn with_leaf(mut self, directive: impl LeafDirective + 'static) -> Self {
        self.leaf
            .insert(directive.name().to_owned(), Box::new(directive));
        self
    }

    /// Register a container directive handler.
    #[must_use]
    pub fn with_container(mut self, directive: impl ContainerDirective + 'static) -> Self {
        self.containers
            .insert(directive.name().to_owned(), Box::new(directive));
        self
    }

    /// Expand all directives in one document.
    pub fn process(&mut self, content: &str) -> String {
        self.open.clear();
        self.fence = FenceTracker::new();
        self.warnings.clear();

        let mut output = self.process_with_depth(content, 0);

        // Containers still open at end of input are flushed so their
        // content is not silently lost.
        let last_line = content.lines().count();
        while let Some(name) = self.open.pop() {
            self.warnings.push(format!(
                "unclosed container directive :::{name} (missing closing :::)"
            ));
            let ended = self
                .containers
                .get_mut(&name)
                .and_then(|handler| handler.end(last_line));
            self.drain_container_warnings(&name);
            if let Some(html) = ended {
                output.push_str(&html);
                output.push('\n');
            }
        }
        output
    }

    /// Warnings from the most recent [`process`](Self::process) call.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn process_with_depth(&mut self, content: &str, depth: usize) -> String {
        if depth > self.config.max_expand_depth {
            self.warnings.push(format!(
                "maximum directive expansion depth ({}) exceeded",
                self.config.max_expand_depth
            ));
            return content.to_owned();
        }
        let mut output = String::with_capacity(content.len());
        for (index, line) in content.lines().enumerate() {
            if let Some(processed) = self.handle_line(line, index + 1, depth) {
                output.push_str(&processed);
                output.push('\n');
            }
        }
        output
    }

    /// Process one line. `None` means the line was consumed by a
    /// capturing container and contributes nothing to the output.
    fn handle_line(&mut self, line: &str, line_num: usize, depth: usize) -> Option<String> {
        let capturing = self
            .open
            .last()
            .filter(|name| {
                self.containers
                    .get(name.as_str())
                    .is_some_and(|handler| handler.captures_body())
            })
            .cloned();
        if let Some(name) = capturing {
            if let Some(ParsedBlock::End { colons }) = parser::parse_block_line(line) {
                return self.close_container(line_num, colons);
            }
            if let Some(handler) = self.containers.get_mut(&name) {
                handler.capture(line, line_num);
            }
            return None;
        }

        self.fence.update(line);
        if self.fence.in_fence() {
            return Some(line.to_owned());
        }

        match parser::parse_block_line(line) {
            Some(ParsedBlock::Start { name, args }) => {
                self.open_container(name, args, line_num, depth)
            }
            Some(ParsedBlock::End { colons }) => self.close_container(line_num, colons),
            None => Some(self.expand_spans(line, line_num, depth)),
        }
    }

    fn open_container(
        &mut self,
        name: String,
        args: DirectiveArgs,
        line_num: usize,
        depth: usize,
    ) -> Option<String> {
        let syntax = args.to_syntax();
        let started = {
            let ctx = self.config.context(line_num);
            self.containers
                .get_mut(&name)
                .map(|handler| handler.start(args, &ctx))
        };
        if started.is_some() {
            self.drain_container_warnings(&name);
        }
        match started {
            Some(DirectiveOutput::Html(html)) => {
                self.open.push(name);
                Some(html)
            }
            Some(DirectiveOutput::Markdown(markdown)) => {
                self.open.push(name);
                Some(self.process_with_depth(&markdown, depth + 1))
            }
            Some(DirectiveOutput::Skip) | None => Some(format!(":::{name}{syntax}")),
        }
    }

    fn close_container(&mut self, line_num: usize, colons: usize) -> Option<String> {
        match self.open.pop() {
            Some(name) => {
                let ended = self
                    .containers
                    .get_mut(&name)
                    .and_then(|handler| handler.end(line_num));
                self.drain_container_warnings(&name);
                Some(ended.unwrap_or_default())
            }
            None => {
                self.warnings
                    .push(format!("line {line_num}: stray ::: without an open directive"));
                Some(":".repeat(colons))
            }
        }
    }

    fn expand_spans(&mut self, line: &str, line_num: usize, depth: usize) -> String {
        let mut result = String::with_capacity(line.len());
        let mut rest = line;
        while !rest.is_empty() {
            let Some((span, start, end)) = parser::parse_span(rest) else {
                result.push_str(rest);
                break;
            };
            result.push_str(&rest[..start]);
            let output = match span {
                ParsedSpan::Inline { name, args } => self.dispatch_inline(&name, args, line_num),
                ParsedSpan::Leaf { name, args } => self.dispatch_leaf(&name, args, line_num),
            };
            match output {
                DirectiveOutput::Html(html) => result.push_str(&html),
                DirectiveOutput::Markdown(markdown) => {
                    let processed = self.process_with_depth(&markdown, depth + 1);
                    result.push_str(processed.trim_end_matches('\n'));
                }
                DirectiveOutput::Skip => result.push_str(&rest[start..end]),
            }
            rest = &rest[end..];
        }
        result
    }

    fn dispatch_inline(
        &mut self,
        name: &str,
        args: DirectiveArgs,
        line_num: usize,
    ) -> DirectiveOutput {
        let output = {
            let ctx = self.config.context(line_num);
            self.inline
                .get_mut(name)
                .map(|handler| handler.process(args, &ctx))
        };
        match output {
            Some(out) => {
                if let Some(handler) = self.inline.get_mut(name) {
                    self.warnings.extend(handler.take_warnings());
                }
                out
            }
            None => DirectiveOutput::Skip,
        }
    }

    fn dispatch_leaf(
        &mut self,
        name: &str,
        args: DirectiveArgs,
        line_num: usize,
    ) -> DirectiveOutput {
        let output = {
            let ctx = self.config.context(line_num);
            self.leaf
                .get_mut(name)
                .map(|handler| handler.process(args, &ctx))
        };
        match output {
            Some(out) => {
                if let Some(handler) = self.leaf.get_mut(name) {
                    self.warnings.extend(handler.take_warnings());
                }
                out
            }
            None => DirectiveOutput::Skip,
        }
    }

    fn drain_container_warnings(&mut self, name: &str) {
        if let Some(handler) = self.containers.get_mut(name) {
            let drained = handler.take_warnings();
            self.warnings.extend(drained);
        }
    }
}
