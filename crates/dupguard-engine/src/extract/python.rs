//! Python function extraction using tree-sitter-python

use std::borrow::Cow;
use std::path::Path;

use dupguard_domain::{Error, FunctionRecord, FunctionSource, Result};
use tree_sitter::{Node, Parser};

use super::{MAX_TRAVERSAL_DEPTH, normalize_code};

const FUNCTION_NODE: &str = "function_definition";

/// Extracts every `def` / `async def` in a Python file
///
/// Nested functions, methods and decorated functions are all reported. A
/// parser is created per call, so one extractor can serve several threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonFunctionExtractor {
    normalize_bodies: bool,
}

impl PythonFunctionExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store bodies passed through [`normalize_code`]
    pub fn with_normalized_bodies(mut self, normalize: bool) -> Self {
        self.normalize_bodies = normalize;
        self
    }

    fn parser(file_path: &str) -> Result<Parser> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| Error::parse(file_path, format!("Failed to load Python grammar: {e}")))?;
        Ok(parser)
    }

    fn record_for(
        &self,
        node: Node<'_>,
        content: &str,
        lines: &[&str],
        file_path: &str,
    ) -> Result<FunctionRecord> {
        let source = content.as_bytes();

        let name = node
            .child_by_field_name("name")
            .map(|n| node_text(n, source))
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::parse(file_path, "Function definition without a name"))?;

        let line_start = node.start_position().row + 1;
        let end = node.end_position();
        // A node that stops at column 0 ends on the previous line
        let line_end = if end.column == 0 && end.row > node.start_position().row {
            end.row
        } else {
            end.row + 1
        };

        let body_lines = lines
            .get(line_start - 1..line_end.min(lines.len()))
            .unwrap_or_default();
        let body = body_lines.join("\n");
        let body = if self.normalize_bodies {
            normalize_code(&body)
        } else {
            body
        };

        FunctionRecord::new(
            name,
            file_path,
            line_start,
            line_end,
            signature(node, source, name),
            body,
        )
    }
}

impl FunctionSource for PythonFunctionExtractor {
    fn language(&self) -> &'static str {
        "python"
    }

    fn supports(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "py")
    }

    fn extract_from_content(&self, content: &str, file_path: &str) -> Result<Vec<FunctionRecord>> {
        let content = normalize_newlines(content);
        let content: &str = &content;

        let mut parser = Self::parser(file_path)?;
        let tree = parser
            .parse(content, None)
            .ok_or_else(|| Error::parse(file_path, "Failed to parse Python code"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(Error::parse(file_path, "Syntax error in Python source"));
        }

        let lines: Vec<&str> = content.split('\n').collect();
        let mut records = Vec::new();
        let mut skipped_subtrees = 0usize;

        // Pre-order walk with an explicit stack; children are pushed in
        // reverse so functions come out in source order.
        let mut stack: Vec<(Node<'_>, usize)> = vec![(root, 0)];
        while let Some((node, depth)) = stack.pop() {
            if node.kind() == FUNCTION_NODE {
                records.push(self.record_for(node, content, &lines, file_path)?);
            }

            if depth >= MAX_TRAVERSAL_DEPTH {
                if node.child_count() > 0 {
                    skipped_subtrees += 1;
                }
                continue;
            }

            let mut cursor = node.walk();
            let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }

        if skipped_subtrees > 0 {
            tracing::warn!(
                file = file_path,
                skipped_subtrees,
                max_depth = MAX_TRAVERSAL_DEPTH,
                "Syntax tree truncated at maximum depth; functions below it were not extracted"
            );
        }

        tracing::debug!(file = file_path, functions = records.len(), "Extracted functions");
        Ok(records)
    }
}

/// `\r\n` and lone `\r` become `\n`, so bodies do not depend on the file's line endings
fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    }
}

/// `[async ]def name(params)[ -> ret]`
///
/// Parameters keep names, annotations and `*` / `**` markers; defaults and
/// bare `*` / `/` separators are dropped.
fn signature(node: Node<'_>, source: &[u8], name: &str) -> String {
    let mut cursor = node.walk();
    let is_async = node.children(&mut cursor).any(|c| c.kind() == "async");

    let params: Vec<String> = node
        .child_by_field_name("parameters")
        .map(|parameters| {
            let mut cursor = parameters.walk();
            parameters
                .named_children(&mut cursor)
                .filter_map(|param| parameter(param, source))
                .collect()
        })
        .unwrap_or_default();

    let mut signature = format!(
        "{}def {}({})",
        if is_async { "async " } else { "" },
        name,
        params.join(", ")
    );
    if let Some(ret) = node.child_by_field_name("return_type") {
        signature.push_str(" -> ");
        signature.push_str(node_text(ret, source));
    }
    signature
}

fn parameter(param: Node<'_>, source: &[u8]) -> Option<String> {
    let annotated = |name: &str| match param.child_by_field_name("type") {
        Some(ty) => format!("{name}: {}", node_text(ty, source)),
        None => name.to_string(),
    };

    match param.kind() {
        "identifier" | "list_splat_pattern" | "dictionary_splat_pattern" => {
            Some(node_text(param, source).to_string())
        }
        "default_parameter" | "typed_default_parameter" => {
            let name = param.child_by_field_name("name")?;
            Some(annotated(node_text(name, source)))
        }
        "typed_parameter" => {
            let mut cursor = param.walk();
            let name = param.named_children(&mut cursor).next()?;
            Some(annotated(node_text(name, source)))
        }
        _ => None,
    }
}

fn node_text<'s>(node: Node<'_>, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or_default()
}
