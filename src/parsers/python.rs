use tracing::debug;
use tree_sitter::Node as TSNode;

use super::common::{extract_text, find_child_by_kind, line_of, TreeSitterParser};
use super::LanguageExtractor;
use crate::core::{ClassInfo, Extraction, FunctionInfo, ReferenceKind};

/// AST-based extractor for Python sources.
pub struct PythonExtractor;

impl PythonExtractor {
    pub fn new() -> Self {
        Self
    }

    fn walk(&self, node: &TSNode, source: &[u8], out: &mut Extraction) {
        match node.kind() {
            "function_definition" => self.process_function(node, source, out),
            "class_definition" => self.process_class(node, source, out),
            "import_statement" => self.process_import(node, source, out),
            "import_from_statement" => self.process_import_from(node, source, out),
            "future_import_statement" => out.imports.push("__future__".to_string()),
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.walk(&child, source, out);
        }
    }

    fn process_function(&self, func_node: &TSNode, source: &[u8], out: &mut Extraction) {
        let Some(name_node) = func_node.child_by_field_name("name") else {
            return;
        };
        let mut info = FunctionInfo::new(extract_text(&name_node, source), line_of(func_node))
            .with_args(self.positional_args(func_node, source));
        if let Some(docstring) = extract_docstring(func_node, source) {
            info = info.with_docstring(docstring);
        }
        out.functions.push(info);
    }

    /// Positional parameter names, stopping at `*` or `*args`.
    fn positional_args(&self, func_node: &TSNode, source: &[u8]) -> Vec<String> {
        let mut args = Vec::new();
        let Some(params) = func_node.child_by_field_name("parameters") else {
            return args;
        };

        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            let name = match param.kind() {
                "identifier" => Some(param),
                "typed_parameter" => find_child_by_kind(&param, "identifier"),
                "default_parameter" | "typed_default_parameter" => {
                    param.child_by_field_name("name")
                }
                "list_splat_pattern" | "keyword_separator" | "dictionary_splat_pattern" => break,
                _ => None,
            };
            if let Some(name) = name {
                args.push(extract_text(&name, source).to_string());
            }
        }
        args
    }

    fn process_class(&self, class_node: &TSNode, source: &[u8], out: &mut Extraction) {
        let Some(name_node) = class_node.child_by_field_name("name") else {
            return;
        };
        let mut class = ClassInfo::new(extract_text(&name_node, source), line_of(class_node));
        if let Some(docstring) = extract_docstring(class_node, source) {
            class = class.with_docstring(docstring);
        }

        if let Some(body) = class_node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for child in body.named_children(&mut cursor) {
                let definition = if child.kind() == "decorated_definition" {
                    child.child_by_field_name("definition")
                } else {
                    Some(child)
                };
                if let Some(def) = definition.filter(|d| d.kind() == "function_definition") {
                    if let Some(name) = def.child_by_field_name("name") {
                        class.methods.push(extract_text(&name, source).to_string());
                    }
                }
            }
        }

        out.classes.push(class);
    }

    fn process_import(&self, import_node: &TSNode, source: &[u8], out: &mut Extraction) {
        let line = line_of(import_node);
        let mut cursor = import_node.walk();
        for name in import_node.children_by_field_name("name", &mut cursor) {
            let dotted = match name.kind() {
                "aliased_import" => name.child_by_field_name("name"),
                _ => Some(name),
            };
            if let Some(dotted) = dotted {
                let module = extract_text(&dotted, source);
                out.imports.push(module.to_string());
                out.add_dependency(ReferenceKind::Import, module.replace('.', "/"), line);
            }
        }
    }

    fn process_import_from(&self, import_node: &TSNode, source: &[u8], out: &mut Extraction) {
        let line = line_of(import_node);
        let Some(module_node) = import_node.child_by_field_name("module_name") else {
            return;
        };
        let module_text = extract_text(&module_node, source);
        let level = module_text.chars().take_while(|c| *c == '.').count();
        let module = &module_text[level..];

        if !module.is_empty() {
            out.imports.push(module.to_string());
            out.add_dependency(
                ReferenceKind::Import,
                relative_module_path(level, module),
                line,
            );
            return;
        }

        // `from . import a, b` names sibling modules.
        let mut cursor = import_node.walk();
        for name in import_node.children_by_field_name("name", &mut cursor) {
            let dotted = match name.kind() {
                "aliased_import" => name.child_by_field_name("name"),
                _ => Some(name),
            };
            if let Some(dotted) = dotted {
                let sibling = extract_text(&dotted, source);
                out.imports.push(sibling.to_string());
                out.add_dependency(
                    ReferenceKind::Import,
                    relative_module_path(level, sibling),
                    line,
                );
            }
        }
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// `level` leading dots plus a dotted module, as a relative slash path.
fn relative_module_path(level: usize, module: &str) -> String {
    let module = module.replace('.', "/");
    match level {
        0 => module,
        1 => format!("./{module}"),
        n => format!("{}{module}", "../".repeat(n - 1)),
    }
}

/// First-statement string literal of a function or class body, with quotes
/// and common indentation removed.
pub fn extract_docstring(node: &TSNode, source: &[u8]) -> Option<String> {
    let body = node.child_by_field_name("body")?;
    let first = body.named_child(0)?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let literal = first.named_child(0)?;
    if literal.kind() != "string" {
        return None;
    }
    Some(clean_docstring(extract_text(&literal, source)))
}

fn clean_docstring(literal: &str) -> String {
    let unprefixed = literal.trim_start_matches(|c: char| "rRuUbBfF".contains(c));
    let inner = ["\"\"\"", "'''", "\"", "'"]
        .iter()
        .find(|q| {
            unprefixed.starts_with(**q)
                && unprefixed.ends_with(**q)
                && unprefixed.len() >= 2 * q.len()
        })
        .map(|q| &unprefixed[q.len()..unprefixed.len() - q.len()])
        .unwrap_or(unprefixed);

    let mut lines = inner.lines();
    let first = lines.next().unwrap_or("").trim().to_string();
    let rest: Vec<&str> = lines.collect();
    let indent = rest
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned = vec![first];
    cleaned.extend(
        rest.iter()
            .map(|l| l.get(indent..).unwrap_or("").trim_end().to_string()),
    );
    cleaned.join("\n").trim().to_string()
}

impl LanguageExtractor for PythonExtractor {
    fn extract(&self, content: &str, path: &str) -> Extraction {
        let mut parser = match TreeSitterParser::new(tree_sitter_python::language()) {
            Ok(parser) => parser,
            Err(err) => {
                debug!("python grammar unavailable for {path}: {err}");
                return Extraction::default();
            }
        };
        let Some(tree) = parser.parse_clean(content) else {
            debug!("{path}: syntax errors, structure left empty");
            return Extraction::default();
        };

        let mut out = Extraction::default();
        self.walk(&tree.root_node(), content.as_bytes(), &mut out);
        out
    }

    fn language_name(&self) -> &str {
        "python"
    }
}
