//! TypeScript/JavaScript dependency extraction using Tree-sitter.
//!
//! [`TsExtractor`] walks the whole syntax tree pre-order: the recognized
//! reference shapes yield [`Dependency`] records, everything else is inert
//! but traversable, so references nested inside arbitrary expressions are
//! still found. Malformed references never abort extraction; they surface
//! as [`Diagnostic`]s on the returned [`Extraction`].

use serde::{Deserialize, Serialize};
use tree_sitter::{Language, Node, Parser};

use crate::types::{Dependency, DependencyKind};

/// Everything extracted from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// All module references found, in traversal order.
    pub dependencies: Vec<Dependency>,
    /// Skipped or malformed references.
    pub diagnostics: Vec<Diagnostic>,
}

/// Why a reference was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Export clause without a module specifier (local re-export).
    MissingSpecifier,
    /// Specifier is an empty string literal.
    EmptySpecifier,
    /// Dynamic reference whose argument is not a plain string literal.
    NonLiteralSpecifier,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSpecifier => write!(f, "missing specifier"),
            Self::EmptySpecifier => write!(f, "empty specifier"),
            Self::NonLiteralSpecifier => write!(f, "non-literal specifier"),
        }
    }
}

/// A skipped reference, with the offending source text for context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What was wrong.
    pub kind: DiagnosticKind,
    /// Snippet of the offending node.
    pub context: String,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, node: Node<'_>, src: &[u8]) -> Self {
        Self {
            kind,
            context: snippet(node, src),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.context)
    }
}

/// Extracts module references from TypeScript and JavaScript source.
pub struct TsExtractor {
    language: Language,
}

impl TsExtractor {
    /// Creates a new extractor.
    ///
    /// The TypeScript grammar also covers plain JavaScript, so one grammar
    /// serves both `.ts` and `.js` files.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        }
    }

    /// Extracts every module reference in `source`.
    #[must_use]
    pub fn extract(&self, source: &str) -> Extraction {
        let mut parser = Parser::new();
        if parser.set_language(&self.language).is_err() {
            return Extraction::default();
        }
        let Some(tree) = parser.parse(source, None) else {
            return Extraction::default();
        };

        let mut out = Extraction::default();
        visit(tree.root_node(), source.as_bytes(), &mut out);
        out
    }
}

impl Default for TsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn visit(node: Node<'_>, src: &[u8], out: &mut Extraction) {
    match node.kind() {
        "import_statement" => import_statement(node, src, out),
        "export_statement" => export_statement(node, src, out),
        "call_expression" => call_expression(node, src, out),
        _ => visit_children(node, src, out),
    }
}

fn visit_children(node: Node<'_>, src: &[u8], out: &mut Extraction) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, src, out);
    }
}

fn import_statement(node: Node<'_>, src: &[u8], out: &mut Extraction) {
    // `import x = require("y")` carries its specifier on the require clause,
    // not on the statement; it yields no dependency, like any other
    // unrecognized shape.
    let Some(source) = node.child_by_field_name("source") else {
        return;
    };
    let Some(specifier) = string_literal(source, src) else {
        return;
    };
    if specifier.is_empty() {
        out.diagnostics
            .push(Diagnostic::new(DiagnosticKind::EmptySpecifier, node, src));
        return;
    }

    out.dependencies.push(Dependency::new(
        DependencyKind::Import,
        import_is_type_only(node),
        specifier,
    ));
}

fn export_statement(node: Node<'_>, src: &[u8], out: &mut Extraction) {
    let Some(source) = node.child_by_field_name("source") else {
        if first_child_of_kind(node, "export_clause").is_some() {
            // `export { a }` re-exports local bindings only
            out.diagnostics
                .push(Diagnostic::new(DiagnosticKind::MissingSpecifier, node, src));
        } else {
            // exported declarations may nest dynamic references
            visit_children(node, src, out);
        }
        return;
    };
    let Some(specifier) = string_literal(source, src) else {
        return;
    };
    if specifier.is_empty() {
        out.diagnostics
            .push(Diagnostic::new(DiagnosticKind::EmptySpecifier, node, src));
        return;
    }

    out.dependencies.push(Dependency::new(
        DependencyKind::ReExport,
        export_is_type_only(node),
        specifier,
    ));
}

fn call_expression(node: Node<'_>, src: &[u8], out: &mut Extraction) {
    if !is_dynamic_callee(node, src) {
        visit_children(node, src, out);
        return;
    }

    let argument = first_call_argument(node);
    let Some(specifier) = argument.and_then(|arg| string_literal(arg, src)) else {
        out.diagnostics.push(Diagnostic::new(
            DiagnosticKind::NonLiteralSpecifier,
            node,
            src,
        ));
        visit_children(node, src, out);
        return;
    };
    if specifier.is_empty() {
        out.diagnostics
            .push(Diagnostic::new(DiagnosticKind::EmptySpecifier, node, src));
        return;
    }

    // dynamic references always have a run-time effect
    out.dependencies
        .push(Dependency::new(DependencyKind::DynamicCall, false, specifier));
}

fn is_dynamic_callee(call: Node<'_>, src: &[u8]) -> bool {
    let Some(callee) = call.child_by_field_name("function") else {
        return false;
    };
    match callee.kind() {
        "import" => true,
        "identifier" => callee.utf8_text(src).is_ok_and(|text| text == "require"),
        _ => false,
    }
}

fn first_call_argument(call: Node<'_>) -> Option<Node<'_>> {
    let arguments = call.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();
    let result = arguments
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    result
}

/// Type-only when the `type` keyword sits on the statement itself
/// (`import type { X }`, `import type * as X`), or when every named binding
/// inside the braces carries its own `type` marker. Any value binding makes
/// the import a value import.
fn import_is_type_only(node: Node<'_>) -> bool {
    if has_token(node, "type") {
        return true;
    }
    let Some(clause) = first_child_of_kind(node, "import_clause") else {
        return false;
    };
    if first_child_of_kind(clause, "identifier").is_some()
        || first_child_of_kind(clause, "namespace_import").is_some()
    {
        return false;
    }
    let Some(named) = first_child_of_kind(clause, "named_imports") else {
        return false;
    };
    let (total, marked) = specifier_counts(named, "import_specifier");
    total > 0 && total == marked
}

fn export_is_type_only(node: Node<'_>) -> bool {
    if has_token(node, "type") {
        return true;
    }
    let Some(clause) = first_child_of_kind(node, "export_clause") else {
        return false;
    };
    let (total, marked) = specifier_counts(clause, "export_specifier");
    total > 0 && total == marked
}

fn specifier_counts(container: Node<'_>, specifier_kind: &str) -> (usize, usize) {
    let mut total = 0;
    let mut marked = 0;
    let mut cursor = container.walk();
    for child in container.children(&mut cursor) {
        if child.kind() == specifier_kind {
            total += 1;
            if has_token(child, "type") {
                marked += 1;
            }
        }
    }
    (total, marked)
}

fn has_token(node: Node<'_>, kind: &str) -> bool {
    let mut cursor = node.walk();
    let result = node.children(&mut cursor).any(|child| child.kind() == kind);
    result
}

fn first_child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let result = node.children(&mut cursor).find(|child| child.kind() == kind);
    result
}

fn string_literal(node: Node<'_>, src: &[u8]) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }
    let text = node.utf8_text(src).ok()?;
    Some(
        text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
            .to_string(),
    )
}

fn snippet(node: Node<'_>, src: &[u8]) -> String {
    node.utf8_text(src)
        .unwrap_or_default()
        .chars()
        .take(80)
        .collect()
}
