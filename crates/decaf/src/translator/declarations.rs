//! Package, imports, type and method declarations, and type references.

use decaf_parser::{SyntaxKind, SyntaxNode};
use rowan::NodeOrToken;

use super::{child_node, child_token, first_token, significant_text, Translator};
use crate::convert::{
    convert_identifier, convert_method_name, convert_package_name, convert_type_name,
    try_convert_special_type,
};

/// Facts about a method header gathered before any of it is written.
///
/// Java puts type parameters and `@Override` in front of the result type;
/// C# wants the type parameters after the name and `override` among the
/// modifiers, with bounds as trailing `where` clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MethodHeaderFacts {
    /// Rendered type parameter list without bounds, e.g. `<T, U>`.
    pub(crate) type_parameters: Option<String>,
    pub(crate) has_override: bool,
    /// One `where T : Bound` clause per bounded type parameter.
    pub(crate) constraints: Vec<String>,
}

/// The C# built-in for a single-segment, non-generic CLASS_TYPE.
pub(super) fn special_class_type(node: &SyntaxNode) -> Option<&'static str> {
    if child_node(node, SyntaxKind::TYPE_ARGS).is_some() {
        return None;
    }
    let mut names = node
        .children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| t.kind() == SyntaxKind::IDENT);
    match (names.next(), names.next()) {
        (Some(name), None) => try_convert_special_type(name.text()),
        _ => None,
    }
}

/// Whether trivia sits between the first and last significant token.
fn has_inner_trivia(node: &SyntaxNode) -> bool {
    let trivia: Vec<bool> = node
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .map(|t| t.kind().is_trivia())
        .collect();
    match (
        trivia.iter().position(|&t| !t),
        trivia.iter().rposition(|&t| !t),
    ) {
        (Some(first), Some(last)) => trivia[first..=last].contains(&true),
        _ => false,
    }
}

fn is_override_annotation(annotation: &SyntaxNode) -> bool {
    child_node(annotation, SyntaxKind::QUALIFIED_NAME).is_some_and(|name| {
        let name = significant_text(&name);
        name == "Override" || name == "java.lang.Override"
    })
}

impl Translator<'_> {
    /// `package a.b;` sets the namespace and disappears.
    pub(super) fn package_decl(&mut self, node: &SyntaxNode) {
        if let Some(name) = child_node(node, SyntaxKind::QUALIFIED_NAME) {
            let namespace = convert_package_name(&significant_text(&name));
            self.globals.set_namespace(&namespace);
        }
        self.erase(node);
    }

    /// Imports become usings. The prefix of an on-demand import is always
    /// taken to be a package.
    pub(super) fn import_decl(&mut self, node: &SyntaxNode) {
        let is_static = child_token(node, SyntaxKind::STATIC_KW).is_some();
        let on_demand = child_token(node, SyntaxKind::STAR).is_some();
        if let Some(name) = child_node(node, SyntaxKind::QUALIFIED_NAME) {
            let name = significant_text(&name);
            let target = if on_demand {
                Some(name.as_str())
            } else {
                name.rsplit_once('.').map(|(prefix, _)| prefix)
            };
            if let Some(target) = target {
                let converted = convert_package_name(target);
                if is_static {
                    self.globals.add_using_static(&converted);
                } else {
                    self.globals.add_using(&converted);
                }
            }
        }
        self.erase(node);
    }

    /// `where` clauses for the bounded parameters of a TYPE_PARAMS node.
    fn constraints(&self, type_params: &SyntaxNode) -> Vec<String> {
        type_params
            .children()
            .filter(|param| param.kind() == SyntaxKind::TYPE_PARAM)
            .filter_map(|param| {
                let name = child_token(&param, SyntaxKind::IDENT)?;
                let bound = child_node(&param, SyntaxKind::TYPE_BOUND)?;
                let bounds: Vec<String> = bound
                    .children()
                    .filter(|ty| ty.kind().is_type())
                    .map(|ty| self.render_text(&ty))
                    .collect();
                Some(format!("where {} : {}", name.text(), bounds.join(", ")))
            })
            .collect()
    }

    fn write_constraints(&mut self, constraints: &[String]) {
        for constraint in constraints {
            self.state.write(" ");
            self.state.write(constraint);
        }
    }

    /// Class, interface or enum. Bounds on the type's own parameters move
    /// to `where` clauses in front of the body.
    pub(super) fn type_decl(&mut self, node: &SyntaxNode) {
        let constraints = child_node(node, SyntaxKind::TYPE_PARAMS)
            .map(|params| self.constraints(&params))
            .unwrap_or_default();
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(body)
                    if matches!(body.kind(), SyntaxKind::CLASS_BODY | SyntaxKind::ENUM_BODY) =>
                {
                    self.write_constraints(&constraints);
                    self.node(&body);
                }
                other => self.element(other),
            }
        }
    }

    /// `implements` joins the base list with `,` when `extends` opened it.
    pub(super) fn implements_clause(&mut self, node: &SyntaxNode) {
        let after_extends = node
            .prev_sibling()
            .is_some_and(|sibling| sibling.kind() == SyntaxKind::EXTENDS_CLAUSE);
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Token(keyword) if keyword.kind() == SyntaxKind::IMPLEMENTS_KW => {
                    if after_extends {
                        let index = self.index(&keyword);
                        self.state.replay_comments_to(index);
                        self.state.emit(index, ",");
                    } else {
                        self.terminal(&keyword, ":");
                    }
                }
                other => self.element(other),
            }
        }
    }

    /// Pre-pass over a METHOD_DECL header.
    pub(crate) fn method_header_facts(&self, node: &SyntaxNode) -> MethodHeaderFacts {
        let has_override = child_node(node, SyntaxKind::MODIFIER_LIST).is_some_and(|modifiers| {
            modifiers
                .children()
                .filter(|n| n.kind() == SyntaxKind::ANNOTATION)
                .any(|annotation| is_override_annotation(&annotation))
        });
        let type_params = child_node(node, SyntaxKind::TYPE_PARAMS);
        MethodHeaderFacts {
            type_parameters: type_params.as_ref().map(|params| self.render_text(params)),
            has_override,
            constraints: type_params
                .map(|params| self.constraints(&params))
                .unwrap_or_default(),
        }
    }

    pub(super) fn method_decl(&mut self, node: &SyntaxNode) {
        let facts = self.method_header_facts(node);
        let mut seen_name = false;
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(params) if params.kind() == SyntaxKind::TYPE_PARAMS => {
                    self.erase(&params);
                }
                NodeOrToken::Node(result) if result.kind().is_type() && !seen_name => {
                    if facts.has_override {
                        if let Some(first) = first_token(&result) {
                            self.state.replay_to(self.index(&first));
                            self.state.write("override ");
                        }
                    }
                    self.node(&result);
                }
                NodeOrToken::Node(body) if body.kind() == SyntaxKind::BLOCK => {
                    self.write_constraints(&facts.constraints);
                    self.node(&body);
                }
                NodeOrToken::Token(name) if name.kind() == SyntaxKind::IDENT && !seen_name => {
                    seen_name = true;
                    let mut text = convert_method_name(name.text());
                    if let Some(type_parameters) = &facts.type_parameters {
                        text.push_str(type_parameters);
                    }
                    self.terminal(&name, &text);
                }
                NodeOrToken::Token(semi) if semi.kind() == SyntaxKind::SEMICOLON => {
                    self.write_constraints(&facts.constraints);
                    self.token(&semi);
                }
                other => self.element(other),
            }
        }
    }

    /// `static { }` becomes a static constructor of the enclosing type.
    pub(super) fn initializer(&mut self, node: &SyntaxNode) {
        let is_static = child_node(node, SyntaxKind::MODIFIER_LIST)
            .is_some_and(|mods| child_token(&mods, SyntaxKind::STATIC_KW).is_some());
        let owner = node
            .ancestors()
            .find(|n| matches!(n.kind(), SyntaxKind::CLASS_DECL | SyntaxKind::ENUM_DECL))
            .and_then(|decl| child_token(&decl, SyntaxKind::IDENT));
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(body) if body.kind() == SyntaxKind::BLOCK => {
                    if let (true, Some(owner)) = (is_static, &owner) {
                        self.state.write(&format!(" {}()", owner.text()));
                    }
                    self.node(&body);
                }
                other => self.element(other),
            }
        }
    }

    /// `String` → `string`, `java.util.List<T>` → `Java.Util.List<T>`.
    pub(super) fn class_type(&mut self, node: &SyntaxNode) {
        if child_node(node, SyntaxKind::TYPE_ARGS).is_none() && !has_inner_trivia(node) {
            return self.replace(node, &convert_type_name(&significant_text(node)));
        }
        // Generic or commented names go segment by segment.
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Token(name) if name.kind() == SyntaxKind::IDENT => {
                    self.terminal(&name, &convert_identifier(name.text()));
                }
                other => self.element(other),
            }
        }
    }

    /// `?` alone is `object`; a bounded wildcard collapses to its bound.
    pub(super) fn wildcard(&mut self, node: &SyntaxNode) {
        let Some(question) = child_token(node, SyntaxKind::QUESTION) else {
            return self.children(node);
        };
        match node.children().find(|n| n.kind().is_type()) {
            Some(bound) => {
                self.state.replay_to(self.index(&question));
                if let Some(first) = first_token(&bound) {
                    self.state.skip_to(self.index(&first));
                }
                self.node(&bound);
            }
            None => self.terminal(&question, "object"),
        }
    }
}
