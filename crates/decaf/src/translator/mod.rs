//! Tree-to-text translation.
//!
//! One depth-first walk over the CST. Significant tokens are written through
//! [`TranslationState`], which replays the whitespace and comments in front
//! of each one, so everything the walk does not rewrite keeps its original
//! layout. Rewrites that need text from elsewhere in the tree render it
//! through [`Translator::render`], which translates an element into a fresh
//! buffer without touching the caller's cursor or output.
//!
//! Every node kind is handled in the single `match` in [`Translator::node`].

mod declarations;
mod expressions;
mod statements;
mod terminals;

use decaf_parser::{Parse, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
use rowan::NodeOrToken;

use crate::global::GlobalState;
use crate::options::TranslateOptions;
use crate::state::TranslationState;


/// Result of a speculative render.
pub(crate) struct Rendered {
    pub(crate) text: String,
    /// Cursor after the rendered element.
    pub(crate) cursor: usize,
    /// Global state including anything the element registered.
    pub(crate) globals: GlobalState,
}

pub(crate) struct Translator<'a> {
    parse: &'a Parse,
    source: &'a str,
    options: &'a TranslateOptions,
    state: TranslationState<'a>,
    globals: GlobalState,
}

impl<'a> Translator<'a> {
    pub(crate) fn new(parse: &'a Parse, source: &'a str, options: &'a TranslateOptions) -> Self {
        Self {
            parse,
            source,
            options,
            state: TranslationState::new(parse.tokens(), source, 0),
            globals: GlobalState::new(&options.anonymous_class_name_format),
        }
    }

    /// Translate the whole tree. Returns the raw C# text and the
    /// declarations gathered on the way.
    pub(crate) fn run(mut self) -> (String, GlobalState) {
        let root = self.parse.syntax();
        self.node(&root);
        assert_eq!(
            self.state.cursor(),
            self.parse.tokens().len(),
            "translation stopped before the end of the token stream"
        );
        (self.state.into_output(), self.globals)
    }

    /// Translate `node` into a fresh buffer, starting at `cursor`.
    ///
    /// The caller's cursor, output and global state are untouched; the
    /// result says where the render stopped and what it registered, for the
    /// caller to adopt or discard.
    pub(crate) fn render(&self, node: &SyntaxNode, cursor: usize) -> Rendered {
        let mut fork = Translator {
            parse: self.parse,
            source: self.source,
            options: self.options,
            state: TranslationState::new(self.parse.tokens(), self.source, cursor),
            globals: self.globals.clone(),
        };
        fork.node(node);
        Rendered {
            cursor: fork.state.cursor(),
            text: fork.state.into_output(),
            globals: fork.globals,
        }
    }

    /// Translated text of `node` alone, without the trivia in front of it.
    pub(crate) fn render_text(&self, node: &SyntaxNode) -> String {
        match first_token(node) {
            Some(first) => self.render(node, self.index(&first)).text,
            None => String::new(),
        }
    }

    // ── Dispatch ───────────────────────────────────────────────────────

    pub(crate) fn node(&mut self, node: &SyntaxNode) {
        use SyntaxKind::*;

        match node.kind() {
            PACKAGE_DECL => self.package_decl(node),
            IMPORT_DECL => self.import_decl(node),
            ANNOTATION => self.erase(node),
            MODIFIER_LIST => self.modifier_list(node),
            CLASS_DECL | INTERFACE_DECL | ENUM_DECL => self.type_decl(node),
            IMPLEMENTS_CLAUSE => self.implements_clause(node),
            METHOD_DECL => self.method_decl(node),
            INITIALIZER => self.initializer(node),
            THROWS_CLAUSE => self.erase(node),
            TYPE_BOUND => self.skip_node(node),
            CLASS_TYPE => self.class_type(node),
            WILDCARD => self.wildcard(node),
            LOCAL_VAR_DECL => self.local_var_decl(node),
            FOREACH_STMT => self.foreach_stmt(node),
            ASSERT_STMT => self.assert_stmt(node),
            SWITCH_BLOCK => self.switch_block(node),
            METHOD_CALL => self.method_call(node),
            METHOD_REF => self.method_ref(node),
            CLASS_LITERAL => self.class_literal(node),
            CLASS_INSTANCE_CREATION => self.instance_creation(node),
            ERROR_NODE => self.verbatim(node),

            COMPILATION_UNIT | CLASS_BODY_DECLARATIONS | BLOCK_STATEMENTS | EXPRESSION_SNIPPET
            | QUALIFIED_NAME | ANNOTATION_ARGS | ANNOTATION_TYPE_DECL | EXTENDS_CLAUSE
            | CLASS_BODY | ENUM_BODY | ENUM_CONSTANT | FIELD_DECL | VARIABLE_DECLARATOR
            | CONSTRUCTOR_DECL | PARAM_LIST | FORMAL_PARAM | DIMS | PRIMITIVE_TYPE | ARRAY_TYPE
            | TYPE_ARGS | TYPE_PARAMS | TYPE_PARAM | BLOCK | LOCAL_VAR_DECL_STMT | EXPR_STMT
            | IF_STMT | WHILE_STMT | DO_STMT | FOR_STMT | FOR_INIT | FOR_UPDATE | RETURN_STMT
            | BREAK_STMT | CONTINUE_STMT | THROW_STMT | SWITCH_STMT | SWITCH_GROUP
            | SWITCH_LABEL | SYNCHRONIZED_STMT | TRY_STMT | RESOURCE_SPEC | RESOURCE
            | CATCH_CLAUSE | CATCH_PARAM | FINALLY_CLAUSE | LABELED_STMT | EMPTY_STMT
            | NAME_EXPR | FIELD_ACCESS | CONSTRUCTOR_CALL | ARG_LIST | LITERAL | THIS_EXPR
            | SUPER_EXPR | BINARY_EXPR | UNARY_EXPR | POSTFIX_EXPR | ASSIGN_EXPR
            | CONDITIONAL_EXPR | INSTANCEOF_EXPR | CAST_EXPR | PAREN_EXPR | LAMBDA_EXPR
            | LAMBDA_PARAMS | ARRAY_CREATION | ARRAY_INIT | DIM_EXPR | INDEX_EXPR => {
                self.children(node)
            }

            kind => unreachable!("{kind:?} is not a node kind"),
        }
    }

    pub(crate) fn children(&mut self, node: &SyntaxNode) {
        for child in node.children_with_tokens() {
            self.element(child);
        }
    }

    pub(crate) fn element(&mut self, element: SyntaxElement) {
        match element {
            NodeOrToken::Node(node) => self.node(&node),
            NodeOrToken::Token(token) => self.token(&token),
        }
    }

    // ── Cursor helpers ─────────────────────────────────────────────────

    pub(crate) fn index(&self, token: &SyntaxToken) -> usize {
        self.parse.token_index(token)
    }

    /// Write `text` in place of `token`.
    pub(crate) fn terminal(&mut self, token: &SyntaxToken, text: &str) {
        let index = self.index(token);
        self.state.emit(index, text);
    }

    /// Replay the trivia in front of `node`, skip the node itself and the
    /// whitespace after it.
    pub(crate) fn erase(&mut self, node: &SyntaxNode) {
        if let (Some(first), Some(last)) = (first_token(node), last_token(node)) {
            self.erase_span(self.index(&first), self.index(&last));
        }
    }

    pub(crate) fn erase_token(&mut self, token: &SyntaxToken) {
        let index = self.index(token);
        self.erase_span(index, index);
    }

    fn erase_span(&mut self, first: usize, last: usize) {
        self.state.replay_to(first);
        self.state.skip_to(last + 1);
        self.state.skip_whitespace();
    }

    /// Skip `node` together with the trivia in front of it.
    pub(crate) fn skip_node(&mut self, node: &SyntaxNode) {
        if let Some(last) = last_token(node) {
            self.state.skip_to(self.index(&last) + 1);
        }
    }

    /// Write `text` in place of the whole of `node`.
    pub(crate) fn replace(&mut self, node: &SyntaxNode, text: &str) {
        if let (Some(first), Some(last)) = (first_token(node), last_token(node)) {
            self.state.replay_to(self.index(&first));
            self.state.write(text);
            self.state.skip_to(self.index(&last) + 1);
        }
    }

    /// Source text of `node`, token for token.
    fn verbatim(&mut self, node: &SyntaxNode) {
        for token in significant_tokens(node) {
            self.terminal(&token, token.text());
        }
    }
}

// ── Tree helpers ───────────────────────────────────────────────────────

pub(crate) fn significant_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
}

pub(crate) fn first_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    significant_tokens(node).next()
}

pub(crate) fn last_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    significant_tokens(node).last()
}

/// Concatenated significant token text, e.g. `java.util.List`.
pub(crate) fn significant_text(node: &SyntaxNode) -> String {
    significant_tokens(node).map(|t| t.text().to_string()).collect()
}

pub(crate) fn child_node(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|n| n.kind() == kind)
}

pub(crate) fn child_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use decaf_parser::{parse, EntryPoint};

    fn raw(source: &str, entry: EntryPoint) -> String {
        let parse = parse(source, entry);
        let options = TranslateOptions::default();
        Translator::new(&parse, source, &options).run().0
    }

    #[test]
    fn untouched_code_round_trips() {
        let source = "  a  =  b /* why */ +\n\t c ;  // done\n";
        assert_eq!(raw(source, EntryPoint::MethodBody), source);
    }

    #[test]
    fn error_nodes_are_copied_verbatim() {
        let source = "int x = ; ) foo(1);";
        let out = raw(source, EntryPoint::MethodBody);
        assert_eq!(out, "int x = ; ) Foo(1);");
    }

    #[test]
    fn render_does_not_move_the_caller() {
        let source = "a + b";
        let parse = parse(source, EntryPoint::Expression);
        let options = TranslateOptions::default();
        let translator = Translator::new(&parse, source, &options);
        let root = parse.syntax();
        let binary = root.first_child().unwrap();
        let rendered = translator.render(&binary, 0);
        assert_eq!(rendered.text, "a + b");
        assert_eq!(rendered.cursor, 5);
        assert_eq!(translator.state.cursor(), 0);
    }
}
