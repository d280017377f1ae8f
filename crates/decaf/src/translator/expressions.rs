//! Expression rewrites: calls, method references, class literals and
//! anonymous classes.

use decaf_parser::{SyntaxKind, SyntaxNode, SyntaxToken};
use rowan::NodeOrToken;

use super::{child_node, child_token, first_token, last_token, Translator};
use crate::convert::{convert_method_name, getter_property, setter_property};

fn last_ident(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| t.kind() == SyntaxKind::IDENT)
        .last()
}

impl Translator<'_> {
    /// `a.getB()` → `a.B`, `a.setB(v)` → `a.B = v`, `a.<T>c()` → `a.C<T>()`.
    pub(super) fn method_call(&mut self, node: &SyntaxNode) {
        let Some(name) = last_ident(node) else {
            return self.children(node);
        };
        let type_args = child_node(node, SyntaxKind::TYPE_ARGS);
        let arg_count = child_node(node, SyntaxKind::ARG_LIST)
            .map_or(0, |args| args.children().count());
        let getter = getter_property(name.text(), arg_count, type_args.is_some());
        let setter = setter_property(name.text(), arg_count, type_args.is_some());

        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(args) if args.kind() == SyntaxKind::TYPE_ARGS => {
                    self.skip_node(&args);
                }
                NodeOrToken::Token(token) if token == name => {
                    let text = if let Some(property) = &getter {
                        property.clone()
                    } else if let Some(property) = &setter {
                        format!("{property} = ")
                    } else {
                        let mut text = convert_method_name(name.text());
                        if let Some(type_args) = &type_args {
                            text.push_str(&self.render_text(type_args));
                        }
                        text
                    };
                    self.terminal(&token, &text);
                }
                NodeOrToken::Node(args) if args.kind() == SyntaxKind::ARG_LIST => {
                    if getter.is_some() {
                        self.drop_keeping_comments(&args);
                    } else if setter.is_some() {
                        self.setter_argument(&args);
                    } else {
                        self.node(&args);
                    }
                }
                other => self.element(other),
            }
        }
    }

    /// Writes the single argument of a setter call without its parentheses.
    fn setter_argument(&mut self, args: &SyntaxNode) {
        if let Some(value) = args.first_child() {
            if let Some(first) = first_token(&value) {
                self.state.salvage_comments_to(self.index(&first));
            }
            self.node(&value);
        }
        self.drop_keeping_comments(args);
    }

    /// Skip the rest of `node`, keeping the comments in it.
    fn drop_keeping_comments(&mut self, node: &SyntaxNode) {
        if let Some(last) = last_token(node) {
            self.state.salvage_comments_to(self.index(&last) + 1);
        }
    }

    /// `Foo::bar` → `Foo.Bar`. Constructor references stay as they are.
    pub(super) fn method_ref(&mut self, node: &SyntaxNode) {
        if child_token(node, SyntaxKind::NEW_KW).is_some() {
            return self.children(node);
        }
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Token(sep) if sep.kind() == SyntaxKind::COLON_COLON => {
                    self.terminal(&sep, ".");
                }
                NodeOrToken::Token(name) if name.kind() == SyntaxKind::IDENT => {
                    self.terminal(&name, &convert_method_name(name.text()));
                }
                other => self.element(other),
            }
        }
    }

    /// `Foo.class` → `typeof(Foo)`.
    pub(super) fn class_literal(&mut self, node: &SyntaxNode) {
        let (Some(inner), Some(class_kw)) =
            (node.first_child(), child_token(node, SyntaxKind::CLASS_KW))
        else {
            return self.children(node);
        };
        let Some(first) = first_token(&inner) else {
            return self.children(node);
        };
        self.state.replay_to(self.index(&first));
        self.state.write("typeof(");
        self.node(&inner);
        self.state.skip_to(self.index(&class_kw) + 1);
        self.state.write(")");
    }

    /// `new Base(args) { body }` → `new AnonymousBase(args)`, with the body
    /// lifted into a named class.
    pub(super) fn instance_creation(&mut self, node: &SyntaxNode) {
        let (Some(base), Some(body)) = (
            child_node(node, SyntaxKind::CLASS_TYPE),
            child_node(node, SyntaxKind::CLASS_BODY),
        ) else {
            return self.children(node);
        };
        let Some(open) = first_token(&body) else {
            return self.children(node);
        };

        let rendered = self.render(&body, self.index(&open));
        let base_type = self.render_text(&base);
        let simple_name = last_ident(&base)
            .map(|name| name.text().to_string())
            .unwrap_or_else(|| base_type.clone());
        let mut globals = rendered.globals;
        let name = globals.add_anonymous_class(&simple_name, &base_type, rendered.text);
        self.globals = globals;

        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(ty) if ty == base => self.replace(&ty, &name),
                NodeOrToken::Node(lifted) if lifted == body => {
                    debug_assert_eq!(
                        last_token(&lifted).map(|t| self.index(&t) + 1),
                        Some(rendered.cursor)
                    );
                    self.state.skip_to(rendered.cursor);
                }
                other => self.element(other),
            }
        }
    }
}
