//! Statement rewrites: `var`, `foreach`, `assert` and switch fallthrough.

use decaf_parser::{SyntaxKind, SyntaxNode};
use rowan::NodeOrToken;

use super::declarations::special_class_type;
use super::{child_node, child_token, first_token, Translator};
use crate::mailbox::Mailbox;

fn is_null_literal(node: &SyntaxNode) -> bool {
    node.kind() == SyntaxKind::LITERAL && child_token(node, SyntaxKind::NULL_KW).is_some()
}

impl Translator<'_> {
    /// Whether the declared type of `decl` can be written as `var`.
    fn declares_with_var(&self, decl: &SyntaxNode, ty: &SyntaxNode) -> bool {
        if !self.options.use_var_in_declarations {
            return false;
        }
        let keeps_name = match ty.kind() {
            SyntaxKind::PRIMITIVE_TYPE => true,
            SyntaxKind::CLASS_TYPE => special_class_type(ty).is_some(),
            _ => false,
        };
        if keeps_name {
            return false;
        }
        if decl
            .parent()
            .is_some_and(|parent| parent.kind() == SyntaxKind::FOREACH_STMT)
        {
            return true;
        }

        let mut declarators = decl
            .children()
            .filter(|n| n.kind() == SyntaxKind::VARIABLE_DECLARATOR);
        let (Some(declarator), None) = (declarators.next(), declarators.next()) else {
            return false;
        };
        if child_node(&declarator, SyntaxKind::DIMS).is_some() {
            return false;
        }
        // `var` needs an initializer with a type of its own.
        match declarator.children().next() {
            Some(init) => {
                !matches!(
                    init.kind(),
                    SyntaxKind::ARRAY_INIT | SyntaxKind::LAMBDA_EXPR | SyntaxKind::METHOD_REF
                ) && !is_null_literal(&init)
            }
            None => false,
        }
    }

    pub(super) fn local_var_decl(&mut self, node: &SyntaxNode) {
        let ty = node.children().find(|n| n.kind().is_type());
        let use_var = ty
            .as_ref()
            .is_some_and(|ty| self.declares_with_var(node, ty));
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(declared) if use_var && Some(&declared) == ty.as_ref() => {
                    self.replace(&declared, "var");
                }
                other => self.element(other),
            }
        }
    }

    /// `for (T x : xs)` → `foreach (T x in xs)`.
    pub(super) fn foreach_stmt(&mut self, node: &SyntaxNode) {
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Token(keyword) if keyword.kind() == SyntaxKind::FOR_KW => {
                    self.terminal(&keyword, "foreach");
                }
                NodeOrToken::Token(colon) if colon.kind() == SyntaxKind::COLON => {
                    let index = self.index(&colon);
                    let mut text = String::new();
                    if !index.checked_sub(1).is_some_and(|before| self.state.is_hidden(before)) {
                        text.push(' ');
                    }
                    text.push_str("in");
                    if !self.state.is_hidden(index + 1) {
                        text.push(' ');
                    }
                    self.terminal(&colon, &text);
                }
                other => self.element(other),
            }
        }
    }

    /// `assert a : b;` → `Debug.Assert(a, b);`
    pub(super) fn assert_stmt(&mut self, node: &SyntaxNode) {
        self.globals.add_using("System.Diagnostics");
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Token(keyword) if keyword.kind() == SyntaxKind::ASSERT_KW => {
                    self.terminal(&keyword, "Debug.Assert(");
                    self.state.skip_whitespace();
                }
                NodeOrToken::Token(colon) if colon.kind() == SyntaxKind::COLON => {
                    let index = self.index(&colon);
                    self.state.replay_comments_to(index);
                    self.state.emit(index, ",");
                }
                NodeOrToken::Token(semi) if semi.kind() == SyntaxKind::SEMICOLON => {
                    let index = self.index(&semi);
                    self.state.replay_comments_to(index);
                    self.state.emit(index, ");");
                }
                other => self.element(other),
            }
        }
    }

    /// Makes fallthrough between switch groups explicit.
    ///
    /// Each group posts the separator for its trailing jump, or `None` when
    /// it ends in `break` or `return`. The next group answers with a jump to
    /// its first label; the closing brace answers with `break;`. The block
    /// opens with `None` posted, so every group has something to receive.
    pub(super) fn switch_block(&mut self, node: &SyntaxNode) {
        let mut fallthrough: Mailbox<Option<String>> = Mailbox::new();
        fallthrough.send(None);
        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(group) if group.kind() == SyntaxKind::SWITCH_GROUP => {
                    if let Some(separator) = fallthrough.receive() {
                        let jump = self.jump_to(&group);
                        self.state.write(&separator);
                        self.state.write(&jump);
                    }
                    self.node(&group);
                    fallthrough.send(self.fallthrough_separator(&group));
                }
                NodeOrToken::Token(close) if close.kind() == SyntaxKind::R_BRACE => {
                    if let Some(separator) = fallthrough.receive() {
                        self.state.write(&separator);
                        self.state.write("break;");
                    }
                    self.token(&close);
                }
                other => self.element(other),
            }
        }
    }

    /// `goto case X;` or `goto default;` for the first label of `group`.
    fn jump_to(&self, group: &SyntaxNode) -> String {
        let label = child_node(group, SyntaxKind::SWITCH_LABEL);
        let value = label.as_ref().and_then(|label| label.first_child());
        match value {
            Some(value) => format!("goto case {};", self.render_text(&value)),
            None => "goto default;".to_string(),
        }
    }

    /// Text to put between the last statement of `group` and an inserted
    /// jump, copied from the line break in front of that statement.
    fn fallthrough_separator(&self, group: &SyntaxNode) -> Option<String> {
        let Some(last) = group
            .children()
            .filter(|n| n.kind() != SyntaxKind::SWITCH_LABEL)
            .last()
        else {
            return Some(" ".to_string());
        };
        if matches!(last.kind(), SyntaxKind::BREAK_STMT | SyntaxKind::RETURN_STMT) {
            return None;
        }
        let separator = first_token(&last)
            .and_then(|first| self.index(&first).checked_sub(1))
            .and_then(|before| self.state.whitespace_at(before))
            .and_then(|ws| ws.rfind('\n').map(|at| ws[at..].to_string()))
            .unwrap_or_else(|| " ".to_string());
        Some(separator)
    }
}
