//! Event-based parser for Java.
//!
//! Parse functions call `open()` to start a node, `advance()` to consume
//! tokens and `close()` to finish a node with its real kind. Events are
//! collected into a flat list and converted into a rowan green tree by
//! `build_tree()`. `open_before()` wraps an already completed node using the
//! forward-parent technique (as in rust-analyzer).
//!
//! Every token of the stream, trivia included, ends up in the tree. Lookahead
//! skips trivia; `advance()` emits the skipped trivia in front of the token it
//! consumes.
//!
//! Errors never stop the parse. Each parse function guarantees progress or
//! returns to a caller that does, so the error count is a usable measure of
//! how well a fragment fits an entry point.

pub(crate) mod expressions;
pub(crate) mod items;
pub(crate) mod statements;
pub(crate) mod types;

use decaf_common::span::Span;
use decaf_common::token::{Token, TokenKind};

use crate::error::ParseError;
use crate::syntax_kind::SyntaxKind;

#[derive(Debug)]
enum Event {
    /// Start a node. `kind` is TOMBSTONE until patched by `close()`.
    Open {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },
    Close,
    /// Consume one token of the stream.
    Advance,
}

/// Marker for a started but not yet closed node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MarkOpened {
    index: usize,
}

/// Marker for a completed node, usable with `open_before()`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MarkClosed {
    index: usize,
}

pub(crate) struct Parser<'t> {
    /// The full token stream, trivia and the final `Eof` included.
    tokens: &'t [Token],
    /// Source text the token spans point into.
    source: &'t str,
    /// Index of the next token not yet turned into an `Advance` event.
    pos: usize,
    events: Vec<Event>,
    errors: Vec<ParseError>,
}

impl<'t> Parser<'t> {
    /// Create a parser over a token stream produced from `source`.
    pub(crate) fn new(tokens: &'t [Token], source: &'t str) -> Self {
        Self {
            tokens,
            source,
            pos: 0,
            events: Vec::new(),
            errors: Vec::new(),
        }
    }

    // ── Lookahead ──────────────────────────────────────────────────────

    /// Kind of the current significant token. Same as `nth(0)`.
    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Kind of the nth significant token ahead, or EOF past the end.
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_index(n)
            .map_or(SyntaxKind::EOF, |i| SyntaxKind::from(self.tokens[i].kind))
    }

    /// Stream index of the nth significant token ahead.
    fn nth_index(&self, n: usize) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(self.pos)
            .filter(|(_, t)| !t.kind.is_trivia())
            .nth(n)
            .map(|(i, _)| i)
    }

    /// Whether the current significant token is `kind`.
    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Whether the current significant token is any of `kinds`.
    pub(crate) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current())
    }

    /// Whether the upcoming significant tokens are exactly `kinds` with no
    /// trivia between them. Used for operators the lexer leaves split, like
    /// `>>=` (lexed as `>`, `>`, `=`).
    pub(crate) fn at_glued(&self, kinds: &[SyntaxKind]) -> bool {
        let Some(first) = self.nth_index(0) else {
            return false;
        };
        kinds.iter().enumerate().all(|(offset, &kind)| {
            self.tokens
                .get(first + offset)
                .is_some_and(|t| SyntaxKind::from(t.kind) == kind)
        })
    }

    /// Span of the current significant token. Past the end this is an
    /// empty span at the end of the source.
    pub(crate) fn current_span(&self) -> Span {
        match self.nth_index(0) {
            Some(i) => self.tokens[i].span,
            None => {
                let end = self.source.len() as u32;
                Span::new(end, end)
            }
        }
    }

    // ── Node management ────────────────────────────────────────────────

    /// Start a node. The returned marker must be passed to `close()`,
    /// which patches in the real kind.
    pub(crate) fn open(&mut self) -> MarkOpened {
        let mark = MarkOpened {
            index: self.events.len(),
        };
        self.events.push(Event::Open {
            kind: SyntaxKind::TOMBSTONE,
            forward_parent: None,
        });
        mark
    }

    /// Start a node that becomes the parent of the already completed node.
    ///
    /// After parsing `a` the parser may find `a.b` or `a(x)`; the new node
    /// wraps `a` through a forward-parent link on its Open event, so no
    /// events have to be moved.
    pub(crate) fn open_before(&mut self, completed: MarkClosed) -> MarkOpened {
        let mark = self.open();
        if let Event::Open { forward_parent, .. } = &mut self.events[completed.index] {
            *forward_parent = Some(mark.index);
        }
        mark
    }

    /// Finish a node with its real kind. The result can be passed to
    /// `open_before()`.
    pub(crate) fn close(&mut self, m: MarkOpened, kind: SyntaxKind) -> MarkClosed {
        if let Event::Open {
            kind: slot_kind, ..
        } = &mut self.events[m.index]
        {
            *slot_kind = kind;
        }
        self.events.push(Event::Close);
        MarkClosed { index: m.index }
    }

    // ── Token consumption ──────────────────────────────────────────────

    /// Consume the current significant token and the trivia in front of it.
    ///
    /// EOF is never consumed here; only the root does that via `finish()`.
    pub(crate) fn advance(&mut self) {
        let Some(target) = self.nth_index(0) else {
            return;
        };
        if self.tokens[target].kind == TokenKind::Eof {
            return;
        }
        while self.pos <= target {
            self.events.push(Event::Advance);
            self.pos += 1;
        }
    }

    /// Consume `n` significant tokens. Used for operators lexed in pieces.
    pub(crate) fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Wrap the current token in an ERROR_NODE and consume it.
    pub(crate) fn advance_with_error(&mut self, message: &str) {
        let m = self.open();
        self.error(message);
        self.advance();
        self.close(m, SyntaxKind::ERROR_NODE);
    }

    /// Consume `kind` or record an error. Never consumes on mismatch.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(&format!("expected {}", describe(kind)));
            false
        }
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume every remaining token, including trailing trivia and EOF.
    fn finish(&mut self) {
        while self.pos < self.tokens.len() {
            self.events.push(Event::Advance);
            self.pos += 1;
        }
    }

    // ── Error reporting ────────────────────────────────────────────────

    /// Record an error at the current token without consuming anything.
    pub(crate) fn error(&mut self, message: &str) {
        let span = self.current_span();
        self.errors.push(ParseError::new(message, span));
    }

    /// Record an error that also points at an earlier span, such as the
    /// opening brace of an unclosed block.
    pub(crate) fn error_with_related(&mut self, message: &str, related_span: Span, related: &str) {
        let span = self.current_span();
        self.errors
            .push(ParseError::with_related(message, span, related, related_span));
    }

    // ── Tree building ──────────────────────────────────────────────────

    /// Convert the collected events into a green tree.
    ///
    /// An Open event with a forward parent is opened together with its
    /// chain of wrappers, outermost first; the wrappers' own Open events are
    /// tombstoned so they are skipped when reached.
    pub(crate) fn build_tree(mut self) -> (rowan::GreenNode, Vec<ParseError>) {
        let mut builder = rowan::GreenNodeBuilder::new();
        let mut token_pos = 0usize;
        let mut chain: Vec<SyntaxKind> = Vec::new();

        for i in 0..self.events.len() {
            match self.events[i] {
                Event::Open {
                    kind,
                    forward_parent: None,
                } => {
                    if kind != SyntaxKind::TOMBSTONE {
                        builder.start_node(rowan::SyntaxKind(kind as u16));
                    }
                }
                Event::Open {
                    kind,
                    forward_parent: Some(mut next),
                } => {
                    chain.clear();
                    chain.push(kind);
                    loop {
                        let Event::Open {
                            kind,
                            forward_parent,
                        } = std::mem::replace(
                            &mut self.events[next],
                            Event::Open {
                                kind: SyntaxKind::TOMBSTONE,
                                forward_parent: None,
                            },
                        )
                        else {
                            unreachable!("forward parent must point at an Open event");
                        };
                        chain.push(kind);
                        match forward_parent {
                            Some(fp) => next = fp,
                            None => break,
                        }
                    }
                    for &kind in chain.iter().rev() {
                        if kind != SyntaxKind::TOMBSTONE {
                            builder.start_node(rowan::SyntaxKind(kind as u16));
                        }
                    }
                }
                Event::Close => builder.finish_node(),
                Event::Advance => {
                    let token = &self.tokens[token_pos];
                    let kind = SyntaxKind::from(token.kind);
                    builder.token(rowan::SyntaxKind(kind as u16), token.span.text(self.source));
                    token_pos += 1;
                }
            }
        }

        (builder.finish(), self.errors)
    }
}

/// Human-readable name of a token kind for error messages.
pub(crate) fn describe(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::IDENT => "identifier",
        SyntaxKind::SEMICOLON => "`;`",
        SyntaxKind::COLON => "`:`",
        SyntaxKind::COMMA => "`,`",
        SyntaxKind::DOT => "`.`",
        SyntaxKind::L_PAREN => "`(`",
        SyntaxKind::R_PAREN => "`)`",
        SyntaxKind::L_BRACE => "`{`",
        SyntaxKind::R_BRACE => "`}`",
        SyntaxKind::L_BRACKET => "`[`",
        SyntaxKind::R_BRACKET => "`]`",
        SyntaxKind::GT => "`>`",
        SyntaxKind::LT => "`<`",
        SyntaxKind::EQ => "`=`",
        SyntaxKind::ARROW => "`->`",
        SyntaxKind::WHILE_KW => "`while`",
        SyntaxKind::CLASS_KW => "`class`",
        SyntaxKind::INTERFACE_KW => "`interface`",
        SyntaxKind::NEW_KW => "`new`",
        _ => "token",
    }
}

// ── Entry points ───────────────────────────────────────────────────────

/// `package? import* typeDeclaration*`
pub(crate) fn compilation_unit(p: &mut Parser) {
    let root = p.open();
    if p.at(SyntaxKind::PACKAGE_KW) || (p.at(SyntaxKind::AT) && package_follows_annotations(p)) {
        items::package_decl(p);
    }
    while p.at(SyntaxKind::IMPORT_KW) {
        items::import_decl(p);
    }
    while !p.at(SyntaxKind::EOF) {
        if p.eat(SyntaxKind::SEMICOLON) {
            continue;
        }
        if p.at(SyntaxKind::IMPORT_KW) {
            p.error("imports must precede type declarations");
            items::import_decl(p);
            continue;
        }
        items::type_decl_or_recover(p);
    }
    p.finish();
    p.close(root, SyntaxKind::COMPILATION_UNIT);
}

/// `classBodyDeclaration*` without the surrounding braces.
pub(crate) fn class_body_declarations(p: &mut Parser) {
    let root = p.open();
    while !p.at(SyntaxKind::EOF) {
        if p.at(SyntaxKind::R_BRACE) {
            p.advance_with_error("unmatched `}`");
            continue;
        }
        items::member(p);
    }
    p.finish();
    p.close(root, SyntaxKind::CLASS_BODY_DECLARATIONS);
}

/// `blockStatement*` without the surrounding braces.
pub(crate) fn block_statements(p: &mut Parser) {
    let root = p.open();
    while !p.at(SyntaxKind::EOF) {
        if p.at(SyntaxKind::R_BRACE) {
            p.advance_with_error("unmatched `}`");
            continue;
        }
        statements::block_statement(p);
    }
    p.finish();
    p.close(root, SyntaxKind::BLOCK_STATEMENTS);
}

/// A single expression. Anything after it is collected into one error node.
pub(crate) fn expression_snippet(p: &mut Parser) {
    let root = p.open();
    if expressions::expr(p).is_none() {
        p.error("expected expression");
    }
    if !p.at(SyntaxKind::EOF) {
        let m = p.open();
        p.error("unexpected tokens after expression");
        while !p.at(SyntaxKind::EOF) {
            p.advance();
        }
        p.close(m, SyntaxKind::ERROR_NODE);
    }
    p.finish();
    p.close(root, SyntaxKind::EXPRESSION_SNIPPET);
}

/// `@Ann package a.b;` needs to look past balanced annotation arguments.
fn package_follows_annotations(p: &Parser) -> bool {
    let mut n = 0;
    while p.nth(n) == SyntaxKind::AT {
        n += 1;
        while p.nth(n) == SyntaxKind::IDENT || p.nth(n) == SyntaxKind::DOT {
            n += 1;
        }
        if p.nth(n) == SyntaxKind::L_PAREN {
            let mut depth = 0usize;
            loop {
                match p.nth(n) {
                    SyntaxKind::L_PAREN => depth += 1,
                    SyntaxKind::R_PAREN => depth -= 1,
                    SyntaxKind::EOF => return false,
                    _ => {}
                }
                n += 1;
                if depth == 0 {
                    break;
                }
            }
        }
    }
    p.nth(n) == SyntaxKind::PACKAGE_KW
}
