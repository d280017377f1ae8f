//! Token cursor and output buffer.
//!
//! The cursor indexes the token stream and names the next token not yet
//! written or replayed. It only moves forward. Reaching a significant token
//! replays every hidden token in front of it verbatim, which is how the
//! source layout survives translation.

use decaf_common::token::{Channel, Token, TokenKind};

pub(crate) struct TranslationState<'a> {
    tokens: &'a [Token],
    source: &'a str,
    cursor: usize,
    out: String,
}

impl<'a> TranslationState<'a> {
    pub(crate) fn new(tokens: &'a [Token], source: &'a str, cursor: usize) -> Self {
        Self {
            tokens,
            source,
            cursor,
            out: String::new(),
        }
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn into_output(self) -> String {
        self.out
    }

    /// Append text without moving the cursor.
    pub(crate) fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Replay hidden tokens up to, not including, `index`.
    ///
    /// Panics if the cursor would move backwards or a significant token would
    /// be passed over: both mean the traversal lost track of the stream.
    pub(crate) fn replay_to(&mut self, index: usize) {
        assert!(
            index >= self.cursor,
            "cursor moved backwards from {} to {index}",
            self.cursor
        );
        while self.cursor < index {
            let token = self.tokens[self.cursor];
            assert!(
                token.channel() == Channel::Hidden,
                "significant token {:?} at {} was never emitted",
                token.kind,
                self.cursor
            );
            self.out.push_str(token.span.text(self.source));
            self.cursor += 1;
        }
    }

    /// Replay up to the token at `index`, write `text` in its place and move
    /// past it.
    pub(crate) fn emit(&mut self, index: usize, text: &str) {
        self.replay_to(index);
        self.out.push_str(text);
        self.cursor = index + 1;
    }

    /// Move the cursor to `index`, dropping everything in between.
    pub(crate) fn skip_to(&mut self, index: usize) {
        assert!(
            index >= self.cursor,
            "cursor moved backwards from {} to {index}",
            self.cursor
        );
        self.cursor = index;
    }

    /// Drop whitespace tokens at the cursor.
    pub(crate) fn skip_whitespace(&mut self) {
        while self
            .tokens
            .get(self.cursor)
            .is_some_and(|t| t.kind == TokenKind::Whitespace)
        {
            self.cursor += 1;
        }
    }

    /// Like `replay_to`, but whitespace is dropped and only comments are
    /// replayed.
    pub(crate) fn replay_comments_to(&mut self, index: usize) {
        assert!(
            index >= self.cursor,
            "cursor moved backwards from {} to {index}",
            self.cursor
        );
        while self.cursor < index {
            let token = self.tokens[self.cursor];
            if token.kind != TokenKind::Whitespace {
                self.replay_to(self.cursor + 1);
            } else {
                self.cursor += 1;
            }
        }
    }

    /// Move the cursor to `index`, dropping everything in between except
    /// comments and the whitespace right after each of them.
    pub(crate) fn salvage_comments_to(&mut self, index: usize) {
        assert!(
            index >= self.cursor,
            "cursor moved backwards from {} to {index}",
            self.cursor
        );
        let mut after_comment = false;
        while self.cursor < index {
            let token = self.tokens[self.cursor];
            let keep = match token.kind {
                TokenKind::LineComment | TokenKind::BlockComment => true,
                TokenKind::Whitespace => after_comment,
                _ => false,
            };
            if keep {
                self.out.push_str(token.span.text(self.source));
            }
            after_comment = matches!(token.kind, TokenKind::LineComment | TokenKind::BlockComment);
            self.cursor += 1;
        }
    }

    /// Whether the token at `index` is hidden. Out-of-range counts as not.
    pub(crate) fn is_hidden(&self, index: usize) -> bool {
        self.tokens
            .get(index)
            .is_some_and(|t| t.channel() == Channel::Hidden)
    }

    /// Text of the whitespace token at `index`, if it is one.
    pub(crate) fn whitespace_at(&self, index: usize) -> Option<&'a str> {
        let token = self.tokens.get(index)?;
        (token.kind == TokenKind::Whitespace).then(|| token.span.text(self.source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decaf_lexer::Lexer;

    fn with_state(source: &str, f: impl FnOnce(&mut TranslationState<'_>)) -> String {
        let tokens = Lexer::tokenize(source);
        let mut state = TranslationState::new(&tokens, source, 0);
        f(&mut state);
        state.into_output()
    }

    #[test]
    fn emit_replays_hidden_prefix() {
        // a /* c */ b  →  tokens: a, ws, comment, ws, b, eof
        let out = with_state("a /* c */ b", |s| {
            s.emit(0, "A");
            s.emit(4, "B");
            assert_eq!(s.cursor(), 5);
        });
        assert_eq!(out, "A /* c */ B");
    }

    #[test]
    fn comments_survive_tight_replay() {
        let out = with_state("a /* c */ b", |s| {
            s.emit(0, "A");
            s.replay_comments_to(4);
            s.emit(4, "B");
        });
        assert_eq!(out, "A/* c */B");
    }

    #[test]
    fn salvage_keeps_comments_only() {
        // a ( /* c */ b /* d */ ) e
        let out = with_state("a( /* c */ b /* d */) e", |s| {
            s.emit(0, "A");
            s.salvage_comments_to(5);
            s.emit(5, "B");
            s.salvage_comments_to(9);
            s.emit(10, "E");
        });
        assert_eq!(out, "A/* c */ B/* d */ E");
    }

    #[test]
    fn skip_drops_tokens() {
        let out = with_state("a b c", |s| {
            s.emit(0, "a");
            s.skip_to(3);
            s.skip_whitespace();
            s.emit(4, "c");
        });
        assert_eq!(out, "ac");
    }

    #[test]
    #[should_panic(expected = "cursor moved backwards")]
    fn cursor_never_decreases() {
        with_state("a b", |s| {
            s.emit(2, "b");
            s.emit(0, "a");
        });
    }

    #[test]
    #[should_panic(expected = "was never emitted")]
    fn passing_a_significant_token_panics() {
        with_state("a b", |s| {
            s.emit(2, "b");
        });
    }
}
