// Java lexer: every byte of the input ends up in exactly one token.

mod cursor;

use cursor::Cursor;
use decaf_common::error::{LexError, LexErrorKind};
use decaf_common::span::Span;
use decaf_common::token::{keyword_from_str, Token, TokenKind};

/// Converts Java source text into a stream of tokens.
///
/// Unlike a compiler front end, whitespace and comments are produced as
/// tokens too (see [`TokenKind::is_trivia`]); concatenating the text of
/// every token reproduces the input exactly. The stream always ends with a
/// zero-length `Eof` token.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    emitted_eof: bool,
    errors: Vec<LexError>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            emitted_eof: false,
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source, including the final `Eof` token.
    pub fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    /// Tokenize and also return every lexical error encountered.
    pub fn tokenize_with_errors(source: &str) -> (Vec<Token>, Vec<LexError>) {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.by_ref().collect();
        (tokens, lexer.errors)
    }

    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    fn next_token(&mut self) -> Token {
        let start = self.cursor.pos();

        let Some(c) = self.cursor.peek() else {
            return Token::new(TokenKind::Eof, start, start);
        };

        match c {
            c if is_whitespace(c) => {
                self.cursor.eat_while(is_whitespace);
                self.token(TokenKind::Whitespace, start)
            }

            // ── Separators ─────────────────────────────────────────────
            '(' => self.single_char_token(TokenKind::LParen, start),
            ')' => self.single_char_token(TokenKind::RParen, start),
            '{' => self.single_char_token(TokenKind::LBrace, start),
            '}' => self.single_char_token(TokenKind::RBrace, start),
            '[' => self.single_char_token(TokenKind::LBracket, start),
            ']' => self.single_char_token(TokenKind::RBracket, start),
            ';' => self.single_char_token(TokenKind::Semicolon, start),
            ',' => self.single_char_token(TokenKind::Comma, start),
            '@' => self.single_char_token(TokenKind::At, start),
            '~' => self.single_char_token(TokenKind::Tilde, start),
            '?' => self.single_char_token(TokenKind::Question, start),
            // Never fused: see the note on `TokenKind`.
            '>' => self.single_char_token(TokenKind::Gt, start),
            '.' => self.lex_dot(start),
            ':' => self.lex_colon(start),

            // ── Operators ──────────────────────────────────────────────
            '=' => self.lex_with_eq(start, TokenKind::Eq, TokenKind::EqEq),
            '!' => self.lex_with_eq(start, TokenKind::Bang, TokenKind::NotEq),
            '*' => self.lex_with_eq(start, TokenKind::Star, TokenKind::StarEq),
            '%' => self.lex_with_eq(start, TokenKind::Percent, TokenKind::PercentEq),
            '^' => self.lex_with_eq(start, TokenKind::Caret, TokenKind::CaretEq),
            '<' => self.lex_lt(start),
            '&' => self.lex_doubled(start, '&', TokenKind::Amp, TokenKind::AmpAmp, TokenKind::AmpEq),
            '|' => self.lex_doubled(start, '|', TokenKind::Pipe, TokenKind::PipePipe, TokenKind::PipeEq),
            '+' => self.lex_doubled(start, '+', TokenKind::Plus, TokenKind::PlusPlus, TokenKind::PlusEq),
            '-' => self.lex_minus(start),
            '/' => self.lex_slash(start),

            // ── Literals ───────────────────────────────────────────────
            '0'..='9' => self.lex_number(start),
            '"' => self.lex_quoted(start, '"'),
            '\'' => self.lex_quoted(start, '\''),

            c if is_ident_start(c) => self.lex_ident(start),

            _ => {
                self.cursor.advance();
                let token = self.token(TokenKind::Error, start);
                self.errors
                    .push(LexError::new(LexErrorKind::UnexpectedCharacter(c), token.span));
                token
            }
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    fn token(&self, kind: TokenKind, start: u32) -> Token {
        Token::new(kind, start, self.cursor.pos())
    }

    fn single_char_token(&mut self, kind: TokenKind, start: u32) -> Token {
        self.cursor.advance();
        self.token(kind, start)
    }

    /// `x` or `x=`.
    fn lex_with_eq(&mut self, start: u32, plain: TokenKind, with_eq: TokenKind) -> Token {
        self.cursor.advance();
        let kind = if self.cursor.eat('=') { with_eq } else { plain };
        self.token(kind, start)
    }

    /// `x`, `xx` or `x=` (for `&`, `|`, `+`).
    fn lex_doubled(
        &mut self,
        start: u32,
        c: char,
        plain: TokenKind,
        doubled: TokenKind,
        with_eq: TokenKind,
    ) -> Token {
        self.cursor.advance();
        let kind = if self.cursor.eat(c) {
            doubled
        } else if self.cursor.eat('=') {
            with_eq
        } else {
            plain
        };
        self.token(kind, start)
    }

    /// `<`, `<=`, `<<`, `<<=`
    fn lex_lt(&mut self, start: u32) -> Token {
        self.cursor.advance();
        let kind = if self.cursor.eat('<') {
            if self.cursor.eat('=') {
                TokenKind::ShlEq
            } else {
                TokenKind::Shl
            }
        } else if self.cursor.eat('=') {
            TokenKind::LtEq
        } else {
            TokenKind::Lt
        };
        self.token(kind, start)
    }

    /// `-`, `--`, `-=`, `->`
    fn lex_minus(&mut self, start: u32) -> Token {
        self.cursor.advance();
        let kind = if self.cursor.eat('-') {
            TokenKind::MinusMinus
        } else if self.cursor.eat('=') {
            TokenKind::MinusEq
        } else if self.cursor.eat('>') {
            TokenKind::Arrow
        } else {
            TokenKind::Minus
        };
        self.token(kind, start)
    }

    /// `.`, `...`, or a float literal such as `.5`.
    fn lex_dot(&mut self, start: u32) -> Token {
        if self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            return self.lex_number(start);
        }
        self.cursor.advance();
        if self.cursor.peek() == Some('.') && self.cursor.peek_next() == Some('.') {
            self.cursor.advance();
            self.cursor.advance();
            return self.token(TokenKind::Ellipsis, start);
        }
        self.token(TokenKind::Dot, start)
    }

    /// `:` or `::`
    fn lex_colon(&mut self, start: u32) -> Token {
        self.cursor.advance();
        let kind = if self.cursor.eat(':') {
            TokenKind::ColonColon
        } else {
            TokenKind::Colon
        };
        self.token(kind, start)
    }

    // ── Comments ─────────────────────────────────────────────────────────

    /// `/`, `/=`, `// ...` or `/* ... */`.
    ///
    /// Line comments stop before the newline so the newline stays in the
    /// following whitespace token.
    fn lex_slash(&mut self, start: u32) -> Token {
        self.cursor.advance();
        match self.cursor.peek() {
            Some('/') => {
                self.cursor.eat_while(|c| c != '\n' && c != '\r');
                self.token(TokenKind::LineComment, start)
            }
            Some('*') => {
                self.cursor.advance();
                loop {
                    match self.cursor.advance() {
                        Some('*') if self.cursor.peek() == Some('/') => {
                            self.cursor.advance();
                            break;
                        }
                        Some(_) => {}
                        None => {
                            self.errors.push(LexError::new(
                                LexErrorKind::UnterminatedBlockComment,
                                Span::new(start, self.cursor.pos()),
                            ));
                            break;
                        }
                    }
                }
                self.token(TokenKind::BlockComment, start)
            }
            Some('=') => {
                self.cursor.advance();
                self.token(TokenKind::SlashEq, start)
            }
            _ => self.token(TokenKind::Slash, start),
        }
    }

    // ── Number literals ──────────────────────────────────────────────────

    /// Decimal, hex, octal and binary integers, and floating point literals
    /// with optional exponent and type suffix. Underscores are accepted
    /// anywhere a digit is.
    fn lex_number(&mut self, start: u32) -> Token {
        if self.cursor.peek() == Some('0')
            && matches!(self.cursor.peek_next(), Some('x' | 'X' | 'b' | 'B'))
        {
            self.cursor.advance();
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_hexdigit() || c == '_');
            self.cursor.eat_while(|c| matches!(c, 'l' | 'L'));
            return self.token(TokenKind::IntLiteral, start);
        }

        let mut is_float = false;
        self.cursor.eat_while(is_digit);

        if self.cursor.peek() == Some('.')
            && !self.cursor.peek_next().is_some_and(is_ident_start)
            && self.cursor.peek_next() != Some('.')
        {
            is_float = true;
            self.cursor.advance();
            self.cursor.eat_while(is_digit);
        }

        if matches!(self.cursor.peek(), Some('e' | 'E')) {
            is_float = true;
            self.cursor.advance();
            if matches!(self.cursor.peek(), Some('+' | '-')) {
                self.cursor.advance();
            }
            self.cursor.eat_while(is_digit);
        }

        match self.cursor.peek() {
            Some('f' | 'F' | 'd' | 'D') => {
                self.cursor.advance();
                is_float = true;
            }
            Some('l' | 'L') if !is_float => {
                self.cursor.advance();
            }
            _ => {}
        }

        let kind = if is_float {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntLiteral
        };
        self.token(kind, start)
    }

    // ── String and character literals ────────────────────────────────────

    /// Lex a `"..."` or `'...'` literal as a single token.
    ///
    /// An unterminated literal stops at the end of the line and becomes an
    /// `Error` token.
    fn lex_quoted(&mut self, start: u32, quote: char) -> Token {
        self.cursor.advance();
        loop {
            match self.cursor.peek() {
                Some(c) if c == quote => {
                    self.cursor.advance();
                    let kind = if quote == '"' {
                        TokenKind::StringLiteral
                    } else {
                        TokenKind::CharLiteral
                    };
                    return self.token(kind, start);
                }
                Some('\\') => {
                    self.cursor.advance();
                    if self.cursor.peek().is_some_and(|c| c != '\n') {
                        self.cursor.advance();
                    }
                }
                Some('\n' | '\r') | None => {
                    let kind = if quote == '"' {
                        LexErrorKind::UnterminatedString
                    } else {
                        LexErrorKind::UnterminatedChar
                    };
                    let token = self.token(TokenKind::Error, start);
                    self.errors.push(LexError::new(kind, token.span));
                    return token;
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    // ── Identifiers and keywords ─────────────────────────────────────────

    fn lex_ident(&mut self, start: u32) -> Token {
        self.cursor.advance();
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice(start, self.cursor.pos());
        let kind = keyword_from_str(text).unwrap_or(TokenKind::Ident);
        self.token(kind, start)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.emitted_eof {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.emitted_eof = true;
        }
        Some(token)
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0C')
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || c == '_'
}

/// Java identifiers may contain `$` and `_` anywhere.
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lex_local_declaration_with_trivia() {
        assert_eq!(
            kinds("int x = 42;"),
            vec![
                TokenKind::Int,
                TokenKind::Whitespace,
                TokenKind::Ident,
                TokenKind::Whitespace,
                TokenKind::Eq,
                TokenKind::Whitespace,
                TokenKind::IntLiteral,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn greater_than_is_never_fused() {
        assert_eq!(
            kinds(">>>="),
            vec![
                TokenKind::Gt,
                TokenKind::Gt,
                TokenKind::Gt,
                TokenKind::Eq,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_are_tokens() {
        assert_eq!(
            kinds("a // hi\n/* b */"),
            vec![
                TokenKind::Ident,
                TokenKind::Whitespace,
                TokenKind::LineComment,
                TokenKind::Whitespace,
                TokenKind::BlockComment,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn number_forms() {
        assert_eq!(kinds("0x1F")[0], TokenKind::IntLiteral);
        assert_eq!(kinds("10L")[0], TokenKind::IntLiteral);
        assert_eq!(kinds("1_000")[0], TokenKind::IntLiteral);
        assert_eq!(kinds("1.5f")[0], TokenKind::FloatLiteral);
        assert_eq!(kinds(".5")[0], TokenKind::FloatLiteral);
        assert_eq!(kinds("1e10")[0], TokenKind::FloatLiteral);
        assert_eq!(kinds("2d")[0], TokenKind::FloatLiteral);
        assert_eq!(kinds("1.")[0], TokenKind::FloatLiteral);
    }

    #[test]
    fn member_access_on_integer_is_not_a_float() {
        assert_eq!(
            kinds("1.toString"),
            vec![TokenKind::IntLiteral, TokenKind::Dot, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn tokens_cover_the_whole_input() {
        let source = "class A { /* c */ String s = \"x\\\"y\"; char c = '\\''; }\n";
        let tokens = Lexer::tokenize(source);
        let rebuilt: String = tokens.iter().map(|t| t.span.text(source)).collect();
        assert_eq!(rebuilt, source);
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert!(eof.span.is_empty());
    }

    #[test]
    fn unterminated_string_is_reported() {
        let (tokens, errors) = Lexer::tokenize_with_errors("\"abc\nx");
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, LexErrorKind::UnterminatedString);
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
    }

    #[test]
    fn unexpected_character_is_reported() {
        let (tokens, errors) = Lexer::tokenize_with_errors("a # b");
        assert_eq!(tokens[2].kind, TokenKind::Error);
        assert_eq!(errors[0].kind, LexErrorKind::UnexpectedCharacter('#'));
    }
}
