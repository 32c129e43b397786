//! Lexer/Scanner for Mython source code.
//!
//! Mython is layout-sensitive: the scanner works one physical line at a time,
//! turning leading spaces into `Indent`/`Dedent` tokens (two spaces per level)
//! and terminating every non-empty line with a `Newline`.

use crate::error::LexerError;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// Number of spaces making up one indentation level.
const INDENT_WIDTH: usize = 2;

/// The lexer transforms source code into a stream of tokens.
pub struct Scanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: usize,
    column: usize,
    start_pos: usize,
    start_line: usize,
    start_column: usize,
    indent_level: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            column: 1,
            start_pos: 0,
            start_line: 1,
            start_column: 1,
            indent_level: 0,
        }
    }

    /// Scan all tokens from the source.
    ///
    /// The result always ends with the `Dedent`s needed to return to column
    /// zero followed by a single `Eof`.
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();

        while self.peek().is_some() {
            self.scan_line(&mut tokens)?;
        }

        self.mark_start();
        while self.indent_level > 0 {
            tokens.push(self.make_token(TokenKind::Dedent));
            self.indent_level -= 1;
        }
        tokens.push(Token::eof(self.current_pos, self.line, self.column));

        Ok(tokens)
    }

    fn scan_line(&mut self, tokens: &mut Vec<Token>) -> Result<(), LexerError> {
        self.mark_start();
        let mut width = 0;
        loop {
            match self.peek() {
                Some(' ') => {
                    self.advance();
                    width += 1;
                }
                Some('\r') => {
                    self.advance();
                }
                Some('\t') => return Err(LexerError::invalid_indent(self.current_span())),
                _ => break,
            }
        }

        // Blank and comment-only lines do not affect layout.
        match self.peek() {
            None => return Ok(()),
            Some('\n') => {
                self.advance();
                return Ok(());
            }
            Some('#') => {
                self.skip_comment();
                self.advance();
                return Ok(());
            }
            _ => {}
        }

        if width % INDENT_WIDTH != 0 {
            return Err(LexerError::invalid_indent(self.current_span()));
        }
        let level = width / INDENT_WIDTH;
        while self.indent_level < level {
            tokens.push(self.make_token(TokenKind::Indent));
            self.indent_level += 1;
        }
        while self.indent_level > level {
            tokens.push(self.make_token(TokenKind::Dedent));
            self.indent_level -= 1;
        }

        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r') => {
                    self.advance();
                }
                Some('#') => self.skip_comment(),
                Some('\n') => {
                    self.mark_start();
                    self.advance();
                    break;
                }
                None => {
                    self.mark_start();
                    break;
                }
                Some(_) => tokens.push(self.scan_token()?),
            }
        }
        tokens.push(self.make_token(TokenKind::Newline));

        Ok(())
    }

    /// Scan the next token on the current line.
    fn scan_token(&mut self) -> Result<Token, LexerError> {
        self.mark_start();

        let Some((_, c)) = self.advance() else {
            return Ok(Token::eof(self.current_pos, self.line, self.column));
        };

        match c {
            '=' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::Eq))
                } else {
                    Ok(self.make_token(TokenKind::Char('=')))
                }
            }
            '!' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::NotEq))
                } else {
                    Ok(self.make_token(TokenKind::Char('!')))
                }
            }
            '<' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::LessOrEq))
                } else {
                    Ok(self.make_token(TokenKind::Char('<')))
                }
            }
            '>' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::GreaterOrEq))
                } else {
                    Ok(self.make_token(TokenKind::Char('>')))
                }
            }

            // String literals
            '"' | '\'' => self.scan_string(c),

            // Numbers
            c if c.is_ascii_digit() => self.scan_number(),

            // Identifiers and keywords
            c if c.is_alphabetic() || c == '_' => self.scan_identifier(),

            c if c.is_ascii_punctuation() => Ok(self.make_token(TokenKind::Char(c))),

            _ => Err(LexerError::unexpected_char(c, self.current_span())),
        }
    }

    fn skip_comment(&mut self) {
        while self.peek().is_some() && self.peek() != Some('\n') {
            self.advance();
        }
    }

    fn scan_string(&mut self, quote: char) -> Result<Token, LexerError> {
        let mut value = String::new();

        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(LexerError::unterminated_string(self.current_span()));
                }
                Some('\\') => {
                    self.advance();
                    let escaped = match self.peek() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('"') => '"',
                        Some('\'') => '\'',
                        Some('\\') => '\\',
                        Some(other) => {
                            return Err(LexerError::invalid_escape(other, self.current_span()))
                        }
                        None => return Err(LexerError::unterminated_string(self.current_span())),
                    };
                    self.advance();
                    value.push(escaped);
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }

        Ok(self.make_token(TokenKind::StringLiteral(value)))
    }

    fn scan_number(&mut self) -> Result<Token, LexerError> {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }

        let text = &self.source[self.start_pos..self.current_pos];
        let value: i64 = text
            .parse()
            .map_err(|_| LexerError::invalid_number(text.to_string(), self.current_span()))?;

        Ok(self.make_token(TokenKind::Number(value)))
    }

    fn scan_identifier(&mut self) -> Result<Token, LexerError> {
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }

        let text = &self.source[self.start_pos..self.current_pos];
        let kind =
            TokenKind::keyword(text).unwrap_or_else(|| TokenKind::Identifier(text.to_string()));

        Ok(self.make_token(kind))
    }

    // ===== Character helpers =====

    fn advance(&mut self) -> Option<(usize, char)> {
        let (idx, c) = self.chars.next()?;
        self.current_pos = idx + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some((idx, c))
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn mark_start(&mut self) {
        self.start_pos = self.current_pos;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.current_span())
    }

    fn current_span(&self) -> Span {
        Span::new(
            self.start_pos,
            self.current_pos,
            self.start_line,
            self.start_column,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(source: &str) -> Vec<TokenKind> {
        Scanner::new(source)
            .scan_tokens()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn id(name: &str) -> TokenKind {
        TokenKind::Identifier(name.to_string())
    }

    #[test]
    fn test_simple_statement() {
        assert_eq!(
            scan("x = 42"),
            vec![
                id("x"),
                TokenKind::Char('='),
                TokenKind::Number(42),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            scan("class return if else def print and or not None True False"),
            vec![
                TokenKind::Class,
                TokenKind::Return,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::Def,
                TokenKind::Print,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::None,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            scan("a == b != c <= d >= e < f > g"),
            vec![
                id("a"),
                TokenKind::Eq,
                id("b"),
                TokenKind::NotEq,
                id("c"),
                TokenKind::LessOrEq,
                id("d"),
                TokenKind::GreaterOrEq,
                id("e"),
                TokenKind::Char('<'),
                id("f"),
                TokenKind::Char('>'),
                id("g"),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_strings_and_escapes() {
        assert_eq!(
            scan(r#"print 'it\'s', "tab\there", "a#b""#),
            vec![
                TokenKind::Print,
                TokenKind::StringLiteral("it's".to_string()),
                TokenKind::Char(','),
                TokenKind::StringLiteral("tab\there".to_string()),
                TokenKind::Char(','),
                TokenKind::StringLiteral("a#b".to_string()),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_indentation() {
        let source = "class A:\n  def f(self):\n    return 1\nx = 2\n";
        assert_eq!(
            scan(source),
            vec![
                TokenKind::Class,
                id("A"),
                TokenKind::Char(':'),
                TokenKind::Newline,
                TokenKind::Indent,
                TokenKind::Def,
                id("f"),
                TokenKind::Char('('),
                id("self"),
                TokenKind::Char(')'),
                TokenKind::Char(':'),
                TokenKind::Newline,
                TokenKind::Indent,
                TokenKind::Return,
                TokenKind::Number(1),
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::Dedent,
                id("x"),
                TokenKind::Char('='),
                TokenKind::Number(2),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_dedent_at_end_of_input() {
        assert_eq!(
            scan("if x:\n  y = 1"),
            vec![
                TokenKind::If,
                id("x"),
                TokenKind::Char(':'),
                TokenKind::Newline,
                TokenKind::Indent,
                id("y"),
                TokenKind::Char('='),
                TokenKind::Number(1),
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_blank_lines_and_comments_are_skipped() {
        let source = "# header\n\nx = 1  # trailing\n   \n    # indented comment\ny = 2\n";
        assert_eq!(
            scan(source),
            vec![
                id("x"),
                TokenKind::Char('='),
                TokenKind::Number(1),
                TokenKind::Newline,
                id("y"),
                TokenKind::Char('='),
                TokenKind::Number(2),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(scan(""), vec![TokenKind::Eof]);
        assert_eq!(scan("\n\n# only a comment\n"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_dotted_access() {
        assert_eq!(
            scan("self.x.y"),
            vec![
                id("self"),
                TokenKind::Char('.'),
                id("x"),
                TokenKind::Char('.'),
                id("y"),
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_odd_indentation_is_rejected() {
        let err = Scanner::new("if x:\n   y = 1\n").scan_tokens().unwrap_err();
        assert!(matches!(err, LexerError::InvalidIndent(_)));
    }

    #[test]
    fn test_unterminated_string() {
        let err = Scanner::new("print 'abc\n").scan_tokens().unwrap_err();
        assert!(matches!(err, LexerError::UnterminatedString(_)));
    }

    #[test]
    fn test_number_overflow() {
        let err = Scanner::new("x = 99999999999999999999")
            .scan_tokens()
            .unwrap_err();
        assert!(matches!(err, LexerError::InvalidNumber(..)));
    }

    #[test]
    fn test_token_spans() {
        let tokens = Scanner::new("x = 1\nyy = 2").scan_tokens().unwrap();
        let yy = tokens
            .iter()
            .find(|t| t.kind == id("yy"))
            .unwrap();
        assert_eq!(yy.span, Span::new(6, 8, 2, 1));
    }
}
