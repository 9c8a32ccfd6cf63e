// ABOUTME: Lexer module converting source text into a token stream

use crate::token::{lookup_identifier, Token, TokenKind};

/// Sentinel for "no character" — mirrors the codepoint-0 EOF marker the
/// char-cursor design uses instead of an `Option<char>` at every field.
const EOF_CHAR: char = '\0';

/// Single-pass, one-codepoint-lookahead cursor over a UTF-8 source string.
pub struct Lexer {
    source: String,
    curr_char_position: usize,
    next_char_position: usize,
    curr_char: char,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Self {
        let mut lexer = Lexer {
            source: source.into(),
            curr_char_position: 0,
            next_char_position: 0,
            curr_char: EOF_CHAR,
        };
        lexer.read_next_char();
        lexer.skip_whitespace_and_comments();
        lexer
    }

    /// Returns the next token. Never fails: invalid constructs are surfaced
    /// as `TokenKind::Illegal` tokens rather than a `Result`, so the caller
    /// (the parser) can keep going and accumulate error messages.
    pub fn next_token(&mut self) -> Token {
        let tok = match self.curr_char {
            '{' => Token::new(TokenKind::LeftBrace, "{"),
            '}' => Token::new(TokenKind::RightBrace, "}"),
            '[' => Token::new(TokenKind::LeftBracket, "["),
            ']' => Token::new(TokenKind::RightBracket, "]"),
            '(' => Token::new(TokenKind::LeftParen, "("),
            ')' => Token::new(TokenKind::RightParen, ")"),
            ':' => Token::new(TokenKind::Colon, ":"),
            ',' => Token::new(TokenKind::Comma, ","),
            ';' => Token::new(TokenKind::Semicolon, ";"),
            '=' => self.read_equals_or_default(TokenKind::Equals, TokenKind::Illegal),
            '!' => self.read_equals_or_default(TokenKind::NotEquals, TokenKind::Bang),
            '>' => self.read_equals_or_default(TokenKind::GreaterEquals, TokenKind::GreaterThan),
            '<' => self.read_equals_or_default(TokenKind::LesserEquals, TokenKind::LesserThan),
            '+' => Token::new(TokenKind::Addition, "+"),
            '-' => Token::new(TokenKind::Subtraction, "-"),
            '*' => Token::new(TokenKind::Multiplication, "*"),
            '/' => Token::new(TokenKind::Division, "/"),
            '"' => self.read_string(),
            EOF_CHAR => Token::new(TokenKind::Eof, ""),
            c if is_ident_start(c) => self.read_identifier(),
            c if c.is_numeric() => self.read_number(),
            c => Token::new(TokenKind::Illegal, c.to_string()),
        };

        self.read_next_char();
        self.skip_whitespace_and_comments();
        tok
    }

    fn read_next_char(&mut self) {
        if self.next_char_position >= self.source.len() {
            self.curr_char_position = self.next_char_position;
            self.curr_char = EOF_CHAR;
            return;
        }
        let ch = self.source[self.next_char_position..]
            .chars()
            .next()
            .expect("next_char_position is a valid char boundary");
        self.curr_char_position = self.next_char_position;
        self.next_char_position += ch.len_utf8();
        self.curr_char = ch;
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.next_char_position..].chars().next()
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            let mut advanced = false;

            while self.curr_char != EOF_CHAR && self.curr_char.is_whitespace() {
                self.read_next_char();
                advanced = true;
            }

            if self.curr_char == '/' && self.peek_char() == Some('/') {
                while self.curr_char != EOF_CHAR
                    && self.curr_char != '\n'
                    && self.curr_char != '\r'
                {
                    self.read_next_char();
                }
                advanced = true;
            }

            if !advanced {
                break;
            }
        }
    }

    fn read_equals_or_default(&mut self, compound: TokenKind, default: TokenKind) -> Token {
        if self.peek_char() == Some('=') {
            let first = self.curr_char;
            self.read_next_char();
            let mut literal = String::new();
            literal.push(first);
            literal.push(self.curr_char);
            Token::new(compound, literal)
        } else {
            Token::new(default, self.curr_char.to_string())
        }
    }

    /// Consumes codepoints until an unescaped `"`. A `\` sets a one-codepoint
    /// escape flag that suppresses the next `"` from closing the string; no
    /// escape sequence is otherwise interpreted. An EOF before the closing
    /// quote stops the scan rather than looping forever, returning whatever
    /// was collected — the lexer never aborts on malformed input.
    fn read_string(&mut self) -> Token {
        let mut content = String::new();
        let mut escaped = false;
        loop {
            self.read_next_char();
            if self.curr_char == EOF_CHAR {
                break;
            }
            if self.curr_char == '"' && !escaped {
                break;
            }
            escaped = self.curr_char == '\\';
            content.push(self.curr_char);
        }
        Token::new(TokenKind::String, content)
    }

    fn read_identifier(&mut self) -> Token {
        let mut identifier = String::new();
        loop {
            identifier.push(self.curr_char);
            match self.peek_char() {
                Some(next) if is_ident_continue(next) => self.read_next_char(),
                _ => break,
            }
        }
        lookup_identifier(&identifier)
    }

    /// Reads a digit-led sequence; a second `.` is a lex error (`ILLEGAL`).
    fn read_number(&mut self) -> Token {
        let mut number = String::new();
        let mut dot_seen = false;
        loop {
            number.push(self.curr_char);
            if self.curr_char == '.' {
                if dot_seen {
                    return Token::new(TokenKind::Illegal, number);
                }
                dot_seen = true;
            }
            match self.peek_char() {
                Some(next) if next.is_numeric() || next == '.' => self.read_next_char(),
                _ => break,
            }
        }
        Token::new(TokenKind::Number, number)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token();
            let done = tok.kind == TokenKind::Eof;
            out.push(tok);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn single_char_operators_and_delimiters() {
        let toks = tokens("+-*/(){}[],:;");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Addition,
                TokenKind::Subtraction,
                TokenKind::Multiplication,
                TokenKind::Division,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn compound_comparison_operators() {
        let toks = tokens("== != >= <= > < !");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Equals,
                TokenKind::NotEquals,
                TokenKind::GreaterEquals,
                TokenKind::LesserEquals,
                TokenKind::GreaterThan,
                TokenKind::LesserThan,
                TokenKind::Bang,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lone_equals_is_illegal() {
        let toks = tokens("=");
        assert_eq!(toks[0].kind, TokenKind::Illegal);
        assert_eq!(toks[0].literal, "=");
    }

    #[test]
    fn keyword_assignment_token() {
        let toks = tokens("ne_bana_diye");
        assert_eq!(toks[0].kind, TokenKind::Assignment);
        assert_eq!(toks[0].literal, "=");
    }

    #[test]
    fn string_literal_with_escape() {
        let toks = tokens(r#""hello \"world\"""#);
        assert_eq!(toks[0].kind, TokenKind::String);
        assert_eq!(toks[0].literal, r#"hello \"world\""#);
    }

    #[test]
    fn number_literal_with_decimal_point() {
        let toks = tokens("3.14");
        assert_eq!(toks[0].kind, TokenKind::Number);
        assert_eq!(toks[0].literal, "3.14");
    }

    #[test]
    fn number_with_second_dot_is_illegal() {
        let toks = tokens("3.1.4");
        assert_eq!(toks[0].kind, TokenKind::Illegal);
    }

    #[test]
    fn identifier_with_underscore() {
        let toks = tokens("my_var2");
        assert_eq!(toks[0].kind, TokenKind::Identifier);
        assert_eq!(toks[0].literal, "my_var2");
    }

    #[test]
    fn line_comment_is_skipped() {
        let toks = tokens("5 // a comment\n6");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Number, TokenKind::Number, TokenKind::Eof]);
        assert_eq!(toks[0].literal, "5");
        assert_eq!(toks[1].literal, "6");
    }

    #[test]
    fn comment_only_source_yields_eof() {
        let toks = tokens("// laadle_ye_le 5;");
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::Eof);
    }

    #[test]
    fn unrecognized_codepoint_is_illegal() {
        let toks = tokens("@");
        assert_eq!(toks[0].kind, TokenKind::Illegal);
        assert_eq!(toks[0].literal, "@");
    }

    #[test]
    fn full_keyword_program() {
        let toks = tokens("sun_liyo_tau x ne_bana_diye 5;");
        let kinds: Vec<_> = toks.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Let,
                TokenKind::Identifier,
                TokenKind::Assignment,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }
}
