use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::ScanError;
use crate::literal::Literal;
use crate::token::{Token, Type};

pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    line: usize,
    had_error: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner.
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            tokens: vec!(),
            line: 1,
            had_error: false,
        }
    }

    /// Scans the source code and returns a vector of tokens, always
    /// terminated by a single end-of-input sentinel.
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(Type::EOF, String::new(), None, self.line));

        self.tokens.clone()
    }

    /// Returns if any lexical error was reported during the scan.
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Returns if the scanner has reached the end of the source.
    fn is_at_end(&mut self) -> bool {
        self.source.reset_cursor();
        self.source.peek().is_none()
    }

    /// Consumes and returns the next character.
    fn advance(&mut self) -> char {
        self.source.next().expect("advanced past the end of the source")
    }

    /// Returns the next character without consuming it.
    fn peek(&mut self) -> Option<char> {
        self.source.reset_cursor();
        self.source.peek().copied()
    }

    /// Returns the character after the next one without consuming either.
    fn peek_next(&mut self) -> Option<char> {
        self.source.reset_cursor();
        self.source.advance_cursor();
        let char = self.source.peek().copied();
        self.source.reset_cursor();
        char
    }

    /// Consumes the next character if it matches the expected one.
    fn match_next(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            return true;
        }

        false
    }

    /// Adds a new token to the list of tokens.
    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(Token::new(r#type, lexeme, literal, self.line));
    }

    /// Reports a lexical error and keeps scanning.
    fn error(&mut self, line: usize, message: String) {
        ScanError { line, message }.report();
        self.had_error = true;
    }

    /// Handles a string literal. The lexeme and the literal both hold
    /// the contents between the quotes.
    fn string(&mut self) {
        let start = self.line;

        let mut value = String::new();
        loop {
            match self.source.next() {
                Some('"') => {
                    self.add_token(Type::String, value.clone(), Some(Literal::String(value)));
                    return;
                },
                Some(char) => {
                    if char == '\n' {
                        self.line += 1;
                    }
                    value.push(char);
                },
                None => {
                    // The error points at the opening quote's line.
                    self.error(start, String::from("Unterminated string."));
                    return;
                },
            }
        }
    }

    /// Handles a number literal. A dot is only part of the number when
    /// a digit follows it.
    fn number(&mut self, first: char) {
        let mut value = String::from(first);

        while matches!(self.peek(), Some(char) if char.is_ascii_digit()) {
            value.push(self.advance());
        }

        if self.peek() == Some('.') && matches!(self.peek_next(), Some(char) if char.is_ascii_digit()) {
            value.push(self.advance());

            while matches!(self.peek(), Some(char) if char.is_ascii_digit()) {
                value.push(self.advance());
            }
        }

        let number: f64 = value.parse().expect("digits to form a valid number");
        self.add_token(Type::Number, value, Some(Literal::Number(number)));
    }

    /// Handles an identifier or a keyword.
    fn identifier(&mut self, first: char) {
        let mut value = String::from(first);

        while matches!(self.peek(), Some(char) if char.is_ascii_alphanumeric() || char == '_') {
            value.push(self.advance());
        }

        let r#type = match value.as_str() {
            "and"      => Type::And,
            "class"    => Type::Class,
            "else"     => Type::Else,
            "false"    => Type::False,
            "for"      => Type::For,
            "fun"      => Type::Fun,
            "if"       => Type::If,
            "nil"      => Type::Nil,
            "or"       => Type::Or,
            "print"    => Type::Print,
            "return"   => Type::Return,
            "super"    => Type::Super,
            "this"     => Type::This,
            "true"     => Type::True,
            "var"      => Type::Var,
            "while"    => Type::While,
            _          => Type::Identifier,
        };

        self.add_token(r#type, value, None);
    }

    /// Scans the next token.
    fn scan_token(&mut self) {
        let char = self.advance();
        match char {
            // One character tokens
            '(' => self.add_token(Type::LeftParen, char.to_string(), None),
            ')' => self.add_token(Type::RightParen, char.to_string(), None),
            '{' => self.add_token(Type::LeftBrace, char.to_string(), None),
            '}' => self.add_token(Type::RightBrace, char.to_string(), None),
            ',' => self.add_token(Type::Comma, char.to_string(), None),
            '.' => self.add_token(Type::Dot, char.to_string(), None),
            '-' => self.add_token(Type::Minus, char.to_string(), None),
            '+' => self.add_token(Type::Plus, char.to_string(), None),
            ';' => self.add_token(Type::Semicolon, char.to_string(), None),
            '*' => self.add_token(Type::Star, char.to_string(), None),

            // Two character tokens
            '!' => {
                if self.match_next('=') {
                    self.add_token(Type::BangEqual, String::from("!="), None);
                } else {
                    self.add_token(Type::Bang, String::from("!"), None);
                }
            },
            '=' => {
                if self.match_next('=') {
                    self.add_token(Type::EqualEqual, String::from("=="), None);
                } else {
                    self.add_token(Type::Equal, String::from("="), None);
                }
            },
            '<' => {
                if self.match_next('=') {
                    self.add_token(Type::LessEqual, String::from("<="), None);
                } else {
                    self.add_token(Type::Less, String::from("<"), None);
                }
            },
            '>' => {
                if self.match_next('=') {
                    self.add_token(Type::GreaterEqual, String::from(">="), None);
                } else {
                    self.add_token(Type::Greater, String::from(">"), None);
                }
            },
            '/' => {
                if self.match_next('/') {
                    // A comment runs to the end of the line.
                    while !matches!(self.peek(), Some('\n') | None) {
                        self.advance();
                    }
                } else {
                    self.add_token(Type::Slash, char.to_string(), None);
                }
            },

            // Ignore whitespace
            ' ' | '\r' | '\t' => (),

            // Update line counter
            '\n' => self.line += 1,

            // String
            '"' => self.string(),

            // Numbers
            char if char.is_ascii_digit() => self.number(char),

            // Identifiers
            char if char.is_ascii_alphabetic() || char == '_' => self.identifier(char),

            _ => self.error(self.line, format!("Unexpected character: {char}")),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn types(source: &str) -> Vec<Type> {
        let mut scanner = Scanner::new(source);
        scanner.scan_tokens().iter().map(|token| token.r#type).collect()
    }

    #[test]
    fn scan_single_char_tokens() {
        assert_eq!(
            types("(){},.-+;*/"),
            vec![
                Type::LeftParen, Type::RightParen, Type::LeftBrace, Type::RightBrace,
                Type::Comma, Type::Dot, Type::Minus, Type::Plus, Type::Semicolon,
                Type::Star, Type::Slash, Type::EOF,
            ],
        );
    }

    #[test]
    fn scan_double_char_tokens() {
        assert_eq!(
            types("! != = == < <= > >="),
            vec![
                Type::Bang, Type::BangEqual, Type::Equal, Type::EqualEqual,
                Type::Less, Type::LessEqual, Type::Greater, Type::GreaterEqual,
                Type::EOF,
            ],
        );
    }

    #[test]
    fn scan_keywords_and_identifiers() {
        assert_eq!(
            types("and class nil foo _bar baz42"),
            vec![
                Type::And, Type::Class, Type::Nil,
                Type::Identifier, Type::Identifier, Type::Identifier,
                Type::EOF,
            ],
        );
    }

    #[test]
    fn scan_string_literal() {
        let mut scanner = Scanner::new("\"hello world\"");
        let tokens = scanner.scan_tokens();

        assert_eq!(tokens[0].r#type, Type::String);
        assert_eq!(tokens[0].lexeme, "hello world");
        assert_eq!(tokens[0].literal, Some(Literal::String("hello world".to_string())));
        assert!(!scanner.had_error());
    }

    #[test]
    fn scan_multiline_string_counts_lines() {
        let mut scanner = Scanner::new("\"a\nb\"\nvar");
        let tokens = scanner.scan_tokens();

        assert_eq!(tokens[0].r#type, Type::String);
        assert_eq!(tokens[1].r#type, Type::Var);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn scan_unterminated_string() {
        let mut scanner = Scanner::new("\"abc");
        let tokens = scanner.scan_tokens();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].r#type, Type::EOF);
        assert!(scanner.had_error());
    }

    #[test]
    fn scan_number_literals() {
        let mut scanner = Scanner::new("12 3.14");
        let tokens = scanner.scan_tokens();

        assert_eq!(tokens[0].literal, Some(Literal::Number(12.0)));
        assert_eq!(tokens[1].literal, Some(Literal::Number(3.14)));
    }

    #[test]
    fn scan_number_with_trailing_dot() {
        // The dot is not part of the number.
        assert_eq!(types("12."), vec![Type::Number, Type::Dot, Type::EOF]);
    }

    #[test]
    fn scan_number_at_end_of_source() {
        let mut scanner = Scanner::new("7");
        let tokens = scanner.scan_tokens();

        assert_eq!(tokens[0].literal, Some(Literal::Number(7.0)));
        assert_eq!(tokens[1].r#type, Type::EOF);
    }

    #[test]
    fn scan_comment_to_end_of_line() {
        assert_eq!(types("// nothing here\nvar"), vec![Type::Var, Type::EOF]);
        assert_eq!(types("// trailing comment"), vec![Type::EOF]);
    }

    #[test]
    fn scan_unexpected_character() {
        let mut scanner = Scanner::new("var a = 1; #");
        let tokens = scanner.scan_tokens();

        assert!(scanner.had_error());
        // The bad character is skipped, everything else is kept.
        assert_eq!(tokens.last().unwrap().r#type, Type::EOF);
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn scan_always_ends_with_eof() {
        assert_eq!(types(""), vec![Type::EOF]);
        assert_eq!(types("  \t\r\n"), vec![Type::EOF]);
    }
}
