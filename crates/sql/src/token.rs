// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Lexical scanning of expression text.

use std::{collections::HashMap, iter::Peekable, str::CharIndices};

use once_cell::sync::Lazy;

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
	Keyword(Keyword),
	Ident(String),
	Integer(i64),
	Float(f64),
	StringLit(String),
	Asterisk,
	Comma,
	Dot,
	OpenParen,
	CloseParen,
	Plus,
	Minus,
	Slash,
	Percent,
	Eq,
	NotEq,
	Lt,
	Gt,
	LtEq,
	GtEq,
}

macro_rules! keyword {
    ( $( $variant:ident => $string:literal ),* $(,)? ) => {
        /// Reserved words, matched without regard to case.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $( $variant ),*
        }

        impl Keyword {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Keyword::$variant => $string ),*
                }
            }
        }

        static KEYWORDS: Lazy<HashMap<&'static str, Keyword>> = Lazy::new(|| {
            let mut map = HashMap::new();
            $( map.insert($string, Keyword::$variant); )*
            map
        });
    };
}

keyword! {
	And     => "AND",
	Or      => "OR",
	Not     => "NOT",
	Null    => "NULL",
	True    => "TRUE",
	False   => "FALSE",
	In      => "IN",
	Between => "BETWEEN",
	Row     => "ROW",
}

static PUNCTUATION: Lazy<HashMap<char, Token>> = Lazy::new(|| {
	let mut map = HashMap::new();
	map.insert('*', Token::Asterisk);
	map.insert(',', Token::Comma);
	map.insert('.', Token::Dot);
	map.insert('(', Token::OpenParen);
	map.insert(')', Token::CloseParen);
	map.insert('+', Token::Plus);
	map.insert('-', Token::Minus);
	map.insert('/', Token::Slash);
	map.insert('%', Token::Percent);
	map.insert('=', Token::Eq);
	map
});

struct Cursor<'a> {
	input: &'a str,
	chars: Peekable<CharIndices<'a>>,
}

impl<'a> Cursor<'a> {
	fn new(input: &'a str) -> Self {
		Self {
			input,
			chars: input.char_indices().peekable(),
		}
	}

	fn pos(&mut self) -> usize {
		self.chars.peek().map_or(self.input.len(), |(pos, _)| *pos)
	}

	fn peek(&mut self) -> Option<char> {
		self.chars.peek().map(|(_, ch)| *ch)
	}

	fn peek_second(&self) -> Option<char> {
		let mut ahead = self.chars.clone();
		ahead.next();
		ahead.next().map(|(_, ch)| ch)
	}

	fn next(&mut self) -> Option<char> {
		self.chars.next().map(|(_, ch)| ch)
	}

	fn next_if_eq(&mut self, expected: char) -> bool {
		self.chars.next_if(|(_, ch)| *ch == expected).is_some()
	}

	fn consume_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
		let start = self.pos();
		while self.chars.next_if(|(_, ch)| predicate(*ch)).is_some() {}
		let end = self.pos();
		&self.input[start..end]
	}

	/// Skips whitespace and `--` line comments.
	fn skip_trivia(&mut self) {
		loop {
			self.consume_while(|ch| ch.is_ascii_whitespace());
			if self.peek() == Some('-') && self.peek_second() == Some('-') {
				self.consume_while(|ch| ch != '\n');
			} else {
				return;
			}
		}
	}
}

/// Splits an expression into tokens.
pub fn tokenize(sql: &str) -> Result<Vec<Token>, ParseError> {
	let mut cursor = Cursor::new(sql);
	let mut tokens = Vec::new();

	loop {
		cursor.skip_trivia();
		let pos = cursor.pos();
		let Some(ch) = cursor.peek() else {
			return Ok(tokens);
		};

		let token = if ch.is_ascii_digit() {
			scan_number(&mut cursor)?
		} else if ch == '\'' {
			scan_string(&mut cursor)?
		} else if ch.is_ascii_alphabetic() || ch == '_' {
			scan_word(&mut cursor)
		} else if let Some(token) = scan_operator(&mut cursor) {
			token
		} else {
			return Err(ParseError(format!("unexpected character '{ch}' at position {pos}")));
		};
		tokens.push(token);
	}
}

fn scan_operator(cursor: &mut Cursor) -> Option<Token> {
	let ch = cursor.peek()?;
	let token = match ch {
		'<' => {
			cursor.next();
			if cursor.next_if_eq('=') {
				Token::LtEq
			} else if cursor.next_if_eq('>') {
				Token::NotEq
			} else {
				Token::Lt
			}
		}
		'>' => {
			cursor.next();
			if cursor.next_if_eq('=') {
				Token::GtEq
			} else {
				Token::Gt
			}
		}
		'!' => {
			if cursor.peek_second() != Some('=') {
				return None;
			}
			cursor.next();
			cursor.next();
			Token::NotEq
		}
		_ => {
			let token = PUNCTUATION.get(&ch)?.clone();
			cursor.next();
			token
		}
	};
	Some(token)
}

fn scan_number(cursor: &mut Cursor) -> Result<Token, ParseError> {
	let integral = cursor.consume_while(|ch| ch.is_ascii_digit());

	// `1.` stays an integer followed by a dot
	let fractional = cursor.peek() == Some('.') && cursor.peek_second().is_some_and(|ch| ch.is_ascii_digit());
	if !fractional {
		return integral
			.parse()
			.map(Token::Integer)
			.map_err(|err| ParseError(format!("invalid integer '{integral}': {err}")));
	}

	cursor.next();
	let fraction = cursor.consume_while(|ch| ch.is_ascii_digit());
	let text = format!("{integral}.{fraction}");
	text.parse().map(Token::Float).map_err(|err| ParseError(format!("invalid float '{text}': {err}")))
}

fn scan_string(cursor: &mut Cursor) -> Result<Token, ParseError> {
	cursor.next();
	let mut value = String::new();
	loop {
		match cursor.next() {
			Some('\'') if cursor.next_if_eq('\'') => value.push('\''),
			Some('\'') => return Ok(Token::StringLit(value)),
			Some(ch) => value.push(ch),
			None => return Err(ParseError("unterminated string literal".into())),
		}
	}
}

fn scan_word(cursor: &mut Cursor) -> Token {
	let word = cursor.consume_while(|ch| ch.is_ascii_alphanumeric() || ch == '_');
	match KEYWORDS.get(word.to_ascii_uppercase().as_str()) {
		Some(keyword) => Token::Keyword(*keyword),
		None => Token::Ident(word.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ident(name: &str) -> Token {
		Token::Ident(name.to_string())
	}

	#[test]
	fn test_operators_and_operands() {
		let tokens = tokenize("a*(b - 1)>=c%2").unwrap();
		assert_eq!(
			tokens,
			vec![
				ident("a"),
				Token::Asterisk,
				Token::OpenParen,
				ident("b"),
				Token::Minus,
				Token::Integer(1),
				Token::CloseParen,
				Token::GtEq,
				ident("c"),
				Token::Percent,
				Token::Integer(2),
			]
		);
	}

	#[test]
	fn test_keywords_ignore_case() {
		let tokens = tokenize("x not Between Null and TRUE").unwrap();
		assert_eq!(
			tokens,
			vec![
				ident("x"),
				Token::Keyword(Keyword::Not),
				Token::Keyword(Keyword::Between),
				Token::Keyword(Keyword::Null),
				Token::Keyword(Keyword::And),
				Token::Keyword(Keyword::True),
			]
		);
		assert_eq!(Keyword::Row.as_str(), "ROW");
	}

	#[test]
	fn test_identifiers_keep_their_case() {
		assert_eq!(tokenize("Lower(_x1)").unwrap()[0], ident("Lower"));
		assert_eq!(tokenize("rows").unwrap(), vec![ident("rows")]);
	}

	#[test]
	fn test_string_literals() {
		assert_eq!(tokenize("'FOO'").unwrap(), vec![Token::StringLit("FOO".into())]);
		assert_eq!(tokenize("'it''s'").unwrap(), vec![Token::StringLit("it's".into())]);
		assert_eq!(tokenize("''''").unwrap(), vec![Token::StringLit("'".into())]);
		assert_eq!(tokenize("'é'").unwrap(), vec![Token::StringLit("é".into())]);
	}

	#[test]
	fn test_not_equal_spellings() {
		let tokens = tokenize("a <> b != c <= d < e").unwrap();
		assert_eq!(
			tokens,
			vec![
				ident("a"),
				Token::NotEq,
				ident("b"),
				Token::NotEq,
				ident("c"),
				Token::LtEq,
				ident("d"),
				Token::Lt,
				ident("e"),
			]
		);
	}

	#[test]
	fn test_numbers() {
		let tokens = tokenize("42 3.25 2.0").unwrap();
		assert_eq!(tokens, vec![Token::Integer(42), Token::Float(3.25), Token::Float(2.0)]);
		assert_eq!(tokenize("1.a").unwrap(), vec![Token::Integer(1), Token::Dot, ident("a")]);
	}

	#[test]
	fn test_comments() {
		let tokens = tokenize("a -- trailing\n= 1 --").unwrap();
		assert_eq!(tokens, vec![ident("a"), Token::Eq, Token::Integer(1)]);
		assert_eq!(tokenize("a - -1").unwrap(), vec![ident("a"), Token::Minus, Token::Minus, Token::Integer(1)]);
	}

	#[test]
	fn test_errors() {
		assert_eq!(tokenize("'open"), Err(ParseError("unterminated string literal".into())));
		assert_eq!(tokenize("a ! b"), Err(ParseError("unexpected character '!' at position 2".into())));
		assert_eq!(tokenize("a;"), Err(ParseError("unexpected character ';' at position 1".into())));
		assert!(tokenize("99999999999999999999").is_err());
	}
}
