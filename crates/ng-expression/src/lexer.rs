//! Tokenizer: turns expression source into an ordered list of tokens.

use crate::error::LexError;
use ng_expression_util::strings::{
    is_digit, is_exp_operator, is_ident_part, is_ident_start, is_whitespace, CharPredicate,
};
use tracing::trace;

/// Single-character punctuation recognized by the grammar.
const PUNCTUATION: &str = "[],{}:.()=";

/// Decoded payload of a literal token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Number(f64),
    String(String),
}

/// A lexical token.
///
/// `text` is the source text the token was read from (string literals keep
/// their quotes and escapes), so grammar lookahead never confuses a string
/// literal with punctuation or a keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub value: Option<TokenValue>,
    pub identifier: bool,
}

impl Token {
    fn punctuation(ch: char) -> Self {
        Token {
            text: ch.to_string(),
            value: None,
            identifier: false,
        }
    }

    /// Returns `true` if this token is the given punctuation or keyword text.
    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }
}

/// Tokenizes `text`.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(text).lex()
}

/// Single-use tokenizer state. Each call to [`tokenize`] owns a fresh one.
pub struct Lexer {
    chars: Vec<char>,
    index: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(text: &str) -> Self {
        Lexer {
            chars: text.chars().collect(),
            index: 0,
            tokens: Vec::new(),
        }
    }

    /// Consumes the whole input and returns the tokens in source order.
    pub fn lex(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(ch) = self.current() {
            if is_digit(ch) || (ch == '.' && self.peek().is_some_and(is_digit)) {
                self.read_number()?;
            } else if ch == '\'' || ch == '"' {
                self.read_string(ch)?;
            } else if PUNCTUATION.contains(ch) {
                self.tokens.push(Token::punctuation(ch));
                self.index += 1;
            } else if is_ident_start(ch) {
                self.read_ident();
            } else if is_whitespace(ch) {
                self.index += 1;
            } else {
                return Err(LexError::UnexpectedCharacter(ch));
            }
        }
        trace!(count = self.tokens.len(), tokens = ?self.tokens, "tokenized expression");
        Ok(self.tokens)
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index + 1).copied()
    }

    fn read_while(&mut self, predicate: CharPredicate) {
        while self.current().is_some_and(predicate) {
            self.index += 1;
        }
    }

    fn text_from(&self, start: usize) -> String {
        self.chars[start..self.index].iter().collect()
    }

    fn read_number(&mut self) -> Result<(), LexError> {
        let start = self.index;
        self.read_while(|ch| is_digit(ch) || ch == '.');

        if matches!(self.current(), Some('e' | 'E')) {
            self.index += 1;
            if !self.current().is_some_and(is_exp_operator) {
                return Err(LexError::InvalidExponent);
            }
            if matches!(self.current(), Some('+' | '-')) {
                self.index += 1;
            }
            if !self.current().is_some_and(is_digit) {
                return Err(LexError::InvalidExponent);
            }
            self.read_while(is_digit);
        }

        let text = self.text_from(start);
        // Malformed decimals such as `1.2.3` are NaN, as `Number("1.2.3")` is.
        let value = text.parse::<f64>().unwrap_or(f64::NAN);
        self.tokens.push(Token {
            text,
            value: Some(TokenValue::Number(value)),
            identifier: false,
        });
        Ok(())
    }

    /// Reads a quoted string. An unterminated string stops silently at the
    /// end of input without producing a token.
    fn read_string(&mut self, quote: char) -> Result<(), LexError> {
        let start = self.index;
        self.index += 1;
        let mut value = String::new();

        while let Some(ch) = self.current() {
            if ch == '\\' {
                self.index += 1;
                let Some(escaped) = self.current() else {
                    break;
                };
                if escaped == 'u' {
                    value.push(self.read_unicode_escape()?);
                } else {
                    value.push(match escaped {
                        'n' => '\n',
                        'f' => '\u{000C}',
                        'r' => '\r',
                        't' => '\t',
                        'v' => '\u{000B}',
                        other => other,
                    });
                    self.index += 1;
                }
            } else if ch == quote {
                self.index += 1;
                self.tokens.push(Token {
                    text: self.text_from(start),
                    value: Some(TokenValue::String(value)),
                    identifier: false,
                });
                return Ok(());
            } else {
                value.push(ch);
                self.index += 1;
            }
        }
        Ok(())
    }

    /// Reads `uXXXX` with the cursor on the `u`. A high surrogate directly
    /// followed by an escaped low surrogate decodes to one code point; a lone
    /// surrogate decodes to U+FFFD.
    fn read_unicode_escape(&mut self) -> Result<char, LexError> {
        let code = self
            .hex_at(self.index + 1)
            .ok_or(LexError::InvalidUnicodeEscape)?;
        self.index += 5;

        if (0xD800..0xDC00).contains(&code)
            && self.current() == Some('\\')
            && self.peek() == Some('u')
        {
            if let Some(low @ 0xDC00..=0xDFFF) = self.hex_at(self.index + 2) {
                self.index += 6;
                let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }
        Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn hex_at(&self, at: usize) -> Option<u32> {
        let digits = self.chars.get(at..at + 4)?;
        digits
            .iter()
            .try_fold(0u32, |acc, ch| ch.to_digit(16).map(|d| acc * 16 + d))
    }

    fn read_ident(&mut self) {
        let start = self.index;
        self.read_while(is_ident_part);
        self.tokens.push(Token {
            text: self.text_from(start),
            value: None,
            identifier: true,
        });
    }
}
