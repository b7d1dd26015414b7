use log::trace;

use super::token::{self, Literal, Token, TokenKind};
use crate::error::LexError;
use crate::span::Span;

/// On-demand tokenizer over a borrowed source buffer.
///
/// Each call to [`Lexer::next_token`] moves the cursor forward; once the
/// source is exhausted every further call yields another EOF token.
pub struct Lexer<'src> {
    source: &'src str,
    position: usize,
    line: usize,
    column: usize,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
            done: false,
        }
    }

    pub fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        self.skip_whitespace();

        let start = self.mark();
        let Some(ch) = self.peek() else {
            return Ok(self.finish(start, TokenKind::Eof, Literal::None));
        };

        let token = if ch.is_ascii_digit() {
            self.eat_while(|c| c.is_ascii_digit());
            let text = self.text_from(&start);
            // a pure digit run is always valid float syntax
            let value = text.parse::<f64>().unwrap_or(f64::INFINITY);
            self.finish(start, TokenKind::Number, Literal::Number(value))
        } else if ch.is_ascii_alphabetic() || ch == '_' {
            self.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
            let text = self.text_from(&start);
            match token::keyword_or_identifier(text) {
                TokenKind::Identifier => {
                    self.finish(start, TokenKind::Identifier, Literal::Str(text))
                }
                keyword => self.finish(start, keyword, Literal::None),
            }
        } else if let Some(kind) = self.match_operator() {
            self.finish(start, kind, Literal::None)
        } else {
            self.advance(); // consume the single character
            match token::PUNCTUATION.iter().find(|(c, _)| *c == ch) {
                Some((_, kind)) => self.finish(start, *kind, Literal::None),
                None => {
                    return Err(LexError {
                        character: ch,
                        line: start.line,
                    });
                }
            }
        };

        trace!("lexed {} at {}:{}", token, token.span.line, token.span.column);
        Ok(token)
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
    }

    /// Longest match against the two-character operator table.
    fn match_operator(&mut self) -> Option<TokenKind> {
        let source = self.source;
        let rest = &source[self.position..];
        let (spelling, kind) = token::OPERATORS
            .iter()
            .find(|(spelling, _)| rest.starts_with(spelling))?;
        for _ in spelling.chars() {
            self.advance();
        }
        Some(*kind)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    fn mark(&self) -> Span {
        Span {
            start: self.position,
            len: 0,
            line: self.line,
            column: self.column,
        }
    }

    fn text_from(&self, start: &Span) -> &'src str {
        &self.source[start.start..self.position]
    }

    fn finish(&self, start: Span, kind: TokenKind, value: Literal<'src>) -> Token<'src> {
        let span = Span {
            len: self.position - start.start,
            ..start
        };
        Token {
            kind,
            span,
            lexeme: self.text_from(&start),
            value,
        }
    }
}

/// Yields every token up to and including EOF, then stops. A lex error is
/// yielded once and ends the stream.
impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        match &result {
            Ok(token) if !token.is(TokenKind::Eof) => {}
            _ => self.done = true,
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .map(|t| t.expect("lex failure").kind)
            .collect()
    }

    #[test]
    fn empty_source_is_just_eof() {
        let mut lexer = Lexer::new("");
        let eof = lexer.next_token().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.span.len, 0);
        assert_eq!(eof.line(), 1);
    }

    #[test]
    fn eof_repeats_after_exhaustion() {
        let mut lexer = Lexer::new("a");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn variable_definition() {
        use TokenKind::*;
        assert_eq!(kinds("let a = 0"), vec![Let, Identifier, Assign, Number, Eof]);
    }

    #[rstest]
    #[case("|>", TokenKind::Pipe)]
    #[case("->", TokenKind::Arrow)]
    #[case("==", TokenKind::Equality)]
    fn two_character_operators_are_one_token(#[case] source: &str, #[case] kind: TokenKind) {
        let tokens: Vec<_> = Lexer::new(source).map(|t| t.unwrap()).collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, kind);
        assert_eq!(tokens[0].lexeme, source);
        assert_eq!(tokens[0].span.len, 2);
    }

    #[test]
    fn longest_match_between_operands() {
        use TokenKind::*;
        assert_eq!(kinds("a|>b"), vec![Identifier, Pipe, Identifier, Eof]);
        assert_eq!(kinds("= =="), vec![Assign, Equality, Eof]);
        assert_eq!(kinds("==="), vec![Equality, Assign, Eof]);
    }

    #[test]
    fn lone_pipe_is_an_error() {
        let err = Lexer::new("a | b").find_map(Result::err).unwrap();
        assert_eq!(err, LexError { character: '|', line: 1 });
    }

    #[test]
    fn lone_dash_is_an_error() {
        let err = Lexer::new("\n\n-").find_map(Result::err).unwrap();
        assert_eq!(err, LexError { character: '-', line: 3 });
    }

    #[test]
    fn non_ascii_character_is_reported_whole() {
        let err = Lexer::new("let é").find_map(Result::err).unwrap();
        assert_eq!(err.character, 'é');
    }

    #[test]
    fn numbers_decode_to_floats() {
        let token = Lexer::new("  0042").next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(token.as_number(), Some(42.0));
        assert_eq!(token.lexeme, "0042");
        assert_eq!(token.span.start, 2);
    }

    #[test]
    fn digits_then_letters_split() {
        use TokenKind::*;
        assert_eq!(kinds("12ab"), vec![Number, Identifier, Eof]);
    }

    #[test]
    fn identifiers_keep_their_text() {
        let token = Lexer::new("_foo_9 ").next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.as_str(), Some("_foo_9"));
    }

    #[test]
    fn keyword_prefix_is_identifier() {
        let token = Lexer::new("letter").next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Identifier);
    }

    #[test]
    fn lines_and_columns_advance() {
        let tokens: Vec<_> = Lexer::new("let a\r\n\t= { }\nb")
            .map(|t| t.unwrap())
            .collect();
        let lines: Vec<_> = tokens.iter().map(|t| t.line()).collect();
        assert_eq!(lines, vec![1, 1, 2, 2, 2, 3, 3]);
        assert_eq!(tokens[2].span.column, 2);
        assert_eq!(tokens[5].span.column, 1);
    }

    #[test]
    fn iterator_stops_after_error() {
        let items: Vec<_> = Lexer::new("a $ b").collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert!(items[1].is_err());
    }
}
