//! Lexer for occupancy notation using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Delimiters
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,

    // Separators
    #[token(",")]
    Comma,
    #[token("/")]
    Slash,
    #[token(";")]
    Semicolon,

    // Oversized literals are kept so the parser can report them with a span
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u32>().unwrap_or(u32::MAX))]
    Number(u32),

    /// Anything the notation does not recognise
    Unknown(String),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,
}

/// Lex input string into tokens with spans
///
/// Unrecognised characters come through as [`Token::Unknown`] instead of being
/// dropped, so they surface as parse errors at the right place.
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input).spanned().map(|(tok, span)| {
        let tok = tok.unwrap_or_else(|_| {
            Token::Unknown(input.get(span.clone()).unwrap_or("?").to_string())
        });
        (tok, span)
    })
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::ParenOpen => f.write_str("'('"),
            Token::ParenClose => f.write_str("')'"),
            Token::BracketOpen => f.write_str("'['"),
            Token::BracketClose => f.write_str("']'"),
            Token::Comma => f.write_str("','"),
            Token::Slash => f.write_str("'/'"),
            Token::Semicolon => f.write_str("';'"),
            Token::Number(n) => write!(f, "number {}", n),
            Token::Unknown(s) => write!(f, "'{}'", s),
            Token::LineComment => f.write_str("comment"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_tokens() {
        let tokens: Vec<_> = lex("(2, 0)").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::ParenOpen,
                Token::Number(2),
                Token::Comma,
                Token::Number(0),
                Token::ParenClose
            ]
        );
    }

    #[test]
    fn test_row_separators() {
        let tokens: Vec<_> = lex("2 / 0; 2").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Number(2),
                Token::Slash,
                Token::Number(0),
                Token::Semicolon,
                Token::Number(2)
            ]
        );
    }

    #[test]
    fn test_comments_skipped() {
        let tokens: Vec<_> = lex("[2 // outer\n0]").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::BracketOpen,
                Token::Number(2),
                Token::Number(0),
                Token::BracketClose
            ]
        );
    }

    #[test]
    fn test_unknown_character_kept() {
        let tokens: Vec<_> = lex("(x)").collect();
        assert_eq!(tokens[1], (Token::Unknown("x".to_string()), 1..2));
    }

    #[test]
    fn test_huge_number_saturates() {
        let tokens: Vec<_> = lex("99999999999").map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Number(u32::MAX)]);
    }
}
