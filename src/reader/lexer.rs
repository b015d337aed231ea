use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    /// Raw literal text; numeric range is checked later, when the syntax
    /// tree becomes runtime values.
    Number(String),
    Symbol(String),
}

/// Malformed source text. Unlike runtime Error values these never enter
/// evaluation; the driver reports them and moves on to the next input.
#[derive(Debug, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "SyntaxError: {}", self.message) }
}

#[macro_export]
macro_rules! syntax_error {
    ($($arg:tt)*) => (
        return Err($crate::reader::lexer::SyntaxError { message: format!($($arg)*) })
    )
}

// `:` is part of the alphabet so `:=` lexes as one symbol token
fn is_symbol_char(c: char) -> bool { c.is_ascii_alphanumeric() || "_+-*/\\=<>!&%:".contains(c) }

fn is_number(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            '(' => {
                chars.next();
                tokens.push(Token::OpenParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::CloseParen);
            }
            '{' => {
                chars.next();
                tokens.push(Token::OpenBrace);
            }
            '}' => {
                chars.next();
                tokens.push(Token::CloseBrace);
            }
            ';' => {
                // comment to end of line
                while chars.next_if(|&c| c != '\n').is_some() {}
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            c if is_symbol_char(c) => {
                let mut text = String::new();
                while let Some(c) = chars.next_if(|&c| is_symbol_char(c)) {
                    text.push(c);
                }
                if is_number(&text) {
                    tokens.push(Token::Number(text));
                } else {
                    tokens.push(Token::Symbol(text));
                }
            }
            other => syntax_error!("unexpected character {:?}", other),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_an_application() {
        let tokens = tokenize("(+ 1 {2 x})").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::OpenParen,
                Token::Symbol("+".into()),
                Token::Number("1".into()),
                Token::OpenBrace,
                Token::Number("2".into()),
                Token::Symbol("x".into()),
                Token::CloseBrace,
                Token::CloseParen,
            ]
        );
    }

    #[test]
    fn negative_number_versus_minus_symbol() {
        assert_eq!(tokenize("-5").unwrap(), vec![Token::Number("-5".into())]);
        assert_eq!(tokenize("- 5").unwrap(), vec![Token::Symbol("-".into()), Token::Number("5".into())]);
    }

    #[test]
    fn operator_symbols() {
        let tokens = tokenize("\\ := min <ok>").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Symbol("\\".into()),
                Token::Symbol(":=".into()),
                Token::Symbol("min".into()),
                Token::Symbol("<ok>".into()),
            ]
        );
    }

    #[test]
    fn comments_run_to_end_of_line() {
        let tokens = tokenize("1 ; ignored (\n2").unwrap();
        assert_eq!(tokens, vec![Token::Number("1".into()), Token::Number("2".into())]);
    }

    #[test]
    fn rejects_stray_characters() {
        let err = tokenize("(+ 1 #)").unwrap_err();
        assert_eq!(err.message, "unexpected character '#'");
    }

    #[test]
    fn overlong_literal_stays_raw() {
        let tokens = tokenize("99999999999999999999").unwrap();
        assert_eq!(tokens, vec![Token::Number("99999999999999999999".into())]);
    }
}
