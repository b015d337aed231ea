use crate::reader::lexer::{SyntaxError, Token};
use crate::syntax_error;

/// Generic syntax tree handed to the interpreter. Leaves carry their text
/// content; branches record which bracket introduced them.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Node {
    Number(String),
    Symbol(String),
    SExpr(Vec<Node>),
    QExpr(Vec<Node>),
}

pub fn parse(tokens: &[Token]) -> Result<Vec<Node>, SyntaxError> {
    let mut nodes = Vec::new();
    let mut pos = 0;
    while pos < tokens.len() {
        nodes.push(parse_expr(tokens, &mut pos)?);
    }
    Ok(nodes)
}

fn parse_expr(tokens: &[Token], pos: &mut usize) -> Result<Node, SyntaxError> {
    match tokens.get(*pos) {
        Some(Token::Number(raw)) => {
            *pos += 1;
            Ok(Node::Number(raw.clone()))
        }
        Some(Token::Symbol(name)) => {
            *pos += 1;
            Ok(Node::Symbol(name.clone()))
        }
        Some(Token::OpenParen) => {
            *pos += 1;
            Ok(Node::SExpr(parse_body(tokens, pos, Token::CloseParen)?))
        }
        Some(Token::OpenBrace) => {
            *pos += 1;
            Ok(Node::QExpr(parse_body(tokens, pos, Token::CloseBrace)?))
        }
        Some(Token::CloseParen) => syntax_error!("unexpected `)`"),
        Some(Token::CloseBrace) => syntax_error!("unexpected `}}`"),
        None => syntax_error!("unexpected end of input"),
    }
}

fn parse_body(tokens: &[Token], pos: &mut usize, close: Token) -> Result<Vec<Node>, SyntaxError> {
    let mut nodes = Vec::new();
    loop {
        match tokens.get(*pos) {
            Some(token) if *token == close => {
                *pos += 1;
                return Ok(nodes);
            }
            Some(_) => nodes.push(parse_expr(tokens, pos)?),
            None => match close {
                Token::CloseBrace => syntax_error!("missing `}}`"),
                _ => syntax_error!("missing `)`"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::lexer::tokenize;

    fn parse_str(input: &str) -> Result<Vec<Node>, SyntaxError> { parse(&tokenize(input).unwrap()) }

    #[test]
    fn parses_nested_expressions() {
        let nodes = parse_str("(+ 1 (* 2 3))").unwrap();
        assert_eq!(
            nodes,
            vec![Node::SExpr(vec![
                Node::Symbol("+".into()),
                Node::Number("1".into()),
                Node::SExpr(vec![Node::Symbol("*".into()), Node::Number("2".into()), Node::Number("3".into())]),
            ])]
        );
    }

    #[test]
    fn parses_quoted_lists() {
        let nodes = parse_str("{1 {2} x}").unwrap();
        assert_eq!(
            nodes,
            vec![Node::QExpr(vec![
                Node::Number("1".into()),
                Node::QExpr(vec![Node::Number("2".into())]),
                Node::Symbol("x".into()),
            ])]
        );
    }

    #[test]
    fn parses_several_top_level_forms() {
        let nodes = parse_str("+ 1 2").unwrap();
        assert_eq!(nodes.len(), 3);
    }

    #[test]
    fn empty_input_is_fine() {
        assert_eq!(parse_str("").unwrap(), vec![]);
    }

    #[test]
    fn reports_unbalanced_delimiters() {
        assert_eq!(parse_str("(+ 1").unwrap_err().message, "missing `)`");
        assert_eq!(parse_str("{1 2").unwrap_err().message, "missing `}`");
        assert_eq!(parse_str(")").unwrap_err().message, "unexpected `)`");
        assert_eq!(parse_str("1}").unwrap_err().message, "unexpected `}`");
    }
}
