use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::interpreter::env::Env;
use crate::interpreter::error::Error;
use crate::reader::parser::Node;

/// The single runtime type: every expression, intermediate result and
/// diagnostic is one of these. S-expressions are application forms and get
/// evaluated; Q-expressions are quoted data and never are.
#[derive(PartialEq, Clone)]
pub enum Value {
    Number(i64),
    Symbol(String),
    Err(Error),
    Function(Function),
    SExpr(Vec<Value>),
    QExpr(Vec<Value>),
}

#[derive(PartialEq, Clone)]
pub enum Function {
    /// Name into the builtin table; stateless, so copied by name.
    Native(&'static str),
    Lambda(Box<Closure>),
}

/// A user-defined function: parameter names, an unevaluated body and a
/// private environment holding whatever arguments have been bound so far.
#[derive(PartialEq)]
pub struct Closure {
    pub params: Vec<String>,
    pub body: Vec<Value>,
    pub env: Rc<RefCell<Env>>,
}

impl Clone for Closure {
    // A copied closure must not share bindings with the original, so the
    // private environment is duplicated rather than aliased. The parent
    // link (if any) is shared; it is a non-owning lookup chain.
    fn clone(&self) -> Closure {
        Closure {
            params: self.params.clone(),
            body: self.body.clone(),
            env: Rc::new(RefCell::new(self.env.borrow().clone())),
        }
    }
}

impl Value {
    pub fn err(error: Error) -> Value { Value::Err(error) }

    pub fn native(name: &'static str) -> Value { Value::Function(Function::Native(name)) }

    pub fn lambda(params: Vec<String>, body: Vec<Value>) -> Value {
        Value::Function(Function::Lambda(Box::new(Closure {
            params,
            body,
            env: Env::new(),
        })))
    }

    pub fn type_name(&self) -> &'static str {
        match *self {
            Value::Number(_) => "number",
            Value::Symbol(_) => "symbol",
            Value::Err(_) => "error",
            Value::Function(_) => "function",
            Value::SExpr(_) => "s-expression",
            Value::QExpr(_) => "q-expression",
        }
    }

    pub fn is_err(&self) -> bool { matches!(*self, Value::Err(_)) }

    /// Converts one reader node. Number literals keep their raw text until
    /// here; a literal that does not fit an i64 becomes a ValueError value
    /// rather than a syntax error.
    pub fn from_node(node: &Node) -> Value {
        match *node {
            Node::Number(ref raw) => match raw.parse::<i64>() {
                Ok(n) => Value::Number(n),
                Err(_) => Value::Err(Error::parse_number(raw)),
            },
            Node::Symbol(ref name) => Value::Symbol(name.clone()),
            Node::SExpr(ref nodes) => Value::SExpr(nodes.iter().map(Value::from_node).collect()),
            Node::QExpr(ref nodes) => Value::QExpr(nodes.iter().map(Value::from_node).collect()),
        }
    }

    /// Wraps a whole parsed input in one S-expression, so `+ 1 2` works at
    /// the top level and a lone expression collapses to itself.
    pub fn from_nodes(nodes: &[Node]) -> Value { Value::SExpr(nodes.iter().map(Value::from_node).collect()) }
}

fn fmt_cells(f: &mut fmt::Formatter, cells: &[Value], open: char, close: char) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", cell)?;
    }
    write!(f, "{}", close)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Symbol(ref name) => write!(f, "{}", name),
            Value::Err(ref err) => write!(f, "{}", err),
            Value::Function(ref func) => write!(f, "{}", func),
            Value::SExpr(ref cells) => fmt_cells(f, cells, '(', ')'),
            Value::QExpr(ref cells) => fmt_cells(f, cells, '{', '}'),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self) }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Function::Native(_) => write!(f, "<builtin>"),
            Function::Lambda(ref closure) => {
                write!(f, "(\\ {{{}}} ", closure.params.join(" "))?;
                fmt_cells(f, &closure.body, '{', '}')?;
                write!(f, ")")
            }
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_node_parses_numbers() {
        assert_eq!(Value::from_node(&Node::Number("42".into())), Value::Number(42));
        assert_eq!(Value::from_node(&Node::Number("-7".into())), Value::Number(-7));
    }

    #[test]
    fn from_node_turns_overflow_into_a_value_error() {
        let v = Value::from_node(&Node::Number("99999999999999999999".into()));
        match v {
            Value::Err(err) => assert_eq!(err.detail, "unable to parse 99999999999999999999 as number"),
            other => panic!("expected an error value, got {}", other),
        }
    }

    #[test]
    fn display_forms() {
        let sexpr = Value::SExpr(vec![Value::Symbol("+".into()), Value::Number(1), Value::Number(2)]);
        assert_eq!(format!("{}", sexpr), "(+ 1 2)");

        let qexpr = Value::QExpr(vec![Value::Number(1), Value::Number(2)]);
        assert_eq!(format!("{}", qexpr), "{1 2}");

        assert_eq!(format!("{}", Value::SExpr(vec![])), "()");
        assert_eq!(format!("{}", Value::native("+")), "<builtin>");
    }

    #[test]
    fn display_lambda() {
        let body = vec![Value::Symbol("+".into()), Value::Symbol("a".into()), Value::Symbol("b".into())];
        let f = Value::lambda(vec!["a".into(), "b".into()], body);
        assert_eq!(format!("{}", f), "(\\ {a b} {+ a b})");
    }

    #[test]
    fn cloned_closure_owns_its_environment() {
        let f = match Value::lambda(vec!["a".into()], vec![Value::Symbol("a".into())]) {
            Value::Function(Function::Lambda(c)) => c,
            _ => unreachable!(),
        };
        let copy = f.clone();
        copy.env.borrow_mut().put("a".into(), Value::Number(1));
        assert_eq!(f.env.borrow().get("a"), Value::Err(Error::unbound_symbol("a")));
    }
}
