pub mod builtin;
pub mod env;
pub mod error;
pub mod eval;
pub mod value;


use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::interpreter::env::Env;
use crate::interpreter::eval::eval;
use crate::interpreter::value::Value;
use crate::reader::parser::Node;
use crate::reader::{lexer, parser};

/// Session façade: owns the global environment and drives one evaluation
/// at a time, to completion, before the next input.
pub struct Interpreter {
    root: Rc<RefCell<Env>>,
}

impl Default for Interpreter {
    fn default() -> Interpreter { Interpreter::new() }
}

impl Interpreter {
    pub fn new() -> Interpreter { Interpreter { root: Env::new_root() } }

    /// Evaluates one batch of parsed expressions as a single top-level
    /// application form, the way the repl treats a line.
    pub fn run(&self, nodes: &[Node]) -> Value { eval(&self.root, Value::from_nodes(nodes)) }

    /// Parses and evaluates a line, rendering the result. Syntax errors
    /// come back as `Err`; runtime Error values render like any other
    /// value and leave the session usable.
    pub fn execute(&self, input: &str) -> Result<String, String> {
        let tokens = lexer::tokenize(input).map_err(|e| e.to_string())?;
        let nodes = parser::parse(&tokens).map_err(|e| e.to_string())?;
        let result = self.run(&nodes);
        debug!("{} => {}", input, result);
        Ok(format!("{}", result))
    }

    /// Evaluates every top-level form of a script in order, stopping at
    /// the first Error value, and renders the last result.
    pub fn execute_script(&self, source: &str) -> Result<String, String> {
        let tokens = lexer::tokenize(source).map_err(|e| e.to_string())?;
        let nodes = parser::parse(&tokens).map_err(|e| e.to_string())?;

        let mut last = Value::SExpr(Vec::new());
        for node in &nodes {
            last = eval(&self.root, Value::from_node(node));
            if last.is_err() {
                break;
            }
        }
        Ok(format!("{}", last))
    }
}
