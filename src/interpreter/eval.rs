use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use tracing::debug;

use crate::interpreter::builtin::primitive;
use crate::interpreter::env::Env;
use crate::interpreter::error::Error;
use crate::interpreter::value::{Closure, Function, Value};

/// Parameter-list marker: the name after it captures all remaining
/// arguments as one q-expression.
const VARIADIC_MARKER: &str = "&";

/// Reduces a value to normal form. Symbols resolve through the
/// environment, s-expressions are applications, everything else
/// (numbers, errors, functions, q-expressions) is self-evaluating.
pub fn eval(env: &Rc<RefCell<Env>>, value: Value) -> Value {
    match value {
        Value::Symbol(name) => env.borrow().get(&name),
        Value::SExpr(cells) => eval_sexpr(env, cells),
        other => other,
    }
}

fn eval_sexpr(env: &Rc<RefCell<Env>>, cells: Vec<Value>) -> Value {
    // () is self-evaluating
    if cells.is_empty() {
        return Value::SExpr(cells);
    }

    let mut cells: Vec<Value> = cells.into_iter().map(|cell| eval(env, cell)).collect();

    // a parenthesized single value collapses to itself
    if cells.len() == 1 {
        return cells.remove(0);
    }

    // first error wins, left to right; the other children are dropped
    if let Some(i) = cells.iter().position(Value::is_err) {
        return cells.swap_remove(i);
    }

    let head = cells.remove(0);
    match head {
        Value::Function(func) => call(env, func, cells),
        other => Value::Err(Error::cell_arg_type(0, "function", other.type_name())),
    }
}

pub fn call(env: &Rc<RefCell<Env>>, func: Function, args: Vec<Value>) -> Value {
    debug!("call {} with {} args", func, args.len());
    match func {
        Function::Native(name) => primitive(name, env, args),
        Function::Lambda(closure) => call_lambda(env, *closure, args),
    }
}

/// Curried application: arguments bind into the closure's private
/// environment one parameter at a time. Supplying fewer arguments than
/// parameters is not an error; the partially-bound closure comes back and
/// waits for the rest.
fn call_lambda(env: &Rc<RefCell<Env>>, mut closure: Closure, mut args: Vec<Value>) -> Value {
    // totals as declared/supplied, before consumption starts
    let total = closure.params.len();
    let given = args.len();

    while !args.is_empty() {
        if closure.params.is_empty() {
            return Value::Err(Error::arg_count(total, given));
        }
        let param = closure.params.remove(0);
        if param == VARIADIC_MARKER {
            // exactly one name may follow the marker; it takes every
            // argument still unconsumed
            if closure.params.len() != 1 {
                return Value::Err(Error::arg_count(1, closure.params.len()));
            }
            let name = closure.params.remove(0);
            closure.env.borrow_mut().put(name, Value::QExpr(mem::take(&mut args)));
            break;
        }
        let value = args.remove(0);
        closure.env.borrow_mut().put(param, value);
    }

    // the caller supplied exactly the positional parameters and the marker
    // branch never ran: the trailing name gets an empty q-expression
    if closure.params.first().map(String::as_str) == Some(VARIADIC_MARKER) {
        if closure.params.len() != 2 {
            return Value::Err(Error::arg_count(2, closure.params.len()));
        }
        closure.params.remove(0);
        let name = closure.params.remove(0);
        closure.env.borrow_mut().put(name, Value::QExpr(Vec::new()));
    }

    if closure.params.is_empty() {
        // full saturation: the caller's scope becomes the fallback for
        // lookups during this invocation. The closure here is an owned
        // copy, so the link dies with it and never leaks into later calls.
        closure.env.borrow_mut().parent = Some(env.clone());
        let Closure { body, env: lambda_env, .. } = closure;
        return eval(&lambda_env, Value::SExpr(body));
    }

    Value::Function(Function::Lambda(Box::new(closure)))
}
