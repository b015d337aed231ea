use std::cell::RefCell;
use std::rc::Rc;

use phf::phf_set;

use crate::interpreter::env::Env;
use crate::interpreter::error::{Error, ErrorKind};
use crate::interpreter::eval::eval;
use crate::interpreter::value::Value;
use crate::{check_arg_count, check_cell_type};

/// Every name bound in a fresh root environment.
pub static BUILTIN_NAMES: phf::Set<&'static str> = phf_set! {
    "+", "-", "*", "/", "%", "min", "max",
    "list", "head", "tail", "eval", "join",
    "def", "\\", ":=",
};

/// Dispatches a native function by name. `args` are already evaluated;
/// each builtin owns its own count/type checking and answers with a Value,
/// possibly an Error one.
pub fn primitive(name: &'static str, env: &Rc<RefCell<Env>>, args: Vec<Value>) -> Value {
    match name {
        "+" | "-" | "*" | "/" | "%" | "min" | "max" => builtin_op(args, name),
        "list" => Value::QExpr(args),
        "head" => builtin_head(args),
        "tail" => builtin_tail(args),
        "eval" => builtin_eval(env, args),
        "join" => builtin_join(args),
        "def" => builtin_var(env, args, Scope::Global),
        ":=" => builtin_var(env, args, Scope::Local),
        "\\" => builtin_lambda(args),
        other => Value::Err(Error::standard(format!("unknown builtin: {}", other))),
    }
}

/// Left-to-right reduction over number arguments. Unary `-` negates;
/// `/` and `%` short-circuit on a zero right operand.
fn builtin_op(args: Vec<Value>, op: &str) -> Value {
    let mut nums = Vec::with_capacity(args.len());
    for (i, arg) in args.into_iter().enumerate() {
        match arg {
            Value::Number(n) => nums.push(n),
            other => return Value::Err(Error::cell_arg_type(i, "number", other.type_name())),
        }
    }
    if nums.is_empty() {
        return Value::Err(Error::empty_args());
    }

    let mut rest = nums.into_iter();
    let mut acc = match rest.next() {
        Some(n) => n,
        None => return Value::Err(Error::empty_args()),
    };

    if op == "-" && rest.len() == 0 {
        return Value::Number(acc.wrapping_neg());
    }

    for b in rest {
        if (op == "/" || op == "%") && b == 0 {
            return Value::Err(Error::new(ErrorKind::Arithmetic, "division by zero"));
        }
        acc = match op {
            "+" => acc.wrapping_add(b),
            "-" => acc.wrapping_sub(b),
            "*" => acc.wrapping_mul(b),
            "/" => acc.wrapping_div(b),
            "%" => acc.wrapping_rem(b),
            "min" => acc.min(b),
            "max" => acc.max(b),
            other => return Value::Err(Error::standard(format!("unknown operator: {}", other))),
        };
    }
    Value::Number(acc)
}

/// `{a b c}` -> `{a}`.
fn builtin_head(mut args: Vec<Value>) -> Value {
    check_arg_count!(args, 1);
    match args.remove(0) {
        Value::QExpr(mut cells) => {
            if cells.is_empty() {
                return Value::Err(Error::empty_cell_args(0));
            }
            cells.truncate(1);
            Value::QExpr(cells)
        }
        other => Value::Err(Error::cell_arg_type(0, "q-expression", other.type_name())),
    }
}

/// `{a b c}` -> `{b c}`.
fn builtin_tail(mut args: Vec<Value>) -> Value {
    check_arg_count!(args, 1);
    match args.remove(0) {
        Value::QExpr(mut cells) => {
            if cells.is_empty() {
                return Value::Err(Error::empty_cell_args(0));
            }
            cells.remove(0);
            Value::QExpr(cells)
        }
        other => Value::Err(Error::cell_arg_type(0, "q-expression", other.type_name())),
    }
}

/// Retags a q-expression as an s-expression and reduces it.
fn builtin_eval(env: &Rc<RefCell<Env>>, mut args: Vec<Value>) -> Value {
    check_arg_count!(args, 1);
    match args.remove(0) {
        Value::QExpr(cells) => eval(env, Value::SExpr(cells)),
        other => Value::Err(Error::cell_arg_type(0, "q-expression", other.type_name())),
    }
}

/// Concatenates any number of q-expressions, left to right.
fn builtin_join(args: Vec<Value>) -> Value {
    let mut joined = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        match arg {
            Value::QExpr(cells) => joined.extend(cells),
            other => return Value::Err(Error::cell_arg_type(i, "q-expression", other.type_name())),
        }
    }
    Value::QExpr(joined)
}

enum Scope {
    Global,
    Local,
}

/// Shared body of `def` (global scope) and `:=` (innermost scope). Both
/// validate identically: a q-expression of symbols followed by exactly one
/// value per symbol.
fn builtin_var(env: &Rc<RefCell<Env>>, mut args: Vec<Value>, scope: Scope) -> Value {
    if args.is_empty() {
        return Value::Err(Error::empty_args());
    }
    let names = match args[0] {
        Value::QExpr(ref cells) => {
            let mut names = Vec::with_capacity(cells.len());
            for (i, cell) in cells.iter().enumerate() {
                match *cell {
                    Value::Symbol(ref name) => names.push(name.clone()),
                    ref other => return Value::Err(Error::cell_arg_type(i, "symbol", other.type_name())),
                }
            }
            names
        }
        ref other => return Value::Err(Error::cell_arg_type(0, "q-expression", other.type_name())),
    };
    check_arg_count!(args, names.len() + 1);

    for (name, value) in names.into_iter().zip(args.drain(1..)) {
        match scope {
            Scope::Global => Env::define_global(env, name, value),
            Scope::Local => env.borrow_mut().put(name, value),
        }
    }
    Value::SExpr(Vec::new())
}

/// `(\ {params} {body})` -> a closure with a fresh, parentless environment.
fn builtin_lambda(args: Vec<Value>) -> Value {
    check_arg_count!(args, 2);
    check_cell_type!(args, 0, Value::QExpr(_), "q-expression");
    check_cell_type!(args, 1, Value::QExpr(_), "q-expression");

    let mut cells = args.into_iter();
    if let (Some(Value::QExpr(param_cells)), Some(Value::QExpr(body))) = (cells.next(), cells.next()) {
        let mut params = Vec::with_capacity(param_cells.len());
        for (i, cell) in param_cells.into_iter().enumerate() {
            match cell {
                Value::Symbol(name) => params.push(name),
                other => return Value::Err(Error::cell_arg_type(i, "symbol", other.type_name())),
            }
        }
        return Value::lambda(params, body);
    }
    Value::Err(Error::standard("malformed lambda"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_with_no_arguments_is_an_argument_error() {
        let env = Env::new_root();
        let result = primitive("+", &env, vec![]);
        assert_eq!(result, Value::Err(Error::empty_args()));
    }

    #[test]
    fn op_checks_every_operand_before_reducing() {
        let env = Env::new_root();
        let args = vec![Value::Number(1), Value::QExpr(vec![]), Value::Number(0)];
        let result = primitive("/", &env, args);
        assert_eq!(result, Value::Err(Error::cell_arg_type(1, "number", "q-expression")));
    }

    #[test]
    fn unknown_builtin_is_a_standard_error() {
        let env = Env::new_root();
        let result = primitive("nope", &env, vec![]);
        assert_eq!(result, Value::Err(Error::standard("unknown builtin: nope")));
    }

    #[test]
    fn builtin_table_is_complete() {
        for name in ["+", "-", "*", "/", "%", "min", "max", "list", "head", "tail", "eval", "join", "def", "\\", ":="] {
            assert!(BUILTIN_NAMES.contains(name), "missing builtin {}", name);
        }
        assert_eq!(BUILTIN_NAMES.len(), 15);
    }
}
