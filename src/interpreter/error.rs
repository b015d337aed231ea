use std::fmt;

/// Classification of a failed computation. Errors are ordinary runtime
/// values ([`Value::Err`](crate::interpreter::value::Value)), not Rust
/// errors: they propagate through evaluation like any other value.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    Argument,
    Type,
    Arithmetic,
    Value,
    Standard,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Argument => "ArgumentError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Arithmetic => "ArithmeticError",
            ErrorKind::Value => "ValueError",
            ErrorKind::Standard => "StandardError",
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Error {
    pub kind: ErrorKind,
    pub detail: String,
}

impl Error {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Error {
        Error { kind, detail: detail.into() }
    }

    pub fn name(&self) -> &'static str { self.kind.name() }

    pub fn parse_number(given: &str) -> Error { Error::new(ErrorKind::Value, format!("unable to parse {} as number", given)) }

    pub fn unbound_symbol(given: &str) -> Error { Error::new(ErrorKind::Value, format!("unbound symbol: {}", given)) }

    pub fn arg_type(expected: &str, given: &str) -> Error { Error::new(ErrorKind::Type, format!("expected {}, got {}", expected, given)) }

    pub fn cell_arg_type(index: usize, expected: &str, given: &str) -> Error {
        Error::new(ErrorKind::Type, format!("expected {} at index {}, got {}", expected, index, given))
    }

    pub fn empty_args() -> Error { Error::new(ErrorKind::Argument, "expected some arguments, got 0") }

    pub fn arg_count(expected: usize, given: usize) -> Error {
        Error::new(ErrorKind::Argument, format!("expected {} arguments, got {}", expected, given))
    }

    pub fn empty_cell_args(index: usize) -> Error {
        Error::new(ErrorKind::Argument, format!("expected some arguments at index {}, got 0", index))
    }

    pub fn cell_arg_count(index: usize, expected: usize, given: usize) -> Error {
        Error::new(ErrorKind::Argument, format!("expected {} arguments at index {}, got {}", expected, index, given))
    }

    pub fn standard(detail: impl Into<String>) -> Error { Error::new(ErrorKind::Standard, detail) }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "**{}**: {}", self.name(), self.detail) }
}

/// Bail out of a builtin with an Error value when `args` has the wrong count.
#[macro_export]
macro_rules! check_arg_count {
    ($args:expr, $expected:expr) => {
        if $args.len() != $expected {
            return $crate::interpreter::value::Value::Err($crate::interpreter::error::Error::arg_count($expected, $args.len()));
        }
    };
}

/// Bail out of a builtin with an Error value when the cell at `index` is not
/// the expected variant. `$pat` is the variant pattern, `$expected` its
/// display name.
#[macro_export]
macro_rules! check_cell_type {
    ($args:expr, $index:expr, $pat:pat, $expected:expr) => {
        if !matches!($args[$index], $pat) {
            return $crate::interpreter::value::Value::Err($crate::interpreter::error::Error::cell_arg_type(
                $index,
                $expected,
                $args[$index].type_name(),
            ));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_kind() {
        assert_eq!(Error::arg_count(2, 3).name(), "ArgumentError");
        assert_eq!(Error::arg_type("number", "symbol").name(), "TypeError");
        assert_eq!(Error::new(ErrorKind::Arithmetic, "division by zero").name(), "ArithmeticError");
        assert_eq!(Error::unbound_symbol("x").name(), "ValueError");
        assert_eq!(Error::standard("?").name(), "StandardError");
    }

    #[test]
    fn message_formats() {
        assert_eq!(Error::parse_number("99999999999999999999").detail, "unable to parse 99999999999999999999 as number");
        assert_eq!(Error::unbound_symbol("foo").detail, "unbound symbol: foo");
        assert_eq!(Error::arg_type("q-expression", "number").detail, "expected q-expression, got number");
        assert_eq!(Error::cell_arg_type(0, "q-expression", "number").detail, "expected q-expression at index 0, got number");
        assert_eq!(Error::empty_args().detail, "expected some arguments, got 0");
        assert_eq!(Error::arg_count(2, 5).detail, "expected 2 arguments, got 5");
        assert_eq!(Error::empty_cell_args(0).detail, "expected some arguments at index 0, got 0");
        assert_eq!(Error::cell_arg_count(1, 2, 3).detail, "expected 2 arguments at index 1, got 3");
    }

    #[test]
    fn display_renders_name_and_detail() {
        let err = Error::new(ErrorKind::Arithmetic, "division by zero");
        assert_eq!(format!("{}", err), "**ArithmeticError**: division by zero");
    }
}
