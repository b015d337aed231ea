use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::interpreter::builtin::BUILTIN_NAMES;
use crate::interpreter::error::Error;
use crate::interpreter::value::Value;

/// A chained symbol table. The parent link is a non-owning lookup chain:
/// copying an environment duplicates its bindings but shares the parent.
#[derive(PartialEq, Clone, Default)]
pub struct Env {
    pub parent: Option<Rc<RefCell<Env>>>,
    values: HashMap<String, Value>,
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.parent {
            Some(ref parent) => write!(f, "<Env({}) {:?}>", self.values.len(), parent.borrow()),
            None => write!(f, "<Env({})>", self.values.len()),
        }
    }
}

impl Env {
    /// A fresh, empty, parentless environment (closures start with one).
    pub fn new() -> Rc<RefCell<Env>> { Rc::new(RefCell::new(Env::default())) }

    /// The global environment: every builtin name bound to its native
    /// function. Created once per session.
    pub fn new_root() -> Rc<RefCell<Env>> {
        let env = Env::new();
        for &name in BUILTIN_NAMES.iter() {
            env.borrow_mut().put(name.into(), Value::native(name));
        }
        env
    }

    /// Looks `name` up here, then in the parent chain. A hit returns a copy
    /// of the binding so the caller can never mutate the stored value; a
    /// miss at the root is an unbound-symbol Error value.
    pub fn get(&self, name: &str) -> Value {
        match self.values.get(name) {
            Some(value) => value.clone(),
            None => match self.parent {
                Some(ref parent) => parent.borrow().get(name),
                None => Value::Err(Error::unbound_symbol(name)),
            },
        }
    }

    /// Binds `name` in this scope only, overwriting any local binding.
    /// Parents are never searched.
    pub fn put(&mut self, name: String, value: Value) { self.values.insert(name, value); }

    pub fn root(env: &Rc<RefCell<Env>>) -> Rc<RefCell<Env>> {
        match env.borrow().parent {
            Some(ref parent) => Env::root(parent),
            None => env.clone(),
        }
    }

    /// `def` semantics: bind at the global scope no matter how deep the
    /// calling scope is.
    pub fn define_global(env: &Rc<RefCell<Env>>, name: String, value: Value) {
        let root = Env::root(env);
        root.borrow_mut().put(name, value);
    }
}
