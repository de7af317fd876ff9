
use std::fmt;
use std::rc::Rc;

use crate::common::*;

/// The two sorts of the calculus. `Star` classifies types, `Box` classifies
/// kinds; `Box` itself has no type.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Const {
    Star,
    Box,
}

/// A variable reference: a name together with how many enclosing binders of
/// that same name to skip. `V(x, 0)` is the innermost `x` in scope.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Var {
    pub name: Symbol,
    pub index: Index,
}

impl Var {
    pub fn new(name: impl Into<Symbol>, index: impl Into<Index>) -> Var {
        Var { name: name.into(), index: index.into() }
    }
}

impl From<&str> for Var {
    fn from(name: &str) -> Var { Var::new(name, 0) }
}

impl From<(&str, usize)> for Var {
    fn from((name, index): (&str, usize)) -> Var { Var::new(name, index) }
}

#[derive(Debug, Hash, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Term {
    Const(Const),
    Var(Var),
    Lambda {
        name: Symbol,
        domain: Rc<Term>,
        body: Rc<Term>
    },
    Pi {
        name: Symbol,
        domain: Rc<Term>,
        body: Rc<Term>
    },
    Apply {
        fun: Rc<Term>,
        arg: Rc<Term>
    },
}

impl Term {
    pub fn star() -> Term { Term::Const(Const::Star) }

    pub fn sort(c: Const) -> Term { Term::Const(c) }

    pub fn var(v: impl Into<Var>) -> Term { Term::Var(v.into()) }

    pub fn lambda(name: impl Into<Symbol>, domain: Term, body: Term) -> Term {
        Term::Lambda { name: name.into(), domain: Rc::new(domain), body: Rc::new(body) }
    }

    pub fn pi(name: impl Into<Symbol>, domain: Term, body: Term) -> Term {
        Term::Pi { name: name.into(), domain: Rc::new(domain), body: Rc::new(body) }
    }

    /// Non-dependent function type: a `Pi` whose bound name is never used.
    pub fn arrow(domain: Term, body: Term) -> Term {
        Term::pi(Symbol::default(), domain, body)
    }

    pub fn apply(fun: Term, arg: Term) -> Term {
        Term::Apply { fun: Rc::new(fun), arg: Rc::new(arg) }
    }

    /// The polymorphic identity, `λ(a : *) → λ(x : a) → x`.
    pub fn id() -> Term {
        Term::lambda("a", Term::star(),
            Term::lambda("x", Term::var("a"), Term::var("x")))
    }

    /// True when some occurrence of `name` escapes every enclosing binder of
    /// the same name, i.e. the name is free somewhere in `self`. Drives the
    /// `∀(x : A) → B` versus `A → B` rendering.
    pub fn used(&self, name: Symbol) -> bool {
        self.used_at(name, 0.into())
    }

    fn used_at(&self, name: Symbol, depth: Index) -> bool {
        match self {
            Term::Const(_) => false,
            Term::Var(v) => v.name == name && v.index >= depth,
            Term::Lambda { name: bound, domain, body }
            | Term::Pi { name: bound, domain, body } => {
                let inner = if *bound == name { depth.succ() } else { depth };
                domain.used_at(name, depth) || body.used_at(name, inner)
            }
            Term::Apply { fun, arg } => {
                fun.used_at(name, depth) || arg.used_at(name, depth)
            }
        }
    }

    /// True when exactly the variable `var` occurs free in `self`.
    pub fn free_in(&self, var: Var) -> bool {
        match self {
            Term::Const(_) => false,
            Term::Var(v) => *v == var,
            Term::Lambda { name, domain, body }
            | Term::Pi { name, domain, body } => {
                let inner =
                    if *name == var.name { Var { name: var.name, index: var.index.succ() } }
                    else { var };
                domain.free_in(var) || body.free_in(inner)
            }
            Term::Apply { fun, arg } => fun.free_in(var) || arg.free_in(var),
        }
    }

    fn is_binder(&self) -> bool {
        matches!(self, Term::Lambda { .. } | Term::Pi { .. })
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Const::Star => write!(f, "*"),
            Const::Box => write!(f, "□"),
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.index.value() == 0 { write!(f, "{}", self.name) }
        else { write!(f, "{}@{}", self.name, self.index) }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Const(c) => write!(f, "{}", c),
            Term::Var(v) => write!(f, "{}", v),
            Term::Lambda { name, domain, body } => {
                write!(f, "λ({} : {}) → {}", name, domain, body)
            }
            Term::Pi { name, domain, body } => {
                if body.used(*name) {
                    write!(f, "∀({} : {}) → {}", name, domain, body)
                } else if domain.is_binder() {
                    write!(f, "({}) → {}", domain, body)
                } else {
                    write!(f, "{} → {}", domain, body)
                }
            }
            Term::Apply { fun, arg } => {
                let arg_ambiguous = arg.is_binder() || matches!(arg.as_ref(), Term::Apply { .. });
                match (fun.is_binder(), arg_ambiguous) {
                    (false, false) => write!(f, "{} {}", fun, arg),
                    (false, true) => write!(f, "{} ({})", fun, arg),
                    (true, false) => write!(f, "({}) {}", fun, arg),
                    (true, true) => write!(f, "({}) ({})", fun, arg),
                }
            }
        }
    }
}
