
use std::fmt;
use std::rc::Rc;

use imbl::Vector;
use thiserror::Error;

use crate::common::*;
use crate::term::*;

/// Typing context: an ordered sequence of `(name, type)` pairs, innermost
/// binding first. The same name may appear more than once; `V(x, n)` selects
/// the n-th entry named `x` scanning from the head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context(Vector<(Symbol, Term)>);

impl Context {
    pub fn new() -> Context {
        Context(Vector::new())
    }

    /// Enter a binder: every stored type is shifted by `+1` over `name`,
    /// then `(name, ty)` is prepended. The new entry itself is not shifted;
    /// it lives under the outer context.
    pub fn bind(&self, name: Symbol, ty: Term) -> Context {
        let mut entries: Vector<(Symbol, Term)> = self.0.iter()
            .map(|(n, t)| (*n, t.shift(1, name)))
            .collect();
        entries.push_front((name, ty));
        Context(entries)
    }

    /// The type of `var`, if bound.
    pub fn lookup(&self, var: Var) -> Option<&Term> {
        self.0.iter()
            .filter(|entry| entry.0 == var.name)
            .nth(var.index.value())
            .map(|entry| &entry.1)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Symbol, Term)> {
        self.0.iter()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, ty) in self.0.iter() {
            writeln!(f, "{} : {}", name, ty)?;
        }
        Ok(())
    }
}

/// The reason a typing derivation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeMessage {
    #[error("unbound variable")]
    UnboundVariable,
    #[error("invalid input type: {0}")]
    InvalidInputType(Term),
    #[error("invalid output type: {0}")]
    InvalidOutputType(Term),
    #[error("only functions may be applied to arguments")]
    NotAFunction,
    #[error("expected {expected} but the argument has type {actual}")]
    TypeMismatch { expected: Term, actual: Term },
    #[error("{0} has no type")]
    Untyped(Const),
}

/// A failed derivation: the context prevailing at the failure site, the
/// sub-expression whose typing failed, and the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeError {
    pub context: Context,
    pub expr: Term,
    pub message: TypeMessage,
}

impl TypeError {
    fn new(context: &Context, expr: &Term, message: TypeMessage) -> TypeError {
        TypeError { context: context.clone(), expr: expr.clone(), message }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.context.is_empty() {
            writeln!(f, "context:")?;
            for (name, ty) in self.context.iter() {
                writeln!(f, "    {} : {}", name, ty)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "expression: {}", self.expr)?;
        write!(f, "error: {}", self.message)
    }
}

impl std::error::Error for TypeError {}

/// The type of a sort: `* : □`, and `□` is untyped.
pub fn axiom(c: Const) -> Result<Const, TypeMessage> {
    match c {
        Const::Star => Ok(Const::Box),
        Const::Box => Err(TypeMessage::Untyped(Const::Box)),
    }
}

/// The function-space rule table. All four sort pairs are permitted.
pub fn rule(domain: Const, codomain: Const) -> Const {
    match (domain, codomain) {
        (Const::Star, Const::Star) => Const::Star,
        (Const::Star, Const::Box) => Const::Box,
        (Const::Box, Const::Star) => Const::Star,
        (Const::Box, Const::Box) => Const::Box,
    }
}

/// Infer the type of `term` under `ctx`. The first failure aborts the
/// derivation and is returned as a value; nothing is thrown.
pub fn type_with(ctx: &Context, term: &Term) -> Result<Term, TypeError> {
    match term {
        Term::Const(c) => axiom(*c)
            .map(Term::Const)
            .map_err(|message| TypeError::new(ctx, term, message)),
        Term::Var(v) => ctx.lookup(*v)
            .cloned()
            .ok_or_else(|| TypeError::new(ctx, term, TypeMessage::UnboundVariable)),
        Term::Lambda { name, domain, body } => {
            let inner = ctx.bind(*name, domain.as_ref().clone());
            let body_ty = type_with(&inner, body)?;
            let pi = Term::Pi {
                name: *name,
                domain: domain.clone(),
                body: Rc::new(body_ty)
            };
            // The formed Pi must itself be well-sorted; its type is discarded.
            type_with(ctx, &pi)?;
            Ok(pi)
        }
        Term::Pi { name, domain, body } => {
            let domain_sort = match type_with(ctx, domain)?.whnf() {
                Term::Const(s) => s,
                _ => {
                    let message = TypeMessage::InvalidInputType(domain.as_ref().clone());
                    return Err(TypeError::new(ctx, term, message));
                }
            };
            let inner = ctx.bind(*name, domain.as_ref().clone());
            let body_sort = match type_with(&inner, body)?.whnf() {
                Term::Const(t) => t,
                _ => {
                    let message = TypeMessage::InvalidOutputType(body.as_ref().clone());
                    return Err(TypeError::new(ctx, term, message));
                }
            };
            Ok(Term::Const(rule(domain_sort, body_sort)))
        }
        Term::Apply { fun, arg } => {
            let (name, domain, body) = match type_with(ctx, fun)?.whnf() {
                Term::Pi { name, domain, body } => (name, domain, body),
                _ => return Err(TypeError::new(ctx, term, TypeMessage::NotAFunction)),
            };
            let arg_ty = type_with(ctx, arg)?;
            if !domain.convertible(&arg_ty) {
                let message = TypeMessage::TypeMismatch {
                    expected: domain.normalize(),
                    actual: arg_ty.normalize(),
                };
                return Err(TypeError::new(ctx, term, message));
            }
            let arg = arg.shift(1, name);
            Ok(body.subst(name, 0.into(), &arg).shift(-1, name))
        }
    }
}

/// Infer the type of a closed term.
pub fn type_of(term: &Term) -> Result<Term, TypeError> {
    type_with(&Context::new(), term)
}
