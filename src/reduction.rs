
use std::rc::Rc;

use crate::common::*;
use crate::term::*;

impl Term {
    /// Add `amount` to the index of every free occurrence of `name`.
    /// An occurrence is free when its index is at least the number of
    /// enclosing binders of the same name.
    pub fn shift(&self, amount: isize, name: Symbol) -> Term {
        self.shift_above(amount, name, 0.into())
    }

    fn shift_above(&self, amount: isize, name: Symbol, cutoff: Index) -> Term {
        match self {
            t @ Term::Const(_) => t.clone(),
            Term::Var(v) => {
                let index =
                    if v.name == name && v.index >= cutoff { v.index.offset(amount) }
                    else { v.index };
                Term::Var(Var { name: v.name, index })
            }
            Term::Lambda { name: bound, domain, body } => {
                let domain = domain.shift_above(amount, name, cutoff);
                let inner = if *bound == name { cutoff.succ() } else { cutoff };
                let body = body.shift_above(amount, name, inner);
                Term::Lambda { name: *bound, domain: Rc::new(domain), body: Rc::new(body) }
            }
            Term::Pi { name: bound, domain, body } => {
                let domain = domain.shift_above(amount, name, cutoff);
                let inner = if *bound == name { cutoff.succ() } else { cutoff };
                let body = body.shift_above(amount, name, inner);
                Term::Pi { name: *bound, domain: Rc::new(domain), body: Rc::new(body) }
            }
            Term::Apply { fun, arg } => {
                let fun = fun.shift_above(amount, name, cutoff);
                let arg = arg.shift_above(amount, name, cutoff);
                Term::Apply { fun: Rc::new(fun), arg: Rc::new(arg) }
            }
        }
    }

    /// Capture-avoiding substitution of `replacement` for the free variable
    /// `V(name, index)`. Crossing a binder bumps the sought index when the
    /// binder shares the name, and shifts the replacement over the binder's
    /// own name so its free variables keep referring outward.
    pub fn subst(&self, name: Symbol, index: Index, replacement: &Term) -> Term {
        match self {
            t @ Term::Const(_) => t.clone(),
            Term::Var(v) => {
                if v.name == name && v.index == index { replacement.clone() }
                else { Term::Var(*v) }
            }
            Term::Lambda { name: bound, domain, body } => {
                let domain = domain.subst(name, index, replacement);
                let inner = if *bound == name { index.succ() } else { index };
                let replacement = replacement.shift(1, *bound);
                let body = body.subst(name, inner, &replacement);
                Term::Lambda { name: *bound, domain: Rc::new(domain), body: Rc::new(body) }
            }
            Term::Pi { name: bound, domain, body } => {
                let domain = domain.subst(name, index, replacement);
                let inner = if *bound == name { index.succ() } else { index };
                let replacement = replacement.shift(1, *bound);
                let body = body.subst(name, inner, &replacement);
                Term::Pi { name: *bound, domain: Rc::new(domain), body: Rc::new(body) }
            }
            Term::Apply { fun, arg } => {
                let fun = fun.subst(name, index, replacement);
                let arg = arg.subst(name, index, replacement);
                Term::Apply { fun: Rc::new(fun), arg: Rc::new(arg) }
            }
        }
    }

    /// One beta contraction of `body` applied to `arg`: shift the argument
    /// over the bound name, substitute at index 0, shift the result back.
    fn contract(name: Symbol, body: &Term, arg: &Term) -> Term {
        let arg = arg.shift(1, name);
        let body = body.subst(name, 0.into(), &arg);
        body.shift(-1, name)
    }

    /// Weak-head normal form: the head is reduced until it is not an
    /// application of a lambda; binder bodies and argument positions are
    /// left untouched.
    pub fn whnf(&self) -> Term {
        match self {
            Term::Apply { fun, arg } => match fun.whnf() {
                Term::Lambda { name, body, .. } => {
                    Term::contract(name, &body, arg).whnf()
                }
                fun => Term::Apply { fun: Rc::new(fun), arg: arg.clone() },
            },
            t => t.clone(),
        }
    }

    /// Full normal form under normal-order reduction: beta everywhere, plus
    /// eta (`λ(x : A) → f x` collapses to `f` when `x` is not free in `f`).
    /// Terminates on every well-typed term; ill-typed input may diverge.
    pub fn normalize(&self) -> Term {
        match self {
            t @ (Term::Const(_) | Term::Var(_)) => t.clone(),
            Term::Lambda { name, domain, body } => {
                let body = body.normalize();
                if_chain! {
                    if let Term::Apply { fun, arg } = &body;
                    if let Term::Var(v) = arg.as_ref();
                    if v.name == *name && v.index.value() == 0;
                    if !fun.free_in(*v);
                    then { return fun.shift(-1, *name); }
                }
                Term::Lambda {
                    name: *name,
                    domain: Rc::new(domain.normalize()),
                    body: Rc::new(body)
                }
            }
            Term::Pi { name, domain, body } => Term::Pi {
                name: *name,
                domain: Rc::new(domain.normalize()),
                body: Rc::new(body.normalize())
            },
            Term::Apply { fun, arg } => match fun.normalize() {
                Term::Lambda { name, body, .. } => {
                    Term::contract(name, &body, arg).normalize()
                }
                fun => Term::Apply {
                    fun: Rc::new(fun),
                    arg: Rc::new(arg.normalize())
                },
            },
        }
    }
}
