
#[macro_use]
extern crate if_chain;

pub mod common;
pub mod term;
mod reduction;
mod conversion;
pub mod infer;

pub mod prelude {
    pub use crate::common::*;
    pub use crate::term::*;
    pub use crate::infer::*;
}

#[cfg(test)]
mod tests {
    use paste::paste;

    type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

    use crate::prelude::*;

    /// `∀(n : *) → (n → n) → n → n`, the Church numeral type.
    fn nat() -> Term {
        let n = Term::var("n");
        Term::pi("n", Term::star(),
            Term::arrow(
                Term::arrow(n.clone(), n.clone()),
                Term::arrow(n.clone(), n)))
    }

    /// `λ(n : *) → λ(s : n → n) → λ(z : n) → s (s z)`.
    fn church_two() -> Term {
        let n = Term::var("n");
        Term::lambda("n", Term::star(),
            Term::lambda("s", Term::arrow(n.clone(), n.clone()),
                Term::lambda("z", n,
                    Term::apply(Term::var("s"),
                        Term::apply(Term::var("s"), Term::var("z"))))))
    }

    macro_rules! test_normal_form {
        ($name:ident, $input:expr, $expected:expr) => {
            paste! {
                #[test]
                fn [<normalize_ $name>]() {
                    assert_eq!(($input).normalize(), $expected);
                }
            }
        }
    }

    macro_rules! test_type_error {
        ($name:ident, $input:expr, $message:pat) => {
            paste! {
                #[test]
                fn [<reject_ $name>]() {
                    let error = type_of(&$input).unwrap_err();
                    assert!(matches!(error.message, $message));
                }
            }
        }
    }

    test_normal_form!(identity, Term::id(), Term::id());
    test_normal_form!(church_two, church_two(), church_two());
    test_normal_form!(
        identity_applied_twice,
        Term::apply(
            Term::apply(Term::id(), nat()),
            Term::apply(Term::apply(Term::id(), nat()), church_two())),
        church_two()
    );
    test_normal_form!(
        two_applications_of_successor,
        Term::apply(
            Term::apply(
                Term::apply(church_two(), Term::var("T")),
                Term::var("succ")),
            Term::var("zero")),
        Term::apply(Term::var("succ"),
            Term::apply(Term::var("succ"), Term::var("zero")))
    );
    test_normal_form!(
        eta_collapses_wrapped_functions,
        Term::lambda("x", Term::var("a"),
            Term::apply(Term::var("f"), Term::var("x"))),
        Term::var("f")
    );

    test_type_error!(box_is_untyped, Term::sort(Const::Box),
        TypeMessage::Untyped(Const::Box));
    test_type_error!(unbound_variable, Term::var("x"),
        TypeMessage::UnboundVariable);
    test_type_error!(sort_applied_to_sort,
        Term::apply(Term::star(), Term::star()),
        TypeMessage::NotAFunction);

    #[test]
    fn identity_types_as_expected() -> Result<()> {
        let ty = type_of(&Term::id())?;
        let expected = Term::pi("a", Term::star(),
            Term::pi("x", Term::var("a"), Term::var("a")));
        assert_eq!(ty, expected);
        Ok(())
    }

    #[test]
    fn church_two_inhabits_nat() -> Result<()> {
        let ty = type_of(&church_two())?;
        assert!(ty.convertible(&nat()));
        Ok(())
    }

    #[test]
    fn mismatched_argument_reports_both_sides() {
        // λ(a : *) → λ(x : a) → (λ(y : *) → y) x  applies a *-expecting
        // function to a value of type a.
        let term = Term::lambda("a", Term::star(),
            Term::lambda("x", Term::var("a"),
                Term::apply(
                    Term::lambda("y", Term::star(), Term::var("y")),
                    Term::var("x"))));
        let error = type_of(&term).unwrap_err();
        let expected = TypeMessage::TypeMismatch {
            expected: Term::star(),
            actual: Term::var("a"),
        };
        assert_eq!(error.message, expected);
    }

    #[test]
    fn failures_report_the_empty_closed_context() {
        let error = type_of(&Term::sort(Const::Box)).unwrap_err();
        assert!(error.context.is_empty());
        assert_eq!(error.expr, Term::sort(Const::Box));
    }

    #[test]
    fn shadowed_binders_resolve_by_index() {
        // λ(x : *) → λ(y : *) → λ(x : *) → x@i applied to A, B, C.
        let with_index = |i: usize| {
            Term::lambda("x", Term::star(),
                Term::lambda("y", Term::star(),
                    Term::lambda("x", Term::star(), Term::var(("x", i)))))
        };
        let saturate = |f: Term| {
            Term::apply(
                Term::apply(Term::apply(f, Term::var("A")), Term::var("B")),
                Term::var("C"))
        };
        // x@0 selects the innermost binder, x@1 the outermost.
        assert_eq!(saturate(with_index(0)).normalize(), Term::var("C"));
        assert_eq!(saturate(with_index(1)).normalize(), Term::var("A"));
    }

    #[test]
    fn inferred_types_are_themselves_typed() -> Result<()> {
        // The type of a well-typed term checks to a sort.
        let ty = type_of(&Term::id())?;
        assert_eq!(type_of(&ty)?, Term::star());
        let kind = type_of(&nat())?;
        assert_eq!(kind, Term::star());
        Ok(())
    }

    #[test]
    fn reduction_preserves_types() -> Result<()> {
        let redex = Term::apply(Term::apply(Term::id(), nat()), church_two());
        let before = type_of(&redex)?;
        let after = type_of(&redex.normalize())?;
        assert!(before.convertible(&after));
        Ok(())
    }
}
