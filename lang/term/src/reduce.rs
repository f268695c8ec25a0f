//! The reduction oracle and its reference implementation.
//!
//! The engine never compares terms by itself; every semantic question
//! ("are these convertible", "what is the head of this term") is put to an
//! [`Oracle`]. [`Reducer`] answers them for the calculus of [`crate::syntax`]
//! with beta, delta, iota and zeta rules.

use crate::{signature::Signature, subst::Substitution, syntax::*};
use auto_impl::auto_impl;
use std::rc::Rc;

#[auto_impl(&, Box, Rc)]
pub trait Oracle {
    /// Weak-head normal form.
    fn whnf(&self, term: &RcTerm) -> RcTerm;
    /// Contract the leftmost-outermost redex, if there is one.
    fn step(&self, term: &RcTerm) -> Option<RcTerm>;
    /// Full normal form, reducing under binders.
    fn normalize(&self, term: &RcTerm) -> RcTerm;
    /// Convertibility under full reduction.
    fn equivalent(&self, lhs: &RcTerm, rhs: &RcTerm) -> bool {
        lhs == rhs || self.normalize(lhs) == self.normalize(rhs)
    }
}

/// Reference oracle over a [`Signature`].
///
/// Recursive definitions unfold only when their guard argument reduces to a
/// constructor application, which keeps normalization terminating on stuck calls
/// such as `append l r` with `l` a variable.
#[derive(Clone)]
pub struct Reducer {
    pub sig: Rc<Signature>,
}

impl Reducer {
    pub fn new(sig: Rc<Signature>) -> Self {
        Reducer { sig }
    }

    /// Delta: the body of `name` if it may unfold against `args`.
    fn unfold(&self, name: &ConstName, args: &[RcTerm]) -> Option<RcTerm> {
        let def = self.sig.get_const(name)?;
        let body = def.body.clone()?;
        if let Some(guard) = def.guard {
            let arg = args.get(guard)?;
            if !Term::is_ctor_app(&self.whnf(arg)) {
                return None;
            }
        }
        Some(body)
    }

    /// Iota: select the arm for a constructor application.
    fn iota(arms: &[CaseArm], scrut: &RcTerm) -> Option<RcTerm> {
        let (head, args) = Term::spine(scrut);
        let Term::Ctor(ctor) = head.as_ref() else { return None };
        let arm = arms.iter().find(|arm| &arm.ctor == ctor && arm.arity == args.len())?;
        // the last argument is the innermost binder
        Some(args.iter().rev().fold(arm.body.clone(), |body, arg| body.instantiate(arg)))
    }

    /// Contract the head redex of `term`. With `eager` set, the scrutinee of a case
    /// is brought to weak-head normal form first; otherwise only a scrutinee that
    /// already is a constructor application fires.
    fn contract(&self, term: &RcTerm, eager: bool) -> Option<RcTerm> {
        let (head, args) = Term::spine(term);
        match head.as_ref() {
            | Term::Lam(Abs(_, body)) if !args.is_empty() => {
                let mut args = args.into_iter();
                let arg = args.next()?;
                Some(Term::apply(body.instantiate(&arg), args))
            }
            | Term::Let(Let { binder: _, bindee, tail }) => {
                Some(Term::apply(tail.instantiate(bindee), args))
            }
            | Term::Const(name) => {
                let body = self.unfold(name, &args)?;
                Some(Term::apply(body, args))
            }
            | Term::Case(Match { scrut, arms }) => {
                let scrut = if eager { self.whnf(scrut) } else { scrut.clone() };
                let body = Self::iota(arms, &scrut)?;
                Some(Term::apply(body, args))
            }
            | _ => None,
        }
    }

    fn step_binder(&self, binder: &Binder) -> Option<Binder> {
        let ty = self.step(&binder.ty)?;
        Some(Binder { name: binder.name.clone(), ty })
    }
}

impl Oracle for Reducer {
    fn whnf(&self, term: &RcTerm) -> RcTerm {
        let mut term = term.clone();
        while let Some(next) = self.contract(&term, true) {
            term = next;
        }
        term
    }

    fn step(&self, term: &RcTerm) -> Option<RcTerm> {
        if let Some(next) = self.contract(term, false) {
            return Some(next);
        }
        let next: Term = match term.as_ref() {
            | Term::App(App(f, a)) => match self.step(f) {
                | Some(f) => App(f, a.clone()).into(),
                | None => App(f.clone(), self.step(a)?).into(),
            },
            | Term::Lam(Abs(binder, body)) => match self.step_binder(binder) {
                | Some(binder) => Abs(binder, body.clone()).into(),
                | None => Abs(binder.clone(), self.step(body)?).into(),
            },
            | Term::Prod(Prod(binder, body)) => match self.step_binder(binder) {
                | Some(binder) => Prod(binder, body.clone()).into(),
                | None => Prod(binder.clone(), self.step(body)?).into(),
            },
            | Term::Case(Match { scrut, arms }) => match self.step(scrut) {
                | Some(scrut) => Match { scrut, arms: arms.clone() }.into(),
                | None => {
                    let mut arms = arms.clone();
                    let arm = arms.iter_mut().find_map(|arm| {
                        let body = self.step(&arm.body)?;
                        arm.body = body;
                        Some(())
                    });
                    arm?;
                    Match { scrut: scrut.clone(), arms }.into()
                }
            },
            | Term::Sort(_)
            | Term::Bound(_)
            | Term::Free(_)
            | Term::Param(_)
            | Term::Evar(_)
            | Term::Const(_)
            | Term::Ctor(_)
            | Term::Lit(_)
            | Term::Let(_) => return None,
        };
        Some(Rc::new(next))
    }

    fn normalize(&self, term: &RcTerm) -> RcTerm {
        let term = self.whnf(term);
        let (head, args) = Term::spine(&term);
        let norm_binder =
            |binder: &Binder| Binder { name: binder.name.clone(), ty: self.normalize(&binder.ty) };
        let head: RcTerm = match head.as_ref() {
            | Term::Lam(Abs(binder, body)) => {
                Rc::new(Abs(norm_binder(binder), self.normalize(body)).into())
            }
            | Term::Prod(Prod(binder, body)) => {
                Rc::new(Prod(norm_binder(binder), self.normalize(body)).into())
            }
            | Term::Case(Match { scrut, arms }) => {
                let scrut = self.normalize(scrut);
                let arms = arms
                    .iter()
                    .map(|arm| CaseArm {
                        ctor: arm.ctor.clone(),
                        arity: arm.arity,
                        body: self.normalize(&arm.body),
                    })
                    .collect();
                Rc::new(Match { scrut, arms }.into())
            }
            | _ => head,
        };
        Term::apply(head, args.iter().map(|arg| self.normalize(arg)))
    }
}
