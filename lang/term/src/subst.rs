use crate::syntax::*;
use std::{collections::HashMap, rc::Rc};

/// Rebuild `term` bottom-up; `leaf` is offered every subterm first, together with
/// the number of binders crossed so far, and may replace it wholesale.
///
/// Unchanged subterms are shared with the input.
pub(crate) fn map_term(
    term: &RcTerm, depth: usize, leaf: &mut impl FnMut(&RcTerm, usize) -> Option<RcTerm>,
) -> RcTerm {
    if let Some(new) = leaf(term, depth) {
        return new;
    }
    let new: Term = match term.as_ref() {
        | Term::Sort(_)
        | Term::Bound(_)
        | Term::Free(_)
        | Term::Param(_)
        | Term::Evar(_)
        | Term::Const(_)
        | Term::Ctor(_)
        | Term::Lit(_) => return term.clone(),
        | Term::App(App(f, a)) => {
            let f_ = map_term(f, depth, leaf);
            let a_ = map_term(a, depth, leaf);
            if Rc::ptr_eq(f, &f_) && Rc::ptr_eq(a, &a_) {
                return term.clone();
            }
            App(f_, a_).into()
        }
        | Term::Lam(Abs(b, body)) => {
            let (same, b_) = map_binder(b, depth, leaf);
            let body_ = map_term(body, depth + 1, leaf);
            if same && Rc::ptr_eq(body, &body_) {
                return term.clone();
            }
            Abs(b_, body_).into()
        }
        | Term::Prod(Prod(b, body)) => {
            let (same, b_) = map_binder(b, depth, leaf);
            let body_ = map_term(body, depth + 1, leaf);
            if same && Rc::ptr_eq(body, &body_) {
                return term.clone();
            }
            Prod(b_, body_).into()
        }
        | Term::Let(Let { binder: b, bindee, tail }) => {
            let (same, b_) = map_binder(b, depth, leaf);
            let bindee_ = map_term(bindee, depth, leaf);
            let tail_ = map_term(tail, depth + 1, leaf);
            if same && Rc::ptr_eq(bindee, &bindee_) && Rc::ptr_eq(tail, &tail_) {
                return term.clone();
            }
            Let { binder: b_, bindee: bindee_, tail: tail_ }.into()
        }
        | Term::Case(Match { scrut, arms }) => {
            let scrut_ = map_term(scrut, depth, leaf);
            let mut unchanged = Rc::ptr_eq(scrut, &scrut_);
            let arms_ = arms
                .iter()
                .map(|arm| {
                    let body = map_term(&arm.body, depth + arm.arity, leaf);
                    unchanged &= Rc::ptr_eq(&arm.body, &body);
                    CaseArm { ctor: arm.ctor.clone(), arity: arm.arity, body }
                })
                .collect();
            if unchanged {
                return term.clone();
            }
            Match { scrut: scrut_, arms: arms_ }.into()
        }
    };
    Rc::new(new)
}

fn map_binder(
    b: &Binder, depth: usize, leaf: &mut impl FnMut(&RcTerm, usize) -> Option<RcTerm>,
) -> (bool, Binder) {
    let ty = map_term(&b.ty, depth, leaf);
    (Rc::ptr_eq(&ty, &b.ty), Binder { name: b.name.clone(), ty })
}

/// Capture-avoiding substitution over the locally nameless representation.
pub trait Substitution {
    /// Add `by` to every bound index at or above `cutoff`.
    fn shift(&self, by: isize, cutoff: usize) -> RcTerm;
    /// Replace the outermost loose index `Bound(0)` with `arg`, i.e. open a binder body.
    fn instantiate(&self, arg: &RcTerm) -> RcTerm;
    /// Replace free names by terms; replacements are shifted under binders.
    fn subst_free(&self, env: &HashMap<VarName, RcTerm>) -> RcTerm;
    /// Turn the free names `x_1 .. x_n` into the binders of `n` enclosing abstractions,
    /// `x_n` being the innermost one.
    fn abstract_free(&self, names: &[VarName]) -> RcTerm;
    /// Turn a parameter into the variable bound by one enclosing abstraction.
    fn abstract_param(&self, param: ParamId) -> RcTerm;
    /// Give loose indices names: every loose `Bound(i)` listed in `names` becomes
    /// the paired free name. Other indices are left untouched.
    fn name_bound(&self, names: &[(usize, VarName)]) -> RcTerm;
    /// Replace instantiated evars by their values, transitively.
    fn zonk(&self, lookup: &dyn Fn(EvarId) -> Option<RcTerm>) -> RcTerm;
}

impl Substitution for RcTerm {
    fn shift(&self, by: isize, cutoff: usize) -> RcTerm {
        if by == 0 {
            return self.clone();
        }
        map_term(self, 0, &mut |term, depth| match term.as_ref() {
            | Term::Bound(Bound(i)) if *i >= cutoff + depth => {
                let i = (*i as isize + by).max(0) as usize;
                Some(Rc::new(Bound(i).into()))
            }
            | _ => None,
        })
    }
    fn instantiate(&self, arg: &RcTerm) -> RcTerm {
        map_term(self, 0, &mut |term, depth| match term.as_ref() {
            | Term::Bound(Bound(i)) if *i == depth => Some(arg.shift(depth as isize, 0)),
            | Term::Bound(Bound(i)) if *i > depth => Some(Rc::new(Bound(i - 1).into())),
            | _ => None,
        })
    }
    fn subst_free(&self, env: &HashMap<VarName, RcTerm>) -> RcTerm {
        if env.is_empty() {
            return self.clone();
        }
        map_term(self, 0, &mut |term, depth| match term.as_ref() {
            | Term::Free(name) => env.get(name).map(|with| with.shift(depth as isize, 0)),
            | _ => None,
        })
    }
    fn abstract_free(&self, names: &[VarName]) -> RcTerm {
        let n = names.len();
        // bump existing loose indices past the new binders first
        let shifted = self.shift(n as isize, 0);
        map_term(&shifted, 0, &mut |term, depth| match term.as_ref() {
            | Term::Free(name) => {
                // the last occurrence wins, so shadowing behaves like nested binders
                let pos = names.iter().rposition(|x| x == name)?;
                Some(Rc::new(Bound(depth + n - 1 - pos).into()))
            }
            | _ => None,
        })
    }
    fn abstract_param(&self, param: ParamId) -> RcTerm {
        let shifted = self.shift(1, 0);
        map_term(&shifted, 0, &mut |term, depth| match term.as_ref() {
            | Term::Param(p) if *p == param => Some(Rc::new(Bound(depth).into())),
            | _ => None,
        })
    }
    fn name_bound(&self, names: &[(usize, VarName)]) -> RcTerm {
        map_term(self, 0, &mut |term, depth| match term.as_ref() {
            | Term::Bound(Bound(i)) if *i >= depth => {
                let (_, name) = names.iter().find(|(j, _)| *j == i - depth)?;
                Some(Rc::new(Term::Free(name.clone())))
            }
            | _ => None,
        })
    }
    fn zonk(&self, lookup: &dyn Fn(EvarId) -> Option<RcTerm>) -> RcTerm {
        map_term(self, 0, &mut |term, _| match term.as_ref() {
            | Term::Evar(evar) => lookup(*evar).map(|value| value.zonk(lookup)),
            | _ => None,
        })
    }
}
