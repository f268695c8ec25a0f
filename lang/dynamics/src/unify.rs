//! Pattern unification modulo reduction.
//!
//! A pattern is a term in which the declared variables of its clause (plain
//! [`Term::Free`] names) are unknowns; every other name is rigid and must meet an
//! equal term in the scrutinee. The unifier first compares the two terms
//! structurally, solving unknowns and uninstantiated evars on the way. When that
//! fails it brings both sides to weak-head normal form and tries again, and as a
//! last resort asks the oracle whether the instantiated pattern is equivalent to
//! the scrutinee.
//!
//! An unknown applied to distinct variables bound inside the pattern is solved
//! by abstracting those variables out of the matching subterm.
//!
//! Declared variables are renamed apart before unifying, so a scrutinee may
//! mention an ambient name spelled like one of them.

use crate::{store::EvarStore, syntax::*};
use mtac_term::{
    FreeVars, Oracle, Substitution,
    construct::{free, fresh},
};
use std::{collections::HashMap, ops::Index, rc::Rc};

/// Solutions of the declared variables of a selected clause.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subst(pub im::HashMap<VarName, RcTerm>);

impl Subst {
    pub fn get(&self, name: &str) -> Option<&RcTerm> {
        self.0.get(&VarName::from(name))
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Look up the solution of a declared variable.
///
/// # Panics
///
/// If `name` is not among the declared variables of the clause. Use
/// [`Subst::get`] when the name may be missing.
impl Index<&str> for Subst {
    type Output = RcTerm;
    fn index(&self, name: &str) -> &RcTerm {
        match self.get(name) {
            | Some(term) => term,
            | None => panic!("pattern variable `{}` is not declared", name),
        }
    }
}

/// The outcome of a successful unification: the substitution and the evar
/// instantiations it depends on. Nothing is committed yet.
#[derive(Clone, Debug)]
pub struct Unified {
    pub subst: Subst,
    pub evars: Vec<(EvarId, RcTerm)>,
}

#[derive(Clone, Default)]
struct Solution {
    subst: im::HashMap<VarName, RcTerm>,
    pending: im::HashMap<EvarId, RcTerm>,
}

pub struct Unifier<'u> {
    oracle: &'u dyn Oracle,
    evars: &'u EvarStore,
    /// declared variables, each with the internal name it is unified under
    vars: Vec<(VarName, VarName)>,
    sol: Solution,
    /// binders crossed so far, innermost last; case arms have no binder types
    ctx: Vec<Option<Binder>>,
}

impl<'u> Unifier<'u> {
    pub fn new(oracle: &'u dyn Oracle, evars: &'u EvarStore, vars: &[VarName]) -> Self {
        let vars = vars.iter().map(|var| (var.clone(), fresh(var.plain()))).collect();
        Unifier { oracle, evars, vars, sol: Solution::default(), ctx: Vec::new() }
    }

    /// Unify `pattern` against `term`. Succeeds only if every declared variable
    /// ends up solved.
    pub fn unify(mut self, pattern: &RcTerm, term: &RcTerm) -> Option<Unified> {
        let renaming: HashMap<_, _> = (self.vars.iter())
            .map(|(var, internal)| (var.clone(), free(internal.clone())))
            .collect();
        if !self.go(&pattern.subst_free(&renaming), term) {
            return None;
        }
        self.finish()
    }

    /// Conclude without unifying anything.
    pub fn finish(self) -> Option<Unified> {
        let mut subst = im::HashMap::new();
        for (var, internal) in &self.vars {
            let value = self.sol.subst.get(internal)?;
            subst.insert(var.clone(), self.zonk(value));
        }
        let evars =
            self.sol.pending.iter().map(|(evar, value)| (*evar, self.zonk(value))).collect();
        Some(Unified { subst: Subst(subst), evars })
    }

    /* -------------------------------- Helpers ------------------------------- */

    fn depth(&self) -> usize {
        self.ctx.len()
    }

    fn evar_value(&self, evar: EvarId) -> Option<RcTerm> {
        self.sol.pending.get(&evar).or_else(|| self.evars.value(evar)).cloned()
    }

    fn zonk(&self, term: &RcTerm) -> RcTerm {
        term.zonk(&|evar| self.evar_value(evar))
    }

    /// Follow instantiated evars at the head of `term`.
    fn resolve(&self, term: &RcTerm) -> RcTerm {
        let mut term = term.clone();
        while let Some(value) = term.as_evar().and_then(|evar| self.evar_value(evar)) {
            term = value;
        }
        term
    }

    /// The declared variable `term` consists of, if any.
    fn unknown(&self, term: &RcTerm) -> Option<VarName> {
        match term.as_ref() {
            | Term::Free(name) if self.is_unknown(name) => Some(name.clone()),
            | _ => None,
        }
    }

    fn is_unknown(&self, name: &VarName) -> bool {
        self.vars.iter().any(|(_, internal)| internal == name)
    }

    fn has_unsolved(&self, term: &RcTerm) -> bool {
        term.free_names()
            .iter()
            .any(|name| self.is_unknown(name) && !self.sol.subst.contains_key(name))
    }

    /// Replace solved unknowns by their solutions.
    fn instantiate(&self, term: &RcTerm) -> RcTerm {
        let env: HashMap<_, _> =
            self.sol.subst.iter().map(|(name, value)| (name.clone(), value.clone())).collect();
        self.zonk(&term.subst_free(&env))
    }

    /// Move a subterm seen under the crossed binders out of them, unless it
    /// mentions one of them.
    fn lower(&self, term: &RcTerm) -> Option<RcTerm> {
        let depth = self.depth();
        if term.loose_bound().iter().any(|i| *i < depth) {
            return None;
        }
        Some(term.shift(-(depth as isize), 0))
    }

    fn under(
        &mut self, binders: impl IntoIterator<Item = Option<Binder>>, pattern: &RcTerm,
        term: &RcTerm,
    ) -> bool {
        let depth = self.depth();
        self.ctx.extend(binders);
        let ok = self.go(pattern, term);
        self.ctx.truncate(depth);
        ok
    }

    /* ------------------------------ Unification ----------------------------- */

    fn go(&mut self, pattern: &RcTerm, term: &RcTerm) -> bool {
        let pattern = self.resolve(pattern);
        let term = self.resolve(term);
        log::trace!("unify {} =?= {}", pattern, term);

        if let Some(var) = self.unknown(&pattern) {
            if let Some(value) = self.sol.subst.get(&var).cloned() {
                return self.go(&value.shift(self.depth() as isize, 0), &term);
            }
            let Some(value) = self.lower(&term) else { return false };
            self.sol.subst.insert(var, value);
            return true;
        }
        if let Some(solved) = self.pattern_app(&pattern, &term) {
            return solved;
        }
        match (pattern.as_evar(), term.as_evar()) {
            | (Some(a), Some(b)) if a == b => return true,
            | (_, Some(evar)) => return self.assign(evar, &pattern),
            | (Some(evar), None) => return self.assign(evar, &term),
            | (None, None) => {}
        }

        let snapshot = self.sol.clone();
        if self.structural(&pattern, &term) {
            return true;
        }
        self.sol = snapshot.clone();

        let pattern_ = self.oracle.whnf(&self.zonk(&pattern));
        let term_ = self.oracle.whnf(&self.zonk(&term));
        if pattern_ != pattern || term_ != term {
            if self.go(&pattern_, &term_) {
                return true;
            }
            self.sol = snapshot;
        }

        if self.has_unsolved(&pattern) {
            return false;
        }
        let pattern = self.instantiate(&pattern);
        self.oracle.equivalent(&pattern, &self.zonk(&term))
    }

    /// Tentatively instantiate an uninstantiated evar.
    fn assign(&mut self, evar: EvarId, with: &RcTerm) -> bool {
        if !self.evars.owns(evar) || self.has_unsolved(with) {
            return false;
        }
        let Some(value) = self.lower(&self.instantiate(with)) else { return false };
        if value.evars().contains(&evar) {
            return false;
        }
        log::trace!("tentatively instantiate {}", evar.concise());
        self.sol.pending.insert(evar, value);
        true
    }

    /// An unknown applied to distinct pattern-bound variables.
    fn pattern_app(&mut self, pattern: &RcTerm, term: &RcTerm) -> Option<bool> {
        let (head, args) = Term::spine(pattern);
        if args.is_empty() {
            return None;
        }
        let var = self.unknown(&head)?;
        if let Some(value) = self.sol.subst.get(&var).cloned() {
            let applied = Term::apply(value.shift(self.depth() as isize, 0), args);
            return Some(self.go(&applied, term));
        }
        let depth = self.depth();
        let mut named: Vec<(usize, VarName)> = Vec::new();
        for arg in &args {
            let Term::Bound(Bound(i)) = self.resolve(arg).as_ref().clone() else { return None };
            if i >= depth || named.iter().any(|(j, _)| *j == i) {
                return None;
            }
            named.push((i, fresh("x")));
        }
        let mut binders = Vec::new();
        for (i, _) in &named {
            match &self.ctx[depth - 1 - i] {
                | Some(binder) if binder.ty.is_locally_closed() => binders.push(binder.clone()),
                | _ => return Some(false),
            }
        }
        let body = self.zonk(term).name_bound(&named);
        let Some(body) = self.lower(&body) else { return Some(false) };
        let names: Vec<_> = named.into_iter().map(|(_, name)| name).collect();
        let solution = binders
            .into_iter()
            .rev()
            .fold(body.abstract_free(&names), |body, binder| Rc::new(Abs(binder, body).into()));
        log::trace!("solve `{}` by abstraction", var);
        self.sol.subst.insert(var, solution);
        Some(true)
    }

    fn structural(&mut self, pattern: &RcTerm, term: &RcTerm) -> bool {
        match (pattern.as_ref(), term.as_ref()) {
            | (Term::Sort(a), Term::Sort(b)) => a == b,
            | (Term::Bound(a), Term::Bound(b)) => a == b,
            | (Term::Free(a), Term::Free(b)) => a == b,
            | (Term::Param(a), Term::Param(b)) => a == b,
            | (Term::Evar(a), Term::Evar(b)) => a == b,
            | (Term::Const(a), Term::Const(b)) => a == b,
            | (Term::Ctor(a), Term::Ctor(b)) => a == b,
            | (Term::Lit(a), Term::Lit(b)) => a == b,
            | (Term::App(_), Term::App(_)) => {
                let (p_head, p_args) = Term::spine(pattern);
                let (t_head, t_args) = Term::spine(term);
                p_args.len() == t_args.len()
                    && self.go(&p_head, &t_head)
                    && p_args.iter().zip(t_args.iter()).all(|(p, t)| self.go(p, t))
            }
            | (Term::Lam(Abs(pb, p)), Term::Lam(Abs(tb, t)))
            | (Term::Prod(Prod(pb, p)), Term::Prod(Prod(tb, t))) => {
                self.go(&pb.ty, &tb.ty) && self.under([Some(tb.clone())], p, t)
            }
            | (
                Term::Let(Let { binder: pb, bindee: pe, tail: p }),
                Term::Let(Let { binder: tb, bindee: te, tail: t }),
            ) => {
                self.go(&pb.ty, &tb.ty)
                    && self.go(pe, te)
                    && self.under([Some(tb.clone())], p, t)
            }
            | (
                Term::Case(Match { scrut: ps, arms: p_arms }),
                Term::Case(Match { scrut: ts, arms: t_arms }),
            ) => {
                p_arms.len() == t_arms.len()
                    && self.go(ps, ts)
                    && p_arms.iter().zip(t_arms.iter()).all(|(p, t)| {
                        p.ctor == t.ctor
                            && p.arity == t.arity
                            && self.under(std::iter::repeat_n(None, p.arity), &p.body, &t.body)
                    })
            }
            | _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtac_term::{Reducer, construct::*, prelude};
    use pretty_assertions::assert_eq;

    fn reducer() -> Reducer {
        Reducer::new(Rc::new(prelude::signature().unwrap()))
    }

    fn vars(names: &[&str]) -> Vec<VarName> {
        names.iter().map(VarName::from).collect()
    }

    #[test]
    fn first_order() {
        let r = reducer();
        let store = EvarStore::new();
        let vs = vars(&["h", "t"]);
        let scrut = list([nat(1), nat(2)]);
        let u = Unifier::new(&r, &store, &vs).unify(&cons(free("h"), free("t")), &scrut).unwrap();
        assert_eq!(u.subst["h"], nat(1));
        assert_eq!(u.subst["t"], list([nat(2)]));
        assert_eq!(u.subst.len(), 2);
        assert!(u.subst.get("x").is_none());
    }

    #[test]
    #[should_panic(expected = "pattern variable `x` is not declared")]
    fn indexing_an_undeclared_variable() {
        let r = reducer();
        let store = EvarStore::new();
        let u = Unifier::new(&r, &store, &[]).unify(&nat(0), &nat(0)).unwrap();
        let _ = &u.subst["x"];
    }

    #[test]
    fn modulo_reduction() {
        let r = reducer();
        let store = EvarStore::new();
        let vs = vars(&["n"]);
        let scrut = app(cnst("plus"), [nat(1), nat(2)]);
        let u = Unifier::new(&r, &store, &vs).unify(&succ(free("n")), &scrut).unwrap();
        assert!(r.equivalent(&u.subst["n"], &nat(2)));
        let u = Unifier::new(&r, &store, &[]).unify(&nat(3), &scrut).unwrap();
        assert!(u.subst.is_empty());
        assert!(Unifier::new(&r, &store, &[]).unify(&nat(4), &scrut).is_none());
    }

    #[test]
    fn rigid_names_must_agree() {
        let r = reducer();
        let store = EvarStore::new();
        let vs = vars(&["x"]);
        let pattern = cons(free("x"), free("ambient"));
        let unify = |t| Unifier::new(&r, &store, &vs).unify(&pattern, &t);
        assert!(unify(cons(nat(0), free("ambient"))).is_some());
        assert!(unify(cons(nat(0), nil())).is_none());
    }

    #[test]
    fn nonlinear_variables() {
        let r = reducer();
        let store = EvarStore::new();
        let vs = vars(&["x"]);
        let pattern = cons(free("x"), cons(free("x"), nil()));
        let unify = |t| Unifier::new(&r, &store, &vs).unify(&pattern, &t);
        assert!(unify(list([nat(1), nat(1)])).is_some());
        assert!(unify(list([nat(1), nat(2)])).is_none());
    }

    #[test]
    fn scrutinee_may_mention_declared_spelling() {
        let r = reducer();
        let store = EvarStore::new();
        let vs = vars(&["x"]);
        let pattern = cons(free("x"), cons(free("x"), nil()));
        let u = Unifier::new(&r, &store, &vs).unify(&pattern, &pattern).unwrap();
        assert_eq!(u.subst["x"], free("x"));
        let scrut = cons(free("x"), cons(nat(0), nil()));
        assert!(Unifier::new(&r, &store, &vs).unify(&pattern, &scrut).is_none());
        let pattern = lam("y", cnst("nat"), |y| app(free("x"), [y]));
        let u = Unifier::new(&r, &store, &vs).unify(&pattern, &pattern).unwrap();
        assert_eq!(u.subst["x"], lam("z", cnst("nat"), |z| app(free("x"), [z])));
    }

    #[test]
    fn unmentioned_variable_fails() {
        let r = reducer();
        let store = EvarStore::new();
        let vs = vars(&["x", "y"]);
        assert!(Unifier::new(&r, &store, &vs).unify(&succ(free("x")), &nat(1)).is_none());
    }

    #[test]
    fn higher_order_pattern() {
        let r = reducer();
        let store = EvarStore::new();
        let vs = vars(&["f"]);
        let nat_ty = cnst("nat");
        let pattern = lam("x", nat_ty.clone(), |x| app(free("f"), [x]));
        let scrut = lam("y", nat_ty.clone(), |y| succ(succ(y)));
        let u = Unifier::new(&r, &store, &vs).unify(&pattern, &scrut).unwrap();
        assert_eq!(u.subst["f"], lam("z", nat_ty, |z| succ(succ(z))));
    }

    #[test]
    fn evars_are_instantiated_tentatively() {
        let r = reducer();
        let mut store = EvarStore::new();
        let e = store.alloc(cnst("nat"));
        let vs = vars(&["n"]);
        let u = Unifier::new(&r, &store, &vs).unify(&succ(free("n")), &succ(evar(e)));
        // the unknown is solved by the evar itself, no instantiation needed
        assert!(u.unwrap().evars.is_empty());
        let u = Unifier::new(&r, &store, &[]).unify(&nat(2), &succ(evar(e))).unwrap();
        assert_eq!(u.evars, vec![(e, nat(1))]);
        assert!(!store.is_instantiated(e));
    }
}
