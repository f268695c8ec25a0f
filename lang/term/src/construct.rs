//! Builders for terms in higher-order style.
//!
//! Binders are written as Rust closures receiving the bound variable:
//!
//! ```ignore
//! lam("x", cnst("nat"), |x| app(ctor("S"), [x]))
//! ```
//!
//! The closure sees a fresh free name, which is abstracted back into a de Bruijn
//! index once the body is built. Pattern variables for the matcher are plain
//! [`free`] names and are not touched by this.

use crate::{prelude::names, subst::Substitution, syntax::*};
use std::{
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
};

static FRESH: AtomicUsize = AtomicUsize::new(0);

/// A name no other call returns, built from `hint`.
pub fn fresh(hint: &str) -> VarName {
    VarName(format!("{}%{}", hint, FRESH.fetch_add(1, Ordering::Relaxed)))
}

pub fn sort(sort: Sort) -> RcTerm {
    Rc::new(sort.into())
}
pub fn free(name: impl Into<VarName>) -> RcTerm {
    Rc::new(Term::Free(name.into()))
}
pub fn cnst(name: impl Into<ConstName>) -> RcTerm {
    Rc::new(Term::Const(name.into()))
}
pub fn ctor(name: impl Into<CtorName>) -> RcTerm {
    Rc::new(Term::Ctor(name.into()))
}
pub fn lit(s: impl Into<String>) -> RcTerm {
    Rc::new(Literal::String(s.into()).into())
}
pub fn param(param: ParamId) -> RcTerm {
    Rc::new(param.into())
}
pub fn evar(evar: EvarId) -> RcTerm {
    Rc::new(evar.into())
}
pub fn app(head: RcTerm, args: impl IntoIterator<Item = RcTerm>) -> RcTerm {
    Term::apply(head, args)
}

fn bind(
    hint: &str, ty: RcTerm, body: impl FnOnce(RcTerm) -> RcTerm,
) -> (Binder, RcTerm) {
    let x = fresh(hint);
    let body = body(free(x.clone())).abstract_free(&[x]);
    (Binder { name: VarName::from(hint), ty }, body)
}

/// `fun (x : ty) => body`
pub fn lam(x: &str, ty: RcTerm, body: impl FnOnce(RcTerm) -> RcTerm) -> RcTerm {
    let (binder, body) = bind(x, ty, body);
    Rc::new(Abs(binder, body).into())
}
/// `forall (x : ty), body`
pub fn prod(x: &str, ty: RcTerm, body: impl FnOnce(RcTerm) -> RcTerm) -> RcTerm {
    let (binder, body) = bind(x, ty, body);
    Rc::new(Prod(binder, body).into())
}
/// `ty -> cod`
pub fn arrow(ty: RcTerm, cod: RcTerm) -> RcTerm {
    prod("_", ty, |_| cod)
}
/// `let x : ty := bindee in tail`
pub fn let_in(
    x: &str, ty: RcTerm, bindee: RcTerm, tail: impl FnOnce(RcTerm) -> RcTerm,
) -> RcTerm {
    let (binder, tail) = bind(x, ty, tail);
    Rc::new(Let { binder, bindee, tail }.into())
}
/// `| C x_1 .. x_n => body`
pub fn arm(ctor: &str, vars: &[&str], body: impl FnOnce(&[RcTerm]) -> RcTerm) -> CaseArm {
    let names: Vec<_> = vars.iter().map(|hint| fresh(hint)).collect();
    let args: Vec<_> = names.iter().cloned().map(free).collect();
    let body = body(&args).abstract_free(&names);
    CaseArm { ctor: CtorName::from(ctor), arity: vars.len(), body }
}
/// `match scrut with arms end`
pub fn case(scrut: RcTerm, arms: impl IntoIterator<Item = CaseArm>) -> RcTerm {
    Rc::new(Match { scrut, arms: arms.into_iter().collect() }.into())
}

/* ---------------------------------- Data ---------------------------------- */

/// The unary numeral `S (.. (S O))`.
pub fn nat(n: usize) -> RcTerm {
    (0..n).fold(ctor(names::O), |acc, _| app(ctor(names::S), [acc]))
}
pub fn succ(n: RcTerm) -> RcTerm {
    app(ctor(names::S), [n])
}
pub fn boolean(b: bool) -> RcTerm {
    ctor(if b { names::TRUE } else { names::FALSE })
}
pub fn nil() -> RcTerm {
    ctor(names::NIL)
}
pub fn cons(head: RcTerm, tail: RcTerm) -> RcTerm {
    app(ctor(names::CONS), [head, tail])
}
pub fn list(items: impl IntoIterator<Item = RcTerm, IntoIter: DoubleEndedIterator>) -> RcTerm {
    items.into_iter().rev().fold(nil(), |tail, head| cons(head, tail))
}
