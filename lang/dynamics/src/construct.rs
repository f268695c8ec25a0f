//! Builders for computations.
//!
//! Continuations, handlers and fixpoint bodies are Rust closures; terms are
//! built with [`mtac_term::construct`]. A pattern is an ordinary term in which
//! the declared variables of its clause appear as free names:
//!
//! ```ignore
//! mmatch(l, [
//!     clause(&[], nil(), |_| ret(nat(0))),
//!     clause(&["h", "t"], cons(free("h"), free("t")), |s| ret(s["t"].clone())),
//! ])
//! ```

use crate::{exn::*, syntax::*, unify::Subst};
use std::rc::Rc;

fn var_names(names: &[&str]) -> Vec<VarName> {
    names.iter().map(VarName::from).collect()
}

/// `ret t`, keeping the term as it is
pub fn ret(term: RcTerm) -> Computation {
    Ret(term, Policy::NoReduction).into()
}
/// `ret t` under the given normalization policy
pub fn ret_with(term: RcTerm, policy: Policy) -> Computation {
    Ret(term, policy).into()
}
/// `x <- c; k x`
pub fn bind(bindee: Computation, tail: impl Fn(RcTerm) -> Computation + 'static) -> Computation {
    let tail: Kont = Hoas(Rc::new(tail));
    Bind { bindee: Rc::new(bindee), tail }.into()
}
pub fn raise(exn: Exception) -> Computation {
    Raise(exn).into()
}
pub fn try_with(body: Computation, arms: impl IntoIterator<Item = Catcher>) -> Computation {
    TryWith { body: Rc::new(body), arms: arms.into_iter().collect() }.into()
}
/// A handler for `ctor` whose argument must unify with `arg`.
pub fn catch(
    ctor: &ExnCtor, vars: &[&str], arg: Option<RcTerm>,
    handler: impl Fn(&Subst) -> Computation + 'static,
) -> Catcher {
    Catcher {
        vars: var_names(vars),
        pattern: ctor.pattern(arg),
        handler: Hoas(Rc::new(move |_: &Exception, subst: &Subst| handler(subst))),
    }
}
/// A handler for every exception.
pub fn catch_any(handler: impl Fn(&Exception) -> Computation + 'static) -> Catcher {
    Catcher {
        vars: Vec::new(),
        pattern: ExnPattern::Any,
        handler: Hoas(Rc::new(move |exn: &Exception, _: &Subst| handler(exn))),
    }
}
/// `mmatch scrut with clauses end`
pub fn mmatch(scrut: RcTerm, clauses: impl IntoIterator<Item = Clause>) -> Computation {
    Match { scrut, arms: clauses.into_iter().collect() }.into()
}
/// `| [vars] pattern => handler`
pub fn clause(
    vars: &[&str], pattern: RcTerm, handler: impl Fn(&Subst) -> Computation + 'static,
) -> Clause {
    Clause { vars: var_names(vars), pattern, handler: Hoas(Rc::new(handler)) }
}
/// `fix f a_1 .. a_arity => body`
pub fn fix(
    arity: usize, body: impl Fn(&Fixpoint, &[RcTerm]) -> Computation + 'static,
) -> Fixpoint {
    Fixpoint::new(arity, body)
}
/// `nu (x : ty), body x`
pub fn nu(x: &str, ty: RcTerm, body: impl Fn(RcTerm) -> Computation + 'static) -> Computation {
    Nu { name: VarName::from(x), ty, body: Hoas(Rc::new(body)) }.into()
}
/// `abs p t`, giving `fun x => t[p := x]`
pub fn abs_fun(param: RcTerm, body: RcTerm) -> Computation {
    AbsParam { kind: AbsKind::Fun, param, body }.into()
}
/// `abs_prod p t`, giving `forall x, t[p := x]`
pub fn abs_prod(param: RcTerm, body: RcTerm) -> Computation {
    AbsParam { kind: AbsKind::Prod, param, body }.into()
}
/// `evar ty`
pub fn evar_alloc(ty: RcTerm) -> Computation {
    EvarAlloc(ty).into()
}
pub fn is_evar(term: RcTerm) -> Computation {
    IsEvar(term).into()
}
pub fn instantiate(evar: RcTerm, value: RcTerm) -> Computation {
    Instantiate { evar, value }.into()
}
pub fn print(term: RcTerm) -> Computation {
    Print(term).into()
}
