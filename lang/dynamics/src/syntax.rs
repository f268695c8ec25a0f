pub use mtac_term::syntax::*;

use crate::{exn::*, unify::Subst};
use derive_more::From;
use std::rc::Rc;

/* ---------------------------------- HOAS ---------------------------------- */

/// A host closure embedded in a computation.
pub struct Hoas<F: ?Sized>(pub Rc<F>);

impl<F: ?Sized> Clone for Hoas<F> {
    fn clone(&self) -> Self {
        Hoas(self.0.clone())
    }
}
impl<F: ?Sized> std::fmt::Debug for Hoas<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<closure>")
    }
}

pub type RcCompu = Rc<Computation>;
/// The continuation of a bind, or the body of a `nu`.
pub type Kont = Hoas<dyn Fn(RcTerm) -> Computation>;

/* ------------------------------- Computation ------------------------------ */

/// How a returned term is normalized before it becomes the value of `ret`.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Policy {
    /// keep the term as it is
    #[default]
    NoReduction,
    /// full normal form
    Simplify,
    /// weak-head normal form
    WeakHead,
    /// a single leftmost-outermost contraction, if any
    OneStep,
}

/// `raise e`
#[derive(Clone, Debug)]
pub struct Raise(pub Exception);

/// A handler of `try .. with`.
#[derive(Clone, Debug)]
pub struct Catcher {
    /// pattern variables of the exception argument
    pub vars: Vec<VarName>,
    pub pattern: ExnPattern,
    pub handler: Hoas<dyn Fn(&Exception, &Subst) -> Computation>,
}

/// `try body with | c_1 | ... end`
#[derive(Clone, Debug)]
pub struct TryWith {
    pub body: RcCompu,
    pub arms: Vec<Catcher>,
}

/// A recursive function of fixed arity; the body receives the function itself.
#[derive(Clone, Debug)]
pub struct Fixpoint {
    pub arity: usize,
    pub body: Hoas<dyn Fn(&Fixpoint, &[RcTerm]) -> Computation>,
}

impl Fixpoint {
    pub fn new(arity: usize, body: impl Fn(&Fixpoint, &[RcTerm]) -> Computation + 'static) -> Self {
        Fixpoint { arity, body: Hoas(Rc::new(body)) }
    }
    /// `f a_1 .. a_n`
    pub fn call(&self, args: impl IntoIterator<Item = RcTerm>) -> Computation {
        Fix(self.clone(), args.into_iter().collect()).into()
    }
}

/// A clause of `mmatch`: the declared pattern variables, the pattern, and the
/// handler receiving their solutions.
#[derive(Clone, Debug)]
pub struct Clause {
    pub vars: Vec<VarName>,
    pub pattern: RcTerm,
    pub handler: Hoas<dyn Fn(&Subst) -> Computation>,
}

/// `nu (x : ty), body x`
#[derive(Clone, Debug)]
pub struct Nu {
    pub name: VarName,
    pub ty: RcTerm,
    pub body: Kont,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbsKind {
    /// `fun x => ..`
    Fun,
    /// `forall x, ..`
    Prod,
}

/// `abs p t`, closing the parameter `p` in `t` into a binder
#[derive(Clone, Debug)]
pub struct AbsParam {
    pub kind: AbsKind,
    pub param: RcTerm,
    pub body: RcTerm,
}

/// `evar ty`
#[derive(Clone, Debug)]
pub struct EvarAlloc(pub RcTerm);
/// `is_evar t`
#[derive(Clone, Debug)]
pub struct IsEvar(pub RcTerm);
/// `instantiate e t`
#[derive(Clone, Debug)]
pub struct Instantiate {
    pub evar: RcTerm,
    pub value: RcTerm,
}
/// `print t`
#[derive(Clone, Debug)]
pub struct Print(pub RcTerm);

#[derive(From, Clone, Debug)]
pub enum Computation {
    Ret(Ret<RcTerm, Policy>),
    Bind(Bind<RcCompu, Kont>),
    Raise(Raise),
    TryWith(TryWith),
    Fix(Fix<Fixpoint, Vec<RcTerm>>),
    Match(Match<RcTerm, Clause>),
    Nu(Nu),
    Abs(AbsParam),
    EvarAlloc(EvarAlloc),
    IsEvar(IsEvar),
    Instantiate(Instantiate),
    Print(Print),
}

/* -------------------------------- Semantics ------------------------------- */

/// What the machine does after a computation is entered.
#[derive(Clone, Debug)]
pub enum Frame {
    /// the rest of a bind
    Kont(Kont),
    /// an open `nu` extent
    Scope(ParamId),
    /// handlers installed by `try .. with`
    Catch(Vec<Catcher>),
}

/// Machine states.
#[derive(Clone, Debug)]
pub enum State {
    Compute(Computation),
    Return(RcTerm),
    Unwind(Exception),
}
