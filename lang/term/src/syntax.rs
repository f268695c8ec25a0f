pub use mtac_syntax::*;
pub use mtac_utils::arena::*;

use derive_more::From;
use std::{
    hash::{Hash, Hasher},
    rc::Rc,
};

/* ------------------------------- Identifier ------------------------------- */

new_key_type! {
    /// a fresh opaque name introduced by a `nu` extent
    pub struct ParamId;
    /// a placeholder owned by the metavariable store of one run
    pub struct EvarId;
}

pub type RcTerm = Rc<Term>;

/* ---------------------------------- Term ---------------------------------- */

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Sort {
    Prop,
    Set,
    Type,
}

/// de Bruijn index; `Bound(0)` refers to the innermost binder
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Bound(pub usize);

/// A binder's name hint together with its type.
///
/// The name is only used for printing; two binders are equal when their types are.
#[derive(Clone, Debug)]
pub struct Binder {
    pub name: VarName,
    pub ty: RcTerm,
}

impl PartialEq for Binder {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}
impl Eq for Binder {}
impl Hash for Binder {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ty.hash(state)
    }
}

/// `forall (x: A), B`
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Prod(pub Binder, pub RcTerm);

/// `| C x_1 .. x_n => body`; the body lives under `arity` binders,
/// the last constructor argument being `Bound(0)`
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct CaseArm {
    pub ctor: CtorName,
    pub arity: usize,
    pub body: RcTerm,
}

#[derive(From, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Term {
    Sort(Sort),
    Bound(Bound),
    Free(VarName),
    Param(ParamId),
    Evar(EvarId),
    Const(ConstName),
    Ctor(CtorName),
    Lit(Literal),
    App(App<RcTerm, RcTerm>),
    Lam(Abs<Binder, RcTerm>),
    Prod(Prod),
    Let(Let<Binder, RcTerm, RcTerm>),
    Case(Match<RcTerm, CaseArm>),
}

impl Term {
    /// Split an application into its head and arguments, outermost argument last.
    pub fn spine(term: &RcTerm) -> (RcTerm, Vec<RcTerm>) {
        let mut args = Vec::new();
        let mut head = term.clone();
        while let Term::App(App(f, a)) = head.as_ref() {
            args.push(a.clone());
            head = f.clone();
        }
        args.reverse();
        (head, args)
    }
    /// Rebuild an application from a head and its arguments.
    pub fn apply(head: RcTerm, args: impl IntoIterator<Item = RcTerm>) -> RcTerm {
        args.into_iter().fold(head, |f, a| Rc::new(App(f, a).into()))
    }
    pub fn is_ctor_app(term: &RcTerm) -> bool {
        let (head, _) = Term::spine(term);
        matches!(head.as_ref(), Term::Ctor(_))
    }
    pub fn as_param(&self) -> Option<ParamId> {
        match self {
            | Term::Param(param) => Some(*param),
            | _ => None,
        }
    }
    pub fn as_evar(&self) -> Option<EvarId> {
        match self {
            | Term::Evar(evar) => Some(*evar),
            | _ => None,
        }
    }
}
