pub mod fmt;
pub use fmt::*;

mod impls;
use derive_more::From;

/* ---------------------------------- Names --------------------------------- */

/// a named variable; pattern variables and context-bound variables alike
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct VarName(pub String);
/// a constructor of an inductive type, e.g. `S` or `cons`
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct CtorName(pub String);
/// a global constant, either an axiom or a definition
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConstName(pub String);

/* ------------------------------- Structural ------------------------------- */

/// any binding structure
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Abs<S, T>(pub S, pub T);
/// `e1 e2` shaped application
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct App<S, T>(pub S, pub T);

/// `let x := a in ...`
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Let<Br, Be, Tail> {
    pub binder: Br,
    pub bindee: Be,
    pub tail: Tail,
}

/* --------------------------------- Monadic -------------------------------- */

/// `ret a` under a normalization policy
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Ret<Tm, Po>(pub Tm, pub Po);
/// `x <- b; ...`, where the continuation owns the binder
#[derive(Clone, Debug)]
pub struct Bind<Be, Tail> {
    pub bindee: Be,
    pub tail: Tail,
}

/// `fix f a_1 .. a_n`, a recursive function applied to its arguments
#[derive(Clone, Debug)]
pub struct Fix<F, Args>(pub F, pub Args);

/// `match a | p_1 => b_1 | ... end`
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Match<Sc, Arm> {
    pub scrut: Sc,
    pub arms: Vec<Arm>,
}

/// literals in term
#[derive(From, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Literal {
    String(String),
}
