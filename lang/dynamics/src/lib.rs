#![allow(clippy::style)]

pub mod syntax;
pub mod err;
pub use err::*;
/// Nominal exceptions and their registry.
pub mod exn;
pub use exn::{ExnCtor, ExnRegistry, Exception};
/// Placeholders of a run.
pub mod store;
/// Parameters and their extents.
pub mod param;
/// Pattern unification modulo reduction.
pub mod unify;
pub use unify::{Subst, Unifier};
/// The machine.
pub mod eval;
pub use eval::{Eval, Runtime, Step};
pub mod construct;
mod fmt;
