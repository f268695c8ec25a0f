#![allow(clippy::style)]

/// Terms in locally nameless form and their identifiers.
pub mod syntax;
/// Capture-avoiding substitution, abstraction and evar zonking.
pub mod subst;
/// Free variable, parameter and evar queries.
pub mod free;
/// Global constants and constructors.
pub mod signature;
/// The reduction oracle.
pub mod reduce;
/// The rechecking kernel.
pub mod kernel;
/// Higher-order builders for terms.
pub mod construct;
/// Standard inductive data and functions over it.
pub mod prelude;
pub mod fmt;
pub mod err;

pub use err::*;
pub use free::FreeVars;
pub use kernel::{Kernel, ScopeKernel};
pub use reduce::{Oracle, Reducer};
pub use signature::{Definition, Signature};
pub use subst::Substitution;

#[cfg(test)]
mod tests;
