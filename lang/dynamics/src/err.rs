use crate::{exn::*, syntax::*};
use thiserror::Error;

/// Why a run ended without a value.
///
/// Only [`Failure::Uncaught`] stems from the program's own exceptions; every
/// other variant is a misuse of the primitives and is never seen by handlers.
#[derive(Error, Debug, Clone)]
pub enum Failure {
    #[error("uncaught exception {0}")]
    Uncaught(Exception),
    #[error("no pattern matches {0}")]
    NoMatchingPattern(RcTerm),
    #[error("parameter {} escapes its scope", .0.concise())]
    ScopeEscape(ParamId),
    #[error("{0} is not a parameter")]
    NotAParameter(RcTerm),
    #[error("parameter {} is abstracted after its scope closed", .0.concise())]
    EscapesScope(ParamId),
    #[error("placeholder {} is already instantiated", .0.concise())]
    AlreadyInstantiated(EvarId),
    #[error("placeholder {} is never instantiated", .0.concise())]
    UninstantiatedRequiredEvar(EvarId),
    #[error("placeholder {} would occur in its own value", .0.concise())]
    CyclicInstantiation(EvarId),
    #[error("expected {expected} arguments, found {found}")]
    ArityMismatch { expected: usize, found: usize },
    #[error("{0} is not a placeholder")]
    NotAnEvar(RcTerm),
    #[error("exception {0:?} was not declared")]
    UndeclaredException(ExnTag),
}

pub type Result<T> = std::result::Result<T, Failure>;
