use crate::syntax::*;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("constant `{0}` is already declared")]
    DuplicateConst(ConstName),
    #[error("constructor `{0}` is already declared")]
    DuplicateCtor(CtorName),
    #[error("guard position {guard} of `{name}` exceeds its arity")]
    GuardOutOfRange { name: ConstName, guard: usize },
}

/// Reasons the reference kernel rejects a term.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("term has a loose bound variable #{0}")]
    LooseBound(usize),
    #[error("term mentions the free name `{0}`")]
    FreeName(VarName),
    #[error("term mentions the parameter {0:?}")]
    OpenParam(ParamId),
    #[error("term mentions the placeholder {0:?}")]
    OpenEvar(EvarId),
    #[error("unknown constant `{0}`")]
    UnknownConst(ConstName),
    #[error("unknown constructor `{0}`")]
    UnknownCtor(CtorName),
}

pub type Result<T> = std::result::Result<T, KernelError>;
