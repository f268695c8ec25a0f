//! One-line summaries of machine states, for step traces.

use crate::syntax::*;
use std::fmt;

impl fmt::Display for Computation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | Computation::Ret(Ret(term, Policy::NoReduction)) => write!(f, "ret {}", term),
            | Computation::Ret(Ret(term, policy)) => write!(f, "ret[{:?}] {}", policy, term),
            | Computation::Bind(_) => write!(f, "bind"),
            | Computation::Raise(Raise(exn)) => write!(f, "raise {}", exn),
            | Computation::TryWith(TryWith { arms, .. }) => {
                write!(f, "try with {} handlers", arms.len())
            }
            | Computation::Fix(Fix(fix, args)) => {
                write!(f, "fix/{}", fix.arity)?;
                for arg in args {
                    write!(f, " ({})", arg)?;
                }
                Ok(())
            }
            | Computation::Match(Match { scrut, arms }) => {
                write!(f, "mmatch {} with {} clauses", scrut, arms.len())
            }
            | Computation::Nu(Nu { name, ty, .. }) => write!(f, "nu ({} : {})", name, ty),
            | Computation::Abs(AbsParam { kind, param, body }) => {
                write!(f, "abs[{:?}] {} {}", kind, param, body)
            }
            | Computation::EvarAlloc(EvarAlloc(ty)) => write!(f, "evar {}", ty),
            | Computation::IsEvar(IsEvar(term)) => write!(f, "is_evar {}", term),
            | Computation::Instantiate(Instantiate { evar, value }) => {
                write!(f, "instantiate {} {}", evar, value)
            }
            | Computation::Print(Print(term)) => write!(f, "print {}", term),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            | State::Compute(compu) => write!(f, "{}", compu),
            | State::Return(term) => write!(f, "<- {}", term),
            | State::Unwind(exn) => write!(f, "!! {}", exn),
        }
    }
}
