use crate::{
    err::{KernelError, Result},
    free::visit,
    signature::Signature,
    syntax::*,
};
use auto_impl::auto_impl;

/// The final authority on results of a run.
///
/// The engine performs no checking of its own; a result it returns is only as
/// trustworthy as the kernel that rechecks it against the expected type.
#[auto_impl(&, Box, Rc)]
pub trait Kernel {
    fn check(&self, term: &RcTerm, ty: Option<&RcTerm>) -> Result<()>;
}

/// Checks that a term (and its expected type, if given) is closed and only
/// mentions declared globals. It does not check types.
pub struct ScopeKernel<'a> {
    pub sig: &'a Signature,
}

impl<'a> ScopeKernel<'a> {
    pub fn new(sig: &'a Signature) -> Self {
        ScopeKernel { sig }
    }
}

impl ScopeKernel<'_> {
    fn closed(&self, term: &RcTerm) -> Result<()> {
        let mut res = Ok(());
        visit(term, 0, &mut |term, depth| {
            if res.is_err() {
                return;
            }
            res = match term {
                | Term::Bound(Bound(i)) if *i >= depth => Err(KernelError::LooseBound(i - depth)),
                | Term::Free(name) => Err(KernelError::FreeName(name.clone())),
                | Term::Param(param) => Err(KernelError::OpenParam(*param)),
                | Term::Evar(evar) => Err(KernelError::OpenEvar(*evar)),
                | Term::Const(name) if self.sig.get_const(name).is_none() => {
                    Err(KernelError::UnknownConst(name.clone()))
                }
                | Term::Ctor(name) if self.sig.get_ctor(name).is_none() => {
                    Err(KernelError::UnknownCtor(name.clone()))
                }
                | _ => Ok(()),
            };
        });
        res
    }
}

impl Kernel for ScopeKernel<'_> {
    fn check(&self, term: &RcTerm, ty: Option<&RcTerm>) -> Result<()> {
        if let Some(ty) = ty {
            self.closed(ty)?;
        }
        self.closed(term)
    }
}
