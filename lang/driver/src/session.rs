use crate::{
    conf::Conf,
    demos,
    err::{Result, SessionError},
};
use mtac_dynamics::{ExnCtor, ExnRegistry, Runtime, syntax::Computation};
use mtac_term::{
    Kernel, Reducer, ScopeKernel, Signature, SignatureError, prelude, syntax::RcTerm,
};
use std::rc::Rc;

/// Everything a run needs besides the computation itself.
///
/// The signature and the exception registry outlive single runs; evars and
/// parameters do not, each run starts from empty stores.
pub struct Session {
    pub conf: Conf,
    pub reducer: Reducer,
    pub exns: ExnRegistry,
}

impl Session {
    pub fn new(conf: Conf) -> Result<Self> {
        let mut sig = Signature::new();
        if conf.prelude {
            prelude::load(&mut sig)?;
        }
        Ok(Self::with_signature(conf, sig))
    }
    pub fn with_signature(conf: Conf, sig: Signature) -> Self {
        Session { conf, reducer: Reducer::new(Rc::new(sig)), exns: ExnRegistry::new() }
    }

    pub fn signature(&self) -> &Signature {
        &self.reducer.sig
    }
    /// Extend the signature; later runs see the new globals.
    pub fn define(
        &mut self, f: impl FnOnce(&mut Signature) -> std::result::Result<(), SignatureError>,
    ) -> Result<()> {
        f(Rc::make_mut(&mut self.reducer.sig))?;
        Ok(())
    }
    pub fn declare_exn(&mut self, name: &str, arg: Option<RcTerm>) -> ExnCtor {
        self.exns.declare(name, arg)
    }

    /// Run `compu` and have the kernel recheck its result.
    pub fn run(&self, compu: Computation) -> Result<RcTerm> {
        self.exec(compu, None)
    }
    /// Like [`Session::run`], rechecking the result against `ty`.
    pub fn run_as(&self, compu: Computation, ty: &RcTerm) -> Result<RcTerm> {
        self.exec(compu, Some(ty))
    }

    /// Run a bundled tactic by name.
    pub fn run_demo(&mut self, name: &str, arg: Option<usize>) -> Result<RcTerm> {
        let demo = demos::find(name).ok_or_else(|| SessionError::UnknownDemo(name.to_string()))?;
        log::debug!("running demo `{}`", demo.name);
        let compu = demo.computation(self, arg);
        self.run(compu)
    }

    fn exec(&self, compu: Computation, ty: Option<&RcTerm>) -> Result<RcTerm> {
        let runtime = Runtime::new(&self.reducer, &self.exns).trace_steps(self.conf.trace_steps);
        let term = runtime.run(compu)?;
        if self.conf.verify {
            ScopeKernel::new(self.signature()).check(&term, ty)?;
        } else {
            log::warn!("kernel verification is off; result is unchecked");
        }
        Ok(term)
    }
}
