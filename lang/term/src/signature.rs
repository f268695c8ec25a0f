use crate::{err::SignatureError, syntax::*};
use indexmap::IndexMap;

/// A global constant. Axioms have no body.
#[derive(Clone, Debug)]
pub struct Definition {
    pub ty: RcTerm,
    pub body: Option<RcTerm>,
    /// For recursive definitions, the argument position that must be a constructor
    /// application before the definition may unfold.
    pub guard: Option<usize>,
}

/// Global environment of the calculus: constants and constructors, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Signature {
    consts: IndexMap<ConstName, Definition>,
    ctors: IndexMap<CtorName, RcTerm>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }
    fn declare(&mut self, name: ConstName, def: Definition) -> Result<(), SignatureError> {
        if self.consts.contains_key(&name) {
            return Err(SignatureError::DuplicateConst(name));
        }
        log::trace!("declare constant `{}`", name);
        self.consts.insert(name, def);
        Ok(())
    }
    pub fn axiom(&mut self, name: impl Into<ConstName>, ty: RcTerm) -> Result<(), SignatureError> {
        self.declare(name.into(), Definition { ty, body: None, guard: None })
    }
    pub fn define(
        &mut self, name: impl Into<ConstName>, ty: RcTerm, body: RcTerm,
    ) -> Result<(), SignatureError> {
        self.declare(name.into(), Definition { ty, body: Some(body), guard: None })
    }
    /// Declare a recursive definition that unfolds only once argument `guard` is
    /// a constructor application.
    pub fn define_rec(
        &mut self, name: impl Into<ConstName>, ty: RcTerm, guard: usize, body: RcTerm,
    ) -> Result<(), SignatureError> {
        let name = name.into();
        let mut arity = 0;
        let mut lam = &body;
        while let Term::Lam(Abs(_, inner)) = lam.as_ref() {
            arity += 1;
            lam = inner;
        }
        if guard >= arity {
            Err(SignatureError::GuardOutOfRange { name: name.clone(), guard })?
        }
        self.declare(name, Definition { ty, body: Some(body), guard: Some(guard) })
    }
    pub fn ctor(&mut self, name: impl Into<CtorName>, ty: RcTerm) -> Result<(), SignatureError> {
        let name = name.into();
        if self.ctors.contains_key(&name) {
            return Err(SignatureError::DuplicateCtor(name));
        }
        self.ctors.insert(name, ty);
        Ok(())
    }
    pub fn get_const(&self, name: &ConstName) -> Option<&Definition> {
        self.consts.get(name)
    }
    pub fn get_ctor(&self, name: &CtorName) -> Option<&RcTerm> {
        self.ctors.get(name)
    }
}
