use crate::{err::*, syntax::*};

#[derive(Clone, Debug)]
pub struct ParamDecl {
    pub name: VarName,
    pub ty: RcTerm,
}

/// Issues parameters and keeps the stack of open `nu` extents.
#[derive(Clone, Debug)]
pub struct ParamManager {
    issued: ArenaDense<ParamId, ParamDecl>,
    open: Vec<ParamId>,
}

impl Default for ParamManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamManager {
    pub fn new() -> Self {
        ParamManager { issued: ArenaDense::new(GlobalAlloc::alloc()), open: Vec::new() }
    }
    /// Issue a fresh parameter and open its extent.
    pub fn open(&mut self, name: VarName, ty: RcTerm) -> ParamId {
        let param = self.issued.alloc(ParamDecl { name, ty });
        self.open.push(param);
        log::debug!("open extent of {}", param.concise());
        param
    }
    /// Close the innermost extent, which must be the one of `param`.
    pub fn close(&mut self, param: ParamId) {
        debug_assert_eq!(self.open.last(), Some(&param), "extents must nest");
        self.open.pop();
        log::debug!("close extent of {}", param.concise());
    }
    /// The declaration of `param`, provided its extent is still open.
    pub fn lookup(&self, param: ParamId) -> Result<&ParamDecl> {
        let Some(decl) = self.issued.get(&param) else {
            return Err(Failure::NotAParameter(mtac_term::construct::param(param)));
        };
        if !self.open.contains(&param) {
            Err(Failure::EscapesScope(param))?
        }
        Ok(decl)
    }
    pub fn is_open(&self, param: ParamId) -> bool {
        self.open.contains(&param)
    }
    /// Number of extents currently open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtac_term::construct::*;

    #[test]
    fn extents_nest() {
        let mut params = ParamManager::new();
        let p = params.open("x".into(), cnst("nat"));
        let q = params.open("y".into(), cnst("nat"));
        assert_eq!(params.depth(), 2);
        assert!(params.lookup(p).is_ok());
        params.close(q);
        assert!(matches!(params.lookup(q), Err(Failure::EscapesScope(x)) if x == q));
        params.close(p);
        assert!(!params.is_open(p));
    }

    #[test]
    fn foreign_parameters_are_rejected() {
        let mut mine = ParamManager::new();
        let mut theirs = ParamManager::new();
        let _ = mine.open("x".into(), cnst("nat"));
        let p = theirs.open("x".into(), cnst("nat"));
        assert!(matches!(mine.lookup(p), Err(Failure::NotAParameter(_))));
    }
}
