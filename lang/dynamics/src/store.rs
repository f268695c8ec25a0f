//! Placeholders of a single run.

use crate::{err::*, syntax::*};
use mtac_term::{FreeVars, Substitution};
use mtac_utils::cells::SingCell;

#[derive(Clone, Debug)]
pub struct EvarEntry {
    pub ty: RcTerm,
    pub value: SingCell<RcTerm>,
}

/// Allocates placeholders and records their (set-once) instantiations.
///
/// Keys are tagged with the store's generation, so an evar of another run is
/// simply unknown here.
#[derive(Clone, Debug)]
pub struct EvarStore {
    entries: ArenaDense<EvarId, EvarEntry>,
}

impl Default for EvarStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EvarStore {
    pub fn new() -> Self {
        EvarStore { entries: ArenaDense::new(GlobalAlloc::alloc()) }
    }
    pub fn alloc(&mut self, ty: RcTerm) -> EvarId {
        let evar = self.entries.alloc(EvarEntry { ty, value: SingCell::new() });
        log::trace!("allocate evar {}", evar.concise());
        evar
    }
    pub fn owns(&self, evar: EvarId) -> bool {
        self.entries.owns(&evar)
    }
    pub fn value(&self, evar: EvarId) -> Option<&RcTerm> {
        self.entries.get(&evar)?.value.get()
    }
    pub fn is_instantiated(&self, evar: EvarId) -> bool {
        self.value(evar).is_some()
    }
    /// Bind `evar` to `value`, once.
    pub fn instantiate(&mut self, evar: EvarId, value: RcTerm) -> Result<()> {
        let value = self.zonk(&value);
        if value.evars().contains(&evar) {
            Err(Failure::CyclicInstantiation(evar))?
        }
        let entry = self.entries.get_mut(&evar).ok_or_else(|| {
            Failure::NotAnEvar(mtac_term::construct::evar(evar))
        })?;
        entry.value.init_or_else(|| value, |_| Failure::AlreadyInstantiated(evar))?;
        log::trace!("instantiate evar {}", evar.concise());
        Ok(())
    }
    /// Replace every instantiated evar of `term` by its value.
    pub fn zonk(&self, term: &RcTerm) -> RcTerm {
        term.zonk(&|evar| self.value(evar).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtac_term::construct::*;

    #[test]
    fn instantiate_once() {
        let mut store = EvarStore::new();
        let e = store.alloc(cnst("nat"));
        assert!(!store.is_instantiated(e));
        store.instantiate(e, nat(1)).unwrap();
        assert!(store.is_instantiated(e));
        assert!(matches!(
            store.instantiate(e, nat(2)),
            Err(Failure::AlreadyInstantiated(x)) if x == e
        ));
        assert_eq!(store.zonk(&succ(evar(e))), nat(2));
    }

    #[test]
    fn rejects_cycles_and_foreign_evars() {
        let mut store = EvarStore::new();
        let mut other = EvarStore::new();
        let e = store.alloc(cnst("nat"));
        let f = other.alloc(cnst("nat"));
        let cyclic = store.instantiate(e, succ(evar(e)));
        assert!(matches!(cyclic, Err(Failure::CyclicInstantiation(_))));
        assert!(matches!(store.instantiate(f, nat(0)), Err(Failure::NotAnEvar(_))));
        assert!(!store.owns(f));
    }
}
