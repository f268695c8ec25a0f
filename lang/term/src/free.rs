use crate::syntax::*;
use mtac_utils::context::CoContext;

/// Visit every subterm together with the number of binders crossed to reach it.
pub(crate) fn visit(term: &RcTerm, depth: usize, f: &mut impl FnMut(&Term, usize)) {
    f(term, depth);
    match term.as_ref() {
        | Term::Sort(_)
        | Term::Bound(_)
        | Term::Free(_)
        | Term::Param(_)
        | Term::Evar(_)
        | Term::Const(_)
        | Term::Ctor(_)
        | Term::Lit(_) => {}
        | Term::App(App(a, b)) => {
            visit(a, depth, f);
            visit(b, depth, f);
        }
        | Term::Lam(Abs(binder, body)) | Term::Prod(Prod(binder, body)) => {
            visit(&binder.ty, depth, f);
            visit(body, depth + 1, f);
        }
        | Term::Let(Let { binder, bindee, tail }) => {
            visit(&binder.ty, depth, f);
            visit(bindee, depth, f);
            visit(tail, depth + 1, f);
        }
        | Term::Case(Match { scrut, arms }) => {
            visit(scrut, depth, f);
            for arm in arms {
                visit(&arm.body, depth + arm.arity, f);
            }
        }
    }
}

pub trait FreeVars {
    /// Named variables occurring in the term.
    fn free_names(&self) -> CoContext<VarName>;
    /// Parameters occurring in the term.
    fn params(&self) -> CoContext<ParamId>;
    /// Evars occurring in the term.
    fn evars(&self) -> CoContext<EvarId>;
    /// Loose de Bruijn indices, counted from outside the term.
    fn loose_bound(&self) -> CoContext<usize>;

    fn occurs_param(&self, param: ParamId) -> bool {
        self.params().contains(&param)
    }
    fn is_locally_closed(&self) -> bool {
        self.loose_bound().is_empty()
    }
}

impl FreeVars for RcTerm {
    fn free_names(&self) -> CoContext<VarName> {
        let mut names = CoContext::new();
        visit(self, 0, &mut |term, _| {
            if let Term::Free(name) = term {
                names.0.insert(name.clone());
            }
        });
        names
    }
    fn params(&self) -> CoContext<ParamId> {
        let mut params = CoContext::new();
        visit(self, 0, &mut |term, _| {
            if let Term::Param(param) = term {
                params.0.insert(*param);
            }
        });
        params
    }
    fn evars(&self) -> CoContext<EvarId> {
        let mut evars = CoContext::new();
        visit(self, 0, &mut |term, _| {
            if let Term::Evar(evar) = term {
                evars.0.insert(*evar);
            }
        });
        evars
    }
    fn loose_bound(&self) -> CoContext<usize> {
        let mut loose = CoContext::new();
        visit(self, 0, &mut |term, depth| {
            if let Term::Bound(Bound(i)) = term {
                if *i >= depth {
                    loose.0.insert(i - depth);
                }
            }
        });
        loose
    }
    fn occurs_param(&self, param: ParamId) -> bool {
        let mut found = false;
        visit(self, 0, &mut |term, _| found |= term.as_param() == Some(param));
        found
    }
}
