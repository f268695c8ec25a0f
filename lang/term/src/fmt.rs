//! Pretty printing of terms, with numeral and list sugar.

use crate::{free::FreeVars, prelude::names, syntax::*};
use pretty::RcDoc;
use std::fmt;

pub use mtac_syntax::Pretty;

pub struct Formatter {
    pub indent: isize,
    pub width: usize,
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter { indent: 2, width: 80 }
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    fn bound(scope: &im::Vector<String>, i: usize) -> String {
        match scope.len().checked_sub(i + 1).and_then(|k| scope.get(k)) {
            | Some(name) => name.clone(),
            | None => format!("#{}", i),
        }
    }

    fn numeral(term: &RcTerm) -> Option<usize> {
        let mut n = 0;
        let mut term = term.clone();
        loop {
            let (head, args) = Term::spine(&term);
            match (head.as_ref(), args.as_slice()) {
                | (Term::Ctor(c), []) if c.plain() == names::O => return Some(n),
                | (Term::Ctor(c), [pred]) if c.plain() == names::S => {
                    n += 1;
                    term = pred.clone();
                }
                | _ => return None,
            }
        }
    }

    fn items(term: &RcTerm) -> Option<Vec<RcTerm>> {
        let mut items = Vec::new();
        let mut term = term.clone();
        loop {
            let (head, args) = Term::spine(&term);
            match (head.as_ref(), args.as_slice()) {
                | (Term::Ctor(c), []) if c.plain() == names::NIL => return Some(items),
                | (Term::Ctor(c), [h, t]) if c.plain() == names::CONS => {
                    items.push(h.clone());
                    term = t.clone();
                }
                | _ => return None,
            }
        }
    }

    fn binder<'a>(&self, binder: &Binder, scope: &im::Vector<String>) -> RcDoc<'a> {
        RcDoc::concat([
            RcDoc::text("("),
            RcDoc::text(binder.name.plain().to_string()),
            RcDoc::text(" : "),
            self.term(&binder.ty, scope, false),
            RcDoc::text(")"),
        ])
    }

    fn term<'a>(&self, term: &RcTerm, scope: &im::Vector<String>, atomic: bool) -> RcDoc<'a> {
        let paren = |doc: RcDoc<'a>| {
            if atomic { RcDoc::concat([RcDoc::text("("), doc, RcDoc::text(")")]) } else { doc }
        };
        if let Some(n) = Self::numeral(term) {
            return RcDoc::text(n.to_string());
        }
        if let Some(items) = Self::items(term) {
            let items = items.iter().map(|item| self.term(item, scope, false));
            return RcDoc::concat([
                RcDoc::text("["),
                RcDoc::intersperse(items, RcDoc::text(";").append(RcDoc::line())).group(),
                RcDoc::text("]"),
            ]);
        }
        match term.as_ref() {
            | Term::Sort(sort) => RcDoc::text(format!("{:?}", sort)),
            | Term::Bound(Bound(i)) => RcDoc::text(Self::bound(scope, *i)),
            | Term::Free(name) => RcDoc::text(name.plain().to_string()),
            | Term::Param(param) => RcDoc::text(format!("!{}", param.index())),
            | Term::Evar(evar) => RcDoc::text(format!("?{}", evar.index())),
            | Term::Const(name) => RcDoc::text(name.plain().to_string()),
            | Term::Ctor(name) => RcDoc::text(name.plain().to_string()),
            | Term::Lit(lit) => RcDoc::text(lit.to_string()),
            | Term::App(_) => {
                let (head, args) = Term::spine(term);
                let docs = std::iter::once(self.term(&head, scope, true))
                    .chain(args.iter().map(|arg| self.term(arg, scope, true)));
                paren(RcDoc::intersperse(docs, RcDoc::line()).nest(self.indent).group())
            }
            | Term::Lam(Abs(binder, body)) => {
                let inner = scope.clone() + im::vector![binder.name.plain().to_string()];
                paren(
                    RcDoc::concat([
                        RcDoc::text("fun "),
                        self.binder(binder, scope),
                        RcDoc::text(" =>"),
                        RcDoc::line().append(self.term(body, &inner, false)).nest(self.indent),
                    ])
                    .group(),
                )
            }
            | Term::Prod(Prod(binder, body)) => {
                let inner = scope.clone() + im::vector![binder.name.plain().to_string()];
                if !body.loose_bound().contains(&0) {
                    return paren(RcDoc::concat([
                        self.term(&binder.ty, scope, true),
                        RcDoc::text(" ->"),
                        RcDoc::line(),
                        self.term(body, &inner, false),
                    ]))
                    .group();
                }
                paren(
                    RcDoc::concat([
                        RcDoc::text("forall "),
                        self.binder(binder, scope),
                        RcDoc::text(","),
                        RcDoc::line().append(self.term(body, &inner, false)).nest(self.indent),
                    ])
                    .group(),
                )
            }
            | Term::Let(Let { binder, bindee, tail }) => {
                let inner = scope.clone() + im::vector![binder.name.plain().to_string()];
                paren(RcDoc::concat([
                    RcDoc::text("let "),
                    self.binder(binder, scope),
                    RcDoc::text(" := "),
                    self.term(bindee, scope, false),
                    RcDoc::text(" in"),
                    RcDoc::line(),
                    self.term(tail, &inner, false),
                ]))
            }
            | Term::Case(Match { scrut, arms }) => {
                let arms = arms.iter().map(|arm| {
                    let vars: Vec<_> =
                        (0..arm.arity).map(|k| format!("x{}", scope.len() + k)).collect();
                    let inner = scope.clone() + vars.iter().cloned().collect();
                    let pat: Vec<_> =
                        std::iter::once(arm.ctor.plain().to_string()).chain(vars).collect();
                    RcDoc::concat([
                        RcDoc::hardline(),
                        RcDoc::text("| "),
                        RcDoc::text(pat.join(" ")),
                        RcDoc::text(" => "),
                        self.term(&arm.body, &inner, false),
                    ])
                });
                paren(RcDoc::concat([
                    RcDoc::text("match "),
                    self.term(scrut, scope, false),
                    RcDoc::text(" with"),
                    RcDoc::concat(arms.collect::<Vec<_>>()),
                    RcDoc::hardline(),
                    RcDoc::text("end"),
                ]))
            }
        }
    }
}

impl<'a> Pretty<'a, Formatter> for Term {
    fn pretty(&self, f: &'a Formatter) -> RcDoc<'a> {
        f.term(&std::rc::Rc::new(self.clone()), &im::Vector::new(), false)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let f = Formatter::new();
        self.pretty(&f).render_fmt(f.width, out)
    }
}
