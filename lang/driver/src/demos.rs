use crate::session::Session;
use mtac_dynamics::{construct::*, syntax::*};
use mtac_term::{
    construct::{app, boolean, cnst, cons, free, list, lit, nat, nil, succ},
    prelude::names,
};

/// A named tactic together with the natural number it is instantiated with.
pub struct Demo {
    pub name: &'static str,
    pub about: &'static str,
    pub default_arg: usize,
    build: fn(&mut Session, usize) -> Computation,
}

impl Demo {
    /// The computation for `arg`, or for the default argument.
    pub fn computation(&self, session: &mut Session, arg: Option<usize>) -> Computation {
        (self.build)(session, arg.unwrap_or(self.default_arg))
    }
}

pub const DEMOS: &[Demo] = &[
    Demo {
        name: "collatz",
        about: "the Collatz sequence starting from the argument",
        default_arg: 6,
        build: |_, n| collatz().call([nat(n)]),
    },
    Demo {
        name: "exceptions",
        about: "raise E1 (0), E2 \"x\" (1) or E2 \"y\" (otherwise) under three handlers",
        default_arg: 0,
        build: exceptions,
    },
    Demo {
        name: "append",
        about: "match `append [1] [2]`, where the unreduced clause comes first",
        default_arg: 0,
        build: |_, _| append(),
    },
    Demo {
        name: "abs",
        about: "abstract a fresh parameter x out of `plus n x`",
        default_arg: 2,
        build: |_, n| abs(n),
    },
    Demo {
        name: "witness",
        about: "search for a k with k + k equal to the argument, left open when it is odd",
        default_arg: 5,
        build: |_, n| witness(n),
    },
];

pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.name == name)
}

fn tnat() -> RcTerm {
    cnst(names::NAT)
}

/// `collatz n` returns the list of numbers visited from `n` down to 1, and
/// the empty list for 0.
pub fn collatz() -> Fixpoint {
    fix(1, |f, args| {
        let f = f.clone();
        mmatch(args[0].clone(), [
            clause(&[], nat(0), |_| ret(nil())),
            clause(&[], nat(1), |_| ret(list([nat(1)]))),
            clause(&["n"], free("n"), move |s| {
                let n = s["n"].clone();
                let f = f.clone();
                bind(collatz_step(n.clone()), move |next| {
                    let n = n.clone();
                    bind(f.call([next]), move |rest| ret(cons(n.clone(), rest)))
                })
            }),
        ])
    })
}

fn collatz_step(n: RcTerm) -> Computation {
    let parity = app(cnst(names::EVEN), [n.clone()]);
    let half = app(cnst(names::DIV2), [n.clone()]);
    let triple = succ(app(cnst(names::MULT), [nat(3), n]));
    mmatch(parity, [
        clause(&[], boolean(true), move |_| ret_with(half.clone(), Policy::Simplify)),
        clause(&[], boolean(false), move |_| ret_with(triple.clone(), Policy::Simplify)),
    ])
}

pub fn exceptions(session: &mut Session, which: usize) -> Computation {
    let e1 = session.declare_exn("E1", None);
    let e2 = session.declare_exn("E2", Some(cnst(names::STRING)));
    let exn = match which {
        | 0 => e1.value(),
        | 1 => e2.apply(lit("x")),
        | _ => e2.apply(lit("y")),
    };
    try_with(raise(exn), [
        catch(&e1, &[], None, |_| ret(lit("a"))),
        catch(&e2, &[], Some(lit("x")), |_| ret(lit("b"))),
        catch_any(|_| ret(lit("c"))),
    ])
}

pub fn append() -> Computation {
    let scrut = app(cnst(names::APPEND), [list([nat(1)]), list([nat(2)])]);
    mmatch(scrut, [
        clause(&["l", "r"], app(cnst(names::APPEND), [free("l"), free("r")]), |s| {
            ret(s["l"].clone())
        }),
        clause(&["h", "t"], cons(free("h"), free("t")), |s| ret(s["h"].clone())),
    ])
}

pub fn abs(n: usize) -> Computation {
    nu("x", tnat(), move |x| {
        let body = app(cnst(names::PLUS), [nat(n), x.clone()]);
        bind(abs_fun(x, body), |f| ret_with(f, Policy::Simplify))
    })
}

/// Search `n, n - 1, .., 0` for a witness `k` of `k + k = n`. The evar is
/// instantiated only by the clause that checks the equation, so it is left open
/// when `n` is odd.
pub fn witness(n: usize) -> Computation {
    bind(evar_alloc(tnat()), move |x| halve(x, n).call([nat(n)]))
}

fn halve(x: RcTerm, n: usize) -> Fixpoint {
    fix(1, move |f, args| {
        let k = args[0].clone();
        let doubled = app(cnst(names::PLUS), [k.clone(), k.clone()]);
        let found = x.clone();
        let (f, x) = (f.clone(), x.clone());
        mmatch(list([doubled, x.clone()]), [
            clause(&[], list([nat(n), k.clone()]), move |_| ret(found.clone())),
            clause(&["other"], free("other"), move |_| {
                let (f, x) = (f.clone(), x.clone());
                mmatch(k.clone(), [
                    clause(&[], nat(0), move |_| ret(x.clone())),
                    clause(&["m"], succ(free("m")), move |s| f.call([s["m"].clone()])),
                ])
            }),
        ])
    })
}
