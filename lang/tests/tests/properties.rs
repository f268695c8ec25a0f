use mtac_dynamics::{Failure, construct::*, syntax::*};
use mtac_term::{
    construct::{app, cnst, cons, free, lam, list, nat, nil, succ},
    prelude::names,
};
use mtac_tests::{assert_fails, assert_runs, utils::session};

fn tnat() -> RcTerm {
    cnst(names::NAT)
}

#[test]
fn exceptions_are_nominal() {
    let mut s = session();
    let a = s.declare_exn("E", Some(tnat()));
    let b = s.declare_exn("E", Some(tnat()));
    let handler = || catch(&b, &["n"], Some(free("n")), |s| ret(s["n"].clone()));
    assert_fails!(s, try_with(raise(a.apply(nat(0))), [handler()]), Failure::Uncaught(_));
    assert_runs!(s, try_with(raise(b.apply(nat(0))), [handler()]) => nat(0));
}

#[test]
fn parameters_stay_in_scope() {
    let mut s = session();
    assert_fails!(s, nu("x", tnat(), |x| ret(cons(x, nil()))), Failure::ScopeEscape(_));
    let e = s.declare_exn("Found", Some(tnat()));
    let c = try_with(nu("x", tnat(), move |x| raise(e.apply(x))), [catch_any(|_| ret(nat(0)))]);
    assert_fails!(s, c, Failure::ScopeEscape(_));
}

#[test]
fn abs_inverts_nu() {
    let s = session();
    let c = nu("x", tnat(), |x| abs_fun(x.clone(), cons(x, nil())));
    assert_runs!(s, c => lam("y", tnat(), |y| cons(y, nil())));
    // nested parameters are abstracted in order
    let c = nu("x", tnat(), |x| {
        nu("y", tnat(), move |y| {
            let x = x.clone();
            bind(abs_fun(y.clone(), app(cnst(names::PLUS), [x.clone(), y])), move |f| {
                abs_fun(x.clone(), f)
            })
        })
    });
    let expected =
        lam("a", tnat(), |a| lam("b", tnat(), |b| app(cnst(names::PLUS), [a, b])));
    assert_runs!(s, c => expected);
}

#[test]
fn matching_is_deterministic() {
    let s = session();
    let scrut = app(cnst(names::APPEND), [list([nat(1), nat(2)]), nil()]);
    let c = || {
        mmatch(scrut.clone(), [
            clause(&["h", "t"], cons(free("h"), free("t")), |s| ret(s["t"].clone())),
            clause(&["l"], free("l"), |s| ret(s["l"].clone())),
        ])
    };
    for _ in 0..5 {
        assert_runs!(s, c() => app(cnst(names::APPEND), [list([nat(2)]), nil()]));
    }
}

fn countdown() -> Fixpoint {
    fix(1, |f, args| {
        let f = f.clone();
        mmatch(args[0].clone(), [
            clause(&[], nat(0), |_| ret(nat(0))),
            clause(&["n"], succ(free("n")), move |s| f.call([s["n"].clone()])),
        ])
    })
}

#[test]
fn fixpoints_do_not_interfere() {
    let mut s = session();
    // two fixpoints in flight at once
    let c = bind(countdown().call([nat(3)]), |a| {
        bind(countdown().call([nat(4)]), move |b| ret(cons(a.clone(), cons(b, nil()))))
    });
    assert_runs!(s, c => list([nat(0), nat(0)]));
    // an exception raised deep inside a recursion unwinds all of it
    let stop = s.declare_exn("Stop", Some(tnat()));
    let deep = {
        let stop = stop.clone();
        fix(1, move |f, args| {
            let (f, stop) = (f.clone(), stop.clone());
            mmatch(args[0].clone(), [
                clause(&[], nat(0), move |_| raise(stop.apply(nat(42)))),
                clause(&["n"], succ(free("n")), move |s| {
                    bind(f.call([s["n"].clone()]), |r| ret(succ(r)))
                }),
            ])
        })
    };
    let handler = catch(&stop, &["v"], Some(free("v")), |s| ret(s["v"].clone()));
    assert_runs!(s, try_with(deep.call([nat(5)]), [handler]) => nat(42));
}

#[test]
fn evars_flow_through_matching() {
    let s = session();
    let c = bind(evar_alloc(tnat()), |e| {
        let e_ = e.clone();
        let scrut = cons(e, nil());
        bind(mmatch(scrut, [clause(&[], list([nat(7)]), |_| ret(nat(0)))]), move |_| {
            ret(e_.clone())
        })
    });
    assert_runs!(s, c => nat(7));
    let c = bind(evar_alloc(tnat()), |e| {
        bind(instantiate(e.clone(), nat(1)), move |_| instantiate(e.clone(), nat(2)))
    });
    assert_fails!(s, c, Failure::AlreadyInstantiated(_));
}

#[test]
fn abs_requires_parameters() {
    let s = session();
    assert_fails!(s, abs_fun(nat(0), nat(0)), Failure::NotAParameter(_));
}

#[test]
fn exhausted_matches_fail() {
    let s = session();
    let c = mmatch(nil(), [clause(&["h", "t"], cons(free("h"), free("t")), |_| ret(nat(0)))]);
    assert_fails!(s, c, Failure::NoMatchingPattern(_));
}
