use mtac_driver::demos;
use mtac_dynamics::{Failure, construct::*};
use mtac_term::{
    construct::{app, cnst, cons, free, list, lit, nat, nil},
    prelude::names,
};
use mtac_tests::{assert_fails, assert_runs, utils::session};

#[test]
fn handlers_in_order() {
    let mut s = session();
    let e1 = s.declare_exn("E1", None);
    let e2 = s.declare_exn("E2", Some(cnst(names::STRING)));
    let handlers = || {
        [
            catch(&e1, &[], None, |_| ret(lit("a"))),
            catch(&e2, &[], Some(lit("x")), |_| ret(lit("b"))),
            catch_any(|_| ret(lit("c"))),
        ]
    };
    assert_runs!(s, try_with(raise(e1.value()), handlers()) => lit("a"));
    assert_runs!(s, try_with(raise(e2.apply(lit("x"))), handlers()) => lit("b"));
    assert_runs!(s, try_with(raise(e2.apply(lit("y"))), handlers()) => lit("c"));
}

#[test]
fn unreduced_clause_first() {
    let s = session();
    let scrut = app(cnst(names::APPEND), [list([nat(1)]), list([nat(2)])]);
    let c = mmatch(scrut, [
        clause(&["l", "r"], app(cnst(names::APPEND), [free("l"), free("r")]), |s| {
            ret(s["l"].clone())
        }),
        clause(&["h", "t"], cons(free("h"), free("t")), |s| ret(s["h"].clone())),
    ]);
    assert_runs!(s, c => list([nat(1)]));
}

#[test]
fn collatz() {
    let s = session();
    let seq = list([6, 3, 10, 5, 16, 8, 4, 2, 1].map(nat));
    assert_runs!(s, demos::collatz().call([nat(6)]) => seq);
    assert_runs!(s, demos::collatz().call([nat(0)]) => nil());
}

#[test]
fn witness_left_open() {
    let s = session();
    assert_fails!(s, demos::witness(3), Failure::UninstantiatedRequiredEvar(_));
    assert_fails!(s, demos::witness(1), Failure::UninstantiatedRequiredEvar(_));
}

#[test]
fn witness_found_by_matching() {
    let s = session();
    assert_runs!(s, demos::witness(4) => nat(2));
    assert_runs!(s, demos::witness(10) => nat(5));
}
