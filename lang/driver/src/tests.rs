use crate::*;
use mtac_dynamics::{Failure, construct::*};
use mtac_term::{
    KernelError, Signature, SignatureError,
    construct::{cnst, ctor, free, lam, list, lit, nat, succ},
    prelude::names,
};
use pretty_assertions::assert_eq;

fn session() -> Session {
    Session::new(Conf::default()).unwrap()
}

#[test]
fn collatz_from_six() {
    let seq = session().run_demo("collatz", None).unwrap();
    let expected = list([6, 3, 10, 5, 16, 8, 4, 2, 1].map(nat));
    assert_eq!(seq, expected);
    assert_eq!(session().run_demo("collatz", Some(1)).unwrap(), list([nat(1)]));
}

#[test]
fn exceptions_pick_handlers() {
    let mut s = session();
    for (which, expected) in [(0, "a"), (1, "b"), (2, "c")] {
        assert_eq!(s.run_demo("exceptions", Some(which)).unwrap(), lit(expected));
    }
}

#[test]
fn append_selects_the_unreduced_clause() {
    assert_eq!(session().run_demo("append", None).unwrap(), list([nat(1)]));
}

#[test]
fn abs_builds_a_closed_function() {
    let f = session().run_demo("abs", Some(2)).unwrap();
    assert_eq!(f, lam("y", cnst(names::NAT), |y| succ(succ(y))));
}

#[test]
fn witness_must_be_found() {
    let err = session().run_demo("witness", None).unwrap_err();
    assert!(matches!(err, SessionError::Failure(Failure::UninstantiatedRequiredEvar(_))));
    let err = session().run_demo("witness", Some(7)).unwrap_err();
    assert!(matches!(err, SessionError::Failure(Failure::UninstantiatedRequiredEvar(_))));
    assert_eq!(session().run_demo("witness", Some(6)).unwrap(), nat(3));
    assert_eq!(session().run_demo("witness", Some(0)).unwrap(), nat(0));
}

#[test]
fn unknown_demo() {
    assert!(matches!(session().run_demo("nope", None), Err(SessionError::UnknownDemo(_))));
}

#[test]
fn kernel_rechecks_results() {
    let s = session();
    let err = s.run(ret(free("ambient"))).unwrap_err();
    assert!(matches!(err, SessionError::KernelError(KernelError::FreeName(_))));
    let err = s.run(ret(cnst("undeclared"))).unwrap_err();
    assert!(matches!(err, SessionError::KernelError(KernelError::UnknownConst(_))));
    // the expected type is checked as well
    let err = s.run_as(ret(nat(0)), &cnst("undeclared")).unwrap_err();
    assert!(matches!(err, SessionError::KernelError(KernelError::UnknownConst(_))));
    assert_eq!(s.run_as(ret(nat(0)), &cnst(names::NAT)).unwrap(), nat(0));
}

#[test]
fn verification_can_be_turned_off() {
    let s = Session::new(Conf { verify: false, ..Conf::default() }).unwrap();
    assert_eq!(s.run(ret(free("ambient"))).unwrap(), free("ambient"));
}

#[test]
fn sessions_without_prelude() {
    let mut s = Session::new(Conf { prelude: false, ..Conf::default() }).unwrap();
    assert!(s.signature().get_const(&names::NAT.into()).is_none());
    assert!(matches!(s.run(ret(nat(0))), Err(SessionError::KernelError(_))));
    s.define(|sig| sig.axiom("unit", cnst("unit"))).unwrap();
    assert_eq!(s.run(ret(cnst("unit"))).unwrap(), cnst("unit"));
    let dup = s.define(|sig| sig.axiom("unit", cnst("unit")));
    assert!(matches!(dup, Err(SessionError::SignatureError(_))));
}

#[test]
fn sessions_over_a_fresh_signature() {
    let mut sig = Signature::new();
    sig.axiom("color", cnst("color")).unwrap();
    sig.axiom("mix", cnst("color")).unwrap();
    sig.ctor("red", cnst("color")).unwrap();
    sig.ctor("green", cnst("color")).unwrap();
    assert!(matches!(sig.ctor("red", cnst("color")), Err(SignatureError::DuplicateCtor(_))));
    assert!(matches!(sig.axiom("mix", cnst("color")), Err(SignatureError::DuplicateConst(_))));
    let s = Session::with_signature(Conf::default(), sig);
    let c = mmatch(ctor("green"), [
        clause(&[], ctor("red"), |_| ret(cnst("mix"))),
        clause(&[], ctor("green"), |_| ret(ctor("red"))),
    ]);
    assert_eq!(s.run(c).unwrap(), ctor("red"));
}

#[test]
fn conf_roundtrips_through_disk() {
    let dir = std::env::temp_dir().join(format!("mtac-conf-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("mtac.toml");
    let _ = std::fs::remove_file(&path);
    // a missing file yields and writes the defaults
    let conf = Conf::load_from(&path);
    assert!(conf.prelude && conf.verify && !conf.trace_steps);
    assert!(path.exists());
    std::fs::write(&path, "trace_steps = true\n").unwrap();
    let conf = Conf::load_from(&path);
    assert!(conf.prelude && conf.trace_steps);
    let _ = std::fs::remove_dir_all(&dir);
}
