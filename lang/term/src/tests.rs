use crate::{construct::*, prelude::names, syntax::*, *};
use pretty_assertions::assert_eq;
use std::rc::Rc;

fn reducer() -> Reducer {
    Reducer::new(Rc::new(prelude::signature().expect("prelude loads")))
}

fn plus(a: RcTerm, b: RcTerm) -> RcTerm {
    app(cnst(names::PLUS), [a, b])
}

#[test]
fn beta_and_zeta() {
    let r = reducer();
    let id = lam("x", cnst(names::NAT), |x| x);
    assert_eq!(r.whnf(&app(id, [nat(3)])), nat(3));
    let shared = let_in("y", cnst(names::NAT), nat(2), |y| succ(y));
    assert_eq!(r.whnf(&shared), nat(3));
}

#[test]
fn arithmetic_normalizes() {
    let r = reducer();
    assert_eq!(r.normalize(&plus(nat(2), nat(3))), nat(5));
    assert_eq!(r.normalize(&app(cnst(names::MULT), [nat(3), nat(4)])), nat(12));
    assert_eq!(r.normalize(&app(cnst(names::EVEN), [nat(6)])), boolean(true));
    assert_eq!(r.normalize(&app(cnst(names::EVEN), [nat(5)])), boolean(false));
    assert_eq!(r.normalize(&app(cnst(names::DIV2), [nat(7)])), nat(3));
}

#[test]
fn append_on_lists() {
    let r = reducer();
    let l = list([nat(1), nat(2)]);
    let m = list([nat(3)]);
    let appended = app(cnst(names::APPEND), [l, m]);
    assert_eq!(r.normalize(&appended), list([nat(1), nat(2), nat(3)]));
}

#[test]
fn whnf_stops_at_head() {
    let r = reducer();
    let t = r.whnf(&plus(nat(1), nat(1)));
    // `S (plus 0 1)`: the head is a constructor, the argument is left alone
    assert_eq!(t, succ(plus(nat(0), nat(1))));
}

#[test]
fn stuck_recursion_terminates() {
    let r = reducer();
    let stuck = app(cnst(names::APPEND), [free("l"), nil()]);
    assert_eq!(r.normalize(&stuck), stuck);
    assert_eq!(r.whnf(&plus(free("n"), nat(0))), plus(free("n"), nat(0)));
}

#[test]
fn stepping_reaches_normal_form() {
    let r = reducer();
    let mut t = plus(nat(1), nat(1));
    let mut steps = 0;
    while let Some(next) = r.step(&t) {
        t = next;
        steps += 1;
    }
    assert_eq!(t, nat(2));
    assert!(steps > 1);
    assert_eq!(r.step(&nat(2)), None);
}

#[test]
fn equivalence_is_up_to_reduction() {
    let r = reducer();
    assert!(r.equivalent(&plus(nat(2), nat(2)), &nat(4)));
    assert!(!r.equivalent(&nat(3), &nat(4)));
}

#[test]
fn binder_names_do_not_matter() {
    let a = lam("x", cnst(names::NAT), |x| x);
    let b = lam("y", cnst(names::NAT), |y| y);
    assert_eq!(a, b);
}

#[test]
fn substitution_under_binders() {
    let body = lam("x", cnst(names::NAT), |x| app(free("f"), [x]));
    let env = [(VarName::from("f"), ctor(names::S))].into_iter().collect();
    let substituted = body.subst_free(&env);
    assert_eq!(substituted, lam("x", cnst(names::NAT), |x| succ(x)));
    assert!(substituted.free_names().is_empty());
}

#[test]
fn abstraction_inverts_instantiation() {
    let t = cons(free("h"), free("t"));
    let abstracted = t.abstract_free(&[VarName::from("h"), VarName::from("t")]);
    assert_eq!(abstracted.loose_bound().len(), 2);
    let back = abstracted.instantiate(&free("t")).instantiate(&free("h"));
    assert_eq!(back, t);
}

#[test]
fn kernel_rejects_open_terms() {
    let sig = prelude::signature().expect("prelude loads");
    let k = ScopeKernel::new(&sig);
    let succ_fn = lam("x", cnst(names::NAT), |x| succ(x));
    let succ_ty = arrow(cnst(names::NAT), cnst(names::NAT));
    assert_eq!(k.check(&succ_fn, Some(&succ_ty)), Ok(()));
    assert_eq!(k.check(&free("x"), None), Err(KernelError::FreeName(VarName::from("x"))));
    assert_eq!(
        k.check(&cnst("nope"), None),
        Err(KernelError::UnknownConst(ConstName::from("nope")))
    );
    let loose: RcTerm = Rc::new(Bound(0).into());
    assert_eq!(k.check(&nat(0), Some(&loose)), Err(KernelError::LooseBound(0)));
}

#[test]
fn signature_rejects_duplicates() {
    let mut sig = prelude::signature().expect("prelude loads");
    assert_eq!(
        sig.axiom(names::NAT, sort(Sort::Set)),
        Err(SignatureError::DuplicateConst(ConstName::from(names::NAT)))
    );
    assert_eq!(
        sig.define_rec("bad", cnst(names::NAT), 1, lam("x", cnst(names::NAT), |x| x)),
        Err(SignatureError::GuardOutOfRange { name: ConstName::from("bad"), guard: 1 })
    );
}
