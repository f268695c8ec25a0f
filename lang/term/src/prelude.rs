//! Naturals, booleans, lists and strings, with a few recursive functions on them.
//!
//! Constructors carry no type parameters; `cons` takes any element.

use crate::{construct::*, err::SignatureError, signature::Signature, syntax::*};

pub mod names {
    pub const NAT: &str = "nat";
    pub const BOOL: &str = "bool";
    pub const LIST: &str = "list";
    /// the type of string literals
    pub const STRING: &str = "string";

    pub const O: &str = "O";
    pub const S: &str = "S";
    pub const TRUE: &str = "true";
    pub const FALSE: &str = "false";
    pub const NIL: &str = "nil";
    pub const CONS: &str = "cons";

    pub const PLUS: &str = "plus";
    pub const MULT: &str = "mult";
    pub const EVEN: &str = "even";
    pub const DIV2: &str = "div2";
    pub const APPEND: &str = "append";
}

/// Add the prelude to `sig`.
pub fn load(sig: &mut Signature) -> Result<(), SignatureError> {
    let set = || sort(Sort::Set);
    let tnat = || cnst(names::NAT);
    let tbool = || cnst(names::BOOL);
    let tlist = || cnst(names::LIST);

    sig.axiom(names::NAT, set())?;
    sig.axiom(names::BOOL, set())?;
    sig.axiom(names::LIST, set())?;
    sig.axiom(names::STRING, set())?;

    sig.ctor(names::O, tnat())?;
    sig.ctor(names::S, arrow(tnat(), tnat()))?;
    sig.ctor(names::TRUE, tbool())?;
    sig.ctor(names::FALSE, tbool())?;
    sig.ctor(names::NIL, tlist())?;
    sig.ctor(
        names::CONS,
        prod("A", sort(Sort::Type), |a| arrow(a, arrow(tlist(), tlist()))),
    )?;

    let tnat2 = || arrow(tnat(), arrow(tnat(), tnat()));

    // plus n m
    sig.define_rec(
        names::PLUS,
        tnat2(),
        0,
        lam("n", tnat(), |n| {
            lam("m", tnat(), |m| {
                case(
                    n,
                    [
                        arm(names::O, &[], |_| m.clone()),
                        arm(names::S, &["p"], |p| {
                            succ(app(cnst(names::PLUS), [p[0].clone(), m.clone()]))
                        }),
                    ],
                )
            })
        }),
    )?;

    // mult n m
    sig.define_rec(
        names::MULT,
        tnat2(),
        0,
        lam("n", tnat(), |n| {
            lam("m", tnat(), |m| {
                case(
                    n,
                    [
                        arm(names::O, &[], |_| nat(0)),
                        arm(names::S, &["p"], |p| {
                            let rec = app(cnst(names::MULT), [p[0].clone(), m.clone()]);
                            app(cnst(names::PLUS), [m.clone(), rec])
                        }),
                    ],
                )
            })
        }),
    )?;

    // even n
    sig.define_rec(
        names::EVEN,
        arrow(tnat(), tbool()),
        0,
        lam("n", tnat(), |n| {
            case(
                n,
                [
                    arm(names::O, &[], |_| boolean(true)),
                    arm(names::S, &["p"], |p| {
                        case(
                            p[0].clone(),
                            [
                                arm(names::O, &[], |_| boolean(false)),
                                arm(names::S, &["q"], |q| app(cnst(names::EVEN), [q[0].clone()])),
                            ],
                        )
                    }),
                ],
            )
        }),
    )?;

    // div2 n
    sig.define_rec(
        names::DIV2,
        arrow(tnat(), tnat()),
        0,
        lam("n", tnat(), |n| {
            case(
                n,
                [
                    arm(names::O, &[], |_| nat(0)),
                    arm(names::S, &["p"], |p| {
                        case(
                            p[0].clone(),
                            [
                                arm(names::O, &[], |_| nat(0)),
                                arm(names::S, &["q"], |q| {
                                    succ(app(cnst(names::DIV2), [q[0].clone()]))
                                }),
                            ],
                        )
                    }),
                ],
            )
        }),
    )?;

    // append l r
    sig.define_rec(
        names::APPEND,
        arrow(tlist(), arrow(tlist(), tlist())),
        0,
        lam("l", tlist(), |l| {
            lam("r", tlist(), |r| {
                case(
                    l,
                    [
                        arm(names::NIL, &[], |_| r.clone()),
                        arm(names::CONS, &["h", "t"], |ht| {
                            let rec = app(cnst(names::APPEND), [ht[1].clone(), r.clone()]);
                            cons(ht[0].clone(), rec)
                        }),
                    ],
                )
            })
        }),
    )?;

    Ok(())
}

/// A signature holding just the prelude.
pub fn signature() -> Result<Signature, SignatureError> {
    let mut sig = Signature::new();
    load(&mut sig)?;
    Ok(sig)
}
