pub mod utils {
    use mtac_driver::{Conf, Result, Session};
    use mtac_dynamics::syntax::{Computation, RcTerm};

    pub fn session() -> Session {
        match Session::new(Conf::default()) {
            | Ok(session) => session,
            | Err(err) => {
                eprintln!("{}", err);
                panic!("Error creating session");
            }
        }
    }

    pub fn run(session: &Session, compu: Computation) -> Result<RcTerm> {
        session.run(compu)
    }
}

/// Run a computation in a session and compare its result.
#[macro_export]
macro_rules! assert_runs {
    ($session:expr, $compu:expr => $expected:expr) => {
        match $crate::utils::run(&$session, $compu) {
            | Ok(term) => ::pretty_assertions::assert_eq!(term, $expected),
            | Err(err) => panic!("run failed: {}", err),
        }
    };
}

/// Run a computation in a session and expect the given failure.
#[macro_export]
macro_rules! assert_fails {
    ($session:expr, $compu:expr, $failure:pat) => {
        match $crate::utils::run(&$session, $compu) {
            | Err(::mtac_driver::SessionError::Failure($failure)) => {}
            | Err(err) => panic!("unexpected error: {}", err),
            | Ok(term) => panic!("expected a failure, got {}", term),
        }
    };
}
