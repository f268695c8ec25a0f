mod cli;
pub use cli::*;

use colored::Colorize;
use mtac_driver::{Conf, DEMOS, Session, SessionError};
use mtac_term::{fmt::Formatter, fmt::Pretty, syntax::RcTerm};

pub fn conf(path: Option<&std::path::Path>) -> Conf {
    match path {
        | Some(path) => Conf::load_from(path),
        | None => Conf::load(),
    }
}

pub fn run(conf: Conf, demo: &str, arg: Option<usize>) -> Result<RcTerm, SessionError> {
    let mut session = Session::new(conf)?;
    session.run_demo(demo, arg)
}

pub fn render(term: &RcTerm) -> String {
    let f = Formatter::new();
    term.pretty(&f).pretty(f.width).to_string()
}

pub fn list() {
    for demo in DEMOS {
        println!("{:<12} {} (default {})", demo.name.bold(), demo.about, demo.default_arg);
    }
}
