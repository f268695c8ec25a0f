use mtac_driver::{Conf, DEMOS};

fn run(demo: &str, arg: Option<usize>) -> String {
    match mtac_cli::run(Conf::default(), demo, arg) {
        | Ok(term) => mtac_cli::render(&term),
        | Err(err) => format!("error: {}", err),
    }
}

#[test]
fn renders_results() {
    assert_eq!(run("collatz", None), "[6; 3; 10; 5; 16; 8; 4; 2; 1]");
    assert_eq!(run("exceptions", Some(1)), "\"b\"");
    assert_eq!(run("append", None), "[1]");
}

#[test]
fn reports_failures() {
    assert!(run("witness", None).starts_with("error: "));
    assert!(run("no-such-demo", None).starts_with("error: "));
}

#[test]
fn every_demo_runs_with_its_default() {
    for demo in DEMOS.iter().filter(|demo| demo.name != "witness") {
        assert!(!run(demo.name, None).starts_with("error: "), "{} failed", demo.name);
    }
}
