use clap::Parser;
use colored::Colorize;
use mtac_cli::{Cli, Commands};

fn main() -> Result<(), String> {
    let cli = Cli::parse();
    let verbose = matches!(cli.command, Commands::Run { verbose: true, .. });
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "trace" } else { "info" }),
    )
    .init();

    let conf = mtac_cli::conf(cli.conf.as_deref());
    match cli.command {
        | Commands::Run { demo, arg, verbose } => {
            let conf = mtac_driver::Conf { trace_steps: conf.trace_steps || verbose, ..conf };
            match mtac_cli::run(conf, &demo, arg) {
                | Ok(term) => {
                    println!("{} {}", "ok".green(), mtac_cli::render(&term));
                }
                | Err(err) => {
                    eprintln!("{} {}", "failed".red(), err);
                    Err(format!("`{}` did not produce a value", demo))?
                }
            }
        }
        | Commands::List {} => mtac_cli::list(),
        | Commands::Conf {} => print!("{}", conf.to_toml().map_err(|e| e.to_string())?),
    }
    Ok(())
}
