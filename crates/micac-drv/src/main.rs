use clap::Parser;
use micac_drv::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Usage errors exit 1; --help and --version exit 0.
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        std::process::exit(code);
    });

    if let Err(err) = micac_drv::run(cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
