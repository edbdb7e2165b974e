mod cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("ENKELGIT_LOG", "warn")).init();
    if let Err(err) = cli::run(std::env::args_os()) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
