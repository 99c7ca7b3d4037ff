use clap::Parser;

mod cli;
pub mod exit_codes;
pub mod outputs;

use cli::args::Cli;
use cli::commands::dispatch;
use mncache_core::CacheError;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();
    let cli = Cli::parse();
    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            if e.downcast_ref::<CacheError>().is_some() {
                exit_codes::CONFIG_ERROR
            } else {
                exit_codes::FAILURE
            }
        }
    };
    std::process::exit(code);
}
