use clap::Parser;
use svck::cli::{handle_completions, handle_curl, handle_run, handle_version, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = svck::logging::init_tracing(&cli.global.logging_config()) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let result = match &cli.command {
        Commands::Run(args) => handle_run(&cli.global, args).await.map(|output| {
            print!("{}", output);
        }),
        Commands::Curl(args) => handle_curl(&cli.global, args).map(|output| {
            print!("{}", output);
        }),
        Commands::Version => {
            println!("{}", handle_version());
            Ok(())
        }
        Commands::Completions(args) => {
            handle_completions(args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
