use clap::Parser;
use passkeeper::cli::commands::add::AddArgs;
use passkeeper::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::New => passkeeper::cli::commands::new::execute(&cli),
        Commands::List { ref search } => {
            passkeeper::cli::commands::list::execute(&cli, search.as_deref())
        }
        Commands::Show { index } => passkeeper::cli::commands::show::execute(&cli, index),
        Commands::Add {
            ref service,
            ref login,
            ref password,
            ref generate,
            ref comment,
        } => {
            let args = AddArgs {
                service,
                login,
                password: password.as_deref(),
                generate: generate.as_deref(),
                comment,
            };
            passkeeper::cli::commands::add::execute(&cli, &args)
        }
        Commands::Remove { index, force } => {
            passkeeper::cli::commands::remove::execute(&cli, index, force)
        }
        Commands::Chpass => passkeeper::cli::commands::chpass::execute(&cli),
        Commands::Generate {
            count,
            ref kind,
            ref length,
        } => passkeeper::cli::commands::generate::execute(count, kind, length.as_deref()),
    };

    if let Err(e) = result {
        passkeeper::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr: warnings by default, library debug events with `--verbose`.
///
/// The filter is fixed here and never read from the environment.
fn init_logging(verbose: bool) {
    let directives = if verbose { "warn,passkeeper=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
