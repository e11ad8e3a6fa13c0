mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fullscreenizer",
    version,
    about = "Toggle tracked windows between normal and borderless fullscreen layouts"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Run the daemon in the foreground (Ctrl+C to stop)
    Run,
    /// List all visible windows and whether they are tracked
    List,
    /// Manage the tracked window classes
    Class {
        #[command(subcommand)]
        command: ClassCommands,
    },
}

#[derive(Subcommand)]
enum ClassCommands {
    /// Add a window class to the tracked set
    Add {
        /// The window class name (see `fullscreenizer list`)
        class: String,
    },
    /// Remove a window class from the tracked set
    Remove {
        /// The window class name
        class: String,
    },
    /// Show the tracked window classes
    List,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Run => commands::run::execute(),
        Commands::List => commands::list::execute(),
        Commands::Class { command } => match command {
            ClassCommands::Add { class } => commands::class::add(&class),
            ClassCommands::Remove { class } => commands::class::remove(&class),
            ClassCommands::List => commands::class::list(),
        },
    }
}
