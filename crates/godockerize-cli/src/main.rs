mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "godockerize", about = "Build Docker images from Go packages")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a Docker image from Go packages
    #[command(
        long_about = "Build compiles and installs the packages by the import paths to /usr/local/bin\n\
                      in the docker image. The first package is used as the entrypoint."
    )]
    Build {
        /// Go packages to build; the first one is the entrypoint
        #[arg(value_name = "PACKAGES")]
        packages: Vec<String>,
        /// Output Docker image name and optionally a tag in the 'name:tag' format
        #[arg(long, short = 't')]
        tag: Option<String>,
        /// Base Docker image name [default: alpine:3.6]
        #[arg(long)]
        base: Option<String>,
        /// Additional environment variables for the Dockerfile (KEY=VALUE, repeatable)
        #[arg(long, value_name = "KEY=VALUE")]
        env: Vec<String>,
        /// Only print the generated Dockerfile
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            packages,
            tag,
            base,
            env,
            dry_run,
        } => {
            commands::build(commands::BuildFlags {
                packages,
                tag,
                base,
                env,
                dry_run,
            })
            .await?
        }
    }

    Ok(())
}
