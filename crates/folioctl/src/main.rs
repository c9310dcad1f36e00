use clap::{Parser, Subcommand};
use folioctl::control;
use folioctl::git::Repo;
use folioctl::manifest::Manifest;
use folioctl::version::{self, SiteVersion};
use folioctl::watch::{self, CommitSettings, WatchSettings};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "folioctl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Regenerate the content manifest from the content directory
    Generate {
        #[arg(short = 'c', long, default_value = "public/content")]
        content: PathBuf,

        #[arg(short = 'o', long, default_value = "public/content.json")]
        out: PathBuf,
    },
    /// Stamp the commit-derived version into the site config
    Version {
        #[arg(short = 'c', long, default_value = "public/config.json")]
        config: PathBuf,

        /// Repository to count commits in
        #[arg(short = 'r', long, default_value = ".")]
        repo: PathBuf,

        /// Print the version without writing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Watch the content directory and regenerate the manifest on change
    Watch {
        #[arg(short = 'c', long, default_value = "public/content")]
        content: PathBuf,

        #[arg(short = 'o', long, default_value = "public/content.json")]
        out: PathBuf,

        /// Quiet period before regenerating
        #[arg(short = 'd', long, default_value_t = 2000)]
        debounce_ms: u64,

        /// Commit regenerated content
        #[arg(long)]
        commit: bool,

        /// Push after committing (implies --commit)
        #[arg(long)]
        push: bool,

        #[arg(short = 'r', long, default_value = ".")]
        repo: PathBuf,
    },
    /// Send a control command to the running folio daemon (e.g. `wheel 120`)
    Send {
        #[arg(short = 's', long, default_value = control::SOCKET_PATH)]
        socket: PathBuf,

        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { content, out } => generate(content, out),
        Commands::Version {
            config,
            repo,
            dry_run,
        } => stamp_version(config, repo, dry_run),
        Commands::Watch {
            content,
            out,
            debounce_ms,
            commit,
            push,
            repo,
        } => {
            let settings = WatchSettings {
                content_dir: content,
                manifest: out,
                debounce: Duration::from_millis(debounce_ms),
                commit: (commit || push).then(|| CommitSettings {
                    repo: Repo::new(repo),
                    push,
                }),
            };
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(watch::run(settings))?;
            Ok(())
        }
        Commands::Send { socket, words } => {
            if let Some(reply) = control::send(&socket, &words.join(" "))? {
                println!("{}", reply);
            }
            Ok(())
        }
    }
}

fn generate(content: PathBuf, out: PathBuf) -> anyhow::Result<()> {
    let manifest = Manifest::scan(&content)?;
    manifest.write(&out)?;
    log::info!(
        "Generated {} with {} folders ({} files)",
        out.display(),
        manifest.len(),
        manifest.file_count()
    );
    Ok(())
}

fn stamp_version(config: PathBuf, repo: PathBuf, dry_run: bool) -> anyhow::Result<()> {
    let version = SiteVersion::from_repo(&Repo::new(repo))?;

    if dry_run {
        println!("{}", version);
        return Ok(());
    }

    if !config.exists() {
        anyhow::bail!("Site config {} does not exist", config.display());
    }

    version::stamp(&config, version)?;
    log::info!("Updated version to {}", version);
    Ok(())
}
