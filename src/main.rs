//! twig CLI - minimal version control command line interface

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use twig::ops::{self, ShowReport};
use twig::{resolve_prefix, Error, FileChange, HunkKind, Repo};

#[derive(Parser)]
#[command(name = "twig")]
#[command(about = "minimal content-addressed version control")]
#[command(version)]
struct Cli {
    /// directory to start repository discovery from
    #[arg(short = 'C', long, default_value = ".", env = "TWIG_DIR")]
    repo: PathBuf,

    /// disable colored diff output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// initialize a new repository
    Init {
        /// directory to create the repository in, relative to -C
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// stage files for the next commit
    Add {
        /// files to stage
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// record staged files as a new commit
    Commit {
        /// commit message
        message: String,
    },

    /// show commit history, newest first
    Log {
        /// maximum number of commits to show
        #[arg(short = 'n', long)]
        max_count: Option<usize>,
    },

    /// show a commit's files and their diff against the parent commit
    Show {
        /// commit hash or unique prefix
        commit: String,
    },

    /// show HEAD and staged files
    Status,

    /// write the raw bytes of an object to stdout
    CatFile {
        /// object hash or unique prefix
        object: String,
    },

    /// verify repository integrity
    Fsck,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// diagnostics go to stderr, filtered by TWIG_LOG (default: warn)
fn init_logging() {
    let filter = EnvFilter::try_from_env("TWIG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> twig::Result<ExitCode> {
    match cli.command {
        // a relative path is taken from -C, like every other command
        Commands::Init { path } => match Repo::init(&cli.repo.join(path)) {
            Ok(repo) => {
                println!("initialized twig repository at {}", repo.path().display());
            }
            Err(Error::AlreadyInitialized(at)) => {
                eprintln!("twig repository already initialized at {}", at.display());
            }
            Err(e) => return Err(e),
        },

        Commands::Add { files } => {
            let repo = Repo::discover(&cli.repo)?;
            for file in files {
                let entry = ops::add(&repo, &file)?;
                println!("added {} ({})", entry.path, entry.hash.short());
            }
        }

        Commands::Commit { message } => {
            let repo = Repo::discover(&cli.repo)?;
            let hash = ops::commit(&repo, &message)?;
            println!("{}", hash);
        }

        Commands::Log { max_count } => {
            let repo = Repo::discover(&cli.repo)?;
            let walk = ops::History::new(&repo).take(max_count.unwrap_or(usize::MAX));

            // print as we go so a broken link still shows the good prefix
            for entry in walk {
                println!("{}", entry?);
            }
        }

        Commands::Show { commit } => {
            let repo = Repo::discover(&cli.repo)?;
            let color = repo.config().show.color && !cli.no_color;

            let Some(report) = ops::show_revision(&repo, &commit)? else {
                eprintln!("commit not found: {}", commit);
                return Ok(ExitCode::FAILURE);
            };

            print_show(&report, color);
        }

        Commands::Status => {
            let repo = Repo::discover(&cli.repo)?;
            let status = ops::status(&repo)?;

            match status.head {
                Some(head) => println!("HEAD {}", head),
                None => println!("no commits yet"),
            }

            if status.staged.is_empty() {
                println!("nothing staged");
            } else {
                println!("staged:");
                for entry in &status.staged {
                    println!("  {}", entry);
                }
            }
        }

        Commands::CatFile { object } => {
            let repo = Repo::discover(&cli.repo)?;
            let hash = resolve_prefix(&repo, &object)?;
            let data = twig::get(&repo, &hash)?;
            io::stdout()
                .write_all(&data)
                .map_err(|e| Error::Io { path: "stdout".into(), source: e })?;
        }

        Commands::Fsck => {
            let repo = Repo::discover(&cli.repo)?;
            let report = ops::fsck(&repo)?;

            println!("objects checked: {}", report.objects_checked);
            println!("commits walked: {}", report.commits_walked);

            if !report.corrupt_objects.is_empty() {
                println!("\ncorrupt objects:");
                for obj in &report.corrupt_objects {
                    println!("  {} {}: {}", obj.object_type, obj.hash, obj.message);
                }
            }

            if !report.missing_objects.is_empty() {
                println!("\nmissing objects:");
                for obj in &report.missing_objects {
                    println!(
                        "  {} {} (referenced by {})",
                        obj.object_type, obj.hash, obj.referenced_by
                    );
                }
            }

            if !report.dangling_objects.is_empty() {
                println!("\ndangling objects: {}", report.dangling_objects.len());
            }

            if report.is_ok() {
                println!("\nrepository is healthy");
            } else {
                println!("\nrepository has issues");
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_show(report: &ShowReport, color: bool) {
    println!("commit {}", report.hash);
    println!(
        "Date:   {}",
        report
            .commit
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    );
    println!();
    for line in report.commit.message.lines() {
        println!("    {}", line);
    }

    for file in &report.files {
        println!();
        println!("File: {}", file.path);
        println!("Content:");
        print!("{}", file.content);
        if !file.content.is_empty() && !file.content.ends_with('\n') {
            println!();
        }
        println!();

        match &file.change {
            FileChange::FirstCommit => println!("First commit"),
            FileChange::NewFile => {
                let msg = "New file in this commit";
                if color {
                    println!("{}", msg.yellow());
                } else {
                    println!("{}", msg);
                }
            }
            FileChange::Modified(hunks) => {
                for hunk in hunks {
                    for line in hunk.text.split_inclusive('\n') {
                        let line = line.strip_suffix('\n').unwrap_or(line);
                        let text = format!("{}{}", hunk.kind, line);
                        if !color {
                            println!("{}", text);
                            continue;
                        }
                        match hunk.kind {
                            HunkKind::Added => println!("{}", text.green()),
                            HunkKind::Removed => println!("{}", text.red()),
                            HunkKind::Unchanged => println!("{}", text.dimmed()),
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_relative_to_repo_flag() {
        let dir = tempdir().unwrap();
        let base = dir.path().to_str().unwrap();

        let cli = Cli::parse_from(["twig", "-C", base, "init", "sub"]);
        run(cli).unwrap();
        assert!(dir.path().join("sub").join(".twig").join("config.toml").is_file());

        let cli = Cli::parse_from(["twig", "-C", base, "init"]);
        run(cli).unwrap();
        assert!(dir.path().join(".twig").join("config.toml").is_file());
    }
}
