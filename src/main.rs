use agentlink::constants::SOURCE_ENV;
use agentlink::report;
use agentlink::{
    default_targets, load_config, resolve_source, save_config, source_or_default, Config, Error,
    InstallOutcome, Installer, LinkState, UninstallOutcome,
};
use clap::error::{ContextKind, ErrorKind};
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "agentlink", version)]
#[command(
    about = "Link an agent instruction file into ~/.claude/CLAUDE.md and ~/.gemini/GEMINI.md"
)]
struct Cli {
    /// Agent instruction file to link (defaults to AGENT.md in the current directory)
    #[arg(long, value_name = "PATH", env = SOURCE_ENV)]
    source: Option<PathBuf>,
    /// Remove the links instead of creating them (--source is ignored)
    #[arg(long, conflicts_with = "status")]
    uninstall: bool,
    /// Show what each target path currently holds
    #[arg(long)]
    status: bool,
    /// Remember the source path as the default for later runs
    #[arg(long, conflicts_with_all = ["uninstall", "status"])]
    remember: bool,
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => exit_on_parse_error(e),
    };

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            report::error(&e);
            1
        }
    };
    process::exit(code);
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agentlink=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Help and version exit 0; every other parse failure exits 1.
fn exit_on_parse_error(e: clap::Error) -> ! {
    if !e.use_stderr() {
        e.exit();
    }

    if e.kind() == ErrorKind::UnknownArgument {
        let arg = e
            .get(ContextKind::InvalidArg)
            .map(|v| v.to_string())
            .unwrap_or_default();
        report::error(Error::UnknownOption(arg));
        eprintln!("{}", Cli::command().render_usage());
        eprintln!("For more information, try '--help'.");
    } else {
        let _ = e.print();
    }
    process::exit(1);
}

fn run(cli: &Cli) -> agentlink::Result<i32> {
    let installer = Installer::new(default_targets()?);

    if cli.uninstall {
        return Ok(uninstall(&installer));
    }

    let mut config = load_config()?;
    let source = source_or_default(cli.source.clone(), &config);

    if cli.status {
        return Ok(status(&installer, &source));
    }

    install(&installer, &source, cli.remember, &mut config)
}

fn install(
    installer: &Installer,
    source: &Path,
    remember: bool,
    config: &mut Config,
) -> agentlink::Result<i32> {
    report::info(format_args!("Source: {}", source.display()));
    let results = installer.install(source)?;

    for t in &results.targets {
        let name = &t.target.name;
        let path = t.target.path.display();
        match &t.result {
            Ok(InstallOutcome::Linked) => {
                report::success(format_args!(
                    "{}: linked {} -> {}",
                    name,
                    path,
                    results.source.display()
                ));
            }
            Ok(InstallOutcome::Relinked) => {
                report::success(format_args!(
                    "{}: replaced existing link {} -> {}",
                    name,
                    path,
                    results.source.display()
                ));
            }
            Ok(InstallOutcome::BackedUp { backup }) => {
                report::warn(format_args!(
                    "{}: existing file {} backed up to {}",
                    name,
                    path,
                    backup.display()
                ));
                report::success(format_args!(
                    "{}: linked {} -> {}",
                    name,
                    path,
                    results.source.display()
                ));
            }
            Err(e) => report::error(e),
        }
    }

    if !results.all_succeeded() {
        report::error(format_args!(
            "{} of {} targets failed",
            results.failure_count(),
            results.targets.len()
        ));
        return Ok(1);
    }

    if remember && config.set_source(&results.source) {
        save_config(config)?;
        report::info(format_args!(
            "Remembered {} as the default source",
            results.source.display()
        ));
    }

    report::success("All targets linked");
    Ok(0)
}

fn uninstall(installer: &Installer) -> i32 {
    let results = installer.uninstall();

    for t in &results.targets {
        let name = &t.target.name;
        let path = t.target.path.display();
        match &t.result {
            Ok(UninstallOutcome::Removed) => {
                report::success(format_args!("{}: removed link {}", name, path));
            }
            Ok(UninstallOutcome::SkippedNotSymlink) => {
                report::warn(format_args!("{}: {} is not a symlink, skipped", name, path));
            }
            Ok(UninstallOutcome::NothingToRemove) => {
                report::info(format_args!("{}: nothing to remove at {}", name, path));
            }
            Err(e) => report::error(e),
        }
    }

    if results.all_succeeded() {
        0
    } else {
        1
    }
}

fn status(installer: &Installer, source: &Path) -> i32 {
    let resolved = resolve_source(source).ok();
    let mut code = 0;

    for t in installer.status() {
        let name = &t.target.name;
        let path = t.target.path.display();
        match t.result {
            Ok(st) => match st.state {
                LinkState::Absent => report::info(format_args!("{}: {} is absent", name, path)),
                LinkState::RegularFile => {
                    report::warn(format_args!("{}: {} exists but is not a symlink", name, path))
                }
                LinkState::Symlink => {
                    let dest = st
                        .destination
                        .as_deref()
                        .map(|d| d.display().to_string())
                        .unwrap_or_default();
                    if resolved.as_deref().is_some_and(|s| st.points_to(s)) {
                        report::success(format_args!("{}: {} -> {}", name, path, dest));
                    } else {
                        report::warn(format_args!(
                            "{}: {} -> {} (not {})",
                            name,
                            path,
                            dest,
                            source.display()
                        ));
                    }
                }
            },
            Err(e) => {
                report::error(e);
                code = 1;
            }
        }
    }

    code
}
