use std::path::PathBuf;
use std::process::Command;

use anyhow::Context;
use clap::Parser;
use debug_timer::config::Config;
use debug_timer::Debugger;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Times shell commands into an append-only debug log
#[derive(Parser, Debug)]
#[command(version = env!("CARGO_APP_VERSION"), name = "debug-timer",
    about = "Runs shell commands and times each one into a debug log", long_about = None)]
struct Args {
    /// Log file, `debug.log` in the temp directory if not set
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Run the remaining commands after one fails
    #[arg(long)]
    keep_going: bool,
    /// Do not append the summary table
    #[arg(long)]
    no_summary: bool,
    /// Commands, each run with `sh -c`
    #[arg(required = true)]
    commands: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::Layer::default().compact())
        .init();
    let args = Args::parse();
    if let Err(e) = main_int(args) {
        log::error!("{}", e);
        return Err(e);
    }
    Ok(())
}

fn main_int(args: Args) -> anyhow::Result<()> {
    run(args, "sh")
}

fn run(args: Args, shell: &str) -> anyhow::Result<()> {
    let cfg = args.log_file.map(Config::new).unwrap_or_default();
    tracing::info!(version = env!("CARGO_APP_VERSION"));
    tracing::info!(log = %cfg.log_file.display());

    let mut dbg = Debugger::new(cfg);
    let mut failed = Vec::new();
    let mut spawn_err = None;
    for cmd in &args.commands {
        dbg.start(Some(cmd))?;
        let status = Command::new(shell)
            .arg("-c")
            .arg(cmd)
            .status()
            .with_context(|| format!("can't run `{cmd}`"));
        dbg.end(None)?;
        match status {
            Ok(status) if status.success() => {}
            Ok(status) => {
                tracing::warn!(command = %cmd, %status, "command failed");
                failed.push(cmd.as_str());
                if !args.keep_going {
                    break;
                }
            }
            Err(e) => {
                spawn_err = Some(e);
                break;
            }
        }
    }

    if !args.no_summary {
        dbg.summary()?;
    }
    if let Some(e) = spawn_err {
        return Err(e);
    }
    if !failed.is_empty() {
        anyhow::bail!("{} command(s) failed: {}", failed.len(), failed.join(", "));
    }
    tracing::info!(commands = args.commands.len(), "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_args() {
        Args::command().debug_assert();
        let args = Args::try_parse_from([
            "debug-timer",
            "--log-file",
            "/tmp/x.log",
            "--keep-going",
            "true",
            "sleep 0",
        ])
        .unwrap();
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/x.log")));
        assert!(args.keep_going);
        assert!(!args.no_summary);
        assert_eq!(args.commands, vec!["true", "sleep 0"]);
    }

    #[test]
    fn test_args_log_file_only_from_flag() {
        std::env::set_var("DEBUG_LOG_FILE", "/tmp/from-env.log");
        let args = Args::try_parse_from(["debug-timer", "true"]).unwrap();
        assert_eq!(args.log_file, None);
    }

    #[test]
    fn test_args_need_command() {
        assert!(Args::try_parse_from(["debug-timer", "--log-file", "/tmp/x.log"]).is_err());
    }

    #[test]
    fn test_run() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("debug.log");
        let args = Args {
            log_file: Some(log_file.clone()),
            keep_going: false,
            no_summary: false,
            commands: vec!["true".to_string(), "false".to_string(), "true".to_string()],
        };
        assert!(main_int(args).is_err());
        let content = std::fs::read_to_string(&log_file).unwrap();
        assert_eq!(content.matches("| START: ").count(), 2);
        assert_eq!(content.matches("| END: false. Took ").count(), 1);
        assert!(content.contains("DEBUG INFO SUMMARY"));
    }

    #[test]
    fn test_run_spawn_error_keeps_summary() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("debug.log");
        let args = Args {
            log_file: Some(log_file.clone()),
            keep_going: true,
            no_summary: false,
            commands: vec!["true".to_string(), "false".to_string()],
        };
        let missing_shell = dir.path().join("no-such-shell");
        let err = run(args, missing_shell.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("can't run `true`"), "{err}");

        let content = std::fs::read_to_string(&log_file).unwrap();
        assert_eq!(content.matches("| START: ").count(), 1);
        assert_eq!(content.matches("| END: true. Took ").count(), 1);
        assert!(content.contains("DEBUG INFO SUMMARY"));
        assert!(content.contains("true-------Lines: "));
    }
}
