use std::path::PathBuf;

use reportsync_cli::app;
use reportsync_cli::config::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
enum CliCommand {
    List {
        path: String,
    },
    Download {
        remote_paths: Vec<String>,
        target: Option<PathBuf>,
    },
    Upload {
        destination: String,
        files: Vec<PathBuf>,
        base: Option<PathBuf>,
    },
    Help,
}

fn parse_cli<I>(args: I) -> anyhow::Result<CliCommand>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter().skip(1);
    let Some(command) = args.next() else {
        return Ok(CliCommand::Help);
    };

    match command.as_str() {
        "--help" | "-h" | "help" => Ok(CliCommand::Help),
        "list" => {
            let path = args.next().unwrap_or_else(|| "/".to_string());
            Ok(CliCommand::List { path })
        }
        "download" => {
            let mut target = None;
            let mut remote_paths = Vec::new();
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--target" => {
                        target = Some(PathBuf::from(require_value(&mut args, "--target")?));
                    }
                    other if other.starts_with("--") => {
                        anyhow::bail!("unknown option: {other}")
                    }
                    _ => remote_paths.push(arg),
                }
            }
            anyhow::ensure!(
                !remote_paths.is_empty(),
                "download requires at least one remote path"
            );
            Ok(CliCommand::Download {
                remote_paths,
                target,
            })
        }
        "upload" => {
            let mut destination = None;
            let mut base = None;
            let mut files = Vec::new();
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--to" => destination = Some(require_value(&mut args, "--to")?),
                    "--base" => {
                        base = Some(PathBuf::from(require_value(&mut args, "--base")?));
                    }
                    other if other.starts_with("--") => {
                        anyhow::bail!("unknown option: {other}")
                    }
                    _ => files.push(PathBuf::from(arg)),
                }
            }
            let destination = destination
                .ok_or_else(|| anyhow::anyhow!("upload requires --to <remote-folder>"))?;
            Ok(CliCommand::Upload {
                destination,
                files,
                base,
            })
        }
        other => anyhow::bail!("unknown command: {other}"),
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    option: &str,
) -> anyhow::Result<String> {
    args.next()
        .ok_or_else(|| anyhow::anyhow!("{option} requires a value"))
}

fn print_usage() {
    println!("Usage: reportsync-cli <command> [options]");
    println!("  list [path]                        List catalog items under a path");
    println!("  download [--target DIR] PATH...    Download catalog items into DIR");
    println!("  upload [--base DIR] --to FOLDER [FILE...]");
    println!("                                     Upload files into a remote folder;");
    println!("                                     without FILE arguments every file");
    println!("                                     under the base directory is sent");
    println!();
    println!("Connection settings come from REPORTSYNC_* variables or the settings");
    println!("store and are remembered between runs.");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    match parse_cli(std::env::args())? {
        CliCommand::Help => {
            print_usage();
            Ok(())
        }
        CliCommand::List { path } => app::run_list(Config::load()?, &path).await,
        CliCommand::Download {
            remote_paths,
            target,
        } => app::run_download(Config::load()?, &remote_paths, target.as_deref()).await,
        CliCommand::Upload {
            destination,
            files,
            base,
        } => app::run_upload(Config::load()?, &destination, &files, base.as_deref()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<CliCommand> {
        parse_cli(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn no_arguments_shows_help() {
        assert_eq!(parse(&["reportsync-cli"]).unwrap(), CliCommand::Help);
    }

    #[test]
    fn list_defaults_to_the_root_folder() {
        assert_eq!(
            parse(&["reportsync-cli", "list"]).unwrap(),
            CliCommand::List { path: "/".into() }
        );
        assert_eq!(
            parse(&["reportsync-cli", "list", "/Sales"]).unwrap(),
            CliCommand::List {
                path: "/Sales".into()
            }
        );
    }

    #[test]
    fn download_collects_paths_and_target() {
        let command =
            parse(&["reportsync-cli", "download", "--target", "/tmp/out", "/A", "/B"]).unwrap();
        assert_eq!(
            command,
            CliCommand::Download {
                remote_paths: vec!["/A".into(), "/B".into()],
                target: Some(PathBuf::from("/tmp/out")),
            }
        );
    }

    #[test]
    fn download_without_paths_is_an_error() {
        assert!(parse(&["reportsync-cli", "download"]).is_err());
    }

    #[test]
    fn upload_requires_a_destination() {
        assert!(parse(&["reportsync-cli", "upload", "a.rdl"]).is_err());

        let command = parse(&[
            "reportsync-cli",
            "upload",
            "--base",
            "/tmp/reports",
            "--to",
            "/Sales",
            "a.rdl",
        ])
        .unwrap();
        assert_eq!(
            command,
            CliCommand::Upload {
                destination: "/Sales".into(),
                files: vec![PathBuf::from("a.rdl")],
                base: Some(PathBuf::from("/tmp/reports")),
            }
        );
    }

    #[test]
    fn unknown_options_are_rejected() {
        assert!(parse(&["reportsync-cli", "download", "--fast", "/A"]).is_err());
        assert!(parse(&["reportsync-cli", "frobnicate"]).is_err());
    }
}
