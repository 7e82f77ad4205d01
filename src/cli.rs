//! Command-line front end
//!
//! Every subcommand drives one action against the configured storage API.
//! Transfer progress is drawn on stderr; results go to stdout.

use crate::actions::{self, NodeInfo};
use crate::config::{self, DriveConfig, DEFAULT_CHUNK_SIZE, DEFAULT_RETRY_COUNT};
use crate::drive::Drive;
use crate::events::{EventSink, LogSink, PROGRESS_REMOVED, PROGRESS_UPDATED};
use crate::progress::{ProgressEntry, TransferKind};
use crate::store::Theme;
use crate::transfer;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use humansize::{format_size, BINARY};
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// clouddrive - command-line client for a cloud drive storage service
#[derive(Debug, Parser)]
#[command(name = "clouddrive", version, about)]
pub struct Cli {
    /// Storage API root URL
    #[arg(long, env = "CLOUDDRIVE_URL", default_value = "http://localhost:8080")]
    pub url: String,

    /// Bearer token sent with every request
    #[arg(long, env = "CLOUDDRIVE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Upload chunk size in bytes
    #[arg(long, env = "CLOUDDRIVE_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: u64,

    /// Extra attempts for failed read requests
    #[arg(long, env = "CLOUDDRIVE_RETRIES", default_value_t = DEFAULT_RETRY_COUNT)]
    pub retries: u32,

    /// Files uploaded in parallel
    #[arg(long, default_value_t = config::MAX_CONCURRENT_UPLOADS)]
    pub concurrency: usize,

    /// Where local preferences are kept (default: platform data directory)
    #[arg(long, env = "CLOUDDRIVE_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in (enrolling if needed) and show the root folder and theme
    Status,
    /// Register the current user with the service
    Enroll,
    /// Remove the current user from the service
    Unenroll,
    /// List a folder (default: root)
    Ls { folder: Option<String> },
    /// Create a folder
    Mkdir { parent: String, name: String },
    /// Upload local files into a folder
    Upload {
        folder: String,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Download a file
    Download {
        file: String,
        /// Destination path (default: the file's name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rename a folder or file
    Rename { key: String, name: String },
    /// Move folders or files into another folder
    Mv {
        #[arg(required = true)]
        keys: Vec<String>,
        #[arg(short, long)]
        target: String,
    },
    /// Delete folders or files permanently
    Rm {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Move folders or files to the trash
    Trash {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Permanently delete everything in the trash
    EmptyTrash,
    /// Show folder or file details
    Info { key: String },
    /// Show the path from the root to a folder or file
    Path { key: String },
    /// Show or set the theme (default, light, dark)
    Theme { theme: Option<Theme> },
}

impl Cli {
    pub fn drive_config(&self) -> DriveConfig {
        let mut config = DriveConfig::new(&self.url);
        config.token = self.token.clone();
        config.chunk_size = self.chunk_size;
        config.retry_count = self.retries;
        config.max_concurrent_uploads = self.concurrency;
        config.data_dir = self.data_dir.clone().or_else(config::default_data_dir);
        config
    }
}

/// Draws transfer progress on stderr; everything else goes to the log
struct ConsoleSink;

fn progress_line(entry: &ProgressEntry) -> String {
    format!(
        "{} {} / {} ({}%)",
        entry.name,
        format_size(entry.loaded, BINARY),
        format_size(entry.total, BINARY),
        entry.percent()
    )
}

impl EventSink for ConsoleSink {
    fn emit_value(&self, event: &str, payload: Value) {
        match event {
            PROGRESS_UPDATED => match serde_json::from_value::<ProgressEntry>(payload) {
                Ok(entry) => {
                    let mut stderr = std::io::stderr();
                    let _ = write!(stderr, "\r{}", progress_line(&entry));
                    let _ = stderr.flush();
                }
                Err(e) => log::warn!("Malformed progress event: {}", e),
            },
            PROGRESS_REMOVED => eprintln!(),
            _ => LogSink.emit_value(event, payload),
        }
    }
}

/// Parse arguments, then run the chosen command to completion
pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(execute(cli))
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    let drive = Drive::new(cli.drive_config(), Arc::new(ConsoleSink))
        .await
        .context("failed to set up client")?;

    match cli.command {
        Command::Status => {
            let root_key = actions::bootstrap(&drive).await?;
            let theme = drive.user.read(|user| user.theme);
            println!("root folder: {}", root_key);
            println!("theme:       {}", theme);
        }
        Command::Enroll => {
            crate::api::user::enroll_user(&drive.api).await?;
            println!("enrolled");
        }
        Command::Unenroll => {
            crate::api::user::delete_user(&drive.api).await?;
            println!("unenrolled");
        }
        Command::Ls { folder } => {
            let folder = match folder {
                Some(folder) => folder,
                None => actions::bootstrap(&drive).await?,
            };
            drive.read_folder(&folder).await?;
            drive.elements.read(|elements| {
                for element in elements.children(&folder) {
                    match element.kind {
                        crate::store::ElementKind::Folder => {
                            println!("{:<40} {:>10}  {}/", element.key, "-", element.name)
                        }
                        _ => println!(
                            "{:<40} {:>10}  {}",
                            element.key,
                            format_size(element.size, BINARY),
                            element.name
                        ),
                    }
                }
            });
        }
        Command::Mkdir { parent, name } => {
            let key = actions::create_folder(&drive, &parent, &name).await?;
            println!("{}", key);
        }
        Command::Upload { folder, paths } => {
            let mut failed = 0;
            for (path, result) in actions::drop_paths(&drive, &folder, &paths).await {
                match result {
                    Ok(uploaded) => println!(
                        "uploaded {} ({})",
                        uploaded.file_name,
                        format_size(uploaded.size, BINARY)
                    ),
                    Err(e) => {
                        failed += 1;
                        eprintln!("failed to upload {}: {}", path.display(), e);
                    }
                }
            }
            if failed > 0 {
                bail!("{} of {} uploads failed", failed, paths.len());
            }
        }
        Command::Download { file, output } => {
            let element = actions::resolve_node(&drive, &file).await?;
            let destination = output.unwrap_or_else(|| PathBuf::from(&element.name));
            let written =
                transfer::download_file_to(&drive, &file, Some(&element.name), &destination)
                    .await?;
            println!(
                "saved {} ({})",
                destination.display(),
                format_size(written, BINARY)
            );
        }
        Command::Rename { key, name } => {
            actions::resolve_node(&drive, &key).await?;
            actions::start_rename(&drive, &key);
            if actions::confirm_rename(&drive, &key, &name).await? {
                println!("renamed to {}", actions::sanitize_name(name.trim()));
            } else {
                println!("name unchanged");
            }
        }
        Command::Mv { keys, target } => {
            let report = actions::move_elements(&drive, &keys, &target).await;
            summarize("moved", report)?;
        }
        Command::Rm { keys } => {
            let report = actions::delete_permanently(&drive, &keys).await?;
            summarize("deleted", report)?;
        }
        Command::Trash { keys } => {
            let report = actions::move_to_trash(&drive, &keys).await?;
            summarize("trashed", report)?;
        }
        Command::EmptyTrash => {
            let report = actions::empty_trash(&drive).await?;
            summarize("deleted", report)?;
        }
        Command::Info { key } => match actions::node_info(&drive, &key).await? {
            NodeInfo::Folder(info) => {
                println!("folder {}", info.folder_name);
                println!("key:    {}", info.folder_key);
                println!("parent: {}", info.parent_key.as_deref().unwrap_or("-"));
            }
            NodeInfo::File(info) => {
                println!("file   {}", info.file_name);
                println!("key:    {}", info.file_key);
                println!("folder: {}", info.folder_key);
                println!("size:   {}", format_size(info.file_size, BINARY));
                println!("type:   {}", crate::content_type::mime_type(&info.file_name));
            }
        },
        Command::Path { key } => {
            let path = actions::node_path(&drive, &key).await?;
            println!("/{}", path.join("/"));
        }
        Command::Theme { theme } => match theme {
            Some(theme) => {
                actions::set_theme(&drive, theme).await;
                println!("theme set to {}", theme);
            }
            None => {
                let theme = crate::db::load_theme(drive.db())
                    .await
                    .map_err(|e| anyhow::anyhow!("failed to read theme: {}", e))?;
                println!("{}", theme);
            }
        },
    }

    Ok(())
}

fn summarize(verb: &str, report: actions::BatchReport) -> anyhow::Result<()> {
    for key in &report.succeeded {
        println!("{} {}", verb, key);
    }
    for (key, e) in &report.failed {
        eprintln!("{}: {}", key, e);
    }
    if !report.is_success() {
        bail!("{} of {} operations failed", report.failed.len(), report.succeeded.len() + report.failed.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upload_with_multiple_paths() {
        let cli = Cli::try_parse_from([
            "clouddrive",
            "--url",
            "https://drive.example.com/api/",
            "upload",
            "folder-1",
            "a.txt",
            "b.txt",
        ])
        .unwrap();

        let config = cli.drive_config();
        assert_eq!(config.base_url, "https://drive.example.com/api");
        match cli.command {
            Command::Upload { folder, paths } => {
                assert_eq!(folder, "folder-1");
                assert_eq!(paths.len(), 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn theme_argument_must_be_known() {
        assert!(Cli::try_parse_from(["clouddrive", "theme", "neon"]).is_err());
        let cli = Cli::try_parse_from(["clouddrive", "theme", "dark"]).unwrap();
        assert!(matches!(cli.command, Command::Theme { theme: Some(Theme::Dark) }));
    }

    #[test]
    fn progress_line_shows_sizes_and_percent() {
        let entry = ProgressEntry {
            key: "root-a.bin".to_string(),
            name: "a.bin".to_string(),
            kind: TransferKind::Upload,
            loaded: 512,
            total: 2048,
            started_at: 0,
        };
        let line = progress_line(&entry);
        assert!(line.starts_with("a.bin 512 B / 2"), "{}", line);
        assert!(line.ends_with("(25%)"), "{}", line);
    }

    #[test]
    fn mv_requires_a_target() {
        assert!(Cli::try_parse_from(["clouddrive", "mv", "a"]).is_err());
    }
}
