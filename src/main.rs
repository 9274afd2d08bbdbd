use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use pagemark::Config;
use pagemark::draw::Operation;
use pagemark::export::{
    CaptureScope, ExportDependencies, ExportRequest, FileCapture, file::expand_tilde,
    perform_export,
};
use pagemark::share::{
    HttpShareStore, ShareTarget, StaticSessionInfo, decode_payload, fetch_shared, invite_link,
    publish,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("PAGEMARK_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "pagemark")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Render, share and inspect web page annotations"
)]
struct Cli {
    /// Config file to use instead of ~/.config/pagemark/config.toml
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw an annotation log onto a page image and save it as PNG
    Render {
        /// JSON file holding the annotation log
        input: PathBuf,

        /// Page bitmap to draw on (a transparent page when omitted)
        #[arg(long, value_name = "PNG")]
        background: Option<PathBuf>,

        /// Width of the transparent page
        #[arg(long, default_value_t = 1280)]
        width: i32,

        /// Height of the transparent page
        #[arg(long, default_value_t = 800)]
        height: i32,

        /// Which part of the page the bitmap shows
        #[arg(long, value_enum, default_value_t = Scope::Full)]
        scope: Scope,

        /// Horizontal scroll offset of a visible-area bitmap
        #[arg(long, default_value_t = 0.0)]
        scroll_x: f64,

        /// Vertical scroll offset of a visible-area bitmap
        #[arg(long, default_value_t = 0.0)]
        scroll_y: f64,

        /// Directory to save into (defaults to export.save_directory)
        #[arg(long, short = 'o', value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Print the page URL, viewport width and id behind a share link
    Decode {
        /// Public view link or annotated page URL
        link: String,
    },

    /// Download the annotation log behind a share link
    Fetch {
        /// Public view link or annotated page URL
        link: String,

        /// Write the log here instead of stdout
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Upload an annotation log and print its share link
    Publish {
        /// JSON file holding the annotation log
        input: PathBuf,

        /// Page the annotations belong to
        #[arg(long)]
        page_url: String,

        /// Viewport width the annotations were drawn at
        #[arg(long, default_value_t = 1280)]
        width: u32,
    },

    /// Print the invite link for a live session
    Invite {
        /// Session id reported by the host
        session_id: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    Visible,
    Full,
}

impl From<Scope> for CaptureScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Visible => CaptureScope::Visible,
            Scope::Full => CaptureScope::Full,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Command::Render {
            input,
            background,
            width,
            height,
            scope,
            scroll_x,
            scroll_y,
            output,
        } => {
            let operations = read_log(&input)?;
            let capture = FileCapture {
                background,
                width,
                height,
                origin_x: scroll_x,
                origin_y: scroll_y,
            };
            let directory =
                output.unwrap_or_else(|| expand_tilde(&config.export.save_directory));
            let request = ExportRequest {
                scope: scope.into(),
                save_directory: Some(directory),
            };

            let result = perform_export(
                request,
                operations,
                Arc::new(ExportDependencies::new(Arc::new(capture))),
            )
            .await
            .context("Failed to export image")?;

            match result.saved_path {
                Some(path) => println!("{}", path.display()),
                None => println!("{}", result.filename),
            }
        }
        Command::Decode { link } => {
            let target = ShareTarget::parse(&link)?;
            println!("page:  {}", target.page_url);
            match target.viewport_width {
                Some(width) => println!("width: {width}"),
                None => println!("width: unknown"),
            }
            println!("id:    {}", target.id);
        }
        Command::Fetch { link, output } => {
            let target = ShareTarget::parse(&link)?;
            let store = HttpShareStore::from_config(&config.share)?;
            let operations = fetch_shared(&store, &target.id)
                .await
                .with_context(|| format!("Failed to load annotations '{}'", target.id))?;
            let json = serde_json::to_string_pretty(&operations)?;

            match output {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => println!("{json}"),
            }
        }
        Command::Publish {
            input,
            page_url,
            width,
        } => {
            let operations = read_log(&input)?;
            let store = HttpShareStore::from_config(&config.share)?;
            let published = publish(
                &store,
                &operations,
                &page_url,
                width,
                &config.share.view_host,
            )
            .await
            .context("Error generating share URL")?;
            println!("{}", published.link);
        }
        Command::Invite { session_id } => {
            let link = invite_link(&StaticSessionInfo(session_id), &config.share.invite_base)
                .await
                .context("Could not get session ID")?;
            println!("{link}");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Config {
    let result = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    result.unwrap_or_else(|err| {
        log::warn!("{:#}; using default configuration", err);
        Config::default()
    })
}

fn read_log(path: &Path) -> Result<Vec<Operation>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let payload = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    decode_payload(payload).with_context(|| format!("{} is not an annotation log", path.display()))
}
