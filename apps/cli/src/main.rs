//! `explorer-order`: prints workspace listings in sorting-config order.

mod args;
mod check;
mod render;

use clap::{Parser, Subcommand};
use env_logger::Env;
use explorer_order::{
    ConfigLocations, ConfigStore, ConfigWatcher, LocalVolume, RefreshScope, TreeListingService, TreeView,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "explorer-order",
    about = "Lists files and folders in the order a sorting-config.json asks for"
)]
struct Cli {
    /// Workspace root (default: current directory).
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file to use instead of sorting-config.json / .vscode/sorting-config.json,
    /// relative to the current directory. Also settable with EXPLORER_ORDER_CONFIG
    /// (relative to --root).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one directory's children.
    List {
        /// Directory to list, absolute or relative to the workspace root (default: the root).
        dir: Option<PathBuf>,
    },

    /// Print the ordered tree.
    Tree {
        /// Directory to start from, absolute or relative to the workspace root (default: the root).
        dir: Option<PathBuf>,

        /// How many levels to descend.
        #[arg(long, default_value_t = 3)]
        depth: usize,
    },

    /// Validate the config document and report names that match nothing.
    Check,

    /// Re-print the tree whenever the config document changes.
    Watch {
        /// How many levels to print.
        #[arg(long, default_value_t = 2)]
        depth: usize,

        /// Debounce for config file events, in milliseconds.
        #[arg(long, default_value_t = 200)]
        debounce_ms: u64,
    },
}

fn main() -> ExitCode {
    // Respects RUST_LOG (default: info)
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let root = std::fs::canonicalize(&cli.root).map_err(|e| format!("Can't open workspace {}: {e}", cli.root.display()))?;
    let locations = match cli.config {
        Some(path) => {
            let cwd = std::env::current_dir().map_err(|e| format!("Can't read current directory: {e}"))?;
            ConfigLocations::from_override_and_defaults(&root, Some(args::resolve_config(&cwd, path)))
        }
        None => ConfigLocations::for_workspace(&root),
    };

    match cli.command {
        Command::List { dir } => {
            let dir = args::resolve_dir(&root, dir.as_deref())?;
            let service = open_service(&root, locations)?;
            run_list(&service, &dir, cli.json)
        }
        Command::Tree { dir, depth } => {
            let dir = args::resolve_dir(&root, dir.as_deref())?;
            let service = open_service(&root, locations)?;
            run_tree(&service, &dir, depth, cli.json)
        }
        Command::Check => {
            let service = open_service(&root, locations)?;
            run_check(&service, cli.json)
        }
        Command::Watch { depth, debounce_ms } => run_watch(&root, locations, depth, Duration::from_millis(debounce_ms)),
    }
}

fn open_service(root: &Path, locations: ConfigLocations) -> Result<TreeListingService, String> {
    let store = ConfigStore::with_locations(root, locations).map_err(|e| e.to_string())?;
    Ok(TreeListingService::new(Arc::new(LocalVolume::new(root)), store))
}

fn run_list(service: &TreeListingService, dir: &Path, json: bool) -> Result<(), String> {
    let entries = service.list(dir).map_err(|e| e.to_string())?;
    if json {
        println!("{}", to_json(&entries)?);
    } else {
        print!("{}", render::render_list(&entries));
    }
    Ok(())
}

fn run_tree(service: &TreeListingService, dir: &Path, depth: usize, json: bool) -> Result<(), String> {
    let tree = render::build_tree(service, dir, depth.max(1)).map_err(|e| e.to_string())?;
    if json {
        println!("{}", to_json(&tree)?);
    } else {
        print!("{}", render::render_tree(&label(service, dir), &tree));
    }
    Ok(())
}

fn run_check(service: &TreeListingService, json: bool) -> Result<(), String> {
    let document = service.config().snapshot();
    let missing = match document.folders() {
        Some(policy) => check::find_missing(service.volume().as_ref(), service.workspace_root(), policy),
        None => Vec::new(),
    };
    let source = service.config().source();

    if json {
        let report = serde_json::json!({
            "source": source,
            "document": &*document,
            "missing": missing,
        });
        println!("{}", to_json(&report)?);
        return Ok(());
    }

    match &source {
        Some(path) => println!("Config: {}", path.display()),
        None => println!("Config: none (alphabetical order)"),
    }
    println!("Global names: {}", document.global().map_or(0, |p| p.len()));
    println!("Root folder names: {}", document.folders().map_or(0, |p| p.len()));
    if missing.is_empty() {
        println!("Every name matches an existing path");
    } else {
        println!("Names that match nothing:");
        for path in &missing {
            println!("  {}", path.display());
        }
    }
    Ok(())
}

/// Forwards invalidations to the printing loop.
struct ChannelView {
    sender: Sender<RefreshScope>,
}

impl TreeView for ChannelView {
    fn invalidate(&self, scope: &RefreshScope) {
        // The loop is gone only when the process is exiting
        let _ = self.sender.send(scope.clone());
    }
}

fn run_watch(root: &Path, locations: ConfigLocations, depth: usize, debounce: Duration) -> Result<(), String> {
    let (sender, receiver) = mpsc::channel();
    let store = ConfigStore::with_locations_or_empty(root, locations);
    let service = Arc::new(
        TreeListingService::new(Arc::new(LocalVolume::new(root)), store).with_view(Arc::new(ChannelView { sender })),
    );

    let watcher = ConfigWatcher::for_service(Arc::clone(&service), debounce)?;
    for dir in watcher.watched_dirs() {
        log::info!("Watching {}", dir.display());
    }

    print_tree(&service, depth);
    for scope in receiver {
        log::debug!("Tree invalidated: {:?}", scope);
        print_tree(&service, depth);
    }
    Ok(())
}

fn print_tree(service: &TreeListingService, depth: usize) {
    let root = service.workspace_root();
    match render::build_tree(service, root, depth.max(1)) {
        Ok(tree) => println!("{}", render::render_tree(&label(service, root), &tree)),
        Err(e) => log::warn!("Can't list {}: {}", root.display(), e),
    }
}

/// The workspace root is labeled with the volume name.
fn label(service: &TreeListingService, dir: &Path) -> String {
    if dir == service.workspace_root() {
        return service.volume().name().to_string();
    }
    dir.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.display().to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Can't serialize output: {e}"))
}
