use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lineagescope::config::Config;
use lineagescope::export::{self, ExportData, ExportFormat};
use lineagescope::graph::LineageStore;
use lineagescope::session::LineageSession;
use lineagescope::ui::{self, App};

#[derive(Parser)]
#[command(name = "lineagescope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Terminal lineage graph explorer with filters, hiding and bridged edges", long_about = None)]
struct Cli {
    /// Config file (defaults to ./lineagescope.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the visible graph
    Show {
        #[command(flatten)]
        view: ViewArgs,

        /// Output format: json, csv, markdown
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Explore the lineage interactively
    Explore {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Print load and view statistics
    Stats {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Show version information
    Version,
}

/// Input file and initial view, applied on top of the config file
#[derive(Args)]
struct ViewArgs {
    /// Lineage CSV file
    file: PathBuf,

    /// Hide a node by name (repeatable)
    #[arg(long = "hide-node", value_name = "NAME")]
    hide_nodes: Vec<String>,

    /// Hide every node of a type (repeatable)
    #[arg(long = "hide-type", value_name = "TYPE")]
    hide_types: Vec<String>,

    /// Hide a relationship label (repeatable)
    #[arg(long = "hide-relationship", value_name = "LABEL")]
    hide_relationships: Vec<String>,

    /// Only admit rows whose column has this value (repeatable)
    #[arg(long = "filter", value_name = "COLUMN=VALUE", value_parser = parse_filter)]
    filters: Vec<(String, String)>,
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected COLUMN=VALUE, got '{}'", s)),
    }
}

fn init_logging(verbose: u8, config: &Config) {
    let level = match verbose {
        0 => config.logging.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_session(args: &ViewArgs, config: &Config) -> Result<LineageSession> {
    let store = LineageStore::load_file(&args.file, config.columns.clone())
        .with_context(|| format!("Failed to load lineage from {}", args.file.display()))?;
    info!(
        nodes = store.node_count(),
        edges = store.edge_count(),
        skipped = store.skipped_rows(),
        "loaded lineage"
    );

    let mut view = config.view_state();
    view.hidden_node_ids.extend(args.hide_nodes.iter().cloned());
    view.hidden_node_types.extend(args.hide_types.iter().cloned());
    view.hidden_relationships.extend(args.hide_relationships.iter().cloned());

    let mut session = LineageSession::with_view(store, view);
    config.apply_filters(&mut session);

    for (column, value) in &args.filters {
        if session.filter().selection(column).is_none() {
            warn!(column = %column, "filter names an unknown column");
        } else if !session.set_filter_value(column, value, true) {
            warn!(column = %column, value = %value, "filter value not present in column");
        }
    }

    Ok(session)
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn show(args: &ViewArgs, config: &Config, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let mut session = open_session(args, config)?;
    let data = ExportData::from_session(source_name(&args.file), &mut session);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            export::export(format, &data, &mut writer)?;
            writer.flush()?;
            info!(path = %path.display(), %format, "wrote export");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export::export(format, &data, &mut writer)?;
        }
    }
    Ok(())
}

fn explore(args: &ViewArgs, config: &Config) -> Result<()> {
    let session = open_session(args, config)?;
    let mut app = App::new(session, source_name(&args.file));
    ui::run(&mut app).context("Terminal UI failed")
}

fn stats(args: &ViewArgs, config: &Config) -> Result<()> {
    let mut session = open_session(args, config)?;
    let status = session.status();
    let counts = session.type_counts();
    let store = session.store();

    println!("Source:        {}", args.file.display());
    println!("Rows:          {}", store.rows().len());
    println!("Skipped rows:  {}", store.skipped_rows());
    println!(
        "Nodes:         {} ({} visible, {} hidden)",
        status.total_nodes, status.visible_nodes, status.hidden_nodes
    );
    println!(
        "Edges:         {} direct, {} indirect",
        status.direct_edges, status.indirect_edges
    );
    println!("Hidden:        {}", status.hidden_list());

    println!("\nNode types:");
    for count in &counts {
        println!("  {:<20} {}/{} visible", count.node_type, count.visible, count.total);
    }

    println!("\nRelationships:");
    for label in store.relationship_types() {
        let marker = if session.view().is_relationship_hidden(label) {
            " (hidden)"
        } else {
            ""
        };
        println!("  {}{}", label, marker);
    }

    let conflicts = store.type_conflicts();
    if !conflicts.is_empty() {
        println!("\nType conflicts:");
        for conflict in conflicts {
            println!("  {}", conflict.description());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let config = Config::discover(cli.config.as_deref(), &cwd).context("Failed to load config")?;
    init_logging(cli.verbose, &config);

    match &cli.command {
        Some(Commands::Show {
            view,
            format,
            output,
        }) => show(view, &config, *format, output.as_deref()),
        Some(Commands::Explore { view }) => explore(view, &config),
        Some(Commands::Stats { view }) => stats(view, &config),
        Some(Commands::Version) => {
            println!("lineagescope v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            println!("LineageScope - Terminal Lineage Graph Explorer");
            println!("Run 'lineagescope explore <FILE>' to browse a lineage CSV");
            println!("Run 'lineagescope --help' for more information");
            Ok(())
        }
    }
}
