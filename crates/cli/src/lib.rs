mod cat;
mod deps;
mod dump;
mod paths;
mod readers;
mod resolve;

use clap::{Parser, Subcommand};
use loadpath_core::bundle::ResourceTable;
use loadpath_core::{Bundle, Loadpath};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "loadpath",
    version,
    about = "Inspect classpath & resource resolution",
    long_about = "Loadpath resolves logical resource names against an ordered set of source \
                  roots: plain directories, jar/zip archives, and the embedded resource bundle. \
                  This tool exposes the resolver for inspection: list the effective roots, \
                  resolve a name to its location, print its content, and collect the per-root \
                  dependency manifests and data-reader registrations."
)]
pub struct Cli {
    /// Register an extra source root (directory or .jar/.zip); repeatable
    #[arg(long = "path", global = true, value_name = "DIR_OR_JAR")]
    pub paths: Vec<PathBuf>,

    /// Use the dev bundle mirrored under this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub bundle_root: Option<PathBuf>,

    /// Use an embedded-format resource table read from this JSON file
    #[arg(long, global = true, value_name = "FILE", conflicts_with = "bundle_root")]
    pub bundle_table: Option<PathBuf>,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the effective source roots in search order
    #[command(
        long_about = "Prints the effective root list: manually registered roots in registration \
                      order, followed by roots inferred from installed package metadata."
    )]
    Paths,
    /// Resolve a resource name to where it lives
    Resolve {
        /// Resource name, e.g. lumo/core.cljs
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Print a resource's content
    Cat {
        /// Resource name, e.g. lumo/core.cljs
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Collect every root's dependency manifest (deps.cljs)
    Deps,
    /// Collect every root's data-reader registrations
    Readers,
    /// Write every bundled resource into a directory
    Dump {
        /// Output directory (created if missing)
        #[arg(value_name = "OUTDIR")]
        outdir: PathBuf,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _guard = loadpath_core::logging::init_logging("cli", false);

    let rt = tokio::runtime::Runtime::new()?;

    let bundle = match (&cli.bundle_table, &cli.bundle_root) {
        (Some(table_path), _) => {
            let json = std::fs::read_to_string(table_path)?;
            Bundle::embedded(ResourceTable::from_json(&json)?)
        }
        (None, Some(root)) => Bundle::dev(root.clone()),
        (None, None) => Bundle::dev_default(),
    };

    let loadpath = Loadpath::new(bundle);
    loadpath.add_source_paths(&cli.paths);

    match cli.command {
        Commands::Paths => rt.block_on(paths::run(&loadpath, cli.json)),
        Commands::Resolve { name } => rt.block_on(resolve::run(&loadpath, &name, cli.json)),
        Commands::Cat { name } => rt.block_on(cat::run(&loadpath, &name)),
        Commands::Deps => rt.block_on(deps::run(&loadpath, cli.json)),
        Commands::Readers => rt.block_on(readers::run(&loadpath, cli.json)),
        Commands::Dump { outdir } => rt.block_on(dump::run(&loadpath, &outdir)),
    }
}
