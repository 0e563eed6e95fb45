//! `soliddata` — generate static LDP pod networks from a blueprint.
//!
//! Three subcommands:
//!
//! - **`generate`** — write the container tree for a blueprint (or print the
//!   plan with `--dry-run`).
//! - **`validate`** — check a blueprint, including friend references.
//! - **`show`** — print one person's document to stdout.
//!
//! Blueprints are JSON or YAML (by file extension). Pass `-` to read JSON
//! from stdin.
//!
//! Log verbosity follows `RUST_LOG` (default `soliddata=info`).

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use soliddata::documents::document_graph;
use soliddata::{
    parse_blueprint, validate_blueprint, Blueprint, BlueprintFormat, DocumentKind, Generator,
    GeneratorConfig, GraphSerializer, Registry, TurtleSerializer,
};

/// soliddata — static LDP pod network generator
///
/// Turns a blueprint of people and servers into WebID profiles, inboxes and
/// sensor documents laid out as LDP containers.
#[derive(Parser)]
#[command(name = "soliddata", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the container tree for a blueprint.
    ///
    /// Each server container is removed and recreated. Person directories
    /// must not already exist.
    ///
    /// Examples:
    ///   soliddata generate network.yaml --output ./pods
    ///   soliddata generate network.json --output ./pods --flatten --dry-run
    Generate {
        /// Path to a JSON or YAML blueprint, or `-` for JSON on stdin.
        blueprint: PathBuf,

        /// Root directory of the generated tree.
        #[arg(short = 'o', long, env = "SOLIDDATA_OUTPUT", value_name = "DIR")]
        output: PathBuf,

        /// Put every person directly under the output root instead of one
        /// `ldpc-{server}` container per server.
        #[arg(long, env = "SOLIDDATA_FLATTEN")]
        flatten: bool,

        /// Print the planned directories and documents without writing anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a blueprint and resolve its friend graph.
    ///
    /// Exits 0 if the blueprint is well formed and every friend reference
    /// resolves, 1 otherwise.
    Validate {
        /// Path to a JSON or YAML blueprint, or `-` for JSON on stdin.
        blueprint: PathBuf,
    },

    /// Print one document of one person as Turtle.
    Show {
        /// Path to a JSON or YAML blueprint, or `-` for JSON on stdin.
        blueprint: PathBuf,

        /// Id of the person.
        #[arg(short = 'p', long, value_name = "ID")]
        person: String,

        /// Document: profile | inbox | sensor
        #[arg(short = 'd', long, value_name = "KIND", default_value = "profile")]
        document: DocumentKind,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soliddata=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            blueprint,
            output,
            flatten,
            dry_run,
        } => {
            let bp = load(&blueprint);
            let generator = Generator::new(GeneratorConfig::new(output).flatten(flatten));

            if dry_run {
                let plan = generator.plan(&bp).unwrap_or_else(|e| failed(&e));
                print!("{}", plan);
                println!("{}", plan.summary());
                return;
            }

            match generator.run(&bp) {
                Ok(summary) => println!("generated {}", summary),
                Err(e) => failed(&e),
            }
        }

        Command::Validate { blueprint } => {
            let bp = load(&blueprint);
            let registry = resolve(&bp);
            println!(
                "valid: {} server{}, {} {}",
                bp.servers.len(),
                if bp.servers.len() == 1 { "" } else { "s" },
                registry.len(),
                if registry.len() == 1 { "person" } else { "people" }
            );
        }

        Command::Show {
            blueprint,
            person,
            document,
        } => {
            let bp = load(&blueprint);
            let registry = resolve(&bp);
            let p = registry
                .get(&person)
                .unwrap_or_else(|| fatal(&format!("no person with id {:?}", person)));
            let graph = document_graph(p, document).unwrap_or_else(|| {
                fatal(&format!("person {:?} has no {} document", person, document))
            });
            match TurtleSerializer.serialize(&graph) {
                Ok(text) => print!("{}", text),
                Err(e) => failed(&e),
            }
        }
    }
}

/// Read, decode and validate a blueprint, exiting on failure.
fn load(path: &Path) -> Blueprint {
    let text = read_input(path);
    let bp = parse_blueprint(&text, BlueprintFormat::from_path(path))
        .unwrap_or_else(|e| fatal(&e.to_string()));
    if let Err(e) = validate_blueprint(&bp) {
        fatal(&format!("invalid blueprint: {}", e));
    }
    bp
}

/// Register and resolve every person, exiting with 1 on a dangling reference.
fn resolve(bp: &Blueprint) -> Registry {
    let mut registry = Registry::from_blueprint(bp);
    if let Err(e) = registry.resolve() {
        failed(&e);
    }
    registry
}

/// Read the full contents of a file, or stdin when the path is `"-"`.
fn read_input(path: &Path) -> String {
    if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|e| fatal(&format!("failed to read stdin: {}", e)));
        buf
    } else {
        fs::read_to_string(path).unwrap_or_else(|e| {
            fatal(&format!("failed to read {}: {}", path.display(), e))
        })
    }
}

/// Print a generation failure to stderr and exit with code 1.
fn failed(e: &dyn std::error::Error) -> ! {
    eprintln!("soliddata: {}", e);
    process::exit(1);
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("soliddata: {}", msg);
    process::exit(2);
}
