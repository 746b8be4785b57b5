use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use layout_parity::cmd;
use layout_parity::cmd::snapshot::SnapshotArgs;
use layout_parity::snapshot::ElementQuery;
use std::process;

/// CSS box-model parity checker
///
/// layout-parity extracts content and border boxes from captured layouts,
/// compares a subject engine against a reference browser within a pixel
/// tolerance, and snapshots whole documents for element-by-element diffing.
#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a subject box description against a reference
    Compare {
        /// Subject box description (JSON)
        subject: String,

        /// Reference box description (JSON)
        reference: String,

        /// Comparison report to write (JSON)
        output: String,

        /// Allowed difference in pixels (overrides config)
        #[arg(short, long)]
        tolerance: Option<f64>,

        /// Exit non-zero when either box differs beyond tolerance
        #[arg(long)]
        fail_on_mismatch: bool,
    },

    /// Extract one element's box description from a captured document
    Extract {
        /// Captured document (JSON)
        document: String,

        /// Box description to write (JSON)
        output: String,

        /// Element to extract: first-body-child or id:<id>
        #[arg(long)]
        target: Option<String>,
    },

    /// Walk a captured document and write a structured snapshot
    Snapshot {
        /// Captured document (JSON)
        document: String,

        /// Record full resolved styles
        #[arg(long)]
        styles: bool,

        /// Record page rectangles (default unless --styles is given)
        #[arg(long)]
        rects: bool,

        /// Tag to leave out of the snapshot (repeatable, overrides config)
        #[arg(long = "skip-tag", value_name = "TAG")]
        skip_tags: Vec<String>,

        /// Maximum characters of text content (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        text_limit: Option<u64>,

        /// Snapshot file to write
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Look up elements in a snapshot file
    Inspect {
        /// Snapshot file (JSON)
        snapshot: String,

        /// Tag name, case-insensitive
        #[arg(long)]
        tag: Option<String>,

        /// One of the element's classes
        #[arg(long)]
        class: Option<String>,

        /// Exact id
        #[arg(long)]
        id: Option<String>,

        /// Substring of the element's text
        #[arg(long)]
        text: Option<String>,

        /// Substring of the parent's class attribute
        #[arg(long)]
        parent_class: Option<String>,

        /// Maximum number of matches printed
        #[arg(short, long, default_value_t = cmd::inspect::DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Compare two rect snapshots element by element
    DiffSnapshots {
        /// Subject snapshot (JSON)
        subject: String,

        /// Reference snapshot (JSON)
        reference: String,

        /// Allowed difference in pixels (overrides config)
        #[arg(short, long)]
        tolerance: Option<f64>,

        /// Diff report to write
        #[arg(short, long)]
        output: Option<String>,

        /// Exit non-zero when any paired element differs beyond tolerance
        #[arg(long)]
        fail_on_mismatch: bool,
    },

    /// Convert a subject engine's layout dump into JSON content boxes
    ImportDump {
        /// Layout dump (text)
        dump: String,

        /// Content boxes to write (JSON)
        output: String,
    },

    /// Initialize layout-parity configuration
    Init,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    if cli.no_emoji {
        layout_parity::fmt::disable_emoji();
    }

    let result = match cli.command {
        Some(Commands::Compare {
            subject,
            reference,
            output,
            tolerance,
            fail_on_mismatch,
        }) => cmd::cmd_compare(&subject, &reference, &output, tolerance, fail_on_mismatch),
        Some(Commands::Extract {
            document,
            output,
            target,
        }) => cmd::cmd_extract(&document, &output, target.as_deref()),
        Some(Commands::Snapshot {
            document,
            styles,
            rects,
            skip_tags,
            text_limit,
            output,
        }) => cmd::cmd_snapshot(
            &document,
            &SnapshotArgs {
                styles,
                rects,
                skip_tags,
                text_limit: text_limit.map(|limit| limit as usize),
                output,
            },
        ),
        Some(Commands::Inspect {
            snapshot,
            tag,
            class,
            id,
            text,
            parent_class,
            limit,
        }) => cmd::cmd_inspect(
            &snapshot,
            &ElementQuery {
                tag,
                class,
                id,
                text,
                parent_class,
            },
            limit,
        ),
        Some(Commands::DiffSnapshots {
            subject,
            reference,
            tolerance,
            output,
            fail_on_mismatch,
        }) => cmd::cmd_diff_snapshots(
            &subject,
            &reference,
            tolerance,
            output.as_deref(),
            fail_on_mismatch,
        ),
        Some(Commands::ImportDump { dump, output }) => cmd::cmd_import_dump(&dump, &output),
        Some(Commands::Init) => cmd::cmd_init(),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(shell, &mut Cli::command());
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("layout-parity v{}", env!("CARGO_PKG_VERSION"));
            println!("CSS box-model parity checker\n");
            println!("Usage: layout-parity <COMMAND>\n");
            println!("Commands:");
            println!("  compare         Compare a subject box description against a reference");
            println!("  extract         Extract one element's box description");
            println!("  snapshot        Walk a captured document and write a snapshot");
            println!("  inspect         Look up elements in a snapshot file");
            println!("  diff-snapshots  Compare two rect snapshots element by element");
            println!("  import-dump     Convert a layout dump into JSON content boxes");
            println!("  init            Initialize layout-parity configuration");
            println!("\nRun 'layout-parity <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use layout_parity::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
