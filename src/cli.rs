//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{self, Context};
use crate::core::render::{OutputFormat, RenderConfig};

/// quickrun - icon catalog and quick-run shortcut bar for runnable items.
#[derive(Parser, Debug)]
#[command(name = "quickrun")]
#[command(
    author,
    version,
    about,
    long_about = r#"quickrun discovers icons from the built-in table, run-configuration kinds
and plugin resources, lets you attach one to each runnable item, and computes
the shortcut bar from your configured items.

The workspace lives under ROOT/.quickrun/:
- workspace.json: runnable items and kinds (stands in for the IDE)
- config.json: resource roots and icon settings (optional)
- quick_run.json: saved selections and bar items (written by quickrun)

Every command prints records in the selected format (default: jsonl).

Examples:
    quickrun catalog --filter run
    quickrun catalog --complete
    quickrun select Application Main Actions.Execute
    quickrun items set Application Main --display-name "Main"
    quickrun bar
"#
)]
pub struct Cli {
    /// Workspace root.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Workspace root (defaults to the current directory).\n\n\
State is read from and written to ROOT/.quickrun/, and relative resource paths\n\
in config.json are interpreted relative to it."
    )]
    pub root: PathBuf,

    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for records. md groups records by kind;\n\
raw prints one key (or name) per line."
    )]
    pub format: OutputFormat,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output in markdown and in diagnostics on stderr."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Only log errors to stderr. Records are still printed to stdout."
    )]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Log debug diagnostics to stderr, including icon resolution failures\n\
and catalog build timings. RUST_LOG takes precedence when set."
    )]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on md/raw formats."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the icon catalog.
    #[command(
        long_about = "List every discoverable icon: the two fixed entries (default icon, choose\n\
custom file) followed by all others sorted by display name.\n\n\
Without --complete only the cheap sources are scanned: the built-in table, the\n\
kinds in workspace.json and the own plugin resources. --complete also scans\n\
extra_resources from config.json.\n\n\
Examples:\n\
  quickrun catalog\n\
  quickrun catalog --complete --filter debug\n"
    )]
    Catalog {
        /// Run the complete build and wait for it.
        #[arg(long)]
        complete: bool,

        /// Case-insensitive substring filter on display names.
        #[arg(long, value_name = "TEXT")]
        filter: Option<String>,
    },

    /// Resolve a catalog key to an icon.
    #[command(
        long_about = "Turn a catalog key into the selection that would be stored for it and\n\
resolve that selection back to an icon.\n\n\
The \"file:CHOOSE\" key needs --file.\n\n\
Examples:\n\
  quickrun resolve Actions.Execute\n\
  quickrun resolve plugin:com.dilongdann.quickrun::/icons/run.svg\n\
  quickrun resolve file:CHOOSE --file art/logo.png\n"
    )]
    Resolve {
        /// Catalog key.
        #[arg(value_name = "KEY", allow_hyphen_values = true)]
        key: String,

        /// Image file used for the choose-file key.
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Attach an icon to a runnable item.
    #[command(
        long_about = "Store the icon selection for the runnable item TYPE_ID::NAME.\n\n\
Pass an empty KEY (\"\") to go back to the default icon.\n\n\
Examples:\n\
  quickrun select Application Main Actions.Execute\n\
  quickrun select Application Main file:CHOOSE --file art/logo.svg\n\
  quickrun select Application Main \"\"\n"
    )]
    Select {
        #[arg(value_name = "TYPE_ID")]
        type_id: String,

        #[arg(value_name = "NAME")]
        name: String,

        /// Catalog key.
        #[arg(value_name = "KEY", allow_hyphen_values = true)]
        key: String,

        /// Image file used for the choose-file key.
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Manage the configured shortcut-bar items.
    Items {
        #[command(subcommand)]
        action: ItemsCommands,
    },

    /// Print the effective shortcut bar.
    #[command(
        long_about = "Print one action per enabled configured item that still exists in the\n\
workspace, in configured order, followed by the edit action."
    )]
    Bar,

    /// Run a runnable item by name.
    #[command(
        long_about = "Execute the command of the runnable item NAME from workspace.json.\n\
Names are matched ignoring case."
    )]
    Run {
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemsCommands {
    /// List editor rows: saved items, then live items not saved yet.
    List,

    /// Add or update a configured item.
    Set {
        #[arg(value_name = "TYPE_ID")]
        type_id: String,

        #[arg(value_name = "NAME")]
        name: String,

        /// Label shown on the bar instead of the item name (blank clears it).
        #[arg(long, value_name = "TEXT")]
        display_name: Option<String>,

        /// Show the item on the bar (default).
        #[arg(long, conflicts_with = "disabled")]
        enabled: bool,

        /// Keep the item configured but hidden.
        #[arg(long)]
        disabled: bool,
    },

    /// Toggle whether the bar shows the item's label.
    ShowName {
        #[arg(value_name = "TYPE_ID")]
        type_id: String,

        #[arg(value_name = "NAME")]
        name: String,

        #[arg(value_name = "SHOW", action = ArgAction::Set)]
        show: bool,
    },

    /// Move an editor row.
    #[command(
        long_about = "Move the editor row at FROM to the drop position TO (0-based). TO is an\n\
insertion index into the list before the move, so moving a row down by one\n\
means TO = FROM + 2.\n\n\
All rows, including live items not saved yet, are saved afterwards."
    )]
    Move {
        #[arg(value_name = "FROM")]
        from: usize,

        #[arg(value_name = "TO")]
        to: usize,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    crate::logging::init(cli.quiet, cli.verbose, !cli.no_color);

    let render_config = RenderConfig {
        format: cli.format,
        pretty: cli.pretty,
        color: !cli.no_color,
    };
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or(cli.root);
    let ctx = Context::load(&root, render_config)?;

    match cli.command {
        Commands::Catalog { complete, filter } => {
            commands::run_catalog(&ctx, complete, filter.as_deref())
        }

        Commands::Resolve { key, file } => commands::run_resolve(&ctx, &key, file),

        Commands::Select {
            type_id,
            name,
            key,
            file,
        } => commands::run_select(&ctx, &type_id, &name, &key, file),

        Commands::Items { action } => match action {
            ItemsCommands::List => commands::run_items_list(&ctx),
            ItemsCommands::Set {
                type_id,
                name,
                display_name,
                enabled: _,
                disabled,
            } => commands::run_items_set(&ctx, &type_id, &name, display_name, !disabled),
            ItemsCommands::ShowName {
                type_id,
                name,
                show,
            } => commands::run_items_show_name(&ctx, &type_id, &name, show),
            ItemsCommands::Move { from, to } => commands::run_items_move(&ctx, from, to),
        },

        Commands::Bar => commands::run_bar(&ctx),

        Commands::Run { name } => commands::run_item(&ctx, &name),
    }
}
