use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "paintstock",
    version,
    about = "terminal client for a remote paint catalog",
    long_about = "Paintstock is a terminal CRUD client for a paint catalog exposed as a REST resource.\n\nExamples:\n  paintstock list\n  paintstock list --brand rex\n  paintstock add --brand Rex --price 120 --color '#ff0000' --quantity 4\n  paintstock stats\n  paintstock export\n\nTip: Use ~/.paintstock/config.yml to persist the endpoint and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'e',
        long = "ep",
        visible_alias = "endpoint",
        value_name = "URL",
        global = true,
        help_heading = "HTTP",
        help = "Base URL of the remote paint resource."
    )]
    pub endpoint: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        global = true,
        help_heading = "HTTP",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        global = true,
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.paintstock/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        global = true,
        help_heading = "Output",
        help = "Write the rendered listing to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        global = true,
        help_heading = "Output",
        help = "Listing format (table, csv, json)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        global = true,
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help_heading = "Output",
        help = "Suppress the busy spinner and summary lines."
    )]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch the catalog and render it.
    List {
        #[arg(
            short = 'b',
            long = "brand",
            value_name = "NEEDLE",
            help = "Keep only brands containing this substring (case-insensitive)."
        )]
        brand: Option<String>,
    },

    /// Create a new paint; the server assigns the id.
    Add {
        #[arg(long = "brand", value_name = "NAME")]
        brand: String,
        #[arg(long = "price", value_name = "PRICE")]
        price: f64,
        #[arg(long = "color", value_name = "HEX", help = "Color as #rrggbb.")]
        color: String,
        #[arg(long = "quantity", value_name = "N")]
        quantity: u32,
    },

    /// Replace every field of an existing paint.
    Update {
        #[arg(value_name = "ID")]
        id: u64,
        #[arg(long = "brand", value_name = "NAME")]
        brand: String,
        #[arg(long = "price", value_name = "PRICE")]
        price: f64,
        #[arg(long = "color", value_name = "HEX", help = "Color as #rrggbb.")]
        color: String,
        #[arg(long = "quantity", value_name = "N")]
        quantity: u32,
    },

    /// Delete a paint by id.
    Remove {
        #[arg(value_name = "ID")]
        id: u64,
        #[arg(short = 'y', long = "yes", help = "Skip the confirmation prompt.")]
        yes: bool,
    },

    /// Average price over the catalog, optionally filtered by brand.
    Average {
        #[arg(
            short = 'b',
            long = "brand",
            value_name = "NEEDLE",
            help = "Average only brands containing this substring."
        )]
        brand: Option<String>,
    },

    /// Statistics panel: totals, top brand, priciest paint, per-brand averages.
    Stats,

    /// Export the catalog as CSV.
    Export {
        #[arg(value_name = "FILE", help = "Destination file (defaults to pinturas.csv).")]
        file: Option<String>,
    },

    /// Show or change the persisted theme.
    Theme {
        #[arg(
            value_name = "VALUE",
            help = "light, dark, or toggle; omit to print the current theme."
        )]
        value: Option<String>,
    },

    /// Write the default config file scaffold.
    Init,
}
