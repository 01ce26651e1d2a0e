use crate::core::report::{ReportFormat, ReportWindow};
use crate::export::{ExportEntity, ExportFormat};
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for paperlab
/// Quality-control log for a paper-mill lab, stored in SQLite
#[derive(Parser)]
#[command(
    name = "paperlab",
    version = env!("CARGO_PKG_VERSION"),
    about = "Paper-mill lab log: paper, pulp and material records with roll-aligned charts",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Previously used responsible persons, amounts and brands
    Suggest {
        #[arg(long, help = "Print as JSON")]
        json: bool,
    },

    /// Manage the material catalog
    Material {
        #[command(subcommand)]
        action: MaterialAction,
    },

    /// Manage paper quality records
    Paper {
        #[command(subcommand)]
        action: PaperAction,
    },

    /// Manage pulp (headbox) samples
    Pulp {
        #[command(subcommand)]
        action: PulpAction,
    },

    /// Build a roll-aligned chart report
    Report {
        #[arg(
            long,
            short = 'm',
            help = "summary, technical, materials or a YAML manifest path (default from config)"
        )]
        manifest: Option<String>,

        #[arg(long, short = 'g', help = "Only the series of this manifest group")]
        group: Option<String>,

        #[arg(long, value_enum, default_value = "table")]
        format: ReportFormat,

        #[arg(long, value_enum, help = "Only records created in this trailing window")]
        window: Option<ReportWindow>,

        #[arg(long, value_name = "FILE", help = "Write to a file instead of stdout")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export one record table
    Export {
        #[arg(long, value_enum)]
        entity: ExportEntity,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute output path")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum MaterialAction {
    /// Add a material to the catalog
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Rename a material or change its description
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, help = "New description (empty string removes it)")]
        description: Option<String>,
    },

    /// List the catalog
    List,

    /// Delete a material
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

/// Paper fields shared by `paper add` and `paper edit`.
#[derive(Args, Debug, Clone, Default)]
pub struct PaperArgs {
    #[arg(long, help = "Sampling date (YYYY-MM-DD)")]
    pub date: Option<String>,

    #[arg(long = "start", help = "Sampling start time (HH:MM)")]
    pub start: Option<String>,

    #[arg(long = "end", help = "Sampling end time (HH:MM)")]
    pub end: Option<String>,

    #[arg(long = "roll", help = "Roll number")]
    pub roll: Option<String>,

    #[arg(long = "person", help = "Responsible person (default from config on add)")]
    pub person: Option<String>,

    #[arg(long, help = "day or night (D/N)")]
    pub shift: Option<String>,

    #[arg(long = "type", help = "test_liner, float, white_top_test_liner (tl/f/wt)")]
    pub paper_type: Option<String>,

    #[arg(long, help = "Grammage profile 1..5")]
    pub profile: Option<String>,

    #[arg(long = "burst", help = "Burst test result (free text)")]
    pub burst: Option<String>,

    #[arg(long = "tearing-time")]
    pub tearing_time: Option<String>,

    #[arg(long = "calender", help = "Whether the calender was applied (true/false)")]
    pub calender: Option<bool>,

    #[arg(
        long = "set",
        value_name = "FIELD=VALUE",
        help = "Numeric reading, e.g. --set humidity=7.5 (repeatable)"
    )]
    pub set: Vec<String>,

    #[arg(
        long = "usage",
        value_name = "ID=AMOUNT[:BRAND[:NOTE]]",
        help = "Material usage, e.g. --usage 3=12.5:Acme (repeatable)"
    )]
    pub usage: Vec<String>,
}

#[derive(Subcommand)]
pub enum PaperAction {
    /// Record a paper sample
    Add {
        #[command(flatten)]
        fields: PaperArgs,
    },

    /// Change fields of a paper record
    Edit {
        id: i64,

        #[command(flatten)]
        fields: PaperArgs,

        #[arg(long = "drop-usage", value_name = "ID", help = "Remove a material from the usage")]
        drop_usage: Vec<String>,
    },

    /// Show one record with all its readings
    Show { id: i64 },

    /// List paper records
    List {
        #[arg(long, short = 's', help = "Match roll number, person or date")]
        search: Option<String>,

        #[arg(long)]
        shift: Option<String>,

        #[arg(long = "type")]
        paper_type: Option<String>,

        #[arg(long, help = "Sort column, '-' prefix for descending (default -created_at)")]
        sort: Option<String>,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Delete a paper record
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PulpArgs {
    #[arg(long = "roll", help = "Roll number (empty string detaches the sample)")]
    pub roll: Option<String>,

    #[arg(long = "time", help = "Lower sampling time (HH:MM)")]
    pub time: Option<String>,

    #[arg(
        long = "set",
        value_name = "FIELD=VALUE",
        help = "Numeric reading, e.g. --set upper_ph=7.2 (repeatable)"
    )]
    pub set: Vec<String>,
}

#[derive(Subcommand)]
pub enum PulpAction {
    /// Record a pulp sample
    Add {
        #[command(flatten)]
        fields: PulpArgs,
    },

    /// Change fields of a pulp sample
    Edit {
        id: i64,

        #[command(flatten)]
        fields: PulpArgs,
    },

    /// Show one sample
    Show { id: i64 },

    /// List pulp samples
    List {
        #[arg(long, short = 's', help = "Match roll number")]
        search: Option<String>,

        #[arg(long)]
        sort: Option<String>,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Delete a pulp sample
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
