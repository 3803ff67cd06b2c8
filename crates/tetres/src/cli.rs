//! Clap derive structures for the `tetres` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tetres -- administer TeTRES traffic-data records from the command line
#[derive(Debug, Parser)]
#[command(
    name = "tetres",
    version,
    about = "Manage TeTRES special events, work zones and snow data",
    long_about = "Command-line client for the TeTRES admin API.\n\n\
        Lists, inserts, updates and deletes the records the travel-time\n\
        reliability server uses to classify its data, and triggers the\n\
        server's pending-action processing.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "TETRES_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server base URL (overrides profile)
    #[arg(long, short = 's', env = "TETRES_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TETRES_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "TETRES_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "TETRES_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage special events (games, concerts, fairs)
    #[command(alias = "se")]
    SpecialEvents(SpecialEventsArgs),

    /// Manage work zones
    #[command(alias = "wz")]
    WorkZones(WorkZonesArgs),

    /// Manage work-zone groups (construction projects)
    #[command(alias = "wzg")]
    WorkZoneGroups(WorkZoneGroupsArgs),

    /// Manage travel-time reliability routes
    #[command(alias = "rr")]
    ReliabilityRoutes(ReliabilityRoutesArgs),

    /// Manage snow events
    SnowEvents(SnowEventsArgs),

    /// Manage snow routes
    SnowRoutes(SnowRoutesArgs),

    /// Manage lane lost/regain records of snow events
    #[command(alias = "snm")]
    SnowManagement(SnowManagementArgs),

    /// Inspect and process pending server actions
    #[command(alias = "log")]
    ActionLogs(ActionLogsArgs),

    /// Show or change the server configuration
    #[command(alias = "sys")]
    SystemConfig(SystemConfigArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared record commands ───────────────────────────────────────────

/// Commands every record kind accepts. Kinds whose server does not offer
/// an operation report it as unsupported.
#[derive(Debug, Subcommand)]
pub enum RecordCommand {
    /// List the years that have records
    Years,

    /// Show one record by id or name
    Get {
        /// Record id
        #[arg(required_unless_present = "name")]
        id: Option<i64>,

        /// Look up by name instead of id
        #[arg(long, conflicts_with = "id")]
        name: Option<String>,
    },

    /// Create a record from a JSON file
    Insert {
        /// JSON document describing the record
        #[arg(long, short = 'f')]
        file: PathBuf,

        /// JSON route sent along with the record (work zones)
        #[arg(long)]
        route: Option<PathBuf>,
    },

    /// Create many records from a JSON array file
    InsertAll {
        /// JSON array of records
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Replace a record with the contents of a JSON file
    Update {
        /// Id of the record to replace
        id: i64,

        /// JSON document with the new contents
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Delete records
    #[command(alias = "rm")]
    Delete {
        /// Ids of the records to delete
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

// ── Special events ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SpecialEventsArgs {
    #[command(subcommand)]
    pub command: SpecialEventsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SpecialEventsCommand {
    /// List special events, optionally of one year
    #[command(alias = "ls")]
    List {
        /// Only events of this year
        #[arg(long)]
        year: Option<i32>,
    },

    #[command(flatten)]
    Record(RecordCommand),
}

// ── Work zones ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WorkZonesArgs {
    #[command(subcommand)]
    pub command: WorkZonesCommand,
}

#[derive(Debug, Subcommand)]
pub enum WorkZonesCommand {
    /// List the work zones of one group
    #[command(alias = "ls")]
    List {
        /// Work-zone group id
        #[arg(long, short = 'g')]
        group: i64,
    },

    #[command(flatten)]
    Record(RecordCommand),
}

// ── Work zone groups ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WorkZoneGroupsArgs {
    #[command(subcommand)]
    pub command: WorkZoneGroupsCommand,
}

#[derive(Debug, Subcommand)]
pub enum WorkZoneGroupsCommand {
    /// List work-zone groups, optionally of one year
    #[command(alias = "ls")]
    List {
        /// Only groups with work zones in this year
        #[arg(long)]
        year: Option<i32>,
    },

    #[command(flatten)]
    Record(RecordCommand),
}

// ── Reliability routes ───────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReliabilityRoutesArgs {
    #[command(subcommand)]
    pub command: ReliabilityRoutesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReliabilityRoutesCommand {
    /// List reliability routes
    #[command(alias = "ls")]
    List,

    /// Show the route running the opposite direction
    Opposite {
        /// Id of the route to reverse
        id: i64,
    },

    #[command(flatten)]
    Record(RecordCommand),
}

// ── Snow events ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SnowEventsArgs {
    #[command(subcommand)]
    pub command: SnowEventsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SnowEventsCommand {
    /// List snow events, optionally of one year
    #[command(alias = "ls")]
    List {
        /// Only events of this year
        #[arg(long)]
        year: Option<i32>,
    },

    #[command(flatten)]
    Record(RecordCommand),
}

// ── Snow routes ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SnowRoutesArgs {
    #[command(subcommand)]
    pub command: SnowRoutesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SnowRoutesCommand {
    /// List snow routes
    #[command(alias = "ls")]
    List,

    #[command(flatten)]
    Record(RecordCommand),
}

// ── Snow management ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SnowManagementArgs {
    #[command(subcommand)]
    pub command: SnowManagementCommand,
}

#[derive(Debug, Subcommand)]
pub enum SnowManagementCommand {
    /// List lane lost/regain records
    #[command(alias = "ls")]
    List {
        /// Only records of this snow event
        #[arg(long)]
        snow_event: Option<i64>,
    },

    #[command(flatten)]
    Record(RecordCommand),
}

// ── Action logs ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ActionLogsArgs {
    #[command(subcommand)]
    pub command: ActionLogsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ActionLogsCommand {
    /// List the most recent actions
    #[command(alias = "ls")]
    List {
        /// Number of entries to fetch
        #[arg(long, short = 'l', default_value = "100")]
        limit: u32,

        /// Only entries the server has not handled yet
        #[arg(long)]
        pending: bool,
    },

    /// Ask the server to process pending actions now
    Proceed,
}

// ── System config ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SystemConfigArgs {
    #[command(subcommand)]
    pub command: SystemConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum SystemConfigCommand {
    /// Show the server configuration
    Show,

    /// Replace the server configuration with a JSON file
    Set {
        /// JSON document with the full configuration
        #[arg(long, short = 'f')]
        file: PathBuf,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the configuration file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to make default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
