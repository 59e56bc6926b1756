use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for emsclock
/// CLI client for EMS attendance tracking, offline-first
#[derive(Parser)]
#[command(
    name = "emsclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple attendance CLI: clock in and out against an EMS server, queue offline, sync later",
    long_about = None
)]
pub struct Cli {
    /// Override state database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the EMS API base URL
    #[arg(global = true, long = "api", value_name = "URL")]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and local state database
    Init {
        #[arg(long = "employee-id", help = "Employee id records are filed under")]
        employee_id: Option<String>,

        #[arg(long = "name", help = "Employee display name")]
        name: Option<String>,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Clock in for today
    In {
        /// Clock-in time (HH:MM or HH:MM:SS, default: now)
        #[arg(long = "at", value_name = "TIME")]
        at: Option<String>,
    },

    /// Clock out and record the worked duration
    Out {
        /// Clock-out time (HH:MM or HH:MM:SS, default: now)
        #[arg(long = "at", value_name = "TIME")]
        at: Option<String>,
    },

    /// Show today's attendance state and pending sync work
    Status,

    /// Replay queued records against the server
    Sync,

    /// Stay running: sync and check for day rollover on an interval
    Watch,

    /// List attendance records
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, help = "List everything, no period filter")]
        all: bool,
    },

    /// Export attendance data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            short,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        period: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// List employees from the directory
    Employees,

    /// List departments from the directory
    Departments,

    /// List, request or cancel leave
    Leave {
        #[arg(long, help = "List your leave requests (the default)")]
        list: bool,

        #[arg(long, help = "Submit a new leave request")]
        request: bool,

        #[arg(
            long = "type",
            value_name = "TYPE",
            help = "Leave type: vacation, sick, personal, maternity, paternity"
        )]
        leave_type: Option<String>,

        #[arg(long, value_name = "DATE", help = "First day of leave (YYYY-MM-DD)")]
        from: Option<String>,

        #[arg(long, value_name = "DATE", help = "Last day of leave (YYYY-MM-DD)")]
        to: Option<String>,

        #[arg(long, help = "Reason for the request")]
        reason: Option<String>,

        #[arg(long, value_name = "ID", help = "Cancel a pending request by id")]
        cancel: Option<String>,
    },
}
