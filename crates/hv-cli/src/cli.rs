//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use hv_core::{ClientId, Period, ProjectId, UserFilter, UserId};

/// Reports over a Harvest time-tracking account.
///
/// Lists active or inactive clients, projects and users, running timers,
/// project tasks and time entries.
#[derive(Debug, Parser)]
#[command(name = "hv", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List active clients.
    Clients {
        /// List inactive clients instead.
        #[arg(long)]
        inactive: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List active projects, optionally for one client.
    Projects {
        /// Only projects of this client.
        #[arg(long)]
        client: Option<ClientId>,

        /// List inactive projects instead.
        #[arg(long)]
        inactive: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List users by status and role.
    Users {
        #[arg(long, value_enum, default_value_t = UserSelection::Active)]
        filter: UserSelection,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show running timers for today.
    Timers {
        /// Only this user's timer.
        #[arg(long)]
        user: Option<UserId>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the tasks assigned to a project.
    Tasks {
        #[arg(long)]
        project: ProjectId,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List a user's time entries over a period.
    Entries {
        #[arg(long)]
        user: UserId,

        #[arg(long, value_enum, default_value_t = PeriodArg::Today)]
        period: PeriodArg,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// User groups selectable with `users --filter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UserSelection {
    Active,
    Inactive,
    Admins,
    ActiveAdmins,
    InactiveAdmins,
    Contractors,
    ActiveContractors,
    InactiveContractors,
}

impl From<UserSelection> for UserFilter {
    fn from(selection: UserSelection) -> Self {
        match selection {
            UserSelection::Active => Self::Active,
            UserSelection::Inactive => Self::Inactive,
            UserSelection::Admins => Self::Admins,
            UserSelection::ActiveAdmins => Self::ActiveAdmins,
            UserSelection::InactiveAdmins => Self::InactiveAdmins,
            UserSelection::Contractors => Self::Contractors,
            UserSelection::ActiveContractors => Self::ActiveContractors,
            UserSelection::InactiveContractors => Self::InactiveContractors,
        }
    }
}

/// Periods selectable with `entries --period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    Today,
    Week,
    LastWeek,
    Month,
    LastMonth,
}

impl From<PeriodArg> for Period {
    fn from(period: PeriodArg) -> Self {
        match period {
            PeriodArg::Today => Self::Today,
            PeriodArg::Week => Self::ThisWeek,
            PeriodArg::LastWeek => Self::LastWeek,
            PeriodArg::Month => Self::ThisMonth,
            PeriodArg::LastMonth => Self::LastMonth,
        }
    }
}
