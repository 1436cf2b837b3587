pub mod toml_config;

pub use toml_config::RosterConfig;

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand, ValueEnum};

#[cfg(feature = "cli")]
use crate::domain::model::{AccessLevel, Role};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "badge-roster")]
#[command(about = "Manage the persons that access badges are printed for")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override store.data_dir from the configuration
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the persisted persons
    List,
    /// Add one person and save it
    Add(AddArgs),
    /// Parse a JSON or CSV file of persons
    Import {
        file: String,
        /// Stage the parsed persons and save them
        #[arg(long)]
        commit: bool,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long, value_enum, default_value = "trainee")]
    pub role: RoleArg,
    #[arg(long, value_enum, default_value = "visitor")]
    pub access_level: AccessLevelArg,
    #[arg(long)]
    pub email: Option<String>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    TechnicalOfficer,
    Instructor,
    Trainee,
    Visitor,
}

#[cfg(feature = "cli")]
impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::TechnicalOfficer => Role::TechnicalOfficer,
            RoleArg::Instructor => Role::Instructor,
            RoleArg::Trainee => Role::Trainee,
            RoleArg::Visitor => Role::Visitor,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AccessLevelArg {
    Visitor,
    Standard,
    Elevated,
}

#[cfg(feature = "cli")]
impl From<AccessLevelArg> for AccessLevel {
    fn from(value: AccessLevelArg) -> Self {
        match value {
            AccessLevelArg::Visitor => AccessLevel::Visitor,
            AccessLevelArg::Standard => AccessLevel::Standard,
            AccessLevelArg::Elevated => AccessLevel::Elevated,
        }
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file (or defaults) and applies command-line overrides.
    pub fn resolve(&self) -> crate::utils::error::Result<RosterConfig> {
        let mut config = match &self.config {
            Some(path) => RosterConfig::from_file(path)?,
            None => RosterConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.store.data_dir = data_dir.clone();
        }

        Ok(config)
    }
}
