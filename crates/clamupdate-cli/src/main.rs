mod cmd;
mod logging;
mod output;

use clamupdate_core::{paths, InvocationContext, JobConfig};
use clap::{Parser, Subcommand};
use logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "clamupdate",
    about = "Refresh ClamAV virus definitions on a shared volume using freshclam",
    version,
    propagate_version = true
)]
struct Cli {
    /// Mount root of the shared definitions volume
    #[arg(long, global = true, env = paths::ENV_MOUNT_PATH)]
    mount_path: Option<String>,

    /// Definitions directory, relative to the mount root
    #[arg(long, global = true, env = paths::ENV_DEF_PATH)]
    definitions_path: Option<String>,

    /// freshclam configuration file (created with defaults if absent)
    #[arg(long, global = true, env = paths::ENV_CONFIG_FILE)]
    config_file: Option<String>,

    /// freshclam executable name or path
    #[arg(long, global = true, env = paths::ENV_FRESHCLAM)]
    freshclam: Option<String>,

    /// Unprivileged user freshclam switches to (default: current user)
    #[arg(long, global = true, env = paths::ENV_USER)]
    user: Option<String>,

    /// Log line format
    #[arg(
        long,
        global = true,
        env = "CLAMUPDATE_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Json
    )]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one update for a single trigger event
    Run {
        /// Trigger event as JSON (default: {})
        #[arg(long)]
        event: Option<String>,

        /// Correlation id for log lines (default: random UUID)
        #[arg(long)]
        request_id: Option<String>,

        /// Name of the invoking function, logged with the event
        #[arg(long)]
        function_name: Option<String>,
    },

    /// Serve newline-delimited JSON events from stdin, one update per line
    Serve,
}

impl Cli {
    /// Flags and environment feed the same lookup the library uses.
    fn job_config(&self) -> clamupdate_core::Result<JobConfig> {
        JobConfig::from_lookup(|key| match key {
            paths::ENV_MOUNT_PATH => self.mount_path.clone(),
            paths::ENV_DEF_PATH => self.definitions_path.clone(),
            paths::ENV_CONFIG_FILE => self.config_file.clone(),
            paths::ENV_FRESHCLAM => self.freshclam.clone(),
            paths::ENV_USER => self.user.clone(),
            _ => None,
        })
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    let init = || cli.job_config();

    let result = match &cli.command {
        Commands::Run {
            event,
            request_id,
            function_name,
        } => {
            let mut context = match request_id {
                Some(id) => InvocationContext::new(id.clone()),
                None => InvocationContext::default(),
            };
            if let Some(name) = function_name {
                context = context.with_function_name(name.clone());
            }
            cmd::run::run(&init, event.as_deref(), context)
        }
        Commands::Serve => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            cmd::serve::run(&init, stdin.lock(), &mut stdout)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
