use clap::{Parser, Subcommand};
use kitchensink::config::{self, BotSettings, LoggerConfig};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "linebot")]
#[command(about = "Kitchen-sink LINE bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Create the configuration directory and default files (config, log directory, static asset directories).
    Init {
        /// Config file path (default: LINEBOT_CONFIG_PATH or ~/.kitchensink/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Print the resolved configuration (env overrides applied, secrets masked).
    Config {
        /// Config file path (default: LINEBOT_CONFIG_PATH or ~/.kitchensink/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Run the webhook gateway (POST /callback). Logs go to settings.logger.path when set.
    Gateway {
        /// Config file path (default: LINEBOT_CONFIG_PATH or ~/.kitchensink/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,

        /// HTTP port (default from config or 8080)
        #[arg(long, short)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("linebot {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Init { config }) => {
            init_stderr_logging("info");
            if let Err(e) = run_init(config) {
                log::error!("init failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Config { config }) => {
            init_stderr_logging("warn");
            if let Err(e) = run_show_config(config) {
                log::error!("config failed: {:#}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Gateway { config, port }) => {
            if let Err(e) = run_gateway(config, port).await {
                log::error!("gateway failed: {:#}", e);
                eprintln!("gateway failed: {:#}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("Run with --help for usage");
        }
    }
}

fn init_stderr_logging(default_filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

/// Log lines carry the configured logger name; output goes to the configured file, or stderr when unset or unwritable.
fn init_logging(logger: &LoggerConfig, config_path: &Path) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    let name = logger.name.clone();
    builder.format(move |buf, record| {
        writeln!(
            buf,
            "[{} {} {}] {}: {}",
            buf.timestamp(),
            name,
            record.level(),
            record.target(),
            record.args()
        )
    });
    if let Some(ref path) = logger.path {
        let path = config::resolve_relative(config_path, path);
        match open_log_file(&path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("cannot open log file {}: {}; logging to stderr", path.display(), e);
            }
        }
    }
    builder.init();
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::OpenOptions::new().create(true).append(true).open(path)
}

fn run_init(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(config::default_config_path);
    let dir = kitchensink::init::init_config_dir(&path)?;
    println!("initialized configuration at {}", dir.display());
    Ok(())
}

fn run_show_config(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let (config, path) = config::load_config(config_path)?;
    let bot = BotSettings::from_env(&config);
    let out = serde_json::json!({
        "configPath": path.display().to_string(),
        "settings": {
            "displayErrorDetails": config.settings.display_error_details,
            "logger": {
                "name": config.settings.logger.name,
                "path": config.settings.logger.path
                    .as_ref()
                    .map(|p| config::resolve_relative(&path, p).display().to_string()),
            },
            "bot": {
                "channelToken": config::mask_secret(&bot.channel_token),
                "channelSecret": config::mask_secret(&bot.channel_secret),
            },
            "apiEndpointBase": bot.api_endpoint_base
                .as_deref()
                .unwrap_or(kitchensink::line::DEFAULT_API_ENDPOINT_BASE),
        },
        "server": serde_json::to_value(&config.server)?,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

async fn run_gateway(config_path: Option<PathBuf>, port: Option<u16>) -> anyhow::Result<()> {
    let (mut config, path) = config::load_config(config_path)?;
    init_logging(&config.settings.logger, &path);
    if let Some(p) = port {
        config.server.port = p;
    }
    log::info!("starting gateway on {}:{}", config.server.bind, config.server.port);
    kitchensink::gateway::run_gateway(config, path).await
}
