//! rcc - inspect layered REST client and audit configuration.
//!
//! The entry point handles:
//! - Assembling the configuration stack (overrides, environment, file, defaults)
//! - Resolving and explaining per-client REST settings
//! - Validating every configured client
//! - Printing the audit boot properties

use clap::{Args, Parser, Subcommand, ValueEnum};
use rcc_config::resolve::LoadedConfig;
use rcc_config::{load_layered, LoadOptions};
use rcc_core::error::{format_error_human, Error, Result, StructuredError};
use rcc_core::exit_codes::ExitCode;
use rcc_core::logging::{generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};
use rcc_core::output::{render, write_output, OutputFormat};
use rcc_core::report::{CheckContext, CheckReport, CheckStatus, ClientReport, EnversReport, ExplainReport, ListReport};
use rcc_envers::AbsentPolicy;
use rcc_rest::{ClientConfigResolver, ClientIdentity, DEFAULT_PREFIX, FIELDS};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Resolve and check layered REST client configuration
#[derive(Parser)]
#[command(name = "rcc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Application config file (.properties, .toml, .yaml/.yml or .json)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override a property; may be repeated
    #[arg(long = "set", global = true, value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// Namespace prefix for client keys
    #[arg(long, global = true, env = "RCC_PREFIX", default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Ignore environment variables when resolving properties
    #[arg(long, global = true)]
    no_env: bool,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr (human or jsonl)
    #[arg(long, global = true, value_name = "FORMAT")]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration of one client
    Client(ClientArgs),

    /// Show the candidate keys and the winning layer for one field
    Explain(ExplainArgs),

    /// List clients that have configuration
    List,

    /// Load and validate every configured client
    Check,

    /// Print the audit boot properties
    Envers(EnversArgs),

    /// Print version information
    Version,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Client(_) => "client",
            Commands::Explain(_) => "explain",
            Commands::List => "list",
            Commands::Check => "check",
            Commands::Envers(_) => "envers",
            Commands::Version => "version",
        }
    }
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct IdentityArgs {
    /// Configuration key of the client
    #[arg(long)]
    key: Option<String>,

    /// Type path of the client (e.g. com.acme.Client)
    #[arg(long = "type", value_name = "PATH")]
    type_name: Option<String>,
}

impl IdentityArgs {
    fn identity(&self) -> Result<ClientIdentity> {
        match (&self.key, &self.type_name) {
            (Some(key), _) => Ok(ClientIdentity::key(key.clone())),
            (None, Some(name)) => Ok(ClientIdentity::for_type_name(name.clone())),
            (None, None) => Err(Error::MissingIdentity),
        }
    }
}

#[derive(Args, Debug)]
struct ClientArgs {
    #[command(flatten)]
    identity: IdentityArgs,

    /// Fill unset fields from another client key
    #[arg(long, value_name = "KEY")]
    defaults_from: Option<String>,

    /// Print passwords instead of masking them
    #[arg(long)]
    show_secrets: bool,
}

#[derive(Args, Debug)]
struct ExplainArgs {
    #[command(flatten)]
    identity: IdentityArgs,

    /// Field name, e.g. connect-timeout
    #[arg(long)]
    field: String,

    /// Print passwords instead of masking them
    #[arg(long)]
    show_secrets: bool,
}

#[derive(Args, Debug)]
struct EnversArgs {
    /// How settings without a value are contributed
    #[arg(long, value_enum, default_value = "omit")]
    absent: AbsentArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AbsentArg {
    /// Contribute an empty string
    Empty,
    /// Leave the property out
    Omit,
}

impl From<AbsentArg> for AbsentPolicy {
    fn from(arg: AbsentArg) -> Self {
        match arg {
            AbsentArg::Empty => AbsentPolicy::EmptyString,
            AbsentArg::Omit => AbsentPolicy::Omit,
        }
    }
}

#[derive(Serialize)]
struct VersionInfo {
    rcc_version: &'static str,
    rust_version: &'static str,
}

fn main() {
    let cli = Cli::parse();

    let cli_level = (cli.global.verbose > 0 || cli.global.quiet)
        .then(|| LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet));
    let log_config = LogConfig::from_env(cli_level, cli.global.log_format);
    init_logging(&log_config);

    let run_id = generate_run_id();
    let span = tracing::info_span!("rcc", run_id = %run_id, command = cli.command.name());
    let _guard = span.enter();

    let exit_code = match run(&cli, &run_id) {
        Ok(code) => code,
        Err(err) => report_error(&cli.global, &err),
    };
    tracing::debug!(exit_code = %exit_code, "finished");

    std::process::exit(exit_code.as_i32());
}

fn run(cli: &Cli, run_id: &str) -> Result<ExitCode> {
    let global = &cli.global;
    match &cli.command {
        Commands::Client(args) => run_client(global, args),
        Commands::Explain(args) => run_explain(global, args),
        Commands::List => run_list(global),
        Commands::Check => run_check(global, run_id),
        Commands::Envers(args) => run_envers(global, args),
        Commands::Version => {
            let info = VersionInfo {
                rcc_version: env!("CARGO_PKG_VERSION"),
                rust_version: env!("CARGO_PKG_RUST_VERSION"),
            };
            emit(global, &info, |v| format!("rcc {}", v.rcc_version))?;
            Ok(ExitCode::Clean)
        }
    }
}

// ============================================================================
// Command implementations
// ============================================================================

fn load(global: &GlobalOpts) -> Result<LoadedConfig> {
    let options = LoadOptions {
        config_file: global.config.clone(),
        overrides: global.overrides.clone(),
        use_env: !global.no_env,
        ..LoadOptions::default()
    };
    let loaded = load_layered(&options)?;
    tracing::debug!(
        file = ?loaded.file.path,
        origin = %loaded.file.origin,
        sources = loaded.config.len(),
        "configuration loaded"
    );
    Ok(loaded)
}

fn resolver<'a>(global: &GlobalOpts, loaded: &'a LoadedConfig) -> ClientConfigResolver<'a, rcc_config::LayeredConfig> {
    ClientConfigResolver::new(&loaded.config).with_prefix(global.prefix.clone())
}

fn run_client(global: &GlobalOpts, args: &ClientArgs) -> Result<ExitCode> {
    let loaded = load(global)?;
    let resolver = resolver(global, &loaded);
    let identity = args.identity.identity()?;
    let fallback = args.defaults_from.clone().map(ClientIdentity::key);

    let report = ClientReport::build(&resolver, &identity, fallback.as_ref(), args.show_secrets)?;
    emit(global, &report, ClientReport::summary)?;
    Ok(ExitCode::Clean)
}

fn run_explain(global: &GlobalOpts, args: &ExplainArgs) -> Result<ExitCode> {
    let field = rcc_rest::field::field(&args.field).ok_or_else(|| Error::UnknownField {
        name: args.field.clone(),
        expected: FIELDS.iter().map(|f| f.name).collect::<Vec<_>>().join(", "),
    })?;
    let loaded = load(global)?;
    let resolver = resolver(global, &loaded);
    let identity = args.identity.identity()?;

    let report = ExplainReport::build(&resolver, &identity, field, args.show_secrets);
    emit(global, &report, ExplainReport::summary)?;
    Ok(if report.error.is_some() {
        ExitCode::ConversionError
    } else {
        ExitCode::Clean
    })
}

fn run_list(global: &GlobalOpts) -> Result<ExitCode> {
    let loaded = load(global)?;
    let resolver = resolver(global, &loaded);
    let report = ListReport::build(&loaded.config, resolver.prefix());
    emit(global, &report, ListReport::summary)?;
    Ok(ExitCode::Clean)
}

fn run_check(global: &GlobalOpts, run_id: &str) -> Result<ExitCode> {
    let loaded = load(global)?;
    let resolver = resolver(global, &loaded);
    let context = CheckContext {
        run_id: run_id.to_string(),
        config_file: loaded.file.path.as_ref().map(|p| p.display().to_string()),
        config_origin: loaded.file.origin.to_string(),
    };

    let report = CheckReport::build(&resolver, context);
    emit(global, &report, CheckReport::summary)?;
    Ok(if report.status == CheckStatus::Error {
        ExitCode::IssuesFound
    } else {
        ExitCode::Clean
    })
}

fn run_envers(global: &GlobalOpts, args: &EnversArgs) -> Result<ExitCode> {
    let loaded = load(global)?;
    let report = EnversReport::build(&loaded.config, args.absent.into())?;
    emit(global, &report, EnversReport::summary)?;
    Ok(ExitCode::Clean)
}

// ============================================================================
// Output helpers
// ============================================================================

fn emit<T: Serialize>(global: &GlobalOpts, payload: &T, summary: impl FnOnce(&T) -> String) -> Result<()> {
    let text = render(payload, global.format, summary)?;
    write_output(&mut std::io::stdout().lock(), &text)
}

fn report_error(global: &GlobalOpts, err: &Error) -> ExitCode {
    tracing::debug!(code = err.code(), category = %err.category(), "command failed");
    match global.format {
        OutputFormat::Json => eprintln!("{}", StructuredError::from(err).to_json_pretty()),
        _ => eprintln!("{}", format_error_human(err, std::io::stderr().is_terminal())),
    }
    err.exit_code()
}
