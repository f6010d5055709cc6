use clap::{Parser, Subcommand};
use rnsconf_cli::{
    config::{OutputFormat, Settings},
    report::{render_fields, render_type_groups, render_validation},
};
use rnsconf_core::{
    Error,
    config::{load_config_file, write_config_file},
    parse,
    schema::{
        InterfaceCapabilities, InterfaceType, all_fields_for_type, creatable_type_groups,
        is_creatable, visible_fields_for_type,
    },
    serialize, validate,
};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(author, version, about = "Reticulum gateway configuration tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to settings file
    #[arg(long, default_value = ".rnsconf.json", global = true)]
    settings: PathBuf,

    /// Runtime capability descriptor (JSON)
    #[arg(long, env = "RNSCONF_CAPABILITIES", global = true)]
    capabilities: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, env = "RNSCONF_OUTPUT", global = true)]
    output: Option<OutputFormat>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Check(CheckArgs),

    /// Rewrite a configuration file in canonical form
    Fmt(FmtArgs),

    /// List the interface types that can be created
    Types,

    /// List the fields of an interface type
    Fields(FieldsArgs),
}

#[derive(Parser)]
struct CheckArgs {
    /// Path to the configuration file
    file: PathBuf,

    /// Fail when warnings are reported
    #[arg(long)]
    deny_warnings: bool,
}

#[derive(Parser)]
struct FmtArgs {
    /// Path to the configuration file
    file: PathBuf,

    /// Write formatted output to stdout instead of modifying the file
    #[arg(short, long)]
    stdout: bool,

    /// Only report whether the file is already formatted
    #[arg(long, conflicts_with = "stdout")]
    check: bool,
}

#[derive(Parser)]
struct FieldsArgs {
    /// Interface type, e.g. TCPClientInterface
    #[arg(value_name = "TYPE")]
    interface_type: String,

    /// Include common and discovery fields
    #[arg(short, long)]
    all: bool,
}

fn output_json<T: serde::Serialize>(data: &T) -> Result<(), Error> {
    let output = serde_json::to_string_pretty(data)
        .map_err(|e| Error::Internal(format!("JSON serialization error: {}", e)))?;
    println!("{}", output);
    Ok(())
}

fn load_settings(cli: &Cli) -> Result<Settings, Error> {
    Settings::initialize(&cli.settings, cli.capabilities.clone(), cli.output)
        .map_err(|e| Error::Internal(format!("Failed to load settings: {}", e)))
}

fn load_capabilities(settings: &Settings) -> Result<Option<InterfaceCapabilities>, Error> {
    settings
        .load_capabilities()
        .map_err(|e| Error::Internal(e.to_string()))
}

fn check_file(args: &CheckArgs, settings: &Settings) -> Result<(), Error> {
    let state = load_config_file(&args.file)?;
    let capabilities = load_capabilities(settings)?;
    if let Some(caps) = &capabilities {
        for iface in &state.interfaces {
            if !iface.interface_type.is_empty() && !is_creatable(&iface.interface_type, Some(caps)) {
                warn!(
                    interface = %iface.name,
                    interface_type = %iface.interface_type,
                    "interface type is not supported by the runtime"
                );
            }
        }
    }

    let result = validate(&state);
    match settings.output {
        OutputFormat::Json => output_json(&result)?,
        OutputFormat::Text => print!("{}", render_validation(&result)),
    }

    if !result.valid {
        return Err(Error::Internal(format!(
            "{} has {} error(s)",
            args.file.display(),
            result.errors.len()
        )));
    }
    if (args.deny_warnings || settings.deny_warnings) && !result.warnings.is_empty() {
        return Err(Error::Internal(format!(
            "{} has {} warning(s)",
            args.file.display(),
            result.warnings.len()
        )));
    }
    Ok(())
}

fn format_file(args: &FmtArgs) -> Result<(), Error> {
    let input = fs::read_to_string(&args.file)
        .map_err(|e| Error::Internal(format!("Failed to read input file: {}", e)))?;
    let state = parse(&input);

    if args.check {
        if serialize(&state) != input {
            return Err(Error::Internal(format!(
                "{} is not formatted",
                args.file.display()
            )));
        }
        info!("{} is formatted", args.file.display());
        return Ok(());
    }

    if args.stdout {
        print!("{}", serialize(&state));
    } else {
        write_config_file(&args.file, &state)?;
        debug!("formatted {}", args.file.display());
    }
    Ok(())
}

fn list_types(settings: &Settings) -> Result<(), Error> {
    let capabilities = load_capabilities(settings)?;
    let groups = creatable_type_groups(capabilities.as_ref());
    match settings.output {
        OutputFormat::Json => output_json(&groups),
        OutputFormat::Text => {
            print!("{}", render_type_groups(&groups, capabilities.as_ref()));
            Ok(())
        }
    }
}

fn list_fields(args: &FieldsArgs, settings: &Settings) -> Result<(), Error> {
    if InterfaceType::lookup(&args.interface_type).is_none() {
        return Err(Error::Internal(format!(
            "Unknown interface type: {}",
            args.interface_type
        )));
    }
    let fields = if args.all {
        all_fields_for_type(&args.interface_type)
    } else {
        visible_fields_for_type(&args.interface_type)
    };
    match settings.output {
        OutputFormat::Json => output_json(&fields),
        OutputFormat::Text => {
            print!("{}", render_fields(&fields));
            Ok(())
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let settings = load_settings(cli)?;
    debug!(?settings, "loaded settings");
    match &cli.command {
        Commands::Check(args) => check_file(args, &settings),
        Commands::Fmt(args) => format_file(args),
        Commands::Types => list_types(&settings),
        Commands::Fields(args) => list_fields(args, &settings),
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
