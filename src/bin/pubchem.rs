//! PubChem Query CLI
//!
//! Looks up compound descriptors, synonyms and registry numbers.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use pubchem_query::{
    is_valid_registry_number, ClientConfig, DataFormat, ExecuteOptions, ExecutionResult, Property,
    PubChem, RegistryLookup, Selector, Status,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pubchem")]
#[command(about = "Query compound data from PubChem")]
struct Cli {
    /// Config file to load (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Response format (json, xml, sdf, csv, txt, asnt)
    #[arg(short, long, global = true)]
    format: Option<DataFormat>,

    /// Print the response body without parsing it
    #[arg(long, global = true)]
    raw: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one property
    Property {
        /// Identifier kind (name, cas, smiles, cid, inchi, inchikey)
        selector: Selector,
        /// Identifier value
        value: String,
        /// Property name, e.g. IUPACName
        property: Property,
    },

    /// Fetch several properties at once (unknown names are ignored)
    Properties {
        selector: Selector,
        value: String,
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// List synonyms
    Names {
        selector: Selector,
        value: String,
        /// Keep only the first N synonyms
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Find the registry (CAS) number among the synonyms
    Cas { selector: Selector, value: String },

    /// Check a registry number's check digit locally
    Check { candidate: String },

    /// List every known property name
    ListProperties,

    /// Show or create configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Write a default config file
    Init {
        #[arg(short, long, default_value = "pubchem.toml")]
        output: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the command succeeded
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = ClientConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    let options = ExecuteOptions {
        format: cli.format.unwrap_or(config.defaults.format),
        raw: cli.raw || config.defaults.raw,
    };

    match cli.command {
        Commands::Property { selector, value, property } => {
            let pubchem = PubChem::from_config(&config)?;
            let result = pubchem
                .compound()
                .select(selector, &value)
                .fetch_property(property)
                .execute(&options)
                .await;
            Ok(report(result))
        }

        Commands::Properties { selector, value, names } => {
            let pubchem = PubChem::from_config(&config)?;
            let query = pubchem.compound().select(selector, &value).get_properties(&names);
            Ok(report(query.execute(&options).await))
        }

        Commands::Names { selector, value, limit } => {
            let pubchem = PubChem::from_config(&config)?;
            let result = pubchem
                .compound()
                .select(selector, &value)
                .get_names(limit)
                .execute(&options)
                .await;
            Ok(report(result))
        }

        Commands::Cas { selector, value } => {
            let pubchem = PubChem::from_config(&config)?;
            let (lookup, status) = pubchem.compound().select(selector, &value).get_cas().find().await;
            match lookup {
                RegistryLookup::Found(number) => println!("{}", number),
                RegistryLookup::NotFound => println!("registry number not found"),
            }
            println!("status: {}", status);
            Ok(status == Status::Success)
        }

        Commands::Check { candidate } => {
            let valid = is_valid_registry_number(&candidate);
            println!("{} {}", candidate, if valid { "valid" } else { "invalid" });
            Ok(valid)
        }

        Commands::ListProperties => {
            for property in Property::ALL {
                println!("{}", property);
            }
            Ok(true)
        }

        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                println!("{}", toml::to_string_pretty(&config)?);
                Ok(true)
            }
            ConfigCommands::Init { output } => {
                if std::path::Path::new(&output).exists() {
                    bail!("{} already exists", output);
                }
                ClientConfig::default().save(&output)?;
                println!("Created config file: {}", output);
                Ok(true)
            }
        },
    }
}

fn report(result: ExecutionResult) -> bool {
    match result.data.as_value() {
        Some(value) if !value.is_string() => {
            println!("{}", serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()))
        }
        _ => println!("{}", result.data),
    }
    println!("status: {}", result.status);
    result.status.is_success()
}
