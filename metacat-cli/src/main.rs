//! metacat command-line client
//!
//! Reads, searches and edits assets in a catalog from the shell. Results
//! are printed to stdout as JSON; logs go to stderr.
//!
//! Usage:
//!   metacat --base-url https://catalog.example.com get --guid <GUID>
//!   metacat search --type-name Table --prefix default/snowflake --limit 20
//!   metacat tag add --type-name Table --qualified-name <QN> --tag PII

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use metacat_client::search::fields;
use metacat_client::{AssetOperations, CatalogApi, CatalogClient, ClientConfig, FluentSearch, RetrieveOptions};
use metacat_model::kinds::{
    CollectionAttributes, ColumnAttributes, ConnectionAttributes, DatabaseAttributes, FolderAttributes,
    GlossaryAttributes, GlossaryTermAttributes, SchemaAttributes, TableAttributes, ViewAttributes,
};
use metacat_model::{all_schemas, schema_for};
use metacat_types::Guid;
use serde_json::{Value, json};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "metacat")]
#[command(about = "Command-line access to a metacat catalog", version)]
struct Cli {
    /// Base URL of the catalog service
    #[arg(long, env = "METACAT_BASE_URL", default_value = "http://localhost:21000", global = true)]
    base_url: String,

    /// API token sent as a bearer token
    #[arg(long, env = "METACAT_API_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one asset by GUID or by type and qualified name
    Get(GetArgs),
    /// Search active assets of a type
    Search {
        #[arg(long)]
        type_name: String,
        /// Only qualified names starting with this prefix
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Archive an asset, or purge it permanently
    Delete {
        #[arg(long)]
        guid: String,
        #[arg(long)]
        purge: bool,
    },
    /// Reactivate an archived asset
    Restore(AssetArgs),
    /// Add or remove a tag
    #[command(subcommand)]
    Tag(TagCommand),
    /// Print the known asset kinds
    Schema {
        /// Only this kind
        #[arg(long)]
        type_name: Option<String>,
    },
}

#[derive(Args, Debug)]
struct GetArgs {
    #[arg(long, conflicts_with_all = ["type_name", "qualified_name"], required_unless_present = "qualified_name")]
    guid: Option<String>,
    #[arg(long, requires = "qualified_name")]
    type_name: Option<String>,
    #[arg(long, requires = "type_name")]
    qualified_name: Option<String>,
}

#[derive(Args, Debug)]
struct AssetArgs {
    #[arg(long)]
    type_name: String,
    #[arg(long)]
    qualified_name: String,
}

#[derive(Subcommand, Debug)]
enum TagCommand {
    Add {
        #[command(flatten)]
        asset: AssetArgs,
        #[arg(long)]
        tag: String,
        /// Keep the tag on this asset only
        #[arg(long)]
        no_propagate: bool,
    },
    Remove {
        #[command(flatten)]
        asset: AssetArgs,
        #[arg(long)]
        tag: String,
    },
}

/// Runs `$body` with `$kind` bound to the attribute type named by `$type_name`.
macro_rules! with_kind {
    ($type_name:expr, $kind:ident => $body:expr) => {
        match $type_name {
            "Connection" => { type $kind = ConnectionAttributes; $body }
            "Database" => { type $kind = DatabaseAttributes; $body }
            "Schema" => { type $kind = SchemaAttributes; $body }
            "Table" => { type $kind = TableAttributes; $body }
            "View" => { type $kind = ViewAttributes; $body }
            "Column" => { type $kind = ColumnAttributes; $body }
            "Glossary" => { type $kind = GlossaryAttributes; $body }
            "GlossaryTerm" => { type $kind = GlossaryTermAttributes; $body }
            "Collection" => { type $kind = CollectionAttributes; $body }
            "Folder" => { type $kind = FolderAttributes; $body }
            other => bail!("unsupported asset type {other:?}; see `metacat schema`"),
        }
    };
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = run(&cli).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn client(cli: &Cli) -> Result<CatalogClient> {
    let mut builder = ClientConfig::builder(cli.base_url.clone());
    if let Some(token) = &cli.token {
        builder = builder.api_token(token.clone());
    }
    let config = builder.build().context("invalid client configuration")?;
    debug!(?config, "connecting");
    Ok(CatalogClient::new(config)?)
}

fn parse_guid(raw: &str) -> Result<Guid> {
    Guid::parse(raw).with_context(|| format!("{raw:?} is not a GUID"))
}

async fn run(cli: &Cli) -> Result<Value> {
    match &cli.command {
        Command::Schema { type_name } => schema(type_name.as_deref()),
        command => run_remote(&client(cli)?, command).await,
    }
}

async fn run_remote(client: &CatalogClient, command: &Command) -> Result<Value> {
    match command {
        Command::Get(args) => {
            let found = match (&args.guid, &args.type_name, &args.qualified_name) {
                (Some(guid), _, _) => {
                    client
                        .get_entity_by_guid(&parse_guid(guid)?, RetrieveOptions::default())
                        .await?
                }
                (None, Some(type_name), Some(qn)) => {
                    client
                        .get_entity_by_qualified_name(type_name, qn, RetrieveOptions::default())
                        .await?
                }
                _ => bail!("pass --guid, or --type-name with --qualified-name"),
            };
            Ok(serde_json::to_value(found)?)
        }
        Command::Search {
            type_name,
            prefix,
            limit,
        } => {
            let mut search = FluentSearch::new()
                .where_(fields::TYPE_NAME.eq(type_name.as_str()))
                .page_size(*limit);
            if let Some(prefix) = prefix {
                search = search.where_(fields::QUALIFIED_NAME.starts_with(prefix.as_str()));
            }
            let page = search.page(client, 0).await?;
            info!(returned = page.entities.len(), total = page.approximate_count, "search complete");
            Ok(serde_json::to_value(page)?)
        }
        Command::Delete { guid, purge } => {
            let guid = parse_guid(guid)?;
            let response = if *purge {
                client.purge(&guid).await?
            } else {
                client.soft_delete(&guid).await?
            };
            Ok(serde_json::to_value(response)?)
        }
        Command::Restore(asset) => {
            let restored = with_kind!(asset.type_name.as_str(), A => {
                client.restore::<A>(&asset.qualified_name).await?
            });
            Ok(json!({ "restored": restored }))
        }
        Command::Tag(TagCommand::Add {
            asset,
            tag,
            no_propagate,
        }) => {
            let response = with_kind!(asset.type_name.as_str(), A => {
                client.add_tags::<A>(&asset.qualified_name, &[tag.as_str()], !no_propagate).await?
            });
            Ok(serde_json::to_value(response)?)
        }
        Command::Tag(TagCommand::Remove { asset, tag }) => {
            let response = with_kind!(asset.type_name.as_str(), A => {
                client.remove_tag::<A>(&asset.qualified_name, tag).await?
            });
            Ok(match response {
                Some(response) => serde_json::to_value(response)?,
                None => json!({ "removed": false }),
            })
        }
        Command::Schema { type_name } => schema(type_name.as_deref()),
    }
}

fn schema(type_name: Option<&str>) -> Result<Value> {
    match type_name {
        Some(name) => {
            let schema = schema_for(name).with_context(|| format!("unknown asset type {name:?}"))?;
            Ok(serde_json::to_value(schema)?)
        }
        None => Ok(serde_json::to_value(all_schemas())?),
    }
}
