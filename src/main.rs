//! `bien` command line.
//!
//! Inspects router configurations, dry-runs navigations against in-memory
//! host doubles, and exposes the bundled input utilities.
//!
//! ```text
//! bien config <source>            load, print as JSON, report problems
//! bien resolve <source> <url>     subdomain / path / matched route
//! bien render <source> <url>      mount into an in-memory document
//! bien sanitize <handler> <value> run a bundled input handler
//! bien sentinel <value>           ask the sanitization service
//! bien help | version             library metadata
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};
use url::Url;

use bien_utils::config::{
    load_config, validate_config, ConfigSource, ContainerRef, HttpFetcher, RouterConfig,
    RouterOptions,
};
use bien_utils::host::memory::{MemoryDocument, MemoryHistory};
use bien_utils::host::{Node, Surface};
use bien_utils::input::{Encoding, Handler, Profile, SentinelClient};
use bien_utils::loader::{Component, ComponentLoader, ModuleLoadError};
use bien_utils::meta::{Help, Version};
use bien_utils::observability::logging::init_logging;
use bien_utils::routing::resolve::{normalize_target, resolve};
use bien_utils::routing::{split_location, NavTarget, RouterHost, SubdomainRouter};

#[derive(Parser)]
#[command(name = "bien")]
#[command(about = "Subdomain router and input utilities", long_about = None)]
struct Cli {
    /// Tracing filter, e.g. "bien_utils=debug". RUST_LOG takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the help center
    Help,
    /// Print release information
    Version,
    /// Load a configuration and print it as JSON
    Config {
        /// URL or file path
        source: String,
        /// Timeout for remote sources
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },
    /// Show how a URL resolves against a configuration
    Resolve { source: String, url: String },
    /// Dry-run a navigation and print the mounted tree
    Render { source: String, url: String },
    /// Run a bundled input handler on a value
    Sanitize {
        /// Module name, e.g. handleTel
        handler: String,
        value: String,
    },
    /// Ask the sanitization service to clean a value
    Sentinel {
        value: String,
        #[arg(long, value_enum, default_value_t = ProfileArg::Any)]
        profile: ProfileArg,
        #[arg(long, value_enum, default_value_t = EncodingArg::Html)]
        encoding: EncodingArg,
        #[arg(long, default_value = bien_utils::input::sentinel::DEFAULT_ENDPOINT)]
        endpoint: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
    Alnum,
    NumericDot,
    Any,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Alnum => Profile::AlphaNumeric,
            ProfileArg::NumericDot => Profile::NumericDot,
            ProfileArg::Any => Profile::Any,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EncodingArg {
    Html,
    Unicode,
    Ascii,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Html => Encoding::Html,
            EncodingArg::Unicode => Encoding::Unicode,
            EncodingArg::Ascii => Encoding::Ascii,
        }
    }
}

/// Stands in for every module path: renders a div tagged with the path.
struct PlaceholderLoader;

struct Placeholder {
    path: String,
}

#[async_trait]
impl Component for Placeholder {
    fn name(&self) -> &str {
        &self.path
    }

    async fn render(&self) -> Result<Node, ModuleLoadError> {
        Ok(Node::element("div")
            .with_class("placeholder")
            .with_child(Node::text(self.path.clone())))
    }
}

#[async_trait]
impl ComponentLoader for PlaceholderLoader {
    async fn load(&self, path: &str) -> Result<Arc<dyn Component>, ModuleLoadError> {
        Ok(Arc::new(Placeholder {
            path: path.to_string(),
        }))
    }
}

async fn load(source: &str, timeout: u64) -> Result<RouterConfig, Box<dyn std::error::Error>> {
    let fetcher = HttpFetcher::new(timeout);
    Ok(load_config(ConfigSource::from_arg(source), &fetcher).await?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Help => print!("{}", Help::bundled().render()),
        Commands::Version => print!("{}", Version::current().render()),
        Commands::Config { source, timeout } => {
            let config = load(&source, timeout).await?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            match validate_config(&config) {
                Ok(()) => eprintln!("Configuration OK"),
                Err(errors) => {
                    for error in errors {
                        eprintln!("warning: {error}");
                    }
                }
            }
        }
        Commands::Resolve { source, url } => {
            let config = load(&source, 10).await?;
            let base = config.base()?;
            let target = normalize_target(NavTarget::from(url.as_str()), &base)?;
            let location = split_location(&base, &target);
            println!("subdomain: {}", location.subdomain);
            println!("path:      {}", location.path);

            let resolution = resolve(&config, &location)?;
            println!(
                "route:     {} ({:?})",
                resolution.route.route.as_deref().unwrap_or_default(),
                resolution.fallback
            );
            if let Some(shell) = &resolution.entry.component {
                println!("shell:     {}", shell.label());
            }
            if let Some(view) = &resolution.route.component {
                println!("view:      {}", view.label());
            }
            println!("history:   {}", resolution.history_path(&location));
        }
        Commands::Render { source, url } => {
            let config = load(&source, 10).await?;
            let url = Url::parse(&url)?;
            let document = Arc::new(MemoryDocument::new());
            let surface = match &config.container {
                Some(ContainerRef::Id(id)) => Some(document.add_container(id.clone())),
                _ => None,
            };
            let history = Arc::new(MemoryHistory::new(url.clone()));
            let host = RouterHost::new(document.clone(), Arc::new(PlaceholderLoader), history.clone());

            let router = SubdomainRouter::with_options(host, RouterOptions::default());
            router.init(config.clone()).await?;
            let outcome = router.navigate_to(url).await?;
            println!("outcome: {outcome:?}");

            for node in surface.iter().flat_map(|s| s.snapshot()) {
                print!("{node}");
            }
            for entry in history.pushes() {
                println!("pushed: {} {}", entry.path, entry.state);
            }
            for url in history.assignments() {
                println!("assigned: {url}");
            }
        }
        Commands::Sanitize { handler, value } => {
            let handler = Handler::from_module_name(&handler)
                .ok_or_else(|| format!("unknown handler '{handler}'"))?;
            let handled = handler.apply(&value);
            println!("{}", handled.value);
            if !handled.valid {
                eprintln!("warning: value is not valid for {}", handler.module_name());
            }
        }
        Commands::Sentinel {
            value,
            profile,
            encoding,
            endpoint,
        } => {
            let client = SentinelClient::new(endpoint);
            let report = client.sanitize(&value, profile.into(), encoding.into()).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
