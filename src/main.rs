use anyhow::Context;
use braintree_gateway::{Configuration, Environment};
use serde::Serialize;

/// Command selected on the command line
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Show { json: bool },
    Get(String),
}

/// Resolved configuration as printed by `show`
///
/// The private key is only ever included in masked form.
#[derive(Debug, Serialize)]
struct ConfigSummary<'a> {
    environment: &'a Environment,
    merchant_url: String,
    public_key: &'a str,
    private_key: String,
    api_version: &'static str,
    http_strategy: &'static str,
}

impl<'a> ConfigSummary<'a> {
    fn new(config: &'a Configuration) -> anyhow::Result<Self> {
        let strategy = config
            .strategy_kind()
            .context("Failed to select HTTP strategy")?;

        Ok(Self {
            environment: config.environment(),
            merchant_url: config.base_merchant_url(),
            public_key: config.public_key(),
            private_key: config.private_key().masked(),
            api_version: Configuration::api_version(),
            http_strategy: strategy.override_name(),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let (command, unsafe_ssl) = parse_args(&args);

    // Logs go to stderr so stdout only carries command output
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    Configuration::configure_from_env().context("Failed to load gateway configuration")?;
    if unsafe_ssl {
        Configuration::set_use_unsafe_ssl(true);
    }

    let config = Configuration::instantiate()?;

    match command {
        Command::Show { json } => {
            let summary = ConfigSummary::new(&config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("environment:   {}", summary.environment);
                println!("merchant url:  {}", summary.merchant_url);
                println!("public key:    {}", summary.public_key);
                println!("private key:   {}", summary.private_key);
                println!("api version:   {}", summary.api_version);
                println!("http strategy: {}", summary.http_strategy);
            }
        }
        Command::Get(path) => {
            let http = config.http().context("Failed to create HTTP dispatcher")?;
            tracing::info!("GET {}{}", config.base_merchant_url(), path);
            let response = http
                .get(&path)
                .await
                .with_context(|| format!("GET {} failed", path))?;
            println!("HTTP {}", response.status);
            println!("{}", response.body);
        }
    }

    Ok(())
}

/// Parse command-line arguments
fn parse_args(args: &[String]) -> (Command, bool) {
    let mut command = Command::Show { json: false };
    let mut json = false;
    let mut unsafe_ssl = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "show" => command = Command::Show { json: false },
            "get" => {
                if i + 1 < args.len() {
                    command = Command::Get(args[i + 1].clone());
                    i += 1;
                } else {
                    eprintln!("get requires a PATH argument");
                    print_usage();
                    std::process::exit(1);
                }
            }
            "--unsafe-ssl" => unsafe_ssl = true,
            "--json" => json = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if let Command::Show { json: show_json } = &mut command {
        *show_json = json;
    }

    (command, unsafe_ssl)
}

/// Print usage information
fn print_usage() {
    println!("braintree-config - inspect and exercise payment gateway configuration");
    println!();
    println!("USAGE:");
    println!("    braintree-config [show] [--json] [--unsafe-ssl]");
    println!("    braintree-config get <PATH> [--unsafe-ssl]");
    println!();
    println!("COMMANDS:");
    println!("    show                Print the resolved configuration (default)");
    println!("    get <PATH>          Issue an authenticated GET to <merchant url><PATH>");
    println!();
    println!("OPTIONS:");
    println!("    --json              Print `show` output as JSON");
    println!("    --unsafe-ssl        Skip gateway certificate verification");
    println!("    --help, -h          Print this help message");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    BRAINTREE_ENVIRONMENT     development, qa, sandbox or production (default: sandbox)");
    println!("    BRAINTREE_MERCHANT_ID     Merchant account id (required)");
    println!("    BRAINTREE_PUBLIC_KEY      Public API key (required)");
    println!("    BRAINTREE_PRIVATE_KEY     Private API key (required)");
    println!("    BRAINTREE_HTTP_STRATEGY   Transport override: requests, httplib or pycurl");
    println!("    GATEWAY_PORT              Development gateway port (default: 3000)");
    println!("    RUST_LOG                  Logging level (default: warn)");
}
