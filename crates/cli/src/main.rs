use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use bp_core::{render_json, render_table, BindingScope, HEADER};
use bp_kubehub::KubeBindingSource;
use clap::{Parser, ValueEnum};
use tracing::{debug, error, info};

const EXAMPLES: &str = "\
Examples:
  expand clusterrolebindings when -n is not given:
    bp
  expand rolebindings of a namespace:
    bp -n NAMESPACE";

#[derive(Parser, Debug)]
#[command(
    name = "bp",
    version,
    about = "Expand ClusterRoleBinding or RoleBinding detail info",
    after_help = EXAMPLES
)]
struct Cli {
    /// Namespace to list RoleBindings from (empty: list ClusterRoleBindings)
    #[arg(short = 'n', long = "namespace", default_value = "")]
    namespace: String,

    /// Path to the kubeconfig file (default: ~/.kube/config)
    #[arg(long = "kubeconfig", env = "BP_KUBECONFIG")]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use (default: current context)
    #[arg(long = "context", env = "BP_CONTEXT")]
    context: Option<String>,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t = Output::Human)]
    output: Output,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Output { Human, Json }

/// Invocation settings, built once from the command line.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    scope: BindingScope,
    kubeconfig: Option<PathBuf>,
    context: Option<String>,
    output: Output,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Self {
            scope: BindingScope::resolve(Some(&cli.namespace)),
            kubeconfig: cli.kubeconfig,
            context: cli.context,
            output: cli.output,
        }
    }
}

fn init_tracing() {
    let env = std::env::var("BP_LOG").unwrap_or_else(|_| "warn".to_string());
    let filter = tracing_subscriber::EnvFilter::from_str(&env).unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(settings: Settings) -> Result<()> {
    let path = bp_kubehub::resolve_kubeconfig(settings.kubeconfig)?;
    debug!(path = %path.display(), "using kubeconfig");
    let source = KubeBindingSource::connect(&path, settings.context.as_deref())
        .await
        .with_context(|| format!("loading {}", path.display()))?;
    let records = bp_kubehub::fetch(&source, settings.scope).await?;
    let rows = bp_core::normalize(&records);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match settings.output {
        Output::Human => render_table(&mut out, &HEADER, &rows)?,
        Output::Json => render_json(&mut out, &rows)?,
    }
    out.flush()?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let settings = Settings::from(Cli::parse());
    info!(scope = ?settings.scope, output = ?settings.output, "bp invoked");
    if let Err(e) = run(settings).await {
        error!(error = ?e, "bp failed");
        eprintln!("bp: {:#}", e);
        std::process::exit(1);
    }
}
