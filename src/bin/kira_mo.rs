use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use kira_multiomics::app::HttpApp;
use kira_multiomics::config::{ConfigLoader, Settings};
use kira_multiomics::domain::{GeneSymbol, Species, UniprotId};
use kira_multiomics::error::KiraError;
use kira_multiomics::output::JsonOutput;
use kira_multiomics::request::GeneRequest;

#[derive(Parser)]
#[command(name = "kira-mo")]
#[command(about = "One merged KEGG / Ensembl / UniProt / PubMed record per gene symbol")]
#[command(version, author)]
struct Cli {
    /// Path to a kira-mo.json config file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Maximum number of symbols looked up at the same time
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "KEGG pathway links for KEGG gene ids (e.g. hsa:7157)")]
    Pathways(PathwaysArgs),
    #[command(about = "Ensembl symbol lookup")]
    GeneInfo(SymbolsArgs),
    #[command(about = "UniProtKB entries by accession")]
    ProteinInfo(ProteinArgs),
    #[command(about = "PubMed search with summaries")]
    Pubmed(PubmedArgs),
    #[command(about = "Combined lookup across all sources")]
    All(SymbolsArgs),
    #[command(about = "Combined lookup from a JSON body (array or object)")]
    Query(QueryArgs),
}

#[derive(Args)]
struct PathwaysArgs {
    #[arg(required = true)]
    gene_ids: Vec<String>,
}

#[derive(Args)]
struct SymbolsArgs {
    #[arg(required = true)]
    symbols: Vec<String>,

    #[arg(long)]
    species: Option<String>,
}

#[derive(Args)]
struct ProteinArgs {
    #[arg(required = true)]
    accessions: Vec<String>,
}

#[derive(Args)]
struct PubmedArgs {
    query: String,

    #[arg(long)]
    max_results: Option<usize>,
}

#[derive(Args)]
struct QueryArgs {
    /// Inline JSON body
    #[arg(long, conflicts_with = "file")]
    body: Option<String>,

    /// Read the JSON body from a file
    #[arg(long)]
    file: Option<String>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(report) => {
            eprintln!("{report:?}");
            match report.downcast_ref::<KiraError>() {
                Some(kira) => ExitCode::from(map_exit_code(kira)),
                None => ExitCode::from(1),
            }
        }
    }
}

fn map_exit_code(error: &KiraError) -> u8 {
    match error {
        KiraError::InvalidRequest(_)
        | KiraError::InvalidGeneSymbol(_)
        | KiraError::InvalidSpecies(_)
        | KiraError::InvalidUniprotId(_)
        | KiraError::ConfigRead(_)
        | KiraError::ConfigParse(_)
        | KiraError::ConfigValue(_) => 2,
        err if err.is_upstream() => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = ConfigLoader::resolve(cli.config.as_deref())?;
    apply_cli_overrides(&mut settings, cli.concurrency, cli.timeout_secs)?;
    let app = HttpApp::from_settings(&settings)?;

    let printed = match cli.command {
        Commands::Pathways(args) => run_pathways(&app, args),
        Commands::GeneInfo(args) => run_gene_info(&app, args),
        Commands::ProteinInfo(args) => run_protein_info(&app, args),
        Commands::Pubmed(args) => run_pubmed(&app, args),
        Commands::All(args) => run_all(&app, args),
        Commands::Query(args) => return run_query(&app, args),
    };
    printed?;
    Ok(ExitCode::SUCCESS)
}

fn apply_cli_overrides(
    settings: &mut Settings,
    concurrency: Option<usize>,
    timeout_secs: Option<u64>,
) -> Result<(), KiraError> {
    if let Some(concurrency) = concurrency {
        if concurrency == 0 {
            return Err(KiraError::ConfigValue(
                "--concurrency must be at least 1".to_string(),
            ));
        }
        settings.concurrency = concurrency;
    }
    if let Some(secs) = timeout_secs {
        if secs == 0 {
            return Err(KiraError::ConfigValue(
                "--timeout-secs must be at least 1".to_string(),
            ));
        }
        settings.timeout = std::time::Duration::from_secs(secs);
    }
    Ok(())
}

fn parse_species(value: Option<&str>) -> Result<Option<Species>, KiraError> {
    value.map(str::parse::<Species>).transpose()
}

fn run_pathways(app: &HttpApp, args: PathwaysArgs) -> miette::Result<()> {
    let result = app.pathways(&args.gene_ids);
    JsonOutput::print_lookup(&result)?;
    Ok(())
}

fn run_gene_info(app: &HttpApp, args: SymbolsArgs) -> miette::Result<()> {
    let species = parse_species(args.species.as_deref())?;
    let symbols = args
        .symbols
        .iter()
        .map(|value| value.parse::<GeneSymbol>())
        .collect::<Result<Vec<_>, _>>()?;
    let result = app.gene_info(&symbols, species.as_ref());
    JsonOutput::print_lookup(&result)?;
    Ok(())
}

fn run_protein_info(app: &HttpApp, args: ProteinArgs) -> miette::Result<()> {
    let ids = args
        .accessions
        .iter()
        .map(|value| value.parse::<UniprotId>())
        .collect::<Result<Vec<_>, _>>()?;
    let result = app.protein_info(&ids);
    JsonOutput::print_lookup(&result)?;
    Ok(())
}

fn run_pubmed(app: &HttpApp, args: PubmedArgs) -> miette::Result<()> {
    let summaries = app.pubmed_search(&args.query, args.max_results)?;
    JsonOutput::print_summaries(&summaries)?;
    Ok(())
}

fn run_all(app: &HttpApp, args: SymbolsArgs) -> miette::Result<()> {
    let species = parse_species(args.species.as_deref())?
        .unwrap_or_else(|| app.default_species().clone());
    let request = GeneRequest::from_symbols(&args.symbols, species)?;
    let result = app.all(&request);
    JsonOutput::print_batch(&result)?;
    Ok(())
}

/// A rejected body is answered with the `{"error": ...}` document on stdout
/// and exit code 2; nothing else is reported.
fn run_query(app: &HttpApp, args: QueryArgs) -> miette::Result<ExitCode> {
    let raw = match (args.body, args.file) {
        (Some(body), _) => body,
        (None, Some(path)) => std::fs::read_to_string(&path).into_diagnostic()?,
        (None, None) => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(miette::Report::msg(
                    "query needs --body, --file or a JSON body on stdin",
                ));
            }
            io::read_to_string(stdin).into_diagnostic()?
        }
    };

    match app.query(&raw) {
        Ok(result) => {
            JsonOutput::print_batch(&result)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(error = %err, "query body rejected");
            JsonOutput::print_error(&err)?;
            Ok(ExitCode::from(map_exit_code(&err)))
        }
    }
}
