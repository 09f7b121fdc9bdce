use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use czml_loader::{
    available_examples, load_from_file, CzmlLoader, InMemoryFile, LoadResult, LoaderConfig,
    LocalFile,
};
use czml_model::{DocumentArray, ModelError};
use czml_validator::{summarize, validate_document};
use tokio::io::AsyncReadExt;

mod report;

#[derive(Parser)]
#[command(name = "czml")]
#[command(about = "Load, merge and validate CZML scene documents", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Base URL for relative URLs and built-in examples (overrides CZML_EXAMPLES_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// HTTP request timeout in milliseconds (overrides CZML_REQUEST_TIMEOUT_MS)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a document and report structural and semantic problems
    Validate(ValidateArgs),

    /// Print name, version, clock and entity counts of a document
    Summary(SourceArgs),

    /// Load several URLs concurrently and print the merged document
    Merge(MergeArgs),

    /// List the built-in example documents
    Examples(ExamplesArgs),

    /// Load and validate a built-in example document
    Example(ExampleArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// http(s) URL, file path, or `-` for stdin
    source: String,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ValidateArgs {
    #[command(flatten)]
    input: SourceArgs,

    /// Treat warnings as failures
    #[arg(long)]
    strict: bool,
}

#[derive(Args)]
struct MergeArgs {
    /// URLs to load, in merge order
    #[arg(required = true, num_args = 1..)]
    urls: Vec<String>,

    /// Pretty-print the merged document
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct ExamplesArgs {
    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ExampleArgs {
    /// Registered example name (see `czml examples`)
    name: String,

    /// Output JSON format
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let mut config = LoaderConfig::from_env();
    if let Some(base) = cli.base_url {
        config.examples_base_url = base;
    }
    if let Some(ms) = cli.timeout_ms {
        config.request_timeout_ms = Some(ms);
    }
    let loader = CzmlLoader::new(config).context("Failed to initialise loader")?;

    let ok = match cli.command {
        Commands::Validate(args) => run_validate(&loader, args).await?,
        Commands::Summary(args) => run_summary(&loader, args).await?,
        Commands::Merge(args) => run_merge(&loader, args).await?,
        Commands::Examples(args) => run_examples(&args)?,
        Commands::Example(args) => run_example(&loader, args).await?,
    };

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}

async fn load_source(loader: &CzmlLoader, source: &str) -> Result<LoadResult> {
    if source == "-" {
        let mut buf = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut buf)
            .await
            .context("Failed to read stdin")?;
        return Ok(load_from_file(&InMemoryFile::new("stdin", buf)).await);
    }
    if source.starts_with("http://") || source.starts_with("https://") {
        return Ok(loader.load_from_url(source).await);
    }
    Ok(load_from_file(&LocalFile::new(source)).await)
}

/// Prints the failure and returns `None` when the load did not succeed.
fn loaded_or_report(result: LoadResult, json: bool) -> Result<Option<(String, DocumentArray)>> {
    if result.is_success() {
        let source = result.source.clone();
        return Ok(result.into_result().ok().map(|data| (source, data)));
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(err) = result.error() {
        eprintln!("{}: {err}", result.source);
    }
    Ok(None)
}

async fn run_validate(loader: &CzmlLoader, args: ValidateArgs) -> Result<bool> {
    let result = load_source(loader, &args.input.source).await?;
    let Some((source, document)) = loaded_or_report(result, args.input.json)? else {
        return Ok(false);
    };
    print_validation(&source, &document, args.input.json, args.strict)
}

fn print_validation(
    source: &str,
    document: &DocumentArray,
    json: bool,
    strict: bool,
) -> Result<bool> {
    let result = validate_document(document);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::render_validation(source, &result));
    }
    Ok(result.valid && !(strict && !result.warnings.is_empty()))
}

async fn run_summary(loader: &CzmlLoader, args: SourceArgs) -> Result<bool> {
    let result = load_source(loader, &args.source).await?;
    let Some((_, document)) = loaded_or_report(result, args.json)? else {
        return Ok(false);
    };
    let summary = summarize(document.as_slice());
    let rejected = typed_rejections(&document);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        for (index, err) in &rejected {
            log::warn!("packet [{index}] does not fit the typed model: {err}");
        }
    } else {
        print!("{}", report::render_summary(&summary));
        print!("{}", report::render_rejections(&rejected));
    }
    Ok(true)
}

/// Packets the typed view cannot represent, with their array index.
fn typed_rejections(document: &DocumentArray) -> Vec<(usize, ModelError)> {
    document
        .packets()
        .enumerate()
        .filter_map(|(index, packet)| packet.err().map(|err| (index, err)))
        .collect()
}

async fn run_merge(loader: &CzmlLoader, args: MergeArgs) -> Result<bool> {
    let merged = loader.load_and_merge(&args.urls).await;
    let Some((_, document)) = loaded_or_report(merged, false)? else {
        return Ok(false);
    };
    let out = if args.pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        document.to_json_string()?
    };
    println!("{out}");
    Ok(true)
}

fn run_examples(args: &ExamplesArgs) -> Result<bool> {
    let examples = available_examples();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&examples)?);
    } else {
        for example in examples {
            println!("{:<16} {}", example.name, example.path);
        }
    }
    Ok(true)
}

async fn run_example(loader: &CzmlLoader, args: ExampleArgs) -> Result<bool> {
    let result = loader.load_example(&args.name).await;
    let Some((source, document)) = loaded_or_report(result, args.json)? else {
        return Ok(false);
    };
    print_validation(&source, &document, args.json, false)
}
