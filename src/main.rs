use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use encounter_annotator::{
    AnnotateConfig, AnnotationReport, Annotator, AnthropicClient, AnthropicConfig,
    DEFAULT_EXAMINER_LABEL, JsonlStore, SentimentBackend, Taxonomy, ToneLexicon,
    parse_transcribe_file,
};

#[derive(Parser)]
#[command(name = "encounter-annotator")]
#[command(author, version, about = "Examination transcript annotation pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Annotate a transcript and persist declared tests and demeanor flags
    Process {
        /// Input transcript file (Transcribe JSON format)
        #[arg(short, long)]
        input: PathBuf,

        /// Session the annotations belong to
        #[arg(short, long)]
        session_id: String,

        /// Speaker label of the examiner
        #[arg(long, default_value = DEFAULT_EXAMINER_LABEL)]
        examiner: String,

        /// Directory of the annotation store
        #[arg(long, default_value = "annotations")]
        store_dir: PathBuf,

        /// Output file for the annotation result (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for the human-readable report (text)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Taxonomy file replacing the built-in test catalog (JSON)
        #[arg(long)]
        taxonomy: Option<PathBuf>,

        /// Ask the LLM when pattern matching finds no tests
        #[arg(long)]
        llm_fallback: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze a transcript without persisting anything
    Analyze {
        /// Input transcript file (Transcribe JSON format)
        #[arg(short, long)]
        input: PathBuf,

        /// Speaker label of the examiner
        #[arg(long, default_value = DEFAULT_EXAMINER_LABEL)]
        examiner: String,

        /// Taxonomy file replacing the built-in test catalog (JSON)
        #[arg(long)]
        taxonomy: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the test taxonomy
    Taxonomy {
        /// Taxonomy file to list instead of the built-in catalog (JSON)
        #[arg(long)]
        taxonomy: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            session_id,
            examiner,
            store_dir,
            output,
            report,
            taxonomy,
            llm_fallback,
            verbose,
        } => {
            setup_logging(verbose);
            process_transcript(
                input,
                session_id,
                examiner,
                store_dir,
                output,
                report,
                taxonomy,
                llm_fallback,
            )
            .await
        }
        Commands::Analyze {
            input,
            examiner,
            taxonomy,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_transcript(input, examiner, taxonomy).await
        }
        Commands::Taxonomy { taxonomy } => {
            setup_logging(false);
            list_taxonomy(taxonomy)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_taxonomy(path: Option<&Path>) -> Result<Taxonomy> {
    match path {
        Some(path) => {
            info!("Loading taxonomy from {:?}", path);
            Taxonomy::from_json_file(path)
                .with_context(|| format!("Failed to load taxonomy: {:?}", path))
        }
        None => Taxonomy::builtin().context("Failed to compile built-in taxonomy"),
    }
}

#[allow(clippy::too_many_arguments)]
async fn process_transcript(
    input: PathBuf,
    session_id: String,
    examiner: String,
    store_dir: PathBuf,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
    taxonomy: Option<PathBuf>,
    llm_fallback: bool,
) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let transcript = parse_transcribe_file(&input).context("Failed to parse input transcript")?;

    info!(
        "Loaded {} items, {} segments, {} speakers",
        transcript.items.len(),
        transcript.segments.len(),
        transcript.speakers().len()
    );

    let taxonomy = load_taxonomy(taxonomy.as_deref())?;
    let lexicon = ToneLexicon::builtin().context("Failed to compile tone lexicon")?;
    let sentiment = SentimentBackend::from_env().context("Failed to configure sentiment service")?;
    if !sentiment.is_enabled() {
        info!("SENTIMENT_ENDPOINT not set, skipping sentiment analysis");
    }

    let client = if llm_fallback {
        let api_config = AnthropicConfig::from_env()?;
        Some(AnthropicClient::new(api_config)?)
    } else {
        None
    };

    let store = JsonlStore::open(&store_dir)
        .with_context(|| format!("Failed to open annotation store: {:?}", store_dir))?;

    let config = AnnotateConfig {
        examiner_label: examiner,
        ..Default::default()
    };
    let mut annotator = Annotator::new(&taxonomy, &lexicon, &sentiment, config);
    if let Some(client) = &client {
        annotator = annotator.with_fallback(client);
    }

    let result = annotator
        .annotate_and_persist(&session_id, &transcript, &store)
        .await
        .context("Failed to persist annotations")?;

    if let Some(output) = &output {
        result.write_json(output)?;
        info!("Output written to {:?}", output);
    }
    if let Some(report) = &report {
        AnnotationReport::new(&result).write_file(report)?;
        info!("Report written to {:?}", report);
    }

    info!(
        "Complete: {} declared tests, {} demeanor flags stored in {:?}",
        result.persisted_step_ids.len(),
        result.persisted_flag_ids.len(),
        store.dir()
    );

    Ok(())
}

async fn analyze_transcript(
    input: PathBuf,
    examiner: String,
    taxonomy: Option<PathBuf>,
) -> Result<()> {
    info!("Analyzing transcript from {:?}", input);
    let transcript = parse_transcribe_file(&input).context("Failed to parse input transcript")?;

    let taxonomy = load_taxonomy(taxonomy.as_deref())?;
    let lexicon = ToneLexicon::builtin().context("Failed to compile tone lexicon")?;
    let sentiment = SentimentBackend::from_env().context("Failed to configure sentiment service")?;

    let config = AnnotateConfig {
        examiner_label: examiner.clone(),
        ..Default::default()
    };
    let annotator = Annotator::new(&taxonomy, &lexicon, &sentiment, config);

    let session_id = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let result = annotator.annotate(&session_id, &transcript).await;

    println!("Transcript Analysis");
    println!("===================");
    println!("Items: {}", transcript.items.len());
    println!("Segments: {}", transcript.segments.len());
    println!("Speakers: {:?}", transcript.speakers());
    println!("Examiner: {}", examiner);
    println!("Duration: {:.1}s", transcript.duration());
    println!();

    println!("Declared Tests");
    println!("--------------");
    println!("Total: {}", result.summary.test_count);
    for (category, count) in &result.summary.tests_by_category {
        println!("{}: {}", category, count);
    }
    println!();

    println!("Demeanor Flags");
    println!("--------------");
    println!("Total: {}", result.summary.flag_count);
    for (flag_type, count) in &result.summary.flags_by_type {
        println!("{}: {}", flag_type, count);
    }
    println!();

    print!("{}", AnnotationReport::new(&result).format());

    Ok(())
}

fn list_taxonomy(taxonomy: Option<PathBuf>) -> Result<()> {
    let taxonomy = load_taxonomy(taxonomy.as_deref())?;

    println!("{:<32} {:<13} {:<8} {:>8} {:>8}", "LABEL", "CATEGORY", "PRIORITY", "KEYWORDS", "PATTERNS");
    for signature in taxonomy.iter() {
        println!(
            "{:<32} {:<13} {:<8} {:>8} {:>8}",
            signature.label,
            signature.category.to_string(),
            signature.priority.to_string(),
            signature.keywords.len(),
            signature.patterns.len()
        );
    }
    println!();
    println!("{} entries", taxonomy.len());

    Ok(())
}
