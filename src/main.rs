use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use cli::prompt::resolve_coordinate;
use config::Config;

use solvr::artifact::{ArtifactSlot, ArtifactStore};
use solvr::collab::{AnswerSubmitter, AocClient, SubmitOutcome, ensure_puzzle, read_answer};
use solvr::domain::{PuzzleCoordinate, RunOutcome};
use solvr::llm::AnthropicClient;
use solvr::prompt::load_template;
use solvr::runner::SolveRunner;
use solvr::tools::{ToolContext, ToolRegistry};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("solvr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("solvr.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let coordinate = {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        resolve_coordinate(cli.year, cli.day, cli.part, &mut input, &mut output)?
    };
    let store = ArtifactStore::new(&config.artifacts.root, &config.artifacts.extension);

    if cli.is_verbose() {
        println!("{} {}", "Artifacts:".cyan(), store.dir(&coordinate).display());
    }

    match &cli.command {
        Commands::Solve { no_fetch, submit } => handle_solve_command(&coordinate, &store, *no_fetch, *submit, config).await,
        Commands::Fetch => handle_fetch_command(&coordinate, &store, config).await,
        Commands::Submit => handle_submit_command(&coordinate, &store, config).await,
    }
}

fn aoc_client(config: &Config) -> Result<AocClient> {
    AocClient::from_env(
        &config.aoc.base_url,
        std::time::Duration::from_millis(config.aoc.timeout_ms),
    )
    .context("Failed to create Advent of Code client")
}

async fn handle_fetch_command(coordinate: &PuzzleCoordinate, store: &ArtifactStore, config: &Config) -> Result<()> {
    info!("Fetching puzzle {}", coordinate);
    let client = aoc_client(config)?;

    let fetched = ensure_puzzle(store, &client, coordinate)
        .await
        .context("Failed to fetch puzzle")?;
    if fetched {
        println!("{} {} into {}", "Fetched".green(), coordinate, store.dir(coordinate).display());
    } else {
        println!("{} {} already present", "Skipped:".yellow(), coordinate);
    }
    Ok(())
}

async fn handle_solve_command(
    coordinate: &PuzzleCoordinate,
    store: &ArtifactStore,
    no_fetch: bool,
    submit: bool,
    config: &Config,
) -> Result<()> {
    info!("Solving {} (no_fetch: {}, submit: {})", coordinate, no_fetch, submit);

    if no_fetch {
        for slot in [ArtifactSlot::Description, ArtifactSlot::RawInput] {
            if !store.slot_exists(coordinate, slot) {
                return Err(eyre!(
                    "{} missing at {}; run fetch first",
                    slot.file_name(store.extension()),
                    store.dir(coordinate).display()
                ));
            }
        }
    } else {
        ensure_puzzle(store, &aoc_client(config)?, coordinate)
            .await
            .context("Failed to fetch puzzle")?;
    }

    let llm = Arc::new(AnthropicClient::new(config.anthropic()).context("Failed to create LLM client")?);
    let registry = Arc::new(ToolRegistry::new(Arc::new(config.executor()), config.templates()));
    let template = load_template(config.prompt.template_path.as_deref()).context("Failed to load prompt template")?;

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            flag.store(true, Ordering::SeqCst);
        }
    });

    let runner = SolveRunner::new(llm.clone(), registry)
        .with_config(config.runner_config())
        .with_template(template)
        .with_cancel_flag(cancel);

    let ctx = ToolContext::new(*coordinate, store.clone(), &config.command.workdir);
    println!("{} {} with {}", "Solving".cyan(), coordinate, config.llm.model);

    let report = runner.run(&ctx).await.context("Solve run failed to start")?;
    let usage = llm.total_usage();
    println!(
        "{} {} oracle calls, {} input / {} output tokens",
        "Finished:".cyan(),
        report.oracle_calls,
        usage.input_tokens,
        usage.output_tokens
    );
    for slot in &report.written {
        println!("  {} {}", "wrote".dimmed(), store.resolve(coordinate, *slot).display());
    }

    match &report.outcome {
        RunOutcome::Completed(text) => {
            println!("{} {}", "Completed:".green(), text.trim());
        }
        other => {
            println!("{} {}", "Run ended:".red(), other);
            return Err(eyre!("Run for {} ended without an answer: {}", coordinate, other));
        }
    }

    if submit {
        submit_answer(coordinate, store, &aoc_client(config)?).await?;
    }
    Ok(())
}

async fn handle_submit_command(coordinate: &PuzzleCoordinate, store: &ArtifactStore, config: &Config) -> Result<()> {
    info!("Submitting answer for {}", coordinate);
    submit_answer(coordinate, store, &aoc_client(config)?).await
}

async fn submit_answer(coordinate: &PuzzleCoordinate, store: &ArtifactStore, submitter: &dyn AnswerSubmitter) -> Result<()> {
    let answer = read_answer(store, coordinate).await.context("Failed to read answer")?;
    println!("{} {}", "Submitting answer:".cyan(), answer);

    let outcome = submitter
        .submit(coordinate, &answer)
        .await
        .context("Failed to submit answer")?;
    info!("Submission for {}: {}", coordinate, outcome);

    match outcome {
        SubmitOutcome::Correct => {
            println!("{}", "Correct answer! Puzzle completed!".green());
            Ok(())
        }
        SubmitOutcome::Incorrect => {
            println!("{}", "Wrong answer. Try again.".red());
            Err(eyre!("Wrong answer submitted"))
        }
        SubmitOutcome::RateLimited => {
            println!("{}", "You must wait before trying again.".yellow());
            Err(eyre!("Rate limited, wait before trying again"))
        }
        SubmitOutcome::Unexpected(text) => {
            println!("{}", "Unexpected response. Check the website.".yellow());
            Err(eyre!("Unexpected response from Advent of Code: {}", text))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
