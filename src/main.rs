use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use study_aid::config::LoggingConfig;
use study_aid::{
    export, log_system_event, Config, ContentGenerationService, Credentials, HttpContentBackend,
    QuizPhase, QuizSession, StudyWorkspace,
};

const SAMPLE_TEXT: &str = "Artificial Intelligence (AI) is a field of computer science focused on creating systems capable of performing tasks that typically require human intelligence. These tasks include understanding natural language, recognizing patterns, making decisions, and learning from data. Modern AI leverages machine learning and deep learning to build models that can generalize from examples. Responsible AI emphasizes fairness, transparency, and privacy.";

struct CliArgs {
    source: Option<PathBuf>,
    export_dir: Option<PathBuf>,
}

fn parse_args() -> Result<CliArgs> {
    let mut source = None;
    let mut export_dir = None;
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--export" => {
                let dir = args.next().context("--export requires a directory")?;
                export_dir = Some(PathBuf::from(dir));
            }
            "-h" | "--help" => {
                println!("usage: study-aid [FILE] [--export DIR]");
                std::process::exit(0);
            }
            _ => source = Some(PathBuf::from(arg)),
        }
    }

    Ok(CliArgs { source, export_dir })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let _guard = setup_logging(&config.logging)?;
    config.log_configuration_summary();
    config.validate()?;

    let args = parse_args()?;
    log_system_event!(startup, component = "cli", "study-aid starting");

    let credentials = Credentials::in_memory();
    if let Some(token) = &config.remote.token {
        credentials.init(token);
    }

    let backend = HttpContentBackend::new(&config.remote.base_url, config.remote.timeout(), credentials)?;
    let workspace = StudyWorkspace::new(ContentGenerationService::new(Box::new(backend)));

    let source_text = match &args.source {
        Some(path) => fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            println!("No input file given, using the built-in sample text.\n");
            SAMPLE_TEXT.to_string()
        }
    };

    let (summary, deck) = tokio::join!(
        workspace.request_summary(&source_text),
        workspace.request_flashcards(&source_text)
    );
    let summary = summary?.result;
    let deck = deck?.result;

    println!("Summary ({}):", summary.source);
    println!("{}\n", summary.content.to_text());

    println!("Flashcards ({}):", deck.source);
    println!("{}", export::to_text(&deck.content));

    if let Some(dir) = &args.export_dir {
        write_exports(dir, &deck.content).await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = workspace.start_quiz().await;
    run_quiz(&mut session, &mut lines).await?;

    log_system_event!(shutdown, component = "cli", "study-aid finished");
    Ok(())
}

async fn write_exports(dir: &Path, deck: &study_aid::FlashcardDeck) -> Result<()> {
    fs::create_dir_all(dir).await?;

    let text_path = dir.join("flashcards.txt");
    fs::write(&text_path, export::to_text(deck)).await?;

    let json_path = dir.join("flashcards.json");
    fs::write(&json_path, export::to_json(deck)?).await?;

    info!(
        text = %text_path.display(),
        json = %json_path.display(),
        "Exported flashcards"
    );
    println!("Exported flashcards to {}\n", dir.display());
    Ok(())
}

async fn run_quiz(session: &mut QuizSession, lines: &mut Lines<BufReader<Stdin>>) -> Result<()> {
    if session.phase() == QuizPhase::NotStarted {
        println!("No flashcards available, nothing to quiz.");
        return Ok(());
    }

    loop {
        while let Some(card) = session.current_card().cloned() {
            println!(
                "\nQuestion {} of {} (score {}/{})",
                session.current_index() + 1,
                session.cards().len(),
                session.score(),
                session.cards().len()
            );
            println!("{}", card.question);

            let Some(answer) = lines.next_line().await? else {
                return Ok(());
            };

            match session.submit_answer(&answer) {
                Ok(attempt) => {
                    if attempt.is_correct {
                        println!("Correct!");
                    } else {
                        println!("Incorrect. Correct answer: {}", attempt.correct_answer);
                    }
                }
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            }

            session.advance()?;
        }

        if let Some(report) = session.report() {
            println!("\nQuiz complete: {} / {} ({}% correct)", report.score, report.total, report.percent);
            println!("{}", report.performance.message());
            println!("\nReview:");
            for (i, attempt) in report.attempts.iter().enumerate() {
                let mark = if attempt.is_correct { "correct" } else { "incorrect" };
                println!("Q{}: {}", i + 1, attempt.question);
                println!("   Your answer: {} ({})", attempt.user_answer, mark);
                if !attempt.is_correct {
                    println!("   Correct answer: {}", attempt.correct_answer);
                }
            }
        }

        println!("\nRetake the quiz? [y/N]");
        match lines.next_line().await? {
            Some(reply) if reply.trim().eq_ignore_ascii_case("y") => {
                session.restart()?;
            }
            _ => return Ok(()),
        }
    }
}

fn setup_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::fmt;

    let env_filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = config.console_enabled.then(|| {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(true)
            .with_writer(std::io::stderr)
            .boxed()
    });

    let mut guard = None;
    let file_layer = if config.file_enabled {
        std::fs::create_dir_all(&config.log_directory).unwrap_or_else(|e| {
            eprintln!("Warning: Could not create logs directory: {}", e);
        });

        let file_appender = tracing_appender::rolling::daily(&config.log_directory, "study-aid.log");
        let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        Some(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(non_blocking_file)
                .boxed(),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    info!(
        directory = %config.log_directory,
        file_enabled = config.file_enabled,
        console_enabled = config.console_enabled,
        "Logging initialized"
    );

    Ok(guard)
}
