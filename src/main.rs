// src/main.rs
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::io::BufRead;
use std::sync::Arc;
use study_assistant::api::{HttpPageFetcher, LocalModel, LocalModelClient};
use study_assistant::artifacts::mcq::QuizScore;
use study_assistant::config::ArtifactRequests;
use study_assistant::output::{deliver_all, plan_exports, DeliveryTarget};
use study_assistant::sources::{FileSource, StdinSource, UrlSource};
use study_assistant::{
    AppError, CommandLineInput, ContentSource, Flashcard, GenerativeAdapter, McqItem,
    RenderSink, SessionConfig, SourceInput, StudySession, SummaryPhase, TerminalSink,
};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

type InputLines = mpsc::UnboundedReceiver<String>;

/// Sets up logging configuration. Console output goes to stderr so that
/// stdout stays clean for `--pipe`.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("study_assistant.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Results of the artifact triggers that later steps need.
#[derive(Default)]
struct StudyOutcome {
    mcqs: Option<Vec<McqItem>>,
    flashcards: Option<Vec<Flashcard>>,
}

fn build_adapter(config: &SessionConfig) -> Result<GenerativeAdapter, AppError> {
    let client = LocalModelClient::new(&config.endpoint).map_err(|e| AppError::InternalError {
        message: "Failed to build the model client".to_string(),
        source: Some(Box::new(e)),
    })?;
    log::debug!("Using model {} at {}", config.model, config.endpoint);
    Ok(GenerativeAdapter::new(
        Arc::new(LocalModel::summarizer(client.clone(), &config.model)),
        Arc::new(LocalModel::writer(client, &config.model)),
    ))
}

fn build_source(config: &SessionConfig) -> Box<dyn ContentSource> {
    match &config.source {
        SourceInput::File(path) => {
            let source = FileSource::new(path);
            match config.watch {
                Some(interval) => Box::new(source.watched(interval)),
                None => Box::new(source),
            }
        }
        SourceInput::Url(url) => Box::new(UrlSource::new(url.as_str(), HttpPageFetcher::new())),
        SourceInput::Stdin => Box::new(StdinSource),
    }
}

/// Fires every requested trigger at once. Each trigger renders its own
/// result or error, so failures here are only logged.
async fn run_artifacts(session: &StudySession, requests: &ArtifactRequests) -> StudyOutcome {
    let fetcher = HttpPageFetcher::new();

    let (mcqs, flashcards, _highlights, _comparison, _answer) = futures::join!(
        async {
            if !requests.mcq {
                return None;
            }
            session.generate_mcqs().await.ok()
        },
        async {
            if !requests.flashcards {
                return None;
            }
            session.generate_flashcards().await.ok()
        },
        async {
            if !requests.highlight {
                return None;
            }
            session.highlight().await.ok()
        },
        async {
            let url = requests.compare.as_ref()?;
            session.compare_with(&fetcher, url.as_str()).await.ok()
        },
        async {
            let question = requests.question.as_deref()?;
            session.ask(question).await.ok().flatten()
        },
    );

    StudyOutcome { mcqs, flashcards }
}

/// Reads stdin lines on a detached thread. A pending read there does not
/// hold up runtime shutdown.
fn stdin_lines() -> InputLines {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::warn!("Stopped reading stdin: {}", e);
                    break;
                }
            };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Asks each question on the terminal and keeps score.
async fn run_quiz(items: &[McqItem], lines: &mut InputLines) -> Result<QuizScore, AppError> {
    let mut score = QuizScore::default();
    let mut stdout = tokio::io::stdout();

    for (number, item) in items.iter().enumerate() {
        let mut prompt = format!("\nQ{}: {}\n", number + 1, item.question);
        for choice in &item.choices {
            prompt.push_str(&format!("  {}\n", choice));
        }
        prompt.push_str("Your answer: ");
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let Some(input) = lines.recv().await else {
            log::info!("Quiz ended early");
            break;
        };
        let Some(choice) = item.resolve_choice(&input) else {
            stdout.write_all(b"Skipped.\n").await?;
            continue;
        };

        let verdict = item.judge(choice);
        score.record(verdict.is_correct());
        stdout
            .write_all(format!("{}\n", verdict.feedback()).as_bytes())
            .await?;
    }

    stdout
        .write_all(format!("\nScore: {}/{}\n", score.correct, score.answered).as_bytes())
        .await?;
    Ok(score)
}

fn export(
    config: &SessionConfig,
    session: &StudySession,
    outcome: &StudyOutcome,
) -> Result<(), AppError> {
    let plan = plan_exports(
        &config.export,
        session.summary().valid_text(),
        outcome.flashcards.as_deref().unwrap_or_default(),
        chrono::Local::now().naive_local(),
    );
    if plan.is_empty() {
        return Ok(());
    }

    let report = deliver_all(plan)?;
    if config.export.pipe {
        return Ok(());
    }
    for completed in &report.completed {
        match completed {
            DeliveryTarget::WriteFile { path, .. } => println!("✓ Saved {}", path.display()),
            DeliveryTarget::CopyToClipboard { .. } => println!("✓ Summary copied to clipboard"),
            DeliveryTarget::PrintToStdout { .. } => {}
        }
    }
    Ok(())
}

/// Re-summarizes whenever the watched source reports new content or the
/// user types an option change, until the source closes or the user
/// interrupts.
async fn watch(
    session: &mut StudySession,
    source: &dyn ContentSource,
    commands: &mut InputLines,
) {
    let mut updates = source.subscribe();
    let mut commands_open = true;
    eprintln!(
        "Watching for changes. Type `type <value>`, `format <value>` or `length <value>` to change the summary; Ctrl-C stops."
    );
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted, stopping watch");
                break;
            }
            update = updates.recv() => match update {
                Some(content) => {
                    session.on_content_change(content).await;
                }
                None => break,
            },
            line = commands.recv(), if commands_open => match line {
                Some(line) => {
                    if let Err(e) = session.handle_option_command(&line).await {
                        log::warn!("Ignoring `{}`: {}", line.trim(), e);
                    }
                }
                None => commands_open = false,
            },
        }
    }
}

async fn run(config: SessionConfig) -> Result<(), AppError> {
    let adapter = build_adapter(&config)?;
    let sink: Arc<dyn RenderSink> = if config.export.pipe {
        Arc::new(TerminalSink::quiet())
    } else {
        Arc::new(TerminalSink::stdout())
    };
    let mut session = StudySession::new(
        adapter,
        sink,
        config.summary_options.clone(),
        config.max_chars,
        config.max_retries,
    );

    let source = build_source(&config);
    let content = source.initial().await?;
    let phase = session.on_content_change(content).await;
    if phase != SummaryPhase::Valid {
        log::warn!("No usable summary ({})", phase);
    }

    let mut input = stdin_lines();

    let outcome = if config.requests.any() {
        run_artifacts(&session, &config.requests).await
    } else {
        StudyOutcome::default()
    };

    if config.requests.quiz {
        match (&outcome.mcqs, &config.source) {
            (_, SourceInput::Stdin) => {
                log::warn!("--quiz needs an interactive stdin; the page was read from stdin")
            }
            (Some(items), _) if !items.is_empty() => {
                run_quiz(items, &mut input).await?;
            }
            _ => log::warn!("No questions to quiz on"),
        }
    }

    export(&config, &session, &outcome)?;

    if config.watch.is_some() {
        watch(&mut session, source.as_ref(), &mut input).await;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = SessionConfig::resolve(cli)?;

    run(config).await?;

    Ok(())
}
