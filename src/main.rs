// src/main.rs
// Tutor - command line front end for the tutoring operations

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tutor::TutorError;
use tutor::config::{EnvConfig, Settings};
use tutor::tutor::scoring::{QuizScore, level_for_points, points_to_next_level};
use tutor::tutor::{Depth, Difficulty, OperationResult, TeachContext, TutorService, UserProgress};

#[derive(Parser)]
#[command(name = "tutor")]
#[command(about = "AI tutor with multi-provider fallback")]
#[command(version)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Skip all providers and serve mock content
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the tutor one question
    Teach {
        message: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        style: Option<String>,
    },

    /// Interactive tutoring session (type "quit" to leave)
    Chat {
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        style: Option<String>,
    },

    /// Explain a concept
    Explain {
        concept: String,
        #[arg(long, default_value = "general")]
        subject: String,
        /// simple, detailed or advanced
        #[arg(long, default_value = "detailed")]
        depth: Depth,
    },

    /// Generate a multiple-choice quiz
    Quiz {
        subject: String,
        /// easy, medium or hard
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
        /// Comma-separated answers to grade, e.g. "A,C,B"
        #[arg(long)]
        answers: Option<String>,
    },

    /// Create a study plan
    Plan {
        subject: String,
        /// Time available, e.g. "4-week"
        #[arg(long, default_value = "4-week")]
        time: String,
        #[arg(long, default_value = "beginner")]
        level: String,
        #[arg(long)]
        goals: String,
    },

    /// Analyze learner progress from a JSON file
    Progress {
        /// File with completedTopics, quizScores, timeSpent, strengths, weaknesses
        file: PathBuf,
    },

    /// Generate practice problems
    Practice {
        subject: String,
        topic: String,
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
        #[arg(short = 'n', long, default_value_t = 3)]
        count: usize,
    },

    /// Show provider availability and configuration problems
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".tutor/.env"));
    }
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let mut settings = Settings::load();
    if cli.mock {
        settings.force_mock = true;
    }
    info!(providers = %settings.api_keys.summary(), "Tutor starting");
    let service = TutorService::from_settings(&settings);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let outcome = run(&cli, &service, &cancel).await;
    match outcome {
        Err(e) => match e.downcast_ref::<TutorError>() {
            Some(err @ (TutorError::Cancelled | TutorError::InvalidInput(_))) => {
                eprintln!("{}", err.to_user_string());
                std::process::exit(1);
            }
            _ => Err(e),
        },
        Ok(()) => Ok(()),
    }
}

async fn run(cli: &Cli, service: &TutorService, cancel: &CancellationToken) -> Result<()> {
    match &cli.command {
        Commands::Teach {
            message,
            subject,
            level,
            style,
        } => {
            let ctx = teach_context(subject.as_deref(), level.as_deref(), style.as_deref());
            let result = service.teach(message, &ctx, cancel).await?;
            emit(cli.json, &result, |reply| reply.response.clone())?;
        }
        Commands::Chat {
            subject,
            level,
            style,
        } => {
            let ctx = teach_context(subject.as_deref(), level.as_deref(), style.as_deref());
            run_chat(service, ctx, cli.json, cancel).await?;
        }
        Commands::Explain {
            concept,
            subject,
            depth,
        } => {
            let result = service.explain_concept(concept, subject, *depth, cancel).await?;
            emit(cli.json, &result, |r| r.explanation.clone())?;
        }
        Commands::Quiz {
            subject,
            difficulty,
            count,
            answers,
        } => {
            let result = service.generate_quiz(subject, *difficulty, *count, cancel).await?;
            emit(cli.json, &result, |questions| {
                let mut out = String::new();
                for (idx, q) in questions.iter().enumerate() {
                    out.push_str(&format!("{}. {}\n", idx + 1, q.question));
                    for option in &q.options {
                        out.push_str(&format!("   {}\n", option));
                    }
                }
                out
            })?;

            if let Some(answers) = answers {
                let answers: Vec<&str> = answers.split(',').map(str::trim).collect();
                let score = QuizScore::grade(&result.content, &answers);
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&score)?);
                } else {
                    let points = u64::from(score.points_earned);
                    println!(
                        "Score: {}/{} ({}%) {}",
                        score.correct,
                        score.total,
                        score.percentage,
                        if score.passed { "passed" } else { "not passed" }
                    );
                    println!(
                        "Points: {} (level {}, {} to next level)",
                        points,
                        level_for_points(points),
                        points_to_next_level(points)
                    );
                }
            }
        }
        Commands::Plan {
            subject,
            time,
            level,
            goals,
        } => {
            let result = service.create_study_plan(subject, time, level, goals, cancel).await?;
            emit(cli.json, &result, |plan| plan.plan.clone())?;
        }
        Commands::Progress { file } => {
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("reading {}", file.display()))?;
            let progress: UserProgress = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", file.display()))?;
            let result = service.analyze_progress(&progress, cancel).await?;
            emit(cli.json, &result, |a| {
                let mut out = a.analysis.clone();
                out.push_str("\n\nRecommendations:\n");
                for rec in &a.recommendations {
                    out.push_str(&format!("- {}\n", rec));
                }
                out.push_str(&format!("Motivational score: {}", a.motivational_score));
                out
            })?;
        }
        Commands::Practice {
            subject,
            topic,
            difficulty,
            count,
        } => {
            let result = service
                .generate_practice_problems(subject, topic, *difficulty, *count, cancel)
                .await?;
            emit(cli.json, &result, |p| p.problems.clone())?;
        }
        Commands::Status => {
            let status = service.status();
            let validation = EnvConfig::load().validate();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                let available: Vec<_> = status.available.iter().map(|p| p.to_string()).collect();
                if available.is_empty() {
                    println!("Providers: none");
                } else {
                    println!("Providers: {}", available.join(", "));
                }
                println!(
                    "Sticky: {}",
                    status.sticky.map(|p| p.to_string()).unwrap_or_else(|| "none".into())
                );
                println!("Mock mode: {}", if status.mock_latched { "on" } else { "off" });
                println!("{}", validation.report());
            }
        }
    }
    Ok(())
}

async fn run_chat(
    service: &TutorService,
    ctx: TeachContext,
    json: bool,
    cancel: &CancellationToken,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprintln!("Ask a question (\"quit\" to leave).");

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            break;
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message, "quit" | "exit") {
            break;
        }

        match service.teach(message, &ctx, cancel).await {
            Ok(result) => emit(json, &result, |reply| reply.response.clone())?,
            Err(TutorError::Cancelled) => break,
            Err(e) => eprintln!("{}", e.to_user_string()),
        }
    }
    Ok(())
}

fn teach_context(subject: Option<&str>, level: Option<&str>, style: Option<&str>) -> TeachContext {
    TeachContext {
        subject: subject.map(str::to_string),
        level: level.map(str::to_string),
        learning_style: style.map(str::to_string),
    }
}

fn emit<T: Serialize>(
    json: bool,
    result: &OperationResult<T>,
    render: impl FnOnce(&T) -> String,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("{}", render(&result.content));
    match (result.used_mock_mode, result.provider) {
        (false, Some(provider)) => eprintln!("[answered by {}]", provider),
        (true, Some(provider)) => eprintln!("[{} reply unusable, showing offline content]", provider),
        _ => eprintln!("[offline mode]"),
    }
    Ok(())
}
