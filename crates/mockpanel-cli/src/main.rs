//! mockpanel - practice interview answers in front of an AI jury
//!
//! ## Commands
//!
//! - `evaluate`: run the three-persona panel against an answer
//! - `questions`: browse the practice question bank
//! - `score`: submit scores and inspect per-question standing
//! - `coach`: run one guided-framework coaching turn

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use mockpanel_core::{EvaluationRequest, FlowStep};
use mockpanel_llm::{AnthropicClient, Coach, CoachRequest, CoachTurn, PanelInvoker};
use mockpanel_store::{JsonFileLedger, ScoreLedger};

#[derive(Parser)]
#[command(name = "mockpanel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mock interview panel: three AI interviewers, one jury verdict", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an answer with the full interviewer panel
    Evaluate {
        /// Question id from the bank (mutually exclusive with --question)
        #[arg(long, conflicts_with = "question")]
        question_id: Option<String>,

        /// Free-form question text
        #[arg(long)]
        question: Option<String>,

        /// Path to the answer text (stdin when omitted)
        #[arg(short, long)]
        answer_file: Option<PathBuf>,

        /// Record the overall score and print your standing
        #[arg(long)]
        record: bool,

        /// Scores file path (default: data/scores.json or MOCKPANEL_SCORES_FILE)
        #[arg(long)]
        scores_file: Option<PathBuf>,
    },

    /// Browse the practice question bank
    Questions {
        #[command(subcommand)]
        action: QuestionAction,
    },

    /// Submit scores and inspect per-question history
    Score {
        #[command(subcommand)]
        action: ScoreAction,
    },

    /// Run one guided-framework coaching turn
    Coach {
        /// The interview question being practiced
        #[arg(long)]
        question: String,

        /// Current framework step (e.g. goal, segments, pain_points)
        #[arg(long, default_value = "goal")]
        step: String,

        /// The candidate's response for this turn
        #[arg(long)]
        response: String,

        /// Optional JSON file with prior conversation turns
        #[arg(long)]
        history_file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum QuestionAction {
    /// List every question in the bank
    List,
    /// Show one question by id
    Show { id: String },
    /// Pick a random question
    Random,
}

#[derive(Subcommand)]
enum ScoreAction {
    /// Record a score and print percentile standing plus stats
    Submit {
        #[arg(long)]
        question_id: String,

        /// Overall score, 0-100
        #[arg(long)]
        score: u32,

        #[arg(long)]
        scores_file: Option<PathBuf>,
    },
    /// Print aggregate stats for a question
    Stats {
        #[arg(long)]
        question_id: String,

        #[arg(long)]
        scores_file: Option<PathBuf>,
    },
}

fn ledger_at(path: Option<PathBuf>) -> JsonFileLedger {
    match path {
        Some(p) => JsonFileLedger::new(p),
        None => JsonFileLedger::from_env(),
    }
}

fn resolve_question(question_id: Option<String>, question: Option<String>) -> Result<(String, Option<String>)> {
    match (question_id, question) {
        (Some(id), _) => {
            let q = mockpanel_core::question::by_id(&id)
                .with_context(|| format!("no question with id '{id}' in the bank"))?;
            Ok((q.question, Some(q.id)))
        }
        (None, Some(text)) => Ok((text, None)),
        (None, None) => bail!("provide --question-id or --question"),
    }
}

fn read_answer(answer_file: Option<PathBuf>) -> Result<String> {
    match answer_file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read answer from {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read answer from stdin")?;
            Ok(buf)
        }
    }
}

fn parse_step(step: &str) -> Result<FlowStep> {
    serde_json::from_value(serde_json::Value::String(step.to_string()))
        .with_context(|| format!("unknown framework step '{step}'"))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    mockpanel_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Evaluate {
            question_id,
            question,
            answer_file,
            record,
            scores_file,
        } => {
            let (question_text, bank_id) = resolve_question(question_id, question)?;
            let answer = read_answer(answer_file)?;
            let request = EvaluationRequest::new(question_text, answer);

            let client = AnthropicClient::from_env()?;
            let invoker = PanelInvoker::new(Arc::new(client));
            info!(panelists = invoker.panel().len(), "running panel evaluation");
            let jury = invoker.evaluate(&request).await?;
            print_json(&jury)?;

            if record {
                let question_key = bank_id.unwrap_or_else(|| "adhoc".to_string());
                let ledger = ledger_at(scores_file);
                let standing = ledger
                    .submit(&question_key, u32::from(jury.overall_score))
                    .await?;
                print_json(&standing)?;
            }
        }

        Commands::Questions { action } => match action {
            QuestionAction::List => print_json(&mockpanel_core::question::bank())?,
            QuestionAction::Show { id } => {
                let q = mockpanel_core::question::by_id(&id)
                    .with_context(|| format!("no question with id '{id}'"))?;
                print_json(&q)?;
            }
            QuestionAction::Random => print_json(&mockpanel_core::question::random())?,
        },

        Commands::Score { action } => match action {
            ScoreAction::Submit {
                question_id,
                score,
                scores_file,
            } => {
                let ledger = ledger_at(scores_file);
                let standing = ledger.submit(&question_id, score).await?;
                let stats = ledger.stats(&question_id).await?;
                print_json(&serde_json::json!({
                    "percentile": standing.percentile,
                    "rank": standing.rank,
                    "totalResponses": standing.total_responses,
                    "stats": stats,
                }))?;
            }
            ScoreAction::Stats {
                question_id,
                scores_file,
            } => {
                let ledger = ledger_at(scores_file);
                let stats = ledger.stats(&question_id).await?;
                print_json(&stats)?;
            }
        },

        Commands::Coach {
            question,
            step,
            response,
            history_file,
        } => {
            let current_step = parse_step(&step)?;
            let history: Vec<CoachTurn> = match history_file {
                Some(path) => {
                    let data = std::fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    serde_json::from_str(&data).context("history file is not valid JSON")?
                }
                None => Vec::new(),
            };

            let client = AnthropicClient::from_env()?;
            let coach = Coach::new(Arc::new(client));
            let reply = coach
                .advise(&CoachRequest {
                    question,
                    current_step,
                    user_response: response,
                    conversation_history: history,
                })
                .await?;
            print_json(&reply)?;
        }
    }

    Ok(())
}
