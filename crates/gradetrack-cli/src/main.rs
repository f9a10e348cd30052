//! gradetrack CLI: record exams and inspect score statistics.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gradetrack", version, about = "Exam score tracking and statistics")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Fields shared by `add` and `update`.
#[derive(Args)]
pub struct ExamArgs {
    /// Exam name
    #[arg(long)]
    name: String,

    /// Exam date (YYYY-MM-DD)
    #[arg(long)]
    date: chrono::NaiveDate,

    /// Exam type: monthly, midterm, final, mock, weekly, other
    #[arg(long = "type", default_value = "monthly")]
    exam_type: String,

    /// Grade: senior1, senior2, senior3
    #[arg(long, default_value = "senior1")]
    grade: String,

    /// Semester: first, second
    #[arg(long, default_value = "first")]
    semester: String,

    /// Subject score as subject=value (repeatable)
    #[arg(long = "score", value_name = "SUBJECT=VALUE")]
    scores: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config file
    Init,

    /// Record a new exam
    Add(ExamArgs),

    /// Replace an existing exam
    Update {
        /// Exam id
        id: String,

        #[command(flatten)]
        exam: ExamArgs,
    },

    /// Delete an exam
    Remove {
        /// Exam id
        id: String,
    },

    /// List exams, newest first
    List {
        /// Only this grade
        #[arg(long)]
        grade: Option<String>,

        /// Only this semester
        #[arg(long)]
        semester: Option<String>,
    },

    /// Show per-subject statistics
    Stats,

    /// Show the chronological trend
    Trend {
        /// Only this subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Show the latest exam's score profile
    Radar,

    /// Manage per-subject goals
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },

    /// Write a dashboard report
    Report {
        /// Output file
        #[arg(long)]
        output: PathBuf,

        /// Output format: html, markdown, json
        #[arg(long, default_value = "html")]
        format: String,
    },
}

#[derive(Subcommand)]
enum GoalAction {
    /// Set a target score
    Set { subject: String, target: f64 },
    /// Clear a target score
    Clear { subject: String },
    /// Show progress toward every goal
    Show,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradetrack=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let workspace =
        || commands::Workspace::load(cli.config.as_deref(), cli.data_dir.clone());

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Add(exam) => commands::exams::add(&workspace()?, exam),
        Commands::Update { id, exam } => commands::exams::update(&workspace()?, &id, exam),
        Commands::Remove { id } => commands::exams::remove(&workspace()?, &id),
        Commands::List { grade, semester } => {
            commands::exams::list(&workspace()?, grade.as_deref(), semester.as_deref())
        }
        Commands::Stats => commands::stats::execute(&workspace()?),
        Commands::Trend { subject } => commands::trend::execute(&workspace()?, subject.as_deref()),
        Commands::Radar => commands::radar::execute(&workspace()?),
        Commands::Goal { action } => {
            let ws = workspace()?;
            match action {
                GoalAction::Set { subject, target } => commands::goals::set(&ws, &subject, target),
                GoalAction::Clear { subject } => commands::goals::clear(&ws, &subject),
                GoalAction::Show => commands::goals::show(&ws),
            }
        }
        Commands::Report { output, format } => {
            commands::report::execute(&workspace()?, &output, &format)
        }
    }
}
