use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::warn;
use serde::Serialize;

use pfas_model::load_classifier;
use pfas_schema::Task;
use pfas_screen::{FailureReport, ScreeningReport, ScreeningSession, SubmissionOutcome};
use pfas_validate::validate;

#[derive(Debug, Parser)]
#[command(
    name = "pfas_screen",
    version,
    about = "PFAS risk screening for wastewater treatment plants",
    long_about = "pfas_screen validates operational measurements against a screening task's\n\
        form and feeds them to a pre-trained classifier artifact.\n\n\
        Each task carries the field order, default values, and outcome messages of the\n\
        deployed monitoring forms. Inputs you do not supply fall back to the form's\n\
        defaults, so an empty submission screens the untouched form.\n\n\
        EXAMPLES:\n\
        \n  pfas_screen tasks                                      List the screening tasks\n\
        \n  pfas_screen fields influent-classification             Show a task's form\n\
        \n  pfas_screen check influent-classification --set ph=6.8 Validate inputs only\n\
        \n  pfas_screen predict influent-classification \\\n\
        \n      --model models/CatBoost_model_inf.json --set ph=6.8",
    after_help = "Set RUST_LOG=debug for artifact loading and registry detail."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the built-in screening tasks
    #[command(about = "List the built-in screening tasks and their artifacts")]
    Tasks(TasksArgs),

    /// Show the ordered form of one task
    #[command(
        about = "Show a task's form: field keys, defaults, and bounds",
        long_about = "Prints every field of a task's form in feature-vector order, with its\n\
            default value and bounds. The order shown is the order the classifier\n\
            receives; this is the table `--set` keys are checked against."
    )]
    Fields(FieldsArgs),

    /// Validate inputs without invoking a classifier
    #[command(
        about = "Validate a submission and show the feature vector it produces",
        long_about = "Runs batch validation only: every field is checked and every failure\n\
            reported together. Exit code 0 when all inputs are valid, 1 when any\n\
            field fails, 2 on usage errors."
    )]
    Check(CheckArgs),

    /// Validate, classify, and print the risk message
    #[command(
        about = "Run the full pipeline against a classifier artifact",
        long_about = "Validates the submission and, when every field passes, feeds the\n\
            feature vector to the artifact's classifier and prints the task's\n\
            outcome message. Exit code 0 on a prediction, 1 on invalid input,\n\
            2 on usage, I/O, or model errors."
    )]
    Predict(PredictArgs),
}

#[derive(Debug, Args, Clone)]
struct TasksArgs {
    /// Emit the catalog as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args, Clone)]
struct FieldsArgs {
    /// Task identifier (see `pfas_screen tasks`)
    #[arg(value_name = "TASK")]
    task: String,

    /// Emit the field table as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args, Clone)]
struct CheckArgs {
    /// Task identifier (see `pfas_screen tasks`)
    #[arg(value_name = "TASK")]
    task: String,

    /// Override one field, e.g. --set ph=6.8 (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// JSON file of field overrides (an object of string or numeric values)
    #[arg(long = "input", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args, Clone)]
struct PredictArgs {
    /// Task identifier (see `pfas_screen tasks`)
    #[arg(value_name = "TASK")]
    task: String,

    /// Path to the classifier artifact JSON file
    #[arg(long = "model", value_name = "FILE")]
    model: PathBuf,

    /// Override one field, e.g. --set ph=6.8 (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// JSON file of field overrides (an object of string or numeric values)
    #[arg(long = "input", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct TaskSummary {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    fields: usize,
    default_artifact: String,
}

#[derive(Debug, Serialize)]
struct FieldSummary<'a> {
    key: &'a str,
    label: &'a str,
    default: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<(f64, f64)>,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    task: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    vector: Option<Vec<f64>>,
    failures: Vec<FailureReport>,
}

fn resolve_task(id: &str) -> Result<Task, String> {
    Task::from_id(id).ok_or_else(|| {
        let known: Vec<&str> = Task::ALL.iter().map(|t| t.id()).collect();
        format!("unknown task '{id}' (expected one of: {})", known.join(", "))
    })
}

fn parse_set_overrides(pairs: &[String]) -> Result<Vec<(String, String)>, String> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.trim().to_string(), value.to_string()))
                .ok_or_else(|| format!("invalid --set '{pair}', expected KEY=VALUE"))
        })
        .collect()
}

fn read_input_file(path: &Path) -> Result<Vec<(String, String)>, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {e}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| format!("invalid JSON in '{}': {e}", path.display()))?;
    let serde_json::Value::Object(entries) = value else {
        return Err(format!(
            "'{}' must contain a JSON object of field values",
            path.display()
        ));
    };

    let mut out = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let raw = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => {
                return Err(format!(
                    "field '{key}' in '{}' must be a string or number, got {other}",
                    path.display()
                ))
            }
        };
        out.push((key, raw));
    }
    Ok(out)
}

/// Merge the input file (if any) and `--set` overrides, in that order, into
/// one submission map. Keys the task's form does not name are usage errors
/// rather than silently validating as defaults.
fn build_submission(
    task: Task,
    input: &Option<PathBuf>,
    set: &[String],
) -> Result<HashMap<String, String>, String> {
    let schema = task.schema();

    let mut entries: Vec<(String, String)> = Vec::new();
    if let Some(path) = input {
        entries.extend(read_input_file(path)?);
    }
    entries.extend(parse_set_overrides(set)?);

    let mut submission: HashMap<String, String> = HashMap::new();
    let mut unknown: Vec<String> = Vec::new();
    for (key, value) in entries {
        if schema.contains(&key) {
            submission.insert(key, value);
        } else if !unknown.contains(&key) {
            unknown.push(key);
        }
    }

    if unknown.is_empty() {
        Ok(submission)
    } else {
        Err(format!(
            "unknown fields for task '{}': {} (see `pfas_screen fields {}`)",
            task.id(),
            unknown.join(", "),
            task.id()
        ))
    }
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            2
        }
    }
}

fn print_failures(errors: &pfas_validate::ValidationErrors) {
    eprintln!("{errors}");
    for failure in errors.failures() {
        eprintln!("  {failure}");
    }
}

fn run_tasks(args: &TasksArgs) -> i32 {
    let summaries: Vec<TaskSummary> = Task::ALL
        .into_iter()
        .map(|task| TaskSummary {
            id: task.id(),
            title: task.title(),
            description: task.description(),
            fields: task.schema().len(),
            default_artifact: task.default_artifact(),
        })
        .collect();

    if args.json {
        return print_json(&summaries);
    }

    for summary in &summaries {
        println!(
            "{:<26} {:>2} fields  {:<28} {}",
            summary.id, summary.fields, summary.default_artifact, summary.title
        );
    }
    0
}

fn run_fields(args: &FieldsArgs) -> i32 {
    let task = match resolve_task(&args.task) {
        Ok(task) => task,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let schema = task.schema();

    if args.json {
        let fields: Vec<FieldSummary> = schema
            .fields()
            .iter()
            .map(|field| FieldSummary {
                key: field.key(),
                label: field.label(),
                default: field.default_raw(),
                bounds: field.kind().bounds(),
            })
            .collect();
        return print_json(&fields);
    }

    println!("{}: {} ({} fields)", task.id(), task.title(), schema.len());
    println!("{}", task.description());
    for field in schema.fields() {
        let bounds = match field.kind().bounds() {
            Some((min, max)) => format!("[{min},{max}]"),
            None => "-".to_string(),
        };
        println!(
            "  {:<24} {:<14} {:<8} {}",
            field.key(),
            field.default_raw(),
            bounds,
            field.label()
        );
    }
    0
}

fn run_check(args: &CheckArgs) -> i32 {
    let task = match resolve_task(&args.task) {
        Ok(task) => task,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let submission = match build_submission(task, &args.input, &args.set) {
        Ok(submission) => submission,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };

    match validate(task.schema(), &submission) {
        Ok(vector) => {
            if args.json {
                let report = CheckReport {
                    task: task.id().to_string(),
                    ok: true,
                    vector: Some(vector.as_slice().to_vec()),
                    failures: Vec::new(),
                };
                return print_json(&report);
            }
            println!("ok: all {} inputs are valid", vector.len());
            println!("{:?}", vector.as_slice());
            0
        }
        Err(errors) => {
            if args.json {
                let report = CheckReport {
                    task: task.id().to_string(),
                    ok: false,
                    vector: None,
                    failures: errors
                        .failures()
                        .iter()
                        .map(|f| FailureReport {
                            key: f.key.clone(),
                            error: f.violation.to_string(),
                        })
                        .collect(),
                };
                let rc = print_json(&report);
                return if rc == 0 { 1 } else { rc };
            }
            print_failures(&errors);
            1
        }
    }
}

fn run_predict(args: &PredictArgs) -> i32 {
    let task = match resolve_task(&args.task) {
        Ok(task) => task,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let submission = match build_submission(task, &args.input, &args.set) {
        Ok(submission) => submission,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };

    let (metadata, classifier) = match load_classifier(&args.model) {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };

    // Training-order disagreement corrupts predictions without any runtime
    // error, so it is surfaced loudly but does not abort the request.
    for mismatch in metadata.mismatched_keys(task.schema()) {
        warn!(
            "artifact {} disagrees with task {}: {mismatch}",
            metadata.name,
            task.id()
        );
    }

    let session = ScreeningSession::new(task, classifier);
    let outcome = match session.submit(&submission) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };

    if args.json {
        let report = ScreeningReport::new(task, &outcome);
        let rc = print_json(&report);
        if rc != 0 {
            return rc;
        }
        return if report.ok { 0 } else { 1 };
    }

    match outcome {
        SubmissionOutcome::Prediction(assessment) => {
            println!("{}", assessment.message);
            0
        }
        SubmissionOutcome::Invalid(errors) => {
            print_failures(&errors);
            1
        }
    }
}

fn run_cli() -> i32 {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Tasks(args) => run_tasks(&args),
        Command::Fields(args) => run_fields(&args),
        Command::Check(args) => run_check(&args),
        Command::Predict(args) => run_predict(&args),
    }
}

fn main() {
    std::process::exit(run_cli());
}
