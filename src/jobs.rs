use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};

use std::path::{Path, PathBuf};

use survey_csv::*;

use crate::args::Args;

mod config_reader;
mod io_common;
mod io_csv;
mod io_json;

use crate::jobs::config_reader::*;
use crate::jobs::io_common::*;
use crate::jobs::io_csv::*;
use crate::jobs::io_json::*;

#[derive(Debug, Snafu)]
pub enum JobError {
    #[snafu(display("{source}"))]
    InvalidJobType { source: SurveyError },
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}: {source}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Unexpected survey response in {path}: {source}"))]
    BuildingLookup { source: SurveyError, path: String },
    #[snafu(display("Error opening template {path}: {source}"))]
    CsvOpen {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error creating output file {path}: {source}"))]
    CsvCreate { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of template {path}: {source}"))]
    TemplateRead {
        source: std::io::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error parsing line {lineno} of template {path}: {source}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error writing row {row} of {path}: {source}"))]
    CsvWrite {
        source: csv::Error,
        path: String,
        row: usize,
    },
    #[snafu(display("Error flushing output file {path}: {source}"))]
    CsvFlush {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Cannot resolve the absolute path of {path}: {source}"))]
    AbsolutePath {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening run configuration {path}: {source}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing run configuration {path}: {source}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Run configuration {path} does not declare any job"))]
    EmptyConfig { path: String },
    #[snafu(display("Error reading file {path}: {source}"))]
    ReadingText {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("{failed} of {total} jobs failed"))]
    JobsFailed { failed: usize, total: usize },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type JobResult<T> = Result<T, JobError>;

/// Runs one job.
///
/// The job type is checked before any file is touched. The output goes to the
/// directory of the job if it has one, or to the subdirectory of `output_root`
/// named after the job type.
pub fn run_job(job: &JobSpec, output_root: &Path) -> JobResult<PathBuf> {
    let job_type: JobType = job.job_type.parse().context(InvalidJobTypeSnafu {})?;
    let output_dir = match &job.output_directory {
        Some(dir) => PathBuf::from(dir),
        None => output_root.join(job_type.default_output_dir()),
    };
    json_to_csv(job_type, &job.input_path, &job.schema_path, &output_dir)
}

/// Fills the template at `schema_path` with the response in `json_path`.
///
/// Returns the absolute path of the file written in `output_dir`.
pub fn json_to_csv(
    job_type: JobType,
    json_path: &str,
    schema_path: &str,
    output_dir: &Path,
) -> JobResult<PathBuf> {
    info!(
        "{} job: reading response {:?}, template {:?}",
        job_type, json_path, schema_path
    );
    let payload = read_payload(json_path)?;
    let response = get_response(&payload);
    let lookup = build_answer_lookup(response).context(BuildingLookupSnafu { path: json_path })?;

    let output_path = build_output_path(job_type, &lookup, output_dir);
    let stats = fill_and_write_csv(schema_path, &output_path, &lookup)?;
    info!(
        "{} job: wrote {} rows ({} answers filled) to {:?}",
        job_type, stats.rows, stats.substitutions, output_path
    );

    let absolute_path = absolute_path(&output_path)?;
    println!(
        "{} CSV saved to: {}",
        job_type.report_label(),
        absolute_path.display()
    );
    Ok(absolute_path)
}

/// Runs all the jobs of a configuration, in order.
///
/// Unless the configuration says otherwise, the first failure stops the run.
pub fn run_all(config: &RunConfig) -> JobResult<Vec<PathBuf>> {
    let output_root = config.output_root();
    let total = config.jobs.len();
    let mut outputs: Vec<PathBuf> = Vec::new();
    let mut failed: usize = 0;
    for (idx, job) in config.jobs.iter().enumerate() {
        debug!("run_all: job {}/{}: {:?}", idx + 1, total, job);
        match run_job(job, &output_root) {
            Ok(p) => outputs.push(p),
            Err(e) if config.continue_on_error() => {
                warn!("Job {} ({}) failed: {}", idx + 1, job.job_type, e);
                eprintln!("Job {} ({}) failed: {}", idx + 1, job.job_type, e);
                failed += 1;
            }
            Err(e) => return Err(e),
        }
    }
    ensure!(failed == 0, JobsFailedSnafu { failed, total });
    Ok(outputs)
}

/// The run configuration described by the command line.
pub fn config_from_args(args: &Args) -> JobResult<RunConfig> {
    let mut config = match (&args.job, &args.config) {
        (Some(_), Some(_)) => whatever!("--job and --config cannot be used together"),
        (Some(job_type), None) => {
            let (input_path, schema_path) = match (&args.input, &args.schema) {
                (Some(i), Some(s)) => (i.clone(), s.clone()),
                _ => whatever!("--job {} requires both --input and --schema", job_type),
            };
            RunConfig::single(JobSpec {
                job_type: job_type.clone(),
                input_path,
                schema_path,
                output_directory: None,
            })
        }
        (None, Some(path)) => read_run_config(path)?,
        (None, None) => RunConfig::default_jobs(),
    };
    if let Some(out) = &args.out {
        config.output_root = Some(out.clone());
    }
    if args.keep_going {
        config.continue_on_error = Some(true);
    }
    Ok(config)
}

pub fn run_from_args(args: &Args) -> JobResult<()> {
    let config = config_from_args(args)?;
    if args.reference.is_some() && config.jobs.len() != 1 {
        whatever!(
            "--reference needs exactly one job, {} configured",
            config.jobs.len()
        );
    }
    info!("Running {} jobs", config.jobs.len());
    let outputs = run_all(&config)?;

    // The reference file, if provided for comparison
    if let (Some(reference), Some(output)) = (&args.reference, outputs.first()) {
        compare_with_reference(output, reference)?;
    }
    Ok(())
}
