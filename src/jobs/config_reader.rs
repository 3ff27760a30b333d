use snafu::ResultExt;

use crate::jobs::*;

use serde::{Deserialize, Serialize};
use std::fs;

const DEFAULT_OUTPUT_ROOT: &str = "output";

/// One job: a response, a template and the type of job.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    #[serde(rename = "jobType")]
    pub job_type: String,
    #[serde(rename = "inputPath")]
    pub input_path: String,
    #[serde(rename = "schemaPath")]
    pub schema_path: String,
    // Defaults to the job type directory under the output root.
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

impl JobSpec {
    fn fixed(job_type: JobType, input_path: &str, schema_path: &str) -> JobSpec {
        JobSpec {
            job_type: job_type.as_str().to_string(),
            input_path: input_path.to_string(),
            schema_path: schema_path.to_string(),
            output_directory: None,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(rename = "outputRoot")]
    pub output_root: Option<String>,
    #[serde(rename = "continueOnError")]
    pub continue_on_error: Option<bool>,
    pub jobs: Vec<JobSpec>,
}

impl RunConfig {
    /// The jobs run when nothing else is specified.
    pub fn default_jobs() -> RunConfig {
        RunConfig {
            output_root: None,
            continue_on_error: None,
            jobs: vec![
                JobSpec::fixed(
                    JobType::Create,
                    "source_files/createDataSource.json",
                    "templates/createSchema.csv",
                ),
                JobSpec::fixed(
                    JobType::Modify,
                    "source_files/modifyDataSource.json",
                    "templates/modifySchema.csv",
                ),
                JobSpec::fixed(
                    JobType::Terminate,
                    "source_files/terminateDataSource.json",
                    "templates/terminateSchema.csv",
                ),
            ],
        }
    }

    pub fn single(job: JobSpec) -> RunConfig {
        RunConfig {
            output_root: None,
            continue_on_error: None,
            jobs: vec![job],
        }
    }

    pub fn output_root(&self) -> PathBuf {
        PathBuf::from(
            self.output_root
                .clone()
                .unwrap_or_else(|| DEFAULT_OUTPUT_ROOT.to_string()),
        )
    }

    pub fn continue_on_error(&self) -> bool {
        self.continue_on_error.unwrap_or(false)
    }
}

pub fn read_run_config(path: &str) -> JobResult<RunConfig> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    let config: RunConfig =
        serde_json::from_str(contents.as_str()).context(ParsingConfigSnafu { path })?;
    debug!("read_run_config: {:?}", config);
    ensure!(!config.jobs.is_empty(), EmptyConfigSnafu { path });
    Ok(config)
}
