// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// The flat mapping from question text to answer text for one response.
///
/// Besides the answers themselves, a lookup built by
/// [`build_answer_lookup`](crate::lookup::build_answer_lookup) always carries the
/// two synthetic keys [`RESPONSE_ID_KEY`] and [`DATETIME_KEY`].
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct AnswerLookup {
    answers: HashMap<String, String>,
}

pub const RESPONSE_ID_KEY: &str = "response_id";
pub const DATETIME_KEY: &str = "datetime";
pub const CONTACT_NAME_KEY: &str = "Form_Contact_Name";

impl AnswerLookup {
    pub fn new() -> AnswerLookup {
        AnswerLookup::default()
    }

    /// Sets the answer for a question, returning the previous answer if the
    /// question was already present.
    pub fn insert(&mut self, question: &str, answer: &str) -> Option<String> {
        self.answers.insert(question.to_string(), answer.to_string())
    }

    pub fn get(&self, question: &str) -> Option<&str> {
        self.answers.get(question).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for AnswerLookup {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut lookup = AnswerLookup::new();
        for (q, a) in iter {
            lookup.insert(q, a);
        }
        lookup
    }
}

// ********* Job types **********

/// The kinds of jobs. They all run the same pipeline and only differ by
/// their labels and where their output goes.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum JobType {
    Create,
    Modify,
    Terminate,
}

impl JobType {
    pub const ALL: [JobType; 3] = [JobType::Create, JobType::Modify, JobType::Terminate];

    /// The label used on the command line, in configuration files and in
    /// output file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Create => "create",
            JobType::Modify => "modify",
            JobType::Terminate => "terminate",
        }
    }

    /// The label used when reporting a finished job.
    pub fn report_label(&self) -> &'static str {
        match self {
            JobType::Create => "Create",
            JobType::Modify => "Modify",
            JobType::Terminate => "Terminate",
        }
    }

    /// The output directory of this job, relative to the output root.
    pub fn default_output_dir(&self) -> &'static str {
        self.as_str()
    }

    pub fn valid_labels() -> Vec<&'static str> {
        JobType::ALL.iter().map(|jt| jt.as_str()).collect()
    }
}

impl Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobType {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .iter()
            .find(|jt| jt.as_str() == s)
            .copied()
            .ok_or_else(|| SurveyError::InvalidJobType {
                label: s.to_string(),
            })
    }
}

// ********* Errors **********

/// Errors raised while interpreting a survey payload.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum SurveyError {
    /// The job type label is not one of the known job types.
    InvalidJobType { label: String },
    /// The element at this position should be a JSON object.
    NotAnObject { field: String },
    /// A required field is absent.
    MissingField { field: String },
    /// A field is present but has the wrong JSON type.
    WrongType {
        field: String,
        expected: &'static str,
    },
}

impl Error for SurveyError {}

impl Display for SurveyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurveyError::InvalidJobType { label } => write!(
                f,
                "Invalid job_type '{}'. Must be one of: {:?}",
                label,
                JobType::valid_labels()
            ),
            SurveyError::NotAnObject { field } => {
                write!(f, "expected a JSON object for {}", field)
            }
            SurveyError::MissingField { field } => write!(f, "missing field {}", field),
            SurveyError::WrongType { field, expected } => {
                write!(f, "field {} should be {}", field, expected)
            }
        }
    }
}
