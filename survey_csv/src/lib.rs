/*!
Fills CSV templates with the answers of a survey response.

The typical flow for one response:

```
use serde_json::json;
use survey_csv::*;
use std::path::Path;

let payload = json!({"responses": [{
    "response_id": 42,
    "datetime": "2024-01-01T00:00:00Z",
    "answers": [{"question": "Form_Contact_Name", "answer": "Jane Doe"}]
}]});

let lookup = build_answer_lookup(get_response(&payload))?;
let row = fill_row(vec!["Form_Contact_Name".into(), "".into(), "".into(), "<answer>".into()], &lookup);
assert_eq!(row.cells[3], "Jane Doe");

let path = build_output_path(JobType::Create, &lookup, Path::new("output/create"));
assert_eq!(path, Path::new("output/create/create_janedoe_42.csv"));
# Ok::<(), SurveyError>(())
```

See the [`manual`] for the file formats.
*/

mod config;
pub mod lookup;
pub mod manual;
pub mod template;

use log::debug;
use std::path::{Path, PathBuf};

pub use crate::config::*;
pub use crate::lookup::{build_answer_lookup, get_response};
pub use crate::template::{fill_row, FillStats, FilledRow, ANSWER_PLACEHOLDER};

const UNKNOWN: &str = "unknown";

/// Lower-cases a contact name and removes all its spaces.
pub fn normalize_contact_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

/// The path of the output file for a response.
///
/// The file is named `{job_type}_{contact_name}_{response_id}.csv`. The contact
/// name is read from the [`CONTACT_NAME_KEY`] answer. Missing values are
/// replaced by `unknown`.
pub fn build_output_path(job_type: JobType, lookup: &AnswerLookup, output_dir: &Path) -> PathBuf {
    let contact_name = normalize_contact_name(lookup.get(CONTACT_NAME_KEY).unwrap_or(UNKNOWN));
    let response_id = lookup.get(RESPONSE_ID_KEY).unwrap_or(UNKNOWN);
    let file_name = format!("{}_{}_{}.csv", job_type.as_str(), contact_name, response_id);
    debug!("build_output_path: {:?} in {:?}", file_name, output_dir);
    output_dir.join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn output_path_normalizes_contact_name() {
        init();
        let lookup: AnswerLookup = [("Form_Contact_Name", "Mary Ann  SMITH"), ("response_id", "9")]
            .into_iter()
            .collect();
        let p = build_output_path(JobType::Modify, &lookup, Path::new("output/modify"));
        assert_eq!(p, Path::new("output/modify/modify_maryannsmith_9.csv"));
    }

    #[test]
    fn output_path_defaults_to_unknown() {
        init();
        let lookup = AnswerLookup::new();
        let p = build_output_path(JobType::Terminate, &lookup, Path::new("out"));
        assert_eq!(p, Path::new("out/terminate_unknown_unknown.csv"));
    }

    #[test]
    fn output_path_is_deterministic() {
        init();
        let lookup: AnswerLookup = [("Form_Contact_Name", "Jane Doe"), ("response_id", "42")]
            .into_iter()
            .collect();
        let dir = Path::new("output/create");
        let first = build_output_path(JobType::Create, &lookup, dir);
        let second = build_output_path(JobType::Create, &lookup, dir);
        assert_eq!(first, second);
        assert_eq!(first, Path::new("output/create/create_janedoe_42.csv"));
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_contact_name("Jane Q Doe");
        assert_eq!(once, "janeqdoe");
        assert_eq!(normalize_contact_name(&once), once);
    }

    #[test]
    fn job_type_labels() {
        assert_eq!("create".parse::<JobType>(), Ok(JobType::Create));
        assert_eq!("modify".parse::<JobType>(), Ok(JobType::Modify));
        assert_eq!("terminate".parse::<JobType>(), Ok(JobType::Terminate));
        assert_eq!(JobType::Terminate.report_label(), "Terminate");
    }

    #[test]
    fn invalid_job_type_lists_valid_labels() {
        let err = "delete".parse::<JobType>().unwrap_err();
        assert_eq!(
            err,
            SurveyError::InvalidJobType {
                label: "delete".to_string()
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("'delete'"));
        assert!(msg.contains("\"create\", \"modify\", \"terminate\""));
    }
}
