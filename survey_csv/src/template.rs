//! Filling the rows of a CSV template.
//!
//! A template row names a question in its first column. When the fourth column
//! holds the [`ANSWER_PLACEHOLDER`], it is replaced by the answer to that
//! question. All the other cells are kept as they are.

use log::debug;

use crate::config::AnswerLookup;

pub const ANSWER_PLACEHOLDER: &str = "<answer>";

/// Every row is padded to at least this number of cells.
pub const MIN_ROW_LEN: usize = 4;

const QUESTION_COL: usize = 0;
const VALUE_COL: usize = 3;

/// The outcome of filling a single row.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FilledRow {
    pub cells: Vec<String>,
    /// True if the row contained a placeholder.
    pub substituted: bool,
}

/// Pads a row and substitutes its placeholder, if any.
///
/// A placeholder for a question that has no answer becomes an empty cell.
pub fn fill_row(mut cells: Vec<String>, lookup: &AnswerLookup) -> FilledRow {
    while cells.len() < MIN_ROW_LEN {
        cells.push("".to_string());
    }
    let substituted = cells[VALUE_COL] == ANSWER_PLACEHOLDER;
    if substituted {
        cells[VALUE_COL] = match lookup.get(&cells[QUESTION_COL]) {
            Some(answer) => answer.to_string(),
            None => {
                debug!("fill_row: no answer for question {:?}", cells[QUESTION_COL]);
                "".to_string()
            }
        };
    }
    FilledRow { cells, substituted }
}

/// Counters gathered while filling a whole template.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct FillStats {
    pub rows: usize,
    pub substitutions: usize,
}

impl FillStats {
    pub fn record(&mut self, row: &FilledRow) {
        self.rows += 1;
        if row.substituted {
            self.substitutions += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn lookup() -> AnswerLookup {
        [("Form_Contact_Name", "Jane Doe"), ("Phone", "555-0100"), ("Notes", "")]
            .into_iter()
            .collect()
    }

    #[test]
    fn placeholder_is_replaced() {
        let res = fill_row(row(&["Form_Contact_Name", "a", "b", "<answer>"]), &lookup());
        assert_eq!(res.cells, row(&["Form_Contact_Name", "a", "b", "Jane Doe"]));
        assert!(res.substituted);
    }

    #[test]
    fn missing_answer_is_empty() {
        let res = fill_row(row(&["Fax", "", "", "<answer>"]), &lookup());
        assert_eq!(res.cells, row(&["Fax", "", "", ""]));
        assert!(res.substituted);
    }

    #[test]
    fn empty_answer_is_kept_empty() {
        let res = fill_row(row(&["Notes", "", "", "<answer>"]), &lookup());
        assert_eq!(res.cells, row(&["Notes", "", "", ""]));
        assert!(res.substituted);
    }

    #[test]
    fn literal_is_kept() {
        let res = fill_row(row(&["Phone", "", "", "literal"]), &lookup());
        assert_eq!(res.cells, row(&["Phone", "", "", "literal"]));
        assert!(!res.substituted);
    }

    #[test]
    fn placeholder_must_match_exactly() {
        let res = fill_row(row(&["Phone", "", "", " <answer>"]), &lookup());
        assert_eq!(res.cells[3], " <answer>");
        assert!(!res.substituted);
    }

    #[test]
    fn short_rows_are_padded() {
        assert_eq!(fill_row(row(&["Header"]), &lookup()).cells, row(&["Header", "", "", ""]));
        assert_eq!(fill_row(vec![], &lookup()).cells, row(&["", "", "", ""]));
    }

    #[test]
    fn extra_columns_are_kept() {
        let res = fill_row(row(&["Phone", "x", "y", "<answer>", "extra", "<answer>"]), &lookup());
        assert_eq!(
            res.cells,
            row(&["Phone", "x", "y", "555-0100", "extra", "<answer>"])
        );
    }

    #[test]
    fn stats_count_rows_and_substitutions() {
        let mut stats = FillStats::default();
        for r in [
            row(&["Phone", "", "", "<answer>"]),
            row(&["Static", "", "", "literal"]),
            row(&["Fax", "", "", "<answer>"]),
        ] {
            stats.record(&fill_row(r, &lookup()));
        }
        assert_eq!(
            stats,
            FillStats {
                rows: 3,
                substitutions: 2
            }
        );
    }
}
