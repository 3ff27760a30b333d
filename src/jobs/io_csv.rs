// Primitives for reading templates and writing the filled CSV files.

use std::fs::File;
use std::io::{BufRead, BufReader};

use csv::StringRecord;
use snafu::ResultExt;

use crate::jobs::*;

/// Copies the template to the output file, filling the answers.
///
/// The lines are read and written one at a time. A blank line in the template
/// is an empty row, so it is written as a padded empty row. The output file is
/// truncated if it exists. It is left as is if an error happens halfway.
pub fn fill_and_write_csv(
    schema_path: &str,
    output_path: &Path,
    lookup: &AnswerLookup,
) -> JobResult<FillStats> {
    let lines = get_lines(schema_path)?;
    let out_name = output_path.display().to_string();
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::CRLF)
        .from_path(output_path)
        .context(CsvCreateSnafu {
            path: out_name.clone(),
        })?;

    let mut stats = FillStats::default();
    for (idx, line_r) in lines.enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(TemplateReadSnafu {
            path: schema_path,
            lineno,
        })?;
        let records = parse_line(&line).context(CsvLineParseSnafu {
            path: schema_path,
            lineno,
        })?;
        for record in records {
            let filled = fill_row(record.iter().map(|s| s.to_string()).collect(), lookup);
            debug!("fill_and_write_csv: line: {:?} {:?}", lineno, &filled.cells);
            stats.record(&filled);
            writer.write_record(&filled.cells).context(CsvWriteSnafu {
                path: out_name.clone(),
                row: stats.rows,
            })?;
        }
    }
    writer.flush().context(CsvFlushSnafu { path: out_name })?;
    Ok(stats)
}

fn get_lines(path: &str) -> JobResult<TemplateLines<BufReader<File>>> {
    let file = File::open(path).context(CsvOpenSnafu { path })?;
    Ok(TemplateLines {
        reader: BufReader::new(file),
    })
}

/// The lines of a template, terminators included.
///
/// A line break inside a quoted cell does not end the line.
struct TemplateLines<R> {
    reader: R,
}

impl<R: BufRead> Iterator for TemplateLines<R> {
    type Item = std::io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line: Vec<u8> = Vec::new();
        loop {
            match self.reader.read_until(b'\n', &mut line) {
                Err(e) => return Some(Err(e)),
                // An unterminated quote runs to the end of the file.
                Ok(0) => break,
                Ok(_) if ends_inside_quotes(&line) => continue,
                Ok(_) => break,
            }
        }
        if line.is_empty() {
            None
        } else {
            Some(Ok(line))
        }
    }
}

/// True if a quoted cell is still open at the end of the bytes.
///
/// Quotes only open a cell at its start. Inside a quoted cell, `""` is an
/// escaped quote.
fn ends_inside_quotes(line: &[u8]) -> bool {
    let mut in_quotes = false;
    let mut field_start = true;
    let mut i = 0;
    while i < line.len() {
        let b = line[i];
        if in_quotes {
            if b == b'"' {
                if line.get(i + 1) == Some(&b'"') {
                    i += 1;
                } else {
                    in_quotes = false;
                }
            }
        } else if b == b',' || b == b'\n' || b == b'\r' {
            field_start = true;
            i += 1;
            continue;
        } else if b == b'"' && field_start {
            in_quotes = true;
        }
        field_start = false;
        i += 1;
    }
    in_quotes
}

/// The rows of one template line. A blank line is a single empty row.
fn parse_line(line: &[u8]) -> Result<Vec<StringRecord>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line);
    let records = rdr.records().collect::<Result<Vec<StringRecord>, csv::Error>>()?;
    if records.is_empty() {
        Ok(vec![StringRecord::new()])
    } else {
        Ok(records)
    }
}
