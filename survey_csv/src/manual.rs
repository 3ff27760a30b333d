/*!

This is the long-form manual for `survey_csv` and `centrepoint`.

## Input formats

### Survey responses (JSON)

A single response:

```json
{
  "response_id": 42,
  "datetime": "2024-01-01T00:00:00Z",
  "answers": [
    {"question": "Form_Contact_Name", "answer": "Jane Doe"},
    {"question": "Department", "answer": "Finance"}
  ]
}
```

Exports from the survey tool wrap the responses in a `responses` array:
`{"responses": [ ... ]}`. Only the first response of the array is used.

Notes:
- `response_id` may be a number or a string
- booleans are written `True` or `False`, `null` is written as an empty cell, other answers that are not
  strings are written with their JSON notation
- if a question is answered several times, the last answer is used

### Templates (CSV)

Comma-separated, without a header row. The columns are:
1. the question
2. reserved
3. reserved
4. either a literal value or `<answer>`

When the fourth column is `<answer>`, it is replaced by the answer to the question in the first column
(an empty cell if the question was not answered). Every other cell is copied unchanged, including
any column after the fourth. Rows with fewer than 4 columns are padded with empty cells, and a blank line
is an empty row: it is written as `,,,`. Line breaks inside quoted cells are part of the cell.

Two extra keys can always be used in templates: `response_id` and `datetime`.

## Output

One CSV file per job, named `{job_type}_{contact_name}_{response_id}.csv` where the contact name
is the answer to `Form_Contact_Name` in lower case without spaces. Missing values are named `unknown`.
The output directory is `output/{job_type}` by default and must exist. Existing files are overwritten.

## Jobs

There are three job types: `create`, `modify` and `terminate`. They run the same steps.

Without arguments, `centrepoint` runs one job of each type, reading
`source_files/{create,modify,terminate}DataSource.json` and `templates/{create,modify,terminate}Schema.csv`.

A run configuration file can be passed with `--config`:

```json
{
  "outputRoot": "output",
  "continueOnError": false,
  "jobs": [
    {"jobType": "create", "inputPath": "source_files/createDataSource.json", "schemaPath": "templates/createSchema.csv"},
    {"jobType": "modify", "inputPath": "in.json", "schemaPath": "modify.csv", "outputDirectory": "/tmp/modify"}
  ]
}
```

A single job can also be described directly on the command line:

```bash
centrepoint --job create --input response.json --schema createSchema.csv --out output
```

By default, the first failing job stops the run. With `--keep-going` (or `"continueOnError": true`),
all the jobs are attempted and the run fails at the end if any of them failed.

*/
