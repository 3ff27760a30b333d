use clap::Parser;

/// Fills CSV templates with the answers of survey responses.
///
/// Without arguments, runs the create, modify and terminate jobs on the files in
/// `source_files/` and `templates/`, writing to `output/`.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the jobs to run. It replaces the
    /// three default jobs. See the manual for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (create, modify or terminate) Runs a single job of this type instead. Requires
    /// --input and --schema.
    #[clap(short, long, value_parser)]
    pub job: Option<String>,

    /// (file path) The JSON file with the survey response, for a single job.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path) The CSV template, for a single job.
    #[clap(short, long, value_parser)]
    pub schema: Option<String>,

    /// (directory, default output) The root of the output directories. Each job writes
    /// into the subdirectory named after its type, which must exist.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference CSV file. If provided, the output of the single job is
    /// compared to it and the differences are printed.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, all the jobs are attempted even if one of them fails.
    #[clap(long, takes_value = false)]
    pub keep_going: bool,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
