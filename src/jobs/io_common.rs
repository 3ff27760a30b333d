use std::fs;

use text_diff::print_diff;

use snafu::ResultExt;

use crate::jobs::*;

pub fn absolute_path(path: &Path) -> JobResult<PathBuf> {
    std::path::absolute(path).context(AbsolutePathSnafu {
        path: path.display().to_string(),
    })
}

/// Compares a generated file with a reference file, ignoring the line endings.
///
/// The differences are printed to the standard output.
pub fn compare_with_reference(generated: &Path, reference_path: &str) -> JobResult<()> {
    let generated_name = generated.display().to_string();
    let generated_txt = read_text(&generated_name)?;
    let reference_txt = read_text(reference_path)?;
    info!("Comparing {:?} with reference {:?}", generated, reference_path);
    if generated_txt != reference_txt {
        warn!("Found differences with the reference file");
        print_diff(reference_txt.as_str(), generated_txt.as_str(), "\n");
        whatever!(
            "Difference detected between {} and reference {}",
            generated_name,
            reference_path
        )
    }
    Ok(())
}

fn read_text(path: &str) -> JobResult<String> {
    let contents = fs::read_to_string(path).context(ReadingTextSnafu { path })?;
    Ok(contents.replace("\r\n", "\n"))
}
