use std::path::Path;

use eyre::Result;

use crate::command::run_command;

/// Paths in the git index under `root`, sorted byte-wise and deduplicated.
pub fn list_tracked_files(root: &Path) -> Result<Vec<String>> {
    let output = run_command("git", &["ls-files", "-z"], root)?;
    Ok(parse_ls_files(&output))
}

fn parse_ls_files(output: &[u8]) -> Vec<String> {
    let mut files: Vec<String> = output
        .split(|&b| b == 0)
        .filter(|chunk| !chunk.is_empty())
        .filter_map(|chunk| match std::str::from_utf8(chunk) {
            Ok(path) => Some(path.to_string()),
            Err(_) => {
                log::warn!(
                    "skipping non UTF-8 path {}",
                    String::from_utf8_lossy(chunk)
                );
                None
            }
        })
        .collect();
    files.sort();
    // Unmerged entries appear once per stage.
    files.dedup();
    files
}
