//! Live progress reporting during benchmark execution.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress bar advanced once per finished job.
///
/// Example output:
/// ```text
///   ⠋ 3/8 jobs  ████████░░░░░░░░░░░░  ETA 00:00:12
/// ```
pub fn job_progress(total_jobs: usize, color: bool) -> ProgressBar {
    let progress = ProgressBar::new(total_jobs as u64);

    let template = if color {
        "  {spinner:.cyan} {pos}/{len} jobs  {bar:20.cyan/dim}  ETA {eta}"
    } else {
        "  {spinner} {pos}/{len} jobs  {bar:20}  ETA {eta}"
    };
    let style = ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);

    progress.set_style(style);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}
