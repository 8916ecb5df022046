//! Progress reporting for export submission

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const JOB_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} jobs {msg}";

/// Progress bar counting submitted export jobs
pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    /// Tracker for `total` jobs, drawn on stderr
    ///
    /// Nothing is drawn for an empty batch.
    pub fn new(total: u64, description: &str) -> Self {
        let bar = ProgressBar::new(total);
        if total == 0 {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) = ProgressStyle::default_bar().template(JOB_TEMPLATE) {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message(description.to_string());

        ProgressTracker { bar }
    }

    pub fn increment(&self, amount: u64) {
        self.bar.inc(amount);
    }

    /// Name the job being submitted
    pub fn set_message(&self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    pub fn finish(&self) {
        self.bar.finish_with_message(format!("{} submitted", self.bar.position()));
    }
}
