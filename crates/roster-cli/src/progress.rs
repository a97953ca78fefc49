use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use roster_store::UploadProgress;

/// Upload progress bar counting records.
pub struct UploadBar {
    bar: ProgressBar,
}

impl UploadBar {
    pub fn new(total: usize, hidden: bool) -> Self {
        let bar = ProgressBar::new(total as u64);
        if hidden {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) =
            ProgressStyle::with_template("  {spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message("uploading");
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl UploadProgress for UploadBar {
    fn batch_finished(&self, records: usize, succeeded: bool) {
        if !succeeded {
            self.bar.set_message("uploading (some batches failed)");
        }
        self.bar.inc(records as u64);
    }
}
