use indicatif::{ProgressBar, ProgressStyle};

use bannerkb_import::ImportProgress;

/// Progress bar for import runs.
pub(crate) struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub(crate) fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar }
    }

    pub(crate) fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ImportProgress for BarProgress {
    fn on_row(&self, current: usize, _total: usize, image_id: &str) {
        self.bar.set_position(current as u64);
        self.bar.set_message(image_id.to_string());
    }

    fn on_phase(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn on_complete(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
