use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

// stderr 不是終端機時 indicatif 會自動隱藏
fn bar(len: u64, template: &str) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::stderr_with_hz(12));
    pb.set_style(
        ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}

/// Per-entry bar used while extracting archives.
pub fn entry_bar(len: u64) -> ProgressBar {
    bar(
        len,
        "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({eta})",
    )
}

/// Byte bar for downloads. `len` is 0 when the server sends no content length.
pub fn byte_bar(len: u64) -> ProgressBar {
    if len == 0 {
        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr_with_hz(12));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} {bytes} ({bytes_per_sec})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        return pb;
    }
    bar(
        len,
        "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
    )
}
