/// Countdown label, e.g. `Time Left: 1:05`.
#[must_use]
pub fn format_time_left(seconds: u32) -> String {
    let minutes = seconds / 60;
    let rest = seconds % 60;
    format!("Time Left: {minutes}:{rest:02}")
}
