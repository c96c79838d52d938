use ratatui::style::Color;

pub const ACCENT: Color = Color::Cyan;
pub const BORDER_COLOR: Color = Color::DarkGray;
pub const TEXT_DIM: Color = Color::DarkGray;
pub const HEADER_FG: Color = Color::White;
pub const HEADER_BG: Color = Color::Rgb(28, 34, 48);
pub const TABLE_HEADER_FG: Color = Color::Cyan;
pub const SELECTION_BG: Color = Color::Rgb(38, 60, 80);
pub const OVERLAY_BG: Color = Color::Rgb(24, 24, 32);
pub const STATUS_RUNNING: Color = Color::Green;
pub const STATUS_PENDING: Color = Color::Yellow;
pub const STATUS_FAILED: Color = Color::Red;
pub const STATUS_UNKNOWN: Color = Color::DarkGray;

pub fn status_color(status: &str) -> Color {
    match status {
        "Running" | "Succeeded" | "Ready" => STATUS_RUNNING,
        "Pending" | "ContainerCreating" => STATUS_PENDING,
        "Failed" | "Error" | "NotReady" | "CrashLoopBackOff" | "ImagePullBackOff" => STATUS_FAILED,
        _ => STATUS_UNKNOWN,
    }
}
