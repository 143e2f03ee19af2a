//! Plain-text rendering for the terminal.

use chrono::{DateTime, Utc};

use crate::board::{Board, Region};
use crate::loader::{LoaderPhase, LoaderStatus};

const FILLED: char = '#';
const EMPTY: char = '-';

/// Render every populated region in fixed order.
///
/// Example output:
/// ```text
/// Upcoming Launches
/// └── 42
///
/// Crew Aboard the ISS
/// ├── Tracy Dyson (NASA)
/// └── Mike Barratt (NASA)
/// ```
pub fn render_board(board: &Board) -> String {
    let snapshot = board.snapshot();
    let mut output = String::new();
    for region in Region::ALL {
        let Some(lines) = snapshot.get(&region) else {
            continue;
        };
        if !output.is_empty() {
            output.push('\n');
        }
        render_region(&mut output, region, lines);
    }
    output
}

fn render_region(output: &mut String, region: Region, lines: &[String]) {
    output.push_str(region.title());
    output.push('\n');
    for (i, line) in lines.iter().enumerate() {
        let branch = if i == lines.len() - 1 {
            "└── "
        } else {
            "├── "
        };
        output.push_str(branch);
        output.push_str(line);
        output.push('\n');
    }
}

/// `[#####-----] 50% Loading Orbital Data...`
pub fn render_progress_bar(status: &LoaderStatus, width: usize) -> String {
    let percent = status.progress.percent() as usize;
    let filled = (width * percent / 100).min(width);
    let bar: String = std::iter::repeat(FILLED)
        .take(filled)
        .chain(std::iter::repeat(EMPTY).take(width - filled))
        .collect();
    let message = match status.phase {
        LoaderPhase::Loading => status.progress.message(),
        LoaderPhase::Ready => "Ready for Launch!",
    };
    format!("[{}] {:>3}% {}", bar, percent, message)
}

/// Round to an integer and group digits by thousands: `45290298.2` → `45,290,298`.
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn format_instant(instant: Option<DateTime<Utc>>) -> String {
    match instant {
        Some(instant) => instant.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => "TBD".to_string(),
    }
}
