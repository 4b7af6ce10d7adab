use std::fmt::Write;

use ansi_term::{Colour, Style};

use crate::{
    gate::streak::StreakGap,
    history::{
        aggregator::MonthBucket,
        view_state::{summary_for, HistoryViewState},
    },
    utils::time::date_to_display_string,
};

pub const HISTORY_TITLE: &str = "Your Progress";
pub const HISTORY_SUBTITLE: &str = "Consistency is a Myth when you are overloaded";
pub const DAILY_QUESTION: &str = "Did I try today?";
pub const DETAIL_QUESTION: &str = "What's one thing you did for yourself today?";
pub const DONE_TEXT: &str = "Great Job! You are done for today 🎉";
pub const SUBMITTED_TEXT: &str = "Great Job! You are done for today!";
const REMINDER_TITLE: &str = "Aim For:";
const REMINDER_TEXT: &str = "Don't miss twice in a row.";

/// Applies terminal styling only when output goes to a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, style: Style, text: &str) -> String {
        if self.enabled {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Month cards in bucket order. Closed months show their name and summary, open months also list
/// every entry.
pub fn render_history(buckets: &[MonthBucket], state: &HistoryViewState, painter: Painter) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "{}", painter.paint(Style::new().bold(), HISTORY_TITLE));
    let _ = writeln!(
        output,
        "{}",
        painter.paint(Style::new().italic().dimmed(), HISTORY_SUBTITLE)
    );

    if buckets.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "No entries yet.");
        return output;
    }

    for bucket in buckets {
        let expanded = state.is_expanded(bucket.key);
        let marker = if expanded { "▾" } else { "▸" };
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "{marker} {}",
            painter.paint(Style::new().bold(), &bucket.key.to_string())
        );
        let _ = writeln!(output, "  {}", summary_for(bucket));

        if expanded {
            for entry in &bucket.entries {
                let _ = writeln!(
                    output,
                    "    {}  {}",
                    painter.paint(Colour::Fixed(244).normal(), &date_to_display_string(entry.date)),
                    entry.response
                );
            }
        }
    }

    output
}

pub fn render_reminder(gap: &StreakGap, painter: Painter) -> String {
    format!(
        "{} {} (last entry {} days ago, on {})",
        painter.paint(Colour::Yellow.bold(), REMINDER_TITLE),
        REMINDER_TEXT,
        gap.days,
        date_to_display_string(gap.last_entry.date)
    )
}

pub fn render_success(text: &str, painter: Painter) -> String {
    painter.paint(Colour::Green.bold(), text)
}

pub fn render_error(message: &str, painter: Painter) -> String {
    format!("{} {message}", painter.paint(Colour::Red.bold(), "Error:"))
}
