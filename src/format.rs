//! Human-readable rendering of scheduler data.

use crate::scheduler::ScheduledAdvice;
use std::time::Duration;

pub use crate::catalog::format_tip_for_display;

const MINUTE_SECS: u64 = 60;
const HOUR_SECS: u64 = 60 * MINUTE_SECS;
const DAY_SECS: u64 = 24 * HOUR_SECS;

/// Render a countdown such as `2 days and 5 hours` or `45 minutes`.
pub fn format_time_until_next(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    let days = secs / DAY_SECS;
    let hours = (secs % DAY_SECS) / HOUR_SECS;
    let minutes = (secs % HOUR_SECS) / MINUTE_SECS;

    if days > 0 {
        format!("{} and {}", unit(days, "day"), unit(hours, "hour"))
    } else if hours > 0 {
        format!("{} and {}", unit(hours, "hour"), unit(minutes, "minute"))
    } else {
        unit(minutes, "minute")
    }
}

fn unit(count: u64, name: &str) -> String {
    if count > 1 {
        format!("{count} {name}s")
    } else {
        format!("{count} {name}")
    }
}

/// Advice rendered for an in-app notification panel.
pub fn format_advice_for_notification(advice: &ScheduledAdvice) -> String {
    let mut sections = vec![
        advice.personal_message.clone(),
        format!("**{}**\n{}", advice.tip.title, advice.tip.advice),
    ];
    if let Some(affirmation) = &advice.affirmation {
        sections.push(affirmation.clone());
    }
    if let Some(prompt) = &advice.check_in_prompt {
        sections.push(format!("Reflection: {prompt}"));
    }
    sections.join("\n\n")
}
