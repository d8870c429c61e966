use std::io::IsTerminal;
use chrono::Duration;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::scoring::{InitialScore, QualityReport, RecalcReport, Temperature};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Temperature label, colored by band when enabled
pub fn format_temperature(temperature: Temperature, use_colors: bool) -> String {
    let label = temperature.to_string();
    if !use_colors {
        return label;
    }
    match temperature {
        Temperature::Hot => label.red().bold().to_string(),
        Temperature::Warm => label.yellow().to_string(),
        Temperature::Cold => label.blue().to_string(),
    }
}

/// Signed delta, always with an explicit sign ("+23", "-20", "+0")
pub fn format_delta(delta: i32) -> String {
    format!("{:+}", delta)
}

/// Format a duration into a human-readable inactivity string
/// "3d" for days, "2w" for weeks, "today" under a day
pub fn format_inactivity(duration: Duration) -> String {
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else {
        "today".to_string()
    }
}

/// Initial score with its factor breakdown, one factor per line
pub fn format_initial_score(
    result: &InitialScore,
    temperature: Temperature,
    use_colors: bool,
) -> String {
    let score = result.score.to_string();
    let mut lines = vec![format!(
        "Score: {} ({})",
        if use_colors { score.bold().to_string() } else { score },
        format_temperature(temperature, use_colors)
    )];

    if result.fallback {
        lines.push("  default score used: intake could not be scored".to_string());
    }
    for factor in &result.factors {
        lines.push(format!(
            "  {:<18} {:>3}  {}",
            factor.label, factor.points, factor.description
        ));
    }
    lines.join("\n")
}

/// Quality report as a sectioned list
pub fn format_quality_report(report: &QualityReport, use_colors: bool) -> String {
    let heading = match &report.lead_id {
        Some(id) => format!("Lead {}", id),
        None => "Lead".to_string(),
    };
    let mut lines = vec![format!(
        "{}: score {} ({})",
        if use_colors { heading.bold().to_string() } else { heading },
        report.current_score,
        format_temperature(report.temperature, use_colors)
    )];

    for (title, items, marker) in [
        ("Strengths", &report.strengths, "+"),
        ("Weaknesses", &report.weaknesses, "-"),
        ("Recommendations", &report.recommendations, ">"),
    ] {
        if items.is_empty() {
            continue;
        }
        lines.push(format!("  {}:", title));
        for item in items {
            let marker = if use_colors {
                match marker {
                    "+" => marker.green().to_string(),
                    "-" => marker.red().to_string(),
                    _ => marker.cyan().to_string(),
                }
            } else {
                marker.to_string()
            };
            lines.push(format!("    {} {}", marker, item));
        }
    }
    lines.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a recalculation report as a table of changed scores,
/// followed by any skipped leads.
/// Index column: 3 chars (fits "99."), right-aligned
/// Change column: "old -> new", 10 chars
pub fn format_recalc_table(report: &RecalcReport, use_colors: bool) -> String {
    let mut lines = Vec::new();

    if report.updates.is_empty() {
        lines.push("No score changes.".to_string());
    }

    let term_width = get_terminal_width();
    let index_width = 3;
    let change_width = 10;
    let temperature_width = 4;
    let separator = "  ";

    for (idx, update) in report.updates.iter().enumerate() {
        let index_str = format!("{:>2}.", idx + 1);
        let change = format!("{:>3} -> {:<3}", update.old_score, update.new_score);
        let change_padded = format!("{:<width$}", change, width = change_width);
        let fixed_width =
            index_width + 1 + change_width + temperature_width + separator.len() * 2;

        let lead_id = match term_width {
            Some(width) if width > fixed_width + 10 => truncate(&update.lead_id, width - fixed_width),
            Some(_) => truncate(&update.lead_id, 20),
            None => update.lead_id.clone(),
        };

        if use_colors {
            lines.push(format!(
                "{} {}{}{}{}{}",
                index_str.dimmed(),
                change_padded.bold(),
                separator,
                format_temperature(update.temperature, true),
                separator,
                lead_id
            ));
        } else {
            lines.push(format!(
                "{} {}{}{:<4}{}{}",
                index_str,
                change_padded,
                separator,
                update.temperature.to_string(),
                separator,
                lead_id
            ));
        }
    }

    if !report.skipped.is_empty() {
        lines.push(String::new());
        lines.push(format!("Skipped {} lead(s):", report.skipped.len()));
        for skipped in &report.skipped {
            let id = if use_colors {
                skipped.lead_id.yellow().to_string()
            } else {
                skipped.lead_id.clone()
            };
            lines.push(format!("  {}: {}", id, skipped.reason));
        }
    }

    lines.join("\n")
}

/// Format score updates as tab-separated values for scripting
/// Columns: lead_id, old_score, new_score, temperature (no headers, no colors)
pub fn format_tsv(report: &RecalcReport) -> String {
    report
        .updates
        .iter()
        .map(|u| format!("{}\t{}\t{}\t{}", u.lead_id, u.old_score, u.new_score, u.temperature))
        .collect::<Vec<_>>()
        .join("\n")
}
