//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use qnabot_core::bot::Bot;
use qnabot_core::qna::QnaRecord;
use qnabot_core::search::CandidateScore;
use qnabot_core::unresolved::{UnresolvedQuery, UnresolvedStatus};
use unicode_width::UnicodeWidthStr;

/// Print a single bot.
pub fn print_bot(bot: &Bot) {
    println!("{} {}", bot.name.cyan().bold(), format!("({})", bot.id).dimmed());
    println!();

    if let Some(desc) = &bot.description {
        println!("{}", desc);
        println!();
    }

    println!(
        "{}: {}",
        "Fallback".bold(),
        bot.fallback_message.as_deref().unwrap_or("(default)")
    );
    println!(
        "{}: {}",
        "Handover".bold(),
        if bot.handover_to_human { "yes".green() } else { "no".dimmed() }
    );
    if let Some(msg) = &bot.handover_message {
        println!("{}: {}", "Handover message".bold(), msg);
    }
    println!("{}: {}", "Created".bold(), bot.created_at.dimmed());
}

/// Print bots as a table.
pub fn print_bots_table(bots: &[Bot]) {
    if bots.is_empty() {
        println!("{}", "No bots found.".dimmed());
        return;
    }

    let name_width = column_width(30);
    println!("{:<36} {}", "ID", pad_right("Name", name_width));
    println!("{}", "─".repeat(37 + name_width));

    for bot in bots {
        println!(
            "{:<36} {}",
            bot.id,
            pad_right(&truncate_visual(&bot.name, name_width), name_width)
        );
    }

    println!();
    println!("{} bot(s) total", bots.len());
}

/// Print a single QnA record.
pub fn print_qna(record: &QnaRecord) {
    println!("{} {}", "Q:".cyan().bold(), record.question);
    println!("{} {}", "A:".green().bold(), record.answer);
    println!();
    println!("{}: {}", "ID".bold(), record.id.dimmed());
    println!("{}: {}", "Bot".bold(), record.bot_id);
    println!("{}: {}", "Updated".bold(), record.updated_at.dimmed());
}

/// Print QnA records as a table.
pub fn print_qna_table(records: &[QnaRecord]) {
    if records.is_empty() {
        println!("{}", "No QnA records found.".dimmed());
        return;
    }

    let text_width = column_width(40) / 2;
    println!(
        "{:<10} {} {}",
        "ID",
        pad_right("Question", text_width),
        "Answer"
    );
    println!("{}", "─".repeat(11 + text_width * 2 + 1));

    for record in records {
        println!(
            "{:<10} {} {}",
            short_id(&record.id),
            pad_right(&truncate_visual(&record.question, text_width), text_width),
            truncate_visual(&record.answer, text_width).dimmed()
        );
    }

    println!();
    println!("{} record(s)", records.len());
}

/// Print search candidates with whichever scores they carry.
pub fn print_candidates(candidates: &[CandidateScore]) {
    if candidates.is_empty() {
        println!("{}", "No matching answers.".dimmed());
        return;
    }

    let width = column_width(40);
    for (i, c) in candidates.iter().enumerate() {
        println!(
            "{}. {} {}",
            i + 1,
            truncate_visual(&c.question, width).cyan().bold(),
            format!("({})", short_id(&c.id)).dimmed()
        );
        println!("   {}", truncate_visual(&c.answer, width));
        println!("   {}", format_scores(c).dimmed());
    }
}

fn format_scores(c: &CandidateScore) -> String {
    let fields = [
        ("distance", c.vector_distance),
        ("cosine", c.cosine_similarity),
        ("cosine_score", c.cosine_score),
        ("hybrid_distance", c.hybrid_distance),
        ("hybrid", c.hybrid_score),
        ("combined", c.combined_score),
    ];
    fields
        .iter()
        .filter_map(|(name, value)| value.map(|v| format!("{}={:.3}", name, v)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Print unresolved queries as a table.
pub fn print_unresolved_table(entries: &[UnresolvedQuery]) {
    if entries.is_empty() {
        println!("{}", "No unresolved queries.".dimmed());
        return;
    }

    let query_width = column_width(40);
    println!(
        "{:<10} {:<10} {:<10} {}",
        "ID", "Bot", "Status", "Query"
    );
    println!("{}", "─".repeat(33 + query_width));

    for entry in entries {
        println!(
            "{:<10} {:<10} {:<10} {}",
            short_id(&entry.id),
            short_id(&entry.bot_id),
            status_colored(entry.status),
            truncate_visual(&entry.query, query_width)
        );
    }

    println!();
    println!("{} entr(ies)", entries.len());
}

fn status_colored(status: UnresolvedStatus) -> ColoredString {
    match status {
        UnresolvedStatus::Pending => "pending".yellow(),
        UnresolvedStatus::Skipped => "skipped".dimmed(),
        UnresolvedStatus::Resolved => "resolved".green(),
    }
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Width left for a free-text column after `reserved` fixed columns.
fn column_width(reserved: usize) -> usize {
    term_width().saturating_sub(reserved).max(20)
}

fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map(|(i, _)| &id[..i]).unwrap_or(id)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_visual() {
        assert_eq!(truncate_visual("short", 10), "short");
        assert_eq!(truncate_visual("a longer question", 8), "a long..");
        assert_eq!(truncate_visual("日本語のテキスト", 7), "日本..");
    }

    #[test]
    fn test_pad_right_uses_visual_width() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("日本", 6), "日本  ");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }

    #[test]
    fn test_ensemble_scores_show_all_filter_signals() {
        let mut c = CandidateScore::from_record(QnaRecord::new("q", "a", "b1", vec![]));
        c.cosine_similarity = Some(0.9);
        c.cosine_score = Some(0.9);
        c.hybrid_distance = Some(0.2);
        c.hybrid_score = Some(0.8);
        c.combined_score = Some(0.85);
        assert_eq!(
            format_scores(&c),
            "cosine=0.900  cosine_score=0.900  hybrid_distance=0.200  hybrid=0.800  combined=0.850"
        );
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
