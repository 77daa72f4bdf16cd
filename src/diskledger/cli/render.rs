//! Card rendering.
//!
//! Every disk is shown as a small card:
//!
//! ```text
//! SSD Principal                                   50 GB free
//!   Sistema Operativo, Apps
//!   [████████████████████████████████████░░░░]  90%
//!   450 GB / 500 GB                          id 3f2a9c1e
//! ```
//!
//! The bar and percentage are coloured by [`UsageLevel`]. Layout math is done
//! on display widths so names with wide characters still line up.

use colored::{ColoredString, Colorize};
use diskledger::api::{CmdMessage, MessageLevel};
use diskledger::model::{Disk, UsageLevel};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const CARD_WIDTH: usize = 60;
pub const BAR_WIDTH: usize = 40;
pub const SUMMARY_WIDTH: usize = 40;
const ID_PREFIX_LEN: usize = 8;
const INDENT: &str = "  ";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_cards(disks: &[Disk]) {
    print!("{}", render_cards(disks));
}

pub(super) fn print_disk_details(disks: &[Disk]) {
    for (i, disk) in disks.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", render_details(disk));
    }
}

pub fn render_cards(disks: &[Disk]) -> String {
    if disks.is_empty() {
        return "No disks found.\n".to_string();
    }
    disks
        .iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_card(disk: &Disk) -> String {
    let mut out = String::new();

    let free = format!("{} GB free", disk.free_space_gb());
    let title = truncate_to_width(&disk.name, CARD_WIDTH.saturating_sub(free.width() + 1));
    let padding = CARD_WIDTH.saturating_sub(title.width() + free.width());
    let free = if disk.free_space_gb() < 0 {
        free.red()
    } else {
        free.normal()
    };
    out.push_str(&format!("{}{}{}\n", title.bold(), " ".repeat(padding), free));

    let summary = if disk.contents.is_empty() {
        "(empty)".to_string()
    } else {
        truncate_to_width(&disk.content_summary(), SUMMARY_WIDTH)
    };
    out.push_str(&format!("{}{}\n", INDENT, summary.dimmed().italic()));

    let level = disk.usage_level();
    let percent = format!("{:>4.0}%", disk.usage_percentage());
    out.push_str(&format!(
        "{}[{}] {}\n",
        INDENT,
        paint(&usage_bar(disk.usage_percentage(), BAR_WIDTH), level),
        paint(&percent, level)
    ));

    let totals = format!("{} GB / {} GB", disk.used_space_gb(), disk.total_capacity_gb);
    let id = format!("id {}", short_id(&disk.id));
    let gap = CARD_WIDTH.saturating_sub(INDENT.width() + totals.width() + id.width());
    out.push_str(&format!("{}{}{}{}\n", INDENT, totals, " ".repeat(gap), id.dimmed()));
    out
}

/// Card followed by every content item with its size.
pub fn render_details(disk: &Disk) -> String {
    let mut out = render_card(disk);
    out.push_str(&format!("{}{}\n", INDENT, format!("id {}", disk.id).dimmed()));
    if disk.contents.is_empty() {
        return out;
    }
    out.push('\n');
    let size_width = disk
        .contents
        .iter()
        .map(|item| item.size_gb.to_string().len())
        .max()
        .unwrap_or(1);
    for item in &disk.contents {
        out.push_str(&format!(
            "{}{:>width$} GB  {}\n",
            INDENT,
            item.size_gb,
            item.description,
            width = size_width
        ));
    }
    out
}

/// Filled / empty bar for a usage percentage. Values above 100 fill the bar.
pub fn usage_bar(percentage: f64, width: usize) -> String {
    let ratio = (percentage / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn paint(text: &str, level: UsageLevel) -> ColoredString {
    match level {
        UsageLevel::Healthy => text.green(),
        UsageLevel::Elevated => text.yellow(),
        UsageLevel::Critical => text.red(),
    }
}

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(ID_PREFIX_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

pub(super) fn render_text_list(lines: &[String], empty_message: &str) -> String {
    if lines.is_empty() {
        return format!("{}\n", empty_message);
    }
    lines.iter().map(|l| format!("{}\n", l)).collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
