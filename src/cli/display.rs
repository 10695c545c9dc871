// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the ayat CLI.
//!
//! Box drawing, score and size formatting. Colors only when stdout is a TTY
//! and `NO_COLOR` is unset, so piping into a file or another tool gets plain
//! text.

use std::sync::OnceLock;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const GRAY: &str = "\x1b[90m";

static USE_COLORS: OnceLock<bool> = OnceLock::new();

/// Check if colors should be used (TTY detection, cached)
pub fn use_colors() -> bool {
    *USE_COLORS.get_or_init(|| {
        // Respect NO_COLOR standard
        std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
    })
}

/// Apply styles if colors are on, otherwise return plain text
pub fn styled(styles: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", styles.concat(), text, RESET)
    } else {
        text.to_string()
    }
}

fn border(s: &str) -> String {
    styled(&[GRAY], s)
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", styled(&[CYAN, BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("┌"),
        label_part,
        border(&format!("{}┐", "─".repeat(remaining)))
    );
}

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content) + 1);
    println!("{} {}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// Print a `label  value` line inside a box
pub fn field(label: &str, value: &str) {
    row(&format!("{}{}", styled(&[DIM], &format!("{:<16}", label)), value));
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Format bytes as human-readable size
pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Compressed size with the saving relative to `raw`
pub fn compressed_size(raw: usize, compressed: usize) -> String {
    let size = format_size(compressed);
    if raw == 0 {
        return size;
    }
    let saved_pct = (1.0 - compressed as f64 / raw as f64) * 100.0;
    format!("{} {}", size, styled(&[GREEN], &format!("(-{:.0}%)", saved_pct)))
}

/// Color-coded score value
pub fn score_value(score: f64) -> String {
    let text = format!("{:>7.2}", score);
    let color = if score >= 5.0 {
        GREEN
    } else if score >= 2.0 {
        YELLOW
    } else {
        GRAY
    };
    styled(&[color], &text)
}

/// Verse reference like `2:255`
pub fn verse_ref(surah: u16, verse: u16) -> String {
    styled(&[BLUE, BOLD], &format!("{}:{}", surah, verse))
}

/// Timing in milliseconds
pub fn timing_ms(ms: f64) -> String {
    styled(&[DIM], &format!("{:.2} ms", ms))
}
