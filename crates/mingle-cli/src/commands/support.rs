use std::io::Write;

use anyhow::Result;
use mingle_core::Profile;
use serde::Serialize;

const LIST_ABOUT_CHARS: usize = 50;

pub(super) fn render_card(profile: &Profile) -> String {
    let mut card = format!(
        "{}\n  Branch: {}\n  Role: {}\n  About: {}",
        profile.name, profile.branch, profile.role, profile.about
    );
    if let Some(photo) = &profile.photo_ref {
        card.push_str(&format!("\n  Photo: {photo}"));
    }
    card
}

pub(super) fn render_list_line(position: usize, profile: &Profile) -> String {
    format!(
        "{position}. {} - {} | {}\n   {}",
        profile.name,
        profile.branch,
        profile.role,
        truncate_text(&profile.about, LIST_ABOUT_CHARS)
    )
}

pub(super) fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn truncate_text(text: &str, max_chars: usize) -> String {
    let Some((clip_idx, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };
    let mut out = text[..clip_idx].to_string();
    out.push_str("...");
    out
}
