use std::io::{BufRead, Write};

use anyhow::Result;
use mingle_core::{FormEvent, Mingle, ProfileField, SessionState};

use super::support::render_card;

// The per-viewer session map is the source of truth between turns, the way
// a message-at-a-time chat transport would keep it; this loop reads the
// state back before every prompt. EOF aborts and discards the session.
pub(super) fn drive_session(
    engine: &Mingle,
    user: i64,
    initial: SessionState,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    engine.sessions.set(user, initial)?;
    loop {
        let Some(state) = engine.sessions.get(user)? else {
            return Ok(());
        };
        writeln!(out, "{}", prompt_for(state.awaiting()))?;

        let Some(line) = read_line(input)? else {
            engine.sessions.remove(user)?;
            writeln!(out, "Aborted; nothing was saved.")?;
            return Ok(());
        };

        match state.apply_text(&line) {
            FormEvent::Advanced(next) => {
                engine.sessions.set(user, next)?;
            }
            FormEvent::Rejected { state, reason } => {
                writeln!(out, "{reason}. Try again.")?;
                engine.sessions.set(user, state)?;
            }
            FormEvent::CompletedDraft(draft) => {
                let profile = draft.into_profile(user)?;
                engine.put_profile(&profile)?;
                engine.sessions.remove(user)?;
                tracing::info!(user, "profile registered");
                writeln!(out, "Profile saved:")?;
                writeln!(out, "{}", render_card(&profile))?;
                return Ok(());
            }
            FormEvent::CompletedEdit(profile) => {
                engine.put_profile(&profile)?;
                engine.sessions.remove(user)?;
                writeln!(out, "Profile updated:")?;
                writeln!(out, "{}", render_card(&profile))?;
                return Ok(());
            }
        }
    }
}

fn prompt_for(field: ProfileField) -> &'static str {
    match field {
        ProfileField::Name => "Your name:",
        ProfileField::Branch => "Your branch or department:",
        ProfileField::Role => "Your role or title:",
        ProfileField::About => "Tell people about your interests, skills and goals:",
        ProfileField::Photo => "A photo reference, or 'skip':",
    }
}

fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
}
