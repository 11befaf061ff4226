use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use mingle_core::{MatchOutcome, Mingle, MingleError, NextOutcome, SessionState};

use crate::cli::{Commands, ResetArgs, SearchArgs, ViewerArg};

mod form;
mod support;

use self::form::drive_session;
use self::support::{print_json, render_card, render_list_line};

const MSG_TOO_FEW_PROFILES: &str =
    "Not enough profiles around yet. Ask a colleague to register, then browse again.";
const MSG_DECK_RESHUFFLED: &str =
    "You have seen everyone! The deck was reshuffled; browse again to start over.";
const MSG_NOTHING_ON_SCREEN: &str = "Nothing on screen. Browse first.";
const MSG_INTEREST_SENT: &str =
    "Interest sent. If it turns out to be mutual, you will both hear about it.";
const MSG_CANDIDATE_GONE: &str = "That profile is gone. Browse for another one.";
const MSG_PROFILE_MISSING: &str = "No profile yet. Run `mingle register` to create one.";
const MSG_RESET_CONFIRM: &str =
    "This permanently deletes your profile and every connection it made. Re-run with --yes to confirm.";

pub(crate) fn run_from_root(root: &Path, command: Commands) -> Result<()> {
    let engine = Mingle::open(root).context("failed to open engine")?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(&engine, root, command, &mut input, &mut out)
}

fn run_command(
    engine: &Mingle,
    root: &Path,
    command: Commands,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Init => {
            writeln!(out, "initialized at {}", root.display())?;
        }
        Commands::Register(args) => {
            if engine.get_profile(args.user)?.is_some() {
                writeln!(
                    out,
                    "You already have a profile. Use `mingle edit` to change it."
                )?;
                return Ok(());
            }
            drive_session(engine, args.user, SessionState::creating(), input, out)?;
        }
        Commands::Profile(args) => match engine.get_profile(args.user)? {
            Some(profile) => writeln!(out, "{}", render_card(&profile))?,
            None => writeln!(out, "{MSG_PROFILE_MISSING}")?,
        },
        Commands::Edit(args) => {
            let Some(prior) = engine.get_profile(args.user)? else {
                writeln!(out, "{MSG_PROFILE_MISSING}")?;
                return Ok(());
            };
            let state = SessionState::editing(args.field.into(), prior);
            drive_session(engine, args.user, state, input, out)?;
        }
        Commands::Reset(args) => run_reset(engine, args, out)?,
        Commands::Browse(args) => run_browse(engine, args, out)?,
        Commands::Like(args) => run_like(engine, args, out)?,
        Commands::Search(args) => run_search(engine, args, out)?,
        Commands::Viewed(args) => run_viewed(engine, args, out)?,
        Commands::ClearViewed(args) => {
            engine.clear_viewed(args.viewer)?;
            writeln!(
                out,
                "Viewed list cleared. Browsing starts from the full deck again."
            )?;
        }
        Commands::Count => {
            print_json(out, &serde_json::json!({ "profiles": engine.profile_count()? }))?;
        }
    }
    Ok(())
}

fn run_reset(engine: &Mingle, args: ResetArgs, out: &mut impl Write) -> Result<()> {
    if !args.yes {
        writeln!(out, "{MSG_RESET_CONFIRM}")?;
        return Ok(());
    }
    if engine.delete_profile(args.user)? {
        tracing::info!(user = args.user, "profile reset");
        writeln!(out, "Profile deleted. Run `mingle register` to start over.")?;
    } else {
        writeln!(out, "{MSG_PROFILE_MISSING}")?;
    }
    Ok(())
}

fn run_browse(engine: &Mingle, args: ViewerArg, out: &mut impl Write) -> Result<()> {
    if engine.profile_count()? < 2 {
        writeln!(out, "{MSG_TOO_FEW_PROFILES}")?;
        return Ok(());
    }
    match engine.next(args.viewer)? {
        NextOutcome::Candidate(profile) => writeln!(out, "{}", render_card(&profile))?,
        NextOutcome::Exhausted => {
            // Exhaustion policy lives here, not in the engine: clear and let
            // the next browse go around again.
            engine.clear_viewed(args.viewer)?;
            writeln!(out, "{MSG_DECK_RESHUFFLED}")?;
        }
    }
    Ok(())
}

fn run_like(engine: &Mingle, args: ViewerArg, out: &mut impl Write) -> Result<()> {
    let Some(candidate_id) = engine.tracker.take_current(args.viewer)? else {
        writeln!(out, "{MSG_NOTHING_ON_SCREEN}")?;
        return Ok(());
    };
    match engine.record_interest(args.viewer, candidate_id) {
        Ok(MatchOutcome::Pending) => writeln!(out, "{MSG_INTEREST_SENT}")?,
        Ok(MatchOutcome::Matched(liker, liked)) => {
            tracing::info!(a = liker.user_id, b = liked.user_id, "mutual interest");
            writeln!(
                out,
                "It's a match! {} and {} are both interested. Here is who you met:",
                liker.name, liked.name
            )?;
            writeln!(out, "{}", render_card(&liked))?;
        }
        Err(MingleError::NotFound(_)) => writeln!(out, "{MSG_CANDIDATE_GONE}")?,
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn run_search(engine: &Mingle, args: SearchArgs, out: &mut impl Write) -> Result<()> {
    let query = args.terms.join(" ");
    let hits = engine.search(args.viewer, &query)?;
    if hits.is_empty() {
        writeln!(out, "No profiles matched.")?;
        return Ok(());
    }
    tracing::debug!(query = %query, hits = hits.len(), "search served");
    for (i, hit) in hits.iter().enumerate() {
        writeln!(out, "{}", render_list_line(i + 1, &hit.profile))?;
    }
    Ok(())
}

fn run_viewed(engine: &Mingle, args: ViewerArg, out: &mut impl Write) -> Result<()> {
    let profiles = engine.viewed_profiles(args.viewer)?;
    if profiles.is_empty() {
        writeln!(
            out,
            "You have not been dealt anyone yet. Browse to meet people."
        )?;
        return Ok(());
    }
    writeln!(out, "Viewed profiles ({}):", profiles.len())?;
    for (i, profile) in profiles.iter().enumerate() {
        writeln!(out, "{}", render_list_line(i + 1, profile))?;
    }
    Ok(())
}
