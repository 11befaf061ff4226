use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;

pub use args::{EditArgs, FieldArg, ResetArgs, SearchArgs, UserArg, ViewerArg};

#[derive(Debug, Parser)]
#[command(name = "mingle")]
#[command(about = "Profile matchmaking over a chat-style command surface", version)]
pub struct Cli {
    #[arg(long, default_value = ".mingle")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the data root and database.
    Init,
    /// Fill in your profile, one question at a time.
    Register(UserArg),
    /// Show your own profile card.
    Profile(UserArg),
    /// Re-answer a single profile question.
    Edit(EditArgs),
    /// Delete your profile and every connection it made.
    Reset(ResetArgs),
    /// Deal the next unseen profile card.
    Browse(ViewerArg),
    /// Express interest in the card currently on screen.
    Like(ViewerArg),
    /// Keyword search over profiles.
    Search(SearchArgs),
    /// List the profiles you have already been dealt.
    Viewed(ViewerArg),
    /// Forget which profiles you have been dealt.
    ClearViewed(ViewerArg),
    /// Population size.
    Count,
}
