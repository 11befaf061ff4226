use clap::{Args, ValueEnum};
use mingle_core::ProfileField;

#[derive(Debug, Args)]
pub struct UserArg {
    /// Your numeric user id, as assigned by the chat platform.
    #[arg(long)]
    pub user: i64,
}

#[derive(Debug, Args)]
pub struct ViewerArg {
    /// The browsing user's numeric id.
    #[arg(long)]
    pub viewer: i64,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    #[arg(long)]
    pub user: i64,
    /// Which profile question to re-answer.
    #[arg(long, value_enum)]
    pub field: FieldArg,
}

#[derive(Debug, Args)]
pub struct ResetArgs {
    #[arg(long)]
    pub user: i64,
    /// Skip the confirmation gate.
    #[arg(long, default_value_t = false)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[arg(long)]
    pub viewer: i64,
    /// Keywords to look for in names, branches, roles and about texts.
    #[arg(required = true)]
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    Name,
    Branch,
    Role,
    About,
    Photo,
}

impl From<FieldArg> for ProfileField {
    fn from(value: FieldArg) -> Self {
        match value {
            FieldArg::Name => Self::Name,
            FieldArg::Branch => Self::Branch,
            FieldArg::Role => Self::Role,
            FieldArg::About => Self::About,
            FieldArg::Photo => Self::Photo,
        }
    }
}
