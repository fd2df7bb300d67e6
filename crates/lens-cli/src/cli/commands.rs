use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Research an employer and print a grounded report.
    Analyze(AnalyzeArgs),
    /// Print the search queries planned for a subject (no network).
    Plan(PlanArgs),
    /// Show which configuration sections are ready.
    Status,
    /// Print the JSON schema of the analysis response.
    Schema,
}

#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    /// Free text naming the employer, optionally with role and location.
    pub subject: String,

    /// File with the applicant's resume or bio.
    #[arg(long, value_name = "FILE")]
    pub resume: Option<PathBuf>,

    /// Report language: en, zh-CN, zh-TW.
    #[arg(long, value_name = "CODE")]
    pub lang: Option<String>,

    /// Keep citations as plain `[N]` marks instead of links.
    #[arg(long)]
    pub no_links: bool,
}

#[derive(Clone, Debug, Args)]
pub struct PlanArgs {
    /// Company name.
    pub company: String,

    #[arg(long)]
    pub role: Option<String>,

    #[arg(long)]
    pub location: Option<String>,
}
