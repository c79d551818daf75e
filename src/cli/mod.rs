//! Command line front end: flags, prompts and presentation

mod app;
mod args;
mod prompt;
mod report;

pub use app::run;
pub use args::Cli;
pub use report::{EstimateReport, ProgressDisplay};
