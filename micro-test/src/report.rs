//! Report formatting and verbosity selection
//!
//! The report stream is line oriented: a banner at startup, one `Pass:` or
//! `Fail:` line per recorded assertion (subject to the [`ReportMode`]), and a
//! summary line with total/passed/failed counts at shutdown.

use colored::Colorize;
use thiserror::Error;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Which assertion outcomes are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// Print every pass and fail line.
    #[default]
    All,
    /// Suppress pass lines.
    FailuresOnly,
    /// Print only the banner and the summary.
    SummaryOnly,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportModeError {
    #[error("unrecognized report option: {option}")]
    UnrecognizedOption { option: String },
}

impl ReportMode {
    /// Selects a mode from the hosting program's invocation arguments.
    ///
    /// The selector is the second character of the first argument after the
    /// program name: `-a` show all, `-f` failures only, `-s` summary only.
    /// No argument defaults to [`ReportMode::All`]; anything else is an
    /// error the caller turns into usage-and-exit.
    pub fn parse(args: &[String]) -> Result<Self, ReportModeError> {
        let Some(flag) = args.get(1) else {
            return Ok(Self::All);
        };

        match flag.chars().nth(1) {
            Some('a') => Ok(Self::All),
            Some('f') => Ok(Self::FailuresOnly),
            Some('s') => Ok(Self::SummaryOnly),
            _ => Err(ReportModeError::UnrecognizedOption {
                option: flag.clone(),
            }),
        }
    }

    pub(crate) fn shows_passes(self) -> bool {
        matches!(self, Self::All)
    }

    pub(crate) fn shows_failures(self) -> bool {
        !matches!(self, Self::SummaryOnly)
    }
}

pub(crate) fn usage(program: &str) -> String {
    format!(
        "\nMicro Test Usage\n\
         ================\n\n\
         {program} [OPTIONS]\n\n\
         OPTIONS\n\
         \x20  <blank>  No arguments passed, show all test results.\n\
         \x20  -a       Show all test results.\n\
         \x20  -f       Show only failing results.\n\
         \x20  -s       Show only the summary report.\n\
         \x20  -h       Output this usage message and exit.\n"
    )
}

pub(crate) fn banner() -> String {
    format!(
        "\no=============================================o\n\
         | Micro Test v{VERSION} for Rust                  |\n\
         o=============================================o"
    )
}

pub(crate) fn pass_line(description: &str) -> String {
    format!("{} {description}", "Pass:".green())
}

pub(crate) fn fail_line(description: &str) -> String {
    format!("{} {description}", "Fail:".red())
}

pub(crate) fn summary(passed: u32, failed: u32) -> String {
    format!(
        "==============================================\n\
         Test Summary: Tests({}) Passed({}) Failed({})\n",
        passed + failed,
        passed,
        failed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(flag: &str) -> Vec<String> {
        vec!["micro-test".to_string(), flag.to_string()]
    }

    #[test]
    fn no_arguments_defaults_to_all() {
        assert_eq!(
            ReportMode::parse(&["micro-test".to_string()]),
            Ok(ReportMode::All)
        );
    }

    #[test]
    fn selector_is_the_second_character() {
        assert_eq!(ReportMode::parse(&args("-a")), Ok(ReportMode::All));
        assert_eq!(ReportMode::parse(&args("-f")), Ok(ReportMode::FailuresOnly));
        assert_eq!(ReportMode::parse(&args("-s")), Ok(ReportMode::SummaryOnly));
        // Only the second character matters.
        assert_eq!(ReportMode::parse(&args("xfail")), Ok(ReportMode::FailuresOnly));
    }

    #[test]
    fn unknown_selectors_are_rejected() {
        let err = ReportMode::parse(&args("-h")).unwrap_err();
        assert_eq!(err.to_string(), "unrecognized report option: -h");

        assert!(ReportMode::parse(&args("-z")).is_err());
        // Too short to carry a selector at all.
        assert!(ReportMode::parse(&args("x")).is_err());
    }

    #[test]
    fn all_mode_prints_both_outcomes() {
        assert!(ReportMode::All.shows_passes());
        assert!(ReportMode::All.shows_failures());
    }

    #[test]
    fn failures_only_mode_suppresses_pass_lines() {
        assert!(!ReportMode::FailuresOnly.shows_passes());
        assert!(ReportMode::FailuresOnly.shows_failures());
    }

    #[test]
    fn summary_only_mode_suppresses_both() {
        assert!(!ReportMode::SummaryOnly.shows_passes());
        assert!(!ReportMode::SummaryOnly.shows_failures());
    }

    #[test]
    fn summary_line_carries_all_three_counts() {
        let line = summary(5, 2);
        assert!(line.contains("Tests(7)"));
        assert!(line.contains("Passed(5)"));
        assert!(line.contains("Failed(2)"));
    }
}
