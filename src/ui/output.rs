//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including diagnostic notes.
    Verbose,
    /// Show results and status.
    #[default]
    Normal,
    /// Show results only, no headers or success notes.
    Quiet,
}

impl OutputMode {
    /// Pick a mode from the global CLI flags.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows headers and status messages.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_flag_wins() {
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Quiet);
        assert_eq!(OutputMode::from_flags(true, false), OutputMode::Verbose);
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Normal);
    }

    #[test]
    fn output_mode_shows_status() {
        assert!(OutputMode::Verbose.shows_status());
        assert!(OutputMode::Normal.shows_status());
        assert!(!OutputMode::Quiet.shows_status());
    }

    #[test]
    fn output_mode_default() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }
}
