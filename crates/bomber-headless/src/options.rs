/// Command-line options, given as `--name=value` flags.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Hard stop after this many ticks.
    pub max_ticks: u64,
    /// Stop once this many rounds have been won.
    pub rounds: u32,
    /// Seed for the scripted input stream.
    pub seed: u64,
    /// Pace ticks at the configured tick rate instead of running flat out.
    pub realtime: bool,
    pub json_logs: bool,
    /// Write the final render snapshot here as JSON.
    pub snapshot_path: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_ticks: 36_000,
            rounds: 1,
            seed: 42,
            realtime: false,
            json_logs: false,
            snapshot_path: None,
        }
    }
}

impl RunOptions {
    /// Parse flags, ignoring anything unrecognized or malformed.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut opts = Self::default();
        for arg in args {
            if let Some(v) = arg.strip_prefix("--ticks=")
                && let Ok(n) = v.parse()
            {
                opts.max_ticks = n;
            } else if let Some(v) = arg.strip_prefix("--rounds=")
                && let Ok(n) = v.parse()
            {
                opts.rounds = n;
            } else if let Some(v) = arg.strip_prefix("--seed=")
                && let Ok(n) = v.parse()
            {
                opts.seed = n;
            } else if let Some(v) = arg.strip_prefix("--snapshot=")
                && !v.is_empty()
            {
                opts.snapshot_path = Some(v.to_string());
            } else if arg == "--realtime" {
                opts.realtime = true;
            } else if arg == "--json-logs" {
                opts.json_logs = true;
            }
        }
        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> RunOptions {
        RunOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_args_gives_defaults() {
        assert_eq!(parse(&[]), RunOptions::default());
    }

    #[test]
    fn all_flags() {
        let opts = parse(&[
            "--ticks=600",
            "--rounds=3",
            "--seed=7",
            "--realtime",
            "--json-logs",
            "--snapshot=out.json",
        ]);
        assert_eq!(opts.max_ticks, 600);
        assert_eq!(opts.rounds, 3);
        assert_eq!(opts.seed, 7);
        assert!(opts.realtime);
        assert!(opts.json_logs);
        assert_eq!(opts.snapshot_path.as_deref(), Some("out.json"));
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let opts = parse(&["--ticks=lots", "--seed=", "--snapshot=", "--bogus"]);
        assert_eq!(opts, RunOptions::default());
    }
}
