use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "tally", about = concat!("tally v", env!("CARGO_PKG_VERSION"), " - tasks and goals from the terminal"), version)]
pub struct Cli {
    /// Read and write configuration at this path instead of the default
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Launch the terminal UI
    #[arg(long)]
    pub tui: bool,

    /// Print listings as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip git pull/push even when git is configured
    #[arg(long)]
    pub no_sync: bool,

    /// Command words, e.g. `task new "Buy milk"` or `goal tally 0 max 20`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_words_are_collected_verbatim() {
        let cli = Cli::parse_from(["tally", "--no-sync", "task", "new", "-x"]);
        assert!(cli.no_sync);
        assert!(!cli.tui);
        assert_eq!(cli.args, vec!["task", "new", "-x"]);
    }

    #[test]
    fn no_words_means_listing() {
        let cli = Cli::parse_from(["tally", "--json"]);
        assert!(cli.json);
        assert!(cli.args.is_empty());
        assert!(cli.config.is_none());
    }
}
