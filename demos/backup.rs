use byexample::{derive::*, prelude::*, CommandLine};
use chrono::NaiveDate;

#[derive(Debug, FromMatches)]
struct Backup {
    verbose: bool,
    since: Option<NaiveDate>,
    #[byexample(name = "dest")]
    destination: String,
    sources: Vec<String>,
}

fn main() {
    // The numeric shorthand `-5` means `-n 5`.
    let command_line = CommandLine::build(
        "Usage: $0 [-v] [--since DATE] [-n NUM] dest sources...

Options:
  -v, --verbose     Print each file as it is copied
  --since DATE      Only copy files changed after the date
  -n NUM            Keep this many old backups (default 2)",
    );
    let matches = command_line.parse();
    let keep: u32 = matches.require("n").unwrap_or_default();

    match Backup::from_matches(&matches) {
        Ok(backup) => println!("{backup:?}, keeping {keep}"),
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}
