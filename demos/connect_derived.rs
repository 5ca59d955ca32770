use byexample::{derive::*, CommandLine};

#[derive(Debug, FromMatches)]
struct Connect {
    secure: bool,
    retries: u32,
    #[byexample(name = "timeout")]
    timeout_seconds: Option<f64>,
    mode: Option<String>,
    host: String,
    port: u16,
}

fn main() {
    let command_line = CommandLine::build(
        "Usage: $0 [options] [mode] host port

Options:
  -s, --secure        Use a secure connection
  -r, --retries NUM   Number of retries (default 3)
  -t, --timeout ARG   Seconds to wait for each attempt",
    );
    let connect: Connect = command_line.parse_into();
    println!("{connect:?}");
}
