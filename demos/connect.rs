use byexample::CommandLine;

const USAGE: &str = "Usage: $0 [options] host port

Open a connection to host.

Options:
  -s, --secure        Use a secure connection
  -r, --retries NUM   Number of retries (default 3)
  -t, --timeout ARG   Seconds to wait for each attempt";

fn main() {
    let command_line = CommandLine::build(USAGE);
    let matches = command_line.parse();

    let host = matches.text("host").unwrap_or_default();
    let port = matches.text("port").unwrap_or_default();
    // Defaults are text; `require` converts either form.
    let retries: u32 = matches.require("retries").unwrap_or_default();
    let scheme = if matches.include("secure") {
        "https"
    } else {
        "http"
    };
    println!("Connecting to {scheme}://{host}:{port} with {retries} retries.");

    if let Some(timeout) = matches.text("timeout") {
        println!("Each attempt waits {timeout}s.");
    }
}
