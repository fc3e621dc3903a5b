//! Rate Client — a one-shot CLI that fetches the current USD-BRL quotation
//! from the local rate server and records it in a text file. It issues a
//! single `GET /cotacao` under a 300 ms deadline, extracts the `bid` field,
//! writes `Dollar: <bid>` to `cotacao.txt` in the working directory, and
//! prints a confirmation line.
//!
//! Every failure propagates to the single exit point in `main`: the process
//! prints a diagnostic to stderr and exits non-zero, and the output file is
//! only touched after a response has been fully received and parsed.
#![warn(missing_docs)]
mod fetch;

use std::io::Write;

use log::info;

use rate_common::Result;
use rate_common::net::rate_url;

/// File the fetched rate is written to, in the working directory.
const OUTPUT_FILE: &str = "cotacao.txt";

fn main() -> Result<()> {
    init_logger();

    let url = rate_url("localhost");
    info!("Requesting exchange rate from {}", url);

    let body = fetch::fetch_rate_body(&url)?;
    let bid = fetch::parse_bid(&body)?;

    write_rate_file(OUTPUT_FILE, &bid)?;
    println!("Exchange rate saved to {}: {}", OUTPUT_FILE, bid);
    Ok(())
}

/// Write `Dollar: <bid>` followed by a newline to `path`, replacing any
/// existing content.
fn write_rate_file(path: &str, bid: &str) -> Result<()> {
    let mut file = open_output(path)?;
    file.write_all(format!("Dollar: {}\n", bid).as_bytes())?;
    Ok(())
}

#[cfg(unix)]
fn open_output(path: &str) -> std::io::Result<std::fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(path)
}

#[cfg(not(unix))]
fn open_output(path: &str) -> std::io::Result<std::fs::File> {
    std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_exact_file_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cotacao.txt");
        let path = path.to_str().unwrap();

        write_rate_file(path, "5.43").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Dollar: 5.43\n");
    }

    #[test]
    fn overwrites_longer_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cotacao.txt");
        let path = path.to_str().unwrap();

        write_rate_file(path, "5.431234567890").unwrap();
        write_rate_file(path, "5.43").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Dollar: 5.43\n");
    }

    #[test]
    fn empty_bid_still_produces_the_fixed_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cotacao.txt");
        let path = path.to_str().unwrap();

        write_rate_file(path, "").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Dollar: \n");
    }
}
