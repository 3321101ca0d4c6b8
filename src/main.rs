// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing) and parse command-line arguments using clap
// 2. Collect the URLs to check from the flags and the optional input file
// 3. Probe every URL, one at a time or all at once (--asynchronous)
// 4. Print one line per URL, then a summary
// 5. Exit with proper code (0 = checks ran, 1 = nothing to check, 2 = error)
//
// Note: an offline site is NOT a failure of the program. The exit code only
// says whether the checks could run.
//
// Rust concepts used:
// - async/await: Because we may make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to pick the execution mode
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod checker;       // src/checker/ - probing logic
mod report;        // src/report.rs - printing results
mod targets;       // src/targets/ - collecting the URLs to check

use std::sync::Arc;

use cli::{CheckerConfig, Cli, Mode};
use clap::Parser;  // Parser trait enables the parse() method
use checker::{Prober, ReqwestHead, SiteProber};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{Context, Result};

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout only contains the report
    // RUST_LOG=debug shows every HEAD attempt
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = checks ran (whatever the sites' status)
//   Ok(1) = no URLs to check
//   Err = unexpected error
async fn run(cli: Cli) -> Result<i32> {
    run_with(cli, |config| {
        let requester =
            ReqwestHead::new(config.timeout).context("failed to create HTTP client")?;
        Ok(SiteProber::new(requester))
    })
    .await
}

// Same as run(), but the caller decides how the prober is built
//
// The prober is only built once we know there is something to check, so an
// empty target list never opens a connection.
async fn run_with<P, B>(cli: Cli, build_prober: B) -> Result<i32>
where
    P: Prober + 'static,
    B: FnOnce(&CheckerConfig) -> Result<P>,
{
    let config = cli.checker_config();
    debug!(?config, "Parsed configuration");

    let targets = targets::collect_targets(&cli.urls, cli.input_file.as_deref());
    if targets.is_empty() {
        eprintln!("Error: no URLs to check ❗");
        return Ok(1);
    }

    info!(count = targets.len(), mode = ?config.mode, "Checking targets");

    let prober = build_prober(&config)?;

    let results = match config.mode {
        Mode::Sequential => {
            // Print each result as soon as it is known
            checker::check_sequential(&prober, &targets, report::print_result).await
        }
        Mode::Concurrent => {
            // Wait for everything, then print in input order
            let results =
                checker::check_concurrent(Arc::new(prober), &targets, config.max_concurrency).await;
            for result in &results {
                report::print_result(result);
            }
            results
        }
    };

    report::print_summary(&results);

    Ok(0)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is run() separate from main()?
//    - main() can't easily return custom exit codes with ?
//    - run() uses Result and ? freely, main() turns that into an exit code
//    - It also lets tests call run() directly
//    - run_with() lets tests swap in a fake prober
//
// 2. What is .context()?
//    - From anyhow: wraps an error with a human-readable message
//    - "{:#}" prints the message AND the underlying cause
//
// 3. Why pass report::print_result directly?
//    - A function is also a value in Rust
//    - fn(&CheckResult) satisfies the FnMut(&CheckResult) bound
//
// 4. What does .as_deref() do?
//    - Turns Option<PathBuf> into Option<&Path>
//    - Borrowing instead of moving, so cli stays usable
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::checker::{ProbeOutcome, Target};
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    // Fake prober that counts calls and says every site is online
    struct CountingProber {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Prober for CountingProber {
        async fn probe(&self, _target: &Target) -> ProbeOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ProbeOutcome::Online
        }
    }

    // Runs with a CountingProber; returns (exit code, was the prober built?, probe calls)
    async fn run_counting(args: &[&str]) -> (i32, bool, usize) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut built = false;

        let code = run_with(parse(args), |_| {
            built = true;
            Ok(CountingProber {
                calls: Arc::clone(&calls),
            })
        })
        .await
        .unwrap();

        (code, built, calls.load(Ordering::SeqCst))
    }

    #[tokio::test]
    async fn test_no_urls_exits_with_one() {
        let code = run(parse(&["site-checker"])).await.unwrap();
        assert_eq!(code, 1);
    }

    #[tokio::test]
    async fn test_no_urls_never_probes() {
        let (code, built, calls) = run_counting(&["site-checker", "-a"]).await;

        assert_eq!(code, 1);
        assert!(!built);
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_only_empty_file_never_probes() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let (code, built, calls) = run_counting(&["site-checker", "-f", path]).await;

        assert_eq!(code, 1);
        assert!(!built);
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_every_target_is_probed_once() {
        let (code, built, calls) = run_counting(&["site-checker", "-u", "a.com", "b.com"]).await;

        assert_eq!(code, 0);
        assert!(built);
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_offline_site_still_exits_with_zero() {
        // Grab a free port, then close it so nothing is listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        drop(listener);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", address).unwrap();
        let path = file.path().to_str().unwrap();

        let code = run(parse(&["site-checker", "-f", path, "-a"])).await.unwrap();

        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_online_site_exits_with_zero() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buffer = [0u8; 1024];
            let _ = socket.read(&mut buffer).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n")
                .await
                .unwrap();
        });

        let code = run(parse(&["site-checker", "-u", address.as_str()])).await.unwrap();

        assert_eq!(code, 0);
    }
}
