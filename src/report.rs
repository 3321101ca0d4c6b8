// src/report.rs
// =============================================================================
// This module turns check results into lines of text for the terminal.
//
// Output format (one line per site, offline adds the error):
//   The status of 'python.org' is: "Online!" ✅
//   The status of 'nope.invalid' is: "Offline?" ❌
//    Error: "dns error: failed to lookup address information"
//
// Formatting and printing are separate functions so the format can be
// tested without capturing stdout.
// =============================================================================

use crate::checker::{CheckResult, ProbeOutcome};

// Formats one result as it will be printed
pub fn format_result(result: &CheckResult) -> String {
    let prefix = format!("The status of '{}' is:", result.target);

    match &result.outcome {
        ProbeOutcome::Online => format!("{} \"Online!\" ✅", prefix),
        offline => format!(
            "{} \"Offline?\" ❌ \n Error: \"{}\"",
            prefix,
            offline.error_detail().unwrap_or_default()
        ),
    }
}

pub fn print_result(result: &CheckResult) {
    println!("{}", format_result(result));
}

// One-line tally printed after all results
pub fn format_summary(results: &[CheckResult]) -> String {
    let online = results.iter().filter(|r| r.is_online()).count();
    let offline = results.len() - online;

    format!(
        "📊 {} online, {} offline, {} total",
        online,
        offline,
        results.len()
    )
}

pub fn print_summary(results: &[CheckResult]) {
    println!();
    println!("{}", format_summary(results));
}
