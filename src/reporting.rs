//! Console summary for a completed run.

use colored::Colorize;

use crate::types::ApiStats;

/// Prints the post-run summary: global totals plus per-platform coverage,
/// in tracked-platform order.
pub fn print_summary(stats: &ApiStats, platforms: &[String]) {
    println!();
    println!("{}", "Summary:".bold());
    println!("  Total APIs: {}", stats.summary.total_apis);
    println!("  Features: {}", stats.features.len());
    println!("  Timeline points: {}", stats.timeline.len());
    println!();
    println!("  {}", "Platform coverage:".bold());

    for platform in platforms {
        let Some(summary) = stats.summary.by_platform.get(platform) else {
            continue;
        };
        let percent = format!("{}%", summary.coverage_percent);
        let tinted = match summary.coverage_percent {
            80.. => percent.green(),
            50..=79 => percent.yellow(),
            _ => percent.red(),
        };
        println!(
            "    {platform}: {} ({tinted})",
            summary.supported_count
        );
    }
}
