//! End-of-run summary.

use log::info;

use crate::app::console::{print_notice, print_success, print_warning};
use crate::run::RunReport;

/// Logs per-operation totals and prints the operator summary.
pub fn print_run_summary(report: &RunReport) {
    info!(
        "Run statistics: segments={}, sections={}, rows={}, elapsed={:.2}s",
        report.segment_count,
        report.operations.sections.len(),
        report.operations.total_rows(),
        report.elapsed_seconds
    );

    for section in &report.operations.sections {
        println!(
            "  {:<9} {:>8} distinct {:>10} total",
            section.kind.keyword(),
            section.rows.len(),
            section.total_occurrences()
        );
    }

    if report.decoder_warned {
        print_warning("decoder exited non-zero without a message; the report may be incomplete");
    }
    if !report.raw_log_removed {
        print_notice(&format!(
            "combined log left at {}",
            report.raw_log_path.display()
        ));
    }

    print_success(&format!(
        "Analyzed {} segment{} ({}) in {:.1}s",
        report.segment_count,
        if report.segment_count == 1 { "" } else { "s" },
        report.window,
        report.elapsed_seconds
    ));
    println!("Segment list saved in {}", report.manifest_path.display());
    println!("Report saved in {}", report.report_path.display());
}
