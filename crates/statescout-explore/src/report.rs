//! Format evaluation reports and run summaries for human consumption.

use crate::driver::EvalReport;
use crate::explorer::RunSummary;

/// Format an evaluation report for human consumption.
pub fn format_report(report: &EvalReport) -> String {
    let mut output = String::new();

    output.push_str("═══════════════════════════════════════════════════════════════════════\n");
    output.push_str("  statescout evaluation report\n");
    output.push_str("═══════════════════════════════════════════════════════════════════════\n\n");

    output.push_str(&format!("Environment:        {}\n", report.env_name));
    output.push_str(&format!("Depth limit:        {}\n", report.max_depth));
    output.push_str(&format!("Step budget:        {}\n", report.budget));
    output.push_str(&format!("Runs per strategy:  {}\n", report.runs));
    output.push('\n');

    output.push_str("─── Results ───────────────────────────────────────────────────────────\n");
    output.push_str(&format!(
        "{:<12} | {:<16} | {:<18} | {}\n",
        "Strategy", "Avg steps", "Avg coverage %", "Successes"
    ));
    output.push_str("─".repeat(71).as_str());
    output.push('\n');

    for s in &report.strategies {
        output.push_str(&format!(
            "{:<12} | {:>6.1} ± {:<7.1} | {:>7.1} ± {:<8.1} | {}/{}\n",
            s.name, s.avg_steps, s.std_steps, s.avg_coverage, s.std_coverage, s.successes, s.runs
        ));
    }

    output.push('\n');
    output.push_str("═══════════════════════════════════════════════════════════════════════\n");

    output
}

/// Format a single run summary.
pub fn format_summary(summary: &RunSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("Outcome:            {:?}\n", summary.outcome));
    output.push_str(&format!("Steps used:         {}\n", summary.steps_used));
    output.push_str(&format!(
        "Coverage:           {:.1}%\n",
        summary.coverage_percent
    ));
    output.push_str(&format!("Success:            {}\n", summary.success));
    output.push_str(&format!("Edges explored:     {}\n", summary.edges_explored));
    output.push_str(&format!("Resets:             {}\n", summary.resets));
    output.push_str(&format!("Shortcuts taken:    {}\n", summary.shortcuts_taken));
    output.push_str(&format!(
        "Replays attempted:  {}\n",
        summary.replays_attempted
    ));
    output.push_str(&format!(
        "Frontiers abandoned: {}\n",
        summary.frontiers_abandoned
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::StrategyStats;
    use crate::explorer::RunOutcome;

    fn make_report() -> EvalReport {
        EvalReport {
            env_name: "trap".to_string(),
            budget: 100,
            max_depth: 20,
            runs: 5,
            strategies: vec![
                StrategyStats {
                    name: "DFS".to_string(),
                    runs: 5,
                    successes: 5,
                    avg_steps: 40.0,
                    std_steps: 0.0,
                    avg_coverage: 100.0,
                    std_coverage: 0.0,
                },
                StrategyStats {
                    name: "Q-Learning".to_string(),
                    runs: 5,
                    successes: 2,
                    avg_steps: 87.4,
                    std_steps: 14.2,
                    avg_coverage: 61.0,
                    std_coverage: 22.5,
                },
            ],
        }
    }

    #[test]
    fn test_format_report() {
        let formatted = format_report(&make_report());

        assert!(formatted.contains("statescout evaluation report"));
        assert!(formatted.contains("Environment:        trap"));
        assert!(formatted.contains("Step budget:        100"));
        assert!(formatted.contains("DFS"));
        assert!(formatted.contains("Q-Learning"));
        assert!(formatted.contains("5/5"));
        assert!(formatted.contains("2/5"));
    }

    #[test]
    fn test_format_summary() {
        let summary = RunSummary {
            outcome: RunOutcome::Solved,
            steps_used: 40,
            coverage_percent: 100.0,
            success: true,
            edges_explored: 21,
            resets: 2,
            shortcuts_taken: 0,
            replays_attempted: 1,
            frontiers_abandoned: 0,
        };
        let formatted = format_summary(&summary);

        assert!(formatted.contains("Outcome:            Solved"));
        assert!(formatted.contains("Steps used:         40"));
        assert!(formatted.contains("Replays attempted:  1"));
    }
}
