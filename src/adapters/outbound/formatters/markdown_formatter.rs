use crate::application::dto::{SnapshotStatistics, TrendResponse};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use crate::trend_tracking::domain::{
    BaselineListing, JarDiff, SeverityTrend, TrendOutcome, TrendResult,
};
use std::collections::BTreeSet;

/// Markdown table header for baseline listings
const BASELINE_TABLE_HEADER: &str = "| Dependency | Max Severity | Vulnerabilities |\n";

/// Markdown table separator line for baseline listings
const BASELINE_TABLE_SEPARATOR: &str = "|------------|--------------|-----------------|\n";

/// Markdown table header for trend categories
const TREND_TABLE_HEADER: &str = "| Dependency | Max Severity | Resolved | New | Persisting |\n";

/// Markdown table separator line for trend categories
const TREND_TABLE_SEPARATOR: &str = "|------------|--------------|----------|-----|------------|\n";

/// MarkdownFormatter adapter for human-readable trend reports
///
/// Renders one section per response: headline statistics, then either the
/// baseline listing or the three trend categories.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn join_ids(ids: &BTreeSet<String>) -> String {
        if ids.is_empty() {
            return "-".to_string();
        }
        let joined = ids.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
        Self::escape_markdown_table_cell(&joined)
    }

    fn signed(delta: i64) -> String {
        format!("{:+}", delta)
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_response(&self, output: &mut String, response: &TrendResponse) {
        let title = response
            .project_key
            .as_ref()
            .map(|key| key.to_string())
            .unwrap_or_else(|| "Unidentified scan".to_string());
        output.push_str(&format!("## {}\n\n", Self::escape_markdown_table_cell(&title)));

        if let Some(reason) = &response.unavailable_reason {
            output.push_str(&format!("⚠️ Trend unavailable: {}\n\n", reason));
            return;
        }
        if let Some(statistics) = &response.statistics {
            self.render_statistics(output, statistics);
        }
        match &response.outcome {
            Some(TrendOutcome::NoHistory) | None => {
                output.push_str("No scan history is retained for this project.\n\n");
            }
            Some(TrendOutcome::Baseline(listing)) => self.render_baseline(output, listing),
            Some(TrendOutcome::Trending(result)) => self.render_trend(output, result),
        }
    }

    fn render_statistics(&self, output: &mut String, statistics: &SnapshotStatistics) {
        let counts = &statistics.severity_counts;
        output.push_str(&format!(
            "Scanned at {}: {} dependencies, {} vulnerable, {} vulnerabilities (risk score {:.1}).\n\n",
            statistics.scan_time.to_rfc3339(),
            statistics.total_dependencies,
            statistics.vulnerable_dependencies,
            statistics.total_vulnerabilities,
            statistics.risk_score
        ));
        output.push_str(&format!(
            "Critical: {} / High: {} / Medium: {} / Low: {} / Unknown: {}\n\n",
            counts.critical, counts.high, counts.medium, counts.low, counts.unknown
        ));
        if let Some(most) = &statistics.most_vulnerable {
            output.push_str(&format!("Most vulnerable dependency: `{}`\n\n", most));
        }
    }

    fn render_baseline(&self, output: &mut String, listing: &BaselineListing) {
        output.push_str("### Baseline\n\n");
        output.push_str("First retained scan; the next scan will be compared against it.\n\n");
        if listing.vulnerable_jars.is_empty() {
            output.push_str("No vulnerable dependencies.\n\n");
            return;
        }
        output.push_str(BASELINE_TABLE_HEADER);
        output.push_str(BASELINE_TABLE_SEPARATOR);
        for jar in &listing.vulnerable_jars {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&jar.coordinates.to_string()),
                jar.max_severity,
                Self::join_ids(&jar.vulnerability_ids)
            ));
        }
        output.push('\n');
    }

    fn render_trend(&self, output: &mut String, result: &TrendResult) {
        output.push_str(&format!(
            "### Trend since {}\n\n",
            result.previous_scan_time.to_rfc3339()
        ));
        self.render_severity_trend(output, &result.severity_trend);
        self.render_category(
            output,
            "New Vulnerable Dependencies",
            &result.new_vulnerable_jars,
        );
        self.render_category(
            output,
            "Pending Vulnerable Dependencies",
            &result.pending_vulnerable_jars,
        );
        self.render_category(output, "Resolved Dependencies", &result.resolved_jars);
    }

    fn render_severity_trend(&self, output: &mut String, trend: &SeverityTrend) {
        output.push_str(&format!(
            "Change: total {} (critical {}, high {}, medium {}, low {})\n\n",
            Self::signed(trend.total),
            Self::signed(trend.critical),
            Self::signed(trend.high),
            Self::signed(trend.medium),
            Self::signed(trend.low)
        ));
    }

    fn render_category(&self, output: &mut String, title: &str, jars: &[JarDiff]) {
        output.push_str(&format!("#### {} ({})\n\n", title, jars.len()));
        if jars.is_empty() {
            return;
        }
        output.push_str(TREND_TABLE_HEADER);
        output.push_str(TREND_TABLE_SEPARATOR);
        for jar in jars {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&jar.coordinates.to_string()),
                jar.max_severity,
                Self::join_ids(&jar.resolved_vulnerability_ids),
                Self::join_ids(&jar.new_vulnerability_ids),
                Self::join_ids(&jar.persisting_vulnerability_ids)
            ));
        }
        output.push('\n');
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, responses: &[TrendResponse]) -> Result<String> {
        let mut output = String::from("# Vulnerability Trend Report\n\n");
        for response in responses {
            self.render_response(&mut output, response);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend_tracking::domain::{
        Coordinates, ProjectKey, Severity, SeverityCounts, VulnerableJar,
    };
    use chrono::{TimeZone, Utc};

    fn ids(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn response(outcome: TrendOutcome) -> TrendResponse {
        TrendResponse {
            project_key: Some(ProjectKey::new("com.acme:shop").unwrap()),
            outcome: Some(outcome),
            unavailable_reason: None,
            statistics: None,
            project_stats: None,
            trend_summary: None,
            new_vulnerability_breakdown: None,
        }
    }

    #[test]
    fn test_render_baseline() {
        let listing = BaselineListing {
            scan_time: Utc.with_ymd_and_hms(2026, 5, 5, 0, 0, 0).unwrap(),
            total_jars_analyzed: 4,
            vulnerable_jars: vec![VulnerableJar {
                coordinates: Coordinates::new("org.yaml", "snakeyaml", "1.33").unwrap(),
                vulnerability_ids: ids(&["CVE-2022-1471"]),
                severity_breakdown: SeverityCounts::default(),
                max_severity: Severity::High,
            }],
        };

        let markdown = MarkdownFormatter::new()
            .format(&[response(TrendOutcome::Baseline(listing))])
            .unwrap();
        assert!(markdown.contains("## com.acme:shop"));
        assert!(markdown.contains("### Baseline"));
        assert!(markdown.contains("| org.yaml:snakeyaml:1.33 | HIGH | CVE-2022-1471 |"));
    }

    #[test]
    fn test_render_trend_categories() {
        let t = Utc.with_ymd_and_hms(2026, 5, 5, 0, 0, 0).unwrap();
        let jar = JarDiff {
            coordinates: Coordinates::new("org.example", "lib", "2.0").unwrap(),
            previous_vulnerability_ids: ids(&["CVE-1"]),
            current_vulnerability_ids: ids(&["CVE-1", "CVE-2"]),
            resolved_vulnerability_ids: BTreeSet::new(),
            new_vulnerability_ids: ids(&["CVE-2"]),
            persisting_vulnerability_ids: ids(&["CVE-1"]),
            severity_breakdown: SeverityCounts::default(),
            max_severity: Severity::Critical,
        };
        let result = TrendResult {
            previous_scan_time: t,
            current_scan_time: t,
            resolved_jars: Vec::new(),
            new_vulnerable_jars: Vec::new(),
            pending_vulnerable_jars: vec![jar],
            total_jars_analyzed: 1,
            severity_trend: SeverityTrend {
                total: 1,
                critical: 1,
                high: 0,
                medium: 0,
                low: 0,
            },
        };

        let markdown = MarkdownFormatter::new()
            .format(&[response(TrendOutcome::Trending(result))])
            .unwrap();
        assert!(markdown.contains("#### Pending Vulnerable Dependencies (1)"));
        assert!(markdown.contains("#### Resolved Dependencies (0)"));
        assert!(markdown.contains("| org.example:lib:2.0 | CRITICAL | - | CVE-2 | CVE-1 |"));
        assert!(markdown.contains("total +1 (critical +1, high +0"));
    }

    #[test]
    fn test_render_unavailable() {
        let markdown = MarkdownFormatter::new()
            .format(&[TrendResponse::unavailable(None, "bad input")])
            .unwrap();
        assert!(markdown.contains("## Unidentified scan"));
        assert!(markdown.contains("Trend unavailable: bad input"));
    }
}
