//! Plain-text formatting of a `Dashboard`.

use crate::domain::{
    Dashboard, DimensionSummary, Direction, IndicatorDef, Observation, ScoringRule, SIGNAL_THRESHOLD,
};

const NEUTRAL_SCORE: i64 = 50;
const BAR_WIDTH: usize = 20;

/// Header: composite, state, and data-quality line.
pub fn format_summary(dashboard: &Dashboard, source_name: &str) -> String {
    let mut out = String::new();

    out.push_str("=== pulse - Market Health Dashboard ===\n");
    out.push_str(&format!(
        "Generated: {} | source: {source_name}\n",
        dashboard.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!(
        "Composite: {} / 100 ({:+} vs neutral) {}\n",
        dashboard.composite,
        dashboard.composite as i64 - NEUTRAL_SCORE,
        progress_bar(dashboard.composite, BAR_WIDTH)
    ));
    out.push_str(&format!("State: {}\n", dashboard.state.label()));

    let estimated = dashboard.estimated_count();
    if estimated > 0 {
        out.push_str(&format!(
            "Estimated: {estimated} of {} indicators use fallback values\n",
            dashboard.observations.len()
        ));
    }

    out
}

/// Per-dimension means in canonical order.
pub fn format_dimensions(dimensions: &[DimensionSummary]) -> String {
    let mut out = String::new();
    out.push_str("Dimensions:\n");
    for d in dimensions {
        out.push_str(&format!(
            "  {:<10} {:>6.1}  n={}\n",
            d.dimension.display_name(),
            d.mean_score,
            d.count
        ));
    }
    out
}

/// Full indicator table in table order.
pub fn format_observations(observations: &[Observation]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<10} {:<36} {:>12} {:<12} {:<9} {:>6} {:<26} {:<26}\n",
            "dimension", "indicator", "value", "as_of", "status", "score", "positive", "negative"
        )
        .trim_end(),
    );
    out.push('\n');

    out.push_str(
        format!(
            "{:-<10} {:-<36} {:-<12} {:-<12} {:-<9} {:-<6} {:-<26} {:-<26}\n",
            "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for o in observations {
        out.push_str(
            format!(
                "{:<10} {:<36} {:>12.2} {:<12} {:<9} {:>6.1} {:<26} {:<26}\n",
                o.dimension.display_name(),
                truncate(&o.name, 36),
                o.value,
                truncate(&o.as_of, 12),
                o.status_label(),
                o.score,
                truncate(&o.positive_band, 26),
                truncate(&o.negative_band, 26),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Supportive and risk lists.
pub fn format_signals(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    out.push_str(&format!("Supportive signals (score >= {SIGNAL_THRESHOLD:.0}):\n"));
    if dashboard.supportive.is_empty() {
        out.push_str("  (none)\n");
    }
    for o in &dashboard.supportive {
        out.push_str(&format!("  + {}: {} (score {:.0})\n", o.name, o.interpretation, o.score));
    }

    out.push('\n');
    out.push_str(&format!("Risk warnings (score < {SIGNAL_THRESHOLD:.0}):\n"));
    if dashboard.risks.is_empty() {
        out.push_str("  No significant negative signals.\n");
    }
    for o in &dashboard.risks {
        out.push_str(&format!("  - {}: {} (in {})\n", o.name, o.interpretation, o.negative_band));
    }

    out
}

/// Indicator table: one row per definition with its rule and fallback.
pub fn format_indicator_table(indicators: &[IndicatorDef]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<24} {:<10} {:<30} {:>14}\n", "id", "dimension", "rule", "fallback"));
    for def in indicators {
        out.push_str(
            format!(
                "{:<24} {:<10} {:<30} {:>14}\n",
                def.id,
                def.dimension.display_name(),
                describe_rule(&def.rule),
                format!("{} -> {:.0}", def.fallback_value, def.fallback_score),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out.push_str(&format!("{} indicators\n", indicators.len()));
    out
}

/// Short human-readable form of a scoring rule.
pub fn describe_rule(rule: &ScoringRule) -> String {
    match *rule {
        ScoringRule::Linear { good, bad, .. } => format!("linear good={good} bad={bad}"),
        ScoringRule::Step {
            direction,
            threshold,
            pass,
            fail,
        } => {
            let op = match direction {
                Direction::HigherIsBetter => '>',
                Direction::LowerIsBetter => '<',
            };
            format!("step {op}{threshold} ? {pass} : {fail}")
        }
        ScoringRule::Constant { score } => format!("constant {score}"),
    }
}

/// `[#####...............]` for a 0..100 score.
pub fn progress_bar(score: u32, width: usize) -> String {
    let filled = ((score.min(100) as usize) * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    use crate::domain::{Dimension, MarketState};
    use crate::scoring::aggregate;

    fn obs(id: &str, dimension: Dimension, score: f64, is_real: bool) -> Observation {
        Observation {
            id: id.to_string(),
            dimension,
            name: id.to_uppercase(),
            value: 1.25,
            as_of: "2025-06-30".to_string(),
            is_real,
            positive_band: ">5%".to_string(),
            negative_band: "<3%".to_string(),
            interpretation: format!("{id} meaning"),
            score,
        }
    }

    fn sample() -> Dashboard {
        let at = Local.with_ymd_and_hms(2025, 7, 1, 9, 30, 0).unwrap();
        aggregate(
            vec![
                obs("gdp", Dimension::Macro, 80.0, true),
                obs("m2", Dimension::Liquidity, 30.0, false),
                obs("pe", Dimension::Trend, 65.0, true),
            ],
            at,
        )
    }

    #[test]
    fn summary_reports_composite_state_and_estimates() {
        let dash = sample();
        let txt = format_summary(&dash, "static");
        assert!(txt.contains("Generated: 2025-07-01 09:30:00 | source: static"));
        assert!(txt.contains("Composite: 58 / 100 (+8 vs neutral)"));
        assert!(txt.contains("State: consolidation"));
        assert!(txt.contains("Estimated: 1 of 3 indicators use fallback values"));
        assert_eq!(dash.state, MarketState::Consolidation);
    }

    #[test]
    fn signals_list_supportive_then_risks() {
        let txt = format_signals(&sample());
        let expected = concat!(
            "Supportive signals (score >= 60):\n",
            "  + GDP: gdp meaning (score 80)\n",
            "  + PE: pe meaning (score 65)\n",
            "\n",
            "Risk warnings (score < 60):\n",
            "  - M2: m2 meaning (in <3%)\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_risks_say_so() {
        let at = Local.with_ymd_and_hms(2025, 7, 1, 9, 30, 0).unwrap();
        let dash = aggregate(vec![obs("gdp", Dimension::Macro, 90.0, true)], at);
        assert!(format_signals(&dash).contains("No significant negative signals."));
    }

    #[test]
    fn observation_rows_carry_status() {
        let txt = format_observations(&sample().observations);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].contains("live"));
        assert!(lines[3].contains("estimated"));
        assert!(lines[3].contains("30.0"));
    }

    #[test]
    fn rules_are_described_compactly() {
        let step = ScoringRule::Step {
            direction: Direction::LowerIsBetter,
            threshold: 7.2,
            pass: 100.0,
            fail: 30.0,
        };
        assert_eq!(describe_rule(&step), "step <7.2 ? 100 : 30");
        let linear = ScoringRule::Linear {
            direction: Direction::HigherIsBetter,
            good: 5.0,
            bad: 3.0,
        };
        assert_eq!(describe_rule(&linear), "linear good=5 bad=3");
    }

    #[test]
    fn indicator_table_lists_every_row() {
        let table = crate::indicators::IndicatorTable::builtin().unwrap();
        let txt = format_indicator_table(table.indicators());
        assert_eq!(txt.lines().count(), table.len() + 2);
        assert!(txt.lines().nth(1).unwrap().starts_with("gdp_yoy"));
        assert!(txt.ends_with("15 indicators\n"));
    }

    #[test]
    fn progress_bar_rounds_to_cells() {
        assert_eq!(progress_bar(0, 10), "[..........]");
        assert_eq!(progress_bar(62, 10), "[######....]");
        assert_eq!(progress_bar(100, 10), "[##########]");
        assert_eq!(progress_bar(250, 4), "[####]");
    }
}
