//! Plain-text rendering of detection results.

use std::fmt::{self, Write};

use anomaly::{DetectionResult, DistributionSummary, Series};

/// Format `value` with a thousands separator and `decimals` decimals.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

fn signed(value: f64, decimals: usize) -> String {
    if value >= 0.0 {
        format!("+{}", group_thousands(value, decimals))
    } else {
        group_thousands(value, decimals)
    }
}

/// Stats block, recommendation, anomaly table and pattern analysis.
pub fn render_report(series: &Series, result: &DetectionResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, series, result)?;
    Ok(out)
}

fn write_report<W: Write>(out: &mut W, series: &Series, result: &DetectionResult) -> fmt::Result {
    let title = series
        .data_type()
        .map(|t| t.label().to_string())
        .unwrap_or_else(|| "Series".to_string());

    writeln!(out, "Anomaly detection - {} ({} days)", title, series.len())?;
    writeln!(out, "Method: {}", result.config)?;
    writeln!(
        out,
        "Reference value: {}",
        group_thousands(series.reference_value(), 1)
    )?;

    let stats = &result.stats;
    writeln!(out, "\nDetection statistics")?;
    writeln!(out, "  {:<20}{}", "Days analyzed", stats.total_days)?;
    writeln!(out, "  {:<20}{}", "Anomalies", stats.anomaly_count)?;
    writeln!(out, "  {:<20}{:.1}%", "Anomaly rate", stats.anomaly_rate)?;
    writeln!(out, "  {:<20}{}", "Upper bound", group_thousands(stats.upper_bound, 1))?;
    writeln!(out, "  {:<20}{}", "Lower bound", group_thousands(stats.lower_bound, 1))?;
    if let Some(impact) = stats.impact {
        writeln!(out, "  {:<20}{}", "Total impact", signed(impact, 0))?;
    }

    writeln!(out, "\nRecommendation")?;
    writeln!(out, "  {}", result.recommendation)?;

    if result.anomalies.is_empty() {
        writeln!(
            out,
            "\nNo anomalies detected in the analyzed period; behavior is within normal parameters."
        )?;
        return Ok(());
    }

    writeln!(out, "\nAnomaly report")?;
    writeln!(
        out,
        "  {:>4}  {:>14}  {:<5}  {:<8}  {:>14}  {:>12}",
        "Day", "Value", "Type", "Severity", "Deviation", "Deviation %"
    )?;
    for anomaly in &result.anomalies {
        writeln!(
            out,
            "  {:>4}  {:>14}  {:<5}  {:<8}  {:>14}  {:>11.1}%",
            anomaly.day,
            group_thousands(anomaly.value, 1),
            anomaly.direction.to_string(),
            anomaly.severity.to_string(),
            signed(anomaly.deviation, 1),
            anomaly.deviation_pct
        )?;
    }

    if let Some(pattern) = &result.pattern {
        writeln!(out, "\nPattern analysis")?;
        writeln!(
            out,
            "  {:<22}{:.1} days",
            "Average interval", pattern.average_interval_days
        )?;
        writeln!(out, "  {:<22}{}", "Predominant type", pattern.predominant_direction)?;
        writeln!(
            out,
            "  {:<22}{}",
            "Predominant severity", pattern.predominant_severity
        )?;
    }

    Ok(())
}

/// Box-plot figures and a bar per histogram bin.
pub fn render_distribution(summary: &DistributionSummary) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_distribution(&mut out, summary)?;
    Ok(out)
}

fn write_distribution<W: Write>(out: &mut W, summary: &DistributionSummary) -> fmt::Result {
    let b = &summary.box_plot;
    writeln!(out, "\nDistribution")?;
    writeln!(
        out,
        "  min {}  q1 {}  median {}  q3 {}  max {}",
        group_thousands(b.min, 1),
        group_thousands(b.q1, 1),
        group_thousands(b.median, 1),
        group_thousands(b.q3, 1),
        group_thousands(b.max, 1)
    )?;
    for bin in &summary.histogram {
        writeln!(
            out,
            "  {:>14} .. {:<14} {}",
            group_thousands(bin.start, 1),
            group_thousands(bin.end, 1),
            "#".repeat(bin.count)
        )?;
    }
    Ok(())
}
