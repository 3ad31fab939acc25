//! Terminal report formatting.
//!
//! We keep formatting code in one place so:
//! - the fitting code stays clean and testable
//! - output changes are localized

use crate::domain::{CategoryTable, Dataset, PointResidual, PredictionResult};
use crate::fit::DetailedPrediction;
use crate::models::power_coefficients;
use crate::plot::format_marks;

/// Full report for one prediction: result, notes, model and residuals.
pub fn format_prediction(table: &CategoryTable, prediction: &DetailedPrediction) -> String {
    let result = &prediction.result;
    let fit = &prediction.fit;
    let (lo, hi) = table.score_range();
    let mut out = String::new();

    out.push_str("=== pctl - Percentile Prediction ===\n");
    out.push_str(&format!("Category: {} ({})\n", table.name(), table.label()));
    out.push_str(&format!(
        "Table: n={} | marks=[{}, {}]\n",
        table.len(),
        format_marks(lo),
        format_marks(hi)
    ));
    out.push_str(&format!("Marks: {}\n", format_marks(result.query_score)));
    out.push_str(&format!("Predicted percentile: {:.2}\n", result.percentile));
    for note in notes(result) {
        out.push_str(&format!("  note: {note}\n"));
    }

    out.push_str("\nModel (cubic, least squares):\n");
    out.push_str(&format!(
        "- p(x) coefficients [x^0..x^3]: {}\n",
        fmt_vec(&power_coefficients(&fit.model))
    ));
    out.push_str(&format!(
        "- SSE={:.4} RMSE={:.4} R^2={:.5} (n={})\n",
        fit.quality.sse, fit.quality.rmse, fit.quality.r_squared, fit.quality.n
    ));

    out.push_str("\nResiduals:\n");
    out.push_str(&format_residuals(&fit.residuals));
    out
}

/// One row per category, in dataset order.
pub fn format_comparison(dataset: &Dataset, results: &[PredictionResult]) -> String {
    let mut out = String::new();
    let score = results.first().map(|r| r.query_score);
    if let Some(score) = score {
        out.push_str(&format!("Marks: {}\n", format_marks(score)));
    }
    push_row(&mut out, format!("{:<20} {:>12} {:<6}", "category", "percentile", "flags"));
    push_row(&mut out, format!("{:-<20} {:-<12} {:-<6}", "", "", ""));

    for r in results {
        let label = dataset
            .get(&r.category)
            .map(|t| t.label())
            .unwrap_or_else(|_| r.category.clone());
        let mut flags = String::new();
        if r.extrapolated {
            flags.push('E');
        }
        if r.out_of_percentile_range {
            flags.push('R');
        }
        push_row(&mut out, format!("{:<20} {:>12.2} {:<6}", truncate(&label, 20), r.percentile, flags));
    }

    if results.iter().any(|r| r.extrapolated || r.out_of_percentile_range) {
        out.push_str("E = outside historical marks, R = outside 0..100\n");
    }
    out
}

/// Category identifiers with their labels and observed ranges.
pub fn format_categories(dataset: &Dataset) -> String {
    let mut out = String::new();
    push_row(
        &mut out,
        format!("{:<20} {:<20} {:>4} {:>13}", "id", "label", "n", "marks"),
    );
    push_row(&mut out, format!("{:-<20} {:-<20} {:-<4} {:-<13}", "", "", "", ""));
    for t in dataset.tables() {
        let (lo, hi) = t.score_range();
        push_row(
            &mut out,
            format!(
                "{:<20} {:<20} {:>4} {:>13}",
                truncate(t.name(), 20),
                truncate(&t.label(), 20),
                t.len(),
                format!("{}..{}", format_marks(lo), format_marks(hi))
            ),
        );
    }
    out
}

/// Human-readable caveats for a result.
pub fn notes(result: &PredictionResult) -> Vec<&'static str> {
    let mut out = Vec::new();
    if result.extrapolated {
        out.push("marks lie outside the historical range (extrapolated)");
    }
    if result.out_of_percentile_range {
        out.push("value lies outside 0..100 and is not clamped");
    }
    out
}

fn format_residuals(rows: &[PointResidual]) -> String {
    let mut out = String::new();
    push_row(
        &mut out,
        format!("{:>8} {:>10} {:>10} {:>10}", "marks", "observed", "fitted", "residual"),
    );
    push_row(&mut out, format!("{:-<8} {:-<10} {:-<10} {:-<10}", "", "", "", ""));
    for r in rows {
        push_row(
            &mut out,
            format!(
                "{:>8} {:>10.2} {:>10.3} {:>10.3}",
                format_marks(r.score),
                r.observed,
                r.fitted,
                r.residual
            ),
        );
    }
    out
}

fn push_row(out: &mut String, row: String) {
    out.push_str(row.trim_end());
    out.push('\n');
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6e}")).collect();
    format!("[{}]", parts.join(", "))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reference_dataset;
    use crate::fit::{compare, predict_detailed};

    #[test]
    fn prediction_report_has_headline_and_residuals() {
        let ds = reference_dataset().unwrap();
        let table = ds.default_category();
        let d = predict_detailed(table, 150.0, 100).unwrap();
        let text = format_prediction(table, &d);

        assert!(text.contains("Category: Jan_27_Shift_1 (Jan 27 Shift 1)"));
        assert!(text.contains("Marks: 150\n"));
        assert!(text.contains(&format!("Predicted percentile: {:.2}", d.result.percentile)));
        assert!(!text.contains("note:"));
        // header + rule + one row per table entry
        let residual_block = text.split("Residuals:\n").nth(1).unwrap();
        assert_eq!(residual_block.lines().count(), 2 + table.len());
    }

    #[test]
    fn prediction_report_notes_extrapolation() {
        let ds = reference_dataset().unwrap();
        let table = ds.get("Jan_30_Shift_2").unwrap();
        let d = predict_detailed(table, 300.0, 10).unwrap();
        let text = format_prediction(table, &d);
        assert!(text.contains("note: marks lie outside the historical range"));
        assert!(text.contains("note: value lies outside 0..100"));
    }

    #[test]
    fn comparison_lists_every_category() {
        let ds = reference_dataset().unwrap();
        let results = compare(&ds, 150.0, 10).unwrap();
        let text = format_comparison(&ds, &results);
        assert_eq!(text.lines().count(), 3 + ds.len());
        assert!(text.contains("Apr 8 Shift 2"));
        assert!(!text.contains("E = outside"));
    }

    #[test]
    fn categories_table() {
        let ds = reference_dataset().unwrap();
        let text = format_categories(&ds);
        assert_eq!(text.lines().count(), 2 + ds.len());
        assert!(text.contains("Jan_27_Shift_1"));
        assert!(text.contains("100..200"));
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
