//! Typed view model for the HTML page and its renderer.
//!
//! Handlers fill a [`PageView`]; [`render_page`] turns it into markup. All
//! user-controlled text is escaped here, the only exception being the chart
//! SVG, which is produced by this crate.

use crate::domain::{CategoryTable, Dataset, PredictionResult, ScoreBounds};
use crate::plot::format_marks;

/// One `<option>` of the category select.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryOption {
    pub key: String,
    pub label: String,
    pub selected: bool,
}

/// The prediction block shown under the form.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionView {
    /// Percentile rounded to two decimals.
    pub percentile_text: String,
    pub notes: Vec<String>,
    pub chart_svg: Option<String>,
}

impl PredictionView {
    pub fn new(table: &CategoryTable, result: &PredictionResult, chart_svg: Option<String>) -> Self {
        let mut notes = Vec::new();
        if result.extrapolated {
            let (lo, hi) = table.score_range();
            notes.push(format!(
                "Your marks lie outside the historical range ({} to {}); this is an extrapolated estimate.",
                format_marks(lo),
                format_marks(hi)
            ));
        }
        if result.out_of_percentile_range {
            notes.push(
                "The fitted curve leaves the 0 to 100 range here; read the value as indicative only."
                    .to_string(),
            );
        }
        Self {
            percentile_text: format!("{:.2}", result.percentile),
            notes,
            chart_svg,
        }
    }
}

/// Everything the page template needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub options: Vec<CategoryOption>,
    /// Raw marks value echoed back into the input.
    pub marks: String,
    pub bounds: ScoreBounds,
    pub error: Option<String>,
    pub prediction: Option<PredictionView>,
}

impl PageView {
    /// A bare form with `selected` preselected (falls back to the first category).
    pub fn form(dataset: &Dataset, selected: &str, marks: impl Into<String>, bounds: ScoreBounds) -> Self {
        let selected = if dataset.contains(selected) {
            selected
        } else {
            dataset.default_category().name()
        };
        let options = dataset
            .tables()
            .iter()
            .map(|t| CategoryOption {
                key: t.name().to_string(),
                label: t.label(),
                selected: t.name() == selected,
            })
            .collect();
        Self {
            options,
            marks: marks.into(),
            bounds,
            error: None,
            prediction: None,
        }
    }
}

/// Render the full HTML document.
pub fn render_page(view: &PageView) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("    <meta charset=\"UTF-8\">\n");
    out.push_str("    <title>JEE Main Percentile Predictor</title>\n");
    out.push_str("</head>\n");
    out.push_str("<body style=\"font-family: Arial; text-align: center; padding: 30px\">\n");
    out.push_str("    <h1>JEE Main 2024 Percentile Predictor</h1>\n");

    out.push_str("    <form method=\"POST\">\n");
    out.push_str("        <label for=\"shift\">Select your shift:</label>\n");
    out.push_str("        <select id=\"shift\" name=\"shift\">\n");
    for opt in &view.options {
        out.push_str(&format!(
            "            <option value=\"{}\"{}>{}</option>\n",
            escape_html(&opt.key),
            if opt.selected { " selected" } else { "" },
            escape_html(&opt.label)
        ));
    }
    out.push_str("        </select>\n        <br><br>\n");
    out.push_str("        <label for=\"marks\">Enter your marks:</label>\n");
    out.push_str(&format!(
        "        <input id=\"marks\" type=\"number\" name=\"marks\" min=\"{}\" max=\"{}\" step=\"any\" value=\"{}\">\n",
        format_marks(view.bounds.min),
        format_marks(view.bounds.max),
        escape_html(&view.marks)
    ));
    out.push_str("        <br><br>\n");
    out.push_str("        <button type=\"submit\">Predict Percentile</button>\n");
    out.push_str("    </form>\n");

    if let Some(error) = &view.error {
        out.push_str(&format!(
            "    <p class=\"error\" style=\"color: #b00020\">{}</p>\n",
            escape_html(error)
        ));
    }

    if let Some(prediction) = &view.prediction {
        out.push_str(&format!(
            "    <h2>Predicted Percentile: {}</h2>\n",
            escape_html(&prediction.percentile_text)
        ));
        for note in &prediction.notes {
            out.push_str(&format!("    <p class=\"note\">{}</p>\n", escape_html(note)));
        }
        if let Some(svg) = &prediction.chart_svg {
            out.push_str("    <div class=\"chart\">\n");
            out.push_str(svg);
            out.push_str("\n    </div>\n");
        }
    }

    out.push_str("</body>\n</html>\n");
    out
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reference_dataset;
    use crate::fit::predict;

    #[test]
    fn form_preselects_requested_category() {
        let ds = reference_dataset().unwrap();
        let view = PageView::form(&ds, "Apr_5_Shift_1", "150", ScoreBounds::default());
        let selected: Vec<&str> = view
            .options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.key.as_str())
            .collect();
        assert_eq!(selected, vec!["Apr_5_Shift_1"]);

        let html = render_page(&view);
        assert!(html.contains("<option value=\"Apr_5_Shift_1\" selected>Apr 5 Shift 1</option>"));
        assert!(html.contains("min=\"0\" max=\"300\""));
        assert!(!html.contains("Predicted Percentile"));
    }

    #[test]
    fn unknown_selection_falls_back_to_first_category() {
        let ds = reference_dataset().unwrap();
        let view = PageView::form(&ds, "bogus", "", ScoreBounds::default());
        assert!(view.options[0].selected);
    }

    #[test]
    fn prediction_block_renders_rounded_value_and_notes() {
        let ds = reference_dataset().unwrap();
        let table = ds.get("Jan_30_Shift_2").unwrap();
        let result = predict(table, 300.0, 10).unwrap();

        let mut view = PageView::form(&ds, table.name(), "300", ScoreBounds::default());
        view.prediction = Some(PredictionView::new(table, &result, Some("<svg></svg>".into())));
        let html = render_page(&view);

        assert!(html.contains(&format!("Predicted Percentile: {:.2}", result.percentile)));
        assert!(html.contains("extrapolated estimate"));
        assert!(html.contains("0 to 100 range"));
        assert!(html.contains("<svg></svg>"));
    }

    #[test]
    fn user_text_is_escaped() {
        let ds = reference_dataset().unwrap();
        let mut view = PageView::form(&ds, "", "\"><script>", ScoreBounds::default());
        view.error = Some("<b>bad</b>".to_string());
        let html = render_page(&view);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;b&gt;bad&lt;/b&gt;"));
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
    }
}
