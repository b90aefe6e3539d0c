//! HTML report generator.

use super::escape::{escape_href, escape_html};
use super::{ReportConfig, ReportError, ReportGenerator};
use crate::model::{CoverageMetrics, Dimension, TreeNode};
use crate::view::{CycleFilter, MetricsToShow};
use std::fmt::Write;

/// HTML report generator
pub struct HtmlReporter {
    /// Include inline CSS
    include_styles: bool,
}

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_styles: true,
        }
    }

    /// Leave the stylesheet out, e.g. when embedding the table elsewhere.
    #[must_use]
    pub const fn with_styles(mut self, include_styles: bool) -> Self {
        self.include_styles = include_styles;
        self
    }

    fn get_styles(&self) -> &'static str {
        r#"
        <style>
            :root {
                --text-color: #333;
                --muted-color: #666;
                --border-color: #ddd;
                --low-bg: #fce1e5;
                --low-fg: #c21f39;
                --medium-bg: #fff4c2;
                --medium-fg: #8a6d00;
                --high-bg: #e6f5d0;
                --high-fg: #3b7d0f;
            }

            body {
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
                color: var(--text-color);
                margin: 0;
                padding: 20px;
                line-height: 1.5;
            }

            .container {
                max-width: 1200px;
                margin: 0 auto;
            }

            .header {
                border-bottom: 2px solid var(--border-color);
                padding-bottom: 12px;
                margin-bottom: 20px;
            }

            .breadcrumbs {
                color: var(--muted-color);
            }

            .summary-cards {
                display: grid;
                grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
                gap: 16px;
                margin-bottom: 24px;
            }

            .card {
                border-radius: 6px;
                padding: 12px 16px;
                border: 1px solid var(--border-color);
            }

            .card-title {
                font-size: 0.9em;
                color: var(--muted-color);
            }

            .card-value {
                font-size: 1.8em;
                font-weight: bold;
            }

            table {
                width: 100%;
                border-collapse: collapse;
                margin-bottom: 24px;
            }

            th, td {
                padding: 6px 10px;
                text-align: left;
                border-bottom: 1px solid var(--border-color);
            }

            td.pct, td.abs {
                text-align: right;
                white-space: nowrap;
            }

            tr.dir td.file {
                font-weight: 600;
            }

            tr.empty td {
                color: var(--muted-color);
            }

            .low { background-color: var(--low-bg); color: var(--low-fg); }
            .medium { background-color: var(--medium-bg); color: var(--medium-fg); }
            .high { background-color: var(--high-bg); color: var(--high-fg); }

            .footer {
                margin-top: 30px;
                padding-top: 12px;
                border-top: 1px solid var(--border-color);
                font-size: 0.9em;
                color: var(--muted-color);
            }
        </style>
        "#
    }

    fn write_summary_cards(
        &self,
        html: &mut String,
        overall: &CoverageMetrics,
        config: &ReportConfig,
    ) -> Result<(), ReportError> {
        writeln!(html, "<div class=\"summary-cards\">")?;
        for dimension in config.view.metrics_to_show.shown() {
            let metric = overall.get(dimension);
            let bucket = config.watermarks.bucket(overall, dimension);
            writeln!(html, "    <div class=\"card {bucket}\">")?;
            writeln!(
                html,
                "        <div class=\"card-title\">{}</div>",
                dimension.label()
            )?;
            writeln!(
                html,
                "        <div class=\"card-value\">{}</div>",
                format_pct(metric.pct)
            )?;
            writeln!(
                html,
                "        <div class=\"card-fraction\">{}/{}</div>",
                metric.covered, metric.total
            )?;
            writeln!(html, "    </div>")?;
        }
        writeln!(html, "</div>")?;
        Ok(())
    }

    fn write_rows(
        &self,
        html: &mut String,
        rows: &[TreeNode],
        depth: usize,
        config: &ReportConfig,
    ) -> Result<(), ReportError> {
        for node in rows {
            let kind = if node.is_directory() { "dir" } else { "file" };
            let empty = if node.is_empty() { " empty" } else { "" };
            writeln!(html, "            <tr class=\"{kind} depth-{depth}{empty}\">")?;

            let name = escape_html(node.name());
            let name = match node.output() {
                Some(href) => format!("<a href=\"{}\">{name}</a>", escape_href(href)),
                None => name,
            };
            writeln!(
                html,
                "                <td class=\"file\" style=\"padding-left: {}em\">{name}</td>",
                depth as f64 * 1.5 + 0.5
            )?;

            for dimension in config.view.metrics_to_show.shown() {
                let metric = node.metrics().get(dimension);
                let bucket = config.watermarks.bucket(node.metrics(), dimension);
                writeln!(
                    html,
                    "                <td class=\"pct {bucket}\">{}</td>",
                    format_pct(metric.pct)
                )?;
                writeln!(
                    html,
                    "                <td class=\"abs {bucket}\">{}/{}</td>",
                    metric.covered, metric.total
                )?;
            }
            writeln!(html, "            </tr>")?;

            if let Some(children) = node.children() {
                self.write_rows(html, children, depth + 1, config)?;
            }
        }
        Ok(())
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate_report(
        &self,
        rows: &[TreeNode],
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut html = String::new();
        let title = escape_html(&config.title);
        let shown = &config.view.metrics_to_show;

        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">")?;
        writeln!(html, "<head>")?;
        writeln!(html, "    <meta charset=\"UTF-8\">")?;
        writeln!(
            html,
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(html, "    <title>{title}</title>")?;
        if self.include_styles {
            writeln!(html, "{}", self.get_styles())?;
        }
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;
        writeln!(html, "<div class=\"container\">")?;

        // Header
        writeln!(html, "<div class=\"header\">")?;
        writeln!(html, "    <h1>{title}</h1>")?;
        let mut crumbs = vec!["All files".to_string()];
        crumbs.extend(
            config
                .view
                .breadcrumbs()
                .into_iter()
                .map(|(segment, _)| escape_html(&segment)),
        );
        writeln!(
            html,
            "    <p class=\"breadcrumbs\">{}</p>",
            crumbs.join(" / ")
        )?;
        writeln!(html, "    <p class=\"view\">{}</p>", describe_view(config))?;
        writeln!(html, "</div>")?;

        if let Some(overall) = &config.overall {
            self.write_summary_cards(&mut html, overall, config)?;
        }

        // Table
        writeln!(html, "<div class=\"section\">")?;
        writeln!(html, "    <table>")?;
        writeln!(html, "        <thead>")?;
        writeln!(html, "            <tr>")?;
        writeln!(html, "                <th>File</th>")?;
        for dimension in shown.shown() {
            writeln!(
                html,
                "                <th colspan=\"2\">{}</th>",
                dimension.label()
            )?;
        }
        writeln!(html, "            </tr>")?;
        writeln!(html, "        </thead>")?;
        writeln!(html, "        <tbody>")?;
        if rows.is_empty() {
            writeln!(
                html,
                "            <tr class=\"no-rows\"><td colspan=\"{}\">No files match the current view.</td></tr>",
                column_count(shown)
            )?;
        } else {
            self.write_rows(&mut html, rows, 0, config)?;
        }
        writeln!(html, "        </tbody>")?;
        writeln!(html, "    </table>")?;
        writeln!(html, "</div>")?;

        // Footer
        writeln!(html, "<div class=\"footer\">")?;
        write!(
            html,
            "    <p>Generated by covtree v{} on {}",
            env!("CARGO_PKG_VERSION"),
            config.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        if let Some(source) = &config.metadata.source_path {
            write!(html, " from <code>{}</code>", escape_html(source))?;
        }
        writeln!(html, "</p>")?;
        writeln!(html, "</div>")?;

        writeln!(html, "</div>")?;
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")?;

        Ok(html)
    }
}

/// Percentage as the report shows it: at most two decimals, no trailing
/// zeros.
///
/// ```
/// use covtree::reports::format_pct;
///
/// assert_eq!(format_pct(100.0), "100%");
/// assert_eq!(format_pct(85.7), "85.7%");
/// assert_eq!(format_pct(33.333), "33.33%");
/// ```
#[must_use]
pub fn format_pct(pct: f64) -> String {
    let mut text = format!("{:.2}", (pct * 100.0).round() / 100.0);
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    format!("{text}%")
}

fn column_count(shown: &MetricsToShow) -> usize {
    1 + 2 * shown.shown().count()
}

fn describe_view(config: &ReportConfig) -> String {
    let view = &config.view;
    let mut text = format!("{} view", view.summarizer.display_name());
    match &view.active_sort {
        Some(sort) => {
            let _ = write!(text, ", sorted by {} ({})", sort.sort_key, sort.order);
        }
        None => text.push_str(", unsorted"),
    }
    let hidden: Vec<_> = Dimension::ALL
        .into_iter()
        .filter(|d| !view.metrics_to_show.is_shown(*d))
        .map(|d| d.key())
        .collect();
    if !hidden.is_empty() {
        let _ = write!(text, ", hiding {}", hidden.join(", "));
    }
    text
}
