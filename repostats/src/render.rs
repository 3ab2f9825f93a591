//! Template rendering for CLI output using outstanding

use console::Style;
use outstanding::{render_with_output, Theme};
use repostatslib::{ExtensionStats, Report, StatsTable};
use serde::Serialize;

/// Include templates at compile time
const TABLE_TEMPLATE: &str = include_str!("../templates/table.jinja");
const DETAILS_TEMPLATE: &str = include_str!("../templates/details.jinja");
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/markdown.jinja");

/// Re-export OutputMode for callers
pub use outstanding::OutputMode;

/// Shown when there is no directory to scan.
pub const IDLE_STATUS: &str = "Repo Stats: (No folder open)";

/// Shown when a scan fails.
pub const FAILED_STATUS: &str = "Repo Stats: Indexing failed";

/// Output formats accepted by `--output`.
pub const OUTPUT_FORMATS: [&str; 5] = ["table", "details", "status", "markdown", "json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned columns with a total row
    Table,
    /// Per-extension paragraphs
    Details,
    /// One-line summary
    Status,
    /// Markdown table
    Markdown,
    /// Raw report as JSON
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "table" => Some(OutputFormat::Table),
            "details" => Some(OutputFormat::Details),
            "status" => Some(OutputFormat::Status),
            "markdown" => Some(OutputFormat::Markdown),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Row data for the table template (pre-formatted)
#[derive(Debug, Serialize)]
struct TemplateRow {
    /// Pre-padded label (left-aligned)
    name: String,
    /// Pre-padded cells (right-aligned)
    cells: Vec<String>,
}

/// Data context for the table template
#[derive(Debug, Serialize)]
struct TableContext {
    header: TemplateRow,
    /// Separator line (dashes)
    separator: String,
    rows: Vec<TemplateRow>,
    total: TemplateRow,
}

/// One extension paragraph in the details template
#[derive(Debug, Serialize)]
struct DetailsEntry {
    label: String,
    files: u64,
    total_lines: u64,
    min_lines: u64,
    avg_lines: u64,
    max_lines: u64,
    min_size: u64,
    avg_size: u64,
    max_size: u64,
}

/// Data context for the details template
#[derive(Debug, Serialize)]
struct DetailsContext {
    heading: String,
    extensions: Vec<DetailsEntry>,
    total_files: u64,
    total_lines: u64,
    ignore_file: String,
}

/// Data context for the markdown template
#[derive(Debug, Serialize)]
struct MarkdownContext<'a> {
    title: &'a str,
    headers: &'a [String],
    /// Alignment row cells, numbers right-aligned
    rule: Vec<String>,
    rows: &'a [repostatslib::TableRow],
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new().add("header", Style::new().bold())
}

/// Render a report in the requested format.
///
/// `ignore_file` is only used for the exclusion note in the details view.
pub fn render(
    report: &Report,
    format: OutputFormat,
    ignore_file: &str,
    output_mode: OutputMode,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => render_table(report, output_mode),
        OutputFormat::Details => render_details(report, ignore_file, output_mode),
        OutputFormat::Status => Ok(format!("{}\n", StatsTable::from_report(report).summary)),
        OutputFormat::Markdown => render_markdown(report, output_mode),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(report)?)),
    }
}

/// Render `context` through `template`, always ending with a newline.
fn render_template<T: Serialize>(
    template: &str,
    context: &T,
    output_mode: OutputMode,
) -> anyhow::Result<String> {
    let theme = create_theme();
    let mut rendered = render_with_output(template, context, &theme, output_mode)
        .map_err(|e| anyhow::anyhow!("template rendering failed: {e}"))?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

fn to_template_row(label: &str, values: &[String], widths: &[usize]) -> TemplateRow {
    TemplateRow {
        name: format!("{:<width$}", label, width = widths[0]),
        cells: values
            .iter()
            .zip(&widths[1..])
            .map(|(value, width)| format!("{:>width$}", value, width = *width))
            .collect(),
    }
}

/// Aligned columns: label left-aligned, numbers right-aligned.
fn render_table(report: &Report, output_mode: OutputMode) -> anyhow::Result<String> {
    let table = StatsTable::from_report(report);
    let total_label = format!("Total ({} files)", report.total_files);

    let mut widths = table.column_widths();
    widths[0] = widths[0].max(total_label.len());
    let separator = "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1));

    let total_values = [
        report.total_files.to_string(),
        report.total_lines.to_string(),
    ];

    let context = TableContext {
        header: to_template_row(&table.headers[0], &table.headers[1..], &widths),
        separator,
        rows: table
            .rows
            .iter()
            .map(|row| to_template_row(&row.label, &row.values, &widths))
            .collect(),
        total: to_template_row(&total_label, &total_values, &widths),
    };

    render_template(TABLE_TEMPLATE, &context, output_mode)
}

fn to_details_entry(label: &str, stats: &ExtensionStats) -> DetailsEntry {
    DetailsEntry {
        label: label.to_string(),
        files: stats.file_count,
        total_lines: stats.total_lines,
        min_lines: stats.min_lines,
        avg_lines: stats.average_lines(),
        max_lines: stats.max_lines,
        min_size: stats.min_size_bytes,
        avg_size: stats.average_size(),
        max_size: stats.max_size_bytes,
    }
}

/// One paragraph per extension followed by the totals.
fn render_details(
    report: &Report,
    ignore_file: &str,
    output_mode: OutputMode,
) -> anyhow::Result<String> {
    let context = DetailsContext {
        heading: format!("Repository Statistics for '{}':", report.root_name),
        extensions: report
            .extensions
            .iter()
            .map(|(label, stats)| to_details_entry(label, stats))
            .collect(),
        total_files: report.total_files,
        total_lines: report.total_lines,
        ignore_file: ignore_file.to_string(),
    };

    render_template(DETAILS_TEMPLATE, &context, output_mode)
}

/// Markdown table with backticked labels.
fn render_markdown(report: &Report, output_mode: OutputMode) -> anyhow::Result<String> {
    let table = StatsTable::from_report(report);

    let rule = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                "-".repeat(h.len() + 2)
            } else {
                format!("{}:", "-".repeat(h.len() + 1))
            }
        })
        .collect();

    let context = MarkdownContext {
        title: &table.title,
        headers: &table.headers,
        rule,
        rows: &table.rows,
    };

    render_template(MARKDOWN_TEMPLATE, &context, output_mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use repostatslib::{Aggregator, NO_EXTENSION};

    fn sample_report() -> Report {
        let mut agg = Aggregator::new();
        agg.fold(".txt", 2, 12);
        agg.fold(NO_EXTENSION, 1, 1);
        agg.finalize("demo")
    }

    fn render_text(format: OutputFormat) -> String {
        render(&sample_report(), format, ".gitignore", OutputMode::Text).unwrap()
    }

    #[test]
    fn test_output_format_names() {
        for name in OUTPUT_FORMATS {
            assert!(OutputFormat::from_name(name).is_some(), "{name}");
        }
        assert_eq!(OutputFormat::from_name("yaml"), None);
    }

    #[test]
    fn test_status() {
        assert_eq!(render_text(OutputFormat::Status), "Repo Stats: 2 files, 3 lines\n");
    }

    #[test]
    fn test_details() {
        let out = render_text(OutputFormat::Details);

        assert!(out.contains("Repository Statistics for 'demo':"));
        assert!(out.contains(".txt files: 1\n"));
        assert!(out.contains("  Lines of Code - total: 2, min: 2, avg: 2, max: 2\n"));
        assert!(out.contains("  File Size (bytes) - min: 12, avg: 12, max: 12\n"));
        assert!(out.contains("(no extension) files: 1\n"));
        assert!(out.contains("Total: 2 files, 3 lines of code\n"));
        assert!(out.ends_with("(Hidden, binary, symlink, and .gitignore-ignored files were excluded.)\n"));
    }

    #[test]
    fn test_details_follows_ignore_file_name() {
        let out = render(&sample_report(), OutputFormat::Details, ".repoignore", OutputMode::Text)
            .unwrap();

        assert!(out.contains("and .repoignore-ignored files"));
    }

    #[test]
    fn test_markdown() {
        let out = render_text(OutputFormat::Markdown);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "**File Type Statistics** (in workspace: `demo`):");
        assert!(lines[1].starts_with("| Filetype | Files | Total LOC |"));
        assert!(lines[2].starts_with("|----------|------:|"));
        assert_eq!(lines[3], "| `(no extension)` | 1 | 1 | 1 | 1 | 1 | 1 | 1 | 1 |");
        assert_eq!(lines[4], "| `.txt` | 1 | 2 | 2 | 2 | 2 | 12 | 12 | 12 |");
    }

    #[test]
    fn test_table() {
        let out = render_text(OutputFormat::Table);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].contains("Filetype"));
        assert!(lines[0].contains("Max Size (B)"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("(no extension)"));
        assert!(lines[3].starts_with(".txt"));
        assert!(lines[4].chars().all(|c| c == '-'));
        assert!(lines[5].starts_with("Total (2 files)"));
        assert!(lines[5].ends_with('3'));
    }

    #[test]
    fn test_table_columns_align() {
        let out = render_text(OutputFormat::Table);
        let lines: Vec<&str> = out.lines().collect();

        // Every data row is as wide as the header
        assert_eq!(lines[2].len(), lines[0].len());
        assert_eq!(lines[3].len(), lines[0].len());
        assert_eq!(lines[1].len(), lines[0].len());
    }

    #[test]
    fn test_empty_table() {
        let report = Aggregator::new().finalize("none");
        let out = render(&report, OutputFormat::Table, ".gitignore", OutputMode::Text).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[3].starts_with("Total (0 files)"));
    }

    #[test]
    fn test_json() {
        let out = render_text(OutputFormat::Json);
        let parsed: Report = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed, sample_report());
    }
}
