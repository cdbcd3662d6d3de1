use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use license_sniff::models::{Classification, Finding, PolicyVerdict};

const DECLARED_WIDTH: usize = 48;

/// Render a colored terminal report.
pub fn render(findings: &[Finding], verbose: bool, quiet: bool) -> Result<()> {
    let total = findings.len();
    let pass_count = count(findings, &PolicyVerdict::Pass);
    let warn_count = count(findings, &PolicyVerdict::Warn);
    let error_count = count(findings, &PolicyVerdict::Error);

    if quiet {
        println!(
            "Total: {}  Pass: {}  Warn: {}  Error: {}",
            total,
            pass_count.to_string().green(),
            warn_count.to_string().yellow(),
            error_count.to_string().red(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}\n",
        "license-sniff".bold(),
        env!("CARGO_PKG_VERSION")
    );

    let pass_licenses = summarize_licenses(findings, &PolicyVerdict::Pass);
    let warn_licenses = summarize_licenses(findings, &PolicyVerdict::Warn);
    let error_licenses = summarize_licenses(findings, &PolicyVerdict::Error);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Declarations : {}", total));
    println!(
        " │  {:<48} │",
        format!("{}  Pass      : {:>4}  {}", "✓".green(), pass_count, pass_licenses)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Warn      : {:>4}  {}", "⚠".yellow(), warn_count, warn_licenses)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Error     : {:>4}  {}", "✗".red(), error_count, error_licenses)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if error_count > 0 {
        println!(" {} Declarations violating policy:\n", "[ERROR]".red().bold());
        render_table(findings, &PolicyVerdict::Error);
        println!();
    }

    if warn_count > 0 {
        println!(" {} Declarations with warnings:\n", "[WARN]".yellow().bold());
        render_table(findings, &PolicyVerdict::Warn);
        println!();
    }

    if verbose && pass_count > 0 {
        println!(" {} All passing declarations:\n", "[PASS]".green().bold());
        render_table(findings, &PolicyVerdict::Pass);
        println!();
    }

    Ok(())
}

fn count(findings: &[Finding], verdict: &PolicyVerdict) -> usize {
    findings.iter().filter(|f| &f.verdict == verdict).count()
}

fn render_table(findings: &[Finding], verdict_filter: &PolicyVerdict) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Source").add_attribute(Attribute::Bold),
            Cell::new("Declared").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Verdict").add_attribute(Attribute::Bold),
        ]);

    for finding in findings.iter().filter(|f| &f.verdict == verdict_filter) {
        let (verdict_str, verdict_color) = match finding.verdict {
            PolicyVerdict::Pass => ("✓ pass", Color::Green),
            PolicyVerdict::Warn => ("⚠ warn", Color::Yellow),
            PolicyVerdict::Error => ("✗ error", Color::Red),
        };

        // Guesses and unresolved references stand out from verbatim ids
        let license_color = match &finding.license {
            Some(Classification::Expression(_)) | Some(Classification::Exact(_)) => Color::Reset,
            Some(Classification::Guessed(_)) => Color::Cyan,
            Some(Classification::Custom(_)) => Color::Magenta,
            Some(Classification::Undefined) | None => Color::DarkGrey,
        };

        table.add_row(vec![
            Cell::new(finding.source.to_string()),
            Cell::new(excerpt(finding.declared.as_deref())),
            Cell::new(finding.license_label()).fg(license_color),
            Cell::new(verdict_str)
                .fg(verdict_color)
                .set_alignment(CellAlignment::Center),
        ]);
    }

    println!("{}", table);
}

/// One-line preview of a declaration, cut to [`DECLARED_WIDTH`] characters.
fn excerpt(declared: Option<&str>) -> String {
    let Some(declared) = declared else {
        return "-".to_string();
    };
    let line = declared.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() <= DECLARED_WIDTH {
        return line;
    }
    let cut: String = line.chars().take(DECLARED_WIDTH - 1).collect();
    format!("{}…", cut)
}

fn summarize_licenses(findings: &[Finding], verdict: &PolicyVerdict) -> String {
    let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    for finding in findings.iter().filter(|f| &f.verdict == verdict) {
        *counts.entry(finding.license_label()).or_insert(0) += 1;
    }

    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(lic, cnt)| format!("{} ({})", lic, cnt))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}
