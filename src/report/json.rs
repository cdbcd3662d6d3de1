use anyhow::Result;

use license_sniff::models::Finding;

/// Print findings as pretty JSON on stdout.
pub fn render(findings: &[Finding]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(findings)?);
    Ok(())
}
