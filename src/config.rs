use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::license::expression::{self, LicenseExpr};
use crate::models::{Classification, PolicyVerdict};

/// Key used for anything that did not classify to a license.
pub const UNKNOWN_KEY: &str = "unknown";

/// Root configuration structure, deserialized from `.license-sniff/config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// License policy rules.
    pub policy: PolicyConfig,
}

/// Defines how classified licenses are evaluated.
#[derive(Debug, Deserialize)]
pub struct PolicyConfig {
    /// Verdict applied to any license not explicitly listed in `licenses`.
    /// Defaults to `warn`.
    #[serde(default = "default_policy_action")]
    pub default: PolicyAction,
    /// Per-license overrides keyed by identifier (e.g. `"MIT"`, `"GPL-3.0"`),
    /// by rendered guess (e.g. `"MIT*"`), or by [`UNKNOWN_KEY`].
    #[serde(default)]
    pub licenses: HashMap<String, PolicyAction>,
}

fn default_policy_action() -> PolicyAction {
    PolicyAction::Warn
}

/// The action to take when a classification matches a policy rule.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PolicyAction {
    Pass,
    Warn,
    /// The CLI exits with code 1.
    Error,
}

impl PolicyAction {
    pub fn to_verdict(&self) -> PolicyVerdict {
        match self {
            PolicyAction::Pass => PolicyVerdict::Pass,
            PolicyAction::Warn => PolicyVerdict::Warn,
            PolicyAction::Error => PolicyVerdict::Error,
        }
    }
}

impl Default for Config {
    /// Built-in default policy used when no config file is found.
    ///
    /// Permissive licenses and public-domain dedications pass, LGPL warns,
    /// and strong-copyleft licenses (GPL, AGPL) produce an error.
    fn default() -> Self {
        let mut licenses = HashMap::new();
        for id in [
            "MIT",
            "Apache-2.0",
            "BSD-2-Clause",
            "BSD-3-Clause",
            "ISC",
            "CC0-1.0",
            "Public Domain",
        ] {
            licenses.insert(id.to_string(), PolicyAction::Pass);
        }
        licenses.insert("LGPL-2.1".to_string(), PolicyAction::Warn);
        licenses.insert("GPL-2.0".to_string(), PolicyAction::Error);
        licenses.insert("GPL-3.0".to_string(), PolicyAction::Error);
        licenses.insert("AGPL-3.0".to_string(), PolicyAction::Error);
        licenses.insert(UNKNOWN_KEY.to_string(), PolicyAction::Warn);

        Config {
            policy: PolicyConfig {
                default: PolicyAction::Warn,
                licenses,
            },
        }
    }
}

/// Load the policy configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<cwd>/.license-sniff/config.toml`
/// 3. `~/.config/license-sniff/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(cwd: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = cwd.join(".license-sniff").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("license-sniff").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    tracing::debug!("no config file found, using built-in policy");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    tracing::debug!("loading policy from {}", path.display());
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
}

/// Determine the policy verdict for a classification outcome.
///
/// The rendered form is looked up first, so `"MIT*"` can be given its own
/// rule. Otherwise:
/// - expressions are evaluated operator by operator (`OR` → most permissive,
///   `AND` → most restrictive, `WITH` exceptions ignored);
/// - guesses fall back to their bare identifier;
/// - custom references, `Undefined` and no classification use [`UNKNOWN_KEY`].
pub fn apply_policy(config: &Config, classification: Option<&Classification>) -> PolicyVerdict {
    let Some(classification) = classification else {
        return lookup(config, UNKNOWN_KEY);
    };

    if let Some(action) = config.policy.licenses.get(&classification.to_string()) {
        return action.to_verdict();
    }

    match classification {
        Classification::Expression(expr) => match expression::parse(expr) {
            Ok(parsed) => eval_expr(config, &parsed),
            Err(_) => config.policy.default.to_verdict(),
        },
        Classification::Guessed(id) | Classification::Exact(id) => lookup(config, id),
        Classification::Custom(_) | Classification::Undefined => lookup(config, UNKNOWN_KEY),
    }
}

fn eval_expr(config: &Config, expr: &LicenseExpr) -> PolicyVerdict {
    match expr {
        LicenseExpr::Or(operands) => operands
            .iter()
            .map(|e| eval_expr(config, e))
            .reduce(verdict_or)
            .unwrap_or_else(|| config.policy.default.to_verdict()),
        LicenseExpr::And(operands) => operands
            .iter()
            .map(|e| eval_expr(config, e))
            .reduce(verdict_and)
            .unwrap_or_else(|| config.policy.default.to_verdict()),
        // WITH exception clauses don't change the base license's verdict
        LicenseExpr::License { id, or_later, .. } => {
            if *or_later {
                if let Some(action) = config.policy.licenses.get(&format!("{}+", id)) {
                    return action.to_verdict();
                }
            }
            lookup(config, id)
        }
    }
}

/// Look up a single identifier in the policy map.
fn lookup(config: &Config, id: &str) -> PolicyVerdict {
    if let Some(action) = config.policy.licenses.get(id) {
        return action.to_verdict();
    }
    config.policy.default.to_verdict()
}

/// Most permissive (least severe) of two verdicts — used for OR semantics.
/// Pass < Warn < Error
fn verdict_or(a: PolicyVerdict, b: PolicyVerdict) -> PolicyVerdict {
    match (a, b) {
        (PolicyVerdict::Pass, _) | (_, PolicyVerdict::Pass) => PolicyVerdict::Pass,
        (PolicyVerdict::Warn, _) | (_, PolicyVerdict::Warn) => PolicyVerdict::Warn,
        _ => PolicyVerdict::Error,
    }
}

/// Most restrictive (most severe) of two verdicts — used for AND semantics.
/// Error > Warn > Pass
fn verdict_and(a: PolicyVerdict, b: PolicyVerdict) -> PolicyVerdict {
    match (a, b) {
        (PolicyVerdict::Error, _) | (_, PolicyVerdict::Error) => PolicyVerdict::Error,
        (PolicyVerdict::Warn, _) | (_, PolicyVerdict::Warn) => PolicyVerdict::Warn,
        _ => PolicyVerdict::Pass,
    }
}
