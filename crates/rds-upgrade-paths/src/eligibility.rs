//! Blue/green deployment eligibility.
//!
//! RDS only supports blue/green deployments from certain minimum versions on
//! each major line. The catalog API does not expose this, so the minimums are
//! kept here as data. Update [`BUILTIN_RULES`] when AWS extends support.

use crate::domain::Engine;
use crate::version::is_higher_or_equal_within_major;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Built-in eligibility table: `(engine, always eligible, baselines)`.
///
/// A version is eligible when it is at or above any baseline on the same
/// major line.
pub const BUILTIN_RULES: &[(Engine, bool, &[&str])] = &[
    (
        Engine::Postgres,
        false,
        &["11.21", "12.16", "13.12", "14.9", "15.4", "16.1"],
    ),
    (Engine::Mysql, false, &["5.7", "8.0.15"]),
    (Engine::Mariadb, false, &["10.2"]),
    (Engine::AuroraMysql, true, &[]),
    (
        Engine::AuroraPostgresql,
        false,
        &["12.16", "13.12", "14.9", "15.4"],
    ),
];

/// Eligibility rule for one engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BlueGreenRule {
    /// Every version of the engine is eligible
    #[serde(default)]
    pub always: bool,

    /// Minimum eligible version per major line
    #[serde(default)]
    pub baselines: Vec<String>,
}

impl BlueGreenRule {
    /// Rule that accepts every version.
    pub fn always() -> Self {
        Self {
            always: true,
            baselines: Vec::new(),
        }
    }

    /// Rule that accepts versions at or above any of `baselines` within its
    /// major line.
    pub fn from_baselines<I, S>(baselines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            always: false,
            baselines: baselines.into_iter().map(Into::into).collect(),
        }
    }

    /// Decide eligibility of `version` under this rule.
    pub fn allows(&self, version: &str) -> bool {
        self.always
            || self
                .baselines
                .iter()
                .any(|baseline| is_higher_or_equal_within_major(version, baseline))
    }
}

/// Eligibility table keyed by engine.
///
/// Engines without a rule are never eligible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlueGreenPolicy {
    rules: BTreeMap<Engine, BlueGreenRule>,
}

impl BlueGreenPolicy {
    /// Policy built from [`BUILTIN_RULES`].
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|&(engine, always, baselines)| {
                let rule = if always {
                    BlueGreenRule::always()
                } else {
                    BlueGreenRule::from_baselines(baselines.iter().copied())
                };
                (engine, rule)
            })
            .collect();
        Self { rules }
    }

    /// Policy built from an explicit rule map.
    pub fn from_rules(rules: BTreeMap<Engine, BlueGreenRule>) -> Self {
        Self { rules }
    }

    /// Replace the rules of the engines present in `overrides`.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &BTreeMap<Engine, BlueGreenRule>) -> Self {
        for (engine, rule) in overrides {
            self.rules.insert(*engine, rule.clone());
        }
        self
    }

    /// The rule for an engine, if any.
    pub fn rule(&self, engine: Engine) -> Option<&BlueGreenRule> {
        self.rules.get(&engine)
    }

    /// Decide whether `version` of `engine` supports blue/green deployments.
    pub fn is_supported(&self, engine: Engine, version: &str) -> bool {
        self.rules
            .get(&engine)
            .is_some_and(|rule| rule.allows(version))
    }
}

impl Default for BlueGreenPolicy {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Decide blue/green eligibility using the built-in table.
pub fn is_blue_green_supported(engine: Engine, version: &str) -> bool {
    BlueGreenPolicy::builtin().is_supported(engine, version)
}
