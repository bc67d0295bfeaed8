//! Cross-catalog validation for a loaded registry.
//! The loaders already reject malformed JSON and duplicate keys; this layer
//! checks the references between catalogs and the conventions lookup relies on.

use std::collections::HashSet;
use std::fmt;

use crate::data::registry::GameData;
use crate::data::unit::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == ValidationSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == ValidationSeverity::Warning)
            .count()
    }
}

/// Validate the relationships a loaded registry must satisfy before replies
/// can be formatted without internal errors.
pub fn validate_game_data(data: &GameData) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut referenced_abilities = HashSet::new();

    for (key, send) in data.sends.iter() {
        let context = format!("sends['{key}']");
        validate_unit(&mut report, &context, &send.unit, data, &mut referenced_abilities);
        validate_key_convention(&mut report, &context, key, &send.unit.name);
    }

    for (key, tower) in data.towers.iter() {
        let context = format!("towers['{key}']");
        validate_unit(&mut report, &context, &tower.unit, data, &mut referenced_abilities);
        validate_key_convention(&mut report, &context, key, &tower.unit.name);

        for pred in &tower.predecessors {
            if !data.towers.contains_key(pred) {
                report.push(
                    ValidationSeverity::Error,
                    format!("{context}.predecessors"),
                    format!("unknown tower '{pred}'"),
                );
            }
        }
        for upgrade in &tower.upgrades {
            if !data.towers.contains_key(upgrade) {
                report.push(
                    ValidationSeverity::Error,
                    format!("{context}.upgrades"),
                    format!("unknown tower '{upgrade}'"),
                );
            }
        }
        if tower.supply > 0.0 {
            report.push(
                ValidationSeverity::Warning,
                format!("{context}.supply"),
                format!("supply {} is positive; costs are stored negated", tower.supply),
            );
        }
    }

    for (key, wave) in data.waves.iter() {
        let context = format!("waves['{key}']");
        validate_unit(&mut report, &context, &wave.unit, data, &mut referenced_abilities);
    }

    for (id, _) in data.abilities.iter() {
        if !referenced_abilities.contains(id) {
            report.push(
                ValidationSeverity::Info,
                format!("abilities['{id}']"),
                "not referenced by any send, tower, or wave",
            );
        }
    }

    report
}

fn validate_unit(
    report: &mut ValidationReport,
    context: &str,
    unit: &Unit,
    data: &GameData,
    referenced_abilities: &mut HashSet<String>,
) {
    for ability_id in &unit.abilities {
        referenced_abilities.insert(ability_id.clone());
        if !data.abilities.contains_key(ability_id) {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.abilities"),
                format!("unknown ability '{ability_id}'"),
            );
        }
    }

    if unit.weapon.dmg_min > unit.weapon.dmg_max {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.wpn"),
            format!(
                "damage minimum {} exceeds maximum {}",
                unit.weapon.dmg_min, unit.weapon.dmg_max
            ),
        );
    }

    if unit.weapon.period <= 0.0 {
        report.push(
            ValidationSeverity::Warning,
            format!("{context}.wpn.period"),
            format!("attack period {} is not positive", unit.weapon.period),
        );
    }
}

/// Lookup lowercases the query before matching, so a key with uppercase
/// letters can never be reached. Keys diverging from the display name only
/// weaken fuzzy matching, so that is a warning.
fn validate_key_convention(
    report: &mut ValidationReport,
    context: &str,
    key: &str,
    display_name: &str,
) {
    if key.chars().any(|ch| ch.is_uppercase()) {
        report.push(
            ValidationSeverity::Error,
            context.to_string(),
            format!("key '{key}' contains uppercase letters and cannot be matched"),
        );
    } else if key != display_name.to_lowercase() {
        report.push(
            ValidationSeverity::Warning,
            context.to_string(),
            format!("key '{key}' is not the lowercased display name '{display_name}'"),
        );
    }
}
