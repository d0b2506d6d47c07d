use std::collections::HashSet;

use chrono::Weekday;
use serde::Deserialize;

use crate::error::ChecklistError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// The company x layout grid a run iterates over, plus the calendar rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChecklistConfig {
    #[serde(default = "default_companies")]
    pub companies: Vec<Company>,
    #[serde(default = "default_layouts")]
    pub layouts: Vec<String>,
    /// The one weekday with no operations. Skipped when computing the
    /// reference date.
    #[serde(default = "default_closed_weekday")]
    pub closed_weekday: Weekday,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
}

impl Company {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

fn default_companies() -> Vec<Company> {
    (1..=12).map(|i| Company::new(i, format!("Empresa_{i}"))).collect()
}

fn default_layouts() -> Vec<String> {
    vec!["Acionamentos".into(), "Carteira".into(), "Tempos".into()]
}

fn default_closed_weekday() -> Weekday {
    Weekday::Sun
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self {
            companies: default_companies(),
            layouts: default_layouts(),
            closed_weekday: default_closed_weekday(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ChecklistConfig {
    pub fn from_toml(input: &str) -> Result<Self, ChecklistError> {
        let config: ChecklistConfig =
            toml::from_str(input).map_err(|e| ChecklistError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ChecklistError> {
        if self.companies.is_empty() {
            return Err(ChecklistError::ConfigValidation(
                "at least one company is required".into(),
            ));
        }
        if self.layouts.is_empty() {
            return Err(ChecklistError::ConfigValidation(
                "at least one layout is required".into(),
            ));
        }

        // Ledger rows are keyed by company name, so names must be unique too.
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for company in &self.companies {
            let name = company.name.trim();
            if name.is_empty() {
                return Err(ChecklistError::ConfigValidation(format!(
                    "company {} has an empty name",
                    company.id
                )));
            }
            if !ids.insert(company.id) {
                return Err(ChecklistError::ConfigValidation(format!(
                    "duplicate company id {}",
                    company.id
                )));
            }
            if !names.insert(name) {
                return Err(ChecklistError::ConfigValidation(format!(
                    "duplicate company name '{name}'"
                )));
            }
        }

        let mut layouts = HashSet::new();
        for layout in &self.layouts {
            if layout.trim().is_empty() {
                return Err(ChecklistError::ConfigValidation("empty layout name".into()));
            }
            if !layouts.insert(layout.as_str()) {
                return Err(ChecklistError::ConfigValidation(format!(
                    "duplicate layout '{layout}'"
                )));
            }
        }

        Ok(())
    }

    /// Number of checklist rows a run produces.
    pub fn pair_count(&self) -> usize {
        self.companies.len() * self.layouts.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
