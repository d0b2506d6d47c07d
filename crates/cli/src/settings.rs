//! `auditdesk.toml`: file locations plus the company x layout grid.
//!
//! ```toml
//! layouts = ["Carteira", "Tempos"]
//! closed_weekday = "Sun"
//!
//! [[companies]]
//! id = 1
//! name = "Empresa_1"
//!
//! [paths]
//! db = "banco_exp.sqlite"
//! out_dir = "checklist_reports"
//! ledger_format = "xlsx"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use auditdesk_checklist::ChecklistConfig;
use auditdesk_io::LedgerFormat;

pub const LEDGER_STEM: &str = "checklist_history";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FormatArg {
    Xlsx,
    Csv,
}

impl From<FormatArg> for LedgerFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Xlsx => LedgerFormat::Xlsx,
            FormatArg::Csv => LedgerFormat::Csv,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_db")]
    pub db: PathBuf,
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    #[serde(default = "default_ledger_format")]
    pub ledger_format: FormatArg,
}

fn default_db() -> PathBuf {
    PathBuf::from("banco_exp.sqlite")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("checklist_reports")
}

fn default_ledger_format() -> FormatArg {
    FormatArg::Xlsx
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            db: default_db(),
            out_dir: default_out_dir(),
            ledger_format: default_ledger_format(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub paths: PathsConfig,
    pub checklist: ChecklistConfig,
}

impl Settings {
    pub fn from_toml(input: &str) -> Result<Self, String> {
        #[derive(Deserialize)]
        struct PathsSection {
            #[serde(default)]
            paths: PathsConfig,
        }

        let section: PathsSection = toml::from_str(input).map_err(|e| format!("settings parse error: {e}"))?;
        let checklist = ChecklistConfig::from_toml(input).map_err(|e| e.to_string())?;
        Ok(Self { paths: section.paths, checklist })
    }

    /// Load from `path`, resolving relative paths against the file's directory.
    pub fn load(path: &Path) -> Result<Self, String> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read settings {}: {e}", path.display()))?;
        let mut settings = Self::from_toml(&input)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        settings.paths.db = base.join(&settings.paths.db);
        settings.paths.out_dir = base.join(&settings.paths.out_dir);
        Ok(settings)
    }

    pub fn ledger_path(&self) -> PathBuf {
        let format: LedgerFormat = self.paths.ledger_format.into();
        self.paths.out_dir.join(format!("{LEDGER_STEM}.{}", format.extension()))
    }
}
