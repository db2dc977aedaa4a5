//! Pay-period model
//!
//! A `Period` identifies one pay cycle: a (year, month, cycle) triple where
//! cycle is 1 or 2 in quincenal mode and always 1 in monthly mode. The
//! calendar dates a period spans are computed by the period service; the
//! model itself is pure arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How pay periods divide the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodMode {
    /// Two pay periods per month (the default)
    #[default]
    Quincenal,
    /// One pay period per month
    Mensual,
}

impl PeriodMode {
    /// String form as stored in the ledger settings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quincenal => "quincenal",
            Self::Mensual => "mensual",
        }
    }
}

impl fmt::Display for PeriodMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PeriodMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quincenal" => Ok(Self::Quincenal),
            "mensual" => Ok(Self::Mensual),
            other => Err(format!(
                "unknown period mode '{}' (expected 'quincenal' or 'mensual')",
                other
            )),
        }
    }
}

/// One pay period: (year, month, cycle)
///
/// Field order gives chronological ordering via the derived `Ord`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Period {
    pub year: i32,
    pub month: u32,
    pub cycle: u8,
}

const MONTH_NAMES_ES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

impl Period {
    /// Create a period without validation (callers validate month/cycle ranges)
    pub const fn new(year: i32, month: u32, cycle: u8) -> Self {
        Self { year, month, cycle }
    }

    /// The next period under the given mode
    ///
    /// Quincenal steps half-months (cycle 1 -> 2, then into the next month);
    /// monthly steps whole months with cycle pinned at 1.
    pub fn next(&self, mode: PeriodMode) -> Self {
        match mode {
            PeriodMode::Quincenal => {
                if self.cycle == 1 {
                    Self::new(self.year, self.month, 2)
                } else if self.month == 12 {
                    Self::new(self.year + 1, 1, 1)
                } else {
                    Self::new(self.year, self.month + 1, 1)
                }
            }
            PeriodMode::Mensual => {
                if self.month == 12 {
                    Self::new(self.year + 1, 1, 1)
                } else {
                    Self::new(self.year, self.month + 1, 1)
                }
            }
        }
    }

    /// The previous period under the given mode
    pub fn previous(&self, mode: PeriodMode) -> Self {
        match mode {
            PeriodMode::Quincenal => {
                if self.cycle == 2 {
                    Self::new(self.year, self.month, 1)
                } else if self.month == 1 {
                    Self::new(self.year - 1, 12, 2)
                } else {
                    Self::new(self.year, self.month - 1, 2)
                }
            }
            PeriodMode::Mensual => {
                if self.month == 1 {
                    Self::new(self.year - 1, 12, 1)
                } else {
                    Self::new(self.year, self.month - 1, 1)
                }
            }
        }
    }

    /// Human-readable label, e.g. "1ª Quincena - Abril 2024" or "Abril 2024"
    pub fn label(&self, mode: PeriodMode) -> String {
        let month_name = MONTH_NAMES_ES
            .get(self.month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or("?");
        match mode {
            PeriodMode::Quincenal => {
                let cycle_label = if self.cycle == 1 {
                    "1ª Quincena"
                } else {
                    "2ª Quincena"
                };
                format!("{} - {} {}", cycle_label, month_name, self.year)
            }
            PeriodMode::Mensual => format!("{} {}", month_name, self.year),
        }
    }

    /// Short tag used in export file names: "Q1", "Q2", or "M"
    pub fn tag(&self, mode: PeriodMode) -> &'static str {
        match mode {
            PeriodMode::Quincenal => {
                if self.cycle == 1 {
                    "Q1"
                } else {
                    "Q2"
                }
            }
            PeriodMode::Mensual => "M",
        }
    }

    /// Stable key form "YYYY-MM-C" used for period-scoped records
    pub fn key(&self) -> String {
        format!("{:04}-{:02}-{}", self.year, self.month, self.cycle)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 3 {
            return Err(format!("invalid period '{}' (expected YYYY-MM-C)", s));
        }
        let year: i32 = parts[0]
            .parse()
            .map_err(|_| format!("invalid year in period '{}'", s))?;
        let month: u32 = parts[1]
            .parse()
            .map_err(|_| format!("invalid month in period '{}'", s))?;
        let cycle: u8 = parts[2]
            .parse()
            .map_err(|_| format!("invalid cycle in period '{}'", s))?;
        if !(1..=12).contains(&month) {
            return Err(format!("month out of range in period '{}'", s));
        }
        if !(1..=2).contains(&cycle) {
            return Err(format!("cycle out of range in period '{}'", s));
        }
        Ok(Self::new(year, month, cycle))
    }
}
