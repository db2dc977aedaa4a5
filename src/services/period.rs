//! Period resolution service
//!
//! Turns a `(year, month, cycle)` period into concrete calendar dates using
//! the configured pay days, with explicit per-period overrides taking
//! precedence. Adjacent periods chain with no gaps and no overlaps.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::{QuincenaError, QuincenaResult};
use crate::models::{Period, PeriodMode};
use crate::storage::{PeriodOverride, Storage};

/// Service for period resolution and override management
pub struct PeriodService<'a> {
    storage: &'a Storage,
}

impl<'a> PeriodService<'a> {
    /// Create a new period service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The configured period mode
    pub fn mode(&self) -> QuincenaResult<PeriodMode> {
        self.storage.ledger_settings.period_mode()
    }

    /// Resolve the inclusive [start, end] date range for a period
    ///
    /// An explicit override wins verbatim. Otherwise the range is computed
    /// from the configured pay days, clamped into short months.
    pub fn resolve_range(&self, period: Period) -> QuincenaResult<(NaiveDate, NaiveDate)> {
        validate_period(period)?;

        if let Some(ov) = self.storage.period_overrides.get(period)? {
            debug!(period = %period, start = %ov.start, end = %ov.end, "period override hit");
            return Ok((ov.start, ov.end));
        }

        match self.mode()? {
            PeriodMode::Mensual => self.resolve_monthly(period),
            PeriodMode::Quincenal => self.resolve_quincenal(period),
        }
    }

    fn resolve_monthly(&self, period: Period) -> QuincenaResult<(NaiveDate, NaiveDate)> {
        let pay_day = self.storage.ledger_settings.monthly_pay_day()?;

        let start = clamp_day(period.year, period.month, pay_day);
        let (ny, nm) = next_month(period.year, period.month);
        let end = clamp_day(ny, nm, pay_day)
            .pred_opt()
            .ok_or_else(|| QuincenaError::Storage("date underflow computing period end".into()))?;

        Ok((start, end))
    }

    fn resolve_quincenal(&self, period: Period) -> QuincenaResult<(NaiveDate, NaiveDate)> {
        let day1 = self.storage.ledger_settings.quincenal_pay_day_1()?;
        let day2 = self.storage.ledger_settings.quincenal_pay_day_2()?;

        let mut d1 = clamp_day(period.year, period.month, day1);
        let mut d2 = clamp_day(period.year, period.month, day2);
        if d1 > d2 {
            std::mem::swap(&mut d1, &mut d2);
        }

        if period.cycle == 1 {
            // Cycle 1 runs up to the day before the second pay day, but never
            // ends before it starts (clamping can collapse the two days)
            let end = d2
                .pred_opt()
                .ok_or_else(|| {
                    QuincenaError::Storage("date underflow computing period end".into())
                })?
                .max(d1);
            Ok((d1, end))
        } else {
            // Cycle 2 ends the day before the next month's first pay day, with
            // the configured day re-clamped into that month so periods chain
            let lo = day1.min(day2);
            let (ny, nm) = next_month(period.year, period.month);
            let end = clamp_day(ny, nm, lo).pred_opt().ok_or_else(|| {
                QuincenaError::Storage("date underflow computing period end".into())
            })?;
            Ok((d2, end))
        }
    }

    /// Which cycle a date belongs to: always 1 in monthly mode; in quincenal
    /// mode, 1 when the date falls inside its month's cycle-1 range, else 2
    pub fn cycle_for_date(&self, date: NaiveDate) -> QuincenaResult<u8> {
        if self.mode()? == PeriodMode::Mensual {
            return Ok(1);
        }

        let (start, end) = self.resolve_range(Period::new(date.year(), date.month(), 1))?;
        if date >= start && date <= end {
            Ok(1)
        } else {
            Ok(2)
        }
    }

    /// The period the given date falls into
    pub fn current_period(&self, today: NaiveDate) -> QuincenaResult<Period> {
        let cycle = self.cycle_for_date(today)?;
        Ok(Period::new(today.year(), today.month(), cycle))
    }

    /// The period after the given one, under the configured mode
    pub fn next_period(&self, period: Period) -> QuincenaResult<Period> {
        Ok(period.next(self.mode()?))
    }

    /// The period before the given one, under the configured mode
    pub fn previous_period(&self, period: Period) -> QuincenaResult<Period> {
        Ok(period.previous(self.mode()?))
    }

    /// Set an explicit date range for a period
    pub fn set_override(
        &self,
        period: Period,
        start: NaiveDate,
        end: NaiveDate,
    ) -> QuincenaResult<()> {
        validate_period(period)?;
        self.storage.period_overrides.set(period, start, end)?;
        self.storage.period_overrides.save()?;
        debug!(period = %period, %start, %end, "period override set");
        Ok(())
    }

    /// Remove a period's override, reverting to the computed range
    pub fn clear_override(&self, period: Period) -> QuincenaResult<bool> {
        let removed = self.storage.period_overrides.delete(period)?;
        if removed {
            self.storage.period_overrides.save()?;
            debug!(period = %period, "period override cleared");
        }
        Ok(removed)
    }

    /// All configured overrides, in period order
    pub fn overrides(&self) -> QuincenaResult<Vec<PeriodOverride>> {
        self.storage.period_overrides.get_all()
    }
}

fn validate_period(period: Period) -> QuincenaResult<()> {
    if !(1..=12).contains(&period.month) {
        return Err(QuincenaError::validation(
            "month",
            format!("{} is out of range (1-12)", period.month),
        ));
    }
    if !(1..=2).contains(&period.cycle) {
        return Err(QuincenaError::validation(
            "cycle",
            format!("{} is out of range (1-2)", period.cycle),
        ));
    }
    Ok(())
}

/// Cap a day-of-month at the last real day of that month
pub(crate) fn clamp_day(year: i32, month: u32, day: u32) -> NaiveDate {
    let last = last_day_of_month(year, month);
    // month is pre-validated, so the date always exists
    NaiveDate::from_ymd_opt(year, month, day.min(last))
        .or_else(|| NaiveDate::from_ymd_opt(year, month, 1))
        .unwrap_or_default()
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = next_month(year, month);
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

pub(crate) fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::QuincenaPaths;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = QuincenaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_quincenal_april() {
        let (_tmp, storage) = setup();
        let service = PeriodService::new(&storage);

        let (s1, e1) = service.resolve_range(Period::new(2024, 4, 1)).unwrap();
        assert_eq!((s1, e1), (date(2024, 4, 1), date(2024, 4, 15)));

        let (s2, e2) = service.resolve_range(Period::new(2024, 4, 2)).unwrap();
        assert_eq!((s2, e2), (date(2024, 4, 16), date(2024, 4, 30)));
    }

    #[test]
    fn test_custom_pay_days() {
        let (_tmp, storage) = setup();
        storage.ledger_settings.set_quincenal_pay_days(5, 20).unwrap();
        let service = PeriodService::new(&storage);

        let (s1, e1) = service.resolve_range(Period::new(2024, 4, 1)).unwrap();
        assert_eq!((s1, e1), (date(2024, 4, 5), date(2024, 4, 19)));

        let (s2, e2) = service.resolve_range(Period::new(2024, 4, 2)).unwrap();
        assert_eq!((s2, e2), (date(2024, 4, 20), date(2024, 5, 4)));
    }

    #[test]
    fn test_monthly_clamps_short_months() {
        let (_tmp, storage) = setup();
        storage
            .ledger_settings
            .set_period_mode(PeriodMode::Mensual)
            .unwrap();
        storage.ledger_settings.set_monthly_pay_day(31).unwrap();
        let service = PeriodService::new(&storage);

        // January pay day 31; February clamps to the 29th (2024 is a leap year)
        let (s, e) = service.resolve_range(Period::new(2024, 1, 1)).unwrap();
        assert_eq!((s, e), (date(2024, 1, 31), date(2024, 2, 28)));

        let (s, e) = service.resolve_range(Period::new(2024, 2, 1)).unwrap();
        assert_eq!((s, e), (date(2024, 2, 29), date(2024, 3, 30)));
    }

    #[test]
    fn test_no_gaps_across_boundaries() {
        let (_tmp, storage) = setup();
        storage.ledger_settings.set_quincenal_pay_days(31, 16).unwrap();
        let service = PeriodService::new(&storage);

        // Walk a year of periods and verify each starts the day after the
        // previous one ends
        let mut period = Period::new(2024, 1, 1);
        let (_, mut prev_end) = service.resolve_range(period).unwrap();
        for _ in 0..24 {
            period = period.next(PeriodMode::Quincenal);
            let (start, end) = service.resolve_range(period).unwrap();
            assert_eq!(
                start,
                prev_end.succ_opt().unwrap(),
                "gap or overlap entering {}",
                period
            );
            assert!(end >= start);
            prev_end = end;
        }
    }

    #[test]
    fn test_cycle_for_date_round_trip() {
        let (_tmp, storage) = setup();
        let service = PeriodService::new(&storage);

        for cycle in [1u8, 2] {
            let period = Period::new(2024, 4, cycle);
            let (start, end) = service.resolve_range(period).unwrap();
            let mut d = start;
            while d <= end {
                assert_eq!(service.cycle_for_date(d).unwrap(), cycle, "date {}", d);
                d = d.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn test_override_precedence_and_reversion() {
        let (_tmp, storage) = setup();
        let service = PeriodService::new(&storage);
        let period = Period::new(2024, 4, 1);

        service
            .set_override(period, date(2024, 4, 3), date(2024, 4, 17))
            .unwrap();
        assert_eq!(
            service.resolve_range(period).unwrap(),
            (date(2024, 4, 3), date(2024, 4, 17))
        );

        assert!(service.clear_override(period).unwrap());
        assert_eq!(
            service.resolve_range(period).unwrap(),
            (date(2024, 4, 1), date(2024, 4, 15))
        );
    }

    #[test]
    fn test_monthly_mode_cycle_is_always_one() {
        let (_tmp, storage) = setup();
        storage
            .ledger_settings
            .set_period_mode(PeriodMode::Mensual)
            .unwrap();
        let service = PeriodService::new(&storage);

        assert_eq!(service.cycle_for_date(date(2024, 4, 25)).unwrap(), 1);
        assert_eq!(
            service.current_period(date(2024, 4, 25)).unwrap(),
            Period::new(2024, 4, 1)
        );
    }

    #[test]
    fn test_current_period() {
        let (_tmp, storage) = setup();
        let service = PeriodService::new(&storage);

        assert_eq!(
            service.current_period(date(2024, 4, 10)).unwrap(),
            Period::new(2024, 4, 1)
        );
        assert_eq!(
            service.current_period(date(2024, 4, 16)).unwrap(),
            Period::new(2024, 4, 2)
        );
    }

    #[test]
    fn test_invalid_period_rejected() {
        let (_tmp, storage) = setup();
        let service = PeriodService::new(&storage);

        assert!(service.resolve_range(Period::new(2024, 13, 1)).is_err());
        assert!(service.resolve_range(Period::new(2024, 4, 3)).is_err());
    }
}
