//! Calendar periods that sales are bucketed into.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::Error;

/// How finely to group transactions by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// One bucket per calendar day, keyed `YYYY-MM-DD`.
    Daily,
    /// One bucket per ISO week, keyed `YYYY-Www`.
    Weekly,
    /// One bucket per calendar month, keyed `YYYY-MM`.
    Monthly,
}

impl Period {
    /// The name used for the period on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }

    /// The key of the bucket that `date` falls into.
    ///
    /// Weekly keys pair the calendar year of `date` with its ISO week
    /// number, so the first days of January can land in week 52 or 53 and
    /// the last days of December in week 01.
    pub fn key(&self, date: &PrimitiveDateTime) -> String {
        match self {
            Period::Daily => format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                u8::from(date.month()),
                date.day()
            ),
            Period::Weekly => format!("{:04}-W{:02}", date.year(), date.iso_week()),
            Period::Monthly => format!("{:04}-{:02}", date.year(), u8::from(date.month())),
        }
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            other => Err(Error::InvalidPeriod(other.to_owned())),
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::Error;

    use super::Period;

    #[test]
    fn parses_known_periods() {
        assert_eq!("daily".parse(), Ok(Period::Daily));
        assert_eq!("weekly".parse(), Ok(Period::Weekly));
        assert_eq!("monthly".parse(), Ok(Period::Monthly));
    }

    #[test]
    fn rejects_unknown_period() {
        let error = "yearly".parse::<Period>().unwrap_err();

        assert_eq!(error, Error::InvalidPeriod("yearly".to_owned()));
        assert_eq!(error.to_string(), "Invalid period: yearly");
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Daily".parse::<Period>().is_err());
    }

    #[test]
    fn daily_key() {
        assert_eq!(Period::Daily.key(&datetime!(2025-04-01 23:59:59)), "2025-04-01");
    }

    #[test]
    fn monthly_key() {
        assert_eq!(Period::Monthly.key(&datetime!(2025-04-30 08:00)), "2025-04");
    }

    #[test]
    fn weekly_key_is_zero_padded() {
        assert_eq!(Period::Weekly.key(&datetime!(2025-01-08 12:00)), "2025-W02");
        assert_eq!(Period::Weekly.key(&datetime!(2025-04-01 12:00)), "2025-W14");
    }

    #[test]
    fn weekly_key_uses_calendar_year_at_year_boundaries() {
        // 2025-12-29 is the Monday of ISO week 1 of 2026.
        assert_eq!(Period::Weekly.key(&datetime!(2025-12-29 12:00)), "2025-W01");
        // 2021-01-01 is in ISO week 53 of 2020.
        assert_eq!(Period::Weekly.key(&datetime!(2021-01-01 12:00)), "2021-W53");
    }

    #[test]
    fn display_round_trips_through_parse() {
        for period in [Period::Daily, Period::Weekly, Period::Monthly] {
            assert_eq!(period.to_string().parse(), Ok(period));
        }
    }
}
