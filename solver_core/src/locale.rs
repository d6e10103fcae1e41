//! # Locale Formatting
//!
//! Calendar results echo their input dates back in the reader's language.
//! That formatting is delegated through the [`DateFormatter`] trait so a
//! caller can plug in any locale-aware formatter; [`Locale`] is the built-in
//! implementation for the site's languages.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use solver_core::locale::{DateFormatter, Locale};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
//! assert_eq!(Locale::En.format_date(date), "March 5, 2024");
//! assert_eq!(Locale::Es.format_date(date), "5 de marzo de 2024");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Formats dates and weekday names for display.
pub trait DateFormatter {
    /// Long human-readable form of a date.
    fn format_date(&self, date: NaiveDate) -> String;

    /// Full weekday name.
    fn weekday_name(&self, weekday: Weekday) -> String;
}

/// Site languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
    Pt,
    Fr,
    De,
}

/// Every supported locale, in display order
pub const ALL_LOCALES: &[Locale] = &[Locale::En, Locale::Es, Locale::Pt, Locale::Fr, Locale::De];

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Pt => "pt",
            Locale::Fr => "fr",
            Locale::De => "de",
        }
    }

    fn month_names(self) -> [&'static str; 12] {
        match self {
            Locale::En => [
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ],
            Locale::Es => [
                "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto",
                "septiembre", "octubre", "noviembre", "diciembre",
            ],
            Locale::Pt => [
                "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto",
                "setembro", "outubro", "novembro", "dezembro",
            ],
            Locale::Fr => [
                "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août",
                "septembre", "octobre", "novembre", "décembre",
            ],
            Locale::De => [
                "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August",
                "September", "Oktober", "November", "Dezember",
            ],
        }
    }

    /// Weekday names starting on Monday.
    fn weekday_names(self) -> [&'static str; 7] {
        match self {
            Locale::En => ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"],
            Locale::Es => ["lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo"],
            Locale::Pt => [
                "segunda-feira", "terça-feira", "quarta-feira", "quinta-feira", "sexta-feira",
                "sábado", "domingo",
            ],
            Locale::Fr => ["lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche"],
            Locale::De => ["Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag"],
        }
    }

    pub fn month_name(self, month: u32) -> &'static str {
        self.month_names()[(month.clamp(1, 12) - 1) as usize]
    }
}

impl DateFormatter for Locale {
    fn format_date(&self, date: NaiveDate) -> String {
        let month = self.month_name(date.month());
        let (day, year) = (date.day(), date.year());
        match self {
            Locale::En => format!("{} {}, {}", month, day, year),
            Locale::Es | Locale::Pt => format!("{} de {} de {}", day, month, year),
            Locale::Fr => format!("{} {} {}", day, month, year),
            Locale::De => format!("{}. {} {}", day, month, year),
        }
    }

    fn weekday_name(&self, weekday: Weekday) -> String {
        self.weekday_names()[weekday.num_days_from_monday() as usize].to_string()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        ALL_LOCALES
            .iter()
            .copied()
            .find(|l| l.code() == code)
            .ok_or_else(|| CalcError::parse_error("locale", s, "one of en, es, pt, fr, de"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_each_locale() {
        let d = date(2024, 2, 29);
        assert_eq!(Locale::En.format_date(d), "February 29, 2024");
        assert_eq!(Locale::Pt.format_date(d), "29 de fevereiro de 2024");
        assert_eq!(Locale::Fr.format_date(d), "29 février 2024");
        assert_eq!(Locale::De.format_date(d), "29. Februar 2024");
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(Locale::En.weekday_name(Weekday::Mon), "Monday");
        assert_eq!(Locale::Es.weekday_name(Weekday::Sun), "domingo");
        assert_eq!(Locale::De.weekday_name(Weekday::Sat), "Samstag");
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!("ES".parse::<Locale>().unwrap(), Locale::Es);
        assert!("xx".parse::<Locale>().is_err());
        assert_eq!(Locale::Fr.to_string(), "fr");
    }
}
