//! The two fixed text sets (Japanese, English) and the value formatters that depend on them.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::profile::model::Gender;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ja" | "jp" | "ja-jp" => Ok(Locale::Ja),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{other}' (expected 'ja' or 'en')")),
        }
    }
}

/// A literal with one text per locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub ja: &'static str,
    pub en: &'static str,
}

impl Label {
    pub const fn new(ja: &'static str, en: &'static str) -> Self {
        Self { ja, en }
    }

    pub fn get(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Ja => self.ja,
            Locale::En => self.en,
        }
    }
}

pub const SAME_AS_ABOVE: Label = Label::new("同上", "Same as above");
pub const EDUCATION_SECTION: Label = Label::new("学歴", "Education");
pub const WORK_SECTION: Label = Label::new("職歴", "Internship / Work History");
pub const END_OF_LIST: Label = Label::new("以上", "End of list");
pub const PHOTO_PLACEHOLDER: Label = Label::new("写真", "Photo");

pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::Ja => format!("{}年{}月{}日", date.year(), date.month(), date.day()),
        Locale::En => date.format("%Y-%m-%d").to_string(),
    }
}

pub fn format_as_of(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::Ja => format!("{}現在", format_date(date, locale)),
        Locale::En => format!("As of {}", format_date(date, locale)),
    }
}

/// Completed years of age on `as_of`.
pub fn age_on(birth: NaiveDate, as_of: NaiveDate) -> u32 {
    if as_of < birth {
        return 0;
    }
    let had_birthday = (as_of.month(), as_of.day()) >= (birth.month(), birth.day());
    let years = as_of.year() - birth.year() - i32::from(!had_birthday);
    years.max(0) as u32
}

pub fn format_birth_date(birth: NaiveDate, as_of: NaiveDate, locale: Locale) -> String {
    let age = age_on(birth, as_of);
    match locale {
        Locale::Ja => format!("{}生 (満{}歳)", format_date(birth, locale), age),
        Locale::En => format!("{} (age {})", format_date(birth, locale), age),
    }
}

pub fn gender_label(gender: Gender, locale: Locale) -> &'static str {
    match gender {
        Gender::Unspecified => "",
        Gender::Male => Label::new("男", "Male").get(locale),
        Gender::Female => Label::new("女", "Female").get(locale),
        Gender::Other => Label::new("その他", "Other").get(locale),
    }
}

pub fn format_years(years: u32, locale: Locale) -> String {
    match locale {
        Locale::Ja => format!("{years}年"),
        Locale::En if years == 1 => "1 year".to_string(),
        Locale::En => format!("{years} years"),
    }
}
