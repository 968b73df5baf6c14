//! User-facing wording per language.
//!
//! English relative labels use the singular for a count of one ("1 minute ago",
//! "1 hour ago", "1 day ago") and the plural otherwise ("2 hours ago"). Vietnamese
//! has no plural forms.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Language used for user-facing labels and calendar dates.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US", alias = "en")]
    English,
    #[serde(rename = "vi-VN", alias = "vi")]
    Vietnamese,
}
impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::English => "en-US",
            Locale::Vietnamese => "vi-VN",
        }
    }

    pub fn just_now(&self) -> String {
        match self {
            Locale::English => "just now".to_string(),
            Locale::Vietnamese => "Vừa xong".to_string(),
        }
    }

    pub fn minutes_ago(&self, n: i64) -> String {
        match self {
            Locale::English => format!("{n} {} ago", plural(n, "minute")),
            Locale::Vietnamese => format!("{n} phút trước"),
        }
    }

    pub fn hours_ago(&self, n: i64) -> String {
        match self {
            Locale::English => format!("{n} {} ago", plural(n, "hour")),
            Locale::Vietnamese => format!("{n} giờ trước"),
        }
    }

    pub fn days_ago(&self, n: i64) -> String {
        match self {
            Locale::English => format!("{n} {} ago", plural(n, "day")),
            Locale::Vietnamese => format!("{n} ngày trước"),
        }
    }

    /// Short numeric calendar date, the way browsers print `toLocaleDateString`.
    pub fn format_calendar_date(&self, date: NaiveDate) -> String {
        let (day, month, year) = (date.day(), date.month(), date.year());
        match self {
            Locale::English => format!("{month}/{day}/{year}"),
            Locale::Vietnamese => format!("{day}/{month}/{year}"),
        }
    }

    /// What a browser prints for a date it could not parse.
    pub fn invalid_date(&self) -> &'static str {
        "Invalid Date"
    }

    pub fn copied_to_clipboard(&self) -> &'static str {
        match self {
            Locale::English => "Copied to clipboard",
            Locale::Vietnamese => "Đã copy vào clipboard",
        }
    }

    pub fn could_not_copy(&self) -> &'static str {
        match self {
            Locale::English => "Could not copy",
            Locale::Vietnamese => "Không thể copy",
        }
    }
}
impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" => Ok(Locale::English),
            "vi" | "vi-vn" => Ok(Locale::Vietnamese),
            _ => Err(format!("Unsupported locale: {s}")),
        }
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}
