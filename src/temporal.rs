//! Date/time grammar resolution shared by the `date`, `time` and `datetime`
//! field types.
//!
//! A field's format selects one of three grammars:
//!
//! - `default`: a strict ISO-8601 subset per type.
//! - `any`: best-effort parsing of loosely written dates and times.
//! - `fmt:<pattern>`: a strftime-style pattern applied literally.

use std::sync::OnceLock;

use anyhow::{Context, Result, anyhow, bail, ensure};
use chrono::{
    DateTime, NaiveDate, NaiveDateTime, NaiveTime,
    format::{Parsed, StrftimeItems, parse},
};
use regex::Regex;

pub const ANY_FORMAT: &str = "any";
pub const PATTERN_PREFIX: &str = "fmt:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemporalFormat {
    Default,
    Any,
    Pattern(String),
}

impl TemporalFormat {
    pub fn parse(format: &str) -> Result<Self> {
        if let Some(pattern) = format.strip_prefix(PATTERN_PREFIX) {
            return Ok(TemporalFormat::Pattern(pattern.to_string()));
        }
        match format.trim() {
            crate::field::DEFAULT_FORMAT => Ok(TemporalFormat::Default),
            ANY_FORMAT => Ok(TemporalFormat::Any),
            other => Err(anyhow!(
                "Unsupported temporal format '{other}'. Expected 'default', 'any' or 'fmt:<pattern>'"
            )),
        }
    }
}

fn iso_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid iso date regex"))
}

fn iso_time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?$").expect("valid iso time regex")
    })
}

fn iso_datetime_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?(Z|[+-][0-9]{2}:[0-9]{2})?$",
        )
        .expect("valid iso datetime regex")
    })
}

pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    ensure!(
        iso_date_regex().is_match(value),
        "'{value}' is not an ISO-8601 date (YYYY-MM-DD)"
    );
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Failed to parse '{value}' as date"))
}

pub fn parse_iso_time(value: &str) -> Result<NaiveTime> {
    ensure!(
        iso_time_regex().is_match(value),
        "'{value}' is not an ISO-8601 time (HH:MM:SS)"
    );
    NaiveTime::parse_from_str(value, "%H:%M:%S%.f")
        .with_context(|| format!("Failed to parse '{value}' as time"))
}

/// Offsets are folded into UTC; the result carries no offset.
pub fn parse_iso_datetime(value: &str) -> Result<NaiveDateTime> {
    ensure!(
        iso_datetime_regex().is_match(value),
        "'{value}' is not an ISO-8601 datetime"
    );
    let has_offset = value.ends_with('Z')
        || value
            .get(19..)
            .is_some_and(|tail| tail.contains(['+', '-']));
    if has_offset {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.naive_utc())
            .with_context(|| format!("Failed to parse '{value}' as datetime"))
    } else {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .with_context(|| format!("Failed to parse '{value}' as datetime"))
    }
}

fn parse_with_pattern(value: &str, pattern: &str) -> Result<Parsed> {
    let mut parsed = Parsed::new();
    parse(&mut parsed, value, StrftimeItems::new(pattern))
        .map_err(|err| anyhow!("'{value}' does not match pattern '{pattern}': {err}"))?;
    Ok(parsed)
}

fn fill_date_defaults(parsed: &mut Parsed) -> Result<()> {
    let week_based = parsed.isoweek().is_some()
        || parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some();
    if parsed.ordinal().is_some() || week_based {
        return Ok(());
    }
    if parsed.month().is_none() && parsed.day().is_none() {
        parsed.set_month(1).map_err(|err| anyhow!("{err}"))?;
    }
    if parsed.day().is_none() {
        parsed.set_day(1).map_err(|err| anyhow!("{err}"))?;
    }
    Ok(())
}

fn fill_time_defaults(parsed: &mut Parsed) -> Result<()> {
    if parsed.hour_div_12().is_some() && parsed.minute().is_none() {
        parsed.set_minute(0).map_err(|err| anyhow!("{err}"))?;
    }
    Ok(())
}

/// Missing day defaults to the 1st, a year-only pattern to January 1st.
pub fn parse_date_pattern(value: &str, pattern: &str) -> Result<NaiveDate> {
    let mut parsed = parse_with_pattern(value, pattern)?;
    fill_date_defaults(&mut parsed)?;
    parsed
        .to_naive_date()
        .map_err(|err| anyhow!("'{value}' is not a complete date for '{pattern}': {err}"))
}

pub fn parse_time_pattern(value: &str, pattern: &str) -> Result<NaiveTime> {
    let mut parsed = parse_with_pattern(value, pattern)?;
    fill_time_defaults(&mut parsed)?;
    parsed
        .to_naive_time()
        .map_err(|err| anyhow!("'{value}' is not a complete time for '{pattern}': {err}"))
}

pub fn parse_datetime_pattern(value: &str, pattern: &str) -> Result<NaiveDateTime> {
    let mut parsed = parse_with_pattern(value, pattern)?;
    fill_date_defaults(&mut parsed)?;
    fill_time_defaults(&mut parsed)?;
    parsed
        .to_naive_datetime_with_offset(0)
        .map_err(|err| anyhow!("'{value}' is not a complete datetime for '{pattern}': {err}"))
}

/// Date and time components found by the best-effort parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LooseTemporal {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

const NUMERIC_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y%m%d",
];

const FILLER_WORDS: &[&str] = &["of", "at", "on"];

fn month_from_name(token: &str) -> Option<u32> {
    const MONTHS: &[(&str, &str)] = &[
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("may", "may"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];
    let token = token.trim_end_matches('.');
    MONTHS
        .iter()
        .position(|(short, long)| token == *short || token == *long || (*short == "sep" && token == "sept"))
        .map(|index| index as u32 + 1)
}

fn is_weekday(token: &str) -> bool {
    const WEEKDAYS: &[(&str, &str)] = &[
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
    ];
    let token = token.trim_end_matches('.');
    WEEKDAYS
        .iter()
        .any(|(short, long)| token == *short || token == *long || (*short == "tue" && token == "tues") || (*short == "thu" && token == "thurs"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

fn meridiem_from(token: &str) -> Option<Meridiem> {
    match token {
        "am" | "a.m." | "a.m" => Some(Meridiem::Am),
        "pm" | "p.m." | "p.m" => Some(Meridiem::Pm),
        _ => None,
    }
}

fn split_meridiem_suffix(token: &str) -> (&str, Option<Meridiem>) {
    for suffix in ["a.m.", "p.m.", "am", "pm"] {
        if let Some(body) = token.strip_suffix(suffix)
            && !body.is_empty()
            && body.chars().all(|c| c.is_ascii_digit() || c == ':' || c == '.')
        {
            return (body, meridiem_from(suffix));
        }
    }
    (token, None)
}

fn ordinal_day(token: &str) -> Option<u32> {
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(body) = token.strip_suffix(suffix)
            && !body.is_empty()
            && body.len() <= 2
            && body.chars().all(|c| c.is_ascii_digit())
        {
            return body.parse().ok();
        }
    }
    None
}

fn clock_parts(body: &str) -> Option<(u32, u32, u32)> {
    let mut parts = body.split(':');
    let hour = parts.next()?.parse().ok()?;
    let minute = match parts.next() {
        Some(raw) if raw.len() == 2 => raw.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };
    let second = match parts.next() {
        Some(raw) if raw.len() == 2 => raw.parse().ok()?,
        Some(_) => return None,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((hour, minute, second))
}

fn apply_meridiem(hour: u32, meridiem: Option<Meridiem>) -> Result<u32> {
    match meridiem {
        None => Ok(hour),
        Some(_) if hour == 0 || hour > 12 => bail!("Hour {hour} cannot take am/pm"),
        Some(Meridiem::Am) => Ok(hour % 12),
        Some(Meridiem::Pm) => Ok(hour % 12 + 12),
    }
}

#[derive(Debug, Default)]
struct LooseParts {
    date: Option<NaiveDate>,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    clock: Option<(u32, u32, u32)>,
    meridiem: Option<Meridiem>,
}

impl LooseParts {
    fn set_once<T>(slot: &mut Option<T>, value: T, what: &str, raw: &str) -> Result<()> {
        ensure!(slot.is_none(), "'{raw}' repeats the {what}");
        *slot = Some(value);
        Ok(())
    }

    fn resolve(self, raw: &str) -> Result<LooseTemporal> {
        let date = match (self.date, self.year, self.month, self.day) {
            (Some(date), None, None, None) => Some(date),
            (Some(_), ..) => bail!("'{raw}' mixes date notations"),
            (None, Some(year), Some(month), day) => Some(
                NaiveDate::from_ymd_opt(year, month, day.unwrap_or(1))
                    .ok_or_else(|| anyhow!("'{raw}' names a day that does not exist"))?,
            ),
            (None, None, None, None) => None,
            _ => bail!("'{raw}' does not name a complete date"),
        };
        let time = match self.clock {
            Some((hour, minute, second)) => {
                let hour = apply_meridiem(hour, self.meridiem)?;
                Some(
                    NaiveTime::from_hms_opt(hour, minute, second)
                        .ok_or_else(|| anyhow!("'{raw}' names a time that does not exist"))?,
                )
            }
            None if self.meridiem.is_some() => bail!("'{raw}' has am/pm without an hour"),
            None => None,
        };
        ensure!(
            date.is_some() || time.is_some(),
            "'{raw}' contains no date or time"
        );
        Ok(LooseTemporal { date, time })
    }
}

/// Best-effort parsing of loosely written dates and times such as
/// `10th Jan 1969`, `3:00 am` or `Mon 1st Jan 2014 9 am`.
///
/// Every word must be understood; anything unrecognized fails rather than
/// being skipped.
pub fn parse_loose(value: &str) -> Result<LooseTemporal> {
    let trimmed = value.trim();
    ensure!(!trimmed.is_empty(), "Empty value has no date or time");

    if let Ok(dt) = parse_iso_datetime(trimmed) {
        return Ok(LooseTemporal {
            date: Some(dt.date()),
            time: Some(dt.time()),
        });
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(LooseTemporal {
            date: Some(dt.date()),
            time: Some(dt.time()),
        });
    }

    let lowered = trimmed.to_lowercase().replace(',', " ");
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    let mut parts = LooseParts::default();
    let mut index = 0;
    while index < tokens.len() {
        let token = tokens[index];
        let next_meridiem = tokens.get(index + 1).and_then(|next| meridiem_from(next));
        index += 1;

        if FILLER_WORDS.contains(&token) || is_weekday(token) {
            continue;
        }
        if let Some(meridiem) = meridiem_from(token) {
            LooseParts::set_once(&mut parts.meridiem, meridiem, "am/pm marker", value)?;
            continue;
        }
        if let Some(month) = month_from_name(token) {
            LooseParts::set_once(&mut parts.month, month, "month", value)?;
            continue;
        }
        if let Some(day) = ordinal_day(token) {
            LooseParts::set_once(&mut parts.day, day, "day", value)?;
            continue;
        }

        let (body, attached) = split_meridiem_suffix(token);
        if body.contains(':') || attached.is_some() {
            let clock = clock_parts(body)
                .ok_or_else(|| anyhow!("'{token}' in '{value}' is not a clock time"))?;
            LooseParts::set_once(&mut parts.clock, clock, "time", value)?;
            if let Some(meridiem) = attached {
                LooseParts::set_once(&mut parts.meridiem, meridiem, "am/pm marker", value)?;
            }
            continue;
        }

        if token.contains(['/', '-', '.']) {
            let date = NUMERIC_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
                .ok_or_else(|| anyhow!("'{token}' in '{value}' is not a recognizable date"))?;
            LooseParts::set_once(&mut parts.date, date, "date", value)?;
            continue;
        }

        if token.chars().all(|c| c.is_ascii_digit()) {
            if next_meridiem.is_some() && token.len() <= 2 {
                let hour: u32 = token.parse().context("Parsing hour")?;
                LooseParts::set_once(&mut parts.clock, (hour, 0, 0), "time", value)?;
                continue;
            }
            if token.len() == 4 {
                let year: i32 = token.parse().context("Parsing year")?;
                LooseParts::set_once(&mut parts.year, year, "year", value)?;
                continue;
            }
            if token.len() == 8
                && let Ok(date) = NaiveDate::parse_from_str(token, "%Y%m%d")
            {
                LooseParts::set_once(&mut parts.date, date, "date", value)?;
                continue;
            }
            if token.len() <= 2 {
                let number: u32 = token.parse().context("Parsing day")?;
                if parts.day.is_none() {
                    parts.day = Some(number);
                } else if parts.month.is_none() && (1..=12).contains(&number) {
                    parts.month = Some(number);
                } else {
                    bail!("'{token}' in '{value}' is ambiguous");
                }
                continue;
            }
        }

        bail!("'{token}' in '{value}' is not a recognizable date or time word");
    }

    parts.resolve(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn format_strings_parse_into_grammars() {
        assert_eq!(TemporalFormat::parse("default").unwrap(), TemporalFormat::Default);
        assert_eq!(TemporalFormat::parse("any").unwrap(), TemporalFormat::Any);
        assert_eq!(
            TemporalFormat::parse("fmt:%d/%m/%Y").unwrap(),
            TemporalFormat::Pattern("%d/%m/%Y".to_string())
        );
        assert!(TemporalFormat::parse("email").is_err());
    }

    #[test]
    fn iso_date_is_strict() {
        assert_eq!(parse_iso_date("2019-01-01").unwrap(), date(2019, 1, 1));
        assert!(parse_iso_date("01-01-2019").is_err());
        assert!(parse_iso_date("2019-1-1").is_err());
        assert!(parse_iso_date("2019-02-30").is_err());
    }

    #[test]
    fn iso_datetime_folds_offsets_to_utc() {
        let expected = date(2014, 1, 1).and_hms_opt(6, 0, 0).unwrap();
        assert_eq!(parse_iso_datetime("2014-01-01T06:00:00Z").unwrap(), expected);
        assert_eq!(parse_iso_datetime("2014-01-01T08:00:00+02:00").unwrap(), expected);
        assert_eq!(parse_iso_datetime("2014-01-01T06:00:00").unwrap(), expected);
        assert!(parse_iso_datetime("2014-01-01 06:00:00").is_err());
    }

    #[test]
    fn patterns_fill_missing_day() {
        assert_eq!(parse_date_pattern("2014-06", "%Y-%m").unwrap(), date(2014, 6, 1));
        assert_eq!(parse_date_pattern("2014", "%Y").unwrap(), date(2014, 1, 1));
        assert!(parse_date_pattern("2014/12/19", "%m/%d/%y").is_err());
        assert!(parse_date_pattern("2014/12/19", "DD/MM/YYYY").is_err());
    }

    #[test]
    fn time_patterns_default_minutes() {
        assert_eq!(
            parse_time_pattern("3", "%H").unwrap(),
            NaiveTime::from_hms_opt(3, 0, 0).unwrap()
        );
    }

    #[test]
    fn loose_parser_reads_ordinals_and_meridiem() {
        let parsed = parse_loose("10th Jan 1969 9 am").unwrap();
        assert_eq!(parsed.date, Some(date(1969, 1, 10)));
        assert_eq!(parsed.time, NaiveTime::from_hms_opt(9, 0, 0));

        let parsed = parse_loose("3:00 pm").unwrap();
        assert_eq!(parsed.date, None);
        assert_eq!(parsed.time, NaiveTime::from_hms_opt(15, 0, 0));

        let parsed = parse_loose("12am").unwrap();
        assert_eq!(parsed.time, NaiveTime::from_hms_opt(0, 0, 0));
    }

    #[test]
    fn loose_parser_rejects_unknown_words() {
        assert!(parse_loose("10th Jan nineteen sixty nine").is_err());
        assert!(parse_loose("the land before time").is_err());
        assert!(parse_loose("13 pm").is_err());
    }
}
