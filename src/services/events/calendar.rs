//! 利比里亚校历生成
//!
//! 国定假日与文化节日按公历年计算，学年从 9 月开始，分为三个学期。

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::models::events::entities::EventType;
use crate::models::events::responses::{AcademicTerm, CalendarEntry};

pub const MIN_CALENDAR_YEAR: i32 = 1900;
pub const MAX_CALENDAR_YEAR: i32 = 2200;

// 按年份缓存生成结果
static CALENDAR_CACHE: Lazy<DashMap<i32, Arc<Vec<CalendarEntry>>>> = Lazy::new(DashMap::new);

pub fn validate_year(year: i32) -> Result<(), String> {
    if (MIN_CALENDAR_YEAR..=MAX_CALENDAR_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(format!(
            "Year must be between {MIN_CALENDAR_YEAR} and {MAX_CALENDAR_YEAR}"
        ))
    }
}

/// 学年跨越 `start` 与 `start + 1` 两个公历年，两者都必须在范围内
pub fn validate_academic_year_start(start: i32) -> Result<(), String> {
    validate_year(start)?;
    validate_year(start.checked_add(1).unwrap_or(i32::MAX))
}

/// 复活节（Meeus/Jones/Butcher 公历算法）
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// 某月第 n 个星期几
pub fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
}

fn entry(
    title: &str,
    description: &str,
    event_type: EventType,
    date: Option<NaiveDate>,
) -> Option<CalendarEntry> {
    date.map(|date| CalendarEntry {
        title: title.to_string(),
        description: description.to_string(),
        event_type,
        date,
    })
}

fn build_year(year: i32) -> Vec<CalendarEntry> {
    let ymd = |m: u32, d: u32| NaiveDate::from_ymd_opt(year, m, d);
    let easter = easter_sunday(year);
    let holiday = EventType::Holiday;
    let cultural = EventType::Cultural;

    let mut entries: Vec<CalendarEntry> = [
        entry("New Year's Day", "National holiday", holiday, ymd(1, 1)),
        entry("Armed Forces Day", "National holiday", holiday, ymd(2, 11)),
        entry(
            "Decoration Day",
            "National holiday, second Wednesday of March",
            holiday,
            nth_weekday(year, 3, Weekday::Wed, 2),
        ),
        entry(
            "International Women's Day",
            "Cultural observance",
            cultural,
            ymd(3, 8),
        ),
        entry("J.J. Roberts' Birthday", "National holiday", holiday, ymd(3, 15)),
        entry(
            "Fast and Prayer Day",
            "National holiday, second Friday of April",
            holiday,
            nth_weekday(year, 4, Weekday::Fri, 2),
        ),
        entry(
            "Good Friday",
            "National holiday, two days before Easter",
            holiday,
            easter.map(|d| d - Duration::days(2)),
        ),
        entry("Easter Sunday", "Cultural observance", cultural, easter),
        entry(
            "National Unification Day",
            "National holiday",
            holiday,
            ymd(5, 14),
        ),
        entry("Independence Day", "National holiday", holiday, ymd(7, 26)),
        entry("Flag Day", "National holiday", holiday, ymd(8, 24)),
        entry(
            "International Literacy Day",
            "Cultural observance",
            cultural,
            ymd(9, 8),
        ),
        entry(
            "Thanksgiving Day",
            "National holiday, first Thursday of November",
            holiday,
            nth_weekday(year, 11, Weekday::Thu, 1),
        ),
        entry(
            "William V.S. Tubman's Birthday",
            "National holiday",
            holiday,
            ymd(11, 29),
        ),
        entry("Christmas Day", "National holiday", holiday, ymd(12, 25)),
    ]
    .into_iter()
    .flatten()
    .collect();

    entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));
    entries
}

/// 某公历年的假日与文化节日，按日期排序
pub fn calendar_for_year(year: i32) -> Arc<Vec<CalendarEntry>> {
    CALENDAR_CACHE
        .entry(year)
        .or_insert_with(|| Arc::new(build_year(year)))
        .clone()
}

/// 学年的三个学期：9-12 月、次年 1-4 月、次年 5-7 月
pub fn term_bounds(academic_year_start: i32) -> Vec<AcademicTerm> {
    let Some(next) = academic_year_start.checked_add(1) else {
        return Vec::new();
    };
    [
        (1, (academic_year_start, 9, 1), (academic_year_start, 12, 31)),
        (2, (next, 1, 1), (next, 4, 30)),
        (3, (next, 5, 1), (next, 7, 31)),
    ]
    .into_iter()
    .filter_map(|(term, (sy, sm, sd), (ey, em, ed))| {
        Some(AcademicTerm {
            term,
            start_date: NaiveDate::from_ymd_opt(sy, sm, sd)?,
            end_date: NaiveDate::from_ymd_opt(ey, em, ed)?,
        })
    })
    .collect()
}

pub fn term_name(term: i32) -> &'static str {
    match term {
        1 => "First Term",
        2 => "Second Term",
        3 => "Third Term",
        _ => "Unknown Term",
    }
}

/// 学年内（9 月至次年 7 月）的节日，外加各学期开始和结束标记
pub fn academic_year_entries(academic_year_start: i32) -> Vec<CalendarEntry> {
    let terms = term_bounds(academic_year_start);
    let in_school_year = |date: NaiveDate| terms.iter().any(|t| t.contains(date));

    let mut entries: Vec<CalendarEntry> = calendar_for_year(academic_year_start)
        .iter()
        .chain(calendar_for_year(academic_year_start.saturating_add(1)).iter())
        .filter(|e| in_school_year(e.date))
        .cloned()
        .collect();

    for term in &terms {
        let name = term_name(term.term);
        entries.push(CalendarEntry {
            title: format!("{name} Begins"),
            description: format!("Start of the {}", name.to_lowercase()),
            event_type: EventType::Term,
            date: term.start_date,
        });
        entries.push(CalendarEntry {
            title: format!("{name} Ends"),
            description: format!("End of the {}", name.to_lowercase()),
            event_type: EventType::Term,
            date: term.end_date,
        });
    }

    entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_academic_year_start() {
        assert!(validate_academic_year_start(2024).is_ok());
        assert!(validate_academic_year_start(MAX_CALENDAR_YEAR).is_err());
        assert!(validate_academic_year_start(MIN_CALENDAR_YEAR - 1).is_err());
        assert!(validate_academic_year_start(i32::MAX).is_err());
        assert!(validate_academic_year_start(i32::MIN).is_err());
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn find(entries: &[CalendarEntry], title: &str) -> NaiveDate {
        entries
            .iter()
            .find(|e| e.title == title)
            .map(|e| e.date)
            .unwrap()
    }

    #[test]
    fn test_easter_sunday() {
        assert_eq!(easter_sunday(2019), Some(date(2019, 4, 21)));
        assert_eq!(easter_sunday(2024), Some(date(2024, 3, 31)));
        assert_eq!(easter_sunday(2025), Some(date(2025, 4, 20)));
        assert_eq!(easter_sunday(2000), Some(date(2000, 4, 23)));
    }

    #[test]
    fn test_floating_holidays_2024() {
        let entries = calendar_for_year(2024);
        assert_eq!(find(&entries, "Decoration Day"), date(2024, 3, 13));
        assert_eq!(find(&entries, "Fast and Prayer Day"), date(2024, 4, 12));
        assert_eq!(find(&entries, "Good Friday"), date(2024, 3, 29));
        assert_eq!(find(&entries, "Thanksgiving Day"), date(2024, 11, 7));
        assert_eq!(find(&entries, "Independence Day"), date(2024, 7, 26));
        assert_eq!(entries.len(), 15);
        assert!(entries.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_calendar_is_memoized() {
        let first = calendar_for_year(2031);
        let second = calendar_for_year(2031);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_term_bounds() {
        let terms = term_bounds(2024);
        assert_eq!(terms.len(), 3);
        assert_eq!(terms[0].start_date, date(2024, 9, 1));
        assert_eq!(terms[0].end_date, date(2024, 12, 31));
        assert_eq!(terms[1].start_date, date(2025, 1, 1));
        assert_eq!(terms[1].end_date, date(2025, 4, 30));
        assert_eq!(terms[2].start_date, date(2025, 5, 1));
        assert_eq!(terms[2].end_date, date(2025, 7, 31));
        // 8 月不属于任何学期
        assert!(!terms.iter().any(|t| t.contains(date(2025, 8, 15))));
        assert!(term_bounds(i32::MAX).is_empty());
    }

    #[test]
    fn test_academic_year_entries() {
        let entries = academic_year_entries(2024);
        // 2024 年 9-12 月 4 个，2025 年 1-7 月 10 个，另加 6 个学期标记
        assert_eq!(entries.len(), 20);
        assert!(entries.iter().all(|e| e.title != "Flag Day"));
        assert_eq!(find(&entries, "International Literacy Day"), date(2024, 9, 8));
        assert_eq!(find(&entries, "Good Friday"), date(2025, 4, 18));
        assert_eq!(entries.first().map(|e| e.title.as_str()), Some("First Term Begins"));
        assert_eq!(entries.last().map(|e| e.title.as_str()), Some("Third Term Ends"));
    }

    #[test]
    fn test_validate_year() {
        assert!(validate_year(2024).is_ok());
        assert!(validate_year(1899).is_err());
        assert!(validate_year(2201).is_err());
    }
}
