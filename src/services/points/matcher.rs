//! 积分建议匹配
//!
//! 纯函数：输入学生在窗口期内的考勤和成绩、启用的规则，输出候选建议。
//! 不可评估的规则和无效成绩直接跳过。

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::models::attendance::entities::{AttendanceRecord, AttendanceStatus};
use crate::models::grades::entities::Grade;
use crate::models::points::entities::{PointRule, RuleCondition};
use crate::models::points::requests::NewSuggestion;

/// 单个学生的活动数据
#[derive(Debug, Clone, Copy)]
pub struct StudentActivity<'a> {
    pub student_id: i64,
    pub attendance: &'a [AttendanceRecord],
    pub grades: &'a [Grade],
}

/// 规则窗口起始日（含当天共 `window_days` 天）
pub fn window_start(today: NaiveDate, window_days: i32) -> NaiveDate {
    today - Duration::days(i64::from(window_days.max(1)) - 1)
}

/// 按规则顺序、学生顺序输出，每个 (规则, 学生) 至多一条
pub fn match_rules(
    rules: &[PointRule],
    students: &[StudentActivity<'_>],
    today: NaiveDate,
) -> Vec<NewSuggestion> {
    rules
        .iter()
        .filter(|rule| rule.is_evaluable())
        .flat_map(|rule| {
            students.iter().filter_map(move |activity| {
                evaluate(rule, activity, today).map(|reason| NewSuggestion {
                    rule_id: rule.id,
                    student_id: activity.student_id,
                    points: rule.points,
                    reason,
                })
            })
        })
        .collect()
}

/// 命中时返回建议理由
pub fn evaluate(rule: &PointRule, activity: &StudentActivity<'_>, today: NaiveDate) -> Option<String> {
    let since = window_start(today, rule.window_days);
    let in_window = |date: NaiveDate| date >= since && date <= today;

    let mut attendance: Vec<&AttendanceRecord> = activity
        .attendance
        .iter()
        .filter(|r| r.student_id == activity.student_id && in_window(r.date))
        .collect();
    attendance.sort_by_key(|r| (r.date, r.id));

    // 满分非正的成绩不参与计算
    let mut grades: Vec<(&Grade, f64)> = activity
        .grades
        .iter()
        .filter(|g| g.student_id == activity.student_id && in_window(g.assessed_on))
        .filter_map(|g| g.percentage().map(|p| (g, p)))
        .collect();
    grades.sort_by_key(|(g, _)| (g.assessed_on, g.id));

    let threshold = rule.threshold;
    let days = rule.window_days;
    let measured = match rule.condition {
        RuleCondition::AttendanceRate => {
            let countable = attendance
                .iter()
                .filter(|r| r.status != AttendanceStatus::Excused)
                .count();
            if countable == 0 {
                return None;
            }
            let attended = attendance.iter().filter(|r| r.status.is_attended()).count();
            let rate = attended as f64 / countable as f64 * 100.0;
            (rate >= threshold).then(|| format!("Attendance rate {rate:.1}% over the last {days} days"))
        }
        RuleCondition::PerfectAttendance => {
            let clean = attendance.iter().all(|r| {
                !matches!(r.status, AttendanceStatus::Absent | AttendanceStatus::Late)
            });
            let count = attendance.len();
            (count > 0 && clean && count as f64 >= threshold)
                .then(|| format!("Perfect attendance across {count} records in the last {days} days"))
        }
        RuleCondition::AttendanceStreak => {
            let streak = attendance
                .iter()
                .rev()
                .filter(|r| r.status != AttendanceStatus::Excused)
                .take_while(|r| r.status == AttendanceStatus::Present)
                .count();
            (streak > 0 && streak as f64 >= threshold)
                .then(|| format!("Present {streak} days in a row"))
        }
        RuleCondition::GradeAverage => {
            if grades.is_empty() {
                return None;
            }
            let average = grades.iter().map(|(_, p)| p).sum::<f64>() / grades.len() as f64;
            (average >= threshold).then(|| {
                format!(
                    "Grade average {average:.1}% over {} assessments in the last {days} days",
                    grades.len()
                )
            })
        }
        RuleCondition::HighScore => {
            let best = grades.iter().map(|(_, p)| *p).fold(None, |acc: Option<f64>, p| {
                Some(acc.map_or(p, |a| a.max(p)))
            })?;
            (best >= threshold).then(|| format!("Top score of {best:.1}% in the last {days} days"))
        }
        RuleCondition::GradeImprovement => {
            let mut by_subject: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
            for (grade, pct) in &grades {
                by_subject.entry(grade.subject_id).or_default().push(*pct);
            }
            let best = by_subject
                .iter()
                .filter_map(|(subject_id, pcts)| match pcts.as_slice() {
                    [.., previous, latest] => Some((*subject_id, latest - previous)),
                    _ => None,
                })
                .fold(None, |acc: Option<(i64, f64)>, item| match acc {
                    Some(current) if current.1 >= item.1 => Some(current),
                    _ => Some(item),
                })?;
            (best.1 >= threshold).then(|| {
                format!(
                    "Improved by {:.1} percentage points in subject {}",
                    best.1, best.0
                )
            })
        }
    }?;

    Some(format!("{} ({})", measured, rule.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grades::entities::AssessmentType;
    use crate::models::points::entities::PointCategory;
    use chrono::Utc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 31).unwrap()
    }

    fn day(offset: i64) -> NaiveDate {
        today() - Duration::days(offset)
    }

    fn rule(id: i64, condition: RuleCondition, threshold: f64) -> PointRule {
        PointRule {
            id,
            name: format!("rule-{id}"),
            description: None,
            condition,
            threshold,
            window_days: 30,
            points: 5,
            category: PointCategory::Other,
            active: true,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn att(id: i64, student_id: i64, offset: i64, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id,
            student_id,
            class_id: Some(1),
            date: day(offset),
            status,
            note: None,
            recorded_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn grade(id: i64, subject_id: i64, offset: i64, score: f64, max_score: f64) -> Grade {
        Grade {
            id,
            student_id: 1,
            subject_id,
            class_id: Some(1),
            teacher_id: None,
            assessment_type: AssessmentType::Test,
            term: 1,
            academic_year: "2024/2025".into(),
            score,
            max_score,
            comment: None,
            assessed_on: day(offset),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn activity<'a>(attendance: &'a [AttendanceRecord], grades: &'a [Grade]) -> StudentActivity<'a> {
        StudentActivity {
            student_id: 1,
            attendance,
            grades,
        }
    }

    #[test]
    fn test_window_start() {
        assert_eq!(window_start(today(), 1), today());
        assert_eq!(window_start(today(), 30), day(29));
    }

    #[test]
    fn test_attendance_rate_excludes_excused_and_window() {
        let records = vec![
            att(1, 1, 0, AttendanceStatus::Present),
            att(2, 1, 1, AttendanceStatus::Late),
            att(3, 1, 2, AttendanceStatus::Excused),
            att(4, 1, 3, AttendanceStatus::Absent),
            // 窗口外
            att(5, 1, 40, AttendanceStatus::Absent),
        ];
        let a = activity(&records, &[]);
        let r = rule(1, RuleCondition::AttendanceRate, 66.0);
        assert!(evaluate(&r, &a, today()).is_some());
        let r = rule(1, RuleCondition::AttendanceRate, 70.0);
        assert!(evaluate(&r, &a, today()).is_none());

        let only_excused = vec![att(1, 1, 0, AttendanceStatus::Excused)];
        let r = rule(1, RuleCondition::AttendanceRate, 0.0);
        assert!(evaluate(&r, &activity(&only_excused, &[]), today()).is_none());
    }

    #[test]
    fn test_perfect_attendance() {
        let clean = vec![
            att(1, 1, 0, AttendanceStatus::Present),
            att(2, 1, 1, AttendanceStatus::Excused),
            att(3, 1, 2, AttendanceStatus::Present),
        ];
        assert!(evaluate(&rule(1, RuleCondition::PerfectAttendance, 3.0), &activity(&clean, &[]), today()).is_some());
        assert!(evaluate(&rule(1, RuleCondition::PerfectAttendance, 4.0), &activity(&clean, &[]), today()).is_none());

        let late = vec![
            att(1, 1, 0, AttendanceStatus::Present),
            att(2, 1, 1, AttendanceStatus::Late),
        ];
        assert!(evaluate(&rule(1, RuleCondition::PerfectAttendance, 1.0), &activity(&late, &[]), today()).is_none());
    }

    #[test]
    fn test_attendance_streak_skips_excused() {
        let records = vec![
            att(1, 1, 5, AttendanceStatus::Absent),
            att(2, 1, 4, AttendanceStatus::Present),
            att(3, 1, 3, AttendanceStatus::Present),
            att(4, 1, 2, AttendanceStatus::Excused),
            att(5, 1, 1, AttendanceStatus::Present),
            att(6, 1, 0, AttendanceStatus::Present),
        ];
        let a = activity(&records, &[]);
        assert!(evaluate(&rule(1, RuleCondition::AttendanceStreak, 4.0), &a, today()).is_some());
        assert!(evaluate(&rule(1, RuleCondition::AttendanceStreak, 5.0), &a, today()).is_none());

        let broken = vec![
            att(1, 1, 1, AttendanceStatus::Present),
            att(2, 1, 0, AttendanceStatus::Late),
        ];
        assert!(evaluate(&rule(1, RuleCondition::AttendanceStreak, 0.0), &activity(&broken, &[]), today()).is_none());
    }

    #[test]
    fn test_grade_conditions() {
        let grades = vec![
            grade(1, 10, 10, 60.0, 100.0),
            grade(2, 10, 2, 85.0, 100.0),
            grade(3, 11, 5, 45.0, 50.0),
            // 满分为 0，跳过
            grade(4, 11, 1, 5.0, 0.0),
        ];
        let a = activity(&[], &grades);
        // 平均 (60 + 85 + 90) / 3 = 78.3
        assert!(evaluate(&rule(1, RuleCondition::GradeAverage, 78.0), &a, today()).is_some());
        assert!(evaluate(&rule(1, RuleCondition::GradeAverage, 79.0), &a, today()).is_none());
        assert!(evaluate(&rule(1, RuleCondition::HighScore, 90.0), &a, today()).is_some());
        assert!(evaluate(&rule(1, RuleCondition::HighScore, 91.0), &a, today()).is_none());
        // 科目 10 从 60 提升到 85
        assert!(evaluate(&rule(1, RuleCondition::GradeImprovement, 25.0), &a, today()).is_some());
        assert!(evaluate(&rule(1, RuleCondition::GradeImprovement, 26.0), &a, today()).is_none());

        assert!(evaluate(&rule(1, RuleCondition::GradeAverage, 0.0), &activity(&[], &[]), today()).is_none());
        assert!(evaluate(&rule(1, RuleCondition::HighScore, 0.0), &activity(&[], &[]), today()).is_none());
    }

    #[test]
    fn test_match_rules_order_and_skips() {
        let records_1 = vec![att(1, 1, 0, AttendanceStatus::Present)];
        let records_2 = vec![att(2, 2, 0, AttendanceStatus::Present)];
        let students = vec![
            StudentActivity {
                student_id: 1,
                attendance: &records_1,
                grades: &[],
            },
            StudentActivity {
                student_id: 2,
                attendance: &records_2,
                grades: &[],
            },
        ];

        let mut inactive = rule(3, RuleCondition::AttendanceRate, 50.0);
        inactive.active = false;
        let mut zero_points = rule(4, RuleCondition::AttendanceRate, 50.0);
        zero_points.points = 0;
        let mut nan = rule(5, RuleCondition::AttendanceRate, f64::NAN);
        nan.window_days = 10;
        let rules = vec![
            rule(2, RuleCondition::AttendanceRate, 50.0),
            inactive,
            zero_points,
            nan,
            rule(1, RuleCondition::PerfectAttendance, 1.0),
        ];

        let suggestions = match_rules(&rules, &students, today());
        let keys: Vec<(i64, i64)> = suggestions
            .iter()
            .map(|s| (s.rule_id, s.student_id))
            .collect();
        assert_eq!(keys, vec![(2, 1), (2, 2), (1, 1), (1, 2)]);
        assert!(suggestions.iter().all(|s| s.points == 5));
        assert!(suggestions[0].reason.contains("rule-2"));
    }
}
