//! Plain-text transcript of the current table, offered as the export action.

use crate::cgpa::{self, format_cgpa};
use crate::course::GradeTable;
use crate::grade::GradeScale;

const NAME_WIDTH: usize = 24;

pub fn transcript(table: &GradeTable, cgpa: Option<f64>) -> String {
    let scale = GradeScale::standard();
    let mut lines = vec![
        "CGPA Report".to_string(),
        row("Course", "Grade", "Points", "Credits"),
    ];

    for course in table.courses() {
        let (grade, points) = if course.grade.is_empty() {
            ("-", "-".to_string())
        } else {
            let points = scale.points(&course.grade).unwrap_or(0);
            (course.grade.as_str(), points.to_string())
        };
        lines.push(row(
            &course.name,
            grade,
            &points,
            &course.credit_hours.to_string(),
        ));
    }

    let tally = cgpa::tally(table);
    lines.push(match cgpa {
        Some(cgpa) => format!(
            "CGPA: {} ({} courses, {} credit hours)",
            format_cgpa(cgpa),
            tally.graded_courses,
            tally.credit_hours
        ),
        None => "CGPA: not available".to_string(),
    });
    lines.join("\n")
}

fn row(name: &str, grade: &str, points: &str, credits: &str) -> String {
    format!(
        "{:<width$} {:<6} {:>6} {:>7}",
        name,
        grade,
        points,
        credits,
        width = NAME_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_courses_and_result() {
        let table = GradeTable::from_json(
            r#"[{"id":"1","name":"Maths","grade":"O","creditHours":3},
                {"id":"2","name":"Physics","grade":"A","creditHours":4},
                {"id":"3","name":"Elective","grade":"","creditHours":3}]"#,
        )
        .unwrap();
        let report = transcript(&table, cgpa::compute(&table));
        let lines: Vec<_> = report.lines().collect();

        assert_eq!(lines[0], "CGPA Report");
        assert_eq!(lines.len(), 6);
        assert!(lines[2].starts_with("Maths "));
        assert!(lines[2].ends_with(" O          10       3"));
        assert!(lines[4].contains(" -           -       3"));
        assert_eq!(lines[5], "CGPA: 8.86 (2 courses, 7 credit hours)");
    }

    #[test]
    fn reports_missing_result() {
        let report = transcript(&GradeTable::defaults(), None);
        assert!(report.ends_with("CGPA: not available"));
        assert!(report.contains("Course 2"));
    }
}
