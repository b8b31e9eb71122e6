use crate::course::GradeTable;
use crate::grade::GradeScale;

/// Credit-weighted average of the graded courses, or `None` when nothing is
/// graded yet.
///
/// Ungraded courses and courses with zero credit hours are left out entirely.
/// A grade missing from the scale counts as zero points but still carries its
/// credit hours.
pub fn compute(table: &GradeTable) -> Option<f64> {
    let scale = GradeScale::standard();
    let (points, hours) = table
        .courses()
        .filter(|course| course.is_graded())
        .fold((0u64, 0u64), |(points, hours), course| {
            let grade_points = scale.points(&course.grade).unwrap_or(0);
            let credit_hours = u64::from(course.credit_hours);
            (
                points + u64::from(grade_points) * credit_hours,
                hours + credit_hours,
            )
        });

    if hours == 0 {
        None
    } else {
        Some(points as f64 / hours as f64)
    }
}

/// What the result panel reports next to the CGPA.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub graded_courses: usize,
    pub credit_hours: u32,
}

pub fn tally(table: &GradeTable) -> Tally {
    table
        .courses()
        .filter(|course| course.is_graded())
        .fold(Tally::default(), |tally, course| Tally {
            graded_courses: tally.graded_courses + 1,
            credit_hours: tally.credit_hours.saturating_add(course.credit_hours),
        })
}

pub fn format_cgpa(cgpa: f64) -> String {
    format!("{:.2}", cgpa)
}
