use enclose::enc;
use seed::{prelude::*, *};

pub mod calculator;
pub mod cgpa;
pub mod course;
pub mod grade;
pub mod report;
pub mod storage;
pub mod util;

use calculator::{CalcMode, Calculator};
use cgpa::{format_cgpa, Tally};
use course::{Course, CourseId, CourseUpdate, GradeTable, CREDIT_HOURS_HINT};
use grade::GradeScale;
use storage::LocalStore;

// ------ ------
//     Model
// ------ ------

struct Model {
    calculator: Calculator<LocalStore>,
    report: Option<String>,
    theme: Theme,
}

#[derive(Clone, Copy, PartialEq)]
enum Theme {
    Light,
    Dark,
}

// ------ ------
//     Init
// ------ ------

fn init(_: Url, _: &mut impl Orders<Msg>) -> Model {
    let calculator = Calculator::restore(LocalStore, |err| {
        error!("Discarding saved courses:", err.to_string());
    });

    Model {
        calculator,
        report: None,
        theme: Theme::Light,
    }
}

// ------ ------
//    Update
// ------ ------

enum Msg {
    AddCourse,
    RemoveCourse(CourseId),
    UpdateCourse(CourseId, CourseUpdate),

    ToggleAutoCalculate,
    CalculateNow,
    SaveNow,

    ExportReport,
    CloseReport,

    ToggleTheme,
}

fn update(msg: Msg, model: &mut Model, _: &mut impl Orders<Msg>) {
    let calculator = &mut model.calculator;
    let saved = match msg {
        Msg::AddCourse => calculator.add_course().map(|_| ()),
        Msg::RemoveCourse(course_id) => calculator.remove_course(&course_id).map(|_| ()),
        Msg::UpdateCourse(course_id, update) => {
            calculator.update_course(&course_id, update).map(|_| ())
        }

        Msg::ToggleAutoCalculate => {
            calculator.toggle_auto();
            Ok(())
        }
        Msg::CalculateNow => {
            calculator.calculate_now();
            Ok(())
        }
        Msg::SaveNow => calculator.save_now(),

        Msg::ExportReport => {
            model.report = Some(report::transcript(calculator.table(), calculator.cgpa()));
            Ok(())
        }
        Msg::CloseReport => {
            model.report = None;
            Ok(())
        }

        Msg::ToggleTheme => {
            model.theme = match model.theme {
                Theme::Light => Theme::Dark,
                Theme::Dark => Theme::Light,
            };
            Ok(())
        }
    };

    if let Err(err) = saved {
        error!("Failed to save courses:", err.to_string());
    }
}

// ------ ------
//     View
// ------ ------

fn view(model: &Model) -> Node<Msg> {
    let calculator = &model.calculator;
    div![
        C!["cgpa-calculator", IF!(model.theme == Theme::Dark => "dark")],
        view_header(),
        view_toolbar(calculator.mode(), model.theme),
        view_courses(calculator.table()),
        view_actions(calculator.mode()),
        calculator
            .cgpa()
            .map(|cgpa| view_result(cgpa, calculator.tally())),
        model.report.as_ref().map(|report| view_report(report)),
        view_legend(),
    ]
}

// ------ header ------

fn view_header() -> Node<Msg> {
    header![
        C!["header"],
        h1!["CGPA Calculator"],
        p!["Calculate your Cumulative Grade Point Average based on Anna University 2021 grade system"],
    ]
}

fn view_toolbar(mode: CalcMode, theme: Theme) -> Node<Msg> {
    div![
        C!["toolbar"],
        label![
            input![
                attrs! {
                    At::Id => "auto-calculate";
                    At::Type => "checkbox";
                    At::Checked => (mode == CalcMode::Auto).as_at_value();
                },
                ev(Ev::Change, |_| Msg::ToggleAutoCalculate),
            ],
            "Auto-calculate",
        ],
        button![
            C!["toggle-theme"],
            ev(Ev::Click, |_| Msg::ToggleTheme),
            match theme {
                Theme::Light => "Dark",
                Theme::Dark => "Light",
            },
        ],
    ]
}

// ------ courses ------

fn view_courses(table: &GradeTable) -> Node<Msg> {
    let removable = table.can_remove();
    section![
        C!["main"],
        h2!["Course Information"],
        ul![
            C!["course-list"],
            table
                .iter()
                .map(|(course_id, course)| view_course(course_id, course, removable)),
        ]
    ]
}

fn view_course(course_id: &CourseId, course: &Course, removable: bool) -> Node<Msg> {
    let (min_hours, max_hours) = CREDIT_HOURS_HINT;

    li![
        el_key(course_id),
        C!["course", IF!(course.is_graded() => "graded")],
        input![
            C!["course-name"],
            attrs! {
                At::Value => course.name;
                At::Placeholder => "Enter course name";
            },
            input_ev(
                Ev::Input,
                enc!((course_id) move |name| Msg::UpdateCourse(course_id, CourseUpdate::Name(name)))
            ),
        ],
        select![
            C!["course-grade"],
            option![
                attrs! {
                    At::Value => "";
                    At::Selected => course.grade.is_empty().as_at_value();
                },
                "Select grade",
            ],
            GradeScale::standard().iter().map(|(symbol, points)| {
                option![
                    attrs! {
                        At::Value => symbol;
                        At::Selected => (course.grade == symbol).as_at_value();
                    },
                    format!("{} ({})", symbol, points),
                ]
            }),
            input_ev(
                Ev::Change,
                enc!((course_id) move |grade| Msg::UpdateCourse(course_id, CourseUpdate::Grade(grade)))
            ),
        ],
        input![
            C!["course-credits"],
            attrs! {
                At::Type => "number";
                At::Min => min_hours.to_string();
                At::Max => max_hours.to_string();
                At::Value => course.credit_hours.to_string();
            },
            input_ev(
                Ev::Input,
                enc!((course_id) move |hours| Msg::UpdateCourse(
                    course_id,
                    CourseUpdate::CreditHours(util::parse_credit_hours(&hours))
                ))
            ),
        ],
        button![
            C!["destroy"],
            attrs! {At::Disabled => (!removable).as_at_value()},
            ev(
                Ev::Click,
                enc!((course_id) move |_| Msg::RemoveCourse(course_id))
            ),
        ],
    ]
}

fn view_actions(mode: CalcMode) -> Node<Msg> {
    div![
        C!["actions"],
        button![ev(Ev::Click, |_| Msg::AddCourse), "Add Course"],
        button![
            attrs! {At::Disabled => (mode == CalcMode::Auto).as_at_value()},
            ev(Ev::Click, |_| Msg::CalculateNow),
            "Calculate CGPA"
        ],
        button![ev(Ev::Click, |_| Msg::SaveNow), "Save"],
        button![ev(Ev::Click, |_| Msg::ExportReport), "Export"],
    ]
}

// ------ result ------

fn view_result(cgpa: f64, tally: Tally) -> Node<Msg> {
    section![
        C!["result"],
        h3!["Your CGPA"],
        div![C!["cgpa"], format_cgpa(cgpa)],
        p![format!(
            "Based on {} courses with a total of {} credit hours",
            tally.graded_courses, tally.credit_hours
        )],
    ]
}

fn view_report(report: &str) -> Node<Msg> {
    section![
        C!["report"],
        pre![report],
        button![ev(Ev::Click, |_| Msg::CloseReport), "Close"],
    ]
}

// ------ footer ------

fn view_legend() -> Node<Msg> {
    footer![
        C!["footer"],
        strong!["Grade System: "],
        GradeScale::standard().legend(),
    ]
}

// ------ ------
//     Start
// ------ ------

#[wasm_bindgen(start)]
pub fn start() {
    App::start("app", init, update, view);
}
