use indexmap::IndexMap;
use std::sync::OnceLock;

// Anna University 2021 regulations.
const ANNA_2021: [(&str, u32); 9] = [
    ("O", 10),
    ("A+", 9),
    ("A", 8),
    ("B+", 7),
    ("B", 6),
    ("C", 5),
    ("RA", 0),
    ("SA", 0),
    ("W", 0),
];

/// Grade symbols and the points each one is worth, in the order they are
/// offered to the user.
#[derive(Debug)]
pub struct GradeScale {
    points: IndexMap<&'static str, u32>,
}

impl GradeScale {
    pub fn standard() -> &'static GradeScale {
        static SCALE: OnceLock<GradeScale> = OnceLock::new();
        SCALE.get_or_init(|| GradeScale {
            points: ANNA_2021.iter().copied().collect(),
        })
    }

    pub fn points(&self, symbol: &str) -> Option<u32> {
        self.points.get(symbol).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        self.points.iter().map(|(symbol, points)| (*symbol, *points))
    }

    /// `O (10), A+ (9), ...` for the help line under the table.
    pub fn legend(&self) -> String {
        self.iter()
            .map(|(symbol, points)| format!("{} ({})", symbol, points))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
