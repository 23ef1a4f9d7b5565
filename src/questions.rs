use std::path::PathBuf;

use crate::domain::chart::{ChartKind, ChartSpec};

/// A canned analytical question: a human-readable label, the SQL script
/// file that answers it, and the chart drawn from the result table.
///
/// The chart is declared here, next to the question, so picking a
/// visualization is a lookup rather than keyword-matching on the label.
pub struct Question {
    pub label: &'static str,
    pub script: &'static str,
    pub chart: ChartSpec,
}

pub struct Category {
    pub name: &'static str,
    pub questions: &'static [Question],
}

/// The fixed question catalog, grouped by category. Labels are part of
/// the external interface and must not be reworded.
pub const CATALOG: &[Category] = &[
    Category {
        name: "Book Availability",
        questions: &[Question {
            label: "Check Availability of eBooks vs Physical Books",
            script: "1.sql",
            chart: ChartSpec::new(
                ChartKind::Pie,
                0,
                1,
                "eBooks vs Physical Books Distribution",
            ),
        }],
    },
    Category {
        name: "Publishers",
        questions: &[
            Question {
                label: "Find the Publisher with the Most Books Published",
                script: "2.sql",
                chart: ChartSpec::new(
                    ChartKind::Bar,
                    0,
                    1,
                    "Publisher with the Most Books Published",
                ),
            },
            Question {
                label: "Identify the Publisher with the Highest Average Rating",
                script: "3.sql",
                chart: ChartSpec::new(
                    ChartKind::Bar,
                    0,
                    1,
                    "Publisher with the Highest Average Rating",
                ),
            },
            Question {
                label: "Publisher with Highest Average Rating (More than 10 Books)",
                script: "20.sql",
                chart: ChartSpec::new(
                    ChartKind::Bar,
                    0,
                    1,
                    "Publisher with the Highest Average Rating (More than 10 Books)",
                ),
            },
        ],
    },
    Category {
        name: "Book Prices and Discounts",
        questions: &[
            Question {
                label: "Get the Top 5 Most Expensive Books by Retail Price",
                script: "4.sql",
                chart: ChartSpec::new(ChartKind::Bar, 0, 1, "Top 5 Most Expensive Books"),
            },
            Question {
                label: "List Books with Discounts Greater than 20%",
                script: "6.sql",
                chart: ChartSpec::new(
                    ChartKind::Bar,
                    0,
                    2,
                    "Books with Discounts Greater than 20%",
                ),
            },
            Question {
                label: "Year with the Highest Average Book Price",
                script: "15.sql",
                chart: ChartSpec::new(
                    ChartKind::Line,
                    0,
                    1,
                    "Year with the Highest Average Book Price",
                ),
            },
            Question {
                label: "Average Retail Price of eBooks and Physical Books",
                script: "18.sql",
                chart: ChartSpec::new(
                    ChartKind::Bar,
                    0,
                    1,
                    "Average Retail Price of eBooks vs Physical Books",
                ),
            },
        ],
    },
    Category {
        name: "Book Details and Ratings",
        questions: &[
            Question {
                label: "Find Books Published After 2010 with at Least 500 Pages",
                script: "5.sql",
                chart: ChartSpec::new(
                    ChartKind::Scatter,
                    2,
                    1,
                    "Books Published After 2010 with at Least 500 Pages",
                ),
            },
            Question {
                label: "Books with Ratings Count Greater Than the Average",
                script: "12.sql",
                chart: ChartSpec::new(
                    ChartKind::Bar,
                    0,
                    1,
                    "Books with Ratings Count Greater Than the Average",
                ),
            },
            Question {
                label: "Books with Average Rating 2 Standard Deviations Away",
                script: "19.sql",
                chart: ChartSpec::new(ChartKind::Scatter, 1, 2, "Books with Outlier Ratings"),
            },
        ],
    },
    Category {
        name: "Authors",
        questions: &[
            Question {
                label: "Find the Top 3 Authors with the Most Books",
                script: "8.sql",
                chart: ChartSpec::new(ChartKind::Bar, 0, 1, "Top 3 Authors with the Most Books"),
            },
            Question {
                label: "Count Authors Who Published 3 Consecutive Years",
                script: "16.sql",
                chart: ChartSpec::new(
                    ChartKind::Bar,
                    0,
                    1,
                    "Authors Who Published in Consecutive Years",
                ),
            },
            Question {
                label: "Authors Who Published in the Same Year but Different Publishers",
                script: "17.sql",
                chart: ChartSpec::new(
                    ChartKind::Bar,
                    1,
                    2,
                    "Authors Publishing in the Same Year Under Different Publishers",
                )
                .with_color(0),
            },
        ],
    },
    Category {
        name: "Categories and Page Count",
        questions: &[
            Question {
                label: "Find the Average Page Count for eBooks vs Physical Books",
                script: "7.sql",
                chart: ChartSpec::new(
                    ChartKind::Box,
                    0,
                    1,
                    "Average Page Count for eBooks vs Physical Books",
                ),
            },
            Question {
                label: "Find the Average Page Count for Each Category",
                script: "10.sql",
                chart: ChartSpec::new(
                    ChartKind::Bar,
                    0,
                    1,
                    "Average Page Count for Each Category",
                ),
            },
        ],
    },
    Category {
        name: "Miscellaneous",
        questions: &[
            Question {
                label: "Retrieve Books with More than 3 Authors",
                script: "11.sql",
                chart: ChartSpec::new(ChartKind::Bar, 0, 1, "Books with More than 3 Authors"),
            },
            Question {
                label: "Books with a Specific Keyword in the Title",
                script: "14.sql",
                chart: ChartSpec::bar_x_only(0, "Books with a Specific Keyword in the Title"),
            },
            Question {
                label: "Books with the Same Author Published in the Same Year",
                script: "13.sql",
                chart: ChartSpec::new(
                    ChartKind::Bar,
                    0,
                    2,
                    "Books with the Same Author Published in the Same Year",
                ),
            },
            Question {
                label: "List Publishers with More than 10 Books",
                script: "9.sql",
                chart: ChartSpec::new(ChartKind::Bar, 0, 1, "Publishers with More than 10 Books"),
            },
        ],
    },
];

pub fn find_category(name: &str) -> Option<&'static Category> {
    CATALOG.iter().find(|category| category.name == name)
}

pub fn find_question(label: &str) -> Option<&'static Question> {
    CATALOG
        .iter()
        .flat_map(|category| category.questions.iter())
        .find(|question| question.label == label)
}

/// Chart for a question label, falling back to the generic bar chart for
/// labels outside the catalog (ad hoc queries).
pub fn chart_for_label(label: &str) -> ChartSpec {
    find_question(label)
        .map(|question| question.chart)
        .unwrap_or_default()
}

/// Loads canned SQL scripts verbatim from the scripts directory.
#[derive(Clone)]
pub struct ScriptCatalog {
    dir: PathBuf,
}

impl ScriptCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn load(&self, script: &str) -> std::io::Result<String> {
        std::fs::read_to_string(self.dir.join(script))
    }
}
