use actix_web::{get, web, HttpResponse};
use askama::Template;
use serde::Deserialize;
use sqlx::PgPool;

use crate::{
    dal::insight_db::{self, QueryResult},
    domain::chart::ChartSpec,
    questions::{self, ScriptCatalog, CATALOG},
    routes::render,
};

struct CategoryView {
    name: &'static str,
    selected: bool,
}

struct QuestionView {
    label: &'static str,
    selected: bool,
}

#[derive(Template)]
#[template(path = "insights.html")]
struct InsightsTemplate {
    categories: Vec<CategoryView>,
    questions: Vec<QuestionView>,
    selected_question: String,
    sql_text: String,
    error: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    has_result: bool,
    chart_json: String,
    table_json: String,
}

#[derive(Deserialize)]
struct InsightsParams {
    category: Option<String>,
    question: Option<String>,
}

#[get("")]
async fn insights(
    pool: web::Data<PgPool>,
    script_catalog: web::Data<ScriptCatalog>,
    params: web::Query<InsightsParams>,
) -> HttpResponse {
    let selected_category = params
        .category
        .as_deref()
        .and_then(questions::find_category)
        .or_else(|| CATALOG.first())
        .map(|category| category.name)
        .unwrap_or_default();

    let mut page = InsightsTemplate {
        categories: CATALOG
            .iter()
            .map(|category| CategoryView {
                name: category.name,
                selected: category.name == selected_category,
            })
            .collect(),
        questions: questions::find_category(selected_category)
            .map(|category| {
                category
                    .questions
                    .iter()
                    .map(|question| QuestionView {
                        label: question.label,
                        selected: Some(question.label) == params.question.as_deref(),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        selected_question: params.question.clone().unwrap_or_default(),
        sql_text: String::new(),
        error: String::new(),
        columns: vec![],
        rows: vec![],
        has_result: false,
        chart_json: String::new(),
        table_json: String::new(),
    };

    let question = match params.question.as_deref().map(questions::find_question) {
        Some(Some(question)) => question,
        Some(None) => {
            page.error = format!(
                "Unknown question: {}",
                params.question.as_deref().unwrap_or_default()
            );
            return render(page);
        }
        None => return render(page),
    };

    let sql = match script_catalog.load(question.script) {
        Ok(sql) => sql,
        Err(e) => {
            page.error = format!("Failed to load SQL script {}: {}", question.script, e);
            return render(page);
        }
    };
    page.sql_text = sql.clone();

    match insight_db::run_query(&pool, &sql).await {
        Ok(result) => {
            page.has_result = !result.is_empty();
            fill_chart(&mut page, question.chart, &result);
            page.columns = result.columns;
            page.rows = result.rows;
        }
        Err(e) => page.error = format!("An error occurred: {}", e),
    }

    render(page)
}

fn fill_chart(page: &mut InsightsTemplate, chart: ChartSpec, result: &QueryResult) {
    if result.is_empty() {
        return;
    }
    match (
        serde_json::to_string(&chart),
        serde_json::to_string(result),
    ) {
        (Ok(chart_json), Ok(table_json)) => {
            page.chart_json = chart_json;
            page.table_json = table_json;
        }
        _ => log::error!("Failed to serialize chart payload"),
    }
}
