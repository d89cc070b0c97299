use crate::errors::AppError;
use crate::models::{CounterSample, DailyAggregate};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Redirect},
    Json,
};
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let days = state.store.query_daily().await?;
    Ok(Html(render_index(&days)))
}

pub async fn get_daily(
    State(state): State<AppState>,
) -> Result<Json<Vec<DailyAggregate>>, AppError> {
    Ok(Json(state.store.query_daily().await?))
}

/// Form action behind the dashboard button. A failed poll stores nothing and
/// falls through to a plain re-render.
pub async fn record(State(state): State<AppState>) -> Result<Redirect, AppError> {
    match state.fetcher.fetch().await {
        Ok(sample) => {
            state.store.append(sample.clone()).await?;
            info!("recorded counters at {}", sample.ts);
        }
        Err(err) => warn!("recording skipped: {err}"),
    }

    Ok(Redirect::to("/"))
}

pub async fn api_record(State(state): State<AppState>) -> Result<Json<CounterSample>, AppError> {
    let sample = state.fetcher.fetch().await?;
    state.store.append(sample.clone()).await?;
    info!("recorded counters at {}", sample.ts);
    Ok(Json(sample))
}

pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let days = state.store.query_daily().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"stats.csv\"",
            ),
        ],
        to_csv(&days),
    ))
}

fn to_csv(days: &[DailyAggregate]) -> String {
    let mut out =
        String::from("day,views,views_delta,likes,likes_delta,comments,comments_delta\n");
    for day in days {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            day.day,
            day.views,
            day.views_delta,
            day.likes,
            day.likes_delta,
            day.comments,
            day.comments_delta
        ));
    }
    out
}
