use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "info,tower_http=debug";

lazy_static! {
    static ref QUIZ_ROUNDS: IntCounterVec = register_int_counter_vec!(
        "quiz_questions_served_total",
        "Quiz rounds served, by candidate scope or `exhausted` when nothing was left",
        &["scope"]
    )
    .expect("quiz round counter registers once");
}

/// Counts one answered `POST /quizzes/` round.
pub fn record_quiz_round(outcome: &str) {
    QUIZ_ROUNDS.with_label_values(&[outcome]).inc();
}

pub fn quiz_rounds(outcome: &str) -> u64 {
    QUIZ_ROUNDS.with_label_values(&[outcome]).get()
}

/// `LOG_LEVEL` holds `EnvFilter` directives, `INCLUDE_SPAN_EVENTS=true` adds span enter/exit lines.
pub fn init_tracing() {
    let span_events = span_events(std::env::var("INCLUDE_SPAN_EVENTS").ok().as_deref());
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_span_events(span_events))
        .init();
}

fn span_events(flag: Option<&str>) -> FmtSpan {
    match flag {
        Some(value) if value.eq_ignore_ascii_case("true") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::NONE,
    }
}
