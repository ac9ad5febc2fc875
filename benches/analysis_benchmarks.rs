//! Performance benchmarks for the Attendance Engine.
//!
//! - Classification of a single person-day
//! - Aggregation over a month of records for growing head counts
//! - One `/analyze` round trip through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use attendance_engine::analysis::{NoopObserver, ShiftCalendar, aggregate, classify};
use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;
use attendance_engine::models::{AttendanceRecord, EarlyLeavePolicy, HolidaySet, ShiftPeriod};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config").expect("Failed to load config");
    AppState::new(config)
}

fn march_2024() -> ShiftCalendar {
    let period = ShiftPeriod::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
    )
    .unwrap();
    ShiftCalendar::new(vec![period], HolidaySet::new()).unwrap()
}

/// One record per person per weekday in March 2024, with a late arrival
/// every fifth day and a missing day every seventh.
fn create_records(persons: usize) -> Vec<AttendanceRecord> {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let mut records = Vec::new();
    for p in 0..persons {
        for offset in 0..31 {
            let date = start + Duration::days(offset);
            if date.weekday() == Weekday::Sun || (offset as usize + p) % 7 == 0 {
                continue;
            }
            let clock_in = if (offset as usize + p) % 5 == 0 { "09:20" } else { "08:55" };
            records.push(AttendanceRecord::new(
                format!("Employee {:04}", p),
                date,
                clock_in,
                "17:05",
            ));
        }
    }
    records
}

fn create_request_body(persons: usize) -> String {
    let rows: Vec<serde_json::Value> = create_records(persons)
        .iter()
        .map(|r| {
            serde_json::json!([
                r.person,
                r.date.format("%d/%m/%Y").to_string(),
                r.clock_in,
                r.clock_out
            ])
        })
        .collect();

    serde_json::json!({
        "columns": ["Employee Name", "Date", "Clock In", "Clock Out"],
        "rows": rows,
        "rules": {
            "shift_periods": [{
                "start": "2024-03-01",
                "end": "2024-03-31",
                "check_in": "09:00",
                "check_out": "17:00",
                "friday_check_out": "13:00"
            }],
            "holidays": "2024-03-11"
        }
    })
    .to_string()
}

fn bench_classify(c: &mut Criterion) {
    let t = |h, m| NaiveTime::from_hms_opt(h, m, 0);
    let required_in = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
    let required_out = NaiveTime::from_hms_opt(17, 0, 0).unwrap();

    c.bench_function("classify_person_day", |b| {
        b.iter(|| {
            classify(
                black_box(t(9, 12)),
                black_box(t(16, 40)),
                black_box(required_in),
                black_box(required_out),
            )
        })
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let calendar = march_2024();
    let mut group = c.benchmark_group("aggregate_month");

    for persons in [10, 100, 1000] {
        let records = create_records(persons);
        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(persons), &records, |b, records| {
            b.iter(|| {
                aggregate(
                    black_box(records),
                    &calendar,
                    EarlyLeavePolicy::Strict,
                    &mut NoopObserver,
                )
            })
        });
    }

    group.finish();
}

fn bench_analyze_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = create_request_body(50);

    c.bench_function("analyze_endpoint_50_persons", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/analyze")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(benches, bench_classify, bench_aggregate, bench_analyze_endpoint);
criterion_main!(benches);
