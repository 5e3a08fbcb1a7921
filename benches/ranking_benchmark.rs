use chrono::{NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stridelog::models::challenge::{Challenge, ChallengeType, Participation};
use stridelog::models::StepLog;
use stridelog::services::buckets::{bucket_records, Granularity};
use stridelog::services::leaderboard::{compute_leaderboard, ParticipantHistory};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn synthetic_participants(count: u32) -> Vec<(Participation, ParticipantHistory)> {
    (0..count)
        .map(|i| {
            let user_id = format!("user{i}");
            let participation = Participation {
                user_id: user_id.clone(),
                challenge_id: 1,
                joined_at: Utc
                    .with_ymd_and_hms(2025, 6, 1 + (i % 28), 8, 0, 0)
                    .unwrap(),
            };
            // 30 daily step logs with deterministic pseudo-variation.
            let step_logs = (0..30)
                .map(|day| StepLog {
                    user_id: user_id.clone(),
                    date: date(2025, 6, 1 + day % 30),
                    steps: (i * 131 + day * 977) % 15_000,
                })
                .collect();
            let history = ParticipantHistory {
                step_logs,
                ..Default::default()
            };
            (participation, history)
        })
        .collect()
}

fn benchmark_leaderboard(c: &mut Criterion) {
    let challenge = Challenge {
        id: 1,
        name: "June steps".to_string(),
        challenge_type: ChallengeType::Steps,
        goal_value: 300_000.0,
        start_date: date(2025, 6, 1),
        end_date: date(2025, 6, 30),
    };

    let mut group = c.benchmark_group("leaderboard");
    for size in [10u32, 100, 1000] {
        let participants = synthetic_participants(size);
        group.bench_function(format!("rank_{size}_participants"), |b| {
            b.iter(|| {
                compute_leaderboard(black_box(&challenge), black_box(participants.clone()))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn benchmark_bucketing(c: &mut Criterion) {
    // A year of per-day records for one heavy user.
    let records: Vec<(NaiveDate, f64)> = (0..365u32)
        .map(|i| {
            let d = date(2025, 1, 1) + chrono::Days::new(u64::from(i));
            (d, f64::from(i % 40) * 12.5)
        })
        .collect();

    let mut group = c.benchmark_group("bucketing");
    group.bench_function("bucket_365_days_by_day", |b| {
        b.iter(|| bucket_records(black_box(&records), Granularity::Day, |r| r.0, |r| r.1))
    });
    group.bench_function("bucket_365_days_by_week", |b| {
        b.iter(|| bucket_records(black_box(&records), Granularity::Week, |r| r.0, |r| r.1))
    });
    group.finish();
}

criterion_group!(benches, benchmark_leaderboard, benchmark_bucketing);
criterion_main!(benches);
