// ABOUTME: Criterion benchmarks for report aggregation
// ABOUTME: Measures full report assembly and KPI derivation over growing histories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the aggregation engine.
//!
//! Histories span the window and its preceding window so the mileage change
//! path is exercised as well.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

mod common;

use common::fixtures::{
    end_date, generate_activities, generate_readiness, generate_sleep, HistoryLength,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use marathon_dashboard::intelligence::aggregate;
use marathon_dashboard::intelligence::kpi::compute_kpis;
use marathon_dashboard::intelligence::normalize::{summarize_activity, summarize_readiness, summarize_sleep};
use marathon_dashboard::models::ReportWindow;

const HISTORIES: [HistoryLength; 3] = [HistoryLength::Week, HistoryLength::Quarter, HistoryLength::Year];

/// Benchmark the whole report for windows of increasing length
fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for history in HISTORIES {
        let days = history.days();
        let window = ReportWindow::ending_on(end_date(), days).unwrap();
        let activities = generate_activities(days);
        let sleep = generate_sleep(days);
        let readiness = generate_readiness(days);

        group.throughput(Throughput::Elements(activities.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("report", history.name()),
            &(activities, sleep, readiness),
            |b, (activities, sleep, readiness)| {
                b.iter(|| {
                    aggregate(
                        black_box(activities),
                        black_box(sleep),
                        black_box(readiness),
                        black_box(&window),
                    )
                });
            },
        );
    }

    group.finish();
}

/// Benchmark KPI derivation on already-normalized summaries
fn bench_compute_kpis(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_kpis");

    for history in HISTORIES {
        let days = history.days();
        let activities: Vec<_> = generate_activities(days)
            .iter()
            .filter(|activity| activity.is_run())
            .map(summarize_activity)
            .collect();
        let sleep: Vec<_> = generate_sleep(days).iter().map(summarize_sleep).collect();
        let readiness: Vec<_> = generate_readiness(days)
            .iter()
            .map(summarize_readiness)
            .collect();

        group.bench_function(history.name(), |b| {
            b.iter(|| {
                compute_kpis(
                    black_box(&activities),
                    black_box(120.0),
                    black_box(&sleep),
                    black_box(&readiness),
                    days,
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_compute_kpis);
criterion_main!(benches);
