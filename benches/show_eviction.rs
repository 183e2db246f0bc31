// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the notification manager's hot path.
//!
//! Measures the performance of:
//! - `show` once the list is saturated (insert + tail eviction)
//! - `show` with several subscribers attached (snapshot fan-out)

use cnc_notify::config::NotificationConfig;
use cnc_notify::{NotificationManager, ToastOptions};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_manager() -> NotificationManager {
    NotificationManager::with_config(NotificationConfig {
        max_toasts: 5,
        // Zero duration keeps timers out of the measurement.
        default_duration_ms: 0,
        sound: false,
    })
}

/// Benchmark `show` against a saturated list, where every insertion evicts.
fn bench_show_with_eviction(c: &mut Criterion) {
    let manager = bench_manager();
    c.bench_function("show_with_eviction", |b| {
        b.iter(|| {
            let id = manager.show(ToastOptions::info("bench"));
            black_box(id);
        });
    });
}

/// Benchmark the snapshot broadcast with eight subscribers attached.
fn bench_show_fan_out(c: &mut Criterion) {
    let manager = bench_manager();
    let _subscriptions: Vec<_> = (0..8)
        .map(|_| {
            manager.subscribe(|snapshot| {
                black_box(snapshot.len());
            })
        })
        .collect();

    c.bench_function("show_fan_out_8_subscribers", |b| {
        b.iter(|| {
            let id = manager.show(ToastOptions::machine("bench").sound(false));
            black_box(id);
        });
    });
}

criterion_group!(benches, bench_show_with_eviction, bench_show_fan_out);
criterion_main!(benches);
