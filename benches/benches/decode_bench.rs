//! Бенчмарки декодера логов эхолота.
//!
//! Запуск: cargo bench -p sonar-benchmark --bench decode_bench

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sonar_core::{decode_frames, decode_log, index_frames, parse};
use sonar_export::DataExporter;
use sonar_types::{FormatVariant, FILE_HEADER_SIZE};

/// Синтетический лог: `frames` кадров, каждый четвёртый из вторичного канала.
fn synthetic_log(
    variant: FormatVariant,
    frames: usize,
    signal_len: usize,
) -> Vec<u8> {
    let l = variant.layout();
    let size = (l.header_size + signal_len) as u16;
    let mut raw = Vec::with_capacity(FILE_HEADER_SIZE + frames * size as usize);
    raw.extend_from_slice(&[0u8; FILE_HEADER_SIZE]);

    for i in 0..frames {
        let mut frame = vec![0u8; size as usize];
        let channel: u16 = if i % 4 == 3 { 1 } else { 0 };

        frame[l.frame_size..l.frame_size + 2].copy_from_slice(&size.to_le_bytes());
        frame[l.survey_type..l.survey_type + 2].copy_from_slice(&channel.to_le_bytes());
        frame[l.max_range..l.max_range + 4].copy_from_slice(&120.0f32.to_le_bytes());
        frame[l.water_depth..l.water_depth + 4]
            .copy_from_slice(&(15.0 + (i % 50) as f32).to_le_bytes());
        frame[l.x..l.x + 4].copy_from_slice(&(1_300_000 + i as i32).to_le_bytes());
        frame[l.y..l.y + 4].copy_from_slice(&(8_000_000 + i as i32).to_le_bytes());
        frame[l.time_offset..l.time_offset + 4].copy_from_slice(&(i as u32 * 40).to_le_bytes());

        for (j, b) in frame[l.header_size..].iter_mut().enumerate() {
            *b = ((i + j) % 251) as u8;
        }

        raw.extend_from_slice(&frame);
    }

    raw
}

// ============================================================================
// Разбор
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for frames in [100usize, 1_000, 10_000] {
        for variant in FormatVariant::ALL {
            let raw = synthetic_log(variant, frames, 1_024);

            group.throughput(Throughput::Bytes(raw.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("variant_{variant}"), frames),
                &raw,
                |b, raw| b.iter(|| parse(black_box(raw), variant)),
            );
        }
    }

    group.finish();
}

fn bench_index_then_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_then_decode");
    let raw = synthetic_log(FormatVariant::B, 5_000, 1_024);

    group.throughput(Throughput::Elements(5_000));

    group.bench_function("index_frames", |b| {
        b.iter(|| index_frames(black_box(&raw), FormatVariant::B))
    });

    let index = index_frames(&raw, FormatVariant::B);

    group.bench_function("decode_frames", |b| {
        b.iter(|| decode_frames(black_box(&raw), FormatVariant::B, 0, &index))
    });

    group.bench_function("decode_log", |b| {
        b.iter(|| decode_log(black_box(&raw), FormatVariant::B))
    });

    group.finish();
}

// ============================================================================
// Экспорт
// ============================================================================

fn bench_csv_export(c: &mut Criterion) {
    let raw = synthetic_log(FormatVariant::B, 5_000, 512);
    let records = parse(&raw, FormatVariant::B).unwrap_or_default();
    let mut out = Vec::with_capacity(records.len() * 128);

    c.bench_function("write_csv_5000", |b| {
        b.iter(|| {
            out.clear();
            DataExporter::write_csv(black_box(&records), &mut out)
        })
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_index_then_decode,
    bench_csv_export
);
criterion_main!(benches);
