use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use pc_core::types::{CorpusMatch, FileFormat, InternalMatch};
use pc_server::routes::sanitize_filename;
use pc_server::state::{FileRecord, RecordStore};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn generate_record(rng: &mut StdRng, i: usize) -> FileRecord {
    let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    FileRecord {
        id: format!("{i:08x}-{:08x}", rng.gen::<u32>()),
        original_filename: format!("essay {i}.txt"),
        stored_filename: format!("{i:08x}_essay_{i}.txt"),
        file_type: "txt".to_string(),
        upload_date: base + Duration::seconds(rng.gen_range(0..86_400 * 30)),
        internal_plagiarism: vec![InternalMatch {
            paragraph1: "first paragraph".to_string(),
            paragraph2: "first paragraph again".to_string(),
            similarity: 91.3,
        }],
        online_plagiarism: Vec::new(),
        against_results: vec![CorpusMatch {
            document_id: format!("uploads/{i:08x}_other.txt").into(),
            plagiarism_percentage: 88.0,
            matched_paragraphs: 2,
        }],
    }
}

fn generate_records(n: usize) -> Vec<FileRecord> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..n).map(|i| generate_record(&mut rng, i)).collect()
}

fn bench_record_store(c: &mut Criterion) {
    let records = generate_records(1000);

    c.bench_function("record_store_insert_1000", |b| {
        b.iter_batched(
            || records.clone(),
            |records| {
                let store = RecordStore::new();
                for record in records {
                    store.insert(record);
                }
                black_box(store.count())
            },
            BatchSize::SmallInput,
        )
    });

    let store = RecordStore::new();
    for record in records.iter().cloned() {
        store.insert(record);
    }
    let lookup_id = records[500].id.clone();
    c.bench_function("record_store_list_1000", |b| b.iter(|| black_box(store.list())));
    c.bench_function("record_store_get", |b| b.iter(|| black_box(store.get(black_box(&lookup_id)))));
}

fn bench_sanitize(c: &mut Criterion) {
    let names = [
        "report-v2_final.pdf",
        "My Essay (final draft).docx",
        "đạo văn học kỳ 2.txt",
        "../../uploads/..hidden.txt",
    ];
    let formats = [FileFormat::Pdf, FileFormat::Docx, FileFormat::Text, FileFormat::Text];
    c.bench_function("sanitize_filename", |b| {
        b.iter(|| {
            for (name, format) in names.iter().zip(formats) {
                black_box(sanitize_filename(black_box(name), format));
            }
        })
    });
}

criterion_group!(benches, bench_record_store, bench_sanitize);
criterion_main!(benches);
