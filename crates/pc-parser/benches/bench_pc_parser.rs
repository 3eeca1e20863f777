use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pc_parser::{DocumentParser, ParagraphSegmenter, TextParser};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};

fn generate_text(size_kb: usize) -> String {
    let sentences = [
        "The quick brown fox jumps over the lazy dog.",
        "Plagiarism detection compares paragraphs character by character.",
        "Rust offers memory safety without garbage collection.",
        "Students are expected to cite every source they rely on.",
        "This is a longer sentence that contains more words and gives the segmenter and parser some realistic paragraph lengths to work with.",
    ];
    let mut rng = StdRng::seed_from_u64(7);
    let mut text = String::with_capacity(size_kb * 1024);
    let mut i = 0;
    while text.len() < size_kb * 1024 {
        text.push_str(sentences.choose(&mut rng).unwrap());
        text.push(' ');
        if i % 5 == 4 { text.push_str("\r\n\r\n"); }
        i += 1;
    }
    text
}

fn bench_text_parser(c: &mut Criterion) {
    let parser = TextParser::new();
    let text_100k = generate_text(100);

    c.bench_function("text_parse_100kb", |b| {
        b.iter(|| black_box(parser.parse_bytes(black_box(text_100k.as_bytes())).unwrap()))
    });
}

fn bench_segmenter(c: &mut Criterion) {
    let text_10k = TextParser::new().parse_bytes(generate_text(10).as_bytes()).unwrap();
    let text_100k = TextParser::new().parse_bytes(generate_text(100).as_bytes()).unwrap();
    let bounded = ParagraphSegmenter::default();

    c.bench_function("segment_10kb", |b| {
        b.iter(|| black_box(bounded.segment(black_box(&text_10k))))
    });
    c.bench_function("segment_count_100kb", |b| {
        b.iter(|| black_box(bounded.count(black_box(&text_100k))))
    });
}

criterion_group!(benches, bench_text_parser, bench_segmenter);
criterion_main!(benches);
