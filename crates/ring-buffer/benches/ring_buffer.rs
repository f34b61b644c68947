use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ring_buffer::RingBuffer;

fn bench_insert(c: &mut Criterion) {
    c.bench_function("insert_wrapping_1024", |b| {
        let mut buffer = RingBuffer::new(1024);
        let mut next = 0u64;
        b.iter(|| {
            buffer.insert(black_box(next));
            next = next.wrapping_add(1);
        });
    });
}

fn bench_access(c: &mut Criterion) {
    let mut buffer = RingBuffer::new(1024);
    buffer.extend(0..3000u64);

    c.bench_function("from_end_previous", |b| {
        b.iter(|| *buffer.from_end(black_box(1)));
    });

    c.bench_function("iter_sum_1024", |b| {
        b.iter(|| buffer.iter().sum::<u64>());
    });
}

criterion_group!(benches, bench_insert, bench_access);
criterion_main!(benches);
