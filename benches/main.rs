use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dev_helpers::Harmonics;
use micro_period::PeriodDetector;

fn run_detector_benchmark(id: &str, c: &mut Criterion, lowest_frequency: f32, highest_frequency: f32) {
    let sample_rate = 44100.0;
    let mut detector =
        PeriodDetector::new(lowest_frequency, highest_frequency, sample_rate, -60.0).unwrap();
    let input_buffer = Harmonics::default().generate(220.0, sample_rate, 0.1);

    c.bench_function(id, |b| {
        b.iter(|| {
            for sample in input_buffer.iter() {
                detector.process(black_box(*sample));
            }
            detector.first()
        })
    });
}

fn detector_benchmarks(c: &mut Criterion) {
    run_detector_benchmark("100 ms, 100-400 Hz", c, 100.0, 400.0);
    run_detector_benchmark("100 ms, 80-1000 Hz", c, 80.0, 1000.0);
    run_detector_benchmark("100 ms, 50-2000 Hz", c, 50.0, 2000.0);
}

criterion_group!(benches, detector_benchmarks);
criterion_main!(benches);
