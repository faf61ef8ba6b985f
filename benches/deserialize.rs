use criterion::{criterion_group, criterion_main, Criterion};
use steam_mobileconf::{filter_by_type, Confirmation};

fn criterion_benchmark(c: &mut Criterion) {
    let getlist: serde_json::Value = serde_json::from_slice(include_bytes!("../src/response/fixtures/getlist.json")).unwrap();
    let conf_bytes = serde_json::to_vec(&getlist["conf"]).unwrap();
    
    c.bench_function("deserializes confirmations", |b| b.iter(|| {
        serde_json::from_slice::<Vec<Confirmation>>(&conf_bytes).ok();
    }));
    
    let confirmations = serde_json::from_slice::<Vec<Confirmation>>(&conf_bytes).unwrap();
    
    c.bench_function("filters trade offers", |b| b.iter(|| {
        filter_by_type(confirmations.clone(), Confirmation::TRADE_OFFER)
    }));
}

criterion_group!{
    name = benches;
    config = Criterion::default().sample_size(100);
    targets = criterion_benchmark
}

criterion_main!(benches);
