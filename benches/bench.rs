// Criterion benchmarks for Fare Predictor

use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use fare_predictor::core::{encode_itinerary, inverse_log_fare, RouteMapper};
use fare_predictor::models::{Airline, City, ItineraryInput, Stops, TimeOfDay, TravelClass, FEATURE_COUNT};
use fare_predictor::services::{load_artifact, FareRegressor};
use serde_json::json;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn create_itinerary() -> ItineraryInput {
    ItineraryInput {
        airline: Airline::Vistara,
        source_city: City::Delhi,
        destination_city: City::Bangalore,
        departure_time: TimeOfDay::Evening,
        arrival_time: TimeOfDay::Night,
        stops: Stops::One,
        travel_class: TravelClass::Economy,
        duration_hours: 6.5,
        departure_date: today().checked_add_days(Days::new(21)).unwrap(),
    }
}

// Complete binary tree of the given depth alternating over the first features
fn create_tree(depth: u32) -> serde_json::Value {
    let internal = (1usize << depth) - 1;
    let total = (1usize << (depth + 1)) - 1;
    let mut left = Vec::with_capacity(total);
    let mut right = Vec::with_capacity(total);
    let mut feature = Vec::with_capacity(total);
    let mut threshold = Vec::with_capacity(total);
    let mut value = Vec::with_capacity(total);

    for node in 0..total {
        if node < internal {
            left.push((2 * node + 1) as i64);
            right.push((2 * node + 2) as i64);
            feature.push((node % 6) as i64);
            threshold.push(1.5);
        } else {
            left.push(-1);
            right.push(-1);
            feature.push(-2);
            threshold.push(-2.0);
        }
        value.push(8.0 + (node % 7) as f64 * 0.1);
    }

    json!({
        "children_left": left,
        "children_right": right,
        "feature": feature,
        "threshold": threshold,
        "value": value
    })
}

fn bench_encode_itinerary(c: &mut Criterion) {
    let input = create_itinerary();
    c.bench_function("encode_itinerary", |b| {
        b.iter(|| encode_itinerary(black_box(&input), black_box(today())))
    });
}

fn bench_route_map(c: &mut Criterion) {
    let mapper = RouteMapper::default();
    c.bench_function("route_map", |b| {
        b.iter(|| mapper.build(black_box(City::Kolkata), black_box(City::Mumbai)))
    });
}

fn bench_forest_inference(c: &mut Criterion) {
    let features = encode_itinerary(&create_itinerary(), today()).unwrap();
    let mut group = c.benchmark_group("forest_inference");

    for tree_count in [10, 100, 300].iter() {
        let artifact = json!({
            "kind": "random_forest",
            "n_features": FEATURE_COUNT,
            "trees": (0..*tree_count).map(|_| create_tree(12)).collect::<Vec<_>>()
        });
        let model = load_artifact(artifact.to_string().as_bytes()).unwrap();

        group.bench_with_input(
            BenchmarkId::new("predict", tree_count),
            tree_count,
            |b, _| {
                b.iter(|| {
                    let raw = model.predict(black_box(&features)).unwrap();
                    inverse_log_fare(raw)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_encode_itinerary,
    bench_route_map,
    bench_forest_inference
);

criterion_main!(benches);
