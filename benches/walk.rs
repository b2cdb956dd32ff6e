// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[macro_use]
extern crate criterion;
extern crate chaosbrot;

use chaosbrot::{serial, ChaosWalkEngine, EscapeTimeEngine};
use criterion::Criterion;

const SIERPINSKI: &str = "Affine\n0,0\n1,1\n0.5,0,0,0.5,0,0\n0.5,0,0,0.5,0.5,0\n0.5,0,0,0.5,0.25,0.5\n";
const DRAGON: &str = "Julia\n-2,-1.5\n2,1.5\n-0.8,0.156\n";

fn chaos_walk(c: &mut Criterion) {
    c.bench_function("sierpinski 10000 steps", |b| {
        let description = serial::parse(SIERPINSKI).unwrap();
        let mut engine = ChaosWalkEngine::with_seed(description, 200, 200, 1).unwrap();
        b.iter(|| engine.run(10_000).unwrap())
    });
}

fn escape_time(c: &mut Criterion) {
    c.bench_function("dragon 100x75 escape time", |b| {
        let description = serial::parse(DRAGON).unwrap();
        let mut engine = EscapeTimeEngine::new(description, 100, 75, 300, 4.0).unwrap();
        b.iter(|| engine.render())
    });
}

criterion_group!(benches, chaos_walk, escape_time);
criterion_main!(benches);
