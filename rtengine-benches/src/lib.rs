//! Benchmarks for rtengine; see `benches/`.
