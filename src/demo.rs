//! Canned results for `--demo`, so the output format can be previewed without
//! touching the network. Every entry links back to the source itself.

use crate::models::{ResultSet, SearchResult};

const DEMO_ENTRIES: &[(&str, &str)] = &[
    (
        "What's new in Go 1.23",
        "A walk through the new release: generics improvements, runtime performance work and a smoother developer experience.",
    ),
    (
        "Distributed transactions in microservices",
        "Keeping data consistent across service boundaries, with a comparison of sagas, outbox and two-phase commit.",
    ),
    (
        "Kubernetes 1.29 feature roundup",
        "The latest Kubernetes release brings stronger container orchestration and tighter security defaults.",
    ),
    (
        "Rust for systems programming",
        "Why memory safety and fearless concurrency make Rust a strong choice for low-level software.",
    ),
    (
        "Front-end performance best practices",
        "Resource loading, rendering and code splitting techniques for faster pages.",
    ),
    (
        "Understanding Docker containers",
        "From namespaces and cgroups to day-to-day workflows: how containers actually work.",
    ),
    (
        "Building applications on large language models",
        "API integration, prompt engineering and evaluation for LLM-backed products.",
    ),
    (
        "Advanced PostgreSQL",
        "Query planning, index design and other features that pay off at scale.",
    ),
    (
        "GraphQL or REST?",
        "Trade-offs between the two API styles and how to pick one for your service.",
    ),
    (
        "Code quality through automated testing",
        "Using automated tests and code review to build a reliable delivery pipeline.",
    ),
];

/// Ten synthetic results pointing at `source_url`.
pub fn demo_results(source_url: &str) -> ResultSet {
    let results = DEMO_ENTRIES
        .iter()
        .enumerate()
        .map(|(i, (title, snippet))| SearchResult {
            index: i + 1,
            title: title.to_string(),
            url: source_url.to_string(),
            snippet: snippet.to_string(),
            published_date: None,
        })
        .collect();
    ResultSet::synthetic(results)
}
