//! # Pullit
//!
//! Backend for a question bank: browse subjects and their chapter trees,
//! compose exams, and pull items similar to the one a teacher is looking at.
//!
//!
//!
//! # Crates
//! - `catalog`: data model, chapter tree builder, response shapes, exam composition
//! - `server`: axum routes, middleware, search backends, rate limiting
//! - `ingest`: bulk loads item documents into Elasticsearch
//!
//!
//!
//! # Request Flow
//! - Every request gets a trace id and is logged on entry and exit
//! - `/api/*` answers straight from the catalog snapshot loaded at startup
//! - `/es/items/similar` is rate limited per client, then goes to the search backend
//! - Search failures are not retried unless `SEARCH_RETRY_ATTEMPTS` says so
//!
//!
//!
//! # Notes
//!
//! ## Chapter codes
//! A topic code holds its ancestors as prefixes: `1234` subject, `123456` large,
//! `12345678` medium, `1234567890` small, `123456789012` topic. The similarity
//! query and the tree builder both lean on this, nothing stores parent links.
//!
//! ## Redis
//! Only the rate limiter touches redis. Without `REDIS_URL` the counters live in
//! process, which is fine for one instance and wrong for several.
//!
//! ## Elasticsearch
//! Without `ELASTIC_URL` the catalog's own items are ranked in memory with the
//! same weights, which keeps local runs and tests independent of a cluster.
//!
//!
//!
//! # Setup
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
//!
//! Run the server against a local catalog.
//! ```sh
//! CATALOG_PATH=catalog.json ELASTIC_URL= RUST_LOG=info cargo run
//! ```
//!
//! Load items into Elasticsearch.
//! ```sh
//! cargo run -p ingest -- items.json --elastic-url http://localhost:9200
//! ```
pub use server::start_server;
