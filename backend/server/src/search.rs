//! # Elasticsearch
//!
//! Similar-item lookup over the `item_image` index.
//!
//!
//!
//! ## Scoring
//! Given a topic chapter code, every ancestor chapter is recovered by keeping
//! the leftmost digits of the code (see [`catalog::item`]). Each level that a
//! candidate shares with the topic adds a fixed weight:
//!
//! | field | weight |
//! | --- | --- |
//! | subjectId | 1 |
//! | largeChapterId | 2 |
//! | mediumChapterId | 3 |
//! | smallChapterId | 4 |
//! | topicChapterId | 5 |
//!
//! The weights are summed (`score_mode: sum`) and replace the relevance score
//! (`boost_mode: replace`), so a candidate from the same topic always outranks
//! one that only shares the small chapter. A candidate matching no level keeps
//! the engine's neutral function score of 1.
//!
//!
//!
//! ## Filtering
//! - Same difficulty code only
//! - Items the client already has (`excludeItemIds`) never come back
//!
//!
//!
//! ## Ties
//! Equal scores are ordered by ascending item id so repeated requests page
//! through the same list.
//!
//!
//!
//! ## Backends
//! The server talks to Elasticsearch over its REST API. Without an
//! `ELASTIC_URL` it falls back to ranking the catalog's items in process with
//! the exact same rules, which is what the tests run against.
use std::{collections::BTreeSet, sync::Arc, time::Duration};

use async_trait::async_trait;
use catalog::item::{AncestorCodes, ItemImageDocument};
use reqwest::{Client, StatusCode, header::AUTHORIZATION};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::{
    error::AppError,
    retry::{RetryPolicy, retry},
};

pub const ITEM_INDEX: &str = "item_image";
pub const ITEM_ID: &str = "itemId";
pub const DIFFICULTY_CODE: &str = "difficultyCode";
pub const SUBJECT_ID: &str = "subjectId";
pub const LARGE_CHAPTER_ID: &str = "largeChapterId";
pub const MEDIUM_CHAPTER_ID: &str = "mediumChapterId";
pub const SMALL_CHAPTER_ID: &str = "smallChapterId";
pub const TOPIC_CHAPTER_ID: &str = "topicChapterId";

pub const DEFAULT_SIZE: usize = 20;
pub const MAX_SIZE: usize = 100;

/// Function score of a candidate that matches none of the weighted levels.
const NEUTRAL_SCORE: f64 = 1.0;

/// Body of `POST /es/items/similar`. Optional fields accept both a missing key
/// and an explicit `null`.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SimilarItemsRequest {
    pub topic_chapter_id: i64,
    pub difficulty_code: i32,
    #[serde(default)]
    pub exclude_item_ids: Option<Vec<i64>>,
    #[serde(default)]
    pub size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityQuery {
    pub ancestors: AncestorCodes,
    pub difficulty_code: i32,
    pub exclude_ids: BTreeSet<i64>,
    pub limit: usize,
}

impl SimilarityQuery {
    pub fn new(
        topic_chapter_id: i64,
        difficulty_code: i32,
        exclude_ids: impl IntoIterator<Item = i64>,
        limit: usize,
    ) -> Self {
        Self {
            ancestors: AncestorCodes::from_topic(topic_chapter_id),
            difficulty_code,
            exclude_ids: exclude_ids.into_iter().collect(),
            limit,
        }
    }

    pub fn from_request(request: SimilarItemsRequest) -> Result<Self, AppError> {
        let size = request.size.unwrap_or(DEFAULT_SIZE);

        if size > MAX_SIZE {
            return Err(AppError::MalformedPayload(format!(
                "size must be at most {MAX_SIZE}, got {size}"
            )));
        }

        Ok(Self::new(
            request.topic_chapter_id,
            request.difficulty_code,
            request.exclude_item_ids.unwrap_or_default(),
            size,
        ))
    }

    /// (field, code, weight) for every level of the hierarchy.
    pub fn weighted_terms(&self) -> [(&'static str, i64, f64); 5] {
        let a = &self.ancestors;

        [
            (SUBJECT_ID, a.subject, 1.0),
            (LARGE_CHAPTER_ID, a.large, 2.0),
            (MEDIUM_CHAPTER_ID, a.medium, 3.0),
            (SMALL_CHAPTER_ID, a.small, 4.0),
            (TOPIC_CHAPTER_ID, a.topic, 5.0),
        ]
    }

    /// Request body for `POST /{index}/_search`.
    pub fn to_body(&self) -> Value {
        let mut bool_query = json!({
            "must": [{ "term": { DIFFICULTY_CODE: self.difficulty_code } }]
        });

        if !self.exclude_ids.is_empty() {
            bool_query["must_not"] = json!([{ "terms": { ITEM_ID: self.exclude_ids } }]);
        }

        let functions: Vec<Value> = self
            .weighted_terms()
            .iter()
            .map(|(field, code, weight)| {
                json!({
                    "filter": { "term": { *field: code } },
                    "weight": weight
                })
            })
            .collect();

        json!({
            "size": self.limit,
            "query": {
                "function_score": {
                    "query": { "bool": bool_query },
                    "functions": functions,
                    "score_mode": "sum",
                    "boost_mode": "replace"
                }
            },
            "sort": [
                { "_score": { "order": "desc" } },
                { ITEM_ID: { "order": "asc" } }
            ]
        })
    }

    fn field(doc: &ItemImageDocument, field: &str) -> Option<i64> {
        match field {
            SUBJECT_ID => doc.subject_id,
            LARGE_CHAPTER_ID => doc.large_chapter_id,
            MEDIUM_CHAPTER_ID => doc.medium_chapter_id,
            SMALL_CHAPTER_ID => doc.small_chapter_id,
            TOPIC_CHAPTER_ID => doc.topic_chapter_id,
            _ => None,
        }
    }

    /// Score `doc` the way the search request does, `None` when it is filtered out.
    pub fn score(&self, doc: &ItemImageDocument) -> Option<f64> {
        if doc.difficulty_code != Some(i64::from(self.difficulty_code)) {
            return None;
        }

        if doc.item_id.is_some_and(|id| self.exclude_ids.contains(&id)) {
            return None;
        }

        let matched: Vec<f64> = self
            .weighted_terms()
            .iter()
            .filter(|(field, code, _)| Self::field(doc, field) == Some(*code))
            .map(|(_, _, weight)| *weight)
            .collect();

        if matched.is_empty() {
            return Some(NEUTRAL_SCORE);
        }

        Some(matched.iter().sum())
    }

    /// Filters, scores and orders `docs`, keeping the first `limit`.
    pub fn rank<'a, I>(&self, docs: I) -> Vec<ItemImageDocument>
    where
        I: IntoIterator<Item = &'a ItemImageDocument>,
    {
        let mut scored: Vec<(f64, &ItemImageDocument)> = docs
            .into_iter()
            .filter_map(|doc| self.score(doc).map(|score| (score, doc)))
            .collect();

        // Documents without an item id sort after every id.
        scored.sort_by(|(a_score, a), (b_score, b)| {
            b_score
                .total_cmp(a_score)
                .then_with(|| a.item_id.is_none().cmp(&b.item_id.is_none()))
                .then_with(|| a.item_id.cmp(&b.item_id))
        });

        scored
            .into_iter()
            .take(self.limit)
            .map(|(_, doc)| doc.clone())
            .collect()
    }
}

#[async_trait]
pub trait ItemSearch: Send + Sync {
    async fn find_similar(&self, query: &SimilarityQuery) -> Result<Vec<ItemImageDocument>, AppError>;
}

#[derive(Deserialize)]
struct SearchResponse {
    hits: Hits,
}

#[derive(Deserialize)]
struct Hits {
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: Option<ItemImageDocument>,
}

pub struct ElasticSearch {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    retry: RetryPolicy,
}

impl ElasticSearch {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("search client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            retry,
        })
    }

    async fn search_once(&self, body: &Value) -> Result<Vec<ItemImageDocument>, AppError> {
        let url = format!("{}/{ITEM_INDEX}/_search", self.base_url);

        let mut request = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("ApiKey {key}"));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();

            return Err(match status {
                StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                    AppError::SearchUnavailable(format!("{status}: {detail}"))
                }
                _ => AppError::SearchFailed(format!("{status}: {detail}")),
            });
        }

        // Body read errors keep their transport class, so a stalled body is a timeout.
        let bytes = response.bytes().await?;
        let parsed: SearchResponse = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::SearchFailed(format!("undecodable response: {e}")))?;

        Ok(parsed.hits.hits.into_iter().filter_map(|hit| hit.source).collect())
    }
}

#[async_trait]
impl ItemSearch for ElasticSearch {
    async fn find_similar(&self, query: &SimilarityQuery) -> Result<Vec<ItemImageDocument>, AppError> {
        let body = query.to_body();
        debug!("Search body: {body}");

        let items = retry(&self.retry, "similar items search", AppError::is_retryable, || {
            self.search_once(&body)
        })
        .await?;

        debug!(
            topic = query.ancestors.topic,
            found = items.len(),
            "Similar items fetched"
        );

        Ok(items)
    }
}

/// In-process ranking over a fixed set of documents.
pub struct MemoryIndex {
    items: Vec<ItemImageDocument>,
}

impl MemoryIndex {
    pub fn new(items: Vec<ItemImageDocument>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl ItemSearch for MemoryIndex {
    async fn find_similar(&self, query: &SimilarityQuery) -> Result<Vec<ItemImageDocument>, AppError> {
        Ok(query.rank(&self.items))
    }
}

pub fn init_search(
    elastic_url: Option<&str>,
    api_key: Option<String>,
    timeout: Duration,
    retry: RetryPolicy,
    fallback_items: &[ItemImageDocument],
) -> Result<Arc<dyn ItemSearch>, AppError> {
    match elastic_url {
        Some(url) => {
            info!("Using Elasticsearch at {url}");
            Ok(Arc::new(ElasticSearch::new(url, api_key, timeout, retry)?))
        }
        None => {
            info!(
                "ELASTIC_URL empty, ranking {} catalog items in memory",
                fallback_items.len()
            );
            Ok(Arc::new(MemoryIndex::new(fallback_items.to_vec())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPIC: i64 = 123_456_789_012;

    fn doc(item_id: i64, codes: [Option<i64>; 5], difficulty: i64) -> ItemImageDocument {
        ItemImageDocument {
            item_id: Some(item_id),
            subject_id: codes[0],
            large_chapter_id: codes[1],
            medium_chapter_id: codes[2],
            small_chapter_id: codes[3],
            topic_chapter_id: codes[4],
            difficulty_code: Some(difficulty),
            ..Default::default()
        }
    }

    fn subject_only(item_id: i64) -> ItemImageDocument {
        doc(item_id, [Some(1234), Some(999_999), None, None, None], 3)
    }

    fn subject_and_large(item_id: i64) -> ItemImageDocument {
        doc(item_id, [Some(1234), Some(123_456), None, None, None], 3)
    }

    fn same_topic(item_id: i64) -> ItemImageDocument {
        doc(
            item_id,
            [
                Some(1234),
                Some(123_456),
                Some(12_345_678),
                Some(1_234_567_890),
                Some(TOPIC),
            ],
            3,
        )
    }

    fn ids(docs: &[ItemImageDocument]) -> Vec<i64> {
        docs.iter().filter_map(|d| d.item_id).collect()
    }

    #[test]
    fn test_body_shape() {
        let query = SimilarityQuery::new(TOPIC, 3, [7, 5], 10);
        let body = query.to_body();

        assert_eq!(body["size"], 10);

        let function_score = &body["query"]["function_score"];
        assert_eq!(function_score["score_mode"], "sum");
        assert_eq!(function_score["boost_mode"], "replace");
        assert_eq!(
            function_score["query"]["bool"]["must"][0]["term"][DIFFICULTY_CODE],
            3
        );
        assert_eq!(
            function_score["query"]["bool"]["must_not"][0]["terms"][ITEM_ID],
            json!([5, 7])
        );

        let functions = function_score["functions"].as_array().unwrap();
        assert_eq!(functions.len(), 5);
        assert_eq!(functions[0]["filter"]["term"][SUBJECT_ID], 1234);
        assert_eq!(functions[0]["weight"], 1.0);
        assert_eq!(functions[3]["filter"]["term"][SMALL_CHAPTER_ID], 1_234_567_890_i64);
        assert_eq!(functions[4]["filter"]["term"][TOPIC_CHAPTER_ID], TOPIC);
        assert_eq!(functions[4]["weight"], 5.0);

        assert_eq!(body["sort"][1][ITEM_ID]["order"], "asc");
    }

    #[test]
    fn test_body_without_exclusions_has_no_must_not() {
        let body = SimilarityQuery::new(TOPIC, 3, [], 10).to_body();

        assert!(
            body["query"]["function_score"]["query"]["bool"]
                .get("must_not")
                .is_none()
        );
    }

    #[test]
    fn test_short_topic_code_is_used_for_every_level() {
        let query = SimilarityQuery::new(42, 1, [], 5);

        assert!(query.weighted_terms().iter().all(|(_, code, _)| *code == 42));
    }

    #[test]
    fn test_score_sums_matching_weights() {
        let query = SimilarityQuery::new(TOPIC, 3, [], 10);

        assert_eq!(query.score(&subject_only(1)), Some(1.0));
        assert_eq!(query.score(&subject_and_large(2)), Some(3.0));
        assert_eq!(query.score(&same_topic(3)), Some(15.0));
    }

    #[test]
    fn test_other_difficulty_is_filtered() {
        let query = SimilarityQuery::new(TOPIC, 2, [], 10);

        assert_eq!(query.score(&same_topic(1)), None);
    }

    #[test]
    fn test_no_match_gets_neutral_score() {
        let query = SimilarityQuery::new(TOPIC, 3, [], 10);
        let unrelated = doc(9, [Some(5555), None, None, None, None], 3);

        assert_eq!(query.score(&unrelated), Some(NEUTRAL_SCORE));
    }

    #[test]
    fn test_rank_orders_by_score() {
        let query = SimilarityQuery::new(TOPIC, 3, [], 10);
        let docs = vec![subject_only(1), subject_and_large(2), same_topic(3)];

        assert_eq!(ids(&query.rank(&docs)), vec![3, 2, 1]);
    }

    #[test]
    fn test_rank_excludes_ids_regardless_of_score() {
        let query = SimilarityQuery::new(TOPIC, 3, [3], 10);
        let docs = vec![subject_only(1), same_topic(3)];

        assert_eq!(ids(&query.rank(&docs)), vec![1]);
    }

    #[test]
    fn test_rank_breaks_ties_by_item_id() {
        let query = SimilarityQuery::new(TOPIC, 3, [], 10);
        let docs = vec![same_topic(30), same_topic(10), same_topic(20)];

        assert_eq!(ids(&query.rank(&docs)), vec![10, 20, 30]);
    }

    #[test]
    fn test_rank_respects_limit() {
        let query = SimilarityQuery::new(TOPIC, 3, [], 2);
        let docs = vec![subject_only(1), subject_and_large(2), same_topic(3)];

        assert_eq!(ids(&query.rank(&docs)), vec![3, 2]);
    }

    #[test]
    fn test_unmatched_document_ties_with_subject_only_match() {
        let query = SimilarityQuery::new(TOPIC, 3, [], 10);
        let unrelated = doc(1, [Some(5555), None, None, None, None], 3);
        let docs = vec![subject_only(2), unrelated];

        // Both score 1, so the lower item id comes first.
        assert_eq!(ids(&query.rank(&docs)), vec![1, 2]);
    }

    #[test]
    fn test_request_defaults_and_limit() {
        let request: SimilarItemsRequest =
            serde_json::from_value(json!({ "topicChapterId": TOPIC, "difficultyCode": 3 })).unwrap();

        let query = SimilarityQuery::from_request(request.clone()).unwrap();
        assert_eq!(query.limit, DEFAULT_SIZE);
        assert!(query.exclude_ids.is_empty());

        let too_big = SimilarItemsRequest {
            size: Some(MAX_SIZE + 1),
            ..request
        };
        assert!(matches!(
            SimilarityQuery::from_request(too_big),
            Err(AppError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_request_null_fields_use_defaults() {
        let request: SimilarItemsRequest = serde_json::from_value(json!({
            "topicChapterId": TOPIC,
            "difficultyCode": 3,
            "excludeItemIds": null,
            "size": null
        }))
        .unwrap();

        let query = SimilarityQuery::from_request(request).unwrap();
        assert!(query.exclude_ids.is_empty());
        assert_eq!(query.limit, DEFAULT_SIZE);
    }

    #[tokio::test]
    async fn test_memory_index_find_similar() {
        let index = MemoryIndex::new(vec![subject_only(1), same_topic(2)]);
        let query = SimilarityQuery::new(TOPIC, 3, [], 10);

        let found = index.find_similar(&query).await.unwrap();
        assert_eq!(ids(&found), vec![2, 1]);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        let search = ElasticSearch::new(
            "http://127.0.0.1:9",
            None,
            Duration::from_millis(200),
            RetryPolicy::none(),
        )
        .unwrap();

        let result = search
            .find_similar(&SimilarityQuery::new(TOPIC, 3, [], 10))
            .await;

        assert!(matches!(result, Err(AppError::SearchUnavailable(_))));
    }

    mod elastic {
        use std::sync::{
            Mutex,
            atomic::{AtomicU32, Ordering},
        };

        use axum::{
            Json, Router,
            extract::State,
            http::HeaderMap,
            response::{IntoResponse, Response},
            routing::post,
        };
        use tokio::{
            io::{AsyncReadExt, AsyncWriteExt},
            net::TcpListener,
        };

        use super::*;

        const SEARCH_PATH: &str = "/item_image/_search";

        async fn serve(router: Router) -> String {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let address = listener.local_addr().unwrap();

            tokio::spawn(async move {
                axum::serve(listener, router).await.unwrap();
            });

            format!("http://{address}")
        }

        fn client(url: &str, max_attempts: u32) -> ElasticSearch {
            let retry = RetryPolicy {
                max_attempts,
                delay: Duration::from_millis(1),
                multiplier: 1.0,
            };

            ElasticSearch::new(url, Some("secret".into()), Duration::from_secs(2), retry).unwrap()
        }

        fn query() -> SimilarityQuery {
            SimilarityQuery::new(TOPIC, 3, [9], 10)
        }

        async fn search_against(url: &str, max_attempts: u32) -> Result<Vec<ItemImageDocument>, AppError> {
            client(url, max_attempts).find_similar(&query()).await
        }

        async fn failing_with(status: StatusCode) -> Result<Vec<ItemImageDocument>, AppError> {
            let router = Router::new().route(SEARCH_PATH, post(move || async move { (status, "nope") }));

            search_against(&serve(router).await, 1).await
        }

        #[derive(Default)]
        struct Seen {
            body: Mutex<Option<Value>>,
            authorization: Mutex<Option<String>>,
        }

        async fn record(
            State(seen): State<Arc<Seen>>,
            headers: HeaderMap,
            Json(body): Json<Value>,
        ) -> Json<Value> {
            *seen.authorization.lock().unwrap() = headers
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            *seen.body.lock().unwrap() = Some(body);

            Json(json!({
                "hits": {
                    "hits": [
                        { "_id": "2", "_score": 15.0, "_source": { "itemId": 2, "topicChapterId": TOPIC, "difficultyCode": 3 } },
                        { "_id": "5", "_score": 3.0 },
                        { "_id": "1", "_score": 1.0, "_source": { "itemId": 1, "subjectId": 1234, "difficultyCode": 3 } }
                    ]
                }
            }))
        }

        #[tokio::test]
        async fn test_decodes_hits_and_drops_missing_sources() {
            let seen = Arc::new(Seen::default());
            let router = Router::new()
                .route(SEARCH_PATH, post(record))
                .with_state(seen.clone());

            let found = search_against(&serve(router).await, 1).await.unwrap();
            assert_eq!(ids(&found), vec![2, 1]);
            assert_eq!(found[0].topic_chapter_id, Some(TOPIC));

            assert_eq!(seen.authorization.lock().unwrap().as_deref(), Some("ApiKey secret"));
            assert_eq!(*seen.body.lock().unwrap(), Some(query().to_body()));
        }

        #[tokio::test]
        async fn test_unavailable_statuses() {
            for status in [StatusCode::SERVICE_UNAVAILABLE, StatusCode::GATEWAY_TIMEOUT] {
                let result = failing_with(status).await;
                assert!(matches!(result, Err(AppError::SearchUnavailable(_))), "{status}");
            }
        }

        #[tokio::test]
        async fn test_other_statuses_fail() {
            for status in [StatusCode::BAD_REQUEST, StatusCode::INTERNAL_SERVER_ERROR] {
                let result = failing_with(status).await;
                assert!(matches!(result, Err(AppError::SearchFailed(_))), "{status}");
            }
        }

        #[tokio::test]
        async fn test_undecodable_body_fails() {
            let router = Router::new().route(SEARCH_PATH, post(|| async { "not json" }));

            let result = search_against(&serve(router).await, 3).await;
            assert!(matches!(result, Err(AppError::SearchFailed(_))));
        }

        async fn flaky(State(calls): State<Arc<AtomicU32>>) -> Response {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                return (StatusCode::SERVICE_UNAVAILABLE, "warming up").into_response();
            }

            Json(json!({ "hits": { "hits": [{ "_source": { "itemId": 4, "difficultyCode": 3 } }] } }))
                .into_response()
        }

        #[tokio::test]
        async fn test_unavailable_is_retried() {
            let calls = Arc::new(AtomicU32::new(0));
            let router = Router::new()
                .route(SEARCH_PATH, post(flaky))
                .with_state(calls.clone());

            let found = search_against(&serve(router).await, 3).await.unwrap();

            assert_eq!(ids(&found), vec![4]);
            assert_eq!(calls.load(Ordering::SeqCst), 2);
        }

        #[tokio::test]
        async fn test_single_attempt_does_not_retry() {
            let calls = Arc::new(AtomicU32::new(0));
            let router = Router::new()
                .route(SEARCH_PATH, post(flaky))
                .with_state(calls.clone());

            let result = search_against(&serve(router).await, 1).await;

            assert!(matches!(result, Err(AppError::SearchUnavailable(_))));
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }

        #[tokio::test]
        async fn test_stalled_body_is_unavailable() {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let address = listener.local_addr().unwrap();

            tokio::spawn(async move {
                let (mut socket, _) = listener.accept().await.unwrap();

                let mut buffer = [0u8; 4096];
                let _ = socket.read(&mut buffer).await;

                let _ = socket
                    .write_all(b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{")
                    .await;
                tokio::time::sleep(Duration::from_secs(5)).await;
            });

            let search = ElasticSearch::new(
                &format!("http://{address}"),
                None,
                Duration::from_millis(300),
                RetryPolicy::none(),
            )
            .unwrap();

            let result = search.find_similar(&query()).await;
            assert!(matches!(result, Err(AppError::SearchUnavailable(_))), "{result:?}");
        }
    }
}
