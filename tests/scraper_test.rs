#![recursion_limit = "256"]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use appstore_scraper::infra::http_client::{StoreClient, StorePayload, StoreRequest};
use appstore_scraper::{AppId, AppStoreScraper, Query, Result, ScraperError, StoreFront};

/// Canned client: every GET answers with the same payload and records the
/// request it was asked to make.
struct FixtureClient {
    status: u16,
    body: Vec<u8>,
    requests: Arc<Mutex<Vec<StoreRequest>>>,
}

#[async_trait]
impl StoreClient for FixtureClient {
    async fn get(&self, request: &StoreRequest) -> Result<StorePayload> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(StorePayload {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

fn scraper_with_json(value: Value) -> (AppStoreScraper, Arc<Mutex<Vec<StoreRequest>>>) {
    scraper_with_body(200, value.to_string().into_bytes())
}

fn scraper_with_body(status: u16, body: Vec<u8>) -> (AppStoreScraper, Arc<Mutex<Vec<StoreRequest>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let client = FixtureClient {
        status,
        body,
        requests: Arc::clone(&requests),
    };
    (AppStoreScraper::with_client(Box::new(client)), requests)
}

fn store() -> StoreFront {
    StoreFront::new("gb", "en").unwrap()
}

/// Detail record in the shape the lookup service returns, 44 keys once
/// flattened. The key count is a regression fixture.
fn detail_record(track_id: u64, title: &str) -> Value {
    json!({
        "isGameCenterEnabled": false,
        "features": ["iosUniversal"],
        "supportedDevices": ["iPhone5s-iPhone5s", "iPadAir-iPadAir"],
        "advisories": [],
        "screenshotUrls": ["https://is1-ssl.mzstatic.com/image/thumb/a.png"],
        "ipadScreenshotUrls": ["https://is1-ssl.mzstatic.com/image/thumb/b.png"],
        "appletvScreenshotUrls": [],
        "artworkUrl60": "https://is1-ssl.mzstatic.com/image/thumb/60.png",
        "artworkUrl512": "https://is1-ssl.mzstatic.com/image/thumb/512.png",
        "artworkUrl100": "https://is1-ssl.mzstatic.com/image/thumb/100.png",
        "artistViewUrl": "https://apps.apple.com/gb/developer/id384434796",
        "kind": "software",
        "currency": "GBP",
        "trackId": track_id,
        "trackName": title,
        "bundleId": "com.example.mindful",
        "trackViewUrl": "https://apps.apple.com/gb/app/id493145008",
        "sellerName": "Example Ltd",
        "releaseNotes": "Bug fixes.",
        "primaryGenreName": "Health & Fitness",
        "genreIds": ["6013", "6012"],
        "isVppDeviceBasedLicensingEnabled": true,
        "currentVersionReleaseDate": "2020-04-01T09:00:00Z",
        "releaseDate": "2012-01-19T08:00:00Z",
        "sellerUrl": "https://www.example.com",
        "minimumOsVersion": "11.0",
        "primaryGenreId": 6013,
        "formattedPrice": "Free",
        "fileSizeBytes": "194332672",
        "averageUserRatingForCurrentVersion": 4.5,
        "userRatingCountForCurrentVersion": 1024,
        "averageUserRating": 4.5,
        "trackCensoredName": title,
        "languageCodesISO2A": ["EN", "NL"],
        "trackContentRating": "4+",
        "contentAdvisoryRating": "4+",
        "artistId": 384434796,
        "artistName": "Example Ltd",
        "genres": ["Health & Fitness", "Lifestyle"],
        "price": 0.0,
        "description": "A mindfulness companion.",
        "wrapperType": "software",
        "userRatingCount": 2048,
        "version": "3.52.0"
    })
}

#[tokio::test]
async fn term_search_truncates_to_requested_count_with_unique_ids() {
    let (scraper, _) = scraper_with_json(json!({
        "bubbles": [{"results": [
            {"id": 1444383602}, {"id": 1066498020}, {"id": 1110145103}, {"id": 293622097}
        ]}]
    }));

    let ids = scraper
        .app_ids_for_query("mindful", 2, 1, &store())
        .await
        .unwrap();

    assert_eq!(ids.len(), 2);
    let mut deduped = ids.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
}

#[tokio::test]
async fn empty_term_is_rejected_without_issuing_a_request() {
    let (scraper, requests) = scraper_with_json(json!({}));

    let err = scraper
        .app_ids_for_query("", 50, 1, &store())
        .await
        .unwrap_err();

    assert!(matches!(err, ScraperError::InvalidQuery(_)));
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn details_for_known_id_returns_one_record_with_44_flattened_keys() {
    let (scraper, requests) = scraper_with_json(json!({
        "resultCount": 1,
        "results": [detail_record(493145008, "Mindful Minutes")]
    }));

    let record = scraper
        .app_details(&AppId::Track(493145008), &store())
        .await
        .unwrap()
        .expect("record for a known id");

    assert_eq!(record.track_id(), Some(493145008));
    assert!(!record.title().unwrap_or_default().is_empty());

    let flat = record.flattened();
    assert_eq!(flat.len(), 44);
    assert_eq!(
        flat.get("genres"),
        Some(&json!("Health & Fitness,Lifestyle"))
    );

    // Exactly one outbound GET per call
    assert_eq!(requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn details_for_unknown_id_is_none_not_an_error() {
    let (scraper, _) = scraper_with_json(json!({"resultCount": 0, "results": []}));

    let record = scraper
        .app_details(&AppId::Track(872), &store())
        .await
        .unwrap();

    assert!(record.is_none());
}

#[tokio::test]
async fn details_by_bundle_id_uses_the_bundle_field() {
    let (scraper, requests) = scraper_with_json(json!({
        "resultCount": 1,
        "results": [detail_record(493145008, "Mindful Minutes")]
    }));

    let record = scraper
        .app_details(&AppId::parse("com.example.mindful"), &store())
        .await
        .unwrap();

    assert!(record.is_some());
    let recorded = requests.lock().unwrap();
    assert!(recorded[0].url.contains("bundleId=com.example.mindful"));
}

#[tokio::test]
async fn batch_lookup_returns_only_resolvable_ids_from_the_input_set() {
    let input = vec![493145008u64, 310633997, 872];
    let (scraper, requests) = scraper_with_json(json!({
        "resultCount": 2,
        "results": [
            detail_record(493145008, "Mindful Minutes"),
            detail_record(310633997, "Daily Walks")
        ]
    }));

    let records = scraper
        .multiple_app_details(&input, &store())
        .await
        .unwrap();

    assert!(records.len() <= input.len());
    assert_eq!(records.len(), 2);
    for record in &records {
        let id = record.track_id().expect("record id");
        assert!(input.contains(&id));
    }

    // All three ids travel in one request
    let recorded = requests.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].url.contains("493145008%2C310633997%2C872"));
}

#[tokio::test]
async fn developer_listing_shares_one_developer_identity() {
    let (scraper, _) = scraper_with_json(json!({
        "resultCount": 3,
        "results": [
            {"wrapperType": "artist", "artistId": 384434796, "artistName": "Example Ltd"},
            detail_record(284035177, "Mindful Minutes"),
            detail_record(1055275337, "Daily Walks")
        ]
    }));

    let records = scraper.apps_for_developer(384434796, &store()).await.unwrap();

    assert!(!records.is_empty());
    for record in &records {
        assert_eq!(record.developer_id(), Some(384434796));
        assert_eq!(record.wrapper_type(), Some("software"));
    }
}

#[tokio::test]
async fn unknown_developer_id_is_an_empty_listing() {
    // The lookup service answers ids it does not know without a results
    // container at all
    let (scraper, _) = scraper_with_json(json!({"errorMessage": "Invalid value"}));

    let ids = scraper.app_ids_for_developer(1, &store()).await.unwrap();

    assert!(ids.is_empty());
}

#[tokio::test]
async fn similar_ids_come_from_the_embedded_page_payload() {
    let page = r#"<html><head><script type="text/javascript">
        its.serverData = {"pageData":{"customersAlsoBoughtApps":[307906541,512939461,1066498020]}};
    </script></head><body></body></html>"#;
    let (scraper, requests) = scraper_with_body(200, page.as_bytes().to_vec());

    let ids = scraper
        .similar_app_ids_for_app(493145008, &store())
        .await
        .unwrap();

    assert!(!ids.is_empty());
    assert!(ids.iter().all(|id| *id != 493145008));

    let recorded = requests.lock().unwrap();
    assert_eq!(recorded[0].url, "https://itunes.apple.com/us/app/app/id493145008");
}

#[tokio::test]
async fn similar_page_without_payload_is_empty_not_an_error() {
    let page = "<html><body><h1>An app page with no recommendations</h1></body></html>";
    let (scraper, _) = scraper_with_body(200, page.as_bytes().to_vec());

    let ids = scraper
        .similar_app_ids_for_app(493145008, &store())
        .await
        .unwrap();

    assert!(ids.is_empty());
}

#[tokio::test]
async fn collection_feed_yields_ids_in_feed_order() {
    let (scraper, requests) = scraper_with_json(json!({
        "feed": {"entry": [
            {"id": {"attributes": {"im:id": "544007664"}}, "title": {"label": "First"}},
            {"id": {"attributes": {"im:id": "310633997"}}, "title": {"label": "Second"}}
        ]}
    }));

    let ids = scraper
        .app_ids_for_collection("topfreeapplications", None, 50, &store())
        .await
        .unwrap();

    assert_eq!(ids, vec![544007664, 310633997]);
    let recorded = requests.lock().unwrap();
    assert!(recorded[0].url.contains("/RSS/topfreeapplications/limit=50/json?s=143444"));
}

#[tokio::test]
async fn http_error_status_surfaces_as_a_fetch_error() {
    let (scraper, _) = scraper_with_body(503, b"service unavailable".to_vec());

    let err = scraper
        .app_details(&AppId::Track(493145008), &store())
        .await
        .unwrap_err();

    assert!(matches!(err, ScraperError::Fetch(_)));
}

#[tokio::test]
async fn malformed_body_surfaces_as_a_parse_error() {
    let (scraper, _) = scraper_with_body(200, b"<html>not json at all</html>".to_vec());

    let err = scraper
        .app_details(&AppId::Track(493145008), &store())
        .await
        .unwrap_err();

    assert!(matches!(err, ScraperError::Parse(_)));
}

#[tokio::test]
async fn resolve_accepts_a_query_value_directly() {
    let (scraper, _) = scraper_with_json(json!({
        "resultCount": 1,
        "results": [detail_record(493145008, "Mindful Minutes")]
    }));

    let records = scraper
        .resolve(
            &Query::Details {
                app_id: AppId::Track(493145008),
            },
            &store(),
        )
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
}
