//! End-to-end tests of the cache coordinator over real stores

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tempfile::TempDir;

use pvfeed::cache::{FeedStore, InMemoryFeedStore, JsonFileFeedStore, LocalFeedLoader};
use pvfeed::feed::{IrradianceFeed, MonthlyValues};

/// Clock that tests can move forward
#[derive(Clone)]
struct TestClock(Arc<Mutex<DateTime<Utc>>>);

impl TestClock {
    fn starting_now() -> Self {
        Self(Arc::new(Mutex::new(Utc::now())))
    }

    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }

    fn advance(&self, by: Duration) {
        *self.0.lock().unwrap() += by;
    }
}

fn months(values: [f64; 13]) -> MonthlyValues {
    [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC", "ANN",
    ]
    .iter()
    .zip(values)
    .map(|(code, value)| (code.to_string(), value))
    .collect()
}

fn unique_feed() -> IrradianceFeed {
    IrradianceFeed::new(
        vec![-3.88, 42.63, 917.61],
        months([2.38, 3.1, 3.77, 4.12, 4.94, 5.85, 6.97, 6.31, 5.28, 3.87, 2.62, 2.5, 4.32]),
        months([1.61, 2.46, 3.73, 4.87, 5.98, 6.71, 7.06, 6.17, 4.75, 3.1, 1.83, 1.48, 4.16]),
        months([0.84, 1.2, 1.78, 2.36, 2.71, 2.73, 2.38, 2.18, 1.82, 1.35, 0.93, 0.74, 1.75]),
    )
}

fn make_loader(store: Arc<dyn FeedStore>, clock: &TestClock) -> LocalFeedLoader {
    let clock = clock.clone();
    LocalFeedLoader::new(store, move || clock.now())
}

#[tokio::test]
async fn test_load_delivers_empty_feed_on_empty_cache() {
    let dir = TempDir::new().expect("temp dir");
    let store = Arc::new(JsonFileFeedStore::new(dir.path().join("feed.json")));
    let sut = make_loader(store, &TestClock::starting_now());

    let feed = sut.load_feed().await.expect("load should succeed");

    assert!(feed.is_empty());
}

#[tokio::test]
async fn test_load_delivers_feed_saved_on_a_separate_instance() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("feed.json");
    let clock = TestClock::starting_now();
    let feed = unique_feed();

    let save_loader = make_loader(Arc::new(JsonFileFeedStore::new(path.clone())), &clock);
    save_loader.save_feed(&feed).await.expect("save should succeed");

    let load_loader = make_loader(Arc::new(JsonFileFeedStore::new(path)), &clock);
    let loaded = load_loader.load_feed().await.expect("load should succeed");

    assert_eq!(loaded, feed);
}

#[tokio::test]
async fn test_save_overrides_feed_saved_on_a_separate_instance() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("feed.json");
    let clock = TestClock::starting_now();

    let first_loader = make_loader(Arc::new(JsonFileFeedStore::new(path.clone())), &clock);
    let last_loader = make_loader(Arc::new(JsonFileFeedStore::new(path.clone())), &clock);
    let read_loader = make_loader(Arc::new(JsonFileFeedStore::new(path)), &clock);

    let mut latest = unique_feed();
    latest.geometry.coordinates = vec![2.17, 41.39, 12.0];

    first_loader.save_feed(&unique_feed()).await.expect("first save");
    last_loader.save_feed(&latest).await.expect("last save");

    assert_eq!(read_loader.load_feed().await.expect("load"), latest);
}

#[tokio::test]
async fn test_cache_expires_after_seven_days_and_validation_clears_it() {
    let dir = TempDir::new().expect("temp dir");
    let store = Arc::new(JsonFileFeedStore::new(dir.path().join("feed.json")));
    let clock = TestClock::starting_now();
    let sut = make_loader(store.clone(), &clock);
    let feed = unique_feed();

    sut.save_feed(&feed).await.expect("save should succeed");
    assert_eq!(sut.load_feed().await.expect("fresh load"), feed);

    clock.advance(Duration::days(8));
    assert_eq!(
        sut.load_feed().await.expect("stale load"),
        IrradianceFeed::empty()
    );
    assert!(
        store.retrieve().await.expect("retrieve").is_some(),
        "Loading must not delete stale data"
    );

    sut.validate().await.expect("validation should run");
    assert!(store.retrieve().await.expect("retrieve").is_none());
}

#[tokio::test]
async fn test_validation_keeps_fresh_cache() {
    let store = Arc::new(InMemoryFeedStore::new());
    let clock = TestClock::starting_now();
    let sut = make_loader(store.clone(), &clock);

    sut.save_feed(&unique_feed()).await.expect("save should succeed");
    clock.advance(Duration::days(7) - Duration::seconds(1));
    sut.validate().await.expect("validation should run");

    assert!(store.retrieve().await.expect("retrieve").is_some());
    assert_eq!(sut.load_feed().await.expect("load"), unique_feed());
}

#[tokio::test]
async fn test_cache_is_stale_exactly_at_seven_days() {
    let store = Arc::new(InMemoryFeedStore::new());
    let clock = TestClock::starting_now();
    let sut = make_loader(store, &clock);

    sut.save_feed(&unique_feed()).await.expect("save should succeed");
    clock.advance(Duration::days(7));

    assert!(sut.load_feed().await.expect("load").is_empty());
}

#[tokio::test]
async fn test_concurrent_saves_leave_a_single_entry() {
    let dir = TempDir::new().expect("temp dir");
    let store = Arc::new(JsonFileFeedStore::new(dir.path().join("feed.json")));
    let clock = TestClock::starting_now();
    let sut = Arc::new(make_loader(store.clone(), &clock));

    let feeds: Vec<IrradianceFeed> = (0..5)
        .map(|i| {
            let mut feed = unique_feed();
            feed.geometry.coordinates[2] = i as f64;
            feed
        })
        .collect();

    let results = futures::future::join_all(feeds.iter().map(|feed| sut.save_feed(feed))).await;
    assert!(results.iter().all(|r| r.is_ok()));

    let loaded = sut.load_feed().await.expect("load");
    assert!(feeds.contains(&loaded), "Cache should hold one of the saved feeds");
}
