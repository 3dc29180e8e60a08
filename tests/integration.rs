// SPDX-License-Identifier: MPL-2.0
use event_lens::app::Route;
use event_lens::application::account::{self, Registration};
use event_lens::application::gallery::{GalleryLoader, GallerySession, GalleryView};
use event_lens::application::page::{GalleryPage, PageSettings};
use event_lens::application::port::{keys, GallerySource, SessionStore};
use event_lens::config::{self, Config};
use event_lens::domain::error::FetchError;
use event_lens::domain::gallery::{GalleryItem, GalleryKind, Identifier};
use event_lens::domain::session::{
    InactivityTimeout, LongPressThreshold, LookaheadMargin, PageSize, SentinelRegion,
    ViewportGeometry,
};
use event_lens::infrastructure::FileSessionStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;
use tokio::sync::Notify;

/// Source serving fixed feeds per identifier; gated identifiers wait for a
/// notification before answering.
#[derive(Default)]
struct FakeSource {
    feeds: HashMap<String, Vec<GalleryItem>>,
    gates: HashMap<String, Arc<Notify>>,
    requests: Mutex<Vec<(String, GalleryKind)>>,
}

impl FakeSource {
    fn with_feed(mut self, identifier: &str, items: Vec<GalleryItem>) -> Self {
        self.feeds.insert(identifier.to_string(), items);
        self
    }

    fn gated(mut self, identifier: &str, gate: Arc<Notify>) -> Self {
        self.gates.insert(identifier.to_string(), gate);
        self
    }
}

impl GallerySource for FakeSource {
    async fn fetch_items(
        &self,
        identifier: &Identifier,
        kind: GalleryKind,
    ) -> Result<Vec<GalleryItem>, FetchError> {
        self.requests
            .lock()
            .unwrap()
            .push((identifier.as_str().to_string(), kind));
        if let Some(gate) = self.gates.get(identifier.as_str()) {
            gate.notified().await;
        }
        self.feeds
            .get(identifier.as_str())
            .cloned()
            .ok_or_else(|| FetchError::status(404))
    }
}

/// 50 raw items where every tenth key repeats the previous one.
fn event_feed() -> Vec<GalleryItem> {
    (0..50)
        .map(|i| {
            let key = if i % 10 == 9 { i - 1 } else { i };
            GalleryItem::new(format!("evento-teste/{key}.jpg"), format!("https://cdn/{i}"))
        })
        .collect()
}

#[test]
fn config_round_trip_through_settings_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut original = Config::default();
    original.api.base_url = "https://api.example.com".to_string();
    original.gallery.photo_page_size = Some(30);
    original.session.inactivity_timeout_secs = Some(120);

    config::save_to_path(&original, &path).expect("Failed to write config file");
    let loaded = config::load_from_path(&path).expect("Failed to load config file");

    assert_eq!(loaded, original);
    assert_eq!(loaded.gallery.page_size(GalleryKind::General), PageSize::new(30));
    assert_eq!(loaded.gallery.page_size(GalleryKind::Videos), PageSize::VIDEOS);
    assert_eq!(loaded.session.inactivity_timeout(), InactivityTimeout::new(120));
}

#[tokio::test(start_paused = true)]
async fn example_event_scrolls_to_saturation() {
    let source = FakeSource::default().with_feed("evento-teste", event_feed());
    let loader = GalleryLoader::new(source, GalleryKind::Videos);
    let mut page = GalleryPage::new(
        loader,
        PageSettings {
            page_size: PageSize::VIDEOS,
            inactivity_timeout: InactivityTimeout::new(60),
            lookahead: LookaheadMargin::default(),
            long_press: LongPressThreshold::default(),
        },
    );

    let view = page.mount("evento-teste").await.unwrap();
    assert_eq!(
        view,
        GalleryView::Populated {
            total_count: 45,
            window_len: 16,
            has_more: true
        }
    );

    let sentinel = SentinelRegion {
        top: 5000.0,
        height: 1.0,
    };
    let away = ViewportGeometry {
        scroll_top: 0.0,
        viewport_height: 900.0,
        sentinel,
    };
    let near = ViewportGeometry {
        scroll_top: 4200.0,
        ..away
    };

    let mut lengths = vec![page.visible_items().len()];
    for _ in 0..4 {
        page.events().scrolled(near);
        page.events().scrolled(away);
        tokio::time::sleep(Duration::from_millis(5)).await;
        lengths.push(page.visible_items().len());
    }
    assert_eq!(lengths, vec![16, 32, 45, 45, 45]);

    // First position, last value.
    let items = page.visible_items();
    assert_eq!(items[8].key(), "evento-teste/8.jpg");
    assert_eq!(items[8].url(), "https://cdn/9");
}

#[tokio::test(start_paused = true)]
async fn scrolling_near_the_end_while_loading_still_reveals_next_page() {
    let gate = Arc::new(Notify::new());
    let source = FakeSource::default()
        .with_feed("evento-teste", event_feed())
        .gated("evento-teste", Arc::clone(&gate));
    let mut page = GalleryPage::new(
        GalleryLoader::new(source, GalleryKind::Videos),
        PageSettings {
            page_size: PageSize::VIDEOS,
            inactivity_timeout: InactivityTimeout::new(60),
            lookahead: LookaheadMargin::default(),
            long_press: LongPressThreshold::default(),
        },
    );
    let events = page.events().clone();
    let near = ViewportGeometry {
        scroll_top: 1000.0,
        viewport_height: 800.0,
        sentinel: SentinelRegion {
            top: 1900.0,
            height: 1.0,
        },
    };

    let (mounted, ()) = tokio::join!(page.mount("evento-teste"), async {
        tokio::task::yield_now().await;
        events.scrolled(near);
        gate.notify_one();
    });
    assert!(mounted.is_ok());

    events.scrolled(ViewportGeometry {
        scroll_top: 1010.0,
        ..near
    });
    tokio::time::sleep(Duration::from_millis(5)).await;
    assert_eq!(page.visible_items().len(), 32);
}

#[tokio::test]
async fn stale_response_does_not_overwrite_newer_identifier() {
    let gate = Arc::new(Notify::new());
    let source = FakeSource::default()
        .with_feed("evento-a", event_feed())
        .with_feed("evento-b", vec![GalleryItem::new("b1", "u")])
        .gated("evento-a", Arc::clone(&gate));
    let loader = GalleryLoader::new(source, GalleryKind::General);
    let session = Mutex::new(GallerySession::new(GalleryKind::General, PageSize::PHOTOS));

    let (slow, fast, ()) = tokio::join!(
        loader.load_into(&session, "evento-a"),
        loader.load_into(&session, "evento-b"),
        async {
            tokio::task::yield_now().await;
            gate.notify_one();
        }
    );

    assert_eq!(slow, Ok(false));
    assert_eq!(fast, Ok(true));
    let session = session.lock().unwrap();
    assert_eq!(session.identifier().map(Identifier::as_str), Some("evento-b"));
    assert_eq!(session.visible_items(), &[GalleryItem::new("b1", "u")]);
}

#[tokio::test]
async fn missing_gallery_surfaces_failure() {
    let loader = GalleryLoader::new(FakeSource::default(), GalleryKind::General);
    let session = Mutex::new(GallerySession::new(GalleryKind::General, PageSize::PHOTOS));

    loader.load_into(&session, "nao-existe").await.unwrap();

    assert_eq!(
        session.lock().unwrap().view(),
        GalleryView::Failed(FetchError::status(404))
    );
}

#[test]
fn search_result_survives_restart() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let identifier = Identifier::parse("evento-teste").unwrap();
    let body = r#"{"count":3,"items":[
        {"key":"a","url":"1"},{"key":"b","url":"2"},{"key":"a","url":"3"}
    ]}"#;

    {
        let store = FileSessionStore::open(Some(dir.path().to_path_buf())).unwrap();
        store.set(keys::USER_TOKEN, "tok").unwrap();
        let next = account::record_search_result(&store, &identifier, body).unwrap();
        assert_eq!(next, Route::SearchResult("evento-teste".into()));
    }

    let store = FileSessionStore::open(Some(dir.path().to_path_buf())).unwrap();
    let snapshot = account::restore_search_result(&store);
    assert_eq!(snapshot.total_count(), 2);
    assert_eq!(snapshot.items()[0], GalleryItem::new("a", "3"));
    assert!(store.saved_at(keys::SEARCH_RESULT).is_some());

    account::logout(&store).unwrap();
    let store = FileSessionStore::open(Some(dir.path().to_path_buf())).unwrap();
    assert!(store.get(keys::USER_TOKEN).is_none());
}

#[test]
fn registration_payload_is_normalized() {
    let identifier = Identifier::parse(" evento-teste ").unwrap();
    let form = Registration {
        name: " Ana ".into(),
        last_name: "Souza".into(),
        email: "ana@example.com".into(),
        password: "segredo".into(),
        confirm_password: "segredo".into(),
        whatsapp: "(48) 9 9999-1234".into(),
        instagram: String::new(),
        accepted_lgpd: true,
    };

    let request = form.validate(&identifier).unwrap();
    assert_eq!(request.name, "Ana");
    assert_eq!(request.whatsapp, "48999991234");
    assert_eq!(request.event_slug, "evento-teste");
}
