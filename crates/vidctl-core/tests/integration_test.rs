//! End-to-end tests: a controller driven through activation, rescans and
//! keystrokes on fixture pages.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde_json::{json, Value};

use vidctl_config::{Config, ConfigLoader};
use vidctl_core::{scan_videos, Controller, Disposition, Selector};
use vidctl_page_memory::{MemoryPage, PageFixture};
use vidctl_protocols::{KeyPress, KeyTarget, Overlay, SyntheticKey, VideoElement};
use vidctl_runloop::ManualRunLoop;

// ============================================================================
// Test Helpers
// ============================================================================

const SCAN: Duration = Duration::from_millis(2000);

struct Session {
    page: MemoryPage,
    run_loop: Rc<ManualRunLoop>,
    controller: Rc<RefCell<Controller<MemoryPage>>>,
}

impl Session {
    /// Load `fixture`, activate with the built-in config and run one scan.
    fn start(fixture: Value) -> Self {
        let page = PageFixture::load(&fixture.to_string()).unwrap();
        let config = ConfigLoader::builtin().unwrap();
        let run_loop = Rc::new(ManualRunLoop::new());
        let controller = Rc::new(RefCell::new(Controller::new(
            page.clone(),
            config,
            run_loop.clone(),
        )));
        Controller::activate(&controller).unwrap();
        run_loop.advance(SCAN);
        Self {
            page,
            run_loop,
            controller,
        }
    }

    fn press(&self, press: KeyPress) -> Disposition {
        Controller::dispatch(&self.controller, &press)
    }

    /// Deliver every injected keydown back through the controller, as the
    /// window does for the capture listener, and collect the outcomes.
    fn echo_injected_keys(&self) -> Rc<RefCell<Vec<Disposition>>> {
        let outcomes = Rc::new(RefCell::new(Vec::new()));
        let sink = outcomes.clone();
        let controller = Rc::downgrade(&self.controller);
        self.page.injector().set_listener(move |key: &SyntheticKey| {
            if let Some(controller) = controller.upgrade() {
                let outcome = Controller::dispatch(&controller, &KeyPress::new(&key.key));
                sink.borrow_mut().push(outcome);
            }
        });
        outcomes
    }

    fn key(&self, key: &str) -> Disposition {
        self.press(KeyPress::new(key))
    }

    fn label_text(&self) -> String {
        self.page.feedback_label().unwrap().text()
    }

    fn indicator_visible(&self) -> bool {
        self.page.indicator().unwrap().is_visible()
    }
}

fn watch_page(url: &str) -> Value {
    json!({
        "url": url,
        "body": [
            { "tag": "nav", "children": [
                { "tag": "input", "id": "search" },
                { "tag": "video", "id": "preview", "rect": { "width": 240, "height": 135 } }
            ]},
            { "tag": "div", "id": "player", "children": [
                { "tag": "video", "id": "main", "duration": 200,
                  "rect": { "width": 1280, "height": 720 } }
            ]}
        ]
    })
}

/// `depth` nested custom elements, each with a shadow root holding one video.
fn nested_shadow_page(depth: usize) -> Value {
    let mut level = json!([{ "tag": "video", "rect": { "width": 200, "height": 200 } }]);
    for _ in 0..depth {
        level = json!([
            { "tag": "video", "rect": { "width": 200, "height": 200 } },
            { "tag": "x-embed", "shadow": level }
        ]);
    }
    json!({ "url": "https://embeds.example.net/", "body": [ { "tag": "x-embed", "shadow": level } ] })
}

// ============================================================================
// Discovery and Selection
// ============================================================================

#[test]
fn test_scanner_counts_every_nested_video() {
    for depth in [0, 1, 4, 12] {
        let page = PageFixture::load(&nested_shadow_page(depth).to_string()).unwrap();
        assert_eq!(scan_videos(&page).len(), depth + 1, "depth {depth}");
    }
}

#[test]
fn test_main_video_selected_over_preview() {
    let session = Session::start(watch_page("https://videos.example.com/watch/1"));
    let main = session.page.video_by_id("main").unwrap();
    assert_eq!(session.controller.borrow().active_video(), Some(&main));
    assert!(session.indicator_visible());
}

#[test]
fn test_selector_respects_threshold_on_fixture() {
    let page = PageFixture::load(&watch_page("https://videos.example.com/").to_string()).unwrap();
    let selector = Selector::default();
    for video in scan_videos(&page) {
        let rect = video.bounding_rect();
        if selector.qualifies(&video) {
            assert!(rect.width > 150.0 && rect.height > 150.0);
        }
    }
    let preview = page.video_by_id("preview").unwrap();
    assert!(!selector.qualifies(&preview));
}

#[test]
fn test_video_inside_shadow_root_is_controlled() {
    let session = Session::start(json!({
        "url": "https://cdn.example.org/player",
        "body": [
            { "tag": "fancy-player", "shadow": [
                { "tag": "div", "children": [
                    { "tag": "video", "id": "inner", "duration": 60,
                      "rect": { "width": 854, "height": 480 } }
                ]}
            ]}
        ]
    }));
    let inner = session.page.video_by_id("inner").unwrap();
    assert_eq!(session.controller.borrow().active_video(), Some(&inner));

    assert_eq!(session.key("d"), Disposition::Handled);
    assert_eq!(inner.current_time(), 5.0);
    assert_eq!(session.label_text(), "5s »");
}

#[test]
fn test_hidden_video_clears_selection_and_indicator() {
    let session = Session::start(watch_page("https://videos.example.com/"));
    assert!(session.indicator_visible());

    let player = session.page.find_by_id("player").unwrap();
    session.page.set_hidden(player, true);
    session.run_loop.advance(SCAN);

    assert!(session.controller.borrow().active_video().is_none());
    assert!(!session.indicator_visible());
    assert_eq!(session.key("k"), Disposition::PassThrough);
}

#[test]
fn test_indicator_lifecycle() {
    let session = Session::start(watch_page("https://videos.example.com/"));
    assert!(session.indicator_visible());

    session.run_loop.advance(Duration::from_millis(2999));
    assert!(session.indicator_visible());
    session.run_loop.advance(Duration::from_millis(1));
    assert!(!session.indicator_visible());

    // Later scans of the same video leave it hidden.
    session.run_loop.advance(SCAN * 5);
    assert!(!session.indicator_visible());
    assert_eq!(session.page.indicator().unwrap().toggles(), 2);
}

// ============================================================================
// Generic Controls
// ============================================================================

#[test]
fn test_digit_seek() {
    let session = Session::start(watch_page("https://videos.example.com/"));
    assert_eq!(session.key("3"), Disposition::Handled);

    let main = session.page.video_by_id("main").unwrap();
    assert_eq!(main.current_time(), 60.0);
    assert_eq!(session.label_text(), "Seek to 30%");
}

#[test]
fn test_volume_up_clamps_at_full() {
    let session = Session::start(watch_page("https://videos.example.com/"));
    let main = session.page.video_by_id("main").unwrap();
    main.set_volume(0.0);

    for _ in 0..25 {
        assert_eq!(session.key("ArrowUp"), Disposition::Handled);
    }
    assert_eq!(main.volume(), 1.0);
    assert_eq!(session.label_text(), "Volume: 100%");
}

#[test]
fn test_full_key_sequence() {
    let session = Session::start(watch_page("https://videos.example.com/"));
    let main = session.page.video_by_id("main").unwrap();

    session.key("s");
    assert!(!main.paused());
    assert_eq!(session.label_text(), "▶ Play");

    session.key("l");
    session.key("l");
    session.key("a");
    assert_eq!(main.current_time(), 15.0);
    assert_eq!(session.label_text(), "« 5s");

    session.key("M");
    assert!(main.muted());
    assert_eq!(session.label_text(), "🔇 Muted");

    session.key("f");
    assert!(main.is_fullscreen());
    session.key("f");
    assert!(session.page.fullscreen_element().is_none());
    assert_eq!(session.label_text(), "Exit Fullscreen");

    session.key("k");
    assert!(main.paused());
    assert_eq!(session.label_text(), "❚❚ Pause");
}

#[test]
fn test_feedback_hides_after_last_message() {
    let session = Session::start(watch_page("https://videos.example.com/"));
    let label = session.page.feedback_label().unwrap();

    session.key("d");
    session.run_loop.advance(Duration::from_millis(500));
    session.key("d");
    session.run_loop.advance(Duration::from_millis(500));
    assert!(label.is_visible());
    session.run_loop.advance(Duration::from_millis(100));
    assert!(!label.is_visible());
}

#[test]
fn test_rejected_requests_do_not_break_controls() {
    let session = Session::start(watch_page("https://videos.example.com/"));
    session.page.set_fullscreen_allowed(false);
    session.page.set_autoplay_allowed(false);

    assert_eq!(session.key("f"), Disposition::Handled);
    assert_eq!(session.key("k"), Disposition::Handled);
    session.run_loop.run_until_stalled();

    assert!(session.page.fullscreen_element().is_none());
    assert_eq!(session.key("m"), Disposition::Handled);
    assert!(session.page.video_by_id("main").unwrap().muted());
}

#[test]
fn test_text_entry_never_intercepted() {
    let session = Session::start(watch_page("https://videos.example.com/"));
    let search = session.page.find_by_id("search").unwrap();
    let main = session.page.video_by_id("main").unwrap();

    for key in ["k", "f", "3", "ArrowUp", "m"] {
        let press = session.page.key_press_on(search, key);
        assert_eq!(press.target, KeyTarget::TextEntry);
        assert_eq!(session.press(press), Disposition::PassThrough);
    }
    assert_eq!(main.media().touches, 0);
    assert!(!session.page.feedback_label().unwrap().is_visible());
}

// ============================================================================
// Site Remapping
// ============================================================================

#[test]
fn test_remap_space_for_k() {
    let session = Session::start(watch_page("https://www.netflix.com/watch/80057281"));
    let main = session.page.video_by_id("main").unwrap();

    assert_eq!(session.key("k"), Disposition::Handled);
    let events = session.page.injector().events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].key, " ");
    assert!(events[0].bubbles);
    assert!(events[0].cancelable);

    assert_eq!(main.media().touches, 0);
    assert!(!session.page.feedback_label().unwrap().is_visible());
}

#[test]
fn test_remap_full_table() {
    let session = Session::start(watch_page("https://www.netflix.com/watch/1"));
    for key in ["s", "a", "d", "j", "l", "m", "f", "3", "ArrowUp"] {
        session.key(key);
    }
    let keys: Vec<String> = session
        .page
        .injector()
        .events()
        .into_iter()
        .map(|e| e.key)
        .collect();
    assert_eq!(keys, [" ", "ArrowLeft", "ArrowRight", "ArrowLeft", "ArrowRight", "m", "f"]);
}

#[test]
fn test_remapped_key_reaches_the_page_once() {
    let session = Session::start(watch_page("https://www.netflix.com/watch/1"));
    let outcomes = session.echo_injected_keys();

    assert_eq!(session.key("m"), Disposition::Handled);
    assert_eq!(session.key("f"), Disposition::Handled);

    // The injected "m" and "f" come back while the controller is busy and
    // are left to the site's player.
    assert_eq!(*outcomes.borrow(), vec![Disposition::PassThrough; 2]);
    assert_eq!(
        session.page.injector().events(),
        vec![SyntheticKey::keydown("m"), SyntheticKey::keydown("f")]
    );
}

#[test]
fn test_script_dispatched_keys_are_handled() {
    let session = Session::start(watch_page("https://www.youtube.com/watch?v=1"));
    let main = session.page.video_by_id("main").unwrap();

    // A key from a page script or virtual keyboard, delivered outside any
    // other controller work.
    assert_eq!(session.key("k"), Disposition::Handled);
    assert!(!main.paused());
    assert_eq!(session.label_text(), "▶ Play");
}

#[test]
fn test_unrelated_host_is_generic() {
    let session = Session::start(watch_page("https://netflix.com.example.org/watch"));
    assert_eq!(session.key("k"), Disposition::Handled);
    assert!(session.page.injector().events().is_empty());
    assert!(!session.page.video_by_id("main").unwrap().paused());
}

#[test]
fn test_custom_remap_host() {
    let config = ConfigLoader::load_str(
        r#"
        [[remap]]
        host = "stream.example.tv"
        profile = "netflix"
        "#,
    )
    .unwrap();
    assert_ne!(config.remap, Config::default().remap);

    let page = PageFixture::load(&watch_page("https://eu.stream.example.tv/play").to_string()).unwrap();
    let run_loop = Rc::new(ManualRunLoop::new());
    let controller = Rc::new(RefCell::new(Controller::new(page.clone(), config, run_loop.clone())));
    controller.borrow_mut().tick();

    let disposition = controller.borrow_mut().handle_key(&KeyPress::new("l"));
    assert_eq!(disposition, Disposition::Handled);
    assert_eq!(page.injector().events(), vec![SyntheticKey::keydown("ArrowRight")]);
}
