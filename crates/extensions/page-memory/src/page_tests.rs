use super::*;
use futures::executor::block_on;
use vidctl_protocols::{SyntheticKey, VideoElement};

fn page_with_video() -> (MemoryPage, MemoryVideo, NodeId) {
    let page = MemoryPage::new("https://www.example.com/watch?v=1");
    let wrapper = page.append_element(page.body(), "div");
    let video = page.append_video(wrapper, Rect::sized(640.0, 360.0));
    (page, video, wrapper)
}

#[test]
fn test_videos_in_document_order() {
    let page = MemoryPage::new("https://example.com/");
    let a = page.append_element(page.body(), "section");
    let first = page.append_video(a, Rect::sized(200.0, 200.0));
    let second = page.append_video(page.body(), Rect::sized(300.0, 300.0));

    let videos = page.videos_in(&page.document_root());
    assert_eq!(videos, vec![first, second]);
}

#[test]
fn test_videos_in_skips_shadow_content() {
    let page = MemoryPage::new("https://example.com/");
    let host = page.append_element(page.body(), "x-player");
    let shadow = page.attach_shadow(host);
    let hidden_away = page.append_video(shadow, Rect::sized(500.0, 300.0));

    let root = page.document_root();
    assert!(page.videos_in(&root).is_empty());

    let roots = page.shadow_roots_in(&root);
    assert_eq!(roots, vec![MemoryRoot(shadow)]);
    assert_eq!(page.videos_in(&roots[0]), vec![hidden_away]);
}

#[test]
fn test_hidden_ancestor_removes_layout() {
    let (page, video, wrapper) = page_with_video();
    assert!(video.has_layout_parent());
    assert_eq!(video.bounding_rect(), Rect::sized(640.0, 360.0));

    page.set_hidden(wrapper, true);
    assert!(!video.has_layout_parent());
    assert_eq!(video.bounding_rect(), Rect::default());
}

#[test]
fn test_removed_video_is_not_rendered() {
    let (page, video, wrapper) = page_with_video();
    page.remove(wrapper);
    assert!(!video.has_layout_parent());
    assert!(page.videos_in(&page.document_root()).is_empty());
}

#[test]
fn test_shadow_content_is_rendered_through_host() {
    let page = MemoryPage::new("https://example.com/");
    let host = page.append_element(page.body(), "x-player");
    let shadow = page.attach_shadow(host);
    let video = page.append_video(shadow, Rect::sized(500.0, 300.0));
    assert!(video.has_layout_parent());

    page.set_hidden(host, true);
    assert!(!video.has_layout_parent());
}

#[test]
fn test_seek_is_clamped() {
    let (_page, video, _) = page_with_video();
    video.set_duration(100.0);

    video.set_current_time(-4.0);
    assert_eq!(video.current_time(), 0.0);

    video.set_current_time(250.0);
    assert_eq!(video.current_time(), 100.0);
}

#[test]
fn test_play_and_pause() {
    let (page, video, _) = page_with_video();
    assert!(video.paused());

    block_on(video.play()).unwrap();
    assert!(!video.paused());

    video.pause();
    assert!(video.paused());

    page.set_autoplay_allowed(false);
    let err = block_on(video.play()).unwrap_err();
    assert!(matches!(err, PageError::Rejected(_)));
    assert!(video.paused());
    assert_eq!(video.media().touches, 3);
}

#[test]
fn test_fullscreen_round_trip() {
    let (page, video, _) = page_with_video();
    assert!(!page.fullscreen_active());

    block_on(video.request_fullscreen()).unwrap();
    assert!(page.fullscreen_active());
    assert_eq!(page.fullscreen_element(), Some(video.node()));
    assert!(video.is_fullscreen());

    page.exit_fullscreen();
    assert!(!page.fullscreen_active());
}

#[test]
fn test_fullscreen_denied() {
    let (page, video, _) = page_with_video();
    page.set_fullscreen_allowed(false);
    assert!(block_on(video.request_fullscreen()).is_err());
    assert!(!page.fullscreen_active());
}

#[test]
fn test_feedback_label_anchors_to_parent() {
    let (page, video, wrapper) = page_with_video();
    let surface = page.create_feedback_label().unwrap();
    assert!(!page.is_positioned(wrapper));

    surface.anchor_to(&video).unwrap();
    let label = page.feedback_label().unwrap();
    assert_eq!(label.parent(), Some(wrapper));
    assert!(page.is_positioned(wrapper));

    // Same parent again is not a move.
    surface.anchor_to(&video).unwrap();
    assert_eq!(label.moves(), 1);
}

#[test]
fn test_feedback_label_needs_parent() {
    let (page, video, wrapper) = page_with_video();
    let surface = page.create_feedback_label().unwrap();
    // Detach the video itself.
    page.remove(video.node());
    let err = surface.anchor_to(&video).unwrap_err();
    assert!(matches!(err, PageError::MissingTarget(_)));
    assert!(!page.is_positioned(wrapper));
}

#[test]
fn test_indicator_is_tracked() {
    let page = MemoryPage::new("https://example.com/");
    assert!(page.indicator().is_none());

    let overlay = page.create_indicator().unwrap();
    overlay.set_text("on");
    overlay.set_visible(true);

    let tracked = page.indicator().unwrap();
    assert_eq!(tracked.text(), "on");
    assert!(tracked.is_visible());
    assert_eq!(tracked.toggles(), 1);
}

#[test]
fn test_injector_records_events() {
    let page = MemoryPage::new("https://www.netflix.com/watch/1");
    let injector = page.key_injector();
    injector.inject(&SyntheticKey::keydown("m")).unwrap();

    let recorder = page.injector();
    assert_eq!(recorder.events(), vec![SyntheticKey::keydown("m")]);

    recorder.set_failing(true);
    assert!(injector.inject(&SyntheticKey::keydown("f")).is_err());
    assert_eq!(recorder.events().len(), 1);
}

#[test]
fn test_injector_delivers_to_listener() {
    let page = MemoryPage::new("https://example.com/");
    let recorder = page.injector();
    let heard = Rc::new(RefCell::new(Vec::new()));
    let sink = heard.clone();
    recorder.set_listener(move |key: &SyntheticKey| sink.borrow_mut().push(key.key.clone()));

    page.key_injector().inject(&SyntheticKey::keydown(" ")).unwrap();
    assert_eq!(*heard.borrow(), vec![" ".to_string()]);

    recorder.set_failing(true);
    assert!(page.key_injector().inject(&SyntheticKey::keydown("m")).is_err());
    assert_eq!(heard.borrow().len(), 1);
}

#[test]
fn test_key_press_on_text_entry() {
    let page = MemoryPage::new("https://example.com/");
    let input = page.append_element(page.body(), "INPUT");
    let editor = page.append_element(page.body(), "div");
    page.set_content_editable(editor, true);
    let plain = page.append_element(page.body(), "div");

    assert_eq!(page.key_press_on(input, "k").target, KeyTarget::TextEntry);
    assert_eq!(page.key_press_on(editor, "k").target, KeyTarget::TextEntry);
    assert_eq!(page.key_press_on(plain, "k").target, KeyTarget::Other);
}

#[test]
fn test_handles_compare_by_page_and_node() {
    let (page, video, _) = page_with_video();
    let other = MemoryPage::new("https://example.com/");
    let other_wrapper = other.append_element(other.body(), "div");
    let other_video = other.append_video(other_wrapper, Rect::sized(640.0, 360.0));

    assert_eq!(page.video(video.node()), Some(video.clone()));
    assert_eq!(video.node(), other_video.node());
    assert_ne!(video, other_video);
    assert!(page.video(page.body()).is_none());
}

#[test]
fn test_root_keys_follow_root_identity() {
    let page = MemoryPage::new("https://example.com/");
    let host = page.append_element(page.body(), "x-player");
    let shadow = page.attach_shadow(host);
    let other = page.append_element(page.body(), "x-b");
    page.share_shadow_root(other, shadow);

    let document = page.document_root();
    let roots = page.shadow_roots_in(&document);
    assert_eq!(roots.len(), 2);
    assert_eq!(page.root_key(&roots[0]), page.root_key(&roots[1]));
    assert_eq!(page.root_key(&roots[0]), shadow);
    assert_ne!(page.root_key(&document), shadow);
}
