//! JSON page fixtures.
//!
//! ```json
//! {
//!   "url": "https://www.example.com/watch",
//!   "body": [
//!     { "tag": "div", "children": [
//!       { "tag": "video", "id": "main", "rect": { "width": 1280, "height": 720 } }
//!     ]}
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vidctl_protocols::Rect;

use crate::page::{MemoryPage, NodeId};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid fixture node: {0}")]
    InvalidNode(String),
}

/// A whole document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageFixture {
    pub url: String,
    #[serde(default)]
    pub body: Vec<FixtureNode>,
}

/// One element and its subtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureNode {
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub rect: Option<Rect>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub positioned: bool,
    #[serde(default)]
    pub content_editable: bool,
    /// Media duration for `<video>` nodes.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub children: Vec<FixtureNode>,
    /// Content of an attached shadow root.
    #[serde(default)]
    pub shadow: Option<Vec<FixtureNode>>,
}

impl PageFixture {
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse and build in one step.
    pub fn load(json: &str) -> Result<MemoryPage, FixtureError> {
        Self::from_json(json)?.build()
    }

    pub fn build(&self) -> Result<MemoryPage, FixtureError> {
        let page = MemoryPage::new(self.url.clone());
        let body = page.body();
        for node in &self.body {
            build_node(&page, body, node)?;
        }
        Ok(page)
    }
}

fn build_node(page: &MemoryPage, parent: NodeId, node: &FixtureNode) -> Result<NodeId, FixtureError> {
    let tag = node.tag.trim();
    if tag.is_empty() {
        return Err(FixtureError::InvalidNode("empty tag".to_string()));
    }

    let id = if tag.eq_ignore_ascii_case("video") {
        let video = page.append_video(parent, node.rect.unwrap_or_default());
        if let Some(duration) = node.duration {
            video.set_duration(duration);
        }
        video.node()
    } else {
        if node.duration.is_some() {
            return Err(FixtureError::InvalidNode(format!(
                "<{}> cannot carry a media duration",
                tag
            )));
        }
        let id = page.append_element(parent, tag);
        if let Some(rect) = node.rect {
            page.state.borrow_mut().node_mut(id).rect = rect;
        }
        id
    };

    if let Some(element_id) = &node.id {
        page.set_element_id(id, element_id.clone());
    }
    page.set_hidden(id, node.hidden);
    page.set_positioned(id, node.positioned);
    page.set_content_editable(id, node.content_editable);

    for child in &node.children {
        build_node(page, id, child)?;
    }
    if let Some(shadow_children) = &node.shadow {
        let shadow = page.attach_shadow(id);
        for child in shadow_children {
            build_node(page, shadow, child)?;
        }
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidctl_protocols::{Page, VideoElement};

    const NESTED: &str = r#"{
        "url": "https://player.example.org/embed/42",
        "body": [
            { "tag": "header", "children": [ { "tag": "input", "id": "search" } ] },
            { "tag": "custom-player", "id": "host", "shadow": [
                { "tag": "div", "positioned": true, "children": [
                    { "tag": "video", "id": "inner", "duration": 95.5,
                      "rect": { "x": 10, "y": 20, "width": 800, "height": 450 } }
                ]}
            ]}
        ]
    }"#;

    #[test]
    fn test_load_nested_fixture() {
        let page = PageFixture::load(NESTED).unwrap();
        assert_eq!(page.location(), "https://player.example.org/embed/42");

        let root = page.document_root();
        assert!(page.videos_in(&root).is_empty());

        let shadows = page.shadow_roots_in(&root);
        assert_eq!(shadows.len(), 1);

        let videos = page.videos_in(&shadows[0]);
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].duration(), 95.5);
        assert_eq!(videos[0].bounding_rect(), Rect::new(10.0, 20.0, 800.0, 450.0));
        assert_eq!(Some(videos[0].clone()), page.video_by_id("inner"));
    }

    #[test]
    fn test_flags_are_applied() {
        let page = PageFixture::load(NESTED).unwrap();
        let inner = page.video_by_id("inner").unwrap();
        let wrapper = page.parent(inner.node()).unwrap();
        assert!(page.is_positioned(wrapper));

        let search = page.find_by_id("search").unwrap();
        assert_eq!(page.tag(search), "input");
    }

    #[test]
    fn test_invalid_json() {
        let err = PageFixture::load("{ not json").unwrap_err();
        assert!(matches!(err, FixtureError::Json(_)));
    }

    #[test]
    fn test_empty_tag_rejected() {
        let err = PageFixture::load(r#"{ "url": "about:blank", "body": [ { "tag": " " } ] }"#)
            .unwrap_err();
        assert!(matches!(err, FixtureError::InvalidNode(_)));
    }

    #[test]
    fn test_duration_on_non_video_rejected() {
        let json = r#"{ "url": "about:blank", "body": [ { "tag": "div", "duration": 3 } ] }"#;
        let err = PageFixture::load(json).unwrap_err();
        assert!(err.to_string().contains("<div>"));
    }
}
