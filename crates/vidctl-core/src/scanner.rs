//! Video discovery across the document and its shadow roots.

use std::collections::HashSet;

use tracing::trace;
use vidctl_protocols::Page;

/// Every video element reachable from the document, at any shadow depth.
///
/// Roots are processed from a worklist; a root reached twice is only
/// searched once. The order of the result is unspecified.
pub fn scan_videos<P: Page>(page: &P) -> Vec<P::Video> {
    let mut worklist = vec![page.document_root()];
    let mut visited = HashSet::new();
    let mut found = Vec::new();

    while let Some(root) = worklist.pop() {
        if !visited.insert(page.root_key(&root)) {
            continue;
        }
        found.extend(page.videos_in(&root));
        worklist.extend(page.shadow_roots_in(&root));
    }

    trace!("Scanned {} roots, {} videos", visited.len(), found.len());
    found
}
