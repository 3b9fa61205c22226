//! The page the live-reload client acts on.

use parking_lot::Mutex;

use crate::debug;

/// A `<link>` element in the document head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkElement {
    pub rel: Option<String>,
    pub href: Option<String>,
}

impl LinkElement {
    pub fn stylesheet(href: impl Into<String>) -> Self {
        Self {
            rel: Some("stylesheet".into()),
            href: Some(href.into()),
        }
    }

    pub fn new(rel: Option<&str>, href: Option<&str>) -> Self {
        Self {
            rel: rel.map(str::to_string),
            href: href.map(str::to_string),
        }
    }
}

/// Document operations used by the live-reload client.
///
/// Called from the dispatcher task, so implementations must be thread-safe.
pub trait Page: Send + Sync {
    /// Whether the page was loaded over a secure transport.
    fn is_secure(&self) -> bool;

    /// Reload the whole page.
    fn reload(&self);

    /// Show or hide the document body.
    fn set_body_visible(&self, visible: bool);

    /// Detach every `<link>` from the head, in document order.
    fn take_links(&self) -> Vec<LinkElement>;

    /// Append a `<link>` to the head.
    fn append_link(&self, link: LinkElement);
}

#[derive(Debug)]
struct Document {
    links: Vec<LinkElement>,
    body_visible: bool,
    reloads: usize,
    hides: usize,
    shows: usize,
}

/// In-memory page that records what the client did to it.
#[derive(Debug)]
pub struct HeadlessPage {
    secure: bool,
    doc: Mutex<Document>,
}

impl HeadlessPage {
    pub fn new(secure: bool) -> Self {
        Self::with_links(secure, Vec::new())
    }

    pub fn with_links(secure: bool, links: Vec<LinkElement>) -> Self {
        Self {
            secure,
            doc: Mutex::new(Document {
                links,
                body_visible: true,
                reloads: 0,
                hides: 0,
                shows: 0,
            }),
        }
    }

    pub fn links(&self) -> Vec<LinkElement> {
        self.doc.lock().links.clone()
    }

    pub fn body_visible(&self) -> bool {
        self.doc.lock().body_visible
    }

    pub fn reloads(&self) -> usize {
        self.doc.lock().reloads
    }

    /// Number of times the body was made visible again.
    pub fn restores(&self) -> usize {
        self.doc.lock().shows
    }

    pub fn hides(&self) -> usize {
        self.doc.lock().hides
    }
}

impl Page for HeadlessPage {
    fn is_secure(&self) -> bool {
        self.secure
    }

    fn reload(&self) {
        self.doc.lock().reloads += 1;
        debug!("reload"; "page reloaded");
    }

    fn set_body_visible(&self, visible: bool) {
        let mut doc = self.doc.lock();
        doc.body_visible = visible;
        if visible {
            doc.shows += 1;
        } else {
            doc.hides += 1;
        }
    }

    fn take_links(&self) -> Vec<LinkElement> {
        std::mem::take(&mut self.doc.lock().links)
    }

    fn append_link(&self, link: LinkElement) {
        self.doc.lock().links.push(link);
    }
}
