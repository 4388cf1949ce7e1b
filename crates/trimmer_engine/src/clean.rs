use std::borrow::Cow;

use ego_tree::NodeId;
use scraper::node::Node;
use scraper::Html;
use thiserror::Error;
use trimmer_logging::{trimmer_debug, trimmer_warn};

/// Elements removed from every document, together with their subtrees.
pub const DENYLIST: [&str; 9] = [
    "script", "style", "head", "meta", "link", "img", "form", "input", "button",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CleanError {
    #[error("html parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOutput {
    pub html: String,
    /// Denylisted elements that matched, nested matches included. The parser
    /// always creates a `head`, so every document counts at least one.
    pub removed_nodes: usize,
}

pub trait Cleaner: Send + Sync {
    fn clean(&self, raw: &[u8]) -> Result<CleanOutput, CleanError>;
}

/// Parses with html5ever's tolerant tree builder and detaches every
/// element named in [`DENYLIST`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DenylistCleaner;

impl Cleaner for DenylistCleaner {
    fn clean(&self, raw: &[u8]) -> Result<CleanOutput, CleanError> {
        let text = decode_utf8_lossy(raw);
        let mut document = Html::parse_document(&text);
        if !document.errors.is_empty() {
            trimmer_debug!("parser recovered from {} error(s)", document.errors.len());
        }
        if !document.tree.root().children().any(|node| node.value().is_element()) {
            return Err(CleanError::Parse("document has no root element".into()));
        }

        let doomed = denylisted_nodes(&document);
        for id in &doomed {
            if let Some(mut node) = document.tree.get_mut(*id) {
                node.detach();
            }
        }

        Ok(CleanOutput {
            html: document.html(),
            removed_nodes: doomed.len(),
        })
    }
}

/// Cleans `raw` with [`DenylistCleaner`] and returns the serialized document.
pub fn clean(raw: &[u8]) -> Result<String, CleanError> {
    DenylistCleaner.clean(raw).map(|output| output.html)
}

pub fn is_denylisted(tag: &str) -> bool {
    DENYLIST.iter().any(|denied| denied.eq_ignore_ascii_case(tag))
}

fn denylisted_nodes(document: &Html) -> Vec<NodeId> {
    document
        .tree
        .root()
        .descendants()
        .filter(|node| match node.value() {
            Node::Element(element) => is_denylisted(element.name()),
            _ => false,
        })
        .map(|node| node.id())
        .collect()
}

fn decode_utf8_lossy(raw: &[u8]) -> Cow<'_, str> {
    let text = String::from_utf8_lossy(raw);
    if let Cow::Owned(_) = text {
        trimmer_warn!("input is not valid UTF-8; invalid sequences were replaced");
    }
    text
}
