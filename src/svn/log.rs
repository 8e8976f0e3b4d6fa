//! Reader for the document printed by `svn log --xml --verbose`.
//!
//! ```xml
//! <log>
//!   <logentry revision="2">
//!     <author>alice</author>
//!     <date>2016-05-30T20:13:42.123456Z</date>
//!     <paths>
//!       <path kind="file" action="A" copyfrom-path="/trunk/a.py" copyfrom-rev="1">/trunk/b.py</path>
//!     </paths>
//!     <msg>Copied a to b.</msg>
//!   </logentry>
//! </log>
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use roxmltree::{Document, Node};

use crate::error::{Error, Result};

/// Pattern of `<date>` once the trailing timezone marker is stripped.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const UNKNOWN_REVISION: &str = "<unknown>";

/// One `<logentry>` as it appears in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    pub revision: String,
    pub author: Option<String>,
    pub message: String,
    pub date: String,
    pub paths: Vec<RawPath>,
}

/// One `<path>` of a `<logentry>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPath {
    pub path: String,
    pub kind: String,
    pub action: String,
    pub copyfrom_rev: Option<String>,
    pub copyfrom_path: Option<String>,
}

/// Parses a complete log document into its commits, in document order.
///
/// Fails on the first entry that misses a required field. Nothing is
/// returned for a document that fails, so callers never see a partial log.
pub fn parse_log(xml: &str) -> Result<Vec<RawCommit>> {
    let document = Document::parse(xml)
        .map_err(|e| Error::malformed(UNKNOWN_REVISION, format!("invalid XML: {e}")))?;
    let root = document.root_element();
    if root.tag_name().name() != "log" {
        return Err(Error::malformed(
            UNKNOWN_REVISION,
            format!("root element must be <log> but is <{}>", root.tag_name().name()),
        ));
    }

    root.children()
        .filter(|node| node.has_tag_name("logentry"))
        .map(parse_logentry)
        .collect()
}

fn parse_logentry(entry: Node<'_, '_>) -> Result<RawCommit> {
    let revision = entry
        .attribute("revision")
        .filter(|revision| !revision.is_empty())
        .ok_or_else(|| Error::malformed(UNKNOWN_REVISION, "missing attribute revision"))?
        .to_string();

    let date = child_element(entry, "date")
        .and_then(|date| date.text())
        .map(str::trim)
        .filter(|date| !date.is_empty())
        .ok_or_else(|| Error::malformed(&revision, "missing element date"))?
        .to_string();

    // Anonymous commits and revision 0 carry no <author>; a commit without
    // a message has an empty or absent <msg>.
    let author = child_element(entry, "author")
        .and_then(|author| author.text())
        .map(ToOwned::to_owned);
    let message = child_element(entry, "msg")
        .and_then(|msg| msg.text())
        .unwrap_or_default()
        .to_string();

    let paths = match child_element(entry, "paths") {
        Some(paths) => paths
            .children()
            .filter(|node| node.has_tag_name("path"))
            .map(|path| parse_path(&revision, path))
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    Ok(RawCommit {
        revision,
        author,
        message,
        date,
        paths,
    })
}

fn parse_path(revision: &str, node: Node<'_, '_>) -> Result<RawPath> {
    let path = node
        .text()
        .filter(|path| !path.is_empty())
        .ok_or_else(|| Error::malformed(revision, "missing path text"))?
        .to_string();
    let required = |name: &str| {
        node.attribute(name)
            .map(ToOwned::to_owned)
            .ok_or_else(|| Error::malformed(revision, format!("missing attribute {name} of {path}")))
    };

    Ok(RawPath {
        kind: required("kind")?,
        action: required("action")?,
        copyfrom_rev: node.attribute("copyfrom-rev").map(ToOwned::to_owned),
        copyfrom_path: node.attribute("copyfrom-path").map(ToOwned::to_owned),
        path,
    })
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.has_tag_name(name))
}

/// Parses the text of a `<date>` element as UTC.
pub fn parse_commit_time(revision: &str, text: &str) -> Result<DateTime<Utc>> {
    let naive = text
        .strip_suffix('Z')
        .and_then(|text| NaiveDateTime::parse_from_str(text, DATE_FORMAT).ok())
        .ok_or_else(|| Error::malformed(revision, format!("cannot parse date {text:?}")))?;
    Ok(naive.and_utc())
}
