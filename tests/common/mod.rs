#![allow(dead_code)]

use std::cell::RefCell;

use tempfile::TempDir;
use vcdb::error::Result;
use vcdb::store::{SqliteStore, Store};
use vcdb::svn::{LogSource, RevisionRange};

pub const REPOSITORY_URI: &str = "file:///tmp/vcdb/repo/";

/// Hands out a fixed log document and remembers what was requested.
pub struct FixtureLog {
    xml: String,
    pub requested: RefCell<Vec<RevisionRange>>,
}

impl FixtureLog {
    pub fn new(xml: impl Into<String>) -> Self {
        Self {
            xml: xml.into(),
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl LogSource for FixtureLog {
    fn log_xml(&self, _uri: &str, range: &RevisionRange) -> Result<String> {
        self.requested.borrow_mut().push(range.clone());
        Ok(self.xml.clone())
    }
}

pub struct TestContext {
    pub temp_dir: TempDir,
    pub store: SqliteStore,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let store = SqliteStore::new(temp_dir.path().join("vcdb.db")).expect("open store");
        store.initialize().expect("initialize store");
        Self { temp_dir, store }
    }

    pub fn db_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("vcdb.db")
    }
}

/// A `<path>` element; `copy` is `(copyfrom-rev, copyfrom-path)`.
pub fn path_xml(kind: &str, action: &str, path: &str, copy: Option<(&str, &str)>) -> String {
    match copy {
        Some((rev, from)) => format!(
            r#"<path kind="{kind}" action="{action}" copyfrom-path="{from}" copyfrom-rev="{rev}" prop-mods="false" text-mods="false">{path}</path>"#
        ),
        None => format!(
            r#"<path kind="{kind}" action="{action}" prop-mods="false" text-mods="true">{path}</path>"#
        ),
    }
}

pub fn logentry_xml(revision: u32, message: &str, paths: &[String]) -> String {
    format!(
        "<logentry revision=\"{revision}\">\n<author>tester</author>\n<date>2016-06-{day:02}T10:00:00.{revision:06}Z</date>\n<paths>\n{}\n</paths>\n<msg>{message}</msg>\n</logentry>\n",
        paths.join("\n"),
        day = revision.min(28) + 1,
    )
}

pub fn log_xml(entries: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<log>\n{}</log>\n",
        entries.concat()
    )
}

/// History of a small project: adds, a deletion, edits, a copy, two moves,
/// a replacement and a commit without message.
pub fn project_history(last_revision: u32) -> String {
    let entries = vec![
        logentry_xml(1, "Added project folder.", &[
            path_xml("dir", "A", "/project", None),
            path_xml("dir", "A", "/project/trunk", None),
        ]),
        logentry_xml(2, "Added tool to greet.", &[
            path_xml("file", "A", "/project/trunk/empty.txt", None),
            path_xml("file", "A", "/project/trunk/hello.py", None),
            path_xml("file", "A", "/project/trunk/useless.txt", None),
        ]),
        logentry_xml(3, "Removed useless file.", &[
            path_xml("file", "D", "/project/trunk/useless.txt", None),
        ]),
        logentry_xml(4, "Added exclamation mark.", &[
            path_xml("file", "M", "/project/trunk/hello.py", None),
        ]),
        logentry_xml(5, "Added another tool to greet.", &[
            path_xml("file", "A", "/project/trunk/hello_again.py", Some(("4", "/project/trunk/hello.py"))),
        ]),
        logentry_xml(6, "Translated to German.", &[
            path_xml("file", "A", "/project/trunk/hallo.py", Some(("5", "/project/trunk/hello.py"))),
            path_xml("file", "D", "/project/trunk/hello.py", None),
        ]),
        logentry_xml(7, "Renamed to clearer name.", &[
            path_xml("file", "D", "/project/trunk/hallo.py", None),
            path_xml("file", "A", "/project/trunk/hallo_welt.py", Some(("6", "/project/trunk/hallo.py"))),
        ]),
        logentry_xml(8, "Added extra ohmpf.", &[
            path_xml("file", "M", "/project/trunk/hallo_welt.py", None),
        ]),
        logentry_xml(9, "Toned things down again.", &[
            path_xml("file", "M", "/project/trunk/hallo_welt.py", None),
        ]),
        logentry_xml(10, "Changed to a different kind of empty.", &[
            path_xml("file", "R", "/project/trunk/empty.txt", None),
        ]),
        logentry_xml(11, "", &[
            path_xml("file", "A", "/project/trunk/pointless.tmp", None),
        ]),
    ];
    log_xml(&entries[..last_revision as usize])
}
