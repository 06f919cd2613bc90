#![allow(dead_code)]

use doc_store::{DocumentRegistry, MemoryBackend};
use tracing_subscriber::EnvFilter;

/// Install a test subscriber when `RUST_LOG` is set
pub fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_some() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

pub fn doc_marker(id: &str) -> String {
    format!("<!-- {{\"achiles-ide-document\":{{\"id\":\"{}\"}}}} -->\n", id)
}

pub fn chapter_marker(id: &str) -> String {
    format!("<!-- {{\"achiles-ide-chapter\":{{\"id\":\"{}\"}}}} -->\n", id)
}

pub fn paragraph_marker(id: &str) -> String {
    format!("<!-- {{\"achiles-ide-paragraph\":{{\"id\":\"{}\"}}}} -->\n", id)
}

/// A registry over a memory backend seeded with the given files
pub fn registry_with(files: &[(&str, &str)]) -> DocumentRegistry<MemoryBackend> {
    init_tracing();
    let backend = files
        .iter()
        .fold(MemoryBackend::new(), |backend, (path, content)| {
            backend.with_file(path, *content)
        });
    DocumentRegistry::new(backend)
}

/// A document with two chapters of two paragraphs each
pub fn two_chapter_book() -> String {
    [
        doc_marker("d1"),
        "Preface\n\n".to_string(),
        chapter_marker("c1"),
        "## One\n".to_string(),
        paragraph_marker("p1"),
        "first\n".to_string(),
        paragraph_marker("p2"),
        "second\n\n".to_string(),
        chapter_marker("c2"),
        "## Two\n".to_string(),
        paragraph_marker("p3"),
        "third\n".to_string(),
        paragraph_marker("p4"),
        "fourth\n".to_string(),
    ]
    .concat()
}
