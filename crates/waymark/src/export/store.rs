//! Pre-rendered QR code store with optional disk persistence.
//!
//! Every location's code is rendered once when the store is built:
//! - Tier 1: in-memory PNG bytes (served to the admin gallery and export)
//! - Tier 2: `<output_dir>/<id>.png` files for operators who print from disk
//!
//! Content is deterministic for a fixed base URL, so concurrent or repeated
//! persistence is safe (last writer wins).

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{pack_archive, render_qr};
use crate::config::QrConfig;
use crate::hunt::Registry;
use waymark_common::WaymarkError;
use waymark_common::constants::{ARCHIVE_NAME_PREFIX, ARCHIVE_TIMESTAMP_FORMAT};

/// A location's rendered QR code
#[derive(Clone, Debug)]
pub struct RenderedCode {
    /// Location id
    pub id: String,
    /// Location display name
    pub display_name: String,
    /// URL encoded in the code
    pub url: String,
    /// File name inside archives and on disk
    pub file_name: String,
    /// PNG bytes
    pub png: Vec<u8>,
}

impl RenderedCode {
    /// Inline `data:` URI for embedding in HTML
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

/// Runtime statistics
#[derive(Default)]
pub struct QrStoreStats {
    /// Archives built for download
    pub archives_built: AtomicU64,
    /// Image files written to disk
    pub files_written: AtomicU64,
}

/// Snapshot of store statistics
#[derive(Clone, Debug, Serialize)]
pub struct QrStoreStatsSnapshot {
    pub codes: usize,
    pub archives_built: u64,
    pub files_written: u64,
}

/// Rendered QR codes in authoring order
pub struct QrStore {
    codes: Vec<RenderedCode>,
    stats: QrStoreStats,
}

impl QrStore {
    /// Render a code for every location in the registry
    pub fn render_all(
        registry: &Registry,
        base_url: &str,
        config: &QrConfig,
    ) -> Result<Self, WaymarkError> {
        let codes = registry
            .iter()
            .map(|record| {
                let url = record.canonical_url(base_url);
                let png = render_qr(&url, config)?;
                Ok(RenderedCode {
                    id: record.id.clone(),
                    display_name: record.display_name.clone(),
                    url,
                    file_name: record.qr_file_name(),
                    png,
                })
            })
            .collect::<Result<Vec<_>, WaymarkError>>()?;

        tracing::debug!(count = codes.len(), base_url = %base_url, "Rendered QR codes");

        Ok(Self {
            codes,
            stats: QrStoreStats::default(),
        })
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&RenderedCode> {
        self.codes.iter().find(|code| code.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderedCode> {
        self.codes.iter()
    }

    /// Write every code to `dir`, skipping files whose content is unchanged.
    ///
    /// Returns the number of files written.
    pub async fn persist(&self, dir: &Path) -> Result<usize, WaymarkError> {
        tokio::fs::create_dir_all(dir).await?;

        let mut written = 0;
        for code in &self.codes {
            let path = dir.join(&code.file_name);

            if let Ok(existing) = tokio::fs::read(&path).await {
                if existing == code.png {
                    continue;
                }
            }

            tokio::fs::write(&path, &code.png).await?;
            written += 1;
        }

        self.stats
            .files_written
            .fetch_add(written as u64, Ordering::Relaxed);
        tracing::debug!(written = written, dir = ?dir, "Persisted QR codes");

        Ok(written)
    }

    /// Pack every code into a zip, one `<id>.png` entry per location
    pub fn archive(&self) -> Result<Vec<u8>, WaymarkError> {
        let bytes = pack_archive(
            self.codes
                .iter()
                .map(|code| (code.file_name.as_str(), code.png.as_slice())),
        )?;

        self.stats.archives_built.fetch_add(1, Ordering::Relaxed);
        Ok(bytes)
    }

    /// Download name for an archive built at `now`
    pub fn archive_file_name(now: DateTime<Utc>) -> String {
        format!(
            "{}{}.zip",
            ARCHIVE_NAME_PREFIX,
            now.format(ARCHIVE_TIMESTAMP_FORMAT)
        )
    }

    /// Get statistics snapshot
    pub fn get_stats(&self) -> QrStoreStatsSnapshot {
        QrStoreStatsSnapshot {
            codes: self.codes.len(),
            archives_built: self.stats.archives_built.load(Ordering::Relaxed),
            files_written: self.stats.files_written.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::{Cursor, Read};
    use waymark_common::LocationRecord;

    fn registry() -> Registry {
        Registry::new(
            None,
            vec![
                LocationRecord::new("A", "Library", "Go to B", "", Some("B")),
                LocationRecord::new("B", "Lab", "Go to C", "start", Some("C")),
                LocationRecord::new("C", "Oak", "Done", "lab", None),
            ],
        )
        .unwrap()
    }

    fn small_qr() -> QrConfig {
        QrConfig {
            module_size: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_render_all_one_code_per_location() {
        let store = QrStore::render_all(&registry(), "https://hunt.example.org/", &small_qr()).unwrap();
        assert_eq!(store.len(), 3);

        let b = store.get("B").unwrap();
        assert_eq!(b.url, "https://hunt.example.org/location/B");
        assert_eq!(b.file_name, "B.png");
        assert!(b.data_uri().starts_with("data:image/png;base64,iVBOR"));
        assert!(store.get("Z").is_none());
    }

    #[test]
    fn test_archive_has_entry_per_location() {
        let registry = registry();
        let store = QrStore::render_all(&registry, "http://localhost:10000", &small_qr()).unwrap();
        let bytes = store.archive().unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), registry.len());

        for (i, record) in registry.iter().enumerate() {
            let mut entry = archive.by_index(i).unwrap();
            assert_eq!(entry.name(), format!("{}.png", record.id));
            let mut png = Vec::new();
            entry.read_to_end(&mut png).unwrap();
            assert_eq!(png, store.get(&record.id).unwrap().png);
        }

        assert_eq!(store.get_stats().archives_built, 1);
    }

    #[test]
    fn test_archive_file_name() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 9, 5, 3).unwrap();
        assert_eq!(QrStore::archive_file_name(now), "qr_codes_20261017_090503.zip");
    }

    #[tokio::test]
    async fn test_persist_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("qr_codes");
        let store = QrStore::render_all(&registry(), "http://localhost:10000", &small_qr()).unwrap();

        assert_eq!(store.persist(&out).await.unwrap(), 3);
        assert_eq!(store.persist(&out).await.unwrap(), 0);

        let on_disk = std::fs::read(out.join("A.png")).unwrap();
        assert_eq!(on_disk, store.get("A").unwrap().png);
        assert_eq!(store.get_stats().files_written, 3);
    }

    #[tokio::test]
    async fn test_persist_overwrites_stale_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("B.png"), b"stale").unwrap();

        let store = QrStore::render_all(&registry(), "http://localhost:10000", &small_qr()).unwrap();
        assert_eq!(store.persist(dir.path()).await.unwrap(), 3);
        assert_eq!(
            std::fs::read(dir.path().join("B.png")).unwrap(),
            store.get("B").unwrap().png
        );
    }
}
