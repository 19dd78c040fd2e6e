use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::Utc;
use uuid::Uuid;

use crate::document::model::{AnnotationDocument, AnnotationDraft};
use crate::foundation::error::{FramemarkError, FramemarkResult};

/// Persistence boundary for annotation documents.
///
/// Every call either fully succeeds or leaves the store as it was.
pub trait AnnotationStore {
    /// Store `draft` as a new document with a fresh id.
    fn create(&mut self, draft: AnnotationDraft) -> FramemarkResult<AnnotationDocument>;

    /// Replace the content of document `id`.
    fn update(&mut self, id: Uuid, draft: AnnotationDraft) -> FramemarkResult<AnnotationDocument>;

    fn delete(&mut self, id: Uuid) -> FramemarkResult<()>;

    fn get(&self, id: Uuid) -> FramemarkResult<Option<AnnotationDocument>>;

    /// Documents for `video_name`, ascending by timestamp.
    fn list_for_video(&self, video_name: &str) -> FramemarkResult<Vec<AnnotationDocument>>;
}

fn sort_by_timestamp(docs: &mut [AnnotationDocument]) {
    docs.sort_by(|a, b| {
        a.timestamp
            .total_cmp(&b.timestamp)
            .then(a.created_at.cmp(&b.created_at))
    });
}

fn not_found(id: Uuid) -> FramemarkError {
    FramemarkError::store(format!("no annotation with id {id}"))
}

/// In-process store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    docs: BTreeMap<Uuid, AnnotationDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl AnnotationStore for MemoryStore {
    fn create(&mut self, draft: AnnotationDraft) -> FramemarkResult<AnnotationDocument> {
        draft.validate()?;
        let doc = draft.into_document(Utc::now());
        self.docs.insert(doc.id, doc.clone());
        Ok(doc)
    }

    fn update(&mut self, id: Uuid, draft: AnnotationDraft) -> FramemarkResult<AnnotationDocument> {
        draft.validate()?;
        let doc = self.docs.get_mut(&id).ok_or_else(|| not_found(id))?;
        doc.apply(draft, Utc::now());
        Ok(doc.clone())
    }

    fn delete(&mut self, id: Uuid) -> FramemarkResult<()> {
        self.docs.remove(&id).map(|_| ()).ok_or_else(|| not_found(id))
    }

    fn get(&self, id: Uuid) -> FramemarkResult<Option<AnnotationDocument>> {
        Ok(self.docs.get(&id).cloned())
    }

    fn list_for_video(&self, video_name: &str) -> FramemarkResult<Vec<AnnotationDocument>> {
        let mut out: Vec<_> = self
            .docs
            .values()
            .filter(|d| d.video_name == video_name)
            .cloned()
            .collect();
        sort_by_timestamp(&mut out);
        Ok(out)
    }
}

/// One pretty-printed JSON file per document, named `<id>.json`, under a directory.
#[derive(Clone, Debug)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Open (creating if needed) the store directory.
    pub fn open(dir: impl Into<PathBuf>) -> FramemarkResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create annotation store dir '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn write(&self, doc: &AnnotationDocument) -> FramemarkResult<()> {
        let json = doc.to_json_pretty()?;
        let path = self.path_for(doc.id);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .with_context(|| format!("write annotation '{}'", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("replace annotation '{}'", path.display()))?;
        Ok(())
    }
}

impl AnnotationStore for JsonDirStore {
    fn create(&mut self, draft: AnnotationDraft) -> FramemarkResult<AnnotationDocument> {
        draft.validate()?;
        let doc = draft.into_document(Utc::now());
        self.write(&doc)?;
        tracing::debug!(id = %doc.id, dir = %self.dir.display(), "annotation file created");
        Ok(doc)
    }

    fn update(&mut self, id: Uuid, draft: AnnotationDraft) -> FramemarkResult<AnnotationDocument> {
        draft.validate()?;
        let mut doc = self.get(id)?.ok_or_else(|| not_found(id))?;
        doc.apply(draft, Utc::now());
        self.write(&doc)?;
        Ok(doc)
    }

    fn delete(&mut self, id: Uuid) -> FramemarkResult<()> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(not_found(id));
        }
        std::fs::remove_file(&path)
            .with_context(|| format!("remove annotation '{}'", path.display()))?;
        Ok(())
    }

    fn get(&self, id: Uuid) -> FramemarkResult<Option<AnnotationDocument>> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        AnnotationDocument::from_path(&path).map(Some)
    }

    fn list_for_video(&self, video_name: &str) -> FramemarkResult<Vec<AnnotationDocument>> {
        let entries = std::fs::read_dir(&self.dir)
            .with_context(|| format!("read annotation store dir '{}'", self.dir.display()))?;
        let mut out = Vec::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("list '{}'", self.dir.display()))?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let doc = AnnotationDocument::from_path(&path)?;
            if doc.video_name == video_name {
                out.push(doc);
            }
        }
        sort_by_timestamp(&mut out);
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/store.rs"]
mod tests;
