use uuid::Uuid;

use crate::document::model::AnnotationDocument;
use crate::document::store::AnnotationStore;
use crate::foundation::error::FramemarkResult;

/// The annotations of one video, in timeline order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationIndex {
    video_name: String,
    docs: Vec<AnnotationDocument>,
}

impl AnnotationIndex {
    pub fn load(store: &dyn AnnotationStore, video_name: &str) -> FramemarkResult<Self> {
        let docs = store.list_for_video(video_name)?;
        tracing::debug!(video = video_name, count = docs.len(), "annotations loaded");
        Ok(Self {
            video_name: video_name.to_string(),
            docs,
        })
    }

    pub fn video_name(&self) -> &str {
        &self.video_name
    }

    pub fn docs(&self) -> &[AnnotationDocument] {
        &self.docs
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Delete through the store; the local entry goes only once the store agrees.
    pub fn delete(&mut self, store: &mut dyn AnnotationStore, id: Uuid) -> FramemarkResult<()> {
        match store.delete(id) {
            Ok(()) => {
                self.docs.retain(|d| d.id != id);
                tracing::info!(%id, "annotation deleted");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "annotation delete failed");
                Err(e)
            }
        }
    }
}

/// Position of a timeline marker, in percent of the video length.
pub fn marker_position(timestamp: f64, video_duration: f64) -> f64 {
    if video_duration <= 0.0 || !video_duration.is_finite() {
        return 0.0;
    }
    timestamp / video_duration * 100.0
}

/// `m:ss`, truncating fractional seconds.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
