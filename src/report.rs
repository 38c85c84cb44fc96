use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::image::ImageAttachment;

/// A fully assembled generation request: the header fields, the rendered
/// prompt and the image to analyze. Built fresh for every generate action
/// and dropped once the response is in.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub title: String,
    pub prepared_by: String,
    pub prepared_for: String,
    pub date: NaiveDate,
    pub prompt: String,
    pub image: ImageAttachment,
}

/// The free-text report returned by the generation service, immutable once
/// received.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeneratedReport {
    pub id: Uuid,
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

/// File extension and MIME type to hand out with the report text.
///
/// The default mirrors the upstream app: a `pdf` name and MIME over raw
/// UTF-8 text bytes. Callers that want an honest pairing can configure
/// e.g. `md` + `text/markdown`.
#[derive(Debug, Clone)]
pub struct DownloadFormat {
    pub extension: String,
    pub mime: String,
}

impl Default for DownloadFormat {
    fn default() -> Self {
        DownloadFormat {
            extension: "pdf".to_string(),
            mime: "application/pdf".to_string(),
        }
    }
}

/// Bytes, filename and MIME type ready to hand to whatever saves or serves
/// the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime: String,
}

impl GeneratedReport {
    pub fn new(text: String) -> GeneratedReport {
        GeneratedReport {
            id: Uuid::new_v4(),
            text,
            generated_at: Utc::now(),
        }
    }

    // Filename is derived from the generation date, so the same report
    // always produces the same artifact.
    pub fn to_downloadable(&self, format: &DownloadFormat) -> DownloadArtifact {
        let filename = format!(
            "Structural_Report_{}.{}",
            self.generated_at.date_naive(),
            format.extension
        );

        DownloadArtifact {
            bytes: self.text.clone().into_bytes(),
            filename,
            mime: format.mime.clone(),
        }
    }
}
