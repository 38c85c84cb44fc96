use chrono::{NaiveDate, Utc};
use spdlog::info;
use thiserror::Error;

use crate::api::{GenerationError, GenerationService};
use crate::image::ImageAttachment;
use crate::prompt;
use crate::report::{GeneratedReport, ReportRequest};

#[derive(Debug, Error)]
#[error("no image attached, refusing to generate a report")]
pub struct MissingImageError;

/// Drives the whole report flow: validate the inputs, assemble the request,
/// hand it to the generation service. Holds no state between actions.
pub struct Reporter<S> {
    service: S,
}

impl<S: GenerationService> Reporter<S> {
    pub fn new(service: S) -> Reporter<S> {
        Reporter { service }
    }

    /// Assemble a request from the header fields and the uploaded image.
    ///
    /// An absent or empty image fails right here, before anything touches
    /// the network. The header strings are taken as given, empty included.
    pub fn build_request(
        &self,
        title: &str,
        prepared_by: &str,
        prepared_for: &str,
        image: Option<ImageAttachment>,
    ) -> Result<ReportRequest, MissingImageError> {
        let image = image
            .filter(|image| !image.is_empty())
            .ok_or(MissingImageError)?;

        Ok(Self::assemble(
            title,
            prepared_by,
            prepared_for,
            Utc::now().date_naive(),
            image,
        ))
    }

    // date-parameterized so the assembled prompt is reproducible
    fn assemble(
        title: &str,
        prepared_by: &str,
        prepared_for: &str,
        date: NaiveDate,
        image: ImageAttachment,
    ) -> ReportRequest {
        ReportRequest {
            title: title.to_string(),
            prepared_by: prepared_by.to_string(),
            prepared_for: prepared_for.to_string(),
            date,
            prompt: prompt::render(title, prepared_by, prepared_for, date),
            image,
        }
    }

    /// One synchronous round trip to the generation service. No retry: any
    /// failure is final for this action and carries the underlying cause.
    pub async fn submit(
        &self,
        request: &ReportRequest,
    ) -> Result<GeneratedReport, GenerationError> {
        info!("Submitting report request...");

        let text = self
            .service
            .generate(&request.prompt, &request.image)
            .await?;

        info!("Finished");

        Ok(GeneratedReport::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::image::ImageMime;
    use reqwest::StatusCode;
    use std::sync::{Arc, Mutex};

    /// Records every prompt it sees so tests can assert how often and with
    /// what the service was invoked.
    struct FakeService {
        prompts: Arc<Mutex<Vec<String>>>,
        fail_with_quota: bool,
    }

    impl GenerationService for FakeService {
        async fn generate(
            &self,
            prompt: &str,
            _image: &ImageAttachment,
        ) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());

            if self.fail_with_quota {
                return Err(GenerationError::Api(ApiError::new(
                    StatusCode::TOO_MANY_REQUESTS,
                    Some("Quota exceeded".to_string()),
                )));
            }

            Ok("## Defects\n- Hairline crack, low severity".to_string())
        }
    }

    fn make_reporter(fail_with_quota: bool) -> (Reporter<FakeService>, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let reporter = Reporter::new(FakeService {
            prompts: prompts.clone(),
            fail_with_quota,
        });

        (reporter, prompts)
    }

    fn make_image() -> ImageAttachment {
        ImageAttachment::new(vec![0xFF, 0xD8, 0xFF, 0xE0], ImageMime::Jpeg)
    }

    #[test]
    fn test_build_request_renders_prompt() {
        let (reporter, _) = make_reporter(false);

        let request = reporter
            .build_request("Bridge Inspection", "A. Rao", "City Works Dept", Some(make_image()))
            .unwrap();

        assert!(request.prompt.contains("Bridge Inspection"));
        assert!(request.prompt.contains("A. Rao"));
        assert!(request.prompt.contains("City Works Dept"));
        assert!(request.prompt.contains(&Utc::now().date_naive().to_string()));
    }

    #[test]
    fn test_build_request_without_image() {
        // Given
        let (reporter, prompts) = make_reporter(false);

        // When
        let result = reporter.build_request("", "", "", None);

        // Then
        assert!(result.is_err());
        assert!(prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_build_request_with_empty_image() {
        let (reporter, prompts) = make_reporter(false);

        let result = reporter.build_request(
            "Bridge Inspection",
            "A. Rao",
            "City Works Dept",
            Some(ImageAttachment::new(vec![], ImageMime::Png)),
        );

        assert!(result.is_err());
        assert!(prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let first =
            Reporter::<FakeService>::assemble("Silo 4", "B. Okafor", "Port Authority", date, make_image());
        let second =
            Reporter::<FakeService>::assemble("Silo 4", "B. Okafor", "Port Authority", date, make_image());

        assert_eq!(first.prompt, second.prompt);
    }

    #[tokio::test]
    async fn test_submit_returns_report() {
        // Given
        let (reporter, prompts) = make_reporter(false);
        let request = reporter
            .build_request("Bridge Inspection", "A. Rao", "City Works Dept", Some(make_image()))
            .unwrap();

        // When
        let report = reporter.submit(&request).await.unwrap();

        // Then
        assert!(report.text.contains("Hairline crack"));
        let recorded = prompts.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].contains("Bridge Inspection"));
        assert!(recorded[0].contains("A. Rao"));
        assert!(recorded[0].contains("City Works Dept"));
    }

    #[tokio::test]
    async fn test_submit_surfaces_service_rejection() {
        // Given
        let (reporter, prompts) = make_reporter(true);
        let request = reporter
            .build_request("Bridge Inspection", "A. Rao", "City Works Dept", Some(make_image()))
            .unwrap();

        // When
        let result = reporter.submit(&request).await;

        // Then
        assert!(matches!(result, Err(GenerationError::Api(_))));
        assert_eq!(prompts.lock().unwrap().len(), 1);
    }
}
