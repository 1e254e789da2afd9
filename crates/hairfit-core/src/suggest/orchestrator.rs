//! Suggestion orchestrator.
//!
//! Drives one request through an explicit stage machine:
//!
//! ```text
//! RequestingText -> Parsing -> NormalizingCount -> SynthesizingImages -> Assembled
//!        \             \
//!         +-------------+--> UsingMockFallback -> Assembled
//! ```
//!
//! The orchestrator never returns an error. Every upstream failure is
//! absorbed either by the mock catalog (text stage) or by static
//! placeholder images (synthesis stage), so callers always receive exactly
//! five well-formed records.

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use hairfit_types::face::{Classification, FaceShape, Gender};
use hairfit_types::suggestion::{
    CUSTOM_FACE_SHAPE, RECOMMENDATION_COUNT, RecommendationRecord, SuggestionOrigin,
    SuggestionResult,
};

use super::catalog::MockCatalog;
use super::parse::{self, ParsedSuggestions};
use super::prompt::PromptBuilder;
use super::synthesis::{
    ImageSynthesisClient, RetryPolicy, SynthesisOutcome, fallback_image_url,
    synthesize_with_retry,
};
use super::text_client::RecommendationTextClient;
use crate::classify::{FaceShapeClassifier, RandomFaceShapeClassifier};

/// How a request is steered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalysisMode {
    /// Recommendations for a known face shape.
    Guided(Classification),
    /// The model infers the face shape from the photo itself.
    Direct,
}

impl AnalysisMode {
    pub fn classification(&self) -> Option<Classification> {
        match self {
            AnalysisMode::Guided(c) => Some(*c),
            AnalysisMode::Direct => None,
        }
    }

    pub fn face_shape(&self) -> Option<FaceShape> {
        self.classification().map(|c| c.face_shape)
    }

    /// Label shown with the result: "Oval", ..., or "Custom" in direct mode.
    pub fn face_shape_label(&self) -> &'static str {
        match self.face_shape() {
            Some(shape) => shape.label(),
            None => CUSTOM_FACE_SHAPE,
        }
    }

    fn default_summary(&self) -> String {
        match self.face_shape() {
            Some(shape) => format!("Hairstyles selected for you (face shape: {})", shape.label()),
            None => "Hairstyles selected for you based on your photo".to_string(),
        }
    }
}

/// Pipeline stages. Data produced by a stage travels with the next one.
enum Stage {
    RequestingText,
    Parsing(String),
    NormalizingCount {
        parsed: ParsedSuggestions,
        raw_text: String,
    },
    SynthesizingImages {
        records: Vec<RecommendationRecord>,
        summary: String,
        gender: Gender,
        raw_text: String,
    },
    UsingMockFallback(String),
    Assembled(SuggestionResult),
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::RequestingText => "requesting_text",
            Stage::Parsing(_) => "parsing",
            Stage::NormalizingCount { .. } => "normalizing_count",
            Stage::SynthesizingImages { .. } => "synthesizing_images",
            Stage::UsingMockFallback(_) => "using_mock_fallback",
            Stage::Assembled(_) => "assembled",
        }
    }
}

/// Truncate or pad `records` to exactly [`RECOMMENDATION_COUNT`].
///
/// Padding records are named "Additional Hairstyle N" with N the 1-based
/// position they fill.
pub fn normalize_count(
    mut records: Vec<RecommendationRecord>,
    shape: Option<FaceShape>,
) -> Vec<RecommendationRecord> {
    records.truncate(RECOMMENDATION_COUNT);
    while records.len() < RECOMMENDATION_COUNT {
        let n = records.len() + 1;
        let description = match shape {
            Some(shape) => format!("A complementary hairstyle for {shape} face shape."),
            None => "A complementary hairstyle for your features.".to_string(),
        };
        records.push(RecommendationRecord::new(format!("Additional Hairstyle {n}"), description));
    }
    records
}

/// Runs the suggestion pipeline.
///
/// Both clients are optional: without a text client every request is
/// served from the mock catalog, and without an image client every record
/// gets its static placeholder image.
pub struct SuggestionOrchestrator {
    text: Option<RecommendationTextClient>,
    images: Option<Arc<ImageSynthesisClient>>,
    classifier: Box<dyn FaceShapeClassifier>,
    catalog: Arc<MockCatalog>,
    retry: RetryPolicy,
}

impl SuggestionOrchestrator {
    /// An offline orchestrator over the built-in catalog.
    pub fn new() -> Self {
        Self {
            text: None,
            images: None,
            classifier: Box::new(RandomFaceShapeClassifier),
            catalog: MockCatalog::builtin(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_text_client(mut self, client: RecommendationTextClient) -> Self {
        self.text = Some(client);
        self
    }

    pub fn with_image_client(mut self, client: ImageSynthesisClient) -> Self {
        self.images = Some(Arc::new(client));
        self
    }

    pub fn with_classifier(mut self, classifier: impl FaceShapeClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<MockCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Whether a live text provider is configured.
    pub fn is_online(&self) -> bool {
        self.text.is_some()
    }

    /// Suggestions for a photo whose face shape is already known.
    pub async fn get_hairstyle_suggestions(
        &self,
        face_shape: FaceShape,
        photo: &[u8],
    ) -> SuggestionResult {
        let mode = AnalysisMode::Guided(Classification::certain(face_shape));
        self.run(mode, photo, &CancellationToken::new()).await
    }

    /// Suggestions where the model infers the face shape from the photo.
    pub async fn get_direct_hairstyle_suggestions(&self, photo: &[u8]) -> SuggestionResult {
        self.run(AnalysisMode::Direct, photo, &CancellationToken::new()).await
    }

    /// Classify the photo, then run the guided flow.
    ///
    /// If classification fails the request continues in direct mode.
    pub async fn analyze(&self, photo: &[u8]) -> SuggestionResult {
        let mode = self.classify(photo);
        self.run(mode, photo, &CancellationToken::new()).await
    }

    /// Pick the analysis mode for a photo using the configured classifier.
    ///
    /// Falls back to [`AnalysisMode::Direct`] when classification fails.
    pub fn classify(&self, photo: &[u8]) -> AnalysisMode {
        debug!(stage = "classifying", "pipeline stage");
        match self.classifier.classify(photo) {
            Ok(classification) => {
                info!(
                    face_shape = %classification.face_shape,
                    confidence = classification.confidence,
                    "photo classified"
                );
                AnalysisMode::Guided(classification)
            }
            Err(e) => {
                warn!(error = %e, "classification failed, continuing in direct mode");
                AnalysisMode::Direct
            }
        }
    }

    /// Run the pipeline for `mode` until a result is assembled.
    ///
    /// Cancelling `cancel` during the text stage yields the mock result;
    /// cancelling during synthesis gives outstanding records their
    /// placeholder images.
    pub async fn run(
        &self,
        mode: AnalysisMode,
        photo: &[u8],
        cancel: &CancellationToken,
    ) -> SuggestionResult {
        let mut stage = Stage::RequestingText;

        loop {
            debug!(stage = stage.name(), "pipeline stage");
            stage = match stage {
                Stage::RequestingText => self.request_text(mode, photo, cancel).await,

                Stage::Parsing(raw_text) => match parse::parse(&raw_text) {
                    Ok(parsed) => Stage::NormalizingCount { parsed, raw_text },
                    Err(e) => Stage::UsingMockFallback(e.to_string()),
                },

                Stage::NormalizingCount { parsed, raw_text } => {
                    let parsed_count = parsed.records.len();
                    let records = normalize_count(parsed.records, mode.face_shape());
                    if parsed_count != RECOMMENDATION_COUNT {
                        debug!(parsed_count, "normalized recommendation count");
                    }
                    Stage::SynthesizingImages {
                        records,
                        summary: parsed.summary.unwrap_or_else(|| mode.default_summary()),
                        gender: parsed.gender,
                        raw_text,
                    }
                }

                Stage::SynthesizingImages {
                    records,
                    summary,
                    gender,
                    raw_text,
                } => {
                    let records = self.synthesize(records, mode, gender, photo, cancel).await;
                    Stage::Assembled(SuggestionResult {
                        classification: mode.classification(),
                        face_shape: mode.face_shape_label().to_string(),
                        summary,
                        raw_text: Some(raw_text),
                        records,
                        gender,
                        origin: SuggestionOrigin::Live,
                    })
                }

                Stage::UsingMockFallback(reason) => {
                    warn!(%reason, mode = mode.face_shape_label(), "using mock suggestions");
                    Stage::Assembled(self.mock_result(mode))
                }

                Stage::Assembled(result) => {
                    info!(
                        face_shape = %result.face_shape,
                        origin = %result.origin,
                        ai_generated = result.ai_generated_count(),
                        "suggestions assembled"
                    );
                    return result;
                }
            };
        }
    }

    async fn request_text(
        &self,
        mode: AnalysisMode,
        photo: &[u8],
        cancel: &CancellationToken,
    ) -> Stage {
        let Some(text) = &self.text else {
            return Stage::UsingMockFallback("no text provider configured".to_string());
        };

        let classification = mode.classification();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Stage::UsingMockFallback("request cancelled".to_string()),
            result = text.generate(photo, classification.as_ref()) => match result {
                Ok(raw_text) => Stage::Parsing(raw_text),
                Err(e) => Stage::UsingMockFallback(e.to_string()),
            },
        }
    }

    /// Fan out one synthesis task per record and write results back by index.
    async fn synthesize(
        &self,
        records: Vec<RecommendationRecord>,
        mode: AnalysisMode,
        gender: Gender,
        photo: &[u8],
        cancel: &CancellationToken,
    ) -> Vec<RecommendationRecord> {
        let Some(images) = &self.images else {
            debug!("no image provider configured, using placeholders");
            return records
                .into_iter()
                .enumerate()
                .map(|(i, r)| r.with_static_image(fallback_image_url(i)))
                .collect();
        };

        let photo: Arc<[u8]> = Arc::from(photo);
        let mut set: JoinSet<(usize, SynthesisOutcome)> = JoinSet::new();

        for (position, record) in records.iter().enumerate() {
            let prompt = PromptBuilder::image(&record.name, mode.face_shape(), gender);
            let images = Arc::clone(images);
            let photo = Arc::clone(&photo);
            let retry = self.retry;
            let cancel = cancel.clone();

            set.spawn(async move {
                let outcome =
                    synthesize_with_retry(&images, &prompt, &photo, &retry, position, &cancel)
                        .await;
                (position, outcome)
            });
        }

        let mut outcomes: Vec<Option<SynthesisOutcome>> = vec![None; records.len()];
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((position, outcome)) => outcomes[position] = Some(outcome),
                Err(e) => warn!(error = %e, "synthesis task failed"),
            }
        }

        let total_attempts: u32 = outcomes.iter().flatten().map(SynthesisOutcome::attempts).sum();
        debug!(total_attempts, "synthesis finished");

        records
            .into_iter()
            .zip(outcomes)
            .enumerate()
            .map(|(position, (mut record, outcome))| match outcome {
                Some(SynthesisOutcome::Generated { url, .. }) => {
                    record.image_url = Some(url);
                    record.is_ai_generated = true;
                    record
                }
                _ => record.with_static_image(fallback_image_url(position)),
            })
            .collect()
    }

    fn mock_result(&self, mode: AnalysisMode) -> SuggestionResult {
        let dataset = match mode.face_shape() {
            Some(shape) => self.catalog.for_shape(shape),
            None => self.catalog.direct(),
        };

        SuggestionResult {
            classification: mode.classification(),
            face_shape: mode.face_shape_label().to_string(),
            summary: dataset.summary.clone(),
            raw_text: None,
            records: dataset.records.clone(),
            gender: dataset.gender,
            origin: SuggestionOrigin::MockFallback,
        }
    }
}

impl Default for SuggestionOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use hairfit_types::config::{ResponseLanguage, TextProviderConfig};
    use hairfit_types::error::SuggestionError;
    use hairfit_types::llm::{
        CompletionRequest, CompletionResponse, GeneratedImage, ImageGenerationRequest, LlmError,
        Usage,
    };

    use crate::image::box_provider::BoxImageProvider;
    use crate::image::provider::ImageProvider;
    use crate::llm::box_provider::BoxVisionProvider;
    use crate::llm::provider::VisionLlmProvider;

    // -- mock providers ------------------------------------------------------

    #[derive(Clone)]
    enum TextReply {
        Content(String),
        Down,
        Hang,
    }

    struct MockText {
        reply: TextReply,
    }

    impl VisionLlmProvider for MockText {
        fn name(&self) -> &str {
            "mock-text"
        }

        fn model(&self) -> &str {
            "mock-vision"
        }

        fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send
        {
            let reply = self.reply.clone();
            async move {
                match reply {
                    TextReply::Content(content) => Ok(CompletionResponse {
                        id: "resp".to_string(),
                        content,
                        model: "mock-vision".to_string(),
                        usage: Usage::default(),
                    }),
                    TextReply::Down => Err(LlmError::Provider {
                        message: "connection refused".to_string(),
                    }),
                    TextReply::Hang => {
                        tokio::time::sleep(Duration::from_secs(3600)).await;
                        Err(LlmError::Timeout)
                    }
                }
            }
        }
    }

    /// Image provider keyed on the hairstyle name embedded in the prompt.
    struct MockImages {
        succeed: bool,
        calls: Arc<AtomicUsize>,
        prompts: Arc<Mutex<Vec<String>>>,
        /// Per-call delay derived from the name; later records finish first.
        scramble: bool,
        hang: bool,
    }

    impl MockImages {
        fn new(succeed: bool) -> Self {
            Self {
                succeed,
                calls: Arc::new(AtomicUsize::new(0)),
                prompts: Arc::new(Mutex::new(Vec::new())),
                scramble: false,
                hang: false,
            }
        }
    }

    fn quoted_name(prompt: &str) -> String {
        prompt.split('"').nth(1).unwrap_or_default().to_string()
    }

    impl ImageProvider for MockImages {
        fn name(&self) -> &str {
            "mock-images"
        }

        fn generate(
            &self,
            request: &ImageGenerationRequest,
        ) -> impl std::future::Future<Output = Result<GeneratedImage, LlmError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(request.prompt.clone());
            let name = quoted_name(&request.prompt);
            let succeed = self.succeed;
            let hang = self.hang;
            let delay = if self.scramble {
                let digit = name
                    .chars()
                    .rev()
                    .find_map(|c| c.to_digit(10))
                    .unwrap_or(0) as u64;
                Duration::from_millis(60u64.saturating_sub(digit * 10))
            } else {
                Duration::ZERO
            };
            async move {
                if hang {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                }
                tokio::time::sleep(delay).await;
                if succeed {
                    Ok(GeneratedImage {
                        url: format!("https://img.example/{}.png", name.replace(' ', "-")),
                        revised_prompt: None,
                    })
                } else {
                    Err(LlmError::Overloaded("busy".to_string()))
                }
            }
        }
    }

    fn text_client(reply: TextReply) -> RecommendationTextClient {
        RecommendationTextClient::new(
            BoxVisionProvider::new(MockText { reply }),
            &TextProviderConfig::default(),
            ResponseLanguage::English,
        )
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy::new(2, Duration::from_millis(5), Duration::from_secs(5))
    }

    fn orchestrator(text: TextReply, images: MockImages) -> SuggestionOrchestrator {
        SuggestionOrchestrator::new()
            .with_text_client(text_client(text))
            .with_image_client(ImageSynthesisClient::new(BoxImageProvider::new(images)))
            .with_retry_policy(fast_retry())
    }

    fn sections(n: usize) -> String {
        let mut text = String::from("A woman with an oval face.");
        for i in 1..=n {
            text.push_str(&format!("\n## Style {i}\nWhy style {i} works."));
        }
        text
    }

    struct FixedClassifier(FaceShape);

    impl FaceShapeClassifier for FixedClassifier {
        fn classify(&self, photo: &[u8]) -> Result<Classification, SuggestionError> {
            if photo.is_empty() {
                return Err(SuggestionError::InvalidInput("photo is empty".to_string()));
            }
            Classification::new(self.0, 0.9)
        }
    }

    // -- normalization -------------------------------------------------------

    #[test]
    fn test_normalize_count_lengths() {
        for n in [0, 1, 3, 5, 8] {
            let records = (0..n)
                .map(|i| RecommendationRecord::new(format!("S{i}"), "d"))
                .collect();
            let out = normalize_count(records, Some(FaceShape::Round));
            assert_eq!(out.len(), 5, "input of {n}");
            assert!(out.iter().all(RecommendationRecord::is_well_formed));
        }
    }

    #[test]
    fn test_normalize_count_placeholder_text() {
        let out = normalize_count(vec![RecommendationRecord::new("A", "d")], Some(FaceShape::Heart));
        assert_eq!(out[1].name, "Additional Hairstyle 2");
        assert_eq!(out[1].description, "A complementary hairstyle for heart face shape.");
        assert_eq!(out[4].name, "Additional Hairstyle 5");

        let direct = normalize_count(Vec::new(), None);
        assert_eq!(direct[0].name, "Additional Hairstyle 1");
        assert_eq!(direct[0].description, "A complementary hairstyle for your features.");
    }

    // -- end to end ----------------------------------------------------------

    #[tokio::test]
    async fn test_record_count_always_five() {
        for n in [1, 3, 5, 8] {
            let orch = orchestrator(TextReply::Content(sections(n)), MockImages::new(true));
            let result = orch.get_hairstyle_suggestions(FaceShape::Oval, b"jpeg").await;
            assert_eq!(result.records.len(), 5, "{n} sections");
            assert!(result.is_structurally_valid());
            assert_eq!(result.origin, SuggestionOrigin::Live);
        }
    }

    #[tokio::test]
    async fn test_intro_only_text_falls_back_to_mock() {
        let orch = orchestrator(
            TextReply::Content("Sorry, I can't see a face.".to_string()),
            MockImages::new(true),
        );
        let result = orch.get_hairstyle_suggestions(FaceShape::Square, b"jpeg").await;
        assert_eq!(result.origin, SuggestionOrigin::MockFallback);
        assert_eq!(result.records.len(), 5);
        assert_eq!(result.records[0].name, "Soft Layered Cut");
    }

    #[tokio::test]
    async fn test_sections_scenario_pads_with_placeholders() {
        let text = "## Intro text\n## Style One\nGreat for round faces.\n## Style Two\nGreat for square faces.";
        let images = MockImages::new(true);
        let calls = Arc::clone(&images.calls);
        let orch = orchestrator(TextReply::Content(text.to_string()), images);

        let result = orch.get_hairstyle_suggestions(FaceShape::Round, b"jpeg").await;
        assert_eq!(result.summary, "Intro text");
        assert_eq!(result.face_shape, "Round");
        assert_eq!(result.records[0].name, "Style One");
        assert_eq!(result.records[1].name, "Style Two");
        assert_eq!(result.records[2].name, "Additional Hairstyle 3");
        assert_eq!(
            result.records[4].description,
            "A complementary hairstyle for round face shape."
        );
        assert_eq!(result.ai_generated_count(), 5);
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_text_down_uses_shape_dataset() {
        let images = MockImages::new(true);
        let calls = Arc::clone(&images.calls);
        let orch = orchestrator(TextReply::Down, images);

        let result = orch.get_hairstyle_suggestions(FaceShape::Heart, b"jpeg").await;
        let expected = MockCatalog::builtin().for_shape(FaceShape::Heart).clone();
        assert_eq!(result.origin, SuggestionOrigin::MockFallback);
        assert_eq!(result.records, expected.records);
        assert_eq!(result.summary, expected.summary);
        assert_eq!(result.ai_generated_count(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0, "no synthesis for mock data");
        assert!(result.raw_text.is_none());
    }

    #[tokio::test]
    async fn test_direct_fallback_uses_generic_dataset() {
        let orch = orchestrator(TextReply::Down, MockImages::new(true));
        let result = orch.get_direct_hairstyle_suggestions(b"jpeg").await;
        assert_eq!(result.face_shape, "Custom");
        assert!(result.classification.is_none());
        assert_eq!(result.gender, Gender::Female);
        assert_eq!(result.records, MockCatalog::builtin().direct().records);
    }

    #[tokio::test]
    async fn test_empty_response_falls_back() {
        let orch = orchestrator(TextReply::Content("  ".to_string()), MockImages::new(true));
        let result = orch.get_direct_hairstyle_suggestions(b"jpeg").await;
        assert_eq!(result.origin, SuggestionOrigin::MockFallback);
        assert!(result.is_structurally_valid());
    }

    #[tokio::test]
    async fn test_empty_photo_falls_back() {
        let orch = orchestrator(TextReply::Content(sections(5)), MockImages::new(true));
        let result = orch.get_hairstyle_suggestions(FaceShape::Oval, &[]).await;
        assert_eq!(result.origin, SuggestionOrigin::MockFallback);
        assert!(result.is_structurally_valid());
    }

    #[tokio::test]
    async fn test_every_failure_combination_is_valid() {
        let cases = [
            (TextReply::Down, false),
            (TextReply::Down, true),
            (TextReply::Content(sections(5)), false),
            (TextReply::Content("nothing useful".to_string()), true),
        ];
        for (reply, images_up) in cases {
            let orch = orchestrator(reply.clone(), MockImages::new(images_up));
            let guided = orch.get_hairstyle_suggestions(FaceShape::Diamond, b"jpeg").await;
            let direct = orch.get_direct_hairstyle_suggestions(b"jpeg").await;
            assert!(guided.is_structurally_valid());
            assert!(direct.is_structurally_valid());
        }
    }

    #[tokio::test]
    async fn test_scrambled_completion_preserves_order() {
        let mut images = MockImages::new(true);
        images.scramble = true;
        let orch = orchestrator(TextReply::Content(sections(5)), images);

        let result = orch.get_hairstyle_suggestions(FaceShape::Oval, b"jpeg").await;
        for (i, record) in result.records.iter().enumerate() {
            assert_eq!(record.name, format!("Style {}", i + 1));
            assert_eq!(
                record.image_url.as_deref(),
                Some(format!("https://img.example/Style-{}.png", i + 1).as_str())
            );
        }
    }

    #[tokio::test]
    async fn test_failing_images_retry_twice_then_placeholder() {
        let images = MockImages::new(false);
        let calls = Arc::clone(&images.calls);
        let orch = orchestrator(TextReply::Content(sections(5)), images);

        let result = orch.get_hairstyle_suggestions(FaceShape::Oblong, b"jpeg").await;
        assert_eq!(calls.load(Ordering::SeqCst), 10);
        assert_eq!(result.origin, SuggestionOrigin::Live);
        for (i, record) in result.records.iter().enumerate() {
            assert!(!record.is_ai_generated);
            assert_eq!(record.image_url.as_deref(), Some(fallback_image_url(i).as_str()));
        }
    }

    #[tokio::test]
    async fn test_all_images_succeed_first_try() {
        let images = MockImages::new(true);
        let calls = Arc::clone(&images.calls);
        let prompts = Arc::clone(&images.prompts);
        let orch = orchestrator(TextReply::Content(sections(5)), images);

        let result = orch.get_hairstyle_suggestions(FaceShape::Oval, b"jpeg").await;
        assert_eq!(result.ai_generated_count(), 5);
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(result.gender, Gender::Female);
        assert!(
            prompts
                .lock()
                .unwrap()
                .iter()
                .all(|p| p.contains("showing a woman") && p.contains("oval face shape"))
        );
    }

    #[tokio::test]
    async fn test_no_image_provider_uses_placeholders() {
        let orch = SuggestionOrchestrator::new().with_text_client(text_client(TextReply::Content(sections(3))));
        let result = orch.get_hairstyle_suggestions(FaceShape::Round, b"jpeg").await;
        assert_eq!(result.origin, SuggestionOrigin::Live);
        assert_eq!(result.ai_generated_count(), 0);
        assert_eq!(
            result.records[2].image_url.as_deref(),
            Some("https://i.imgur.com/example18.jpg")
        );
    }

    #[tokio::test]
    async fn test_offline_orchestrator_serves_mock() {
        let orch = SuggestionOrchestrator::new();
        assert!(!orch.is_online());
        let result = orch.get_hairstyle_suggestions(FaceShape::Rectangular, b"jpeg").await;
        assert_eq!(result.origin, SuggestionOrigin::MockFallback);
        assert_eq!(result.face_shape, "Rectangular");
    }

    #[tokio::test]
    async fn test_analyze_classifies_first() {
        let orch = orchestrator(TextReply::Content(sections(2)), MockImages::new(true))
            .with_classifier(FixedClassifier(FaceShape::Diamond));
        let result = orch.analyze(b"jpeg").await;
        assert_eq!(result.face_shape, "Diamond");
        assert_eq!(result.classification.map(|c| c.confidence), Some(0.9));
        assert_eq!(
            result.records[3].description,
            "A complementary hairstyle for diamond face shape."
        );
    }

    #[tokio::test]
    async fn test_analyze_unclassifiable_photo_goes_direct() {
        let orch = SuggestionOrchestrator::new().with_classifier(FixedClassifier(FaceShape::Oval));
        let result = orch.analyze(&[]).await;
        assert_eq!(result.face_shape, "Custom");
        assert!(result.is_structurally_valid());
    }

    #[tokio::test]
    async fn test_default_summary_when_no_intro() {
        let text = "- Pixie: Short.\n- Bob: Chin length.";
        let orch = orchestrator(TextReply::Content(text.to_string()), MockImages::new(true));
        let result = orch.get_hairstyle_suggestions(FaceShape::Square, b"jpeg").await;
        assert_eq!(result.summary, "Hairstyles selected for you (face shape: Square)");
    }

    #[tokio::test]
    async fn test_cancel_during_text_stage_uses_mock() {
        let orch = orchestrator(TextReply::Hang, MockImages::new(true));
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = orch.run(AnalysisMode::Direct, b"jpeg", &cancel).await;
        assert_eq!(result.origin, SuggestionOrigin::MockFallback);
        assert!(result.is_structurally_valid());
    }

    #[tokio::test]
    async fn test_cancel_during_synthesis_uses_placeholders() {
        let mut images = MockImages::new(true);
        images.hang = true;
        let orch = orchestrator(TextReply::Content(sections(5)), images);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let mode = AnalysisMode::Guided(Classification::certain(FaceShape::Oval));
        let result = orch.run(mode, b"jpeg", &cancel).await;
        assert_eq!(result.origin, SuggestionOrigin::Live);
        assert_eq!(result.ai_generated_count(), 0);
        assert_eq!(result.records[0].name, "Style 1");
        assert_eq!(
            result.records[0].image_url.as_deref(),
            Some("https://i.imgur.com/example16.jpg")
        );
    }
}
