use crate::{
    catalog,
    composer::{ComposedPrompt, Composer},
    config::Config,
    error::{Result, TryOnError},
    gemini::{GeminiClient, GenerationClient},
    logger,
    models::{CompositionRequest, GeneratedImage},
};
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// One try-on session: validates, composes, and runs at most one generation at a time.
pub struct TryOnStudio<C: GenerationClient> {
    client: C,
    composer: Composer,
    allow_custom_labels: bool,
    in_flight: AtomicBool,
}

/// Checks a request before composing: garments present, and every label in
/// the taxonomy unless custom labels are allowed.
pub fn validate(request: &CompositionRequest, allow_custom_labels: bool) -> Result<()> {
    request.ensure_garments()?;
    if !allow_custom_labels {
        catalog::check_selection(&request.garments)?;
    }
    Ok(())
}

/// Validated prompt for `request` under `config`, with no client involved.
pub fn preview(config: &Config, request: &CompositionRequest) -> Result<ComposedPrompt> {
    validate(request, config.allow_custom_labels)?;
    Ok(composer_for(config).compose(request))
}

fn composer_for(config: &Config) -> Composer {
    Composer::new().with_hint_policy(config.hint_policy)
}

impl TryOnStudio<GeminiClient> {
    /// Builds a Gemini-backed studio; fails fast when no API key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = GeminiClient::new(&config.gemini)?;
        Ok(Self::new(client)
            .with_composer(composer_for(config))
            .with_custom_labels(config.allow_custom_labels))
    }
}

impl<C: GenerationClient> TryOnStudio<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            composer: Composer::new(),
            allow_custom_labels: false,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_composer(mut self, composer: Composer) -> Self {
        self.composer = composer;
        self
    }

    pub fn with_custom_labels(mut self, allowed: bool) -> Self {
        self.allow_custom_labels = allowed;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn validate(&self, request: &CompositionRequest) -> Result<()> {
        validate(request, self.allow_custom_labels)
    }

    /// Validated prompt without calling the model.
    pub fn preview(&self, request: &CompositionRequest) -> Result<ComposedPrompt> {
        self.validate(request)?;
        Ok(self.composer.compose(request))
    }

    pub async fn generate(&self, request: &CompositionRequest) -> Result<GeneratedImage> {
        let _slot = InFlight::acquire(&self.in_flight)?;
        let request_id = Uuid::new_v4();

        if let Err(err) = self.validate(request) {
            log::warn!("[req:{}] Rejected try-on request: {}", request_id, err);
            return Err(err);
        }

        let composed = self.composer.compose(request);
        log::info!(
            "[req:{}] Composed {} prompt: scene={:?}, parts={}, category={}, pose={}",
            request_id,
            if request.reference_image.is_some() { "identity-preserving" } else { "from-scratch" },
            composed.scene_class,
            composed.part_count(),
            request.category,
            request.pose
        );

        let _timer = logger::timer(&format!("generation {}", request_id));
        match self.client.generate(composed).await {
            Ok(image) => {
                log::info!(
                    "[req:{}] Received {} bytes of {} from {}",
                    request_id,
                    image.data.len(),
                    image.mime_type,
                    image.model
                );
                Ok(image)
            }
            Err(err) => {
                log::error!("[req:{}] Generation failed: {}", request_id, err);
                Err(err)
            }
        }
    }
}

/// Marks the studio busy until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| TryOnError::Busy)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
