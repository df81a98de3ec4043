//! Virtual try-on fashion shoots.
//!
//! Garment images tagged with catalog labels, an optional reference photo and
//! a few styling options are composed into one generation prompt, then
//! rendered by a multimodal image model.
//!
//! ```no_run
//! use modelshoot::{CompositionRequest, Config, GarmentImage, GarmentSelection, TryOnStudio, VtonCategory};
//!
//! # async fn run() -> modelshoot::Result<()> {
//! let studio = TryOnStudio::from_config(&Config::from_env())?;
//! let garments = GarmentSelection::new()
//!     .with("Hoodie", GarmentImage::new(std::fs::read("hoodie.png")?, "image/png"));
//! let request = CompositionRequest::new(garments).with_category(VtonCategory::Unisex);
//! let image = studio.generate(&request).await?;
//! image.save("shoot.png")?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod composer;
pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod studio;

pub use composer::{compose, ComposedPrompt, Composer, HintPolicy, SceneClass};
pub use config::{Config, GeminiConfig};
pub use error::{Result, TryOnError, ValidationError};
pub use gemini::{GeminiClient, GenerationClient};
pub use models::{
    BodyShape, CompositionRequest, GarmentImage, GarmentSelection, GeneratedImage, Pose, SkinTone,
    VtonCategory,
};
pub use studio::TryOnStudio;
