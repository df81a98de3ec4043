//! Turns a [`CompositionRequest`] into the prompt text and ordered image parts
//! sent to the generation model.
//!
//! Composing is pure: the same request always yields byte-identical text and the
//! same part order.

pub mod scene;
pub mod subject;
pub mod template;

use crate::models::{CompositionRequest, GarmentImage};
use serde::Serialize;

pub use scene::{classify, SceneClass, SceneRule, SCENE_RULES};
pub use subject::SubjectPhrasing;
pub use template::{HintPolicy, RENDERING_HINTS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedPrompt {
    /// Reference photo first (if any), then garments in selection order.
    pub ordered_image_parts: Vec<GarmentImage>,
    pub prompt_text: String,
    pub scene_class: SceneClass,
}

impl ComposedPrompt {
    pub fn part_count(&self) -> usize {
        self.ordered_image_parts.len()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Composer {
    hint_policy: HintPolicy,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hint_policy(mut self, policy: HintPolicy) -> Self {
        self.hint_policy = policy;
        self
    }

    pub fn hint_policy(&self) -> HintPolicy {
        self.hint_policy
    }

    /// Callers must reject an empty garment selection first; see
    /// [`CompositionRequest::ensure_garments`].
    pub fn compose(&self, request: &CompositionRequest) -> ComposedPrompt {
        let labels: Vec<&str> = request.garments.labels().collect();
        let garment_list = labels.join(", ");

        let rule = scene::classify(labels.iter().copied(), request.category);
        let scene_text = scene::refine_for_pose(rule.scene, request.pose);
        let backdrop = template::Backdrop {
            scene: &scene_text,
            lighting: rule.lighting,
        };

        let phrasing = subject::describe(
            request.category,
            request.skin_tone,
            request.body_shape,
            request.pose,
            &garment_list,
        );
        let hints = template::rendering_instructions(labels.iter().copied(), self.hint_policy);

        let prompt_text = match &request.reference_image {
            Some(_) => template::identity_preserving(
                &garment_list,
                &phrasing,
                request.pose,
                &backdrop,
                hints.as_deref(),
            ),
            None => template::from_scratch(&phrasing, &backdrop, hints.as_deref()),
        };

        let mut ordered_image_parts = Vec::with_capacity(request.garments.len() + 1);
        ordered_image_parts.extend(request.reference_image.iter().cloned());
        ordered_image_parts.extend(request.garments.images().cloned());

        ComposedPrompt {
            ordered_image_parts,
            prompt_text,
            scene_class: rule.class,
        }
    }
}

/// Composes with the default (always-on) hint policy.
pub fn compose(request: &CompositionRequest) -> ComposedPrompt {
    Composer::new().compose(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BodyShape, GarmentSelection, Pose, SkinTone, VtonCategory};

    fn img(tag: u8) -> GarmentImage {
        GarmentImage::new(vec![tag; 4], "image/png")
    }

    #[test]
    fn test_swimsuit_scenario() {
        let img1 = img(1);
        let request = CompositionRequest::new(GarmentSelection::new().with("Swimsuit", img1.clone()))
            .with_category(VtonCategory::Women)
            .with_pose(Pose::Standing);

        let composed = compose(&request);
        assert_eq!(composed.scene_class, SceneClass::Swimwear);
        assert_eq!(composed.ordered_image_parts, vec![img1]);
        assert!(composed.prompt_text.contains("beach club"));
        assert!(composed
            .prompt_text
            .contains("a stunningly beautiful wheatish-skinned woman in her 20s with a average figure"));
        assert!(composed.prompt_text.contains(
            "CRITICAL INSTRUCTION: The woman MUST be wearing the outfit composed of the following items: Swimsuit."
        ));
        assert!(composed.prompt_text.starts_with("Generate a high-resolution, photorealistic, full-body fashion shot of"));
    }

    #[test]
    fn test_reference_scenario() {
        let (img0, img1, img2) = (img(0), img(1), img(2));
        let request = CompositionRequest::new(
            GarmentSelection::new()
                .with("Hoodie", img1.clone())
                .with("Jeans (Skinny)", img2.clone()),
        )
        .with_category(VtonCategory::Unisex)
        .with_reference(img0.clone());

        let composed = compose(&request);
        assert_eq!(composed.scene_class, SceneClass::Streetwear);
        assert_eq!(composed.ordered_image_parts, vec![img0, img1, img2]);
        assert!(composed
            .prompt_text
            .starts_with("The first image provided is the reference photo of the subject(s)."));
        assert!(composed.prompt_text.contains("Garment List: Hoodie, Jeans (Skinny)."));
        assert!(composed.prompt_text.contains("neon-lit cyberpunk city street"));
    }

    #[test]
    fn test_part_count_invariant() {
        let garments = GarmentSelection::new()
            .with("Kurti (Long)", img(1))
            .with("Dupatta", img(2))
            .with("Churidar", img(3));
        for category in VtonCategory::ALL {
            let plain = CompositionRequest::new(garments.clone()).with_category(category);
            assert_eq!(compose(&plain).part_count(), 3);

            let with_ref = plain.clone().with_reference(img(0));
            let composed = compose(&with_ref);
            assert_eq!(composed.part_count(), 4);
            assert_eq!(composed.ordered_image_parts[0], img(0));
        }
    }

    #[test]
    fn test_sitting_appends_scene_clause() {
        let request = CompositionRequest::new(GarmentSelection::new().with("Crop Top", img(1)))
            .with_pose(Pose::Sitting);
        let composed = compose(&request);
        assert!(composed.prompt_text.contains(
            "in a sunny, vibrant botanical garden or a chic outdoor cafe terrace, sitting gracefully on a vintage bench."
        ));
    }

    #[test]
    fn test_candid_keeps_scene_but_changes_subject() {
        let garments = GarmentSelection::new().with("Palazzo Pants", img(1));
        let standing = compose(&CompositionRequest::new(garments.clone()));
        let candid = compose(&CompositionRequest::new(garments).with_pose(Pose::Candid));

        let scene = "in a sleek, modern architectural space with glass walls and city skyline views.";
        assert!(standing.prompt_text.contains(scene));
        assert!(candid.prompt_text.contains(scene));
        assert!(candid.prompt_text.contains("laughing naturally in a candid moment"));
        assert!(!standing.prompt_text.contains("laughing naturally"));
    }

    #[test]
    fn test_deterministic() {
        let request = CompositionRequest::new(
            GarmentSelection::new()
                .with("Lehenga Skirt", img(1))
                .with("Blouse (Saree/Lehenga)", img(2)),
        )
        .with_category(VtonCategory::MotherDaughter)
        .with_skin_tone(SkinTone::Tan)
        .with_body_shape(BodyShape::Curvy)
        .with_pose(Pose::Walking);

        assert_eq!(compose(&request), compose(&request));
    }

    #[test]
    fn test_selected_hint_policy_shrinks_prompt() {
        let request = CompositionRequest::new(GarmentSelection::new().with("Swimsuit", img(1)));
        let full = Composer::new().compose(&request);
        let trimmed = Composer::new()
            .with_hint_policy(HintPolicy::SelectedOnly)
            .compose(&request);

        assert!(full.prompt_text.contains("\"Kurti (Long)\""));
        assert!(!trimmed.prompt_text.contains("\"Kurti (Long)\""));
        assert!(trimmed
            .prompt_text
            .contains("- \"Swimsuit\": Render as fitted swimwear material."));
    }
}
