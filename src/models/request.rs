use super::common::GarmentImage;
use super::options::{BodyShape, Pose, SkinTone, VtonCategory};
use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};

/// Garment images keyed by taxonomy label.
///
/// Labels are unique and iterate in insertion order; that order is the order in
/// which garment images are sent to the model. Re-inserting a label swaps its
/// image but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarmentSelection {
    entries: Vec<(String, GarmentImage)>,
}

impl GarmentSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the image previously stored under `label`, if any.
    pub fn insert(&mut self, label: impl Into<String>, image: GarmentImage) -> Option<GarmentImage> {
        let label = label.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => Some(std::mem::replace(slot, image)),
            None => {
                self.entries.push((label, image));
                None
            }
        }
    }

    pub fn with(mut self, label: impl Into<String>, image: GarmentImage) -> Self {
        self.insert(label, image);
        self
    }

    pub fn remove(&mut self, label: &str) -> Option<GarmentImage> {
        let index = self.entries.iter().position(|(existing, _)| existing == label)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, label: &str) -> Option<&GarmentImage> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, image)| image)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn images(&self) -> impl Iterator<Item = &GarmentImage> {
        self.entries.iter().map(|(_, image)| image)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GarmentImage)> {
        self.entries.iter().map(|(label, image)| (label.as_str(), image))
    }
}

impl<L: Into<String>> FromIterator<(L, GarmentImage)> for GarmentSelection {
    fn from_iter<T: IntoIterator<Item = (L, GarmentImage)>>(iter: T) -> Self {
        let mut selection = GarmentSelection::new();
        for (label, image) in iter {
            selection.insert(label, image);
        }
        selection
    }
}

/// Everything needed for one generation attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionRequest {
    pub garments: GarmentSelection,
    pub category: VtonCategory,
    pub reference_image: Option<GarmentImage>,
    pub skin_tone: SkinTone,
    pub body_shape: BodyShape,
    pub pose: Pose,
}

impl CompositionRequest {
    pub fn new(garments: GarmentSelection) -> Self {
        Self {
            garments,
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: VtonCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_reference(mut self, image: GarmentImage) -> Self {
        self.reference_image = Some(image);
        self
    }

    pub fn with_skin_tone(mut self, skin_tone: SkinTone) -> Self {
        self.skin_tone = skin_tone;
        self
    }

    pub fn with_body_shape(mut self, body_shape: BodyShape) -> Self {
        self.body_shape = body_shape;
        self
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    /// The only precondition of composing: at least one garment.
    pub fn ensure_garments(&self) -> Result<()> {
        if self.garments.is_empty() {
            return Err(ValidationError::NoGarments.into());
        }
        Ok(())
    }
}
