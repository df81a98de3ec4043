//! The fixed garment taxonomy.
//!
//! Labels are shown to users and also feed the scene classifier, so the same
//! strings are used everywhere. [`check_selection`] rejects anything else.

use crate::composer::{scene, SceneClass};
use crate::error::{Result, ValidationError};
use crate::models::{GarmentSelection, VtonCategory};

pub struct GarmentGroup {
    pub name: &'static str,
    pub labels: &'static [&'static str],
}

pub static TAXONOMY: [GarmentGroup; 9] = [
    GarmentGroup {
        name: "Traditional / Ethnic",
        labels: &[
            "Abaya",
            "Blouse (Saree/Lehenga)",
            "Churidar",
            "Dupatta",
            "Gharara",
            "Kaftan (Ethnic)",
            "Kurti (Anarkali)",
            "Kurti (Flared)",
            "Kurti (Knee Length)",
            "Kurti (Long)",
            "Kurti (Short)",
            "Kurti (Straight Cut)",
            "Lehenga Skirt",
            "Patiala Salwar",
            "Salwar",
            "Saree (Ready-to-wear)",
            "Saree (Traditional)",
            "Sharara",
            "Straight Pants (Ethnic)",
        ],
    },
    GarmentGroup {
        name: "Dresses & Jumpsuits",
        labels: &[
            "Co-ord Set",
            "Dress (A-Line)",
            "Dress (Bodycon)",
            "Dress (Knee Length)",
            "Dress (Maxi)",
            "Dress (Midi)",
            "Dress (Mini)",
            "Gown (Evening)",
            "Jumpsuit",
            "Romper",
        ],
    },
    GarmentGroup {
        name: "Tops",
        labels: &[
            "Blouse (Western)",
            "Crop Top",
            "Kaftan (Top)",
            "Off-shoulder Top",
            "Peplum Top",
            "Shirt (Casual)",
            "Shirt (Formal)",
            "T-Shirt",
            "Tank Top",
            "Top",
            "Tunic",
            "Vest",
        ],
    },
    GarmentGroup {
        name: "Bottoms",
        labels: &[
            "Dhoti Pants",
            "Jeans (Mom)",
            "Jeans (Skinny)",
            "Jeans (Wide Leg)",
            "Leggings",
            "Palazzo Pants",
            "Pant (Casual)",
            "Shorts",
            "Skirt (Long/Maxi)",
            "Skirt (Midi)",
            "Skirt (Mini)",
            "Straight Pants (Ethnic)",
            "Trousers (Formal)",
        ],
    },
    GarmentGroup {
        name: "Unisex & Streetwear",
        labels: &[
            "Casual Wear",
            "Co-ord Set (Unisex)",
            "Ethnic Unisex Robe",
            "Fusion Wear",
            "Hoodie",
            "Jacket",
            "Kurta Set (Unisex)",
            "Matching Theme Outfit",
            "Night Suit (Unisex)",
            "Oversized T-Shirt",
            "Sweatshirt",
            "Track Suit",
        ],
    },
    GarmentGroup {
        name: "Outerwear",
        labels: &[
            "Blazer",
            "Cardigan",
            "Coat",
            "Denim Jacket",
            "Pullover",
            "Shrug",
            "Sweater",
            "Waistcoat",
            "Winter Wear",
        ],
    },
    GarmentGroup {
        name: "Nightwear",
        labels: &["Kaftan (Nightwear)", "Lounge Set", "Nighty (Long)", "Nighty (Short)"],
    },
    GarmentGroup {
        name: "Swimwear",
        labels: &["Cover-up", "Swimsuit", "Swim Trunks"],
    },
    GarmentGroup {
        name: "Accessories",
        labels: &["Beanie", "Cap", "Hat", "Scarf"],
    },
];

pub fn groups() -> impl Iterator<Item = &'static GarmentGroup> {
    TAXONOMY.iter()
}

pub fn group(name: &str) -> Option<&'static GarmentGroup> {
    TAXONOMY.iter().find(|g| g.name.eq_ignore_ascii_case(name.trim()))
}

/// Labels of the named group in display order.
pub fn labels(group_name: &str) -> Option<&'static [&'static str]> {
    group(group_name).map(|g| g.labels)
}

/// Every label once, in table order. "Straight Pants (Ethnic)" is listed under
/// two groups but appears here only once.
pub fn all_labels() -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = Vec::new();
    for label in TAXONOMY.iter().flat_map(|g| g.labels.iter().copied()) {
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}

pub fn contains(label: &str) -> bool {
    group_of(label).is_some()
}

/// The first group that lists `label`.
pub fn group_of(label: &str) -> Option<&'static GarmentGroup> {
    TAXONOMY.iter().find(|g| g.labels.contains(&label))
}

/// Labels of `group` containing `term` (case-insensitive), alphabetically sorted.
pub fn search(group: &GarmentGroup, term: &str) -> Vec<&'static str> {
    let term = term.to_lowercase();
    let mut hits: Vec<&'static str> = group
        .labels
        .iter()
        .copied()
        .filter(|label| term.is_empty() || label.to_lowercase().contains(&term))
        .collect();
    hits.sort_unstable();
    hits
}

/// Selected labels bucketed by group, in taxonomy order, empty groups omitted.
/// A label listed under two groups shows up under both.
pub fn group_selection<'a>(
    selection: &'a GarmentSelection,
) -> Vec<(&'static GarmentGroup, Vec<&'a str>)> {
    TAXONOMY
        .iter()
        .filter_map(|g| {
            let picked: Vec<&'a str> = g
                .labels
                .iter()
                .filter_map(|label| selection.labels().find(|selected| selected == label))
                .collect();
            (!picked.is_empty()).then_some((g, picked))
        })
        .collect()
}

/// Rejects the first selected label that the taxonomy does not know.
pub fn check_selection(selection: &GarmentSelection) -> Result<()> {
    match selection.labels().find(|label| !contains(label)) {
        Some(unknown) => Err(ValidationError::UnknownGarment(unknown.to_string()).into()),
        None => Ok(()),
    }
}

/// Scene class a single label resolves to on its own.
pub fn scene_class_of(label: &str, category: VtonCategory) -> SceneClass {
    scene::classify([label], category).class
}
