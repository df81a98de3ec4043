use crate::models::{Pose, VtonCategory};
use serde::Serialize;

/// Background family picked from the selected garments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneClass {
    Nightwear,
    Swimwear,
    Winter,
    Office,
    EveningFormal,
    Traditional,
    Summer,
    Streetwear,
    GenericModern,
}

/// One row of the classification table.
#[derive(Debug)]
pub struct SceneRule {
    pub class: SceneClass,
    /// Matched as substrings of lower-cased garment labels.
    pub keywords: &'static [&'static str],
    /// Forces this rule regardless of keywords.
    pub category: Option<VtonCategory>,
    pub scene: &'static str,
    pub lighting: &'static str,
}

impl SceneRule {
    pub fn matches(&self, labels_lower: &[String], category: VtonCategory) -> bool {
        self.category == Some(category)
            || labels_lower
                .iter()
                .any(|label| self.keywords.iter().any(|keyword| label.contains(keyword)))
    }
}

/// Evaluated top to bottom; the first matching row wins.
pub static SCENE_RULES: [SceneRule; 8] = [
    SceneRule {
        class: SceneClass::Nightwear,
        keywords: &["night", "lounge", "kaftan (nightwear)"],
        category: None,
        scene: "a luxurious, dimly lit penthouse bedroom or lounge with plush velvet textures",
        lighting: "soft, moody, cinematic night lighting creating a cozy yet high-fashion intimate atmosphere",
    },
    SceneRule {
        class: SceneClass::Swimwear,
        keywords: &["swim", "cover-up"],
        category: None,
        scene: "a high-end beach club in Ibiza or Maldives with white sand and turquoise water",
        lighting: "bright, high-key sunlight with sharp, vibrant contrast",
    },
    SceneRule {
        class: SceneClass::Winter,
        keywords: &["coat", "jacket", "pullover", "sweater", "winter", "cardigan", "shrug"],
        category: None,
        scene: "a chic, european city street in autumn with fallen leaves, or a stylish snowy urban scene",
        lighting: "soft, diffused overcast light with a cool tone, highlighting the textures of the coat/jacket",
    },
    SceneRule {
        class: SceneClass::Office,
        keywords: &[
            "blazer",
            "suit",
            "formal",
            "shirt (formal)",
            "trousers (formal)",
            "waistcoat",
        ],
        category: None,
        scene: "a modern, glass-walled office interior or a high-rise corporate lobby",
        lighting: "clean, professional daylight balancing soft interior lighting",
    },
    SceneRule {
        class: SceneClass::EveningFormal,
        keywords: &["gown", "maxi", "evening"],
        category: None,
        scene: "a red carpet event with blurred paparazzi lights in the background or a marble grand staircase",
        lighting: "dramatic spotlighting with a glamorous, polished editorial finish",
    },
    SceneRule {
        class: SceneClass::Traditional,
        keywords: &[
            "saree",
            "lehenga",
            "lahenga",
            "kurti",
            "dupatta",
            "anarkali",
            "salwar",
            "sharara",
            "churidar",
            "abaya",
            "gharara",
            "patiala",
            "dhoti",
            "blouse (saree/lehenga)",
            "straight pants (ethnic)",
            "kaftan (ethnic)",
        ],
        category: None,
        scene: "a grand heritage palace courtyard with intricate sandstone arches and marigolds, or a luxury boutique interior",
        lighting: "warm, golden hour sunbeams mixing with rich shadows, enhancing the fabric textures",
    },
    SceneRule {
        class: SceneClass::Summer,
        keywords: &["shorts", "skirt", "crop top", "tank top", "dress (mini)", "romper"],
        category: None,
        scene: "a sunny, vibrant botanical garden or a chic outdoor cafe terrace",
        lighting: "bright, natural daylight with warm sun flare",
    },
    SceneRule {
        class: SceneClass::Streetwear,
        keywords: &["jeans", "t-shirt", "hoodie", "sweatshirt", "track suit", "co-ord"],
        category: Some(VtonCategory::Unisex),
        scene: "a gritty, neon-lit cyberpunk city street at night or a minimal concrete fashion studio",
        lighting: "neon accents (purple/blue) mixed with hard rim lighting for an edgy streetwear look",
    },
];

pub static FALLBACK_RULE: SceneRule = SceneRule {
    class: SceneClass::GenericModern,
    keywords: &[],
    category: None,
    scene: "a sleek, modern architectural space with glass walls and city skyline views",
    lighting: "clean, sophisticated studio lighting with soft shadows",
};

pub fn classify<'a, I>(labels: I, category: VtonCategory) -> &'static SceneRule
where
    I: IntoIterator<Item = &'a str>,
{
    let labels_lower: Vec<String> = labels.into_iter().map(str::to_lowercase).collect();
    SCENE_RULES
        .iter()
        .find(|rule| rule.matches(&labels_lower, category))
        .unwrap_or(&FALLBACK_RULE)
}

// (scene fragment, clause) checked in order against the chosen scene text.
const SITTING_CLAUSES: [(&str, &str); 5] = [
    ("garden", ", sitting gracefully on a vintage bench"),
    ("bedroom", ", sitting on the edge of the bed"),
    ("courtyard", ", sitting on a traditional diwan"),
    ("pool", ", sitting on a lounge chair"),
    ("office", ", sitting on a modern office chair"),
];
const SITTING_FALLBACK: &str = ", sitting on a designer chair";
const WALKING_CLAUSE: &str = ", caught in mid-stride walking towards the camera with confidence";

pub fn refine_for_pose(scene: &str, pose: Pose) -> String {
    let clause = match pose {
        Pose::Sitting => SITTING_CLAUSES
            .iter()
            .find(|(fragment, _)| scene.contains(fragment))
            .map(|(_, clause)| *clause)
            .unwrap_or(SITTING_FALLBACK),
        Pose::Walking => WALKING_CLAUSE,
        Pose::Standing | Pose::Candid => "",
    };
    format!("{scene}{clause}")
}
