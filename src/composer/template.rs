use super::subject::SubjectPhrasing;
use crate::models::Pose;
use serde::{Deserialize, Serialize};

/// Which garment rendering hints go into the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HintPolicy {
    /// The full hint block, whatever was selected.
    #[default]
    Always,
    /// Only hints whose garment label appears in the selection.
    SelectedOnly,
}

impl std::str::FromStr for HintPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" | "all" => Ok(HintPolicy::Always),
            "selected" | "selected-only" => Ok(HintPolicy::SelectedOnly),
            other => Err(format!("unknown hint policy '{other}'")),
        }
    }
}

pub struct RenderingHint {
    pub labels: &'static [&'static str],
    pub guidance: &'static str,
}

impl RenderingHint {
    fn line(&self) -> String {
        let labels: Vec<String> = self.labels.iter().map(|l| format!("\"{l}\"")).collect();
        format!("- {}: {}", labels.join(" / "), self.guidance)
    }

    /// A hint covers a label it names exactly, or one that starts with it as a
    /// whole word ("Saree" covers "Saree (Traditional)", not "Sareena").
    fn applies_to(&self, labels_lower: &[String]) -> bool {
        self.labels.iter().any(|hint| {
            let hint = hint.to_lowercase();
            labels_lower.iter().any(|label| {
                label == &hint
                    || label
                        .strip_prefix(hint.as_str())
                        .map_or(false, |rest| rest.starts_with(' '))
            })
        })
    }
}

pub static RENDERING_HINTS: [RenderingHint; 16] = [
    RenderingHint {
        labels: &["Kurti (Anarkali)", "Kurti (Flared)"],
        guidance: "Render as a frock-style top with a fitted bodice and a voluminous flared skirt part.",
    },
    RenderingHint {
        labels: &["Kurti (Long)"],
        guidance: "Render as a long tunic reaching the calves or ankles.",
    },
    RenderingHint {
        labels: &["Kurti (Short)"],
        guidance: "Render as a short tunic ending at the hips.",
    },
    RenderingHint {
        labels: &["Straight Pants (Ethnic)"],
        guidance: "Render as slim-fit, straight-cut trousers ending at the ankle (cigarette pants).",
    },
    RenderingHint {
        labels: &["Kaftan (Ethnic)"],
        guidance: "Render as a rich, flowy, traditional full-length robe with intricate details.",
    },
    RenderingHint {
        labels: &["Kaftan (Nightwear)"],
        guidance: "Render as a soft, comfortable, loose-fitting lounge robe.",
    },
    RenderingHint {
        labels: &["Kaftan (Top)"],
        guidance: "Render as a stylish, loose-fitting tunic top.",
    },
    RenderingHint {
        labels: &["Saree"],
        guidance: "Render as a traditionally draped 6-yard fabric with appropriate pleats.",
    },
    RenderingHint {
        labels: &["Lehenga"],
        guidance: "Render as a voluminous, floor-length skirt with a matching blouse.",
    },
    RenderingHint {
        labels: &["Sharara", "Gharara"],
        guidance: "Render as wide-legged traditional trousers that flare out dramatically at the bottom.",
    },
    RenderingHint {
        labels: &["Gown", "Dress (Maxi)"],
        guidance: "Render as a floor-length formal garment.",
    },
    RenderingHint {
        labels: &["Jumpsuit"],
        guidance: "Render as a seamless one-piece top and pant combination.",
    },
    RenderingHint {
        labels: &["Hoodie", "Oversized T-Shirt"],
        guidance: "Render with a relaxed, streetwear fit.",
    },
    RenderingHint {
        labels: &["Swimsuit"],
        guidance: "Render as fitted swimwear material.",
    },
    RenderingHint {
        labels: &["Co-ord Set"],
        guidance: "Render as a matching top and bottom set.",
    },
    RenderingHint {
        labels: &["Cap", "Hat", "Beanie"],
        guidance: "Render as stylish headwear worn naturally on the head.",
    },
];

/// The "Garment Rendering Instructions" block, or `None` when no hint applies.
pub fn rendering_instructions<'a, I>(labels: I, policy: HintPolicy) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let labels_lower: Vec<String> = labels.into_iter().map(str::to_lowercase).collect();
    let lines: Vec<String> = RENDERING_HINTS
        .iter()
        .filter(|hint| policy == HintPolicy::Always || hint.applies_to(&labels_lower))
        .map(RenderingHint::line)
        .collect();
    if lines.is_empty() {
        return None;
    }
    Some(format!("Garment Rendering Instructions:\n{}", lines.join("\n")))
}

/// Scene text after pose refinement plus its lighting.
pub struct Backdrop<'a> {
    pub scene: &'a str,
    pub lighting: &'a str,
}

pub fn identity_preserving(
    garment_list: &str,
    phrasing: &SubjectPhrasing,
    pose: Pose,
    backdrop: &Backdrop<'_>,
    hints: Option<&str>,
) -> String {
    let instruction = phrasing.outfit_instruction.replacen("MUST be", "must be shown", 1);
    let mut sections = vec![
        format!(
            "The first image provided is the reference photo of the subject(s).\n\
             The subsequent images are garment items to be tried on.\n\
             Garment List: {garment_list}."
        ),
        "Generate a high-resolution, photorealistic image of the person(s) from the first reference image wearing the provided garments.".to_string(),
        format!("CRITICAL INSTRUCTION: {instruction}"),
        format!(
            "Maintain the facial features, body type, and pose of the reference model as much as possible, but adapt the pose to be {pose} if it looks natural.\n\
             Ensure the skin tone and lighting on the face matches the new environment naturally."
        ),
        format!(
            "Background & Atmosphere:\n\
             The background should be {}.\n\
             The lighting and mood should be {}.",
            backdrop.scene, backdrop.lighting
        ),
    ];
    sections.extend(hints.map(str::to_string));
    sections.join("\n\n")
}

pub fn from_scratch(phrasing: &SubjectPhrasing, backdrop: &Backdrop<'_>, hints: Option<&str>) -> String {
    let mut sections = vec![
        format!(
            "Generate a high-resolution, photorealistic, full-body fashion shot of {} in {}.",
            phrasing.subject, backdrop.scene
        ),
        format!("CRITICAL INSTRUCTION: {}", phrasing.outfit_instruction),
        format!("Lighting & Atmosphere:\n{}", backdrop.lighting),
    ];
    sections.extend(hints.map(str::to_string));
    sections.push(
        "Each garment, provided in the input images, should be realistically rendered and combined to fit the subject(s) naturally and correctly as a complete outfit.\n\
         The background should be detailed but slightly blurred (bokeh) to keep focus on the fashion.\n\
         Ensure the models look highly realistic with natural skin texture and lighting."
            .to_string(),
    );
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_policy_ignores_selection() {
        let block = rendering_instructions(["Scarf"], HintPolicy::Always).unwrap();
        assert!(block.starts_with("Garment Rendering Instructions:\n"));
        assert_eq!(block.lines().count(), 1 + RENDERING_HINTS.len());
        assert!(block.contains(
            "- \"Kurti (Anarkali)\" / \"Kurti (Flared)\": Render as a frock-style top with a fitted bodice and a voluminous flared skirt part."
        ));
        assert!(block.contains("- \"Cap\" / \"Hat\" / \"Beanie\": Render as stylish headwear worn naturally on the head."));
    }

    #[test]
    fn test_selected_policy_filters() {
        let block =
            rendering_instructions(["Saree (Traditional)", "Beanie"], HintPolicy::SelectedOnly).unwrap();
        let lines: Vec<&str> = block.lines().skip(1).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("- \"Saree\""));
        assert!(lines[1].starts_with("- \"Cap\""));

        assert_eq!(rendering_instructions(["Scarf"], HintPolicy::SelectedOnly), None);
    }

    #[test]
    fn test_selected_policy_matches_whole_words_only() {
        assert_eq!(rendering_instructions(["Cape"], HintPolicy::SelectedOnly), None);
        assert_eq!(rendering_instructions(["Hatband"], HintPolicy::SelectedOnly), None);
        assert_eq!(
            rendering_instructions(["Blouse (Saree/Lehenga)"], HintPolicy::SelectedOnly),
            None
        );

        let block = rendering_instructions(["Lehenga Skirt", "cap"], HintPolicy::SelectedOnly).unwrap();
        let lines: Vec<&str> = block.lines().skip(1).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("- \"Lehenga\""));
        assert!(lines[1].starts_with("- \"Cap\""));
    }

    #[test]
    fn test_hint_policy_parsing() {
        assert_eq!("selected".parse::<HintPolicy>().unwrap(), HintPolicy::SelectedOnly);
        assert_eq!("ALWAYS".parse::<HintPolicy>().unwrap(), HintPolicy::Always);
        assert!("sometimes".parse::<HintPolicy>().is_err());
    }

    #[test]
    fn test_identity_template_softens_instruction() {
        let phrasing = SubjectPhrasing {
            subject: "someone".into(),
            outfit_instruction: "The woman MUST be wearing the outfit composed of the following items: Coat.".into(),
        };
        let backdrop = Backdrop {
            scene: "a street",
            lighting: "soft light",
        };
        let text = identity_preserving("Coat", &phrasing, Pose::Walking, &backdrop, None);
        assert!(text.contains("CRITICAL INSTRUCTION: The woman must be shown wearing the outfit"));
        assert!(text.contains("adapt the pose to be Walking if it looks natural"));
        assert!(text.contains("The background should be a street."));
        assert!(!text.contains("Garment Rendering Instructions"));
    }
}
