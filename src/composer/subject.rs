use crate::models::{BodyShape, Pose, SkinTone, VtonCategory};

/// Who appears in the shot and what they must wear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPhrasing {
    pub subject: String,
    pub outfit_instruction: String,
}

struct Archetypes {
    adult_female: String,
    adult_male: String,
    child_female: String,
    child_male: String,
    generic_kid: String,
    unisex_model: String,
}

impl Archetypes {
    fn new(skin_tone: SkinTone, body_shape: BodyShape) -> Self {
        let skin = skin_tone.as_str().to_lowercase();
        let body = body_shape.as_str().to_lowercase();
        Self {
            adult_female: format!(
                "a stunningly beautiful {skin}-skinned woman in her 20s with a {body} figure, glowing skin, and stylish hair"
            ),
            adult_male: format!(
                "a handsome {skin}-skinned man in his 20s with a {body} build and stylish short hair"
            ),
            child_female: format!(
                "an adorable {skin}-skinned girl around 8-10 years old with a happy expression"
            ),
            child_male: format!(
                "a cute {skin}-skinned boy around 8-10 years old with a cheerful smile"
            ),
            generic_kid: format!("a happy and photogenic {skin}-skinned child around 8 years old"),
            unisex_model: format!(
                "a trendy, photogenic young adult model with a {body} build and a cool, modern look"
            ),
        }
    }
}

pub fn pose_phrase(pose: Pose) -> String {
    match pose {
        Pose::Candid => "laughing naturally in a candid moment".to_string(),
        other => format!("{} with high-fashion elegance", other.as_str().to_lowercase()),
    }
}

pub fn describe(
    category: VtonCategory,
    skin_tone: SkinTone,
    body_shape: BodyShape,
    pose: Pose,
    garment_list: &str,
) -> SubjectPhrasing {
    let people = Archetypes::new(skin_tone, body_shape);
    let pose = pose_phrase(pose);
    let base = format!("wearing the outfit composed of the following items: {garment_list}");

    let single = |who: &str, noun: &str| SubjectPhrasing {
        subject: format!("{who}, {pose}, looking at the camera"),
        outfit_instruction: format!("The {noun} MUST be {base}."),
    };
    let pair = |adult: &str, child: &str, pronoun: &str, parent: &str, kid: &str| SubjectPhrasing {
        subject: format!(
            "{adult} and {child} standing next to {pronoun}. They are positioned side-by-side, {pose}"
        ),
        outfit_instruction: format!("Both the {parent} and the {kid} MUST be {base} (matching outfits)."),
    };

    match category {
        VtonCategory::Women => single(&people.adult_female, "woman"),
        VtonCategory::Men => single(&people.adult_male, "man"),
        VtonCategory::Girls => single(&people.child_female, "girl"),
        VtonCategory::Boys => single(&people.child_male, "boy"),
        VtonCategory::Kids => single(&people.generic_kid, "child"),
        VtonCategory::Unisex => SubjectPhrasing {
            subject: format!("{}, {pose}, in a studio setting", people.unisex_model),
            outfit_instruction: format!("The model MUST be {base}."),
        },
        VtonCategory::MotherDaughter => pair(
            &people.adult_female,
            &people.child_female,
            "her",
            "mother",
            "daughter",
        ),
        VtonCategory::FatherSon => {
            pair(&people.adult_male, &people.child_male, "him", "father", "son")
        }
        VtonCategory::MotherSon => {
            pair(&people.adult_female, &people.child_male, "her", "mother", "son")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_phrase() {
        assert_eq!(pose_phrase(Pose::Candid), "laughing naturally in a candid moment");
        assert_eq!(pose_phrase(Pose::Walking), "walking with high-fashion elegance");
    }

    #[test]
    fn test_single_subject_uses_options() {
        let phrasing = describe(
            VtonCategory::Men,
            SkinTone::Dark,
            BodyShape::Athletic,
            Pose::Standing,
            "Blazer, Trousers (Formal)",
        );
        assert_eq!(
            phrasing.subject,
            "a handsome dark-skinned man in his 20s with a athletic build and stylish short hair, standing with high-fashion elegance, looking at the camera"
        );
        assert_eq!(
            phrasing.outfit_instruction,
            "The man MUST be wearing the outfit composed of the following items: Blazer, Trousers (Formal)."
        );
    }

    #[test]
    fn test_unisex_is_studio_model() {
        let phrasing = describe(
            VtonCategory::Unisex,
            SkinTone::Tan,
            BodyShape::Slim,
            Pose::Candid,
            "Hoodie",
        );
        assert!(phrasing.subject.starts_with("a trendy, photogenic young adult model with a slim build"));
        assert!(phrasing.subject.ends_with("laughing naturally in a candid moment, in a studio setting"));
        assert!(phrasing.outfit_instruction.starts_with("The model MUST be"));
    }

    #[test]
    fn test_pairs_always_match_outfits() {
        for category in VtonCategory::groups() {
            for skin in SkinTone::ALL {
                for body in BodyShape::ALL {
                    for pose in Pose::ALL {
                        let phrasing = describe(category, skin, body, pose, "Kurta Set (Unisex)");
                        assert!(phrasing.outfit_instruction.starts_with("Both the "));
                        assert!(phrasing.outfit_instruction.ends_with("(matching outfits)."));
                        assert!(phrasing.subject.contains("positioned side-by-side"));
                    }
                }
            }
        }
    }

    #[test]
    fn test_father_son_pronoun() {
        let phrasing = describe(
            VtonCategory::FatherSon,
            SkinTone::Fair,
            BodyShape::Average,
            Pose::Sitting,
            "Shirt (Casual)",
        );
        assert!(phrasing.subject.contains("a cute fair-skinned boy around 8-10 years old with a cheerful smile standing next to him."));
        assert!(phrasing.outfit_instruction.starts_with("Both the father and the son MUST be"));
    }
}
