use crate::error::{TryOnError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who is being dressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VtonCategory {
    #[default]
    Women,
    Men,
    Girls,
    Boys,
    Kids,
    Unisex,
    MotherDaughter,
    FatherSon,
    MotherSon,
}

impl VtonCategory {
    pub const ALL: [VtonCategory; 9] = [
        VtonCategory::Women,
        VtonCategory::Men,
        VtonCategory::Girls,
        VtonCategory::Boys,
        VtonCategory::Kids,
        VtonCategory::Unisex,
        VtonCategory::MotherDaughter,
        VtonCategory::FatherSon,
        VtonCategory::MotherSon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VtonCategory::Women => "women",
            VtonCategory::Men => "men",
            VtonCategory::Girls => "girls",
            VtonCategory::Boys => "boys",
            VtonCategory::Kids => "kids",
            VtonCategory::Unisex => "unisex",
            VtonCategory::MotherDaughter => "mother-daughter",
            VtonCategory::FatherSon => "father-son",
            VtonCategory::MotherSon => "mother-son",
        }
    }

    /// Human-facing label, e.g. "Mother & Daughter" or "Kids".
    pub fn label(&self) -> &'static str {
        match self {
            VtonCategory::Women => "Women",
            VtonCategory::Men => "Men",
            VtonCategory::Girls => "Girls",
            VtonCategory::Boys => "Boys",
            VtonCategory::Kids => "Kids",
            VtonCategory::Unisex => "Unisex",
            VtonCategory::MotherDaughter => "Mother & Daughter",
            VtonCategory::FatherSon => "Father & Son",
            VtonCategory::MotherSon => "Mother & Son",
        }
    }

    /// Parent-and-child pairs render two subjects in matching outfits.
    pub fn is_pair(&self) -> bool {
        matches!(
            self,
            VtonCategory::MotherDaughter | VtonCategory::FatherSon | VtonCategory::MotherSon
        )
    }

    pub fn model_types() -> impl Iterator<Item = VtonCategory> {
        Self::ALL.into_iter().filter(|c| !c.is_pair())
    }

    pub fn groups() -> impl Iterator<Item = VtonCategory> {
        Self::ALL.into_iter().filter(|c| c.is_pair())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SkinTone {
    Fair,
    #[default]
    Wheatish,
    Tan,
    Dark,
}

impl SkinTone {
    pub const ALL: [SkinTone; 4] = [SkinTone::Fair, SkinTone::Wheatish, SkinTone::Tan, SkinTone::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkinTone::Fair => "Fair",
            SkinTone::Wheatish => "Wheatish",
            SkinTone::Tan => "Tan",
            SkinTone::Dark => "Dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BodyShape {
    Slim,
    #[default]
    Average,
    Curvy,
    Athletic,
}

impl BodyShape {
    pub const ALL: [BodyShape; 4] = [
        BodyShape::Slim,
        BodyShape::Average,
        BodyShape::Curvy,
        BodyShape::Athletic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyShape::Slim => "Slim",
            BodyShape::Average => "Average",
            BodyShape::Curvy => "Curvy",
            BodyShape::Athletic => "Athletic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Pose {
    #[default]
    Standing,
    Walking,
    Sitting,
    Candid,
}

impl Pose {
    pub const ALL: [Pose; 4] = [Pose::Standing, Pose::Walking, Pose::Sitting, Pose::Candid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pose::Standing => "Standing",
            Pose::Walking => "Walking",
            Pose::Sitting => "Sitting",
            Pose::Candid => "Candid",
        }
    }
}

// Case-insensitive parsing against each enum's wire string.
macro_rules! impl_option_parsing {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = TryOnError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        ValidationError::InvalidOption {
                            kind: $kind,
                            value: s.to_string(),
                        }
                        .into()
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_option_parsing!(VtonCategory, "category");
impl_option_parsing!(SkinTone, "skin tone");
impl_option_parsing!(BodyShape, "body shape");
impl_option_parsing!(Pose, "pose");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_studio_defaults() {
        assert_eq!(VtonCategory::default(), VtonCategory::Women);
        assert_eq!(SkinTone::default(), SkinTone::Wheatish);
        assert_eq!(BodyShape::default(), BodyShape::Average);
        assert_eq!(Pose::default(), Pose::Standing);
    }

    #[test]
    fn test_parsing_is_case_insensitive() {
        assert_eq!("Mother-Daughter".parse::<VtonCategory>().unwrap(), VtonCategory::MotherDaughter);
        assert_eq!("dark".parse::<SkinTone>().unwrap(), SkinTone::Dark);
        assert_eq!(" ATHLETIC ".parse::<BodyShape>().unwrap(), BodyShape::Athletic);
        assert_eq!("candid".parse::<Pose>().unwrap(), Pose::Candid);
    }

    #[test]
    fn test_parsing_rejects_unknown_values() {
        let err = "lying".parse::<Pose>().unwrap_err();
        match err {
            TryOnError::Validation(ValidationError::InvalidOption { kind, value }) => {
                assert_eq!(kind, "pose");
                assert_eq!(value, "lying");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_category_partitions() {
        assert_eq!(VtonCategory::model_types().count(), 6);
        assert_eq!(VtonCategory::groups().count(), 3);
        assert_eq!(VtonCategory::FatherSon.label(), "Father & Son");
        assert_eq!(
            serde_json::to_string(&VtonCategory::MotherSon).unwrap(),
            "\"mother-son\""
        );
    }
}
