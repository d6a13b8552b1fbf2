use serde::{Deserialize, Serialize};

/// Self-assessed proficiency for a catalog skill.
///
/// `A` is the strongest grade; `None` means "not assessed" and renders as a blank cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[default]
    #[serde(rename = "none", alias = "")]
    None,
    A,
    B,
    C,
    D,
    E,
}

impl Grade {
    pub fn is_set(self) -> bool {
        self != Grade::None
    }

    /// Letter written into the grade cell; empty for `None`.
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::None => "",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_deserializes_letters_and_none() {
        let grades: Vec<Grade> = serde_json::from_str(r#"["A", "E", "none", ""]"#).unwrap();
        assert_eq!(grades, vec![Grade::A, Grade::E, Grade::None, Grade::None]);
    }

    #[test]
    fn test_none_renders_blank() {
        assert_eq!(Grade::None.as_str(), "");
        assert!(!Grade::None.is_set());
        assert!(Grade::C.is_set());
    }
}
