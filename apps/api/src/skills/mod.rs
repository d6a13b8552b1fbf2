// Skill catalog: the one table every skill id, caption and category comes from.
// Layouts and the completion scorer read it; nothing else names a skill id.

pub mod catalog;
pub mod grade;

pub use catalog::{baseline_skills, skills_in, SkillCategory, SkillDef, SkillKind, SKILL_CATALOG};
pub use grade::Grade;
