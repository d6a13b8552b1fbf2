//! The skill catalog. Ordered and immutable; shared by every layout and the scorer.
//!
//! Order matters: within a category, skills render top-to-bottom in the order listed here.
//! Adding a skill means adding one row below and (if its band is full) moving the band
//! header rows in `layout::skill_matrix`. The startup self-check catches a band overflow.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Os,
    Infrastructure,
    Database,
    Role,
    Language,
    Framework,
    Process,
    OfficeTool,
    DesignTool,
    DevTool,
    Cloud,
    Other,
    PcUsage,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 13] = [
        SkillCategory::Os,
        SkillCategory::Infrastructure,
        SkillCategory::Database,
        SkillCategory::Role,
        SkillCategory::Language,
        SkillCategory::Framework,
        SkillCategory::Process,
        SkillCategory::OfficeTool,
        SkillCategory::DesignTool,
        SkillCategory::DevTool,
        SkillCategory::Cloud,
        SkillCategory::Other,
        SkillCategory::PcUsage,
    ];
}

/// How the applicant's value for a skill is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkillKind {
    /// A `Grade` from none/A–E.
    Graded,
    /// A non-negative year count (PC usage history).
    Years,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SkillDef {
    pub id: &'static str,
    pub label: &'static str,
    pub category: SkillCategory,
    pub kind: SkillKind,
    /// Baseline skills feed the "at least one baseline grade set" completion predicate.
    pub baseline: bool,
}

const fn graded(id: &'static str, label: &'static str, category: SkillCategory) -> SkillDef {
    SkillDef {
        id,
        label,
        category,
        kind: SkillKind::Graded,
        baseline: false,
    }
}

const fn baseline(id: &'static str, label: &'static str) -> SkillDef {
    SkillDef {
        id,
        label,
        category: SkillCategory::OfficeTool,
        kind: SkillKind::Graded,
        baseline: true,
    }
}

use SkillCategory::*;

pub static SKILL_CATALOG: &[SkillDef] = &[
    // OS
    graded("windows", "Windows", Os),
    graded("macos", "macOS", Os),
    graded("linux", "Linux", Os),
    graded("unix", "UNIX", Os),
    graded("ios", "iOS", Os),
    graded("android", "Android", Os),
    // Server / infrastructure
    graded("apache", "Apache", Infrastructure),
    graded("nginx", "Nginx", Infrastructure),
    graded("iis", "IIS", Infrastructure),
    graded("tomcat", "Tomcat", Infrastructure),
    graded("docker", "Docker", Infrastructure),
    graded("kubernetes", "Kubernetes", Infrastructure),
    graded("vmware", "VMware", Infrastructure),
    // Database
    graded("oracle", "Oracle", Database),
    graded("sql_server", "SQL Server", Database),
    graded("mysql", "MySQL", Database),
    graded("postgresql", "PostgreSQL", Database),
    graded("mongodb", "MongoDB", Database),
    graded("redis", "Redis", Database),
    graded("sqlite", "SQLite", Database),
    // Role / phase
    graded("requirements_definition", "Requirements definition", Role),
    graded("basic_design", "Basic design", Role),
    graded("detailed_design", "Detailed design", Role),
    graded("implementation", "Implementation", Role),
    graded("testing", "Testing", Role),
    graded("operation_maintenance", "Operation / maintenance", Role),
    graded("project_management", "Project management", Role),
    // Programming language
    graded("c", "C", Language),
    graded("cpp", "C++", Language),
    graded("csharp", "C#", Language),
    graded("java", "Java", Language),
    graded("javascript", "JavaScript", Language),
    graded("typescript", "TypeScript", Language),
    graded("python", "Python", Language),
    graded("php", "PHP", Language),
    graded("ruby", "Ruby", Language),
    graded("go", "Go", Language),
    graded("swift", "Swift", Language),
    graded("kotlin", "Kotlin", Language),
    graded("vbnet", "VB.NET", Language),
    graded("sql", "SQL", Language),
    // Framework
    graded("spring", "Spring", Framework),
    graded("laravel", "Laravel", Framework),
    graded("rails", "Ruby on Rails", Framework),
    graded("django", "Django", Framework),
    graded("react", "React", Framework),
    graded("vue", "Vue.js", Framework),
    graded("angular", "Angular", Framework),
    graded("dotnet", ".NET", Framework),
    // Process
    graded("waterfall", "Waterfall", Process),
    graded("agile", "Agile", Process),
    graded("scrum", "Scrum", Process),
    graded("ci_cd", "CI/CD", Process),
    graded("code_review", "Code review", Process),
    // Office tools
    baseline("word", "Word"),
    baseline("excel", "Excel"),
    baseline("powerpoint", "PowerPoint"),
    graded("access", "Access", OfficeTool),
    // Design tools
    graded("photoshop", "Photoshop", DesignTool),
    graded("illustrator", "Illustrator", DesignTool),
    graded("figma", "Figma", DesignTool),
    graded("adobe_xd", "Adobe XD", DesignTool),
    // Dev tools
    graded("git", "Git", DevTool),
    graded("github", "GitHub", DevTool),
    graded("jira", "Jira", DevTool),
    graded("vscode", "VS Code", DevTool),
    graded("eclipse", "Eclipse", DevTool),
    // Cloud
    graded("aws", "AWS", Cloud),
    graded("azure", "Azure", Cloud),
    graded("gcp", "Google Cloud", Cloud),
    // Other
    graded("cad", "CAD", Other),
    graded("sap", "SAP", Other),
    graded("salesforce", "Salesforce", Other),
    // PC usage history
    SkillDef {
        id: "pc_usage_years",
        label: "PC usage history",
        category: PcUsage,
        kind: SkillKind::Years,
        baseline: false,
    },
];

/// Catalog entries for one category, in catalog order.
pub fn skills_in(category: SkillCategory) -> impl Iterator<Item = &'static SkillDef> {
    SKILL_CATALOG.iter().filter(move |s| s.category == category)
}

pub fn baseline_skills() -> impl Iterator<Item = &'static SkillDef> {
    SKILL_CATALOG.iter().filter(|s| s.baseline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = SKILL_CATALOG.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), SKILL_CATALOG.len());
    }

    #[test]
    fn test_every_category_has_skills() {
        for category in SkillCategory::ALL {
            assert!(skills_in(category).count() > 0, "{category:?} is empty");
        }
    }

    #[test]
    fn test_exactly_three_baseline_skills() {
        let ids: Vec<_> = baseline_skills().map(|s| s.id).collect();
        assert_eq!(ids, vec!["word", "excel", "powerpoint"]);
    }

    #[test]
    fn test_only_pc_usage_counts_years() {
        let years: Vec<_> = SKILL_CATALOG
            .iter()
            .filter(|s| s.kind == SkillKind::Years)
            .collect();
        assert_eq!(years.len(), 1);
        assert_eq!(years[0].category, SkillCategory::PcUsage);
    }
}
