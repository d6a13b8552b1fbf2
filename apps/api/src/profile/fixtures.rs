//! Test fixtures shared by the profile, layout, render and batch tests.

use chrono::NaiveDate;

use crate::profile::model::{
    Address, ApplicantProfile, Certification, Gender, HistoryEntry, Narrative, PersonName,
    PlannedTest, Qualification, Skills, WorkHistoryEntry,
};
use crate::skills::Grade;

/// Exactly `len` characters, cycling through `seed`.
pub fn text_of_len(seed: &str, len: usize) -> String {
    seed.chars().cycle().take(len).collect()
}

/// A profile that satisfies every completion predicate and every render precondition.
pub fn complete_profile() -> ApplicantProfile {
    let mut skills = Skills::default();
    skills.grades.insert("excel".to_string(), Grade::B);
    skills.grades.insert("java".to_string(), Grade::A);
    skills.grades.insert("linux".to_string(), Grade::C);
    skills.pc_usage_years = 7;

    ApplicantProfile {
        applicant_id: "app-001".to_string(),
        full_name: PersonName::new("Nguyen", "Van An"),
        kana_name: PersonName::new("グエン", "ヴァン アン"),
        birth_date: NaiveDate::from_ymd_opt(1998, 4, 2),
        gender: Gender::Male,
        nationality: "Vietnam".to_string(),
        current_address: Address {
            postal_code: "100000".to_string(),
            street: "12 Tran Hung Dao, Hoan Kiem, Hanoi".to_string(),
            street_kana: "チャン フン ダオ".to_string(),
            phone: "+84-90-123-4567".to_string(),
            email: "an.nguyen@example.com".to_string(),
        },
        contact_address: Address {
            postal_code: "160-0022".to_string(),
            street: "Shinjuku 3-1-1, Tokyo".to_string(),
            street_kana: "シンジュク".to_string(),
            phone: "03-1234-5678".to_string(),
            email: "an.contact@example.com".to_string(),
        },
        contact_same_as_current: false,
        education: vec![
            HistoryEntry::new("2013", "9", "Hanoi High School, entered"),
            HistoryEntry::new("2016", "6", "Hanoi High School, graduated"),
        ],
        no_education: false,
        work_experience: vec![HistoryEntry::new("2020", "7", "FPT Software, developer")],
        no_work_experience: false,
        qualifications: vec![Qualification::new("2021", "12", "JLPT N3")],
        no_qualifications: false,
        detailed_work_history: vec![WorkHistoryEntry {
            period: "2020/07 - 2023/03".to_string(),
            description: "Order management system for a logistics client".to_string(),
            technologies_used: "Java, Spring, PostgreSQL".to_string(),
            software_used: "Eclipse, Git".to_string(),
            role: "Developer".to_string(),
        }],
        no_work_history: false,
        skills,
        narrative: Narrative {
            self_introduction: text_of_len("I enjoy building reliable software. ", 350),
            why_this_country: text_of_len("Japan values craftsmanship and care. ", 320),
            why_interested: text_of_len("Anime first, then the engineering culture. ", 410),
            personal_preferences: "Tokyo area preferred".to_string(),
        },
        spouse_status: "none".to_string(),
        spouse_dependency: "none".to_string(),
        japanese_certification: Certification {
            name: "JLPT N3".to_string(),
            acquired_on: "2021-12".to_string(),
        },
        next_test: PlannedTest {
            level: "N2".to_string(),
            date: "2024-07".to_string(),
        },
        language_certificate_status: "N3 acquired".to_string(),
        photo_key: String::new(),
        photo: None,
    }
}
