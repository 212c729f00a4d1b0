//! Course draft model — sections, items, and the optional quiz.
//!
//! Mutation methods keep two invariants after every edit:
//! - `order` is contiguous 1..N within the section list and each item list
//! - ids are synthesized at creation and never reused

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Points assigned to a quiz question when the generated value is absent or unusable.
pub const DEFAULT_QUESTION_POINTS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Video,
    Text,
    Link,
    Document,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub kind: ItemKind,
    pub title: String,
    pub body: String,
    /// 1-based position within the owning section.
    pub order: u32,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// 1-based position within the draft.
    pub order: u32,
    pub learning_objectives: Vec<String>,
    pub estimated_duration: Option<String>,
    pub items: Vec<Item>,
}

impl Section {
    pub fn new(title: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            order: 0, // assigned by the owning draft's renumber pass
            learning_objectives: Vec::new(),
            estimated_duration: None,
            items: Vec::new(),
        }
    }

    /// Appends an item and renumbers. Returns the synthesized id.
    pub fn add_item(
        &mut self,
        kind: ItemKind,
        title: String,
        body: String,
        duration: Option<String>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(Item {
            id,
            kind,
            title,
            body,
            order: 0,
            duration,
        });
        self.renumber_items();
        id
    }

    /// Removes an item by id and renumbers. Returns false if the id is unknown.
    pub fn remove_item(&mut self, item_id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != item_id);
        let removed = self.items.len() != before;
        if removed {
            self.renumber_items();
        }
        removed
    }

    /// Moves an item to a new 0-based position (clamped) and renumbers.
    pub fn move_item(&mut self, item_id: Uuid, to_index: usize) -> bool {
        let Some(from) = self.items.iter().position(|i| i.id == item_id) else {
            return false;
        };
        let item = self.items.remove(from);
        let to = to_index.min(self.items.len());
        self.items.insert(to, item);
        self.renumber_items();
        true
    }

    fn renumber_items(&mut self) {
        for (idx, item) in self.items.iter_mut().enumerate() {
            item.order = idx as u32 + 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: Uuid,
    pub text: String,
    pub kind: QuestionKind,
    /// Non-empty whenever `kind` is `MultipleChoice`.
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizDraft {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub questions: Vec<QuizQuestion>,
}

impl QuizDraft {
    pub fn new(title: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            questions: Vec::new(),
        }
    }

    /// Removes a question by id. Returns false if the id is unknown.
    pub fn remove_question(&mut self, question_id: Uuid) -> bool {
        let before = self.questions.len();
        self.questions.retain(|q| q.id != question_id);
        self.questions.len() != before
    }
}

/// The in-progress course being built across wizard steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseDraft {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub short_description: String,
    pub category: String,
    pub price_usd: Option<f64>,
    pub cover_image_url: Option<String>,
    pub sections: Vec<Section>,
    pub quiz: Option<QuizDraft>,
}

impl CourseDraft {
    /// Appends a section and renumbers. Returns the synthesized id.
    pub fn add_section(&mut self, title: String, description: String) -> Uuid {
        let section = Section::new(title, description);
        let id = section.id;
        self.sections.push(section);
        self.renumber_sections();
        id
    }

    /// Removes a section by id and renumbers. Returns false if the id is unknown.
    pub fn remove_section(&mut self, section_id: Uuid) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.id != section_id);
        let removed = self.sections.len() != before;
        if removed {
            self.renumber_sections();
        }
        removed
    }

    /// Moves a section to a new 0-based position (clamped) and renumbers.
    pub fn move_section(&mut self, section_id: Uuid, to_index: usize) -> bool {
        let Some(from) = self.sections.iter().position(|s| s.id == section_id) else {
            return false;
        };
        let section = self.sections.remove(from);
        let to = to_index.min(self.sections.len());
        self.sections.insert(to, section);
        self.renumber_sections();
        true
    }

    pub fn section_mut(&mut self, section_id: Uuid) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    /// True if `id` names a section or an item anywhere in the draft.
    /// Used to validate enrichment owners before issuing a generation call.
    pub fn contains_owner(&self, id: Uuid) -> bool {
        self.sections
            .iter()
            .any(|s| s.id == id || s.items.iter().any(|i| i.id == id))
    }

    pub fn renumber_sections(&mut self) {
        for (idx, section) in self.sections.iter_mut().enumerate() {
            section.order = idx as u32 + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with_sections(n: usize) -> CourseDraft {
        let mut draft = CourseDraft::default();
        for i in 0..n {
            draft.add_section(format!("Section {}", i + 1), String::new());
        }
        draft
    }

    #[test]
    fn test_add_section_assigns_contiguous_order() {
        let draft = draft_with_sections(3);
        let orders: Vec<u32> = draft.sections.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_section_renumbers() {
        let mut draft = draft_with_sections(3);
        let middle = draft.sections[1].id;
        assert!(draft.remove_section(middle));
        let orders: Vec<u32> = draft.sections.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2]);
        assert_eq!(draft.sections[1].title, "Section 3");
    }

    #[test]
    fn test_remove_unknown_section_is_noop() {
        let mut draft = draft_with_sections(2);
        assert!(!draft.remove_section(Uuid::new_v4()));
        assert_eq!(draft.sections.len(), 2);
    }

    #[test]
    fn test_move_section_renumbers() {
        let mut draft = draft_with_sections(3);
        let last = draft.sections[2].id;
        assert!(draft.move_section(last, 0));
        assert_eq!(draft.sections[0].title, "Section 3");
        let orders: Vec<u32> = draft.sections.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_move_section_clamps_target_index() {
        let mut draft = draft_with_sections(2);
        let first = draft.sections[0].id;
        assert!(draft.move_section(first, 99));
        assert_eq!(draft.sections[1].id, first);
    }

    #[test]
    fn test_item_lifecycle_keeps_order_contiguous() {
        let mut draft = draft_with_sections(1);
        let sid = draft.sections[0].id;
        let section = draft.section_mut(sid).unwrap();
        let a = section.add_item(ItemKind::Video, "Intro".into(), String::new(), None);
        let b = section.add_item(ItemKind::Text, "Notes".into(), String::new(), None);
        section.add_item(ItemKind::Link, "Refs".into(), String::new(), None);
        assert_eq!(
            section.items.iter().map(|i| i.order).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        assert!(section.remove_item(b));
        assert_eq!(
            section.items.iter().map(|i| i.order).collect::<Vec<_>>(),
            vec![1, 2]
        );

        assert!(section.move_item(a, 1));
        assert_eq!(section.items[1].id, a);
        assert_eq!(
            section.items.iter().map(|i| i.order).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_contains_owner_finds_sections_and_items() {
        let mut draft = draft_with_sections(1);
        let sid = draft.sections[0].id;
        let iid = draft
            .section_mut(sid)
            .unwrap()
            .add_item(ItemKind::Video, "Intro".into(), String::new(), None);
        assert!(draft.contains_owner(sid));
        assert!(draft.contains_owner(iid));
        assert!(!draft.contains_owner(Uuid::new_v4()));
    }

    #[test]
    fn test_remove_question() {
        let mut quiz = QuizDraft::new("Final".into(), String::new());
        quiz.questions.push(QuizQuestion {
            id: Uuid::new_v4(),
            text: "Q1?".into(),
            kind: QuestionKind::TrueFalse,
            options: vec!["True".into(), "False".into()],
            correct_answer: "True".into(),
            explanation: None,
            points: DEFAULT_QUESTION_POINTS,
        });
        let qid = quiz.questions[0].id;
        assert!(quiz.remove_question(qid));
        assert!(quiz.questions.is_empty());
        assert!(!quiz.remove_question(qid));
    }

    #[test]
    fn test_item_kind_serde_round_trip() {
        let json = serde_json::to_string(&ItemKind::Document).unwrap();
        assert_eq!(json, "\"document\"");
        let kind: ItemKind = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(kind, ItemKind::Video);
    }
}
