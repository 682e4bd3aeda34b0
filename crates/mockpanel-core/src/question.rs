//! Practice question bank.
//!
//! A fixed set of product-sense interview questions, keyed by a stable
//! string id so the score ledger can track history per question.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Question category. Only product sense exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    ProductSense,
}

/// One practice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub category: QuestionCategory,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

const QUESTION_TEXTS: [&str; 26] = [
    "How would you build a fitness app for seniors?",
    "How would you build a carpooling feature for Google Maps?",
    "How would you build a subscription service for Amazon?",
    "How would you build a social feature for Spotify?",
    "How would you build a learning platform for YouTube?",
    "How would you build a marketplace for local services?",
    "How would you build a budgeting feature for a banking app?",
    "How would you build a remote collaboration tool for designers?",
    "How would you build a meal planning app for busy parents?",
    "How would you build a job matching feature for LinkedIn?",
    "How would you build a platform for finding jobs?",
    "How would you design an oven for people in wheelchairs?",
    "Google Maps is launching a version for schools. How would you design it?",
    "What is your favorite mobile app? Why? How would you improve it?",
    "How would you design a neighborhood park?",
    "What would you change in a supermarket to improve it for students?",
    "What is your preferred photo storage website/app? What would you change about it?",
    "Design a portal or an interactive landing page to replace Google.com.",
    "How would you design a social networking / career website for entrepreneurs?",
    "How would you integrate Stories into Instagram Explore?",
    "How would you improve Facebook Groups?",
    "How would you improve birthdays on Facebook?",
    "You are a Product Manager at a grocery store. You are asked to redesign the store's display window - how would you design it?",
    "How would you use Facebook to create a doctor referral program?",
    "Build a product for buying and selling antiques.",
    "Design a social travel product for Facebook.",
];

/// The full bank, ids `"1"` through `"26"`.
pub fn bank() -> Vec<Question> {
    QUESTION_TEXTS
        .iter()
        .enumerate()
        .map(|(i, text)| Question {
            id: (i + 1).to_string(),
            category: QuestionCategory::ProductSense,
            question: text.to_string(),
            context: None,
        })
        .collect()
}

/// Look up a question by id.
pub fn by_id(id: &str) -> Option<Question> {
    bank().into_iter().find(|q| q.id == id)
}

/// Pick a random question from the bank.
pub fn random() -> Question {
    let bank = bank();
    bank.choose(&mut rand::thread_rng())
        .cloned()
        .expect("question bank is never empty")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_has_26_questions_with_sequential_ids() {
        let bank = bank();
        assert_eq!(bank.len(), 26);
        assert_eq!(bank[0].id, "1");
        assert_eq!(bank[25].id, "26");
    }

    #[test]
    fn test_by_id_finds_known_question() {
        let q = by_id("1").unwrap();
        assert!(q.question.contains("fitness app"));
        assert!(by_id("0").is_none());
        assert!(by_id("27").is_none());
    }

    #[test]
    fn test_random_returns_a_bank_member() {
        let q = random();
        assert!(by_id(&q.id).is_some());
    }

    #[test]
    fn test_context_is_omitted_from_wire_when_absent() {
        let q = by_id("1").unwrap();
        let json = serde_json::to_value(&q).unwrap();
        assert!(json.get("context").is_none());
    }
}
