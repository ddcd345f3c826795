//! Built-in data shown when the backend is unreachable.

use chrono::{DateTime, TimeZone as _, Utc};
use codeiv_webclient::{Difficulty, Question, QuestionId, SessionRecord, TestCase};

fn languages() -> Vec<String> {
    ["python", "javascript", "cpp"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Stand-in for a question that failed to load; keeps the requested id.
pub fn question(id: &QuestionId) -> Question {
    Question {
        id: id.clone(),
        title: "Two Sum Problem".to_owned(),
        description: "Given an array of integers nums and an integer target, return indices of the two numbers such that they add up to target.".to_owned(),
        difficulty: Difficulty::Easy,
        language: languages(),
        test_cases: vec![
            TestCase {
                input: "[2,7,11,15], 9".to_owned(),
                expected_output: "[0,1]".to_owned(),
            },
            TestCase {
                input: "[3,2,4], 6".to_owned(),
                expected_output: "[1,2]".to_owned(),
            },
        ],
    }
}

pub fn questions() -> Vec<Question> {
    [
        ("1", "Two Sum Problem", "Find two numbers that add up to target", Difficulty::Easy),
        ("2", "Binary Tree Traversal", "Implement various tree traversal methods", Difficulty::Medium),
        ("3", "Dynamic Programming Challenge", "Solve complex optimization problem", Difficulty::Hard),
    ]
    .into_iter()
    .map(|(id, title, description, difficulty)| Question {
        id: QuestionId::new(id),
        title: title.to_owned(),
        description: description.to_owned(),
        difficulty,
        language: languages(),
        test_cases: vec![],
    })
    .collect()
}

pub fn sessions(user_id: &str) -> Vec<SessionRecord> {
    vec![
        SessionRecord {
            id: "1".to_owned(),
            user_id: user_id.to_owned(),
            question_id: QuestionId::new("1"),
            code: "def two_sum(nums, target):\n    # Solution code here\n    return [0, 1]".to_owned(),
            language: "python".to_owned(),
            score: 85,
            feedback: "Great job! Your solution is correct and efficient.".to_owned(),
            timestamp: at(2024, 1, 15, 10, 30),
            duration: 25,
        },
        SessionRecord {
            id: "2".to_owned(),
            user_id: user_id.to_owned(),
            question_id: QuestionId::new("2"),
            code: "function binaryTreeTraversal(root) {\n    // Solution here\n}".to_owned(),
            language: "javascript".to_owned(),
            score: 92,
            feedback: "Excellent implementation with good edge case handling.".to_owned(),
            timestamp: at(2024, 1, 14, 14, 20),
            duration: 35,
        },
    ]
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn demo_question_keeps_requested_id() {
        let q = question(&QuestionId::new("42"));
        assert_eq!(q.id.as_str(), "42");
        assert_eq!(q.language, vec!["python", "javascript", "cpp"]);
        assert_eq!(q.test_cases.len(), 2);
    }

    #[test]
    fn demo_catalog_and_history() {
        let qs = questions();
        assert_eq!(qs.len(), 3);
        assert_eq!(qs[2].difficulty, Difficulty::Hard);

        let ss = sessions("u-1");
        assert!(ss.iter().all(|s| s.user_id == "u-1"));
        assert_eq!(ss.iter().map(|s| s.score).collect::<Vec<_>>(), vec![85, 92]);
    }
}
