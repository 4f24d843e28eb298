#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::quiz::QuestionOrderType;
    use crate::models::domain::{Question, QuestionOption, Quiz};

    /// Builds a question from `(option_id, text, is_correct)` tuples.
    pub fn question(
        id: i64,
        quiz_id: i64,
        order_in_quiz: i32,
        text: &str,
        options: Vec<(i64, &str, bool)>,
    ) -> Question {
        Question {
            id,
            quiz_id,
            text: text.to_string(),
            image: None,
            order_in_quiz,
            options: options
                .into_iter()
                .map(|(option_id, option_text, is_correct)| QuestionOption {
                    id: option_id,
                    text: option_text.to_string(),
                    is_correct,
                })
                .collect(),
        }
    }

    /// Three-question quiz in Random order, 70% to pass, 10 minute limit.
    pub fn general_knowledge_quiz() -> Quiz {
        Quiz {
            id: 1,
            name: "General Knowledge Quiz".to_string(),
            description: "Test your general knowledge with random questions.".to_string(),
            pass_percentage: 70.0,
            time_limit_seconds: Some(600),
            question_order_type: QuestionOrderType::Random,
            questions: vec![
                question(
                    11,
                    1,
                    1,
                    "What is the capital of France?",
                    vec![
                        (111, "Berlin", false),
                        (112, "Paris", true),
                        (113, "Rome", false),
                        (114, "Madrid", false),
                    ],
                ),
                question(
                    12,
                    1,
                    2,
                    "Which planet is known as the Red Planet?",
                    vec![
                        (121, "Earth", false),
                        (122, "Mars", true),
                        (123, "Jupiter", false),
                        (124, "Venus", false),
                    ],
                ),
                question(
                    13,
                    1,
                    3,
                    "What is the largest ocean on Earth?",
                    vec![
                        (131, "Atlantic Ocean", false),
                        (132, "Indian Ocean", false),
                        (133, "Pacific Ocean", true),
                    ],
                ),
            ],
        }
    }

    /// Two-question quiz in Sequential order, 60% to pass, no time limit.
    pub fn science_quiz() -> Quiz {
        Quiz {
            id: 2,
            name: "Science Fundamentals".to_string(),
            description: "Basic science questions in a fixed order.".to_string(),
            pass_percentage: 60.0,
            time_limit_seconds: None,
            question_order_type: QuestionOrderType::Sequential,
            questions: vec![
                question(
                    21,
                    2,
                    1,
                    "What is H2O commonly known as?",
                    vec![(211, "Salt", false), (212, "Water", true)],
                ),
                question(
                    22,
                    2,
                    2,
                    "What gas do plants absorb?",
                    vec![(221, "Oxygen", false), (222, "Carbon dioxide", true)],
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixture_quizzes_are_consistent() {
        let quiz = general_knowledge_quiz();
        assert_eq!(quiz.questions.len(), 3);
        assert!(quiz
            .questions
            .iter()
            .all(|q| q.quiz_id == quiz.id && q.correct_option().is_some()));

        let quiz = science_quiz();
        assert_eq!(quiz.questions.len(), 2);
        assert!(quiz.time_limit_seconds.is_none());
    }
}
