/// Lenient free-text grading against a reference answer.
///
/// Both sides are trimmed and lowercased. The answer counts as correct when
/// the two are equal, when the reference contains the user's answer, or when
/// the user's answer contains the first word of the reference.
///
/// Callers must reject blank answers before calling this.
pub fn evaluate(user_answer: &str, correct_answer: &str) -> bool {
    let user = user_answer.trim().to_lowercase();
    let correct = correct_answer.trim().to_lowercase();

    if user == correct || correct.contains(&user) {
        return true;
    }

    correct
        .split_whitespace()
        .next()
        .is_some_and(|first| user.contains(first))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_ignores_case_and_padding() {
        assert!(evaluate("Paris", "Paris"));
        assert!(evaluate("  paris ", "PARIS"));
    }

    #[test]
    fn test_user_answer_contained_in_reference() {
        assert!(evaluate("par", "Paris"));
        assert!(evaluate("machine learning", "Machine Learning and Deep Learning."));
    }

    #[test]
    fn test_reference_first_word_contained_in_user_answer() {
        assert!(evaluate("I think it is PUT for sure", "PUT is idempotent full replacement"));
        // Only the first word of the reference is searched for.
        assert!(!evaluate("full replacement everywhere", "PUT is idempotent full replacement"));
    }

    #[test]
    fn test_wrong_answer() {
        assert!(!evaluate("xyz", "Paris"));
        assert!(!evaluate("London", "Paris"));
    }

    #[test]
    fn test_rules_are_asymmetric() {
        // The reference containing the answer is accepted...
        assert!(evaluate("4", "4 apples"));
        // ...but the answer containing the whole reference is only accepted
        // through the first-word rule.
        assert!(evaluate("four apples", "apples"));
        assert!(!evaluate("a", "bcd efg"));
    }

    #[test]
    fn test_common_first_word_is_accepted() {
        // Known leniency: any answer mentioning "the" passes here.
        assert!(evaluate("the wrong thing", "The mitochondria"));
    }
}
