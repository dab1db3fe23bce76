use common::test_helpers::generate_unique_id;
use processing::{
    model::{ReviewRecord, ScoredReview},
    scorers::{HeuristicScorer, Lexicon, Scorer, ScoringConfig, Thresholds},
};

fn records_for_user(user_id: &str, contents: &[&str]) -> Vec<ReviewRecord> {
    contents
        .iter()
        .map(|content| ReviewRecord::new(*content, user_id))
        .collect()
}

fn score_one(content: &str) -> ScoredReview {
    let scorer = HeuristicScorer::new();
    let mut scored = scorer.score(vec![ReviewRecord::new(content, generate_unique_id("USER"))]);
    scored.remove(0)
}

#[test]
fn test_six_neutral_reviews_from_one_user() {
    let scorer = HeuristicScorer::new();
    let records: Vec<ReviewRecord> = (0..6)
        .map(|_| ReviewRecord::new("ok", "U1"))
        .collect();

    let scored = scorer.score(records);

    assert_eq!(scored.len(), 6);
    for review in &scored {
        let s = review.signals;
        assert_eq!(s.user_review_count, 6);
        assert!(s.repetitive_user);
        assert!(!s.one_time_reviewer);
        assert!(!s.too_positive);
        assert!(!s.too_negative);
        assert_eq!(s.score, 1);
        assert!(!s.mostly_fake);
    }
}

#[test]
fn test_single_glowing_review_from_new_user() {
    let review = score_one("this is the best amazing fantastic product");
    let s = review.signals;

    assert_eq!(s.positive_count, 3);
    assert!(s.too_positive);
    assert!(s.one_time_reviewer);
    assert_eq!(s.user_review_count, 1);
    assert_eq!(s.score, 2);
    assert!(s.mostly_fake);
}

#[test]
fn test_lexicon_match_is_case_insensitive() {
    assert_eq!(score_one("BEST best Best").signals.positive_count, 3);
}

#[test]
fn test_lexicon_match_is_whole_token() {
    assert_eq!(score_one("best-ever").signals.positive_count, 0);
    assert_eq!(score_one("amazing! perfect.").signals.positive_count, 0);
    assert_eq!(score_one("loved it").signals.positive_count, 0);
}

#[test]
fn test_negative_words_are_counted() {
    let s = score_one("Worst purchase, TERRIBLE quality, a total scam").signals;

    // trailing commas stay attached to "purchase," and "quality,"
    assert_eq!(s.negative_count, 3);
    assert!(s.too_negative);
    assert_eq!(s.positive_count, 0);
    assert_eq!(s.score, 2);
}

#[test]
fn test_tokens_split_on_any_whitespace() {
    let s = score_one("awesome\tlove\nexcellent").signals;
    assert_eq!(s.positive_count, 3);
}

#[test]
fn test_tokens_split_on_ascii_separators() {
    let s = score_one("best\u{1c}amazing\u{1f}love").signals;
    assert_eq!(s.positive_count, 3);
    assert!(s.too_positive);
}

#[test]
fn test_user_review_count_is_broadcast_to_every_record() {
    let scorer = HeuristicScorer::new();
    let mut records = records_for_user("A", &["a1", "a2", "a3"]);
    records.extend(records_for_user("B", &["b1"]));
    records.insert(1, ReviewRecord::new("b2", "B"));

    let scored = scorer.score(records);

    for review in &scored {
        let expected = match review.record.user_id.as_str() {
            "A" => 3,
            "B" => 2,
            other => panic!("unexpected user {}", other),
        };
        assert_eq!(review.signals.user_review_count, expected);
    }
}

#[test]
fn test_repetitive_user_boundary() {
    let scorer = HeuristicScorer::new();

    for count in 2..=5 {
        let contents: Vec<String> = (0..count).map(|i| format!("review {}", i)).collect();
        let refs: Vec<&str> = contents.iter().map(String::as_str).collect();
        let scored = scorer.score(records_for_user("U", &refs));
        assert!(
            scored.iter().all(|r| !r.signals.repetitive_user && !r.signals.one_time_reviewer),
            "count {} must not be repetitive",
            count
        );
        assert!(scored.iter().all(|r| r.signals.score == 0));
    }

    let contents: Vec<String> = (0..7).map(|i| format!("review {}", i)).collect();
    let refs: Vec<&str> = contents.iter().map(String::as_str).collect();
    let scored = scorer.score(records_for_user("U", &refs));
    assert!(scored.iter().all(|r| r.signals.repetitive_user));
}

#[test]
fn test_score_range_and_classification_hold_for_mixed_batch() {
    let scorer = HeuristicScorer::new();
    let mut records = records_for_user(
        "heavy",
        &[
            "best perfect amazing",
            "worst awful scam",
            "best perfect amazing worst awful scam",
            "fine",
            "ok",
            "meh",
        ],
    );
    records.push(ReviewRecord::new("love love love", "once"));
    records.push(ReviewRecord::new("plain words", "twice"));
    records.push(ReviewRecord::new("more plain words", "twice"));

    let scored = scorer.score(records);

    for review in &scored {
        let s = review.signals;
        assert!(s.score <= 4);
        assert_eq!(s.mostly_fake, s.score >= 2);
        let expected = s.repetitive_user as u8
            + s.too_positive as u8
            + s.too_negative as u8
            + s.one_time_reviewer as u8;
        assert_eq!(s.score, expected);
        if s.user_review_count == 1 {
            assert!(s.one_time_reviewer);
        }
    }

    let both = scored
        .iter()
        .find(|r| r.record.review_content == "best perfect amazing worst awful scam")
        .unwrap();
    assert_eq!(both.signals.score, 3);
}

#[test]
fn test_output_keeps_input_order_and_records() {
    let scorer = HeuristicScorer::new();
    let records = vec![
        ReviewRecord::new("first", "U1").with_field("rating", "5"),
        ReviewRecord::new("second", "U2"),
        ReviewRecord::new("third", "U1"),
    ];

    let scored = scorer.score(records.clone());

    let returned: Vec<ReviewRecord> = scored.into_iter().map(|r| r.record).collect();
    assert_eq!(returned, records);
}

#[test]
fn test_rescoring_own_output_is_idempotent() {
    let scorer = HeuristicScorer::new();
    let mut records = records_for_user("U1", &["best amazing love", "a", "b", "c", "d", "e"]);
    records.push(ReviewRecord::new("scam scam scam", "U2"));

    let first = scorer.score(records);
    let second = scorer.score(first.iter().map(|r| r.record.clone()).collect());

    assert_eq!(first, second);
}

#[test]
fn test_empty_input_produces_empty_output() {
    assert!(HeuristicScorer::new().score(Vec::new()).is_empty());
}

#[test]
fn test_custom_thresholds_and_lexicons() {
    let config = ScoringConfig {
        positive_words: Lexicon::new(["Great"]),
        negative_words: Lexicon::new(["meh"]),
        thresholds: Thresholds {
            repetitive_user_above: 1,
            too_positive_at_least: 1,
            too_negative_at_least: 2,
            fake_score_at_least: 3,
        },
    };
    let scorer = HeuristicScorer::new_with_config(config);

    let scored = scorer.score(vec![
        ReviewRecord::new("great meh", "U1"),
        ReviewRecord::new("GREAT meh meh", "U1"),
    ]);

    let first = scored[0].signals;
    assert_eq!(first.positive_count, 1);
    assert!(first.too_positive);
    assert!(!first.too_negative);
    assert!(first.repetitive_user);
    assert_eq!(first.score, 2);
    assert!(!first.mostly_fake);

    let second = scored[1].signals;
    assert!(second.too_negative);
    assert_eq!(second.score, 3);
    assert!(second.mostly_fake);
}

#[test]
fn test_default_config_matches_fixed_constants() {
    let config = ScoringConfig::default();

    assert_eq!(config.positive_words.len(), 9);
    assert_eq!(config.negative_words.len(), 10);
    assert!(config.positive_words.contains("flawless"));
    assert!(config.negative_words.contains("fake"));
    assert_eq!(config.thresholds, Thresholds::default());
    assert_eq!(config.thresholds.repetitive_user_above, 5);
    assert_eq!(config.thresholds.fake_score_at_least, 2);
}
