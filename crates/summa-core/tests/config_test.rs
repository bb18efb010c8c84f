use summa_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = SummaConfig::from_toml("").unwrap();

    // Feedback defaults
    assert_eq!(config.feedback.store, StoreKind::Baseline);
    assert_eq!(config.feedback.baseline.oracle_type, OracleType::AcceptAll);
    assert_eq!(config.feedback.baseline.parse_type, ParseType::Ngrams);
    assert_eq!(config.feedback.baseline.top_n, 400);
    assert_eq!(config.feedback.pagerank.n, 2);
    assert_eq!(config.feedback.pagerank.damping, 0.85);
    assert_eq!(config.feedback.ngram.factor_accept, 2.0);
    assert_eq!(config.feedback.ngram.factor_reject, 0.5);
    assert_eq!(config.feedback.gaussian.cut_off_threshold, 0.4);
    assert_eq!(config.feedback.gaussian.mass_reject, -1.0);
    assert_eq!(config.feedback.random_walk.propagation_abort_threshold, 0.1);
    assert_eq!(config.feedback.ego_pr.tax, 0.5);
    assert_eq!(config.feedback.ego_pr.ego_pr_depth_accept, 1);

    // Session defaults
    assert_eq!(config.session.max_iteration_count, 25);
    assert_eq!(config.session.recommender, RecommenderKind::Default);
    assert!(config.session.max_weight.is_none());

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[feedback]
store = "word_embedding_random_walk"

[feedback.random_walk]
seed = 7
iterations_accept = 16

[feedback.baseline]
oracle_type = "keeptrack"

[session]
max_weight = 10.0
recommender = "highest_weight"
"#;
    let config = SummaConfig::from_toml(toml).unwrap();
    assert_eq!(config.feedback.store, StoreKind::WordEmbeddingRandomWalk);
    assert_eq!(config.feedback.random_walk.seed, 7);
    assert_eq!(config.feedback.random_walk.iterations_accept, 16);
    // Non-overridden fields keep defaults
    assert_eq!(config.feedback.random_walk.iterations_reject, 1);
    assert_eq!(config.feedback.baseline.oracle_type, OracleType::KeepTrack);
    assert_eq!(config.session.max_weight, Some(10.0));
    assert_eq!(config.session.recommender, RecommenderKind::HighestWeight);
}

#[test]
fn config_rejects_invalid_values() {
    let toml = r#"
[feedback.ego_pr]
tax = 1.5
"#;
    assert!(SummaConfig::from_toml(toml).is_err());

    let toml = r#"
[feedback.ngram]
n = 1
"#;
    assert!(SummaConfig::from_toml(toml).is_err());

    assert!(SummaConfig::from_toml("[feedback]\nstore = \"bogus\"").is_err());
}

#[test]
fn config_round_trips_through_toml() {
    let mut config = SummaConfig::default();
    config.feedback.store = StoreKind::SimpleNgram;
    config.feedback.ngram.factor_accept = 4.0;
    let text = config.to_toml().unwrap();
    let parsed = SummaConfig::from_toml(&text).unwrap();
    assert_eq!(parsed.feedback.store, StoreKind::SimpleNgram);
    assert_eq!(parsed.feedback.ngram.factor_accept, 4.0);
}

#[test]
fn store_kind_reports_type_names() {
    assert_eq!(StoreKind::Baseline.as_str(), "BaselineFeedbackStore");
    assert_eq!(
        StoreKind::WordEmbeddingRandomWalk.to_string(),
        "WordEmbeddingRandomWalkDiffusionFeedbackGraph"
    );
    assert!(StoreKind::WordEmbeddingEgoPr.needs_embeddings());
    assert!(!StoreKind::PageRank.needs_embeddings());
}
