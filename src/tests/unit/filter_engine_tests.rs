//! Filter Engine Tests
//!
//! Generation ranges, type intersection, free text, failure propagation and
//! the concurrency of membership lookups.

use std::sync::Arc;

use rstest::rstest;

use crate::core::error::CatalogError;
use crate::core::filter::{FilterSelection, Generation};
use crate::tests::common::{engine_with, first_n, ids_of, summaries, tag};
use crate::tests::mocks::ScriptedMembershipSource;

fn two_type_source() -> Arc<ScriptedMembershipSource> {
    Arc::new(
        ScriptedMembershipSource::new()
            .with_members("fire", &[1, 4, 7])
            .with_members("flying", &[4, 7, 10])
            .with_members("electric", &[25, 26, 172, 405])
            .with_members("ghost", &[92, 93, 94]),
    )
}

// ============================================================================
// No Filter
// ============================================================================

#[tokio::test]
async fn test_empty_selection_returns_full_list_unchanged() {
    let source = two_type_source();
    let engine = engine_with(source.clone());
    let full = first_n(20);

    let visible = engine
        .apply_filters(&full, &FilterSelection::new())
        .await
        .unwrap();

    assert!(Arc::ptr_eq(&full, &visible));
    assert_eq!(source.total_calls(), 0);
}

#[tokio::test]
async fn test_blank_free_text_counts_as_no_filter() {
    let engine = engine_with(two_type_source());
    let full = first_n(5);

    let selection = FilterSelection::new().with_free_text("   ");
    let visible = engine.apply_filters(&full, &selection).await.unwrap();
    assert!(Arc::ptr_eq(&full, &visible));
}

// ============================================================================
// Generation Only
// ============================================================================

#[tokio::test]
async fn test_generation_only_keeps_ids_in_range() {
    let source = two_type_source();
    let engine = engine_with(source.clone());
    let full = Arc::new(summaries([1, 4, 150, 151, 152]));

    let selection = FilterSelection::new().with_generation(Generation::Gen1);
    let visible = engine.apply_filters(&full, &selection).await.unwrap();

    assert_eq!(ids_of(&visible), vec![1, 4, 150, 151]);
    assert_eq!(source.total_calls(), 0, "generation filter is local");
}

#[rstest]
#[case(Generation::Gen2, vec![152, 155, 251])]
#[case(Generation::Gen3, vec![255, 257])]
#[case(Generation::Gen9, vec![])]
#[tokio::test]
async fn test_generation_boundaries(#[case] generation: Generation, #[case] expected: Vec<u32>) {
    let engine = engine_with(two_type_source());
    let full = Arc::new(summaries([1, 151, 152, 155, 251, 255, 257]));

    let selection = FilterSelection::new().with_generation(generation);
    let visible = engine.apply_filters(&full, &selection).await.unwrap();
    assert_eq!(ids_of(&visible), expected);
}

// ============================================================================
// Type Filters
// ============================================================================

#[tokio::test]
async fn test_two_types_intersect_not_union() {
    let engine = engine_with(two_type_source());
    let full = first_n(12);

    let selection = FilterSelection::new()
        .with_type(tag("fire"))
        .with_type(tag("flying"));
    let visible = engine.apply_filters(&full, &selection).await.unwrap();

    assert_eq!(ids_of(&visible), vec![4, 7]);
}

#[tokio::test]
async fn test_same_type_twice_collapses_to_one_lookup() {
    let source = two_type_source();
    let engine = engine_with(source.clone());
    let full = first_n(12);

    let selection = FilterSelection::new()
        .with_type(tag("fire"))
        .with_type(tag("fire"));
    let visible = engine.apply_filters(&full, &selection).await.unwrap();

    assert_eq!(ids_of(&visible), vec![1, 4, 7]);
    assert_eq!(source.calls("fire"), 1);
}

#[tokio::test]
async fn test_type_and_generation_combine() {
    let engine = engine_with(two_type_source());
    let full = Arc::new(summaries([25, 26, 172, 405]));

    let selection = FilterSelection::new()
        .with_generation(Generation::Gen2)
        .with_type(tag("electric"));
    let visible = engine.apply_filters(&full, &selection).await.unwrap();

    assert_eq!(ids_of(&visible), vec![172]);
}

#[tokio::test]
async fn test_members_outside_the_list_are_ignored() {
    let engine = engine_with(two_type_source());
    // 405 is an electric member but not in the loaded list
    let full = first_n(30);

    let selection = FilterSelection::new().with_type(tag("electric"));
    let visible = engine.apply_filters(&full, &selection).await.unwrap();
    assert_eq!(ids_of(&visible), vec![25, 26]);
}

#[tokio::test]
async fn test_type_only_keeps_ids_beyond_generation_table() {
    let source = Arc::new(ScriptedMembershipSource::new().with_members("fire", &[6, 10034]));
    let engine = engine_with(source);
    let full = Arc::new(summaries([6, 7, 10034]));

    let selection = FilterSelection::new().with_type(tag("fire"));
    let visible = engine.apply_filters(&full, &selection).await.unwrap();
    assert_eq!(ids_of(&visible), vec![6, 10034]);
}

#[tokio::test]
async fn test_unknown_type_yields_empty_list() {
    let engine = engine_with(two_type_source());
    let selection = FilterSelection::new().with_type(tag("shadow"));
    let visible = engine.apply_filters(&first_n(10), &selection).await.unwrap();
    assert!(visible.is_empty());
}

#[tokio::test]
async fn test_repeat_filter_is_served_from_cache() {
    let source = two_type_source();
    let engine = engine_with(source.clone());
    let full = first_n(12);
    let selection = FilterSelection::new()
        .with_type(tag("fire"))
        .with_type(tag("flying"));

    for _ in 0..3 {
        engine.apply_filters(&full, &selection).await.unwrap();
    }

    assert_eq!(source.calls("fire"), 1);
    assert_eq!(source.calls("flying"), 1);
    assert_eq!(engine.membership().len().await, 2);
}

#[tokio::test]
async fn test_output_keeps_input_order() {
    let engine = engine_with(two_type_source());
    let full = Arc::new(summaries([1, 4, 7, 10]));

    let selection = FilterSelection::new().with_type(tag("flying"));
    let visible = engine.apply_filters(&full, &selection).await.unwrap();
    assert_eq!(ids_of(&visible), vec![4, 7, 10]);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_one_failed_lookup_fails_the_filter() {
    let source = Arc::new(
        ScriptedMembershipSource::new()
            .with_members("fire", &[1, 4, 7])
            .failing("flying"),
    );
    let engine = engine_with(source);

    let selection = FilterSelection::new()
        .with_type(tag("fire"))
        .with_type(tag("flying"));
    let err = engine
        .apply_filters(&first_n(10), &selection)
        .await
        .unwrap_err();

    match err {
        CatalogError::FilterQuery { tag, source } => {
            assert_eq!(tag, "flying");
            assert!(source.is_remote());
        }
        other => panic!("expected FilterQuery, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_lookup_is_retried_on_next_filter() {
    let source = Arc::new(ScriptedMembershipSource::new().failing("ghost"));
    let engine = engine_with(source.clone());
    let selection = FilterSelection::new().with_type(tag("ghost"));

    assert!(engine.apply_filters(&first_n(5), &selection).await.is_err());
    assert!(engine.apply_filters(&first_n(5), &selection).await.is_err());
    assert_eq!(source.calls("ghost"), 2);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_type_lookups_are_issued_concurrently() {
    let source = two_type_source();
    source.hold("fire");
    source.hold("flying");
    let engine = engine_with(source.clone());
    let full = first_n(12);

    let selection = FilterSelection::new()
        .with_type(tag("fire"))
        .with_type(tag("flying"));

    let filter = engine.apply_filters(&full, &selection);
    let release = async {
        // Both lookups must be in flight while both gates are still shut.
        source.wait_for_calls("fire", 1).await;
        source.wait_for_calls("flying", 1).await;
        source.release("fire");
        source.release("flying");
    };
    let (visible, ()) = tokio::join!(filter, release);

    assert_eq!(ids_of(&visible.unwrap()), vec![4, 7]);
}

#[tokio::test]
async fn test_concurrent_filters_share_one_lookup() {
    let source = two_type_source();
    source.hold("ghost");
    let engine = engine_with(source.clone());
    let full = Arc::new(summaries([92, 93, 94, 95]));
    let selection = FilterSelection::new().with_type(tag("ghost"));

    let first = engine.apply_filters(&full, &selection);
    let second = engine.apply_filters(&full, &selection);
    let release = async {
        source.wait_for_calls("ghost", 1).await;
        tokio::task::yield_now().await;
        source.release("ghost");
    };
    let (a, b, ()) = tokio::join!(first, second, release);

    assert_eq!(ids_of(&a.unwrap()), vec![92, 93, 94]);
    assert_eq!(ids_of(&b.unwrap()), vec![92, 93, 94]);
    assert_eq!(source.calls("ghost"), 1);
}

// ============================================================================
// Free Text
// ============================================================================

#[tokio::test]
async fn test_free_text_matches_name_case_insensitively() {
    let engine = engine_with(two_type_source());
    let selection = FilterSelection::new().with_free_text("CHAR");
    let visible = engine.apply_filters(&first_n(10), &selection).await.unwrap();
    assert_eq!(ids_of(&visible), vec![4, 5, 6]);
}

#[tokio::test]
async fn test_free_text_applies_after_type_filter() {
    let engine = engine_with(two_type_source());
    let selection = FilterSelection::new()
        .with_type(tag("electric"))
        .with_free_text("chu");
    let visible = engine
        .apply_filters(&Arc::new(summaries([25, 26, 172])), &selection)
        .await
        .unwrap();
    assert_eq!(ids_of(&visible), vec![25, 26, 172]);

    let selection = FilterSelection::new()
        .with_type(tag("electric"))
        .with_free_text("rai");
    let visible = engine
        .apply_filters(&Arc::new(summaries([25, 26, 172])), &selection)
        .await
        .unwrap();
    assert_eq!(ids_of(&visible), vec![26]);
}
