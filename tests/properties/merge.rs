//! Property tests for layer merging.

use std::collections::BTreeMap;

use proptest::prelude::*;

use fndeploy::domain::entities::{ConfigDocument, EnvironmentSection};
use fndeploy::domain::services::{merge_layers, ConfigLayer};

fn small_map() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map("[a-d]", "[a-z]{1,4}", 0..4)
}

fn document() -> impl Strategy<Value = ConfigDocument> {
    (
        proptest::option::of("[a-z]{1,6}"),
        proptest::option::of(1u32..900),
        proptest::option::of(128u32..4096),
        small_map(),
        proptest::option::of(small_map()),
    )
        .prop_map(|(runtime, timeout, memory_size, tags, variables)| ConfigDocument {
            runtime,
            timeout,
            memory_size,
            tags,
            environment: variables.map(|variables| EnvironmentSection { variables }),
            ..Default::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: each scalar comes from the highest layer that sets it.
    #[test]
    fn property_scalars_take_highest_present_layer(
        default in document(),
        environment in proptest::option::of(document()),
        function in proptest::option::of(document()),
    ) {
        let merged = merge_layers(&default, environment.as_ref(), function.as_ref());

        let expected_timeout = function
            .as_ref()
            .and_then(|f| f.timeout)
            .or_else(|| environment.as_ref().and_then(|e| e.timeout))
            .or(default.timeout);
        prop_assert_eq!(merged.config.timeout, expected_timeout);

        let expected_runtime = function
            .as_ref()
            .and_then(|f| f.runtime.clone())
            .or_else(|| environment.as_ref().and_then(|e| e.runtime.clone()))
            .or_else(|| default.runtime.clone());
        prop_assert_eq!(merged.config.runtime, expected_runtime);
    }

    /// PROPERTY: tags are the union of all layers, per-key highest layer wins.
    #[test]
    fn property_tags_union_with_precedence(
        default in document(),
        environment in proptest::option::of(document()),
        function in proptest::option::of(document()),
    ) {
        let merged = merge_layers(&default, environment.as_ref(), function.as_ref());

        let mut expected = default.tags.clone();
        for layer in [&environment, &function].into_iter().flatten() {
            expected.extend(layer.tags.clone());
        }
        prop_assert_eq!(&merged.config.tags, &expected);

        for key in expected.keys() {
            let source = merged.sources.get(&format!("Tags.{}", key)).copied();
            let winner = if function.as_ref().is_some_and(|f| f.tags.contains_key(key)) {
                ConfigLayer::Function
            } else if environment.as_ref().is_some_and(|e| e.tags.contains_key(key)) {
                ConfigLayer::Environment
            } else {
                ConfigLayer::Default
            };
            prop_assert_eq!(source, Some(winner));
        }
    }

    /// PROPERTY: environment variables union independently of tags.
    #[test]
    fn property_variables_union_independently(
        default in document(),
        environment in proptest::option::of(document()),
        function in proptest::option::of(document()),
    ) {
        let merged = merge_layers(&default, environment.as_ref(), function.as_ref());

        let mut expected = BTreeMap::new();
        for layer in [Some(&default), environment.as_ref(), function.as_ref()].into_iter().flatten() {
            if let Some(env) = &layer.environment {
                expected.extend(env.variables.clone());
            }
        }
        let actual = merged
            .config
            .environment
            .map(|e| e.variables)
            .unwrap_or_default();
        prop_assert_eq!(actual, expected);
    }

    /// PROPERTY: merging leaves its inputs untouched and is deterministic.
    #[test]
    fn property_merge_is_pure(
        default in document(),
        function in proptest::option::of(document()),
    ) {
        let default_before = default.clone();
        let function_before = function.clone();

        let first = merge_layers(&default, None, function.as_ref());
        let second = merge_layers(&default, None, function.as_ref());

        prop_assert_eq!(&default, &default_before);
        prop_assert_eq!(&function, &function_before);
        prop_assert_eq!(first, second);
    }
}
