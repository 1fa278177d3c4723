//! Property tests for network placement resolution.

use proptest::prelude::*;

use fndeploy::domain::entities::{ConfigDocument, NetworkConfig, NetworkObject};
use fndeploy::domain::services::{resolve_network, EXTERNAL_PRESET};

fn network() -> impl Strategy<Value = NetworkObject> {
    (
        proptest::collection::vec("subnet-[a-f0-9]{4}", 0..3),
        proptest::collection::vec("sg-[a-f0-9]{4}", 0..3),
    )
        .prop_map(|(subnets, groups)| NetworkObject::new(subnets, groups))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: an inline function placement is used verbatim.
    #[test]
    fn property_inline_function_network_wins(
        external in network(),
        env_inline in proptest::option::of(network()),
        inline in network(),
    ) {
        let default = ConfigDocument::default().with_preset(EXTERNAL_PRESET, external);
        let environment = env_inline.map(|n| {
            ConfigDocument::default().with_network_config(NetworkConfig::Inline(n))
        });
        let function = ConfigDocument::default()
            .with_network_config(NetworkConfig::Inline(inline.clone()));

        let resolved = resolve_network(&default, environment.as_ref(), Some(&function)).unwrap();

        prop_assert_eq!(resolved, inline);
    }

    /// PROPERTY: a preset name prefers the environment registry.
    #[test]
    fn property_preset_lookup_prefers_environment(
        in_default in network(),
        in_environment in proptest::option::of(network()),
    ) {
        let default = ConfigDocument::default().with_preset("internal", in_default.clone());
        let environment = in_environment
            .clone()
            .map(|n| ConfigDocument::default().with_preset("internal", n));
        let function = ConfigDocument::default()
            .with_network_config(NetworkConfig::Preset("internal".into()));

        let resolved = resolve_network(&default, environment.as_ref(), Some(&function)).unwrap();

        prop_assert_eq!(resolved, in_environment.unwrap_or(in_default));
    }

    /// PROPERTY: unless the function or environment requests a placement, the
    /// default `external` preset applies, whatever the default layer says.
    #[test]
    fn property_absent_placement_uses_external(
        external in network(),
        default_inline in proptest::option::of(network()),
    ) {
        let mut default = ConfigDocument::default().with_preset(EXTERNAL_PRESET, external.clone());
        default.network_config = default_inline.map(NetworkConfig::Inline);

        let resolved = resolve_network(&default, None, None).unwrap();

        prop_assert_eq!(resolved, external);
    }
}
