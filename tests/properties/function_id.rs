//! Property tests for function identifiers.

use proptest::prelude::*;

use fndeploy::FunctionId;

proptest! {
    /// PROPERTY: remote names parse back into the same identifier.
    #[test]
    fn property_remote_name_round_trips(
        project in "[a-z][a-z0-9_]{0,8}",
        function in "[a-z][a-z0-9_-]{0,12}",
    ) {
        let id = FunctionId::new(&project, &function).unwrap();

        let parsed = FunctionId::from_remote_name(&project, &id.remote_name());

        prop_assert_eq!(parsed, Some(id.clone()));
        prop_assert_eq!(id.handler(), format!("{}-{}.handler", project, function));
    }

    /// PROPERTY: source extensions never leak into the remote name.
    #[test]
    fn property_source_extension_is_stripped(
        function in "[a-z][a-z0-9_]{0,8}",
        ext in prop::sample::select(vec!["js", "ts", "py"]),
    ) {
        let with_ext = FunctionId::new("example", &format!("{}.{}", function, ext)).unwrap();
        let without = FunctionId::new("example", &function).unwrap();

        prop_assert_eq!(with_ext, without);
    }
}
