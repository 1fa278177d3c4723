mod common;

use common::TestWorkspace;

#[test]
fn init_scaffolds_a_workspace_presets_can_read() {
    let ws = TestWorkspace::empty();

    let result = ws.run(&["init", "--stages", "dev,production"]);

    assert_eq!(result.exit_code, 0, "stderr:\n{}", result.stderr);
    assert!(ws.path("fndeploy.toml").is_file());
    assert!(ws.path("config/env/lambda-default.json").is_file());
    assert!(ws.path("config/env/dev/lambda.json").is_file());
    assert!(ws.path("config/env/production/lambda.json").is_file());

    let presets = ws.run(&["--stage", "production", "--json", "presets"]);
    assert_eq!(presets.exit_code, 0, "stderr:\n{}", presets.stderr);
    let names: Vec<String> = presets
        .json_lines()
        .iter()
        .map(|l| l["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["external", "internal", "internalWithNAT"]);
}

#[test]
fn init_refuses_to_overwrite() {
    let ws = TestWorkspace::new();

    let result = ws.run(&["init"]);

    assert_eq!(result.exit_code, 2);
    assert!(result.stderr.contains("already exists"), "{}", result.stderr);
}
