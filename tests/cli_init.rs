mod common;

use common::*;

#[test]
fn init_writes_config_and_templates() {
    let env = TestEnv::new();

    let result = env.run(&["init"]);

    assert_exit_code!(result, 0);
    assert_produced!(env, "texrun.toml");
    assert!(env.read("latexHeader.tex").contains("\\begin{document}"));
    assert!(env.read("latexFooter.tex").contains("\\end{document}"));

    let config = texrun::Config::load(&env.path("texrun.toml")).unwrap();
    assert_eq!(config, texrun::Config::default());
}

#[test]
fn init_keeps_existing_templates() {
    let env = TestEnv::new();
    env.write("latexHeader.tex", "BEGIN\n");

    let result = env.run(&["init"]);

    assert_exit_code!(result, 0);
    assert_eq!(env.read("latexHeader.tex"), "BEGIN\n");
    assert_output_contains!(result, "kept latexHeader.tex");
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let env = TestEnv::new();
    env.write("texrun.toml", "[view]\nenabled = false\n");

    let result = env.run(&["init", "--yes"]);

    assert_exit_code!(result, 1);
    assert!(result.stderr.contains("already exists"));
    assert_eq!(env.read("texrun.toml"), "[view]\nenabled = false\n");
}

#[test]
fn init_force_overwrites_config() {
    let env = TestEnv::new();
    env.write("texrun.toml", "[view]\nenabled = false\n");

    let result = env.run(&["init", "--force"]);

    assert_exit_code!(result, 0);
    let config = texrun::Config::load(&env.path("texrun.toml")).unwrap();
    assert!(config.view.enabled);
}

#[test]
fn init_json_reports_written_files() {
    let env = TestEnv::new();

    let result = env.run(&["--json", "init"]);

    assert_exit_code!(result, 0);
    let events = result.json_events();
    let complete = events.last().unwrap();
    assert_eq!(complete["command"], "init");
    assert_eq!(complete["written"].as_array().unwrap().len(), 3);
}
