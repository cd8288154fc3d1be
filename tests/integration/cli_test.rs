//! Command-line parsing and command execution

use std::collections::HashMap;

use clap::Parser;
use regify::{
    cli::{Args, Command, Commands},
    config::{EnvConfig, ENV_PREFIX},
    error::{ErrorSeverity, RegifyError},
};

use super::fixtures::{Project, BUTTON_TSX, UTILS_TS};

fn run(project: &Project, argv: &[&str], env: &[(&str, &str)]) -> regify::Result<()> {
    let args = Args::try_parse_from(argv).expect("valid arguments");
    let env = EnvConfig::new(ENV_PREFIX).with_vars(
        env.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>(),
    );
    Command::from_args(args).execute_in(project.root(), &env)
}

#[test]
fn test_help_and_version_are_handled_by_clap() {
    let help = Args::try_parse_from(["regify", "--help"]).unwrap_err();
    assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
    assert!(help.to_string().contains("regify init"));

    let version = Args::try_parse_from(["regify", "--version"]).unwrap_err();
    assert_eq!(version.kind(), clap::error::ErrorKind::DisplayVersion);
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    assert!(Args::try_parse_from(["regify", "analyze"]).is_err());
    assert!(matches!(
        Args::try_parse_from(["regify", "generate", "-i", "x.tsx"]).map(|a| a.command),
        Ok(Commands::Generate(_))
    ));
}

#[test]
fn test_init_then_generate_uses_written_config() {
    let project = Project::new();
    project.write("src/components/button.tsx", BUTTON_TSX);
    project.write("src/components/utils.ts", UTILS_TS);

    run(&project, &["regify", "-q", "init"], &[]).unwrap();
    run(
        &project,
        &["regify", "-q", "generate", "--input", "src/components/button.tsx"],
        &[],
    )
    .unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&project.read("registry/button.json")).unwrap();
    assert_eq!(saved["files"][0]["path"], "src/components/button.tsx");
    assert_eq!(saved["files"][1]["path"], "src/components/utils.ts");
}

#[test]
fn test_environment_sits_between_file_and_flags() {
    let project = Project::new();
    project.write("button.tsx", BUTTON_TSX);
    project.write("utils.ts", UTILS_TS);
    project.write("regify.json", r#"{ "outputDir": "from-file" }"#);

    run(
        &project,
        &["regify", "-q", "generate", "-i", "button.tsx"],
        &[("REGIFY_OUTPUT_DIR", "from-env")],
    )
    .unwrap();
    assert!(project.root().join("from-env/button.json").is_file());

    run(
        &project,
        &["regify", "-q", "generate", "-i", "button.tsx", "-o", "from-flag", "--base-path", "ui"],
        &[("REGIFY_OUTPUT_DIR", "from-env")],
    )
    .unwrap();
    let saved = project.read("from-flag/button.json");
    assert!(saved.contains("\"path\": \"ui/button.tsx\""));
    assert!(!project.root().join("from-file").exists());
}

#[test]
fn test_directory_failure_maps_to_error_exit() {
    let project = Project::new();
    project.write("ui/ok.tsx", "export const Ok = 1;\n");
    project.write("ui/bad.tsx", "import \"./nope\";\n");

    let err = run(&project, &["regify", "-q", "generate", "-i", "ui"], &[]).unwrap_err();

    assert!(matches!(err, RegifyError::BatchFailed { failed: 1, total: 2 }));
    assert_eq!(err.severity(), ErrorSeverity::Error);
    assert!(project.root().join("ui/registry/ok.json").is_file());
}

#[test]
fn test_missing_explicit_config_is_critical() {
    let project = Project::new();
    project.write("button.tsx", BUTTON_TSX);

    let err = run(
        &project,
        &["regify", "--config", "missing.json", "generate", "-i", "button.tsx"],
        &[],
    )
    .unwrap_err();

    assert!(matches!(err, RegifyError::ConfigNotFound { .. }));
    assert_eq!(err.severity(), ErrorSeverity::Critical);
}
