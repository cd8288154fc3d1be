//! File and directory generation through the `Generator` driver

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use regify::{
    core::{InputKind, ProgressUpdate},
    error::{RegifyError, Result},
    models::{RegifyConfig, RegistryType},
    output::format_report_json,
    GenerateOptions, Generator,
};

use super::fixtures::{Project, BUTTON_TSX, UTILS_TS};

fn components(project: &Project) {
    project.write("components/alert.tsx", "export const Alert = () => null;\n");
    project.write("components/card.tsx", "import { cn } from \"../lib/utils\";\nexport const Card = cn;\n");
    project.write("components/broken.tsx", "import { x } from \"./missing\";\n");
    project.write("components/README.md", "# not a component\n");
    project.write("components/nested/deep.tsx", "export const Deep = 1;\n");
    project.write("lib/utils.ts", UTILS_TS);
}

#[test]
fn test_file_input_saves_next_to_the_component() -> Result<()> {
    let project = Project::new();
    project.write("src/button.tsx", BUTTON_TSX);
    project.write("src/utils.ts", UTILS_TS);
    let config = RegifyConfig::default();

    let options = GenerateOptions {
        input: PathBuf::from("src/button.tsx"),
        ..Default::default()
    };
    let report = Generator::with_cwd(&config, project.root()).run(&options, |_| {})?;

    assert_eq!(report.input_kind, InputKind::File);
    assert_eq!(report.generated[0].saved_to, Some(PathBuf::from("src/button.json")));

    let saved: serde_json::Value = serde_json::from_str(&project.read("src/button.json"))?;
    assert_eq!(saved["type"], "registry:ui");
    assert_eq!(saved["files"][1]["path"], "src/utils.ts");
    Ok(())
}

#[test]
fn test_name_and_output_dir_pick_the_target() -> Result<()> {
    let project = Project::new();
    project.write("src/button.tsx", BUTTON_TSX);
    project.write("src/utils.ts", UTILS_TS);
    let config = RegifyConfig {
        output_dir: Some(PathBuf::from("public/r")),
        ..Default::default()
    };

    let options = GenerateOptions {
        name: Some("fancy.button".to_string()),
        input: PathBuf::from("src/button.tsx"),
        ..Default::default()
    };
    let report = Generator::with_cwd(&config, project.root()).run(&options, |_| {})?;

    assert_eq!(report.generated[0].saved_to, Some(PathBuf::from("public/r/fancy.json")));
    // The manifest name still comes from the entry file
    assert!(project.read("public/r/fancy.json").contains("\"name\": \"button\""));
    Ok(())
}

#[test]
fn test_raw_json_writes_nothing() -> Result<()> {
    let project = Project::new();
    project.write("button.tsx", BUTTON_TSX);
    project.write("utils.ts", UTILS_TS);
    let config = RegifyConfig::default();

    let options = GenerateOptions {
        input: PathBuf::from("button.tsx"),
        raw_json: true,
        ..Default::default()
    };
    let report = Generator::with_cwd(&config, project.root()).run(&options, |_| {})?;

    assert_eq!(report.generated[0].saved_to, None);
    assert!(!project.root().join("button.json").exists());

    let json = format_report_json(&report)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert_eq!(value["name"], "button");
    Ok(())
}

#[test]
fn test_file_input_failure_is_returned() {
    let project = Project::new();
    project.write("a.ts", "import \"./a\";\n");
    let config = RegifyConfig::default();

    let options = GenerateOptions {
        input: PathBuf::from("a.ts"),
        ..Default::default()
    };
    let err = Generator::with_cwd(&config, project.root())
        .run(&options, |_| {})
        .unwrap_err();

    assert!(matches!(err.root_cause(), RegifyError::CircularDependency { .. }));
}

#[test]
fn test_directory_batch_isolates_failures() -> Result<()> {
    let project = Project::new();
    components(&project);
    let config = RegifyConfig {
        registry_dependencies: Some(BTreeMap::from([(
            "utils".to_string(),
            "https://acme.dev/r/utils.json".to_string(),
        )])),
        ..Default::default()
    };

    let updates = Mutex::new(Vec::new());
    let options = GenerateOptions {
        name: Some("ignored".to_string()),
        input: PathBuf::from("components"),
        jobs: Some(2),
        ..Default::default()
    };
    let report = Generator::with_cwd(&config, project.root()).run(&options, |update: ProgressUpdate| {
        updates.lock().unwrap().push(update);
    })?;

    assert_eq!(report.input_kind, InputKind::Directory);
    assert_eq!(report.total(), 3);
    let names: Vec<_> = report.generated.iter().map(|g| g.manifest.name.as_str()).collect();
    assert_eq!(names, vec!["alert", "card"]);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].source.ends_with("components/broken.tsx"));
    assert!(matches!(
        report.failures[0].error.root_cause(),
        RegifyError::UnresolvedImport { specifier, .. } if specifier == "./missing"
    ));

    let card = &report.generated[1].manifest;
    assert_eq!(card.registry_dependencies, vec!["https://acme.dev/r/utils.json"]);
    assert_eq!(card.registry_type, Some(RegistryType::Lib));

    assert!(project.root().join("components/registry/alert.json").is_file());
    assert!(project.root().join("components/registry/card.json").is_file());
    assert!(!project.root().join("components/registry/broken.json").exists());
    assert!(!project.root().join("components/registry/ignored.json").exists());

    let updates = updates.into_inner().unwrap();
    assert_eq!(updates.len(), 3);
    assert_eq!(updates.iter().filter(|u| !u.succeeded).count(), 1);
    assert!(updates.iter().all(|u| u.total == 3));

    assert!(matches!(
        report.check(),
        Err(RegifyError::BatchFailed { failed: 1, total: 3 })
    ));
    Ok(())
}

#[test]
fn test_empty_directory_is_a_success() -> Result<()> {
    let project = Project::new();
    project.write("empty/notes.txt", "nothing here\n");
    let config = RegifyConfig::default();

    let options = GenerateOptions {
        input: PathBuf::from("empty"),
        ..Default::default()
    };
    let report = Generator::with_cwd(&config, project.root()).run(&options, |_| {})?;

    assert_eq!(report.total(), 0);
    assert!(report.check().is_ok());
    assert_eq!(format_report_json(&report)?, "[]");
    Ok(())
}

#[test]
fn test_option_validation() {
    let project = Project::new();
    project.write("notes.md", "# notes\n");
    let config = RegifyConfig::default();
    let generator = Generator::with_cwd(&config, project.root());

    let missing = GenerateOptions {
        input: PathBuf::from("missing.tsx"),
        ..Default::default()
    };
    let err = generator.run(&missing, |_| {}).unwrap_err();
    assert!(err.to_string().contains("Path must exist"));

    let wrong_extension = GenerateOptions {
        input: PathBuf::from("notes.md"),
        ..Default::default()
    };
    let err = generator.run(&wrong_extension, |_| {}).unwrap_err();
    assert!(matches!(err, RegifyError::InvalidOption { .. }));
}
