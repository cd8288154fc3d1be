//! End-to-end tests for single-entry registry generation

use std::collections::BTreeMap;

use regify::{
    generate_registry,
    error::{RegifyError, Result},
    models::{RegifyConfig, RegistryType},
    output::format_manifest_json,
};

use super::fixtures::{Project, BUTTON_TSX, UTILS_TS};

fn paths(manifest: &regify::Manifest) -> Vec<&str> {
    manifest.files.iter().map(|f| f.path.as_str()).collect()
}

#[test]
fn test_button_with_local_utils() -> Result<()> {
    let project = Project::new();
    let entry = project.write("button.tsx", BUTTON_TSX);
    project.write("utils.ts", UTILS_TS);

    let manifest = generate_registry(&entry, &RegifyConfig::default())?;

    assert_eq!(manifest.name, "button");
    assert_eq!(manifest.registry_type, Some(RegistryType::Ui));
    assert_eq!(paths(&manifest), vec!["button.tsx", "utils.ts"]);
    assert_eq!(manifest.files[0].file_type, RegistryType::Ui);
    assert_eq!(manifest.files[1].file_type, RegistryType::Lib);
    assert_eq!(manifest.files[0].content, BUTTON_TSX);
    assert_eq!(manifest.files[1].content, UTILS_TS);
    assert_eq!(manifest.dependencies, vec!["react"]);
    assert!(manifest.dev_dependencies.is_empty());
    assert!(manifest.registry_dependencies.is_empty());
    Ok(())
}

#[test]
fn test_diamond_emits_shared_file_once() -> Result<()> {
    let project = Project::new();
    let entry = project.write(
        "entry.ts",
        "import { a } from \"./a\";\nimport { b } from \"./b\";\nexport const entry = a + b;\n",
    );
    project.write("a.ts", "import { c } from \"./c\";\nexport const a = c;\n");
    project.write("b.ts", "import { c } from \"./c.ts\";\nexport const b = c;\n");
    project.write("c.ts", "export const c = 1;\n");

    let manifest = generate_registry(&entry, &RegifyConfig::default())?;

    assert_eq!(paths(&manifest), vec!["entry.ts", "a.ts", "c.ts", "b.ts"]);
    Ok(())
}

#[test]
fn test_self_import_is_a_cycle() {
    let project = Project::new();
    let entry = project.write("a.ts", "import { x } from \"./a\";\nexport const x = 1;\n");

    let err = generate_registry(&entry, &RegifyConfig::default()).unwrap_err();

    match err.root_cause() {
        RegifyError::CircularDependency { chain } => assert_eq!(chain, "a.ts -> a.ts"),
        other => panic!("expected a cycle, got {:?}", other),
    }
    assert_eq!(err.to_string().matches("a.ts").count(), 3);
}

#[test]
fn test_indirect_cycle_lists_full_chain() {
    let project = Project::new();
    let entry = project.write("lib/a.ts", "import \"./b\";\nexport const a = 1;\n");
    project.write("lib/b.ts", "import { a } from \"./a\";\nexport const b = a;\n");

    let err = generate_registry(&entry, &RegifyConfig::default()).unwrap_err();

    assert!(err
        .to_string()
        .contains("Circular dependency detected: lib/a.ts -> lib/b.ts -> lib/a.ts"));
}

#[test]
fn test_typo_in_relative_import() {
    let project = Project::new();
    let entry = project.write("button.tsx", "import { cn } from \"./utlis\";\nexport const b = cn;\n");
    project.write("utils.ts", UTILS_TS);

    let err = generate_registry(&entry, &RegifyConfig::default()).unwrap_err();

    match err.root_cause() {
        RegifyError::UnresolvedImport { specifier, importer } => {
            assert_eq!(specifier, "./utlis");
            assert_eq!(importer.to_string_lossy(), "button.tsx");
        }
        other => panic!("expected unresolved import, got {:?}", other),
    }
    assert!(matches!(err, RegifyError::Generation { .. }));
}

#[test]
fn test_unresolved_alias_import() {
    let project = Project::new();
    project.write(
        "tsconfig.json",
        r#"{
            // JSONC is allowed here
            "compilerOptions": { "baseUrl": ".", "paths": { "@/*": ["./*"], }, },
        }"#,
    );
    let entry = project.write("components/card.tsx", "import { x } from \"@/lib/missing\";\n");

    let err = generate_registry(&entry, &RegifyConfig::default()).unwrap_err();

    assert!(matches!(
        err.root_cause(),
        RegifyError::UnresolvedImport { specifier, .. } if specifier == "@/lib/missing"
    ));
}

#[test]
fn test_alias_imports_are_inlined_and_classified_by_path() -> Result<()> {
    let project = Project::new();
    project.write(
        "tsconfig.json",
        r#"{ "compilerOptions": { "paths": { "@/*": ["./*"] } } }"#,
    );
    let entry = project.write(
        "components/ui/badge.tsx",
        "import { cn } from \"@/lib/utils\";\nimport { useTheme } from \"@/hooks/theme\";\nexport const Badge = () => null;\n",
    );
    project.write("lib/utils.ts", UTILS_TS);
    project.write("hooks/theme.ts", "export const useTheme = () => \"dark\";\n");

    let manifest = generate_registry(&entry, &RegifyConfig::default())?;

    assert_eq!(
        paths(&manifest),
        vec!["components/ui/badge.tsx", "lib/utils.ts", "hooks/theme.ts"]
    );
    let types: Vec<_> = manifest.files.iter().map(|f| f.file_type).collect();
    assert_eq!(types, vec![RegistryType::Ui, RegistryType::Lib, RegistryType::Hook]);
    assert!(manifest.dependencies.is_empty());
    Ok(())
}

#[test]
fn test_registry_dependency_replaces_inlining_once() -> Result<()> {
    let project = Project::new();
    let entry = project.write(
        "form.tsx",
        "import { Button } from \"./button\";\nimport { Field } from \"./field\";\n",
    );
    project.write("field.tsx", "import { Button } from \"./button\";\nexport const Field = Button;\n");
    project.write("button.tsx", BUTTON_TSX);

    let url = "https://acme.dev/r/button.json";
    let config = RegifyConfig {
        registry_dependencies: Some(BTreeMap::from([("button".to_string(), url.to_string())])),
        ..Default::default()
    };

    let manifest = generate_registry(&entry, &config)?;

    assert_eq!(manifest.registry_dependencies, vec![url]);
    assert_eq!(paths(&manifest), vec!["form.tsx", "field.tsx"]);
    assert!(manifest.dependencies.is_empty());
    Ok(())
}

#[test]
fn test_dependencies_and_files_never_overlap() -> Result<()> {
    let project = Project::new();
    let entry = project.write(
        "dialog.tsx",
        "import * as React from \"react\";\nimport { clsx } from \"clsx\";\nimport { cn } from \"./utils\";\nimport \"./dialog.css\";\n",
    );
    project.write("utils.ts", UTILS_TS);
    project.write("dialog.css", ".dialog { display: grid; }\n");

    let manifest = generate_registry(&entry, &RegifyConfig::default())?;

    assert_eq!(manifest.dependencies, vec!["react", "clsx"]);
    for dependency in &manifest.dependencies {
        assert!(manifest.files.iter().all(|f| !f.path.contains(dependency.as_str())));
    }
    for file in &manifest.files {
        assert!(!manifest.dependencies.iter().any(|d| d.ends_with(&file.path)));
    }
    let style = manifest.files.iter().find(|f| f.path == "dialog.css");
    assert_eq!(style.map(|f| f.file_type), Some(RegistryType::Style));
    Ok(())
}

#[test]
fn test_repeated_runs_are_byte_identical() -> Result<()> {
    let project = Project::new();
    let entry = project.write("button.tsx", BUTTON_TSX);
    project.write("utils.ts", UTILS_TS);
    let config = RegifyConfig {
        base_path: Some("components/ui".to_string()),
        ..Default::default()
    };

    let first = format_manifest_json(&generate_registry(&entry, &config)?)?;
    let second = format_manifest_json(&generate_registry(&entry, &config)?)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_base_path_prefixes_file_names() -> Result<()> {
    let project = Project::new();
    let entry = project.write("src/button.tsx", BUTTON_TSX);
    project.write("src/utils.ts", UTILS_TS);
    let config = RegifyConfig {
        base_path: Some("components/ui/".to_string()),
        ..Default::default()
    };

    let manifest = generate_registry(&entry, &config)?;

    assert_eq!(
        paths(&manifest),
        vec!["components/ui/button.tsx", "components/ui/utils.ts"]
    );
    Ok(())
}

#[test]
fn test_style_entry_is_never_inspected() -> Result<()> {
    let project = Project::new();
    let entry = project.write("hooks/use-theme.css", "/* export function useTheme() {} */\n");

    let manifest = generate_registry(&entry, &RegifyConfig::default())?;

    assert_eq!(manifest.name, "use-theme");
    assert_eq!(manifest.registry_type, Some(RegistryType::Style));
    Ok(())
}

#[test]
fn test_hook_naming_outside_special_directories() -> Result<()> {
    let project = Project::new();
    let entry = project.write(
        "use-toggle.ts",
        "import { useState } from \"react\";\nexport function useToggle() { return useState(false); }\n",
    );

    let manifest = generate_registry(&entry, &RegifyConfig::default())?;

    assert_eq!(manifest.name, "use-toggle");
    assert_eq!(manifest.registry_type, Some(RegistryType::Hook));
    assert_eq!(manifest.dependencies, vec!["react"]);
    Ok(())
}

#[test]
fn test_type_comes_from_entry_only() -> Result<()> {
    let project = Project::new();
    let entry = project.write("index.ts", "import { useToggle } from \"./hooks/use-toggle\";\nexport const toggle = useToggle;\n");
    project.write("hooks/use-toggle.ts", "export function useToggle() {}\n");

    let manifest = generate_registry(&entry, &RegifyConfig::default())?;

    assert_eq!(manifest.registry_type, Some(RegistryType::Lib));
    assert_eq!(manifest.files[1].file_type, RegistryType::Hook);
    Ok(())
}

#[test]
fn test_missing_entry_is_not_wrapped() {
    let project = Project::new();
    let err = generate_registry(&project.root().join("nope.tsx"), &RegifyConfig::default())
        .unwrap_err();
    assert!(matches!(err, RegifyError::EntryNotFound { .. }));
}

#[test]
fn test_syntax_error_aborts_the_walk() {
    let project = Project::new();
    let entry = project.write("entry.ts", "import { a } from \"./broken\";\n");
    project.write("broken.ts", "export const = ;\n");

    let err = generate_registry(&entry, &RegifyConfig::default()).unwrap_err();

    assert!(matches!(err.root_cause(), RegifyError::Parse { .. }));
}
