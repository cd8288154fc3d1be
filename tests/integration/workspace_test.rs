//! Monorepo and workspace handling

use regify::{
    core::{workspace::load_workspace_info, GraphWalker},
    error::Result,
    generate_registry,
    models::RegifyConfig,
};

use super::fixtures::Project;

/// `apps/web` links `@acme/shared` from the workspace; `@acme/other` lives in
/// the repo but is not a declared workspace package.
fn monorepo() -> Project {
    let project = Project::with_package_json(
        r#"{ "name": "acme", "private": true, "workspaces": ["packages/*", "apps/*"] }"#,
    );
    project.write("packages/shared/package.json", r#"{ "name": "@acme/shared" }"#);
    project.write("packages/shared/index.ts", "export const shared = 1;\n");
    project.write("packages/other/index.ts", "export const other = 2;\n");
    project.write(
        "apps/web/package.json",
        r#"{
            "name": "web",
            "dependencies": { "@acme/shared": "workspace:*", "react": "^18.2.0" }
        }"#,
    );
    project.write(
        "apps/web/tsconfig.json",
        r#"{
            "compilerOptions": {
                "paths": {
                    "@acme/shared": ["../../packages/shared/index.ts"],
                    "@acme/other": ["../../packages/other/index.ts"]
                }
            }
        }"#,
    );
    project
}

#[test]
fn test_workspace_imports_are_neither_inlined_nor_declared() -> Result<()> {
    let project = monorepo();
    let entry = project.write(
        "apps/web/src/card.tsx",
        "import { shared } from \"@acme/shared\";\nimport { other } from \"@acme/other\";\nimport * as React from \"react\";\n",
    );

    let manifest = generate_registry(&entry, &RegifyConfig::default())?;

    // Declared workspace packages are assumed to ship elsewhere
    assert_eq!(manifest.files.len(), 1);
    assert_eq!(manifest.files[0].path, "src/card.tsx");
    assert_eq!(manifest.dependencies, vec!["@acme/other", "react"]);
    assert!(!manifest.dependencies.iter().any(|d| d == "@acme/shared"));
    Ok(())
}

#[test]
fn test_project_root_is_nearest_package_json() -> Result<()> {
    let project = monorepo();
    let entry = project.write("apps/web/src/card.tsx", "export const card = 1;\n");
    let config = RegifyConfig::default();

    let walker = GraphWalker::new(&entry, &config)?;

    assert!(walker.root().ends_with("apps/web"));
    assert!(walker.workspace().is_monorepo);
    assert!(walker.workspace().is_workspace_package("@acme/shared"));
    Ok(())
}

#[test]
fn test_root_workspaces_globs_collect_package_names() {
    let project = monorepo();

    let info = load_workspace_info(project.root());

    assert!(info.is_monorepo);
    assert!(info.workspace_packages.contains("@acme/shared"));
    assert!(info.workspace_packages.contains("web"));
}

#[test]
fn test_outside_root_without_monorepo_is_external() -> Result<()> {
    let project = Project::new();
    project.write("vendor/helper.ts", "export const helper = 1;\n");
    project.write("app/package.json", r#"{ "name": "app" }"#);
    let entry = project.write(
        "app/main.ts",
        "import { helper } from \"../vendor/helper\";\nexport const main = helper;\n",
    );

    let manifest = generate_registry(&entry, &RegifyConfig::default())?;

    assert_eq!(manifest.files.len(), 1);
    assert_eq!(manifest.dependencies, vec!["../vendor/helper"]);
    Ok(())
}
