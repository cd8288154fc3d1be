//! On-disk project fixtures shared by the integration tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway project rooted at a temp dir with a `package.json`
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Self::with_package_json(r#"{ "name": "fixture", "dependencies": { "react": "^18.2.0" } }"#)
    }

    pub fn with_package_json(package_json: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        fs::write(dir.path().join("package.json"), package_json).expect("write package.json");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root, creating parent dirs
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, content).expect("write fixture file");
        path
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.dir.path().join(rel)).expect("read fixture file")
    }
}

pub const BUTTON_TSX: &str = r#"import { cn } from "./utils";
import React from "react";

export function Button({ className }: { className?: string }) {
  return (
    <button className={cn("px-4 py-2", className)} />
  );
}
"#;

pub const UTILS_TS: &str = r#"export function cn(...inputs: Array<string | undefined>) {
  return inputs.filter(Boolean).join(" ");
}
"#;
