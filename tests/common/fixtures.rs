//! Test fixture helpers for creating input artifacts
//!
//! Provides realistic captured documents, box descriptions and layout dumps
//! written into a temporary working directory.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Captured document: a heading and a padded, bordered block inside `<body>`
///
/// Indices in document order: HTML 0, HEAD 1, STYLE 2, BODY 3, H1 4,
/// SCRIPT 5, DIV 6, SPAN 7.
pub const DOCUMENT: &str = r#"{
  "scroll": {"x": 0, "y": 0},
  "root": {
    "tag": "HTML",
    "rect": {"left": 0, "top": 0, "width": 980, "height": 400},
    "children": [
      {"tag": "HEAD", "children": [{"tag": "STYLE", "children": ["div { padding: 15px }"]}]},
      {"tag": "BODY",
       "rect": {"left": 8, "top": 8, "width": 964, "height": 300},
       "style": {"display": "block", "margin-top": "8px", "margin-left": "8px"},
       "children": [
         {"tag": "H1", "id": "title",
          "rect": {"left": 20, "top": 41.5, "width": 921, "height": 46},
          "style": {"display": "block", "visibility": "visible"},
          "children": ["  Layout Test  "]},
         {"tag": "SCRIPT", "children": ["console.log(1)"]},
         {"tag": "DIV", "id": "block", "class": "block-test wide",
          "rect": {"left": 20, "top": 103.5, "width": 921, "height": 74},
          "style": {"display": "block", "position": "static", "visibility": "visible",
                    "padding-top": "15px", "padding-right": "15px",
                    "padding-bottom": "15px", "padding-left": "15px",
                    "border-top-width": "2px", "border-right-width": "2px",
                    "border-bottom-width": "2px", "border-left-width": "2px",
                    "margin-bottom": "10px"},
          "children": [{"tag": "SPAN", "class": "label", "children": ["Block content"]}]}
       ]}
    ]
  }
}"#;

/// Reference box for the DIV in [`DOCUMENT`]
pub const REFERENCE_BOX: &str = r#"{
  "content_box": {"x": 37, "y": 120.5, "width": 887, "height": 40},
  "border_box": {"x": 20, "y": 103.5, "width": 921, "height": 74},
  "padding": {"top": 15, "right": 15, "bottom": 15, "left": 15},
  "border": {"top": 2, "right": 2, "bottom": 2, "left": 2},
  "margin": {"top": 0, "right": 0, "bottom": 10, "left": 0}
}"#;

/// Subject box half a pixel off horizontally
pub const SUBJECT_BOX_CLOSE: &str = r#"{
  "content_box": {"x": 37.5, "y": 120.5, "width": 887, "height": 40},
  "border_box": {"x": 20.5, "y": 103.5, "width": 921, "height": 74},
  "padding": {"top": 15, "right": 15, "bottom": 15, "left": 15},
  "border": {"top": 2, "right": 2, "bottom": 2, "left": 2},
  "margin": {"top": 0, "right": 0, "bottom": 10, "left": 0}
}"#;

/// Subject box laid out 18 pixels too low
pub const SUBJECT_BOX_FAR: &str = r#"{
  "content_box": {"x": 37, "y": 138.5, "width": 887, "height": 40},
  "border_box": {"x": 20, "y": 121.5, "width": 921, "height": 74},
  "padding": {"top": 15, "right": 15, "bottom": 15, "left": 15},
  "border": {"top": 2, "right": 2, "bottom": 2, "left": 2},
  "margin": {"top": 0, "right": 0, "bottom": 10, "left": 0}
}"#;

/// Box description missing `content_box.height`
pub const MALFORMED_BOX: &str = r#"{
  "content_box": {"x": 37, "y": 120.5, "width": 887},
  "border_box": {"x": 20, "y": 103.5, "width": 921, "height": 74},
  "padding": {"top": 15, "right": 15, "bottom": 15, "left": 15},
  "border": {"top": 2, "right": 2, "bottom": 2, "left": 2},
  "margin": {"top": 0, "right": 0, "bottom": 0, "left": 0}
}"#;

/// Layout dump as printed by a subject engine
pub const DUMP: &str = "\
=== layout tree ===
Tag: h1
Content: x=20.00, y=61.50, width=921.00, height=46.00
Tag: div
Class: block-test
Content: x=37.00, y=140.50, width=887.00, height=40.00
Border: ignored line
";

/// Temporary working directory holding fixture files
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create an empty workspace
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Workspace root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `name` inside the workspace
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `contents` to `name` and return its path
    pub fn write(&self, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
        let path = self.join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Parse a JSON file from the workspace
    pub fn read_json(&self, name: &str) -> anyhow::Result<serde_json::Value> {
        Ok(serde_json::from_str(&fs::read_to_string(self.join(name))?)?)
    }
}
