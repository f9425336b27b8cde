mod compare;
mod render;

pub use compare::{compare_files, compare_images, diff_image, generate_diff_image, CompareResult};
pub use render::{render_frame, render_to_file, stroke_pixels, RenderConfig};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualTestError {
    #[error("Failed to render frame: {0}")]
    Render(String),
    #[error("Failed to compare images: {0}")]
    Compare(String),
    #[error("Reference image not found: {0}")]
    ReferenceNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VisualTestError>;

/// Configuration for a visual test
#[derive(Clone)]
pub struct VisualTestConfig {
    /// Name of the reference image, without extension
    pub name: String,
    pub render: RenderConfig,
    /// Similarity threshold (0.0 to 1.0, default 0.99)
    pub similarity_threshold: f64,
}

impl Default for VisualTestConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            render: RenderConfig::default(),
            similarity_threshold: 0.99,
        }
    }
}

/// Result of a visual test
pub struct VisualTestResult {
    /// Whether the test passed (similarity >= threshold)
    pub passed: bool,
    /// The similarity score (0.0 to 1.0)
    pub similarity: f64,
    /// Path to the rendered frame
    pub rendered_path: PathBuf,
    /// Path to the reference image
    pub reference_path: PathBuf,
    /// Path to diff image (if generated on failure)
    pub diff_path: Option<PathBuf>,
}

/// Get the path to the references directory
pub fn references_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("references")
}

/// Get the path to a reference image
pub fn reference_path(name: &str) -> PathBuf {
    references_dir().join(format!("{}.png", name))
}

/// Get the path to the output directory for test artifacts
pub fn output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("output")
}

/// Get the path to a rendered frame
pub fn rendered_path(name: &str) -> PathBuf {
    output_dir().join(format!("{}_rendered.png", name))
}

/// Get the path to a diff image
pub fn diff_path(name: &str) -> PathBuf {
    output_dir().join(format!("{}_diff.png", name))
}

/// Run a visual regression test against a stored reference
pub fn run_visual_test(config: &VisualTestConfig) -> Result<VisualTestResult> {
    let ref_path = reference_path(&config.name);
    if !ref_path.exists() {
        return Err(VisualTestError::ReferenceNotFound(ref_path));
    }

    let ren_path = rendered_path(&config.name);
    render_to_file(&config.render, &ren_path)?;

    let compare_result = compare_files(&ref_path, &ren_path)?;
    let passed = compare_result.similarity >= config.similarity_threshold;

    let diff = if !passed {
        let diff_file = diff_path(&config.name);
        generate_diff_image(&ref_path, &ren_path, &diff_file)?;
        Some(diff_file)
    } else {
        None
    };

    Ok(VisualTestResult {
        passed,
        similarity: compare_result.similarity,
        rendered_path: ren_path,
        reference_path: ref_path,
        diff_path: diff,
    })
}

/// Re-render the reference image for a test
pub fn update_reference(config: &VisualTestConfig) -> Result<PathBuf> {
    let ref_path = reference_path(&config.name);
    render_to_file(&config.render, &ref_path)?;
    println!("Updated reference: {}", ref_path.display());
    Ok(ref_path)
}

/// Check if we're in update references mode
pub fn should_update_references() -> bool {
    std::env::var("UPDATE_REFERENCES").is_ok()
}
