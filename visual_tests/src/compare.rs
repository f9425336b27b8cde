use crate::{Result, VisualTestError};
use image::{Rgba, RgbaImage};
use image_compare::Algorithm;
use std::path::Path;

/// Channel difference above which a pixel counts as changed
const DIFF_THRESHOLD: u8 = 10;

/// Result of comparing two images
pub struct CompareResult {
    /// Similarity score from 0.0 to 1.0
    pub similarity: f64,
    /// Pixels whose largest channel difference exceeds the diff threshold
    pub changed_pixels: usize,
}

/// Compare two PNG files
pub fn compare_files(reference: &Path, rendered: &Path) -> Result<CompareResult> {
    let reference = image::open(reference)?.to_rgba8();
    let rendered = image::open(rendered)?.to_rgba8();
    compare_images(&reference, &rendered)
}

/// Compare two images using SSIM over their RGB channels
pub fn compare_images(reference: &RgbaImage, rendered: &RgbaImage) -> Result<CompareResult> {
    if reference.dimensions() != rendered.dimensions() {
        return Err(VisualTestError::Compare(format!(
            "Image dimensions don't match: reference {:?} vs rendered {:?}",
            reference.dimensions(),
            rendered.dimensions()
        )));
    }

    let ref_rgb = image::DynamicImage::ImageRgba8(reference.clone()).to_rgb8();
    let ren_rgb = image::DynamicImage::ImageRgba8(rendered.clone()).to_rgb8();
    let result =
        image_compare::rgb_similarity_structure(&Algorithm::MSSIMSimple, &ref_rgb, &ren_rgb)
            .map_err(|e| VisualTestError::Compare(format!("SSIM comparison failed: {}", e)))?;

    let changed_pixels = reference
        .pixels()
        .zip(rendered.pixels())
        .filter(|(a, b)| pixel_difference(a, b) > DIFF_THRESHOLD)
        .count();

    Ok(CompareResult {
        similarity: result.score,
        changed_pixels,
    })
}

/// Build an image that marks changed pixels in red over a dimmed copy of
/// `rendered`
pub fn diff_image(reference: &RgbaImage, rendered: &RgbaImage) -> RgbaImage {
    let (width, height) = reference.dimensions();
    RgbaImage::from_fn(width, height, |x, y| {
        let ref_pixel = reference.get_pixel(x, y);
        let Some(ren_pixel) = rendered.get_pixel_checked(x, y) else {
            return Rgba([255, 0, 255, 255]);
        };
        let diff = pixel_difference(ref_pixel, ren_pixel);
        if diff > DIFF_THRESHOLD {
            let intensity = (diff as f32 / 255.0 * 200.0 + 55.0) as u8;
            Rgba([intensity, 0, 0, 255])
        } else {
            Rgba([ren_pixel[0] / 3, ren_pixel[1] / 3, ren_pixel[2] / 3, 255])
        }
    })
}

/// Write the diff of two PNG files to `output`
pub fn generate_diff_image(reference: &Path, rendered: &Path, output: &Path) -> Result<()> {
    let reference = image::open(reference)?.to_rgba8();
    let rendered = image::open(rendered)?.to_rgba8();
    diff_image(&reference, &rendered).save(output)?;
    Ok(())
}

/// Largest channel difference between two pixels, alpha included
fn pixel_difference(a: &Rgba<u8>, b: &Rgba<u8>) -> u8 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(x, y)| x.abs_diff(*y))
        .max()
        .unwrap_or(0)
}
