//! Raw image and label buffers
//!
//! Datasets are kept as the loader produced them: one byte per pixel and one
//! byte per label. Pixels are normalized into a reusable scalar buffer one
//! example at a time, so the full dataset is never converted up front.

use crate::error::{Error, Result};
use crate::network::Scalar;

/// A collection of equally sized greyscale images, pixels in [0, 255].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Images {
    count: usize,
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Images {
    /// Wrap a flat buffer of `count * width * height` pixels.
    pub fn new(count: usize, width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|image| image.checked_mul(count))
            .ok_or(Error::SizeOverflow("image buffer"))?;
        if pixels.len() != expected {
            return Err(Error::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            count,
            width,
            height,
            pixels,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixels per image.
    pub fn image_pixels(&self) -> usize {
        self.width * self.height
    }

    /// Raw pixels of image `index`.
    pub fn image(&self, index: usize) -> &[u8] {
        let size = self.image_pixels();
        &self.pixels[index * size..(index + 1) * size]
    }
}

/// Class labels, one byte per example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    labels: Vec<u8>,
}

impl Labels {
    pub fn new(labels: Vec<u8>) -> Self {
        Self { labels }
    }

    pub fn count(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, index: usize) -> u8 {
        self.labels[index]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.labels
    }
}

/// Check that `images` and `labels` describe the same examples and that
/// every image has `input_dim` pixels.
pub fn validate(images: &Images, labels: &Labels, input_dim: usize) -> Result<()> {
    if images.count() != labels.count() {
        return Err(Error::CountMismatch {
            images: images.count(),
            labels: labels.count(),
        });
    }
    if images.image_pixels() != input_dim {
        return Err(Error::InputDimMismatch {
            expected: input_dim,
            actual: images.image_pixels(),
        });
    }
    Ok(())
}

/// Check that every label has an output neuron among `classes`.
///
/// Training needs this to build its target vector. Evaluation does not: a
/// label no output can predict simply counts as a miss.
pub fn check_labels(labels: &Labels, classes: usize) -> Result<()> {
    if let Some(&label) = labels.as_slice().iter().find(|&&l| l as usize >= classes) {
        return Err(Error::LabelOutOfRange { label, classes });
    }
    Ok(())
}

/// Write `pixel / divisor` for every pixel into `out`.
///
/// # Panics
///
/// Panics if `out` and `pixels` differ in length.
pub fn normalize_into(pixels: &[u8], divisor: Scalar, out: &mut [Scalar]) {
    assert_eq!(pixels.len(), out.len(), "Pixel and input buffers differ in length");
    for (dst, &pixel) in out.iter_mut().zip(pixels.iter()) {
        *dst = pixel as Scalar / divisor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_images_indexing() {
        let images = Images::new(2, 2, 1, vec![1, 2, 3, 4]).unwrap();

        assert_eq!(images.image_pixels(), 2);
        assert_eq!(images.image(1), &[3, 4]);
    }

    #[test]
    fn test_images_rejects_wrong_buffer() {
        assert!(matches!(
            Images::new(2, 2, 2, vec![0; 7]),
            Err(Error::PixelCountMismatch { expected: 8, actual: 7 })
        ));
    }

    #[test]
    fn test_images_reports_size_overflow() {
        assert!(matches!(
            Images::new(1 << 40, 1 << 20, 1 << 20, vec![]),
            Err(Error::SizeOverflow("image buffer"))
        ));
        assert!(matches!(
            Images::new(0, usize::MAX, 2, vec![]),
            Err(Error::SizeOverflow("image buffer"))
        ));
    }

    #[test]
    fn test_validate_count_mismatch() {
        let images = Images::new(2, 1, 1, vec![0, 0]).unwrap();
        let labels = Labels::new(vec![0]);

        assert!(matches!(
            validate(&images, &labels, 1),
            Err(Error::CountMismatch { images: 2, labels: 1 })
        ));
    }

    #[test]
    fn test_validate_input_dim() {
        let images = Images::new(1, 2, 2, vec![0; 4]).unwrap();
        let labels = Labels::new(vec![0]);

        assert!(matches!(
            validate(&images, &labels, 784),
            Err(Error::InputDimMismatch { expected: 784, actual: 4 })
        ));
    }

    #[test]
    fn test_check_labels_range() {
        let images = Images::new(1, 1, 1, vec![0]).unwrap();
        let labels = Labels::new(vec![3]);

        assert!(matches!(
            check_labels(&labels, 3),
            Err(Error::LabelOutOfRange { label: 3, classes: 3 })
        ));
        assert!(validate(&images, &labels, 1).is_ok());
        assert!(check_labels(&Labels::new(vec![0, 2]), 3).is_ok());
    }

    #[test]
    fn test_normalize_divisors() {
        let mut out = [0.0; 2];

        normalize_into(&[255, 128], 255.0, &mut out);
        assert_eq!(out, [1.0, 128.0 / 255.0]);

        normalize_into(&[255, 128], 256.0, &mut out);
        assert_eq!(out, [255.0 / 256.0, 0.5]);
    }
}
