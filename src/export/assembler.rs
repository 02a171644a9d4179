use crate::error::{ExportError, Result};
use crate::export::capture::CapturedSlide;
use printpdf::image_crate::codecs::jpeg::JpegDecoder;
use printpdf::{Image, ImageTransform, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex, PdfPageIndex, Pt};
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

/// Screen pixels are converted to PDF points at 72 pt per 96 px
const PT_PER_PX: f32 = 72.0 / 96.0;

/// Screenshot pixel density matching the point conversion above
const CAPTURE_DPI: f32 = 96.0;

pub(crate) fn px_to_pt(px: u32) -> f32 {
    px as f32 * PT_PER_PX
}

/// Page orientation, keyed off the first captured image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrientation {
    Landscape,
    Portrait,
}

impl PageOrientation {
    pub fn of(slide: &CapturedSlide) -> Self {
        if slide.width >= slide.height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

/// Lays captured images out as document pages sized to each image
pub trait DocumentAssembler {
    /// Write `slides` as a paginated document at `output`, one page per
    /// image, in the order given
    fn assemble(&self, slides: &[CapturedSlide], output: &Path) -> Result<()>;
}

/// PDF assembler: each page takes its image's pixel dimensions converted to
/// points, with the page format order keyed by the first image's orientation.
#[derive(Debug, Default)]
pub struct PdfAssembler;

impl PdfAssembler {
    pub fn new() -> Self {
        Self
    }

    fn place(
        doc: &PdfDocumentReference,
        page: PdfPageIndex,
        layer: PdfLayerIndex,
        slide: &CapturedSlide,
    ) -> Result<()> {
        let decoder = JpegDecoder::new(Cursor::new(slide.data.as_slice()))
            .map_err(|e| ExportError::AssemblyFailed(format!("Undecodable slide image: {}", e)))?;
        let image = Image::try_from(decoder)
            .map_err(|e| ExportError::AssemblyFailed(format!("Unusable slide image: {}", e)))?;

        image.add_to_layer(
            doc.get_page(page).get_layer(layer),
            ImageTransform { dpi: Some(CAPTURE_DPI), ..Default::default() },
        );
        Ok(())
    }
}

impl DocumentAssembler for PdfAssembler {
    fn assemble(&self, slides: &[CapturedSlide], output: &Path) -> Result<()> {
        let first = slides
            .first()
            .ok_or_else(|| ExportError::AssemblyFailed("No slides to assemble".to_string()))?;

        let orientation = PageOrientation::of(first);
        let title = output
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "presentation".to_string());

        let (width, height) = page_size(first, orientation);
        let (doc, page, layer) = PdfDocument::new(title, width, height, "Slide 1");
        Self::place(&doc, page, layer, first)?;

        for (index, slide) in slides.iter().enumerate().skip(1) {
            let (width, height) = page_size(slide, orientation);
            let (page, layer) = doc.add_page(width, height, format!("Slide {}", index + 1));
            Self::place(&doc, page, layer, slide)?;
        }

        let file = File::create(output)?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| ExportError::AssemblyFailed(e.to_string()))?;

        log::info!("Wrote {} pages to {}", slides.len(), output.display());
        Ok(())
    }
}

/// Page dimensions for one image, normalized to the document orientation
fn page_size(slide: &CapturedSlide, orientation: PageOrientation) -> (Mm, Mm) {
    let w = px_to_pt(slide.width);
    let h = px_to_pt(slide.height);

    let (w, h) = match orientation {
        PageOrientation::Landscape if h > w => (h, w),
        PageOrientation::Portrait if w > h => (h, w),
        _ => (w, h),
    };

    (Mm::from(Pt(w)), Mm::from(Pt(h)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(width: u32, height: u32) -> CapturedSlide {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 80, 40]));
        let mut data = Vec::new();
        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut data, 90);
        encoder.encode_image(&img).expect("encode test jpeg");
        CapturedSlide { data, width, height }
    }

    #[test]
    fn test_px_to_pt() {
        assert_eq!(px_to_pt(96), 72.0);
        assert_eq!(px_to_pt(192), 144.0);
        assert_eq!(px_to_pt(0), 0.0);
    }

    #[test]
    fn test_orientation() {
        assert_eq!(PageOrientation::of(&slide(96, 54)), PageOrientation::Landscape);
        assert_eq!(PageOrientation::of(&slide(54, 96)), PageOrientation::Portrait);
        // Square counts as landscape, matching the width >= height rule
        assert_eq!(PageOrientation::of(&slide(64, 64)), PageOrientation::Landscape);
    }

    #[test]
    fn test_assemble_empty_fails() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("empty.pdf");

        let err = PdfAssembler::new().assemble(&[], &out).unwrap_err();
        assert!(matches!(err, ExportError::AssemblyFailed(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_assemble_one_page_per_slide() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("deck.pdf");

        let slides = vec![slide(96, 54), slide(96, 54), slide(96, 54)];
        PdfAssembler::new().assemble(&slides, &out).unwrap();

        let doc = lopdf::Document::load(&out).expect("reparse output");
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_page_sized_from_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("sized.pdf");

        // 96x72 px must become a 72x54 pt page
        PdfAssembler::new().assemble(&[slide(96, 72)], &out).unwrap();

        let doc = lopdf::Document::load(&out).expect("reparse output");
        let (_, page_id) = doc.get_pages().into_iter().next().expect("one page");
        let media_box = media_box(&doc, page_id);

        assert!((media_box[2] - 72.0).abs() < 0.5, "width was {}", media_box[2]);
        assert!((media_box[3] - 54.0).abs() < 0.5, "height was {}", media_box[3]);
    }

    /// Resolve a page's MediaBox, walking up to the page tree root if the
    /// entry is inherited
    fn media_box(doc: &lopdf::Document, page_id: lopdf::ObjectId) -> [f32; 4] {
        let mut node = doc.get_object(page_id).and_then(|o| o.as_dict()).expect("page dict").clone();
        loop {
            if let Ok(raw) = node.get(b"MediaBox") {
                let values = raw.as_array().expect("media box array");
                let mut result = [0f32; 4];
                for (i, v) in values.iter().take(4).enumerate() {
                    result[i] = match v {
                        lopdf::Object::Integer(n) => *n as f32,
                        lopdf::Object::Real(n) => *n as f32,
                        other => panic!("unexpected media box entry: {:?}", other),
                    };
                }
                return result;
            }
            let parent = node.get(b"Parent").and_then(|p| p.as_reference()).expect("inherited media box");
            node = doc.get_object(parent).and_then(|o| o.as_dict()).expect("parent dict").clone();
        }
    }
}
