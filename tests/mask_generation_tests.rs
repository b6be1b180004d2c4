// Tests for the placeholder quadrant mask generator

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use fresco_engine::{MaskGenerator, QuadrantMaskGenerator};
use image::RgbImage;

fn generate(width: u32, height: u32) -> Vec<fresco_core::MaskDescriptor> {
    QuadrantMaskGenerator::new()
        .generate(&RgbImage::new(width, height))
        .unwrap()
}

#[test]
fn test_exactly_four_masks_in_fixed_order() {
    let masks = generate(100, 60);
    assert_eq!(masks.len(), 4);

    // Top-left, top-right, bottom-left, bottom-right.
    assert_eq!(masks[0].bbox, [0, 0, 50, 30]);
    assert_eq!(masks[1].bbox, [50, 0, 50, 30]);
    assert_eq!(masks[2].bbox, [0, 30, 50, 30]);
    assert_eq!(masks[3].bbox, [50, 30, 50, 30]);
    for (i, mask) in masks.iter().enumerate() {
        assert_eq!(mask.id, i as u32);
    }
}

#[test]
fn test_masks_tile_image_with_no_gap_or_overlap() {
    for (width, height) in [(100u32, 60u32), (7, 5), (1, 1), (2, 9), (640, 480)] {
        let masks = generate(width, height);
        let mut coverage = vec![0u8; (width * height) as usize];
        for mask in &masks {
            let [x, y, w, h] = mask.bbox;
            for py in y..y + h {
                for px in x..x + w {
                    coverage[(py * width + px) as usize] += 1;
                }
            }
        }
        assert!(
            coverage.iter().all(|&count| count == 1),
            "masks must tile a {}x{} image exactly once per pixel",
            width,
            height
        );
    }
}

#[test]
fn test_odd_dimensions_shrink_left_and_top_halves() {
    // Boundaries at w/2 and h/2: the left/top halves lose the odd pixel.
    let masks = generate(7, 5);
    assert_eq!(masks[0].bbox, [0, 0, 3, 2]);
    assert_eq!(masks[1].bbox, [3, 0, 4, 2]);
    assert_eq!(masks[2].bbox, [0, 2, 3, 3]);
    assert_eq!(masks[3].bbox, [3, 2, 4, 3]);
}

#[test]
fn test_predicted_iou_formula() {
    let masks = generate(64, 64);
    let expected = [0.80, 0.85, 0.90, 0.95];
    for (mask, expected) in masks.iter().zip(expected) {
        assert!((mask.predicted_iou - expected).abs() < 1e-9);
        assert_eq!(mask.stability_score, 0.9);
    }
}

#[test]
fn test_area_matches_bbox() {
    for mask in generate(11, 9) {
        let [_, _, w, h] = mask.bbox;
        assert_eq!(mask.area, u64::from(w) * u64::from(h));
    }
}

#[test]
fn test_point_coords_is_bbox_center() {
    for mask in generate(100, 60) {
        let [x, y, w, h] = mask.bbox;
        assert_eq!(mask.point_coords, vec![[x + w / 2, y + h / 2]]);
        assert_eq!(mask.point_coords[0], mask.representative_point());
    }
}

#[test]
fn test_generation_ignores_pixel_content() {
    let black = QuadrantMaskGenerator::new()
        .generate(&RgbImage::new(32, 32))
        .unwrap();
    let noisy = QuadrantMaskGenerator::new()
        .generate(&RgbImage::from_fn(32, 32, |x, y| {
            image::Rgb([(x * 7) as u8, (y * 13) as u8, ((x + y) * 3) as u8])
        }))
        .unwrap();

    for (a, b) in black.iter().zip(&noisy) {
        assert_eq!(a.bbox, b.bbox);
        assert_eq!(a.segmentation, b.segmentation);
    }
}

#[test]
fn test_segmentation_bitmap_is_binary_at_source_dimensions() {
    let masks = generate(10, 6);
    for mask in &masks {
        let png = BASE64.decode(&mask.segmentation).unwrap();
        let bitmap = image::load_from_memory(&png).unwrap().to_luma8();
        assert_eq!(bitmap.dimensions(), (10, 6));

        let [x, y, w, h] = mask.bbox;
        for py in 0..6 {
            for px in 0..10 {
                let inside = px >= x && px < x + w && py >= y && py < y + h;
                let expected = if inside { 255 } else { 0 };
                assert_eq!(bitmap.get_pixel(px, py).0, [expected]);
            }
        }
    }
}

#[test]
fn test_mask_at_point_is_a_fixed_stub() {
    let generator = QuadrantMaskGenerator::new();
    let mask = generator.mask_at_point(33, 44);
    assert_eq!(mask.id, -1);
    assert_eq!(mask.center, [33, 44]);
    assert_eq!(mask.radius, 50);
}
