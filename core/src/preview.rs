// Rasterizes generated maps for display: one pixel per cell.
// Nothing here is read back; these are previews, not a storage format.

use image::{GrayImage, Luma, Rgb, RgbImage};
use palette::{Gradient, LinSrgb};

use crate::density::DensityMask;
use crate::grid::Grid;
use crate::heightmap::HeightField;
use crate::npc::{NpcType, TypeMap};

const VOID_COLOR: [u8; 3] = [0, 0, 128];

// Fixed category palette used by every type preview
pub fn type_color(t: NpcType) -> [u8; 3] {
    match t {
        NpcType::None => [0, 0, 0],
        NpcType::StorySlot => [255, 255, 0],           // yellow
        NpcType::MaliciousSingular => [255, 0, 0],     // red
        NpcType::MaliciousFaction => [255, 165, 0],    // orange
        NpcType::NeutralSingular => [128, 128, 128],   // gray
        NpcType::NeutralFaction => [255, 192, 203],    // pink
        NpcType::HeroicSingular => [0, 128, 0],        // green
        NpcType::HeroicFaction => [0, 0, 255],         // blue
        NpcType::PlayerSpawn => [255, 255, 255],       // white
    }
}

fn dims<T>(grid: &Grid<T>) -> (u32, u32) {
    (grid.width() as u32, grid.height() as u32)
}

// Grayscale, truncating v * 255
pub fn height_image(heights: &HeightField) -> GrayImage {
    let (w, h) = dims(heights);
    GrayImage::from_fn(w, h, |x, y| {
        let v = heights[heights.offset(x as usize, y as usize)];
        Luma([(v * 255.0) as u8])
    })
}

// White where occupied, black elsewhere
pub fn density_image(density: &DensityMask) -> GrayImage {
    let (w, h) = dims(density);
    GrayImage::from_fn(w, h, |x, y| {
        let occupied = density[density.offset(x as usize, y as usize)];
        Luma([if occupied { 255 } else { 0 }])
    })
}

pub fn type_image(types: &TypeMap) -> RgbImage {
    let (w, h) = dims(types);
    RgbImage::from_fn(w, h, |x, y| {
        Rgb(type_color(types[types.offset(x as usize, y as usize)]))
    })
}

// Colored relief: void cells are water, land runs sand → grass → rock → snow
pub fn relief_image(heights: &HeightField) -> RgbImage {
    let gradient = Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.8, 0.8, 0.5)), // sand
        (0.30, LinSrgb::new(0.1, 0.6, 0.2)), // green
        (0.65, LinSrgb::new(0.5, 0.4, 0.3)), // rock
        (1.00, LinSrgb::new(1.0, 1.0, 1.0)), // snow
    ]);

    let (w, h) = dims(heights);
    RgbImage::from_fn(w, h, |x, y| {
        let v = heights[heights.offset(x as usize, y as usize)];
        if v <= 0.0 {
            return Rgb(VOID_COLOR);
        }
        let col: LinSrgb = gradient.get(v as f32);
        let rgb = col.into_format::<u8>();
        Rgb([rgb.red, rgb.green, rgb.blue])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_preview_maps_to_gray() {
        let heights = Grid::from_vec(2, 1, vec![0.0, 1.0]).unwrap();
        let img = height_image(&heights);
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(0, 0), &Luma([0]));
        assert_eq!(img.get_pixel(1, 0), &Luma([255]));
    }

    #[test]
    fn density_preview_is_black_and_white() {
        let density = Grid::from_vec(2, 2, vec![true, false, false, true]).unwrap();
        let img = density_image(&density);
        assert_eq!(img.get_pixel(0, 0), &Luma([255]));
        assert_eq!(img.get_pixel(1, 0), &Luma([0]));
        assert_eq!(img.get_pixel(1, 1), &Luma([255]));
    }

    #[test]
    fn type_preview_uses_palette() {
        let types = Grid::from_vec(
            3,
            1,
            vec![NpcType::None, NpcType::StorySlot, NpcType::PlayerSpawn],
        )
        .unwrap();
        let img = type_image(&types);
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([255, 255, 0]));
        assert_eq!(img.get_pixel(2, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn palette_colors_are_distinct() {
        for (i, a) in NpcType::ALL.iter().enumerate() {
            for b in &NpcType::ALL[i + 1..] {
                assert_ne!(type_color(*a), type_color(*b));
            }
        }
    }

    #[test]
    fn relief_marks_void_as_water() {
        let heights = Grid::from_vec(2, 1, vec![0.0, 1.0]).unwrap();
        let img = relief_image(&heights);
        assert_eq!(img.get_pixel(0, 0), &Rgb(VOID_COLOR));
        assert_ne!(img.get_pixel(1, 0), &Rgb(VOID_COLOR));
    }
}
