//! Writing finished backdrops to disk.
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::errors::ComposeResult;

pub const DEFAULT_QUALITY: u8 = 95;

/// Saves `image` to `path`. JPEG output honours `quality` (clamped to
/// 1..=100); every other extension goes through `image`'s own format
/// detection.
pub fn save(image: &RgbImage, path: &Path, quality: u8) -> ComposeResult<()> {
    let is_jpeg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false);
    if is_jpeg {
        let writer = BufWriter::new(File::create(path)?);
        let mut encoder = JpegEncoder::new_with_quality(writer, quality.clamp(1, 100));
        encoder.encode_image(image)?;
    } else {
        image.save(path)?;
    }
    info!(path = %path.display(), width = image.width(), height = image.height(), "saved backdrop");
    Ok(())
}

/// `{prefix}_{unix seconds}.{ext}`.
pub fn timestamped_name(prefix: &str, ext: &str) -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{prefix}_{secs}.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::palette::Rgb;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("backdrop-sink-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn jpeg_and_png_are_written() {
        let dir = scratch_dir("formats");
        let image = Canvas::new(64, 48, Rgb::new(120, 180, 200)).unwrap().flatten();

        let jpg = dir.join("out.jpg");
        save(&image, &jpg, DEFAULT_QUALITY).unwrap();
        let back = image::open(&jpg).unwrap().to_rgb8();
        assert_eq!(back.dimensions(), (64, 48));
        let p = back.get_pixel(32, 24);
        assert!((i16::from(p[0]) - 120).abs() <= 3);

        let png = dir.join("out.png");
        save(&image, &png, DEFAULT_QUALITY).unwrap();
        assert_eq!(image::open(&png).unwrap().to_rgb8(), image);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let image = RgbImage::new(2, 2);
        let path = Path::new("/definitely/not/here/out.jpg");
        assert!(matches!(
            save(&image, path, 90),
            Err(crate::errors::ComposeError::Io(_))
        ));
    }

    #[test]
    fn names_carry_prefix_and_extension() {
        let name = timestamped_name("wavy_art", "jpg");
        assert!(name.starts_with("wavy_art_"));
        assert!(name.ends_with(".jpg"));
        let stamp = &name["wavy_art_".len()..name.len() - ".jpg".len()];
        assert!(stamp.parse::<u64>().unwrap() > 0);
    }
}
