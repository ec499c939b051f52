use std::path::Path;

use image::RgbaImage;

/// Errors from texture file loading.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Decode a PNG into RGBA8 pixels.
pub fn load_texture(path: impl AsRef<Path>) -> Result<RgbaImage, TextureError> {
    let path = path.as_ref();
    let img = image::open(path)
        .map_err(|source| TextureError::Decode {
            path: path.display().to_string(),
            source,
        })?
        .to_rgba8();
    Ok(img)
}

/// Load a texture, substituting a generated checkerboard on failure.
///
/// A missing or corrupt texture file is tolerated, not fatal: the scene
/// renders with the placeholder pattern instead.
pub fn load_texture_or_fallback(path: impl AsRef<Path>) -> RgbaImage {
    let path = path.as_ref();
    match load_texture(path) {
        Ok(img) => {
            tracing::debug!(path = %path.display(), w = img.width(), h = img.height(), "texture loaded");
            img
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "texture load failed, using checkerboard");
            checkerboard(64, 8)
        }
    }
}

/// Generate a light/dark checkerboard, `cells` squares per edge.
pub fn checkerboard(size: u32, cells: u32) -> RgbaImage {
    let cell = (size / cells).max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            image::Rgba([220, 220, 220, 255])
        } else {
            image::Rgba([90, 90, 90, 255])
        }
    })
}

/// Upload RGBA8 pixels as a sampled 2D texture.
pub(crate) fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    img: &RgbaImage,
    label: &str,
) -> wgpu::TextureView {
    let (width, height) = img.dimensions();
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        img,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    texture.create_view(&Default::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates() {
        let img = checkerboard(64, 8);
        assert_eq!(img.dimensions(), (64, 64));
        assert_ne!(img.get_pixel(0, 0), img.get_pixel(8, 0));
        assert_eq!(img.get_pixel(0, 0), img.get_pixel(16, 0));
    }

    #[test]
    fn missing_file_falls_back() {
        let img = load_texture_or_fallback("/nonexistent/grid.png");
        assert_eq!(img.dimensions(), (64, 64));
    }

    #[test]
    fn load_texture_reports_path() {
        let err = load_texture("/nonexistent/grid.png").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/grid.png"));
    }
}
