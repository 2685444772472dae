use crate::units::Pt;

/// Size used for a signature whose intrinsic dimensions are unknown or degenerate
pub const DEFAULT_SIGNATURE_SIZE: (Pt, Pt) = (Pt(150.0), Pt(60.0));

/// Fit an image into a maximum width while keeping its aspect ratio. Pixels are treated
/// as points, so images narrower than `max_width` keep their natural size; images are
/// never scaled up.
pub fn scale_image(intrinsic: Option<(u32, u32)>, max_width: Pt) -> (Pt, Pt) {
    match intrinsic {
        Some((width, height)) if width > 0 && height > 0 => {
            let natural_width = Pt(width as f32);
            let scaled_width = natural_width.min(max_width);
            let scaled_height = scaled_width * (height as f32 / width as f32);
            (scaled_width, scaled_height)
        }
        _ => DEFAULT_SIGNATURE_SIZE,
    }
}
