use winit::dpi::PhysicalSize;

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if formats.is_empty() {
        return None;
    }

    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        for f in preferred {
            if formats.contains(&f) {
                return Some(f);
            }
        }
    }

    Some(formats[0])
}

pub(crate) fn choose_alpha_mode(
    alpha_modes: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| alpha_modes.contains(m))
        .or_else(|| alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Maps a resize request to the extent the surface should be configured with.
///
/// wgpu does not support configuring a surface with a 0x0 size; `None` means
/// "record the size but defer configuration until a non-zero resize arrives".
pub(crate) fn resized_extent(new_size: PhysicalSize<u32>) -> Option<(u32, u32)> {
    if new_size.width == 0 || new_size.height == 0 {
        None
    } else {
        Some((new_size.width, new_size.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── format selection ──────────────────────────────────────────────────

    #[test]
    fn srgb_preferred_when_available() {
        let formats = [
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(wgpu::TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn first_format_when_srgb_not_preferred() {
        let formats = [
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ];
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(wgpu::TextureFormat::Rgba8Unorm)
        );
    }

    #[test]
    fn no_formats_is_none() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    // ── alpha mode ────────────────────────────────────────────────────────

    #[test]
    fn requested_alpha_mode_wins_when_supported() {
        let modes = [
            wgpu::CompositeAlphaMode::Opaque,
            wgpu::CompositeAlphaMode::PreMultiplied,
        ];
        assert_eq!(
            choose_alpha_mode(&modes, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::PreMultiplied
        );
    }

    #[test]
    fn unsupported_request_falls_back_to_first() {
        let modes = [wgpu::CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&modes, Some(wgpu::CompositeAlphaMode::PostMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
    }

    // ── resize extent ─────────────────────────────────────────────────────

    #[test]
    fn resize_to_400_square_yields_full_extent() {
        let ext = resized_extent(PhysicalSize::new(400, 400));
        assert_eq!(ext, Some((400, 400)));
    }

    #[test]
    fn zero_sized_resize_defers_configuration() {
        assert_eq!(resized_extent(PhysicalSize::new(0, 400)), None);
        assert_eq!(resized_extent(PhysicalSize::new(400, 0)), None);
    }
}
