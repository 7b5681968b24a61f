/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Background behind the game image, distinct from black game content
    pub const VOID: Color = Color::rgb(64, 64, 64);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Normalized [r, g, b, a] in 0..=1
    pub fn to_f32_array(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Clear/blend color for a render target
    ///
    /// Bytes are sRGB-encoded; an sRGB target encodes on write, so it must
    /// be given linear values.
    pub fn to_wgpu(&self, srgb_target: bool) -> wgpu::Color {
        let [r, g, b, a] = self.to_f32_array();
        let channel = |c: f32| {
            if srgb_target {
                srgb_to_linear(c) as f64
            } else {
                c as f64
            }
        };
        wgpu::Color {
            r: channel(r),
            g: channel(g),
            b: channel(b),
            a: a as f64,
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// HSV (all components 0..=1) to linear RGB
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let c = v * s;
    let h_prime = (h.rem_euclid(1.0) * 6.0) % 6.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h_prime as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m]
}
