/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of interleaved samples per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Sepia tone matrix, one row per output channel (R, G, B).
pub const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Sepia warmth used by the vintage filter, independent of any override.
pub const VINTAGE_SEPIA_WARMTH: f32 = 0.7;

/// Mean RGB level a pixel must exceed before neon glow boosts it.
pub const NEON_GLOW_THRESHOLD: f32 = 128.0;

/// Mid-grey pivot used by contrast and the emboss bias.
pub const MID_GREY: f32 = 128.0;

/// Emboss kernel, indexed `[dy + 1][dx + 1]`.
pub const EMBOSS_KERNEL: [[f32; 3]; 3] = [[-2.0, -1.0, 0.0], [-1.0, 1.0, 1.0], [0.0, 1.0, 2.0]];

/// Sobel horizontal gradient kernel, indexed `[dy + 1][dx + 1]`.
pub const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

/// Sobel vertical gradient kernel, indexed `[dy + 1][dx + 1]`.
pub const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Default chain capacity when no configuration overrides it.
pub const DEFAULT_MAX_FILTERS: usize = 8;

/// Default scheduler tick interval (~60 Hz display refresh).
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Default JPEG snapshot quality (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;
