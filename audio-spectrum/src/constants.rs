/// Number of 16-bit samples per audio block (must be a power of two).
pub const AUDIO_BLOCK_SAMPLES: usize = 128;

/// Microphone sample rate in Hz.
pub const SAMPLE_RATE_HZ: u32 = 44_100;

/// Number of bars drawn across the panel.
pub const BAND_COUNT: usize = 32;

/// Panel width in pixels (landscape).
pub const PANEL_WIDTH: u16 = 160;

/// Panel height in pixels (landscape).
pub const PANEL_HEIGHT: u16 = 80;

/// Pixels kept free above the tallest possible bar.
pub const BAR_MARGIN: u16 = 4;

/// Exclusive upper bound of a band magnitude, in pixels.
pub const H_MAX: u16 = PANEL_HEIGHT - BAR_MARGIN;

/// Height of the status strip at the top of the panel.
pub const STATUS_STRIP_HEIGHT: u16 = 10;

/// Time without a successful read after which the microphone is reported silent.
pub const LIVENESS_GRACE_MS: u32 = 1000;

/// Render loop period (~20 Hz).
pub const RENDER_PERIOD_MS: u32 = 50;

/// Frequency of the tone shown until the first real block arrives.
pub const TEST_TONE_HZ: f64 = 440.0;

/// Peak amplitude of the fallback tone, in raw sample units.
pub const TEST_TONE_AMPLITUDE: f64 = 1000.0;

/// Samples read by the startup microphone probe.
pub const PROBE_SAMPLES: usize = 10;

/// Timeout of the startup microphone probe.
pub const PROBE_TIMEOUT_MS: u32 = 1000;

const _: () = assert!(AUDIO_BLOCK_SAMPLES.is_power_of_two(), "block size must be a power of two");
const _: () = assert!(BAND_COUNT > 0 && BAND_COUNT <= AUDIO_BLOCK_SAMPLES / 2);
const _: () = assert!(H_MAX <= u8::MAX as u16 + 1, "band magnitudes are stored as u8");
