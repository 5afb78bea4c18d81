//! Host scope: the analyzer running on a desktop terminal.
//!
//! A simulated microphone produces a sine tone in real time on one thread;
//! the panel is drawn into the terminal on the main thread, two pixel rows
//! per character cell using half-block glyphs.
//!
//! ```text
//!   SimulatedMic ──► AcquisitionTask ──► SpectrumStore ──► RenderTask ──► TerminalPanel
//!   (paced at 44.1 kHz)   (thread)                          (main thread, 50 ms)
//! ```
//!
//! Press `q` or `Esc` to quit. Logs go to stderr; redirect them
//! (`RUST_LOG=info host_scope 2>scope.log`) to keep the panel clean.

use std::io::{self, stdout, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use audio_spectrum::constants::{AUDIO_BLOCK_SAMPLES, SAMPLE_RATE_HZ};
use audio_spectrum::display::{Display, Renderer, Rgb565};
use audio_spectrum::dsp::{SineOscillator, SpectrumAnalyzer};
use audio_spectrum::io::{SampleSource, SpectrumStore};
use audio_spectrum::scheduler::{start_up, AcquisitionTask, RenderTask};
use audio_spectrum::{AudioSource, Clock, DisplayGeometry as G, GainConfig, ReadError, Timeout};
use clap::Parser;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use embedded_hal::delay::DelayNs;

#[derive(Parser)]
#[command(name = "host_scope")]
#[command(about = "Spectrum analyzer on a simulated microphone, drawn in the terminal", long_about = None)]
struct Args {
    /// Frequency of the simulated tone
    #[arg(short = 'f', long, default_value = "440.0")]
    tone_hz: f64,

    /// Peak amplitude of the simulated tone, in sample units
    #[arg(short, long, default_value = "1000.0")]
    amplitude: f64,

    /// Tone sweep rate in Hz per second (0 holds the tone steady)
    #[arg(short, long, default_value = "0.0")]
    sweep: f64,

    /// Stop delivering audio after this many milliseconds
    #[arg(short, long)]
    dropout_after_ms: Option<u64>,

    /// Start with no microphone at all (shows the fallback tone)
    #[arg(long)]
    no_mic: bool,

    /// Multiplier applied to samples before the transform
    #[arg(short, long, default_value = "2.0")]
    gain: f64,

    /// Render this many frames and exit (default: run until `q`)
    #[arg(short = 'n', long)]
    frames: Option<u64>,
}

/// Milliseconds since the process started.
struct StdClock(Instant);

impl Clock for StdClock {
    fn now_ms(&self) -> u32 {
        self.0.elapsed().as_millis() as u32
    }
}

struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns as u64));
    }
}

/// Sine source that delivers blocks no faster than a real I2S microphone.
struct SimulatedMic {
    osc: SineOscillator,
    hz: f64,
    sweep: f64,
    started: Instant,
    next_block: Instant,
    dropout_after: Option<Duration>,
    present: bool,
}

impl SimulatedMic {
    const BLOCK_PERIOD: Duration =
        Duration::from_nanos(AUDIO_BLOCK_SAMPLES as u64 * 1_000_000_000 / SAMPLE_RATE_HZ as u64);

    fn new(args: &Args) -> Self {
        let now = Instant::now();
        SimulatedMic {
            osc: SineOscillator::new(args.tone_hz, args.amplitude),
            hz: args.tone_hz,
            sweep: args.sweep,
            started: now,
            next_block: now,
            dropout_after: args.dropout_after_ms.map(Duration::from_millis),
            present: !args.no_mic,
        }
    }

    fn silent(&self) -> bool {
        !self.present || self.dropout_after.is_some_and(|d| self.started.elapsed() >= d)
    }
}

impl AudioSource for SimulatedMic {
    type Error = io::Error;

    fn read_block(&mut self, buf: &mut [i16], timeout: Timeout) -> Result<usize, ReadError<io::Error>> {
        if self.silent() {
            let wait = match timeout {
                Timeout::Millis(ms) => Duration::from_millis(ms as u64),
                // Nothing will ever arrive; wake up now and then anyway.
                Timeout::Forever => Duration::from_millis(250),
            };
            thread::sleep(wait);
            return Err(ReadError::Timeout);
        }

        let now = Instant::now();
        if self.next_block > now {
            thread::sleep(self.next_block - now);
        }
        self.next_block += Self::BLOCK_PERIOD;

        if self.sweep != 0.0 {
            let hz = self.hz + self.sweep * self.started.elapsed().as_secs_f64();
            self.osc.frequency(hz.clamp(20.0, SAMPLE_RATE_HZ as f64 / 2.0));
        }
        let n = buf.len().min(AUDIO_BLOCK_SAMPLES);
        self.osc.fill(&mut buf[..n]);
        Ok(n * std::mem::size_of::<i16>())
    }
}

struct TextSpan {
    x: u16,
    y: u16,
    text: String,
    color: Rgb565,
}

/// The 160×80 panel, drawn as 160×40 terminal cells of `▀`.
///
/// Pixels are buffered and written out on [`flush`](Display::flush). Text
/// is kept as character spans anchored at a pixel position and dropped
/// when a fill covers its anchor.
struct TerminalPanel {
    out: Stdout,
    pixels: Vec<Rgb565>,
    texts: Vec<TextSpan>,
    cursor: (u16, u16),
    text_color: Rgb565,
}

impl TerminalPanel {
    fn new() -> Self {
        TerminalPanel {
            out: stdout(),
            pixels: vec![Rgb565::BLACK; G::WIDTH as usize * G::HEIGHT as usize],
            texts: Vec::new(),
            cursor: (0, 0),
            text_color: Rgb565::WHITE,
        }
    }

    fn set(&mut self, x: u16, y: u16, color: Rgb565) {
        if x < G::WIDTH && y < G::HEIGHT {
            self.pixels[y as usize * G::WIDTH as usize + x as usize] = color;
        }
    }

    fn get(&self, x: u16, y: u16) -> Rgb565 {
        self.pixels[y as usize * G::WIDTH as usize + x as usize]
    }
}

fn term_color(color: Rgb565) -> Color {
    let (r, g, b) = color.to_rgb888();
    Color::Rgb { r, g, b }
}

impl Display for TerminalPanel {
    type Error = io::Error;

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> io::Result<()> {
        for py in y..y.saturating_add(h) {
            for px in x..x.saturating_add(w) {
                self.set(px, py, color);
            }
        }
        let (x1, y1) = (x.saturating_add(w), y.saturating_add(h));
        self.texts.retain(|t| !(t.x >= x && t.x < x1 && t.y >= y && t.y < y1));
        Ok(())
    }

    fn draw_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb565) -> io::Result<()> {
        if w == 0 || h == 0 {
            return Ok(());
        }
        let (right, bottom) = (x + w - 1, y + h - 1);
        for px in x..=right {
            self.set(px, y, color);
            self.set(px, bottom, color);
        }
        for py in y..=bottom {
            self.set(x, py, color);
            self.set(right, py, color);
        }
        Ok(())
    }

    fn draw_fast_hline(&mut self, x: u16, y: u16, w: u16, color: Rgb565) -> io::Result<()> {
        for px in x..x.saturating_add(w) {
            self.set(px, y, color);
        }
        Ok(())
    }

    fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = (x, y);
    }

    fn set_text_color(&mut self, color: Rgb565) {
        self.text_color = color;
    }

    fn set_text_size(&mut self, _size: u8) {}

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.texts.push(TextSpan {
            x: self.cursor.0,
            y: self.cursor.1,
            text: text.to_owned(),
            color: self.text_color,
        });
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        for row in 0..G::HEIGHT / 2 {
            queue!(self.out, MoveTo(0, row))?;
            for x in 0..G::WIDTH {
                let top = self.get(x, row * 2);
                let bottom = self.get(x, row * 2 + 1);
                queue!(
                    self.out,
                    SetForegroundColor(term_color(top)),
                    SetBackgroundColor(term_color(bottom)),
                    Print('▀')
                )?;
            }
        }
        queue!(self.out, SetBackgroundColor(Color::Black))?;
        // Glyphs are 6 px wide but one cell is 1 px; pack text at one cell per char.
        for span in &self.texts {
            queue!(
                self.out,
                MoveTo(span.x, span.y / 2),
                SetForegroundColor(term_color(span.color)),
                Print(&span.text)
            )?;
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

/// `true` if the user asked to quit, waiting at most `timeout` for input.
fn quit_requested(timeout: Duration) -> io::Result<bool> {
    if poll(timeout)? {
        if let Event::Key(key) = read()? {
            return Ok(matches!(key.code, KeyCode::Char('q') | KeyCode::Esc));
        }
    }
    Ok(false)
}

fn run(args: &Args) -> io::Result<()> {
    static STORE: SpectrumStore = SpectrumStore::new();
    let Some((publisher, reader)) = STORE.split() else {
        return Err(io::Error::other("spectrum store already split"));
    };

    let clock = StdClock(Instant::now());
    let mut source = SampleSource::new(SimulatedMic::new(args));
    let mut panel = TerminalPanel::new();
    let renderer = Renderer::new();

    if !start_up(&renderer, &mut source, &clock, &mut panel) {
        log::warn!("simulated microphone did not answer the probe");
    }

    let analyzer = SpectrumAnalyzer::new(GainConfig {
        input_gain: args.gain,
        ..GainConfig::default()
    });
    let stop = AtomicBool::new(false);

    thread::scope(|s| {
        s.spawn(|| {
            let mut task = AcquisitionTask::new(source, analyzer, publisher, &clock);
            while !stop.load(Ordering::Relaxed) {
                // Faults are logged by the task; keep reading.
                let _ = task.step();
            }
        });

        let mut render = RenderTask::new(renderer, panel, reader, StdDelay);
        let mut drawn = 0u64;
        let result = loop {
            // Draws, then sleeps out the render period.
            render.tick();
            drawn += 1;
            if args.frames.is_some_and(|n| drawn >= n) {
                break Ok(());
            }
            match quit_requested(Duration::ZERO) {
                Ok(true) => break Ok(()),
                Ok(false) => {}
                Err(e) => break Err(e),
            }
        };
        stop.store(true, Ordering::Relaxed);
        log::info!("rendered {} frames", drawn);
        result
    })
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, Hide)?;
    let result = run(&args);
    execute!(stdout(), Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}
