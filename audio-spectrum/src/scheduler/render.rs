//! Periodic render activity.

use embedded_hal::delay::DelayNs;

use crate::constants::RENDER_PERIOD_MS;
use crate::display::{Display, Renderer};
use crate::frame::SpectrumFrame;
use crate::io::FrameReader;

/// Snapshots the latest frame and draws it, every [`RENDER_PERIOD_MS`].
///
/// Render failures are logged at debug level and the loop carries on; a
/// flaky panel connection should not take the analyzer down.
pub struct RenderTask<'a, D, T> {
    renderer: Renderer,
    display: D,
    reader: FrameReader<'a>,
    delay: T,
    period_ms: u32,
}

impl<'a, D, T> RenderTask<'a, D, T>
where
    D: Display,
    T: DelayNs,
{
    pub fn new(renderer: Renderer, display: D, reader: FrameReader<'a>, delay: T) -> Self {
        RenderTask {
            renderer,
            display,
            reader,
            delay,
            period_ms: RENDER_PERIOD_MS,
        }
    }

    /// Draw the newest frame once. Returns the frame that was drawn.
    pub fn step(&mut self) -> SpectrumFrame {
        let frame = self.reader.snapshot();
        if let Err(e) = self.renderer.render(&mut self.display, &frame) {
            log::debug!("render failed: {:?}", e);
        }
        frame
    }

    /// Draw once, then wait out the render period.
    pub fn tick(&mut self) -> SpectrumFrame {
        let frame = self.step();
        self.delay.delay_ms(self.period_ms);
        frame
    }

    /// Render forever at the configured period.
    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn delay(&self) -> &T {
        &self.delay
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BAND_COUNT;
    use crate::display::{STATUS_NO_DATA, STATUS_OK};
    use crate::io::SpectrumStore;
    use crate::testing::{FrameBufferDisplay, NoDelay};

    #[test]
    fn step_draws_latest_frame() {
        let store = SpectrumStore::new();
        let (mut publisher, reader) = store.split().unwrap();
        let mut task = RenderTask::new(Renderer::new(), FrameBufferDisplay::new(), reader, NoDelay::default());
        assert_eq!(task.period_ms(), 50);

        let frame = task.step();
        assert_eq!(frame, SpectrumFrame::EMPTY);
        assert_eq!(task.display().texts()[0].text, STATUS_NO_DATA);

        publisher.publish(SpectrumFrame::new([12; BAND_COUNT], true));
        let frame = task.step();
        assert_eq!(frame.mean_level(), 12);
        let texts = task.display().texts();
        assert_eq!(texts[texts.len() - 2].text, STATUS_OK);
        assert_eq!(texts[texts.len() - 1].text, "L:12");
    }

    #[test]
    fn tick_waits_one_render_period() {
        let store = SpectrumStore::new();
        let (mut publisher, reader) = store.split().unwrap();
        let mut task = RenderTask::new(Renderer::new(), FrameBufferDisplay::new(), reader, NoDelay::default());

        publisher.publish(SpectrumFrame::new([4; BAND_COUNT], false));
        assert_eq!(task.tick().mean_level(), 4);
        assert_eq!(task.delay().total_ns, 50_000_000);
        task.tick();
        assert_eq!(task.delay().total_ns, 2 * 50_000_000);
        assert_eq!(task.display().texts().len(), 4);
    }

    #[test]
    fn render_failure_does_not_stop_the_task() {
        let store = SpectrumStore::new();
        let (mut publisher, reader) = store.split().unwrap();
        let mut display = FrameBufferDisplay::new();
        display.fail_ops(1_000);
        let mut task = RenderTask::new(Renderer::new(), display, reader, NoDelay::default());

        task.step();
        publisher.publish(SpectrumFrame::new([30; BAND_COUNT], true));
        assert_eq!(task.step().mean_level(), 30);
    }
}
