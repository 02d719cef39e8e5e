use crate::config::DisplayConfig;
use crate::error::Result;
use image::RgbImage;
use tracing::info;

/// Shows composed frames to the user
pub trait Presenter {
    fn present(&mut self, frame: &RgbImage) -> Result<()>;
}

/// Discards frames; keeps counters for tests and diagnostics
#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    frames_presented: u64,
    last_size: Option<(u32, u32)>,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn last_size(&self) -> Option<(u32, u32)> {
        self.last_size
    }
}

impl Presenter for HeadlessPresenter {
    fn present(&mut self, frame: &RgbImage) -> Result<()> {
        self.frames_presented += 1;
        self.last_size = Some(frame.dimensions());
        Ok(())
    }
}

/// Pick a presenter for the display configuration
pub fn open_presenter(config: &DisplayConfig) -> Result<Box<dyn Presenter>> {
    if config.headless {
        info!("Display disabled (headless)");
        return Ok(Box::new(HeadlessPresenter::new()));
    }
    open_window(config)
}

#[cfg(all(feature = "gstreamer", target_os = "linux"))]
fn open_window(config: &DisplayConfig) -> Result<Box<dyn Presenter>> {
    Ok(Box::new(window::WindowPresenter::new(&config.window_title)?))
}

#[cfg(not(all(feature = "gstreamer", target_os = "linux")))]
fn open_window(_config: &DisplayConfig) -> Result<Box<dyn Presenter>> {
    tracing::warn!("Window output requires the gstreamer feature; running headless");
    Ok(Box::new(HeadlessPresenter::new()))
}

#[cfg(all(feature = "gstreamer", target_os = "linux"))]
mod window {
    use super::Presenter;
    use crate::error::{DisplayError, Result};
    use gstreamer::prelude::*;
    use gstreamer::Pipeline;
    use gstreamer_app::AppSrc;
    use image::RgbImage;
    use tracing::{debug, info, warn};

    struct Output {
        pipeline: Pipeline,
        appsrc: AppSrc,
        size: (u32, u32),
    }

    /// Desktop window fed through an appsrc pipeline.
    ///
    /// The pipeline is rebuilt whenever the composed frame size changes.
    pub struct WindowPresenter {
        title: String,
        output: Option<Output>,
    }

    impl WindowPresenter {
        pub fn new(title: &str) -> Result<Self> {
            gstreamer::init().map_err(|e| DisplayError::Presentation {
                details: format!("Failed to initialize GStreamer: {}", e),
            })?;
            info!("Opening display window '{}'", title);
            Ok(Self {
                title: title.to_string(),
                output: None,
            })
        }

        fn build(&self, size: (u32, u32)) -> Result<Output> {
            let presentation_error = |details: String| DisplayError::Presentation { details };
            let pipeline_desc = format!(
                "appsrc name=src is-live=true format=time do-timestamp=true \
                 caps=video/x-raw,format=RGB,width={},height={},framerate=0/1 ! \
                 videoconvert ! autovideosink sync=false",
                size.0, size.1
            );
            debug!("Display pipeline: {}", pipeline_desc);

            let pipeline = gstreamer::parse::launch(&pipeline_desc)
                .map_err(|e| presentation_error(format!("Failed to create pipeline: {}", e)))?
                .downcast::<Pipeline>()
                .map_err(|_| presentation_error("Failed to downcast to Pipeline".to_string()))?;
            pipeline.set_property("name", &self.title);

            let appsrc = pipeline
                .by_name("src")
                .ok_or_else(|| presentation_error("Failed to get appsrc element".to_string()))?
                .downcast::<AppSrc>()
                .map_err(|_| presentation_error("Failed to downcast to AppSrc".to_string()))?;

            pipeline
                .set_state(gstreamer::State::Playing)
                .map_err(|e| presentation_error(format!("Failed to start pipeline: {}", e)))?;

            Ok(Output {
                pipeline,
                appsrc,
                size,
            })
        }

        fn shutdown(&mut self) {
            if let Some(output) = self.output.take() {
                let _ = output.appsrc.end_of_stream();
                if let Err(e) = output.pipeline.set_state(gstreamer::State::Null) {
                    warn!("Failed to stop display pipeline: {}", e);
                }
            }
        }
    }

    impl Presenter for WindowPresenter {
        fn present(&mut self, frame: &RgbImage) -> Result<()> {
            let size = frame.dimensions();
            if self.output.as_ref().map(|o| o.size) != Some(size) {
                if self.output.is_some() {
                    info!("Display size changed to {}x{}", size.0, size.1);
                }
                self.shutdown();
                self.output = Some(self.build(size)?);
            }

            if let Some(output) = &self.output {
                let buffer = gstreamer::Buffer::from_slice(frame.as_raw().clone());
                output
                    .appsrc
                    .push_buffer(buffer)
                    .map_err(|e| DisplayError::Presentation {
                        details: format!("appsrc push failed: {:?}", e),
                    })?;
            }
            Ok(())
        }
    }

    impl Drop for WindowPresenter {
        fn drop(&mut self) {
            self.shutdown();
        }
    }
}
