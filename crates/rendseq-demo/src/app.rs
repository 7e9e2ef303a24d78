//! Host frame loop driving one capture session.

use std::time::{Duration, Instant};

use rendseq_core::{CaptureConfig, CaptureOutcome, FrameCaptureScheduler, SessionStats};

use crate::error::DemoError;
use crate::host::DemoHost;
use crate::renderer::SoftwareRenderer;

/// How often to report progress, in captured frames.
const PROGRESS_INTERVAL: u64 = 50;

/// Run frames until the scheduler reports the range finished.
pub async fn run(
    config: CaptureConfig,
    window: (u32, u32),
    realtime: bool,
) -> Result<SessionStats, DemoError> {
    let (mut host, shared) = DemoHost::new(window.0, window.1);
    let mut renderer = SoftwareRenderer::new(shared);

    let (mut scheduler, mut session) = FrameCaptureScheduler::init_session(config, &mut host)?;
    let frame_time = Duration::from_secs_f64(1.0 / scheduler.config().frame_rate as f64);
    let total = scheduler.config().frame_count();

    let mut pacing = realtime.then(|| tokio::time::interval(frame_time));
    let mut last = Instant::now();

    loop {
        if let Some(interval) = pacing.as_mut() {
            interval.tick().await;
        }
        let now = Instant::now();
        host.begin_frame(now.duration_since(last).as_secs_f32());
        last = now;

        let outcome = scheduler.tick(&mut session, &mut host, &mut renderer).await;
        host.end_frame();

        match outcome {
            CaptureOutcome::Finished => break,
            CaptureOutcome::Captured(_) => {
                let captured = session.stats().captured;
                if captured % PROGRESS_INTERVAL == 0 {
                    tracing::info!("{captured}/{total} frames captured");
                }
            }
            CaptureOutcome::Waiting | CaptureOutcome::Failed { .. } => {}
        }
    }

    tracing::info!(
        "Simulated {:.2}s over {} host frames",
        host.scene_time(),
        host.clock().frame_count()
    );
    Ok(session.stats())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rendseq_core::codec;
    use rendseq_core::{CaptureMode, ImageFormat};
    use tempfile::tempdir;

    use super::*;

    fn names(dir: &std::path::Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn render_to_texture_writes_range() {
        let tmp = tempdir().unwrap();
        let config = CaptureConfig {
            image_width: 32,
            image_height: 18,
            first_frame: 2,
            last_frame: 4,
            capture_mode: CaptureMode::RenderToTexture,
            output_directory: Some(tmp.path().to_path_buf()),
            ..Default::default()
        };

        let stats = run(config, (16, 16), false).await.unwrap();
        assert_eq!((stats.captured, stats.failed), (3, 0));
        assert_eq!(names(tmp.path()), ["2.png", "3.png", "4.png"]);

        let bytes = fs::read(tmp.path().join("3.png")).unwrap();
        let frame = codec::decode(&bytes, ImageFormat::Png, 3).unwrap();
        assert_eq!((frame.width, frame.height), (32, 18));
    }

    #[tokio::test]
    async fn screen_capture_uses_window_size_and_supersize() {
        let tmp = tempdir().unwrap();
        let config = CaptureConfig {
            first_frame: 0,
            last_frame: 1,
            file_format: ImageFormat::Jpeg,
            capture_mode: CaptureMode::ScreenCapture,
            supersize: 2,
            output_directory: Some(tmp.path().to_path_buf()),
            ..Default::default()
        };

        let stats = run(config, (20, 10), false).await.unwrap();
        assert_eq!(stats.captured, 2);
        assert_eq!(names(tmp.path()), ["0.jpg", "1.jpg"]);

        let bytes = fs::read(tmp.path().join("1.jpg")).unwrap();
        let frame = codec::decode(&bytes, ImageFormat::Jpeg, 1).unwrap();
        assert_eq!((frame.width, frame.height), (40, 20));
    }

    #[tokio::test]
    async fn invalid_config_is_reported() {
        let config = CaptureConfig {
            frame_rate: 0,
            ..Default::default()
        };
        assert!(matches!(
            run(config, (8, 8), false).await,
            Err(DemoError::Config(_))
        ));
    }
}
