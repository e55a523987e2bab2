use bytes::Bytes;
use chrono::Utc;
use image::{DynamicImage, RgbaImage, codecs::jpeg::JpegEncoder};

use crate::domain::{
    capture::{
        entities::{FacingMode, ImageUpload, StreamHandle, StreamRequest},
        ports::CameraDevice,
    },
    common::entities::app_errors::CoreError,
};

pub const JPEG_QUALITY: u8 = 92;
pub const CAPTURE_MIME_TYPE: &str = "image/jpeg";

/// Live camera session: preview, capture a still, retake, switch cameras,
/// confirm. The device stream is released on confirm, close, facing switch
/// and drop.
pub struct CameraSession<D: CameraDevice> {
    device: D,
    facing: FacingMode,
    stream: Option<StreamHandle>,
    still: Option<Bytes>,
    error: Option<String>,
}

impl<D: CameraDevice> CameraSession<D> {
    pub fn open(device: D) -> Self {
        Self::open_facing(device, FacingMode::default())
    }

    pub fn open_facing(device: D, facing: FacingMode) -> Self {
        let mut session = Self {
            device,
            facing,
            stream: None,
            still: None,
            error: None,
        };
        session.start();
        session
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    pub fn facing(&self) -> FacingMode {
        self.facing
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn still(&self) -> Option<&[u8]> {
        self.still.as_deref()
    }

    /// Freezes the current frame as a JPEG still and stops the live stream.
    pub fn capture(&mut self) -> Result<(), CoreError> {
        let stream = self
            .stream
            .ok_or_else(|| CoreError::Camera("camera is not active".to_string()))?;

        let frame = self.device.read_frame(stream)?;
        let jpeg = encode_jpeg(&frame)?;

        tracing::debug!(
            width = frame.width(),
            height = frame.height(),
            size = jpeg.len(),
            "Captured still from camera"
        );

        self.still = Some(jpeg);
        self.stop();
        Ok(())
    }

    pub fn retake(&mut self) {
        self.still = None;
        self.start();
    }

    pub fn switch_facing(&mut self) -> Result<(), CoreError> {
        if !self.is_active() || self.still.is_some() {
            return Err(CoreError::Camera(
                "cannot switch camera without a live stream".to_string(),
            ));
        }

        self.facing = self.facing.opposite();
        self.start();
        Ok(())
    }

    /// Hands the captured still to the caller and releases the camera.
    pub fn confirm(mut self) -> Result<ImageUpload, CoreError> {
        let still = self
            .still
            .take()
            .ok_or_else(|| CoreError::Camera("no photo captured".to_string()))?;
        self.stop();

        Ok(ImageUpload::new(
            still,
            CAPTURE_MIME_TYPE,
            format!("bitebyte-capture-{}.jpg", Utc::now().timestamp_millis()),
        ))
    }

    pub fn close(mut self) {
        self.stop();
    }

    fn start(&mut self) {
        self.stop();

        match self.device.acquire(StreamRequest::new(self.facing)) {
            Ok(stream) => {
                self.stream = Some(stream);
                self.error = None;
            }
            Err(e) => {
                let detail = match e {
                    CoreError::Camera(message) => message,
                    other => other.to_string(),
                };
                tracing::error!(facing = ?self.facing, error = %detail, "Camera access error");
                self.error = Some(format!("Camera access error: {}", detail));
            }
        }
    }

    fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            self.device.release(stream);
        }
    }
}

impl<D: CameraDevice> Drop for CameraSession<D> {
    fn drop(&mut self) {
        self.stop();
    }
}

pub fn encode_jpeg(frame: &RgbaImage) -> Result<Bytes, CoreError> {
    let rgb = DynamicImage::ImageRgba8(frame.clone()).to_rgb8();
    let mut buffer = Vec::new();

    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    encoder
        .encode_image(&rgb)
        .map_err(|e| CoreError::Camera(format!("Failed to encode frame: {}", e)))?;

    Ok(Bytes::from(buffer))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use image::Rgba;
    use mockall::{Sequence, predicate::eq};

    use super::*;
    use crate::domain::capture::ports::MockCameraDevice;

    fn frame() -> RgbaImage {
        RgbaImage::from_pixel(8, 6, Rgba([210, 140, 60, 255]))
    }

    #[test]
    fn switch_releases_before_acquiring_again() {
        let mut device = MockCameraDevice::new();
        let mut seq = Sequence::new();

        device
            .expect_acquire()
            .withf(|r| r.facing == FacingMode::Environment)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(StreamHandle(1)));
        device
            .expect_release()
            .with(eq(StreamHandle(1)))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        device
            .expect_acquire()
            .withf(|r| r.facing == FacingMode::User)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(StreamHandle(2)));
        device
            .expect_release()
            .with(eq(StreamHandle(2)))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut session = CameraSession::open(device);
        assert!(session.is_active());

        session.switch_facing().unwrap();
        assert_eq!(session.facing(), FacingMode::User);

        session.close();
    }

    #[test]
    fn capture_then_confirm_emits_jpeg_and_releases() {
        let mut device = MockCameraDevice::new();
        device
            .expect_acquire()
            .times(1)
            .returning(|_| Ok(StreamHandle(7)));
        device
            .expect_read_frame()
            .with(eq(StreamHandle(7)))
            .times(1)
            .returning(|_| Ok(frame()));
        device
            .expect_release()
            .with(eq(StreamHandle(7)))
            .times(1)
            .return_const(());

        let mut session = CameraSession::open(device);
        session.capture().unwrap();
        assert!(!session.is_active());

        let upload = session.confirm().unwrap();
        assert_eq!(upload.mime_type, "image/jpeg");
        assert!(upload.filename.starts_with("bitebyte-capture-"));
        assert!(upload.filename.ends_with(".jpg"));
        // JPEG SOI marker
        assert_eq!(&upload.bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn switching_is_refused_while_a_still_is_held() {
        let mut device = MockCameraDevice::new();
        device.expect_acquire().returning(|_| Ok(StreamHandle(1)));
        device.expect_read_frame().returning(|_| Ok(frame()));
        device.expect_release().return_const(());

        let mut session = CameraSession::open(device);
        session.capture().unwrap();

        assert!(session.switch_facing().is_err());
        assert_eq!(session.facing(), FacingMode::Environment);
    }

    #[test]
    fn acquisition_failure_leaves_a_closable_session() {
        let mut device = MockCameraDevice::new();
        device
            .expect_acquire()
            .times(1)
            .returning(|_| Err(CoreError::Camera("Permission denied".to_string())));
        device.expect_release().never();

        let mut session = CameraSession::open(device);
        assert!(!session.is_active());
        assert_eq!(
            session.error(),
            Some("Camera access error: Permission denied")
        );
        assert!(session.capture().is_err());
        assert!(session.switch_facing().is_err());

        session.close();
    }

    #[test]
    fn confirm_without_still_is_an_error() {
        let mut device = MockCameraDevice::new();
        device.expect_acquire().returning(|_| Ok(StreamHandle(3)));
        device
            .expect_release()
            .with(eq(StreamHandle(3)))
            .times(1)
            .return_const(());

        let session = CameraSession::open(device);
        assert!(session.confirm().is_err());
    }

    #[derive(Default)]
    struct Usage {
        active: usize,
        peak: usize,
        next: u64,
        acquired: Vec<FacingMode>,
    }

    struct CountingCamera(Arc<Mutex<Usage>>);

    impl CameraDevice for CountingCamera {
        fn acquire(&mut self, request: StreamRequest) -> Result<StreamHandle, CoreError> {
            let mut usage = self.0.lock().unwrap();
            usage.active += 1;
            usage.peak = usage.peak.max(usage.active);
            usage.next += 1;
            usage.acquired.push(request.facing);
            Ok(StreamHandle(usage.next))
        }

        fn read_frame(&mut self, _stream: StreamHandle) -> Result<RgbaImage, CoreError> {
            Ok(frame())
        }

        fn release(&mut self, _stream: StreamHandle) {
            self.0.lock().unwrap().active -= 1;
        }
    }

    #[test]
    fn never_holds_two_streams_and_releases_on_drop() {
        let usage = Arc::new(Mutex::new(Usage::default()));

        {
            let mut session = CameraSession::open(CountingCamera(usage.clone()));
            session.switch_facing().unwrap();
            session.switch_facing().unwrap();
            session.capture().unwrap();
            session.retake();
            assert!(session.is_active());
            assert!(session.still().is_none());
        }

        let usage = usage.lock().unwrap();
        assert_eq!(usage.active, 0);
        assert_eq!(usage.peak, 1);
        assert_eq!(
            usage.acquired,
            vec![
                FacingMode::Environment,
                FacingMode::User,
                FacingMode::Environment,
                FacingMode::Environment,
            ]
        );
    }
}
