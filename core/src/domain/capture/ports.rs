use image::RgbaImage;

use crate::domain::{
    capture::entities::{StreamHandle, StreamRequest},
    common::entities::app_errors::CoreError,
};

/// Port for camera hardware. A device hands out at most one live stream per
/// `acquire` call; every handle must be given back through `release`.
#[cfg_attr(test, mockall::automock)]
pub trait CameraDevice: Send {
    fn acquire(&mut self, request: StreamRequest) -> Result<StreamHandle, CoreError>;

    /// Copy of the frame currently shown on the stream.
    fn read_frame(&mut self, stream: StreamHandle) -> Result<RgbaImage, CoreError>;

    fn release(&mut self, stream: StreamHandle);
}
