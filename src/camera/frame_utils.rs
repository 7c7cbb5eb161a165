//! Frame decoding and transformation utilities.

use nokhwa::pixel_format::RgbAFormat;

use super::types::Frame;

/// Decode a nokhwa buffer into an RGBA [`Frame`].
///
/// nokhwa converts from the camera's native format (MJPEG, YUYV, NV12, ...)
/// to RGBA. Returns `None` if the buffer cannot be decoded yet, which is
/// common for the first frames after the stream opens.
pub fn convert_to_rgba(buffer: &nokhwa::Buffer) -> Option<Frame> {
    let decoded = buffer.decode_image::<RgbAFormat>().ok()?;
    let resolution = buffer.resolution();

    let frame = Frame::from_rgba(decoded.into_raw(), resolution.width(), resolution.height());
    frame.is_complete().then_some(frame)
}

/// Mirror a frame horizontally (flip left-right) for selfie mode.
pub fn mirror_horizontal(frame: &mut Frame) {
    let width = frame.width as usize;
    let bpp = frame.bytes_per_pixel();
    let stride = width * bpp;
    if stride == 0 {
        return;
    }

    for row in frame.data.chunks_exact_mut(stride) {
        for x in 0..width / 2 {
            let left = x * bpp;
            let right = (width - 1 - x) * bpp;
            for i in 0..bpp {
                row.swap(left + i, right + i);
            }
        }
    }
}
