use core::slice;

use anyhow::{Result, ensure};
use vapoursynth::frame::Frame;

/// Byte length of `plane` including row padding.
fn padded_len(frame: &Frame, plane: usize) -> Result<usize> {
    ensure!(
        plane < frame.format().plane_count(),
        "plane {plane} is not present in a {}-plane frame",
        frame.format().plane_count()
    );
    Ok(frame.stride(plane) * frame.height(plane))
}

/// The raw bytes of `plane`, row padding included.
///
/// `Frame::plane` refuses planes whose stride exceeds their row size, but the
/// filters take strided buffers, so frames are read through this instead.
pub fn plane_bytes<'a>(frame: &'a Frame, plane: usize) -> Result<&'a [u8]> {
    let len = padded_len(frame, plane)?;
    // SAFETY: VapourSynth allocates `stride * height` bytes for every plane
    Ok(unsafe { slice::from_raw_parts(frame.data_ptr(plane), len) })
}

/// Mutable counterpart of [`plane_bytes`].
pub fn plane_bytes_mut<'a>(frame: &'a mut Frame, plane: usize) -> Result<&'a mut [u8]> {
    let len = padded_len(frame, plane)?;
    // SAFETY: as above, and the mutable borrow of the frame keeps the slice
    // unique
    Ok(unsafe { slice::from_raw_parts_mut(frame.data_ptr_mut(plane), len) })
}
