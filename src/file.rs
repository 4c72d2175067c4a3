//! The camera file container.
//!
//! [`CameraFile`] owns a binary payload plus the metadata a camera or host
//! associates with it: a logical name, a modification time, and a MIME
//! type. It is the staging object between device transfers and the host
//! filesystem, so the payload must round-trip byte-exact — any byte value,
//! embedded NUL included, is preserved verbatim.
//!
//! Four construction paths exist, with deliberately different
//! postconditions:
//!
//! - [`CameraFile::new`] — empty container, all metadata unset.
//! - [`CameraFile::open`] — payload, name, and mtime from a filesystem
//!   path.
//! - [`CameraFile::from_reader`] — payload drained from any reader;
//!   name and mtime stay unset (a stream carries no filename).
//! - [`CameraFile::from_descriptor`] (unix) — same over a caller-owned
//!   file descriptor.
//!
//! Instances never share buffers: [`CameraFile::copy_from`] is a deep
//! duplication, and [`CameraFile::data`] hands out a borrow that cannot
//! outlive the container. All I/O is blocking and synchronous; callers
//! needing concurrency dispatch these calls on their own executors.

use crate::error::{CamError, CamResult};
use crate::mime;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Semantic variant categories of a single logical capture.
///
/// Camera firmware typically exposes one capture under several
/// systematically named files (full image, raw sensor data, thumbnail,
/// audio annotation, metadata blob) instead of listing each variant
/// separately. [`CameraFile::name_for_type`] applies the matching naming
/// convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FileType {
    /// The capture itself, as the camera would normally deliver it.
    Normal,
    /// Reduced-size preview / thumbnail.
    Preview,
    /// Raw sensor data counterpart.
    Raw,
    /// Audio annotation attached to the capture.
    Audio,
    /// Exif block extracted from the capture.
    Exif,
    /// Sidecar metadata blob.
    Metadata,
}

impl FileType {
    /// Filename prefix used by device naming conventions for this
    /// variant. Total over the enum; `Normal` (and anything without a
    /// convention) maps to the identity.
    fn prefix(self) -> &'static str {
        match self {
            FileType::Normal => "",
            FileType::Preview => "thumb_",
            FileType::Raw => "raw_",
            FileType::Audio => "audio_",
            FileType::Exif => "exif_",
            FileType::Metadata => "meta_",
        }
    }
}

/// Outcome of a [`CameraFile::detect_mime_type`] call.
///
/// Detection is one-shot per object lifetime: "ran and matched", "ran and
/// matched nothing", and "already ran, nothing changed" are three distinct
/// observable states, so the result is its own enum rather than a nested
/// `Option`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimeDetection {
    /// Inference ran and classified the payload.
    Detected(String),
    /// Inference ran; no signature or extension hint matched.
    Unknown,
    /// Detection had already run for this object; no inference was
    /// performed and the stored MIME type is untouched.
    Unchanged,
}

/// Binary payload plus file metadata, staged between device and host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraFile {
    payload: Vec<u8>,
    /// Logical filename; empty means unset.
    name: String,
    mime_type: Option<String>,
    /// Seconds since the Unix epoch; `None` means no timestamp recorded.
    mtime: Option<i64>,
    /// Whether MIME detection has run, independent of whether it matched.
    mime_detected: bool,
}

impl CameraFile {
    /// Creates an empty container: no payload, all metadata unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the full file at `path` into a new container.
    ///
    /// Sets `name` to the path's final component and `mtime` to the
    /// file's on-disk modification time. Fails with
    /// [`CamError::NotFound`] when the path does not exist and
    /// [`CamError::Io`] on a read failure; no partially filled container
    /// escapes on error.
    pub fn open<P: AsRef<Path>>(path: P) -> CamResult<Self> {
        let path = path.as_ref();
        let payload =
            std::fs::read(path).map_err(|e| CamError::from_path_io(path, e))?;
        let metadata =
            std::fs::metadata(path).map_err(|e| CamError::from_path_io(path, e))?;
        let mtime = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_secs() as i64);

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        debug!("opened '{}' ({} bytes)", path.display(), payload.len());
        Ok(Self {
            payload,
            name,
            mime_type: None,
            mtime,
            mime_detected: false,
        })
    }

    /// Drains `reader` to completion into a new container.
    ///
    /// Name and mtime stay unset: a stream carries no filename. The call
    /// blocks until the reader reports end of stream.
    pub fn from_reader<R: Read>(mut reader: R) -> CamResult<Self> {
        let mut payload = Vec::new();
        reader.read_to_end(&mut payload)?;
        trace!("read {} bytes from reader", payload.len());
        Ok(Self {
            payload,
            ..Self::default()
        })
    }

    /// Reads the entire content reachable from a caller-owned, already
    /// open descriptor into a new container.
    ///
    /// The descriptor is duplicated for the read; the caller keeps
    /// ownership and remains responsible for closing the original. Name
    /// and mtime stay unset. Fails with [`CamError::Io`] when the
    /// descriptor is invalid or a read error occurs.
    #[cfg(unix)]
    pub fn from_descriptor(fd: std::os::fd::BorrowedFd<'_>) -> CamResult<Self> {
        let owned = fd.try_clone_to_owned().map_err(CamError::Io)?;
        Self::from_reader(std::fs::File::from(owned))
    }

    /// Replaces the payload wholesale. Name, mtime, MIME type, and the
    /// detection flag are untouched.
    pub fn set_data(&mut self, data: impl Into<Vec<u8>>) {
        self.payload = data.into();
    }

    /// The current payload, byte-exact.
    pub fn data(&self) -> &[u8] {
        &self.payload
    }

    /// Consumes the container, returning the payload without copying.
    pub fn into_data(self) -> Vec<u8> {
        self.payload
    }

    /// Payload length in bytes. Always derived from the buffer, so it can
    /// never go stale after a mutation.
    pub fn size(&self) -> usize {
        self.payload.len()
    }

    /// Sets the MIME type explicitly, without touching the detection
    /// flag.
    pub fn set_mime_type(&mut self, mime: impl Into<String>) {
        self.mime_type = Some(mime.into());
    }

    /// The stored MIME type, if one was set or detected.
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Records a modification time, in seconds since the Unix epoch.
    pub fn set_mtime(&mut self, mtime: i64) {
        self.mtime = Some(mtime);
    }

    /// The recorded modification time, if any.
    pub fn mtime(&self) -> Option<i64> {
        self.mtime
    }

    /// Sets the logical filename.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The logical filename; empty when unset.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Classifies the payload by leading-byte signatures, falling back to
    /// extension hints from the logical name.
    ///
    /// Detection runs at most once per object lifetime: the first call
    /// returns [`MimeDetection::Detected`] or [`MimeDetection::Unknown`]
    /// and marks the object as classified; every later call returns
    /// [`MimeDetection::Unchanged`] without re-scanning, until
    /// [`CameraFile::clean`] resets the object. A match overwrites any
    /// previously set MIME type; a miss leaves it as it was.
    pub fn detect_mime_type(&mut self) -> MimeDetection {
        if self.mime_detected {
            return MimeDetection::Unchanged;
        }
        self.mime_detected = true;
        match mime::classify(&self.payload, &self.name) {
            Some(found) => {
                debug!("detected mime type '{}' for '{}'", found, self.name);
                self.mime_type = Some(found.to_string());
                MimeDetection::Detected(found.to_string())
            }
            None => MimeDetection::Unknown,
        }
    }

    /// Derives the companion filename for a capture variant, e.g. the raw
    /// counterpart of `capt0001.jpg` is `raw_capt0001.jpg`.
    ///
    /// Devices address variants of one logical capture by systematic name
    /// transformation rather than separate listings; this applies that
    /// convention. `Normal` returns `base` unchanged.
    pub fn name_for_type(base: &str, file_type: FileType) -> String {
        format!("{}{}", file_type.prefix(), base)
    }

    /// Deep-copies payload and all metadata from `source`, fully
    /// overwriting this container. The two objects share no mutable state
    /// afterwards.
    pub fn copy_from(&mut self, source: &CameraFile) {
        self.payload = source.payload.clone();
        self.name = source.name.clone();
        self.mime_type = source.mime_type.clone();
        self.mtime = source.mtime;
        self.mime_detected = source.mime_detected;
    }

    /// Writes the payload to `path`, creating or truncating the file.
    ///
    /// The write either completes in full or fails with [`CamError::Io`];
    /// a failed save leaves the container untouched. When an mtime is
    /// recorded it is applied to the written file afterwards; otherwise
    /// the filesystem assigns its own timestamp.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> CamResult<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.payload)?;
        if let Some(mtime) = self.mtime {
            let ft = filetime::FileTime::from_unix_time(mtime, 0);
            filetime::set_file_mtime(path, ft)?;
        }
        debug!("saved {} bytes to '{}'", self.payload.len(), path.display());
        Ok(())
    }

    /// Resets the container to its just-constructed state: empty payload
    /// and name, unset MIME type and mtime, detection flag cleared.
    pub fn clean(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_HEAD: &[u8] = &[
        0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F',
    ];

    #[test]
    fn test_new_is_empty() {
        let file = CameraFile::new();
        assert!(file.data().is_empty());
        assert_eq!(file.size(), 0);
        assert_eq!(file.name(), "");
        assert_eq!(file.mime_type(), None);
        assert_eq!(file.mtime(), None);
    }

    #[test]
    fn test_binary_round_trip() {
        // Embedded NULs and non-UTF8 bytes must survive verbatim.
        let data = vec![0x00, 0xff, 0x7f, 0x80, 0x00, 0x01];
        let mut file = CameraFile::new();
        file.set_data(data.clone());
        assert_eq!(file.data(), data.as_slice());
        assert_eq!(file.size(), data.len());
    }

    #[test]
    fn test_set_data_leaves_metadata_alone() {
        let mut file = CameraFile::new();
        file.set_name("capt0001.jpg");
        file.set_mtime(1_700_000_000);
        file.set_mime_type("image/jpeg");
        file.set_data(b"replaced".to_vec());
        assert_eq!(file.name(), "capt0001.jpg");
        assert_eq!(file.mtime(), Some(1_700_000_000));
        assert_eq!(file.mime_type(), Some("image/jpeg"));
    }

    #[test]
    fn test_detection_is_one_shot() {
        let mut file = CameraFile::new();
        file.set_data(JPEG_HEAD.to_vec());
        assert_eq!(
            file.detect_mime_type(),
            MimeDetection::Detected("image/jpeg".to_string())
        );
        assert_eq!(file.mime_type(), Some("image/jpeg"));
        assert_eq!(file.detect_mime_type(), MimeDetection::Unchanged);
    }

    #[test]
    fn test_detection_unknown_still_marks_detected() {
        let mut file = CameraFile::new();
        file.set_data(b"no signature here".to_vec());
        assert_eq!(file.detect_mime_type(), MimeDetection::Unknown);
        assert_eq!(file.mime_type(), None);
        // "Detected but unknown" differs from "never attempted".
        assert_eq!(file.detect_mime_type(), MimeDetection::Unchanged);
    }

    #[test]
    fn test_clean_resets_detection() {
        let mut file = CameraFile::new();
        file.set_data(JPEG_HEAD.to_vec());
        file.set_name("capt0001.jpg");
        file.detect_mime_type();
        file.clean();
        assert!(file.data().is_empty());
        assert_eq!(file.name(), "");
        assert_eq!(file.mime_type(), None);
        assert_eq!(file.mtime(), None);
        assert!(matches!(file.detect_mime_type(), MimeDetection::Unknown));
    }

    #[test]
    fn test_name_for_type() {
        assert_eq!(
            CameraFile::name_for_type("cam_file.jpg", FileType::Raw),
            "raw_cam_file.jpg"
        );
        assert_eq!(
            CameraFile::name_for_type("cam_file.jpg", FileType::Normal),
            "cam_file.jpg"
        );
        assert_eq!(
            CameraFile::name_for_type("cam_file.jpg", FileType::Preview),
            "thumb_cam_file.jpg"
        );
        assert_eq!(
            CameraFile::name_for_type("cam_file.jpg", FileType::Metadata),
            "meta_cam_file.jpg"
        );
    }

    #[test]
    fn test_copy_is_deep() {
        let mut src = CameraFile::new();
        src.set_data(b"payload".to_vec());
        src.set_name("a.bin");
        src.set_mtime(1234);
        src.set_mime_type("application/octet-stream");

        let mut dst = CameraFile::new();
        dst.copy_from(&src);
        src.set_data(b"mutated".to_vec());
        src.set_name("b.bin");

        assert_eq!(dst.data(), b"payload");
        assert_eq!(dst.name(), "a.bin");
        assert_eq!(dst.mtime(), Some(1234));
        assert_eq!(dst.mime_type(), Some("application/octet-stream"));
    }

    #[test]
    fn test_copy_carries_detection_flag() {
        let mut src = CameraFile::new();
        src.set_data(JPEG_HEAD.to_vec());
        src.detect_mime_type();

        let mut dst = CameraFile::new();
        dst.copy_from(&src);
        assert_eq!(dst.detect_mime_type(), MimeDetection::Unchanged);
    }

    #[test]
    fn test_from_reader_leaves_name_unset() {
        let file = CameraFile::from_reader(&b"stream bytes"[..]).unwrap();
        assert_eq!(file.data(), b"stream bytes");
        assert_eq!(file.name(), "");
        assert_eq!(file.mtime(), None);
    }

    #[test]
    fn test_open_missing_path_is_not_found() {
        let err = CameraFile::open("/definitely/not/here.jpg").unwrap_err();
        assert!(matches!(err, crate::error::CamError::NotFound { .. }));
    }
}
