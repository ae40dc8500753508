//! Fixed binary layout of a [`MotionRecording`].
//!
//! Legacy body (little-endian):
//!
//! ```text
//! u32 count
//! count × { f64 x, f64 y, f64 pressure, u32 timestamp, u8 is_eraser }
//! ```
//!
//! The versioned form prefixes the body with [`RECORDING_MAGIC`] and a
//! one-byte format version.

use super::{MotionPoint, MotionRecording, RecordingError, RecordingResult};
use crate::shapes::InkPoint;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

/// Marker at the start of a versioned recording.
pub const RECORDING_MAGIC: [u8; 4] = *b"XMRC";

/// Current versioned format.
const FORMAT_VERSION: u8 = 1;

/// Upper bound on the points reserved before any are read; the count is untrusted.
const MAX_RESERVED_POINTS: usize = 4096;

impl MotionRecording {
    /// Write the legacy (unversioned) body.
    pub fn serialize<W: Write>(&self, out: &mut W) -> RecordingResult<()> {
        let count = u32::try_from(self.motion_points().len())
            .map_err(|_| RecordingError::TooManyPoints(self.motion_points().len()))?;
        out.write_u32::<LittleEndian>(count)?;

        for mp in self.motion_points() {
            let timestamp = u32::try_from(mp.timestamp)
                .map_err(|_| RecordingError::TimestampOverflow(mp.timestamp))?;
            out.write_f64::<LittleEndian>(mp.point.x)?;
            out.write_f64::<LittleEndian>(mp.point.y)?;
            out.write_f64::<LittleEndian>(mp.point.pressure)?;
            out.write_u32::<LittleEndian>(timestamp)?;
            out.write_u8(u8::from(mp.is_eraser))?;
        }
        Ok(())
    }

    /// Replace this recording's contents with a legacy body read from `input`.
    /// On error the recording is left unchanged.
    pub fn read_serialized<R: Read>(&mut self, input: &mut R) -> RecordingResult<()> {
        let count = input.read_u32::<LittleEndian>()?;
        *self = read_body(count, input)?;
        Ok(())
    }

    /// Write the versioned form (magic, version, legacy body).
    pub fn write_versioned<W: Write>(&self, out: &mut W) -> RecordingResult<()> {
        out.write_all(&RECORDING_MAGIC)?;
        out.write_u8(FORMAT_VERSION)?;
        self.serialize(out)
    }

    /// Read either the versioned form or a bare legacy body.
    pub fn read_any<R: Read>(input: &mut R) -> RecordingResult<MotionRecording> {
        let mut head = [0u8; 4];
        input.read_exact(&mut head)?;

        if head == RECORDING_MAGIC {
            let version = input.read_u8()?;
            if version != FORMAT_VERSION {
                return Err(RecordingError::UnsupportedVersion(version));
            }
            let count = input.read_u32::<LittleEndian>()?;
            return read_body(count, input);
        }

        read_body(u32::from_le_bytes(head), input)
    }

    /// Versioned form as a byte vector.
    pub fn to_bytes(&self) -> RecordingResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(9 + self.motion_point_count() * 29);
        self.write_versioned(&mut bytes)?;
        Ok(bytes)
    }
}

fn read_body<R: Read>(count: u32, input: &mut R) -> RecordingResult<MotionRecording> {
    let mut points = Vec::with_capacity((count as usize).min(MAX_RESERVED_POINTS));

    for _ in 0..count {
        let x = input.read_f64::<LittleEndian>()?;
        let y = input.read_f64::<LittleEndian>()?;
        let pressure = input.read_f64::<LittleEndian>()?;
        let timestamp = input.read_u32::<LittleEndian>()?;
        let is_eraser = match input.read_u8()? {
            0 => false,
            1 => true,
            other => return Err(RecordingError::InvalidFlag(other)),
        };
        points.push(MotionPoint::new(
            InkPoint::new(x, y, pressure),
            u64::from(timestamp),
            is_eraser,
        ));
    }

    Ok(MotionRecording::from_points(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample(n: usize) -> MotionRecording {
        let mut motion = MotionRecording::new();
        for i in 0..n {
            let pressure = if i % 2 == 0 { 0.25 * i as f64 } else { -1.0 };
            motion.add_motion_point(
                InkPoint::new(i as f64 * 1.5, 100.0 - i as f64, pressure),
                5000 + i as u64 * 16,
                i % 4 == 3,
            );
        }
        motion
    }

    #[test]
    fn test_roundtrip_legacy() {
        for n in [0, 1, 7] {
            let motion = sample(n);
            let mut bytes = Vec::new();
            motion.serialize(&mut bytes).unwrap();
            assert_eq!(bytes.len(), 4 + n * 29);

            let mut read = MotionRecording::new();
            read.read_serialized(&mut Cursor::new(bytes)).unwrap();
            assert_eq!(read, motion);
        }
    }

    #[test]
    fn test_layout_is_little_endian() {
        let mut motion = MotionRecording::new();
        motion.add_motion_point(InkPoint::new(1.0, 2.0, 0.5), 258, true);
        let mut bytes = Vec::new();
        motion.serialize(&mut bytes).unwrap();

        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[4..12], &1.0f64.to_le_bytes());
        assert_eq!(&bytes[28..32], &[2, 1, 0, 0]);
        assert_eq!(bytes[32], 1);
    }

    #[test]
    fn test_read_any_accepts_both_forms() {
        let motion = sample(3);

        let versioned = motion.to_bytes().unwrap();
        assert_eq!(&versioned[0..4], &RECORDING_MAGIC);
        assert_eq!(MotionRecording::read_any(&mut Cursor::new(versioned)).unwrap(), motion);

        let mut legacy = Vec::new();
        motion.serialize(&mut legacy).unwrap();
        assert_eq!(MotionRecording::read_any(&mut Cursor::new(legacy)).unwrap(), motion);
    }

    #[test]
    fn test_truncated_input_leaves_recording_untouched() {
        let motion = sample(2);
        let mut bytes = Vec::new();
        motion.serialize(&mut bytes).unwrap();
        bytes.truncate(bytes.len() - 3);

        let mut target = sample(1);
        let result = target.read_serialized(&mut Cursor::new(bytes));
        assert!(matches!(result, Err(RecordingError::Io(_))));
        assert_eq!(target, sample(1));
    }

    #[test]
    fn test_huge_count_on_short_input_is_an_error() {
        let bytes = vec![0xff; 5];
        assert!(matches!(
            MotionRecording::read_any(&mut Cursor::new(bytes)),
            Err(RecordingError::Io(_))
        ));

        let mut versioned = RECORDING_MAGIC.to_vec();
        versioned.push(FORMAT_VERSION);
        versioned.extend_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            MotionRecording::read_any(&mut Cursor::new(versioned)),
            Err(RecordingError::Io(_))
        ));
    }

    #[test]
    fn test_timestamp_overflow() {
        let mut motion = MotionRecording::new();
        motion.add_motion_point(InkPoint::new(0.0, 0.0, 0.0), u64::from(u32::MAX) + 1, false);
        let result = motion.serialize(&mut Vec::new());
        assert!(matches!(result, Err(RecordingError::TimestampOverflow(_))));
    }

    #[test]
    fn test_invalid_flag_and_version() {
        let mut bytes = Vec::new();
        sample(1).serialize(&mut bytes).unwrap();
        let last = bytes.len() - 1;
        bytes[last] = 7;
        assert!(matches!(
            MotionRecording::read_any(&mut Cursor::new(bytes)),
            Err(RecordingError::InvalidFlag(7))
        ));

        let mut bytes = RECORDING_MAGIC.to_vec();
        bytes.push(9);
        assert!(matches!(
            MotionRecording::read_any(&mut Cursor::new(bytes)),
            Err(RecordingError::UnsupportedVersion(9))
        ));
    }
}
