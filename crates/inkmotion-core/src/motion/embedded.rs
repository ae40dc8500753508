//! Serde adapter embedding a stroke's recording in document JSON as base64
//! of the versioned binary layout.

use super::MotionRecording;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Deserializer, Serializer, de, ser};
use std::io::Cursor;

pub fn serialize<S>(motion: &Option<MotionRecording>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match motion {
        Some(motion) => {
            let bytes = motion.to_bytes().map_err(ser::Error::custom)?;
            serializer.serialize_some(&STANDARD.encode(bytes))
        }
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<MotionRecording>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(encoded) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let bytes = STANDARD.decode(encoded).map_err(de::Error::custom)?;
    MotionRecording::read_any(&mut Cursor::new(bytes))
        .map(Some)
        .map_err(de::Error::custom)
}
