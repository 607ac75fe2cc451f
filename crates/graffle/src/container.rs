//! Container sniffing and payload decoding.
//!
//! A document is stored in one of four ways: a gzip-compressed property
//! list, a raw XML property list, a zip archive, or a directory bundle. The
//! first two bytes of the input, read as a little-endian `u16`, select the
//! decode path. Directory bundles are read through their `data.plist` entry.

use std::{
    fs,
    io::{self, Cursor, Read},
    path::Path,
};

use flate2::read::GzDecoder;
use log::{debug, info};
use zip::{ZipArchive, result::ZipError};

use graffle_core::document::Preview;

use crate::error::GraffleError;

/// Magic of a gzip stream (`1f 8b`).
const GZIP_MAGIC: u16 = 0x8b1f;

/// The leading `<?` of an XML prolog.
const XML_MAGIC: u16 = 0x3f3c;

/// Entry holding the structured payload, inside archives and bundles.
pub const DATA_ENTRY: &str = "data.plist";

/// Optional entry holding the preview image.
pub const PREVIEW_ENTRY: &str = "preview.jpeg";

const PREVIEW_MEDIA_TYPE: &str = "jpeg";

/// The decoded contents of a container.
#[derive(Debug, Clone)]
pub struct Payload {
    root: plist::Value,
    preview: Option<Preview>,
}

impl Payload {
    pub fn root(&self) -> &plist::Value {
        &self.root
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Splits the payload into its root value and preview image.
    pub fn into_parts(self) -> (plist::Value, Option<Preview>) {
        (self.root, self.preview)
    }
}

/// Reads the container at `path`, which may be a file or a directory bundle.
///
/// # Errors
///
/// Returns [`GraffleError::ContainerFormat`] when the input is not a
/// recognized container or its payload cannot be decoded, and
/// [`GraffleError::Io`] when the input cannot be read.
pub fn read(path: &Path) -> Result<Payload, GraffleError> {
    info!(path:? = path; "Opening container");

    if path.is_dir() {
        return read_bundle(path);
    }

    let bytes = fs::read(path)?;
    decode(&bytes)
}

fn read_bundle(dir: &Path) -> Result<Payload, GraffleError> {
    debug!(dir:? = dir; "Reading directory bundle");

    let data = fs::read(dir.join(DATA_ENTRY)).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => {
            GraffleError::container(format!("bundle has no `{DATA_ENTRY}` entry"))
        }
        _ => GraffleError::Io(err),
    })?;
    let mut payload = decode(&data)?;

    if payload.preview.is_none() {
        payload.preview = match fs::read(dir.join(PREVIEW_ENTRY)) {
            Ok(image) => Some(Preview::new(image, PREVIEW_MEDIA_TYPE)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("Bundle has no preview image");
                None
            }
            Err(err) => return Err(GraffleError::Io(err)),
        };
    }

    Ok(payload)
}

/// Decodes container bytes, sniffing the format from the first two bytes.
pub fn decode(bytes: &[u8]) -> Result<Payload, GraffleError> {
    let [first, second, ..] = bytes else {
        return Err(GraffleError::container("input is shorter than two bytes"));
    };

    match u16::from_le_bytes([*first, *second]) {
        GZIP_MAGIC => {
            debug!("Decoding compressed payload");
            Ok(Payload {
                root: parse_plist(&inflate(bytes)?)?,
                preview: None,
            })
        }
        XML_MAGIC => {
            debug!("Decoding plain payload");
            Ok(Payload {
                root: parse_plist(bytes)?,
                preview: None,
            })
        }
        magic => {
            debug!(magic:? = magic; "Decoding archive");
            read_archive(bytes)
        }
    }
}

fn read_archive(bytes: &[u8]) -> Result<Payload, GraffleError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|err| GraffleError::container(format!("not a recognized container: {err}")))?;

    let data = read_entry(&mut archive, DATA_ENTRY)?
        .ok_or_else(|| GraffleError::container(format!("archive has no `{DATA_ENTRY}` entry")))?;
    let preview = read_entry(&mut archive, PREVIEW_ENTRY)?
        .map(|image| Preview::new(image, PREVIEW_MEDIA_TYPE));
    if preview.is_none() {
        debug!("Archive has no preview image");
    }

    // The data entry may itself be compressed.
    let data = if data.starts_with(&GZIP_MAGIC.to_le_bytes()) {
        inflate(&data)?
    } else {
        data
    };

    Ok(Payload {
        root: parse_plist(&data)?,
        preview,
    })
}

fn inflate(bytes: &[u8]) -> Result<Vec<u8>, GraffleError> {
    let mut inflated = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut inflated)
        .map_err(|err| GraffleError::container(format!("decompression failed: {err}")))?;
    Ok(inflated)
}

fn read_entry(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<Option<Vec<u8>>, GraffleError> {
    match archive.by_name(name) {
        Ok(mut entry) => {
            let mut data = Vec::new();
            entry
                .read_to_end(&mut data)
                .map_err(|err| GraffleError::container(format!("cannot read `{name}`: {err}")))?;
            Ok(Some(data))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(err) => Err(GraffleError::container(format!(
            "cannot read `{name}`: {err}"
        ))),
    }
}

/// Parses an XML or binary property list.
fn parse_plist(bytes: &[u8]) -> Result<plist::Value, GraffleError> {
    plist::Value::from_reader(Cursor::new(bytes))
        .map_err(|err| GraffleError::container(format!("invalid property list: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>SheetTitle</key>
    <string>Canvas 1</string>
</dict>
</plist>"#;

    #[test]
    fn test_decode_plain_payload() {
        let payload = decode(XML.as_bytes()).unwrap();

        let root = payload.root().as_dictionary().unwrap();
        assert_eq!(
            root.get("SheetTitle").and_then(plist::Value::as_string),
            Some("Canvas 1")
        );
        assert!(payload.preview().is_none());
    }

    #[test]
    fn test_short_input_fails() {
        assert!(matches!(
            decode(b"<"),
            Err(GraffleError::ContainerFormat(_))
        ));
        assert!(matches!(decode(b""), Err(GraffleError::ContainerFormat(_))));
    }

    #[test]
    fn test_corrupt_gzip_fails() {
        assert!(matches!(
            decode(&[0x1f, 0x8b, 0x00, 0x01]),
            Err(GraffleError::ContainerFormat(_))
        ));
    }

    #[test]
    fn test_unknown_bytes_fail_as_archive() {
        assert!(matches!(
            decode(b"PNG not a container"),
            Err(GraffleError::ContainerFormat(_))
        ));
    }

    #[test]
    fn test_malformed_xml_fails() {
        assert!(matches!(
            decode(b"<?xml version=\"1.0\"?><plist><dict><key>"),
            Err(GraffleError::ContainerFormat(_))
        ));
    }
}
