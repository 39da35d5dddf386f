use crate::error::Error;
use flate2::{Compression as GzipLevel, write::GzEncoder};
use std::{
    fmt,
    io::{self, Read},
    str::FromStr,
};

// brotli encoder settings: internal buffer, quality (0-11) and lg window size
const BROTLI_BUFFER_SIZE: usize = 4_096;
const BROTLI_QUALITY: u32 = 11;
const BROTLI_LG_WINDOW_SIZE: u32 = 22;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    #[default]
    None,
    Gzip,
    Brotli,
}

impl Compression {
    /// Value of the `Content-Encoding` header
    #[must_use]
    pub const fn content_encoding(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Gzip => Some("gzip"),
            Self::Brotli => Some("br"),
        }
    }
}

impl FromStr for Compression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Self::None),
            "gzip" => Ok(Self::Gzip),
            "br" => Ok(Self::Brotli),
            _ => Err(Error::UnsupportedCompression(s.to_string())),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content_encoding().unwrap_or_default())
    }
}

/// The body to upload, untouched or fully encoded in memory
#[derive(Debug)]
pub enum Payload<R> {
    Raw(R),
    Encoded {
        data: Vec<u8>,
        content_encoding: &'static str,
    },
}

impl<R> Payload<R> {
    #[must_use]
    pub const fn content_encoding(&self) -> Option<&'static str> {
        match self {
            Self::Raw(_) => None,
            Self::Encoded {
                content_encoding, ..
            } => Some(*content_encoding),
        }
    }
}

/// Wrap `reader` with the codec, the encoded output is buffered completely so the
/// length is known before sending
///
/// # Errors
///
/// Will return `Err` if reading the input or encoding it fails
pub fn wrap<R: Read>(mut reader: R, compression: Compression) -> io::Result<Payload<R>> {
    let data = match compression {
        Compression::None => return Ok(Payload::Raw(reader)),

        Compression::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), GzipLevel::default());
            io::copy(&mut reader, &mut encoder)?;
            encoder.finish()?
        }

        Compression::Brotli => {
            let mut encoder = brotli::CompressorWriter::new(
                Vec::new(),
                BROTLI_BUFFER_SIZE,
                BROTLI_QUALITY,
                BROTLI_LG_WINDOW_SIZE,
            );
            io::copy(&mut reader, &mut encoder)?;
            // closes the stream, the trailer is written on into_inner
            encoder.into_inner()
        }
    };

    log::debug!("{compression} encoded {} bytes", data.len());

    Ok(Payload::Encoded {
        data,
        content_encoding: compression.content_encoding().unwrap_or_default(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Cursor;

    const INPUT: &[u8] = b"<html><body>hello hello hello hello</body></html>\n";

    #[test]
    fn test_from_str() {
        assert_eq!("".parse::<Compression>().unwrap(), Compression::None);
        assert_eq!("gzip".parse::<Compression>().unwrap(), Compression::Gzip);
        assert_eq!("br".parse::<Compression>().unwrap(), Compression::Brotli);

        for invalid in ["zip", "GZIP", "brotli", " "] {
            assert!(matches!(
                invalid.parse::<Compression>(),
                Err(Error::UnsupportedCompression(s)) if s == invalid
            ));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Compression::None.to_string(), "");
        assert_eq!(Compression::Gzip.to_string(), "gzip");
        assert_eq!(Compression::Brotli.to_string(), "br");
    }

    #[test]
    fn test_wrap_none() {
        let payload = wrap(Cursor::new(INPUT), Compression::None).unwrap();
        assert_eq!(payload.content_encoding(), None);
        let Payload::Raw(mut reader) = payload else {
            panic!("expected a raw payload");
        };
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, INPUT);
    }

    #[test]
    fn test_wrap_gzip() {
        let payload = wrap(Cursor::new(INPUT), Compression::Gzip).unwrap();
        assert_eq!(payload.content_encoding(), Some("gzip"));
        let Payload::Encoded { data, .. } = payload else {
            panic!("expected an encoded payload");
        };
        let mut out = Vec::new();
        GzDecoder::new(data.as_slice()).read_to_end(&mut out).unwrap();
        assert_eq!(out, INPUT);
    }

    #[test]
    fn test_wrap_brotli() {
        let payload = wrap(Cursor::new(INPUT), Compression::Brotli).unwrap();
        assert_eq!(payload.content_encoding(), Some("br"));
        let Payload::Encoded { data, .. } = payload else {
            panic!("expected an encoded payload");
        };
        let mut out = Vec::new();
        brotli::Decompressor::new(data.as_slice(), 4_096)
            .read_to_end(&mut out)
            .unwrap();
        assert_eq!(out, INPUT);
    }

    #[test]
    fn test_wrap_empty() {
        for compression in [Compression::Gzip, Compression::Brotli] {
            let payload = wrap(Cursor::new(Vec::new()), compression).unwrap();
            assert!(matches!(payload, Payload::Encoded { ref data, .. } if !data.is_empty()));
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("broken"))
        }
    }

    #[test]
    fn test_wrap_read_error() {
        assert!(wrap(Broken, Compression::Gzip).is_err());
        assert!(wrap(Broken, Compression::Brotli).is_err());
        assert!(wrap(Broken, Compression::None).is_ok());
    }
}
