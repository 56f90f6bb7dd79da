use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::ProtocolError;
use crate::message::{InfoReply, InfoRequest};

pub const PROTOCOL_VERSION: u8 = 2;
pub const INFO_MESSAGE_TYPE: u8 = 1;
pub const HEADER_SIZE: usize = 8;
pub const MAX_BODY_SIZE: u64 = 16 * 1024 * 1024;

/// Frames info messages.
///
/// Every frame is an 8 byte header followed by the body:
///
/// ```text
/// +---------+------+--------------------------+
/// | version | type |  body length (48 bit BE) |
/// +---------+------+--------------------------+
/// ```
///
/// Requests are encoded from [`InfoRequest`], replies are decoded into
/// [`InfoReply`]. Encoding [`InfoReply`] is supported too so a node can be
/// stood in for in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct InfoCodec;

impl InfoCodec {
    pub fn new() -> Self {
        Self
    }

    fn put_header(dst: &mut BytesMut, body_len: usize) -> Result<(), ProtocolError> {
        let len = body_len as u64;
        if len > MAX_BODY_SIZE {
            return Err(ProtocolError::BodyTooLarge(len));
        }
        dst.reserve(HEADER_SIZE + body_len);
        dst.put_u8(PROTOCOL_VERSION);
        dst.put_u8(INFO_MESSAGE_TYPE);
        dst.put_uint(len, HEADER_SIZE - 2);
        Ok(())
    }
}

impl Encoder<InfoRequest> for InfoCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: InfoRequest, dst: &mut BytesMut) -> Result<(), Self::Error> {
        Self::put_header(dst, item.body_len())?;
        for command in item.commands() {
            dst.put_slice(command.as_bytes());
            dst.put_u8(b'\n');
        }
        Ok(())
    }
}

impl Encoder<InfoReply> for InfoCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: InfoReply, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let body = item.to_string();
        Self::put_header(dst, body.len())?;
        dst.put_slice(body.as_bytes());
        Ok(())
    }
}

impl Decoder for InfoCodec {
    type Item = InfoReply;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.len() < HEADER_SIZE {
            return Ok(None);
        }

        let version = src[0];
        if version != PROTOCOL_VERSION {
            return Err(ProtocolError::UnsupportedVersion(version));
        }
        let message_type = src[1];
        if message_type != INFO_MESSAGE_TYPE {
            return Err(ProtocolError::UnexpectedType(message_type));
        }
        let len = src[2..HEADER_SIZE]
            .iter()
            .fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
        if len > MAX_BODY_SIZE {
            return Err(ProtocolError::BodyTooLarge(len));
        }

        let frame_len = HEADER_SIZE + len as usize;
        if src.len() < frame_len {
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        src.advance(HEADER_SIZE);
        let body = src.split_to(len as usize);
        let body = String::from_utf8(body.to_vec())?;
        Ok(Some(InfoReply::parse(&body)))
    }
}
