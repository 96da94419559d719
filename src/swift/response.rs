use super::api::MULTIPART_BYTERANGES;
use crate::error::{Error, Result};
use assert_impl::assert_impl;
use std::mem::take;

// A part header block runs from the boundary marker to this separator.
const HEADERS_END: &[u8] = b"\n\r\n\r";

/// 字节范围响应解码器
///
/// 每个在途响应持有一个解码器，剥离 multipart 边界与分部头，仅保留内容字节。
/// 分块到达的响应无论如何切分，输出都逐字节一致。
pub struct RangeResponseDecoder {
    boundary: Option<Box<str>>,
    cut_chunk: Vec<u8>,
    terminated: bool,
}

impl RangeResponseDecoder {
    /// A decoder without a boundary passes content through unchanged, which
    /// is what a single range response needs.
    pub fn passthrough() -> RangeResponseDecoder {
        RangeResponseDecoder {
            boundary: None,
            cut_chunk: Vec::new(),
            terminated: false,
        }
    }

    pub fn with_boundary_token(token: &str) -> RangeResponseDecoder {
        RangeResponseDecoder {
            boundary: Some(format!("--{}", token).into_boxed_str()),
            cut_chunk: Vec::new(),
            terminated: false,
        }
    }

    pub fn from_content_type(content_type: &str) -> RangeResponseDecoder {
        RangeResponseDecoder {
            boundary: parse_boundary(content_type),
            cut_chunk: Vec::new(),
            terminated: false,
        }
    }

    pub fn boundary(&self) -> Option<&str> {
        self.boundary.as_deref()
    }

    /// Re-arms the decoder for the next response on the same connection.
    pub fn reset(&mut self, content_type: Option<&str>) {
        self.boundary = content_type.and_then(parse_boundary);
        self.cut_chunk.clear();
        self.terminated = false;
    }

    pub fn decode_chunk(&mut self, chunk: &[u8]) -> Vec<u8> {
        let marker = match &self.boundary {
            Some(marker) => marker.clone(),
            None => return chunk.to_vec(),
        };
        let marker = marker.as_bytes();
        if self.terminated {
            return Vec::new();
        }
        let mut working = take(&mut self.cut_chunk);
        working.extend_from_slice(chunk);
        let mut out = Vec::with_capacity(working.len());
        let mut pos = 0;
        loop {
            match find(&working[pos..], marker) {
                Some(found) => {
                    let marker_start = pos + found;
                    // the CRLF preceding a boundary belongs to the delimiter
                    let delimiter_start = if working[pos..marker_start].ends_with(b"\r\n") {
                        marker_start - 2
                    } else {
                        marker_start
                    };
                    out.extend_from_slice(&working[pos..delimiter_start]);
                    let headers_start = marker_start + marker.len();
                    if working.len() < headers_start + 2 {
                        // not enough bytes to tell a part from the closing boundary
                        self.cut_chunk = working[delimiter_start..].to_vec();
                        return out;
                    }
                    if &working[headers_start..headers_start + 2] == b"--" {
                        self.terminated = true;
                        return out;
                    }
                    match find(&working[headers_start..], HEADERS_END) {
                        Some(end) => {
                            pos = headers_start + end + HEADERS_END.len();
                        }
                        None => {
                            // the header block is split across chunks, keep the
                            // whole unresolved tail for the next one
                            self.cut_chunk = working[delimiter_start..].to_vec();
                            return out;
                        }
                    }
                }
                None => {
                    let tail = &working[pos..];
                    let retained = retained_tail_len(tail, marker);
                    out.extend_from_slice(&tail[..tail.len() - retained]);
                    self.cut_chunk = tail[tail.len() - retained..].to_vec();
                    return out;
                }
            }
        }
    }

    /// Declares the response complete. Leftover framing at this point means
    /// the part headers never terminated.
    pub fn finish(&mut self) -> Result<()> {
        let leftover = take(&mut self.cut_chunk);
        if leftover.is_empty() {
            Ok(())
        } else {
            Err(Error::DecodeError(format!(
                "{} bytes of multipart framing left unresolved at the end of the response",
                leftover.len()
            )))
        }
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}

impl Default for RangeResponseDecoder {
    fn default() -> Self {
        Self::passthrough()
    }
}

fn parse_boundary(content_type: &str) -> Option<Box<str>> {
    let mut params = content_type.split(';');
    if !params.next()?.trim().eq_ignore_ascii_case(MULTIPART_BYTERANGES) {
        return None;
    }
    for param in params {
        if let Some(token) = param.trim().strip_prefix("boundary=") {
            let token = token.trim_matches('"');
            if !token.is_empty() {
                return Some(format!("--{}", token).into_boxed_str());
            }
        }
    }
    None
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

// The longest buffer suffix that could still turn into a boundary once the
// next chunk arrives, with or without the delimiter CRLF.
fn retained_tail_len(tail: &[u8], marker: &[u8]) -> usize {
    let mut delimiter = Vec::with_capacity(marker.len() + 2);
    delimiter.extend_from_slice(b"\r\n");
    delimiter.extend_from_slice(marker);
    prefix_suffix_overlap(tail, &delimiter).max(prefix_suffix_overlap(tail, marker))
}

fn prefix_suffix_overlap(tail: &[u8], pattern: &[u8]) -> usize {
    let longest = tail.len().min(pattern.len().saturating_sub(1));
    (1..=longest)
        .rev()
        .find(|&overlap| tail.ends_with(&pattern[..overlap]))
        .unwrap_or(0)
}
