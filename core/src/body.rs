// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};
use std::io::{Cursor, Read, Seek};

use bytes::Bytes;

use crate::{Error, Result};

/// A readable and seekable byte stream.
///
/// Blanket implemented for every `Read + Seek + Send` type.
pub trait SeekRead: Read + Seek + Send {}

impl<T: Read + Seek + Send> SeekRead for T {}

/// Body of an outbound request.
///
/// A body is either absent, a seekable stream that can be hashed and then
/// transmitted, or a one-shot reader that can only be transmitted.
pub struct Body(Inner);

enum Inner {
    Empty,
    Seekable(Box<dyn SeekRead>),
    Reader(Box<dyn Read + Send>),
}

impl Body {
    /// Create a request without body.
    pub fn empty() -> Self {
        Self(Inner::Empty)
    }

    /// Create a body from a seekable stream.
    ///
    /// The stream is read from its current position.
    pub fn from_seekable(r: impl Read + Seek + Send + 'static) -> Self {
        Self(Inner::Seekable(Box::new(r)))
    }

    /// Create a body from a one-shot reader.
    ///
    /// Such a body can be transmitted but not hashed.
    pub fn from_reader(r: impl Read + Send + 'static) -> Self {
        Self(Inner::Reader(Box::new(r)))
    }

    /// Returns true if no body is attached.
    ///
    /// A zero length body still counts as attached.
    pub fn is_empty(&self) -> bool {
        matches!(self.0, Inner::Empty)
    }

    /// Borrow the body as a seekable stream.
    ///
    /// - Returns `Ok(None)` if no body is attached.
    /// - Returns [`crate::ErrorKind::StreamNotSeekable`] for a one-shot reader.
    pub fn as_seekable(&mut self) -> Result<Option<&mut (dyn SeekRead + 'static)>> {
        match &mut self.0 {
            Inner::Empty => Ok(None),
            Inner::Seekable(r) => Ok(Some(r.as_mut())),
            Inner::Reader(_) => Err(Error::stream_not_seekable(
                "body stream must be seekable to compute its hash",
            )),
        }
    }

    /// Drain the remaining content for transmission.
    pub fn into_bytes(self) -> Result<Bytes> {
        let mut buf = Vec::new();
        let res = match self.0 {
            Inner::Empty => return Ok(Bytes::new()),
            Inner::Seekable(mut r) => r.read_to_end(&mut buf),
            Inner::Reader(mut r) => r.read_to_end(&mut buf),
        };
        res.map_err(|e| Error::stream_unreadable("read request body failed").with_source(e))?;

        Ok(Bytes::from(buf))
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl Debug for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Inner::Empty => f.write_str("Body::Empty"),
            Inner::Seekable(_) => f.write_str("Body::Seekable"),
            Inner::Reader(_) => f.write_str("Body::Reader"),
        }
    }
}

impl From<Bytes> for Body {
    fn from(bs: Bytes) -> Self {
        Self::from_seekable(Cursor::new(bs))
    }
}

impl From<Vec<u8>> for Body {
    fn from(bs: Vec<u8>) -> Self {
        Self::from(Bytes::from(bs))
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Self::from(Bytes::from(s))
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Self::from(Bytes::from_static(s.as_bytes()))
    }
}
