//! Request frames.
//!
//! Every request is sent as an array of bulk strings, the first element
//! being the command name.

use bytes::Bytes;
use mini_redis::Frame;

#[derive(Debug, Clone)]
pub struct Cmd {
    name: &'static str,
    args: Vec<Bytes>,
}

impl Cmd {
    pub fn new(name: &'static str) -> Cmd {
        Cmd {
            name,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl ToArg) -> Cmd {
        self.args.push(arg.to_arg());
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn into_frame(self) -> Frame {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(Frame::Bulk(Bytes::from_static(self.name.as_bytes())));
        parts.extend(self.args.into_iter().map(Frame::Bulk));
        Frame::Array(parts)
    }
}

/// Values that can be sent as a bulk string argument.
pub trait ToArg {
    fn to_arg(&self) -> Bytes;
}

impl ToArg for &str {
    fn to_arg(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }
}

impl ToArg for String {
    fn to_arg(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }
}

impl ToArg for Bytes {
    fn to_arg(&self) -> Bytes {
        self.clone()
    }
}

impl ToArg for i64 {
    fn to_arg(&self) -> Bytes {
        Bytes::from(self.to_string())
    }
}

impl ToArg for f64 {
    fn to_arg(&self) -> Bytes {
        // `Display` prints integral floats without a fraction or exponent.
        Bytes::from(self.to_string())
    }
}
