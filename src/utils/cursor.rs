use std::io::BufRead;
use std::io::Cursor;

use crate::{Error, Result};

pub trait EasyRead {
    fn read_until_checked(&mut self, byte: u8) -> Result<Vec<u8>>;
}

impl<T: AsRef<[u8]>> EasyRead for Cursor<T> {
    /// This function is just an abstraction to simplify other functions since this process is used
    /// a lot.
    ///
    /// It already handles the errors (not reading until expected byte or not reading at all)
    /// and returns them, so it can just be handled with the `?` operator.
    fn read_until_checked(&mut self, byte: u8) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        BufRead::read_until(self, byte, &mut buf)
            .map_err(|_| Error::corrupt(format!("could not read until byte {byte:#04x}")))?;
        if buf.pop() != Some(byte) {
            return Err(Error::corrupt(format!("expected byte {byte:#04x}")));
        }
        Ok(buf)
    }
}
