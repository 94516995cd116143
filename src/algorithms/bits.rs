//! MSB-first bit streams over byte buffers, shared by the tree description and the payload.

use std::io;

use arcode::bitbit::{BitReader, BitWriter, MSB};

/// Appends bits to a `Vec<u8>`, most significant bit first.
pub(crate) struct BitSink<'a> {
    writer: BitWriter<&'a mut Vec<u8>>,
    written: u64,
}

// A BitWriter over a Vec<u8> only fails if the Vec cannot grow, which aborts anyway.
fn vec_write(res: io::Result<()>) {
    if let Err(e) = res {
        panic!("OoM: {}", e)
    }
}

impl<'a> BitSink<'a> {
    pub(crate) fn new(buf: &'a mut Vec<u8>) -> Self {
        Self {
            writer: BitWriter::new(buf),
            written: 0,
        }
    }

    pub(crate) fn push_bit(&mut self, bit: bool) {
        vec_write(self.writer.write_bit(bit));
        self.written += 1;
    }

    pub(crate) fn push_byte(&mut self, byte: u8) {
        for shift in (0..8).rev() {
            self.push_bit((byte >> shift) & 1 == 1);
        }
    }

    pub(crate) fn push_code(&mut self, code: &[bool]) {
        for &bit in code {
            self.push_bit(bit);
        }
    }

    /// Zero-pads to a byte boundary and returns the number of meaningful bits written.
    pub(crate) fn finish(mut self) -> u64 {
        if self.written % 8 != 0 {
            vec_write(self.writer.pad_to_byte());
        }
        self.written
    }
}

/// Reads bits from a byte slice, most significant bit first, counting what it consumed.
pub(crate) struct BitSource<'a> {
    reader: BitReader<&'a [u8], MSB>,
    consumed: u64,
    available: u64,
}

impl<'a> BitSource<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self {
            reader: BitReader::new(data),
            consumed: 0,
            available: data.len() as u64 * 8,
        }
    }

    /// Returns `None` once the slice is exhausted.
    pub(crate) fn next_bit(&mut self) -> Option<bool> {
        if self.consumed == self.available {
            return None;
        }
        let bit = self.reader.read_bit().ok()?;
        self.consumed += 1;
        Some(bit)
    }

    pub(crate) fn next_byte(&mut self) -> Option<u8> {
        let mut byte = 0u8;
        for _ in 0..8 {
            byte = (byte << 1) | u8::from(self.next_bit()?);
        }
        Some(byte)
    }

    pub(crate) const fn consumed(&self) -> u64 {
        self.consumed
    }
}
