//! Fortran unformatted sequential record transport.
//!
//! The MRCONEE file is a concatenation of length-delimited binary records:
//! a `u32` leading marker holding the payload byte length, the payload, and
//! a trailing marker equal to the leading one. All values are little-endian.
//!
//! [`UnfFile`] walks these records over a memory map and supports the three
//! motions the decoder needs: peek the next record's size without consuming
//! it, consume one record, and rewind by exactly one record.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use mrconee_core::error::{Error, FormatError};
use mrconee_core::types::IntWidth;
use num_complex::Complex;

const MARKER_SIZE: usize = 4;

pub struct UnfFile {
    mmap: Mmap,
    pos: usize,
    // position before the most recent read_record, for backspace()
    prev: Option<usize>,
}

impl UnfFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self {
            mmap,
            pos: 0,
            prev: None,
        })
    }

    fn bytes(&self) -> &[u8] {
        self.mmap.as_ref()
    }

    /// Byte length of the next record, without consuming it.
    pub fn next_record_size(&self) -> Result<u32, FormatError> {
        read_u32(self.bytes(), self.pos)
    }

    /// Consumes one record and returns its payload.
    pub fn read_record(&mut self) -> Result<&[u8], FormatError> {
        let at = self.pos;
        let leading = read_u32(self.bytes(), at)?;
        let len = leading as usize;
        let payload_start = at + MARKER_SIZE;
        let trailing_at = payload_start
            .checked_add(len)
            .ok_or(FormatError::Truncated {
                at: at as u64,
                needed: len,
            })?;
        let trailing = read_u32(self.bytes(), trailing_at)?;
        if trailing != leading {
            return Err(FormatError::BadRecordMarker {
                at: at as u64,
                leading,
                trailing,
            });
        }
        self.prev = Some(at);
        self.pos = trailing_at + MARKER_SIZE;
        Ok(&self.mmap[payload_start..trailing_at])
    }

    /// Rewinds past the most recently consumed record.
    ///
    /// One level deep, matching Fortran BACKSPACE as the decoder uses it;
    /// a no-op when nothing has been read since the last rewind.
    pub fn backspace(&mut self) {
        if let Some(at) = self.prev.take() {
            self.pos = at;
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.mmap.len()
    }
}

/// Sequential typed reads over one record's payload.
///
/// Integer fields are decoded at the probed width, so every record decoder
/// shares one read primitive instead of branching on 4-byte/8-byte layouts.
/// The cursor counts successfully decoded logical fields; when a schema is
/// attached, running out of payload is reported as a field-count mismatch
/// for that record.
pub struct RecordCursor<'a> {
    buf: &'a [u8],
    pos: usize,
    width: IntWidth,
    fields: usize,
    schema: Option<(&'static str, usize)>,
}

impl<'a> RecordCursor<'a> {
    pub fn new(buf: &'a [u8], width: IntWidth) -> Self {
        Self {
            buf,
            pos: 0,
            width,
            fields: 0,
            schema: None,
        }
    }

    /// Attaches the record name and required logical field count used in
    /// `FieldCountMismatch` diagnostics.
    pub fn with_schema(mut self, record: &'static str, expected: usize) -> Self {
        self.schema = Some((record, expected));
        self
    }

    pub fn fields_decoded(&self) -> usize {
        self.fields
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        let end = self.pos.checked_add(n);
        match end {
            Some(end) if end <= self.buf.len() => {
                let slice = &self.buf[self.pos..end];
                self.pos = end;
                Ok(slice)
            }
            _ => match self.schema {
                Some((record, expected)) => Err(FormatError::FieldCountMismatch {
                    record,
                    expected,
                    got: self.fields,
                }),
                None => Err(FormatError::Truncated {
                    at: self.pos as u64,
                    needed: n,
                }),
            },
        }
    }

    fn take_int(&mut self) -> Result<i64, FormatError> {
        let v = match self.width {
            IntWidth::Four => i64::from(i32::from_le_bytes(to_array::<4>(self.take(4)?))),
            IntWidth::Eight => i64::from_le_bytes(to_array::<8>(self.take(8)?)),
        };
        Ok(v)
    }

    fn take_f64(&mut self) -> Result<f64, FormatError> {
        Ok(f64::from_le_bytes(to_array::<8>(self.take(8)?)))
    }

    /// One integer scalar at the configured width.
    pub fn read_int(&mut self) -> Result<i64, FormatError> {
        let v = self.take_int()?;
        self.fields += 1;
        Ok(v)
    }

    /// One double-precision real (always 8 bytes, regardless of width).
    pub fn read_f64(&mut self) -> Result<f64, FormatError> {
        let v = self.take_f64()?;
        self.fields += 1;
        Ok(v)
    }

    /// A raw character run, counted as one logical field.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        let slice = self.take(n)?;
        self.fields += 1;
        Ok(slice)
    }

    /// An integer array at the configured width, one logical field.
    pub fn read_int_array(&mut self, n: usize) -> Result<Vec<i64>, FormatError> {
        // capacity from the payload, not the caller's count
        let mut out = Vec::with_capacity(n.min(self.remaining() / self.width.bytes()));
        for _ in 0..n {
            out.push(self.take_int()?);
        }
        self.fields += 1;
        Ok(out)
    }

    /// A complex double-precision array, one logical field.
    pub fn read_complex_array(&mut self, n: usize) -> Result<Vec<Complex<f64>>, FormatError> {
        let mut out = Vec::with_capacity(n.min(self.remaining() / 16));
        for _ in 0..n {
            let re = self.take_f64()?;
            let im = self.take_f64()?;
            out.push(Complex::new(re, im));
        }
        self.fields += 1;
        Ok(out)
    }
}

fn to_array<const N: usize>(slice: &[u8]) -> [u8; N] {
    // take() always hands out exactly N bytes
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    out
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32, FormatError> {
    let end = offset.checked_add(4).ok_or(FormatError::Truncated {
        at: offset as u64,
        needed: 4,
    })?;
    if end > bytes.len() {
        return Err(FormatError::Truncated {
            at: offset as u64,
            needed: 4,
        });
    }
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..end]);
    Ok(u32::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn push_record(buf: &mut Vec<u8>, payload: &[u8]) {
        buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        buf.extend_from_slice(payload);
        buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    }

    fn write_temp(bytes: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MRCONEE");
        let mut f = File::create(&path).unwrap();
        f.write_all(bytes).unwrap();
        (dir, path)
    }

    #[test]
    fn walks_records_in_order() {
        let mut bytes = Vec::new();
        push_record(&mut bytes, b"first");
        push_record(&mut bytes, b"second!");
        let (_dir, path) = write_temp(&bytes);

        let mut unf = UnfFile::open(&path).unwrap();
        assert_eq!(unf.next_record_size().unwrap(), 5);
        assert_eq!(unf.read_record().unwrap(), b"first");
        assert_eq!(unf.next_record_size().unwrap(), 7);
        assert_eq!(unf.read_record().unwrap(), b"second!");
        assert!(unf.is_exhausted());
    }

    #[test]
    fn peek_does_not_consume() {
        let mut bytes = Vec::new();
        push_record(&mut bytes, b"only");
        let (_dir, path) = write_temp(&bytes);

        let mut unf = UnfFile::open(&path).unwrap();
        assert_eq!(unf.next_record_size().unwrap(), 4);
        assert_eq!(unf.next_record_size().unwrap(), 4);
        assert_eq!(unf.read_record().unwrap(), b"only");
    }

    #[test]
    fn backspace_rereads_the_same_record() {
        let mut bytes = Vec::new();
        push_record(&mut bytes, b"abc");
        push_record(&mut bytes, b"def");
        let (_dir, path) = write_temp(&bytes);

        let mut unf = UnfFile::open(&path).unwrap();
        assert_eq!(unf.read_record().unwrap(), b"abc");
        unf.backspace();
        assert_eq!(unf.read_record().unwrap(), b"abc");
        assert_eq!(unf.read_record().unwrap(), b"def");
    }

    #[test]
    fn rejects_mismatched_markers() {
        let mut bytes = Vec::new();
        push_record(&mut bytes, b"abcd");
        let n = bytes.len();
        bytes[n - 4..].copy_from_slice(&9u32.to_le_bytes());
        let (_dir, path) = write_temp(&bytes);

        let mut unf = UnfFile::open(&path).unwrap();
        let err = unf.read_record().unwrap_err();
        assert!(matches!(err, FormatError::BadRecordMarker { .. }));
    }

    #[test]
    fn rejects_truncated_record() {
        let mut bytes = Vec::new();
        push_record(&mut bytes, b"abcdef");
        bytes.truncate(bytes.len() - 6);
        let (_dir, path) = write_temp(&bytes);

        let mut unf = UnfFile::open(&path).unwrap();
        let err = unf.read_record().unwrap_err();
        assert!(matches!(err, FormatError::Truncated { .. }));
    }

    #[test]
    fn cursor_decodes_both_integer_widths() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&7i32.to_le_bytes());
        payload.extend_from_slice(&(-3i32).to_le_bytes());
        payload.extend_from_slice(&1.5f64.to_le_bytes());
        let mut cur = RecordCursor::new(&payload, IntWidth::Four);
        assert_eq!(cur.read_int().unwrap(), 7);
        assert_eq!(cur.read_int().unwrap(), -3);
        assert_eq!(cur.read_f64().unwrap(), 1.5);
        assert_eq!(cur.fields_decoded(), 3);
        assert_eq!(cur.remaining(), 0);

        let mut payload = Vec::new();
        payload.extend_from_slice(&7i64.to_le_bytes());
        payload.extend_from_slice(&(-3i64).to_le_bytes());
        payload.extend_from_slice(&1.5f64.to_le_bytes());
        let mut cur = RecordCursor::new(&payload, IntWidth::Eight);
        assert_eq!(cur.read_int().unwrap(), 7);
        assert_eq!(cur.read_int().unwrap(), -3);
        assert_eq!(cur.read_f64().unwrap(), 1.5);
    }

    #[test]
    fn cursor_with_schema_reports_field_count() {
        let payload = 5i32.to_le_bytes();
        let mut cur = RecordCursor::new(&payload, IntWidth::Four).with_schema("header", 8);
        assert_eq!(cur.read_int().unwrap(), 5);
        let err = cur.read_int().unwrap_err();
        match err {
            FormatError::FieldCountMismatch {
                record,
                expected,
                got,
            } => {
                assert_eq!(record, "header");
                assert_eq!(expected, 8);
                assert_eq!(got, 1);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn cursor_without_schema_reports_truncation() {
        let payload = [0u8; 2];
        let mut cur = RecordCursor::new(&payload, IntWidth::Four);
        assert!(matches!(
            cur.read_int().unwrap_err(),
            FormatError::Truncated { .. }
        ));
    }

    #[test]
    fn cursor_complex_array() {
        let mut payload = Vec::new();
        for v in [1.0f64, -2.0, 0.5, 0.25] {
            payload.extend_from_slice(&v.to_le_bytes());
        }
        let mut cur = RecordCursor::new(&payload, IntWidth::Four);
        let zs = cur.read_complex_array(2).unwrap();
        assert_eq!(zs[0], Complex::new(1.0, -2.0));
        assert_eq!(zs[1], Complex::new(0.5, 0.25));
        assert_eq!(cur.fields_decoded(), 1);
    }
}
