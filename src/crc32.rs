#![forbid(unsafe_code)]

//! CRC-32 (IEEE 802.3, reflected) as used by PNG, gzip, and zip.
//!
//! There are four implementations here. They all compute the same value, they
//! just trade table size for speed:
//!
//! * [`crc32_bitwise`]: no table at all, one bit per step.
//! * [`crc32_half_byte`]: a 16 entry table, one nibble per step.
//! * [`crc32_one_byte`]: a 256 entry table, one byte per step.
//! * [`crc32_four_byte`]: four 256 entry tables, four bytes per step
//!   ("slicing-by-4").
//!
//! [`crc32`] is the one you should normally call, it uses the four-byte form.
//!
//! Every function takes the result of a previous call as `previous`, which
//! lets you checksum data that isn't contiguous in memory. Pass 0 to start
//! fresh.
//!
//! ```
//! use imgstream::crc32;
//! let whole = crc32(b"IENDabc", 0);
//! let split = crc32(b"abc", crc32(b"IEND", 0));
//! assert_eq!(whole, split);
//! assert_eq!(crc32(b"123456789", 0), 0xCBF4_3926);
//! ```

/// The reflected form of the CRC-32 polynomial `0x04C11DB7`.
pub const CRC32_POLYNOMIAL: u32 = 0xEDB8_8320;

const CRC_NIBBLE_TABLE: [u32; 16] = make_crc_table::<16>(4);
const CRC_TABLES: [[u32; 256]; 4] = make_slicing_tables();

/// Builds a table of `N` entries where each entry has been run through `steps`
/// single-bit division steps.
const fn make_crc_table<const N: usize>(steps: u32) -> [u32; N] {
  let mut out = [0; N];
  let mut n = 0;
  while n < N {
    let mut c = n as u32;
    let mut k = 0;
    while k < steps {
      if (c & 1) != 0 {
        c = CRC32_POLYNOMIAL ^ (c >> 1);
      } else {
        c >>= 1;
      }
      //
      k += 1;
    }
    out[n] = c;
    //
    n += 1;
  }
  out
}

const fn make_slicing_tables() -> [[u32; 256]; 4] {
  let mut out = [[0; 256]; 4];
  out[0] = make_crc_table::<256>(8);
  let mut n = 0;
  while n < 256 {
    let mut t = 1;
    while t < 4 {
      let prev = out[t - 1][n];
      out[t][n] = (prev >> 8) ^ out[0][(prev & 0xFF) as usize];
      t += 1;
    }
    //
    n += 1;
  }
  out
}

/// Bit-at-a-time CRC-32.
#[inline]
#[must_use]
pub fn crc32_bitwise(data: &[u8], previous: u32) -> u32 {
  let mut crc = !previous;
  for &byte in data {
    crc ^= u32::from(byte);
    for _ in 0..8 {
      crc = (crc >> 1) ^ (0_u32.wrapping_sub(crc & 1) & CRC32_POLYNOMIAL);
    }
  }
  !crc
}

/// Nibble-at-a-time CRC-32, using a 16 entry table.
#[inline]
#[must_use]
pub fn crc32_half_byte(data: &[u8], previous: u32) -> u32 {
  let mut crc = !previous;
  for &byte in data {
    crc = CRC_NIBBLE_TABLE[((crc ^ u32::from(byte)) & 0x0F) as usize] ^ (crc >> 4);
    crc = CRC_NIBBLE_TABLE[((crc ^ u32::from(byte >> 4)) & 0x0F) as usize] ^ (crc >> 4);
  }
  !crc
}

#[inline]
fn update_one_byte(mut crc: u32, data: &[u8]) -> u32 {
  for &byte in data {
    let i = (crc ^ u32::from(byte)) as u8 as usize;
    crc = CRC_TABLES[0][i] ^ (crc >> 8);
  }
  crc
}

/// Byte-at-a-time CRC-32, using a 256 entry table.
#[inline]
#[must_use]
pub fn crc32_one_byte(data: &[u8], previous: u32) -> u32 {
  !update_one_byte(!previous, data)
}

/// Four-bytes-at-a-time CRC-32 ("slicing-by-4").
#[must_use]
pub fn crc32_four_byte(data: &[u8], previous: u32) -> u32 {
  let mut crc = !previous;
  let mut chunks = data.chunks_exact(4);
  for chunk in &mut chunks {
    // the lowest byte of the accumulator pairs with the first data byte no
    // matter what the host's byte order is.
    crc ^= u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    crc = CRC_TABLES[3][(crc & 0xFF) as usize]
      ^ CRC_TABLES[2][((crc >> 8) & 0xFF) as usize]
      ^ CRC_TABLES[1][((crc >> 16) & 0xFF) as usize]
      ^ CRC_TABLES[0][(crc >> 24) as usize];
  }
  !update_one_byte(crc, chunks.remainder())
}

/// The default CRC-32, currently [`crc32_four_byte`].
#[inline]
#[must_use]
pub fn crc32(data: &[u8], previous: u32) -> u32 {
  crc32_four_byte(data, previous)
}
