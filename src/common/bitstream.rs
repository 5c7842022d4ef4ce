// Bit stream
//------------------------------------------------------------------------------

/// MSB-first bit buffer bounded by the bit capacity of a version and level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: Vec::with_capacity(capacity.div_ceil(8)), len: 0, capacity }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn push(&mut self, bit: bool) {
        debug_assert!(
            self.len < self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + 1
        );

        let offset = self.len & 7;
        if offset == 0 {
            self.data.push(0);
        }
        if bit {
            let pos = self.len >> 3;
            self.data[pos] |= 0b1000_0000 >> offset;
        }
        self.len += 1;
    }

    /// Appends the low `size` bits of `bits`, most significant first.
    pub fn push_bits(&mut self, bits: u16, size: usize) {
        debug_assert!(size <= 16, "Cannot push more than 16 bits at once: {size}");
        debug_assert!(
            size >= (16 - bits.leading_zeros()) as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );

        for i in (0..size).rev() {
            self.push((bits >> i) & 1 == 1);
        }
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push_bits(b as u16, 8);
        }
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| (self.data[i >> 3] >> (7 - (i & 7))) & 1 == 1)
    }
}

#[cfg(test)]
mod bit_stream_tests {
    use super::BitStream;

    #[test]
    fn test_len() {
        let mut bs = BitStream::new(152);
        assert!(bs.is_empty());
        bs.push_bits(0, 0);
        assert_eq!(bs.len(), 0);
        bs.push_bits(0b1000, 4);
        assert_eq!(bs.len(), 4);
        bs.push_bits(0b1000, 8);
        assert_eq!(bs.len(), 12);
        bs.push_bits(0b1111111, 7);
        assert_eq!(bs.len(), 19);
    }

    #[test]
    fn test_push() {
        let mut bs = BitStream::new(2);
        bs.push(false);
        assert_eq!(bs.data(), [0b00000000]);
        bs.push(true);
        assert_eq!(bs.data(), [0b01000000]);
    }

    #[test]
    fn test_push_bits_across_bytes() {
        let mut bs = BitStream::new(152);
        bs.push_bits(0b101, 3);
        bs.push_bits(0b1_1001_1100, 9);
        bs.push_bits(0b0110, 4);
        assert_eq!(bs.data(), [0b10111001, 0b11000110]);
    }

    #[test]
    fn test_extend_and_bits() {
        let mut bs = BitStream::new(16);
        bs.extend(&[0xa5, 0x0f]);
        let bits: Vec<bool> = bs.bits().collect();
        let exp = [1, 0, 1, 0, 0, 1, 0, 1, 0, 0, 0, 0, 1, 1, 1, 1].map(|b| b == 1);
        assert_eq!(bits, exp);
    }

    #[test]
    #[should_panic]
    fn test_push_bits_capacity_overflow() {
        let mut bs = BitStream::new(8);
        bs.push_bits(0xff, 8);
        bs.push(true);
    }
}
