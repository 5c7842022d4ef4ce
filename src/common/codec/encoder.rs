pub use encode::*;

// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use std::mem::swap;

    use super::writer::{pad_remaining_capacity, push_segment, push_terminator};
    use crate::common::bitstream::BitStream;
    use crate::common::codec::{Mode, Segment, MODES};
    use crate::common::error::{QRError, QRResult};
    use crate::common::metadata::{ECLevel, Version};

    /// Encodes data into the smallest version that holds it at the given level.
    pub fn encode(data: &[u8], ecl: ECLevel) -> QRResult<(BitStream, Version)> {
        let (ver, segs) = find_optimal_version_and_segments(data, ecl)?;
        Ok((write_codewords(segs, ver, ecl), ver))
    }

    pub fn encode_with_version(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
        let bcap = ver.data_bit_capacity(ecl);
        let segs = compute_optimal_segments(data, ver);
        let sz: usize = segs.iter().map(|s| s.bit_len()).sum();
        if sz > bcap {
            return Err(QRError::DataTooLong);
        }
        Ok(write_codewords(segs, ver, ecl))
    }

    fn write_codewords(segs: Vec<Segment>, ver: Version, ecl: ECLevel) -> BitStream {
        let mut bs = BitStream::new(ver.data_bit_capacity(ecl));
        for seg in segs {
            push_segment(seg, &mut bs);
        }
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);
        bs
    }

    fn find_optimal_version_and_segments(
        data: &[u8],
        ecl: ECLevel,
    ) -> QRResult<(Version, Vec<Segment>)> {
        let mut segs = vec![];
        let mut sz = 0;
        for ver in Version::all() {
            let bcap = ver.data_bit_capacity(ecl);
            // Char count bit lengths only change at these versions
            if matches!(*ver, 1 | 10 | 27) {
                segs = compute_optimal_segments(data, ver);
                sz = segs.iter().map(|s| s.bit_len()).sum();
            }
            if sz <= bcap {
                return Ok((ver, segs));
            }
        }
        Err(QRError::DataTooLong)
    }

    // Dynamic programming to compute optimum mode segments. Costs are in 1/6th bits
    fn compute_optimal_segments(data: &[u8], ver: Version) -> Vec<Segment> {
        if data.is_empty() {
            return vec![];
        }

        let len = data.len();
        let mut prev_cost = [0usize; 3];
        MODES.iter().enumerate().for_each(|(i, &m)| prev_cost[i] = (4 + ver.char_cnt_bits(m)) * 6);
        let mut cur_cost = [usize::MAX; 3];
        let mut min_path = vec![[usize::MAX; 3]; len];
        for (i, b) in data.iter().enumerate() {
            for (j, to_mode) in MODES.iter().enumerate() {
                if !to_mode.contains(*b) {
                    continue;
                }
                let encoded_char_size = match to_mode {
                    Mode::Numeric => 20,
                    Mode::Alphanumeric => 33,
                    Mode::Byte => 48,
                };
                for (k, from_mode) in MODES.iter().enumerate() {
                    if prev_cost[k] == usize::MAX {
                        continue;
                    }
                    let mut cost = 0;
                    if to_mode != from_mode {
                        cost += prev_cost[k].div_ceil(6) * 6;
                        cost += (4 + ver.char_cnt_bits(*to_mode)) * 6;
                    } else {
                        cost += prev_cost[k];
                    }
                    cost += encoded_char_size;
                    if cost < cur_cost[j] {
                        cur_cost[j] = cost;
                        min_path[i][j] = k;
                    }
                }
            }
            swap(&mut prev_cost, &mut cur_cost);
            cur_cost.fill(usize::MAX);
        }

        let char_modes = trace_optimal_modes(min_path, prev_cost);
        build_segments(ver, char_modes, data)
    }

    // Backtrack min_path and identify optimal char mode
    fn trace_optimal_modes(min_path: Vec<[usize; 3]>, prev_cost: [usize; 3]) -> Vec<Mode> {
        let len = min_path.len();
        let mut mode_index = 0;
        for i in 1..3 {
            if prev_cost[i] < prev_cost[mode_index] {
                mode_index = i;
            }
        }
        let mut modes: Vec<Mode> = (0..len)
            .rev()
            .scan(mode_index, |mi, i| {
                let old_mi = *mi;
                *mi = min_path[i][*mi];
                Some(MODES[old_mi])
            })
            .collect();
        modes.reverse();
        modes
    }

    // Group consecutive chars of the same mode into segments
    fn build_segments(ver: Version, char_modes: Vec<Mode>, data: &[u8]) -> Vec<Segment> {
        let mode_bits = ver.mode_bits();
        let mut segs: Vec<Segment> = vec![];
        let mut seg_start = 0;
        let mut seg_mode = char_modes[0];
        for (i, &m) in char_modes.iter().enumerate().skip(1) {
            if seg_mode != m {
                let len_bits = ver.char_cnt_bits(seg_mode);
                segs.push(Segment::new(seg_mode, mode_bits, len_bits, &data[seg_start..i]));
                seg_mode = m;
                seg_start = i;
            }
        }
        let len_bits = ver.char_cnt_bits(seg_mode);
        segs.push(Segment::new(seg_mode, mode_bits, len_bits, &data[seg_start..]));

        segs
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use crate::common::bitstream::BitStream;
    use crate::common::codec::{Mode, Segment, PADDING_CODEWORDS};

    pub fn push_segment(seg: Segment, out: &mut BitStream) {
        push_header(&seg, out);
        match seg.mode {
            Mode::Numeric => push_numeric_data(seg.data, out),
            Mode::Alphanumeric => push_alphanumeric_data(seg.data, out),
            Mode::Byte => push_byte_data(seg.data, out),
        }
    }

    fn push_header(seg: &Segment, out: &mut BitStream) {
        out.push_bits(seg.mode as u16, seg.mode_bits);
        let char_cnt = seg.data.len();
        debug_assert!(
            char_cnt < (1 << seg.len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {}",
            seg.len_bits
        );
        out.push_bits(char_cnt as u16, seg.len_bits);
    }

    fn push_numeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(3) {
            let len = Mode::Numeric.encoded_len(chunk.len());
            out.push_bits(Mode::Numeric.encode_chunk(chunk), len);
        }
    }

    fn push_alphanumeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(2) {
            let len = Mode::Alphanumeric.encoded_len(chunk.len());
            out.push_bits(Mode::Alphanumeric.encode_chunk(chunk), len);
        }
    }

    fn push_byte_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(1) {
            out.push_bits(Mode::Byte.encode_chunk(chunk), 8);
        }
    }

    pub fn push_terminator(out: &mut BitStream) {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            out.push_bits(0, 8 - offset);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        debug_assert!(
            out.len() & 7 == 0,
            "Bit offset should be zero before padding codewords: {}",
            out.len() & 7
        );

        let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc as u16, 8);
        });
    }

}
