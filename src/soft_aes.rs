//! Software AES round primitives
//!
//! Bit-exact replacements for `AESENC` and `AESKEYGENASSIST` on targets
//! without hardware AES. The round function is table driven: four 1 KiB
//! T-tables fold SubBytes, ShiftRows and MixColumns into one lookup per
//! byte, and are generated from the S-box at compile time.

use crate::block::Block;

/// AES S-box
const SBOX: [u8; 256] = [
    0x63, 0x7c, 0x77, 0x7b, 0xf2, 0x6b, 0x6f, 0xc5, 0x30, 0x01, 0x67, 0x2b, 0xfe, 0xd7, 0xab, 0x76,
    0xca, 0x82, 0xc9, 0x7d, 0xfa, 0x59, 0x47, 0xf0, 0xad, 0xd4, 0xa2, 0xaf, 0x9c, 0xa4, 0x72, 0xc0,
    0xb7, 0xfd, 0x93, 0x26, 0x36, 0x3f, 0xf7, 0xcc, 0x34, 0xa5, 0xe5, 0xf1, 0x71, 0xd8, 0x31, 0x15,
    0x04, 0xc7, 0x23, 0xc3, 0x18, 0x96, 0x05, 0x9a, 0x07, 0x12, 0x80, 0xe2, 0xeb, 0x27, 0xb2, 0x75,
    0x09, 0x83, 0x2c, 0x1a, 0x1b, 0x6e, 0x5a, 0xa0, 0x52, 0x3b, 0xd6, 0xb3, 0x29, 0xe3, 0x2f, 0x84,
    0x53, 0xd1, 0x00, 0xed, 0x20, 0xfc, 0xb1, 0x5b, 0x6a, 0xcb, 0xbe, 0x39, 0x4a, 0x4c, 0x58, 0xcf,
    0xd0, 0xef, 0xaa, 0xfb, 0x43, 0x4d, 0x33, 0x85, 0x45, 0xf9, 0x02, 0x7f, 0x50, 0x3c, 0x9f, 0xa8,
    0x51, 0xa3, 0x40, 0x8f, 0x92, 0x9d, 0x38, 0xf5, 0xbc, 0xb6, 0xda, 0x21, 0x10, 0xff, 0xf3, 0xd2,
    0xcd, 0x0c, 0x13, 0xec, 0x5f, 0x97, 0x44, 0x17, 0xc4, 0xa7, 0x7e, 0x3d, 0x64, 0x5d, 0x19, 0x73,
    0x60, 0x81, 0x4f, 0xdc, 0x22, 0x2a, 0x90, 0x88, 0x46, 0xee, 0xb8, 0x14, 0xde, 0x5e, 0x0b, 0xdb,
    0xe0, 0x32, 0x3a, 0x0a, 0x49, 0x06, 0x24, 0x5c, 0xc2, 0xd3, 0xac, 0x62, 0x91, 0x95, 0xe4, 0x79,
    0xe7, 0xc8, 0x37, 0x6d, 0x8d, 0xd5, 0x4e, 0xa9, 0x6c, 0x56, 0xf4, 0xea, 0x65, 0x7a, 0xae, 0x08,
    0xba, 0x78, 0x25, 0x2e, 0x1c, 0xa6, 0xb4, 0xc6, 0xe8, 0xdd, 0x74, 0x1f, 0x4b, 0xbd, 0x8b, 0x8a,
    0x70, 0x3e, 0xb5, 0x66, 0x48, 0x03, 0xf6, 0x0e, 0x61, 0x35, 0x57, 0xb9, 0x86, 0xc1, 0x1d, 0x9e,
    0xe1, 0xf8, 0x98, 0x11, 0x69, 0xd9, 0x8e, 0x94, 0x9b, 0x1e, 0x87, 0xe9, 0xce, 0x55, 0x28, 0xdf,
    0x8c, 0xa1, 0x89, 0x0d, 0xbf, 0xe6, 0x42, 0x68, 0x41, 0x99, 0x2d, 0x0f, 0xb0, 0x54, 0xbb, 0x16,
];

/// Multiply by 2 in GF(2^8) with reduction polynomial x^8 + x^4 + x^3 + x + 1
#[inline(always)]
const fn gf_mul2(x: u8) -> u8 {
    (x << 1) ^ ((x >> 7) * 0x1b)
}

/// Multiply by 3 in GF(2^8): 3*x = 2*x + x
#[inline(always)]
const fn gf_mul3(x: u8) -> u8 {
    gf_mul2(x) ^ x
}

/// `T[i][x]` is the MixColumns column produced by S-box output `S[x]` sitting
/// in row `i`, so `T[i] = rotl(T[0], 8 * i)`.
const fn build_round_tables() -> [[u32; 256]; 4] {
    let mut tables = [[0u32; 256]; 4];
    let mut x = 0;
    while x < 256 {
        let s = SBOX[x];
        let column = u32::from_le_bytes([gf_mul2(s), s, s, gf_mul3(s)]);
        tables[0][x] = column;
        tables[1][x] = column.rotate_left(8);
        tables[2][x] = column.rotate_left(16);
        tables[3][x] = column.rotate_left(24);
        x += 1;
    }
    tables
}

static ROUND_TABLES: [[u32; 256]; 4] = build_round_tables();

/// One output column: row `r` is taken from input column `c + r` (ShiftRows).
#[inline(always)]
fn column(c0: u32, c1: u32, c2: u32, c3: u32) -> u32 {
    let [t0, t1, t2, t3] = &ROUND_TABLES;
    t0[(c0 & 0xff) as usize]
        ^ t1[((c1 >> 8) & 0xff) as usize]
        ^ t2[((c2 >> 16) & 0xff) as usize]
        ^ t3[(c3 >> 24) as usize]
}

/// Single AESENC round: SubBytes + ShiftRows + MixColumns + AddRoundKey
///
/// This is the raw round used ten times per lane by the scratchpad
/// network; there is no final-round variant.
#[inline(always)]
pub fn encrypt_round(block: Block, round_key: Block) -> Block {
    let [x0, x1, x2, x3] = block.words();
    let [k0, k1, k2, k3] = round_key.words();
    Block::from_words([
        column(x0, x1, x2, x3) ^ k0,
        column(x1, x2, x3, x0) ^ k1,
        column(x2, x3, x0, x1) ^ k2,
        column(x3, x0, x1, x2) ^ k3,
    ])
}

/// Apply the S-box to each byte of a word
#[inline(always)]
pub fn sub_word(word: u32) -> u32 {
    let [b0, b1, b2, b3] = word.to_le_bytes();
    u32::from_le_bytes([
        SBOX[b0 as usize],
        SBOX[b1 as usize],
        SBOX[b2 as usize],
        SBOX[b3 as usize],
    ])
}

/// AESKEYGENASSIST: `[SubWord(X1), RotWord(SubWord(X1)) ^ rcon, SubWord(X3), RotWord(SubWord(X3)) ^ rcon]`
///
/// RotWord on a little-endian lane is a right rotation by one byte.
#[inline(always)]
pub fn key_schedule_assist(block: Block, rcon: u8) -> Block {
    let [_, x1, _, x3] = block.words();
    let x1 = sub_word(x1);
    let x3 = sub_word(x3);
    let rcon = u32::from(rcon);
    Block::from_words([
        x1,
        x1.rotate_right(8) ^ rcon,
        x3,
        x3.rotate_right(8) ^ rcon,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Byte-oriented round straight from FIPS-197, independent of the T-tables
    fn ref_aesenc_round(state: &[u8; 16], round_key: &[u8; 16]) -> [u8; 16] {
        // SubBytes
        let mut s = [0u8; 16];
        for i in 0..16 {
            s[i] = SBOX[state[i] as usize];
        }
        // ShiftRows
        let t = s;
        for col in 0..4 {
            for row in 0..4 {
                s[col * 4 + row] = t[((col + row) % 4) * 4 + row];
            }
        }
        // MixColumns
        let mut out = [0u8; 16];
        for col in 0..4 {
            let i = col * 4;
            out[i] = gf_mul2(s[i]) ^ gf_mul3(s[i + 1]) ^ s[i + 2] ^ s[i + 3];
            out[i + 1] = s[i] ^ gf_mul2(s[i + 1]) ^ gf_mul3(s[i + 2]) ^ s[i + 3];
            out[i + 2] = s[i] ^ s[i + 1] ^ gf_mul2(s[i + 2]) ^ gf_mul3(s[i + 3]);
            out[i + 3] = gf_mul3(s[i]) ^ s[i + 1] ^ s[i + 2] ^ gf_mul2(s[i + 3]);
        }
        // AddRoundKey
        for i in 0..16 {
            out[i] ^= round_key[i];
        }
        out
    }

    fn test_inputs() -> Vec<([u8; 16], [u8; 16])> {
        let mut cases = vec![
            ([0u8; 16], [0u8; 16]),
            ([0xFF; 16], [0xFF; 16]),
            (
                core::array::from_fn(|i| i as u8),
                core::array::from_fn(|i| 16 + i as u8),
            ),
        ];
        // Cheap deterministic spread over the byte space
        let mut x: u32 = 0x9E37_79B9;
        for _ in 0..64 {
            let mut state = [0u8; 16];
            let mut key = [0u8; 16];
            for byte in state.iter_mut().chain(key.iter_mut()) {
                x ^= x << 13;
                x ^= x >> 17;
                x ^= x << 5;
                *byte = x as u8;
            }
            cases.push((state, key));
        }
        cases
    }

    #[test]
    fn test_sbox_tables_consistent() {
        assert_eq!(SBOX[0x00], 0x63);
        assert_eq!(SBOX[0x53], 0xed);
        assert_eq!(ROUND_TABLES[0][0x00], 0xa56363c6);
        for x in 0..256 {
            assert_eq!(ROUND_TABLES[1][x], ROUND_TABLES[0][x].rotate_left(8));
            assert_eq!(ROUND_TABLES[3][x], ROUND_TABLES[0][x].rotate_left(24));
        }
    }

    #[test]
    fn test_encrypt_round_known_vector() {
        let state: [u8; 16] = core::array::from_fn(|i| i as u8);
        let key: [u8; 16] = core::array::from_fn(|i| 16 + i as u8);

        let out = encrypt_round(Block::from_bytes(&state), Block::from_bytes(&key));

        assert_eq!(hex::encode(out.to_bytes()), "7a7b4e5638782546a8c0477a3b813f43");
    }

    #[test]
    fn test_encrypt_round_matches_byte_reference() {
        for (i, (state, key)) in test_inputs().iter().enumerate() {
            let table = encrypt_round(Block::from_bytes(state), Block::from_bytes(key));
            let reference = ref_aesenc_round(state, key);
            assert_eq!(table.to_bytes(), reference, "round mismatch on case {}", i);
        }
    }

    /// `aes::hazmat::cipher_round` is AESENC, dispatched to AES-NI / ARMv8
    /// crypto extensions when the CPU has them.
    #[test]
    fn test_encrypt_round_matches_hardware_round() {
        for (i, (state, key)) in test_inputs().iter().enumerate() {
            let mut hw = aes::Block::clone_from_slice(state);
            aes::hazmat::cipher_round(&mut hw, &aes::Block::clone_from_slice(key));

            let soft = encrypt_round(Block::from_bytes(state), Block::from_bytes(key));
            assert_eq!(
                &soft.to_bytes()[..],
                hw.as_slice(),
                "hardware round mismatch on case {}",
                i
            );
        }
    }

    #[test]
    fn test_key_schedule_assist_intel_vector() {
        // Intel AES-NI white paper, AESKEYGENASSIST example (RCON = 0x01)
        let input = Block::from_words([0x16157e2b, 0xa6d2ae28, 0x8815f7ab, 0x3c4fcf09]);
        let out = key_schedule_assist(input, 0x01);

        assert_eq!(
            out.words(),
            [0x24b5e434, 0x3424b5e5, 0xeb848a01, 0x01eb848b]
        );
    }

    #[test]
    fn test_key_schedule_assist_rcon_lanes() {
        let input = Block::from_bytes(&core::array::from_fn(|i| 0x10 + i as u8));

        let with_rcon = key_schedule_assist(input, 0x01);
        let without = key_schedule_assist(input, 0x00);

        assert_eq!(hex::encode(with_rcon.to_bytes()), "fa5947f05847f0fa9ca472c0a572c09c");
        assert_eq!(hex::encode(without.to_bytes()), "fa5947f05947f0fa9ca472c0a472c09c");

        // RCON only touches the low byte of lanes 1 and 3
        let diff = with_rcon ^ without;
        assert_eq!(diff.words(), [0, 0x01, 0, 0x01]);
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_key_schedule_assist_matches_aesni() {
        use core::arch::x86_64::{
            __m128i, _mm_aeskeygenassist_si128, _mm_loadu_si128, _mm_storeu_si128,
        };

        #[target_feature(enable = "aes")]
        unsafe fn hw_assist<const RCON: i32>(input: &[u8; 16]) -> [u8; 16] {
            let mut out = [0u8; 16];
            unsafe {
                let x = _mm_loadu_si128(input.as_ptr() as *const __m128i);
                let y = _mm_aeskeygenassist_si128::<RCON>(x);
                _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, y);
            }
            out
        }

        if !std::is_x86_feature_detected!("aes") {
            return;
        }

        for (state, _) in test_inputs() {
            let block = Block::from_bytes(&state);
            let hw = unsafe { hw_assist::<0x01>(&state) };
            assert_eq!(key_schedule_assist(block, 0x01).to_bytes(), hw);
            let hw = unsafe { hw_assist::<0x08>(&state) };
            assert_eq!(key_schedule_assist(block, 0x08).to_bytes(), hw);
            let hw = unsafe { hw_assist::<0x00>(&state) };
            assert_eq!(key_schedule_assist(block, 0x00).to_bytes(), hw);
        }
    }

    #[test]
    fn test_sub_word() {
        assert_eq!(sub_word(0x00000000), 0x63636363);
        assert_eq!(sub_word(0x53000001), 0xed63637c);
    }
}
